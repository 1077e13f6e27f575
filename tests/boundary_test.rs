use release_scope::boundary::{locate, BoundaryWarning, BOUNDARY_DIAGNOSTIC_ENTRIES};
use release_scope::domain::{BranchHistory, ShortHash};
use release_scope::ReleaseScopeError;

fn history_of(len: usize) -> BranchHistory {
    BranchHistory::from_entries((0..len).map(|i| (format!("c{:08}", i), format!("WR-{}: change", i))))
}

// ============================================================================
// locate
// ============================================================================

#[test]
fn test_locate_returns_smallest_matching_index() {
    let history = BranchHistory::from_entries(vec![
        ("aaaaaaaaa", "newest"),
        ("bbbbbbbbb", "deployed"),
        ("ccccccccc", "older"),
        ("bbbbbbbbb", "repeated hash"),
    ]);

    let index = locate(&history, &ShortHash::new("bbbbbbbbb")).unwrap();
    assert_eq!(index, 1, "first occurrence should win");
}

#[test]
fn test_locate_every_position() {
    let history = history_of(12);
    for (i, record) in history.iter().enumerate() {
        assert_eq!(locate(&history, &record.hash).unwrap(), i);
    }
}

#[test]
fn test_locate_absent_marker_payload_is_truncated() {
    let history = history_of(50);
    let err = locate(&history, &ShortHash::new("ffffffff")).unwrap_err();

    match err {
        ReleaseScopeError::BoundaryNotFound { recent, .. } => {
            assert_eq!(recent.len(), BOUNDARY_DIAGNOSTIC_ENTRIES);
            assert_eq!(recent.as_slice(), history.head(30));
        }
        other => panic!("expected BoundaryNotFound, got: {}", other),
    }
}

#[test]
fn test_locate_absent_marker_message() {
    let history = history_of(3);
    let message = locate(&history, &ShortHash::new("ffffffff"))
        .unwrap_err()
        .to_string();

    assert!(
        message.contains("ffffffff"),
        "Message should contain the marker, got: {}",
        message
    );
    assert!(
        message.contains("c00000000 WR-0: change"),
        "Message should list the most recent entry, got: {}",
        message
    );
}

// ============================================================================
// BoundaryWarning Display Tests
// ============================================================================

#[test]
fn test_boundary_warning_pending_display() {
    let warning = BoundaryWarning::PendingReleaseCommits {
        marker: "abc123def".to_string(),
        count: 3,
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("3 commits newer"),
        "Message should mention the pending count, got: {}",
        display_msg
    );
    assert!(display_msg.contains("abc123def"));
}

#[test]
fn test_boundary_warning_no_unreleased_display() {
    let warning = BoundaryWarning::NoUnreleasedChanges {
        mainline: "origin/master".to_string(),
    };

    assert_eq!(warning.to_string(), "No unreleased changes on 'origin/master'");
}

#[test]
fn test_boundary_warning_duplicate_subject_display() {
    let warning = BoundaryWarning::DuplicateSubject {
        subject: "merge".to_string(),
        occurrences: 2,
    };

    let display_msg = warning.to_string();
    assert!(display_msg.contains("'merge'"));
    assert!(display_msg.contains("2 times"));
}
