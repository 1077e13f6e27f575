use std::process::Command;

use git2::{Commit, Oid, Repository, Signature};
use pretty_assertions::assert_eq;
use release_scope::cli::{run_release_scope, ScopeWorkflowArgs};
use release_scope::config::GitConfig;
use release_scope::domain::{BranchRef, SHORT_HASH_LEN};
use release_scope::git::{Git2Gateway, SystemGitGateway, VersionControlGateway};
use release_scope::marker::StaticMarkerSource;
use release_scope::ReleaseScopeError;
use tempfile::TempDir;

/// Repository with a `main` branch and an `origin/release` tracking ref.
///
/// main:    c4 "WR-3: checkout" <- c3 "WR-2: new flow" <- c2 "merge" <- c1 "WR-1: init"
/// release: r3 "WR-2: new flow" <- c2 "merge" <- c1 "WR-1: init" (r3 is a cherry-pick)
struct Fixture {
    _dir: TempDir,
    repo: Repository,
    main: Vec<Oid>,
    release_tip: Oid,
}

fn commit_on(repo: &Repository, update_ref: Option<&str>, parent: Option<Oid>, message: &str) -> Oid {
    let sig = Signature::now("Test Author", "test@example.com").unwrap();
    let tree_id = repo.index().unwrap().write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();
    let parent_commit = parent.map(|oid| repo.find_commit(oid).unwrap());
    let parents: Vec<&Commit> = parent_commit.iter().collect();
    repo.commit(update_ref, &sig, &sig, message, &tree, &parents)
        .unwrap()
}

fn fixture() -> Fixture {
    let dir = TempDir::new().unwrap();
    let repo = Repository::init(dir.path()).unwrap();
    repo.set_head("refs/heads/main").unwrap();

    let c1 = commit_on(&repo, Some("HEAD"), None, "WR-1: init\n\nlonger body text");
    let c2 = commit_on(&repo, Some("HEAD"), Some(c1), "merge");
    let c3 = commit_on(&repo, Some("HEAD"), Some(c2), "WR-2: new flow");
    let c4 = commit_on(&repo, Some("HEAD"), Some(c3), "WR-3: checkout");

    let r3 = commit_on(&repo, None, Some(c2), "WR-2: new flow");
    repo.reference("refs/remotes/origin/release", r3, true, "test")
        .unwrap();
    repo.reference("refs/remotes/origin/main", c4, true, "test")
        .unwrap();

    Fixture {
        _dir: dir,
        repo,
        main: vec![c4, c3, c2, c1],
        release_tip: r3,
    }
}

fn short(oid: Oid) -> String {
    oid.to_string()[..SHORT_HASH_LEN].to_string()
}

fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

#[test]
fn test_git2_history_is_most_recent_first() {
    let fixture = fixture();
    let path = fixture.repo.path().to_path_buf();
    let gateway = Git2Gateway::open(&path).unwrap();

    let history = gateway.history(&BranchRef::local("main")).unwrap();

    let hashes: Vec<String> = history.iter().map(|r| r.hash.to_string()).collect();
    let expected: Vec<String> = fixture.main.iter().copied().map(short).collect();
    assert_eq!(hashes, expected);

    let subjects: Vec<&str> = history.iter().map(|r| r.subject.as_str()).collect();
    assert_eq!(subjects, vec!["WR-3: checkout", "WR-2: new flow", "merge", "WR-1: init"]);
}

#[test]
fn test_git2_reads_remote_tracking_branch() {
    let fixture = fixture();
    let gateway = Git2Gateway::from_git2(Repository::open(fixture.repo.path()).unwrap());

    let history = gateway.history(&BranchRef::new("release", "origin")).unwrap();
    assert_eq!(history.len(), 3);
    assert_eq!(history.get(0).unwrap().hash.to_string(), short(fixture.release_tip));
}

#[test]
fn test_git2_current_branch() {
    let fixture = fixture();
    let gateway = Git2Gateway::from_git2(Repository::open(fixture.repo.path()).unwrap());
    assert_eq!(gateway.current_branch().unwrap(), "main");
}

#[test]
fn test_git2_unknown_branch_is_history_failure() {
    let fixture = fixture();
    let gateway = Git2Gateway::from_git2(Repository::open(fixture.repo.path()).unwrap());

    let err = gateway.history(&BranchRef::new("nope", "origin")).unwrap_err();
    assert!(matches!(err, ReleaseScopeError::HistoryRetrieval { ref branch, .. } if branch == "origin/nope"));
}

#[test]
fn test_git2_fetch_unknown_remote_fails() {
    let fixture = fixture();
    let gateway = Git2Gateway::from_git2(Repository::open(fixture.repo.path()).unwrap());
    assert!(gateway.fetch("upstream").is_err());
}

#[test]
fn test_scope_over_real_repository() {
    let fixture = fixture();
    let gateway = Git2Gateway::from_git2(Repository::open(fixture.repo.path()).unwrap());

    // Deployed commit is "merge"; the cherry-picked WR-2 on release is still pending
    let marker = StaticMarkerSource::new(fixture.main[2].to_string());
    let args = ScopeWorkflowArgs {
        release_branch: Some("release".to_string()),
        mainline_branch: Some("main".to_string()),
        fetch: false,
    };

    let scope = run_release_scope(&args, &GitConfig::default(), &gateway, &marker).unwrap();

    assert_eq!(scope.boundary, 1);
    let subjects: Vec<&str> = scope.unreleased.iter().map(|c| c.subject.as_str()).collect();
    assert_eq!(subjects, vec!["WR-3: checkout", "WR-2: new flow"]);
    let tickets: Vec<&str> = scope.tickets.iter().map(|t| t.as_str()).collect();
    assert_eq!(tickets, vec!["WR-2", "WR-3"]);
}

#[test]
fn test_system_and_git2_backends_agree() {
    if !git_available() {
        eprintln!("git executable not found, skipping");
        return;
    }

    let fixture = fixture();
    let workdir = fixture.repo.workdir().unwrap().to_path_buf();
    let git2_gateway = Git2Gateway::open(&workdir).unwrap();
    let system_gateway = SystemGitGateway::new(&workdir);

    for branch in [BranchRef::local("main"), BranchRef::new("release", "origin")] {
        let from_git2 = git2_gateway.history(&branch).unwrap();
        let from_system = system_gateway.history(&branch).unwrap();
        assert_eq!(from_system, from_git2, "histories differ for {}", branch);
    }

    assert_eq!(system_gateway.current_branch().unwrap(), "main");
}
