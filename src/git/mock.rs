use std::cell::RefCell;
use std::collections::HashMap;

use crate::domain::{BranchHistory, BranchRef};
use crate::error::{ReleaseScopeError, Result};
use crate::git::VersionControlGateway;

/// Mock gateway for testing without a repository
pub struct MockGateway {
    histories: HashMap<String, BranchHistory>,
    current_branch: String,
    fetch_error: Option<String>,
    fetched: RefCell<Vec<String>>,
}

impl MockGateway {
    /// Create a new empty mock gateway checked out on `master`
    pub fn new() -> Self {
        MockGateway {
            histories: HashMap::new(),
            current_branch: "master".to_string(),
            fetch_error: None,
            fetched: RefCell::new(Vec::new()),
        }
    }

    /// Register the history returned for a revision such as `origin/release`
    pub fn add_history(&mut self, revision: impl Into<String>, history: BranchHistory) {
        self.histories.insert(revision.into(), history);
    }

    /// Set the branch reported by `current_branch`
    pub fn set_current_branch(&mut self, branch: impl Into<String>) {
        self.current_branch = branch.into();
    }

    /// Make every `fetch` call fail with `reason`
    pub fn fail_fetch(&mut self, reason: impl Into<String>) {
        self.fetch_error = Some(reason.into());
    }

    /// Remotes passed to `fetch`, in call order
    pub fn fetched(&self) -> Vec<String> {
        self.fetched.borrow().clone()
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionControlGateway for MockGateway {
    fn history(&self, branch: &BranchRef) -> Result<BranchHistory> {
        let revision = branch.revision();
        self.histories
            .get(&revision)
            .cloned()
            .ok_or_else(|| ReleaseScopeError::history(revision, "unknown revision"))
    }

    fn current_branch(&self) -> Result<String> {
        Ok(self.current_branch.clone())
    }

    fn fetch(&self, remote: &str) -> Result<()> {
        self.fetched.borrow_mut().push(remote.to_string());
        match &self.fetch_error {
            Some(reason) => Err(ReleaseScopeError::history(remote, reason)),
            None => Ok(()),
        }
    }
}
