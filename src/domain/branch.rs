use std::fmt;

/// A branch as read by the gateway, optionally through a remote-tracking ref
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchRef {
    pub name: String,
    pub remote: Option<String>,
}

impl BranchRef {
    /// Read `name` through `remote`'s tracking ref; an empty remote means the local branch
    pub fn new(name: impl Into<String>, remote: &str) -> Self {
        let remote = remote.trim();
        BranchRef {
            name: name.into(),
            remote: (!remote.is_empty()).then(|| remote.to_string()),
        }
    }

    /// Local branch with no remote prefix
    pub fn local(name: impl Into<String>) -> Self {
        BranchRef {
            name: name.into(),
            remote: None,
        }
    }

    /// Revision string handed to the gateway, e.g. `origin/master`
    pub fn revision(&self) -> String {
        match &self.remote {
            Some(remote) => format!("{}/{}", remote, self.name),
            None => self.name.clone(),
        }
    }
}

impl fmt::Display for BranchRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.revision())
    }
}
