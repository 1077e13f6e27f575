use std::path::Path;

use git2::{FetchOptions, RemoteCallbacks, Repository as Git2Repo};
use tracing::{debug, info};

use crate::domain::{BranchHistory, BranchRef};
use crate::error::{ReleaseScopeError, Result};
use crate::git::VersionControlGateway;

/// Gateway backed by `libgit2`
pub struct Git2Gateway {
    repo: Git2Repo,
}

impl Git2Gateway {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = Git2Repo::discover(path)
            .map_err(|e| ReleaseScopeError::history(path.display().to_string(), e.message()))?;

        Ok(Git2Gateway { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Gateway { repo }
    }
}

impl VersionControlGateway for Git2Gateway {
    fn history(&self, branch: &BranchRef) -> Result<BranchHistory> {
        let revision = branch.revision();
        let fail = |e: git2::Error| ReleaseScopeError::history(&revision, e.message());

        let tip = self
            .repo
            .revparse_single(&revision)
            .and_then(|object| object.peel_to_commit())
            .map_err(fail)?;

        let mut revwalk = self.repo.revwalk().map_err(fail)?;
        revwalk.push(tip.id()).map_err(fail)?;

        let mut entries = Vec::new();
        for oid_result in revwalk {
            let oid = oid_result.map_err(fail)?;
            let commit = self.repo.find_commit(oid).map_err(fail)?;

            // Same text as `git log --format=%s`: first paragraph, whitespace squashed
            let subject = commit
                .summary_bytes()
                .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
                .unwrap_or_default();

            entries.push((oid.to_string(), subject));
        }

        debug!(branch = %revision, commits = entries.len(), "read branch history");
        Ok(BranchHistory::from_entries(entries))
    }

    fn current_branch(&self) -> Result<String> {
        let head = self
            .repo
            .head()
            .map_err(|e| ReleaseScopeError::history("HEAD", e.message()))?;

        Ok(head.shorthand().unwrap_or("HEAD").to_string())
    }

    fn fetch(&self, remote_name: &str) -> Result<()> {
        let mut remote = self
            .repo
            .find_remote(remote_name)
            .map_err(|_| ReleaseScopeError::history(remote_name, "remote not found"))?;

        let mut callbacks = RemoteCallbacks::new();
        callbacks.credentials(|_url, username_from_url, allowed_types| {
            let username = username_from_url.unwrap_or("git");

            if allowed_types.contains(git2::CredentialType::SSH_KEY) {
                if let Ok(cred) = git2::Cred::ssh_key_from_agent(username) {
                    return Ok(cred);
                }

                if let Some(home) = dirs::home_dir() {
                    for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                        let path = home.join(".ssh").join(key);
                        if path.exists() {
                            if let Ok(cred) = git2::Cred::ssh_key(username, None, &path, None) {
                                return Ok(cred);
                            }
                        }
                    }
                }
            }

            git2::Cred::default()
        });

        let mut fetch_options = FetchOptions::new();
        fetch_options.remote_callbacks(callbacks);

        // Only remote-tracking branches are read afterwards; local branches are left alone
        let refspec = format!("+refs/heads/*:refs/remotes/{}/*", remote_name);
        info!(remote = remote_name, "fetching remote branches");
        remote
            .fetch(&[refspec.as_str()], Some(&mut fetch_options), None)
            .map_err(|e| ReleaseScopeError::history(remote_name, format!("fetch failed: {}", e.message())))?;

        Ok(())
    }
}
