//! Gateway that shells out to the system `git` binary

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};

use crate::domain::{BranchHistory, BranchRef};
use crate::error::{ReleaseScopeError, Result};
use crate::git::{parse_log_output, VersionControlGateway};

/// Gateway backed by `git` subprocesses
pub struct SystemGitGateway {
    repo_path: PathBuf,
}

impl SystemGitGateway {
    pub fn new(repo_path: impl AsRef<Path>) -> Self {
        SystemGitGateway {
            repo_path: repo_path.as_ref().to_path_buf(),
        }
    }

    fn git_cmd(&self) -> Command {
        let mut cmd = Command::new("git");
        cmd.arg("-C").arg(&self.repo_path);
        cmd
    }

    /// Run git and return stdout, mapping any failure onto `subject`
    fn run(&self, subject: &str, args: &[&str]) -> Result<String> {
        let output = self
            .git_cmd()
            .args(args)
            .output()
            .map_err(|e| ReleaseScopeError::history(subject, format!("failed to run git: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ReleaseScopeError::history(
                subject,
                format!("git {} failed: {}", args.join(" "), stderr.trim()),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl VersionControlGateway for SystemGitGateway {
    fn history(&self, branch: &BranchRef) -> Result<BranchHistory> {
        let revision = branch.revision();
        let stdout = self.run(&revision, &["log", revision.as_str(), "--format=%H %s", "--"])?;

        let history = parse_log_output(&stdout);
        debug!(branch = %revision, commits = history.len(), "read branch history");
        Ok(history)
    }

    fn current_branch(&self) -> Result<String> {
        let stdout = self.run("HEAD", &["rev-parse", "--abbrev-ref", "HEAD"])?;
        Ok(stdout.trim().to_string())
    }

    fn fetch(&self, remote: &str) -> Result<()> {
        info!(remote, "fetching remote branches");
        self.run(remote, &["fetch", remote])?;
        Ok(())
    }
}
