use std::path::{Path, PathBuf};

use crate::executor::{CommandExecutor, ExecError, RealExecutor};

/// Source-repository client, parameterized over the executor for
/// testability.
///
/// Every command runs `git -C <repo_dir>` and the commit identity rides on
/// `-c user.name`/`-c user.email`, so neither the process working directory
/// nor any git config (global or repo-local) is ever mutated.
pub struct GitClient<E: CommandExecutor = RealExecutor> {
    executor: E,
    repo_dir: PathBuf,
}

impl GitClient<RealExecutor> {
    pub fn new(repo_dir: &Path) -> Self {
        Self {
            executor: RealExecutor,
            repo_dir: repo_dir.to_path_buf(),
        }
    }
}

impl<E: CommandExecutor> GitClient<E> {
    pub fn with_executor(executor: E, repo_dir: &Path) -> Self {
        Self {
            executor,
            repo_dir: repo_dir.to_path_buf(),
        }
    }

    async fn git(&self, rest: &[&str]) -> Result<String, ExecError> {
        let mut full = vec![
            "-C".to_owned(),
            self.repo_dir.to_string_lossy().into_owned(),
        ];
        full.extend(rest.iter().map(|s| (*s).to_owned()));
        self.executor.exec("git", &full).await
    }

    pub async fn version(&self) -> Result<String, ExecError> {
        let out = self.executor.exec("git", &["--version".to_owned()]).await?;
        Ok(out.trim().to_owned())
    }

    /// Short (7-character) hash of HEAD.
    pub async fn head_short_sha(&self) -> Result<String, GitError> {
        let out = self
            .git(&["rev-parse", "--short=7", "HEAD"])
            .await
            .map_err(|e| GitError::Head { source: e })?;
        Ok(out.trim().to_owned())
    }

    /// Whether the HEAD commit message contains the given marker token.
    ///
    /// Exact substring match on a structural token, deliberately not a check
    /// of the spoofable author identity.
    pub async fn head_carries_marker(&self, marker: &str) -> Result<bool, GitError> {
        let message = self
            .git(&["log", "-1", "--pretty=%B"])
            .await
            .map_err(|e| GitError::Log { source: e })?;
        Ok(message.contains(marker))
    }

    /// Stage and commit a single file under the given identity.
    pub async fn commit_file(
        &self,
        path: &str,
        message: &str,
        author_name: &str,
        author_email: &str,
    ) -> Result<(), GitError> {
        self.git(&["add", "--", path])
            .await
            .map_err(|e| GitError::Stage {
                path: path.to_owned(),
                source: e,
            })?;

        let name = format!("user.name={author_name}");
        let email = format!("user.email={author_email}");
        self.git(&[
            "-c", &name, "-c", &email, "commit", "--message", message, "--", path,
        ])
        .await
        .map_err(|e| GitError::Commit { source: e })?;

        Ok(())
    }

    /// Push HEAD to the given remote branch. A rejected ref update (e.g. a
    /// non-fast-forward from a racing run) surfaces as [`GitError::Push`];
    /// there is no retry or rebase.
    pub async fn push(&self, remote: &str, branch: &str) -> Result<(), GitError> {
        let refspec = format!("HEAD:{branch}");
        self.git(&["push", remote, &refspec])
            .await
            .map_err(|e| GitError::Push {
                remote: remote.to_owned(),
                branch: branch.to_owned(),
                source: e,
            })?;

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GitError {
    #[error("failed to resolve HEAD — is this a git repository?")]
    Head { source: ExecError },

    #[error("failed to read the last commit message")]
    Log { source: ExecError },

    #[error("failed to stage {path}")]
    Stage { path: String, source: ExecError },

    #[error("commit failed")]
    Commit { source: ExecError },

    #[error("push to {remote}/{branch} rejected")]
    Push {
        remote: String,
        branch: String,
        source: ExecError,
    },
}
