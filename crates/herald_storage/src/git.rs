//! Publishing ledger updates to a git repository.

use crate::HistoryCommitter;
use herald_error::{CommitError, CommitErrorKind, HeraldResult};
use std::path::{Path, PathBuf};
use std::process::Output;
use tokio::process::Command;
use tracing::{debug, info, instrument, warn};

/// Commits ledger files with the `git` executable and pushes them.
///
/// For each written ledger: `git add`, skip if `git diff --staged --quiet`
/// reports nothing staged, `git commit -m "Auto-update: <key>"`, then
/// `git push <remote> <branch>`. A rejected push is retried once with
/// `--force` when `force_push_on_reject` is set.
///
/// # Example
///
/// ```rust
/// use herald_storage::GitCommitterBuilder;
///
/// let committer = GitCommitterBuilder::default()
///     .repo_dir("/srv/herald/ledgers")
///     .branch("main")
///     .build()
///     .unwrap();
/// assert_eq!(committer.remote(), "origin");
/// ```
#[derive(Debug, Clone, derive_builder::Builder, derive_getters::Getters)]
#[builder(setter(into))]
pub struct GitCommitter {
    /// Working tree the ledger files live in
    repo_dir: PathBuf,
    /// Remote to push to
    #[builder(default = "\"origin\".to_string()")]
    remote: String,
    /// Branch to push
    #[builder(default = "\"main\".to_string()")]
    branch: String,
    /// Commit author name, if overriding the repository's
    #[builder(default)]
    author_name: Option<String>,
    /// Commit author email, if overriding the repository's
    #[builder(default)]
    author_email: Option<String>,
    /// Retry a rejected push with `--force`
    #[builder(default = "true")]
    force_push_on_reject: bool,
}

impl GitCommitter {
    fn git(&self) -> Command {
        let mut cmd = Command::new("git");
        cmd.arg("-C").arg(&self.repo_dir);
        if let Some(name) = &self.author_name {
            cmd.arg("-c").arg(format!("user.name={}", name));
        }
        if let Some(email) = &self.author_email {
            cmd.arg("-c").arg(format!("user.email={}", email));
        }
        cmd
    }

    async fn run(&self, command: &str, args: &[&str]) -> Result<Output, CommitError> {
        debug!(command, ?args, "Running git");
        self.git()
            .arg(command)
            .args(args)
            .output()
            .await
            .map_err(|e| CommitError::new(CommitErrorKind::Spawn(e.to_string())))
    }

    async fn run_checked(&self, command: &str, args: &[&str]) -> Result<(), CommitError> {
        let output = self.run(command, args).await?;
        if output.status.success() {
            Ok(())
        } else {
            Err(CommitError::new(CommitErrorKind::CommandFailed {
                command: command.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }))
        }
    }

    /// The ledger path as git sees it from `repo_dir`.
    ///
    /// Store locations are relative to the process working directory while
    /// git runs with `-C repo_dir`, so both sides are canonicalized and the
    /// file is named relative to the repository directory when it lies
    /// inside it.
    async fn pathspec(&self, path: &Path) -> Result<String, CommitError> {
        let resolve = |p: &Path, e: std::io::Error| {
            CommitError::new(CommitErrorKind::PathResolution(format!("{}: {}", p.display(), e)))
        };
        let repo = tokio::fs::canonicalize(&self.repo_dir)
            .await
            .map_err(|e| resolve(&self.repo_dir, e))?;
        let file = tokio::fs::canonicalize(path)
            .await
            .map_err(|e| resolve(path, e))?;

        let spec = file.strip_prefix(&repo).unwrap_or(&file);
        Ok(spec.to_string_lossy().into_owned())
    }

    async fn push(&self) -> Result<(), CommitError> {
        match self.run_checked("push", &[self.remote.as_str(), self.branch.as_str()]).await {
            Ok(()) => Ok(()),
            Err(e) if self.force_push_on_reject => {
                warn!(error = %e, "Push rejected, retrying with --force");
                self.run_checked("push", &["--force", self.remote.as_str(), self.branch.as_str()])
                    .await
            }
            Err(e) => Err(e),
        }
    }
}

#[async_trait::async_trait]
impl HistoryCommitter for GitCommitter {
    #[instrument(skip(self), fields(repo = %self.repo_dir.display()))]
    async fn commit(&self, key: &str, path: &Path) -> HeraldResult<bool> {
        let file = self.pathspec(path).await?;
        self.run_checked("add", &["--", file.as_str()]).await?;

        // Exit status 0 means nothing staged for this file.
        let staged = self
            .run("diff", &["--staged", "--quiet", "--", file.as_str()])
            .await?;
        if staged.status.success() {
            info!(key, "Ledger unchanged in history, nothing to commit");
            return Ok(false);
        }

        let message = format!("Auto-update: {}", key);
        self.run_checked("commit", &["-m", message.as_str(), "--", file.as_str()])
            .await?;
        self.push().await?;

        info!(key, remote = %self.remote, branch = %self.branch, "Ledger committed and pushed");
        Ok(true)
    }
}

/// Committer that records nothing (`--no-commit`, or git disabled).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCommitter;

#[async_trait::async_trait]
impl HistoryCommitter for NoopCommitter {
    async fn commit(&self, key: &str, _path: &Path) -> HeraldResult<bool> {
        debug!(key, "History commits disabled");
        Ok(false)
    }
}
