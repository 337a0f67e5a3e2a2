use std::path::PathBuf;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::domain::diff::StagedDiff;
use crate::error::{AppError, AppResult};
use crate::services::VersionControlService;

pub struct GitCli {
    workspace_root: PathBuf,
}

impl GitCli {
    pub fn new(workspace_root: PathBuf) -> Self {
        Self { workspace_root }
    }
}

#[async_trait]
impl VersionControlService for GitCli {
    async fn staged_diff(&self) -> AppResult<StagedDiff> {
        let output = Command::new("git")
            .args(["diff", "--cached", "--no-color"])
            .current_dir(&self.workspace_root)
            .output()
            .await
            .map_err(|err| AppError::DiffUnavailable(format!("failed to run git: {err}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let detail = if stderr.is_empty() {
                format!("git diff exited with {}", output.status)
            } else {
                stderr
            };
            return Err(AppError::DiffUnavailable(detail));
        }

        let diff = StagedDiff::new(String::from_utf8_lossy(&output.stdout));
        debug!(
            workspace = %self.workspace_root.display(),
            chars = diff.char_count(),
            "read staged diff"
        );
        Ok(diff)
    }
}
