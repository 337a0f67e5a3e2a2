use async_trait::async_trait;

use crate::domain::diff::StagedDiff;
use crate::error::AppResult;

#[async_trait]
pub trait VersionControlService: Send + Sync {
    /// Staged changes as unified diff text. Nothing staged is an empty diff,
    /// not an error.
    async fn staged_diff(&self) -> AppResult<StagedDiff>;
}
