use async_trait::async_trait;

use crate::domain::commit_message::CommitMessage;
use crate::error::AppResult;

#[async_trait]
pub trait LanguageModelService: Send + Sync {
    async fn complete(&self, prompt: &str) -> AppResult<CommitMessage>;
}
