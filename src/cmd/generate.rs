use crate::context::AppContext;
use crate::workflow::commit_message::{CommitOutcome, generate_commit_message};

pub async fn run(ctx: &AppContext) -> CommitOutcome {
    generate_commit_message(ctx).await
}
