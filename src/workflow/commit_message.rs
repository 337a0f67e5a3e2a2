use tracing::{info, warn};

use crate::context::AppContext;
use crate::domain::commit_message::CommitMessage;
use crate::domain::prompt::build_prompt;
use crate::error::{AppError, AppResult};

pub const NO_STAGED_CHANGES: &str = "No staged changes found.";
pub const PROGRESS_TITLE: &str = "Generating commit message...";

#[derive(Debug)]
pub enum CommitOutcome {
    /// Nothing was staged; no request was made.
    Skipped,
    Succeeded(CommitMessage),
    Failed(AppError),
}

/// Runs one invocation end to end and reports the result through the
/// context's sink. Every failure is caught here and nowhere else.
pub async fn generate_commit_message(ctx: &AppContext) -> CommitOutcome {
    let sink = &ctx.result_sink;

    let outcome = match draft_and_copy(ctx).await {
        Ok(Some(message)) => {
            sink.notify_success(&format!("✅ Commit message copied: \"{message}\""));
            CommitOutcome::Succeeded(message)
        }
        Ok(None) => {
            sink.notify_info(NO_STAGED_CHANGES);
            CommitOutcome::Skipped
        }
        Err(err) => {
            sink.notify_error(&format!("Error: {err}"));
            CommitOutcome::Failed(err)
        }
    };

    info!(outcome = outcome.label(), "commit message workflow finished");
    outcome
}

async fn draft_and_copy(ctx: &AppContext) -> AppResult<Option<CommitMessage>> {
    let mut diff = ctx.version_control.staged_diff().await?;
    if diff.is_empty() {
        return Ok(None);
    }

    let original_chars = diff.char_count();
    if diff.truncate_chars(ctx.config.max_diff_chars) {
        warn!(
            original_chars,
            max_chars = ctx.config.max_diff_chars,
            "staged diff truncated before prompting"
        );
    }

    let prompt = build_prompt(diff.as_str());

    ctx.result_sink.begin_progress(PROGRESS_TITLE);
    let completion = ctx.language_model.complete(&prompt).await;
    ctx.result_sink.end_progress();

    let message = completion?;
    ctx.result_sink.copy_to_clipboard(message.as_str())?;
    Ok(Some(message))
}

impl CommitOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            CommitOutcome::Skipped => "skipped",
            CommitOutcome::Succeeded(_) => "succeeded",
            CommitOutcome::Failed(_) => "failed",
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, CommitOutcome::Failed(_))
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::*;
    use crate::config::{AppConfig, DEFAULT_ENDPOINT, DEFAULT_MODEL};
    use crate::domain::diff::StagedDiff;
    use crate::services::{LanguageModelService, ResultSink, VersionControlService};

    struct FakeGit {
        diff: Result<String, String>,
    }

    #[async_trait]
    impl VersionControlService for FakeGit {
        async fn staged_diff(&self) -> AppResult<StagedDiff> {
            self.diff
                .clone()
                .map(StagedDiff::new)
                .map_err(AppError::DiffUnavailable)
        }
    }

    enum Reply {
        Message(&'static str),
        Empty,
        Network(&'static str),
    }

    struct FakeModel {
        reply: Reply,
        prompts: Mutex<Vec<String>>,
    }

    impl FakeModel {
        fn new(reply: Reply) -> Arc<Self> {
            Arc::new(Self {
                reply,
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LanguageModelService for FakeModel {
        async fn complete(&self, prompt: &str) -> AppResult<CommitMessage> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match self.reply {
                Reply::Message(text) => CommitMessage::parse(text).ok_or(AppError::EmptyResponse),
                Reply::Empty => Err(AppError::EmptyResponse),
                Reply::Network(text) => Err(AppError::Network(text.to_string())),
            }
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Begin(String),
        End,
        Info(String),
        Success(String),
        Error(String),
        Clipboard(String),
    }

    #[derive(Default)]
    struct RecordingSink {
        events: Mutex<Vec<Event>>,
        clipboard_fails: bool,
    }

    impl RecordingSink {
        fn events(&self) -> Vec<Event> {
            self.events.lock().unwrap().clone()
        }

        fn clipboard_writes(&self) -> Vec<String> {
            self.events()
                .into_iter()
                .filter_map(|event| match event {
                    Event::Clipboard(text) => Some(text),
                    _ => None,
                })
                .collect()
        }

        fn record(&self, event: Event) {
            self.events.lock().unwrap().push(event);
        }
    }

    impl ResultSink for RecordingSink {
        fn begin_progress(&self, title: &str) {
            self.record(Event::Begin(title.to_string()));
        }

        fn end_progress(&self) {
            self.record(Event::End);
        }

        fn notify_info(&self, text: &str) {
            self.record(Event::Info(text.to_string()));
        }

        fn notify_success(&self, text: &str) {
            self.record(Event::Success(text.to_string()));
        }

        fn notify_error(&self, text: &str) {
            self.record(Event::Error(text.to_string()));
        }

        fn copy_to_clipboard(&self, text: &str) -> AppResult<()> {
            if self.clipboard_fails {
                return Err(AppError::Clipboard("no display".to_string()));
            }
            self.record(Event::Clipboard(text.to_string()));
            Ok(())
        }
    }

    fn config(max_diff_chars: usize) -> AppConfig {
        AppConfig {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            max_diff_chars,
            workspace_root: PathBuf::from("."),
        }
    }

    fn context(
        diff: Result<&str, &str>,
        model: Arc<FakeModel>,
        sink: Arc<RecordingSink>,
        max_diff_chars: usize,
    ) -> AppContext {
        let git = Arc::new(FakeGit {
            diff: diff.map(str::to_string).map_err(str::to_string),
        });
        AppContext::new(config(max_diff_chars), git, model, sink)
    }

    const DIFF: &str = "diff --git a/auth.rs b/auth.rs\n+fn refresh_token() {}\n";

    #[tokio::test]
    async fn empty_diff_skips_without_calling_model() {
        for diff in ["", "  \n\t"] {
            let model = FakeModel::new(Reply::Message("feat: never"));
            let sink = Arc::new(RecordingSink::default());
            let ctx = context(Ok(diff), model.clone(), sink.clone(), 0);

            let outcome = generate_commit_message(&ctx).await;

            assert!(matches!(outcome, CommitOutcome::Skipped));
            assert!(model.prompts().is_empty());
            assert_eq!(sink.events(), vec![Event::Info(NO_STAGED_CHANGES.to_string())]);
        }
    }

    #[tokio::test]
    async fn success_copies_exact_message() {
        let model = FakeModel::new(Reply::Message(" feat(auth): add token refresh "));
        let sink = Arc::new(RecordingSink::default());
        let ctx = context(Ok(DIFF), model.clone(), sink.clone(), 0);

        let outcome = generate_commit_message(&ctx).await;

        match outcome {
            CommitOutcome::Succeeded(message) => {
                assert_eq!(message.as_str(), "feat(auth): add token refresh")
            }
            other => panic!("expected success, got {other:?}"),
        }
        assert_eq!(
            sink.events(),
            vec![
                Event::Begin(PROGRESS_TITLE.to_string()),
                Event::End,
                Event::Clipboard("feat(auth): add token refresh".to_string()),
                Event::Success(
                    "✅ Commit message copied: \"feat(auth): add token refresh\"".to_string()
                ),
            ]
        );

        let prompts = model.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains(DIFF));
    }

    #[tokio::test]
    async fn empty_response_fails_without_clipboard_write() {
        let model = FakeModel::new(Reply::Empty);
        let sink = Arc::new(RecordingSink::default());
        let ctx = context(Ok(DIFF), model, sink.clone(), 0);

        let outcome = generate_commit_message(&ctx).await;

        assert!(matches!(outcome, CommitOutcome::Failed(AppError::EmptyResponse)));
        assert!(sink.clipboard_writes().is_empty());
        assert!(
            sink.events()
                .contains(&Event::Error("Error: No response from model".to_string()))
        );
    }

    #[tokio::test]
    async fn network_failure_reports_underlying_text() {
        let model = FakeModel::new(Reply::Network("connection refused"));
        let sink = Arc::new(RecordingSink::default());
        let ctx = context(Ok(DIFF), model, sink.clone(), 0);

        let outcome = generate_commit_message(&ctx).await;

        assert!(matches!(outcome, CommitOutcome::Failed(AppError::Network(_))));
        assert!(outcome.is_failure());
        assert!(sink.clipboard_writes().is_empty());
        let events = sink.events();
        assert_eq!(events[0], Event::Begin(PROGRESS_TITLE.to_string()));
        assert_eq!(events[1], Event::End);
        match &events[2] {
            Event::Error(text) => assert!(text.contains("connection refused")),
            other => panic!("expected error notification, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn diff_failure_is_reported_before_any_request() {
        let model = FakeModel::new(Reply::Message("feat: never"));
        let sink = Arc::new(RecordingSink::default());
        let ctx = context(Err("not a git repository"), model.clone(), sink.clone(), 0);

        let outcome = generate_commit_message(&ctx).await;

        assert!(matches!(outcome, CommitOutcome::Failed(AppError::DiffUnavailable(_))));
        assert!(model.prompts().is_empty());
        assert_eq!(sink.events().len(), 1);
        assert!(matches!(&sink.events()[0], Event::Error(text) if text.contains("not a git repository")));
    }

    #[tokio::test]
    async fn clipboard_failure_is_a_failed_outcome() {
        let model = FakeModel::new(Reply::Message("fix: handle null"));
        let sink = Arc::new(RecordingSink {
            clipboard_fails: true,
            ..Default::default()
        });
        let ctx = context(Ok(DIFF), model, sink.clone(), 0);

        let outcome = generate_commit_message(&ctx).await;

        assert!(matches!(outcome, CommitOutcome::Failed(AppError::Clipboard(_))));
        assert!(
            !sink
                .events()
                .iter()
                .any(|event| matches!(event, Event::Success(_)))
        );
    }

    #[tokio::test]
    async fn long_diff_is_truncated_before_prompting() {
        let model = FakeModel::new(Reply::Message("chore: bulk update"));
        let sink = Arc::new(RecordingSink::default());
        let long_diff = format!("{DIFF}{}", "+x\n".repeat(100));
        let ctx = AppContext::new(
            config(DIFF.len()),
            Arc::new(FakeGit {
                diff: Ok(long_diff.clone()),
            }),
            model.clone(),
            sink,
        );

        generate_commit_message(&ctx).await;

        let prompts = model.prompts();
        assert!(prompts[0].contains(DIFF));
        assert!(!prompts[0].contains(&long_diff));
    }
}
