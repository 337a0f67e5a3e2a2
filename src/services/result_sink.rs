use crate::error::AppResult;

/// Where the outcome of a run is shown to the user.
pub trait ResultSink: Send + Sync {
    fn begin_progress(&self, title: &str);
    fn end_progress(&self);
    fn notify_info(&self, text: &str);
    fn notify_success(&self, text: &str);
    fn notify_error(&self, text: &str);
    fn copy_to_clipboard(&self, text: &str) -> AppResult<()>;
}
