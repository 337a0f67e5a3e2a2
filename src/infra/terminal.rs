use std::time::Duration;

use arboard::Clipboard;

use crate::error::{AppError, AppResult};
use crate::services::ResultSink;

/// How long the process keeps clipboard ownership on Linux so a clipboard
/// manager can take over the selection before we exit.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
pub const CLIPBOARD_HANDOFF: Duration = Duration::from_millis(1500);

/// Reports to the terminal: progress and info go to stderr so that stdout
/// only ever carries the success line.
pub struct TerminalSink;

impl TerminalSink {
    pub fn new() -> Self {
        Self
    }
}

impl ResultSink for TerminalSink {
    fn begin_progress(&self, title: &str) {
        eprint!("{title}");
    }

    fn end_progress(&self) {
        eprintln!();
    }

    fn notify_info(&self, text: &str) {
        eprintln!("{text}");
    }

    fn notify_success(&self, text: &str) {
        println!("{text}");
    }

    fn notify_error(&self, text: &str) {
        eprintln!("{text}");
    }

    fn copy_to_clipboard(&self, text: &str) -> AppResult<()> {
        let mut clipboard = Clipboard::new().map_err(|err| AppError::Clipboard(err.to_string()))?;
        set_text(&mut clipboard, text).map_err(|err| AppError::Clipboard(err.to_string()))
    }
}

// X11 and Wayland selections vanish with their owner, so hold on until a
// clipboard manager claims the text or the hand-off window closes.
#[cfg(target_os = "linux")]
fn set_text(clipboard: &mut Clipboard, text: &str) -> Result<(), arboard::Error> {
    use std::time::Instant;

    use arboard::SetExtLinux;

    clipboard
        .set()
        .wait_until(Instant::now() + CLIPBOARD_HANDOFF)
        .text(text)
}

#[cfg(not(target_os = "linux"))]
fn set_text(clipboard: &mut Clipboard, text: &str) -> Result<(), arboard::Error> {
    clipboard.set_text(text)
}
