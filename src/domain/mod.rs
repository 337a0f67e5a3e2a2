pub mod commit_message;
pub mod diff;
pub mod prompt;
