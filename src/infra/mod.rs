pub mod git;
pub mod openrouter;
pub mod terminal;
