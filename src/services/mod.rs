pub mod language_model;
pub mod result_sink;
pub mod version_control;

pub use language_model::LanguageModelService;
pub use result_sink::ResultSink;
pub use version_control::VersionControlService;
