use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::{LanguageModelService, ResultSink, VersionControlService};

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub version_control: Arc<dyn VersionControlService>,
    pub language_model: Arc<dyn LanguageModelService>,
    pub result_sink: Arc<dyn ResultSink>,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        version_control: Arc<dyn VersionControlService>,
        language_model: Arc<dyn LanguageModelService>,
        result_sink: Arc<dyn ResultSink>,
    ) -> Self {
        Self {
            config,
            version_control,
            language_model,
            result_sink,
        }
    }
}
