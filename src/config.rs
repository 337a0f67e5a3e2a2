use std::env;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

pub const DEFAULT_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "mistralai/mistral-7b-instruct";
pub const DEFAULT_MAX_DIFF_CHARS: usize = 30_000;

const API_KEY_VAR: &str = "OPENROUTER_API_KEY";
const MODEL_VAR: &str = "COMMIT_GENIE_MODEL";
const ENDPOINT_VAR: &str = "COMMIT_GENIE_ENDPOINT";
const MAX_DIFF_CHARS_VAR: &str = "COMMIT_GENIE_MAX_DIFF_CHARS";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub max_diff_chars: usize,
    pub workspace_root: PathBuf,
}

/// Values given on the command line; they win over the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub model: Option<String>,
    pub endpoint: Option<String>,
    pub max_diff_chars: Option<usize>,
}

impl AppConfig {
    pub fn load(workspace_root: &Path, overrides: ConfigOverrides) -> AppResult<Self> {
        Self::from_lookup(workspace_root, overrides, |key| env::var(key).ok())
    }

    pub fn from_lookup<F>(
        workspace_root: &Path,
        overrides: ConfigOverrides,
        lookup: F,
    ) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let max_diff_chars = match overrides.max_diff_chars {
            Some(value) => value,
            None => match non_blank(MAX_DIFF_CHARS_VAR) {
                Some(raw) => raw.parse::<usize>().map_err(|err| {
                    AppError::Configuration(format!("{MAX_DIFF_CHARS_VAR}={raw:?}: {err}"))
                })?,
                None => DEFAULT_MAX_DIFF_CHARS,
            },
        };

        Ok(Self {
            api_key: non_blank(API_KEY_VAR),
            model: overrides
                .model
                .or_else(|| non_blank(MODEL_VAR))
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            endpoint: overrides
                .endpoint
                .or_else(|| non_blank(ENDPOINT_VAR))
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            max_diff_chars,
            workspace_root: workspace_root.to_path_buf(),
        })
    }
}
