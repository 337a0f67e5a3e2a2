use std::error::Error;

use async_trait::async_trait;
use reqwest::{
    Client,
    header::{AUTHORIZATION, CONTENT_TYPE},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::commit_message::CommitMessage;
use crate::error::{AppError, AppResult};
use crate::services::LanguageModelService;

pub struct OpenRouterClient {
    http: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl OpenRouterClient {
    pub fn new(endpoint: String, model: String, api_key: Option<String>) -> Self {
        if api_key.is_none() {
            warn!("OPENROUTER_API_KEY is not set; requests will be sent unauthenticated");
        }
        Self {
            http: Client::new(),
            endpoint,
            model,
            api_key,
        }
    }
}

#[async_trait]
impl LanguageModelService for OpenRouterClient {
    async fn complete(&self, prompt: &str) -> AppResult<CommitMessage> {
        let request_body = ChatCompletionRequest::single_user_message(&self.model, prompt);
        debug!(endpoint = %self.endpoint, model = %self.model, "requesting completion");

        let mut request = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(&request_body);
        if let Some(key) = &self.api_key {
            request = request.header(AUTHORIZATION, format!("Bearer {key}"));
        }

        let response = request
            .send()
            .await
            .map_err(|err| AppError::Network(error_chain(&err)))?;

        let status = response.status();
        debug!(%status, "completion response received");
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::Network(format!(
                "model endpoint responded with {status}: {body}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|err| {
                AppError::Network(format!("failed to read response body: {}", error_chain(&err)))
            })?;

        extract_commit_message(&body)
    }
}

/// Renders an error and all of its sources, e.g.
/// `error sending request for url (..): tcp connect error: Connection refused (os error 111)`.
fn error_chain(err: &dyn Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !text.ends_with(&cause_text) {
            text.push_str(": ");
            text.push_str(&cause_text);
        }
        source = cause.source();
    }
    text
}

/// Pulls `choices[0].message.content` out of a chat-completion body.
/// Unparsable bodies and missing or blank content are all `EmptyResponse`.
pub fn extract_commit_message(body: &str) -> AppResult<CommitMessage> {
    let payload: ChatCompletionResponse = serde_json::from_str(body).map_err(|err| {
        debug!("completion body is not valid JSON: {err}");
        AppError::EmptyResponse
    })?;

    payload
        .choices
        .unwrap_or_default()
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .and_then(|content| CommitMessage::parse(&content))
        .ok_or(AppError::EmptyResponse)
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

impl<'a> ChatCompletionRequest<'a> {
    fn single_user_message(model: &'a str, content: &'a str) -> Self {
        Self {
            model,
            messages: vec![ChatMessage {
                role: "user",
                content,
            }],
        }
    }
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Option<Vec<ChatChoice>>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: Option<ChatChoiceMessage>,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}
