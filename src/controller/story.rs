use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};

use crate::error::AppError;

const RESPONSES_URL: &str = "https://api.openai.com/v1/responses";
const STORY_PROMPT: &str = "Write a one-sentence joke about golf.";

#[async_trait]
pub trait StoryClient: Send + Sync {
    async fn golf_joke(&self) -> Result<String, AppError>;
}

pub struct OpenAiStoryClient {
    client: Client,
    api_key: Option<String>,
    model: String,
}

impl OpenAiStoryClient {
    #[must_use]
    pub fn new(api_key: Option<String>, model: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model,
        }
    }
}

#[async_trait]
impl StoryClient for OpenAiStoryClient {
    async fn golf_joke(&self) -> Result<String, AppError> {
        let Some(api_key) = &self.api_key else {
            return Err(AppError::Other("OPENAI_API_KEY is not set".to_string()));
        };
        let resp = self
            .client
            .post(RESPONSES_URL)
            .bearer_auth(api_key)
            .json(&json!({ "model": self.model, "input": STORY_PROMPT }))
            .send()
            .await?
            .error_for_status()?;
        let body: Value = resp.json().await?;
        extract_output_text(&body)
            .ok_or_else(|| AppError::Parse("response had no output text".to_string()))
    }
}

/// Joins the `output_text` parts of every message in a Responses API body.
#[must_use]
pub fn extract_output_text(body: &Value) -> Option<String> {
    if let Some(text) = body.get("output_text").and_then(Value::as_str) {
        return Some(text.to_string());
    }
    let text: String = body
        .get("output")?
        .as_array()?
        .iter()
        .filter(|item| item.get("type").and_then(Value::as_str) == Some("message"))
        .filter_map(|item| item.get("content").and_then(Value::as_array))
        .flatten()
        .filter(|part| part.get("type").and_then(Value::as_str) == Some("output_text"))
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();
    if text.trim().is_empty() {
        None
    } else {
        Some(text.trim().to_string())
    }
}
