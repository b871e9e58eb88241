use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::config::GroqConfig;
use crate::error::AppError;

/// Text-in/text-out summarization service. The pipeline only ever sees this
/// trait — tests inject a stub, production injects `GroqClient`.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, system_role: &str, prompt: &str) -> Result<String, AppError>;
}

/// Groq chat-completions client. Built once at startup and shared.
pub struct GroqClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

impl GroqClient {
    pub fn new(config: &GroqConfig) -> Result<Self, AppError> {
        if config.api_key.is_empty() {
            return Err(AppError::Config(
                "GROQ_API_KEY não definida (env ou config.toml)".to_string(),
            ));
        }
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(GroqClient {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl Summarizer for GroqClient {
    async fn summarize(&self, system_role: &str, prompt: &str) -> Result<String, AppError> {
        let url = format!("{}/openai/v1/chat/completions", self.base_url);
        debug!(model = %self.model, prompt_len = prompt.len(), "chamando serviço de análise");

        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&json!({
                "model": self.model,
                "messages": [
                    { "role": "system", "content": system_role },
                    { "role": "user", "content": prompt },
                ],
            }))
            .send()
            .await?
            .error_for_status()?;

        let body: ChatResponse = resp.json().await?;
        body.choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| AppError::Summarizer("resposta sem choices".to_string()))
    }
}
