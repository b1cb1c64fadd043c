use super::LLMClient;
use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::{ChatMessage, ChatRole, LLMConfig};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;

/// OpenAI-compatible `chat/completions` client (OpenRouter by default).
pub struct OpenRouterClient {
    client: reqwest::Client,
}

impl OpenRouterClient {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    fn api_key(config: &LLMConfig) -> Result<String> {
        config.api_key.clone().ok_or_else(|| {
            AppError::LLMError(format!("{} is not configured", config.provider.api_key_var()))
        })
    }

    fn build_body(
        config: &LLMConfig,
        system: &str,
        history: &[ChatMessage],
        message: &str,
    ) -> Value {
        let mut messages = Vec::with_capacity(history.len() + 2);
        if !system.trim().is_empty() {
            messages.push(json!({ "role": "system", "content": system }));
        }
        for turn in history {
            let role = match turn.role {
                ChatRole::User => "user",
                ChatRole::Assistant => "assistant",
            };
            messages.push(json!({ "role": role, "content": turn.content }));
        }
        messages.push(json!({ "role": "user", "content": message }));

        json!({
            "model": config.model,
            "messages": messages,
            "max_tokens": config.max_tokens,
            "temperature": config.temperature,
        })
    }
}

#[async_trait]
impl LLMClient for OpenRouterClient {
    async fn chat(
        &self,
        config: &LLMConfig,
        system: &str,
        history: &[ChatMessage],
        message: &str,
    ) -> Result<String> {
        let api_key = Self::api_key(config)?;
        let url = if config.base_url.ends_with('/') {
            format!("{}chat/completions", config.base_url)
        } else {
            format!("{}/chat/completions", config.base_url)
        };

        let body = Self::build_body(config, system, history, message);

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::LLMError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::LLMError(format!(
                "API error ({}): {}",
                status, text
            )));
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| AppError::LLMError(format!("Failed to parse JSON: {}", e)))?;

        json["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| AppError::LLMError("Invalid response format".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::llm_config::LLMProvider;

    #[test]
    fn test_body_orders_system_history_message() {
        let config = LLMConfig {
            provider: LLMProvider::OpenRouter,
            model: "meta-llama/llama-3.1-8b-instruct".to_string(),
            ..LLMConfig::default()
        };
        let body = OpenRouterClient::build_body(
            &config,
            "system prompt",
            &[ChatMessage::user("hi"), ChatMessage::assistant("hello")],
            "what about wheat?",
        );

        let messages = body["messages"].as_array().unwrap();
        let roles: Vec<&str> = messages.iter().map(|m| m["role"].as_str().unwrap()).collect();
        assert_eq!(roles, vec!["system", "user", "assistant", "user"]);
        assert_eq!(messages[3]["content"], "what about wheat?");
        assert_eq!(body["model"], "meta-llama/llama-3.1-8b-instruct");
    }

    #[test]
    fn test_missing_key() {
        let config = LLMConfig {
            provider: LLMProvider::OpenRouter,
            ..LLMConfig::default()
        };
        let err = OpenRouterClient::api_key(&config).unwrap_err();
        assert_eq!(err.message(), "OPENROUTER_API_KEY is not configured");
    }
}
