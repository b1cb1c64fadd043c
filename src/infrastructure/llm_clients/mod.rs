pub mod gemini;
pub mod openrouter;

use crate::domain::error::Result;
use crate::domain::llm_config::{ChatMessage, LLMConfig, LLMProvider};
use async_trait::async_trait;
use gemini::GeminiClient;
use openrouter::OpenRouterClient;
use std::time::Duration;

#[async_trait]
pub trait LLMClient {
    /// Generate the next assistant turn for `history` followed by `message`.
    async fn chat(
        &self,
        config: &LLMConfig,
        system: &str,
        history: &[ChatMessage],
        message: &str,
    ) -> Result<String>;
}

pub struct RouterClient {
    gemini: GeminiClient,
    openrouter: OpenRouterClient,
}

impl RouterClient {
    pub fn new(timeout: Duration) -> Self {
        Self {
            gemini: GeminiClient::new(timeout),
            openrouter: OpenRouterClient::new(timeout),
        }
    }
}

#[async_trait]
impl LLMClient for RouterClient {
    async fn chat(
        &self,
        config: &LLMConfig,
        system: &str,
        history: &[ChatMessage],
        message: &str,
    ) -> Result<String> {
        match config.provider {
            LLMProvider::Gemini => self.gemini.chat(config, system, history, message).await,
            LLMProvider::OpenRouter => {
                self.openrouter.chat(config, system, history, message).await
            }
        }
    }
}
