use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::{ChatReply, ChatRequest, LLMConfig};
use crate::infrastructure::llm_clients::LLMClient;
use crate::infrastructure::response::clean_reply;
use std::sync::Arc;

pub const FARMING_ASSISTANT_PROMPT: &str = "You are an AI farming assistant for farmers in Odisha, India. \
Answer questions about crops, soil, fertilizers, irrigation, pests, weather and farming practices. \
Give short, practical advice in simple language. If a question is not about agriculture, politely steer the conversation back to farming.";

pub struct ChatUseCase {
    llm_client: Arc<dyn LLMClient + Send + Sync>,
    config: LLMConfig,
}

impl ChatUseCase {
    pub fn new(llm_client: Arc<dyn LLMClient + Send + Sync>, config: LLMConfig) -> Self {
        Self { llm_client, config }
    }

    pub fn config(&self) -> &LLMConfig {
        &self.config
    }

    pub async fn execute(&self, request: &ChatRequest) -> Result<ChatReply> {
        let message = request.message.trim();
        if message.is_empty() {
            return Err(AppError::ValidationError("Message is required".to_string()));
        }

        tracing::info!(
            provider = %self.config.provider,
            model = %self.config.model,
            turns = request.conversation_history.len(),
            "Relaying chat message"
        );

        let raw = self
            .llm_client
            .chat(
                &self.config,
                FARMING_ASSISTANT_PROMPT,
                &request.conversation_history,
                message,
            )
            .await?;

        Ok(ChatReply {
            reply: clean_reply(&raw),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::llm_config::ChatMessage;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct ScriptedClient {
        seen: Mutex<Vec<(String, usize)>>,
    }

    #[async_trait]
    impl LLMClient for ScriptedClient {
        async fn chat(
            &self,
            _config: &LLMConfig,
            system: &str,
            history: &[ChatMessage],
            message: &str,
        ) -> Result<String> {
            assert_eq!(system, FARMING_ASSISTANT_PROMPT);
            self.seen
                .lock()
                .unwrap()
                .push((message.to_string(), history.len()));
            Ok("<think>monsoon sowing</think>Sow rice in late June.  \n\n\n\nKeep fields flooded.".to_string())
        }
    }

    struct DownClient;

    #[async_trait]
    impl LLMClient for DownClient {
        async fn chat(
            &self,
            _config: &LLMConfig,
            _system: &str,
            _history: &[ChatMessage],
            _message: &str,
        ) -> Result<String> {
            Err(AppError::LLMError("Gemini API error (503)".to_string()))
        }
    }

    #[tokio::test]
    async fn test_reply_is_cleaned() {
        let client = Arc::new(ScriptedClient::default());
        let use_case = ChatUseCase::new(client.clone(), LLMConfig::default());

        let reply = use_case
            .execute(&ChatRequest {
                message: " When should I sow rice? ".to_string(),
                conversation_history: vec![
                    ChatMessage::assistant("Hello! Ask me anything about farming."),
                    ChatMessage::user("Hi"),
                ],
            })
            .await
            .unwrap();

        assert_eq!(reply.reply, "Sow rice in late June.\n\nKeep fields flooded.");
        assert_eq!(
            *client.seen.lock().unwrap(),
            vec![("When should I sow rice?".to_string(), 2)]
        );
    }

    #[tokio::test]
    async fn test_blank_message_is_rejected() {
        let client = Arc::new(ScriptedClient::default());
        let use_case = ChatUseCase::new(client.clone(), LLMConfig::default());

        let err = use_case
            .execute(&ChatRequest {
                message: "   ".to_string(),
                conversation_history: Vec::new(),
            })
            .await
            .unwrap_err();

        assert!(err.is_validation());
        assert!(client.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upstream_failure_propagates() {
        let use_case = ChatUseCase::new(Arc::new(DownClient), LLMConfig::default());
        let err = use_case
            .execute(&ChatRequest {
                message: "Best fertilizer for maize?".to_string(),
                conversation_history: Vec::new(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::LLMError(_)));
    }
}
