//! LLM integration: the provider abstraction and its Anthropic backend.

pub(crate) mod anthropic;
pub(crate) mod provider;

pub use provider::{build_provider, ImageInput, LlmProvider, LlmRequest, LlmResponse};

/// Shared scripted provider for exercising the generation adapters
/// without a network.
#[cfg(test)]
pub(crate) mod testing {
    use super::provider::{LlmProvider, LlmRequest, LlmResponse};
    use crate::error::AdapterError;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays a queue of canned replies and records every request it saw.
    pub(crate) struct ScriptedProvider {
        replies: Mutex<VecDeque<Result<String, AdapterError>>>,
        requests: Mutex<Vec<LlmRequest>>,
    }

    impl ScriptedProvider {
        /// Provider that answers every call with the same text.
        pub(crate) fn reply(text: &str) -> Self {
            Self::with_script(vec![Ok(text.to_string())])
        }

        /// Provider that replays the given results in order; the last entry
        /// repeats once the queue is drained.
        pub(crate) fn with_script(script: Vec<Result<String, AdapterError>>) -> Self {
            Self {
                replies: Mutex::new(script.into_iter().collect()),
                requests: Mutex::new(Vec::new()),
            }
        }

        /// Provider that always fails with the given message.
        pub(crate) fn failing(message: &str) -> Self {
            Self::with_script(vec![Err(AdapterError::Llm {
                message: message.to_string(),
                status_code: Some(500),
            })])
        }

        /// Number of generate() calls observed.
        pub(crate) fn calls(&self) -> usize {
            self.requests.lock().unwrap().len()
        }

        /// Clone of the n-th observed request.
        pub(crate) fn request(&self, index: usize) -> LlmRequest {
            self.requests.lock().unwrap()[index].clone()
        }
    }

    #[async_trait]
    impl LlmProvider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn is_available(&self) -> bool {
            true
        }

        async fn generate(&self, request: &LlmRequest) -> Result<LlmResponse, AdapterError> {
            self.requests.lock().unwrap().push(request.clone());

            let mut replies = self.replies.lock().unwrap();
            let reply = if replies.len() > 1 {
                replies.pop_front().unwrap()
            } else {
                replies
                    .front()
                    .cloned()
                    .unwrap_or(Err(AdapterError::EmptyResponse))
            };

            reply.map(|text| LlmResponse {
                text,
                model: "scripted-v1".to_string(),
                tokens_used: Some(42),
                latency_ms: 1,
            })
        }
    }
}
