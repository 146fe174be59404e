use std::fmt::Debug;

use async_trait::async_trait;

use super::{LlmRequest, LlmResponse};
use crate::domain::AgentError;

/// Trait for LLM providers (OpenAI, etc.)
///
/// Both free-form completion and structured completion go through `chat`;
/// the request's `response_format` selects the shape.
#[async_trait]
pub trait LlmProvider: Send + Sync + Debug {
    /// Send a chat completion request
    async fn chat(&self, model: &str, request: LlmRequest) -> Result<LlmResponse, AgentError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}

#[cfg(test)]
pub mod mock {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    enum ScriptedReply {
        Response(LlmResponse),
        Error(String),
    }

    /// Mock provider replaying a scripted sequence of replies. The last
    /// reply is repeated once the script is exhausted.
    #[derive(Default)]
    pub struct MockLlmProvider {
        script: Mutex<VecDeque<ScriptedReply>>,
        requests: Mutex<Vec<LlmRequest>>,
    }

    impl Debug for MockLlmProvider {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("MockLlmProvider").finish()
        }
    }

    impl MockLlmProvider {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_response(self, response: LlmResponse) -> Self {
            self.script
                .lock()
                .unwrap()
                .push_back(ScriptedReply::Response(response));
            self
        }

        /// Shorthand for a plain assistant text reply
        pub fn with_text(self, content: impl Into<String>) -> Self {
            let response = LlmResponse::new(
                "resp-mock".to_string(),
                "mock-model".to_string(),
                crate::domain::llm::Message::assistant(content),
            );
            self.with_response(response)
        }

        pub fn with_error(self, error: impl Into<String>) -> Self {
            self.script
                .lock()
                .unwrap()
                .push_back(ScriptedReply::Error(error.into()));
            self
        }

        /// Requests seen so far, in order
        pub fn requests(&self) -> Vec<LlmRequest> {
            self.requests.lock().unwrap().clone()
        }

        pub fn call_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl LlmProvider for MockLlmProvider {
        async fn chat(
            &self,
            _model: &str,
            request: LlmRequest,
        ) -> Result<LlmResponse, AgentError> {
            self.requests.lock().unwrap().push(request);

            let mut script = self.script.lock().unwrap();
            let reply = if script.len() > 1 {
                script.pop_front()
            } else {
                script.front().map(|r| match r {
                    ScriptedReply::Response(resp) => ScriptedReply::Response(resp.clone()),
                    ScriptedReply::Error(e) => ScriptedReply::Error(e.clone()),
                })
            };

            match reply {
                Some(ScriptedReply::Response(response)) => Ok(response),
                Some(ScriptedReply::Error(error)) => Err(AgentError::provider("mock", error)),
                None => Err(AgentError::provider("mock", "No mock response configured")),
            }
        }

        fn provider_name(&self) -> &'static str {
            "mock"
        }
    }
}
