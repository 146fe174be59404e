//! LLM collaborator contract: messages, requests, responses and the
//! provider trait.

mod message;
mod provider;
mod request;
mod response;

pub use message::{Message, MessageRole, ToolCall};
pub use provider::LlmProvider;
pub use request::{LlmRequest, LlmRequestBuilder, ResponseFormat, ToolDefinition};
pub use response::{FinishReason, LlmResponse, Usage};

#[cfg(test)]
pub use provider::mock::MockLlmProvider;
