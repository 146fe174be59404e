//! Domain layer: core types and contracts for the recommendation agent.

pub mod conversation;
pub mod document;
pub mod error;
pub mod llm;
pub mod normalize;
pub mod prompt;
pub mod retrieval;
pub mod weather;

pub use conversation::Conversation;
pub use document::{Document, Source};
pub use error::AgentError;
pub use normalize::RetrievalPayload;
pub use retrieval::{Retriever, SearchParams};
pub use weather::WeatherInfo;
