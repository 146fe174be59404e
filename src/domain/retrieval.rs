//! Retrieval contract: search parameters and the retriever trait.

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::AgentError;
use crate::domain::document::Document;

/// Parameters for one retrieval call
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    pub query: String,
    pub top_k: usize,
}

impl SearchParams {
    pub fn new(query: impl Into<String>, top_k: usize) -> Self {
        Self {
            query: query.into(),
            top_k,
        }
    }
}

/// Trait for document retrievers backing the agent's search tool
#[async_trait]
pub trait Retriever: Send + Sync + Debug {
    /// Name of the underlying corpus or collection
    fn corpus_name(&self) -> &str;

    /// Search for documents relevant to the query, best first
    async fn search(&self, params: &SearchParams) -> Result<Vec<Document>, AgentError>;
}
