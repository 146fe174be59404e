use std::path::Path;

use async_trait::async_trait;

use crate::domain::document::Document;
use crate::domain::normalize::RetrievalPayload;
use crate::domain::retrieval::{Retriever, SearchParams};
use crate::domain::AgentError;

/// In-memory retriever over a fixed document corpus. Ranks by keyword
/// overlap between the query and each document's metadata and content.
#[derive(Debug)]
pub struct InMemoryRetriever {
    corpus_name: String,
    documents: Vec<Document>,
}

impl InMemoryRetriever {
    pub fn new(corpus_name: impl Into<String>, documents: Vec<Document>) -> Self {
        Self {
            corpus_name: corpus_name.into(),
            documents,
        }
    }

    /// Load a corpus from a JSON file. Accepts any shape the payload
    /// normalizer handles, typically an array of document records.
    pub fn from_json_file(
        corpus_name: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<Self, AgentError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AgentError::configuration(format!("Cannot read corpus {}: {}", path.display(), e))
        })?;
        let value: serde_json::Value = serde_json::from_str(&raw).map_err(|e| {
            AgentError::configuration(format!("Invalid corpus JSON {}: {}", path.display(), e))
        })?;

        let documents = RetrievalPayload::from_value(value).normalize();
        tracing::info!(count = documents.len(), path = %path.display(), "Corpus loaded");

        Ok(Self::new(corpus_name, documents))
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    fn score(&self, query_terms: &[String], document: &Document) -> usize {
        let haystack = format!(
            "{} {}",
            document
                .metadata
                .values()
                .filter_map(|v| v.as_str())
                .collect::<Vec<_>>()
                .join(" "),
            document.content
        );
        query_terms
            .iter()
            .filter(|term| haystack.contains(term.as_str()))
            .count()
    }
}

#[async_trait]
impl Retriever for InMemoryRetriever {
    fn corpus_name(&self) -> &str {
        &self.corpus_name
    }

    async fn search(&self, params: &SearchParams) -> Result<Vec<Document>, AgentError> {
        let query_terms: Vec<String> = params
            .query
            .split_whitespace()
            .map(str::to_string)
            .collect();

        let mut scored: Vec<(usize, &Document)> = self
            .documents
            .iter()
            .map(|doc| (self.score(&query_terms, doc), doc))
            .filter(|(score, _)| *score > 0)
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        let results: Vec<Document> = scored
            .into_iter()
            .take(params.top_k)
            .map(|(_, doc)| doc.clone())
            .collect();

        tracing::debug!(
            query = %params.query,
            hits = results.len(),
            corpus = %self.corpus_name,
            "Search completed"
        );

        Ok(results)
    }
}
