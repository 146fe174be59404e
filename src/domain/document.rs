//! Retrieval result documents and display-ready source records.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

const NAVER_PLACE_URL: &str = "https://map.naver.com/p/entry/place/";

/// A retrieval result: string-keyed metadata plus free-text content.
/// Immutable once produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
    #[serde(default, alias = "page_content")]
    pub content: String,
}

impl Document {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            metadata: HashMap::new(),
            content: content.into(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    pub fn with_all_metadata(mut self, metadata: HashMap<String, serde_json::Value>) -> Self {
        self.metadata = metadata;
        self
    }

    /// Metadata value rendered as a display string; numbers are formatted,
    /// null/missing becomes None.
    pub fn meta_str(&self, key: &str) -> Option<String> {
        match self.metadata.get(key)? {
            serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// Display record derived from a document's metadata: name plus map link
/// and/or thumbnail. Documents contributing neither link are dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl Source {
    /// Derive a source from document metadata. The map link prefers the
    /// Naver place id over the homepage URL. Returns None when neither a
    /// link nor a thumbnail exists.
    pub fn from_document(document: &Document) -> Option<Self> {
        let map_link = document
            .meta_str("naver_id")
            .map(|id| format!("{NAVER_PLACE_URL}{id}"))
            .or_else(|| document.meta_str("homepage_url"));
        let thumbnail = document.meta_str("main_thumbnail_url");

        if map_link.is_none() && thumbnail.is_none() {
            return None;
        }

        Some(Self {
            name: document.meta_str("name"),
            map_link,
            thumbnail,
        })
    }

    /// Extract sources from a document list, silently dropping documents
    /// without links.
    pub fn extract(documents: &[Document]) -> Vec<Self> {
        documents.iter().filter_map(Self::from_document).collect()
    }
}
