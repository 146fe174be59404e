//! Metadata normalization: converts any retrieval-result representation
//! into a uniform list of (metadata, content) documents.
//!
//! Total by design: no input shape makes this module fail. The worst case
//! is a single document carrying the stringified input as content.

use serde_json::Value;

use super::document::Document;

/// Raw retrieval result, one variant per shape the normalizer accepts.
#[derive(Debug, Clone)]
pub enum RetrievalPayload {
    /// Free text, possibly containing `metadata={...}` repr fragments
    Text(String),
    /// A single structured document
    Document(Document),
    /// An ordered list of structured documents
    Documents(Vec<Document>),
    /// Loosely-typed records: maps with a nested `metadata` field, flat
    /// maps, or arbitrary JSON values
    Records(Vec<Value>),
}

impl RetrievalPayload {
    /// Classify an untyped JSON value into a payload variant.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(text) => Self::Text(text),
            Value::Array(items) => Self::Records(items),
            Value::Object(_) => Self::Records(vec![value]),
            other => Self::Text(other.to_string()),
        }
    }

    /// Normalize into an ordered document list. Never fails; non-empty
    /// input always yields at least one entry.
    pub fn normalize(self) -> Vec<Document> {
        match self {
            Self::Text(text) => normalize_text(text),
            Self::Document(document) => vec![document],
            Self::Documents(documents) => documents,
            Self::Records(records) => records.into_iter().map(record_to_document).collect(),
        }
    }
}

fn record_to_document(value: Value) -> Document {
    match value {
        Value::Object(map) => {
            if let Some(Value::Object(meta)) = map.get("metadata") {
                let content = map
                    .get("page_content")
                    .or_else(|| map.get("content"))
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                Document {
                    metadata: meta.clone().into_iter().collect(),
                    content,
                }
            } else {
                // Flat map: the whole record is metadata
                Document {
                    metadata: map.into_iter().collect(),
                    content: String::new(),
                }
            }
        }
        Value::String(text) => Document::new(text),
        other => Document::new(other.to_string()),
    }
}

fn normalize_text(text: String) -> Vec<Document> {
    let recovered = parse_embedded_metadata(&text);
    if recovered.is_empty() {
        return vec![Document::new(text)];
    }
    recovered
        .into_iter()
        .map(|metadata| Document::default().with_all_metadata(metadata))
        .collect()
}

/// Lenient fallback parser for `metadata={...}` fragments embedded in a
/// flattened document serialization. Each balanced brace-delimited map that
/// parses becomes one metadata entry; fragments that do not parse are
/// skipped. Kept separate from the structured path on purpose.
pub fn parse_embedded_metadata(
    text: &str,
) -> Vec<std::collections::HashMap<String, Value>> {
    const MARKER: &str = "metadata=";

    let mut maps = Vec::new();
    for (index, _) in text.match_indices(MARKER) {
        let rest = &text[index + MARKER.len()..];
        if !rest.starts_with('{') {
            continue;
        }
        let Some(end) = balanced_brace_end(rest) else {
            continue;
        };
        let fragment = python_literal_to_json(&rest[..=end]);
        if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(&fragment) {
            maps.push(map.into_iter().collect());
        }
    }
    maps
}

/// Index of the brace closing the map starting at byte 0 of `input`.
/// Tracks nesting depth and quoted strings (braces inside strings do not
/// count). None when the braces never balance.
fn balanced_brace_end(input: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string: Option<char> = None;
    let mut escaped = false;

    for (index, ch) in input.char_indices() {
        if let Some(quote) = in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == quote {
                in_string = None;
            }
            continue;
        }
        match ch {
            '\'' | '"' => in_string = Some(ch),
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(index);
                }
            }
            _ => {}
        }
    }
    None
}

/// Convert a Python-repr map literal to JSON: single-quoted strings become
/// double-quoted, `True`/`False`/`None` become their JSON spellings.
fn python_literal_to_json(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\'' | '"' => {
                let quote = ch;
                out.push('"');
                while let Some(inner) = chars.next() {
                    if inner == '\\' {
                        match chars.next() {
                            Some('\'') => out.push('\''),
                            Some('"') => out.push_str("\\\""),
                            Some(other) => {
                                out.push('\\');
                                out.push(other);
                            }
                            None => break,
                        }
                    } else if inner == quote {
                        break;
                    } else if inner == '"' {
                        out.push_str("\\\"");
                    } else {
                        out.push(inner);
                    }
                }
                out.push('"');
            }
            ch if ch.is_ascii_alphabetic() => {
                let mut ident = String::new();
                ident.push(ch);
                while let Some(&next) = chars.peek() {
                    if next.is_ascii_alphanumeric() || next == '_' {
                        ident.push(next);
                        chars.next();
                    } else {
                        break;
                    }
                }
                match ident.as_str() {
                    "True" => out.push_str("true"),
                    "False" => out.push_str("false"),
                    "None" => out.push_str("null"),
                    other => out.push_str(other),
                }
            }
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_text_yields_single_entry() {
        let docs = RetrievalPayload::Text("그냥 텍스트 결과".to_string()).normalize();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].content, "그냥 텍스트 결과");
        assert!(docs[0].metadata.is_empty());
    }

    #[test]
    fn test_single_document_passthrough() {
        let doc = Document::new("본문").with_metadata("name", json!("가게"));
        let docs = RetrievalPayload::Document(doc.clone()).normalize();
        assert_eq!(docs, vec![doc]);
    }

    #[test]
    fn test_records_with_nested_metadata() {
        let records = vec![
            json!({"metadata": {"name": "A"}, "page_content": "본문 A"}),
            json!({"metadata": {"name": "B"}, "content": "본문 B"}),
        ];
        let docs = RetrievalPayload::Records(records).normalize();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].meta_str("name").as_deref(), Some("A"));
        assert_eq!(docs[0].content, "본문 A");
        assert_eq!(docs[1].content, "본문 B");
    }

    #[test]
    fn test_flat_record_becomes_metadata() {
        let docs =
            RetrievalPayload::Records(vec![json!({"name": "C", "naver_id": "7"})]).normalize();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].meta_str("naver_id").as_deref(), Some("7"));
        assert!(docs[0].content.is_empty());
    }

    #[test]
    fn test_unknown_record_shapes_are_stringified() {
        let docs = RetrievalPayload::Records(vec![json!(42), json!(["a", "b"])]).normalize();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].content, "42");
        assert!(docs[0].metadata.is_empty());
    }

    #[test]
    fn test_order_is_preserved() {
        let records = vec![json!({"name": "1"}), json!({"name": "2"}), json!({"name": "3"})];
        let docs = RetrievalPayload::Records(records).normalize();
        let names: Vec<_> = docs.iter().map(|d| d.meta_str("name").unwrap()).collect();
        assert_eq!(names, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_embedded_metadata_recovery() {
        let text = "Document(metadata={'name': '평양면옥', 'naver_id': '123'}, page_content='...') \
                    Document(metadata={'name': '호수집', 'naver_review_count': 250}, page_content='...')";
        let docs = RetrievalPayload::Text(text.to_string()).normalize();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].meta_str("name").as_deref(), Some("평양면옥"));
        assert_eq!(docs[1].meta_str("naver_review_count").as_deref(), Some("250"));
    }

    #[test]
    fn test_embedded_metadata_with_nested_braces_and_quotes() {
        let text = "metadata={'name': \"브레이크 '인' 타임\", 'extra': {'open': True, 'closed': None}}";
        let maps = parse_embedded_metadata(text);
        assert_eq!(maps.len(), 1);
        assert_eq!(maps[0]["name"], json!("브레이크 '인' 타임"));
        assert_eq!(maps[0]["extra"], json!({"open": true, "closed": null}));
    }

    #[test]
    fn test_unbalanced_braces_fall_back_to_text() {
        let text = "metadata={'name': 'broken'";
        let docs = RetrievalPayload::Text(text.to_string()).normalize();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].content, text);
    }

    #[test]
    fn test_from_value_classification() {
        assert!(matches!(
            RetrievalPayload::from_value(json!("text")),
            RetrievalPayload::Text(_)
        ));
        assert!(matches!(
            RetrievalPayload::from_value(json!([{"name": "A"}])),
            RetrievalPayload::Records(_)
        ));
        assert!(matches!(
            RetrievalPayload::from_value(json!({"name": "A"})),
            RetrievalPayload::Records(_)
        ));
        assert!(matches!(
            RetrievalPayload::from_value(json!(1.5)),
            RetrievalPayload::Text(_)
        ));
    }

    #[test]
    fn test_source_roundtrip_through_normalizer() {
        let records = vec![json!({
            "name": "A",
            "naver_id": "123",
            "main_thumbnail_url": "http://x"
        })];
        let docs = RetrievalPayload::Records(records).normalize();
        let sources = crate::domain::Source::extract(&docs);
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].name.as_deref(), Some("A"));
        assert_eq!(
            sources[0].map_link.as_deref(),
            Some("https://map.naver.com/p/entry/place/123")
        );
        assert_eq!(sources[0].thumbnail.as_deref(), Some("http://x"));
    }
}
