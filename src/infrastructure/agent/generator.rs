use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::AgentError;
use crate::domain::document::Document;
use crate::domain::llm::{LlmProvider, LlmRequest};
use crate::domain::prompt::PromptTemplate;

use super::prompts;

/// Produces the final recommendation answer from graded documents.
#[derive(Debug)]
pub struct AnswerGenerator<P: LlmProvider> {
    provider: Arc<P>,
    model: String,
    temperature: f32,
    template: PromptTemplate,
}

impl<P: LlmProvider> AnswerGenerator<P> {
    pub fn new(provider: Arc<P>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature: 0.0,
            template: PromptTemplate::parse(prompts::ANSWER_GENERATION),
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub async fn generate(
        &self,
        question: &str,
        documents: &[Document],
    ) -> Result<String, AgentError> {
        if documents.is_empty() {
            return Err(AgentError::MissingRetrieval);
        }

        let mut values = HashMap::new();
        values.insert("question".to_string(), question.to_string());
        values.insert("context".to_string(), format_context(documents));

        let prompt = self
            .template
            .render(&values)
            .map_err(|e| AgentError::generation(e.to_string()))?;

        let request = LlmRequest::builder()
            .user(prompt)
            .temperature(self.temperature)
            .build();
        let response = self
            .provider
            .chat(&self.model, request)
            .await
            .map_err(|e| AgentError::generation(e.to_string()))?;

        Ok(response.content().to_string())
    }
}

/// Render documents as numbered context blocks with links and images.
/// Optional fields are omitted rather than printed empty.
pub fn format_context(documents: &[Document]) -> String {
    documents
        .iter()
        .enumerate()
        .map(|(idx, doc)| {
            let idx = idx + 1;
            let name = doc
                .meta_str("name")
                .unwrap_or_else(|| format!("문서 {idx}"));

            let mut lines = vec![
                format!("{idx}. {name}"),
                format!("카테고리: {}", doc.meta_str("category").unwrap_or_default()),
                format!(
                    "위치: {}",
                    doc.meta_str("location_type").unwrap_or_default()
                ),
                format!(
                    "네이버 리뷰수: {}",
                    doc.meta_str("naver_review_count").unwrap_or_default()
                ),
            ];

            if let Some(homepage) = doc.meta_str("homepage_url") {
                lines.push(format!("홈페이지: {homepage}"));
            }
            if let Some(naver_id) = doc.meta_str("naver_id") {
                lines.push(format!(
                    "네이버 지도: https://map.naver.com/p/entry/place/{naver_id}"
                ));
            }
            if let Some(thumbnail) = doc.meta_str("main_thumbnail_url") {
                lines.push(format!("이미지: {thumbnail}"));
            }
            if !doc.content.is_empty() {
                lines.push("본문:".to_string());
                lines.push(doc.content.clone());
            }

            lines.join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::llm::MockLlmProvider;
    use serde_json::json;

    fn documents() -> Vec<Document> {
        vec![
            Document::new("시원한 평양냉면")
                .with_metadata("name", json!("평양면옥"))
                .with_metadata("category", json!("냉면"))
                .with_metadata("naver_id", json!("123"))
                .with_metadata("naver_review_count", json!(512)),
            Document::new("")
                .with_metadata("name", json!("호수집"))
                .with_metadata("homepage_url", json!("http://hosoo.example"))
                .with_metadata("main_thumbnail_url", json!("http://img.example/1.jpg")),
        ]
    }

    #[test]
    fn test_format_context() {
        let context = format_context(&documents());

        assert!(context.contains("1. 평양면옥"));
        assert!(context.contains("네이버 지도: https://map.naver.com/p/entry/place/123"));
        assert!(context.contains("네이버 리뷰수: 512"));
        assert!(context.contains("본문:\n시원한 평양냉면"));
        assert!(context.contains("2. 호수집"));
        assert!(context.contains("홈페이지: http://hosoo.example"));
        assert!(context.contains("이미지: http://img.example/1.jpg"));
        // 호수집 has no content, the block must not carry an empty 본문
        assert_eq!(context.matches("본문:").count(), 1);
    }

    #[test]
    fn test_format_context_unnamed_document() {
        let context = format_context(&[Document::new("그냥 본문")]);
        assert!(context.starts_with("1. 문서 1"));
    }

    #[tokio::test]
    async fn test_generate() {
        let provider = Arc::new(MockLlmProvider::new().with_text("평양면옥을 추천드립니다."));
        let generator = AnswerGenerator::new(provider.clone(), "gpt-4o");

        let answer = generator.generate("냉면집 추천", &documents()).await.unwrap();
        assert_eq!(answer, "평양면옥을 추천드립니다.");

        let prompt = &provider.requests()[0].messages[0].content;
        assert!(prompt.contains("냉면집 추천"));
        assert!(prompt.contains("1. 평양면옥"));
    }

    #[tokio::test]
    async fn test_generate_without_documents() {
        let provider = Arc::new(MockLlmProvider::new().with_text("무의미"));
        let generator = AnswerGenerator::new(provider.clone(), "gpt-4o");

        let result = generator.generate("냉면집 추천", &[]).await;
        assert!(matches!(result, Err(AgentError::MissingRetrieval)));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_generate_provider_failure() {
        let provider = Arc::new(MockLlmProvider::new().with_error("rate limited"));
        let generator = AnswerGenerator::new(provider, "gpt-4o");

        let result = generator.generate("냉면집 추천", &documents()).await;
        assert!(matches!(result, Err(AgentError::Generation { .. })));
    }
}
