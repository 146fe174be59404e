use std::sync::Arc;

use crate::domain::AgentError;
use crate::domain::llm::{LlmProvider, LlmRequest};
use crate::domain::prompt::PromptTemplate;

use super::prompts;

/// Rewrites a question whose retrieval results graded irrelevant.
#[derive(Debug)]
pub struct QueryRewriter<P: LlmProvider> {
    provider: Arc<P>,
    model: String,
    temperature: f32,
    template: PromptTemplate,
}

impl<P: LlmProvider> QueryRewriter<P> {
    pub fn new(provider: Arc<P>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature: 0.0,
            template: PromptTemplate::parse(prompts::QUERY_REWRITE),
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub async fn rewrite(&self, question: &str) -> Result<String, AgentError> {
        let prompt = self
            .template
            .render_one("question", question)
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

        let rewritten = response.content().trim().to_string();
        tracing::debug!(original = question, rewritten = %rewritten, "Query rewritten");
        Ok(rewritten)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::llm::MockLlmProvider;

    #[tokio::test]
    async fn test_rewrite() {
        let provider = Arc::new(MockLlmProvider::new().with_text("잠실역 근처 평양냉면 맛집 추천"));
        let rewriter = QueryRewriter::new(provider.clone(), "gpt-4o");

        let rewritten = rewriter.rewrite("냉면").await.unwrap();
        assert_eq!(rewritten, "잠실역 근처 평양냉면 맛집 추천");
        assert!(provider.requests()[0].messages[0].content.contains("냉면"));
    }

    #[tokio::test]
    async fn test_rewrite_uses_configured_temperature() {
        let provider = Arc::new(MockLlmProvider::new().with_text("개선된 질문"));
        let rewriter = QueryRewriter::new(provider.clone(), "gpt-4o").with_temperature(0.5);

        rewriter.rewrite("냉면").await.unwrap();
        assert_eq!(provider.requests()[0].temperature, Some(0.5));
    }

    #[tokio::test]
    async fn test_rewrite_failure_is_generation_error() {
        let provider = Arc::new(MockLlmProvider::new().with_error("unavailable"));
        let rewriter = QueryRewriter::new(provider, "gpt-4o");

        let result = rewriter.rewrite("냉면").await;
        assert!(matches!(result, Err(AgentError::Generation { .. })));
    }
}
