use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::AgentError;
use crate::domain::llm::{LlmProvider, LlmRequest, ResponseFormat};
use crate::domain::prompt::PromptTemplate;

use super::prompts;

/// Outcome of a binary relevance check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryLabel {
    Yes,
    No,
}

impl BinaryLabel {
    pub fn is_yes(self) -> bool {
        self == Self::Yes
    }
}

/// Structured yes/no classifier over a prompt template. Used both for the
/// question gate and for document grading.
#[derive(Debug)]
pub struct RelevanceClassifier<P: LlmProvider> {
    provider: Arc<P>,
    model: String,
    temperature: f32,
    template: PromptTemplate,
    schema_name: &'static str,
    output_field: &'static str,
}

impl<P: LlmProvider> RelevanceClassifier<P> {
    /// Gate judging whether a question is about restaurant recommendation
    pub fn question_gate(provider: Arc<P>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature: 0.0,
            template: PromptTemplate::parse(prompts::QUESTION_GATE),
            schema_name: "question_relevance",
            output_field: "is_relevant",
        }
    }

    /// Grader judging whether retrieved documents answer the question
    pub fn document_grader(provider: Arc<P>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature: 0.0,
            template: PromptTemplate::parse(prompts::DOCUMENT_GRADE),
            schema_name: "grade_documents",
            output_field: "binary_score",
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Run the classifier. Any provider or parsing failure is a
    /// classification error; there is no silent default label.
    pub async fn classify(
        &self,
        values: &HashMap<String, String>,
    ) -> Result<BinaryLabel, AgentError> {
        let prompt = self
            .template
            .render(values)
            .map_err(|e| AgentError::classification(e.to_string()))?;

        let request = LlmRequest::builder()
            .user(prompt)
            .temperature(self.temperature)
            .response_format(ResponseFormat::single_string_field(
                self.schema_name,
                self.output_field,
                "'yes' or 'no'",
            ))
            .build();

        let response = self
            .provider
            .chat(&self.model, request)
            .await
            .map_err(|e| AgentError::classification(e.to_string()))?;

        let parsed: serde_json::Value = serde_json::from_str(response.content())
            .map_err(|e| {
                AgentError::classification(format!("Malformed classifier output: {}", e))
            })?;
        let label = parsed
            .get(self.output_field)
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                AgentError::classification(format!("Missing field '{}'", self.output_field))
            })?;

        match label.trim().to_lowercase().as_str() {
            "yes" => Ok(BinaryLabel::Yes),
            "no" => Ok(BinaryLabel::No),
            other => Err(AgentError::classification(format!(
                "Unexpected label '{}'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::llm::MockLlmProvider;

    fn values(question: &str) -> HashMap<String, String> {
        let mut values = HashMap::new();
        values.insert("question".to_string(), question.to_string());
        values
    }

    #[tokio::test]
    async fn test_gate_yes() {
        let provider = Arc::new(MockLlmProvider::new().with_text(r#"{"is_relevant": "yes"}"#));
        let gate = RelevanceClassifier::question_gate(provider.clone(), "gpt-4o");

        let label = gate.classify(&values("잠실 점심 추천")).await.unwrap();
        assert!(label.is_yes());

        let request = &provider.requests()[0];
        assert!(request.messages[0].content.contains("잠실 점심 추천"));
        assert!(request.response_format.is_some());
    }

    #[tokio::test]
    async fn test_gate_no() {
        let provider = Arc::new(MockLlmProvider::new().with_text(r#"{"is_relevant": "no"}"#));
        let gate = RelevanceClassifier::question_gate(provider, "gpt-4o");

        let label = gate.classify(&values("코딩 알려줘")).await.unwrap();
        assert_eq!(label, BinaryLabel::No);
    }

    #[tokio::test]
    async fn test_grader_uses_context() {
        let provider = Arc::new(MockLlmProvider::new().with_text(r#"{"binary_score": "yes"}"#));
        let grader = RelevanceClassifier::document_grader(provider.clone(), "gpt-4o");

        let mut vals = values("냉면집 추천");
        vals.insert("context".to_string(), "평양면옥 냉면".to_string());
        let label = grader.classify(&vals).await.unwrap();
        assert!(label.is_yes());
        assert!(provider.requests()[0].messages[0].content.contains("평양면옥 냉면"));
    }

    #[tokio::test]
    async fn test_malformed_output_is_classification_error() {
        let provider = Arc::new(MockLlmProvider::new().with_text("yes"));
        let gate = RelevanceClassifier::question_gate(provider, "gpt-4o");

        let result = gate.classify(&values("잠실 점심")).await;
        assert!(matches!(result, Err(AgentError::Classification { .. })));
    }

    #[tokio::test]
    async fn test_provider_failure_is_classification_error() {
        let provider = Arc::new(MockLlmProvider::new().with_error("timeout"));
        let gate = RelevanceClassifier::question_gate(provider, "gpt-4o");

        let result = gate.classify(&values("잠실 점심")).await;
        assert!(matches!(result, Err(AgentError::Classification { .. })));
    }

    #[tokio::test]
    async fn test_unexpected_label_is_error() {
        let provider = Arc::new(MockLlmProvider::new().with_text(r#"{"is_relevant": "maybe"}"#));
        let gate = RelevanceClassifier::question_gate(provider, "gpt-4o");

        let result = gate.classify(&values("잠실 점심")).await;
        assert!(matches!(result, Err(AgentError::Classification { .. })));
    }
}
