use serde::Serialize;
use tracing::Instrument;

use crate::domain::Source;
use crate::domain::llm::LlmProvider;
use crate::domain::retrieval::Retriever;

use super::workflow::AgentWorkflow;

/// Caller-facing answer: text plus display sources
#[derive(Debug, Clone, Serialize)]
pub struct AgentResponse {
    pub answer: String,
    pub sources: Vec<Source>,
}

/// Caller-facing service over the workflow. `respond` never fails: any
/// workflow error is logged and turned into an apology answer with no
/// sources.
#[derive(Debug)]
pub struct AgentService<P: LlmProvider, R: Retriever> {
    workflow: AgentWorkflow<P, R>,
}

impl<P: LlmProvider, R: Retriever> AgentService<P, R> {
    pub fn new(workflow: AgentWorkflow<P, R>) -> Self {
        Self { workflow }
    }

    pub async fn respond(&self, question: &str) -> AgentResponse {
        let run_id = uuid::Uuid::new_v4();
        let span = tracing::info_span!("agent_run", %run_id);

        async {
            match self.workflow.run(question).await {
                Ok(outcome) => {
                    tracing::info!(sources = outcome.sources.len(), "Run completed");
                    AgentResponse {
                        answer: outcome.answer,
                        sources: outcome.sources,
                    }
                }
                Err(error) => {
                    tracing::error!(%error, "Run failed");
                    AgentResponse {
                        answer: format!("죄송합니다. 답변 생성 중 오류가 발생했습니다: {error}"),
                        sources: Vec::new(),
                    }
                }
            }
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::llm::MockLlmProvider;
    use crate::domain::retrieval::mock::MockRetriever;
    use crate::infrastructure::agent::workflow::WorkflowConfig;

    fn service(provider: MockLlmProvider) -> AgentService<MockLlmProvider, MockRetriever> {
        let workflow = AgentWorkflow::new(
            Arc::new(provider),
            Arc::new(MockRetriever::new()),
            WorkflowConfig::default(),
        );
        AgentService::new(workflow)
    }

    #[tokio::test]
    async fn test_respond_success() {
        let provider = MockLlmProvider::new()
            .with_text(r#"{"is_relevant": "yes"}"#)
            .with_text("추천드립니다.");

        let response = service(provider).respond("잠실 점심 추천").await;
        assert_eq!(response.answer, "추천드립니다.");
    }

    #[tokio::test]
    async fn test_respond_never_fails() {
        let provider = MockLlmProvider::new().with_error("provider down");

        let response = service(provider).respond("잠실 점심 추천").await;
        assert!(response.answer.contains("오류가 발생했습니다"));
        assert!(response.sources.is_empty());
    }
}
