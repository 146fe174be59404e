//! Matzip Agent
//!
//! An agentic retrieval workflow recommending Jamsil restaurants:
//! - Question gating, so off-topic questions get a polite refusal
//! - Tool-driven retrieval over a local restaurant corpus
//! - Relevance grading with bounded query rewriting
//! - Weather-aware question building for lunch recommendations

pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use infrastructure::agent::{AgentService, AgentWorkflow, WorkflowConfig};
use infrastructure::llm::OpenAiProvider;
use infrastructure::retrieval::InMemoryRetriever;

/// Wire up the agent service from configuration. Needs `OPENAI_API_KEY` in
/// the environment and a readable corpus file.
pub fn create_agent(
    config: &AppConfig,
) -> anyhow::Result<AgentService<OpenAiProvider, InMemoryRetriever>> {
    let api_key = std::env::var("OPENAI_API_KEY")
        .map_err(|_| anyhow::anyhow!("OPENAI_API_KEY is not set"))?;

    let provider = Arc::new(OpenAiProvider::with_base_url(api_key, &config.llm.base_url));
    let retriever = Arc::new(InMemoryRetriever::from_json_file(
        &config.retrieval.collection,
        &config.retrieval.corpus_path,
    )?);

    let workflow_config =
        WorkflowConfig::from_config(&config.agent, &config.retrieval, &config.llm);
    let workflow = AgentWorkflow::new(provider, retriever, workflow_config);

    Ok(AgentService::new(workflow))
}
