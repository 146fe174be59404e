//! The agentic retrieval workflow and its node implementations.

pub mod classifier;
pub mod generator;
pub mod prompts;
pub mod rewriter;
pub mod service;
pub mod workflow;

pub use classifier::{BinaryLabel, RelevanceClassifier};
pub use generator::AnswerGenerator;
pub use rewriter::QueryRewriter;
pub use service::{AgentResponse, AgentService};
pub use workflow::{AgentWorkflow, WorkflowConfig, WorkflowOutcome};
