//! Infrastructure layer: provider implementations and the workflow wiring.

pub mod agent;
pub mod llm;
pub mod logging;
pub mod retrieval;
