use thiserror::Error;

/// Core agent errors
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Classification failed: {message}")]
    Classification { message: String },

    #[error("Generation failed: {message}")]
    Generation { message: String },

    #[error("Retrieval failed: {message}")]
    Retrieval { message: String },

    /// Transition-graph violation: the generate node ran without any
    /// retrieved documents in the conversation. A defect, not a runtime
    /// condition.
    #[error("Generate reached without retrieved documents")]
    MissingRetrieval,

    #[error("Provider error: {provider} - {message}")]
    Provider { provider: String, message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl AgentError {
    pub fn classification(message: impl Into<String>) -> Self {
        Self::Classification {
            message: message.into(),
        }
    }

    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    pub fn retrieval(message: impl Into<String>) -> Self {
        Self::Retrieval {
            message: message.into(),
        }
    }

    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}
