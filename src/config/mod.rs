use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub agent: AgentConfig,
    pub retrieval: RetrievalConfig,
    pub llm: LlmConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Keywords whose presence marks a question as already localized
    pub locale_keywords: Vec<String>,
    /// Locale prepended to questions lacking a locale keyword
    pub default_locale: String,
    /// Answer returned for questions outside the agent's topic
    pub refusal_text: String,
    /// Upper bound on query rewrites per request
    pub max_rewrites: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    pub collection: String,
    /// Path to the JSON corpus file loaded at startup
    pub corpus_path: String,
    pub top_k: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            locale_keywords: vec!["잠실".to_string()],
            default_locale: "잠실".to_string(),
            refusal_text: "죄송합니다. 저는 잠실 맛집에 대한 질문에만 답변할 수 있습니다."
                .to_string(),
            max_rewrites: 3,
        }
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            collection: "jamsil-matzip".to_string(),
            corpus_path: "data/jamsil-matzip.json".to_string(),
            top_k: 4,
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            temperature: 0.0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
