use std::collections::HashMap;
use std::sync::Arc;

use crate::config::{AgentConfig, LlmConfig, RetrievalConfig};
use crate::domain::document::{Document, Source};
use crate::domain::llm::{LlmProvider, LlmRequest, Message, ToolCall, ToolDefinition};
use crate::domain::retrieval::{Retriever, SearchParams};
use crate::domain::{AgentError, Conversation};

use super::classifier::RelevanceClassifier;
use super::generator::AnswerGenerator;
use super::prompts;
use super::rewriter::QueryRewriter;

/// Tunables for one workflow instance
#[derive(Debug, Clone)]
pub struct WorkflowConfig {
    pub model: String,
    pub temperature: f32,
    pub max_rewrites: usize,
    pub top_k: usize,
    pub locale_keywords: Vec<String>,
    pub default_locale: String,
    pub refusal_text: String,
    /// Answer used when the rewrite budget runs out with no documents
    pub fallback_answer: String,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        let agent = AgentConfig::default();
        let llm = LlmConfig::default();
        Self {
            model: llm.model,
            temperature: llm.temperature,
            max_rewrites: agent.max_rewrites,
            top_k: RetrievalConfig::default().top_k,
            locale_keywords: agent.locale_keywords,
            default_locale: agent.default_locale,
            refusal_text: agent.refusal_text,
            fallback_answer: "죄송합니다. 조건에 맞는 맛집 정보를 찾지 못했습니다."
                .to_string(),
        }
    }
}

impl WorkflowConfig {
    pub fn from_config(agent: &AgentConfig, retrieval: &RetrievalConfig, llm: &LlmConfig) -> Self {
        Self {
            model: llm.model.clone(),
            temperature: llm.temperature,
            max_rewrites: agent.max_rewrites,
            top_k: retrieval.top_k,
            locale_keywords: agent.locale_keywords.clone(),
            default_locale: agent.default_locale.clone(),
            refusal_text: agent.refusal_text.clone(),
            ..Self::default()
        }
    }
}

/// Result of one workflow run
#[derive(Debug, Clone)]
pub struct WorkflowOutcome {
    pub answer: String,
    pub sources: Vec<Source>,
    pub conversation: Conversation,
}

/// Current position in the gate/agent/retrieve/grade loop
#[derive(Debug)]
enum Node {
    Gate,
    Agent,
    Retrieve(Vec<ToolCall>),
    Grade,
    Rewrite,
    Generate,
}

/// The agentic retrieval workflow: gate the question, let the agent decide
/// whether to search, grade what came back, rewrite and retry when grading
/// fails, then generate the final recommendation.
#[derive(Debug)]
pub struct AgentWorkflow<P: LlmProvider, R: Retriever> {
    provider: Arc<P>,
    retriever: Arc<R>,
    gate: RelevanceClassifier<P>,
    grader: RelevanceClassifier<P>,
    rewriter: QueryRewriter<P>,
    generator: AnswerGenerator<P>,
    config: WorkflowConfig,
}

impl<P: LlmProvider, R: Retriever> AgentWorkflow<P, R> {
    pub fn new(provider: Arc<P>, retriever: Arc<R>, config: WorkflowConfig) -> Self {
        Self {
            gate: RelevanceClassifier::question_gate(provider.clone(), &config.model)
                .with_temperature(config.temperature),
            grader: RelevanceClassifier::document_grader(provider.clone(), &config.model)
                .with_temperature(config.temperature),
            rewriter: QueryRewriter::new(provider.clone(), &config.model)
                .with_temperature(config.temperature),
            generator: AnswerGenerator::new(provider.clone(), &config.model)
                .with_temperature(config.temperature),
            provider,
            retriever,
            config,
        }
    }

    fn retrieve_tool(&self) -> ToolDefinition {
        ToolDefinition::new(
            prompts::RETRIEVE_TOOL_NAME,
            prompts::RETRIEVE_TOOL_DESCRIPTION,
            serde_json::json!({
                "type": "object",
                "properties": {
                    "query": { "type": "string", "description": "검색어" }
                },
                "required": ["query"]
            }),
        )
    }

    /// Run the workflow for one question until an answer is produced or an
    /// unrecoverable error occurs.
    pub async fn run(&self, question: &str) -> Result<WorkflowOutcome, AgentError> {
        let mut conversation = Conversation::new(question);
        conversation
            .augment_question(&self.config.locale_keywords, &self.config.default_locale);

        let mut documents: Vec<Document> = Vec::new();
        let mut current_question = conversation.question().to_string();
        let mut rewrites = 0usize;
        let mut node = Node::Gate;

        loop {
            match node {
                Node::Gate => {
                    tracing::info!("Checking question relevance");
                    let mut values = HashMap::new();
                    values.insert("question".to_string(), conversation.question().to_string());
                    values.insert("locale".to_string(), self.config.default_locale.clone());

                    let label = self.gate.classify(&values).await?;
                    conversation.push_artifact(Message::assistant(if label.is_yes() {
                        "yes"
                    } else {
                        "no"
                    }));

                    if label.is_yes() {
                        node = Node::Agent;
                    } else {
                        tracing::info!("Question off-topic, refusing");
                        let answer = self.config.refusal_text.clone();
                        conversation.push(Message::assistant(answer.clone()));
                        return Ok(WorkflowOutcome {
                            answer,
                            sources: Vec::new(),
                            conversation,
                        });
                    }
                }
                Node::Agent => {
                    tracing::info!("Invoking agent");
                    let request = LlmRequest::builder()
                        .messages(conversation.history_for_agent())
                        .temperature(self.config.temperature)
                        .tool(self.retrieve_tool())
                        .build();

                    let response = self
                        .provider
                        .chat(&self.config.model, request)
                        .await
                        .map_err(|e| AgentError::generation(e.to_string()))?;

                    let message = response.message;
                    conversation.push(message.clone());

                    if message.has_tool_calls() {
                        node = Node::Retrieve(message.tool_calls);
                    } else {
                        tracing::info!("Agent answered without retrieval");
                        return Ok(WorkflowOutcome {
                            answer: message.content,
                            sources: Vec::new(),
                            conversation,
                        });
                    }
                }
                Node::Retrieve(calls) => {
                    for call in &calls {
                        let query = call
                            .argument_str("query")
                            .unwrap_or(&current_question)
                            .to_string();
                        tracing::info!(query = %query, "Retrieving documents");

                        let results = self
                            .retriever
                            .search(&SearchParams::new(query, self.config.top_k))
                            .await?;

                        let rendered =
                            serde_json::to_string_pretty(&results).unwrap_or_default();
                        conversation.push(Message::tool(rendered, &call.id));
                        documents = results;
                    }
                    node = Node::Grade;
                }
                Node::Grade => {
                    tracing::info!("Grading retrieved documents");
                    let context = conversation
                        .last_tool_message()
                        .map(|m| m.content.clone())
                        .ok_or(AgentError::MissingRetrieval)?;

                    let mut values = HashMap::new();
                    values.insert("question".to_string(), conversation.question().to_string());
                    values.insert("context".to_string(), context);

                    let label = self.grader.classify(&values).await?;
                    conversation.push_artifact(Message::assistant(if label.is_yes() {
                        "yes"
                    } else {
                        "no"
                    }));

                    if label.is_yes() {
                        node = Node::Generate;
                    } else if rewrites < self.config.max_rewrites {
                        node = Node::Rewrite;
                    } else if documents.is_empty() {
                        tracing::warn!(rewrites, "Rewrite budget exhausted with no documents");
                        let answer = self.config.fallback_answer.clone();
                        conversation.push(Message::assistant(answer.clone()));
                        return Ok(WorkflowOutcome {
                            answer,
                            sources: Vec::new(),
                            conversation,
                        });
                    } else {
                        tracing::warn!(rewrites, "Rewrite budget exhausted, forcing generation");
                        node = Node::Generate;
                    }
                }
                Node::Rewrite => {
                    rewrites += 1;
                    tracing::info!(attempt = rewrites, "Rewriting query");
                    // Always rewrite from the original question, not from a
                    // previous rewrite, so retries cannot drift off-topic.
                    let rewritten = self.rewriter.rewrite(conversation.question()).await?;
                    conversation.push(Message::assistant(rewritten.clone()));
                    current_question = rewritten;
                    node = Node::Agent;
                }
                Node::Generate => {
                    tracing::info!("Generating answer");
                    let answer = self
                        .generator
                        .generate(conversation.question(), &documents)
                        .await?;
                    conversation.push(Message::assistant(answer.clone()));
                    let sources = Source::extract(&documents);
                    return Ok(WorkflowOutcome {
                        answer,
                        sources,
                        conversation,
                    });
                }
            }
        }
    }
}
