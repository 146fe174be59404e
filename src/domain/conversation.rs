//! Append-only conversation transcript for one request.

use crate::domain::llm::{Message, MessageRole};

/// One transcript entry. `scoring_artifact` marks relevance-grade messages
/// that must be excluded from the agent node's prompt.
#[derive(Debug, Clone)]
struct TranscriptEntry {
    message: Message,
    scoring_artifact: bool,
}

/// Ordered, append-only sequence of messages representing one request's
/// full trace. The first message is always the user question; the only
/// permitted in-place mutation is the one-time locale augmentation of
/// that first message.
#[derive(Debug, Clone)]
pub struct Conversation {
    entries: Vec<TranscriptEntry>,
    augmented: bool,
}

impl Conversation {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            entries: vec![TranscriptEntry {
                message: Message::user(question),
                scoring_artifact: false,
            }],
            augmented: false,
        }
    }

    /// The (possibly augmented) original question text
    pub fn question(&self) -> &str {
        &self.entries[0].message.content
    }

    /// Prepend the default locale to the question unless one of the locale
    /// keywords already occurs in it. Happens at most once per conversation,
    /// before classification and all downstream prompt construction.
    pub fn augment_question(&mut self, locale_keywords: &[String], default_locale: &str) {
        if self.augmented {
            return;
        }
        self.augmented = true;

        let question = &self.entries[0].message.content;
        let has_locale = locale_keywords.iter().any(|kw| question.contains(kw.as_str()));
        if !has_locale {
            tracing::debug!(locale = default_locale, "question lacks locale, prepending");
            self.entries[0].message.content = format!("{default_locale} {question}");
        }
    }

    pub fn push(&mut self, message: Message) {
        self.entries.push(TranscriptEntry {
            message,
            scoring_artifact: false,
        });
    }

    /// Append a relevance-scoring message, kept out of agent prompts
    pub fn push_artifact(&mut self, message: Message) {
        self.entries.push(TranscriptEntry {
            message,
            scoring_artifact: true,
        });
    }

    pub fn last(&self) -> Option<&Message> {
        self.entries.last().map(|e| &e.message)
    }

    /// Most recent tool message, if any
    pub fn last_tool_message(&self) -> Option<&Message> {
        self.entries
            .iter()
            .rev()
            .map(|e| &e.message)
            .find(|m| m.role == MessageRole::Tool)
    }

    /// Transcript for the agent node: everything except scoring artifacts
    pub fn history_for_agent(&self) -> Vec<Message> {
        self.entries
            .iter()
            .filter(|e| !e.scoring_artifact)
            .map(|e| e.message.clone())
            .collect()
    }

    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.entries.iter().map(|e| &e.message)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
