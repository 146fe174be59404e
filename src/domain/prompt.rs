//! Prompt template parsing and rendering
//!
//! Supports variable syntax: `${var:variable-name:default-value}`
//! - `${var:name}` - Required variable, error if not provided
//! - `${var:name:default}` - Optional variable with default value

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Regex to match variable patterns: ${var:name} or ${var:name:default}
static VARIABLE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\{var:([a-zA-Z0-9][-a-zA-Z0-9_]*)(?::([^}]*))?\}").unwrap()
});

/// Template processing errors
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TemplateError {
    #[error("Missing required variable: {name}")]
    MissingVariable { name: String },
}

/// A parsed variable from a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptVariable {
    pub name: String,
    pub default: Option<String>,
}

/// A parsed prompt template
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    content: String,
    variables: Vec<PromptVariable>,
}

impl PromptTemplate {
    /// Parse a template string and extract its variables
    pub fn parse(content: impl Into<String>) -> Self {
        let content = content.into();
        let mut variables: Vec<PromptVariable> = Vec::new();

        for cap in VARIABLE_PATTERN.captures_iter(&content) {
            let name = cap[1].to_string();
            if variables.iter().any(|v| v.name == name) {
                continue;
            }
            variables.push(PromptVariable {
                name,
                default: cap.get(2).map(|m| m.as_str().to_string()),
            });
        }

        Self { content, variables }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn variables(&self) -> &[PromptVariable] {
        &self.variables
    }

    /// Render the template with provided values. Variables without a value
    /// fall back to their default; a missing required variable is an error.
    pub fn render(&self, values: &HashMap<String, String>) -> Result<String, TemplateError> {
        let mut result = self.content.clone();

        for var in &self.variables {
            let value = values.get(&var.name).or(var.default.as_ref()).ok_or_else(|| {
                TemplateError::MissingVariable {
                    name: var.name.clone(),
                }
            })?;

            let pattern = match &var.default {
                Some(default) => format!("${{var:{}:{}}}", var.name, default),
                None => format!("${{var:{}}}", var.name),
            };
            result = result.replace(&pattern, value);
        }

        Ok(result)
    }

    /// Render with a single variable, the common case for node prompts
    pub fn render_one(
        &self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<String, TemplateError> {
        let mut values = HashMap::new();
        values.insert(name.to_string(), value.into());
        self.render(&values)
    }
}
