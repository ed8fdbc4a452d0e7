//! Named message intents.
//!
//! # Responsibilities
//! - Hold the catalog of selectable intents (built-in plus configured)
//! - Resolve exactly one intent per run into its final tag list and data
//!
//! # Design Decisions
//! - Built-in intents are equally weighted; `debug-send` is only the default
//! - Extra tags are appended after the intent's own tags, in the order given
//! - Configured intents replace built-ins of the same name

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::message::tag::Tag;

/// Intent selected when none is named.
pub const DEFAULT_INTENT: &str = "debug-send";

/// Errors raised while selecting an intent.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntentError {
    #[error("Unknown intent '{name}' (available: {available})")]
    Unknown { name: String, available: String },

    #[error("Intent '{0}' has a tag with an empty name")]
    EmptyTagName(String),

    #[error("Malformed tag '{0}', expected NAME=VALUE")]
    MalformedTag(String),
}

/// Tag payload and optional data for one kind of message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Intent {
    pub tags: Vec<Tag>,
    pub data: Option<String>,
}

impl Intent {
    fn action(action: &str) -> Self {
        Self {
            tags: vec![Tag::new("Action", action)],
            data: None,
        }
    }
}

/// Which intent to send, with per-invocation additions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentSelection {
    pub name: String,
    pub extra_tags: Vec<Tag>,
    /// Replaces the intent's own data when set.
    pub data: Option<String>,
}

impl IntentSelection {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra_tags: Vec::new(),
            data: None,
        }
    }
}

impl Default for IntentSelection {
    fn default() -> Self {
        Self::named(DEFAULT_INTENT)
    }
}

/// The single intent that will be dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIntent {
    pub name: String,
    pub tags: Vec<Tag>,
    pub data: Option<String>,
}

/// Catalog of selectable intents, keyed by name.
#[derive(Debug, Clone)]
pub struct IntentCatalog {
    intents: BTreeMap<String, Intent>,
}

impl IntentCatalog {
    /// Built-in intents.
    pub fn builtin() -> Self {
        let intents = [
            ("debug-send", Intent::action("Debug-Send-TokenOut-To-Pool")),
            ("execute-strategy", Intent::action("Execute-Strategy")),
            ("withdraw", Intent::action("Withdraw")),
            ("info", Intent::action("Info")),
            ("transfer", Intent::action("Transfer")),
        ]
        .into_iter()
        .map(|(name, intent)| (name.to_string(), intent))
        .collect();

        Self { intents }
    }

    /// Built-in intents plus configured ones, configured taking precedence.
    pub fn with_custom(custom: &BTreeMap<String, Intent>) -> Self {
        let mut catalog = Self::builtin();
        for (name, intent) in custom {
            catalog.intents.insert(name.clone(), intent.clone());
        }
        catalog
    }

    pub fn get(&self, name: &str) -> Option<&Intent> {
        self.intents.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Intent)> {
        self.intents.iter().map(|(name, intent)| (name.as_str(), intent))
    }

    /// Resolve a selection into the tags and data to send.
    pub fn resolve(&self, selection: &IntentSelection) -> Result<ResolvedIntent, IntentError> {
        let intent = self
            .intents
            .get(&selection.name)
            .ok_or_else(|| IntentError::Unknown {
                name: selection.name.clone(),
                available: self.intents.keys().cloned().collect::<Vec<_>>().join(", "),
            })?;

        let tags: Vec<Tag> = intent
            .tags
            .iter()
            .chain(selection.extra_tags.iter())
            .cloned()
            .collect();

        if tags.iter().any(|tag| tag.name.trim().is_empty()) {
            return Err(IntentError::EmptyTagName(selection.name.clone()));
        }

        Ok(ResolvedIntent {
            name: selection.name.clone(),
            tags,
            data: selection.data.clone().or_else(|| intent.data.clone()),
        })
    }
}

impl Default for IntentCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
