//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Endpoint URLs parse and use http(s)
//! - Value ranges (timeouts > 0)
//! - Configured intents have names and named tags
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - The process id is not checked here; the network decides its validity

use thiserror::Error;

use crate::config::schema::DispatchConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is not a valid http(s) URL: {reason}")]
    InvalidUrl { field: &'static str, reason: String },

    #[error("{0} must be greater than zero")]
    ZeroValue(&'static str),

    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("intent '{0}' has a tag with an empty name")]
    EmptyTagName(String),
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &DispatchConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_url("network.mu_url", &config.network.mu_url, &mut errors);
    check_url("network.cu_url", &config.network.cu_url, &mut errors);

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroValue("timeouts.request_secs"));
    }

    if config.process.trim().is_empty() {
        errors.push(ValidationError::Empty("process"));
    }

    if config.intent.trim().is_empty() {
        errors.push(ValidationError::Empty("intent"));
    }

    for (name, intent) in &config.intents {
        if name.trim().is_empty() {
            errors.push(ValidationError::Empty("intents.<name>"));
        }
        if intent.tags.iter().any(|tag| tag.name.trim().is_empty()) {
            errors.push(ValidationError::EmptyTagName(name.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_url(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    match url::Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::InvalidUrl {
            field,
            reason: format!("unsupported scheme '{}'", url.scheme()),
        }),
        Err(e) => errors.push(ValidationError::InvalidUrl {
            field,
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{Intent, Tag};

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&DispatchConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = DispatchConfig::default();
        config.network.mu_url = "not a url".to_string();
        config.network.cu_url = "ftp://cu.example".to_string();
        config.timeouts.request_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::ZeroValue("timeouts.request_secs")));
        assert!(errors[1].to_string().contains("unsupported scheme 'ftp'"));
    }

    #[test]
    fn test_empty_intent_tag_name() {
        let mut config = DispatchConfig::default();
        config.intents.insert(
            "broken".to_string(),
            Intent {
                tags: vec![Tag::new("", "x")],
                data: None,
            },
        );

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::EmptyTagName("broken".to_string())]);
    }

    #[test]
    fn test_process_format_left_to_network() {
        let mut config = DispatchConfig::default();
        config.process = "not-a-process".to_string();

        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_empty_process() {
        let mut config = DispatchConfig::default();
        config.process = "  ".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::Empty("process")]);
    }
}
