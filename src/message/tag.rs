//! Message tags.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::message::intent::IntentError;

/// A name/value pair read by the receiving process as input.
///
/// Tags are positional: order is preserved and duplicates are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub value: String,
}

impl Tag {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// Parses `Name=Value`; the value may itself contain `=`.
impl FromStr for Tag {
    type Err = IntentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((name, value)) if !name.trim().is_empty() => Ok(Tag::new(name.trim(), value)),
            _ => Err(IntentError::MalformedTag(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tag() {
        let tag: Tag = "Quantity=1".parse().unwrap();
        assert_eq!(tag, Tag::new("Quantity", "1"));
    }

    #[test]
    fn test_parse_value_with_equals() {
        let tag: Tag = "Memo=a=b".parse().unwrap();
        assert_eq!(tag.value, "a=b");
    }

    #[test]
    fn test_parse_empty_value() {
        let tag: Tag = "Flag=".parse().unwrap();
        assert_eq!(tag.value, "");
    }

    #[test]
    fn test_parse_malformed() {
        assert!("NoSeparator".parse::<Tag>().is_err());
        assert!("=value".parse::<Tag>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Tag::new("Action", "Info").to_string(), "Action=Info");
    }
}
