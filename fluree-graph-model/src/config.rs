//! Model configuration
//!
//! `ModelConfig` is plain serde data with defaults for every field, so an
//! empty JSON object is a valid configuration. Individual fields can be
//! overridden from the environment:
//!
//! | Variable                          | Field               |
//! |-----------------------------------|---------------------|
//! | `FLUREE_MODEL_CHECK_TRIPLES`      | `check_triples`     |
//! | `FLUREE_MODEL_HIERARCHICAL_PATH`  | `hierarchical_path` |
//! | `FLUREE_MODEL_LANGUAGE`           | `language`          |
//! | `FLUREE_MODEL_DEFAULT_NAMESPACE`  | `default_namespace` |

use crate::error::{ModelError, Result};
use fluree_vocab::namespaces;
use serde::{Deserialize, Serialize};

pub const ENV_CHECK_TRIPLES: &str = "FLUREE_MODEL_CHECK_TRIPLES";
pub const ENV_HIERARCHICAL_PATH: &str = "FLUREE_MODEL_HIERARCHICAL_PATH";
pub const ENV_LANGUAGE: &str = "FLUREE_MODEL_LANGUAGE";
pub const ENV_DEFAULT_NAMESPACE: &str = "FLUREE_MODEL_DEFAULT_NAMESPACE";

/// What happens to a List's address when its first element is popped
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListHeadPolicy {
    /// The former second sublist becomes the head; the List's address
    /// changes to that node's address.
    #[default]
    Promote,
    /// The second value is copied into the head and the second sublist is
    /// unlinked; the List's address never changes.
    Stable,
}

/// How an Alt picks its default when none is given
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AltDefaultPolicy {
    #[default]
    First,
    Random,
}

/// Configuration shared by every resource built against one context
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Check statements against the constraint registry before writing
    pub check_triples: bool,
    /// Include super-class/super-property lineage in addresses
    pub hierarchical_path: bool,
    /// Language tag applied to text literals when none is given
    pub language: Option<String>,
    /// Namespace for resources built without one
    pub default_namespace: String,
    pub list_head_policy: ListHeadPolicy,
    pub alt_default_policy: AltDefaultPolicy,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            check_triples: true,
            hierarchical_path: true,
            language: None,
            default_namespace: namespaces::DEFAULT.to_string(),
            list_head_policy: ListHeadPolicy::default(),
            alt_default_policy: AltDefaultPolicy::default(),
        }
    }
}

impl ModelConfig {
    /// Parse a JSON configuration document
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Defaults with environment overrides applied
    pub fn from_env() -> Result<Self> {
        Self::default().with_env()
    }

    /// Apply overrides from the process environment
    pub fn with_env(self) -> Result<Self> {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary lookup; empty values are ignored
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(raw) = get(ENV_CHECK_TRIPLES) {
            self.check_triples = parse_bool(ENV_CHECK_TRIPLES, &raw)?;
        }
        if let Some(raw) = get(ENV_HIERARCHICAL_PATH) {
            self.hierarchical_path = parse_bool(ENV_HIERARCHICAL_PATH, &raw)?;
        }
        if let Some(lang) = get(ENV_LANGUAGE) {
            self.language = Some(lang.trim().to_string());
        }
        if let Some(ns) = get(ENV_DEFAULT_NAMESPACE) {
            self.default_namespace = ns.trim().to_string();
        }
        Ok(self)
    }

    pub fn with_check_triples(mut self, check: bool) -> Self {
        self.check_triples = check;
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_list_head_policy(mut self, policy: ListHeadPolicy) -> Self {
        self.list_head_policy = policy;
        self
    }

    pub fn with_alt_default_policy(mut self, policy: AltDefaultPolicy) -> Self {
        self.alt_default_policy = policy;
        self
    }
}

fn parse_bool(name: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ModelError::config(format!(
            "{name}: expected a boolean, got '{other}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = ModelConfig::default();
        assert!(config.check_triples);
        assert!(config.hierarchical_path);
        assert_eq!(config.default_namespace, "http://default.example.com");
        assert_eq!(config.list_head_policy, ListHeadPolicy::Promote);
        assert_eq!(config.alt_default_policy, AltDefaultPolicy::First);
    }

    #[test]
    fn test_from_json_partial() {
        let config = ModelConfig::from_json(
            r#"{"check_triples": false, "list_head_policy": "stable", "language": "fr"}"#,
        )
        .unwrap();
        assert!(!config.check_triples);
        assert_eq!(config.list_head_policy, ListHeadPolicy::Stable);
        assert_eq!(config.language.as_deref(), Some("fr"));
        assert!(config.hierarchical_path);

        assert!(ModelConfig::from_json("{}").is_ok());
        assert!(matches!(
            ModelConfig::from_json(r#"{"alt_default_policy": "sometimes"}"#),
            Err(ModelError::Json(_))
        ));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_CHECK_TRIPLES, "off"),
            (ENV_LANGUAGE, "en-GB"),
            (ENV_DEFAULT_NAMESPACE, "   "),
        ]
        .into_iter()
        .collect();

        let config = ModelConfig::default()
            .with_overrides(|name| env.get(name).map(|v| v.to_string()))
            .unwrap();
        assert!(!config.check_triples);
        assert_eq!(config.language.as_deref(), Some("en-GB"));
        assert_eq!(config.default_namespace, "http://default.example.com");
    }

    #[test]
    fn test_bad_boolean_override() {
        let err = ModelConfig::default()
            .with_overrides(|name| (name == ENV_HIERARCHICAL_PATH).then(|| "maybe".to_string()))
            .unwrap_err();
        assert!(matches!(err, ModelError::Config(_)));
    }
}
