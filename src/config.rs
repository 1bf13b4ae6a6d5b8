// Tue Jan 13 2026 - Alex

use crate::hierarchy::{DEFAULT_MAX_DEPTH, ROOT_OBJECT_LABEL};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub max_depth: usize,
    pub root_label: String,
    pub own_fields_first: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            root_label: ROOT_OBJECT_LABEL.to_string(),
            own_fields_first: true,
        }
    }
}

impl ResolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        config.validate().map_err(|e| anyhow::anyhow!(e))?;
        Ok(config)
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_root_label(mut self, label: &str) -> Self {
        self.root_label = label.to_string();
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_depth == 0 {
            return Err("max_depth must be greater than 0".to_string());
        }
        if self.root_label.trim().is_empty() {
            return Err("root_label must not be empty".to_string());
        }
        if !self.own_fields_first {
            return Err("own_fields_first cannot be disabled: instance data always wins".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = ResolverConfig::default();
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(config.root_label, "Object");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(ResolverConfig::new().with_max_depth(0).validate().is_err());
        assert!(ResolverConfig::new().with_root_label("  ").validate().is_err());

        let mut config = ResolverConfig::new();
        config.own_fields_first = false;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ResolverConfig = serde_json::from_str(r#"{ "root_label": "root object" }"#).unwrap();
        assert_eq!(config.root_label, "root object");
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert!(config.own_fields_first);
    }

    #[test]
    fn test_from_missing_file() {
        let err = ResolverConfig::from_file(Path::new("/nonexistent/resolver.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }
}
