// Tue Jan 13 2026 - Alex

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A concrete object: the class it was constructed from plus the data
/// assigned on it at construction time.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Instance {
    runtime_class: Option<String>,
    #[serde(default)]
    own_fields: IndexMap<String, Value>,
}

impl Instance {
    pub fn new(runtime_class: &str) -> Self {
        Self {
            runtime_class: Some(runtime_class.to_string()),
            own_fields: IndexMap::new(),
        }
    }

    /// An instance carrying no class information at all.
    pub fn classless() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.set_field(name, value);
        self
    }

    pub fn set_field(&mut self, name: &str, value: impl Into<Value>) {
        self.own_fields.insert(name.to_string(), value.into());
    }

    pub fn runtime_class(&self) -> Option<&str> {
        self.runtime_class.as_deref()
    }

    pub fn has_own_field(&self, name: &str) -> bool {
        self.own_fields.contains_key(name)
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.own_fields.get(name)
    }

    pub fn own_field_names(&self) -> impl Iterator<Item = &str> {
        self.own_fields.keys().map(String::as_str)
    }

    pub fn own_fields(&self) -> &IndexMap<String, Value> {
        &self.own_fields
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{", self.runtime_class.as_deref().unwrap_or("<anonymous>"))?;
        for (i, (name, value)) in self.own_fields.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, " {}: {}", name, value)?;
        }
        write!(f, " }}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_own_fields() {
        let instance = Instance::new("Student")
            .with_field("name", "John")
            .with_field("age", 20);

        assert_eq!(instance.runtime_class(), Some("Student"));
        assert!(instance.has_own_field("age"));
        assert!(!instance.has_own_field("getAge"));
        assert_eq!(instance.field("age"), Some(&json!(20)));
        assert_eq!(instance.own_field_names().collect::<Vec<_>>(), vec!["name", "age"]);
    }

    #[test]
    fn test_classless_instance() {
        let instance = Instance::classless();
        assert_eq!(instance.runtime_class(), None);
        assert_eq!(instance.to_string(), "<anonymous> { }");
    }

    #[test]
    fn test_display() {
        let instance = Instance::new("Point").with_field("x", 1).with_field("y", 2);
        assert_eq!(instance.to_string(), "Point { x: 1, y: 2 }");
    }
}
