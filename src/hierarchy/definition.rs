// Tue Jan 15 2026 - Alex

use crate::hierarchy::{ClassDefinition, ClassHierarchy, HierarchyError, Instance};
use anyhow::Context;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// JSON description of a hierarchy and, optionally, instances built from it.
///
/// ```json
/// {
///   "classes": [
///     { "name": "Human", "members": ["getName"], "constructor": ["name"] },
///     { "name": "Man", "parent": "Human", "members": ["getAge"], "constructor": ["age"] }
///   ],
///   "instances": [
///     { "name": "bob", "class": "Man", "fields": { "name": "Bob", "age": 41 } }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HierarchyDefinition {
    pub classes: Vec<ClassSpec>,
    #[serde(default)]
    pub instances: Vec<InstanceSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassSpec {
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default)]
    pub constructor: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceSpec {
    #[serde(default)]
    pub name: Option<String>,
    pub class: String,
    #[serde(default)]
    pub fields: IndexMap<String, Value>,
}

impl ClassSpec {
    fn to_class(&self) -> Result<ClassDefinition, HierarchyError> {
        if self.name.trim().is_empty() {
            return Err(HierarchyError::InvalidDefinition("class with empty name".to_string()));
        }

        let mut class = ClassDefinition::new(&self.name).with_members(self.members.iter().cloned());
        if let Some(parent) = &self.parent {
            class = class.with_parent(parent);
        }
        for field in &self.constructor {
            class = class.with_constructor_field(field);
        }
        Ok(class)
    }
}

impl HierarchyDefinition {
    pub fn from_json(text: &str) -> Result<Self, HierarchyError> {
        serde_json::from_str(text).map_err(|e| HierarchyError::InvalidDefinition(e.to_string()))
    }

    /// Build and validate the class registry.
    pub fn build(&self) -> Result<ClassHierarchy, HierarchyError> {
        let mut hierarchy = ClassHierarchy::new();
        for spec in &self.classes {
            hierarchy.add_class(spec.to_class()?)?;
        }
        hierarchy.validate()?;
        log::debug!("Built hierarchy with {} classes", hierarchy.class_count());
        Ok(hierarchy)
    }

    /// Find an instance by its name, or by its position in the file.
    pub fn find_instance(&self, key: &str) -> Option<&InstanceSpec> {
        self.instances
            .iter()
            .find(|spec| spec.name.as_deref() == Some(key))
            .or_else(|| key.parse::<usize>().ok().and_then(|index| self.instances.get(index)))
    }

    pub fn instantiate(&self, hierarchy: &ClassHierarchy, key: &str) -> Result<Instance, HierarchyError> {
        let spec = self
            .find_instance(key)
            .ok_or_else(|| HierarchyError::InvalidDefinition(format!("no instance named {}", key)))?;
        hierarchy.instantiate(&spec.class, &spec.fields)
    }
}

pub fn load_definition(path: &Path) -> anyhow::Result<HierarchyDefinition> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read definition {}", path.display()))?;
    let definition = HierarchyDefinition::from_json(&text)
        .with_context(|| format!("Failed to parse definition {}", path.display()))?;
    Ok(definition)
}
