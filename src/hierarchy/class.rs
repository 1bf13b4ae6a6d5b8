// Tue Jan 13 2026 - Alex

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One class of a single-inheritance hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDefinition {
    /// Name of the class, unique within its hierarchy
    name: String,
    /// Immediate base class, `None` for a root
    parent: Option<String>,
    /// Members introduced or overridden directly on this class
    declared_members: IndexSet<String>,
    /// Own fields this class's constructor assigns on a new instance
    constructor_fields: Vec<String>,
}

impl ClassDefinition {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            parent: None,
            declared_members: IndexSet::new(),
            constructor_fields: Vec::new(),
        }
    }

    pub fn with_parent(mut self, parent: &str) -> Self {
        self.parent = Some(parent.to_string());
        self
    }

    pub fn with_member(mut self, member: &str) -> Self {
        self.declared_members.insert(member.to_string());
        self
    }

    pub fn with_members<I, S>(mut self, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.declared_members.extend(members.into_iter().map(Into::into));
        self
    }

    pub fn with_constructor_field(mut self, field: &str) -> Self {
        if !self.constructor_fields.iter().any(|f| f == field) {
            self.constructor_fields.push(field.to_string());
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn declares(&self, member: &str) -> bool {
        self.declared_members.contains(member)
    }

    pub fn declared_members(&self) -> impl Iterator<Item = &str> {
        self.declared_members.iter().map(String::as_str)
    }

    pub fn constructor_fields(&self) -> &[String] {
        &self.constructor_fields
    }
}

impl fmt::Display for ClassDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(parent) = &self.parent {
            write!(f, " extends {}", parent)?;
        }
        if !self.declared_members.is_empty() {
            let members: Vec<&str> = self.declared_members().collect();
            write!(f, " {{ {} }}", members.join(", "))?;
        }
        Ok(())
    }
}
