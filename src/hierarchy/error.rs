// Tue Jan 13 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HierarchyError {
    #[error("Class already defined: {0}")]
    DuplicateClass(String),
    #[error("Class {class} extends unknown parent {parent}")]
    UnknownParent { class: String, parent: String },
    #[error("Unknown class: {0}")]
    UnknownClass(String),
    #[error("Cyclic hierarchy detected at class {class}")]
    CyclicHierarchy { class: String },
    #[error("Hierarchy deeper than {limit} levels")]
    DepthExceeded { limit: usize },
    #[error("Invalid definition: {0}")]
    InvalidDefinition(String),
}
