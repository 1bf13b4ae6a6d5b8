// Tue Jan 15 2026 - Alex

//! Human -> Man -> Student, the hierarchy the `demo` command runs on.

use crate::hierarchy::{ClassDefinition, ClassHierarchy, HierarchyError, Instance};
use indexmap::IndexMap;
use serde_json::json;

pub const DEMO_MEMBERS: [&str; 5] = ["age", "getSubject", "getAge", "getName", "toString"];

pub fn human_hierarchy() -> Result<ClassHierarchy, HierarchyError> {
    let mut hierarchy = ClassHierarchy::new();

    hierarchy.add_class(
        ClassDefinition::new("Human")
            .with_member("getName")
            .with_constructor_field("name"),
    )?;
    hierarchy.add_class(
        ClassDefinition::new("Man")
            .with_parent("Human")
            .with_member("getAge")
            .with_constructor_field("age"),
    )?;
    hierarchy.add_class(
        ClassDefinition::new("Student")
            .with_parent("Man")
            .with_member("getSubject")
            .with_constructor_field("subject"),
    )?;

    hierarchy.validate()?;
    Ok(hierarchy)
}

pub fn john(hierarchy: &ClassHierarchy) -> Result<Instance, HierarchyError> {
    let mut values = IndexMap::new();
    values.insert("name".to_string(), json!("Jon Snow"));
    values.insert("age".to_string(), json!(20));
    values.insert("subject".to_string(), json!("History of the North"));
    hierarchy.instantiate("Student", &values)
}
