// Tue Jan 15 2026 - Alex

use crate::hierarchy::{ClassDefinition, HierarchyError, HierarchyLinearizer, Instance};
use indexmap::IndexMap;
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;

/// Registry of every class in a single-inheritance hierarchy.
///
/// Classes may be added in any order; a parent only has to exist by the
/// time [`ClassHierarchy::validate`] runs. Once built the hierarchy is only
/// read, so it can be shared freely between threads.
#[derive(Debug, Clone, Default)]
pub struct ClassHierarchy {
    classes: IndexMap<String, ClassDefinition>,
}

impl ClassHierarchy {
    pub fn new() -> Self {
        Self {
            classes: IndexMap::new(),
        }
    }

    /// Add a class to the hierarchy
    pub fn add_class(&mut self, class: ClassDefinition) -> Result<(), HierarchyError> {
        if self.classes.contains_key(class.name()) {
            return Err(HierarchyError::DuplicateClass(class.name().to_string()));
        }
        self.classes.insert(class.name().to_string(), class);
        Ok(())
    }

    /// Get a class by name
    pub fn get_class(&self, name: &str) -> Option<&ClassDefinition> {
        self.classes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Immediate base class, if it is defined
    pub fn parent_of(&self, name: &str) -> Option<&ClassDefinition> {
        self.classes
            .get(name)
            .and_then(|class| class.parent())
            .and_then(|parent| self.classes.get(parent))
    }

    /// Direct subclasses, in definition order
    pub fn children_of(&self, name: &str) -> Vec<&ClassDefinition> {
        self.classes
            .values()
            .filter(|class| class.parent() == Some(name))
            .collect()
    }

    /// Get all ancestors of a class, nearest first
    pub fn get_ancestors(&self, name: &str) -> Vec<&ClassDefinition> {
        let mut ancestors = Vec::new();
        let mut visited = HashSet::new();
        visited.insert(name);

        let mut current = self.parent_of(name);
        while let Some(class) = current {
            if !visited.insert(class.name()) {
                break;
            }
            ancestors.push(class);
            current = self.parent_of(class.name());
        }

        ancestors
    }

    /// Check if one class is a strict ancestor of another
    pub fn is_ancestor(&self, ancestor: &str, descendant: &str) -> bool {
        self.get_ancestors(descendant)
            .iter()
            .any(|class| class.name() == ancestor)
    }

    /// Whether `instance` counts as an instance of `class`: its runtime
    /// class is `class` or a subclass of it.
    pub fn is_instance_of(&self, instance: &Instance, class: &str) -> bool {
        match instance.runtime_class() {
            Some(runtime) => runtime == class || self.is_ancestor(class, runtime),
            None => false,
        }
    }

    /// Number of parent links between `name` and its root
    pub fn depth_of(&self, name: &str) -> Option<usize> {
        self.contains(name).then(|| self.get_ancestors(name).len())
    }

    pub fn roots(&self) -> Vec<&ClassDefinition> {
        self.classes.values().filter(|class| class.is_root()).collect()
    }

    pub fn leaves(&self) -> Vec<&ClassDefinition> {
        self.classes
            .values()
            .filter(|class| self.children_of(class.name()).is_empty())
            .collect()
    }

    pub fn max_depth(&self) -> usize {
        self.classes
            .keys()
            .filter_map(|name| self.depth_of(name))
            .max()
            .unwrap_or(0)
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Iterate over all classes
    pub fn iter(&self) -> impl Iterator<Item = &ClassDefinition> {
        self.classes.values()
    }

    /// Check that every parent exists and that no class reaches itself.
    pub fn validate(&self) -> Result<(), HierarchyError> {
        for class in self.classes.values() {
            if let Some(parent) = class.parent() {
                if !self.classes.contains_key(parent) {
                    return Err(HierarchyError::UnknownParent {
                        class: class.name().to_string(),
                        parent: parent.to_string(),
                    });
                }
            }
        }

        let linearizer = HierarchyLinearizer::new(self).with_max_depth(self.classes.len() + 1);
        for name in self.classes.keys() {
            linearizer.linearize_class(name)?;
        }

        Ok(())
    }

    /// Run the constructor chain of `class_name`, root first. Each level
    /// assigns its constructor fields from `values`; fields without a value
    /// are set to `null`.
    pub fn instantiate(
        &self,
        class_name: &str,
        values: &IndexMap<String, Value>,
    ) -> Result<Instance, HierarchyError> {
        if !self.contains(class_name) {
            return Err(HierarchyError::UnknownClass(class_name.to_string()));
        }

        let chain = HierarchyLinearizer::new(self).linearize_class(class_name)?;
        let mut instance = Instance::new(class_name);

        for class in chain.iter().rev() {
            for field in class.constructor_fields() {
                let value = values.get(field).cloned().unwrap_or(Value::Null);
                instance.set_field(field, value);
            }
        }

        for key in values.keys() {
            if !instance.has_own_field(key) {
                log::warn!("{} has no constructor assigning '{}', value ignored", class_name, key);
            }
        }

        Ok(instance)
    }
}

impl fmt::Display for ClassHierarchy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Class Hierarchy ({} classes, max depth {})", self.class_count(), self.max_depth())?;

        fn print_tree(
            f: &mut fmt::Formatter<'_>,
            hierarchy: &ClassHierarchy,
            class: &ClassDefinition,
            depth: usize,
            visited: &mut HashSet<String>,
        ) -> fmt::Result {
            if !visited.insert(class.name().to_string()) {
                return Ok(());
            }
            let indent = "  ".repeat(depth);
            writeln!(f, "{}{}", indent, class)?;
            for child in hierarchy.children_of(class.name()) {
                print_tree(f, hierarchy, child, depth + 1, visited)?;
            }
            Ok(())
        }

        let mut visited = HashSet::new();
        for root in self.roots() {
            print_tree(f, self, root, 0, &mut visited)?;
        }

        Ok(())
    }
}

/// Statistics about the class hierarchy
#[derive(Debug, Clone, PartialEq)]
pub struct HierarchyStats {
    pub total_classes: usize,
    pub root_classes: usize,
    pub leaf_classes: usize,
    pub max_depth: usize,
    pub avg_depth: f64,
    pub declared_members: usize,
}

impl HierarchyStats {
    pub fn from_hierarchy(hierarchy: &ClassHierarchy) -> Self {
        let total_classes = hierarchy.class_count();
        let avg_depth = if total_classes > 0 {
            hierarchy
                .iter()
                .filter_map(|class| hierarchy.depth_of(class.name()))
                .map(|depth| depth as f64)
                .sum::<f64>()
                / total_classes as f64
        } else {
            0.0
        };

        Self {
            total_classes,
            root_classes: hierarchy.roots().len(),
            leaf_classes: hierarchy.leaves().len(),
            max_depth: hierarchy.max_depth(),
            avg_depth,
            declared_members: hierarchy.iter().map(|class| class.declared_members().count()).sum(),
        }
    }
}

impl fmt::Display for HierarchyStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Hierarchy Statistics:")?;
        writeln!(f, "  Total classes: {}", self.total_classes)?;
        writeln!(f, "  Root classes: {}", self.root_classes)?;
        writeln!(f, "  Leaf classes: {}", self.leaf_classes)?;
        writeln!(f, "  Max depth: {}", self.max_depth)?;
        writeln!(f, "  Average depth: {:.2}", self.avg_depth)?;
        writeln!(f, "  Declared members: {}", self.declared_members)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> ClassHierarchy {
        let mut hierarchy = ClassHierarchy::new();
        hierarchy.add_class(ClassDefinition::new("Base").with_constructor_field("name")).unwrap();
        hierarchy
            .add_class(ClassDefinition::new("Mid").with_parent("Base").with_constructor_field("age"))
            .unwrap();
        hierarchy
            .add_class(ClassDefinition::new("Leaf").with_parent("Mid").with_constructor_field("subject"))
            .unwrap();
        hierarchy.add_class(ClassDefinition::new("Other").with_parent("Base")).unwrap();
        hierarchy
    }

    #[test]
    fn test_class_hierarchy() {
        let hierarchy = sample();

        assert_eq!(hierarchy.class_count(), 4);
        assert_eq!(hierarchy.max_depth(), 2);
        assert!(hierarchy.is_ancestor("Base", "Leaf"));
        assert!(!hierarchy.is_ancestor("Leaf", "Base"));
        assert!(!hierarchy.is_ancestor("Other", "Leaf"));
        assert_eq!(hierarchy.depth_of("Mid"), Some(1));
        assert_eq!(hierarchy.depth_of("Missing"), None);
        assert!(hierarchy.validate().is_ok());
    }

    #[test]
    fn test_duplicate_class_rejected() {
        let mut hierarchy = sample();
        let err = hierarchy.add_class(ClassDefinition::new("Mid")).unwrap_err();
        assert_eq!(err, HierarchyError::DuplicateClass("Mid".to_string()));
    }

    #[test]
    fn test_validate_unknown_parent() {
        let mut hierarchy = ClassHierarchy::new();
        hierarchy.add_class(ClassDefinition::new("Orphan").with_parent("Ghost")).unwrap();

        assert_eq!(
            hierarchy.validate(),
            Err(HierarchyError::UnknownParent {
                class: "Orphan".to_string(),
                parent: "Ghost".to_string(),
            })
        );
    }

    #[test]
    fn test_validate_cycle() {
        let mut hierarchy = ClassHierarchy::new();
        hierarchy.add_class(ClassDefinition::new("A").with_parent("B")).unwrap();
        hierarchy.add_class(ClassDefinition::new("B").with_parent("A")).unwrap();

        assert!(matches!(
            hierarchy.validate(),
            Err(HierarchyError::CyclicHierarchy { .. })
        ));
        // ancestor queries stay finite on a cycle
        assert!(hierarchy.is_ancestor("B", "A"));
        assert_eq!(hierarchy.get_ancestors("A").len(), 1);
    }

    #[test]
    fn test_is_instance_of() {
        let hierarchy = sample();
        let leaf = Instance::new("Leaf");

        assert!(hierarchy.is_instance_of(&leaf, "Leaf"));
        assert!(hierarchy.is_instance_of(&leaf, "Base"));
        assert!(!hierarchy.is_instance_of(&leaf, "Other"));
        assert!(!hierarchy.is_instance_of(&Instance::classless(), "Base"));
    }

    #[test]
    fn test_instantiate_runs_constructor_chain() {
        let hierarchy = sample();
        let mut values = IndexMap::new();
        values.insert("subject".to_string(), json!("History"));
        values.insert("name".to_string(), json!("John"));

        let instance = hierarchy.instantiate("Leaf", &values).unwrap();

        assert_eq!(instance.runtime_class(), Some("Leaf"));
        assert_eq!(instance.own_field_names().collect::<Vec<_>>(), vec!["name", "age", "subject"]);
        assert_eq!(instance.field("age"), Some(&Value::Null));
        assert_eq!(instance.field("subject"), Some(&json!("History")));
    }

    #[test]
    fn test_instantiate_unknown_class() {
        let hierarchy = sample();
        assert_eq!(
            hierarchy.instantiate("Nope", &IndexMap::new()),
            Err(HierarchyError::UnknownClass("Nope".to_string()))
        );
    }

    #[test]
    fn test_stats_and_display() {
        let hierarchy = sample();
        let stats = HierarchyStats::from_hierarchy(&hierarchy);

        assert_eq!(stats.total_classes, 4);
        assert_eq!(stats.root_classes, 1);
        assert_eq!(stats.leaf_classes, 2);
        assert_eq!(stats.max_depth, 2);

        let rendered = hierarchy.to_string();
        assert!(rendered.starts_with("Class Hierarchy (4 classes, max depth 2)"));
        assert!(rendered.contains("\n    Leaf extends Mid\n"));
    }
}
