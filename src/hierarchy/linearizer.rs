// Tue Jan 15 2026 - Alex

use crate::hierarchy::{ClassDefinition, ClassHierarchy, HierarchyError, Instance};
use std::collections::HashSet;
use std::fmt;

pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Ordered ancestor list of an instance, most-derived class first and the
/// root last. Built fresh for every lookup.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HierarchyChain<'a> {
    classes: Vec<&'a ClassDefinition>,
}

impl<'a> HierarchyChain<'a> {
    pub fn empty() -> Self {
        Self { classes: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'a ClassDefinition> {
        self.classes.get(index).copied()
    }

    pub fn most_derived(&self) -> Option<&'a ClassDefinition> {
        self.classes.first().copied()
    }

    pub fn root(&self) -> Option<&'a ClassDefinition> {
        self.classes.last().copied()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &'a ClassDefinition> + '_ {
        self.classes.iter().copied()
    }

    pub fn names(&self) -> Vec<&'a str> {
        self.classes.iter().map(|class| class.name()).collect()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.classes.iter().position(|class| class.name() == name)
    }
}

impl fmt::Display for HierarchyChain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.names().join(" -> "))
    }
}

/// Walks `parent` links to flatten a class lineage.
#[derive(Debug, Clone, Copy)]
pub struct HierarchyLinearizer<'a> {
    hierarchy: &'a ClassHierarchy,
    max_depth: usize,
}

impl<'a> HierarchyLinearizer<'a> {
    pub fn new(hierarchy: &'a ClassHierarchy) -> Self {
        Self {
            hierarchy,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Chain of the instance's runtime class. An instance without class
    /// information yields an empty chain.
    pub fn linearize(&self, instance: &Instance) -> Result<HierarchyChain<'a>, HierarchyError> {
        match instance.runtime_class() {
            Some(class) => self.linearize_class(class),
            None => Ok(HierarchyChain::empty()),
        }
    }

    /// Chain starting at the named class. The walk stops at a root or at a
    /// class reference the hierarchy does not know.
    pub fn linearize_class(&self, name: &str) -> Result<HierarchyChain<'a>, HierarchyError> {
        let mut classes = Vec::new();
        let mut visited = HashSet::new();
        let mut current = self.hierarchy.get_class(name);

        if current.is_none() {
            log::warn!("Class {} is not part of the hierarchy", name);
        }

        while let Some(class) = current {
            if !visited.insert(class.name()) {
                return Err(HierarchyError::CyclicHierarchy {
                    class: class.name().to_string(),
                });
            }
            if classes.len() >= self.max_depth {
                return Err(HierarchyError::DepthExceeded { limit: self.max_depth });
            }

            log::trace!("chain[{}] = {}", classes.len(), class.name());
            classes.push(class);

            current = match class.parent() {
                Some(parent) => {
                    let next = self.hierarchy.get_class(parent);
                    if next.is_none() {
                        log::warn!("{} extends undefined class {}, chain truncated", class.name(), parent);
                    }
                    next
                }
                None => None,
            };
        }

        Ok(HierarchyChain { classes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_levels() -> ClassHierarchy {
        let mut hierarchy = ClassHierarchy::new();
        hierarchy.add_class(ClassDefinition::new("Base")).unwrap();
        hierarchy.add_class(ClassDefinition::new("Mid").with_parent("Base")).unwrap();
        hierarchy.add_class(ClassDefinition::new("Leaf").with_parent("Mid")).unwrap();
        hierarchy
    }

    #[test]
    fn test_linearize_most_derived_first() {
        let hierarchy = three_levels();
        let chain = HierarchyLinearizer::new(&hierarchy)
            .linearize(&Instance::new("Leaf"))
            .unwrap();

        assert_eq!(chain.names(), vec!["Leaf", "Mid", "Base"]);
        assert_eq!(chain.most_derived().map(|c| c.name()), Some("Leaf"));
        assert_eq!(chain.root().map(|c| c.name()), Some("Base"));
        assert_eq!(chain.len(), hierarchy.depth_of("Leaf").unwrap() + 1);
        assert_eq!(chain.to_string(), "Leaf -> Mid -> Base");
    }

    #[test]
    fn test_linearize_root_is_singleton() {
        let hierarchy = three_levels();
        let chain = HierarchyLinearizer::new(&hierarchy)
            .linearize(&Instance::new("Base"))
            .unwrap();
        assert_eq!(chain.names(), vec!["Base"]);
    }

    #[test]
    fn test_linearize_without_class_is_empty() {
        let hierarchy = three_levels();
        let linearizer = HierarchyLinearizer::new(&hierarchy);

        assert!(linearizer.linearize(&Instance::classless()).unwrap().is_empty());
        assert!(linearizer.linearize(&Instance::new("Unknown")).unwrap().is_empty());
    }

    #[test]
    fn test_linearize_stops_at_dangling_parent() {
        let mut hierarchy = ClassHierarchy::new();
        hierarchy.add_class(ClassDefinition::new("Child").with_parent("Missing")).unwrap();

        let chain = HierarchyLinearizer::new(&hierarchy).linearize_class("Child").unwrap();
        assert_eq!(chain.names(), vec!["Child"]);
    }

    #[test]
    fn test_cycle_is_reported() {
        let mut hierarchy = ClassHierarchy::new();
        hierarchy.add_class(ClassDefinition::new("A").with_parent("C")).unwrap();
        hierarchy.add_class(ClassDefinition::new("B").with_parent("A")).unwrap();
        hierarchy.add_class(ClassDefinition::new("C").with_parent("B")).unwrap();

        let err = HierarchyLinearizer::new(&hierarchy).linearize_class("B").unwrap_err();
        assert_eq!(err, HierarchyError::CyclicHierarchy { class: "B".to_string() });
    }

    #[test]
    fn test_depth_limit() {
        let hierarchy = three_levels();
        let linearizer = HierarchyLinearizer::new(&hierarchy).with_max_depth(2);

        assert_eq!(
            linearizer.linearize_class("Leaf"),
            Err(HierarchyError::DepthExceeded { limit: 2 })
        );
        assert!(linearizer.linearize_class("Mid").is_ok());
    }
}
