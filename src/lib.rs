// Tue Jan 15 2026 - Alex

pub mod config;
pub mod hierarchy;
pub mod ui;
pub mod utils;

pub use config::ResolverConfig;
pub use hierarchy::{
    ClassDefinition, ClassHierarchy, HierarchyChain, HierarchyError, HierarchyLinearizer, Instance, Owner,
    OwnerResolver,
};
