// Tue Jan 15 2026 - Alex

pub mod class;
pub mod definition;
pub mod error;
pub mod inheritance;
pub mod instance;
pub mod linearizer;
pub mod resolver;
pub mod sample;

pub use class::ClassDefinition;
pub use definition::{load_definition, ClassSpec, HierarchyDefinition, InstanceSpec};
pub use error::HierarchyError;
pub use inheritance::{ClassHierarchy, HierarchyStats};
pub use instance::Instance;
pub use linearizer::{HierarchyChain, HierarchyLinearizer, DEFAULT_MAX_DEPTH};
pub use resolver::{MemberLookup, Owner, OwnerReport, OwnerResolver, ROOT_OBJECT_LABEL};
