// Tue Jan 15 2026 - Alex

use crate::config::ResolverConfig;
use crate::hierarchy::{ClassHierarchy, HierarchyChain, HierarchyError, HierarchyLinearizer, Instance};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

pub const ROOT_OBJECT_LABEL: &str = "Object";

/// Where a member lives.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Owner {
    /// The named class declares the member, or assigned it as instance data
    Class(String),
    /// No user-defined class in the chain declares the member
    RootObject,
}

impl Owner {
    pub fn class_name(&self) -> Option<&str> {
        match self {
            Owner::Class(name) => Some(name),
            Owner::RootObject => None,
        }
    }

    pub fn is_root_object(&self) -> bool {
        matches!(self, Owner::RootObject)
    }

    pub fn label<'a>(&'a self, root_label: &'a str) -> &'a str {
        match self {
            Owner::Class(name) => name,
            Owner::RootObject => root_label,
        }
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label(ROOT_OBJECT_LABEL))
    }
}

/// Result of [`OwnerResolver::lookup`]: the owner plus the stored value when
/// the member is instance data.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberLookup {
    pub member: String,
    pub owner: Owner,
    pub value: Option<Value>,
}

/// Finds the most-derived class that declares a member.
///
/// Instance data wins first: a member assigned on the instance belongs to
/// its runtime class whichever constructor level assigned it. Otherwise the
/// linearized chain is walked from the most-derived class towards the root
/// and the first class whose own declarations contain the member is the
/// owner. A member nobody declares is attributed to [`Owner::RootObject`].
#[derive(Debug, Clone)]
pub struct OwnerResolver<'a> {
    hierarchy: &'a ClassHierarchy,
    linearizer: HierarchyLinearizer<'a>,
    root_label: String,
}

impl<'a> OwnerResolver<'a> {
    pub fn new(hierarchy: &'a ClassHierarchy) -> Self {
        Self {
            hierarchy,
            linearizer: HierarchyLinearizer::new(hierarchy),
            root_label: ROOT_OBJECT_LABEL.to_string(),
        }
    }

    pub fn from_config(hierarchy: &'a ClassHierarchy, config: &ResolverConfig) -> Self {
        Self::new(hierarchy)
            .with_max_depth(config.max_depth)
            .with_root_label(&config.root_label)
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.linearizer = self.linearizer.with_max_depth(max_depth);
        self
    }

    pub fn with_root_label(mut self, label: &str) -> Self {
        self.root_label = label.to_string();
        self
    }

    pub fn root_label(&self) -> &str {
        &self.root_label
    }

    pub fn linearizer(&self) -> &HierarchyLinearizer<'a> {
        &self.linearizer
    }

    /// `Ok(None)` only for an absent instance. Errors come from a malformed
    /// hierarchy (cycle or depth limit), never from the member itself.
    pub fn resolve(&self, instance: Option<&Instance>, member: &str) -> Result<Option<Owner>, HierarchyError> {
        let Some(instance) = instance else {
            log::debug!("resolve({}) on absent instance", member);
            return Ok(None);
        };

        if instance.has_own_field(member) {
            let owner = match instance.runtime_class() {
                Some(class) => Owner::Class(class.to_string()),
                None => Owner::RootObject,
            };
            log::debug!("{} is an own field, owner {}", member, owner.label(&self.root_label));
            return Ok(Some(owner));
        }

        let chain = self.linearizer.linearize(instance)?;
        let owner = self.walk_chain(instance, &chain, member);
        log::debug!("{} resolved to {} via [{}]", member, owner.label(&self.root_label), chain);

        Ok(Some(owner))
    }

    fn walk_chain(&self, instance: &Instance, chain: &HierarchyChain<'_>, member: &str) -> Owner {
        let start = chain
            .iter()
            .position(|class| self.hierarchy.is_instance_of(instance, class.name()));

        let Some(start) = start else {
            return Owner::RootObject;
        };

        chain
            .iter()
            .skip(start)
            .find(|class| class.declares(member))
            .map(|class| Owner::Class(class.name().to_string()))
            .unwrap_or(Owner::RootObject)
    }

    pub fn lookup(&self, instance: Option<&Instance>, member: &str) -> Result<Option<MemberLookup>, HierarchyError> {
        let owner = self.resolve(instance, member)?;
        Ok(owner.map(|owner| MemberLookup {
            member: member.to_string(),
            owner,
            value: instance.and_then(|i| i.field(member)).cloned(),
        }))
    }

    pub fn resolve_all<I, S>(&self, instance: Option<&Instance>, members: I) -> Result<OwnerReport, HierarchyError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries = IndexMap::new();
        for member in members {
            let member = member.as_ref();
            entries.insert(member.to_string(), self.resolve(instance, member)?);
        }

        Ok(OwnerReport {
            instance_class: instance.and_then(|i| i.runtime_class()).map(str::to_string),
            root_label: self.root_label.clone(),
            entries,
        })
    }
}

/// Owners of several members of one instance, in the order they were asked.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnerReport {
    pub instance_class: Option<String>,
    pub root_label: String,
    pub entries: IndexMap<String, Option<Owner>>,
}

impl OwnerReport {
    pub fn owner_of(&self, member: &str) -> Option<&Owner> {
        self.entries.get(member).and_then(Option::as_ref)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn unresolved(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, owner)| matches!(owner, None | Some(Owner::RootObject)))
            .map(|(member, _)| member.as_str())
    }

    pub fn to_json(&self) -> Value {
        let mut owners = serde_json::Map::new();
        for (member, owner) in &self.entries {
            let value = match owner {
                Some(owner) => json!(owner.label(&self.root_label)),
                None => Value::Null,
            };
            owners.insert(member.clone(), value);
        }

        json!({
            "instance": self.instance_class,
            "owners": owners,
        })
    }
}

impl fmt::Display for OwnerReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Owners for {}:", self.instance_class.as_deref().unwrap_or("<none>"))?;
        for (member, owner) in &self.entries {
            let label = owner.as_ref().map_or("null", |o| o.label(&self.root_label));
            writeln!(f, "  {}: {}", member, label)?;
        }
        Ok(())
    }
}
