//! System trait and membership bookkeeping.
//!
//! A system processes, once per tick, the entities whose signature is a
//! superset of its required signature. The required signature is declared
//! when the registry registers the system and never changes afterwards; the
//! entity list is maintained incrementally by the registry at each update
//! barrier, never by full scan.

use std::any::Any;

use crate::component::{Component, ComponentTypes};
use crate::entity::Entity;
use crate::signature::Signature;

/// Shared bookkeeping embedded in every concrete system.
///
/// Holds the required signature and the materialized list of matching live
/// entities. Only the registry mutates either.
#[derive(Debug, Default)]
pub struct SystemBase {
    signature: Signature,
    entities: Vec<Entity>,
}

impl SystemBase {
    /// Create an empty base with no requirements and no entities.
    pub fn new() -> Self {
        Self::default()
    }

    /// The system's required signature.
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// The entities currently matching this system, in insertion order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub(crate) fn set_signature(&mut self, signature: Signature) {
        self.signature = signature;
    }

    /// Append `entity` to the tracked list.
    ///
    /// The registry guarantees each entity is added at most once between
    /// removals; no de-duplication happens here.
    pub(crate) fn add_entity(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Remove all occurrences of `entity`, compared by id equality.
    pub(crate) fn remove_entity(&mut self, entity: Entity) {
        self.entities.retain(|other| *other != entity);
    }
}

/// Requirement builder handed to [`System::configure`] at registration.
///
/// `require::<T>()` is the one place a system's signature is built; calling
/// into the registry later cannot change it.
pub struct Requirements<'a> {
    types: &'a mut ComponentTypes,
    signature: Signature,
}

impl<'a> Requirements<'a> {
    pub(crate) fn new(types: &'a mut ComponentTypes) -> Self {
        Self {
            types,
            signature: Signature::new(),
        }
    }

    /// Require that matching entities carry a `T` component.
    pub fn require<T: Component>(&mut self) {
        let id = self.types.id_of::<T>();
        self.signature.set(id);
    }

    pub(crate) fn into_signature(self) -> Signature {
        self.signature
    }
}

/// Trait implemented by every concrete system.
///
/// Implementors embed a [`SystemBase`] field and return it from `base` /
/// `base_mut`; `as_any` / `as_any_mut` return `self` and exist so the
/// registry can hand back concrete system references from its type-keyed
/// table.
pub trait System: 'static {
    /// Declare required components. Called exactly once, at registration.
    fn configure(&self, requirements: &mut Requirements<'_>);

    /// The embedded membership bookkeeping.
    fn base(&self) -> &SystemBase;

    fn base_mut(&mut self) -> &mut SystemBase;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// The entities currently matching this system.
    fn entities(&self) -> &[Entity] {
        self.base().entities()
    }

    /// Name used in logs and diagnostics.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
