// Copyright 2026 the signature_ecs developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Registry: the owning authority for entities, components, and systems.
//!
//! The registry owns every component pool, every per-entity signature, and
//! every registered system. Structural changes (entity creation and
//! destruction, component add/remove) are queued and applied at a single
//! barrier, [`Registry::update`], called once per simulation tick before
//! systems run. Systems therefore never observe a half-updated entity or a
//! membership list mutated mid-iteration.

use std::any::TypeId;
use std::collections::BTreeSet;

use ahash::AHashMap;
use tracing::{debug, trace};

use crate::component::{Component, ComponentTypes};
use crate::entity::{Entity, EntityMut};
use crate::error::{EcsError, Result};
use crate::pool::{ErasedPool, Pool};
use crate::signature::Signature;
use crate::system::{Requirements, System};

/// Central ECS registry.
///
/// Single-threaded and tick-driven: all mutation and all system execution
/// happen on one logical thread, with [`Registry::update`] as the only point
/// where deferred structural changes become visible.
#[derive(Default)]
pub struct Registry {
    /// Component type id assignment, owned here rather than in statics.
    component_types: ComponentTypes,

    /// Component pools indexed by component id.
    /// [Vec index = component id, pool index = entity id]
    pools: Vec<Option<Box<dyn ErasedPool>>>,

    /// Per-entity signatures saying which components are turned "on".
    /// [Vec index = entity id]
    signatures: Vec<Signature>,

    /// Registered systems keyed by their concrete type.
    systems: AHashMap<TypeId, Box<dyn System>>,

    /// Entities created since the last update, not yet visible to systems.
    pending_added: BTreeSet<Entity>,

    /// Entities queued for destruction at the next update.
    pending_killed: BTreeSet<Entity>,

    /// Live entities whose signature changed since the last update and whose
    /// system membership must be re-evaluated.
    pending_recheck: BTreeSet<Entity>,

    /// Ids released by destroyed entities, reused lowest-first.
    free_ids: BTreeSet<u32>,

    /// Next never-used sequential id.
    next_id: u32,

    // Auxiliary indices: one entity per tag, one group per entity.
    tags: AHashMap<String, Entity>,
    tag_of: AHashMap<Entity, String>,
    groups: AHashMap<String, BTreeSet<Entity>>,
    group_of: AHashMap<Entity, String>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Entity Lifecycle ==========

    /// Allocate an entity id and queue the entity for addition.
    ///
    /// Reuses the lowest released id if any, otherwise the next sequential
    /// integer. The entity is not visible to any system until the next
    /// [`update`](Registry::update).
    pub fn create_entity(&mut self) -> Entity {
        let id = match self.free_ids.pop_first() {
            Some(id) => id,
            None => {
                let id = self.next_id;
                self.next_id += 1;
                id
            }
        };

        let entity = Entity::new(id);
        if entity.index() >= self.signatures.len() {
            self.signatures.resize(entity.index() + 1, Signature::new());
        }
        self.pending_added.insert(entity);

        debug!(id, "created entity");
        entity
    }

    /// Queue `entity` for destruction at the next update barrier.
    ///
    /// Idempotent: killing the same entity twice before an update queues a
    /// single removal. The entity stays visible to systems until the barrier.
    pub fn kill_entity(&mut self, entity: Entity) {
        if self.pending_killed.insert(entity) {
            debug!(id = entity.id(), "entity queued for removal");
        }
    }

    /// True if `entity`'s id is allocated and has not been released.
    ///
    /// Entities queued for destruction count as alive until the barrier
    /// processes them.
    pub fn is_alive(&self, entity: Entity) -> bool {
        entity.id() < self.next_id && !self.free_ids.contains(&entity.id())
    }

    /// Borrowing handle forwarding entity operations to this registry.
    pub fn entity_mut(&mut self, entity: Entity) -> EntityMut<'_> {
        EntityMut::new(entity, self)
    }

    /// The tick barrier: apply all deferred structural changes.
    ///
    /// Call once per simulation tick, before systems run. Order:
    /// 1. Pending additions are matched against every system (superset test).
    /// 2. Live entities whose signature changed are removed from all systems
    ///    and re-matched against their current signature.
    /// 3. Pending removals are removed from every system, their signatures
    ///    reset, their pool slots cleared, their tag/group entries purged,
    ///    and their ids released for reuse.
    pub fn update(&mut self) {
        let added = std::mem::take(&mut self.pending_added);
        for &entity in &added {
            self.add_entity_to_systems(entity);
        }

        let recheck = std::mem::take(&mut self.pending_recheck);
        for &entity in &recheck {
            // The addition pass above already matched the final signature.
            if added.contains(&entity) {
                continue;
            }
            self.remove_entity_from_systems(entity);
            self.add_entity_to_systems(entity);
        }

        let killed = std::mem::take(&mut self.pending_killed);
        for &entity in &killed {
            self.destroy_entity(entity);
        }
    }

    /// Add `entity` to every system whose required signature its own
    /// signature is a superset of.
    fn add_entity_to_systems(&mut self, entity: Entity) {
        let signature = match self.signatures.get(entity.index()) {
            Some(signature) => *signature,
            None => return,
        };

        for system in self.systems.values_mut() {
            if signature.contains_all(system.base().signature()) {
                system.base_mut().add_entity(entity);
                trace!(id = entity.id(), system = system.name(), "entity joined system");
            }
        }
    }

    /// Remove `entity` from every system. Cheap no-op where it was never a
    /// member.
    fn remove_entity_from_systems(&mut self, entity: Entity) {
        for system in self.systems.values_mut() {
            system.base_mut().remove_entity(entity);
        }
    }

    /// Tear down one entity's bookkeeping and release its id.
    fn destroy_entity(&mut self, entity: Entity) {
        let signature = match self.signatures.get(entity.index()) {
            Some(signature) => *signature,
            None => return,
        };

        self.remove_entity_from_systems(entity);

        // Clear pool slots for every component the entity carried. Pools are
        // not shrunk.
        for index in signature.ones() {
            if let Some(Some(pool)) = self.pools.get_mut(index) {
                pool.remove(entity);
            }
        }
        self.signatures[entity.index()].reset();

        self.remove_tag(entity);
        self.ungroup_entity(entity);

        self.free_ids.insert(entity.id());
        debug!(id = entity.id(), "destroyed entity");
    }

    // ========== Component Management ==========

    /// Attach a component to `entity`, overwriting any existing value.
    ///
    /// Lazily assigns the component type id and creates the pool on first
    /// use, grows the pool to cover the entity id, stores the value, and sets
    /// the signature bit. System membership is reconciled at the next
    /// [`update`](Registry::update), never here.
    pub fn add_component<T: Component>(&mut self, entity: Entity, component: T) -> Result<()> {
        if entity.index() >= self.signatures.len() {
            return Err(EcsError::EntityNotFound);
        }

        let id = self.component_types.id_of::<T>();
        if id.index() >= self.pools.len() {
            self.pools.resize_with(id.index() + 1, || None);
        }

        let slots = self.signatures.len();
        let pool = self.pools[id.index()].get_or_insert_with(|| Box::new(Pool::<T>::new()));
        pool.resize(slots);
        pool.as_any_mut()
            .downcast_mut::<Pool<T>>()
            .expect("BUG: pool type does not match its component id")
            .set(entity.index(), component);

        self.signatures[entity.index()].set(id);
        self.pending_recheck.insert(entity);

        trace!(
            id = entity.id(),
            component = self.component_types.name_of(id),
            "added component"
        );
        Ok(())
    }

    /// Detach a component from `entity`.
    ///
    /// Clears the signature bit; the pool slot is invalidated lazily, the bit
    /// is authoritative. Membership is re-evaluated at the next update.
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Result<()> {
        if entity.index() >= self.signatures.len() {
            return Err(EcsError::EntityNotFound);
        }
        let id = self
            .component_types
            .get::<T>()
            .ok_or(EcsError::ComponentNotFound)?;
        if !self.signatures[entity.index()].test(id) {
            return Err(EcsError::ComponentNotFound);
        }

        self.signatures[entity.index()].clear(id);
        self.pending_recheck.insert(entity);

        trace!(
            id = entity.id(),
            component = self.component_types.name_of(id),
            "removed component"
        );
        Ok(())
    }

    /// O(1) signature bit test.
    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        match self.component_types.get::<T>() {
            Some(id) => self
                .signatures
                .get(entity.index())
                .is_some_and(|signature| signature.test(id)),
            None => false,
        }
    }

    /// Read `entity`'s `T` component, if the signature bit is set.
    pub fn get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
        let id = self.component_types.get::<T>()?;
        if !self.signatures.get(entity.index())?.test(id) {
            return None;
        }
        self.pools
            .get(id.index())?
            .as_ref()?
            .as_any()
            .downcast_ref::<Pool<T>>()?
            .get(entity.index())
    }

    /// Mutably access `entity`'s `T` component, if the signature bit is set.
    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        let id = self.component_types.get::<T>()?;
        if !self.signatures.get(entity.index())?.test(id) {
            return None;
        }
        self.pools
            .get_mut(id.index())?
            .as_mut()?
            .as_any_mut()
            .downcast_mut::<Pool<T>>()?
            .get_mut(entity.index())
    }

    // ========== System Management ==========

    /// Register a system, keyed by its concrete type.
    ///
    /// The system's required signature is built here, by its
    /// [`configure`](System::configure) hook, and never changes afterwards.
    /// Registering a second instance of the same kind replaces the first.
    /// Entities that already exist are not backfilled; membership accrues at
    /// update barriers from then on.
    pub fn add_system<S: System>(&mut self, mut system: S) {
        let mut requirements = Requirements::new(&mut self.component_types);
        system.configure(&mut requirements);
        system.base_mut().set_signature(requirements.into_signature());

        debug!(system = system.name(), "registered system");
        if self
            .systems
            .insert(TypeId::of::<S>(), Box::new(system))
            .is_some()
        {
            debug!(
                system = std::any::type_name::<S>(),
                "replaced previously registered system of the same kind"
            );
        }
    }

    /// Unregister the system of kind `S`. Entities it tracked are discarded
    /// with it.
    pub fn remove_system<S: System>(&mut self) -> Result<()> {
        match self.systems.remove(&TypeId::of::<S>()) {
            Some(system) => {
                debug!(system = system.name(), "removed system");
                Ok(())
            }
            None => Err(EcsError::SystemNotFound),
        }
    }

    /// True if a system of kind `S` is registered.
    pub fn has_system<S: System>(&self) -> bool {
        self.systems.contains_key(&TypeId::of::<S>())
    }

    /// Reference to the registered system of kind `S`.
    pub fn get_system<S: System>(&self) -> Option<&S> {
        self.systems
            .get(&TypeId::of::<S>())
            .and_then(|system| system.as_any().downcast_ref::<S>())
    }

    /// Mutable reference to the registered system of kind `S`.
    pub fn get_system_mut<S: System>(&mut self) -> Option<&mut S> {
        self.systems
            .get_mut(&TypeId::of::<S>())
            .and_then(|system| system.as_any_mut().downcast_mut::<S>())
    }

    // ========== Tags & Groups ==========

    /// Give `entity` a unique tag. A tag names at most one entity; retagging
    /// an entity or reusing a tag moves it.
    pub fn tag_entity(&mut self, entity: Entity, tag: &str) {
        if let Some(previous) = self.tag_of.remove(&entity) {
            self.tags.remove(&previous);
        }
        if let Some(previous_owner) = self.tags.insert(tag.to_string(), entity) {
            if previous_owner != entity {
                self.tag_of.remove(&previous_owner);
            }
        }
        self.tag_of.insert(entity, tag.to_string());
    }

    /// True if `entity` carries `tag`.
    pub fn has_tag(&self, entity: Entity, tag: &str) -> bool {
        self.tags.get(tag) == Some(&entity)
    }

    /// The entity carrying `tag`, if any.
    pub fn entity_by_tag(&self, tag: &str) -> Option<Entity> {
        self.tags.get(tag).copied()
    }

    /// Remove whatever tag `entity` carries.
    pub fn remove_tag(&mut self, entity: Entity) {
        if let Some(tag) = self.tag_of.remove(&entity) {
            self.tags.remove(&tag);
        }
    }

    /// Put `entity` into `group`, leaving any previous group.
    pub fn group_entity(&mut self, entity: Entity, group: &str) {
        self.ungroup_entity(entity);
        self.groups
            .entry(group.to_string())
            .or_default()
            .insert(entity);
        self.group_of.insert(entity, group.to_string());
    }

    /// True if `entity` belongs to `group`.
    pub fn belongs_to_group(&self, entity: Entity, group: &str) -> bool {
        self.groups
            .get(group)
            .is_some_and(|members| members.contains(&entity))
    }

    /// Members of `group`, in ascending id order.
    pub fn entities_in_group(&self, group: &str) -> Vec<Entity> {
        self.groups
            .get(group)
            .map(|members| members.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Take `entity` out of its group, if it has one.
    pub fn ungroup_entity(&mut self, entity: Entity) {
        if let Some(group) = self.group_of.remove(&entity) {
            if let Some(members) = self.groups.get_mut(&group) {
                members.remove(&entity);
                if members.is_empty() {
                    self.groups.remove(&group);
                }
            }
        }
    }

    // ========== Diagnostics ==========

    /// Snapshot of the registry's bookkeeping sizes.
    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            live_entities: self.next_id as usize - self.free_ids.len(),
            free_ids: self.free_ids.len(),
            component_types: self.component_types.len(),
            systems: self.systems.len(),
            pending_added: self.pending_added.len(),
            pending_killed: self.pending_killed.len(),
        }
    }
}

/// Bookkeeping sizes reported by [`Registry::stats`].
#[derive(Debug, Clone, Copy)]
pub struct RegistryStats {
    /// Allocated ids not yet released (includes entities pending removal).
    pub live_entities: usize,
    /// Released ids waiting for reuse.
    pub free_ids: usize,
    /// Distinct component types seen so far.
    pub component_types: usize,
    /// Registered systems.
    pub systems: usize,
    /// Entities waiting to be matched to systems.
    pub pending_added: usize,
    /// Entities waiting to be destroyed.
    pub pending_killed: usize,
}
