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

//! Entity identifiers and the borrowing entity handle.

use std::fmt;

use crate::component::Component;
use crate::error::Result;
use crate::registry::Registry;

/// Lightweight entity identifier.
///
/// An entity is an integer identity with no intrinsic data; all state lives
/// in component pools indexed by this id. Ids are unique among currently live
/// entities and are recycled only after the registry has cleared the dead
/// entity's bookkeeping at an update barrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entity(u32);

impl Entity {
    pub(crate) fn new(id: u32) -> Self {
        Self(id)
    }

    /// The raw id.
    pub fn id(self) -> u32 {
        self.0
    }

    /// The id as a slot index into signatures and pools.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity {}", self.0)
    }
}

/// Borrowing handle that forwards entity operations to the owning registry.
///
/// The registry exclusively owns all entity state; the handle holds a plain
/// `&mut` borrow, so it can never own the registry or outlive it. Obtained
/// via [`Registry::entity_mut`].
pub struct EntityMut<'a> {
    entity: Entity,
    registry: &'a mut Registry,
}

impl<'a> EntityMut<'a> {
    pub(crate) fn new(entity: Entity, registry: &'a mut Registry) -> Self {
        Self { entity, registry }
    }

    /// The entity this handle refers to.
    pub fn entity(&self) -> Entity {
        self.entity
    }

    /// The raw id of the entity.
    pub fn id(&self) -> u32 {
        self.entity.id()
    }

    /// Queue this entity for destruction at the next update barrier.
    pub fn kill(&mut self) {
        self.registry.kill_entity(self.entity);
    }

    /// Attach a component. See [`Registry::add_component`].
    pub fn add_component<T: Component>(&mut self, component: T) -> Result<()> {
        self.registry.add_component(self.entity, component)
    }

    /// Detach a component. See [`Registry::remove_component`].
    pub fn remove_component<T: Component>(&mut self) -> Result<()> {
        self.registry.remove_component::<T>(self.entity)
    }

    /// O(1) signature bit test.
    pub fn has_component<T: Component>(&self) -> bool {
        self.registry.has_component::<T>(self.entity)
    }

    /// Read a component, if present.
    pub fn get_component<T: Component>(&self) -> Option<&T> {
        self.registry.get_component::<T>(self.entity)
    }

    /// Mutably access a component, if present.
    pub fn get_component_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.registry.get_component_mut::<T>(self.entity)
    }

    /// Give this entity a unique tag.
    pub fn tag(&mut self, tag: &str) {
        self.registry.tag_entity(self.entity, tag);
    }

    /// True if this entity carries `tag`.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.registry.has_tag(self.entity, tag)
    }

    /// Put this entity into `group`, leaving any previous group.
    pub fn join_group(&mut self, group: &str) {
        self.registry.group_entity(self.entity, group);
    }

    /// True if this entity belongs to `group`.
    pub fn belongs_to_group(&self, group: &str) -> bool {
        self.registry.belongs_to_group(self.entity, group)
    }
}
