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

//! Component trait and component type id assignment.
//!
//! Components are plain data records attached to entities. Each distinct
//! component type receives a stable small integer id on first use, drawn from
//! a registry-owned counter rather than process-wide statics, so id
//! assignment never depends on initialization order.

use std::any::{type_name, TypeId};

use ahash::AHashMap;

use crate::signature::MAX_COMPONENT_TYPES;

/// Marker trait for components
///
/// Components must be 'static (no borrowed data)
pub trait Component: 'static {}

/// Automatically implement Component for all valid types
impl<T: 'static> Component for T {}

/// Stable small integer id of a component type.
///
/// Doubles as the bit index in a [`Signature`](crate::signature::Signature)
/// and the index of the type's pool in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentId(usize);

impl ComponentId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// The raw index of this id.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Registry-owned mapping from component types to [`ComponentId`]s.
///
/// Ids are assigned lazily on first reference, monotonically increasing from
/// zero, and never reused even if a component type falls out of use.
#[derive(Default)]
pub struct ComponentTypes {
    ids: AHashMap<TypeId, ComponentId>,
    /// Type names indexed by component id, for logging and diagnostics.
    names: Vec<&'static str>,
}

impl ComponentTypes {
    /// Create an empty type table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the id of `T`, assigning the next free id on first use.
    ///
    /// # Panics
    /// Panics if the number of distinct component types would exceed
    /// [`MAX_COMPONENT_TYPES`]. That is a startup configuration error, not a
    /// runtime condition.
    pub fn id_of<T: Component>(&mut self) -> ComponentId {
        if let Some(&id) = self.ids.get(&TypeId::of::<T>()) {
            return id;
        }

        let index = self.names.len();
        if index >= MAX_COMPONENT_TYPES {
            panic!(
                "component type limit exceeded ({MAX_COMPONENT_TYPES}) while registering {}",
                type_name::<T>()
            );
        }

        let id = ComponentId::new(index);
        self.ids.insert(TypeId::of::<T>(), id);
        self.names.push(type_name::<T>());
        id
    }

    /// Look up the id of `T` without assigning one.
    ///
    /// Returns `None` if `T` has never been referenced, which callers treat
    /// as "no entity can carry this component yet".
    pub fn get<T: Component>(&self) -> Option<ComponentId> {
        self.ids.get(&TypeId::of::<T>()).copied()
    }

    /// Type name recorded for `id`.
    pub fn name_of(&self, id: ComponentId) -> &'static str {
        self.names.get(id.index()).copied().unwrap_or("<unknown>")
    }

    /// Number of component types registered so far.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True if no component types have been registered.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
