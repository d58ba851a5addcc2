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

//! Component pools: dense, per-type storage indexed by entity id.
//!
//! Each pool stores every instance of one component type, at the slot of the
//! owning entity's id. Slots are preallocated up to the registry's entity
//! count, so typed access is a plain index with no hashing or indirection on
//! the per-tick read path. A slot holds a meaningful value only while the
//! entity's signature bit for this type is set.

use std::any::Any;

use crate::component::Component;
use crate::entity::Entity;

/// Type-erased view of a component pool.
///
/// The registry owns pools behind this trait, keyed by component id, and only
/// downcasts to the concrete [`Pool<T>`] at the point of typed access. The
/// erased surface is limited to untyped lifecycle operations.
pub trait ErasedPool {
    /// Grow backing storage to at least `n` slots. Never shrinks; existing
    /// slot values are preserved.
    fn resize(&mut self, n: usize);

    /// Clear the slot for `entity`, dropping any stored value.
    fn remove(&mut self, entity: Entity);

    /// Drop all stored values. Used only at pool teardown.
    fn clear(&mut self);

    /// Number of allocated slots.
    fn len(&self) -> usize;

    /// True if the pool has no allocated slots.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Dense storage for all instances of one component type.
///
/// Index = entity id. Empty slots are `None`, which keeps lazily-invalidated
/// slots inert instead of undefined.
pub struct Pool<T: Component> {
    slots: Vec<Option<T>>,
}

impl<T: Component> Pool<T> {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Write or overwrite the value at slot `index`.
    ///
    /// The registry resizes the pool before calling this, so the slot always
    /// exists.
    pub fn set(&mut self, index: usize, value: T) {
        debug_assert!(index < self.slots.len(), "pool slot {index} not allocated");
        self.slots[index] = Some(value);
    }

    /// Read the value at slot `index`, if one is stored.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index).and_then(|slot| slot.as_ref())
    }

    /// Mutable access to the value at slot `index`, if one is stored.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(index).and_then(|slot| slot.as_mut())
    }
}

impl<T: Component> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Component> ErasedPool for Pool<T> {
    fn resize(&mut self, n: usize) {
        if n > self.slots.len() {
            self.slots.resize_with(n, || None);
        }
    }

    fn remove(&mut self, entity: Entity) {
        if let Some(slot) = self.slots.get_mut(entity.index()) {
            *slot = None;
        }
    }

    fn clear(&mut self) {
        self.slots.clear();
    }

    fn len(&self) -> usize {
        self.slots.len()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
