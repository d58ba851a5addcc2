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

//! signature_ecs - pooled Entity Component System with signature matching
//!
//! Entities are integer ids, components live in dense per-type pools indexed
//! by entity id, and systems track the entities whose signature is a superset
//! of their requirements. Structural changes are deferred to a per-tick
//! update barrier so systems never iterate a list that is mutated underneath
//! them.

pub mod component;
pub mod entity;
pub mod error;
pub mod pool;
pub mod prelude;
pub mod registry;
pub mod signature;
pub mod system;

pub use component::*;
pub use entity::*;
pub use error::*;
pub use pool::*;
pub use registry::*;
pub use signature::*;
pub use system::*;
