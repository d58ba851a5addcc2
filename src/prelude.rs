//! Convenient re-exports of commonly used types.
//!
//! The prelude can be imported with:
//! ```
//! use signature_ecs::prelude::*;
//! ```

pub use crate::component::{Component, ComponentId};
pub use crate::entity::{Entity, EntityMut};
pub use crate::error::{EcsError, Result};
pub use crate::registry::{Registry, RegistryStats};
pub use crate::signature::{Signature, MAX_COMPONENT_TYPES};
pub use crate::system::{Requirements, System, SystemBase};
