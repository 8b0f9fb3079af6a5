//! Compile-time-derived type metadata: type identity, field descriptors, and
//! the per-level descriptor tables the renderer walks.

// -----------------------------------------------------------------------------
// Modules

mod field_info;
mod type_descriptor;
mod type_path;

pub mod cell;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericDescriptorCell, GenericPathCell, NonGenericDescriptorCell};
pub use field_info::{FieldAccessor, FieldInfo};
pub use type_descriptor::{BaseInfo, BaseProjection, TypeDescriptor};
pub use type_path::{Type, TypePath};
