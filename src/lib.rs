#![doc = include_str!("../README.md")]

// `crate` works inside the crate itself, but the code emitted by the derive
// macro and the doc tests both spell the crate name out. The alias keeps one
// set of generated paths valid in either position.
extern crate self as describe;

// -----------------------------------------------------------------------------
// Modules

mod error;
mod reflection;

pub mod hash;
pub mod info;
pub mod registry;
pub mod render;

// -----------------------------------------------------------------------------
// Top-Level exports

pub mod __macro_exports;

pub use error::DescribeError;
pub use reflection::{Describe, Described};
pub use render::{Kinded, Render, ValueKind};
pub use render::{reflective_to_string, try_reflective_to_string};

pub use describe_derive as derive;
