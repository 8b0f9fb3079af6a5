//! Value rendering: the textual form of fields and their values.

use std::fmt::{self, Write};

use crate::DescribeError;

// -----------------------------------------------------------------------------
// Modules

mod driver;
mod impls;

pub use driver::{reflective_to_string, render_fields, try_reflective_to_string};

pub(crate) use driver::inaccessible_field;

/// The literal text an absent reference renders as.
pub const NULL_LITERAL: &str = "null";

// -----------------------------------------------------------------------------
// ValueKind

/// The declared shape of a field's value type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// A single value with a direct textual form.
    Scalar,
    /// A nullable or object-like value.
    Reference,
    /// An ordered sequence, rendered element-by-element.
    Sequence,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Scalar => "scalar",
            Self::Reference => "reference",
            Self::Sequence => "sequence",
        })
    }
}

// -----------------------------------------------------------------------------
// Render

/// Renders a value into its textual form.
///
/// The contract mirrors the output grammar exactly:
///
/// - absent values (`Option::None`) render as the literal `null`;
/// - sequences render as `[e1, e2, ...]` with elements in source order,
///   recursing through this trait, so nested sequences nest brackets;
/// - everything else renders its canonical textual form: [`Display`] for
///   the built-in leaf types, the braced field listing for derived types
///   without `#[describe(display)]`.
///
/// Implementations must be deterministic and must not mutate anything: the
/// same unmodified value always yields the same text.
///
/// [`Display`]: std::fmt::Display
pub trait Render {
    /// Appends the rendered form of `self` to `out`.
    ///
    /// `out` may already hold surrounding output; implementations append
    /// without inspecting it. On `Err` the caller discards the whole buffer,
    /// so partial writes are unobservable.
    fn render(&self, out: &mut String) -> Result<(), DescribeError>;
}

/// Static classification of a renderable type.
///
/// Kept separate from [`Render`] so that `Render` stays usable as a trait
/// object; the constant is captured into
/// [`FieldInfo`](crate::info::FieldInfo) when a descriptor is built.
pub trait Kinded: Render {
    /// The declared [`ValueKind`] of this type.
    const KIND: ValueKind;
}

// -----------------------------------------------------------------------------
// Helpers

/// Appends `value`'s `Display` form to `out`.
pub fn write_display(out: &mut String, value: impl fmt::Display) {
    // Writing into a `String` cannot fail.
    let _ = write!(out, "{value}");
}

/// Renders `items` as a bracketed, comma-space separated list.
///
/// The building block for every sequence impl. An empty slice renders as
/// `[]`; nested sequences recurse through the element's own [`Render`].
pub fn render_slice<T: Render>(items: &[T], out: &mut String) -> Result<(), DescribeError> {
    out.push('[');
    for (index, item) in items.iter().enumerate() {
        if index != 0 {
            out.push_str(", ");
        }
        item.render(out)?;
    }
    out.push(']');
    Ok(())
}
