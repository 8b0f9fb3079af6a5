use std::borrow::Cow;
use std::{error, fmt};

/// An enumeration of all error outcomes that might happen when rendering a
/// value with [`try_reflective_to_string`](crate::try_reflective_to_string).
///
/// A failed call never exposes partial output; the whole rendering is
/// discarded.
#[derive(Debug)]
pub enum DescribeError {
    /// A field accessor or base projection rejected the instance it was
    /// handed.
    ///
    /// Descriptors generated by [`#[derive(Describe)]`](crate::derive::Describe)
    /// always satisfy their own accessors, so this can only arise from a
    /// hand-written [`Describe`](crate::Describe) impl whose `descriptor`
    /// belongs to a different type.
    InaccessibleField {
        /// Path of the type level declaring the field.
        type_path: Cow<'static, str>,
        /// Name of the field that could not be read.
        field: &'static str,
    },
}

impl fmt::Display for DescribeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InaccessibleField { type_path, field } => {
                write!(f, "cannot read field `{field}` declared on `{type_path}`")
            }
        }
    }
}

impl error::Error for DescribeError {}
