use std::any::{Any, TypeId};

use crate::render::{Kinded, Render, ValueKind};
use crate::{Describe, DescribeError};

// -----------------------------------------------------------------------------
// FieldAccessor

/// The capability to read one field's current value out of a type-erased
/// instance.
///
/// Generated accessors downcast the instance to the concrete type the
/// descriptor was built for and borrow the field; `None` means the instance
/// is of some other type.
pub type FieldAccessor =
    for<'a> fn(&'a (dyn Describe + 'static)) -> Option<&'a (dyn Render + 'static)>;

// -----------------------------------------------------------------------------
// FieldInfo

/// Metadata and accessor for one instance field declared directly on one
/// type level.
///
/// # Examples
///
/// ```
/// use describe::derive::Describe;
/// use describe::{Described, ValueKind};
///
/// #[derive(Describe)]
/// struct Foo {
///     field_a: f32,
/// }
///
/// let info = Foo::type_descriptor();
/// let field_info = info.field("field_a").unwrap();
///
/// assert!(field_info.type_is::<f32>());
/// assert_eq!(field_info.kind(), ValueKind::Scalar);
/// assert!(!field_info.is_skipped());
/// ```
#[derive(Clone, Debug)]
pub struct FieldInfo {
    name: &'static str,
    ty_id: TypeId,
    kind: ValueKind,
    accessor: FieldAccessor,
    skip: bool,
}

impl FieldInfo {
    /// Creates a new [`FieldInfo`] for the field `name` of declared type `T`.
    #[inline]
    pub const fn new<T: Kinded + 'static>(name: &'static str, accessor: FieldAccessor) -> Self {
        Self {
            name,
            ty_id: TypeId::of::<T>(),
            kind: T::KIND,
            accessor,
            skip: false,
        }
    }

    /// Marks the field as tagged with the skip-marker.
    ///
    /// Skipped fields stay listed in the descriptor but are excluded from
    /// rendered output.
    #[inline]
    pub const fn with_skip(mut self) -> Self {
        self.skip = true;
        self
    }

    /// Returns the field name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the `TypeId` of the declared field type.
    #[inline]
    pub const fn ty_id(&self) -> TypeId {
        self.ty_id
    }

    /// Returns the declared [`ValueKind`].
    #[inline]
    pub const fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Returns `true` if the field carries the skip-marker.
    #[inline]
    pub const fn is_skipped(&self) -> bool {
        self.skip
    }

    /// Check if the declared field type matches the given one.
    #[inline]
    pub fn type_is<T: Any>(&self) -> bool {
        self.ty_id == TypeId::of::<T>()
    }

    /// Reads the field's current value from `instance`.
    ///
    /// Returns `None` when `instance` is not of the type this descriptor was
    /// generated for.
    #[inline]
    pub fn read<'a>(&self, instance: &'a dyn Describe) -> Option<&'a dyn Render> {
        (self.accessor)(instance)
    }

    /// Reads the field's current value, converting a rejected instance into
    /// the hard error the renderer propagates.
    pub(crate) fn try_read<'a>(
        &self,
        type_path: &'static str,
        instance: &'a dyn Describe,
    ) -> Result<&'a dyn Render, DescribeError> {
        self.read(instance)
            .ok_or_else(|| crate::render::inaccessible_field(type_path, self.name))
    }
}
