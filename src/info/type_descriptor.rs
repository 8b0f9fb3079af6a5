use std::any::TypeId;

use crate::info::{FieldInfo, Type, TypePath};
use crate::{Describe, Described};

// -----------------------------------------------------------------------------
// TypeDescriptor

/// The descriptor table for one type level: the type's identity, every field
/// declared directly on it, and the link to its base level, if any.
///
/// Field order is fixed at construction: lexicographic by field name, byte
/// order, which for UTF-8 identifiers is code-point order. Ties cannot occur
/// since field names are unique within one declaration.
///
/// # Examples
///
/// ```
/// use describe::Described;
/// use describe::derive::Describe;
///
/// #[derive(Describe)]
/// struct A {
///     val: f32,
/// }
///
/// let info = A::type_descriptor();
///
/// assert_eq!(info.field_len(), 1);
/// assert_eq!(info.type_name(), "A");
/// assert!(info.base().is_none());
/// ```
#[derive(Debug)]
pub struct TypeDescriptor {
    ty: Type,
    fields: Box<[FieldInfo]>,
    base: Option<BaseInfo>,
}

impl TypeDescriptor {
    /// Creates the descriptor for `T` from its directly declared fields.
    ///
    /// Input order is irrelevant; fields are sorted by name here so that
    /// every consumer observes the same ordering.
    pub fn new<T: Describe + TypePath>(mut fields: Vec<FieldInfo>, base: Option<BaseInfo>) -> Self {
        fields.sort_by_key(FieldInfo::name);

        Self {
            ty: Type::of::<T>(),
            fields: fields.into_boxed_slice(),
            base,
        }
    }

    /// Returns this level's type identity.
    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    /// Returns the full path of this level's type.
    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.ty.path()
    }

    /// Returns the unqualified name of this level's type.
    #[inline]
    pub const fn type_name(&self) -> &'static str {
        self.ty.name()
    }

    /// Returns the `TypeId` of this level's type.
    #[inline]
    pub const fn ty_id(&self) -> TypeId {
        self.ty.id()
    }

    /// Returns the [`FieldInfo`] for the given `name`, if declared on this
    /// level.
    ///
    /// Fields of ancestor levels are reached through [`base`](Self::base),
    /// never from here; a shadowed name resolves to this level's own field.
    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields
            .binary_search_by(|field| field.name().cmp(name))
            .ok()
            .map(|index| &self.fields[index])
    }

    /// Returns every declared field in name order, skipped ones included.
    #[inline]
    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    /// Returns the fields that appear in rendered output: name order, with
    /// skip-marked entries removed.
    ///
    /// An empty iterator is valid and means "nothing to render at this
    /// level".
    pub fn renderable_fields(&self) -> impl Iterator<Item = &FieldInfo> {
        self.fields.iter().filter(|field| !field.is_skipped())
    }

    /// Returns the number of declared fields.
    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }

    /// Returns the link to the base level, if this type declares a base
    /// field.
    ///
    /// A `None` terminates the type chain; there is no sentinel root type.
    #[inline]
    pub const fn base(&self) -> Option<&BaseInfo> {
        self.base.as_ref()
    }
}

// -----------------------------------------------------------------------------
// BaseInfo

/// The capability to project a type-erased instance onto its embedded base
/// object.
pub type BaseProjection =
    for<'a> fn(&'a (dyn Describe + 'static)) -> Option<&'a (dyn Describe + 'static)>;

/// The descriptor-level link from a type to its base (ancestor) level.
///
/// Plays the role of `Class::getSuperclass` in runtimes with intrinsic
/// reflection: the renderer follows these links to walk the type chain from
/// the most-derived level upward.
#[derive(Debug)]
pub struct BaseInfo {
    field_name: &'static str,
    // The descriptor is created on first access; a function pointer delays it.
    descriptor: fn() -> &'static TypeDescriptor,
    project: BaseProjection,
}

impl BaseInfo {
    /// Creates the link for the base type `B`, stored in the field named
    /// `field_name`.
    #[inline]
    pub const fn new<B: Described>(field_name: &'static str, project: BaseProjection) -> Self {
        Self {
            field_name,
            descriptor: B::type_descriptor,
            project,
        }
    }

    /// Returns the name of the field holding the base object.
    #[inline]
    pub const fn field_name(&self) -> &'static str {
        self.field_name
    }

    /// Returns the base level's descriptor.
    #[inline]
    pub fn descriptor(&self) -> &'static TypeDescriptor {
        (self.descriptor)()
    }

    /// Obtains the base object embedded in `instance`.
    ///
    /// Returns `None` when `instance` is not of the type this link was
    /// generated for.
    #[inline]
    pub fn project<'a>(&self, instance: &'a dyn Describe) -> Option<&'a dyn Describe> {
        (self.project)(instance)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::derive::Describe;
    use crate::{Described, ValueKind};

    #[derive(Describe)]
    struct Mixed {
        beta: u32,
        alpha: u32,
        #[describe(skip)]
        internal: u32,
        gamma: Vec<bool>,
    }

    #[test]
    fn fields_are_sorted_by_name() {
        let names: Vec<_> = Mixed::type_descriptor()
            .fields()
            .iter()
            .map(|field| field.name())
            .collect();

        assert_eq!(names, ["alpha", "beta", "gamma", "internal"]);
    }

    #[test]
    fn renderable_fields_exclude_skipped() {
        let names: Vec<_> = Mixed::type_descriptor()
            .renderable_fields()
            .map(|field| field.name())
            .collect();

        assert_eq!(names, ["alpha", "beta", "gamma"]);
    }

    #[test]
    fn field_lookup_reports_declared_kind() {
        let info = Mixed::type_descriptor();

        assert_eq!(info.field("alpha").unwrap().kind(), ValueKind::Scalar);
        assert_eq!(info.field("gamma").unwrap().kind(), ValueKind::Sequence);
        assert!(info.field("delta").is_none());
    }
}
