use std::any::TypeId;

// -----------------------------------------------------------------------------
// TypePath

/// Static access to a type's stable name strings.
///
/// Implemented by [`#[derive(Describe)]`](crate::derive::Describe) for
/// described types and provided for the built-in leaf and container types.
///
/// # Example
///
/// ```
/// use describe::info::TypePath;
///
/// mod units {
///     use describe::derive::Describe;
///
///     #[derive(Describe)]
///     pub struct Soldier {
///         pub rank: u8,
///     }
/// }
///
/// assert!(units::Soldier::type_path().ends_with("::units::Soldier"));
/// assert_eq!(units::Soldier::type_name(), "Soldier");
/// ```
pub trait TypePath: 'static {
    /// Returns the full, crate-qualified path, e.g. `my_game::units::Soldier`.
    ///
    /// Uniquely identifies a type within one build of one dependency tree.
    fn type_path() -> &'static str;

    /// Returns the unqualified name including generic arguments,
    /// e.g. `Soldier` or `Holder<i32>`.
    fn type_name() -> &'static str;

    /// Returns the bare identifier without generic arguments.
    fn type_ident() -> &'static str;
}

// -----------------------------------------------------------------------------
// Type

/// The identity of one type: its [`TypeId`] plus display names.
#[derive(Clone, Copy, Debug)]
pub struct Type {
    id: TypeId,
    path: &'static str,
    name: &'static str,
}

impl Type {
    /// Captures the identity of `T`.
    pub fn of<T: TypePath + ?Sized>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            path: T::type_path(),
            name: T::type_name(),
        }
    }

    /// Returns the [`TypeId`].
    #[inline]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Returns the full type path.
    #[inline]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    /// Returns the unqualified type name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for Type {
    /// Identity is the [`TypeId`]; the strings are presentation only.
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Type {}
