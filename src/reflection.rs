use std::any::{Any, TypeId};

use crate::info::TypeDescriptor;

// -----------------------------------------------------------------------------
// Describe

/// The foundational trait for describable values.
///
/// A `Describe` value carries a pointer to its own [`TypeDescriptor`], which
/// is everything the renderer needs: the type's directly declared fields with
/// their accessors, and the link to the base level when the type extends
/// another.
///
/// # Recommendations
///
/// Use [the derive macro](crate::derive::Describe) rather than implementing
/// this trait manually. The derive also implements [`Described`],
/// [`TypePath`](crate::info::TypePath), [`Render`](crate::Render) and
/// [`Kinded`](crate::Kinded), and guarantees that the descriptor's accessors
/// accept `Self`.
///
/// A manual implementation must pair the value with a descriptor whose
/// accessors recognize the concrete type, otherwise every rendering call
/// fails with [`DescribeError::InaccessibleField`](crate::DescribeError).
///
/// # Example
///
/// ```
/// use describe::Describe as _;
/// use describe::derive::Describe;
///
/// #[derive(Describe)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// let point = Point { x: 1, y: 2 };
/// assert_eq!(describe::reflective_to_string(Some(point.as_describe())), "{x: 1, y: 2}");
/// ```
pub trait Describe: Any {
    /// Returns the descriptor of this value's most-derived type level.
    fn descriptor(&self) -> &'static TypeDescriptor;

    /// Casts this value to a type-erased describable reference.
    ///
    /// # Example
    ///
    /// ```
    /// use describe::Describe as _;
    /// use describe::derive::Describe;
    ///
    /// #[derive(Describe)]
    /// struct Counter {
    ///     value: usize,
    /// }
    ///
    /// let counter = Counter { value: 0 };
    /// let erased: &dyn describe::Describe = counter.as_describe();
    /// assert!(erased.is::<Counter>());
    /// ```
    #[inline(always)]
    fn as_describe(&self) -> &dyn Describe
    where
        Self: Sized,
    {
        self
    }

    /// Return the [`TypeId`] of the underlying type.
    ///
    /// `Any::type_id` on a `Box<dyn Describe>` reports the container, not the
    /// boxed value; this method always reports the value.
    #[inline]
    fn ty_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }
}

impl dyn Describe {
    /// Returns `true` if the underlying value is of type `T`.
    #[inline(always)]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    /// Downcasts the value to type `T` by reference.
    ///
    /// If the underlying value is not of type `T`, returns `None`.
    ///
    /// This is what generated field accessors are built from: the descriptor
    /// hands out plain function pointers that downcast and project.
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }
}

// -----------------------------------------------------------------------------
// Described

/// Static access to a type's [`TypeDescriptor`].
///
/// Where [`Describe`] reaches the descriptor through a value, `Described`
/// reaches it through the type alone, which is what the
/// [`TypeRegistry`](crate::registry::TypeRegistry) registers.
///
/// Descriptors are built once per type and cached in a static cell
/// (see [`info::cell`](crate::info::cell)); the returned reference is shared
/// by every call.
pub trait Described: Describe {
    /// Returns the descriptor of this type level.
    fn type_descriptor() -> &'static TypeDescriptor;
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::Describe;
    use crate::derive::Describe as DeriveDescribe;

    #[derive(DeriveDescribe)]
    struct Sample {
        value: u8,
    }

    #[test]
    fn downcast_through_dyn() {
        let sample = Sample { value: 7 };
        let erased: &dyn Describe = sample.as_describe();

        assert!(erased.is::<Sample>());
        assert!(!erased.is::<u8>());
        assert_eq!(erased.downcast_ref::<Sample>().unwrap().value, 7);
        assert!(erased.downcast_ref::<u8>().is_none());
    }
}
