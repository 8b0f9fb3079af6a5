//! [`Render`], [`Kinded`] and [`TypePath`] implementations for the built-in
//! leaf and container types.

use crate::DescribeError;
use crate::info::{GenericPathCell, TypePath};
use crate::render::{Kinded, NULL_LITERAL, Render, ValueKind, render_slice, write_display};

fn concat(parts: &[&str]) -> String {
    parts.concat()
}

// -----------------------------------------------------------------------------
// Scalars

macro_rules! impl_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl TypePath for $ty {
                #[inline]
                fn type_path() -> &'static str {
                    stringify!($ty)
                }
                #[inline]
                fn type_name() -> &'static str {
                    stringify!($ty)
                }
                #[inline]
                fn type_ident() -> &'static str {
                    stringify!($ty)
                }
            }

            impl Render for $ty {
                #[inline]
                fn render(&self, out: &mut String) -> Result<(), DescribeError> {
                    write_display(out, self);
                    Ok(())
                }
            }

            impl Kinded for $ty {
                const KIND: ValueKind = ValueKind::Scalar;
            }
        )*
    };
}

impl_scalar!(
    bool, char, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64,
);

// -----------------------------------------------------------------------------
// Text

impl TypePath for str {
    #[inline]
    fn type_path() -> &'static str {
        "str"
    }
    #[inline]
    fn type_name() -> &'static str {
        "str"
    }
    #[inline]
    fn type_ident() -> &'static str {
        "str"
    }
}

impl Render for str {
    #[inline]
    fn render(&self, out: &mut String) -> Result<(), DescribeError> {
        out.push_str(self);
        Ok(())
    }
}

impl Kinded for str {
    const KIND: ValueKind = ValueKind::Scalar;
}

impl TypePath for String {
    #[inline]
    fn type_path() -> &'static str {
        "std::string::String"
    }
    #[inline]
    fn type_name() -> &'static str {
        "String"
    }
    #[inline]
    fn type_ident() -> &'static str {
        "String"
    }
}

impl Render for String {
    #[inline]
    fn render(&self, out: &mut String) -> Result<(), DescribeError> {
        out.push_str(self);
        Ok(())
    }
}

impl Kinded for String {
    const KIND: ValueKind = ValueKind::Scalar;
}

// -----------------------------------------------------------------------------
// Option

impl<T: TypePath> TypePath for Option<T> {
    fn type_path() -> &'static str {
        static CELL: GenericPathCell = GenericPathCell::new();
        CELL.get_or_insert::<Self>(|| ["core::option::Option<", T::type_path(), ">"].concat())
    }

    fn type_name() -> &'static str {
        static CELL: GenericPathCell = GenericPathCell::new();
        CELL.get_or_insert::<Self>(|| ["Option<", T::type_name(), ">"].concat())
    }

    #[inline]
    fn type_ident() -> &'static str {
        "Option"
    }
}

impl<T: Render> Render for Option<T> {
    fn render(&self, out: &mut String) -> Result<(), DescribeError> {
        match self {
            Some(value) => value.render(out),
            None => {
                out.push_str(NULL_LITERAL);
                Ok(())
            }
        }
    }
}

impl<T: Render> Kinded for Option<T> {
    const KIND: ValueKind = ValueKind::Reference;
}

// -----------------------------------------------------------------------------
// Sequences

impl<T: TypePath> TypePath for [T] {
    fn type_path() -> &'static str {
        static CELL: GenericPathCell = GenericPathCell::new();
        CELL.get_or_insert::<Self>(|| ["[", T::type_path(), "]"].concat())
    }

    fn type_name() -> &'static str {
        static CELL: GenericPathCell = GenericPathCell::new();
        CELL.get_or_insert::<Self>(|| ["[", T::type_name(), "]"].concat())
    }

    fn type_ident() -> &'static str {
        static CELL: GenericPathCell = GenericPathCell::new();
        CELL.get_or_insert::<Self>(|| ["[", T::type_ident(), "]"].concat())
    }
}

impl<T: Render> Render for [T] {
    #[inline]
    fn render(&self, out: &mut String) -> Result<(), DescribeError> {
        render_slice(self, out)
    }
}

impl<T: Render> Kinded for [T] {
    const KIND: ValueKind = ValueKind::Sequence;
}

impl<T: TypePath, const N: usize> TypePath for [T; N] {
    fn type_path() -> &'static str {
        static CELL: GenericPathCell = GenericPathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["[", T::type_path(), "; ", &N.to_string(), "]"]))
    }

    fn type_name() -> &'static str {
        static CELL: GenericPathCell = GenericPathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["[", T::type_name(), "; ", &N.to_string(), "]"]))
    }

    fn type_ident() -> &'static str {
        static CELL: GenericPathCell = GenericPathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["[", T::type_ident(), "; ", &N.to_string(), "]"]))
    }
}

impl<T: Render, const N: usize> Render for [T; N] {
    #[inline]
    fn render(&self, out: &mut String) -> Result<(), DescribeError> {
        render_slice(self, out)
    }
}

impl<T: Render, const N: usize> Kinded for [T; N] {
    const KIND: ValueKind = ValueKind::Sequence;
}

impl<T: TypePath> TypePath for Vec<T> {
    fn type_path() -> &'static str {
        static CELL: GenericPathCell = GenericPathCell::new();
        CELL.get_or_insert::<Self>(|| ["std::vec::Vec<", T::type_path(), ">"].concat())
    }

    fn type_name() -> &'static str {
        static CELL: GenericPathCell = GenericPathCell::new();
        CELL.get_or_insert::<Self>(|| ["Vec<", T::type_name(), ">"].concat())
    }

    #[inline]
    fn type_ident() -> &'static str {
        "Vec"
    }
}

impl<T: Render> Render for Vec<T> {
    #[inline]
    fn render(&self, out: &mut String) -> Result<(), DescribeError> {
        render_slice(self, out)
    }
}

impl<T: Render> Kinded for Vec<T> {
    const KIND: ValueKind = ValueKind::Sequence;
}

// -----------------------------------------------------------------------------
// Indirections

impl<T: TypePath + ?Sized> TypePath for &'static T {
    fn type_path() -> &'static str {
        static CELL: GenericPathCell = GenericPathCell::new();
        CELL.get_or_insert::<Self>(|| ["&", T::type_path()].concat())
    }

    fn type_name() -> &'static str {
        static CELL: GenericPathCell = GenericPathCell::new();
        CELL.get_or_insert::<Self>(|| ["&", T::type_name()].concat())
    }

    fn type_ident() -> &'static str {
        static CELL: GenericPathCell = GenericPathCell::new();
        CELL.get_or_insert::<Self>(|| ["&", T::type_ident()].concat())
    }
}

impl<T: Render + ?Sized> Render for &T {
    #[inline]
    fn render(&self, out: &mut String) -> Result<(), DescribeError> {
        (**self).render(out)
    }
}

// A reference is transparent for classification; `&[T]` is as much a
// sequence as `[T]` itself.
impl<T: Kinded + ?Sized> Kinded for &'static T {
    const KIND: ValueKind = T::KIND;
}

impl<T: TypePath + ?Sized> TypePath for Box<T> {
    fn type_path() -> &'static str {
        static CELL: GenericPathCell = GenericPathCell::new();
        CELL.get_or_insert::<Self>(|| ["std::boxed::Box<", T::type_path(), ">"].concat())
    }

    fn type_name() -> &'static str {
        static CELL: GenericPathCell = GenericPathCell::new();
        CELL.get_or_insert::<Self>(|| ["Box<", T::type_name(), ">"].concat())
    }

    #[inline]
    fn type_ident() -> &'static str {
        "Box"
    }
}

impl<T: Render + ?Sized> Render for Box<T> {
    #[inline]
    fn render(&self, out: &mut String) -> Result<(), DescribeError> {
        (**self).render(out)
    }
}

impl<T: Kinded + ?Sized> Kinded for Box<T> {
    const KIND: ValueKind = T::KIND;
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(value: &dyn Render) -> String {
        let mut out = String::new();
        value.render(&mut out).unwrap();
        out
    }

    #[test]
    fn scalars_use_display() {
        assert_eq!(rendered(&42_i32), "42");
        assert_eq!(rendered(&true), "true");
        assert_eq!(rendered(&'x'), "x");
        assert_eq!(rendered(&1.5_f64), "1.5");
    }

    #[test]
    fn text_renders_bare() {
        assert_eq!(rendered(&String::from("Al")), "Al");
        assert_eq!(rendered(&"Al"), "Al");
    }

    #[test]
    fn option_follows_the_null_rule() {
        assert_eq!(rendered(&Option::<i32>::None), "null");
        assert_eq!(rendered(&Some(3_i32)), "3");
    }

    #[test]
    fn sequences_bracket_their_elements() {
        assert_eq!(rendered(&vec![1_i32, 2, 3]), "[1, 2, 3]");
        assert_eq!(rendered(&Vec::<i32>::new()), "[]");
        assert_eq!(rendered(&[10_u8, 20]), "[10, 20]");
    }

    #[test]
    fn nested_sequences_recurse() {
        let nested = vec![vec![1_i32], vec![], vec![2, 3]];
        assert_eq!(rendered(&nested), "[[1], [], [2, 3]]");
    }

    #[test]
    fn null_rule_applies_inside_sequences() {
        let values = vec![Some(1_i32), None, Some(3)];
        assert_eq!(rendered(&values), "[1, null, 3]");
    }

    #[test]
    fn declared_kinds() {
        assert_eq!(<i32 as Kinded>::KIND, ValueKind::Scalar);
        assert_eq!(<Option<i32> as Kinded>::KIND, ValueKind::Reference);
        assert_eq!(<Vec<i32> as Kinded>::KIND, ValueKind::Sequence);
        assert_eq!(<&'static [u8] as Kinded>::KIND, ValueKind::Sequence);
        assert_eq!(<Box<str> as Kinded>::KIND, ValueKind::Scalar);
    }

    #[test]
    fn container_type_paths() {
        assert_eq!(<Option<i32> as TypePath>::type_name(), "Option<i32>");
        assert_eq!(<Vec<String> as TypePath>::type_path(), "std::vec::Vec<std::string::String>");
        assert_eq!(<[u8; 4] as TypePath>::type_name(), "[u8; 4]");
        assert_eq!(<&'static str as TypePath>::type_name(), "&str");
    }
}
