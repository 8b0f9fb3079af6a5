//! The rendering driver: walks a value's type chain and produces the
//! complete textual description.

use std::borrow::Cow;

use crate::render::NULL_LITERAL;
use crate::{Describe, DescribeError};

// -----------------------------------------------------------------------------
// Debug tracing

#[cfg(all(debug_assertions, feature = "debug"))]
mod trace {
    use std::cell::RefCell;

    use crate::info::TypeDescriptor;

    std::thread_local! {
        static RENDER_STACK: RefCell<Vec<&'static TypeDescriptor>> =
            const { RefCell::new(Vec::new()) };
    }

    /// Pops the descriptor pushed by [`enter`] when the render call unwinds
    /// or completes.
    pub(super) struct LevelGuard;

    pub(super) fn enter(descriptor: &'static TypeDescriptor) -> LevelGuard {
        RENDER_STACK.with_borrow_mut(|stack| stack.push(descriptor));
        LevelGuard
    }

    impl Drop for LevelGuard {
        fn drop(&mut self) {
            RENDER_STACK.with_borrow_mut(|stack| {
                stack.pop();
            });
        }
    }

    pub(super) fn format_stack() -> String {
        RENDER_STACK.with_borrow(|stack| {
            let mut text = String::new();
            for (index, descriptor) in stack.iter().enumerate() {
                if index != 0 {
                    text.push_str(" -> ");
                }
                text.push('`');
                text.push_str(descriptor.type_path());
                text.push('`');
            }
            text
        })
    }
}

/// Builds the hard error for an accessor that rejected its instance.
///
/// With the `debug` feature in a debug build, the message also carries the
/// stack of descriptors currently being rendered.
pub(crate) fn inaccessible_field(type_path: &'static str, field: &'static str) -> DescribeError {
    #[cfg(all(debug_assertions, feature = "debug"))]
    let type_path = Cow::Owned(format!(
        "{type_path} (render stack: {})",
        trace::format_stack()
    ));
    #[cfg(not(all(debug_assertions, feature = "debug")))]
    let type_path = Cow::Borrowed(type_path);

    DescribeError::InaccessibleField { type_path, field }
}

// -----------------------------------------------------------------------------
// Driver

/// Renders a complete description of `value`, strict form.
///
/// - `None` yields the literal string `null`.
/// - Otherwise the result is `{` + levels + `}`: each type level renders its
///   fields as `name: value` in name order, levels are joined most-derived
///   first with `, `, and a level without renderable fields contributes
///   nothing, not even a separator.
///
/// The call either returns the complete string or an error; truncated output
/// is never observable. Rendering reads the value and nothing else: no
/// mutation, no caching, no global state.
///
/// # Example
///
/// ```
/// use describe::derive::Describe;
/// use describe::try_reflective_to_string;
///
/// #[derive(Describe)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// let text = try_reflective_to_string(Some(&Point { x: 1, y: 2 })).unwrap();
/// assert_eq!(text, "{x: 1, y: 2}");
/// assert_eq!(try_reflective_to_string(None).unwrap(), "null");
/// ```
pub fn try_reflective_to_string(value: Option<&dyn Describe>) -> Result<String, DescribeError> {
    let mut out = String::new();
    match value {
        Some(object) => render_fields(object, &mut out)?,
        None => out.push_str(NULL_LITERAL),
    }
    Ok(out)
}

/// Renders a complete description of `value`.
///
/// This function is similar to `try_reflective_to_string(..).unwrap()`.
///
/// # Panics
///
/// Panics if a field accessor or base projection rejects the instance. This
/// cannot happen for types using [the derive](crate::derive::Describe); see
/// [`DescribeError::InaccessibleField`].
#[inline]
pub fn reflective_to_string(value: Option<&dyn Describe>) -> String {
    try_reflective_to_string(value).unwrap()
}

/// Appends the braced field listing of `object` to `out`.
///
/// This is the shared engine behind [`try_reflective_to_string`] and the
/// derived [`Render`](crate::Render) impls, which is how nested described
/// values end up as nested braces.
pub fn render_fields(object: &dyn Describe, out: &mut String) -> Result<(), DescribeError> {
    #[cfg(all(debug_assertions, feature = "debug"))]
    let _level = trace::enter(object.descriptor());

    out.push('{');

    let mut descriptor = object.descriptor();
    let mut current = object;
    let mut first = true;

    loop {
        for field in descriptor.renderable_fields() {
            let value = field.try_read(descriptor.type_path(), current)?;

            if !first {
                out.push_str(", ");
            }
            first = false;

            out.push_str(field.name());
            out.push_str(": ");
            value.render(out)?;
        }

        let Some(base) = descriptor.base() else { break };
        current = base
            .project(current)
            .ok_or_else(|| inaccessible_field(descriptor.type_path(), base.field_name()))?;
        descriptor = base.descriptor();
    }

    out.push('}');
    Ok(())
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use std::fmt;

    use crate::derive::Describe;
    use crate::info::TypeDescriptor;
    use crate::{Described, DescribeError, reflective_to_string, try_reflective_to_string};

    #[derive(Describe)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Describe)]
    struct Unordered {
        b: i32,
        a: i32,
    }

    #[derive(Describe)]
    struct Person {
        name: String,
    }

    #[derive(Describe)]
    struct Employee {
        #[describe(base)]
        person: Person,
        salary: i32,
    }

    fn employee(name: &str, salary: i32) -> Employee {
        Employee {
            person: Person { name: name.into() },
            salary,
        }
    }

    #[test]
    fn null_input_renders_as_null() {
        assert_eq!(reflective_to_string(None), "null");
    }

    #[test]
    fn simple_struct() {
        assert_eq!(
            reflective_to_string(Some(&Point { x: 1, y: 2 })),
            "{x: 1, y: 2}"
        );
    }

    #[test]
    fn fields_render_in_name_order_not_declaration_order() {
        assert_eq!(
            reflective_to_string(Some(&Unordered { b: 2, a: 1 })),
            "{a: 1, b: 2}"
        );
    }

    #[test]
    fn base_level_renders_after_the_derived_level() {
        assert_eq!(
            reflective_to_string(Some(&employee("Al", 5))),
            "{salary: 5, name: Al}"
        );
    }

    #[test]
    fn output_is_braced_for_any_non_null_input() {
        let text = reflective_to_string(Some(&employee("Bo", 1)));
        assert!(text.starts_with('{'));
        assert!(text.ends_with('}'));
    }

    #[derive(Describe)]
    struct Blank;

    #[derive(Describe)]
    struct Secretive {
        id: i32,
        #[describe(skip)]
        secret: String,
    }

    impl Secretive {
        // The closest Rust analog of a static field; not instance storage,
        // so it never reaches the descriptor.
        const TOTAL: i32 = 0;
    }

    #[test]
    fn no_eligible_fields_renders_empty_braces() {
        assert_eq!(reflective_to_string(Some(&Blank)), "{}");
    }

    #[test]
    fn skip_marked_fields_never_appear() {
        let value = Secretive {
            id: 7,
            secret: "hidden".into(),
        };

        assert_eq!(reflective_to_string(Some(&value)), "{id: 7}");
        assert_eq!(Secretive::TOTAL, 0);
    }

    #[derive(Describe)]
    struct Profile {
        nickname: Option<String>,
    }

    #[test]
    fn null_valued_reference_field() {
        assert_eq!(
            reflective_to_string(Some(&Profile { nickname: None })),
            "{nickname: null}"
        );
        assert_eq!(
            reflective_to_string(Some(&Profile {
                nickname: Some("Al".into())
            })),
            "{nickname: Al}"
        );
    }

    #[derive(Describe)]
    struct Sequences {
        values: Vec<i32>,
        empty: Vec<i32>,
        missing: Option<Vec<i32>>,
        fixed: [i32; 2],
    }

    #[test]
    fn sequence_fields() {
        let value = Sequences {
            values: vec![1, 2, 3],
            empty: Vec::new(),
            missing: None,
            fixed: [4, 5],
        };

        assert_eq!(
            reflective_to_string(Some(&value)),
            "{empty: [], fixed: [4, 5], missing: null, values: [1, 2, 3]}"
        );
    }

    #[derive(Describe)]
    struct Matrix {
        rows: Vec<Vec<i32>>,
    }

    #[test]
    fn nested_sequences_nest_brackets() {
        let value = Matrix {
            rows: vec![vec![1, 2], vec![], vec![3]],
        };

        assert_eq!(
            reflective_to_string(Some(&value)),
            "{rows: [[1, 2], [], [3]]}"
        );
    }

    #[derive(Describe)]
    struct NamedParent {
        x: &'static str,
    }

    #[derive(Describe)]
    struct NamedChild {
        #[describe(base)]
        parent: NamedParent,
        x: &'static str,
    }

    #[test]
    fn shadowed_names_render_once_per_level() {
        let value = NamedChild {
            parent: NamedParent { x: "parent" },
            x: "child",
        };

        assert_eq!(
            reflective_to_string(Some(&value)),
            "{x: child, x: parent}"
        );
    }

    #[derive(Describe)]
    struct Grandparent {
        g: i32,
    }

    #[derive(Describe)]
    struct Childless {
        #[describe(base)]
        grandparent: Grandparent,
    }

    #[derive(Describe)]
    struct Leaf {
        #[describe(base)]
        middle: Childless,
        l: i32,
    }

    #[test]
    fn empty_middle_level_emits_no_separator() {
        let value = Leaf {
            middle: Childless {
                grandparent: Grandparent { g: 2 },
            },
            l: 1,
        };

        assert_eq!(reflective_to_string(Some(&value)), "{l: 1, g: 2}");
    }

    #[derive(Describe)]
    struct Wrapper {
        inner: Point,
    }

    #[test]
    fn nested_described_values_render_as_nested_braces() {
        let value = Wrapper {
            inner: Point { x: 3, y: 4 },
        };

        assert_eq!(reflective_to_string(Some(&value)), "{inner: {x: 3, y: 4}}");
    }

    #[derive(Describe)]
    #[describe(display)]
    struct Celsius {
        degrees: f64,
    }

    impl fmt::Display for Celsius {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}C", self.degrees)
        }
    }

    #[derive(Describe)]
    struct Reading {
        temperature: Celsius,
    }

    #[test]
    fn display_flagged_types_render_through_display() {
        let value = Reading {
            temperature: Celsius { degrees: 21.5 },
        };

        assert_eq!(reflective_to_string(Some(&value)), "{temperature: 21.5C}");
    }

    #[test]
    fn repeated_calls_yield_identical_strings() {
        let value = employee("Cy", 9);

        let first = try_reflective_to_string(Some(&value)).unwrap();
        let second = try_reflective_to_string(Some(&value)).unwrap();

        assert_eq!(first, second);
    }

    struct Rogue;

    // A descriptor borrowed from another type: every accessor rejects the
    // instance, which must fail the whole call.
    impl crate::Describe for Rogue {
        fn descriptor(&self) -> &'static TypeDescriptor {
            Point::type_descriptor()
        }
    }

    #[test]
    fn mismatched_descriptor_fails_the_whole_call() {
        let error = try_reflective_to_string(Some(&Rogue)).unwrap_err();

        match error {
            DescribeError::InaccessibleField { field, .. } => assert_eq!(field, "x"),
        }
    }
}
