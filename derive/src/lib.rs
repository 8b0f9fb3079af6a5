//! Derive support for the `describe` crate. See [`Describe`].

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

pub(crate) static DESCRIBE_ATTRIBUTE_NAME: &str = "describe";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;

// -----------------------------------------------------------------------------
// Macros

/// # Describe Derivation
///
/// `#[derive(Describe)]` builds the type's descriptor table and implements:
///
/// - `TypePath`
/// - `Described`
/// - `Describe`
/// - `Render`
/// - `Kinded`
///
/// Supported shapes are structs with named fields and unit structs. Tuple
/// structs and enums are rejected: the descriptor model is name-based. Types
/// with lifetime parameters are rejected as well, since descriptors identify
/// types by `TypeId`.
///
/// Every non-base field type must implement `Kinded` (and therefore
/// `Render`); for generic structs the derive emits the matching bounds.
///
/// ## Field Attributes
///
/// ### `#[describe(skip)]`
///
/// The skip-marker. The field stays listed in the descriptor but never
/// appears in rendered output.
///
/// ```rust, ignore
/// #[derive(Describe)]
/// struct Account {
///     id: u64,
///     #[describe(skip)]
///     token: String,
/// }
/// ```
///
/// ### `#[describe(base)]`
///
/// Marks the field holding the base portion of the object, linking this
/// type's descriptor to the field type's descriptor as its ancestor level.
/// At most one field may carry the marker, its type must derive `Describe`
/// too, and the field itself is not rendered as a field of this level.
///
/// ```rust, ignore
/// #[derive(Describe)]
/// struct Person {
///     name: String,
/// }
///
/// #[derive(Describe)]
/// struct Employee {
///     #[describe(base)]
///     person: Person,
///     salary: i32,
/// }
/// ```
///
/// ## Type Attributes
///
/// ### `#[describe(display)]`
///
/// Values of this type render through the type's own `Display` impl instead
/// of the braced field listing. The impl must exist; the derive does not
/// check for it.
///
/// ```rust, ignore
/// #[derive(Describe)]
/// #[describe(display)]
/// struct Celsius {
///     degrees: f64,
/// }
/// ```
///
/// ### `#[describe(auto_register)]`
///
/// Submits the type to the distributed registration table consumed by
/// `TypeRegistry::auto_register`. Registration stays explicit: without the
/// attribute nothing is collected, even when the `auto_register` feature is
/// enabled. The attribute has no effect on generic types, as the macro
/// cannot know which instantiations will exist.
///
/// ```rust, ignore
/// #[derive(Describe)]
/// #[describe(auto_register)]
/// struct Soldier {
///     rank: u8,
/// }
/// ```
#[proc_macro_derive(Describe, attributes(describe))]
pub fn derive_describe(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match derive_data::DescribeStruct::parse(&ast) {
        Ok(info) => impls::impl_describe(&info).into(),
        Err(err) => err.into_compile_error().into(),
    }
}
