//! Parsing of the derive input and its `#[describe(...)]` attributes.

use syn::spanned::Spanned;
use syn::{Attribute, Data, DeriveInput, Fields, Generics, Ident, Type};

use crate::DESCRIBE_ATTRIBUTE_NAME;

// -----------------------------------------------------------------------------
// Attributes

/// Type-level `#[describe(...)]` switches.
#[derive(Default)]
pub(crate) struct TypeAttributes {
    /// `#[describe(display)]`: render through the type's `Display` impl.
    pub display: bool,
    /// `#[describe(auto_register)]`: submit to the registration table.
    pub auto_register: bool,
}

impl TypeAttributes {
    fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut parsed = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(DESCRIBE_ATTRIBUTE_NAME) {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("display") {
                    parsed.display = true;
                    Ok(())
                } else if meta.path.is_ident("auto_register") {
                    parsed.auto_register = true;
                    Ok(())
                } else {
                    Err(meta.error("unknown `describe` type attribute"))
                }
            })?;
        }

        Ok(parsed)
    }
}

/// Field-level `#[describe(...)]` markers.
#[derive(Default)]
struct FieldAttributes {
    skip: bool,
    base: bool,
}

impl FieldAttributes {
    fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut parsed = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(DESCRIBE_ATTRIBUTE_NAME) {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    parsed.skip = true;
                    Ok(())
                } else if meta.path.is_ident("base") {
                    parsed.base = true;
                    Ok(())
                } else {
                    Err(meta.error("unknown `describe` field attribute"))
                }
            })?;
        }

        Ok(parsed)
    }
}

// -----------------------------------------------------------------------------
// DescribeStruct

/// One instance field to be listed in the descriptor.
pub(crate) struct DescribeField<'a> {
    pub ident: &'a Ident,
    pub ty: &'a Type,
    pub skip: bool,
}

/// The field marked `#[describe(base)]`, if any.
pub(crate) struct BaseField<'a> {
    pub ident: &'a Ident,
    pub ty: &'a Type,
}

/// The parsed derive input.
pub(crate) struct DescribeStruct<'a> {
    pub ident: &'a Ident,
    pub generics: &'a Generics,
    pub attrs: TypeAttributes,
    pub fields: Vec<DescribeField<'a>>,
    pub base: Option<BaseField<'a>>,
}

impl<'a> DescribeStruct<'a> {
    pub fn parse(ast: &'a DeriveInput) -> syn::Result<Self> {
        let Data::Struct(data) = &ast.data else {
            return Err(syn::Error::new(
                ast.span(),
                "`Describe` only supports structs with named fields",
            ));
        };

        if let Some(lifetime) = ast.generics.lifetimes().next() {
            return Err(syn::Error::new(
                lifetime.span(),
                "types with lifetime parameters cannot derive `Describe`; \
                 descriptors identify types by `TypeId`, which requires `'static`",
            ));
        }

        let named = match &data.fields {
            Fields::Named(named) => Some(named),
            Fields::Unit => None,
            Fields::Unnamed(unnamed) => {
                return Err(syn::Error::new(
                    unnamed.span(),
                    "`Describe` does not support tuple structs; field descriptors are name-based",
                ));
            }
        };

        let mut fields = Vec::new();
        let mut base: Option<BaseField<'a>> = None;

        for field in named.into_iter().flat_map(|named| named.named.iter()) {
            let attrs = FieldAttributes::parse(&field.attrs)?;
            let ident = field.ident.as_ref().expect("named fields have idents");

            if attrs.base {
                if attrs.skip {
                    return Err(syn::Error::new(
                        field.span(),
                        "`base` and `skip` cannot be combined; a base field is never rendered as a field",
                    ));
                }
                if base.is_some() {
                    return Err(syn::Error::new(
                        field.span(),
                        "only one field may be marked `#[describe(base)]`",
                    ));
                }
                base = Some(BaseField {
                    ident,
                    ty: &field.ty,
                });
                continue;
            }

            fields.push(DescribeField {
                ident,
                ty: &field.ty,
                skip: attrs.skip,
            });
        }

        Ok(Self {
            ident: &ast.ident,
            generics: &ast.generics,
            attrs: TypeAttributes::parse(&ast.attrs)?,
            fields,
            base,
        })
    }

    /// Whether generated impls need the generic machinery (shared cells,
    /// emitted bounds).
    pub fn impl_with_generic(&self) -> bool {
        !self.generics.params.is_empty()
    }
}
