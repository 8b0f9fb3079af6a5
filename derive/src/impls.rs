//! Code generation for `#[derive(Describe)]`.

use proc_macro2::TokenStream;
use quote::quote;
use syn::GenericParam;

use crate::derive_data::DescribeStruct;

/// Expands every impl the derive produces.
pub(crate) fn impl_describe(info: &DescribeStruct) -> TokenStream {
    let type_path_tokens = impl_trait_type_path(info);
    let described_tokens = impl_trait_described(info);
    let describe_tokens = impl_trait_describe(info);
    let render_tokens = impl_trait_render(info);
    let kinded_tokens = impl_trait_kinded(info);
    let auto_register_tokens = get_auto_register_impl(info);

    quote! {
        #type_path_tokens

        #described_tokens

        #describe_tokens

        #render_tokens

        #kinded_tokens

        #auto_register_tokens
    }
}

// -----------------------------------------------------------------------------
// Bounds

/// Builds the where clause shared by every generated impl.
///
/// Non-generic types keep their (empty) clause untouched. Generic types get
/// the full requirement set: every type parameter resolves its path, every
/// listed field type is a renderable descriptor entry, and the base type is
/// itself described. Emitting the same set everywhere keeps the impls
/// mutually satisfiable.
fn where_clause_tokens(info: &DescribeStruct) -> TokenStream {
    if !info.impl_with_generic() {
        return match &info.generics.where_clause {
            Some(clause) => quote!(#clause),
            None => TokenStream::new(),
        };
    }

    let mut predicates = TokenStream::new();

    if let Some(clause) = &info.generics.where_clause {
        for predicate in &clause.predicates {
            predicates.extend(quote!(#predicate,));
        }
    }

    for param in info.generics.type_params() {
        let ident = &param.ident;
        predicates.extend(quote!(#ident: describe::info::TypePath,));
    }

    for field in &info.fields {
        let ty = field.ty;
        predicates.extend(quote!(#ty: describe::Kinded + 'static,));
    }

    if let Some(base) = &info.base {
        let ty = base.ty;
        predicates.extend(quote!(#ty: describe::Described,));
    }

    quote!(where #predicates)
}

// -----------------------------------------------------------------------------
// TypePath

/// Appends each generic argument's path fragment, separated by `", "`.
fn path_args_tokens(info: &DescribeStruct, method: TokenStream) -> TokenStream {
    let mut tokens = TokenStream::new();

    for (index, param) in info.generics.params.iter().enumerate() {
        if index != 0 {
            tokens.extend(quote! { path.push_str(", "); });
        }

        match param {
            GenericParam::Type(ty_param) => {
                let ident = &ty_param.ident;
                tokens.extend(quote! {
                    path.push_str(<#ident as describe::info::TypePath>::#method());
                });
            }
            GenericParam::Const(const_param) => {
                let ident = &const_param.ident;
                tokens.extend(quote! {
                    path.push_str(&::std::string::ToString::to_string(&#ident));
                });
            }
            // Rejected while parsing.
            GenericParam::Lifetime(_) => {}
        }
    }

    tokens
}

/// Generate `TypePath` trait implementation tokens.
fn impl_trait_type_path(info: &DescribeStruct) -> TokenStream {
    let ident = info.ident;
    let ident_str = ident.to_string();
    let (impl_generics, ty_generics, _) = info.generics.split_for_impl();
    let where_tokens = where_clause_tokens(info);

    if !info.impl_with_generic() {
        return quote! {
            impl describe::info::TypePath for #ident {
                #[inline]
                fn type_path() -> &'static str {
                    ::core::concat!(::core::module_path!(), "::", #ident_str)
                }
                #[inline]
                fn type_name() -> &'static str {
                    #ident_str
                }
                #[inline]
                fn type_ident() -> &'static str {
                    #ident_str
                }
            }
        };
    }

    let arg_paths = path_args_tokens(info, quote!(type_path));
    let arg_names = path_args_tokens(info, quote!(type_name));

    quote! {
        impl #impl_generics describe::info::TypePath for #ident #ty_generics #where_tokens {
            fn type_path() -> &'static str {
                static CELL: describe::info::GenericPathCell =
                    describe::info::GenericPathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    let mut path = ::std::string::String::from(
                        ::core::concat!(::core::module_path!(), "::", #ident_str, "<"),
                    );
                    #arg_paths
                    path.push('>');
                    path
                })
            }

            fn type_name() -> &'static str {
                static CELL: describe::info::GenericPathCell =
                    describe::info::GenericPathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    let mut path = ::std::string::String::from(::core::concat!(#ident_str, "<"));
                    #arg_names
                    path.push('>');
                    path
                })
            }

            #[inline]
            fn type_ident() -> &'static str {
                #ident_str
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Described

/// Generate `Described` trait implementation tokens: the descriptor table
/// itself, built once in a static cell.
fn impl_trait_described(info: &DescribeStruct) -> TokenStream {
    let ident = info.ident;
    let (impl_generics, ty_generics, _) = info.generics.split_for_impl();
    let where_tokens = where_clause_tokens(info);

    let field_tokens = info.fields.iter().map(|field| {
        let name = field.ident.to_string();
        let field_ident = field.ident;
        let ty = field.ty;
        let skip_tokens = field.skip.then(|| quote!(.with_skip()));

        quote! {
            describe::info::FieldInfo::new::<#ty>(#name, |object| {
                object
                    .downcast_ref::<Self>()
                    .map(|value| &value.#field_ident as &dyn describe::Render)
            })
            #skip_tokens
        }
    });

    let base_tokens = match &info.base {
        Some(base) => {
            let name = base.ident.to_string();
            let base_ident = base.ident;
            let ty = base.ty;

            quote! {
                ::core::option::Option::Some(describe::info::BaseInfo::new::<#ty>(
                    #name,
                    |object| {
                        object
                            .downcast_ref::<Self>()
                            .map(|value| &value.#base_ident as &dyn describe::Describe)
                    },
                ))
            }
        }
        None => quote!(::core::option::Option::None),
    };

    let descriptor_tokens = quote! {
        describe::info::TypeDescriptor::new::<Self>(
            ::std::vec![ #( #field_tokens ),* ],
            #base_tokens,
        )
    };

    let inner_cell_tokens = if info.impl_with_generic() {
        quote! {
            static CELL: describe::info::GenericDescriptorCell =
                describe::info::GenericDescriptorCell::new();
            CELL.get_or_insert::<Self>(|| #descriptor_tokens)
        }
    } else {
        quote! {
            static CELL: describe::info::NonGenericDescriptorCell =
                describe::info::NonGenericDescriptorCell::new();
            CELL.get_or_init(|| #descriptor_tokens)
        }
    };

    quote! {
        impl #impl_generics describe::Described for #ident #ty_generics #where_tokens {
            fn type_descriptor() -> &'static describe::info::TypeDescriptor {
                #inner_cell_tokens
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Describe / Render / Kinded

/// Generate `Describe` trait implementation tokens.
fn impl_trait_describe(info: &DescribeStruct) -> TokenStream {
    let ident = info.ident;
    let (impl_generics, ty_generics, _) = info.generics.split_for_impl();
    let where_tokens = where_clause_tokens(info);

    quote! {
        impl #impl_generics describe::Describe for #ident #ty_generics #where_tokens {
            #[inline]
            fn descriptor(&self) -> &'static describe::info::TypeDescriptor {
                <Self as describe::Described>::type_descriptor()
            }
        }
    }
}

/// Generate `Render` trait implementation tokens.
///
/// With `#[describe(display)]` the value renders through its own `Display`;
/// otherwise it renders as its braced field listing.
fn impl_trait_render(info: &DescribeStruct) -> TokenStream {
    let ident = info.ident;
    let (impl_generics, ty_generics, _) = info.generics.split_for_impl();
    let where_tokens = where_clause_tokens(info);

    let body = if info.attrs.display {
        quote! {
            describe::render::write_display(out, self);
            ::core::result::Result::Ok(())
        }
    } else {
        quote! {
            describe::render::render_fields(self, out)
        }
    };

    quote! {
        impl #impl_generics describe::Render for #ident #ty_generics #where_tokens {
            fn render(
                &self,
                out: &mut ::std::string::String,
            ) -> ::core::result::Result<(), describe::DescribeError> {
                #body
            }
        }
    }
}

/// Generate `Kinded` trait implementation tokens.
fn impl_trait_kinded(info: &DescribeStruct) -> TokenStream {
    let ident = info.ident;
    let (impl_generics, ty_generics, _) = info.generics.split_for_impl();
    let where_tokens = where_clause_tokens(info);

    quote! {
        impl #impl_generics describe::Kinded for #ident #ty_generics #where_tokens {
            const KIND: describe::ValueKind = describe::ValueKind::Reference;
        }
    }
}

// -----------------------------------------------------------------------------
// auto_register

/// Generate the registration-table submission, when requested and possible.
fn get_auto_register_impl(info: &DescribeStruct) -> TokenStream {
    if !cfg!(feature = "auto_register") || !info.attrs.auto_register {
        return TokenStream::new();
    }

    // No effect on generic types: the macro cannot know which
    // instantiations will exist.
    if info.impl_with_generic() {
        return TokenStream::new();
    }

    let ident = info.ident;

    quote! {
        const _: () = {
            describe::__macro_exports::auto_register::inventory::submit! {
                describe::__macro_exports::auto_register::AutoRegistration::of::<#ident>()
            }
        };
    }
}
