//! Derive macro implementation for envfill

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{parse_macro_input, Data, DeriveInput, Field, Fields, Type, Visibility};

mod attrs;

use attrs::FieldAttrs;

/// Primitive types resolved directly from one environment variable.
const LEAF_TYPES: &[&str] = &[
    "String", "bool", "i8", "i16", "i32", "i64", "isize", "u8", "u16", "u32", "u64", "usize",
    "f32", "f64",
];

/// Whether `ty` names one of [`LEAF_TYPES`], matched on the last path segment.
fn is_leaf_type(ty: &Type) -> bool {
    match ty {
        Type::Path(type_path) if type_path.qself.is_none() => type_path
            .path
            .segments
            .last()
            .map(|seg| {
                seg.arguments.is_none() && LEAF_TYPES.iter().any(|name| seg.ident == name)
            })
            .unwrap_or(false),
        Type::Group(group) => is_leaf_type(&group.elem),
        Type::Paren(paren) => is_leaf_type(&paren.elem),
        _ => false,
    }
}

/// Private fields cannot be written from outside the struct.
fn is_settable(field: &Field) -> bool {
    !matches!(field.vis, Visibility::Inherited)
}

/// How the generated code handles one field.
enum Plan {
    Leaf {
        key: String,
    },
    /// Recursed into when the type implements `Populate`, otherwise skipped
    /// with `fallback`.
    Nested {
        annotation: Option<String>,
        fallback: &'static str,
    },
    Skip {
        key: Option<String>,
        reason: &'static str,
    },
}

impl Plan {
    fn for_field(field: &Field, attrs: FieldAttrs) -> Self {
        if attrs.skip {
            return Plan::Skip {
                key: None,
                reason: "Ignored",
            };
        }

        let is_group = attrs.group.is_some();
        let annotated = is_group || attrs.name.is_some();
        let annotation = attrs.group.flatten().or(attrs.name);

        if !is_settable(field) {
            return match annotated {
                true => Plan::Skip {
                    key: annotation,
                    reason: "Unsettable",
                },
                false => Plan::Skip {
                    key: None,
                    reason: "Untagged",
                },
            };
        }

        if is_leaf_type(&field.ty) && !is_group {
            return match annotation {
                Some(key) => Plan::Leaf { key },
                None => Plan::Skip {
                    key: None,
                    reason: "Untagged",
                },
            };
        }

        Plan::Nested {
            annotation,
            fallback: if annotated { "Unsupported" } else { "Untagged" },
        }
    }
}

fn option_str(value: &Option<String>) -> TokenStream2 {
    match value {
        Some(s) => quote! { ::core::option::Option::Some(#s) },
        None => quote! { ::core::option::Option::None },
    }
}

/// `Populate` derive macro
///
/// Implements `envfill::Populate` for a struct with named fields: a `fields`
/// schema listing every field in declaration order, and a `visit` method that
/// hands each field to the walker.
///
/// # Supported Attributes
///
/// **Field-level**:
/// - `#[env(name = "KEY")]`: Bind a primitive field to an environment variable
/// - `#[env(group)]`: Mark a nested `Populate` struct (optional, nested
///   structs are recursed into anyway)
/// - `#[env(group = "PREFIX")]`: Same, with a prefix used by joined key mode
/// - `#[env(skip)]`: Never touch the field
///
/// Fields of non-primitive types are recursed into when the type implements
/// `Populate` and skipped otherwise. Unannotated primitive fields and private
/// annotated fields are listed as skipped.
///
/// # Example
///
/// See the `envfill` crate documentation for usage examples.
#[proc_macro_derive(Populate, attributes(env))]
pub fn derive_populate(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    struct_name,
                    "`Populate` can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                struct_name,
                "`Populate` can only be derived for structs with named fields",
            ));
        }
    };

    let mut specs = Vec::with_capacity(fields.len());
    let mut steps = Vec::with_capacity(fields.len());

    for field in fields {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let field_type = &field.ty;
        let name = ident.unraw().to_string();

        let attrs = FieldAttrs::from_field(field)?;

        match Plan::for_field(field, attrs) {
            Plan::Leaf { key } => {
                specs.push(quote! {
                    ::envfill::FieldSpec::leaf(
                        #name,
                        #key,
                        <#field_type as ::envfill::EnvValue>::KIND,
                    )
                });
                steps.push(quote! {
                    walker.leaf(#name, #key, &mut self.#ident)?;
                });
            }
            Plan::Nested {
                annotation,
                fallback,
            } => {
                let annotation = option_str(&annotation);
                let fallback = syn::Ident::new(fallback, proc_macro2::Span::call_site());
                specs.push(quote! {
                    ::envfill::FieldSpec {
                        name: #name,
                        kind: ::envfill::dispatch::Probe::<#field_type>::new()
                            .field_kind(#annotation, ::envfill::SkipReason::#fallback),
                    }
                });
                steps.push(quote! {
                    ::envfill::dispatch::Nested(&mut self.#ident).visit_field(
                        walker,
                        #name,
                        #annotation,
                        ::envfill::SkipReason::#fallback,
                    )?;
                });
            }
            Plan::Skip { key, reason } => {
                let key = option_str(&key);
                let reason = syn::Ident::new(reason, proc_macro2::Span::call_site());
                specs.push(quote! {
                    ::envfill::FieldSpec::skip(#name, #key, ::envfill::SkipReason::#reason)
                });
                steps.push(quote! {
                    walker.skip(#name, #key, ::envfill::SkipReason::#reason)?;
                });
            }
        }
    }

    Ok(quote! {
        impl #impl_generics ::envfill::Populate for #struct_name #ty_generics #where_clause {
            fn fields() -> ::std::vec::Vec<::envfill::FieldSpec> {
                #[allow(unused_imports)]
                use ::envfill::dispatch::{ProbeFallback as _, ProbePopulate as _};

                ::std::vec![
                    #(#specs),*
                ]
            }

            #[allow(unused_variables)]
            fn visit(
                &mut self,
                walker: &mut ::envfill::Walker,
            ) -> ::core::result::Result<(), ::envfill::PopulateError> {
                #[allow(unused_imports)]
                use ::envfill::dispatch::{NestedFallback as _, NestedPopulate as _};

                #(#steps)*
                ::core::result::Result::Ok(())
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn plan(field: Field) -> Plan {
        let attrs = FieldAttrs::from_field(&field).unwrap();
        Plan::for_field(&field, attrs)
    }

    #[test]
    fn test_leaf_types() {
        assert!(is_leaf_type(&parse_quote!(String)));
        assert!(is_leaf_type(&parse_quote!(std::string::String)));
        assert!(is_leaf_type(&parse_quote!(u16)));
        assert!(is_leaf_type(&parse_quote!(f32)));
        assert!(!is_leaf_type(&parse_quote!(Vec<String>)));
        assert!(!is_leaf_type(&parse_quote!(Option<u16>)));
        assert!(!is_leaf_type(&parse_quote!(u128)));
        assert!(!is_leaf_type(&parse_quote!(&'static str)));
    }

    #[test]
    fn test_plan_leaf() {
        let field: Field = parse_quote! {
            #[env(name = "PORT")]
            pub port: u16
        };
        assert!(matches!(plan(field), Plan::Leaf { key } if key == "PORT"));
    }

    #[test]
    fn test_plan_private_field_is_unsettable() {
        let field: Field = parse_quote! {
            #[env(name = "SECRET")]
            secret: String
        };
        assert!(matches!(
            plan(field),
            Plan::Skip {
                reason: "Unsettable",
                key: Some(_)
            }
        ));
    }

    #[test]
    fn test_plan_private_group_is_unsettable() {
        let field: Field = parse_quote! {
            #[env(group)]
            inner: Inner
        };
        assert!(matches!(
            plan(field),
            Plan::Skip {
                reason: "Unsettable",
                key: None
            }
        ));
    }

    #[test]
    fn test_plan_unannotated_struct_is_nested() {
        let field: Field = parse_quote! {
            pub sub: Sub
        };
        assert!(matches!(
            plan(field),
            Plan::Nested {
                annotation: None,
                fallback: "Untagged"
            }
        ));
    }

    #[test]
    fn test_plan_named_struct_uses_name_as_prefix() {
        let field: Field = parse_quote! {
            #[env(name = "SUB")]
            pub sub: Sub
        };
        assert!(matches!(
            plan(field),
            Plan::Nested {
                annotation: Some(prefix),
                fallback: "Unsupported"
            } if prefix == "SUB"
        ));
    }

    #[test]
    fn test_plan_unannotated_primitive_is_untagged() {
        let field: Field = parse_quote! {
            pub note: String
        };
        assert!(matches!(
            plan(field),
            Plan::Skip {
                reason: "Untagged",
                ..
            }
        ));
    }

    #[test]
    fn test_expand_rejects_tuple_struct() {
        let input: DeriveInput = parse_quote! {
            struct Config(String);
        };
        assert!(expand(&input).is_err());
    }

    #[test]
    fn test_expand_generates_schema_and_walker() {
        let input: DeriveInput = parse_quote! {
            struct Config {
                #[env(name = "PORT")]
                pub port: u16,
                #[env(group = "DB")]
                pub database: Database,
                pub note: String,
            }
        };
        let tokens = expand(&input).unwrap().to_string();
        assert!(tokens.contains("walker . leaf (\"port\" , \"PORT\""));
        assert!(tokens.contains("Nested (& mut self . database) . visit_field"));
        assert!(tokens.contains("Probe :: < Database > :: new ()"));
        assert!(tokens.contains("SkipReason :: Untagged"));
    }
}
