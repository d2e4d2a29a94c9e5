//! Derive macro for `sanitize`.
//!
//! This crate generates the traversal code behind `#[derive(Sanitize)]`. It:
//! - walks every field, carrying the field identifier as the name context
//! - reads `#[sanitize(skip)]` field attributes to leave a field untouched
//! - emits a `Sanitize` implementation that threads the hook through recursion
//!
//! It does **not** define the string pipeline or the name-pattern table. Those
//! live in the main `sanitize` crate and are applied at runtime.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::option_if_let_else
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::unwrap_used))]

#[allow(unused_extern_crates)]
extern crate proc_macro;

use proc_macro2::TokenStream;
use proc_macro_crate::{crate_name, FoundCrate};
use quote::{format_ident, quote};
use syn::{parse_macro_input, spanned::Spanned, Data, DeriveInput, Result};

mod derive_enum;
mod derive_struct;
mod generics;
mod strategy;

use derive_enum::derive_enum;
use derive_struct::derive_struct;
use generics::add_sanitize_bounds;

/// Derives `sanitize::Sanitize` for structs and enums.
///
/// The generated implementation deep-copies the value by move, recursing into
/// every field:
///
/// - **Named fields** are recursed with the field identifier as the name
///   context, so a field called `password` is subject to name-pattern
///   redaction no matter how deeply the struct is nested.
/// - **Tuple and newtype fields** inherit the incoming name context, the same
///   rule sequences follow. A newtype wrapper around `String` therefore
///   behaves like a named string alias.
/// - `#[sanitize(skip)]` passes a field through untouched. Use this for
///   external types that do not implement `Sanitize` (timestamps, decimals)
///   or for fields that must never be rewritten.
///
/// Generic parameters used by walked fields receive a `Sanitize` bound;
/// `PhantomData` parameters are exempt. Unions are rejected at compile time.
#[proc_macro_derive(Sanitize, attributes(sanitize))]
pub fn derive_sanitize(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Returns the token stream to reference the sanitize crate root.
///
/// Handles crate renaming (e.g., `my_sanitize = { package = "sanitize", ... }`)
/// and internal usage (when the derive is used inside the sanitize crate itself).
fn crate_root() -> TokenStream {
    match crate_name("sanitize") {
        Ok(FoundCrate::Itself) => quote! { crate },
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            quote! { ::#ident }
        }
        Err(_) => quote! { ::sanitize },
    }
}

struct DeriveBody {
    body: TokenStream,
    used_generics: Vec<proc_macro2::Ident>,
}

fn expand(input: DeriveInput) -> Result<TokenStream> {
    let DeriveInput {
        ident,
        generics,
        data,
        ..
    } = input;

    let crate_root = crate_root();

    let output = match data {
        Data::Struct(data) => derive_struct(data, &generics, &crate_root)?,
        Data::Enum(data) => derive_enum(&ident, data, &generics, &crate_root)?,
        Data::Union(u) => {
            return Err(syn::Error::new(
                u.union_token.span(),
                "`Sanitize` cannot be derived for unions",
            ));
        }
    };

    let bounded = add_sanitize_bounds(generics, &output.used_generics, &crate_root);
    let (impl_generics, ty_generics, where_clause) = bounded.split_for_impl();
    let body = &output.body;

    Ok(quote! {
        impl #impl_generics #crate_root::Sanitize for #ident #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn sanitize_with(
                self,
                name: &str,
                hook: ::core::option::Option<&dyn #crate_root::SanitizeHook>,
            ) -> Self {
                #body
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use syn::{parse_quote, DeriveInput};

    use super::expand;

    #[test]
    fn unions_are_rejected() {
        let input: DeriveInput = parse_quote! {
            union Mixed {
                a: u32,
                b: f32,
            }
        };
        let err = expand(input).expect_err("should reject unions");
        assert!(err.to_string().contains("unions"));
    }

    #[test]
    fn named_structs_expand_with_field_names() {
        let input: DeriveInput = parse_quote! {
            struct Login {
                password: String,
            }
        };
        let tokens = expand(input).expect("should expand").to_string();
        assert!(tokens.contains("fn sanitize_with"));
        assert!(tokens.contains("\"password\""));
    }

    #[test]
    fn skipped_fields_are_not_transformed() {
        let input: DeriveInput = parse_quote! {
            struct Login {
                #[sanitize(skip)]
                raw: String,
            }
        };
        let tokens = expand(input).expect("should expand").to_string();
        assert!(!tokens.contains("\"raw\""));
    }
}
