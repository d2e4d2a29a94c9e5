//! Enum-specific `Sanitize` derivation.
//!
//! This module generates match arms for each variant and collects generic
//! parameters that require trait bounds.

use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote, quote_spanned};
use syn::{spanned::Spanned, DataEnum, Fields, Result};

use crate::{
    generics::collect_generics_from_type,
    strategy::{parse_field_strategy, Strategy},
    DeriveBody,
};

pub(crate) fn derive_enum(
    name: &Ident,
    data: DataEnum,
    generics: &syn::Generics,
    crate_root: &TokenStream,
) -> Result<DeriveBody> {
    let mut arms = Vec::new();
    let mut used_generics = Vec::new();

    for variant in data.variants {
        let variant_ident = &variant.ident;

        match variant.fields {
            Fields::Unit => {
                arms.push(quote! { #name::#variant_ident => #name::#variant_ident });
            }
            Fields::Named(fields) => {
                let mut bindings = Vec::new();
                let mut transforms = Vec::new();

                for field in fields.named {
                    let span = field.span();
                    let strategy = parse_field_strategy(&field.attrs)?;
                    let ident = field.ident.expect("named field should have an identifier");
                    let ty = &field.ty;

                    if strategy == Strategy::Walk {
                        collect_generics_from_type(ty, generics, &mut used_generics);
                        let field_name = ident.to_string();
                        transforms.push(quote_spanned! { span =>
                            let #ident = #crate_root::Sanitize::sanitize_with(#ident, #field_name, hook);
                        });
                    }
                    bindings.push(ident);
                }

                arms.push(quote! {
                    #name::#variant_ident { #(#bindings),* } => {
                        #(#transforms)*
                        #name::#variant_ident { #(#bindings),* }
                    }
                });
            }
            Fields::Unnamed(fields) => {
                let mut bindings = Vec::new();
                let mut transforms = Vec::new();

                for (index, field) in fields.unnamed.into_iter().enumerate() {
                    let span = field.span();
                    let strategy = parse_field_strategy(&field.attrs)?;
                    let ident = format_ident!("field_{index}");
                    let ty = &field.ty;

                    if strategy == Strategy::Walk {
                        collect_generics_from_type(ty, generics, &mut used_generics);
                        transforms.push(quote_spanned! { span =>
                            let #ident = #crate_root::Sanitize::sanitize_with(#ident, name, hook);
                        });
                    }
                    bindings.push(ident);
                }

                arms.push(quote! {
                    #name::#variant_ident ( #(#bindings),* ) => {
                        #(#transforms)*
                        #name::#variant_ident ( #(#bindings),* )
                    }
                });
            }
        }
    }

    Ok(DeriveBody {
        body: quote! {
            match self {
                #(#arms),*
            }
        },
        used_generics,
    })
}
