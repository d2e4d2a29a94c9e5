//! Struct-specific `Sanitize` derivation.
//!
//! This module generates traversal logic for struct fields and collects
//! generic parameters that require trait bounds.

use proc_macro2::TokenStream;
use quote::{format_ident, quote, quote_spanned};
use syn::{spanned::Spanned, DataStruct, Fields, Result};

use crate::{
    generics::collect_generics_from_type,
    strategy::{parse_field_strategy, Strategy},
    DeriveBody,
};

pub(crate) fn derive_struct(
    data: DataStruct,
    generics: &syn::Generics,
    crate_root: &TokenStream,
) -> Result<DeriveBody> {
    match data.fields {
        Fields::Named(fields) => derive_named_struct(fields, generics, crate_root),
        Fields::Unnamed(fields) => derive_unnamed_struct(fields, generics, crate_root),
        Fields::Unit => Ok(DeriveBody {
            body: quote! { self },
            used_generics: Vec::new(),
        }),
    }
}

fn derive_named_struct(
    fields: syn::FieldsNamed,
    generics: &syn::Generics,
    crate_root: &TokenStream,
) -> Result<DeriveBody> {
    let mut bindings = Vec::new();
    let mut transforms = Vec::new();
    let mut used_generics = Vec::new();

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

    Ok(DeriveBody {
        body: quote! {
            let Self { #(#bindings),* } = self;
            #(#transforms)*
            Self { #(#bindings),* }
        },
        used_generics,
    })
}

fn derive_unnamed_struct(
    fields: syn::FieldsUnnamed,
    generics: &syn::Generics,
    crate_root: &TokenStream,
) -> Result<DeriveBody> {
    let mut bindings = Vec::new();
    let mut transforms = Vec::new();
    let mut used_generics = Vec::new();

    for (index, field) in fields.unnamed.into_iter().enumerate() {
        let span = field.span();
        let strategy = parse_field_strategy(&field.attrs)?;
        let ident = format_ident!("field_{index}");
        let ty = &field.ty;

        if strategy == Strategy::Walk {
            collect_generics_from_type(ty, generics, &mut used_generics);
            // Tuple fields have no identifier, so the enclosing name context
            // flows through, the same rule sequence elements follow.
            transforms.push(quote_spanned! { span =>
                let #ident = #crate_root::Sanitize::sanitize_with(#ident, name, hook);
            });
        }
        bindings.push(ident);
    }

    Ok(DeriveBody {
        body: quote! {
            let Self ( #(#bindings),* ) = self;
            #(#transforms)*
            Self ( #(#bindings),* )
        },
        used_generics,
    })
}
