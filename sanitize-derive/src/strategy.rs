//! Parsing of `#[sanitize(...)]` field attributes.

use syn::{spanned::Spanned, Attribute, Result};

/// Field traversal strategy based on `#[sanitize(...)]` attributes.
///
/// Every field is walked unless it opts out: the traversal contract is that
/// all reachable strings pass through the pipeline, so skipping is the
/// exception rather than the rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Strategy {
    /// Default: recurse into the field.
    Walk,
    /// `#[sanitize(skip)]`: pass the field through untouched.
    ///
    /// The field type does not need to implement `Sanitize`, which is how
    /// external types (timestamps, decimals) fit into a derived struct.
    Skip,
}

pub(crate) fn parse_field_strategy(attrs: &[Attribute]) -> Result<Strategy> {
    let mut strategy = Strategy::Walk;
    for attr in attrs {
        if !attr.path().is_ident("sanitize") {
            continue;
        }

        let mut recognized = false;
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                recognized = true;
                Ok(())
            } else {
                Err(meta.error("unsupported `sanitize` attribute; expected `skip`"))
            }
        })?;

        if !recognized {
            return Err(syn::Error::new(attr.span(), "expected `#[sanitize(skip)]`"));
        }
        strategy = Strategy::Skip;
    }
    Ok(strategy)
}
