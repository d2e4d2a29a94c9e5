//! Deep value sanitization for structured logging.
//!
//! This crate separates:
//! - **Traversal**: a deep copy of an arbitrarily nested value, driven by the
//!   [`Sanitize`] trait.
//! - **Policy**: the string pipeline deciding what gets redacted, driven by
//!   name context and value content.
//!
//! The derive macro walks your data and runs every string leaf through the
//! pipeline when you call [`sanitize()`] or [`Sanitized::sanitized`].
//!
//! Key rules:
//! - A string is judged by its *name context* (field name, map key, query
//!   parameter name) and by its content (URL, email address).
//! - Redacted values become the fixed placeholder [`PLACEHOLDER`].
//! - Empty strings and non-string scalars pass through unchanged.
//! - `#[sanitize(skip)]` leaves a field untouched.
//!
//! A custom [`SanitizeHook`] runs before the default stages and applies
//! recursively, including inside URL query strings.
//!
//! What this crate does:
//! - defines the [`Sanitize`] traversal trait and implementations for
//!   standard containers and `serde_json::Value`
//! - implements the four-stage string pipeline (hook, URL, email, name)
//! - provides the [`log`] host interface whose [`log::Logger`] sanitizes
//!   fields as they are attached
//! - provides integrations behind feature flags (e.g. `slog`)
//!
//! What it does not do:
//! - perform I/O
//! - detect reference cycles (the traversal works on owned tree-shaped data)
//!
//! The `Sanitize` derive macro lives in `sanitize-derive` and is re-exported
//! from the crate root.

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
    clippy::enum_glob_use,
    clippy::struct_excessive_bools,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::option_if_let_else
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

pub use sanitize_derive::Sanitize;

// Module declarations
pub mod log;
mod sanitizer;
#[cfg(feature = "slog")]
pub mod slog;

// Re-exports
pub use log::{Fields, Level, LogCall, LogProvider, Logger, MemoryProvider, Metrics};
pub use sanitizer::{sanitize, Sanitize, SanitizeHook, SanitizeKey, Sanitized, PLACEHOLDER};
