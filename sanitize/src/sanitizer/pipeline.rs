//! The string sanitization pipeline.
//!
//! Every string leaf the copier reaches runs through four ordered stages:
//!
//! 1. **Custom hook**: a caller-supplied override consulted first. If it
//!    handles the value, its result is returned and no default stage runs.
//! 2. **URL stage**: values recognized as URLs by scheme prefix are taken
//!    apart, sanitized component-wise, and reassembled. The result feeds
//!    forward into the remaining stages rather than short-circuiting.
//! 3. **Email stage**: values that parse in full as one or more RFC 5322
//!    address specifications are replaced with the placeholder.
//! 4. **Name-pattern stage**: if the lower-cased name context matches the
//!    fixed sensitive-name table, the whole value is replaced regardless of
//!    content.
//!
//! The pipeline is total: "not handled" is expressed by falling through to
//! the next stage, never by an error.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

use super::url::sanitize_url;

/// Fixed redaction string substituted for any fully-redacted value.
pub const PLACEHOLDER: &str = "----";

/// Caller-supplied override consulted at the top of the pipeline.
///
/// Returning `Some(result)` marks the value as handled: `result` is used
/// verbatim and no default stage runs. Returning `None` falls through to the
/// default stages.
///
/// The hook is threaded through every recursive call site, including the
/// sanitization of URL query maps, so a policy keyed on a query parameter
/// name applies inside reassembled URLs as well.
///
/// Implemented for any `Fn(&str, &str) -> Option<String>` closure.
pub trait SanitizeHook {
    /// Consulted with the current name context and string value.
    fn sanitize(&self, name: &str, value: &str) -> Option<String>;
}

impl<F> SanitizeHook for F
where
    F: Fn(&str, &str) -> Option<String>,
{
    fn sanitize(&self, name: &str, value: &str) -> Option<String> {
        self(name, value)
    }
}

// Patterns are matched against the lower-cased name context.
static NAME_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"^.*password.*$",
        r"^secret.*",
        r"^token$",
        r"^pwd$",
        r"^pass$",
        r"^p$",
        r"^cert(ificate)?$",
        r"^cred(ential)?s?$",
        r"^database$",
        r"^database_url$",
        r"^db$",
        r"^db_url$",
        r"^username$",
        r"^last\s+name$",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("name pattern should compile"))
    .collect()
});

// RFC 5322 addr-spec, restricted to dot-atom forms: atext local part,
// atom domain labels. Notably `:` and `/` before the `@` disqualify a
// value, which keeps stripped-credential URLs out of the email stage.
static ADDR_SPEC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~.-]+@[A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?(\.[A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?)*$")
        .expect("addr-spec pattern should compile")
});

pub(crate) fn sanitize_string(name: &str, value: &str, hook: Option<&dyn SanitizeHook>) -> String {
    if let Some(hook) = hook {
        if let Some(handled) = hook.sanitize(name, value) {
            // The custom hook short-circuits the default stages entirely,
            // which is how implementers override default behavior.
            return handled;
        }
    }

    let mut value = Cow::Borrowed(value);

    // The URL stage cascades: later stages still run on its output.
    if let Some(sanitized) = sanitize_url(&value, hook) {
        value = Cow::Owned(sanitized);
    }

    if let Some(sanitized) = sanitize_email_address(&value) {
        value = Cow::Owned(sanitized);
    }

    if let Some(sanitized) = sanitize_by_name_pattern(name) {
        value = Cow::Owned(sanitized);
    }

    value.into_owned()
}

/// Handles values that parse in full as an email address list.
pub(crate) fn sanitize_email_address(value: &str) -> Option<String> {
    parses_as_address_list(value).then(|| PLACEHOLDER.to_string())
}

/// Handles names matching the sensitive-name table, regardless of value.
pub(crate) fn sanitize_by_name_pattern(name: &str) -> Option<String> {
    let name = name.to_lowercase();
    NAME_PATTERNS
        .iter()
        .any(|pattern| pattern.is_match(&name))
        .then(|| PLACEHOLDER.to_string())
}

fn parses_as_address_list(value: &str) -> bool {
    // An address requires `@` past the first character.
    match value.find('@') {
        Some(position) if position > 0 => {}
        _ => return false,
    }

    match split_address_list(value) {
        Some(items) if !items.is_empty() => items.iter().all(|item| parses_as_address(item)),
        _ => false,
    }
}

/// Splits a comma-separated address list, respecting quoted display names and
/// angle-bracketed addresses. Returns `None` on unbalanced quotes/brackets.
fn split_address_list(value: &str) -> Option<Vec<&str>> {
    let mut items = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut in_brackets = false;

    for (index, ch) in value.char_indices() {
        match ch {
            '"' => in_quotes = !in_quotes,
            '<' if !in_quotes => {
                if in_brackets {
                    return None;
                }
                in_brackets = true;
            }
            '>' if !in_quotes => {
                if !in_brackets {
                    return None;
                }
                in_brackets = false;
            }
            ',' if !in_quotes && !in_brackets => {
                items.push(value[start..index].trim());
                start = index + 1;
            }
            _ => {}
        }
    }

    if in_quotes || in_brackets {
        return None;
    }
    items.push(value[start..].trim());
    Some(items)
}

/// A single mailbox: either a bare addr-spec or `display name <addr-spec>`.
fn parses_as_address(item: &str) -> bool {
    if item.is_empty() {
        return false;
    }

    if let Some(stripped) = item.strip_suffix('>') {
        return match stripped.find('<') {
            Some(position) => ADDR_SPEC.is_match(stripped[position + 1..].trim()),
            None => false,
        };
    }

    ADDR_SPEC.is_match(item)
}
