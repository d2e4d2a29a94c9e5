//! The sanitizing copier: a deep, by-value traversal over arbitrary shapes.
//!
//! `Sanitize` is implemented here for the standard value-shape categories:
//!
//! - indirection (`Option`, `Box`): recurse into the referent and re-wrap;
//!   `None` stays `None`
//! - sequences (`Vec`, arrays, `VecDeque`): recurse elementwise, inheriting
//!   the enclosing name context
//! - mappings (`HashMap`, `BTreeMap`, `serde_json::Map`): a string-typed key
//!   becomes the name context for its value, any other key type resets the
//!   context to empty
//! - strings (`String`, `Cow<str>`): the terminal case, routed through the
//!   pipeline with the current name context
//! - everything else (numbers, bool, char, unit): copied as-is
//!
//! `serde_json::Value` is the open-shape path: values whose type is only
//! known at runtime (the fields bag of a log call, a parsed payload) traverse
//! by matching the variant, recursing, and re-wrapping in the same variant.
//!
//! Structs and enums get their implementations from `#[derive(Sanitize)]`,
//! which recurses into each field under the field's own identifier.
//!
//! The traversal does not detect cycles, and none are constructible: there
//! are intentionally no implementations for `Rc`, `Arc`, or interior
//! mutability cells, so every sanitizable value is a finite tree by
//! ownership.

use std::{
    borrow::Cow,
    collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque},
    hash::{BuildHasher, Hash},
    marker::PhantomData,
};

use serde_json::{Map as JsonMap, Value as JsonValue};

use super::pipeline::{sanitize_string, SanitizeHook};

/// A value that can be deep-copied with every reachable string passed through
/// the sanitization pipeline.
///
/// `name` is the name context: the identifier of the immediately enclosing
/// field or map key, used by the pipeline's name-pattern stage. It is never a
/// dotted path; each struct field and string map key replaces it wholesale,
/// while sequences and wrappers pass it through.
///
/// Implementations consume `self` and return the transformed value. Use
/// [`sanitize`] or [`Sanitized`] for the copying entry points that leave the
/// original untouched.
pub trait Sanitize: Sized {
    /// Transforms this value, routing every string leaf through the pipeline
    /// under the given name context.
    #[must_use]
    fn sanitize_with(self, name: &str, hook: Option<&dyn SanitizeHook>) -> Self;
}

/// Deep-copies `value` with every sensitive string redacted.
///
/// The input is never mutated; the returned copy is fully independent. Pass a
/// hook to override or extend the default pipeline, or `None` for the default
/// stages only.
#[must_use]
pub fn sanitize<T>(value: &T, hook: Option<&dyn SanitizeHook>) -> T
where
    T: Sanitize + Clone,
{
    value.clone().sanitize_with("", hook)
}

/// Convenience entry points for sanitizing without spelling out the hook
/// argument.
///
/// Blanket-implemented for every `Sanitize + Clone` type.
pub trait Sanitized: Sanitize + Clone {
    /// Returns a sanitized deep copy using the default pipeline.
    #[must_use]
    fn sanitized(&self) -> Self {
        self.clone().sanitize_with("", None)
    }

    /// Returns a sanitized deep copy, consulting `hook` before the default
    /// stages.
    #[must_use]
    fn sanitized_with(&self, hook: &dyn SanitizeHook) -> Self {
        self.clone().sanitize_with("", Some(hook))
    }
}

impl<T> Sanitized for T where T: Sanitize + Clone {}

/// Map keys that may contribute a name context.
///
/// String-like keys yield themselves; any other key type yields the empty
/// context, so values under numeric or boolean keys are sanitized by content
/// only.
pub trait SanitizeKey {
    /// The name context this key provides for its value.
    fn name_context(&self) -> &str;
}

impl SanitizeKey for String {
    fn name_context(&self) -> &str {
        self
    }
}

impl SanitizeKey for &str {
    fn name_context(&self) -> &str {
        self
    }
}

impl SanitizeKey for Cow<'_, str> {
    fn name_context(&self) -> &str {
        self.as_ref()
    }
}

macro_rules! impl_sanitize_key_unnamed {
    ($($ty:ty),* $(,)?) => {
        $(
            impl SanitizeKey for $ty {
                fn name_context(&self) -> &str {
                    ""
                }
            }
        )*
    };
}

impl_sanitize_key_unnamed!(bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

// Terminal case: strings run the pipeline. Empty strings are the type's zero
// value and are skipped, so all-default composites sanitize to equal
// all-default composites.
impl Sanitize for String {
    fn sanitize_with(self, name: &str, hook: Option<&dyn SanitizeHook>) -> Self {
        if self.is_empty() {
            return self;
        }
        sanitize_string(name, &self, hook)
    }
}

impl Sanitize for Cow<'_, str> {
    fn sanitize_with(self, name: &str, hook: Option<&dyn SanitizeHook>) -> Self {
        if self.is_empty() {
            return self;
        }
        let sanitized = sanitize_string(name, self.as_ref(), hook);
        if sanitized == self.as_ref() {
            self
        } else {
            Cow::Owned(sanitized)
        }
    }
}

// Everything that is not a string and cannot be traversed is copied as-is.
macro_rules! impl_sanitize_terminal {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Sanitize for $ty {
                fn sanitize_with(self, _name: &str, _hook: Option<&dyn SanitizeHook>) -> Self {
                    self
                }
            }
        )*
    };
}

impl_sanitize_terminal!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, ()
);

impl<T: ?Sized> Sanitize for PhantomData<T> {
    fn sanitize_with(self, _name: &str, _hook: Option<&dyn SanitizeHook>) -> Self {
        self
    }
}

impl<T> Sanitize for Option<T>
where
    T: Sanitize,
{
    fn sanitize_with(self, name: &str, hook: Option<&dyn SanitizeHook>) -> Self {
        self.map(|value| value.sanitize_with(name, hook))
    }
}

impl<T> Sanitize for Box<T>
where
    T: Sanitize,
{
    fn sanitize_with(self, name: &str, hook: Option<&dyn SanitizeHook>) -> Self {
        Box::new((*self).sanitize_with(name, hook))
    }
}

impl<T, E> Sanitize for Result<T, E>
where
    T: Sanitize,
    E: Sanitize,
{
    fn sanitize_with(self, name: &str, hook: Option<&dyn SanitizeHook>) -> Self {
        match self {
            Ok(value) => Ok(value.sanitize_with(name, hook)),
            Err(err) => Err(err.sanitize_with(name, hook)),
        }
    }
}

impl<T> Sanitize for Vec<T>
where
    T: Sanitize,
{
    fn sanitize_with(self, name: &str, hook: Option<&dyn SanitizeHook>) -> Self {
        self.into_iter()
            .map(|value| value.sanitize_with(name, hook))
            .collect()
    }
}

impl<T> Sanitize for VecDeque<T>
where
    T: Sanitize,
{
    fn sanitize_with(self, name: &str, hook: Option<&dyn SanitizeHook>) -> Self {
        self.into_iter()
            .map(|value| value.sanitize_with(name, hook))
            .collect()
    }
}

impl<T, const N: usize> Sanitize for [T; N]
where
    T: Sanitize,
{
    fn sanitize_with(self, name: &str, hook: Option<&dyn SanitizeHook>) -> Self {
        self.map(|value| value.sanitize_with(name, hook))
    }
}

impl<K, V, S> Sanitize for HashMap<K, V, S>
where
    K: SanitizeKey + Hash + Eq,
    V: Sanitize,
    S: BuildHasher + Clone,
{
    fn sanitize_with(self, _name: &str, hook: Option<&dyn SanitizeHook>) -> Self {
        let hasher = self.hasher().clone();
        let mut result = HashMap::with_capacity_and_hasher(self.len(), hasher);
        for (key, value) in self {
            let value = value.sanitize_with(key.name_context(), hook);
            result.insert(key, value);
        }
        result
    }
}

impl<K, V> Sanitize for BTreeMap<K, V>
where
    K: SanitizeKey + Ord,
    V: Sanitize,
{
    fn sanitize_with(self, _name: &str, hook: Option<&dyn SanitizeHook>) -> Self {
        self.into_iter()
            .map(|(key, value)| {
                let value = value.sanitize_with(key.name_context(), hook);
                (key, value)
            })
            .collect()
    }
}

impl<T, S> Sanitize for HashSet<T, S>
where
    T: Sanitize + Hash + Eq,
    S: BuildHasher + Clone,
{
    fn sanitize_with(self, name: &str, hook: Option<&dyn SanitizeHook>) -> Self {
        let hasher = self.hasher().clone();
        let mut result = HashSet::with_capacity_and_hasher(self.len(), hasher);
        result.extend(
            self.into_iter()
                .map(|value| value.sanitize_with(name, hook)),
        );
        result
    }
}

impl<T> Sanitize for BTreeSet<T>
where
    T: Sanitize + Ord,
{
    fn sanitize_with(self, name: &str, hook: Option<&dyn SanitizeHook>) -> Self {
        self.into_iter()
            .map(|value| value.sanitize_with(name, hook))
            .collect()
    }
}

// The open-shape path: a JSON value is the runtime stand-in for "any value",
// traversed by variant. Object keys become the name context for their values.
impl Sanitize for JsonValue {
    fn sanitize_with(self, name: &str, hook: Option<&dyn SanitizeHook>) -> Self {
        match self {
            JsonValue::Null => JsonValue::Null,
            JsonValue::String(value) => JsonValue::String(value.sanitize_with(name, hook)),
            JsonValue::Array(items) => JsonValue::Array(
                items
                    .into_iter()
                    .map(|item| item.sanitize_with(name, hook))
                    .collect(),
            ),
            JsonValue::Object(entries) => JsonValue::Object(entries.sanitize_with(name, hook)),
            other @ (JsonValue::Bool(_) | JsonValue::Number(_)) => other,
        }
    }
}

impl Sanitize for JsonMap<String, JsonValue> {
    fn sanitize_with(self, _name: &str, hook: Option<&dyn SanitizeHook>) -> Self {
        self.into_iter()
            .map(|(key, value)| {
                let value = value.sanitize_with(key.as_str(), hook);
                (key, value)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashMap};

    use serde_json::{json, Value};

    use super::{sanitize, Sanitize, Sanitized};
    use crate::PLACEHOLDER;

    #[test]
    fn empty_string_is_skipped() {
        let value = String::new();
        assert_eq!(value.sanitize_with("password", None), "");
    }

    #[test]
    fn named_string_is_redacted() {
        let value = "secret".to_string();
        assert_eq!(value.sanitize_with("password", None), PLACEHOLDER);
    }

    #[test]
    fn unnamed_string_passes_through() {
        let value = "hello".to_string();
        assert_eq!(value.sanitize_with("greeting", None), "hello");
    }

    #[test]
    fn string_keys_become_name_context() {
        let mut map = HashMap::new();
        map.insert("password".to_string(), "secret".to_string());
        map.insert("hello".to_string(), "world".to_string());

        let sanitized = map.sanitize_with("", None);
        assert_eq!(sanitized["password"], PLACEHOLDER);
        assert_eq!(sanitized["hello"], "world");
    }

    #[test]
    fn int_keys_reset_name_context() {
        let mut map = HashMap::new();
        map.insert(1, "hello".to_string());
        map.insert(2, "world".to_string());

        let sanitized = map.sanitize_with("password", None);
        assert_eq!(sanitized[&1], "hello");
        assert_eq!(sanitized[&2], "world");
    }

    #[test]
    fn sequences_inherit_name_context() {
        let values = vec!["secret".to_string(), "moo".to_string()];
        let sanitized = values.sanitize_with("password", None);
        assert_eq!(sanitized, vec![PLACEHOLDER, PLACEHOLDER]);
    }

    #[test]
    fn arrays_preserve_length() {
        let values = ["foo".to_string(), "foo@bar.com".to_string()];
        let sanitized = values.sanitize_with("", None);
        assert_eq!(sanitized, ["foo".to_string(), PLACEHOLDER.to_string()]);
    }

    #[test]
    fn option_none_stays_none() {
        let value: Option<String> = None;
        assert_eq!(value.sanitize_with("password", None), None);
    }

    #[test]
    fn boxed_values_are_rewrapped() {
        let value = Box::new("secret".to_string());
        assert_eq!(*value.sanitize_with("password", None), PLACEHOLDER);
    }

    #[test]
    fn json_value_traversal() {
        let value = json!({
            "password": "secret",
            "greeting": "hello",
            "nested": { "token": "abcdef", "pi": 3.14 },
            "items": ["foo@bar.com", "plain"],
        });

        let sanitized = value.sanitize_with("", None);
        assert_eq!(
            sanitized,
            json!({
                "password": PLACEHOLDER,
                "greeting": "hello",
                "nested": { "token": PLACEHOLDER, "pi": 3.14 },
                "items": [PLACEHOLDER, "plain"],
            })
        );
    }

    #[test]
    fn json_null_stays_null() {
        assert_eq!(Value::Null.sanitize_with("password", None), Value::Null);
    }

    #[test]
    fn copy_is_independent_of_input() {
        let mut original = BTreeMap::new();
        original.insert("password".to_string(), "secret".to_string());

        let sanitized = sanitize(&original, None);
        assert_eq!(original["password"], "secret");
        assert_eq!(sanitized["password"], PLACEHOLDER);
    }

    #[test]
    fn sanitized_extension_matches_free_function() {
        let mut map = BTreeMap::new();
        map.insert("token".to_string(), "abcdef".to_string());
        assert_eq!(map.sanitized(), sanitize(&map, None));
    }
}
