//! The host logging interface.
//!
//! This module is the seam between call sites and concrete log backends. A
//! [`Logger`] carries a bag of structured fields and forwards log calls to a
//! [`LogProvider`]. Fields and metrics are sanitized when they are attached,
//! via [`with_field`](Logger::with_field) / [`with_fields`](Logger::with_fields)
//! or [`record`](Logger::record), so providers only ever see sanitized data.
//!
//! [`MemoryProvider`] records every call it receives and can forward to a
//! next provider, which is how tests assert on what would have been emitted.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::{sanitize, SanitizeHook};

/// Structured data attached to log messages.
pub type Fields = JsonMap<String, JsonValue>;

/// Measurements attached to metric recordings.
pub type Metrics = JsonMap<String, JsonValue>;

/// Log severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A concrete log backend.
///
/// Providers receive fields and metrics that have already been sanitized by
/// the [`Logger`]; they are responsible only for emission.
///
/// The `report` flag marks a message as worth surfacing to an error-reporting
/// backend in addition to the regular log stream. Providers without such a
/// backend are free to ignore it.
pub trait LogProvider: Send + Sync {
    fn log(&self, level: Level, report: bool, message: &str, fields: &Fields);

    /// Records anonymous metrics.
    fn record(&self, metrics: &Metrics);

    /// Records metrics attributed to a named event.
    fn record_event(&self, event_name: &str, metrics: &Metrics);
}

/// A handle combining a provider, accumulated fields, and an optional custom
/// sanitize hook.
///
/// `Logger` is cheap to clone and immutable: the `with_*` methods return
/// derived loggers, leaving the original untouched. Field values are
/// sanitized at attachment time, so a logger can be passed around freely
/// without re-sanitizing on every emission.
#[derive(Clone)]
pub struct Logger {
    provider: Arc<dyn LogProvider>,
    fields: Fields,
    hook: Option<Arc<dyn SanitizeHook + Send + Sync>>,
}

impl Logger {
    pub fn new(provider: Arc<dyn LogProvider>) -> Self {
        Self {
            provider,
            fields: Fields::new(),
            hook: None,
        }
    }

    /// Returns a logger applying `hook` at the top of the sanitization
    /// pipeline for all subsequently attached fields and metrics.
    #[must_use]
    pub fn with_hook(mut self, hook: Arc<dyn SanitizeHook + Send + Sync>) -> Self {
        self.hook = Some(hook);
        self
    }

    pub fn provider(&self) -> &Arc<dyn LogProvider> {
        &self.provider
    }

    /// The accumulated, already-sanitized fields.
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Returns a derived logger with one additional field, sanitized under
    /// `key` as its name context.
    #[must_use]
    pub fn with_field(&self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        let mut fields = Fields::new();
        fields.insert(key.into(), value.into());
        self.with_fields(fields)
    }

    /// Returns a derived logger with `fields` merged in, new keys overriding
    /// existing ones. Values are sanitized before they are stored.
    #[must_use]
    pub fn with_fields(&self, fields: Fields) -> Self {
        let sanitized = sanitize(&fields, self.hook_ref());
        let mut logger = self.clone();
        logger.fields.extend(sanitized);
        logger
    }

    pub fn log(&self, level: Level, report: bool, message: &str) {
        self.provider.log(level, report, message, &self.fields);
    }

    pub fn error(&self, message: &str) {
        self.log(Level::Error, false, message);
    }

    pub fn error_report(&self, message: &str) {
        self.log(Level::Error, true, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(Level::Warn, false, message);
    }

    pub fn warn_report(&self, message: &str) {
        self.log(Level::Warn, true, message);
    }

    pub fn info(&self, message: &str) {
        self.log(Level::Info, false, message);
    }

    pub fn info_report(&self, message: &str) {
        self.log(Level::Info, true, message);
    }

    pub fn debug(&self, message: &str) {
        self.log(Level::Debug, false, message);
    }

    pub fn debug_report(&self, message: &str) {
        self.log(Level::Debug, true, message);
    }

    /// Sanitizes `metrics` and records them through the provider.
    pub fn record(&self, metrics: Metrics) {
        self.provider.record(&sanitize(&metrics, self.hook_ref()));
    }

    /// Sanitizes `metrics` and records them under `event_name`.
    pub fn record_event(&self, event_name: &str, metrics: Metrics) {
        self.provider
            .record_event(event_name, &sanitize(&metrics, self.hook_ref()));
    }

    fn hook_ref(&self) -> Option<&dyn SanitizeHook> {
        self.hook.as_deref().map(|hook| hook as &dyn SanitizeHook)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("fields", &self.fields)
            .field("hook", &self.hook.is_some())
            .finish_non_exhaustive()
    }
}

/// One call received by a [`MemoryProvider`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogCall {
    Message {
        level: Level,
        report: bool,
        message: String,
        fields: Fields,
    },
    Metrics {
        event_name: Option<String>,
        metrics: Metrics,
    },
}

/// A provider that records every call, optionally forwarding to a next
/// provider in a chain.
#[derive(Default)]
pub struct MemoryProvider {
    calls: Mutex<Vec<LogCall>>,
    next: Option<Arc<dyn LogProvider>>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// A recording provider that also forwards every call to `next`.
    pub fn chaining_to(next: Arc<dyn LogProvider>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            next: Some(next),
        }
    }

    /// A snapshot of the calls received so far.
    pub fn calls(&self) -> Vec<LogCall> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<LogCall>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LogProvider for MemoryProvider {
    fn log(&self, level: Level, report: bool, message: &str, fields: &Fields) {
        self.lock().push(LogCall::Message {
            level,
            report,
            message: message.to_string(),
            fields: fields.clone(),
        });
        if let Some(next) = &self.next {
            next.log(level, report, message, fields);
        }
    }

    fn record(&self, metrics: &Metrics) {
        self.lock().push(LogCall::Metrics {
            event_name: None,
            metrics: metrics.clone(),
        });
        if let Some(next) = &self.next {
            next.record(metrics);
        }
    }

    fn record_event(&self, event_name: &str, metrics: &Metrics) {
        self.lock().push(LogCall::Metrics {
            event_name: Some(event_name.to_string()),
            metrics: metrics.clone(),
        });
        if let Some(next) = &self.next {
            next.record_event(event_name, metrics);
        }
    }
}
