//! Adapter for emitting log calls through `slog`.
//!
//! This module connects [`crate::log::LogProvider`] with `slog` by forwarding
//! messages to a `slog::Logger` and emitting the attached fields as a single
//! structured JSON value via `slog`'s nested-value support.
//!
//! The fields a provider receives are already sanitized by the [`Logger`]
//! that attached them; this adapter only handles emission.
//!
//! It does not configure `slog` drains or define sanitization policy.
//!
//! [`Logger`]: crate::log::Logger

use serde_json::Value as JsonValue;

use crate::log::{Fields, Level, LogProvider, Metrics};

/// Forwards log calls to a `slog::Logger`.
pub struct SlogProvider {
    logger: slog::Logger,
}

impl SlogProvider {
    pub fn new(logger: slog::Logger) -> Self {
        Self { logger }
    }
}

fn nested(fields: &Fields) -> slog::Serde<JsonValue> {
    slog::Serde(JsonValue::Object(fields.clone()))
}

impl LogProvider for SlogProvider {
    fn log(&self, level: Level, report: bool, message: &str, fields: &Fields) {
        let fields = nested(fields);
        match level {
            Level::Error => {
                slog::error!(self.logger, "{}", message; "report" => report, "fields" => fields);
            }
            Level::Warn => {
                slog::warn!(self.logger, "{}", message; "report" => report, "fields" => fields);
            }
            Level::Info => {
                slog::info!(self.logger, "{}", message; "report" => report, "fields" => fields);
            }
            Level::Debug => {
                slog::debug!(self.logger, "{}", message; "report" => report, "fields" => fields);
            }
        }
    }

    fn record(&self, metrics: &Metrics) {
        slog::info!(self.logger, "metrics"; "metrics" => nested(metrics));
    }

    fn record_event(&self, event_name: &str, metrics: &Metrics) {
        slog::info!(self.logger, "metrics"; "event" => event_name, "metrics" => nested(metrics));
    }
}
