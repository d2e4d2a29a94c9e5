#![cfg(feature = "slog")]

//! Smoke test for the slog provider adapter.

use std::sync::Arc;

use sanitize::slog::SlogProvider;
use sanitize::{Logger, Metrics};

#[test]
fn log_calls_flow_through_a_slog_logger() {
    let root = slog::Logger::root(slog::Discard, slog::o!());
    let logger = Logger::new(Arc::new(SlogProvider::new(root)));

    let logger = logger.with_field("password", "secret");
    logger.debug("d");
    logger.info("i");
    logger.warn("w");
    logger.error_report("e");
    logger.record(Metrics::new());
    logger.record_event("signup", Metrics::new());
}
