//! Logger decoration, provider dispatch, and call recording.

use std::sync::Arc;

use serde_json::json;

use sanitize::{Fields, Level, LogCall, Logger, MemoryProvider, Metrics, PLACEHOLDER};

fn fields(entries: serde_json::Value) -> Fields {
    match entries {
        serde_json::Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

fn recording_logger() -> (Arc<MemoryProvider>, Logger) {
    let provider = Arc::new(MemoryProvider::new());
    (provider.clone(), Logger::new(provider))
}

#[test]
fn with_field_sanitizes_its_data() {
    let (_, logger) = recording_logger();
    let logger = logger.with_field("password", "secret");
    assert_eq!(logger.fields()["password"], PLACEHOLDER);
}

#[test]
fn with_fields_sanitizes_its_data() {
    let (_, logger) = recording_logger();
    let logger = logger.with_fields(fields(json!({
        "password": "secret",
        "greeting": "hello",
        "s": { "token": "foo", "addr": "foo@bar.com" },
    })));

    assert_eq!(
        logger.fields(),
        &fields(json!({
            "password": PLACEHOLDER,
            "greeting": "hello",
            "s": { "token": PLACEHOLDER, "addr": PLACEHOLDER },
        }))
    );
}

#[test]
fn providers_receive_the_sanitized_fields() {
    let (provider, logger) = recording_logger();
    logger
        .with_field("password", "secret")
        .info("user logged in");

    let calls = provider.calls();
    assert_eq!(
        calls,
        vec![LogCall::Message {
            level: Level::Info,
            report: false,
            message: "user logged in".to_string(),
            fields: fields(json!({ "password": PLACEHOLDER })),
        }]
    );
}

#[test]
fn report_variants_set_the_report_flag() {
    let (provider, logger) = recording_logger();
    logger.error("plain");
    logger.error_report("reported");

    match provider.calls().as_slice() {
        [LogCall::Message { report: false, level: Level::Error, .. }, LogCall::Message { report: true, message, .. }] =>
        {
            assert_eq!(message, "reported");
        }
        calls => panic!("unexpected calls: {calls:?}"),
    }
}

#[test]
fn every_level_dispatches() {
    let (provider, logger) = recording_logger();
    logger.debug("d");
    logger.info("i");
    logger.warn("w");
    logger.error("e");

    let levels: Vec<Level> = provider
        .calls()
        .into_iter()
        .map(|call| match call {
            LogCall::Message { level, .. } => level,
            other => panic!("unexpected call: {other:?}"),
        })
        .collect();
    assert_eq!(
        levels,
        vec![Level::Debug, Level::Info, Level::Warn, Level::Error]
    );
}

#[test]
fn record_sanitizes_metrics() {
    let (provider, logger) = recording_logger();

    let mut metrics = Metrics::new();
    metrics.insert("duration_ms".to_string(), json!(12));
    metrics.insert("db_url".to_string(), json!("postgres://u:p@db/app"));
    logger.record(metrics);

    assert_eq!(
        provider.calls(),
        vec![LogCall::Metrics {
            event_name: None,
            metrics: fields(json!({
                "duration_ms": 12,
                "db_url": PLACEHOLDER,
            })),
        }]
    );
}

#[test]
fn record_event_carries_the_event_name() {
    let (provider, logger) = recording_logger();
    logger.record_event("signup", Metrics::new());

    assert_eq!(
        provider.calls(),
        vec![LogCall::Metrics {
            event_name: Some("signup".to_string()),
            metrics: Metrics::new(),
        }]
    );
}

#[test]
fn chained_providers_both_receive_calls() {
    let inner = Arc::new(MemoryProvider::new());
    let outer = Arc::new(MemoryProvider::chaining_to(inner.clone()));
    let logger = Logger::new(outer.clone());

    logger.info("hello");

    assert_eq!(outer.calls().len(), 1);
    assert_eq!(outer.calls(), inner.calls());
}

#[test]
fn a_logger_hook_overrides_the_default_pipeline() {
    let (_, logger) = recording_logger();
    let logger = logger.with_hook(Arc::new(|name: &str, _value: &str| -> Option<String> {
        (name == "password").then(|| "len:6".to_string())
    }));

    let logger = logger
        .with_field("password", "secret")
        .with_field("token", "abcdef");
    assert_eq!(logger.fields()["password"], "len:6");
    assert_eq!(logger.fields()["token"], PLACEHOLDER);
}
