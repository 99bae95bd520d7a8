//! Unit tests for the Engine logging API
//!
//! IMPORTANT: LOGGER is a global OnceLock shared across all tests.
//! Every test that swaps the logger is marked #[serial].

use crate::horizon3d::{Engine, Error, Result};
use crate::horizon3d::log::{Logger, LogEntry, LogSeverity};
use std::sync::{Arc, Mutex};
use serial_test::serial;

// ============================================================================
// TEST HELPERS
// ============================================================================

/// Test logger that captures entries from test sources only
///
/// Unit tests of other modules log concurrently through the same global
/// logger; filtering on the source keeps the counts deterministic.
struct TestLogger {
    entries: Arc<Mutex<Vec<String>>>,
}

impl TestLogger {
    fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        if !entry.source.ends_with("test") {
            return;
        }
        let location = match (entry.file, entry.line) {
            (Some(file), Some(line)) => format!(" @{}:{}", file, line),
            _ => String::new(),
        };
        self.entries.lock().unwrap().push(format!(
            "{:?} [{}] {}{}",
            entry.severity, entry.source, entry.message, location
        ));
    }
}

// ============================================================================
// LOGGING API TESTS
// ============================================================================

#[test]
#[serial]
fn test_default_logger_logs_without_panic() {
    Engine::reset_logger();

    Engine::log(LogSeverity::Info, "test", "Test message".to_string());
    Engine::log(LogSeverity::Trace, "test", "Filtered message".to_string());
    Engine::log_detailed(LogSeverity::Error, "test", "Error message".to_string(), "test.rs", 1);
}

#[test]
#[serial]
fn test_set_custom_logger() {
    let test_logger = TestLogger::new();
    let entries_ref = test_logger.entries.clone();
    Engine::set_logger(test_logger);

    Engine::log(LogSeverity::Info, "test", "Message 1".to_string());
    Engine::log(LogSeverity::Warn, "test", "Message 2".to_string());

    let entries = entries_ref.lock().unwrap();
    assert_eq!(entries.len(), 2);
    assert!(entries[0].starts_with("Info"));
    assert!(entries[0].contains("Message 1"));
    assert!(entries[1].starts_with("Warn"));
    assert!(entries[1].contains("Message 2"));
    drop(entries);

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_reset_logger_to_default() {
    let test_logger = TestLogger::new();
    let entries_ref = test_logger.entries.clone();
    Engine::set_logger(test_logger);

    Engine::reset_logger();
    Engine::log(LogSeverity::Info, "test", "After reset".to_string());

    // Custom logger should NOT receive this message
    assert!(entries_ref.lock().unwrap().is_empty());
}

#[test]
#[serial]
fn test_log_detailed_with_file_line() {
    let test_logger = TestLogger::new();
    let entries_ref = test_logger.entries.clone();
    Engine::set_logger(test_logger);

    Engine::log_detailed(
        LogSeverity::Error,
        "horizon3d::test",
        "Detailed error".to_string(),
        "test.rs",
        42,
    );

    let entries = entries_ref.lock().unwrap();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].contains("Detailed error"));
    assert!(entries[0].ends_with("@test.rs:42"));
    drop(entries);

    Engine::reset_logger();
}

// ============================================================================
// MACRO TESTS
// ============================================================================

#[test]
#[serial]
fn test_macros_route_through_engine() {
    let test_logger = TestLogger::new();
    let entries_ref = test_logger.entries.clone();
    Engine::set_logger(test_logger);

    crate::engine_trace!("horizon3d::test", "trace {}", 1);
    crate::engine_debug!("horizon3d::test", "debug {}", 2);
    crate::engine_info!("horizon3d::test", "info {}", 3);
    crate::engine_warn!("horizon3d::test", "warn {}", 4);
    crate::engine_error!("horizon3d::test", "error {}", 5);

    let entries = entries_ref.lock().unwrap();
    assert_eq!(entries.len(), 5);
    assert!(entries[0].starts_with("Trace [horizon3d::test] trace 1"));
    assert!(entries[4].starts_with("Error [horizon3d::test] error 5 @"));
    drop(entries);

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_engine_err_logs_and_builds_error() {
    let test_logger = TestLogger::new();
    let entries_ref = test_logger.entries.clone();
    Engine::set_logger(test_logger);

    let err = crate::engine_err!("horizon3d::test", InvalidParameter, "value {} rejected", 7);
    assert_eq!(err, Error::InvalidParameter("value 7 rejected".to_string()));

    let entries = entries_ref.lock().unwrap();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].contains("value 7 rejected"));
    drop(entries);

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_engine_bail_returns_early() {
    fn check(value: f32) -> Result<f32> {
        if value < 0.0 {
            crate::engine_bail!("horizon3d::test", InvalidConfig, "negative value {}", value);
        }
        Ok(value * 2.0)
    }

    let test_logger = TestLogger::new();
    let entries_ref = test_logger.entries.clone();
    Engine::set_logger(test_logger);

    assert_eq!(check(2.0), Ok(4.0));
    assert!(matches!(check(-1.0), Err(Error::InvalidConfig(_))));
    assert_eq!(entries_ref.lock().unwrap().len(), 1);

    Engine::reset_logger();
}
