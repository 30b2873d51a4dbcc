//! Unit tests for the Engine logging facade
//!
//! Tests the global logger slot: installing a custom logger, routing through
//! Engine::log / Engine::log_detailed, the engine_* macros, and resetting.
//!
//! IMPORTANT: LOGGER is a global OnceLock shared across all tests.
//! All tests are marked with #[serial] to run sequentially.

use crate::aurora::Engine;
use crate::aurora::log::{Logger, LogEntry, LogSeverity};
use crate::{engine_debug, engine_error, engine_info, engine_trace, engine_warn};
use std::sync::{Arc, Mutex};
use serial_test::serial;

// ============================================================================
// TEST HELPERS
// ============================================================================

/// Test logger that captures log entries for verification
struct CaptureLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl CaptureLogger {
    fn new() -> (Self, Arc<Mutex<Vec<LogEntry>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                entries: entries.clone(),
            },
            entries,
        )
    }
}

impl Logger for CaptureLogger {
    fn log(&self, entry: &LogEntry) {
        let mut entries = self.entries.lock().unwrap();
        entries.push(entry.clone());
    }
}

// ============================================================================
// LOGGER SLOT TESTS
// ============================================================================

#[test]
#[serial]
fn test_set_logger_captures_entries() {
    let (logger, entries) = CaptureLogger::new();
    Engine::set_logger(logger);

    Engine::log(LogSeverity::Info, "test", "hello".to_string());

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].severity, LogSeverity::Info);
        assert_eq!(captured[0].source, "test");
        assert_eq!(captured[0].message, "hello");
        assert!(captured[0].file.is_none());
        assert!(captured[0].line.is_none());
    }

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_log_all_severities() {
    let (logger, entries) = CaptureLogger::new();
    Engine::set_logger(logger);

    Engine::log(LogSeverity::Trace, "test", "t".to_string());
    Engine::log(LogSeverity::Debug, "test", "d".to_string());
    Engine::log(LogSeverity::Info, "test", "i".to_string());
    Engine::log(LogSeverity::Warn, "test", "w".to_string());
    Engine::log(LogSeverity::Error, "test", "e".to_string());

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 5);
        assert_eq!(captured[0].severity, LogSeverity::Trace);
        assert_eq!(captured[4].severity, LogSeverity::Error);
    }

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_log_detailed_carries_file_and_line() {
    let (logger, entries) = CaptureLogger::new();
    Engine::set_logger(logger);

    Engine::log_detailed(
        LogSeverity::Error,
        "test",
        "boom".to_string(),
        "some_file.rs",
        99,
    );

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].file, Some("some_file.rs"));
        assert_eq!(captured[0].line, Some(99));
    }

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_reset_logger_restores_default() {
    let (logger, entries) = CaptureLogger::new();
    Engine::set_logger(logger);
    Engine::reset_logger();

    // After reset, the capture logger no longer receives entries
    Engine::log(LogSeverity::Info, "test", "ignored".to_string());

    let captured = entries.lock().unwrap();
    assert_eq!(captured.len(), 0);
}

#[test]
#[serial]
fn test_set_logger_replaces_previous_logger() {
    let (logger1, entries1) = CaptureLogger::new();
    let (logger2, entries2) = CaptureLogger::new();

    Engine::set_logger(logger1);
    Engine::log(LogSeverity::Info, "test", "first".to_string());

    Engine::set_logger(logger2);
    Engine::log(LogSeverity::Info, "test", "second".to_string());

    assert_eq!(entries1.lock().unwrap().len(), 1);
    assert_eq!(entries2.lock().unwrap().len(), 1);
    assert_eq!(entries2.lock().unwrap()[0].message, "second");

    Engine::reset_logger();
}

// ============================================================================
// MACRO ROUTING TESTS
// ============================================================================

#[test]
#[serial]
fn test_macros_route_through_engine() {
    let (logger, entries) = CaptureLogger::new();
    Engine::set_logger(logger);

    engine_trace!("test", "trace {}", 1);
    engine_debug!("test", "debug {}", 2);
    engine_info!("test", "info {}", 3);
    engine_warn!("test", "warn {}", 4);
    engine_error!("test", "error {}", 5);

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 5);
        assert_eq!(captured[0].message, "trace 1");
        assert_eq!(captured[2].severity, LogSeverity::Info);
        // Only the error macro includes file:line
        assert!(captured[3].file.is_none());
        assert!(captured[4].file.is_some());
        assert!(captured[4].line.is_some());
    }

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_macro_source_is_preserved() {
    let (logger, entries) = CaptureLogger::new();
    Engine::set_logger(logger);

    engine_info!("aurora::FramePool", "Allocated {} frame slots", 2);

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].source, "aurora::FramePool");
        assert_eq!(captured[0].message, "Allocated 2 frame slots");
    }

    Engine::reset_logger();
}
