//! Unit tests for error.rs
//!
//! Display/Debug/Clone for every variant, and the logging error macros.

use crate::error::{Error, Result};
use crate::galaxy3d::Engine;
use crate::log::{LogEntry, LogSeverity, Logger};
use serial_test::serial;
use std::sync::{Arc, Mutex};

// ============================================================================
// ERROR DISPLAY TESTS
// ============================================================================

#[test]
fn test_already_exists_display() {
    let err = Error::AlreadyExists("Camera 'main' already exists".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Already exists"));
    assert!(display.contains("main"));
}

#[test]
fn test_not_found_display() {
    let err = Error::NotFound("Camera 'shadow' does not exist".to_string());
    assert!(format!("{}", err).starts_with("Not found"));
}

#[test]
fn test_capacity_exceeded_display() {
    let err = Error::CapacityExceeded("max Camera limit reached (4)".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Capacity exceeded"));
    assert!(display.contains("(4)"));
}

#[test]
fn test_index_out_of_range_display() {
    let err = Error::IndexOutOfRange("multiview index 2 >= 2".to_string());
    assert!(format!("{}", err).contains("Index out of range: multiview index 2"));
}

#[test]
fn test_invalid_configuration_display() {
    let err = Error::InvalidConfiguration("width must be non-zero".to_string());
    assert!(format!("{}", err).contains("Invalid configuration"));
}

#[test]
fn test_out_of_memory_display() {
    assert_eq!(format!("{}", Error::OutOfMemory), "Out of GPU memory");
}

#[test]
fn test_backend_and_initialization_display() {
    let backend = Error::BackendError("device lost".to_string());
    assert!(format!("{}", backend).contains("Backend error: device lost"));

    let init = Error::InitializationFailed("Engine not initialized".to_string());
    assert!(format!("{}", init).contains("Initialization failed"));
}

// ============================================================================
// ERROR TRAIT IMPLEMENTATIONS
// ============================================================================

#[test]
fn test_error_is_std_error() {
    let err = Error::OutOfMemory;
    let _: &dyn std::error::Error = &err;
}

#[test]
fn test_error_debug_names_variant() {
    assert!(format!("{:?}", Error::NotFound("x".into())).contains("NotFound"));
    assert!(format!("{:?}", Error::CapacityExceeded("x".into())).contains("CapacityExceeded"));
    assert!(format!("{:?}", Error::IndexOutOfRange("x".into())).contains("IndexOutOfRange"));
}

#[test]
fn test_error_clone() {
    let err = Error::InvalidConfiguration("max_views 7".to_string());
    let cloned = err.clone();
    assert_eq!(format!("{}", err), format!("{}", cloned));
}

// ============================================================================
// ERROR MACROS
// ============================================================================

struct CapturingLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl Logger for CapturingLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

#[test]
#[serial]
fn test_engine_err_builds_variant_and_logs() {
    let entries = Arc::new(Mutex::new(Vec::new()));
    Engine::set_logger(CapturingLogger { entries: entries.clone() });

    let err = crate::engine_err!("galaxy3d::Test", NotFound, "Camera '{}' does not exist", "reflection");
    assert!(matches!(err, Error::NotFound(ref msg) if msg == "Camera 'reflection' does not exist"));

    Engine::reset_logger();

    // Other tests may log concurrently; keep only this test's source
    let captured: Vec<LogEntry> = entries
        .lock()
        .unwrap()
        .iter()
        .filter(|e| e.source == "galaxy3d::Test")
        .cloned()
        .collect();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].severity, LogSeverity::Error);
    assert_eq!(captured[0].source, "galaxy3d::Test");
    assert!(captured[0].file.is_some());
    assert!(captured[0].line.is_some());
}

#[test]
#[serial]
fn test_engine_bail_returns_early() {
    fn check(value: u32) -> Result<u32> {
        if value > 3 {
            crate::engine_bail!("galaxy3d::Test", IndexOutOfRange, "{} > 3", value);
        }
        Ok(value)
    }

    assert_eq!(check(2).unwrap(), 2);
    assert!(matches!(check(4), Err(Error::IndexOutOfRange(_))));
}

#[test]
fn test_error_propagation_with_question_mark() {
    fn inner() -> Result<i32> {
        Err(Error::OutOfMemory)
    }

    fn outer() -> Result<i32> {
        inner()?;
        Ok(42)
    }

    assert!(matches!(outer(), Err(Error::OutOfMemory)));
}
