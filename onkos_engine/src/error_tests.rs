//! Unit tests for error.rs
//!
//! Tests Error variants, NativeError, conversions and the error macros.

use crate::error::{Error, NativeError, Result};

// ============================================================================
// ERROR DISPLAY TESTS
// ============================================================================

#[test]
fn test_not_found_display() {
    let err = Error::NotFound { path: "cube.obj".to_string(), reason: "no such file".to_string() };
    assert_eq!(format!("{}", err), "Not found: 'cube.obj' (no such file)");
}

#[test]
fn test_malformed_number_display() {
    let err = Error::MalformedNumber { line: 3, token: "1.x".to_string() };
    assert_eq!(format!("{}", err), "Malformed number on line 3: '1.x'");
}

#[test]
fn test_malformed_face_display() {
    let err = Error::MalformedFace { line: 9, reason: "5 corners".to_string() };
    let display = format!("{}", err);
    assert!(display.contains("Malformed face"));
    assert!(display.contains("line 9"));
    assert!(display.contains("5 corners"));
}

#[test]
fn test_creation_error_display_includes_code() {
    let err = Error::creation("cube.vertex", NativeError::new(NativeError::E_OUTOFMEMORY, "out of memory"));
    let display = format!("{}", err);
    assert!(display.contains("cube.vertex"));
    assert!(display.contains("out of memory"));
    assert!(display.contains("0x8007000E"));
}

#[test]
fn test_precondition_error_display() {
    let err = Error::PreconditionError("bind before create".to_string());
    assert_eq!(format!("{}", err), "Precondition error: bind before create");
}

#[test]
fn test_backend_error_display() {
    let err = Error::BackendError("device removed".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Backend error"));
    assert!(display.contains("device removed"));
}

// ============================================================================
// HELPERS
// ============================================================================

#[test]
fn test_creation_keeps_native_code() {
    let err = Error::creation("buffer", NativeError::new(NativeError::E_INVALIDARG, "bad size"));
    assert_eq!(err.native_code(), Some(NativeError::E_INVALIDARG));
    match err {
        Error::CreationError { resource, message, .. } => {
            assert_eq!(resource, "buffer");
            assert_eq!(message, "bad size");
        }
        other => panic!("Expected CreationError, got {:?}", other),
    }
}

#[test]
fn test_native_code_only_for_creation_errors() {
    assert_eq!(Error::PreconditionError("x".to_string()).native_code(), None);
    assert_eq!(Error::BackendError("x".to_string()).native_code(), None);
}

#[test]
fn test_is_parse_error() {
    assert!(Error::NotFound { path: String::new(), reason: String::new() }.is_parse_error());
    assert!(Error::MalformedNumber { line: 1, token: String::new() }.is_parse_error());
    assert!(Error::MalformedFace { line: 1, reason: String::new() }.is_parse_error());
    assert!(!Error::PreconditionError(String::new()).is_parse_error());
    assert!(!Error::BackendError(String::new()).is_parse_error());
}

#[test]
fn test_native_error_becomes_backend_error() {
    let err: Error = NativeError::new(NativeError::E_FAIL, "draw failed").into();
    match err {
        Error::BackendError(msg) => {
            assert!(msg.contains("draw failed"));
            assert!(msg.contains("0x80004005"));
        }
        other => panic!("Expected BackendError, got {:?}", other),
    }
}

#[test]
fn test_native_error_codes_are_negative() {
    assert!(NativeError::E_FAIL < 0);
    assert!(NativeError::E_INVALIDARG < 0);
    assert!(NativeError::E_OUTOFMEMORY < 0);
}

// ============================================================================
// ERROR TRAIT IMPLEMENTATIONS
// ============================================================================

#[test]
fn test_error_is_std_error() {
    let err = Error::PreconditionError("test".to_string());
    let _: &dyn std::error::Error = &err;
    let native = NativeError::new(NativeError::E_FAIL, "test");
    let _: &dyn std::error::Error = &native;
}

#[test]
fn test_error_clone_and_eq() {
    let err1 = Error::MalformedFace { line: 2, reason: "missing texcoord".to_string() };
    let err2 = err1.clone();
    assert_eq!(err1, err2);
}

// ============================================================================
// MACROS
// ============================================================================

fn bail_if_negative(value: i32) -> Result<i32> {
    if value < 0 {
        crate::engine_bail!("onkos::test", "value {} is negative", value);
    }
    Ok(value)
}

#[test]
fn test_engine_bail_returns_precondition_error() {
    assert_eq!(bail_if_negative(4), Ok(4));
    assert_eq!(
        bail_if_negative(-1),
        Err(Error::PreconditionError("value -1 is negative".to_string()))
    );
}

#[test]
fn test_engine_precondition_builds_error() {
    let err = crate::engine_precondition!("onkos::test", "buffer '{}' was destroyed", "cb");
    assert_eq!(err, Error::PreconditionError("buffer 'cb' was destroyed".to_string()));
}
