//! Error Extension Tests

use bluecore_domain::error::{Error, ErrorCategory, Result};
use bluecore_infrastructure::error_ext::ErrorContext;
use std::io;

#[test]
fn test_context_wraps_as_io_error() {
    let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");

    let result: Result<()> = Err(io_error).context("failed to read file");
    match result {
        Err(Error::Io { message, source }) => {
            assert!(message.contains("failed to read file"));
            assert!(message.contains("file not found"));
            assert!(source.is_some());
        }
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn test_config_context_wraps_as_configuration_error() {
    let parse_error = "not a number".parse::<u32>().unwrap_err();

    let err = Err::<u32, _>(parse_error)
        .config_context("bad value")
        .unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
    assert_eq!(err.category(), ErrorCategory::Configuration);
}

#[test]
fn test_with_context_is_lazy_on_success() {
    let ok: std::result::Result<u8, io::Error> = Ok(1);
    let value = ok
        .with_context(|| -> String { panic!("context must not be built") })
        .unwrap();
    assert_eq!(value, 1);
}
