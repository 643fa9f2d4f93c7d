//! Error reporting pipeline with a per-type logging opt-out.
//!
//! A reporter sees every error that bubbles up to the installation driver.
//! Most of them are faults and belong in the error log. Validation failures
//! are not: a bad archive is an expected, user-facing outcome. Rather than
//! special-casing concrete types, the reporter asks each error through
//! [`Reportable::should_log`].
//!
//! # Example
//!
//! ```rust
//! use package_validation::{ErrorReporter, PackageValidationError, SystemError};
//!
//! let reporter = ErrorReporter::default();
//!
//! assert!(!reporter.report(&PackageValidationError::file_not_found("a.tar")));
//! assert!(reporter.report(&SystemError::new(500, "disk full")));
//! assert_eq!(reporter.log().len(), 1);
//! ```

use crate::error_log::ErrorLog;
use std::borrow::Cow;
use std::fmt;
use tracing::{debug, error};

/// An error the reporting pipeline knows how to handle.
pub trait Reportable: std::error::Error + Send + Sync {
    /// Numeric code carried by the error.
    fn numeric_code(&self) -> u16;

    /// Whether the pipeline should write this error to the error log.
    #[inline]
    fn should_log(&self) -> bool {
        true
    }
}

/// Generic coded error: a numeric code and a message.
///
/// Logs itself through the default [`Reportable::should_log`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemError {
    code: u16,
    message: Cow<'static, str>,
}

impl SystemError {
    /// Create a coded error.
    pub fn new(code: u16, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Numeric code.
    #[inline]
    pub const fn code(&self) -> u16 {
        self.code
    }

    /// Message as given.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for SystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for SystemError {}

impl Reportable for SystemError {
    #[inline]
    fn numeric_code(&self) -> u16 {
        self.code
    }
}

/// Routes errors to `tracing` and the in-memory [`ErrorLog`].
#[derive(Clone, Default)]
pub struct ErrorReporter {
    log: ErrorLog,
}

impl ErrorReporter {
    /// Reporter writing to a default-sized log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reporter writing to `log`.
    pub fn with_log(log: ErrorLog) -> Self {
        Self { log }
    }

    /// Report an error; returns whether it was logged.
    pub fn report(&self, err: &dyn Reportable) -> bool {
        let code = err.numeric_code();

        if !err.should_log() {
            debug!(code, "error opted out of logging");
            return false;
        }

        let entry = self.log.record(err);
        error!(code, message = %entry.message, "error reported");
        true
    }

    /// Report the error of a failed result and hand the result back.
    pub fn inspect<T, E: Reportable>(&self, result: Result<T, E>) -> Result<T, E> {
        if let Err(ref err) = result {
            self.report(err);
        }
        result
    }

    /// The underlying error log.
    #[inline]
    pub fn log(&self) -> &ErrorLog {
        &self.log
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Quiet;

    impl fmt::Display for Quiet {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("quiet")
        }
    }

    impl std::error::Error for Quiet {}

    impl Reportable for Quiet {
        fn numeric_code(&self) -> u16 {
            7
        }

        fn should_log(&self) -> bool {
            false
        }
    }

    #[test]
    fn system_error_logs_by_default() {
        let err = SystemError::new(500, "disk full");
        assert!(err.should_log());
        assert_eq!(err.numeric_code(), 500);
        assert_eq!(err.to_string(), "disk full");
    }

    #[test]
    fn reporter_records_logged_errors() {
        let reporter = ErrorReporter::with_log(ErrorLog::new(8, 256));
        assert!(reporter.report(&SystemError::new(500, "disk full")));

        let entries = reporter.log().get_all();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].code, 500);
        assert_eq!(entries[0].message.as_ref(), "disk full");
    }

    #[test]
    fn reporter_skips_opted_out_errors() {
        let reporter = ErrorReporter::new();
        assert!(!reporter.report(&Quiet));
        assert!(reporter.log().is_empty());
    }

    #[test]
    fn inspect_passes_result_through() {
        let reporter = ErrorReporter::new();
        let ok: Result<u8, SystemError> = Ok(1);
        assert_eq!(reporter.inspect(ok), Ok(1));

        let failed: Result<u8, SystemError> = Err(SystemError::new(1, "boom"));
        assert!(reporter.inspect(failed).is_err());
        assert_eq!(reporter.log().len(), 1);
    }

    #[test]
    fn reporters_share_cloned_log() {
        let log = ErrorLog::new(8, 64);
        let reporter = ErrorReporter::with_log(log.clone());
        reporter.report(&SystemError::new(2, "x"));
        assert_eq!(log.len(), 1);
    }
}
