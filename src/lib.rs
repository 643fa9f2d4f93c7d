//! # Package Validation
//!
//! Typed errors for failures detected while inspecting a package archive
//! before installation.
//!
//! ## Design Philosophy
//!
//! 1. **One value, two messages**: a localized message rendered on demand
//!    through a [`Localizer`], and a fixed legacy message kept for callers
//!    that still match on the old wording
//! 2. **Codes are stable** and double as localization keys
//! 3. **Details are typed**: strings or package lists, nothing dynamic
//! 4. **Validation failures are not faults**: they opt out of the error log
//!    through [`Reportable::should_log`]
//!
//! ## Quick Start
//!
//! ```rust
//! use package_validation::{MessageCatalog, PackageValidationError, Result};
//!
//! fn check_name(name: &str) -> Result<()> {
//!     if !name.contains('.') {
//!         return Err(PackageValidationError::invalid_package_name(name));
//!     }
//!     Ok(())
//! }
//!
//! let err = check_name("1bad").unwrap_err();
//!
//! // Legacy wording:
//! assert_eq!(err.to_string(), "'1bad' is not a valid package name.");
//!
//! // Localized wording:
//! let catalog = MessageCatalog::english();
//! assert_eq!(err.error_message(&catalog), "The package name \"1bad\" is invalid.");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::fmt;
use std::result;

pub mod archive;
pub mod codes;
pub mod convenience;
pub mod details;
pub mod error_log;
pub mod localizer;
pub mod reporting;

pub use codes::{DetailKind, ExpectedDetail, UnknownCodeError, ValidationErrorCode};
pub use details::{DetailValue, PackageRef, ValidationDetails};
pub use error_log::{ErrorLog, LogEntry};
pub use localizer::{Localizer, MessageCatalog};
pub use reporting::{ErrorReporter, Reportable, SystemError};

use codes::{ARCHIVE, PACKAGE_NAME, PACKAGE_VERSION, TARGET_ARCHIVE};

/// Type alias for Results using our error type.
pub type Result<T> = result::Result<T, PackageValidationError>;

/// Legacy message for codes without a fixed wording.
pub const DISCOURAGED_MESSAGE: &str =
    "Using getErrorMessage() instead of the generic message accessor is discouraged";

/// A package archive failed validation.
///
/// Immutable after construction: the code and details are set once and only
/// exposed through shared references. The value is `Send + Sync` and cheap
/// to move across threads.
///
/// Construction never checks that `details` holds the keys the code expects
/// (see [`ValidationErrorCode::expected_details`]); a missing key surfaces
/// only when [`legacy_message`](Self::legacy_message) is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "errors should be handled or reported"]
pub struct PackageValidationError {
    code: ValidationErrorCode,
    details: ValidationDetails,
}

impl PackageValidationError {
    /// Create an error carrying `details` verbatim.
    pub fn new(code: ValidationErrorCode, details: ValidationDetails) -> Self {
        Self { code, details }
    }

    /// Debug-assert that every required detail key is present.
    ///
    /// Construction itself never checks; call sites that want the check
    /// chain this onto `new`. Compiles to a no-op in release builds.
    #[track_caller]
    #[inline]
    pub fn debug_checked(self) -> Self {
        debug_assert!(
            self.missing_details().is_empty(),
            "{} constructed without required details {:?}",
            self.code.name(),
            self.missing_details()
        );
        self
    }

    /// Create an error without details.
    #[inline]
    pub fn from_code(code: ValidationErrorCode) -> Self {
        Self::new(code, ValidationDetails::new())
    }

    /// Failure kind.
    #[inline]
    pub const fn code(&self) -> ValidationErrorCode {
        self.code
    }

    /// Contextual details, exactly as supplied.
    #[inline]
    pub const fn details(&self) -> &ValidationDetails {
        &self.details
    }

    /// Required detail keys absent from [`details`](Self::details).
    pub fn missing_details(&self) -> Vec<&'static str> {
        self.code
            .required_keys()
            .filter(|key| !self.details.contains_key(key))
            .collect()
    }

    /// User-facing message.
    ///
    /// Delegates entirely to `localizer`, keyed by
    /// [`ValidationErrorCode::message_key`] with the details as variables.
    #[inline]
    pub fn error_message<L: Localizer + ?Sized>(&self, localizer: &L) -> String {
        localizer.lookup(&self.code.message_key(), &self.details)
    }

    /// Fixed-format message kept for callers matching on the old wording.
    ///
    /// Prefer [`error_message`](Self::error_message) for display.
    ///
    /// # Panics
    ///
    /// Panics if a detail the wording needs is absent or is not text. That
    /// is a bug at the construction site, not a runtime condition.
    pub fn legacy_message(&self) -> String {
        match self.try_legacy_message() {
            Ok(message) => message,
            Err(missing) => panic!("{}", missing),
        }
    }

    /// Fixed-format message, or the detail that prevented rendering it.
    pub fn try_legacy_message(&self) -> result::Result<String, MissingDetailError> {
        let message = match self.code {
            ValidationErrorCode::FileNotFound => match self.details.text(TARGET_ARCHIVE) {
                Some(target) => format!(
                    "tar archive '{}' not found in '{}'.",
                    target,
                    self.required_text(ARCHIVE)?
                ),
                None => format!(
                    "unable to find package file '{}'",
                    self.required_text(ARCHIVE)?
                ),
            },
            ValidationErrorCode::MissingPackageXml => format!(
                "package information file '{}' not found in '{}'",
                archive::INFO_FILE_NAME,
                self.required_text(ARCHIVE)?
            ),
            ValidationErrorCode::InvalidPackageName => format!(
                "'{}' is not a valid package name.",
                self.required_text(PACKAGE_NAME)?
            ),
            ValidationErrorCode::InvalidPackageVersion => format!(
                "package version '{}' is invalid",
                self.required_text(PACKAGE_VERSION)?
            ),
            _ => DISCOURAGED_MESSAGE.to_owned(),
        };
        Ok(message)
    }

    #[inline]
    fn required_text(&self, key: &'static str) -> result::Result<&str, MissingDetailError> {
        self.details.text(key).ok_or(MissingDetailError {
            code: self.code,
            key,
        })
    }
}

impl fmt::Display for PackageValidationError {
    /// Legacy wording; falls back to `package validation failed (E-PKG-nnn)`
    /// when a required detail is missing.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.try_legacy_message() {
            Ok(message) => f.write_str(&message),
            Err(_) => write!(f, "package validation failed ({})", self.code),
        }
    }
}

impl std::error::Error for PackageValidationError {}

impl Reportable for PackageValidationError {
    #[inline]
    fn numeric_code(&self) -> u16 {
        self.code.as_u16()
    }

    /// Validation failures are expected outcomes and are never logged.
    #[inline]
    fn should_log(&self) -> bool {
        false
    }
}

/// A detail needed to render a legacy message is absent or not text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingDetailError {
    /// Code whose message was being rendered.
    pub code: ValidationErrorCode,
    /// Missing detail key.
    pub key: &'static str,
}

impl fmt::Display for MissingDetailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) requires text detail '{}'",
            self.code.name(),
            self.code,
            self.key
        )
    }
}

impl std::error::Error for MissingDetailError {}
