//! Behavioural tests for package validation errors.
//!
//! Each test pins one observable contract: detail storage, code identity,
//! exact legacy wording, localizer delegation and the logging opt-out.

use package_validation::{
    DISCOURAGED_MESSAGE, ErrorLog, ErrorReporter, Localizer, MessageCatalog, PackageRef,
    PackageValidationError, Reportable, SystemError, ValidationDetails, ValidationErrorCode,
};
use std::cell::RefCell;

fn details(pairs: &[(&'static str, &str)]) -> ValidationDetails {
    pairs.iter().map(|(k, v)| (*k, *v)).collect()
}

// ============================================================================
// DETAILS AND CODE IDENTITY
// ============================================================================

#[test]
fn empty_details_round_trip_for_every_code() {
    for code in ValidationErrorCode::ALL {
        let err = PackageValidationError::new(code, ValidationDetails::new());
        assert!(err.details().is_empty());
        assert_eq!(err.details(), &ValidationDetails::new());
    }
}

#[test]
fn supplied_details_round_trip_for_every_code() {
    let supplied = details(&[("archive", "foo.tar")]);
    for code in ValidationErrorCode::ALL {
        let err = PackageValidationError::new(code, supplied.clone());
        assert_eq!(err.details(), &supplied);
        assert_eq!(err.details().text("archive"), Some("foo.tar"));
        assert_eq!(err.details().len(), 1);
    }
}

#[test]
fn code_is_returned_unchanged() {
    for code in ValidationErrorCode::ALL {
        assert_eq!(PackageValidationError::from_code(code).code(), code);
        assert_eq!(
            PackageValidationError::new(code, details(&[("packageName", "x")])).code(),
            code
        );
    }
}

// ============================================================================
// LEGACY MESSAGES
// ============================================================================

#[test]
fn file_not_found_without_target() {
    let err = PackageValidationError::new(
        ValidationErrorCode::FileNotFound,
        details(&[("archive", "a.tar")]),
    );
    assert_eq!(err.legacy_message(), "unable to find package file 'a.tar'");
}

#[test]
fn file_not_found_with_target() {
    let err = PackageValidationError::new(
        ValidationErrorCode::FileNotFound,
        details(&[("archive", "a.tar"), ("targetArchive", "b.tar")]),
    );
    assert_eq!(err.legacy_message(), "tar archive 'b.tar' not found in 'a.tar'.");
}

#[test]
fn missing_package_xml() {
    let err = PackageValidationError::new(
        ValidationErrorCode::MissingPackageXml,
        details(&[("archive", "a.tar")]),
    );
    assert_eq!(
        err.legacy_message(),
        "package information file 'package.xml' not found in 'a.tar'"
    );
}

#[test]
fn invalid_package_name() {
    let err = PackageValidationError::new(
        ValidationErrorCode::InvalidPackageName,
        details(&[("packageName", "1bad")]),
    );
    assert_eq!(err.legacy_message(), "'1bad' is not a valid package name.");
}

#[test]
fn invalid_package_version() {
    let err = PackageValidationError::invalid_package_version("1.0.x");
    assert_eq!(err.legacy_message(), "package version '1.0.x' is invalid");
}

#[test]
fn unlisted_codes_use_discouragement_string() {
    let unlisted = [
        ValidationErrorCode::NoInstallPath,
        ValidationErrorCode::NoUpdatePath,
        ValidationErrorCode::ExcludingPackages,
        ValidationErrorCode::ExcludedPackages,
    ];
    for code in unlisted {
        let bare = PackageValidationError::from_code(code);
        let detailed = PackageValidationError::new(
            code,
            details(&[("packageName", "com.example.forum"), ("archive", "a.tar")]),
        );
        assert_eq!(bare.legacy_message(), DISCOURAGED_MESSAGE);
        assert_eq!(detailed.legacy_message(), DISCOURAGED_MESSAGE);
    }
    assert_eq!(
        DISCOURAGED_MESSAGE,
        "Using getErrorMessage() instead of the generic message accessor is discouraged"
    );
}

#[test]
#[should_panic(expected = "packageName")]
fn missing_package_name_faults() {
    let err = PackageValidationError::new(
        ValidationErrorCode::InvalidPackageName,
        ValidationDetails::new(),
    );
    let _ = err.legacy_message();
}

#[test]
fn missing_package_name_is_reported_without_panicking() {
    let err = PackageValidationError::from_code(ValidationErrorCode::InvalidPackageName);
    let missing = err.try_legacy_message().unwrap_err();
    assert_eq!(missing.key, "packageName");
    assert_eq!(missing.code, ValidationErrorCode::InvalidPackageName);
}

// ============================================================================
// LOCALIZED MESSAGES
// ============================================================================

#[test]
fn error_message_delegates_key_and_details() {
    let seen: RefCell<Vec<(String, ValidationDetails)>> = RefCell::new(Vec::new());
    let recorder = |key: &str, vars: &ValidationDetails| {
        seen.borrow_mut().push((key.to_owned(), vars.clone()));
        String::from("localized")
    };

    let err = PackageValidationError::missing_package_xml("a.tar");
    assert_eq!(err.error_message(&recorder), "localized");

    let seen = seen.into_inner();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0, "packageValidation.errorCode.2");
    assert_eq!(&seen[0].1, err.details());
}

#[test]
fn english_catalog_renders_package_lists() {
    let err = PackageValidationError::excluding_packages(vec![
        PackageRef::new("com.example.forum", "Forum", "2.1.0"),
        PackageRef::new("com.example.blog", "Blog", "1.4.2"),
    ]);
    let catalog = MessageCatalog::english();
    assert_eq!(
        err.error_message(&catalog),
        "The package cannot be installed, it is excluded by: \
         Forum (com.example.forum 2.1.0), Blog (com.example.blog 1.4.2)."
    );
}

#[test]
fn english_catalog_renders_update_path() {
    let err = PackageValidationError::no_update_path("com.example.forum", "2.1.0", "2.0.0");
    assert_eq!(
        err.error_message(&MessageCatalog::english()),
        "The package \"com.example.forum\" is installed in version 2.1.0 \
         and cannot be updated to version 2.0.0."
    );
}

#[test]
fn custom_catalog_overrides_template() {
    let catalog = MessageCatalog::new().with_template(
        "packageValidation.errorCode.3",
        "Paketname '{packageName}' ist ungültig.",
    );
    let err = PackageValidationError::invalid_package_name("1bad");
    assert_eq!(err.error_message(&catalog), "Paketname '1bad' ist ungültig.");
}

#[test]
fn localizer_can_be_a_trait_object() {
    let catalog = MessageCatalog::english();
    let localizer: &dyn Localizer = &catalog;
    let err = PackageValidationError::file_not_found("a.tar");
    assert_eq!(
        err.error_message(localizer),
        "The package file \"a.tar\" could not be found."
    );
}

// ============================================================================
// LOGGING OPT-OUT
// ============================================================================

#[test]
fn should_log_hook() {
    let validation = PackageValidationError::file_not_found("a.tar");
    let generic = SystemError::new(500, "unexpected state");

    assert!(!validation.should_log());
    assert!(generic.should_log());
}

#[test]
fn reporter_only_logs_generic_errors() {
    let reporter = ErrorReporter::with_log(ErrorLog::new(16, 256));
    let errors: Vec<Box<dyn Reportable>> = vec![
        Box::new(PackageValidationError::file_not_found("a.tar")),
        Box::new(SystemError::new(500, "unexpected state")),
        Box::new(PackageValidationError::invalid_package_name("1bad")),
    ];

    let logged: Vec<bool> = errors.iter().map(|e| reporter.report(e.as_ref())).collect();
    assert_eq!(logged, vec![false, true, false]);

    let entries = reporter.log().get_all();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].code, 500);
    assert_eq!(entries[0].message.as_ref(), "unexpected state");
}

#[test]
fn validation_errors_never_reach_the_log() {
    let reporter = ErrorReporter::new();
    for code in ValidationErrorCode::ALL {
        let err = PackageValidationError::from_code(code);
        assert!(!reporter.report(&err));
    }
    assert!(reporter.log().is_empty());
}

// ============================================================================
// ERROR TRAIT INTEGRATION
// ============================================================================

#[test]
fn propagates_through_question_mark() {
    fn inspect(name: &str) -> package_validation::Result<&str> {
        if name.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(PackageValidationError::invalid_package_name(name));
        }
        Ok(name)
    }

    fn install(name: &str) -> Result<(), Box<dyn std::error::Error>> {
        inspect(name)?;
        Ok(())
    }

    let err = install("1bad").unwrap_err();
    assert_eq!(err.to_string(), "'1bad' is not a valid package name.");
    assert!(err.downcast_ref::<PackageValidationError>().is_some());
}

#[test]
fn errors_cross_threads() {
    let err = PackageValidationError::tar_not_found("a.tar", "b.tar");
    let handle = std::thread::spawn(move || err.legacy_message());
    assert_eq!(
        handle.join().expect("thread panicked"),
        "tar archive 'b.tar' not found in 'a.tar'."
    );
}
