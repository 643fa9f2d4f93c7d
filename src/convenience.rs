//! Named constructors and the `validation_error!` macro.
//!
//! Each constructor supplies exactly the detail keys its code expects, so
//! call sites cannot misspell a key or forget one. The macro covers the
//! remaining cases (ad-hoc or additional keys).
//!
//! # Usage
//!
//! ```rust
//! use package_validation::{validation_error, PackageValidationError, ValidationErrorCode};
//!
//! let a = PackageValidationError::invalid_package_name("1bad");
//! let b = validation_error!(InvalidPackageName, "packageName" => "1bad");
//! assert_eq!(a, b);
//!
//! let bare = validation_error!(NoInstallPath);
//! assert_eq!(bare.code(), ValidationErrorCode::NoInstallPath);
//! assert!(bare.details().is_empty());
//! ```

use crate::codes::{
    ARCHIVE, DELIVERED_PACKAGE_VERSION, PACKAGES, PACKAGE_NAME, PACKAGE_VERSION, TARGET_ARCHIVE,
};
use crate::{DetailValue, PackageRef, PackageValidationError, ValidationDetails, ValidationErrorCode};

impl PackageValidationError {
    /// Archive file does not exist.
    pub fn file_not_found(archive: impl Into<String>) -> Self {
        Self::new(
            ValidationErrorCode::FileNotFound,
            ValidationDetails::new().with(ARCHIVE, DetailValue::Text(archive.into())),
        )
    }

    /// Nested tar archive `target_archive` does not exist inside `archive`.
    pub fn tar_not_found(archive: impl Into<String>, target_archive: impl Into<String>) -> Self {
        Self::new(
            ValidationErrorCode::FileNotFound,
            ValidationDetails::new()
                .with(ARCHIVE, DetailValue::Text(archive.into()))
                .with(TARGET_ARCHIVE, DetailValue::Text(target_archive.into())),
        )
    }

    /// Archive has no package information file.
    pub fn missing_package_xml(archive: impl Into<String>) -> Self {
        Self::new(
            ValidationErrorCode::MissingPackageXml,
            ValidationDetails::new().with(ARCHIVE, DetailValue::Text(archive.into())),
        )
    }

    /// Package name fails the identifier rules.
    pub fn invalid_package_name(package_name: impl Into<String>) -> Self {
        Self::new(
            ValidationErrorCode::InvalidPackageName,
            ValidationDetails::new().with(PACKAGE_NAME, DetailValue::Text(package_name.into())),
        )
    }

    /// Package version string cannot be parsed.
    pub fn invalid_package_version(package_version: impl Into<String>) -> Self {
        Self::new(
            ValidationErrorCode::InvalidPackageVersion,
            ValidationDetails::new().with(PACKAGE_VERSION, DetailValue::Text(package_version.into())),
        )
    }

    /// Package has no install instructions and no applicable update.
    pub fn no_install_path(package_name: impl Into<String>) -> Self {
        Self::new(
            ValidationErrorCode::NoInstallPath,
            ValidationDetails::new().with(PACKAGE_NAME, DetailValue::Text(package_name.into())),
        )
    }

    /// Installed `package_version` cannot be updated to `delivered_version`.
    pub fn no_update_path(
        package_name: impl Into<String>,
        package_version: impl Into<String>,
        delivered_version: impl Into<String>,
    ) -> Self {
        Self::new(
            ValidationErrorCode::NoUpdatePath,
            ValidationDetails::new()
                .with(PACKAGE_NAME, DetailValue::Text(package_name.into()))
                .with(PACKAGE_VERSION, DetailValue::Text(package_version.into()))
                .with(DELIVERED_PACKAGE_VERSION, DetailValue::Text(delivered_version.into())),
        )
    }

    /// Installed packages exclude the package being installed.
    pub fn excluding_packages(packages: Vec<PackageRef>) -> Self {
        Self::new(
            ValidationErrorCode::ExcludingPackages,
            ValidationDetails::new().with(PACKAGES, packages),
        )
    }

    /// The package being installed excludes installed packages.
    pub fn excluded_packages(packages: Vec<PackageRef>) -> Self {
        Self::new(
            ValidationErrorCode::ExcludedPackages,
            ValidationDetails::new().with(PACKAGES, packages),
        )
    }
}

/// Build a [`PackageValidationError`](crate::PackageValidationError) from a
/// code name and `"key" => value` pairs.
///
/// Values accept anything convertible into
/// [`DetailValue`](crate::DetailValue).
///
/// # Example
///
/// ```rust
/// # use package_validation::validation_error;
/// let err = validation_error!(
///     FileNotFound,
///     "archive" => "/tmp/bundle.tar",
///     "targetArchive" => "requirements/forum.tar",
/// );
/// assert_eq!(
///     err.to_string(),
///     "tar archive 'requirements/forum.tar' not found in '/tmp/bundle.tar'."
/// );
/// ```
#[macro_export]
macro_rules! validation_error {
    ($code:ident $(,)?) => {
        $crate::PackageValidationError::from_code($crate::ValidationErrorCode::$code)
    };
    ($code:ident, $($key:literal => $value:expr),+ $(,)?) => {
        $crate::PackageValidationError::new(
            $crate::ValidationErrorCode::$code,
            $crate::ValidationDetails::new()$(.with($key, $value))+,
        )
    };
}

#[cfg(test)]
mod tests {
    use crate::{PackageRef, PackageValidationError, ValidationErrorCode};

    #[test]
    fn constructors_supply_required_keys() {
        let errors = [
            PackageValidationError::file_not_found("a.tar"),
            PackageValidationError::missing_package_xml("a.tar"),
            PackageValidationError::invalid_package_name("1bad"),
            PackageValidationError::invalid_package_version("x"),
            PackageValidationError::no_install_path("com.example.forum"),
            PackageValidationError::no_update_path("com.example.forum", "1.0.0", "0.9.0"),
            PackageValidationError::excluding_packages(vec![]),
            PackageValidationError::excluded_packages(vec![]),
        ];

        for (err, code) in errors.iter().zip(ValidationErrorCode::ALL) {
            assert_eq!(err.code(), code);
            assert!(err.missing_details().is_empty(), "{} lacks details", code.name());
        }
    }

    #[test]
    fn tar_not_found_sets_target() {
        let err = PackageValidationError::tar_not_found("a.tar", "b.tar");
        assert_eq!(err.details().text("targetArchive"), Some("b.tar"));
    }

    #[test]
    fn exclusion_constructors_keep_packages() {
        let packages = vec![PackageRef::new("com.example.forum", "Forum", "2.1.0")];
        let err = PackageValidationError::excluded_packages(packages.clone());
        assert_eq!(err.details().packages("packages"), Some(packages.as_slice()));
    }

    #[test]
    fn macro_matches_constructor() {
        let built = validation_error!(
            NoUpdatePath,
            "packageName" => "com.example.forum",
            "packageVersion" => "1.0.0",
            "deliveredPackageVersion" => "0.9.0",
        );
        assert_eq!(
            built,
            PackageValidationError::no_update_path("com.example.forum", "1.0.0", "0.9.0")
        );
    }

    #[test]
    fn macro_without_details() {
        let err = validation_error!(ExcludedPackages);
        assert!(err.details().is_empty());
    }
}
