//! Validation error codes - one per stage of archive inspection.
//!
//! The numeric values are stable. They are shared with the legacy message
//! scheme and form the suffix of every localization key, so they must never
//! be renumbered.
//!
//! # Expected Details
//!
//! Each code documents the detail keys the caller is expected to supply.
//! The table is data, not a comment: [`ValidationErrorCode::expected_details`]
//! returns it, and `PackageValidationError::debug_checked` asserts it in debug
//! builds.
//!
//! # Example
//!
//! ```rust
//! use package_validation::ValidationErrorCode;
//!
//! let code = ValidationErrorCode::InvalidPackageName;
//! assert_eq!(code.as_u16(), 3);
//! assert_eq!(code.to_string(), "E-PKG-003");
//! assert_eq!(code.message_key(), "packageValidation.errorCode.3");
//! ```

use std::fmt;

/// Prefix of every localization key; the numeric code is appended.
pub const MESSAGE_KEY_PREFIX: &str = "packageValidation.errorCode.";

/// Detail key naming the inspected archive.
pub const ARCHIVE: &str = "archive";
/// Detail key naming a nested archive looked up inside `archive`.
pub const TARGET_ARCHIVE: &str = "targetArchive";
/// Detail key naming the package identifier.
pub const PACKAGE_NAME: &str = "packageName";
/// Detail key naming a package version.
pub const PACKAGE_VERSION: &str = "packageVersion";
/// Detail key naming the version shipped in the archive.
pub const DELIVERED_PACKAGE_VERSION: &str = "deliveredPackageVersion";
/// Detail key holding a list of package references.
pub const PACKAGES: &str = "packages";

/// Shape of a value expected under a detail key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetailKind {
    /// Plain string value.
    Text,
    /// List of [`PackageRef`](crate::PackageRef) records.
    Packages,
}

/// One entry of the expected-details table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExpectedDetail {
    /// Detail key.
    pub key: &'static str,
    /// Expected value shape.
    pub kind: DetailKind,
    /// Whether the key may be omitted.
    pub optional: bool,
}

impl ExpectedDetail {
    const fn text(key: &'static str) -> Self {
        Self { key, kind: DetailKind::Text, optional: false }
    }

    const fn optional_text(key: &'static str) -> Self {
        Self { key, kind: DetailKind::Text, optional: true }
    }

    const fn packages(key: &'static str) -> Self {
        Self { key, kind: DetailKind::Packages, optional: false }
    }
}

const FILE_NOT_FOUND_DETAILS: &[ExpectedDetail] = &[
    ExpectedDetail::text(ARCHIVE),
    ExpectedDetail::optional_text(TARGET_ARCHIVE),
];
const ARCHIVE_DETAILS: &[ExpectedDetail] = &[ExpectedDetail::text(ARCHIVE)];
const PACKAGE_NAME_DETAILS: &[ExpectedDetail] = &[ExpectedDetail::text(PACKAGE_NAME)];
const PACKAGE_VERSION_DETAILS: &[ExpectedDetail] = &[ExpectedDetail::text(PACKAGE_VERSION)];
const NO_UPDATE_PATH_DETAILS: &[ExpectedDetail] = &[
    ExpectedDetail::text(PACKAGE_NAME),
    ExpectedDetail::text(PACKAGE_VERSION),
    ExpectedDetail::text(DELIVERED_PACKAGE_VERSION),
];
const PACKAGES_DETAILS: &[ExpectedDetail] = &[ExpectedDetail::packages(PACKAGES)];

/// Kind of validation failure raised while inspecting a package archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum ValidationErrorCode {
    /// Archive (or a nested tar archive) is missing.
    /// Expects `archive`, optionally `targetArchive`.
    FileNotFound = 1,
    /// Archive has no package information file. Expects `archive`.
    MissingPackageXml = 2,
    /// Package identifier violates the naming schema. Expects `packageName`.
    InvalidPackageName = 3,
    /// Package version violates the version schema. Expects `packageVersion`.
    InvalidPackageVersion = 4,
    /// No install instructions and no applicable update. Expects `packageName`.
    NoInstallPath = 5,
    /// Installed package cannot be updated from this archive.
    /// Expects `packageName`, `packageVersion`, `deliveredPackageVersion`.
    NoUpdatePath = 6,
    /// Installed packages exclude this package. Expects `packages`.
    ExcludingPackages = 7,
    /// This package excludes installed packages. Expects `packages`.
    ExcludedPackages = 8,
}

impl ValidationErrorCode {
    /// Every code in numeric order.
    pub const ALL: [Self; 8] = [
        Self::FileNotFound,
        Self::MissingPackageXml,
        Self::InvalidPackageName,
        Self::InvalidPackageVersion,
        Self::NoInstallPath,
        Self::NoUpdatePath,
        Self::ExcludingPackages,
        Self::ExcludedPackages,
    ];

    /// Stable numeric value.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    /// Look up a code by its numeric value.
    #[inline]
    pub const fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(Self::FileNotFound),
            2 => Some(Self::MissingPackageXml),
            3 => Some(Self::InvalidPackageName),
            4 => Some(Self::InvalidPackageVersion),
            5 => Some(Self::NoInstallPath),
            6 => Some(Self::NoUpdatePath),
            7 => Some(Self::ExcludingPackages),
            8 => Some(Self::ExcludedPackages),
            _ => None,
        }
    }

    /// Variant name, for diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            Self::FileNotFound => "FileNotFound",
            Self::MissingPackageXml => "MissingPackageXml",
            Self::InvalidPackageName => "InvalidPackageName",
            Self::InvalidPackageVersion => "InvalidPackageVersion",
            Self::NoInstallPath => "NoInstallPath",
            Self::NoUpdatePath => "NoUpdatePath",
            Self::ExcludingPackages => "ExcludingPackages",
            Self::ExcludedPackages => "ExcludedPackages",
        }
    }

    /// Detail keys this code expects, required keys first.
    pub const fn expected_details(self) -> &'static [ExpectedDetail] {
        match self {
            Self::FileNotFound => FILE_NOT_FOUND_DETAILS,
            Self::MissingPackageXml => ARCHIVE_DETAILS,
            Self::InvalidPackageName | Self::NoInstallPath => PACKAGE_NAME_DETAILS,
            Self::InvalidPackageVersion => PACKAGE_VERSION_DETAILS,
            Self::NoUpdatePath => NO_UPDATE_PATH_DETAILS,
            Self::ExcludingPackages | Self::ExcludedPackages => PACKAGES_DETAILS,
        }
    }

    /// Required detail keys only.
    pub fn required_keys(self) -> impl Iterator<Item = &'static str> {
        self.expected_details()
            .iter()
            .filter(|d| !d.optional)
            .map(|d| d.key)
    }

    /// Localization key: `packageValidation.errorCode.<n>`.
    pub fn message_key(self) -> String {
        format!("{}{}", MESSAGE_KEY_PREFIX, self.as_u16())
    }
}

impl fmt::Display for ValidationErrorCode {
    /// Writes `E-PKG-<nnn>` directly to the formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E-PKG-{:03}", self.as_u16())
    }
}

impl From<ValidationErrorCode> for u16 {
    #[inline]
    fn from(code: ValidationErrorCode) -> Self {
        code.as_u16()
    }
}

impl TryFrom<u16> for ValidationErrorCode {
    type Error = UnknownCodeError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::from_u16(value).ok_or(UnknownCodeError { value })
    }
}

/// Numeric value does not name a validation code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownCodeError {
    /// The rejected value.
    pub value: u16,
}

impl fmt::Display for UnknownCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown package validation code {}", self.value)
    }
}

impl std::error::Error for UnknownCodeError {}
