//! Localized message lookup.
//!
//! The error never formats its user-facing text itself. It hands a dotted
//! key and its details to a [`Localizer`] and returns whatever comes back.
//! Closures implement the trait, so callers can bridge to any translation
//! backend without a wrapper type.
//!
//! [`MessageCatalog`] is a small in-memory implementation: a key -> template
//! table with `{name}` placeholders. It ships English templates for every
//! validation code.
//!
//! # Example
//!
//! ```rust
//! use package_validation::{MessageCatalog, PackageValidationError};
//!
//! let catalog = MessageCatalog::english();
//! let err = PackageValidationError::invalid_package_version("1.0.x");
//! assert_eq!(
//!     err.error_message(&catalog),
//!     "The package version \"1.0.x\" is invalid."
//! );
//! ```

use crate::{ValidationDetails, ValidationErrorCode};
use std::collections::HashMap;

/// Formats a message for a dotted key using detail variables.
///
/// Unknown keys are handled by the implementation's own fallback.
pub trait Localizer {
    /// Look up `key` and interpolate `vars`.
    fn lookup(&self, key: &str, vars: &ValidationDetails) -> String;
}

impl<F> Localizer for F
where
    F: Fn(&str, &ValidationDetails) -> String,
{
    #[inline]
    fn lookup(&self, key: &str, vars: &ValidationDetails) -> String {
        self(key, vars)
    }
}

/// In-memory template catalog.
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    templates: HashMap<String, String>,
}

impl MessageCatalog {
    /// Empty catalog; every lookup falls back to the key.
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog preloaded with English templates for all validation codes.
    pub fn english() -> Self {
        ValidationErrorCode::ALL
            .iter()
            .fold(Self::new(), |catalog, code| {
                catalog.with_template(code.message_key(), english_template(*code))
            })
    }

    /// Add or replace a template.
    #[must_use]
    pub fn with_template(mut self, key: impl Into<String>, template: impl Into<String>) -> Self {
        self.templates.insert(key.into(), template.into());
        self
    }

    /// Raw template for `key`.
    pub fn template(&self, key: &str) -> Option<&str> {
        self.templates.get(key).map(String::as_str)
    }

    /// Number of templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// True when the catalog has no templates.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl Localizer for MessageCatalog {
    fn lookup(&self, key: &str, vars: &ValidationDetails) -> String {
        match self.template(key) {
            Some(template) => render_template(template, vars),
            None => key.to_owned(),
        }
    }
}

fn english_template(code: ValidationErrorCode) -> &'static str {
    match code {
        ValidationErrorCode::FileNotFound => {
            "The package file \"{archive}\" could not be found."
        }
        ValidationErrorCode::MissingPackageXml => {
            "The package information file is missing in \"{archive}\"."
        }
        ValidationErrorCode::InvalidPackageName => {
            "The package name \"{packageName}\" is invalid."
        }
        ValidationErrorCode::InvalidPackageVersion => {
            "The package version \"{packageVersion}\" is invalid."
        }
        ValidationErrorCode::NoInstallPath => {
            "The package \"{packageName}\" provides no installation instructions and cannot be used as an update."
        }
        ValidationErrorCode::NoUpdatePath => {
            "The package \"{packageName}\" is installed in version {packageVersion} and cannot be updated to version {deliveredPackageVersion}."
        }
        ValidationErrorCode::ExcludingPackages => {
            "The package cannot be installed, it is excluded by: {packages}."
        }
        ValidationErrorCode::ExcludedPackages => {
            "The package cannot be installed, it excludes: {packages}."
        }
    }
}

/// Substitute `{name}` placeholders with rendered detail values.
///
/// Missing variables render empty. `{{` and `}}` produce literal braces. An
/// unterminated `{` is copied through unchanged.
pub fn render_template(template: &str, vars: &ValidationDetails) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(idx) = rest.find(['{', '}']) {
        out.push_str(&rest[..idx]);
        let tail = &rest[idx..];

        if tail.starts_with("{{") {
            out.push('{');
            rest = &tail[2..];
        } else if tail.starts_with("}}") {
            out.push('}');
            rest = &tail[2..];
        } else if tail.starts_with('}') {
            out.push('}');
            rest = &tail[1..];
        } else if let Some(end) = tail.find('}') {
            let name = &tail[1..end];
            if let Some(value) = vars.get(name) {
                out.push_str(&value.render());
            }
            rest = &tail[end + 1..];
        } else {
            out.push_str(tail);
            rest = "";
        }
    }

    out.push_str(rest);
    out
}
