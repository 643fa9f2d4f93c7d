//! Named context attached to a validation failure.
//!
//! Detail values come in two shapes only: plain strings (archive paths,
//! package names, versions) and lists of package references (exclusion
//! conflicts). [`DetailValue`] is a closed union of those two shapes so the
//! mapping stays typed.
//!
//! # Memory Model
//!
//! Keys are `Cow<'static, str>`: the well-known keys in [`crate::codes`] are
//! borrowed, ad-hoc keys are owned. Entries live in a `SmallVec` kept sorted
//! by key; no error in this crate carries more than three details, so the
//! common case never touches the heap for the entry table itself.
//!
//! Owned strings inside values are zeroized on drop. Archive paths reveal
//! filesystem layout and are treated as sensitive context.

use smallvec::SmallVec;
use std::borrow::Cow;
use std::fmt;
use zeroize::Zeroize;

/// Reference to an installed or delivered package.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Zeroize)]
pub struct PackageRef {
    /// Unique package identifier, e.g. `com.example.forum`.
    pub identifier: String,
    /// Human-readable package name.
    pub name: String,
    /// Installed version.
    pub version: String,
}

impl PackageRef {
    /// Create a package reference.
    pub fn new(
        identifier: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            name: name.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for PackageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} {})", self.name, self.identifier, self.version)
    }
}

/// Value stored under a detail key.
#[derive(Debug, Clone, PartialEq, Eq, Zeroize)]
pub enum DetailValue {
    /// Plain string.
    Text(String),
    /// Package reference list.
    Packages(Vec<PackageRef>),
}

impl DetailValue {
    /// String content, if this is a text value.
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            Self::Packages(_) => None,
        }
    }

    /// Package list, if this is a package value.
    #[inline]
    pub fn as_packages(&self) -> Option<&[PackageRef]> {
        match self {
            Self::Text(_) => None,
            Self::Packages(list) => Some(list.as_slice()),
        }
    }

    /// Render for template substitution.
    ///
    /// Text is borrowed; package lists are joined with `", "`.
    pub fn render(&self) -> Cow<'_, str> {
        match self {
            Self::Text(s) => Cow::Borrowed(s.as_str()),
            Self::Packages(list) => {
                let joined = list
                    .iter()
                    .map(|p| p.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                Cow::Owned(joined)
            }
        }
    }
}

impl fmt::Display for DetailValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<&str> for DetailValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for DetailValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for DetailValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<Vec<PackageRef>> for DetailValue {
    fn from(value: Vec<PackageRef>) -> Self {
        Self::Packages(value)
    }
}

impl Drop for DetailValue {
    fn drop(&mut self) {
        self.zeroize();
    }
}

type Entry = (Cow<'static, str>, DetailValue);

/// Immutable key/value mapping of validation details.
///
/// Keys are unique and iterated in sorted order, so two mappings built from
/// the same pairs in any order compare equal. Building is by value
/// ([`with`](Self::with), `FromIterator`, `From<[_; N]>`); once a mapping is
/// handed to an error only shared references to it exist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationDetails {
    entries: SmallVec<[Entry; 4]>,
}

impl ValidationDetails {
    /// Empty mapping.
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: SmallVec::new(),
        }
    }

    /// Add or replace a detail, returning the extended mapping.
    ///
    /// A repeated key keeps the last value.
    #[must_use]
    pub fn with(mut self, key: impl Into<Cow<'static, str>>, value: impl Into<DetailValue>) -> Self {
        self.insert(key.into(), value.into());
        self
    }

    fn insert(&mut self, key: Cow<'static, str>, value: DetailValue) {
        match self.position(&key) {
            Ok(idx) => self.entries[idx].1 = value,
            Err(idx) => self.entries.insert(idx, (key, value)),
        }
    }

    #[inline]
    fn position(&self, key: &str) -> Result<usize, usize> {
        self.entries.binary_search_by(|(k, _)| k.as_ref().cmp(key))
    }

    /// Value stored under `key`.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&DetailValue> {
        self.position(key).ok().map(|idx| &self.entries[idx].1)
    }

    /// Text value stored under `key`; `None` if absent or not text.
    #[inline]
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(DetailValue::as_text)
    }

    /// Package list stored under `key`; `None` if absent or not a list.
    #[inline]
    pub fn packages(&self, key: &str) -> Option<&[PackageRef]> {
        self.get(key).and_then(DetailValue::as_packages)
    }

    /// Whether `key` is present.
    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_ok()
    }

    /// Iterate entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DetailValue)> {
        self.entries.iter().map(|(k, v)| (k.as_ref(), v))
    }

    /// Iterate keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_ref())
    }

    /// Number of stored details.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no details were supplied.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for ValidationDetails
where
    K: Into<Cow<'static, str>>,
    V: Into<DetailValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut details = Self::new();
        for (k, v) in iter {
            details.insert(k.into(), v.into());
        }
        details
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for ValidationDetails
where
    K: Into<Cow<'static, str>>,
    V: Into<DetailValue>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}
