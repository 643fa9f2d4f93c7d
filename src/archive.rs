//! Archive format constants shared with the package archive reader.

/// Name of the package information file at the root of every archive.
pub const INFO_FILE_NAME: &str = "package.xml";
