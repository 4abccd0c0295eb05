//! Error types for branding operations.
//!
//! All fallible functions in this crate return [`Result<T>`], which uses
//! [`Error`] as the error type. External error types are converted via `From`
//! impls.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while re-branding a decoded shell tree.
#[derive(Error, Debug)]
pub enum Error {
    /// Filesystem I/O failed (reading resources, writing icons, copying files).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to decode, resize, or encode an image.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// An exclude pattern is not valid glob syntax.
    #[error("Invalid exclude pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Directory traversal failed while mirroring the source tree.
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// A walked entry did not live under the source root.
    #[error("Path escapes the source root: {0}")]
    StripPrefix(#[from] std::path::StripPrefixError),
}
