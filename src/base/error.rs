/// An error that occurred while loading or parsing a source file.
#[allow(missing_docs)]
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Could not open: {path}: {message}")]
    IoError { path: String, message: String },
    #[error(transparent)]
    ParseError(#[from] crate::syntax::error::Error),
}

/// A specialized [`Result`] type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
