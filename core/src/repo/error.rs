use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::compress::CorruptStreamError;
use crate::object::{Id, Kind, MalformedObjectError, MalformedTreeError, ParseIdError, ParseKindError};

/// Describes the potential error conditions that might arise from `Repo` operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The address given was not exactly 40 hex digits.
    #[error("invalid object address: {0}")]
    InvalidAddress(#[from] ParseIdError),

    #[error(transparent)]
    UnsupportedKind(#[from] ParseKindError),

    /// No object is stored under this ID. A concurrent writer may not have
    /// finished yet, so callers may retry.
    #[error("object {0} not found")]
    ObjectNotFound(Id),

    #[error("malformed object: {0}")]
    MalformedObject(#[from] MalformedObjectError),

    #[error("malformed tree: {0}")]
    MalformedTree(#[from] MalformedTreeError),

    #[error(transparent)]
    CorruptStream(#[from] CorruptStreamError),

    #[error("object {id} is a {actual}, not a {expected}")]
    UnexpectedKind { id: Id, expected: Kind, actual: Kind },

    #[error("work dir doesn't exist: {0}")]
    WorkDirDoesntExist(PathBuf),

    #[error("git dir doesn't exist: {0}")]
    GitDirDoesntExist(PathBuf),

    #[error("git dir shouldn't exist: {0}")]
    GitDirShouldntExist(PathBuf),

    #[error(transparent)]
    IoError(io::Error),
}

/// Codec and compression failures that surface from a `Read` call arrive
/// wrapped in an `io::Error`. They are unwrapped here so that callers can
/// match on them directly.
impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        let wraps_known = err.get_ref().map_or(false, |inner| {
            inner.is::<CorruptStreamError>() || inner.is::<MalformedObjectError>()
        });
        if !wraps_known {
            return Error::IoError(err);
        }

        let kind = err.kind();
        let inner = match err.into_inner() {
            Some(inner) => inner,
            None => return Error::IoError(kind.into()),
        };

        let inner = match inner.downcast::<CorruptStreamError>() {
            Ok(err) => return Error::CorruptStream(*err),
            Err(inner) => inner,
        };

        match inner.downcast::<MalformedObjectError>() {
            Ok(err) => Error::MalformedObject(*err),
            Err(inner) => Error::IoError(io::Error::new(kind, inner)),
        }
    }
}

/// A specialized `Result` type for `Repo` operations.
pub type Result<T> = std::result::Result<T, Error>;
