use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use thiserror::Error;

/// Describes the fundamental git object type (blob, tree, or commit).
///
/// We use the word `kind` here to avoid conflict with the Rust reserved word `type`.
///
/// Commit content is carried through opaquely; only trees have a binary
/// layout that this crate interprets.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Kind {
    Blob,
    Tree,
    Commit,
}

/// Returned when a type tag names something other than a supported object type.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unsupported object type `{0}`")]
pub struct ParseKindError(pub String);

impl Kind {
    /// Returns the type tag as it appears in an object header.
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Blob => "blob",
            Kind::Tree => "tree",
            Kind::Commit => "commit",
        }
    }

    /// Parse a type tag from raw header bytes.
    pub fn from_bytes(tag: &[u8]) -> Result<Kind, ParseKindError> {
        match tag {
            b"blob" => Ok(Kind::Blob),
            b"tree" => Ok(Kind::Tree),
            b"commit" => Ok(Kind::Commit),
            _ => Err(ParseKindError(String::from_utf8_lossy(tag).into_owned())),
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Kind::from_bytes(s.as_bytes())
    }
}
