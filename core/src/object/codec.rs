//! The canonical byte layout of a git object.
//!
//! Every object is hashed and stored as
//!
//! ```text
//! <type> SP <decimal length> NUL <content>
//! ```
//!
//! where `<decimal length>` is the exact byte count of `<content>`. The
//! object's ID is the SHA-1 digest of this layout (never of the bare
//! content, and never of the compressed form).

use std::io::{self, ErrorKind, Read};

use sha1::{Digest, Sha1};
use thiserror::Error;

use super::{Id, Kind};

/// Longest header accepted: "commit" + SP + 20 digits + NUL, rounded up.
const MAX_HEADER_LEN: usize = 32;

/// Describes why a byte sequence is not a well-formed canonical object.
///
/// When returned from a [`Read`] call, this is wrapped in an `io::Error`
/// of kind `InvalidData`.
///
/// [`Read`]: https://doc.rust-lang.org/std/io/trait.Read.html
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum MalformedObjectError {
    #[error("object header is not terminated by a NUL byte")]
    MissingNul,

    #[error("object header has no space between type and length")]
    MissingSpace,

    #[error("object header has unknown type `{0}`")]
    UnknownKind(String),

    #[error("object header has invalid length `{0}`")]
    InvalidLength(String),

    #[error("object content is {actual} bytes; header declares {declared}")]
    LengthMismatch { declared: usize, actual: usize },

    #[error("object content ends before the {declared} bytes its header declares")]
    ContentTooShort { declared: usize },

    #[error("object content continues past the {declared} bytes its header declares")]
    ContentTooLong { declared: usize },

    #[error("object content hashes to {actual}, not {expected}")]
    IdMismatch { expected: Id, actual: Id },
}

impl From<MalformedObjectError> for io::Error {
    fn from(err: MalformedObjectError) -> io::Error {
        io::Error::new(ErrorKind::InvalidData, err)
    }
}

/// Build the object header (`"<type> <len>\0"`) for content of length `len`.
pub fn header(kind: Kind, len: usize) -> Vec<u8> {
    format!("{} {}\0", kind, len).into_bytes()
}

/// Build the canonical layout for `content` and compute its ID.
///
/// This is a pure function: no I/O is performed.
pub fn encode(kind: Kind, content: &[u8]) -> (Id, Vec<u8>) {
    let mut canonical = header(kind, content.len());
    canonical.extend_from_slice(content);

    let id = hash_bytes(&canonical);
    (id, canonical)
}

/// Split a canonical layout into its type and content.
///
/// The content must be exactly as long as the header declares. Trailing
/// bytes are never trimmed or ignored.
pub fn decode(canonical: &[u8]) -> Result<(Kind, &[u8]), MalformedObjectError> {
    let nul = canonical
        .iter()
        .position(|b| *b == 0)
        .ok_or(MalformedObjectError::MissingNul)?;

    let (kind, declared) = parse_header(&canonical[..nul])?;
    let content = &canonical[nul + 1..];

    if content.len() == declared {
        Ok((kind, content))
    } else {
        Err(MalformedObjectError::LengthMismatch {
            declared,
            actual: content.len(),
        })
    }
}

/// Parse a header (without its trailing NUL) into type and declared length.
pub fn parse_header(header: &[u8]) -> Result<(Kind, usize), MalformedObjectError> {
    let space = header
        .iter()
        .position(|b| *b == b' ')
        .ok_or(MalformedObjectError::MissingSpace)?;

    let (tag, len) = (&header[..space], &header[space + 1..]);

    let kind = Kind::from_bytes(tag).map_err(|err| MalformedObjectError::UnknownKind(err.0))?;
    let len = parse_length(len)?;

    Ok((kind, len))
}

fn parse_length(digits: &[u8]) -> Result<usize, MalformedObjectError> {
    let invalid = || MalformedObjectError::InvalidLength(String::from_utf8_lossy(digits).into_owned());

    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return Err(invalid());
    }

    // Git refuses leading zeros, so "06" is not another spelling of "6".
    if digits.len() > 1 && digits[0] == b'0' {
        return Err(invalid());
    }

    digits.iter().try_fold(0usize, |acc, d| {
        acc.checked_mul(10)
            .and_then(|acc| acc.checked_add((d - b'0') as usize))
            .ok_or_else(invalid)
    })
}

pub(crate) fn hash_bytes(canonical: &[u8]) -> Id {
    let mut hasher = Sha1::new();
    hasher.update(canonical);
    finish_hash(hasher)
}

pub(crate) fn finish_hash(hasher: Sha1) -> Id {
    let digest = hasher.finalize();
    let mut raw = [0u8; 20];
    raw.copy_from_slice(digest.as_slice());
    Id::from_array(raw)
}

/// Streaming decoder for a canonical object layout.
///
/// `ObjectReader::new` consumes the header from the underlying reader.
/// The `ObjectReader` then yields exactly the number of content bytes the
/// header declares, failing with [`MalformedObjectError`] if the underlying
/// reader runs short or has bytes left over.
///
/// [`MalformedObjectError`]: enum.MalformedObjectError.html
pub struct ObjectReader<R> {
    kind: Kind,
    len: usize,
    remaining: usize,
    checked_end: bool,
    inner: R,
}

impl<R: Read> ObjectReader<R> {
    /// Read and parse the header from `inner`.
    pub fn new(mut inner: R) -> io::Result<ObjectReader<R>> {
        let mut header = Vec::with_capacity(MAX_HEADER_LEN);
        let mut byte = [0u8; 1];

        loop {
            if inner.read(&mut byte)? == 0 {
                return Err(MalformedObjectError::MissingNul.into());
            }
            if byte[0] == 0 {
                break;
            }
            if header.len() == MAX_HEADER_LEN {
                return Err(MalformedObjectError::MissingNul.into());
            }
            header.push(byte[0]);
        }

        let (kind, len) = parse_header(&header)?;

        Ok(ObjectReader {
            kind,
            len,
            remaining: len,
            checked_end: false,
            inner,
        })
    }

    /// Returns the type declared by the header.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Returns the content length declared by the header.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the header declares empty content.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<R: Read> Read for ObjectReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        if self.remaining > 0 {
            let max = buf.len().min(self.remaining);
            let n = self.inner.read(&mut buf[..max])?;
            if n == 0 {
                return Err(MalformedObjectError::ContentTooShort { declared: self.len }.into());
            }
            self.remaining -= n;
            return Ok(n);
        }

        if !self.checked_end {
            let mut extra = [0u8; 1];
            if self.inner.read(&mut extra)? != 0 {
                return Err(MalformedObjectError::ContentTooLong { declared: self.len }.into());
            }
            self.checked_end = true;
        }

        Ok(0)
    }
}
