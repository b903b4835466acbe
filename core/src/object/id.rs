use std::fmt::{self, Write};
use std::str::FromStr;

use thiserror::Error;

/// An error which can be returned when parsing a git object ID.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum ParseIdError {
    /// Value being parsed is empty.
    #[error("cannot parse object ID from empty string")]
    Empty,

    /// Contains an invalid digit.
    ///
    /// Among other causes, this variant will be constructed when parsing a string that
    /// contains a letter beyond `f`.
    #[error("value contains invalid digit `{0}`")]
    InvalidDigit(char),

    /// ID is longer than 40 hex digits (or 20 bytes).
    #[error("value is more than 40 digits long")]
    Overflow,

    /// ID is shorter than 40 hex digits (or 20 bytes).
    #[error("value is less than 40 digits long")]
    Underflow,
}

/// Length of an object ID in raw bytes.
pub const ID_LEN: usize = 20;

/// Length of an object ID rendered as hex digits.
pub const HEX_ID_LEN: usize = 2 * ID_LEN;

/// An object ID is a string that identifies an object within a repository.
/// It is stored as a 20-byte signature, but can also be represented as 40 hex digits.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Id {
    id: [u8; ID_LEN],
}

impl Id {
    /// Create a new ID from a 20-byte slice.
    ///
    /// It is an error if the slice contains anything other than 20 bytes.
    pub fn new(id: &[u8]) -> Result<Id, ParseIdError> {
        match id.len() {
            ID_LEN => {
                let mut raw = [0u8; ID_LEN];
                raw.copy_from_slice(id);
                Ok(Id { id: raw })
            }
            0 => Err(ParseIdError::Empty),
            n if n < ID_LEN => Err(ParseIdError::Underflow),
            _ => Err(ParseIdError::Overflow),
        }
    }

    pub(crate) fn from_array(id: [u8; ID_LEN]) -> Id {
        Id { id }
    }

    /// Convert a 40-character hex ID to an object ID.
    ///
    /// Upper- and lowercase hex digits are both accepted. It is an error
    /// if the ID contains anything other than 40 hex digits.
    pub fn from_hex<T: AsRef<[u8]>>(id: T) -> Result<Id, ParseIdError> {
        let hex = id.as_ref();

        match hex.len() {
            HEX_ID_LEN => {
                let mut raw = [0u8; ID_LEN];
                for (byte, pair) in raw.iter_mut().zip(hex.chunks(2)) {
                    *byte = digit_value(pair[0])? << 4 | digit_value(pair[1])?;
                }
                Ok(Id { id: raw })
            }
            0 => Err(ParseIdError::Empty),
            n if n < HEX_ID_LEN => Err(ParseIdError::Underflow),
            _ => Err(ParseIdError::Overflow),
        }
    }

    /// Returns the raw 20-byte form of the ID.
    pub fn as_bytes(&self) -> &[u8] {
        &self.id
    }

    /// Returns true for the special all-null object ID, which git uses
    /// as a stand-in for "no object."
    pub fn is_zero(&self) -> bool {
        self.id.iter().all(|b| *b == 0)
    }
}

impl FromStr for Id {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Id::from_hex(s.as_bytes())
    }
}

static CHARS: &[u8] = b"0123456789abcdef";

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &byte in self.id.iter() {
            f.write_char(CHARS[(byte >> 4) as usize].into())?;
            f.write_char(CHARS[(byte & 0xf) as usize].into())?;
        }

        Ok(())
    }
}

fn digit_value(c: u8) -> Result<u8, ParseIdError> {
    match c {
        b'0'..=b'9' => Ok(c - b'0'),
        b'a'..=b'f' => Ok(c - b'a' + 10),
        b'A'..=b'F' => Ok(c - b'A' + 10),
        _ => Err(ParseIdError::InvalidDigit(c as char)),
    }
}
