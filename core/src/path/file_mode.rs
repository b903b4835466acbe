use std::fmt::{self, Display, Formatter};

use crate::object::Kind;

/// Describes the file type as represented on disk.
///
/// Git uses a variation on the Unix file permissions flags to denote a file's
/// intended type on disk. The following values are recognized:
///
/// * `0o100644` - normal file
/// * `0o100755` - executable file
/// * `0o120000` - symbolic link
/// * `0o040000` - tree (subdirectory)
/// * `0o160000` - submodule (aka gitlink)
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FileMode {
    Normal,
    Executable,
    SymbolicLink,
    Tree,
    Submodule,
}

impl FileMode {
    /// Convert from git file-mode integer to `FileMode` enum.
    ///
    /// Returns `None` if the value is not one of the recognized constants.
    pub fn from_value(value: u32) -> Option<FileMode> {
        match value {
            0o100644 => Some(FileMode::Normal),
            0o100755 => Some(FileMode::Executable),
            0o120000 => Some(FileMode::SymbolicLink),
            0o040000 => Some(FileMode::Tree),
            0o160000 => Some(FileMode::Submodule),
            _ => None,
        }
    }

    /// Convert from `FileMode` enum to git file-mode integer.
    pub fn to_value(self) -> u32 {
        match self {
            FileMode::Normal => 0o100644,
            FileMode::Executable => 0o100755,
            FileMode::SymbolicLink => 0o120000,
            FileMode::Tree => 0o040000,
            FileMode::Submodule => 0o160000,
        }
    }

    /// Parse a mode written as ASCII octal digits, as it appears in a
    /// tree entry or in `ls-tree` output.
    ///
    /// Returns `None` if the slice is empty, contains anything other than
    /// octal digits, or names an unrecognized mode.
    pub fn from_octal_slice(octal: &[u8]) -> Option<FileMode> {
        if octal.is_empty() || octal.len() > 7 {
            return None;
        }

        let mut value = 0u32;
        for c in octal {
            match c {
                b'0'..=b'7' => value = value * 8 + u32::from(c - b'0'),
                _ => return None,
            }
        }

        FileMode::from_value(value)
    }

    /// Returns the object type an entry with this mode refers to.
    ///
    /// Only the directory mode refers to a tree. Everything else, symbolic
    /// links included, is stored as a blob.
    pub fn kind(self) -> Kind {
        match self {
            FileMode::Tree => Kind::Tree,
            _ => Kind::Blob,
        }
    }
}

/// Writes the mode the way it is stored in tree objects: octal, with no
/// leading zero (so a tree is `40000`, not `040000`).
impl Display for FileMode {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{:o}", self.to_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_value() {
        assert_eq!(FileMode::from_value(0o100644).unwrap(), FileMode::Normal);
        assert_eq!(
            FileMode::from_value(0o100755).unwrap(),
            FileMode::Executable
        );
        assert_eq!(
            FileMode::from_value(0o120000).unwrap(),
            FileMode::SymbolicLink
        );
        assert_eq!(FileMode::from_value(0o040000).unwrap(), FileMode::Tree);
        assert_eq!(FileMode::from_value(0o160000).unwrap(), FileMode::Submodule);
        assert!(FileMode::from_value(0o160001).is_none());
        assert!(FileMode::from_value(0).is_none());
        assert!(FileMode::from_value(0x100643).is_none());
    }

    #[test]
    fn to_value() {
        assert_eq!(FileMode::to_value(FileMode::Normal), 0o100644);
        assert_eq!(FileMode::to_value(FileMode::Executable), 0o100755);
        assert_eq!(FileMode::to_value(FileMode::SymbolicLink), 0o120000);
        assert_eq!(FileMode::to_value(FileMode::Tree), 0o040000);
        assert_eq!(FileMode::to_value(FileMode::Submodule), 0o160000);
    }

    #[test]
    fn from_octal_slice() {
        assert_eq!(FileMode::from_octal_slice(b"100644"), Some(FileMode::Normal));
        assert_eq!(FileMode::from_octal_slice(b"40000"), Some(FileMode::Tree));
        assert_eq!(FileMode::from_octal_slice(b"040000"), Some(FileMode::Tree));
        assert_eq!(
            FileMode::from_octal_slice(b"120000"),
            Some(FileMode::SymbolicLink)
        );

        assert_eq!(FileMode::from_octal_slice(b""), None);
        assert_eq!(FileMode::from_octal_slice(b"100648"), None);
        assert_eq!(FileMode::from_octal_slice(b"10064x"), None);
        assert_eq!(FileMode::from_octal_slice(b"100645"), None);
        assert_eq!(FileMode::from_octal_slice(b"77777777777"), None);
    }

    #[test]
    fn to_string() {
        assert_eq!(FileMode::Normal.to_string(), "100644");
        assert_eq!(FileMode::Executable.to_string(), "100755");
        assert_eq!(FileMode::SymbolicLink.to_string(), "120000");
        assert_eq!(FileMode::Tree.to_string(), "40000");
        assert_eq!(FileMode::Submodule.to_string(), "160000");
    }

    #[test]
    fn kind() {
        assert_eq!(FileMode::Tree.kind(), Kind::Tree);
        assert_eq!(FileMode::Normal.kind(), Kind::Blob);
        assert_eq!(FileMode::Executable.kind(), Kind::Blob);
        assert_eq!(FileMode::SymbolicLink.kind(), Kind::Blob);
    }
}
