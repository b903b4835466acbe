//! Reading and writing the binary content of tree objects.
//!
//! A tree's content is a sequence of records, each laid out as
//!
//! ```text
//! <mode: ASCII octal digits> SP <name> NUL <id: 20 raw bytes>
//! ```
//!
//! The ID is binary, so any of its bytes may equal a space, NUL, or newline.
//! Records are therefore decoded by scanning for the two delimiters that
//! end the text fields and then taking exactly 20 bytes, never by
//! splitting the whole content on delimiter bytes.

use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt::{self, Display, Formatter};

use thiserror::Error;

use super::id::ID_LEN;
use super::{Id, Kind};
use crate::path::{check_segment, FileMode, PathMode, PathSegmentError};

/// Describes why tree content is not well-formed.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum MalformedTreeError {
    #[error("tree entry at offset {offset} ends inside its mode")]
    TruncatedMode { offset: usize },

    #[error("tree entry at offset {offset} has invalid mode `{mode}`")]
    InvalidMode { offset: usize, mode: String },

    #[error("tree entry at offset {offset} ends inside its name")]
    TruncatedName { offset: usize },

    #[error("tree entry at offset {offset} ends inside its object ID")]
    TruncatedId { offset: usize },

    #[error("tree entry `{name}` has unrecognized mode `{mode}`")]
    UnknownMode { name: String, mode: String },

    #[error("tree entry `{name}` has an invalid name: {source}")]
    InvalidName {
        name: String,
        source: PathSegmentError,
    },

    #[error("tree has more than one entry named `{0}`")]
    DuplicateName(String),

    #[error("tree entry `{0}` is out of order")]
    OutOfOrder(String),

    #[error("tree entry `{0}` refers to the null object ID")]
    ZeroId(String),
}

/// One entry of a tree: a named reference to a blob or a sub-tree.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TreeEntry {
    mode: String,
    name: Vec<u8>,
    id: Id,
}

impl TreeEntry {
    /// Create an entry. The name is not validated here; see `TreeBuilder`.
    pub fn new<N: Into<Vec<u8>>>(mode: FileMode, name: N, id: Id) -> TreeEntry {
        TreeEntry {
            mode: mode.to_string(),
            name: name.into(),
            id,
        }
    }

    /// Returns the mode exactly as it is stored (e.g. `100644`, `40000`).
    pub fn mode(&self) -> &str {
        &self.mode
    }

    /// Returns the mode as a `FileMode`, or `None` if it isn't a recognized mode.
    pub fn file_mode(&self) -> Option<FileMode> {
        FileMode::from_octal_slice(self.mode.as_bytes())
    }

    /// Returns the type of object this entry refers to.
    ///
    /// The directory mode maps to `Kind::Tree`; every other mode maps to `Kind::Blob`.
    pub fn kind(&self) -> Kind {
        match self.file_mode() {
            Some(FileMode::Tree) => Kind::Tree,
            _ => Kind::Blob,
        }
    }

    /// Returns the raw bytes of the entry's name.
    pub fn name(&self) -> &[u8] {
        &self.name
    }

    /// Returns the name, replacing any invalid UTF-8 sequences.
    pub fn name_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.name)
    }

    /// Returns the ID of the object this entry refers to.
    pub fn id(&self) -> &Id {
        &self.id
    }

    fn path_mode(&self) -> PathMode<'_> {
        PathMode {
            path: &self.name,
            mode: self.file_mode().unwrap_or(FileMode::Normal),
        }
    }

    fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.mode.as_bytes());
        out.push(b' ');
        out.extend_from_slice(&self.name);
        out.push(0);
        out.extend_from_slice(self.id.as_bytes());
    }
}

/// Formats the entry the way `git ls-tree` does:
/// `<6-digit mode> SP <type> SP <id> TAB <name>`.
impl Display for TreeEntry {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(
            f,
            "{:0>6} {} {}\t{}",
            self.mode,
            self.kind(),
            self.id,
            self.name_lossy()
        )
    }
}

/// Decode all of the entries in tree content, in stored order.
pub fn parse(content: &[u8]) -> Result<Vec<TreeEntry>, MalformedTreeError> {
    entries(content).collect()
}

/// Returns an iterator that decodes tree content one entry at a time.
///
/// The iterator stops after the first error.
pub fn entries(content: &[u8]) -> TreeEntries<'_> {
    TreeEntries {
        content,
        offset: 0,
        failed: false,
    }
}

/// Iterator returned by [`entries`](fn.entries.html).
pub struct TreeEntries<'a> {
    content: &'a [u8],
    offset: usize,
    failed: bool,
}

impl<'a> Iterator for TreeEntries<'a> {
    type Item = Result<TreeEntry, MalformedTreeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.offset >= self.content.len() {
            return None;
        }

        match parse_entry(self.content, self.offset) {
            Ok((entry, next)) => {
                self.offset = next;
                Some(Ok(entry))
            }
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

fn parse_entry(content: &[u8], offset: usize) -> Result<(TreeEntry, usize), MalformedTreeError> {
    let rest = &content[offset..];

    let mode_end = rest
        .iter()
        .position(|b| *b == b' ')
        .ok_or(MalformedTreeError::TruncatedMode { offset })?;

    let mode = &rest[..mode_end];
    if mode.is_empty() || !mode.iter().all(|b| (b'0'..=b'7').contains(b)) {
        return Err(MalformedTreeError::InvalidMode {
            offset,
            mode: String::from_utf8_lossy(mode).into_owned(),
        });
    }

    let name_start = mode_end + 1;
    let name_len = rest[name_start..]
        .iter()
        .position(|b| *b == 0)
        .ok_or(MalformedTreeError::TruncatedName { offset })?;
    let name = &rest[name_start..name_start + name_len];

    let id_start = name_start + name_len + 1;
    let id_end = id_start + ID_LEN;
    let raw_id = rest
        .get(id_start..id_end)
        .ok_or(MalformedTreeError::TruncatedId { offset })?;

    let mut id = [0u8; ID_LEN];
    id.copy_from_slice(raw_id);

    let entry = TreeEntry {
        // Mode is known to be ASCII octal digits at this point.
        mode: String::from_utf8_lossy(mode).into_owned(),
        name: name.to_vec(),
        id: Id::from_array(id),
    };

    Ok((entry, offset + id_end))
}

/// Check that tree content is not only parseable but canonical: entries
/// are in git's order with no duplicate names, every mode is recognized
/// and written without a leading zero, every name is a single valid path
/// segment, and no entry refers to the null ID.
pub fn validate(content: &[u8]) -> Result<(), MalformedTreeError> {
    let mut names: HashSet<Vec<u8>> = HashSet::new();
    let mut previous: Option<TreeEntry> = None;

    for entry in entries(content) {
        let entry = entry?;
        let name = || entry.name_lossy().into_owned();

        if entry.file_mode().is_none() || entry.mode.starts_with('0') {
            return Err(MalformedTreeError::UnknownMode {
                name: name(),
                mode: entry.mode.clone(),
            });
        }

        if let Err(source) = check_segment(&entry.name) {
            return Err(MalformedTreeError::InvalidName {
                name: name(),
                source,
            });
        }

        if entry.id.is_zero() {
            return Err(MalformedTreeError::ZeroId(name()));
        }

        if !names.insert(entry.name.clone()) {
            return Err(MalformedTreeError::DuplicateName(name()));
        }

        if let Some(previous) = &previous {
            if entry.path_mode() <= previous.path_mode() {
                return Err(MalformedTreeError::OutOfOrder(name()));
            }
        }

        previous = Some(entry);
    }

    Ok(())
}

/// Assembles the content of a new tree object.
///
/// Entries may be inserted in any order; `build` sorts them into git's
/// canonical order so that equal listings always produce equal content
/// (and therefore the same ID).
#[derive(Debug, Default)]
pub struct TreeBuilder {
    entries: Vec<TreeEntry>,
    names: HashSet<Vec<u8>>,
}

impl TreeBuilder {
    pub fn new() -> TreeBuilder {
        TreeBuilder::default()
    }

    /// Add an entry.
    ///
    /// Fails if `name` is not a valid single path segment or if an entry
    /// with the same name (of any mode) was already inserted.
    pub fn insert<N: Into<Vec<u8>>>(
        &mut self,
        mode: FileMode,
        name: N,
        id: Id,
    ) -> Result<&mut TreeBuilder, MalformedTreeError> {
        let entry = TreeEntry::new(mode, name, id);

        if let Err(source) = check_segment(&entry.name) {
            return Err(MalformedTreeError::InvalidName {
                name: entry.name_lossy().into_owned(),
                source,
            });
        }

        if !self.names.insert(entry.name.clone()) {
            return Err(MalformedTreeError::DuplicateName(
                entry.name_lossy().into_owned(),
            ));
        }

        self.entries.push(entry);
        Ok(self)
    }

    /// Returns the number of entries inserted so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no entries have been inserted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sort the entries and serialize them as tree content.
    pub fn build(mut self) -> Vec<u8> {
        self.entries.sort_by(|a, b| a.path_mode().cmp(&b.path_mode()));

        let mut content = Vec::new();
        for entry in &self.entries {
            entry.write_to(&mut content);
        }
        content
    }
}
