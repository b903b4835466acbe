//! Represents the git concept of an "object" which is a tuple of
//! object type and binary data identified by the hash of the binary data.

use std::fmt;
use std::io::{self, Read, Write};

use sha1::{Digest, Sha1};

pub mod codec;
pub use codec::{MalformedObjectError, ObjectReader};

mod content_source;
pub use content_source::{ContentSource, ContentSourceOpenResult};

mod file_content_source;
pub use file_content_source::FileContentSource;

mod id;
pub use id::{Id, ParseIdError, HEX_ID_LEN, ID_LEN};

mod kind;
pub use kind::{Kind, ParseKindError};

mod read_content_source;
pub use read_content_source::ReadContentSource;

pub mod tree;
pub use tree::{MalformedTreeError, TreeBuilder, TreeEntry};

/// Describes a single object stored (or about to be stored) in a git repository.
///
/// The object's ID is computed when the object is created, by streaming the
/// canonical layout (header plus content) through SHA-1. The content itself
/// is never buffered here; it stays wherever the `ContentSource` keeps it.
pub struct Object {
    id: Id,
    kind: Kind,
    content_source: Box<dyn ContentSource>,
}

impl Object {
    /// Create a new Object.
    ///
    /// This is functionally equivalent to the
    /// [`git hash-object`](https://git-scm.com/docs/git-hash-object) command
    /// without the `-w` option that would write the object to the repo.
    pub fn new(kind: Kind, content_source: Box<dyn ContentSource>) -> io::Result<Object> {
        let mut hasher = Sha1::new();
        hasher.update(codec::header(kind, content_source.len()));

        {
            let mut reader = content_source.open()?;
            let mut buf = [0; 8192];
            let mut total = 0;

            loop {
                let n = reader.read(&mut buf)?;
                if n == 0 {
                    break;
                }
                hasher.update(&buf[..n]);
                total += n;
            }

            if total != content_source.len() {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!(
                        "content source changed size while reading ({} bytes expected, {} read)",
                        content_source.len(),
                        total
                    ),
                ));
            }
        }

        Ok(Object {
            id: codec::finish_hash(hasher),
            kind,
            content_source,
        })
    }

    /// Return the ID of the object.
    pub fn id(&self) -> &Id {
        &self.id
    }

    /// Return the kind of the object.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Return the size (in bytes) of the object.
    pub fn len(&self) -> usize {
        self.content_source.len()
    }

    /// Returns true if the object is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a `BufRead` struct which can be used for reading the content.
    pub fn open(&self) -> ContentSourceOpenResult<'_> {
        self.content_source.open()
    }

    /// Read the entire content into memory.
    pub fn to_vec(&self) -> io::Result<Vec<u8>> {
        let mut content = Vec::with_capacity(self.len());
        self.open()?.read_to_end(&mut content)?;
        Ok(content)
    }

    /// Stream the canonical layout (`"<kind> <len>\0"` followed by the
    /// content) into `w`. This is exactly the byte sequence the ID is
    /// computed from.
    pub fn write_canonical<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&codec::header(self.kind, self.len()))?;

        let mut reader = self.open()?;
        let written = io::copy(&mut reader, w)?;

        if written as usize != self.len() {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "content source changed size while writing",
            ));
        }

        Ok(())
    }

    /// Returns true if the content of the object is valid for the type.
    ///
    /// Blobs and commits are accepted as-is. Trees must be canonical;
    /// see [`tree::validate`](tree/fn.validate.html).
    pub fn is_valid(&self) -> io::Result<bool> {
        match self.kind {
            Kind::Blob | Kind::Commit => Ok(true),
            Kind::Tree => Ok(tree::validate(&self.to_vec()?).is_ok()),
        }
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Object")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("len", &self.len())
            .finish()
    }
}
