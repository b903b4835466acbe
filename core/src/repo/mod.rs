//! Represents an abstract git object store.
//!
//! ## Design Goals
//!
//! Objects may be stored by many different mechanisms. The `gitcas_on_disk`
//! crate provides loose objects in a local `.git` directory, but you could
//! envision repositories stored entirely in memory, or on a remote file
//! system or database. Each of those only needs to supply the three
//! primitives on `Repo`; everything else is built on top of them.

use std::io::{Read, Write};

use sha1::{Digest, Sha1};

mod error;
pub use error::{Error, Result};

use crate::object::{codec, tree, Id, Kind, MalformedObjectError, Object, ObjectReader, TreeEntry};

/// A struct that implements the `Repo` trait represents a particular mechanism
/// for storing and accessing git objects.
///
/// The required methods on this trait represent the most primitive operations
/// which must be defined for a given storage architecture.
///
/// The provided methods on this trait represent the common "plumbing"
/// operations, regardless of storage mechanism.
///
/// All methods take `&self`. Implementations must tolerate concurrent writers
/// of the same object; since the ID is derived from the content, a collision
/// always carries identical bytes and counts as success.
pub trait Repo {
    /// Store an object, unless an object with the same ID is already present.
    ///
    /// Returns the object's ID either way. A reader must never be able to
    /// observe a partially written object.
    fn put_loose_object(&self, object: &Object) -> Result<Id>;

    /// Open a stored object for streaming.
    ///
    /// The header has already been read and checked when this returns;
    /// reading the content to the end verifies the stored length and the
    /// integrity of the compressed stream.
    ///
    /// Fails with `Error::ObjectNotFound` if no object is stored under `id`.
    fn open_loose_object(&self, id: &Id) -> Result<ObjectReader<Box<dyn Read>>>;

    /// Returns true if an object is stored under `id`.
    ///
    /// This only checks presence; the stored content is not examined.
    fn has_loose_object(&self, id: &Id) -> bool;

    /// Encode and store `content` as an object of the given kind.
    ///
    /// Analogous to `git hash-object -w`.
    fn write_object(&self, kind: Kind, content: Vec<u8>) -> Result<Id> {
        let object = Object::new(kind, Box::new(content))?;
        self.put_loose_object(&object)
    }

    /// Read a stored object fully into memory.
    ///
    /// The ID is recomputed from what was read and must match the ID the
    /// object was stored under.
    fn get_loose_object(&self, id: &Id) -> Result<Object> {
        let mut reader = self.open_loose_object(id)?;
        let kind = reader.kind();

        let mut content = Vec::new();
        reader.read_to_end(&mut content)?;

        let object = Object::new(kind, Box::new(content))?;
        if object.id() != id {
            return Err(MalformedObjectError::IdMismatch {
                expected: *id,
                actual: *object.id(),
            }
            .into());
        }

        Ok(object)
    }

    /// Read a stored object given its address as 40 hex digits.
    fn read_object(&self, address: &str) -> Result<Object> {
        let id: Id = address.parse()?;
        self.get_loose_object(&id)
    }

    /// Returns true if an object is stored under the given address.
    ///
    /// Fails with `Error::InvalidAddress` if the address is not 40 hex digits.
    fn object_exists(&self, address: &str) -> Result<bool> {
        let id: Id = address.parse()?;
        Ok(self.has_loose_object(&id))
    }

    /// Read a stored tree and decode its entries, in stored order.
    ///
    /// Analogous to `git ls-tree` (without recursion).
    fn read_tree(&self, address: &str) -> Result<Vec<TreeEntry>> {
        let object = self.read_object(address)?;
        if object.kind() != Kind::Tree {
            return Err(Error::UnexpectedKind {
                id: *object.id(),
                expected: Kind::Tree,
                actual: object.kind(),
            });
        }

        Ok(tree::parse(&object.to_vec()?)?)
    }
}

/// Copy the content of an opened object to `w` while recomputing its ID.
///
/// Memory use is bounded regardless of object size. Content is written as it
/// is read, so `w` may already hold the content when this fails with
/// `MalformedObject(IdMismatch)`.
pub fn copy_verified<R: Read, W: Write + ?Sized>(
    id: &Id,
    mut reader: ObjectReader<R>,
    w: &mut W,
) -> Result<u64> {
    let mut hasher = Sha1::new();
    hasher.update(codec::header(reader.kind(), reader.len()));

    let mut buf = [0u8; 8192];
    let mut total = 0u64;

    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
        w.write_all(&buf[..n])?;
        total += n as u64;
    }

    let actual = codec::finish_hash(hasher);
    if actual != *id {
        return Err(MalformedObjectError::IdMismatch {
            expected: *id,
            actual,
        }
        .into());
    }

    Ok(total)
}
