use std::io::{BufRead, Cursor, Result};

/// Result type for [`ContentSource.open()`] call.
///
/// [`ContentSource.open()`]: trait.ContentSource.html#tymethod.open
pub type ContentSourceOpenResult<'a> = Result<Box<dyn BufRead + 'a>>;

/// Trait used for reading git object content from various sources.
///
/// A content source may be opened more than once: computing an object's ID
/// and writing the object to a repository each stream through the content.
pub trait ContentSource {
    /// Returns the length (in bytes) of the content.
    fn len(&self) -> usize;

    /// Returns true if the content is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a [`BufRead`] struct which can be used for reading the content.
    ///
    /// [`BufRead`]: https://doc.rust-lang.org/std/io/trait.BufRead.html
    fn open(&self) -> ContentSourceOpenResult<'_>;
}

impl ContentSource for Vec<u8> {
    fn len(&self) -> usize {
        self.len()
    }

    fn open(&self) -> ContentSourceOpenResult<'_> {
        Ok(Box::new(Cursor::new(self)))
    }
}

impl ContentSource for String {
    fn len(&self) -> usize {
        self.len()
    }

    fn open(&self) -> ContentSourceOpenResult<'_> {
        Ok(Box::new(Cursor::new(self.as_bytes())))
    }
}
