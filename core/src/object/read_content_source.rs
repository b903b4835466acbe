use std::io::{self, Cursor, Error, ErrorKind, Read};

use super::{ContentSource, ContentSourceOpenResult};

/// Implements [`ContentSource`] to read content from
/// an arbitrary [`Read`] struct (often `stdin`).
///
/// A plain [`Read`] can only be consumed once, but an object's content is
/// read twice (once to compute its ID, once to store it), so this buffers
/// the content in memory.
///
/// For safety, it will fail if the source content exceeds an
/// arbitrary limit (currently 20MB).
///
/// [`ContentSource`]: trait.ContentSource.html
/// [`Read`]: https://doc.rust-lang.org/std/io/trait.Read.html
pub struct ReadContentSource {
    content: Vec<u8>,
}

const MAX_SIZE: usize = 20 * 1024 * 1024;

impl ReadContentSource {
    /// Create a `ReadContentSource` for an arbitrary [`Read`] struct.
    ///
    /// [`Read`]: https://doc.rust-lang.org/std/io/trait.Read.html
    pub fn new<R: Read>(r: R) -> io::Result<ReadContentSource> {
        let mut content: Vec<u8> = Vec::new();

        let mut take = r.take(MAX_SIZE as u64 + 1);
        let size = take.read_to_end(&mut content)?;
        if size > MAX_SIZE {
            Err(Error::new(
                ErrorKind::InvalidData,
                format!("read beyond {} byte limit", MAX_SIZE),
            ))
        } else {
            Ok(ReadContentSource { content })
        }
    }
}

impl ContentSource for ReadContentSource {
    fn len(&self) -> usize {
        self.content.len()
    }

    fn open(&self) -> ContentSourceOpenResult<'_> {
        Ok(Box::new(Cursor::new(&self.content)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path() {
        let tc: Vec<u8> = b"example\n\0\n".to_vec();
        let rcs = ReadContentSource::new(Cursor::new(tc)).unwrap();

        assert_eq!(rcs.len(), 10);

        for _ in 0..2 {
            let mut r = rcs.open().unwrap();
            let mut buf = [0; 20];
            assert_eq!(r.read(&mut buf).unwrap(), 10);
            assert_eq!(&buf[..10], b"example\n\0\n");
        }
    }

    struct InfiniteRead {}

    impl Read for InfiniteRead {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            // Yes, this is evil!
            Ok(buf.len())
        }
    }

    #[test]
    fn infinite_read_stream() {
        let evil = InfiniteRead {};
        let err = ReadContentSource::new(evil).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }
}
