//! Zlib framing for objects at rest.
//!
//! Loose objects are stored as a single zlib stream (RFC 1950: a deflate
//! stream with a two-byte header and an Adler-32 trailer). Compression is
//! exposed as a push-based [`Write`] adapter and decompression as a
//! pull-based [`Read`] adapter so that objects of any size can pass
//! through in bounded memory.
//!
//! [`Write`]: https://doc.rust-lang.org/std/io/trait.Write.html
//! [`Read`]: https://doc.rust-lang.org/std/io/trait.Read.html

use std::io::{self, BufRead, ErrorKind, Read, Write};

use flate2::{write::ZlibEncoder, Compression, Decompress, FlushDecompress, Status};
use thiserror::Error;

/// Compression level used when writing objects.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CompressionLevel {
    /// No compression (stored deflate blocks).
    None,
    /// Fast compression. This is git's default for loose objects.
    Fast,
    /// Zlib's default balance of speed and ratio.
    Default,
    /// Best compression.
    Best,
}

impl CompressionLevel {
    /// Converts to flate2 compression level.
    pub fn to_flate2(self) -> Compression {
        match self {
            CompressionLevel::None => Compression::none(),
            CompressionLevel::Fast => Compression::fast(),
            CompressionLevel::Default => Compression::default(),
            CompressionLevel::Best => Compression::best(),
        }
    }
}

impl Default for CompressionLevel {
    fn default() -> Self {
        CompressionLevel::Fast
    }
}

/// Describes why a compressed stream could not be decoded.
///
/// When returned from a [`Read`] call, this is wrapped in an `io::Error`
/// of kind `InvalidData`.
///
/// [`Read`]: https://doc.rust-lang.org/std/io/trait.Read.html
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum CorruptStreamError {
    /// The input ended before the zlib trailer was seen.
    #[error("compressed stream is truncated")]
    Truncated,

    /// The decoder rejected the input (bad header, bad deflate data,
    /// or checksum mismatch).
    #[error("compressed stream is corrupt: {0}")]
    Invalid(String),

    /// More input follows the zlib trailer.
    #[error("garbage at end of compressed stream")]
    TrailingData,
}

impl From<CorruptStreamError> for io::Error {
    fn from(err: CorruptStreamError) -> io::Error {
        io::Error::new(ErrorKind::InvalidData, err)
    }
}

/// Wrap `writer` so that everything written to it is zlib-compressed.
///
/// The caller must call `finish()` on the returned encoder to write the
/// stream trailer and recover the underlying writer.
pub fn compress<W: Write>(writer: W, level: CompressionLevel) -> ZlibEncoder<W> {
    ZlibEncoder::new(writer, level.to_flate2())
}

/// Wrap `reader` so that reads return the decompressed content of the
/// zlib stream it contains.
///
/// The zlib stream must be all that `reader` contains; any bytes after the
/// trailer fail with [`CorruptStreamError::TrailingData`]. Use
/// [`Inflater::allow_trailing_data`] when the stream is embedded in a
/// larger one.
///
/// [`CorruptStreamError::TrailingData`]: enum.CorruptStreamError.html#variant.TrailingData
/// [`Inflater::allow_trailing_data`]: struct.Inflater.html#method.allow_trailing_data
pub fn decompress<R: BufRead>(reader: R) -> Inflater<R> {
    Inflater {
        inner: reader,
        state: Decompress::new(true),
        done: false,
        allow_trailing_data: false,
    }
}

/// A [`Read`] adapter that inflates a zlib stream.
///
/// Unlike a decoder that treats end-of-input as end-of-stream, `Inflater`
/// reports a clean end of file only after the zlib trailer has been read
/// and its checksum verified. Any other ending is a [`CorruptStreamError`].
///
/// [`Read`]: https://doc.rust-lang.org/std/io/trait.Read.html
/// [`CorruptStreamError`]: enum.CorruptStreamError.html
pub struct Inflater<R> {
    inner: R,
    state: Decompress,
    done: bool,
    allow_trailing_data: bool,
}

impl<R: BufRead> Inflater<R> {
    /// Stop at the zlib trailer and leave whatever follows it unread,
    /// for recovery through [`into_inner`](#method.into_inner).
    pub fn allow_trailing_data(mut self) -> Self {
        self.allow_trailing_data = true;
        self
    }

    /// Returns the number of compressed bytes consumed so far.
    pub fn total_in(&self) -> u64 {
        self.state.total_in()
    }

    /// Returns the number of decompressed bytes produced so far.
    pub fn total_out(&self) -> u64 {
        self.state.total_out()
    }

    /// Unwrap the underlying reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: BufRead> Read for Inflater<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.done || buf.is_empty() {
            return Ok(0);
        }

        loop {
            let input = self.inner.fill_buf()?;
            let eof = input.is_empty();

            let before_in = self.state.total_in();
            let before_out = self.state.total_out();

            let flush = if eof {
                FlushDecompress::Finish
            } else {
                FlushDecompress::None
            };

            let status = self
                .state
                .decompress(input, buf, flush)
                .map_err(|err| CorruptStreamError::Invalid(err.to_string()))?;

            let consumed = (self.state.total_in() - before_in) as usize;
            let produced = (self.state.total_out() - before_out) as usize;
            self.inner.consume(consumed);

            match status {
                Status::StreamEnd => {
                    self.done = true;
                    if !self.allow_trailing_data && !self.inner.fill_buf()?.is_empty() {
                        return Err(CorruptStreamError::TrailingData.into());
                    }
                    return Ok(produced);
                }
                Status::Ok | Status::BufError => {
                    if produced > 0 {
                        return Ok(produced);
                    }
                    if eof {
                        return Err(CorruptStreamError::Truncated.into());
                    }
                }
            }
        }
    }
}
