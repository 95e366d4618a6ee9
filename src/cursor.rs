//! Big endian byte cursor and writer shared by the codecs

use crate::Error;

/// Size of the backing buffer a [`ByteWriter`] starts with. Large enough to
/// hold the encoding of a typical region.
pub const REGION_BUFFER_SIZE: usize = 128 * 1024;

#[inline]
fn get_split<const N: usize>(data: &[u8]) -> Option<([u8; N], &[u8])> {
    if data.len() < N {
        return None;
    }

    let (head, rest) = data.split_at(N);
    let mut out = [0u8; N];
    out.copy_from_slice(head);
    Some((out, rest))
}

/// A position tracked reader over a borrowed buffer.
///
/// All multi-byte values are big endian. Reads that would run past the end of
/// the buffer fail with an [`ErrorKind::Eof`](crate::ErrorKind::Eof) and leave
/// the position untouched.
///
/// ```
/// use rscodec::ByteCursor;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut cursor = ByteCursor::new(&[0x01, 0x02, 0xff]);
/// assert_eq!(cursor.read_u16()?, 0x0102);
/// assert_eq!(cursor.read_i8()?, -1);
/// assert!(cursor.read_u8().is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> ByteCursor<'a> {
    /// Creates a cursor positioned at the start of the data
    #[inline]
    pub fn new(data: &'a [u8]) -> Self {
        ByteCursor { data, position: 0 }
    }

    /// The current read position
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Moves the read position. Positions past the end are clamped to the end
    /// of the buffer.
    #[inline]
    pub fn set_position(&mut self, position: usize) {
        self.position = position.min(self.data.len());
    }

    /// Number of bytes left to read
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    /// The unread portion of the buffer
    #[inline]
    pub fn remainder(&self) -> &'a [u8] {
        &self.data[self.position..]
    }

    #[inline]
    fn take<const N: usize>(&mut self) -> Result<[u8; N], Error> {
        let (head, _) =
            get_split::<N>(self.remainder()).ok_or_else(|| Error::eof(self.position, N))?;
        self.position += N;
        Ok(head)
    }

    #[inline]
    pub fn read_u8(&mut self) -> Result<u8, Error> {
        self.take::<1>().map(|[x]| x)
    }

    #[inline]
    pub fn read_i8(&mut self) -> Result<i8, Error> {
        self.take::<1>().map(|[x]| x as i8)
    }

    #[inline]
    pub fn read_u16(&mut self) -> Result<u16, Error> {
        self.take::<2>().map(u16::from_be_bytes)
    }

    #[inline]
    pub fn read_i16(&mut self) -> Result<i16, Error> {
        self.take::<2>().map(i16::from_be_bytes)
    }

    /// Advances past `amount` bytes without interpreting them
    #[inline]
    pub fn skip(&mut self, amount: usize) -> Result<(), Error> {
        if amount > self.remaining() {
            return Err(Error::eof(self.position, amount));
        }

        self.position += amount;
        Ok(())
    }
}

/// An append only big endian writer
#[derive(Debug)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    /// Creates a writer with a backing buffer sized for one region
    pub fn new() -> Self {
        ByteWriter::with_capacity(REGION_BUFFER_SIZE)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        ByteWriter {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Number of bytes written so far
    #[inline]
    pub fn position(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    #[inline]
    pub fn write_u16(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the writer, returning the written bytes
    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}

impl Default for ByteWriter {
    fn default() -> Self {
        ByteWriter::new()
    }
}
