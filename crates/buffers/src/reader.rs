//! Wire buffer reader with cursor tracking.

use crate::BufferError;

/// A wire buffer reader over a byte slice.
///
/// Multi-byte scalars are read little-endian. Every read is bounds-checked
/// and leaves the cursor unchanged on failure, so a failed read can be
/// reported without corrupting the parse position. Cloning the reader forks
/// the cursor, which is how callers peek ahead without consuming.
///
/// # Example
///
/// ```
/// use wirebuf_buffers::Reader;
///
/// let data = [0x01, 0x03, 0x02];
/// let mut reader = Reader::new(&data);
///
/// assert_eq!(reader.try_u8(), Ok(0x01));
/// assert_eq!(reader.try_u16(), Ok(0x0203));
/// assert_eq!(reader.remaining(), 0);
/// ```
#[derive(Clone)]
pub struct Reader<'a> {
    /// The slice being read.
    pub bytes: &'a [u8],
    /// Current cursor position.
    pub x: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader for the given byte slice.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, x: 0 }
    }

    /// Returns the number of remaining bytes.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.x
    }

    /// Checks that `n` more bytes are available from the current cursor.
    #[inline]
    fn check(&self, n: usize) -> Result<(), BufferError> {
        if self.x + n > self.bytes.len() {
            Err(BufferError::EndOfBuffer)
        } else {
            Ok(())
        }
    }

    /// Peeks at the current byte without advancing the cursor.
    pub fn try_peek(&self) -> Result<u8, BufferError> {
        self.check(1)?;
        Ok(self.bytes[self.x])
    }

    /// Reads an unsigned 8-bit integer.
    #[inline]
    pub fn try_u8(&mut self) -> Result<u8, BufferError> {
        self.check(1)?;
        let val = self.bytes[self.x];
        self.x += 1;
        Ok(val)
    }

    /// Reads a signed 8-bit integer.
    #[inline]
    pub fn try_i8(&mut self) -> Result<i8, BufferError> {
        self.check(1)?;
        let val = self.bytes[self.x] as i8;
        self.x += 1;
        Ok(val)
    }

    /// Reads an unsigned 16-bit little-endian integer.
    #[inline]
    pub fn try_u16(&mut self) -> Result<u16, BufferError> {
        self.check(2)?;
        let val = u16::from_le_bytes([self.bytes[self.x], self.bytes[self.x + 1]]);
        self.x += 2;
        Ok(val)
    }

    /// Reads a signed 16-bit little-endian integer.
    #[inline]
    pub fn try_i16(&mut self) -> Result<i16, BufferError> {
        self.check(2)?;
        let val = i16::from_le_bytes([self.bytes[self.x], self.bytes[self.x + 1]]);
        self.x += 2;
        Ok(val)
    }

    /// Reads an unsigned 32-bit little-endian integer.
    #[inline]
    pub fn try_u32(&mut self) -> Result<u32, BufferError> {
        self.check(4)?;
        let val = u32::from_le_bytes([
            self.bytes[self.x],
            self.bytes[self.x + 1],
            self.bytes[self.x + 2],
            self.bytes[self.x + 3],
        ]);
        self.x += 4;
        Ok(val)
    }

    /// Reads a signed 32-bit little-endian integer.
    #[inline]
    pub fn try_i32(&mut self) -> Result<i32, BufferError> {
        self.check(4)?;
        let val = i32::from_le_bytes([
            self.bytes[self.x],
            self.bytes[self.x + 1],
            self.bytes[self.x + 2],
            self.bytes[self.x + 3],
        ]);
        self.x += 4;
        Ok(val)
    }

    /// Reads an unsigned 64-bit little-endian integer.
    #[inline]
    pub fn try_u64(&mut self) -> Result<u64, BufferError> {
        self.check(8)?;
        let val = u64::from_le_bytes([
            self.bytes[self.x],
            self.bytes[self.x + 1],
            self.bytes[self.x + 2],
            self.bytes[self.x + 3],
            self.bytes[self.x + 4],
            self.bytes[self.x + 5],
            self.bytes[self.x + 6],
            self.bytes[self.x + 7],
        ]);
        self.x += 8;
        Ok(val)
    }

    /// Reads a signed 64-bit little-endian integer.
    #[inline]
    pub fn try_i64(&mut self) -> Result<i64, BufferError> {
        self.check(8)?;
        let val = i64::from_le_bytes([
            self.bytes[self.x],
            self.bytes[self.x + 1],
            self.bytes[self.x + 2],
            self.bytes[self.x + 3],
            self.bytes[self.x + 4],
            self.bytes[self.x + 5],
            self.bytes[self.x + 6],
            self.bytes[self.x + 7],
        ]);
        self.x += 8;
        Ok(val)
    }

    /// Reads `size` raw bytes and advances the cursor.
    pub fn try_buf(&mut self, size: usize) -> Result<&'a [u8], BufferError> {
        self.check(size)?;
        let x = self.x;
        let end = x + size;
        let bin = &self.bytes[x..end];
        self.x = end;
        Ok(bin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_u8() {
        let data = [0x01, 0x02, 0x03];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_u8(), Ok(0x01));
        assert_eq!(reader.try_u8(), Ok(0x02));
        assert_eq!(reader.try_u8(), Ok(0x03));
    }

    #[test]
    fn test_try_u8_end_of_buffer() {
        let mut reader = Reader::new(&[]);
        assert_eq!(reader.try_u8(), Err(BufferError::EndOfBuffer));
        // failed reads leave the cursor in place
        assert_eq!(reader.x, 0);
    }

    #[test]
    fn test_try_u16_little_endian() {
        let data = [0x02, 0x01, 0x04, 0x03];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_u16(), Ok(0x0102));
        assert_eq!(reader.try_u16(), Ok(0x0304));
    }

    #[test]
    fn test_try_u16_partial() {
        let data = [0x01u8]; // one byte short of a u16
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_u16(), Err(BufferError::EndOfBuffer));
        assert_eq!(reader.x, 0);
    }

    #[test]
    fn test_try_u32_little_endian() {
        let data = [0x04, 0x03, 0x02, 0x01];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_u32(), Ok(0x01020304));
    }

    #[test]
    fn test_try_u32_end_of_buffer() {
        let data = [0x01u8, 0x02, 0x03]; // one byte short of a u32
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_u32(), Err(BufferError::EndOfBuffer));
        assert_eq!(reader.x, 0);
    }

    #[test]
    fn test_try_u64_roundtrip() {
        let mut writer = crate::Writer::new();
        writer.u64(0x0102030405060708u64);
        let data = writer.flush();
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_u64(), Ok(0x0102030405060708u64));
    }

    #[test]
    fn test_try_u64_end_of_buffer() {
        let data = [0u8; 7]; // one byte short of a u64
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_u64(), Err(BufferError::EndOfBuffer));
        assert_eq!(reader.x, 0);
    }

    #[test]
    fn test_try_i8_negative() {
        let data = [0xfeu8];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_i8(), Ok(-2i8));
    }

    #[test]
    fn test_try_i16_negative() {
        let mut writer = crate::Writer::new();
        writer.i16(-1000i16);
        let data = writer.flush();
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_i16(), Ok(-1000i16));
    }

    #[test]
    fn test_try_i32_negative() {
        let mut writer = crate::Writer::new();
        writer.i32(-123456);
        let data = writer.flush();
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_i32(), Ok(-123456i32));
    }

    #[test]
    fn test_try_i64_negative() {
        let mut writer = crate::Writer::new();
        writer.i64(-9_999_999_999i64);
        let data = writer.flush();
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_i64(), Ok(-9_999_999_999i64));
    }

    #[test]
    fn test_try_buf() {
        let data = [1u8, 2, 3, 4, 5];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_buf(3), Ok([1u8, 2, 3].as_ref()));
        assert_eq!(reader.x, 3);
    }

    #[test]
    fn test_try_buf_end_of_buffer() {
        let data = [1u8, 2];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.try_buf(5), Err(BufferError::EndOfBuffer));
        assert_eq!(reader.x, 0);
    }

    #[test]
    fn test_try_peek_does_not_advance() {
        let data = [0x55u8];
        let reader = Reader::new(&data);
        assert_eq!(reader.try_peek(), Ok(0x55));
        assert_eq!(reader.x, 0);
    }

    #[test]
    fn test_try_peek_end_of_buffer() {
        let data: [u8; 0] = [];
        let reader = Reader::new(&data);
        assert_eq!(reader.try_peek(), Err(BufferError::EndOfBuffer));
    }

    #[test]
    fn test_clone_forks_cursor() {
        let data = [0x01, 0x02, 0x03];
        let mut reader = Reader::new(&data);
        let mut fork = reader.clone();
        assert_eq!(fork.try_u8(), Ok(0x01));
        assert_eq!(fork.try_u8(), Ok(0x02));
        // The original cursor is untouched by reads through the fork.
        assert_eq!(reader.try_u8(), Ok(0x01));
    }

    #[test]
    fn test_remaining() {
        let data = [0u8; 10];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.remaining(), 10);
        reader.try_u32().unwrap();
        assert_eq!(reader.remaining(), 6);
    }
}
