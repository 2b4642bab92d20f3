//! Little-endian binary cursor over the engine's event and query buffers.
//!
//! Every buffer the engine hands us is a flat little-endian byte stream
//! with no framing beyond what the individual decoders know about. The
//! decoders all follow the same pattern: "read one record, check if the
//! buffer is exhausted, repeat". Running out of input mid-read is
//! therefore *not* an error at this level — a short read yields zero and
//! the caller's loop terminates on `is_empty`. Decoders that need hard
//! truncation errors (the query parser) use [`Cursor::read_bytes`],
//! which reports short reads as `None`.

/// A read cursor over a borrowed byte slice.
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Takes the next `len` bytes, or `None` (consuming nothing) if
    /// fewer remain.
    pub fn read_bytes(&mut self, len: usize) -> Option<&'a [u8]> {
        if self.remaining() < len {
            return None;
        }
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Some(slice)
    }

    pub fn read_u8(&mut self) -> u8 {
        let mut buf = [0u8; 1];
        if let Some(b) = self.read_bytes(1) {
            buf.copy_from_slice(b);
        }
        buf[0]
    }

    pub fn read_u16(&mut self) -> u16 {
        let mut buf = [0u8; 2];
        if let Some(b) = self.read_bytes(2) {
            buf.copy_from_slice(b);
        }
        u16::from_le_bytes(buf)
    }

    pub fn read_u32(&mut self) -> u32 {
        let mut buf = [0u8; 4];
        if let Some(b) = self.read_bytes(4) {
            buf.copy_from_slice(b);
        }
        u32::from_le_bytes(buf)
    }

    pub fn read_u64(&mut self) -> u64 {
        let mut buf = [0u8; 8];
        if let Some(b) = self.read_bytes(8) {
            buf.copy_from_slice(b);
        }
        u64::from_le_bytes(buf)
    }

    pub fn read_i8(&mut self) -> i8 {
        self.read_u8() as i8
    }

    pub fn read_i32(&mut self) -> i32 {
        self.read_u32() as i32
    }
}

// ---------------------------------------------------------------------------
// ByteWriter
// ---------------------------------------------------------------------------

/// The write-side mirror of [`Cursor`]: little-endian appends into a
/// growable buffer. Used by the response encoder and by tests that
/// synthesize engine event buffers.
#[derive(Debug, Default)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    pub fn write_u16(&mut self, v: u16) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_i8(&mut self, v: i8) {
        self.buf.push(v as u8);
    }

    pub fn write_i32(&mut self, v: i32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_bytes(&mut self, b: &[u8]) {
        self.buf.extend_from_slice(b);
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_little_endian() {
        let mut c = Cursor::new(&[0x01, 0x02, 0x03, 0x04, 0x05]);
        assert_eq!(c.read_u32(), 0x0403_0201);
        assert_eq!(c.read_u8(), 0x05);
        assert!(c.is_empty());
    }

    #[test]
    fn short_read_yields_zero() {
        let mut c = Cursor::new(&[0xff, 0xff]);
        // Not enough bytes for a u32: nothing is consumed, zero comes back.
        assert_eq!(c.read_u32(), 0);
        assert_eq!(c.remaining(), 2);
        assert_eq!(c.read_u16(), 0xffff);
        assert_eq!(c.read_u64(), 0);
    }

    #[test]
    fn read_bytes_reports_truncation() {
        let mut c = Cursor::new(&[1, 2, 3]);
        assert!(c.read_bytes(4).is_none());
        assert_eq!(c.read_bytes(3), Some(&[1u8, 2, 3][..]));
    }

    #[test]
    fn writer_round_trips() {
        let mut w = ByteWriter::new();
        w.write_u8(7);
        w.write_u32(0xdead_beef);
        w.write_i32(-1);
        let bytes = w.into_bytes();

        let mut c = Cursor::new(&bytes);
        assert_eq!(c.read_u8(), 7);
        assert_eq!(c.read_u32(), 0xdead_beef);
        assert_eq!(c.read_i32(), -1);
    }
}
