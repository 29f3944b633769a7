//! Forward-only byte reader over one instruction.

use crate::DecodeError;

/// Architectural upper bound on the length of one instruction.
pub const MAX_INSTRUCTION_LEN: usize = 15;

/// Sequential reader that also tracks the instruction pointer, so branch
/// operands can compute their absolute target from the bytes consumed so far.
#[derive(Debug, Clone)]
pub(crate) struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
    start: u64,
}

impl<'a> Cursor<'a> {
    pub fn new(bytes: &'a [u8], ip: u64) -> Self {
        Self { bytes, pos: 0, start: ip }
    }

    /// Bytes consumed so far.
    pub fn len(&self) -> usize {
        self.pos
    }

    /// Instruction pointer just past the last consumed byte.
    pub fn ip(&self) -> u64 {
        self.start.wrapping_add(self.pos as u64)
    }

    pub fn consumed(&self) -> &'a [u8] {
        &self.bytes[..self.pos]
    }

    /// Looks at the next byte without consuming it.
    pub fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        let end = self.pos + n;
        if end > MAX_INSTRUCTION_LEN {
            return Err(DecodeError::too_long(self.start, MAX_INSTRUCTION_LEN));
        }
        if end > self.bytes.len() {
            return Err(DecodeError::truncated(self.start, end, self.bytes.len()));
        }
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    pub fn u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take(1)?[0])
    }

    pub fn u16(&mut self) -> Result<u16, DecodeError> {
        let b = self.take(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    pub fn u32(&mut self) -> Result<u32, DecodeError> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn u64(&mut self) -> Result<u64, DecodeError> {
        let lo = self.u32()? as u64;
        let hi = self.u32()? as u64;
        Ok(lo | (hi << 32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_little_endian_fetches() {
        let bytes = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09];
        let mut cur = Cursor::new(&bytes, 0x1000);
        assert_eq!(cur.u8().unwrap(), 0x01);
        assert_eq!(cur.u16().unwrap(), 0x0302);
        assert_eq!(cur.u32().unwrap(), 0x0706_0504);
        assert_eq!(cur.ip(), 0x1007);
        assert_eq!(cur.peek(), Some(0x08));
        assert_eq!(cur.consumed(), &bytes[..7]);
    }

    #[test]
    fn test_truncated_fetch_reports_need() {
        let mut cur = Cursor::new(&[0xb8, 0x01], 0x40);
        cur.u8().unwrap();
        let err = cur.u32().unwrap_err();
        assert_eq!(err, DecodeError::truncated(0x40, 5, 2));
        // A failed fetch consumes nothing.
        assert_eq!(cur.len(), 1);
    }

    #[test]
    fn test_length_limit() {
        let bytes = [0x66; 32];
        let mut cur = Cursor::new(&bytes, 0);
        for _ in 0..MAX_INSTRUCTION_LEN {
            cur.u8().unwrap();
        }
        assert!(matches!(cur.u8(), Err(DecodeError::TooLong { .. })));
    }
}
