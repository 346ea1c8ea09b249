use crate::error::ParseError;

/// Sequential reader over a raw message. Every read is bounds checked:
/// running off the end is a `ShortRead`, never a panic. The position is
/// freely repositionable so name decompression can chase a pointer and
/// come back.
pub struct Cursor<'a> {
    buf: &'a [u8],
    current: usize,
}

impl<'a> Cursor<'a> {
    pub fn from(buf: &'a [u8]) -> Self {
        Cursor { buf, current: 0 }
    }

    pub fn at(&mut self, index: usize) {
        self.current = index;
    }

    pub fn get_current_index(&self) -> usize {
        self.current
    }

    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.current)
    }

    pub fn peek(&self) -> Result<u8, ParseError> {
        self.buf.get(self.current).copied().ok_or(ParseError::ShortRead)
    }

    pub fn take(&mut self) -> Result<u8, ParseError> {
        let result = self.peek()?;
        self.current += 1;
        Ok(result)
    }

    pub fn take_u16(&mut self) -> Result<u16, ParseError> {
        Ok(u16::from_be_bytes([self.take()?, self.take()?]))
    }

    pub fn take_u32(&mut self) -> Result<u32, ParseError> {
        Ok(u32::from_be_bytes([
            self.take()?,
            self.take()?,
            self.take()?,
            self.take()?,
        ]))
    }

    pub fn take_slice(&mut self, len: usize) -> Result<&'a [u8], ParseError> {
        if self.remaining() < len {
            return Err(ParseError::ShortRead);
        }
        let result = &self.buf[self.current..self.current + len];
        self.current += len;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use crate::cursor::Cursor;
    use crate::error::ParseError;

    #[test]
    fn should_return_bytes_in_order_when_call_take_given_filled_buf() {
        let mut cursor = Cursor::from(&[1u8, 2, 3][..]);

        assert_eq!(Ok(1), cursor.take());
        assert_eq!(Ok(2), cursor.take());
        assert_eq!(Ok(3), cursor.take())
    }

    #[test]
    fn should_return_short_read_when_call_take_given_exhausted_buf() {
        let mut cursor = Cursor::from(&[][..]);

        let result = cursor.take();

        assert_eq!(Err(ParseError::ShortRead), result)
    }

    #[test]
    fn should_read_big_endian_when_call_take_u16_and_u32() {
        let mut cursor = Cursor::from(&[0x12u8, 0x34, 0x00, 0x00, 0x01, 0x00][..]);

        assert_eq!(Ok(0x1234), cursor.take_u16());
        assert_eq!(Ok(0x0000_0100), cursor.take_u32())
    }

    #[test]
    fn should_return_short_read_when_call_take_slice_given_len_past_end() {
        let mut cursor = Cursor::from(&[1u8, 2][..]);

        let result = cursor.take_slice(3);

        assert_eq!(Err(ParseError::ShortRead), result)
    }

    #[test]
    fn should_read_from_new_position_when_call_at_given_earlier_index() {
        let mut cursor = Cursor::from(&[1u8, 2, 3][..]);
        cursor.take().unwrap();
        cursor.take().unwrap();

        cursor.at(0);

        assert_eq!(Ok(1), cursor.take());
        assert_eq!(1, cursor.get_current_index())
    }
}
