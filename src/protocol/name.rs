use crate::cursor::Cursor;
use crate::error::ParseError;
use std::fmt;

/// Label length byte with both high bits set marks a compression pointer.
const POINTER_MASK: u8 = 0b1100_0000;
/// Low 14 bits of the two pointer bytes carry the backward offset.
const POINTER_OFFSET_MASK: u16 = 0x3FFF;
/// A plain length byte has both high bits clear, which caps a label at
/// the 63 bytes RFC 1035 allows.
const MAX_LABEL_LEN: usize = 63;

/// A domain name as a sequence of raw labels, without the terminating
/// empty label. Labels are opaque bytes on the wire; they are only
/// projected to text for display. Matching is case-insensitive, but the
/// original byte spelling is kept so names round-trip exactly.
#[derive(Debug, Clone, Eq)]
pub struct DomainName {
    labels: Vec<Vec<u8>>,
}

impl DomainName {
    pub fn root() -> Self {
        DomainName { labels: Vec::new() }
    }

    /// Builds a name from dotted notation, e.g. "example.com". A label
    /// longer than the 63 bytes a length byte can carry is rejected, so
    /// every name this model holds also survives the wire.
    pub fn from_dotted(name: &str) -> Result<Self, ParseError> {
        let mut labels = Vec::new();
        for label in name.split('.').filter(|s| !s.is_empty()) {
            if label.len() > MAX_LABEL_LEN {
                return Err(ParseError::BadLabel);
            }
            labels.push(label.as_bytes().to_vec());
        }
        Ok(DomainName { labels })
    }

    pub fn get_labels(&self) -> &Vec<Vec<u8>> {
        &self.labels
    }

    /// Decodes a name at the cursor, following compression pointers.
    /// Every pointer must target an offset strictly below both its own
    /// position and any target already followed, so a forward, self, or
    /// cyclic pointer fails instead of looping, and the chase is bounded
    /// by the buffer. This is stricter than RFC 1035, which would also
    /// admit a pointer aimed between the last-followed target and the
    /// current position; real encoders do not emit those. The cursor
    /// ends up just past the name's bytes at its original position,
    /// wherever the pointers led.
    pub fn from(cursor: &mut Cursor) -> Result<Self, ParseError> {
        let mut labels = Vec::new();
        let mut limit = usize::MAX;
        let mut return_to = None;
        loop {
            let position = cursor.get_current_index();
            let length = cursor.peek()?;
            if length & POINTER_MASK == POINTER_MASK {
                let target = (cursor.take_u16()? & POINTER_OFFSET_MASK) as usize;
                if target >= position || target >= limit {
                    return Err(ParseError::BadPointer);
                }
                if return_to.is_none() {
                    return_to = Some(cursor.get_current_index());
                }
                limit = target;
                cursor.at(target);
                continue;
            }
            if length & POINTER_MASK != 0 {
                return Err(ParseError::BadLabel);
            }
            cursor.take()?;
            if length == 0 {
                break;
            }
            labels.push(cursor.take_slice(length as usize)?.to_vec());
        }
        if let Some(index) = return_to {
            cursor.at(index);
        }
        Ok(DomainName { labels })
    }

    pub fn to_u8_vec(&self) -> Vec<u8> {
        let mut result = Vec::new();
        for label in &self.labels {
            result.push(label.len() as u8);
            result.extend(label);
        }
        result.push(0);
        result
    }
}

impl PartialEq for DomainName {
    fn eq(&self, other: &Self) -> bool {
        self.labels.len() == other.labels.len()
            && self
                .labels
                .iter()
                .zip(other.labels.iter())
                .all(|(a, b)| a.eq_ignore_ascii_case(b))
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.labels.is_empty() {
            return f.write_str(".");
        }
        let mut first = true;
        for label in &self.labels {
            if !first {
                f.write_str(".")?;
            }
            first = false;
            write!(f, "{}", String::from_utf8_lossy(label))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::cursor::Cursor;
    use crate::error::ParseError;
    use crate::protocol::name::DomainName;

    #[test]
    fn should_decode_plain_labels_when_call_from_given_uncompressed_name() {
        let bytes = b"\x07example\x03com\x00";
        let mut cursor = Cursor::from(&bytes[..]);

        let result = DomainName::from(&mut cursor).unwrap();

        assert_eq!("example.com", result.to_string());
        assert_eq!(bytes.len(), cursor.get_current_index())
    }

    #[test]
    fn should_follow_backward_pointer_when_call_from_given_compressed_name() {
        // "example.com" at offset 0, then "www" + pointer to offset 0.
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"\x07example\x03com\x00");
        let pointer_name_start = bytes.len();
        bytes.extend_from_slice(b"\x03www\xc0\x00");
        let mut cursor = Cursor::from(bytes.as_slice());
        cursor.at(pointer_name_start);

        let result = DomainName::from(&mut cursor).unwrap();

        assert_eq!("www.example.com", result.to_string());
        assert_eq!(bytes.len(), cursor.get_current_index())
    }

    #[test]
    fn should_fail_when_call_from_given_pointer_to_itself() {
        let bytes = b"\xc0\x00";
        let mut cursor = Cursor::from(&bytes[..]);

        let result = DomainName::from(&mut cursor);

        assert_eq!(Err(ParseError::BadPointer), result)
    }

    #[test]
    fn should_fail_when_call_from_given_forward_pointer() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"\x03www\xc0\x08\x00\x00");
        let mut cursor = Cursor::from(bytes.as_slice());

        let result = DomainName::from(&mut cursor);

        assert_eq!(Err(ParseError::BadPointer), result)
    }

    #[test]
    fn should_fail_when_call_from_given_two_pointers_forming_cycle() {
        // Name at 10 points to 4; the bytes at 4 walk forward into a
        // pointer back to 4 again.
        let mut bytes = vec![0u8; 12];
        bytes[4..10].copy_from_slice(b"\x03abc\xc0\x04");
        bytes[10..12].copy_from_slice(b"\xc0\x04");
        let mut cursor = Cursor::from(bytes.as_slice());
        cursor.at(10);

        let result = DomainName::from(&mut cursor);

        assert_eq!(Err(ParseError::BadPointer), result)
    }

    #[test]
    fn should_fail_when_call_from_given_truncated_label() {
        let bytes = b"\x07exam";
        let mut cursor = Cursor::from(&bytes[..]);

        let result = DomainName::from(&mut cursor);

        assert_eq!(Err(ParseError::ShortRead), result)
    }

    #[test]
    fn should_fail_when_call_from_given_reserved_length_bits() {
        let bytes = b"\x80abc\x00";
        let mut cursor = Cursor::from(&bytes[..]);

        let result = DomainName::from(&mut cursor);

        assert_eq!(Err(ParseError::BadLabel), result)
    }

    #[test]
    fn should_match_case_insensitively_when_compare_given_mixed_case_names() {
        let lower = DomainName::from_dotted("example.com").unwrap();
        let upper = DomainName::from_dotted("EXAMPLE.COM").unwrap();

        assert_eq!(lower, upper)
    }

    #[test]
    fn should_reject_when_call_from_dotted_given_64_byte_label() {
        let oversized = format!("{}.com", "a".repeat(64));

        let result = DomainName::from_dotted(oversized.as_str());

        assert_eq!(Err(ParseError::BadLabel), result)
    }

    #[test]
    fn should_round_trip_when_encode_then_decode_given_63_byte_label() {
        let longest = format!("{}.com", "a".repeat(63));
        let name = DomainName::from_dotted(longest.as_str()).unwrap();

        let bytes = name.to_u8_vec();
        let result = DomainName::from(&mut Cursor::from(bytes.as_slice())).unwrap();

        assert_eq!(name, result)
    }

    #[test]
    fn should_round_trip_when_encode_then_decode_given_dotted_name() {
        let name = DomainName::from_dotted("a.very.deep.example.com").unwrap();

        let bytes = name.to_u8_vec();
        let result = DomainName::from(&mut Cursor::from(bytes.as_slice())).unwrap();

        assert_eq!(name, result)
    }

    #[test]
    fn should_render_dot_when_display_given_root_name() {
        assert_eq!(".", DomainName::root().to_string())
    }
}
