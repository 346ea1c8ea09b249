use crate::cursor::Cursor;
use crate::error::ParseError;
use crate::protocol::name::DomainName;
use std::net::{Ipv4Addr, Ipv6Addr};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum RecordType {
    A,
    Ns,
    Cname,
    Soa,
    Ptr,
    Mx,
    Txt,
    Aaaa,
    Srv,
    Other(u16),
}

impl From<u16> for RecordType {
    fn from(code: u16) -> Self {
        match code {
            1 => RecordType::A,
            2 => RecordType::Ns,
            5 => RecordType::Cname,
            6 => RecordType::Soa,
            12 => RecordType::Ptr,
            15 => RecordType::Mx,
            16 => RecordType::Txt,
            28 => RecordType::Aaaa,
            33 => RecordType::Srv,
            other => RecordType::Other(other),
        }
    }
}

impl From<RecordType> for u16 {
    fn from(r_type: RecordType) -> Self {
        match r_type {
            RecordType::A => 1,
            RecordType::Ns => 2,
            RecordType::Cname => 5,
            RecordType::Soa => 6,
            RecordType::Ptr => 12,
            RecordType::Mx => 15,
            RecordType::Txt => 16,
            RecordType::Aaaa => 28,
            RecordType::Srv => 33,
            RecordType::Other(other) => other,
        }
    }
}

/// Typed resource data. Unrecognized types keep their raw bytes so a
/// message carrying them still parses and re-encodes.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum RecordData {
    A(Ipv4Addr),
    Aaaa(Ipv6Addr),
    Cname(DomainName),
    Ns(DomainName),
    Ptr(DomainName),
    Mx {
        preference: u16,
        exchange: DomainName,
    },
    Srv {
        priority: u16,
        weight: u16,
        port: u16,
        target: DomainName,
    },
    Soa {
        mname: DomainName,
        rname: DomainName,
        serial: u32,
        refresh: u32,
        retry: u32,
        expire: u32,
        minimum: u32,
    },
    Txt(Vec<u8>),
    Other(Vec<u8>),
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Record {
    pub name: DomainName,
    pub r_type: RecordType,
    pub class: u16,
    pub ttl: u32,
    pub data: RecordData,
}

impl Record {
    pub fn from(cursor: &mut Cursor) -> Result<Self, ParseError> {
        let name = DomainName::from(cursor)?;
        let r_type = RecordType::from(cursor.take_u16()?);
        let class = cursor.take_u16()?;
        let ttl = cursor.take_u32()?;
        let data_len = cursor.take_u16()? as usize;
        if cursor.remaining() < data_len {
            return Err(ParseError::ShortRead);
        }
        let data_start = cursor.get_current_index();
        let data = read_data(cursor, r_type, data_len)?;
        // The typed payload must account for every declared rdata byte.
        if cursor.get_current_index() - data_start != data_len {
            return Err(ParseError::DataLengthMismatch);
        }
        Ok(Record {
            name,
            r_type,
            class,
            ttl,
            data,
        })
    }

    pub fn to_u8_vec(&self) -> Vec<u8> {
        let mut result = self.name.to_u8_vec();
        result.extend(&u16::from(self.r_type).to_be_bytes());
        result.extend(&self.class.to_be_bytes());
        result.extend(&self.ttl.to_be_bytes());
        let data = write_data(&self.data);
        result.extend(&(data.len() as u16).to_be_bytes());
        result.extend(data);
        result
    }
}

fn read_data(cursor: &mut Cursor, r_type: RecordType, data_len: usize) -> Result<RecordData, ParseError> {
    let data = match r_type {
        RecordType::A => {
            let octets = cursor.take_slice(4)?;
            RecordData::A(Ipv4Addr::new(octets[0], octets[1], octets[2], octets[3]))
        }
        RecordType::Aaaa => {
            let mut octets = [0u8; 16];
            octets.copy_from_slice(cursor.take_slice(16)?);
            RecordData::Aaaa(Ipv6Addr::from(octets))
        }
        RecordType::Cname => RecordData::Cname(DomainName::from(cursor)?),
        RecordType::Ns => RecordData::Ns(DomainName::from(cursor)?),
        RecordType::Ptr => RecordData::Ptr(DomainName::from(cursor)?),
        RecordType::Mx => RecordData::Mx {
            preference: cursor.take_u16()?,
            exchange: DomainName::from(cursor)?,
        },
        RecordType::Srv => RecordData::Srv {
            priority: cursor.take_u16()?,
            weight: cursor.take_u16()?,
            port: cursor.take_u16()?,
            target: DomainName::from(cursor)?,
        },
        RecordType::Soa => RecordData::Soa {
            mname: DomainName::from(cursor)?,
            rname: DomainName::from(cursor)?,
            serial: cursor.take_u32()?,
            refresh: cursor.take_u32()?,
            retry: cursor.take_u32()?,
            expire: cursor.take_u32()?,
            minimum: cursor.take_u32()?,
        },
        RecordType::Txt => RecordData::Txt(cursor.take_slice(data_len)?.to_vec()),
        RecordType::Other(_) => RecordData::Other(cursor.take_slice(data_len)?.to_vec()),
    };
    Ok(data)
}

fn write_data(data: &RecordData) -> Vec<u8> {
    match data {
        RecordData::A(address) => address.octets().to_vec(),
        RecordData::Aaaa(address) => address.octets().to_vec(),
        RecordData::Cname(name) | RecordData::Ns(name) | RecordData::Ptr(name) => name.to_u8_vec(),
        RecordData::Mx {
            preference,
            exchange,
        } => {
            let mut result = preference.to_be_bytes().to_vec();
            result.extend(exchange.to_u8_vec());
            result
        }
        RecordData::Srv {
            priority,
            weight,
            port,
            target,
        } => {
            let mut result = Vec::new();
            result.extend(&priority.to_be_bytes());
            result.extend(&weight.to_be_bytes());
            result.extend(&port.to_be_bytes());
            result.extend(target.to_u8_vec());
            result
        }
        RecordData::Soa {
            mname,
            rname,
            serial,
            refresh,
            retry,
            expire,
            minimum,
        } => {
            let mut result = mname.to_u8_vec();
            result.extend(rname.to_u8_vec());
            result.extend(&serial.to_be_bytes());
            result.extend(&refresh.to_be_bytes());
            result.extend(&retry.to_be_bytes());
            result.extend(&expire.to_be_bytes());
            result.extend(&minimum.to_be_bytes());
            result
        }
        RecordData::Txt(bytes) | RecordData::Other(bytes) => bytes.clone(),
    }
}

#[cfg(test)]
mod tests {
    use crate::cursor::Cursor;
    use crate::error::ParseError;
    use crate::protocol::name::DomainName;
    use crate::protocol::question::CLASS_IN;
    use crate::protocol::record::{Record, RecordData, RecordType};
    use std::net::{Ipv4Addr, Ipv6Addr};

    fn record_of(r_type: RecordType, data: RecordData) -> Record {
        Record {
            name: DomainName::from_dotted("example.com").unwrap(),
            r_type,
            class: CLASS_IN,
            ttl: 300,
            data,
        }
    }

    fn round_trip(record: &Record) -> Record {
        let bytes = record.to_u8_vec();
        Record::from(&mut Cursor::from(bytes.as_slice())).unwrap()
    }

    #[test]
    fn should_round_trip_when_encode_then_decode_given_a_record() {
        let record = record_of(RecordType::A, RecordData::A(Ipv4Addr::new(127, 0, 0, 1)));

        assert_eq!(record, round_trip(&record))
    }

    #[test]
    fn should_render_dotted_string_when_project_address_given_a_record() {
        let record = record_of(RecordType::A, RecordData::A(Ipv4Addr::new(127, 0, 0, 1)));

        match record.data {
            RecordData::A(address) => assert_eq!("127.0.0.1", address.to_string()),
            other => panic!("not an A record: {:?}", other),
        }
    }

    #[test]
    fn should_round_trip_when_encode_then_decode_given_aaaa_record() {
        let address: Ipv6Addr = "2a00:1450:4001:809::200e".parse().unwrap();
        let record = record_of(RecordType::Aaaa, RecordData::Aaaa(address));

        assert_eq!(record, round_trip(&record))
    }

    #[test]
    fn should_round_trip_when_encode_then_decode_given_name_data_records() {
        for (r_type, data) in vec![
            (
                RecordType::Cname,
                RecordData::Cname(DomainName::from_dotted("alias.example.com").unwrap()),
            ),
            (
                RecordType::Ns,
                RecordData::Ns(DomainName::from_dotted("a.iana-servers.net").unwrap()),
            ),
            (
                RecordType::Ptr,
                RecordData::Ptr(DomainName::from_dotted("dns.google").unwrap()),
            ),
        ] {
            let record = record_of(r_type, data);

            assert_eq!(record, round_trip(&record))
        }
    }

    #[test]
    fn should_round_trip_when_encode_then_decode_given_mx_record() {
        let record = record_of(
            RecordType::Mx,
            RecordData::Mx {
                preference: 10,
                exchange: DomainName::from_dotted("mail.example.com").unwrap(),
            },
        );

        assert_eq!(record, round_trip(&record))
    }

    #[test]
    fn should_round_trip_when_encode_then_decode_given_srv_record() {
        let record = record_of(
            RecordType::Srv,
            RecordData::Srv {
                priority: 0,
                weight: 5,
                port: 443,
                target: DomainName::from_dotted("target.example.com").unwrap(),
            },
        );

        assert_eq!(record, round_trip(&record))
    }

    #[test]
    fn should_round_trip_when_encode_then_decode_given_soa_record() {
        let record = record_of(
            RecordType::Soa,
            RecordData::Soa {
                mname: DomainName::from_dotted("ns.icann.org").unwrap(),
                rname: DomainName::from_dotted("noc.dns.icann.org").unwrap(),
                serial: 2021080401,
                refresh: 7200,
                retry: 3600,
                expire: 1209600,
                minimum: 3600,
            },
        );

        assert_eq!(record, round_trip(&record))
    }

    #[test]
    fn should_round_trip_when_encode_then_decode_given_txt_record() {
        let record = record_of(RecordType::Txt, RecordData::Txt(b"v=spf1 -all".to_vec()));

        assert_eq!(record, round_trip(&record))
    }

    #[test]
    fn should_keep_raw_bytes_when_decode_given_unrecognized_type() {
        let record = record_of(RecordType::Other(99), RecordData::Other(vec![1, 2, 3, 4, 5]));

        let result = round_trip(&record);

        assert_eq!(RecordData::Other(vec![1, 2, 3, 4, 5]), result.data)
    }

    #[test]
    fn should_fail_when_decode_given_declared_length_longer_than_payload() {
        let mut bytes = record_of(RecordType::A, RecordData::A(Ipv4Addr::new(1, 2, 3, 4))).to_u8_vec();
        // Inflate the declared rdata length past the end of the buffer.
        let len_index = bytes.len() - 6;
        bytes[len_index] = 0xFF;

        let result = Record::from(&mut Cursor::from(bytes.as_slice()));

        assert_eq!(Err(ParseError::ShortRead), result)
    }

    #[test]
    fn should_fail_when_decode_given_a_record_with_wrong_data_length() {
        let mut bytes = record_of(RecordType::A, RecordData::A(Ipv4Addr::new(1, 2, 3, 4))).to_u8_vec();
        bytes.push(0);
        // Declared length 5, but an A payload always consumes 4.
        let len_index = bytes.len() - 6;
        bytes[len_index] = 5;

        let result = Record::from(&mut Cursor::from(bytes.as_slice()));

        assert_eq!(Err(ParseError::DataLengthMismatch), result)
    }
}
