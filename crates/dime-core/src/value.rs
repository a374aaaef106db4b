use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use bytes::{Buf, BufMut, Bytes, BytesMut};
use chrono::{DateTime, Utc};

use dime_dict::{AvpDataType, Dictionary};

use crate::avp::Avp;
use crate::error::{CodecError, Result};

/// Offset between the NTP era (1900-01-01) and the Unix epoch, in seconds.
/// Diameter Time AVPs carry seconds since 1900 (RFC 6733 section 4.3.1).
pub const NTP_UNIX_OFFSET: i64 = 2_208_988_800;

// Address family numbers used by the Address format
const ADDRESS_FAMILY_IPV4: u16 = 1;
const ADDRESS_FAMILY_IPV6: u16 = 2;

/// Typed AVP payload
///
/// `Raw` holds the undecoded bytes of an AVP whose code is absent from
/// the dictionary; it re-encodes verbatim, like OctetString.
#[derive(Debug, Clone, PartialEq)]
pub enum AvpData {
    OctetString(Bytes),
    Utf8String(String),
    DiameterIdentity(String),
    DiameterUri(String),
    Unsigned32(u32),
    Unsigned64(u64),
    Integer32(i32),
    Integer64(i64),
    Float32(f32),
    Float64(f64),
    Grouped(Vec<Avp>),
    Enumerated(i32),
    Time(DateTime<Utc>),
    Address(IpAddr),
    Raw(Bytes),
}

impl AvpData {
    /// Wire length of the payload, excluding the AVP header and padding
    pub fn encoded_len(&self) -> usize {
        match self {
            Self::OctetString(b) | Self::Raw(b) => b.len(),
            Self::Utf8String(s) | Self::DiameterIdentity(s) | Self::DiameterUri(s) => s.len(),
            Self::Unsigned32(_) | Self::Integer32(_) | Self::Enumerated(_) => 4,
            Self::Unsigned64(_) | Self::Integer64(_) => 8,
            Self::Float32(_) | Self::Time(_) => 4,
            Self::Float64(_) => 8,
            Self::Address(addr) => match addr {
                IpAddr::V4(_) => 2 + 4,
                IpAddr::V6(_) => 2 + 16,
            },
            Self::Grouped(avps) => avps.iter().map(|a| a.encoded_len()).sum(),
        }
    }

    /// Serialize the payload into `buf`
    ///
    /// `code` is only used for error reporting. Grouped payloads recurse
    /// into the full AVP encoder so each nested AVP carries its own
    /// header and padding.
    pub fn encode(&self, code: u32, buf: &mut BytesMut) -> Result<()> {
        match self {
            Self::OctetString(b) | Self::Raw(b) => buf.put_slice(b),
            Self::Utf8String(s) | Self::DiameterIdentity(s) | Self::DiameterUri(s) => {
                buf.put_slice(s.as_bytes())
            }
            Self::Unsigned32(v) => buf.put_u32(*v),
            Self::Unsigned64(v) => buf.put_u64(*v),
            Self::Integer32(v) | Self::Enumerated(v) => buf.put_i32(*v),
            Self::Integer64(v) => buf.put_i64(*v),
            Self::Float32(v) => buf.put_f32(*v),
            Self::Float64(v) => buf.put_f64(*v),
            Self::Time(t) => {
                let ntp_seconds = t.timestamp() + NTP_UNIX_OFFSET;
                let ntp_seconds =
                    u32::try_from(ntp_seconds).map_err(|_| CodecError::InvalidAvpValue {
                        code,
                        reason: format!("timestamp {t} is outside the 1900-based 32-bit range"),
                    })?;
                buf.put_u32(ntp_seconds);
            }
            Self::Address(addr) => match addr {
                IpAddr::V4(v4) => {
                    buf.put_u16(ADDRESS_FAMILY_IPV4);
                    buf.put_slice(&v4.octets());
                }
                IpAddr::V6(v6) => {
                    buf.put_u16(ADDRESS_FAMILY_IPV6);
                    buf.put_slice(&v6.octets());
                }
            },
            Self::Grouped(avps) => {
                for avp in avps {
                    avp.encode(buf)?;
                }
            }
        }
        Ok(())
    }

    /// Parse raw payload bytes according to the declared data type
    ///
    /// The dictionary is needed for the Grouped case, where nested AVPs
    /// are decoded until the payload is exactly consumed.
    pub fn decode(data_type: AvpDataType, data: &[u8], dict: &Dictionary) -> Result<AvpData> {
        match data_type {
            AvpDataType::OctetString => Ok(Self::OctetString(Bytes::copy_from_slice(data))),

            AvpDataType::Utf8String => Ok(Self::Utf8String(decode_utf8(data)?)),
            AvpDataType::DiameterIdentity => Ok(Self::DiameterIdentity(decode_utf8(data)?)),
            AvpDataType::DiameterUri => Ok(Self::DiameterUri(decode_utf8(data)?)),

            AvpDataType::Unsigned32 => {
                Ok(Self::Unsigned32(u32::from_be_bytes(fixed(data, data_type)?)))
            }
            AvpDataType::Unsigned64 => {
                Ok(Self::Unsigned64(u64::from_be_bytes(fixed(data, data_type)?)))
            }
            AvpDataType::Integer32 => {
                Ok(Self::Integer32(i32::from_be_bytes(fixed(data, data_type)?)))
            }
            AvpDataType::Integer64 => {
                Ok(Self::Integer64(i64::from_be_bytes(fixed(data, data_type)?)))
            }
            AvpDataType::Float32 => {
                Ok(Self::Float32(f32::from_be_bytes(fixed(data, data_type)?)))
            }
            AvpDataType::Float64 => {
                Ok(Self::Float64(f64::from_be_bytes(fixed(data, data_type)?)))
            }
            AvpDataType::Enumerated => {
                Ok(Self::Enumerated(i32::from_be_bytes(fixed(data, data_type)?)))
            }

            AvpDataType::Time => {
                let ntp_seconds = u32::from_be_bytes(fixed(data, data_type)?);
                let unix_seconds = i64::from(ntp_seconds) - NTP_UNIX_OFFSET;
                DateTime::from_timestamp(unix_seconds, 0)
                    .map(Self::Time)
                    .ok_or_else(|| {
                        CodecError::MalformedAvp(format!(
                            "Time value {ntp_seconds} is not representable"
                        ))
                    })
            }

            AvpDataType::Address => decode_address(data),

            AvpDataType::Grouped => {
                let mut cursor = Bytes::copy_from_slice(data);
                let mut avps = Vec::new();
                while cursor.has_remaining() {
                    avps.push(Avp::decode(&mut cursor, dict)?);
                }
                Ok(Self::Grouped(avps))
            }
        }
    }
}

fn decode_utf8(data: &[u8]) -> Result<String> {
    String::from_utf8(data.to_vec())
        .map_err(|e| CodecError::InvalidEncoding(format!("invalid UTF-8 sequence: {e}")))
}

fn fixed<const N: usize>(data: &[u8], data_type: AvpDataType) -> Result<[u8; N]> {
    data.try_into().map_err(|_| {
        CodecError::MalformedAvp(format!(
            "{} payload must be {} bytes, got {}",
            data_type.name(),
            N,
            data.len()
        ))
    })
}

fn decode_address(data: &[u8]) -> Result<AvpData> {
    if data.len() < 2 {
        return Err(CodecError::MalformedAvp(
            "Address payload shorter than the address family field".to_string(),
        ));
    }
    let family = u16::from_be_bytes([data[0], data[1]]);
    let addr = &data[2..];

    match family {
        ADDRESS_FAMILY_IPV4 => {
            let octets: [u8; 4] = addr.try_into().map_err(|_| {
                CodecError::MalformedAvp(format!("IPv4 address must be 4 bytes, got {}", addr.len()))
            })?;
            Ok(AvpData::Address(IpAddr::V4(Ipv4Addr::from(octets))))
        }
        ADDRESS_FAMILY_IPV6 => {
            let octets: [u8; 16] = addr.try_into().map_err(|_| {
                CodecError::MalformedAvp(format!(
                    "IPv6 address must be 16 bytes, got {}",
                    addr.len()
                ))
            })?;
            Ok(AvpData::Address(IpAddr::V6(Ipv6Addr::from(octets))))
        }
        _ => Err(CodecError::MalformedAvp(format!(
            "unknown address family {family}"
        ))),
    }
}
