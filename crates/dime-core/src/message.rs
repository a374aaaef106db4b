use bytes::{Buf, BufMut, Bytes, BytesMut};

use dime_dict::{CommandCode, Dictionary};

use crate::avp::Avp;
use crate::error::{CodecError, Result};
use crate::ident::IdentifierSource;

/// The only Diameter protocol version defined by RFC 6733
pub const DIAMETER_VERSION: u8 = 1;

/// Fixed Diameter header size (20 bytes)
pub const HEADER_SIZE: usize = 20;

// Command flags
pub const FLAG_REQUEST: u8 = 0x80;
pub const FLAG_PROXIABLE: u8 = 0x40;
pub const FLAG_ERROR: u8 = 0x20;
pub const FLAG_RETRANSMIT: u8 = 0x10;

// Reserved command-flag bits are always emitted as zero
const COMMAND_FLAG_MASK: u8 = FLAG_REQUEST | FLAG_PROXIABLE | FLAG_ERROR | FLAG_RETRANSMIT;

// Message Length and Command Code fields are 24 bits wide
const MAX_FIELD_24BIT: u32 = 0x00ff_ffff;

/// Complete Diameter message: fixed header plus an ordered AVP sequence
///
/// AVP order is part of the wire semantics and is preserved by both
/// encode and decode. Hop-by-Hop and End-to-End identifiers are
/// optional here; unset identifiers are filled at encode time from the
/// caller's [`IdentifierSource`], never invented silently.
#[derive(Debug, Clone, PartialEq)]
pub struct DiameterMessage {
    pub version: u8,
    pub flags: u8,
    pub command_code: u32,
    pub application_id: u32,
    pub hop_by_hop_id: Option<u32>,
    pub end_to_end_id: Option<u32>,
    pub avps: Vec<Avp>,
}

impl DiameterMessage {
    /// Create an empty message
    pub fn new(command_code: u32, flags: u8) -> Self {
        Self {
            version: DIAMETER_VERSION,
            flags: flags & COMMAND_FLAG_MASK,
            command_code,
            application_id: 0,
            hop_by_hop_id: None,
            end_to_end_id: None,
            avps: Vec::new(),
        }
    }

    /// Create a Request for a base protocol command
    pub fn request(command: CommandCode) -> Self {
        Self::new(command.code(), FLAG_REQUEST)
    }

    /// Create an Answer for a base protocol command
    pub fn answer(command: CommandCode) -> Self {
        Self::new(command.code(), 0)
    }

    /// Append an AVP, preserving insertion order
    pub fn add_avp(&mut self, avp: Avp) -> &mut Self {
        self.avps.push(avp);
        self
    }

    /// Find first AVP by code
    pub fn find_avp(&self, code: u32) -> Option<&Avp> {
        self.avps.iter().find(|avp| avp.code == code)
    }

    /// Get all AVPs with a specific code
    pub fn find_all_avps(&self, code: u32) -> Vec<&Avp> {
        self.avps.iter().filter(|avp| avp.code == code).collect()
    }

    /// Check if this is a request
    pub fn is_request(&self) -> bool {
        self.flags & FLAG_REQUEST != 0
    }

    /// Check if this is an answer
    pub fn is_answer(&self) -> bool {
        !self.is_request()
    }

    /// Check if the message may be proxied
    pub fn is_proxiable(&self) -> bool {
        self.flags & FLAG_PROXIABLE != 0
    }

    /// Check if the answer carries a protocol error
    pub fn is_error(&self) -> bool {
        self.flags & FLAG_ERROR != 0
    }

    /// Check if the request is potentially retransmitted
    pub fn is_retransmitted(&self) -> bool {
        self.flags & FLAG_RETRANSMIT != 0
    }

    /// Serialize the message to its wire form
    ///
    /// The Message Length field is always recomputed from the encoded
    /// AVPs; whatever length the caller saw on a previous decode is
    /// never trusted. Unset identifiers are drawn from `ids`. The
    /// message itself is not mutated.
    pub fn encode(&self, ids: &dyn IdentifierSource) -> Result<Bytes> {
        if self.command_code > MAX_FIELD_24BIT {
            return Err(CodecError::MalformedMessage(format!(
                "command code {} exceeds the 24-bit field",
                self.command_code
            )));
        }

        let mut avp_buf = BytesMut::new();
        for avp in &self.avps {
            avp.encode(&mut avp_buf)?;
        }

        let total_len = HEADER_SIZE + avp_buf.len();
        if total_len > MAX_FIELD_24BIT as usize {
            return Err(CodecError::MalformedMessage(format!(
                "encoded length {total_len} exceeds the 24-bit Message Length field"
            )));
        }

        let mut buf = BytesMut::with_capacity(total_len);
        buf.put_u8(self.version);
        buf.put_u8((total_len >> 16) as u8);
        buf.put_u16(total_len as u16);
        buf.put_u8(self.flags & COMMAND_FLAG_MASK);
        buf.put_u8((self.command_code >> 16) as u8);
        buf.put_u16(self.command_code as u16);
        buf.put_u32(self.application_id);
        buf.put_u32(self.hop_by_hop_id.unwrap_or_else(|| ids.hop_by_hop_id()));
        buf.put_u32(self.end_to_end_id.unwrap_or_else(|| ids.end_to_end_id()));
        buf.put(avp_buf);

        Ok(buf.freeze())
    }

    /// Parse one complete message from an exactly-framed buffer
    ///
    /// The declared Message Length must equal the buffer length, and
    /// the AVP region must be consumed by whole AVPs. A failed decode
    /// returns no message, never a partial one.
    pub fn decode(data: &[u8], dict: &Dictionary) -> Result<Self> {
        if data.len() < HEADER_SIZE {
            return Err(CodecError::MalformedMessage(format!(
                "message needs at least {HEADER_SIZE} bytes, got {}",
                data.len()
            )));
        }

        let version = data[0];
        if version != DIAMETER_VERSION {
            return Err(CodecError::UnsupportedVersion(version));
        }

        let declared_len = u32::from_be_bytes([0, data[1], data[2], data[3]]) as usize;
        if declared_len != data.len() {
            return Err(CodecError::MalformedMessage(format!(
                "declared length {declared_len} does not match buffer length {}",
                data.len()
            )));
        }

        let flags = data[4];
        let command_code = u32::from_be_bytes([0, data[5], data[6], data[7]]);
        let application_id = u32::from_be_bytes([data[8], data[9], data[10], data[11]]);
        let hop_by_hop_id = u32::from_be_bytes([data[12], data[13], data[14], data[15]]);
        let end_to_end_id = u32::from_be_bytes([data[16], data[17], data[18], data[19]]);

        let mut cursor = Bytes::copy_from_slice(&data[HEADER_SIZE..]);
        let mut avps = Vec::new();
        while cursor.has_remaining() {
            avps.push(Avp::decode(&mut cursor, dict)?);
        }

        Ok(Self {
            version,
            flags,
            command_code,
            application_id,
            hop_by_hop_id: Some(hop_by_hop_id),
            end_to_end_id: Some(end_to_end_id),
            avps,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ident::FixedIdentifierSource;
    use crate::value::AvpData;
    use dime_dict::StandardAvpCode;

    const IDS: FixedIdentifierSource = FixedIdentifierSource {
        hop_by_hop: 1,
        end_to_end: 2,
    };

    #[test]
    fn test_empty_message_wire_form() {
        let mut msg = DiameterMessage::request(CommandCode::CapabilitiesExchange);
        msg.hop_by_hop_id = Some(1);
        msg.end_to_end_id = Some(2);

        let buf = msg.encode(&IDS).unwrap();
        assert_eq!(
            &buf[..],
            &[
                1, 0, 0, 20, // Version, Length (20)
                0x80, 0, 1, 1, // Flags (Request), Command Code (257)
                0, 0, 0, 0, // Application ID
                0, 0, 0, 1, // Hop-by-Hop ID
                0, 0, 0, 2, // End-to-End ID
            ]
        );
    }

    #[test]
    fn test_capabilities_exchange_request_scenario() {
        let mut msg = DiameterMessage::request(CommandCode::CapabilitiesExchange);
        msg.add_avp(Avp::standard(
            StandardAvpCode::OriginHost,
            AvpData::DiameterIdentity("peer1.example.com".to_string()),
        ));
        msg.add_avp(Avp::standard(
            StandardAvpCode::OriginRealm,
            AvpData::DiameterIdentity("example.com".to_string()),
        ));

        let buf = msg.encode(&IDS).unwrap();

        // version byte, then message length = 20 + 28 (Origin-Host,
        // 17 data bytes padded) + 20 (Origin-Realm, 11 data bytes padded)
        assert_eq!(buf[0], 0x01);
        let declared = ((buf[1] as usize) << 16) | ((buf[2] as usize) << 8) | buf[3] as usize;
        assert_eq!(declared, 68);
        assert_eq!(declared, buf.len());

        // only the R bit is set
        assert_eq!(buf[4], 0x80);
        assert_eq!(u32::from_be_bytes([0, buf[5], buf[6], buf[7]]), 257);
    }

    #[test]
    fn test_identifiers_generated_when_unset() {
        let msg = DiameterMessage::request(CommandCode::DeviceWatchdog);
        assert_eq!(msg.hop_by_hop_id, None);

        let buf = msg.encode(&IDS).unwrap();
        assert_eq!(u32::from_be_bytes([buf[12], buf[13], buf[14], buf[15]]), 1);
        assert_eq!(u32::from_be_bytes([buf[16], buf[17], buf[18], buf[19]]), 2);

        // encode never mutates the message
        assert_eq!(msg.hop_by_hop_id, None);
        assert_eq!(msg.end_to_end_id, None);
    }

    #[test]
    fn test_round_trip_preserves_avp_order() {
        let dict = Dictionary::new();
        let mut msg = DiameterMessage::answer(CommandCode::Accounting);
        msg.hop_by_hop_id = Some(0xdead_beef);
        msg.end_to_end_id = Some(0xcafe_babe);
        msg.add_avp(Avp::standard(
            StandardAvpCode::ResultCode,
            AvpData::Unsigned32(2001),
        ));
        msg.add_avp(Avp::standard(
            StandardAvpCode::OriginHost,
            AvpData::DiameterIdentity("server.example.com".to_string()),
        ));
        msg.add_avp(Avp::standard(
            StandardAvpCode::RouteRecord,
            AvpData::DiameterIdentity("relay1.example.com".to_string()),
        ));
        msg.add_avp(Avp::standard(
            StandardAvpCode::RouteRecord,
            AvpData::DiameterIdentity("relay2.example.com".to_string()),
        ));

        let buf = msg.encode(&IDS).unwrap();
        let decoded = DiameterMessage::decode(&buf, &dict).unwrap();

        assert_eq!(decoded, msg);
        let records = decoded.find_all_avps(282);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].as_str(), Some("relay1.example.com"));
        assert_eq!(records[1].as_str(), Some("relay2.example.com"));
    }

    #[test]
    fn test_decode_too_short() {
        let dict = Dictionary::new();
        let result = DiameterMessage::decode(&[1, 0, 0, 10, 0x80, 0, 1, 1, 0, 0], &dict);
        assert!(matches!(result, Err(CodecError::MalformedMessage(_))));
    }

    #[test]
    fn test_decode_bad_version() {
        let dict = Dictionary::new();
        let mut buf = DiameterMessage::request(CommandCode::DeviceWatchdog)
            .encode(&IDS)
            .unwrap()
            .to_vec();
        buf[0] = 2;
        let result = DiameterMessage::decode(&buf, &dict);
        assert!(matches!(result, Err(CodecError::UnsupportedVersion(2))));
    }

    #[test]
    fn test_decode_length_mismatch() {
        let dict = Dictionary::new();
        let mut buf = DiameterMessage::request(CommandCode::DeviceWatchdog)
            .encode(&IDS)
            .unwrap()
            .to_vec();
        buf[3] = 24; // declare 4 bytes more than the buffer holds
        let result = DiameterMessage::decode(&buf, &dict);
        assert!(matches!(result, Err(CodecError::MalformedMessage(_))));
    }

    #[test]
    fn test_decode_truncated_avp_region() {
        let dict = Dictionary::new();
        let mut msg = DiameterMessage::request(CommandCode::CapabilitiesExchange);
        msg.add_avp(Avp::standard(
            StandardAvpCode::OriginHost,
            AvpData::DiameterIdentity("peer1.example.com".to_string()),
        ));
        let mut buf = msg.encode(&IDS).unwrap().to_vec();

        // chop one AVP byte and fix the header length so only the AVP
        // region is inconsistent
        buf.truncate(buf.len() - 4);
        let len = (buf.len() as u32).to_be_bytes();
        buf[1] = len[1];
        buf[2] = len[2];
        buf[3] = len[3];

        let result = DiameterMessage::decode(&buf, &dict);
        assert!(matches!(result, Err(CodecError::MalformedAvp(_))));
    }

    #[test]
    fn test_flag_helpers() {
        let msg = DiameterMessage::new(257, FLAG_REQUEST | FLAG_PROXIABLE);
        assert!(msg.is_request());
        assert!(!msg.is_answer());
        assert!(msg.is_proxiable());
        assert!(!msg.is_error());
        assert!(!msg.is_retransmitted());
    }

    #[test]
    fn test_reserved_command_flags_forced_to_zero() {
        let msg = DiameterMessage::new(280, 0xff);
        assert_eq!(msg.flags, 0xf0);
        let buf = msg.encode(&IDS).unwrap();
        assert_eq!(buf[4], 0xf0);
    }
}
