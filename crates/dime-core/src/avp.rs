use bytes::{Buf, BufMut, Bytes, BytesMut};
use tracing::debug;

use dime_dict::{Dictionary, StandardAvpCode};

use crate::error::{CodecError, Result};
use crate::value::AvpData;

// AVP flags
pub const AVP_FLAG_VENDOR: u8 = 0x80;
pub const AVP_FLAG_MANDATORY: u8 = 0x40;
pub const AVP_FLAG_PROTECTED: u8 = 0x20;

// Reserved flag bits are always emitted as zero
const AVP_FLAG_MASK: u8 = AVP_FLAG_VENDOR | AVP_FLAG_MANDATORY | AVP_FLAG_PROTECTED;

/// AVP header size without vendor ID
pub const AVP_HEADER_SIZE: usize = 8;
/// AVP header size with vendor ID
pub const AVP_HEADER_SIZE_VENDOR: usize = 12;

// The AVP Length field is 24 bits wide
const MAX_AVP_LENGTH: usize = 0x00ff_ffff;

/// Zero-padding needed after `len` data bytes to reach 4-byte alignment
pub(crate) fn pad_len(len: usize) -> usize {
    (4 - len % 4) % 4
}

/// Diameter AVP
///
/// Nested AVPs of a Grouped payload are owned by their parent; a
/// message owns its top-level AVP sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Avp {
    pub code: u32,
    pub flags: u8,
    pub vendor_id: Option<u32>,
    pub data: AvpData,
}

impl Avp {
    /// Create a new AVP
    ///
    /// The V bit is derived from `vendor_id`, so flags and vendor scope
    /// cannot disagree for AVPs built through the constructors.
    pub fn new(code: u32, flags: u8, vendor_id: Option<u32>, data: AvpData) -> Self {
        let flags = if vendor_id.is_some() {
            (flags & AVP_FLAG_MASK) | AVP_FLAG_VENDOR
        } else {
            flags & AVP_FLAG_MASK & !AVP_FLAG_VENDOR
        };
        Self {
            code,
            flags,
            vendor_id,
            data,
        }
    }

    /// Create a mandatory AVP
    pub fn mandatory(code: u32, data: AvpData) -> Self {
        Self::new(code, AVP_FLAG_MANDATORY, None, data)
    }

    /// Create a vendor-specific mandatory AVP
    pub fn vendor(code: u32, vendor_id: u32, data: AvpData) -> Self {
        Self::new(code, AVP_FLAG_MANDATORY, Some(vendor_id), data)
    }

    /// Create a base protocol AVP with its recommended flag settings
    pub fn standard(code: StandardAvpCode, data: AvpData) -> Self {
        Self::new(code as u32, code.default_flags().bits(), None, data)
    }

    /// Check if AVP is vendor-specific
    pub fn is_vendor_specific(&self) -> bool {
        self.flags & AVP_FLAG_VENDOR != 0
    }

    /// Check if AVP is mandatory
    pub fn is_mandatory(&self) -> bool {
        self.flags & AVP_FLAG_MANDATORY != 0
    }

    /// Check if AVP is protected
    pub fn is_protected(&self) -> bool {
        self.flags & AVP_FLAG_PROTECTED != 0
    }

    /// Whether the decoder found this AVP in the dictionary
    pub fn is_recognized(&self) -> bool {
        !matches!(self.data, AvpData::Raw(_))
    }

    /// Dictionary name for this AVP, or "unknown"
    pub fn name(&self, dict: &Dictionary) -> String {
        dict.lookup(self.code, self.vendor_id)
            .map(|def| def.name)
            .unwrap_or_else(|| "unknown".to_string())
    }

    fn header_len(&self) -> usize {
        if self.vendor_id.is_some() {
            AVP_HEADER_SIZE_VENDOR
        } else {
            AVP_HEADER_SIZE
        }
    }

    /// Physical wire length of this AVP, padding included
    pub fn encoded_len(&self) -> usize {
        let unpadded = self.header_len() + self.data.encoded_len();
        unpadded + pad_len(unpadded)
    }

    /// Serialize AVP into `buf`: header, optional vendor ID, payload,
    /// zero padding to a 4-byte boundary
    ///
    /// The Length field counts header plus payload but never padding.
    pub fn encode(&self, buf: &mut BytesMut) -> Result<()> {
        if self.is_vendor_specific() != self.vendor_id.is_some() {
            return Err(CodecError::InvalidAvpValue {
                code: self.code,
                reason: "V flag and vendor id presence disagree".to_string(),
            });
        }

        let data_len = self.data.encoded_len();
        let avp_len = self.header_len() + data_len;
        if avp_len > MAX_AVP_LENGTH {
            return Err(CodecError::InvalidAvpValue {
                code: self.code,
                reason: format!("encoded length {avp_len} exceeds the 24-bit Length field"),
            });
        }

        buf.put_u32(self.code);
        buf.put_u8(self.flags & AVP_FLAG_MASK);
        buf.put_u8((avp_len >> 16) as u8);
        buf.put_u16(avp_len as u16);

        if let Some(vendor_id) = self.vendor_id {
            buf.put_u32(vendor_id);
        }

        self.data.encode(self.code, buf)?;

        for _ in 0..pad_len(data_len) {
            buf.put_u8(0);
        }

        Ok(())
    }

    /// Decode one AVP from the cursor, advancing past its padding
    ///
    /// The payload is interpreted through the dictionary; a code absent
    /// from it decodes as `AvpData::Raw` and is not an error. Padding
    /// bytes are discarded without checking their content.
    pub fn decode(buf: &mut Bytes, dict: &Dictionary) -> Result<Self> {
        if buf.remaining() < AVP_HEADER_SIZE {
            return Err(CodecError::MalformedAvp(format!(
                "AVP header needs {} bytes, {} remain",
                AVP_HEADER_SIZE,
                buf.remaining()
            )));
        }

        let code = buf.get_u32();
        let flags = buf.get_u8();
        let avp_len = ((buf.get_u8() as usize) << 16) | buf.get_u16() as usize;

        let has_vendor = flags & AVP_FLAG_VENDOR != 0;
        let header_len = if has_vendor {
            AVP_HEADER_SIZE_VENDOR
        } else {
            AVP_HEADER_SIZE
        };
        if avp_len < header_len {
            return Err(CodecError::MalformedAvp(format!(
                "AVP code {code} declares length {avp_len}, below its {header_len}-byte header"
            )));
        }

        let vendor_id = if has_vendor {
            if buf.remaining() < 4 {
                return Err(CodecError::MalformedAvp(format!(
                    "AVP code {code} is cut off before its Vendor-ID"
                )));
            }
            Some(buf.get_u32())
        } else {
            None
        };

        let data_len = avp_len - header_len;
        if buf.remaining() < data_len {
            return Err(CodecError::MalformedAvp(format!(
                "AVP code {code} declares {data_len} data bytes, only {} remain",
                buf.remaining()
            )));
        }
        let raw = buf.copy_to_bytes(data_len);

        let padding = pad_len(data_len);
        if buf.remaining() < padding {
            return Err(CodecError::MalformedAvp(format!(
                "AVP code {code} is cut off inside its padding"
            )));
        }
        buf.advance(padding);

        let data = match dict.lookup(code, vendor_id) {
            Some(definition) => AvpData::decode(definition.data_type, &raw, dict)?,
            None => {
                debug!(
                    "AVP code {} (vendor {:?}) not in dictionary, keeping raw data",
                    code, vendor_id
                );
                AvpData::Raw(raw)
            }
        };

        Ok(Self {
            code,
            flags,
            vendor_id,
            data,
        })
    }

    /// Get payload as Unsigned32
    pub fn as_u32(&self) -> Option<u32> {
        match &self.data {
            AvpData::Unsigned32(v) => Some(*v),
            _ => None,
        }
    }

    /// Get payload as Unsigned64
    pub fn as_u64(&self) -> Option<u64> {
        match &self.data {
            AvpData::Unsigned64(v) => Some(*v),
            _ => None,
        }
    }

    /// Get payload as Integer32 or Enumerated
    pub fn as_i32(&self) -> Option<i32> {
        match &self.data {
            AvpData::Integer32(v) | AvpData::Enumerated(v) => Some(*v),
            _ => None,
        }
    }

    /// Get payload as text (UTF8String, DiamIdent or DiamURI)
    pub fn as_str(&self) -> Option<&str> {
        match &self.data {
            AvpData::Utf8String(s) | AvpData::DiameterIdentity(s) | AvpData::DiameterUri(s) => {
                Some(s)
            }
            _ => None,
        }
    }

    /// Get payload as raw bytes (OctetString or unrecognized)
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match &self.data {
            AvpData::OctetString(b) | AvpData::Raw(b) => Some(b),
            _ => None,
        }
    }

    /// Get payload as nested AVPs
    pub fn as_grouped(&self) -> Option<&[Avp]> {
        match &self.data {
            AvpData::Grouped(avps) => Some(avps),
            _ => None,
        }
    }
}
