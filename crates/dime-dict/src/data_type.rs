/// Basic AVP Data Formats from RFC 6733 section 4.2
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AvpDataType {
    OctetString,
    Utf8String,
    DiameterIdentity,
    DiameterUri,
    Unsigned32,
    Unsigned64,
    Integer32,
    Integer64,
    Float32,
    Float64,
    Grouped,
    Enumerated,
    Time,
    Address,
}

impl AvpDataType {
    /// Resolve a data-type name as written in dictionary documents
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "OctetString" => Some(Self::OctetString),
            "UTF8String" => Some(Self::Utf8String),
            "DiamIdent" => Some(Self::DiameterIdentity),
            "DiamURI" => Some(Self::DiameterUri),
            "Unsigned32" => Some(Self::Unsigned32),
            "Unsigned64" => Some(Self::Unsigned64),
            "Integer32" => Some(Self::Integer32),
            "Integer64" => Some(Self::Integer64),
            "Float32" => Some(Self::Float32),
            "Float64" => Some(Self::Float64),
            "Grouped" => Some(Self::Grouped),
            "Enumerated" => Some(Self::Enumerated),
            "Time" => Some(Self::Time),
            "Address" => Some(Self::Address),
            _ => None,
        }
    }

    /// Get the dictionary-document name of this data type
    pub fn name(&self) -> &'static str {
        match self {
            Self::OctetString => "OctetString",
            Self::Utf8String => "UTF8String",
            Self::DiameterIdentity => "DiamIdent",
            Self::DiameterUri => "DiamURI",
            Self::Unsigned32 => "Unsigned32",
            Self::Unsigned64 => "Unsigned64",
            Self::Integer32 => "Integer32",
            Self::Integer64 => "Integer64",
            Self::Float32 => "Float32",
            Self::Float64 => "Float64",
            Self::Grouped => "Grouped",
            Self::Enumerated => "Enumerated",
            Self::Time => "Time",
            Self::Address => "Address",
        }
    }

    /// Fixed wire width of the payload, if the type has one
    pub fn fixed_len(&self) -> Option<usize> {
        match self {
            Self::Unsigned32 | Self::Integer32 | Self::Enumerated => Some(4),
            Self::Float32 | Self::Time => Some(4),
            Self::Unsigned64 | Self::Integer64 | Self::Float64 => Some(8),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_round_trip() {
        for dt in [
            AvpDataType::OctetString,
            AvpDataType::Utf8String,
            AvpDataType::DiameterIdentity,
            AvpDataType::DiameterUri,
            AvpDataType::Unsigned32,
            AvpDataType::Unsigned64,
            AvpDataType::Integer32,
            AvpDataType::Integer64,
            AvpDataType::Float32,
            AvpDataType::Float64,
            AvpDataType::Grouped,
            AvpDataType::Enumerated,
            AvpDataType::Time,
            AvpDataType::Address,
        ] {
            assert_eq!(AvpDataType::from_name(dt.name()), Some(dt));
        }
    }

    #[test]
    fn test_from_unknown_name() {
        assert_eq!(AvpDataType::from_name("IPFilterRule"), None);
    }

    #[test]
    fn test_fixed_len() {
        assert_eq!(AvpDataType::Unsigned32.fixed_len(), Some(4));
        assert_eq!(AvpDataType::Unsigned64.fixed_len(), Some(8));
        assert_eq!(AvpDataType::Time.fixed_len(), Some(4));
        assert_eq!(AvpDataType::OctetString.fixed_len(), None);
        assert_eq!(AvpDataType::Grouped.fixed_len(), None);
    }
}
