use thiserror::Error;

/// Codec error type
///
/// `UnknownAvp` has no variant here on purpose: an unrecognized AVP is
/// not a decode failure. It is surfaced inline as raw data on the AVP
/// so the rest of the message still decodes.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Malformed Diameter message: {0}")]
    MalformedMessage(String),

    #[error("Malformed AVP: {0}")]
    MalformedAvp(String),

    #[error("Unsupported Diameter version: {0}")]
    UnsupportedVersion(u8),

    #[error("Invalid character encoding: {0}")]
    InvalidEncoding(String),

    #[error("Invalid AVP value for code {code}: {reason}")]
    InvalidAvpValue { code: u32, reason: String },
}

impl CodecError {
    /// Convert error to Diameter Result-Code
    pub fn to_result_code(&self) -> u32 {
        match self {
            Self::MalformedMessage(_) => 5015,     // DIAMETER_INVALID_MESSAGE_LENGTH
            Self::MalformedAvp(_) => 5014,         // DIAMETER_INVALID_AVP_LENGTH
            Self::UnsupportedVersion(_) => 5011,   // DIAMETER_UNSUPPORTED_VERSION
            Self::InvalidEncoding(_) => 5004,      // DIAMETER_INVALID_AVP_VALUE
            Self::InvalidAvpValue { .. } => 5004,
        }
    }
}

/// Result type alias for codec operations
pub type Result<T> = std::result::Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_to_result_code() {
        assert_eq!(
            CodecError::MalformedMessage("test".to_string()).to_result_code(),
            5015
        );
        assert_eq!(
            CodecError::MalformedAvp("test".to_string()).to_result_code(),
            5014
        );
        assert_eq!(CodecError::UnsupportedVersion(2).to_result_code(), 5011);
        assert_eq!(
            CodecError::InvalidAvpValue {
                code: 55,
                reason: "test".to_string()
            }
            .to_result_code(),
            5004
        );
    }

    #[test]
    fn test_error_display() {
        let err = CodecError::UnsupportedVersion(3);
        assert_eq!(err.to_string(), "Unsupported Diameter version: 3");
    }
}
