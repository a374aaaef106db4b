// Error types module
pub mod error;

// Per-data-type wire serialization
pub mod value;

// AVP codec
pub mod avp;

// Message header and message codec
pub mod message;

// Hop-by-Hop / End-to-End identifier generation
pub mod ident;

// Re-export commonly used types
pub use avp::Avp;
pub use error::{CodecError, Result};
pub use ident::{AtomicIdentifierSource, FixedIdentifierSource, IdentifierSource};
pub use message::DiameterMessage;
pub use value::AvpData;
