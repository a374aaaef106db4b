// Diameter dictionary module
pub mod command;
pub mod data_type;
pub mod manager;
pub mod standard;

// Re-export commonly used types
pub use command::CommandCode;
pub use data_type::AvpDataType;
pub use manager::{AvpDefinition, Dictionary, DictionaryError};
pub use standard::{AvpFlags, StandardAvpCode};
