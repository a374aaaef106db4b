use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

use crate::data_type::AvpDataType;
use crate::standard::{AvpFlags, StandardAvpCode};

/// AVP definition resolved from the dictionary
#[derive(Debug, Clone, PartialEq)]
pub struct AvpDefinition {
    pub code: u32,
    pub vendor_id: Option<u32>,
    pub name: String,
    pub data_type: AvpDataType,
    pub default_flags: AvpFlags,
}

/// Dictionary errors
#[derive(Error, Debug)]
pub enum DictionaryError {
    #[error("Invalid dictionary document: {0}")]
    InvalidDocument(String),

    #[error("Unknown AVP data type: {0}")]
    UnknownDataType(String),

    #[error("Vendor-specific definition for code {0} requires a non-zero vendor id")]
    MissingVendorId(u32),

    #[error("Duplicate definition for AVP code {code}, vendor {vendor_id}")]
    DuplicateDefinition { code: u32, vendor_id: u32 },
}

/// AVP dictionary: the RFC 6733 base table plus registered
/// vendor-specific definitions.
///
/// AVP codes are only unique within a vendor scope, so lookups are
/// keyed by code plus vendor id. Registration happens once at startup,
/// before the dictionary is shared with concurrent codec calls; all
/// lookups take `&self`.
#[derive(Debug, Default)]
pub struct Dictionary {
    vendor_avps: HashMap<(u32, u32), AvpDefinition>,
}

/// Root element of an XML dictionary document
#[derive(Debug, Deserialize)]
struct DictionaryDocument {
    #[serde(rename = "avp", default)]
    avps: Vec<AvpElement>,
}

#[derive(Debug, Deserialize)]
struct AvpElement {
    #[serde(rename = "@code")]
    code: u32,
    #[serde(rename = "@vendor-id")]
    vendor_id: u32,
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "@type")]
    data_type: String,
    #[serde(rename = "@mandatory", default)]
    mandatory: bool,
}

impl Dictionary {
    /// Create a dictionary holding only the base protocol AVPs
    pub fn new() -> Self {
        Self::default()
    }

    /// Lookup an AVP definition by code and vendor scope
    ///
    /// The base table covers the no-vendor scope; vendor-specific codes
    /// resolve against registered definitions only.
    pub fn lookup(&self, code: u32, vendor_id: Option<u32>) -> Option<AvpDefinition> {
        match vendor_id {
            None => StandardAvpCode::from_u32(code).map(|std_code| AvpDefinition {
                code,
                vendor_id: None,
                name: std_code.name().to_string(),
                data_type: std_code.data_type(),
                default_flags: std_code.default_flags(),
            }),
            Some(vid) => self.vendor_avps.get(&(code, vid)).cloned(),
        }
    }

    /// Register one vendor-specific AVP definition
    pub fn register(&mut self, definition: AvpDefinition) -> Result<(), DictionaryError> {
        let vendor_id = match definition.vendor_id {
            Some(vid) if vid != 0 => vid,
            _ => return Err(DictionaryError::MissingVendorId(definition.code)),
        };
        let key = (definition.code, vendor_id);
        if self.vendor_avps.contains_key(&key) {
            return Err(DictionaryError::DuplicateDefinition {
                code: definition.code,
                vendor_id,
            });
        }
        self.vendor_avps.insert(key, definition);
        Ok(())
    }

    /// Load vendor-specific AVP definitions from an XML dictionary document
    ///
    /// ```xml
    /// <dictionary>
    ///     <avp code="628" vendor-id="10415" name="Total-Octets"
    ///          type="Unsigned64" mandatory="true"/>
    /// </dictionary>
    /// ```
    ///
    /// Returns the number of definitions loaded.
    pub fn load_xml(&mut self, xml: &str) -> Result<usize, DictionaryError> {
        let document: DictionaryDocument = quick_xml::de::from_str(xml)
            .map_err(|e| DictionaryError::InvalidDocument(e.to_string()))?;

        let count = document.avps.len();
        for element in document.avps {
            let data_type = AvpDataType::from_name(&element.data_type)
                .ok_or_else(|| DictionaryError::UnknownDataType(element.data_type.clone()))?;
            self.register(AvpDefinition {
                code: element.code,
                vendor_id: Some(element.vendor_id),
                name: element.name,
                data_type,
                default_flags: AvpFlags {
                    vendor: true,
                    mandatory: element.mandatory,
                    protected: false,
                },
            })?;
        }

        Ok(count)
    }
}
