/// Base protocol Command Code definitions from RFC 6733
///
/// A command shares one numeric code between its Request and Answer
/// forms; the two are distinguished only by the R bit in the message
/// header, never by a distinct code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum CommandCode {
    CapabilitiesExchange = 257,
    ReAuth = 258,
    Accounting = 271,
    AbortSession = 274,
    SessionTermination = 275,
    DeviceWatchdog = 280,
    DisconnectPeer = 282,
}

impl CommandCode {
    /// Convert u32 code to CommandCode
    pub fn from_u32(code: u32) -> Option<Self> {
        match code {
            257 => Some(Self::CapabilitiesExchange),
            258 => Some(Self::ReAuth),
            271 => Some(Self::Accounting),
            274 => Some(Self::AbortSession),
            275 => Some(Self::SessionTermination),
            280 => Some(Self::DeviceWatchdog),
            282 => Some(Self::DisconnectPeer),
            _ => None,
        }
    }

    /// Numeric command code
    pub fn code(&self) -> u32 {
        *self as u32
    }

    /// Get command name
    pub fn name(&self) -> &'static str {
        match self {
            Self::CapabilitiesExchange => "Capabilities-Exchange",
            Self::ReAuth => "Re-Auth",
            Self::Accounting => "Accounting",
            Self::AbortSession => "Abort-Session",
            Self::SessionTermination => "Session-Termination",
            Self::DeviceWatchdog => "Device-Watchdog",
            Self::DisconnectPeer => "Disconnect-Peer",
        }
    }

    /// Canonical name of the Request form
    pub fn request_name(&self) -> &'static str {
        match self {
            Self::CapabilitiesExchange => "Capabilities-Exchange-Request",
            Self::ReAuth => "Re-Auth-Request",
            Self::Accounting => "Accounting-Request",
            Self::AbortSession => "Abort-Session-Request",
            Self::SessionTermination => "Session-Termination-Request",
            Self::DeviceWatchdog => "Device-Watchdog-Request",
            Self::DisconnectPeer => "Disconnect-Peer-Request",
        }
    }

    /// Canonical name of the Answer form
    pub fn answer_name(&self) -> &'static str {
        match self {
            Self::CapabilitiesExchange => "Capabilities-Exchange-Answer",
            Self::ReAuth => "Re-Auth-Answer",
            Self::Accounting => "Accounting-Answer",
            Self::AbortSession => "Abort-Session-Answer",
            Self::SessionTermination => "Session-Termination-Answer",
            Self::DeviceWatchdog => "Device-Watchdog-Answer",
            Self::DisconnectPeer => "Disconnect-Peer-Answer",
        }
    }

    /// Canonical abbreviation of the Request form (CER, DWR, ...)
    pub fn request_abbr(&self) -> &'static str {
        match self {
            Self::CapabilitiesExchange => "CER",
            Self::ReAuth => "RAR",
            Self::Accounting => "ACR",
            Self::AbortSession => "ASR",
            Self::SessionTermination => "STR",
            Self::DeviceWatchdog => "DWR",
            Self::DisconnectPeer => "DPR",
        }
    }

    /// Canonical abbreviation of the Answer form (CEA, DWA, ...)
    pub fn answer_abbr(&self) -> &'static str {
        match self {
            Self::CapabilitiesExchange => "CEA",
            Self::ReAuth => "RAA",
            Self::Accounting => "ACA",
            Self::AbortSession => "ASA",
            Self::SessionTermination => "STA",
            Self::DeviceWatchdog => "DWA",
            Self::DisconnectPeer => "DPA",
        }
    }
}
