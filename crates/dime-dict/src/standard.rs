use crate::data_type::AvpDataType;

/// Recommended AVP flag settings (V/M/P bits) from a dictionary entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AvpFlags {
    pub vendor: bool,
    pub mandatory: bool,
    pub protected: bool,
}

impl AvpFlags {
    /// M bit set, V and P clear (the common case for base AVPs)
    pub const MANDATORY: AvpFlags = AvpFlags {
        vendor: false,
        mandatory: true,
        protected: false,
    };

    /// All bits clear
    pub const OPTIONAL: AvpFlags = AvpFlags {
        vendor: false,
        mandatory: false,
        protected: false,
    };

    /// Wire representation of the flags byte (reserved bits zero)
    pub fn bits(&self) -> u8 {
        (u8::from(self.vendor) << 7) | (u8::from(self.mandatory) << 6) | (u8::from(self.protected) << 5)
    }
}

/// Base protocol AVP Code definitions from RFC 6733
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum StandardAvpCode {
    UserName = 1,
    Class = 25,
    SessionTimeout = 27,
    ProxyState = 33,
    AcctSessionId = 44,
    AcctMultiSessionId = 50,
    EventTimestamp = 55,
    AcctInterimInterval = 85,
    HostIpAddress = 257,
    AuthApplicationId = 258,
    AcctApplicationId = 259,
    VendorSpecificApplicationId = 260,
    RedirectHostUsage = 261,
    RedirectMaxCacheTime = 262,
    SessionId = 263,
    OriginHost = 264,
    SupportedVendorId = 265,
    VendorId = 266,
    FirmwareRevision = 267,
    ResultCode = 268,
    ProductName = 269,
    SessionBinding = 270,
    SessionServerFailover = 271,
    MultiRoundTimeOut = 272,
    DisconnectCause = 273,
    AuthRequestType = 274,
    AuthGracePeriod = 276,
    AuthSessionState = 277,
    OriginStateId = 278,
    FailedAvp = 279,
    ProxyHost = 280,
    ErrorMessage = 281,
    RouteRecord = 282,
    DestinationRealm = 283,
    ProxyInfo = 284,
    ReAuthRequestType = 285,
    AccountingSubSessionId = 287,
    AuthorizationLifetime = 291,
    RedirectHost = 292,
    DestinationHost = 293,
    ErrorReportingHost = 294,
    TerminationCause = 295,
    OriginRealm = 296,
    ExperimentalResult = 297,
    ExperimentalResultCode = 298,
    InbandSecurityId = 299,
    AccountingRecordType = 480,
    AccountingRealtimeRequired = 483,
    AccountingRecordNumber = 485,
}

impl StandardAvpCode {
    /// Convert u32 code to StandardAvpCode
    pub fn from_u32(code: u32) -> Option<Self> {
        match code {
            1 => Some(Self::UserName),
            25 => Some(Self::Class),
            27 => Some(Self::SessionTimeout),
            33 => Some(Self::ProxyState),
            44 => Some(Self::AcctSessionId),
            50 => Some(Self::AcctMultiSessionId),
            55 => Some(Self::EventTimestamp),
            85 => Some(Self::AcctInterimInterval),
            257 => Some(Self::HostIpAddress),
            258 => Some(Self::AuthApplicationId),
            259 => Some(Self::AcctApplicationId),
            260 => Some(Self::VendorSpecificApplicationId),
            261 => Some(Self::RedirectHostUsage),
            262 => Some(Self::RedirectMaxCacheTime),
            263 => Some(Self::SessionId),
            264 => Some(Self::OriginHost),
            265 => Some(Self::SupportedVendorId),
            266 => Some(Self::VendorId),
            267 => Some(Self::FirmwareRevision),
            268 => Some(Self::ResultCode),
            269 => Some(Self::ProductName),
            270 => Some(Self::SessionBinding),
            271 => Some(Self::SessionServerFailover),
            272 => Some(Self::MultiRoundTimeOut),
            273 => Some(Self::DisconnectCause),
            274 => Some(Self::AuthRequestType),
            276 => Some(Self::AuthGracePeriod),
            277 => Some(Self::AuthSessionState),
            278 => Some(Self::OriginStateId),
            279 => Some(Self::FailedAvp),
            280 => Some(Self::ProxyHost),
            281 => Some(Self::ErrorMessage),
            282 => Some(Self::RouteRecord),
            283 => Some(Self::DestinationRealm),
            284 => Some(Self::ProxyInfo),
            285 => Some(Self::ReAuthRequestType),
            287 => Some(Self::AccountingSubSessionId),
            291 => Some(Self::AuthorizationLifetime),
            292 => Some(Self::RedirectHost),
            293 => Some(Self::DestinationHost),
            294 => Some(Self::ErrorReportingHost),
            295 => Some(Self::TerminationCause),
            296 => Some(Self::OriginRealm),
            297 => Some(Self::ExperimentalResult),
            298 => Some(Self::ExperimentalResultCode),
            299 => Some(Self::InbandSecurityId),
            480 => Some(Self::AccountingRecordType),
            483 => Some(Self::AccountingRealtimeRequired),
            485 => Some(Self::AccountingRecordNumber),
            _ => None,
        }
    }

    /// Get AVP name
    pub fn name(&self) -> &'static str {
        match self {
            Self::UserName => "User-Name",
            Self::Class => "Class",
            Self::SessionTimeout => "Session-Timeout",
            Self::ProxyState => "Proxy-State",
            Self::AcctSessionId => "Acct-Session-Id",
            Self::AcctMultiSessionId => "Acct-Multi-Session-Id",
            Self::EventTimestamp => "Event-Timestamp",
            Self::AcctInterimInterval => "Acct-Interim-Interval",
            Self::HostIpAddress => "Host-IP-Address",
            Self::AuthApplicationId => "Auth-Application-Id",
            Self::AcctApplicationId => "Acct-Application-Id",
            Self::VendorSpecificApplicationId => "Vendor-Specific-Application-Id",
            Self::RedirectHostUsage => "Redirect-Host-Usage",
            Self::RedirectMaxCacheTime => "Redirect-Max-Cache-Time",
            Self::SessionId => "Session-Id",
            Self::OriginHost => "Origin-Host",
            Self::SupportedVendorId => "Supported-Vendor-Id",
            Self::VendorId => "Vendor-Id",
            Self::FirmwareRevision => "Firmware-Revision",
            Self::ResultCode => "Result-Code",
            Self::ProductName => "Product-Name",
            Self::SessionBinding => "Session-Binding",
            Self::SessionServerFailover => "Session-Server-Failover",
            Self::MultiRoundTimeOut => "Multi-Round-Time-Out",
            Self::DisconnectCause => "Disconnect-Cause",
            Self::AuthRequestType => "Auth-Request-Type",
            Self::AuthGracePeriod => "Auth-Grace-Period",
            Self::AuthSessionState => "Auth-Session-State",
            Self::OriginStateId => "Origin-State-Id",
            Self::FailedAvp => "Failed-AVP",
            Self::ProxyHost => "Proxy-Host",
            Self::ErrorMessage => "Error-Message",
            Self::RouteRecord => "Route-Record",
            Self::DestinationRealm => "Destination-Realm",
            Self::ProxyInfo => "Proxy-Info",
            Self::ReAuthRequestType => "Re-Auth-Request-Type",
            Self::AccountingSubSessionId => "Accounting-Sub-Session-Id",
            Self::AuthorizationLifetime => "Authorization-Lifetime",
            Self::RedirectHost => "Redirect-Host",
            Self::DestinationHost => "Destination-Host",
            Self::ErrorReportingHost => "Error-Reporting-Host",
            Self::TerminationCause => "Termination-Cause",
            Self::OriginRealm => "Origin-Realm",
            Self::ExperimentalResult => "Experimental-Result",
            Self::ExperimentalResultCode => "Experimental-Result-Code",
            Self::InbandSecurityId => "Inband-Security-Id",
            Self::AccountingRecordType => "Accounting-Record-Type",
            Self::AccountingRealtimeRequired => "Accounting-Realtime-Required",
            Self::AccountingRecordNumber => "Accounting-Record-Number",
        }
    }

    /// Get AVP data type
    pub fn data_type(&self) -> AvpDataType {
        match self {
            Self::UserName => AvpDataType::Utf8String,
            Self::Class => AvpDataType::OctetString,
            Self::SessionTimeout => AvpDataType::Unsigned32,
            Self::ProxyState => AvpDataType::OctetString,
            Self::AcctSessionId => AvpDataType::OctetString,
            Self::AcctMultiSessionId => AvpDataType::Utf8String,
            Self::EventTimestamp => AvpDataType::Time,
            Self::AcctInterimInterval => AvpDataType::Unsigned32,
            Self::HostIpAddress => AvpDataType::Address,
            Self::AuthApplicationId => AvpDataType::Unsigned32,
            Self::AcctApplicationId => AvpDataType::Unsigned32,
            Self::VendorSpecificApplicationId => AvpDataType::Grouped,
            Self::RedirectHostUsage => AvpDataType::Enumerated,
            Self::RedirectMaxCacheTime => AvpDataType::Unsigned32,
            Self::SessionId => AvpDataType::Utf8String,
            Self::OriginHost => AvpDataType::DiameterIdentity,
            Self::SupportedVendorId => AvpDataType::Unsigned32,
            Self::VendorId => AvpDataType::Unsigned32,
            Self::FirmwareRevision => AvpDataType::Unsigned32,
            Self::ResultCode => AvpDataType::Unsigned32,
            Self::ProductName => AvpDataType::Utf8String,
            Self::SessionBinding => AvpDataType::Unsigned32,
            Self::SessionServerFailover => AvpDataType::Enumerated,
            Self::MultiRoundTimeOut => AvpDataType::Unsigned32,
            Self::DisconnectCause => AvpDataType::Enumerated,
            Self::AuthRequestType => AvpDataType::Enumerated,
            Self::AuthGracePeriod => AvpDataType::Unsigned32,
            Self::AuthSessionState => AvpDataType::Enumerated,
            Self::OriginStateId => AvpDataType::Unsigned32,
            Self::FailedAvp => AvpDataType::Grouped,
            Self::ProxyHost => AvpDataType::DiameterIdentity,
            Self::ErrorMessage => AvpDataType::Utf8String,
            Self::RouteRecord => AvpDataType::DiameterIdentity,
            Self::DestinationRealm => AvpDataType::DiameterIdentity,
            Self::ProxyInfo => AvpDataType::Grouped,
            Self::ReAuthRequestType => AvpDataType::Enumerated,
            Self::AccountingSubSessionId => AvpDataType::Unsigned64,
            Self::AuthorizationLifetime => AvpDataType::Unsigned32,
            Self::RedirectHost => AvpDataType::DiameterUri,
            Self::DestinationHost => AvpDataType::DiameterIdentity,
            Self::ErrorReportingHost => AvpDataType::DiameterIdentity,
            Self::TerminationCause => AvpDataType::Enumerated,
            Self::OriginRealm => AvpDataType::DiameterIdentity,
            Self::ExperimentalResult => AvpDataType::Grouped,
            Self::ExperimentalResultCode => AvpDataType::Unsigned32,
            Self::InbandSecurityId => AvpDataType::Unsigned32,
            Self::AccountingRecordType => AvpDataType::Enumerated,
            Self::AccountingRealtimeRequired => AvpDataType::Enumerated,
            Self::AccountingRecordNumber => AvpDataType::Unsigned32,
        }
    }

    /// Get the recommended flag settings for this AVP
    pub fn default_flags(&self) -> AvpFlags {
        match self {
            Self::FirmwareRevision
            | Self::ProductName
            | Self::ErrorMessage
            | Self::ErrorReportingHost => AvpFlags::OPTIONAL,
            _ => AvpFlags::MANDATORY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_u32() {
        assert_eq!(StandardAvpCode::from_u32(264), Some(StandardAvpCode::OriginHost));
        assert_eq!(StandardAvpCode::from_u32(268), Some(StandardAvpCode::ResultCode));
        assert_eq!(StandardAvpCode::from_u32(485), Some(StandardAvpCode::AccountingRecordNumber));
        assert_eq!(StandardAvpCode::from_u32(9999), None);
    }

    #[test]
    fn test_name() {
        assert_eq!(StandardAvpCode::OriginHost.name(), "Origin-Host");
        assert_eq!(StandardAvpCode::DisconnectCause.name(), "Disconnect-Cause");
        assert_eq!(StandardAvpCode::HostIpAddress.name(), "Host-IP-Address");
    }

    #[test]
    fn test_data_type() {
        assert_eq!(StandardAvpCode::OriginHost.data_type(), AvpDataType::DiameterIdentity);
        assert_eq!(StandardAvpCode::ResultCode.data_type(), AvpDataType::Unsigned32);
        assert_eq!(StandardAvpCode::EventTimestamp.data_type(), AvpDataType::Time);
        assert_eq!(StandardAvpCode::RedirectHost.data_type(), AvpDataType::DiameterUri);
        assert_eq!(StandardAvpCode::FailedAvp.data_type(), AvpDataType::Grouped);
    }

    #[test]
    fn test_default_flags() {
        assert_eq!(StandardAvpCode::OriginHost.default_flags(), AvpFlags::MANDATORY);
        assert_eq!(StandardAvpCode::ProductName.default_flags(), AvpFlags::OPTIONAL);
        assert_eq!(StandardAvpCode::OriginHost.default_flags().bits(), 0x40);
        assert_eq!(StandardAvpCode::ProductName.default_flags().bits(), 0x00);
    }

    #[test]
    fn test_flag_bits() {
        let flags = AvpFlags {
            vendor: true,
            mandatory: true,
            protected: false,
        };
        assert_eq!(flags.bits(), 0xC0);
        assert_eq!(AvpFlags::default().bits(), 0x00);
    }
}
