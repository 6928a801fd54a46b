//! The always-present terminal response set: `Ok`, `Error`, `CmsError`,
//! `CmeError` — every `FinalResultCode` includes these four alternatives.
//! Grounded on
//! `atlink/protocols/standard/{Ok,Error,CmsError,CmeError}.h`.

use crate::{numeric_enum, response_frame};

response_frame! {
    /// The bare `OK` final result code.
    pub struct OkResponse {
        tag: "OK",
        fields: {}
    }
}

response_frame! {
    /// The bare `ERROR` final result code.
    pub struct ErrorResponse {
        tag: "ERROR",
        fields: {}
    }
}

numeric_enum! {
    /// `+CMS ERROR:` carries a single numeric code; the original only
    /// names the catch-all `Unknown = 500`, leaving the SMS-specific
    /// 3GPP TS 27.005 codes uncatalogued.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum CmsErrorCode {
        Unknown = 500,
    }
}

response_frame! {
    pub struct CmsError {
        tag: "+CMS ERROR:",
        fields: { code: CmsErrorCode }
    }
}

numeric_enum! {
    /// `+CME ERROR:` codes, transcribed from 3GPP TS 27.007 §9.2 via the
    /// original's `CmeError::Code`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum CmeErrorCode {
        PhoneFailure = 0,
        NoConnection = 1,
        LinkReserved = 2,
        NotAllowed = 3,
        NotSupported = 4,
        PhSimPin = 5,
        PhFsimPin = 6,
        PhFsimPuk = 7,
        SimNotInserted = 10,
        SimPin = 11,
        SimPuk = 12,
        SimFailure = 13,
        SimBusy = 14,
        SimWrong = 15,
        IncorrectPassword = 16,
        SimPin2 = 17,
        SimPuk2 = 18,
        MemoryFull = 20,
        InvalidIndex = 21,
        NotFound = 22,
        MemoryFailure = 23,
        TextTooLong = 24,
        InvalidChars = 25,
        DialStringTooLong = 26,
        DialStringInvalid = 27,
        NoNetwork = 30,
        NetworkTimeout = 31,
        NetworkNotAllowed = 32,
        NetworkPin = 40,
        NetworkPuk = 41,
        NetworkSubsetPin = 42,
        NetworkSubsetPuk = 43,
        ServicePin = 44,
        ServicePuk = 45,
        CorpPin = 46,
        CorpPuk = 47,
        HiddenKeyRequired = 48,
        EapMethodNotSupported = 49,
        IncorrectParameters = 50,
        CommandDisabled = 51,
        CommandAborted = 52,
        NotAttachedRestricted = 53,
        NotAllowedEmergencyOnly = 54,
        NotAllowedRestricted = 55,
        FixedDialNumberOnly = 56,
        TemporarilyOutOfService = 57,
        LanguageOrAlphabetNotSupported = 58,
        UnexpectedDataValue = 59,
        SystemFailure = 60,
        DataMissing = 61,
        CallBarred = 62,
        MessageWaitingIndicationSubscriptionFailure = 63,
        Unknown = 100,
        ImsiUnknownInHss = 102,
        IllegalUe = 103,
        ImsiUnknownInVlr = 104,
        ImeiNotAccepted = 105,
        IllegalMe = 106,
        PsServicesNotAllowed = 107,
        PsAndNonPsServicesNotAllowed = 108,
        UeIdentityNotDerivedFromNetwork = 109,
        ImplicitlyDetached = 110,
        PlmnNotAllowed = 111,
        AreaNotAllowed = 112,
        RoamingNotAllowedInArea = 113,
        PsServicesNotAllowedInPlmn = 114,
        NoCellsInArea = 115,
        MscTemporarilyNotReachable = 116,
        NetworkFailureAttach = 117,
        CsDomainUnavailable = 118,
        EsmFailure = 119,
        Congestion = 122,
        MbmsBearerCapabilitiesInsufficientForService = 124,
        NotAuthorizedForCsg = 125,
        InsufficientResources = 126,
        MissingOrUnknownApn = 127,
        UnknownPdpAddressOrType = 128,
        UserAuthenticationFailed = 129,
        ActivationRejectedByGgsnOrGw = 130,
        ActivationRejectedUnspecified = 131,
        ServiceOptionNotSupported = 132,
        ServiceOptionNotSubscribed = 133,
        ServiceOptionOutOfOrder = 134,
        NsapiOrPtiAlreadyInUse = 135,
        RegularDeactivation = 136,
        QosNotAccepted = 137,
        CallCannotBeIdentified = 138,
        CsServiceTemporarilyUnavailable = 139,
        FeatureNotSupported = 140,
        SemanticErrorInTftOperation = 141,
        SyntacticalErrorInTftOperation = 142,
        UnknownPdpContext = 143,
        SemanticErrorsInPacketFilter = 144,
        SyntacticalErrorInPacketFilter = 145,
        PdpContextWithoutTftAlreadyActivated = 146,
        MulticastGroupMembershipTimeout = 147,
        GprsUnknown = 148,
        PdpAuthFailure = 149,
        InvalidMobileClass = 150,
        LastPdnDisconnectionNotAllowedLegacy = 151,
        LastPdnDisconnectionNotAllowed = 171,
        SemanticallyIncorrectMessage = 172,
        InvalidMandatoryInformation = 173,
        MessageTypeNotImplemented = 174,
        ConditionalIeError = 175,
        UnspecifiedProtocolError = 176,
        OperatorDeterminedBarring = 177,
        MaximumNumberOfBearersReached = 178,
        RequestedApnNotSupported = 179,
        RequestRejectedBcmViolation = 180,
        UnsupportedQciOr5QiValue = 181,
        UserDataViaControlPlaneCongested = 182,
        SmsProvidedViaGprsInRoutingArea = 183,
        InvalidPtiValue = 184,
        NoBearerActivated = 185,
        MessageNotCompatibleWithProtocolState = 186,
        RecoveryOnTimerExpiry = 187,
        InvalidTransactionIdValue = 188,
        ServiceOptionNotAuthorizedInPlmn = 189,
        NetworkFailureActivation = 190,
        ReactivationRequested = 191,
        Ipv4OnlyAllowed = 192,
        Ipv6OnlyAllowed = 193,
        SingleAddressBearersOnlyAllowed = 194,
        CollisionWithNetworkInitiatedRequest = 195,
        Ipv4V6OnlyAllowed = 196,
        NonIpOnlyAllowed = 197,
        BearerHandlingUnsupported = 198,
        ApnRestrictionIncompatible = 199,
        MultipleAccessToPdnConnectionNotAllowed = 200,
        EsmInformationNotReceived = 201,
        PdnConnectionNonexistent = 202,
        MultiplePdnConnectionSameApnNotAllowed = 203,
        SevereNetworkFailure = 204,
        InsufficientResourcesForSliceAndDnn = 205,
        UnsupportedSscMode = 206,
        InsufficientResourcesForSlice = 207,
        MessageTypeNotCompatibleWithProtocolState = 208,
        IeNotImplemented = 209,
        N1ModeNotAllowed = 210,
        RestrictedServiceArea = 211,
        LadnUnavailable = 212,
        MissingOrUnknownDnnInSlice = 213,
        NgksiAlreadyInUse = 214,
        PayloadNotForwarded = 215,
        Non3GppAccessTo5GcnNotAllowed = 216,
        ServingNetworkNotAuthorized = 217,
        DnnNotSupportedInSlice = 218,
        InsufficientUserPlaneResourcesForPduSession = 219,
        OutOfLadnServiceArea = 220,
        PtiMismatch = 221,
        MaxDataRateForUserPlaneIntegrityTooLow = 222,
        SemanticErrorInQosOperation = 223,
        SyntacticalErrorInQosOperation = 224,
        InvalidMappedEpsBearerIdentity = 225,
        RedirectionTo5GcnRequired = 226,
        RedirectionToEpcRequired = 227,
        TemporarilyUnauthorizedForSnpn = 228,
        PermanentlyUnauthorizedForSnpn = 229,
        EthernetOnlyAllowed = 230,
        UnauthorizedForCag = 231,
        NoNetworkSlicesAvailable = 232,
        WirelineAccessAreaNotAllowed = 233,
    }
}

response_frame! {
    pub struct CmeError {
        tag: "+CME ERROR:",
        fields: { code: CmeErrorCode }
    }
}

crate::final_result_code! {
    /// The terminal set every command exchange resolves to when it carries
    /// no command-specific final result codes of its own.
    #[derive(Debug, Clone, PartialEq)]
    pub enum StandardFinalResult {
        extras: {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::codec::{Decode, Encode, Serializer};

    #[test]
    fn ok_round_trips() {
        let mut buf = [0u8; 16];
        let mut ser = Serializer::new(&mut buf);
        OkResponse::default().encode(&mut ser);
        assert!(ser.is_valid());
        assert_eq!(ser.output(), b"\r\nOK\r\n");

        let (value, consumed) = OkResponse::decode(b"\r\nOK\r\n").unwrap();
        assert_eq!(value, OkResponse::default());
        assert_eq!(consumed, 6);
    }

    #[test]
    fn ok_tolerates_missing_leading_crlf() {
        let (value, consumed) = OkResponse::decode(b"OK\r\n").unwrap();
        assert_eq!(value, OkResponse::default());
        assert_eq!(consumed, 4);
    }

    #[test]
    fn cme_error_round_trips() {
        let mut buf = [0u8; 32];
        let mut ser = Serializer::new(&mut buf);
        let err = CmeError {
            code: CmeErrorCode::SimNotInserted,
        };
        err.encode(&mut ser);
        assert_eq!(ser.output(), b"\r\n+CME ERROR:10\r\n");

        let (value, _) = CmeError::decode(b"\r\n+CME ERROR:10\r\n").unwrap();
        assert_eq!(value, err);
    }

    #[test]
    fn cme_error_rejects_unknown_code() {
        assert!(CmeError::decode(b"\r\n+CME ERROR:9999\r\n").is_err());
    }

    #[test]
    fn standard_final_result_matches_error_alternative() {
        let (value, consumed) = StandardFinalResult::parse(b"ERROR\r\n").unwrap();
        assert_eq!(value, StandardFinalResult::Error(ErrorResponse::default()));
        assert_eq!(consumed, 7);
    }
}
