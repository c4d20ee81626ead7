//! Error types for the PFCP codec and the N4 handler.

use crate::datapath::DatapathError;
use crate::ie::IeType;
use thiserror::Error;

/// Failures raised while decoding or encoding PFCP wire data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PfcpError {
    /// An IE or header payload is shorter than its fixed part requires.
    #[error("invalid {context} length: expected at least {expected} bytes, got {actual}")]
    InvalidLength {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A field decoded, but its value is outside what the protocol allows.
    #[error("invalid {field} value: {reason}")]
    InvalidValue {
        field: &'static str,
        reason: String,
    },

    /// A mandatory IE is absent from a message or a grouped IE.
    #[error("missing mandatory {ie:?} IE")]
    MissingIe { ie: IeType },

    /// The PFCP header itself could not be decoded.
    #[error("invalid PFCP header: {reason}")]
    InvalidHeader { reason: String },
}

impl PfcpError {
    pub fn invalid_length(context: &'static str, expected: usize, actual: usize) -> Self {
        PfcpError::InvalidLength {
            context,
            expected,
            actual,
        }
    }

    pub fn invalid_value(field: &'static str, reason: impl Into<String>) -> Self {
        PfcpError::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}

/// Failures surfaced by the N4 request handlers.
///
/// Every handler returns on the first error; rules installed earlier in the
/// same request are not rolled back. The transaction layer owns reporting the
/// failure to the peer.
#[derive(Debug, Error)]
pub enum N4Error {
    /// A mandatory IE is absent or malformed, or the request is not valid in
    /// the peer's current association state.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A referenced PDR, FAR, or session does not exist.
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: u64 },

    /// The PDR exists but belongs to a different session.
    #[error("PDR {0} not owned by this session")]
    NotOwned(u16),

    /// The datapath refused an add, modify, or delete.
    #[error("datapath error: {0}")]
    Datapath(#[from] DatapathError),

    /// Response serialization failed.
    #[error("response build error: {0}")]
    Build(String),

    /// Attaching or committing the transaction failed.
    #[error("transaction error: {0}")]
    Transaction(String),

    /// A recognized IE combination this handler does not support
    /// (dual-stack F-TEID, IPv6 UE addressing, non-IPv4 outer headers).
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),
}

impl N4Error {
    pub fn not_found(kind: &'static str, id: impl Into<u64>) -> Self {
        N4Error::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn invalid_request(reason: impl Into<String>) -> Self {
        N4Error::InvalidRequest(reason.into())
    }
}

impl From<PfcpError> for N4Error {
    fn from(err: PfcpError) -> Self {
        N4Error::InvalidRequest(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_length_message() {
        let err = PfcpError::invalid_length("PDR ID", 2, 0);
        assert_eq!(
            err.to_string(),
            "invalid PDR ID length: expected at least 2 bytes, got 0"
        );
    }

    #[test]
    fn missing_ie_message() {
        let err = PfcpError::MissingIe { ie: IeType::PdrId };
        assert!(err.to_string().contains("PdrId"));
    }

    #[test]
    fn codec_error_maps_to_invalid_request() {
        let err: N4Error = PfcpError::invalid_length("Precedence", 4, 1).into();
        assert!(matches!(err, N4Error::InvalidRequest(_)));
    }

    #[test]
    fn not_found_message() {
        let err = N4Error::not_found("FAR", 10u32);
        assert_eq!(err.to_string(), "FAR 10 not found");
    }
}
