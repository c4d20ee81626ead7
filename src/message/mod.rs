//! PFCP messages.
//!
//! One module per message type. Messages keep their body IEs as raw [`Ie`]
//! values bucketed by type; grouped rule IEs are decoded to typed structs by
//! whoever consumes them.

pub mod association_release_request;
pub mod association_release_response;
pub mod association_setup_request;
pub mod association_setup_response;
pub mod association_update_request;
pub mod association_update_response;
pub mod display;
pub mod header;
pub mod heartbeat_request;
pub mod heartbeat_response;
pub mod session_deletion_request;
pub mod session_deletion_response;
pub mod session_establishment_request;
pub mod session_establishment_response;
pub mod session_modification_request;
pub mod session_modification_response;
pub mod session_report_response;

use crate::error::PfcpError;
use crate::ie::{Ie, IeIterator};
use header::Header;

pub use association_release_request::AssociationReleaseRequest;
pub use association_release_response::AssociationReleaseResponse;
pub use association_setup_request::AssociationSetupRequest;
pub use association_setup_response::AssociationSetupResponse;
pub use association_update_request::AssociationUpdateRequest;
pub use association_update_response::AssociationUpdateResponse;
pub use heartbeat_request::HeartbeatRequest;
pub use heartbeat_response::HeartbeatResponse;
pub use session_deletion_request::SessionDeletionRequest;
pub use session_deletion_response::SessionDeletionResponse;
pub use session_establishment_request::SessionEstablishmentRequest;
pub use session_establishment_response::SessionEstablishmentResponse;
pub use session_modification_request::SessionModificationRequest;
pub use session_modification_response::SessionModificationResponse;
pub use session_report_response::SessionReportResponse;

/// PFCP message type code points, per 3GPP TS 29.244 §7.3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MsgType {
    HeartbeatRequest = 1,
    HeartbeatResponse = 2,
    AssociationSetupRequest = 5,
    AssociationSetupResponse = 6,
    AssociationUpdateRequest = 7,
    AssociationUpdateResponse = 8,
    AssociationReleaseRequest = 9,
    AssociationReleaseResponse = 10,
    SessionEstablishmentRequest = 50,
    SessionEstablishmentResponse = 51,
    SessionModificationRequest = 52,
    SessionModificationResponse = 53,
    SessionDeletionRequest = 54,
    SessionDeletionResponse = 55,
    SessionReportRequest = 56,
    SessionReportResponse = 57,
    Unknown = 0,
}

impl From<u8> for MsgType {
    fn from(v: u8) -> Self {
        match v {
            1 => MsgType::HeartbeatRequest,
            2 => MsgType::HeartbeatResponse,
            5 => MsgType::AssociationSetupRequest,
            6 => MsgType::AssociationSetupResponse,
            7 => MsgType::AssociationUpdateRequest,
            8 => MsgType::AssociationUpdateResponse,
            9 => MsgType::AssociationReleaseRequest,
            10 => MsgType::AssociationReleaseResponse,
            50 => MsgType::SessionEstablishmentRequest,
            51 => MsgType::SessionEstablishmentResponse,
            52 => MsgType::SessionModificationRequest,
            53 => MsgType::SessionModificationResponse,
            54 => MsgType::SessionDeletionRequest,
            55 => MsgType::SessionDeletionResponse,
            56 => MsgType::SessionReportRequest,
            57 => MsgType::SessionReportResponse,
            _ => MsgType::Unknown,
        }
    }
}

/// Common surface of every PFCP message.
pub trait Message {
    fn msg_type(&self) -> MsgType;

    /// Serializes the message, header included.
    fn marshal(&self) -> Vec<u8>;

    fn unmarshal(data: &[u8]) -> Result<Self, PfcpError>
    where
        Self: Sized;

    /// The header SEID, if this is a session-level message.
    fn seid(&self) -> Option<u64>;

    fn sequence(&self) -> u32;
}

/// Serializes a header plus body IEs, fixing up the header length field.
pub(crate) fn marshal_message(header: &Header, ies: &[&Ie]) -> Vec<u8> {
    let body: u16 = ies.iter().map(|ie| ie.len()).sum();
    let mut header = header.clone();
    header.set_body_length(body);
    let mut buf = Vec::with_capacity((header.len() + body) as usize);
    header.marshal_into(&mut buf);
    for ie in ies {
        ie.marshal_into(&mut buf);
    }
    buf
}

/// Decodes the header and splits the body into IEs.
pub(crate) fn unmarshal_body(data: &[u8]) -> Result<(Header, Vec<Ie>), PfcpError> {
    let header = Header::unmarshal(data)?;
    let body_start = header.len() as usize;
    if data.len() < body_start {
        return Err(PfcpError::InvalidHeader {
            reason: "message shorter than its header".into(),
        });
    }
    let ies = IeIterator::new(&data[body_start..]).collect::<Result<Vec<_>, _>>()?;
    Ok((header, ies))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ie::cause::Cause;
    use crate::ie::IeType;

    #[test]
    fn msg_type_round_trip() {
        for code in [1u8, 2, 5, 6, 7, 8, 9, 10, 50, 51, 52, 53, 54, 55, 56, 57] {
            let msg_type = MsgType::from(code);
            assert_ne!(msg_type, MsgType::Unknown);
            assert_eq!(msg_type as u8, code);
        }
        assert_eq!(MsgType::from(200), MsgType::Unknown);
    }

    #[test]
    fn marshal_message_sets_length() {
        let header = Header::new(MsgType::SessionModificationResponse, true, 9, 3);
        let cause = Cause::accepted().to_ie();
        let data = marshal_message(&header, &[&cause]);
        let (decoded, ies) = unmarshal_body(&data).unwrap();
        assert_eq!(decoded.length as usize, data.len() - 4);
        assert_eq!(ies.len(), 1);
        assert_eq!(ies[0].ie_type, IeType::Cause);
    }
}
