//! Response builders: one per response type, each producing the marshaled
//! byte block the dispatcher hands to the transaction layer.

use crate::error::N4Error;
use crate::ie::cause::Cause;
use crate::ie::fseid::Fseid;
use crate::ie::recovery_time_stamp::RecoveryTimeStamp;
use crate::ie::NodeId;
use crate::message::{
    AssociationReleaseResponse, AssociationSetupResponse, AssociationUpdateResponse,
    HeartbeatResponse, Message, SessionDeletionResponse, SessionEstablishmentResponse,
    SessionModificationResponse,
};
use crate::session::UpfSession;
use std::net::Ipv4Addr;

pub fn heartbeat(recovery: &RecoveryTimeStamp, sequence: u32) -> Result<Vec<u8>, N4Error> {
    Ok(HeartbeatResponse::new(sequence, recovery.to_ie()).marshal())
}

pub fn association_setup(
    node_id: &NodeId,
    recovery: &RecoveryTimeStamp,
    sequence: u32,
) -> Result<Vec<u8>, N4Error> {
    let response = AssociationSetupResponse::new(
        sequence,
        node_id.to_ie(),
        Cause::accepted().to_ie(),
        Some(recovery.to_ie()),
    );
    Ok(response.marshal())
}

pub fn association_update(node_id: &NodeId, sequence: u32) -> Result<Vec<u8>, N4Error> {
    let response =
        AssociationUpdateResponse::new(sequence, node_id.to_ie(), Cause::accepted().to_ie());
    Ok(response.marshal())
}

pub fn association_release(node_id: &NodeId, sequence: u32) -> Result<Vec<u8>, N4Error> {
    let response =
        AssociationReleaseResponse::new(sequence, node_id.to_ie(), Cause::accepted().to_ie());
    Ok(response.marshal())
}

/// The establishment response carries the peer's SEID in the header and our
/// UP F-SEID in the body, so the SMF learns the session key we allocated.
pub fn session_establishment(
    node_id: &NodeId,
    up_addr: Ipv4Addr,
    session: &UpfSession,
    sequence: u32,
) -> Result<Vec<u8>, N4Error> {
    let up_fseid = Fseid::new(session.local_seid, Some(up_addr), None);
    let response = SessionEstablishmentResponse::new(
        session.smf_seid,
        sequence,
        node_id.to_ie(),
        Cause::accepted().to_ie(),
        Some(up_fseid.to_ie()),
    );
    Ok(response.marshal())
}

pub fn session_modification(session: &UpfSession, sequence: u32) -> Result<Vec<u8>, N4Error> {
    let response =
        SessionModificationResponse::new(session.smf_seid, sequence, Cause::accepted().to_ie());
    Ok(response.marshal())
}

pub fn session_deletion(session: &UpfSession, sequence: u32) -> Result<Vec<u8>, N4Error> {
    let response =
        SessionDeletionResponse::new(session.smf_seid, sequence, Cause::accepted().to_ie());
    Ok(response.marshal())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ie::cause::CauseValue;
    use crate::message::MsgType;

    #[test]
    fn establishment_response_carries_peer_seid_and_up_fseid() {
        let mut session = UpfSession::new(7, "192.0.2.1:8805".parse().unwrap());
        session.smf_seid = 0x1122334455667788;
        let node_id = NodeId::Ipv4(Ipv4Addr::new(10, 0, 0, 1));

        let data =
            session_establishment(&node_id, Ipv4Addr::new(10, 0, 0, 1), &session, 42).unwrap();
        let decoded = SessionEstablishmentResponse::unmarshal(&data).unwrap();
        assert_eq!(decoded.seid(), Some(0x1122334455667788));
        assert_eq!(decoded.sequence(), 42);

        let up_fseid = Fseid::unmarshal(&decoded.up_fseid.unwrap().payload).unwrap();
        assert_eq!(up_fseid.seid, 7);
        let cause = Cause::unmarshal(&decoded.cause.payload).unwrap();
        assert_eq!(cause.value, CauseValue::RequestAccepted);
    }

    #[test]
    fn heartbeat_response_has_zero_seid_header() {
        let data = heartbeat(&RecoveryTimeStamp::now(), 5).unwrap();
        let decoded = HeartbeatResponse::unmarshal(&data).unwrap();
        assert_eq!(decoded.msg_type(), MsgType::HeartbeatResponse);
        assert_eq!(decoded.seid(), None);
        assert_eq!(decoded.header.seid, 0);
    }
}
