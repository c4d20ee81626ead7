//! Session Establishment Response message.

use crate::error::PfcpError;
use crate::ie::{Ie, IeType};
use crate::message::header::Header;
use crate::message::{marshal_message, unmarshal_body, Message, MsgType};

/// Accepts a session. The header SEID is the peer's SEID learned from the
/// request's CP F-SEID; the UP F-SEID tells the peer ours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEstablishmentResponse {
    pub header: Header,
    pub node_id: Ie,
    pub cause: Ie,
    pub up_fseid: Option<Ie>,
}

impl SessionEstablishmentResponse {
    pub fn new(seid: u64, sequence: u32, node_id: Ie, cause: Ie, up_fseid: Option<Ie>) -> Self {
        SessionEstablishmentResponse {
            header: Header::new(MsgType::SessionEstablishmentResponse, true, seid, sequence),
            node_id,
            cause,
            up_fseid,
        }
    }
}

impl Message for SessionEstablishmentResponse {
    fn msg_type(&self) -> MsgType {
        MsgType::SessionEstablishmentResponse
    }

    fn marshal(&self) -> Vec<u8> {
        let mut ies: Vec<&Ie> = vec![&self.node_id, &self.cause];
        if let Some(ie) = &self.up_fseid {
            ies.push(ie);
        }
        marshal_message(&self.header, &ies)
    }

    fn unmarshal(data: &[u8]) -> Result<Self, PfcpError> {
        let (header, body) = unmarshal_body(data)?;
        let mut node_id = None;
        let mut cause = None;
        let mut up_fseid = None;
        for ie in body {
            match ie.ie_type {
                IeType::NodeId => node_id = Some(ie),
                IeType::Cause => cause = Some(ie),
                IeType::Fseid => up_fseid = Some(ie),
                _ => (),
            }
        }
        Ok(SessionEstablishmentResponse {
            header,
            node_id: node_id.ok_or(PfcpError::MissingIe { ie: IeType::NodeId })?,
            cause: cause.ok_or(PfcpError::MissingIe { ie: IeType::Cause })?,
            up_fseid,
        })
    }

    fn seid(&self) -> Option<u64> {
        Some(self.header.seid)
    }

    fn sequence(&self) -> u32 {
        self.header.sequence_number
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ie::cause::Cause;
    use crate::ie::fseid::Fseid;
    use crate::ie::node_id::NodeId;
    use std::net::Ipv4Addr;

    #[test]
    fn marshal_unmarshal_round_trip() {
        let response = SessionEstablishmentResponse::new(
            0x1122334455667788,
            10,
            NodeId::Ipv4(Ipv4Addr::new(10, 0, 0, 1)).to_ie(),
            Cause::accepted().to_ie(),
            Some(Fseid::new(0x42, Some(Ipv4Addr::new(10, 0, 0, 1)), None).to_ie()),
        );
        let decoded = SessionEstablishmentResponse::unmarshal(&response.marshal()).unwrap();
        assert_eq!(decoded.seid(), Some(0x1122334455667788));
        assert!(decoded.up_fseid.is_some());
    }
}
