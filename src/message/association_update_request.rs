//! Association Update Request message.

use crate::error::PfcpError;
use crate::ie::{Ie, IeType};
use crate::message::header::Header;
use crate::message::{marshal_message, unmarshal_body, Message, MsgType};

/// Node-level parameter change from the peer. Only the Node ID is consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssociationUpdateRequest {
    pub header: Header,
    pub node_id: Option<Ie>,
    pub ies: Vec<Ie>,
}

impl AssociationUpdateRequest {
    pub fn new(sequence: u32, node_id: Option<Ie>) -> Self {
        AssociationUpdateRequest {
            header: Header::new(MsgType::AssociationUpdateRequest, false, 0, sequence),
            node_id,
            ies: Vec::new(),
        }
    }
}

impl Message for AssociationUpdateRequest {
    fn msg_type(&self) -> MsgType {
        MsgType::AssociationUpdateRequest
    }

    fn marshal(&self) -> Vec<u8> {
        let mut ies: Vec<&Ie> = Vec::new();
        if let Some(ie) = &self.node_id {
            ies.push(ie);
        }
        ies.extend(self.ies.iter());
        marshal_message(&self.header, &ies)
    }

    fn unmarshal(data: &[u8]) -> Result<Self, PfcpError> {
        let (header, body) = unmarshal_body(data)?;
        let mut node_id = None;
        let mut ies = Vec::new();
        for ie in body {
            match ie.ie_type {
                IeType::NodeId => node_id = Some(ie),
                _ => ies.push(ie),
            }
        }
        Ok(AssociationUpdateRequest {
            header,
            node_id,
            ies,
        })
    }

    fn seid(&self) -> Option<u64> {
        None
    }

    fn sequence(&self) -> u32 {
        self.header.sequence_number
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ie::node_id::NodeId;
    use std::net::Ipv4Addr;

    #[test]
    fn marshal_unmarshal_round_trip() {
        let request = AssociationUpdateRequest::new(
            4,
            Some(NodeId::Ipv4(Ipv4Addr::new(192, 0, 2, 9)).to_ie()),
        );
        let decoded = AssociationUpdateRequest::unmarshal(&request.marshal()).unwrap();
        assert!(decoded.node_id.is_some());
        assert_eq!(decoded.sequence(), 4);
    }
}
