//! Association Setup Request message.

use crate::error::PfcpError;
use crate::ie::{Ie, IeType};
use crate::message::header::Header;
use crate::message::{marshal_message, unmarshal_body, Message, MsgType};

/// Opens an association between a CP and a UP function. The Node ID is
/// mandatory at the protocol level; the handler enforces its presence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssociationSetupRequest {
    pub header: Header,
    pub node_id: Option<Ie>,
    pub recovery_time_stamp: Option<Ie>,
    pub ies: Vec<Ie>,
}

impl AssociationSetupRequest {
    pub fn new(sequence: u32, node_id: Ie, recovery_time_stamp: Option<Ie>) -> Self {
        AssociationSetupRequest {
            header: Header::new(MsgType::AssociationSetupRequest, false, 0, sequence),
            node_id: Some(node_id),
            recovery_time_stamp,
            ies: Vec::new(),
        }
    }
}

impl Message for AssociationSetupRequest {
    fn msg_type(&self) -> MsgType {
        MsgType::AssociationSetupRequest
    }

    fn marshal(&self) -> Vec<u8> {
        let mut ies: Vec<&Ie> = Vec::new();
        if let Some(ie) = &self.node_id {
            ies.push(ie);
        }
        if let Some(ie) = &self.recovery_time_stamp {
            ies.push(ie);
        }
        ies.extend(self.ies.iter());
        marshal_message(&self.header, &ies)
    }

    fn unmarshal(data: &[u8]) -> Result<Self, PfcpError> {
        let (header, body) = unmarshal_body(data)?;
        let mut node_id = None;
        let mut recovery_time_stamp = None;
        let mut ies = Vec::new();
        for ie in body {
            match ie.ie_type {
                IeType::NodeId => node_id = Some(ie),
                IeType::RecoveryTimeStamp => recovery_time_stamp = Some(ie),
                _ => ies.push(ie),
            }
        }
        Ok(AssociationSetupRequest {
            header,
            node_id,
            recovery_time_stamp,
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
    use crate::ie::recovery_time_stamp::RecoveryTimeStamp;
    use std::net::Ipv4Addr;

    #[test]
    fn marshal_unmarshal_round_trip() {
        let request = AssociationSetupRequest::new(
            1,
            NodeId::Ipv4(Ipv4Addr::new(192, 0, 2, 1)).to_ie(),
            Some(RecoveryTimeStamp::now().to_ie()),
        );
        let decoded = AssociationSetupRequest::unmarshal(&request.marshal()).unwrap();
        let node_id = NodeId::unmarshal(&decoded.node_id.unwrap().payload).unwrap();
        assert_eq!(node_id, NodeId::Ipv4(Ipv4Addr::new(192, 0, 2, 1)));
    }

    #[test]
    fn node_id_may_be_absent_at_codec_level() {
        let request = AssociationSetupRequest {
            header: Header::new(MsgType::AssociationSetupRequest, false, 0, 2),
            node_id: None,
            recovery_time_stamp: None,
            ies: Vec::new(),
        };
        let decoded = AssociationSetupRequest::unmarshal(&request.marshal()).unwrap();
        assert!(decoded.node_id.is_none());
    }
}
