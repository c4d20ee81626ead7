//! Association Release Request message.

use crate::error::PfcpError;
use crate::ie::{Ie, IeType};
use crate::message::header::Header;
use crate::message::{marshal_message, unmarshal_body, Message, MsgType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssociationReleaseRequest {
    pub header: Header,
    pub node_id: Option<Ie>,
}

impl AssociationReleaseRequest {
    pub fn new(sequence: u32, node_id: Option<Ie>) -> Self {
        AssociationReleaseRequest {
            header: Header::new(MsgType::AssociationReleaseRequest, false, 0, sequence),
            node_id,
        }
    }
}

impl Message for AssociationReleaseRequest {
    fn msg_type(&self) -> MsgType {
        MsgType::AssociationReleaseRequest
    }

    fn marshal(&self) -> Vec<u8> {
        let mut ies: Vec<&Ie> = Vec::new();
        if let Some(ie) = &self.node_id {
            ies.push(ie);
        }
        marshal_message(&self.header, &ies)
    }

    fn unmarshal(data: &[u8]) -> Result<Self, PfcpError> {
        let (header, body) = unmarshal_body(data)?;
        let node_id = body.into_iter().find(|ie| ie.ie_type == IeType::NodeId);
        Ok(AssociationReleaseRequest { header, node_id })
    }

    fn seid(&self) -> Option<u64> {
        None
    }

    fn sequence(&self) -> u32 {
        self.header.sequence_number
    }
}
