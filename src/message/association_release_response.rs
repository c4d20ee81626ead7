//! Association Release Response message.

use crate::error::PfcpError;
use crate::ie::{Ie, IeType};
use crate::message::header::Header;
use crate::message::{marshal_message, unmarshal_body, Message, MsgType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssociationReleaseResponse {
    pub header: Header,
    pub node_id: Ie,
    pub cause: Ie,
}

impl AssociationReleaseResponse {
    pub fn new(sequence: u32, node_id: Ie, cause: Ie) -> Self {
        AssociationReleaseResponse {
            header: Header::new(MsgType::AssociationReleaseResponse, false, 0, sequence),
            node_id,
            cause,
        }
    }
}

impl Message for AssociationReleaseResponse {
    fn msg_type(&self) -> MsgType {
        MsgType::AssociationReleaseResponse
    }

    fn marshal(&self) -> Vec<u8> {
        marshal_message(&self.header, &[&self.node_id, &self.cause])
    }

    fn unmarshal(data: &[u8]) -> Result<Self, PfcpError> {
        let (header, body) = unmarshal_body(data)?;
        let mut node_id = None;
        let mut cause = None;
        for ie in body {
            match ie.ie_type {
                IeType::NodeId => node_id = Some(ie),
                IeType::Cause => cause = Some(ie),
                _ => (),
            }
        }
        Ok(AssociationReleaseResponse {
            header,
            node_id: node_id.ok_or(PfcpError::MissingIe { ie: IeType::NodeId })?,
            cause: cause.ok_or(PfcpError::MissingIe { ie: IeType::Cause })?,
        })
    }

    fn seid(&self) -> Option<u64> {
        None
    }

    fn sequence(&self) -> u32 {
        self.header.sequence_number
    }
}
