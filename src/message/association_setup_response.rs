//! Association Setup Response message.

use crate::error::PfcpError;
use crate::ie::{Ie, IeType};
use crate::message::header::Header;
use crate::message::{marshal_message, unmarshal_body, Message, MsgType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssociationSetupResponse {
    pub header: Header,
    pub node_id: Ie,
    pub cause: Ie,
    pub recovery_time_stamp: Option<Ie>,
}

impl AssociationSetupResponse {
    pub fn new(sequence: u32, node_id: Ie, cause: Ie, recovery_time_stamp: Option<Ie>) -> Self {
        AssociationSetupResponse {
            header: Header::new(MsgType::AssociationSetupResponse, false, 0, sequence),
            node_id,
            cause,
            recovery_time_stamp,
        }
    }
}

impl Message for AssociationSetupResponse {
    fn msg_type(&self) -> MsgType {
        MsgType::AssociationSetupResponse
    }

    fn marshal(&self) -> Vec<u8> {
        let mut ies: Vec<&Ie> = vec![&self.node_id, &self.cause];
        if let Some(ie) = &self.recovery_time_stamp {
            ies.push(ie);
        }
        marshal_message(&self.header, &ies)
    }

    fn unmarshal(data: &[u8]) -> Result<Self, PfcpError> {
        let (header, body) = unmarshal_body(data)?;
        let mut node_id = None;
        let mut cause = None;
        let mut recovery_time_stamp = None;
        for ie in body {
            match ie.ie_type {
                IeType::NodeId => node_id = Some(ie),
                IeType::Cause => cause = Some(ie),
                IeType::RecoveryTimeStamp => recovery_time_stamp = Some(ie),
                _ => (),
            }
        }
        Ok(AssociationSetupResponse {
            header,
            node_id: node_id.ok_or(PfcpError::MissingIe { ie: IeType::NodeId })?,
            cause: cause.ok_or(PfcpError::MissingIe { ie: IeType::Cause })?,
            recovery_time_stamp,
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
    use crate::ie::cause::{Cause, CauseValue};
    use crate::ie::node_id::NodeId;
    use std::net::Ipv4Addr;

    #[test]
    fn marshal_unmarshal_round_trip() {
        let response = AssociationSetupResponse::new(
            3,
            NodeId::Ipv4(Ipv4Addr::new(10, 0, 0, 1)).to_ie(),
            Cause::accepted().to_ie(),
            None,
        );
        let decoded = AssociationSetupResponse::unmarshal(&response.marshal()).unwrap();
        let cause = Cause::unmarshal(&decoded.cause.payload).unwrap();
        assert_eq!(cause.value, CauseValue::RequestAccepted);
    }

    #[test]
    fn missing_cause_rejected() {
        let response = marshal_message(
            &Header::new(MsgType::AssociationSetupResponse, false, 0, 3),
            &[&NodeId::Ipv4(Ipv4Addr::new(10, 0, 0, 1)).to_ie()],
        );
        assert!(AssociationSetupResponse::unmarshal(&response).is_err());
    }
}
