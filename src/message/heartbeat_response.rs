//! Heartbeat Response message.

use crate::error::PfcpError;
use crate::ie::{Ie, IeType};
use crate::message::header::Header;
use crate::message::{marshal_message, unmarshal_body, Message, MsgType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeartbeatResponse {
    pub header: Header,
    pub recovery_time_stamp: Option<Ie>,
}

impl HeartbeatResponse {
    pub fn new(sequence: u32, recovery_time_stamp: Ie) -> Self {
        HeartbeatResponse {
            header: Header::new(MsgType::HeartbeatResponse, false, 0, sequence),
            recovery_time_stamp: Some(recovery_time_stamp),
        }
    }
}

impl Message for HeartbeatResponse {
    fn msg_type(&self) -> MsgType {
        MsgType::HeartbeatResponse
    }

    fn marshal(&self) -> Vec<u8> {
        let mut ies: Vec<&Ie> = Vec::new();
        if let Some(ie) = &self.recovery_time_stamp {
            ies.push(ie);
        }
        marshal_message(&self.header, &ies)
    }

    fn unmarshal(data: &[u8]) -> Result<Self, PfcpError> {
        let (header, body) = unmarshal_body(data)?;
        let recovery_time_stamp = body
            .into_iter()
            .find(|ie| ie.ie_type == IeType::RecoveryTimeStamp);
        Ok(HeartbeatResponse {
            header,
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
