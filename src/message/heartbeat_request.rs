//! Heartbeat Request message.

use crate::error::PfcpError;
use crate::ie::{Ie, IeType};
use crate::message::header::Header;
use crate::message::{marshal_message, unmarshal_body, Message, MsgType};

/// Node-level liveness probe. Carries the sender's Recovery Time Stamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeartbeatRequest {
    pub header: Header,
    pub recovery_time_stamp: Option<Ie>,
    pub ies: Vec<Ie>,
}

impl HeartbeatRequest {
    pub fn new(sequence: u32, recovery_time_stamp: Option<Ie>) -> Self {
        HeartbeatRequest {
            header: Header::new(MsgType::HeartbeatRequest, false, 0, sequence),
            recovery_time_stamp,
            ies: Vec::new(),
        }
    }
}

impl Message for HeartbeatRequest {
    fn msg_type(&self) -> MsgType {
        MsgType::HeartbeatRequest
    }

    fn marshal(&self) -> Vec<u8> {
        let mut ies: Vec<&Ie> = Vec::new();
        if let Some(ie) = &self.recovery_time_stamp {
            ies.push(ie);
        }
        ies.extend(self.ies.iter());
        marshal_message(&self.header, &ies)
    }

    fn unmarshal(data: &[u8]) -> Result<Self, PfcpError> {
        let (header, body) = unmarshal_body(data)?;
        let mut recovery_time_stamp = None;
        let mut ies = Vec::new();
        for ie in body {
            match ie.ie_type {
                IeType::RecoveryTimeStamp => recovery_time_stamp = Some(ie),
                _ => ies.push(ie),
            }
        }
        Ok(HeartbeatRequest {
            header,
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
