//! Session Deletion Request message.

use crate::error::PfcpError;
use crate::ie::Ie;
use crate::message::header::Header;
use crate::message::{marshal_message, unmarshal_body, Message, MsgType};

/// Tears down a session. The session is identified purely by the header SEID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDeletionRequest {
    pub header: Header,
    pub ies: Vec<Ie>,
}

impl SessionDeletionRequest {
    pub fn new(seid: u64, sequence: u32) -> Self {
        SessionDeletionRequest {
            header: Header::new(MsgType::SessionDeletionRequest, true, seid, sequence),
            ies: Vec::new(),
        }
    }
}

impl Message for SessionDeletionRequest {
    fn msg_type(&self) -> MsgType {
        MsgType::SessionDeletionRequest
    }

    fn marshal(&self) -> Vec<u8> {
        let ies: Vec<&Ie> = self.ies.iter().collect();
        marshal_message(&self.header, &ies)
    }

    fn unmarshal(data: &[u8]) -> Result<Self, PfcpError> {
        let (header, ies) = unmarshal_body(data)?;
        Ok(SessionDeletionRequest { header, ies })
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

    #[test]
    fn marshal_unmarshal_round_trip() {
        let request = SessionDeletionRequest::new(0x77, 30);
        let decoded = SessionDeletionRequest::unmarshal(&request.marshal()).unwrap();
        assert_eq!(decoded.seid(), Some(0x77));
        assert!(decoded.ies.is_empty());
    }
}
