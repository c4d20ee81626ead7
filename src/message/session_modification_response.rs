//! Session Modification Response message.

use crate::error::PfcpError;
use crate::ie::{Ie, IeType};
use crate::message::header::Header;
use crate::message::{marshal_message, unmarshal_body, Message, MsgType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionModificationResponse {
    pub header: Header,
    pub cause: Ie,
}

impl SessionModificationResponse {
    pub fn new(seid: u64, sequence: u32, cause: Ie) -> Self {
        SessionModificationResponse {
            header: Header::new(MsgType::SessionModificationResponse, true, seid, sequence),
            cause,
        }
    }
}

impl Message for SessionModificationResponse {
    fn msg_type(&self) -> MsgType {
        MsgType::SessionModificationResponse
    }

    fn marshal(&self) -> Vec<u8> {
        marshal_message(&self.header, &[&self.cause])
    }

    fn unmarshal(data: &[u8]) -> Result<Self, PfcpError> {
        let (header, body) = unmarshal_body(data)?;
        let cause = body.into_iter().find(|ie| ie.ie_type == IeType::Cause);
        Ok(SessionModificationResponse {
            header,
            cause: cause.ok_or(PfcpError::MissingIe { ie: IeType::Cause })?,
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

    #[test]
    fn marshal_unmarshal_round_trip() {
        let response = SessionModificationResponse::new(0x99, 21, Cause::accepted().to_ie());
        let decoded = SessionModificationResponse::unmarshal(&response.marshal()).unwrap();
        assert_eq!(decoded.seid(), Some(0x99));
        assert_eq!(decoded.sequence(), 21);
    }
}
