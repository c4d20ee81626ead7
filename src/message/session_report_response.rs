//! Session Report Response message.
//!
//! Sent by the SMF to answer a Session Report Request this UPF issued.
//! Receiving it closes the pending report transaction; the Cause IE is
//! mandatory and its absence invalidates the response.

use crate::error::PfcpError;
use crate::ie::{Ie, IeType};
use crate::message::header::Header;
use crate::message::{marshal_message, unmarshal_body, Message, MsgType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReportResponse {
    pub header: Header,
    pub cause: Option<Ie>,
    pub ies: Vec<Ie>,
}

impl SessionReportResponse {
    pub fn new(seid: u64, sequence: u32, cause: Option<Ie>) -> Self {
        SessionReportResponse {
            header: Header::new(MsgType::SessionReportResponse, true, seid, sequence),
            cause,
            ies: Vec::new(),
        }
    }
}

impl Message for SessionReportResponse {
    fn msg_type(&self) -> MsgType {
        MsgType::SessionReportResponse
    }

    fn marshal(&self) -> Vec<u8> {
        let mut ies: Vec<&Ie> = Vec::new();
        if let Some(ie) = &self.cause {
            ies.push(ie);
        }
        ies.extend(self.ies.iter());
        marshal_message(&self.header, &ies)
    }

    fn unmarshal(data: &[u8]) -> Result<Self, PfcpError> {
        let (header, body) = unmarshal_body(data)?;
        let mut cause = None;
        let mut ies = Vec::new();
        for ie in body {
            match ie.ie_type {
                IeType::Cause => cause = Some(ie),
                _ => ies.push(ie),
            }
        }
        Ok(SessionReportResponse { header, cause, ies })
    }

    fn seid(&self) -> Option<u64> {
        Some(self.header.seid)
    }

    fn sequence(&self) -> u32 {
        self.header.sequence_number
    }
}
