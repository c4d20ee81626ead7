//! Session Modification Request message.

use crate::error::PfcpError;
use crate::ie::{Ie, IeType};
use crate::message::header::Header;
use crate::message::{marshal_message, unmarshal_body, Message, MsgType};

/// Mutates an established session. The handler applies the rule IEs in a
/// fixed order: create PDRs, create FARs, update PDRs, update FARs, remove
/// PDRs, remove FARs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionModificationRequest {
    pub header: Header,
    pub create_pdrs: Vec<Ie>,
    pub create_fars: Vec<Ie>,
    pub update_pdrs: Vec<Ie>,
    pub update_fars: Vec<Ie>,
    pub remove_pdrs: Vec<Ie>,
    pub remove_fars: Vec<Ie>,
    pub ies: Vec<Ie>,
}

impl SessionModificationRequest {
    pub fn new(seid: u64, sequence: u32) -> Self {
        SessionModificationRequest {
            header: Header::new(MsgType::SessionModificationRequest, true, seid, sequence),
            ..Default::default()
        }
    }

    pub fn with_create_pdrs(mut self, ies: Vec<Ie>) -> Self {
        self.create_pdrs = ies;
        self
    }

    pub fn with_create_fars(mut self, ies: Vec<Ie>) -> Self {
        self.create_fars = ies;
        self
    }

    pub fn with_update_pdrs(mut self, ies: Vec<Ie>) -> Self {
        self.update_pdrs = ies;
        self
    }

    pub fn with_update_fars(mut self, ies: Vec<Ie>) -> Self {
        self.update_fars = ies;
        self
    }

    pub fn with_remove_pdrs(mut self, ies: Vec<Ie>) -> Self {
        self.remove_pdrs = ies;
        self
    }

    pub fn with_remove_fars(mut self, ies: Vec<Ie>) -> Self {
        self.remove_fars = ies;
        self
    }
}

impl Message for SessionModificationRequest {
    fn msg_type(&self) -> MsgType {
        MsgType::SessionModificationRequest
    }

    fn marshal(&self) -> Vec<u8> {
        let mut ies: Vec<&Ie> = Vec::new();
        ies.extend(self.create_pdrs.iter());
        ies.extend(self.create_fars.iter());
        ies.extend(self.update_pdrs.iter());
        ies.extend(self.update_fars.iter());
        ies.extend(self.remove_pdrs.iter());
        ies.extend(self.remove_fars.iter());
        ies.extend(self.ies.iter());
        marshal_message(&self.header, &ies)
    }

    fn unmarshal(data: &[u8]) -> Result<Self, PfcpError> {
        let (header, body) = unmarshal_body(data)?;
        let mut request = SessionModificationRequest {
            header,
            ..Default::default()
        };
        for ie in body {
            match ie.ie_type {
                IeType::CreatePdr => request.create_pdrs.push(ie),
                IeType::CreateFar => request.create_fars.push(ie),
                IeType::UpdatePdr => request.update_pdrs.push(ie),
                IeType::UpdateFar => request.update_fars.push(ie),
                IeType::RemovePdr => request.remove_pdrs.push(ie),
                IeType::RemoveFar => request.remove_fars.push(ie),
                _ => request.ies.push(ie),
            }
        }
        Ok(request)
    }

    fn seid(&self) -> Option<u64> {
        Some(self.header.seid)
    }

    fn sequence(&self) -> u32 {
        self.header.sequence_number
    }
}
