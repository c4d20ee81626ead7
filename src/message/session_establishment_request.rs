//! Session Establishment Request message.

use crate::error::PfcpError;
use crate::ie::{Ie, IeType};
use crate::message::header::Header;
use crate::message::{marshal_message, unmarshal_body, Message, MsgType};

/// Creates an N4 session: the CP F-SEID plus any number of Create PDR and
/// Create FAR IEs. URR/QER/BAR creations are carried but not acted on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEstablishmentRequest {
    pub header: Header,
    pub node_id: Option<Ie>,
    pub cp_fseid: Option<Ie>,
    pub create_pdrs: Vec<Ie>,
    pub create_fars: Vec<Ie>,
    pub create_urrs: Vec<Ie>,
    pub create_qers: Vec<Ie>,
    pub create_bars: Vec<Ie>,
    pub ies: Vec<Ie>,
}

impl SessionEstablishmentRequest {
    pub fn new(seid: u64, sequence: u32, node_id: Option<Ie>, cp_fseid: Option<Ie>) -> Self {
        SessionEstablishmentRequest {
            header: Header::new(MsgType::SessionEstablishmentRequest, true, seid, sequence),
            node_id,
            cp_fseid,
            create_pdrs: Vec::new(),
            create_fars: Vec::new(),
            create_urrs: Vec::new(),
            create_qers: Vec::new(),
            create_bars: Vec::new(),
            ies: Vec::new(),
        }
    }

    pub fn with_create_pdrs(mut self, create_pdrs: Vec<Ie>) -> Self {
        self.create_pdrs = create_pdrs;
        self
    }

    pub fn with_create_fars(mut self, create_fars: Vec<Ie>) -> Self {
        self.create_fars = create_fars;
        self
    }
}

impl Message for SessionEstablishmentRequest {
    fn msg_type(&self) -> MsgType {
        MsgType::SessionEstablishmentRequest
    }

    fn marshal(&self) -> Vec<u8> {
        let mut ies: Vec<&Ie> = Vec::new();
        if let Some(ie) = &self.node_id {
            ies.push(ie);
        }
        if let Some(ie) = &self.cp_fseid {
            ies.push(ie);
        }
        ies.extend(self.create_pdrs.iter());
        ies.extend(self.create_fars.iter());
        ies.extend(self.create_urrs.iter());
        ies.extend(self.create_qers.iter());
        ies.extend(self.create_bars.iter());
        ies.extend(self.ies.iter());
        marshal_message(&self.header, &ies)
    }

    fn unmarshal(data: &[u8]) -> Result<Self, PfcpError> {
        let (header, body) = unmarshal_body(data)?;
        let mut request = SessionEstablishmentRequest {
            header,
            node_id: None,
            cp_fseid: None,
            create_pdrs: Vec::new(),
            create_fars: Vec::new(),
            create_urrs: Vec::new(),
            create_qers: Vec::new(),
            create_bars: Vec::new(),
            ies: Vec::new(),
        };
        for ie in body {
            match ie.ie_type {
                IeType::NodeId => request.node_id = Some(ie),
                IeType::Fseid => request.cp_fseid = Some(ie),
                IeType::CreatePdr => request.create_pdrs.push(ie),
                IeType::CreateFar => request.create_fars.push(ie),
                IeType::CreateUrr => request.create_urrs.push(ie),
                IeType::CreateQer => request.create_qers.push(ie),
                IeType::CreateBar => request.create_bars.push(ie),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ie::create_far::CreateFar;
    use crate::ie::create_pdr::CreatePdr;
    use crate::ie::apply_action::ApplyAction;
    use crate::ie::far_id::FarId;
    use crate::ie::fseid::Fseid;
    use crate::ie::pdi::Pdi;
    use crate::ie::pdr_id::PdrId;
    use crate::ie::precedence::Precedence;
    use crate::ie::source_interface::{SourceInterface, SourceInterfaceValue};

    #[test]
    fn marshal_unmarshal_buckets_rule_ies() {
        let pdi = Pdi::new(SourceInterface::new(SourceInterfaceValue::Access));
        let request = SessionEstablishmentRequest::new(
            0,
            10,
            None,
            Some(Fseid::new(0x1122, None, None).to_ie()),
        )
        .with_create_pdrs(vec![
            CreatePdr::new(PdrId::new(1), Precedence::new(100), pdi.clone()).to_ie(),
            CreatePdr::new(PdrId::new(2), Precedence::new(200), pdi).to_ie(),
        ])
        .with_create_fars(vec![CreateFar::new(FarId::new(10), ApplyAction::FORW).to_ie()]);

        let decoded = SessionEstablishmentRequest::unmarshal(&request.marshal()).unwrap();
        assert_eq!(decoded.create_pdrs.len(), 2);
        assert_eq!(decoded.create_fars.len(), 1);
        assert!(decoded.cp_fseid.is_some());
        assert_eq!(decoded.seid(), Some(0));
    }
}
