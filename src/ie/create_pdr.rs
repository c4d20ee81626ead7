//! Create PDR grouped IE.

use crate::error::PfcpError;
use crate::ie::far_id::FarId;
use crate::ie::outer_header_removal::OuterHeaderRemoval;
use crate::ie::pdi::Pdi;
use crate::ie::pdr_id::PdrId;
use crate::ie::precedence::Precedence;
use crate::ie::{Ie, IeIterator, IeType};

/// A new Packet Detection Rule as carried in establishment and modification
/// requests. PDR ID, Precedence, and PDI are mandatory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePdr {
    pub pdr_id: PdrId,
    pub precedence: Precedence,
    pub pdi: Pdi,
    pub outer_header_removal: Option<OuterHeaderRemoval>,
    pub far_id: Option<FarId>,
}

impl CreatePdr {
    pub fn new(pdr_id: PdrId, precedence: Precedence, pdi: Pdi) -> Self {
        CreatePdr {
            pdr_id,
            precedence,
            pdi,
            outer_header_removal: None,
            far_id: None,
        }
    }

    pub fn with_far_id(mut self, far_id: FarId) -> Self {
        self.far_id = Some(far_id);
        self
    }

    pub fn with_outer_header_removal(mut self, ohr: OuterHeaderRemoval) -> Self {
        self.outer_header_removal = Some(ohr);
        self
    }

    pub fn marshal(&self) -> Vec<u8> {
        let mut ies = vec![
            self.pdr_id.to_ie(),
            self.precedence.to_ie(),
            self.pdi.to_ie(),
        ];
        if let Some(ohr) = &self.outer_header_removal {
            ies.push(ohr.to_ie());
        }
        if let Some(far_id) = &self.far_id {
            ies.push(far_id.to_ie());
        }
        crate::ie::marshal_ies(&ies)
    }

    pub fn unmarshal(payload: &[u8]) -> Result<Self, PfcpError> {
        let mut pdr_id = None;
        let mut precedence = None;
        let mut pdi = None;
        let mut outer_header_removal = None;
        let mut far_id = None;

        for ie in IeIterator::new(payload) {
            let ie = ie?;
            match ie.ie_type {
                IeType::PdrId => pdr_id = Some(PdrId::unmarshal(&ie.payload)?),
                IeType::Precedence => precedence = Some(Precedence::unmarshal(&ie.payload)?),
                IeType::Pdi => pdi = Some(Pdi::unmarshal(&ie.payload)?),
                IeType::OuterHeaderRemoval => {
                    outer_header_removal = Some(OuterHeaderRemoval::unmarshal(&ie.payload)?)
                }
                IeType::FarId => far_id = Some(FarId::unmarshal(&ie.payload)?),
                _ => (),
            }
        }

        Ok(CreatePdr {
            pdr_id: pdr_id.ok_or(PfcpError::MissingIe { ie: IeType::PdrId })?,
            precedence: precedence.ok_or(PfcpError::MissingIe {
                ie: IeType::Precedence,
            })?,
            pdi: pdi.ok_or(PfcpError::MissingIe { ie: IeType::Pdi })?,
            outer_header_removal,
            far_id,
        })
    }

    pub fn to_ie(&self) -> Ie {
        Ie::new(IeType::CreatePdr, self.marshal())
    }
}
