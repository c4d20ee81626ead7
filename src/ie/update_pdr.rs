//! Update PDR grouped IE.

use crate::error::PfcpError;
use crate::ie::far_id::FarId;
use crate::ie::outer_header_removal::OuterHeaderRemoval;
use crate::ie::pdi::Pdi;
use crate::ie::pdr_id::PdrId;
use crate::ie::precedence::Precedence;
use crate::ie::{Ie, IeIterator, IeType};

/// A change to an installed PDR. Only the PDR ID is mandatory; absent fields
/// leave the installed rule untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePdr {
    pub pdr_id: PdrId,
    pub precedence: Option<Precedence>,
    pub pdi: Option<Pdi>,
    pub outer_header_removal: Option<OuterHeaderRemoval>,
    pub far_id: Option<FarId>,
}

impl UpdatePdr {
    pub fn new(pdr_id: PdrId) -> Self {
        UpdatePdr {
            pdr_id,
            precedence: None,
            pdi: None,
            outer_header_removal: None,
            far_id: None,
        }
    }

    pub fn with_precedence(mut self, precedence: Precedence) -> Self {
        self.precedence = Some(precedence);
        self
    }

    pub fn with_pdi(mut self, pdi: Pdi) -> Self {
        self.pdi = Some(pdi);
        self
    }

    pub fn with_far_id(mut self, far_id: FarId) -> Self {
        self.far_id = Some(far_id);
        self
    }

    pub fn marshal(&self) -> Vec<u8> {
        let mut ies = vec![self.pdr_id.to_ie()];
        if let Some(ohr) = &self.outer_header_removal {
            ies.push(ohr.to_ie());
        }
        if let Some(precedence) = &self.precedence {
            ies.push(precedence.to_ie());
        }
        if let Some(pdi) = &self.pdi {
            ies.push(pdi.to_ie());
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

        Ok(UpdatePdr {
            pdr_id: pdr_id.ok_or(PfcpError::MissingIe { ie: IeType::PdrId })?,
            precedence,
            pdi,
            outer_header_removal,
            far_id,
        })
    }

    pub fn to_ie(&self) -> Ie {
        Ie::new(IeType::UpdatePdr, self.marshal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marshal_unmarshal_round_trip() {
        let update = UpdatePdr::new(PdrId::new(1))
            .with_precedence(Precedence::new(50))
            .with_far_id(FarId::new(20));
        assert_eq!(UpdatePdr::unmarshal(&update.marshal()).unwrap(), update);
    }

    #[test]
    fn only_pdr_id_is_mandatory() {
        let update = UpdatePdr::new(PdrId::new(3));
        let decoded = UpdatePdr::unmarshal(&update.marshal()).unwrap();
        assert!(decoded.precedence.is_none());
        assert!(decoded.pdi.is_none());
    }

    #[test]
    fn missing_pdr_id_rejected() {
        let payload = crate::ie::marshal_ies(&[Precedence::new(50).to_ie()]);
        assert!(matches!(
            UpdatePdr::unmarshal(&payload),
            Err(PfcpError::MissingIe { ie: IeType::PdrId })
        ));
    }
}
