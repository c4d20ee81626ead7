//! Create FAR grouped IE.

use crate::error::PfcpError;
use crate::ie::apply_action::ApplyAction;
use crate::ie::far_id::FarId;
use crate::ie::forwarding_parameters::ForwardingParameters;
use crate::ie::{Ie, IeIterator, IeType};

/// A new Forwarding Action Rule. FAR ID and Apply Action are mandatory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateFar {
    pub far_id: FarId,
    pub apply_action: ApplyAction,
    pub forwarding_parameters: Option<ForwardingParameters>,
}

impl CreateFar {
    pub fn new(far_id: FarId, apply_action: ApplyAction) -> Self {
        CreateFar {
            far_id,
            apply_action,
            forwarding_parameters: None,
        }
    }

    pub fn with_forwarding_parameters(mut self, params: ForwardingParameters) -> Self {
        self.forwarding_parameters = Some(params);
        self
    }

    pub fn marshal(&self) -> Vec<u8> {
        let mut ies = vec![self.far_id.to_ie(), self.apply_action.to_ie()];
        if let Some(params) = &self.forwarding_parameters {
            ies.push(params.to_ie());
        }
        crate::ie::marshal_ies(&ies)
    }

    pub fn unmarshal(payload: &[u8]) -> Result<Self, PfcpError> {
        let mut far_id = None;
        let mut apply_action = None;
        let mut forwarding_parameters = None;

        for ie in IeIterator::new(payload) {
            let ie = ie?;
            match ie.ie_type {
                IeType::FarId => far_id = Some(FarId::unmarshal(&ie.payload)?),
                IeType::ApplyAction => apply_action = Some(ApplyAction::unmarshal(&ie.payload)?),
                IeType::ForwardingParameters => {
                    forwarding_parameters = Some(ForwardingParameters::unmarshal(&ie.payload)?)
                }
                _ => (),
            }
        }

        Ok(CreateFar {
            far_id: far_id.ok_or(PfcpError::MissingIe { ie: IeType::FarId })?,
            apply_action: apply_action.ok_or(PfcpError::MissingIe {
                ie: IeType::ApplyAction,
            })?,
            forwarding_parameters,
        })
    }

    pub fn to_ie(&self) -> Ie {
        Ie::new(IeType::CreateFar, self.marshal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ie::outer_header_creation::OuterHeaderCreation;
    use std::net::Ipv4Addr;

    #[test]
    fn marshal_unmarshal_round_trip() {
        let far = CreateFar::new(FarId::new(10), ApplyAction::FORW).with_forwarding_parameters(
            ForwardingParameters::new().with_outer_header_creation(OuterHeaderCreation::gtpu_ipv4(
                0x200,
                Ipv4Addr::new(192, 0, 2, 40),
            )),
        );
        assert_eq!(CreateFar::unmarshal(&far.marshal()).unwrap(), far);
    }

    #[test]
    fn missing_apply_action_rejected() {
        let payload = crate::ie::marshal_ies(&[FarId::new(10).to_ie()]);
        assert!(matches!(
            CreateFar::unmarshal(&payload),
            Err(PfcpError::MissingIe {
                ie: IeType::ApplyAction
            })
        ));
    }
}
