//! Update FAR grouped IE.

use crate::error::PfcpError;
use crate::ie::apply_action::ApplyAction;
use crate::ie::far_id::FarId;
use crate::ie::update_forwarding_parameters::UpdateForwardingParameters;
use crate::ie::{Ie, IeIterator, IeType};

/// A change to an installed FAR. Only the FAR ID is mandatory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateFar {
    pub far_id: FarId,
    pub apply_action: Option<ApplyAction>,
    pub update_forwarding_parameters: Option<UpdateForwardingParameters>,
}

impl UpdateFar {
    pub fn new(far_id: FarId) -> Self {
        UpdateFar {
            far_id,
            apply_action: None,
            update_forwarding_parameters: None,
        }
    }

    pub fn with_apply_action(mut self, apply_action: ApplyAction) -> Self {
        self.apply_action = Some(apply_action);
        self
    }

    pub fn with_update_forwarding_parameters(mut self, params: UpdateForwardingParameters) -> Self {
        self.update_forwarding_parameters = Some(params);
        self
    }

    pub fn marshal(&self) -> Vec<u8> {
        let mut ies = vec![self.far_id.to_ie()];
        if let Some(action) = &self.apply_action {
            ies.push(action.to_ie());
        }
        if let Some(params) = &self.update_forwarding_parameters {
            ies.push(params.to_ie());
        }
        crate::ie::marshal_ies(&ies)
    }

    pub fn unmarshal(payload: &[u8]) -> Result<Self, PfcpError> {
        let mut far_id = None;
        let mut apply_action = None;
        let mut update_forwarding_parameters = None;

        for ie in IeIterator::new(payload) {
            let ie = ie?;
            match ie.ie_type {
                IeType::FarId => far_id = Some(FarId::unmarshal(&ie.payload)?),
                IeType::ApplyAction => apply_action = Some(ApplyAction::unmarshal(&ie.payload)?),
                IeType::UpdateForwardingParameters => {
                    update_forwarding_parameters =
                        Some(UpdateForwardingParameters::unmarshal(&ie.payload)?)
                }
                _ => (),
            }
        }

        Ok(UpdateFar {
            far_id: far_id.ok_or(PfcpError::MissingIe { ie: IeType::FarId })?,
            apply_action,
            update_forwarding_parameters,
        })
    }

    pub fn to_ie(&self) -> Ie {
        Ie::new(IeType::UpdateFar, self.marshal())
    }
}
