//! Update Forwarding Parameters grouped IE.

use crate::error::PfcpError;
use crate::ie::destination_interface::DestinationInterface;
use crate::ie::network_instance::NetworkInstance;
use crate::ie::outer_header_creation::OuterHeaderCreation;
use crate::ie::{Ie, IeIterator, IeType};

/// Same children as Forwarding Parameters, but every one optional: absent
/// children leave the installed FAR's fields untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UpdateForwardingParameters {
    pub destination_interface: Option<DestinationInterface>,
    pub network_instance: Option<NetworkInstance>,
    pub outer_header_creation: Option<OuterHeaderCreation>,
}

impl UpdateForwardingParameters {
    pub fn new() -> Self {
        UpdateForwardingParameters::default()
    }

    pub fn with_outer_header_creation(mut self, ohc: OuterHeaderCreation) -> Self {
        self.outer_header_creation = Some(ohc);
        self
    }

    pub fn marshal(&self) -> Vec<u8> {
        let mut ies = Vec::new();
        if let Some(di) = &self.destination_interface {
            ies.push(di.to_ie());
        }
        if let Some(ni) = &self.network_instance {
            ies.push(ni.to_ie());
        }
        if let Some(ohc) = &self.outer_header_creation {
            ies.push(ohc.to_ie());
        }
        crate::ie::marshal_ies(&ies)
    }

    pub fn unmarshal(payload: &[u8]) -> Result<Self, PfcpError> {
        let mut params = UpdateForwardingParameters::default();
        for ie in IeIterator::new(payload) {
            let ie = ie?;
            match ie.ie_type {
                IeType::DestinationInterface => {
                    params.destination_interface = Some(DestinationInterface::unmarshal(&ie.payload)?)
                }
                IeType::NetworkInstance => {
                    params.network_instance = Some(NetworkInstance::unmarshal(&ie.payload)?)
                }
                IeType::OuterHeaderCreation => {
                    params.outer_header_creation = Some(OuterHeaderCreation::unmarshal(&ie.payload)?)
                }
                _ => (),
            }
        }
        Ok(params)
    }

    pub fn to_ie(&self) -> Ie {
        Ie::new(IeType::UpdateForwardingParameters, self.marshal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn marshal_unmarshal_round_trip() {
        let params = UpdateForwardingParameters::new().with_outer_header_creation(
            OuterHeaderCreation::udp_ipv4(Ipv4Addr::new(192, 0, 2, 30), 8805),
        );
        assert_eq!(
            UpdateForwardingParameters::unmarshal(&params.marshal()).unwrap(),
            params
        );
    }

    #[test]
    fn absent_children_stay_none() {
        let params = UpdateForwardingParameters::unmarshal(&[]).unwrap();
        assert!(params.outer_header_creation.is_none());
        assert!(params.destination_interface.is_none());
    }
}
