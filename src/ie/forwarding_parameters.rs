//! Forwarding Parameters grouped IE.

use crate::error::PfcpError;
use crate::ie::destination_interface::DestinationInterface;
use crate::ie::network_instance::NetworkInstance;
use crate::ie::outer_header_creation::OuterHeaderCreation;
use crate::ie::{Ie, IeIterator, IeType};

/// Where and how a FAR forwards matched packets.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ForwardingParameters {
    pub destination_interface: Option<DestinationInterface>,
    pub network_instance: Option<NetworkInstance>,
    pub outer_header_creation: Option<OuterHeaderCreation>,
}

impl ForwardingParameters {
    pub fn new() -> Self {
        ForwardingParameters::default()
    }

    pub fn with_outer_header_creation(mut self, ohc: OuterHeaderCreation) -> Self {
        self.outer_header_creation = Some(ohc);
        self
    }

    pub fn with_destination_interface(mut self, di: DestinationInterface) -> Self {
        self.destination_interface = Some(di);
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
        let mut params = ForwardingParameters::default();
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
        Ie::new(IeType::ForwardingParameters, self.marshal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ie::destination_interface::DestinationInterfaceValue;
    use std::net::Ipv4Addr;

    #[test]
    fn marshal_unmarshal_round_trip() {
        let params = ForwardingParameters::new()
            .with_destination_interface(DestinationInterface::new(DestinationInterfaceValue::Core))
            .with_outer_header_creation(OuterHeaderCreation::gtpu_ipv4(
                0x55,
                Ipv4Addr::new(192, 0, 2, 20),
            ));
        assert_eq!(
            ForwardingParameters::unmarshal(&params.marshal()).unwrap(),
            params
        );
    }

    #[test]
    fn empty_parameters_round_trip() {
        let params = ForwardingParameters::new();
        assert_eq!(params.marshal(), Vec::<u8>::new());
        assert_eq!(ForwardingParameters::unmarshal(&[]).unwrap(), params);
    }
}
