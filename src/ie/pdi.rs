//! Packet Detection Information grouped IE.

use crate::error::PfcpError;
use crate::ie::f_teid::Fteid;
use crate::ie::network_instance::NetworkInstance;
use crate::ie::source_interface::SourceInterface;
use crate::ie::ue_ip_address::UeIpAddress;
use crate::ie::{Ie, IeIterator, IeType};

/// The match part of a PDR: where packets come from, and optionally which
/// tunnel endpoint or UE address they carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pdi {
    pub source_interface: SourceInterface,
    pub local_f_teid: Option<Fteid>,
    pub network_instance: Option<NetworkInstance>,
    pub ue_ip_address: Option<UeIpAddress>,
}

impl Pdi {
    pub fn new(source_interface: SourceInterface) -> Self {
        Pdi {
            source_interface,
            local_f_teid: None,
            network_instance: None,
            ue_ip_address: None,
        }
    }

    pub fn with_local_f_teid(mut self, f_teid: Fteid) -> Self {
        self.local_f_teid = Some(f_teid);
        self
    }

    pub fn with_ue_ip_address(mut self, ue_ip: UeIpAddress) -> Self {
        self.ue_ip_address = Some(ue_ip);
        self
    }

    pub fn marshal(&self) -> Vec<u8> {
        let mut ies = vec![self.source_interface.to_ie()];
        if let Some(f_teid) = &self.local_f_teid {
            ies.push(f_teid.to_ie());
        }
        if let Some(ni) = &self.network_instance {
            ies.push(ni.to_ie());
        }
        if let Some(ue_ip) = &self.ue_ip_address {
            ies.push(ue_ip.to_ie());
        }
        crate::ie::marshal_ies(&ies)
    }

    pub fn unmarshal(payload: &[u8]) -> Result<Self, PfcpError> {
        let mut source_interface = None;
        let mut local_f_teid = None;
        let mut network_instance = None;
        let mut ue_ip_address = None;

        for ie in IeIterator::new(payload) {
            let ie = ie?;
            match ie.ie_type {
                IeType::SourceInterface => {
                    source_interface = Some(SourceInterface::unmarshal(&ie.payload)?)
                }
                IeType::Fteid => local_f_teid = Some(Fteid::unmarshal(&ie.payload)?),
                IeType::NetworkInstance => {
                    network_instance = Some(NetworkInstance::unmarshal(&ie.payload)?)
                }
                IeType::UeIpAddress => ue_ip_address = Some(UeIpAddress::unmarshal(&ie.payload)?),
                _ => (),
            }
        }

        Ok(Pdi {
            source_interface: source_interface.ok_or(PfcpError::MissingIe {
                ie: IeType::SourceInterface,
            })?,
            local_f_teid,
            network_instance,
            ue_ip_address,
        })
    }

    pub fn to_ie(&self) -> Ie {
        Ie::new(IeType::Pdi, self.marshal())
    }
}
