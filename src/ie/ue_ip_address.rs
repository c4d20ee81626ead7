//! UE IP Address Information Element.

use crate::error::PfcpError;
use crate::ie::{Ie, IeType};
use std::net::{Ipv4Addr, Ipv6Addr};

/// The UE address a PDR matches on. The S/D flag tells whether the address is
/// matched as source (uplink) or destination (downlink).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UeIpAddress {
    pub v4: bool,
    pub v6: bool,
    pub sd: bool,
    pub ipv4_address: Option<Ipv4Addr>,
    pub ipv6_address: Option<Ipv6Addr>,
}

impl UeIpAddress {
    pub fn ipv4(addr: Ipv4Addr) -> Self {
        UeIpAddress {
            v4: true,
            v6: false,
            sd: false,
            ipv4_address: Some(addr),
            ipv6_address: None,
        }
    }

    pub fn marshal(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(5);
        let mut flags = 0u8;
        if self.v6 {
            flags |= 0x01;
        }
        if self.v4 {
            flags |= 0x02;
        }
        if self.sd {
            flags |= 0x04;
        }
        data.push(flags);
        if let Some(addr) = self.ipv4_address {
            data.extend_from_slice(&addr.octets());
        }
        if let Some(addr) = self.ipv6_address {
            data.extend_from_slice(&addr.octets());
        }
        data
    }

    pub fn unmarshal(data: &[u8]) -> Result<Self, PfcpError> {
        if data.is_empty() {
            return Err(PfcpError::invalid_length("UE IP Address", 1, 0));
        }
        let flags = data[0];
        let v6 = flags & 0x01 != 0;
        let v4 = flags & 0x02 != 0;
        let sd = flags & 0x04 != 0;

        let mut offset = 1;
        let ipv4_address = if v4 {
            if data.len() < offset + 4 {
                return Err(PfcpError::invalid_length(
                    "UE IP Address IPv4",
                    offset + 4,
                    data.len(),
                ));
            }
            let addr = Ipv4Addr::new(data[offset], data[offset + 1], data[offset + 2], data[offset + 3]);
            offset += 4;
            Some(addr)
        } else {
            None
        };
        let ipv6_address = if v6 {
            if data.len() < offset + 16 {
                return Err(PfcpError::invalid_length(
                    "UE IP Address IPv6",
                    offset + 16,
                    data.len(),
                ));
            }
            let mut octets = [0u8; 16];
            octets.copy_from_slice(&data[offset..offset + 16]);
            Some(Ipv6Addr::from(octets))
        } else {
            None
        };

        Ok(UeIpAddress {
            v4,
            v6,
            sd,
            ipv4_address,
            ipv6_address,
        })
    }

    pub fn to_ie(&self) -> Ie {
        Ie::new(IeType::UeIpAddress, self.marshal())
    }
}
