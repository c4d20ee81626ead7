//! F-TEID Information Element.

use crate::error::PfcpError;
use crate::ie::{Ie, IeType};
use std::net::{Ipv4Addr, Ipv6Addr};

/// Fully-qualified Tunnel Endpoint Identifier: a TEID plus the address of the
/// GTP-U endpoint that allocated it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fteid {
    pub v4: bool,
    pub v6: bool,
    pub teid: u32,
    pub ipv4_address: Option<Ipv4Addr>,
    pub ipv6_address: Option<Ipv6Addr>,
}

impl Fteid {
    pub fn ipv4(teid: u32, addr: Ipv4Addr) -> Self {
        Fteid {
            v4: true,
            v6: false,
            teid,
            ipv4_address: Some(addr),
            ipv6_address: None,
        }
    }

    pub fn ipv6(teid: u32, addr: Ipv6Addr) -> Self {
        Fteid {
            v4: false,
            v6: true,
            teid,
            ipv4_address: None,
            ipv6_address: Some(addr),
        }
    }

    pub fn marshal(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(9);
        let mut flags = 0u8;
        if self.v4 {
            flags |= 0x01;
        }
        if self.v6 {
            flags |= 0x02;
        }
        data.push(flags);
        data.extend_from_slice(&self.teid.to_be_bytes());
        if let Some(addr) = self.ipv4_address {
            data.extend_from_slice(&addr.octets());
        }
        if let Some(addr) = self.ipv6_address {
            data.extend_from_slice(&addr.octets());
        }
        data
    }

    pub fn unmarshal(data: &[u8]) -> Result<Self, PfcpError> {
        if data.len() < 5 {
            return Err(PfcpError::invalid_length("F-TEID", 5, data.len()));
        }
        let flags = data[0];
        let v4 = flags & 0x01 != 0;
        let v6 = flags & 0x02 != 0;
        let teid = u32::from_be_bytes([data[1], data[2], data[3], data[4]]);

        let mut offset = 5;
        let ipv4_address = if v4 {
            if data.len() < offset + 4 {
                return Err(PfcpError::invalid_length("F-TEID IPv4", offset + 4, data.len()));
            }
            let addr = Ipv4Addr::new(data[offset], data[offset + 1], data[offset + 2], data[offset + 3]);
            offset += 4;
            Some(addr)
        } else {
            None
        };
        let ipv6_address = if v6 {
            if data.len() < offset + 16 {
                return Err(PfcpError::invalid_length("F-TEID IPv6", offset + 16, data.len()));
            }
            let mut octets = [0u8; 16];
            octets.copy_from_slice(&data[offset..offset + 16]);
            Some(Ipv6Addr::from(octets))
        } else {
            None
        };

        Ok(Fteid {
            v4,
            v6,
            teid,
            ipv4_address,
            ipv6_address,
        })
    }

    pub fn to_ie(&self) -> Ie {
        Ie::new(IeType::Fteid, self.marshal())
    }
}
