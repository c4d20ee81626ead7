//! F-SEID Information Element.

use crate::error::PfcpError;
use crate::ie::{Ie, IeType};
use std::net::{Ipv4Addr, Ipv6Addr};

/// Fully-qualified SEID: the 64-bit session endpoint identifier plus the
/// address of the node that allocated it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fseid {
    pub seid: u64,
    pub ipv4_address: Option<Ipv4Addr>,
    pub ipv6_address: Option<Ipv6Addr>,
}

impl Fseid {
    pub fn new(seid: u64, ipv4_address: Option<Ipv4Addr>, ipv6_address: Option<Ipv6Addr>) -> Self {
        Fseid {
            seid,
            ipv4_address,
            ipv6_address,
        }
    }

    pub fn marshal(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(13);
        let mut flags = 0u8;
        if self.ipv6_address.is_some() {
            flags |= 0x01;
        }
        if self.ipv4_address.is_some() {
            flags |= 0x02;
        }
        data.push(flags);
        data.extend_from_slice(&self.seid.to_be_bytes());
        if let Some(addr) = self.ipv4_address {
            data.extend_from_slice(&addr.octets());
        }
        if let Some(addr) = self.ipv6_address {
            data.extend_from_slice(&addr.octets());
        }
        data
    }

    pub fn unmarshal(data: &[u8]) -> Result<Self, PfcpError> {
        if data.len() < 9 {
            return Err(PfcpError::invalid_length("F-SEID", 9, data.len()));
        }
        let flags = data[0];
        let v6 = flags & 0x01 != 0;
        let v4 = flags & 0x02 != 0;
        let seid = u64::from_be_bytes([
            data[1], data[2], data[3], data[4], data[5], data[6], data[7], data[8],
        ]);

        let mut offset = 9;
        let ipv4_address = if v4 {
            if data.len() < offset + 4 {
                return Err(PfcpError::invalid_length("F-SEID IPv4", offset + 4, data.len()));
            }
            let addr = Ipv4Addr::new(data[offset], data[offset + 1], data[offset + 2], data[offset + 3]);
            offset += 4;
            Some(addr)
        } else {
            None
        };
        let ipv6_address = if v6 {
            if data.len() < offset + 16 {
                return Err(PfcpError::invalid_length("F-SEID IPv6", offset + 16, data.len()));
            }
            let mut octets = [0u8; 16];
            octets.copy_from_slice(&data[offset..offset + 16]);
            Some(Ipv6Addr::from(octets))
        } else {
            None
        };

        Ok(Fseid {
            seid,
            ipv4_address,
            ipv6_address,
        })
    }

    pub fn to_ie(&self) -> Ie {
        Ie::new(IeType::Fseid, self.marshal())
    }
}
