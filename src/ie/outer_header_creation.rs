//! Outer Header Creation Information Element.
//!
//! Tells the datapath which encapsulation to put on forwarded packets. The
//! description bitmap selects the variant; the TEID, address, and port fields
//! follow only when the selected variant needs them.

use crate::error::PfcpError;
use crate::ie::{Ie, IeType};
use bitflags::bitflags;
use std::net::{Ipv4Addr, Ipv6Addr};

bitflags! {
    /// Encapsulation selector. Bits per 3GPP TS 29.244 §8.2.56.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct OuterHeaderDescription: u16 {
        const GTPU_UDP_IPV4 = 0x0100;
        const GTPU_UDP_IPV6 = 0x0200;
        const UDP_IPV4 = 0x0400;
        const UDP_IPV6 = 0x0800;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OuterHeaderCreation {
    pub description: OuterHeaderDescription,
    pub teid: Option<u32>,
    pub ipv4_address: Option<Ipv4Addr>,
    pub ipv6_address: Option<Ipv6Addr>,
    pub port: Option<u16>,
}

impl OuterHeaderCreation {
    /// GTP-U over UDP/IPv4 towards `addr` with the given tunnel id.
    pub fn gtpu_ipv4(teid: u32, addr: Ipv4Addr) -> Self {
        OuterHeaderCreation {
            description: OuterHeaderDescription::GTPU_UDP_IPV4,
            teid: Some(teid),
            ipv4_address: Some(addr),
            ipv6_address: None,
            port: None,
        }
    }

    /// Plain UDP/IPv4 encapsulation towards `addr`:`port`.
    pub fn udp_ipv4(addr: Ipv4Addr, port: u16) -> Self {
        OuterHeaderCreation {
            description: OuterHeaderDescription::UDP_IPV4,
            teid: None,
            ipv4_address: Some(addr),
            ipv6_address: None,
            port: Some(port),
        }
    }

    fn has_gtpu(description: OuterHeaderDescription) -> bool {
        description.intersects(
            OuterHeaderDescription::GTPU_UDP_IPV4 | OuterHeaderDescription::GTPU_UDP_IPV6,
        )
    }

    fn has_v4(description: OuterHeaderDescription) -> bool {
        description
            .intersects(OuterHeaderDescription::GTPU_UDP_IPV4 | OuterHeaderDescription::UDP_IPV4)
    }

    fn has_v6(description: OuterHeaderDescription) -> bool {
        description
            .intersects(OuterHeaderDescription::GTPU_UDP_IPV6 | OuterHeaderDescription::UDP_IPV6)
    }

    fn has_port(description: OuterHeaderDescription) -> bool {
        description.intersects(OuterHeaderDescription::UDP_IPV4 | OuterHeaderDescription::UDP_IPV6)
    }

    pub fn marshal(&self) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&self.description.bits().to_be_bytes());
        if Self::has_gtpu(self.description) {
            data.extend_from_slice(&self.teid.unwrap_or(0).to_be_bytes());
        }
        if Self::has_v4(self.description) {
            if let Some(addr) = self.ipv4_address {
                data.extend_from_slice(&addr.octets());
            }
        }
        if Self::has_v6(self.description) {
            if let Some(addr) = self.ipv6_address {
                data.extend_from_slice(&addr.octets());
            }
        }
        if Self::has_port(self.description) {
            data.extend_from_slice(&self.port.unwrap_or(0).to_be_bytes());
        }
        data
    }

    pub fn unmarshal(data: &[u8]) -> Result<Self, PfcpError> {
        if data.len() < 2 {
            return Err(PfcpError::invalid_length(
                "Outer Header Creation",
                2,
                data.len(),
            ));
        }
        let description =
            OuterHeaderDescription::from_bits_truncate(u16::from_be_bytes([data[0], data[1]]));
        let mut offset = 2;

        let teid = if Self::has_gtpu(description) {
            if data.len() < offset + 4 {
                return Err(PfcpError::invalid_length(
                    "Outer Header Creation TEID",
                    offset + 4,
                    data.len(),
                ));
            }
            let teid = u32::from_be_bytes([
                data[offset],
                data[offset + 1],
                data[offset + 2],
                data[offset + 3],
            ]);
            offset += 4;
            Some(teid)
        } else {
            None
        };

        let ipv4_address = if Self::has_v4(description) {
            if data.len() < offset + 4 {
                return Err(PfcpError::invalid_length(
                    "Outer Header Creation IPv4",
                    offset + 4,
                    data.len(),
                ));
            }
            let addr = Ipv4Addr::new(
                data[offset],
                data[offset + 1],
                data[offset + 2],
                data[offset + 3],
            );
            offset += 4;
            Some(addr)
        } else {
            None
        };

        let ipv6_address = if Self::has_v6(description) {
            if data.len() < offset + 16 {
                return Err(PfcpError::invalid_length(
                    "Outer Header Creation IPv6",
                    offset + 16,
                    data.len(),
                ));
            }
            let mut octets = [0u8; 16];
            octets.copy_from_slice(&data[offset..offset + 16]);
            offset += 16;
            Some(Ipv6Addr::from(octets))
        } else {
            None
        };

        let port = if Self::has_port(description) {
            if data.len() < offset + 2 {
                return Err(PfcpError::invalid_length(
                    "Outer Header Creation port",
                    offset + 2,
                    data.len(),
                ));
            }
            Some(u16::from_be_bytes([data[offset], data[offset + 1]]))
        } else {
            None
        };

        Ok(OuterHeaderCreation {
            description,
            teid,
            ipv4_address,
            ipv6_address,
            port,
        })
    }

    pub fn to_ie(&self) -> Ie {
        Ie::new(IeType::OuterHeaderCreation, self.marshal())
    }
}
