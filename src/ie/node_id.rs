//! Node ID Information Element.

use crate::error::PfcpError;
use crate::ie::{Ie, IeType};
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Identifies a PFCP node. FQDN is decoded for completeness; the association
/// handlers only accept the address variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeId {
    Ipv4(Ipv4Addr),
    Ipv6(Ipv6Addr),
    Fqdn(String),
}

impl NodeId {
    pub fn marshal(&self) -> Vec<u8> {
        let mut data = Vec::new();
        match self {
            NodeId::Ipv4(addr) => {
                data.push(0);
                data.extend_from_slice(&addr.octets());
            }
            NodeId::Ipv6(addr) => {
                data.push(1);
                data.extend_from_slice(&addr.octets());
            }
            NodeId::Fqdn(fqdn) => {
                data.push(2);
                data.extend_from_slice(fqdn.as_bytes());
            }
        }
        data
    }

    pub fn unmarshal(data: &[u8]) -> Result<Self, PfcpError> {
        if data.is_empty() {
            return Err(PfcpError::invalid_length("Node ID", 1, 0));
        }
        match data[0] & 0x0f {
            0 => {
                if data.len() < 5 {
                    return Err(PfcpError::invalid_length("Node ID (IPv4)", 5, data.len()));
                }
                Ok(NodeId::Ipv4(Ipv4Addr::new(
                    data[1], data[2], data[3], data[4],
                )))
            }
            1 => {
                if data.len() < 17 {
                    return Err(PfcpError::invalid_length("Node ID (IPv6)", 17, data.len()));
                }
                let mut octets = [0u8; 16];
                octets.copy_from_slice(&data[1..17]);
                Ok(NodeId::Ipv6(Ipv6Addr::from(octets)))
            }
            2 => {
                let fqdn = std::str::from_utf8(&data[1..])
                    .map_err(|_| PfcpError::invalid_value("Node ID (FQDN)", "not valid UTF-8"))?;
                Ok(NodeId::Fqdn(fqdn.to_string()))
            }
            other => Err(PfcpError::invalid_value(
                "Node ID type",
                format!("{other} (expected 0=IPv4, 1=IPv6, 2=FQDN)"),
            )),
        }
    }

    pub fn to_ie(&self) -> Ie {
        Ie::new(IeType::NodeId, self.marshal())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Ipv4(addr) => write!(f, "{addr}"),
            NodeId::Ipv6(addr) => write!(f, "{addr}"),
            NodeId::Fqdn(fqdn) => write!(f, "{fqdn}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marshal_unmarshal_ipv4() {
        let node_id = NodeId::Ipv4(Ipv4Addr::new(192, 0, 2, 1));
        assert_eq!(NodeId::unmarshal(&node_id.marshal()).unwrap(), node_id);
    }

    #[test]
    fn marshal_unmarshal_ipv6() {
        let node_id = NodeId::Ipv6("2001:db8::1".parse().unwrap());
        assert_eq!(NodeId::unmarshal(&node_id.marshal()).unwrap(), node_id);
    }

    #[test]
    fn marshal_unmarshal_fqdn() {
        let node_id = NodeId::Fqdn("smf.example.com".to_string());
        assert_eq!(NodeId::unmarshal(&node_id.marshal()).unwrap(), node_id);
    }

    #[test]
    fn unknown_type_rejected() {
        assert!(matches!(
            NodeId::unmarshal(&[3, 1, 2, 3, 4]),
            Err(PfcpError::InvalidValue { .. })
        ));
    }

    #[test]
    fn truncated_address_rejected() {
        assert!(NodeId::unmarshal(&[0, 192, 0]).is_err());
        assert!(NodeId::unmarshal(&[1, 0, 0, 0, 0, 0, 0, 0]).is_err());
    }
}
