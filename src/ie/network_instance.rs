//! Network Instance Information Element.

use crate::error::PfcpError;
use crate::ie::{Ie, IeType};

/// Identifies the network domain a FAR forwards into. A zero-length payload
/// clears the routing context on update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkInstance {
    pub instance: String,
}

impl NetworkInstance {
    pub fn new(instance: impl Into<String>) -> Self {
        NetworkInstance {
            instance: instance.into(),
        }
    }

    pub fn marshal(&self) -> Vec<u8> {
        self.instance.as_bytes().to_vec()
    }

    pub fn unmarshal(data: &[u8]) -> Result<Self, PfcpError> {
        let instance = std::str::from_utf8(data)
            .map_err(|_| PfcpError::invalid_value("Network Instance", "not valid UTF-8"))?;
        Ok(NetworkInstance {
            instance: instance.to_string(),
        })
    }

    pub fn to_ie(&self) -> Ie {
        Ie::new(IeType::NetworkInstance, self.marshal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marshal_unmarshal_round_trip() {
        let ni = NetworkInstance::new("internet");
        assert_eq!(NetworkInstance::unmarshal(&ni.marshal()).unwrap(), ni);
    }

    #[test]
    fn empty_payload_is_clear() {
        assert_eq!(NetworkInstance::unmarshal(&[]).unwrap().instance, "");
    }

    #[test]
    fn invalid_utf8_rejected() {
        assert!(NetworkInstance::unmarshal(&[0xff, 0xfe]).is_err());
    }
}
