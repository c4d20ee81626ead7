//! Outer Header Removal Information Element.

use crate::error::PfcpError;
use crate::ie::{Ie, IeType};

/// Describes which outer header the datapath strips from matched packets.
/// The description byte is passed to the datapath verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OuterHeaderRemoval {
    pub description: u8,
}

impl OuterHeaderRemoval {
    pub const GTPU_UDP_IPV4: u8 = 0;
    pub const GTPU_UDP_IPV6: u8 = 1;

    pub fn new(description: u8) -> Self {
        OuterHeaderRemoval { description }
    }

    pub fn marshal(&self) -> [u8; 1] {
        [self.description]
    }

    pub fn unmarshal(data: &[u8]) -> Result<Self, PfcpError> {
        if data.is_empty() {
            return Err(PfcpError::invalid_length("Outer Header Removal", 1, 0));
        }
        Ok(OuterHeaderRemoval {
            description: data[0],
        })
    }

    pub fn to_ie(&self) -> Ie {
        Ie::new(IeType::OuterHeaderRemoval, self.marshal().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marshal_unmarshal_round_trip() {
        let ohr = OuterHeaderRemoval::new(OuterHeaderRemoval::GTPU_UDP_IPV4);
        assert_eq!(OuterHeaderRemoval::unmarshal(&ohr.marshal()).unwrap(), ohr);
    }

    #[test]
    fn empty_payload_rejected() {
        assert!(OuterHeaderRemoval::unmarshal(&[]).is_err());
    }
}
