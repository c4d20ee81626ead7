//! FAR ID Information Element.

use crate::error::PfcpError;
use crate::ie::{Ie, IeType};

/// Rule identifier of a Forwarding Action Rule. Zero means "unlinked".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FarId {
    pub value: u32,
}

impl FarId {
    pub fn new(value: u32) -> Self {
        FarId { value }
    }

    pub fn marshal(&self) -> [u8; 4] {
        self.value.to_be_bytes()
    }

    pub fn unmarshal(data: &[u8]) -> Result<Self, PfcpError> {
        if data.len() < 4 {
            return Err(PfcpError::invalid_length("FAR ID", 4, data.len()));
        }
        Ok(FarId {
            value: u32::from_be_bytes([data[0], data[1], data[2], data[3]]),
        })
    }

    pub fn to_ie(&self) -> Ie {
        Ie::new(IeType::FarId, self.marshal().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marshal_unmarshal_round_trip() {
        let far_id = FarId::new(0xdeadbeef);
        assert_eq!(FarId::unmarshal(&far_id.marshal()).unwrap(), far_id);
    }

    #[test]
    fn short_payload_rejected() {
        assert!(FarId::unmarshal(&[0x00, 0x00, 0x0a]).is_err());
    }
}
