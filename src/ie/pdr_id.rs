//! PDR ID Information Element.

use crate::error::PfcpError;
use crate::ie::{Ie, IeType};

/// Rule identifier of a Packet Detection Rule, unique within the datapath.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PdrId {
    pub value: u16,
}

impl PdrId {
    pub fn new(value: u16) -> Self {
        PdrId { value }
    }

    pub fn marshal(&self) -> [u8; 2] {
        self.value.to_be_bytes()
    }

    pub fn unmarshal(data: &[u8]) -> Result<Self, PfcpError> {
        if data.len() < 2 {
            return Err(PfcpError::invalid_length("PDR ID", 2, data.len()));
        }
        Ok(PdrId {
            value: u16::from_be_bytes([data[0], data[1]]),
        })
    }

    pub fn to_ie(&self) -> Ie {
        Ie::new(IeType::PdrId, self.marshal().to_vec())
    }
}
