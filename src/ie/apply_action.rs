//! Apply Action Information Element.

use crate::error::PfcpError;
use crate::ie::{Ie, IeType};
use bitflags::bitflags;

bitflags! {
    /// Packet disposition bitmap of a FAR.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
    pub struct ApplyAction: u8 {
        const DROP = 1 << 0;
        const FORW = 1 << 1;
        const BUFF = 1 << 2;
        const NOCP = 1 << 3;
        const DUPL = 1 << 4;
    }
}

impl ApplyAction {
    pub fn new(bits: u8) -> Self {
        ApplyAction::from_bits_truncate(bits)
    }

    pub fn marshal(&self) -> [u8; 1] {
        [self.bits()]
    }

    pub fn unmarshal(data: &[u8]) -> Result<Self, PfcpError> {
        if data.is_empty() {
            return Err(PfcpError::invalid_length("Apply Action", 1, 0));
        }
        Ok(ApplyAction::from_bits_truncate(data[0]))
    }

    pub fn to_ie(&self) -> Ie {
        Ie::new(IeType::ApplyAction, self.marshal().to_vec())
    }
}
