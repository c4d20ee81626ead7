//! Precedence Information Element.

use crate::error::PfcpError;
use crate::ie::{Ie, IeType};

/// Match precedence of a PDR; lower values win on ambiguous matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Precedence {
    pub value: u32,
}

impl Precedence {
    pub fn new(value: u32) -> Self {
        Precedence { value }
    }

    pub fn marshal(&self) -> [u8; 4] {
        self.value.to_be_bytes()
    }

    pub fn unmarshal(data: &[u8]) -> Result<Self, PfcpError> {
        if data.len() < 4 {
            return Err(PfcpError::invalid_length("Precedence", 4, data.len()));
        }
        Ok(Precedence {
            value: u32::from_be_bytes([data[0], data[1], data[2], data[3]]),
        })
    }

    pub fn to_ie(&self) -> Ie {
        Ie::new(IeType::Precedence, self.marshal().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marshal_unmarshal_round_trip() {
        let precedence = Precedence::new(100);
        assert_eq!(
            Precedence::unmarshal(&precedence.marshal()).unwrap(),
            precedence
        );
    }

    #[test]
    fn short_payload_rejected() {
        assert!(Precedence::unmarshal(&[0x00, 0x64]).is_err());
    }
}
