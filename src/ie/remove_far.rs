//! Remove FAR grouped IE.

use crate::error::PfcpError;
use crate::ie::far_id::FarId;
use crate::ie::{Ie, IeIterator, IeType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveFar {
    pub far_id: FarId,
}

impl RemoveFar {
    pub fn new(far_id: FarId) -> Self {
        RemoveFar { far_id }
    }

    pub fn marshal(&self) -> Vec<u8> {
        crate::ie::marshal_ies(&[self.far_id.to_ie()])
    }

    pub fn unmarshal(payload: &[u8]) -> Result<Self, PfcpError> {
        let mut far_id = None;
        for ie in IeIterator::new(payload) {
            let ie = ie?;
            if ie.ie_type == IeType::FarId {
                far_id = Some(FarId::unmarshal(&ie.payload)?);
            }
        }
        Ok(RemoveFar {
            far_id: far_id.ok_or(PfcpError::MissingIe { ie: IeType::FarId })?,
        })
    }

    pub fn to_ie(&self) -> Ie {
        Ie::new(IeType::RemoveFar, self.marshal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marshal_unmarshal_round_trip() {
        let remove = RemoveFar::new(FarId::new(20));
        assert_eq!(RemoveFar::unmarshal(&remove.marshal()).unwrap(), remove);
    }

    #[test]
    fn missing_far_id_rejected() {
        assert!(matches!(
            RemoveFar::unmarshal(&[]),
            Err(PfcpError::MissingIe { ie: IeType::FarId })
        ));
    }
}
