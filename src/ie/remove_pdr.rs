//! Remove PDR grouped IE.

use crate::error::PfcpError;
use crate::ie::pdr_id::PdrId;
use crate::ie::{Ie, IeIterator, IeType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemovePdr {
    pub pdr_id: PdrId,
}

impl RemovePdr {
    pub fn new(pdr_id: PdrId) -> Self {
        RemovePdr { pdr_id }
    }

    pub fn marshal(&self) -> Vec<u8> {
        crate::ie::marshal_ies(&[self.pdr_id.to_ie()])
    }

    pub fn unmarshal(payload: &[u8]) -> Result<Self, PfcpError> {
        let mut pdr_id = None;
        for ie in IeIterator::new(payload) {
            let ie = ie?;
            if ie.ie_type == IeType::PdrId {
                pdr_id = Some(PdrId::unmarshal(&ie.payload)?);
            }
        }
        Ok(RemovePdr {
            pdr_id: pdr_id.ok_or(PfcpError::MissingIe { ie: IeType::PdrId })?,
        })
    }

    pub fn to_ie(&self) -> Ie {
        Ie::new(IeType::RemovePdr, self.marshal())
    }
}
