//! Destination Interface Information Element.

use crate::error::PfcpError;
use crate::ie::{Ie, IeType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DestinationInterfaceValue {
    Access = 0,
    Core = 1,
    SgiLan = 2,
    CpFunction = 3,
    LiFunction = 4,
    Unknown = 0xff,
}

impl From<u8> for DestinationInterfaceValue {
    fn from(v: u8) -> Self {
        match v {
            0 => DestinationInterfaceValue::Access,
            1 => DestinationInterfaceValue::Core,
            2 => DestinationInterfaceValue::SgiLan,
            3 => DestinationInterfaceValue::CpFunction,
            4 => DestinationInterfaceValue::LiFunction,
            _ => DestinationInterfaceValue::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DestinationInterface {
    pub value: DestinationInterfaceValue,
}

impl DestinationInterface {
    pub fn new(value: DestinationInterfaceValue) -> Self {
        DestinationInterface { value }
    }

    pub fn marshal(&self) -> [u8; 1] {
        [self.value as u8]
    }

    pub fn unmarshal(data: &[u8]) -> Result<Self, PfcpError> {
        if data.is_empty() {
            return Err(PfcpError::invalid_length("Destination Interface", 1, 0));
        }
        Ok(DestinationInterface {
            value: DestinationInterfaceValue::from(data[0] & 0x0f),
        })
    }

    pub fn to_ie(&self) -> Ie {
        Ie::new(IeType::DestinationInterface, self.marshal().to_vec())
    }
}
