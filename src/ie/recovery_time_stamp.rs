//! Recovery Time Stamp Information Element.

use crate::error::PfcpError;
use crate::ie::{Ie, IeType};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

// NTP epoch (1900-01-01) precedes the Unix epoch by this many seconds.
const NTP_EPOCH_OFFSET: u64 = 2_208_988_800;

/// When the sending node last restarted, as a 32-bit NTP timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecoveryTimeStamp {
    pub timestamp: SystemTime,
}

impl RecoveryTimeStamp {
    pub fn new(timestamp: SystemTime) -> Self {
        RecoveryTimeStamp { timestamp }
    }

    pub fn now() -> Self {
        RecoveryTimeStamp {
            timestamp: SystemTime::now(),
        }
    }

    pub fn marshal(&self) -> [u8; 4] {
        let unix_secs = self
            .timestamp
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        ((unix_secs + NTP_EPOCH_OFFSET) as u32).to_be_bytes()
    }

    pub fn unmarshal(data: &[u8]) -> Result<Self, PfcpError> {
        if data.len() < 4 {
            return Err(PfcpError::invalid_length("Recovery Time Stamp", 4, data.len()));
        }
        let ntp_secs = u32::from_be_bytes([data[0], data[1], data[2], data[3]]) as u64;
        if ntp_secs < NTP_EPOCH_OFFSET {
            return Err(PfcpError::invalid_value(
                "Recovery Time Stamp",
                "timestamp precedes the Unix epoch",
            ));
        }
        Ok(RecoveryTimeStamp {
            timestamp: UNIX_EPOCH + Duration::from_secs(ntp_secs - NTP_EPOCH_OFFSET),
        })
    }

    pub fn to_ie(&self) -> Ie {
        Ie::new(IeType::RecoveryTimeStamp, self.marshal().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marshal_unmarshal_round_trip_at_second_precision() {
        let rts = RecoveryTimeStamp::now();
        let decoded = RecoveryTimeStamp::unmarshal(&rts.marshal()).unwrap();
        let original = rts.timestamp.duration_since(UNIX_EPOCH).unwrap().as_secs();
        let round_tripped = decoded
            .timestamp
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();
        assert_eq!(original, round_tripped);
    }

    #[test]
    fn pre_epoch_timestamp_rejected() {
        assert!(RecoveryTimeStamp::unmarshal(&[0, 0, 0, 1]).is_err());
    }

    #[test]
    fn short_payload_rejected() {
        assert!(RecoveryTimeStamp::unmarshal(&[0, 0, 0]).is_err());
    }
}
