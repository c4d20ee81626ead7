//! PFCP message header.

use crate::error::PfcpError;
use crate::message::MsgType;

/// The fixed PFCP header: version/flags, message type, length, an optional
/// SEID for session-level messages, and a 24-bit sequence number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub version: u8,
    pub has_seid: bool,
    pub message_type: MsgType,
    pub length: u16,
    pub seid: u64,
    pub sequence_number: u32,
}

impl Default for Header {
    fn default() -> Self {
        Header::new(MsgType::Unknown, false, 0, 0)
    }
}

impl Header {
    pub fn new(message_type: MsgType, has_seid: bool, seid: u64, sequence_number: u32) -> Self {
        Header {
            version: 1,
            has_seid,
            message_type,
            length: 0,
            seid,
            sequence_number,
        }
    }

    /// Header size in bytes: 8, or 16 with an SEID.
    pub fn len(&self) -> u16 {
        if self.has_seid {
            16
        } else {
            8
        }
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Sets the wire `length` field from the body size that follows the
    /// mandatory part of the header.
    pub fn set_body_length(&mut self, body: u16) {
        self.length = body + self.len() - 4;
    }

    pub fn marshal_into(&self, buf: &mut Vec<u8>) {
        buf.push((self.version << 5) | (self.has_seid as u8));
        buf.push(self.message_type as u8);
        buf.extend_from_slice(&self.length.to_be_bytes());
        if self.has_seid {
            buf.extend_from_slice(&self.seid.to_be_bytes());
        }
        let seq = self.sequence_number.to_be_bytes();
        buf.extend_from_slice(&seq[1..]);
        buf.push(0); // spare / message priority
    }

    pub fn marshal(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.len() as usize);
        self.marshal_into(&mut buf);
        buf
    }

    pub fn unmarshal(b: &[u8]) -> Result<Self, PfcpError> {
        if b.len() < 8 {
            return Err(PfcpError::InvalidHeader {
                reason: "header too short".into(),
            });
        }
        let flags = b[0];
        let version = flags >> 5;
        if version != 1 {
            return Err(PfcpError::InvalidHeader {
                reason: format!("unsupported PFCP version {version}"),
            });
        }
        let has_seid = flags & 0x01 != 0;
        let message_type = MsgType::from(b[1]);
        let length = u16::from_be_bytes([b[2], b[3]]);

        let mut offset = 4;
        let seid = if has_seid {
            if b.len() < 16 {
                return Err(PfcpError::InvalidHeader {
                    reason: "header with SEID too short".into(),
                });
            }
            let seid = u64::from_be_bytes([
                b[4], b[5], b[6], b[7], b[8], b[9], b[10], b[11],
            ]);
            offset = 12;
            seid
        } else {
            0
        };

        let sequence_number =
            u32::from_be_bytes([0, b[offset], b[offset + 1], b[offset + 2]]);

        Ok(Header {
            version,
            has_seid,
            message_type,
            length,
            seid,
            sequence_number,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_header_round_trip() {
        let mut header = Header::new(MsgType::HeartbeatRequest, false, 0, 7);
        header.set_body_length(0);
        let decoded = Header::unmarshal(&header.marshal()).unwrap();
        assert_eq!(decoded, header);
        assert_eq!(decoded.len(), 8);
    }

    #[test]
    fn session_header_round_trip() {
        let mut header = Header::new(MsgType::SessionEstablishmentRequest, true, 0x1122, 99);
        header.set_body_length(32);
        let decoded = Header::unmarshal(&header.marshal()).unwrap();
        assert_eq!(decoded.seid, 0x1122);
        assert_eq!(decoded.sequence_number, 99);
        assert_eq!(decoded.length, 32 + 12);
    }

    #[test]
    fn wrong_version_rejected() {
        let mut data = Header::new(MsgType::HeartbeatRequest, false, 0, 1).marshal();
        data[0] = 2 << 5;
        assert!(Header::unmarshal(&data).is_err());
    }

    #[test]
    fn truncated_seid_rejected() {
        let header = Header::new(MsgType::SessionDeletionRequest, true, 5, 1);
        let data = header.marshal();
        assert!(Header::unmarshal(&data[..10]).is_err());
    }
}
