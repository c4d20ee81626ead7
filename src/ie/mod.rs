//! PFCP Information Elements.
//!
//! One module per IE, each with `marshal`/`unmarshal` and a `to_ie` wrapper.
//! Only the IEs consumed or produced by the N4 handler are implemented.

use crate::error::PfcpError;

pub mod apply_action;
pub mod cause;
pub mod create_far;
pub mod create_pdr;
pub mod destination_interface;
pub mod f_teid;
pub mod far_id;
pub mod forwarding_parameters;
pub mod fseid;
pub mod network_instance;
pub mod node_id;
pub mod outer_header_creation;
pub mod outer_header_removal;
pub mod pdi;
pub mod pdr_id;
pub mod precedence;
pub mod recovery_time_stamp;
pub mod remove_far;
pub mod remove_pdr;
pub mod source_interface;
pub mod ue_ip_address;
pub mod update_far;
pub mod update_forwarding_parameters;
pub mod update_pdr;

pub use node_id::NodeId;

/// IE type code points, per 3GPP TS 29.244 §8.1.2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum IeType {
    CreatePdr = 1,
    Pdi = 2,
    CreateFar = 3,
    ForwardingParameters = 4,
    CreateUrr = 6,
    CreateQer = 7,
    UpdatePdr = 9,
    UpdateFar = 10,
    UpdateForwardingParameters = 11,
    RemovePdr = 15,
    RemoveFar = 16,
    Cause = 19,
    SourceInterface = 20,
    Fteid = 21,
    NetworkInstance = 22,
    Precedence = 29,
    DestinationInterface = 42,
    ApplyAction = 44,
    PdrId = 56,
    Fseid = 57,
    NodeId = 60,
    OuterHeaderCreation = 84,
    CreateBar = 85,
    UeIpAddress = 93,
    OuterHeaderRemoval = 95,
    RecoveryTimeStamp = 96,
    FarId = 108,
    Unknown = 0,
}

impl From<u16> for IeType {
    fn from(v: u16) -> Self {
        match v {
            1 => IeType::CreatePdr,
            2 => IeType::Pdi,
            3 => IeType::CreateFar,
            4 => IeType::ForwardingParameters,
            6 => IeType::CreateUrr,
            7 => IeType::CreateQer,
            9 => IeType::UpdatePdr,
            10 => IeType::UpdateFar,
            11 => IeType::UpdateForwardingParameters,
            15 => IeType::RemovePdr,
            16 => IeType::RemoveFar,
            19 => IeType::Cause,
            20 => IeType::SourceInterface,
            21 => IeType::Fteid,
            22 => IeType::NetworkInstance,
            29 => IeType::Precedence,
            42 => IeType::DestinationInterface,
            44 => IeType::ApplyAction,
            56 => IeType::PdrId,
            57 => IeType::Fseid,
            60 => IeType::NodeId,
            84 => IeType::OuterHeaderCreation,
            85 => IeType::CreateBar,
            93 => IeType::UeIpAddress,
            95 => IeType::OuterHeaderRemoval,
            96 => IeType::RecoveryTimeStamp,
            108 => IeType::FarId,
            _ => IeType::Unknown,
        }
    }
}

/// A raw PFCP Information Element: a type code and its payload bytes.
///
/// Grouped IEs carry their child IEs back-to-back in the payload; use
/// [`IeIterator`] to walk them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ie {
    pub ie_type: IeType,
    pub payload: Vec<u8>,
}

impl Ie {
    pub fn new(ie_type: IeType, payload: Vec<u8>) -> Self {
        Ie { ie_type, payload }
    }

    /// Builds a grouped IE from child IEs.
    pub fn new_grouped(ie_type: IeType, children: Vec<Ie>) -> Self {
        Ie {
            ie_type,
            payload: marshal_ies(&children),
        }
    }

    /// Total encoded length: 4-byte TL header plus the payload.
    pub fn len(&self) -> u16 {
        4 + self.payload.len() as u16
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    pub fn marshal(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.len() as usize);
        self.marshal_into(&mut buf);
        buf
    }

    pub fn marshal_into(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&(self.ie_type as u16).to_be_bytes());
        buf.extend_from_slice(&(self.payload.len() as u16).to_be_bytes());
        buf.extend_from_slice(&self.payload);
    }

    /// Decodes one IE from the front of `b`.
    pub fn unmarshal(b: &[u8]) -> Result<Self, PfcpError> {
        if b.len() < 4 {
            return Err(PfcpError::invalid_length("IE header", 4, b.len()));
        }
        let raw_type = u16::from_be_bytes([b[0], b[1]]);
        let ie_type = IeType::from(raw_type);
        let length = u16::from_be_bytes([b[2], b[3]]) as usize;

        // Network Instance is the one IE here whose zero-length encoding is
        // meaningful (clear the routing context); everything else has a fixed
        // part and a zero-length body is malformed.
        if length == 0 && ie_type != IeType::NetworkInstance {
            return Err(PfcpError::invalid_value(
                "IE length",
                format!("zero-length payload for {ie_type:?} (type {raw_type})"),
            ));
        }
        if b.len() < 4 + length {
            return Err(PfcpError::invalid_length("IE payload", 4 + length, b.len()));
        }

        Ok(Ie {
            ie_type,
            payload: b[4..4 + length].to_vec(),
        })
    }
}

/// Serializes a slice of IEs back-to-back, as a grouped-IE payload.
pub fn marshal_ies(ies: &[Ie]) -> Vec<u8> {
    let mut buf = Vec::new();
    for ie in ies {
        ie.marshal_into(&mut buf);
    }
    buf
}

/// Walks the IEs packed in a grouped-IE payload or a message body.
pub struct IeIterator<'a> {
    buf: &'a [u8],
    offset: usize,
}

impl<'a> IeIterator<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        IeIterator { buf, offset: 0 }
    }
}

impl Iterator for IeIterator<'_> {
    type Item = Result<Ie, PfcpError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.buf.len() {
            return None;
        }
        match Ie::unmarshal(&self.buf[self.offset..]) {
            Ok(ie) => {
                self.offset += ie.len() as usize;
                Some(Ok(ie))
            }
            Err(e) => {
                // Stop after a malformed IE; resynchronization is not possible.
                self.offset = self.buf.len();
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ie_marshal_unmarshal_round_trip() {
        let ie = Ie::new(IeType::PdrId, vec![0x00, 0x2a]);
        let marshaled = ie.marshal();
        assert_eq!(marshaled, vec![0x00, 56, 0x00, 0x02, 0x00, 0x2a]);
        let unmarshaled = Ie::unmarshal(&marshaled).unwrap();
        assert_eq!(unmarshaled, ie);
    }

    #[test]
    fn ie_unmarshal_too_short() {
        assert!(Ie::unmarshal(&[0x00, 56, 0x00]).is_err());
    }

    #[test]
    fn ie_unmarshal_truncated_payload() {
        let result = Ie::unmarshal(&[0x00, 56, 0x00, 0x02, 0x00]);
        assert!(matches!(result, Err(PfcpError::InvalidLength { .. })));
    }

    #[test]
    fn zero_length_rejected_except_network_instance() {
        assert!(Ie::unmarshal(&[0x00, 56, 0x00, 0x00]).is_err());
        let ni = Ie::unmarshal(&[0x00, 22, 0x00, 0x00]).unwrap();
        assert_eq!(ni.ie_type, IeType::NetworkInstance);
        assert!(ni.is_empty());
    }

    #[test]
    fn iterator_walks_packed_ies() {
        let ies = vec![
            Ie::new(IeType::PdrId, vec![0x00, 0x01]),
            Ie::new(IeType::Precedence, vec![0x00, 0x00, 0x00, 0x64]),
        ];
        let buf = marshal_ies(&ies);
        let walked: Vec<Ie> = IeIterator::new(&buf).map(|r| r.unwrap()).collect();
        assert_eq!(walked, ies);
    }

    #[test]
    fn iterator_surfaces_malformed_tail() {
        let mut buf = Ie::new(IeType::PdrId, vec![0x00, 0x01]).marshal();
        buf.extend_from_slice(&[0x00, 29, 0x00, 0x04, 0x00]); // truncated
        let results: Vec<_> = IeIterator::new(&buf).collect();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }

    #[test]
    fn unknown_type_preserved_as_unknown() {
        let ie = Ie::unmarshal(&[0x01, 0x00, 0x00, 0x01, 0xff]).unwrap();
        assert_eq!(ie.ie_type, IeType::Unknown);
    }
}
