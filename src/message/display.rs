//! Compact JSON introspection of PFCP datagrams, for logging.

use crate::error::PfcpError;
use crate::ie::IeIterator;
use crate::message::header::Header;
use serde_json::{json, Value};

/// Renders a raw datagram as a JSON summary: message name, SEID, sequence,
/// and the type/length layout of its top-level IEs. Payloads are not decoded
/// beyond the TLV level, so this works for any message the codec can frame.
pub fn describe(data: &[u8]) -> Result<Value, PfcpError> {
    let header = Header::unmarshal(data)?;
    let mut ies = Vec::new();
    for ie in IeIterator::new(&data[header.len() as usize..]) {
        let ie = ie?;
        ies.push(json!({
            "type": format!("{:?}", ie.ie_type),
            "length": ie.payload.len(),
        }));
    }

    let mut value = json!({
        "message": format!("{:?}", header.message_type),
        "sequence": header.sequence_number,
        "ies": ies,
    });
    if header.has_seid {
        value["seid"] = json!(format!("{:#018x}", header.seid));
    }
    Ok(value)
}
