//! Control interface of the GTP-U packet-forwarding datapath.
//!
//! The N4 handler programs forwarding state through this trait; in
//! production the implementation wraps the kernel tunnel driver's netlink
//! control channel, while [`memory::MemoryDatapath`] backs tests and demos.

pub mod memory;

use std::net::Ipv4Addr;
use thiserror::Error;

/// Well-known GTP-U UDP port.
pub const GTPU_PORT: u16 = 2152;

/// Local tunnel endpoint a PDR matches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalFTeid {
    pub teid: u32,
    pub addr: Ipv4Addr,
}

/// A Packet Detection Rule as installed in the datapath.
///
/// `far_id` of zero means the rule is unlinked. A nonzero `far_id` may name
/// a FAR that is not installed yet: the control plane creates PDRs before
/// FARs within a single transaction, and the datapath resolves the reference
/// at packet-processing time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdrRule {
    pub id: u16,
    pub precedence: u32,
    pub source_interface: u8,
    pub local_f_teid: Option<LocalFTeid>,
    pub ue_addr: Option<Ipv4Addr>,
    pub outer_header_removal: Option<u8>,
    pub far_id: u32,
}

/// Encapsulation a FAR puts on forwarded packets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OuterHeader {
    pub description: u16,
    pub teid: u32,
    pub peer_addr: Ipv4Addr,
    pub port: u16,
}

/// A Forwarding Action Rule as installed in the datapath.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FarRule {
    pub id: u32,
    pub apply_action: u8,
    pub outer_header: Option<OuterHeader>,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DatapathError {
    #[error("no such device {0}")]
    NoSuchDevice(String),
    #[error("PDR {0} already installed")]
    PdrExists(u16),
    #[error("FAR {0} already installed")]
    FarExists(u32),
    #[error("PDR {0} not installed")]
    NoSuchPdr(u16),
    #[error("FAR {0} not installed")]
    NoSuchFar(u32),
}

/// Rule programming surface of a GTP-U tunnel device, keyed by device name.
///
/// Calls may block for the duration of a control round-trip but are expected
/// to have bounded latency. Implementations must be safe for concurrent use;
/// the handler serializes per session, not per device.
///
/// Back-references from FARs to PDRs are expressed as PDR *ids* throughout:
/// [`related_pdrs`](Datapath::related_pdrs) yields the ids of every PDR whose
/// `far_id` names the given FAR, and
/// [`set_pdr_far_id`](Datapath::set_pdr_far_id) rewrites one PDR's link in
/// place. The related-PDR list is a lookup aid, not ownership; sessions own
/// their PDRs.
pub trait Datapath: Send + Sync {
    fn add_pdr(&self, dev: &str, pdr: &PdrRule) -> Result<(), DatapathError>;
    fn mod_pdr(&self, dev: &str, pdr: &PdrRule) -> Result<(), DatapathError>;
    fn del_pdr(&self, dev: &str, pdr_id: u16) -> Result<(), DatapathError>;
    fn find_pdr_by_id(&self, dev: &str, pdr_id: u16) -> Option<PdrRule>;

    fn add_far(&self, dev: &str, far: &FarRule) -> Result<(), DatapathError>;
    fn mod_far(&self, dev: &str, far: &FarRule) -> Result<(), DatapathError>;
    fn del_far(&self, dev: &str, far_id: u32) -> Result<(), DatapathError>;
    fn find_far_by_id(&self, dev: &str, far_id: u32) -> Option<FarRule>;

    /// Ids of every installed PDR currently pointing at `far_id`.
    fn related_pdrs(&self, dev: &str, far_id: u32) -> Vec<u16>;

    /// Rewrites the `far_id` link of an installed PDR.
    fn set_pdr_far_id(&self, dev: &str, pdr_id: u16, far_id: u32) -> Result<(), DatapathError>;
}
