//! Shared helpers for the integration tests: a recording transaction, a
//! handler rig over the in-memory datapath, and request constructors.

#![allow(dead_code)]

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use upf_n4::datapath::memory::MemoryDatapath;
use upf_n4::error::N4Error;
use upf_n4::ie::apply_action::ApplyAction;
use upf_n4::ie::create_far::CreateFar;
use upf_n4::ie::create_pdr::CreatePdr;
use upf_n4::ie::far_id::FarId;
use upf_n4::ie::fseid::Fseid;
use upf_n4::ie::node_id::NodeId;
use upf_n4::ie::pdi::Pdi;
use upf_n4::ie::pdr_id::PdrId;
use upf_n4::ie::precedence::Precedence;
use upf_n4::ie::recovery_time_stamp::RecoveryTimeStamp;
use upf_n4::ie::source_interface::{SourceInterface, SourceInterfaceValue};
use upf_n4::message::{
    AssociationSetupRequest, Message, SessionDeletionRequest, SessionEstablishmentRequest,
    SessionModificationRequest,
};
use upf_n4::n4::N4Handler;
use upf_n4::xact::Transaction;

pub const DEV: &str = "upfgtp";
pub const UP_ADDR: Ipv4Addr = Ipv4Addr::new(10, 0, 0, 1);

/// Captures what the handler hands to the transaction layer instead of
/// sending it anywhere.
pub struct RecordingTransaction {
    peer: SocketAddr,
    pub responses: Vec<Vec<u8>>,
    pub commits: usize,
}

impl RecordingTransaction {
    pub fn new(peer: SocketAddr) -> Self {
        RecordingTransaction {
            peer,
            responses: Vec::new(),
            commits: 0,
        }
    }

    /// The single committed response, if the handler produced one.
    pub fn committed(&self) -> Option<&[u8]> {
        if self.commits == 1 {
            self.responses.first().map(Vec::as_slice)
        } else {
            None
        }
    }
}

impl Transaction for RecordingTransaction {
    fn peer_addr(&self) -> SocketAddr {
        self.peer
    }

    fn update_tx(&mut self, response: Vec<u8>) -> Result<(), N4Error> {
        if self.responses.len() == 1 {
            return Err(N4Error::Transaction("double update_tx".into()));
        }
        self.responses.push(response);
        Ok(())
    }

    fn commit(&mut self) -> Result<(), N4Error> {
        if self.commits > 0 {
            return Err(N4Error::Transaction("double commit".into()));
        }
        self.commits += 1;
        Ok(())
    }
}

pub fn smf_addr() -> SocketAddr {
    "192.0.2.1:8805".parse().unwrap()
}

pub fn rig() -> (Arc<MemoryDatapath>, N4Handler) {
    let datapath = Arc::new(MemoryDatapath::new(DEV));
    let handler = N4Handler::new(datapath.clone(), DEV, UP_ADDR);
    (datapath, handler)
}

/// Runs an Association Setup so the peer is `Associated`.
pub fn associate(handler: &N4Handler, peer: SocketAddr) {
    let mut xact = RecordingTransaction::new(peer);
    handler
        .dispatch(&mut xact, &association_setup_request(1).marshal())
        .expect("association setup");
}

pub fn association_setup_request(sequence: u32) -> AssociationSetupRequest {
    AssociationSetupRequest::new(
        sequence,
        NodeId::Ipv4(Ipv4Addr::new(192, 0, 2, 1)).to_ie(),
        Some(RecoveryTimeStamp::now().to_ie()),
    )
}

pub fn access_pdi() -> Pdi {
    Pdi::new(SourceInterface::new(SourceInterfaceValue::Access))
}

pub fn create_pdr(pdr_id: u16, precedence: u32, far_id: u32) -> CreatePdr {
    CreatePdr::new(PdrId::new(pdr_id), Precedence::new(precedence), access_pdi())
        .with_far_id(FarId::new(far_id))
}

pub fn create_far(far_id: u32) -> CreateFar {
    CreateFar::new(FarId::new(far_id), ApplyAction::FORW)
}

pub fn establishment_request(
    sequence: u32,
    smf_seid: u64,
    pdrs: Vec<CreatePdr>,
    fars: Vec<CreateFar>,
) -> SessionEstablishmentRequest {
    SessionEstablishmentRequest::new(
        0,
        sequence,
        Some(NodeId::Ipv4(Ipv4Addr::new(192, 0, 2, 1)).to_ie()),
        Some(Fseid::new(smf_seid, Some(Ipv4Addr::new(192, 0, 2, 1)), None).to_ie()),
    )
    .with_create_pdrs(pdrs.iter().map(|pdr| pdr.to_ie()).collect())
    .with_create_fars(fars.iter().map(|far| far.to_ie()).collect())
}

/// Establishes a session through `dispatch` and returns our local SEID,
/// extracted from the UP F-SEID in the committed response.
pub fn establish(
    handler: &N4Handler,
    peer: SocketAddr,
    smf_seid: u64,
    pdrs: Vec<CreatePdr>,
    fars: Vec<CreateFar>,
) -> u64 {
    let mut xact = RecordingTransaction::new(peer);
    handler
        .dispatch(
            &mut xact,
            &establishment_request(2, smf_seid, pdrs, fars).marshal(),
        )
        .expect("session establishment");
    let response = upf_n4::message::SessionEstablishmentResponse::unmarshal(
        xact.committed().expect("committed establishment response"),
    )
    .expect("decodable establishment response");
    Fseid::unmarshal(&response.up_fseid.expect("UP F-SEID").payload)
        .expect("decodable UP F-SEID")
        .seid
}

pub fn modification_request(sequence: u32, local_seid: u64) -> SessionModificationRequest {
    SessionModificationRequest::new(local_seid, sequence)
}

pub fn deletion_request(sequence: u32, local_seid: u64) -> SessionDeletionRequest {
    SessionDeletionRequest::new(local_seid, sequence)
}
