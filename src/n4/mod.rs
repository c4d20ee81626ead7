//! The N4 request dispatcher.
//!
//! One handler per PFCP message type. Every handler follows the same
//! contract: validate the handles and mandatory IEs, run the translator,
//! build the response, attach it with `update_tx`, and `commit`. A handler
//! either commits its transaction once or returns an error; rules installed
//! before the failing step stay installed, and the transaction layer owns
//! reporting the failure.

pub mod respond;
pub mod rules;

use crate::datapath::Datapath;
use crate::error::N4Error;
use crate::ie::cause::Cause;
use crate::ie::fseid::Fseid;
use crate::ie::recovery_time_stamp::RecoveryTimeStamp;
use crate::ie::remove_far::RemoveFar;
use crate::ie::remove_pdr::RemovePdr;
use crate::ie::NodeId;
use crate::message::header::Header;
use crate::message::{
    AssociationReleaseRequest, AssociationSetupRequest, AssociationUpdateRequest,
    HeartbeatRequest, HeartbeatResponse, Message, MsgType, SessionDeletionRequest,
    SessionEstablishmentRequest, SessionModificationRequest, SessionReportResponse,
};
use crate::peer::{AssociationState, PeerNode, PeerRegistry};
use crate::session::{SessionStore, UpfSession};
use crate::xact::Transaction;
use log::{debug, info, warn};
use rules::RuleTranslator;
use std::net::Ipv4Addr;
use std::sync::Arc;

/// Terminates N4 towards one GTP-U device.
///
/// The device name and datapath handle are explicit dependencies; there is
/// no process-global interface state. Per-session mutual exclusion comes
/// from the session store's per-entry locks, which [`N4Handler::dispatch`]
/// acquires before entering a session handler.
pub struct N4Handler {
    datapath: Arc<dyn Datapath>,
    dev: String,
    translator: RuleTranslator,
    sessions: SessionStore,
    peers: PeerRegistry,
    node_id: NodeId,
    up_addr: Ipv4Addr,
    recovery: RecoveryTimeStamp,
}

impl N4Handler {
    pub fn new(datapath: Arc<dyn Datapath>, dev: impl Into<String>, up_addr: Ipv4Addr) -> Self {
        let dev = dev.into();
        N4Handler {
            translator: RuleTranslator::new(datapath.clone(), dev.clone()),
            datapath,
            dev,
            sessions: SessionStore::new(),
            peers: PeerRegistry::new(),
            node_id: NodeId::Ipv4(up_addr),
            up_addr,
            recovery: RecoveryTimeStamp::now(),
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn peers(&self) -> &PeerRegistry {
        &self.peers
    }

    /// Parses a datagram, resolves the peer and session handles, and routes
    /// to the per-message handler.
    pub fn dispatch(&self, xact: &mut dyn Transaction, data: &[u8]) -> Result<(), N4Error> {
        let header = Header::unmarshal(data)?;
        match header.message_type {
            MsgType::HeartbeatRequest => {
                let request = HeartbeatRequest::unmarshal(data)?;
                self.handle_heartbeat_request(xact, &request)
            }
            MsgType::HeartbeatResponse => {
                let response = HeartbeatResponse::unmarshal(data)?;
                self.handle_heartbeat_response(xact, &response)
            }
            MsgType::AssociationSetupRequest => {
                let request = AssociationSetupRequest::unmarshal(data)?;
                let peer = self.peers.get_or_insert(xact.peer_addr());
                let mut peer = peer.lock();
                self.handle_association_setup(&mut peer, xact, &request)
            }
            MsgType::AssociationUpdateRequest => {
                let request = AssociationUpdateRequest::unmarshal(data)?;
                let peer = self.peers.get_or_insert(xact.peer_addr());
                let mut peer = peer.lock();
                self.handle_association_update(&mut peer, xact, &request)
            }
            MsgType::AssociationReleaseRequest => {
                let request = AssociationReleaseRequest::unmarshal(data)?;
                let peer = self.peers.get_or_insert(xact.peer_addr());
                let mut peer = peer.lock();
                self.handle_association_release(&mut peer, xact, &request)
            }
            MsgType::SessionEstablishmentRequest => {
                let request = SessionEstablishmentRequest::unmarshal(data)?;
                let peer = self.peers.get_or_insert(xact.peer_addr());
                if !peer.lock().is_associated() {
                    return Err(N4Error::invalid_request(
                        "no established PFCP association with peer",
                    ));
                }
                let (seid, session) = self.sessions.create(xact.peer_addr());
                let result = {
                    let mut session = session.lock();
                    self.handle_session_establishment(&mut session, xact, &request)
                };
                if result.is_err() {
                    // The SMF never learns this SEID on failure; drop the
                    // half-created entry. Installed rules stay, per the
                    // no-rollback policy.
                    self.sessions.remove(seid);
                }
                result
            }
            MsgType::SessionModificationRequest => {
                let request = SessionModificationRequest::unmarshal(data)?;
                let session = self.resolve_session(header.seid)?;
                let mut session = session.lock();
                self.handle_session_modification(&mut session, xact, &request)
            }
            MsgType::SessionDeletionRequest => {
                let request = SessionDeletionRequest::unmarshal(data)?;
                let session = self.resolve_session(header.seid)?;
                let mut session = session.lock();
                self.handle_session_deletion(&mut session, xact, &request)
            }
            MsgType::SessionReportResponse => {
                let response = SessionReportResponse::unmarshal(data)?;
                let session = self.resolve_session(header.seid)?;
                let mut session = session.lock();
                self.handle_session_report_response(&mut session, xact, &response)
            }
            other => Err(N4Error::invalid_request(format!(
                "unhandled message type {other:?}"
            ))),
        }
    }

    fn resolve_session(
        &self,
        seid: u64,
    ) -> Result<Arc<parking_lot::Mutex<UpfSession>>, N4Error> {
        self.sessions
            .get(seid)
            .ok_or_else(|| N4Error::not_found("session", seid))
    }

    /// Heartbeat Request: always answered, no state change.
    pub fn handle_heartbeat_request(
        &self,
        xact: &mut dyn Transaction,
        request: &HeartbeatRequest,
    ) -> Result<(), N4Error> {
        debug!("[PFCP] heartbeat request from {}", xact.peer_addr());
        let response = respond::heartbeat(&self.recovery, request.sequence())?;
        xact.update_tx(response)?;
        xact.commit()?;
        Ok(())
    }

    /// Heartbeat Response: consumed silently; committing closes the pending
    /// probe. Liveness timeouts are tracked by the transaction layer.
    pub fn handle_heartbeat_response(
        &self,
        xact: &mut dyn Transaction,
        _response: &HeartbeatResponse,
    ) -> Result<(), N4Error> {
        debug!("[PFCP] heartbeat response from {}", xact.peer_addr());
        xact.commit()?;
        Ok(())
    }

    /// Association Setup: records the peer's Node ID and transitions it to
    /// `Associated`.
    pub fn handle_association_setup(
        &self,
        peer: &mut PeerNode,
        xact: &mut dyn Transaction,
        request: &AssociationSetupRequest,
    ) -> Result<(), N4Error> {
        let node_id_ie = request
            .node_id
            .as_ref()
            .ok_or_else(|| N4Error::invalid_request("association setup without Node ID"))?;
        let node_id = NodeId::unmarshal(&node_id_ie.payload)?;
        match node_id {
            NodeId::Ipv4(_) | NodeId::Ipv6(_) => peer.node_id = Some(node_id),
            NodeId::Fqdn(_) => {
                return Err(N4Error::invalid_request(
                    "FQDN node id not supported for association",
                ))
            }
        }
        peer.state = AssociationState::Associated;

        let response =
            respond::association_setup(&self.node_id, &self.recovery, request.sequence())?;
        xact.update_tx(response)?;
        xact.commit()?;
        info!(
            "[PFCP] association setup response to {} (node {})",
            peer.addr,
            peer.node_id.as_ref().map(ToString::to_string).unwrap_or_default()
        );
        Ok(())
    }

    /// Association Update: merges node-level parameters into the peer record.
    pub fn handle_association_update(
        &self,
        peer: &mut PeerNode,
        xact: &mut dyn Transaction,
        request: &AssociationUpdateRequest,
    ) -> Result<(), N4Error> {
        if let Some(node_id_ie) = &request.node_id {
            peer.node_id = Some(NodeId::unmarshal(&node_id_ie.payload)?);
        }
        let response = respond::association_update(&self.node_id, request.sequence())?;
        xact.update_tx(response)?;
        xact.commit()?;
        info!("[PFCP] association update response to {}", peer.addr);
        Ok(())
    }

    /// Association Release: tears down every session bound to the peer and
    /// returns it to `Idle`.
    pub fn handle_association_release(
        &self,
        peer: &mut PeerNode,
        xact: &mut dyn Transaction,
        request: &AssociationReleaseRequest,
    ) -> Result<(), N4Error> {
        for session in self.sessions.remove_peer_sessions(peer.addr) {
            let mut session = session.lock();
            for pdr_id in session.pdr_ids().to_vec() {
                self.datapath.del_pdr(&self.dev, pdr_id)?;
                session.forget_pdr(pdr_id);
            }
            debug!("released session {:#x} of {}", session.local_seid, peer.addr);
        }
        peer.state = AssociationState::Idle;

        let response = respond::association_release(&self.node_id, request.sequence())?;
        xact.update_tx(response)?;
        xact.commit()?;
        info!("[PFCP] association release response to {}", peer.addr);
        Ok(())
    }

    /// Session Establishment: installs the requested PDRs and FARs, learns
    /// the SMF's SEID, and answers with our UP F-SEID.
    pub fn handle_session_establishment(
        &self,
        session: &mut UpfSession,
        xact: &mut dyn Transaction,
        request: &SessionEstablishmentRequest,
    ) -> Result<(), N4Error> {
        for ie in &request.create_pdrs {
            self.translator.create_pdr(session, ie)?;
        }
        for ie in &request.create_fars {
            self.translator.create_far(ie)?;
        }
        // TODO: act on URR/QER/BAR creations once usage reporting lands.
        if !request.create_urrs.is_empty()
            || !request.create_qers.is_empty()
            || !request.create_bars.is_empty()
        {
            debug!("ignoring URR/QER/BAR creations in establishment");
        }

        let fseid_ie = request
            .cp_fseid
            .as_ref()
            .ok_or_else(|| N4Error::invalid_request("session establishment without CP F-SEID"))?;
        let fseid = Fseid::unmarshal(&fseid_ie.payload)?;
        session.smf_seid = fseid.seid;

        let response = respond::session_establishment(
            &self.node_id,
            self.up_addr,
            session,
            request.sequence(),
        )?;
        xact.update_tx(response)?;
        xact.commit()?;
        info!(
            "[PFCP] session establishment response (SMF SEID {:#x}, local SEID {:#x})",
            session.smf_seid, session.local_seid
        );
        Ok(())
    }

    /// Session Modification. The order is fixed and significant: created
    /// PDRs may reference FARs created later in the same request, which the
    /// datapath tolerates until packet-processing time.
    pub fn handle_session_modification(
        &self,
        session: &mut UpfSession,
        xact: &mut dyn Transaction,
        request: &SessionModificationRequest,
    ) -> Result<(), N4Error> {
        for ie in &request.create_pdrs {
            self.translator.create_pdr(session, ie)?;
        }
        for ie in &request.create_fars {
            self.translator.create_far(ie)?;
        }
        for ie in &request.update_pdrs {
            self.translator.update_pdr(ie)?;
        }
        for ie in &request.update_fars {
            self.translator.update_far(ie)?;
        }
        for ie in &request.remove_pdrs {
            let remove = RemovePdr::unmarshal(&ie.payload)?;
            self.translator.remove_pdr(session, remove.pdr_id.value)?;
        }
        for ie in &request.remove_fars {
            let remove = RemoveFar::unmarshal(&ie.payload)?;
            self.translator.remove_far(remove.far_id.value)?;
        }

        let response = respond::session_modification(session, request.sequence())?;
        xact.update_tx(response)?;
        xact.commit()?;
        info!(
            "[PFCP] session modification response (SMF SEID {:#x})",
            session.smf_seid
        );
        Ok(())
    }

    /// Session Deletion: removes every PDR the session owns, then the
    /// session itself. The response is materialized before the session is
    /// detached from the store, since it reads the stored SMF SEID.
    pub fn handle_session_deletion(
        &self,
        session: &mut UpfSession,
        xact: &mut dyn Transaction,
        request: &SessionDeletionRequest,
    ) -> Result<(), N4Error> {
        for pdr_id in session.pdr_ids().to_vec() {
            self.datapath.del_pdr(&self.dev, pdr_id)?;
            session.forget_pdr(pdr_id);
        }

        let response = respond::session_deletion(session, request.sequence())?;
        self.sessions.remove(session.local_seid);

        xact.update_tx(response)?;
        xact.commit()?;
        info!(
            "[PFCP] session deletion response (SMF SEID {:#x})",
            session.smf_seid
        );
        Ok(())
    }

    /// Session Report Response: closes the pending report request. No state
    /// changes here; the Cause IE must be present.
    pub fn handle_session_report_response(
        &self,
        session: &mut UpfSession,
        xact: &mut dyn Transaction,
        response: &SessionReportResponse,
    ) -> Result<(), N4Error> {
        let cause_ie = response
            .cause
            .as_ref()
            .ok_or_else(|| N4Error::invalid_request("session report response without Cause"))?;
        let cause = Cause::unmarshal(&cause_ie.payload)?;
        if session.smf_seid == 0 {
            warn!("report response for session {:#x} before establishment", session.local_seid);
        }

        xact.commit()?;
        info!(
            "[PFCP] session report response consumed (cause {:?})",
            cause.value
        );
        Ok(())
    }
}
