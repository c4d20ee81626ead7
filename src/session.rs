//! Per-peer-session state and the shared session store.

use ahash::{HashMap, HashMapExt};
use parking_lot::{Mutex, RwLock};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// One N4 session: our SEID, the SMF's SEID learned at establishment, the
/// peer that owns the session, and the PDR ids installed through it.
#[derive(Debug)]
pub struct UpfSession {
    pub local_seid: u64,
    pub smf_seid: u64,
    pub peer: SocketAddr,
    pdr_ids: Vec<u16>,
}

impl UpfSession {
    pub fn new(local_seid: u64, peer: SocketAddr) -> Self {
        UpfSession {
            local_seid,
            smf_seid: 0,
            peer,
            pdr_ids: Vec::new(),
        }
    }

    /// PDR ids owned by this session, in installation order.
    pub fn pdr_ids(&self) -> &[u16] {
        &self.pdr_ids
    }

    pub fn owns_pdr(&self, pdr_id: u16) -> bool {
        self.pdr_ids.contains(&pdr_id)
    }

    pub fn track_pdr(&mut self, pdr_id: u16) {
        self.pdr_ids.push(pdr_id);
    }

    pub fn forget_pdr(&mut self, pdr_id: u16) {
        self.pdr_ids.retain(|id| *id != pdr_id);
    }
}

/// Shared map of sessions keyed by local SEID.
///
/// Each entry carries its own mutex: handlers lock one session for the
/// duration of a transaction while unrelated sessions proceed in parallel.
/// The map lock is only held for lookups and insertions, never across a
/// handler body.
pub struct SessionStore {
    sessions: RwLock<HashMap<u64, Arc<Mutex<UpfSession>>>>,
    next_seid: AtomicU64,
}

impl SessionStore {
    pub fn new() -> Self {
        SessionStore {
            sessions: RwLock::new(HashMap::new()),
            next_seid: AtomicU64::new(1),
        }
    }

    /// Allocates a local SEID and creates a session bound to `peer`.
    pub fn create(&self, peer: SocketAddr) -> (u64, Arc<Mutex<UpfSession>>) {
        let seid = self.next_seid.fetch_add(1, Ordering::Relaxed);
        let session = Arc::new(Mutex::new(UpfSession::new(seid, peer)));
        self.sessions.write().insert(seid, session.clone());
        (seid, session)
    }

    pub fn get(&self, local_seid: u64) -> Option<Arc<Mutex<UpfSession>>> {
        self.sessions.read().get(&local_seid).cloned()
    }

    pub fn remove(&self, local_seid: u64) -> Option<Arc<Mutex<UpfSession>>> {
        self.sessions.write().remove(&local_seid)
    }

    /// Detaches and returns every session bound to `peer`.
    ///
    /// The map lock is never held while a session mutex is taken, so this
    /// cannot deadlock against a handler that holds a session lock and
    /// touches the map.
    pub fn remove_peer_sessions(&self, peer: SocketAddr) -> Vec<Arc<Mutex<UpfSession>>> {
        let candidates: Vec<(u64, Arc<Mutex<UpfSession>>)> = self
            .sessions
            .read()
            .iter()
            .map(|(seid, session)| (*seid, session.clone()))
            .collect();

        let mut removed = Vec::new();
        for (seid, session) in candidates {
            if session.lock().peer == peer {
                if let Some(session) = self.sessions.write().remove(&seid) {
                    removed.push(session);
                }
            }
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        SessionStore::new()
    }
}
