//! Peer node state and the shared registry.

use crate::ie::NodeId;
use ahash::{HashMap, HashMapExt};
use parking_lot::{Mutex, RwLock};
use std::net::SocketAddr;
use std::sync::Arc;

/// Association state of a peer, driven by the association handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssociationState {
    #[default]
    Idle,
    Associated,
}

/// A known PFCP peer: its transport address, the Node ID it reported, and
/// the association state.
#[derive(Debug)]
pub struct PeerNode {
    pub addr: SocketAddr,
    pub node_id: Option<NodeId>,
    pub state: AssociationState,
}

impl PeerNode {
    pub fn new(addr: SocketAddr) -> Self {
        PeerNode {
            addr,
            node_id: None,
            state: AssociationState::Idle,
        }
    }

    pub fn is_associated(&self) -> bool {
        self.state == AssociationState::Associated
    }
}

/// Registry of peers keyed by transport address. Read-mostly; written on
/// first contact and on association events.
pub struct PeerRegistry {
    peers: RwLock<HashMap<SocketAddr, Arc<Mutex<PeerNode>>>>,
}

impl PeerRegistry {
    pub fn new() -> Self {
        PeerRegistry {
            peers: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the peer for `addr`, creating an `Idle` record on first
    /// contact.
    pub fn get_or_insert(&self, addr: SocketAddr) -> Arc<Mutex<PeerNode>> {
        if let Some(peer) = self.peers.read().get(&addr) {
            return peer.clone();
        }
        self.peers
            .write()
            .entry(addr)
            .or_insert_with(|| Arc::new(Mutex::new(PeerNode::new(addr))))
            .clone()
    }

    pub fn get(&self, addr: SocketAddr) -> Option<Arc<Mutex<PeerNode>>> {
        self.peers.read().get(&addr).cloned()
    }

    pub fn len(&self) -> usize {
        self.peers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.read().is_empty()
    }
}

impl Default for PeerRegistry {
    fn default() -> Self {
        PeerRegistry::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn first_contact_is_idle() {
        let registry = PeerRegistry::new();
        let peer = registry.get_or_insert("192.0.2.1:8805".parse().unwrap());
        assert_eq!(peer.lock().state, AssociationState::Idle);
        assert!(!peer.lock().is_associated());
    }

    #[test]
    fn same_addr_yields_same_peer() {
        let registry = PeerRegistry::new();
        let addr: SocketAddr = "192.0.2.1:8805".parse().unwrap();
        let first = registry.get_or_insert(addr);
        first.lock().state = AssociationState::Associated;
        first.lock().node_id = Some(NodeId::Ipv4(Ipv4Addr::new(192, 0, 2, 1)));
        let second = registry.get_or_insert(addr);
        assert!(second.lock().is_associated());
        assert_eq!(registry.len(), 1);
    }
}
