//! The transaction seam between the N4 handlers and the transport.
//!
//! Request/response correlation and retransmission live with the transport
//! collaborator; handlers only see one transaction per inbound message.

use crate::error::N4Error;
use log::debug;
use std::net::{SocketAddr, UdpSocket};

/// One PFCP transaction.
///
/// A transaction accepts at most one [`update_tx`](Transaction::update_tx)
/// before [`commit`](Transaction::commit). Committing with a response
/// attached sends it; committing without one finalizes silently, which is
/// how a received response (e.g. Session Report Response) closes its pending
/// request. A committed transaction accepts nothing further.
pub trait Transaction {
    /// Transport address of the peer this transaction talks to.
    fn peer_addr(&self) -> SocketAddr;

    /// Attaches the marshaled response to send on commit.
    fn update_tx(&mut self, response: Vec<u8>) -> Result<(), N4Error>;

    /// Sends the attached response, if any, and finalizes the transaction.
    fn commit(&mut self) -> Result<(), N4Error>;
}

/// One-shot reply transaction over a shared UDP socket.
pub struct UdpTransaction<'a> {
    socket: &'a UdpSocket,
    peer: SocketAddr,
    pending: Option<Vec<u8>>,
    committed: bool,
}

impl<'a> UdpTransaction<'a> {
    pub fn new(socket: &'a UdpSocket, peer: SocketAddr) -> Self {
        UdpTransaction {
            socket,
            peer,
            pending: None,
            committed: false,
        }
    }
}

impl Transaction for UdpTransaction<'_> {
    fn peer_addr(&self) -> SocketAddr {
        self.peer
    }

    fn update_tx(&mut self, response: Vec<u8>) -> Result<(), N4Error> {
        if self.committed {
            return Err(N4Error::Transaction(
                "transaction already committed".into(),
            ));
        }
        if self.pending.is_some() {
            return Err(N4Error::Transaction(
                "transaction already has a response attached".into(),
            ));
        }
        self.pending = Some(response);
        Ok(())
    }

    fn commit(&mut self) -> Result<(), N4Error> {
        if self.committed {
            return Err(N4Error::Transaction(
                "transaction already committed".into(),
            ));
        }
        self.committed = true;
        match self.pending.take() {
            Some(response) => {
                self.socket
                    .send_to(&response, self.peer)
                    .map_err(|e| N4Error::Transaction(format!("send to {}: {e}", self.peer)))?;
                Ok(())
            }
            None => {
                debug!("transaction to {} committed without a response", self.peer);
                Ok(())
            }
        }
    }
}
