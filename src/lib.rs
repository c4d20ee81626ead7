//! # upf-n4
//!
//! The N4 control-plane handler of a 5G User Plane Function (UPF).
//!
//! This crate terminates PFCP (Packet Forwarding Control Protocol, 3GPP TS
//! 29.244) sessions from an SMF and translates received Information Elements
//! into forwarding rules on a GTP-U datapath:
//!
//! - [`ie`] and [`message`] carry the PFCP codec for the IEs and messages the
//!   handler consumes and produces.
//! - [`datapath`] defines the control interface the packet-forwarding datapath
//!   must expose (add/modify/delete PDRs and FARs on a named interface) and an
//!   in-memory implementation of it.
//! - [`session`] and [`peer`] hold per-session and per-peer state.
//! - [`n4`] is the request dispatcher and rule translator: one handler per
//!   PFCP message type, each ending in exactly one transaction commit.
//!
//! ## Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use upf_n4::datapath::memory::MemoryDatapath;
//! use upf_n4::n4::N4Handler;
//!
//! let datapath = Arc::new(MemoryDatapath::new("upfgtp"));
//! let handler = N4Handler::new(datapath, "upfgtp", "10.0.0.1".parse().unwrap());
//! assert!(handler.sessions().is_empty());
//! ```
//!
//! Wire parsing errors surface as [`error::PfcpError`]; handler failures as
//! [`error::N4Error`]. Both are plain `std::error::Error` types.

pub mod datapath;
pub mod error;
pub mod ie;
pub mod message;
pub mod n4;
pub mod peer;
pub mod session;
pub mod xact;
