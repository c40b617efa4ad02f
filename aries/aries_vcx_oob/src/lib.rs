#![allow(clippy::result_large_err)]

//! Out-of-band message correlation for Aries agents.
//!
//! Matches inbound DIDComm messages, which carry no session identifier of
//! their own, to the out-of-band exchange they belong to, and addresses the
//! replies of connectionless exchanges.

#[macro_use]
extern crate log;

pub extern crate did_key;
pub extern crate messages;

pub mod connection;
pub mod errors;
pub mod ledger;
pub mod oob_record;
pub mod processor;
pub mod settings;
pub mod storage;
pub mod transport;
