#![allow(clippy::module_inception)]
#![allow(clippy::derive_partial_eq_without_eq)]

//! Wire types touched by out-of-band correlation: the `~service` and
//! `~thread` decorators, attachments and the out-of-band invitation.
//!
//! Field names are a compatibility surface with peer agents and follow the
//! Aries RFCs verbatim.

pub mod decorators;
pub mod error;
pub mod misc;
pub mod msg_fields;
