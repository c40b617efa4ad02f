use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

pub const THREAD_DECORATOR: &str = "~thread";

/// Struct representing the `~thread` decorator from its [RFC](<https://github.com/hyperledger/aries-rfcs/blob/main/concepts/0008-message-id-and-threading/README.md>).
///
/// `thid` is optional on the wire: a message that only carries a `pthid`
/// (e.g. a handshake reuse) is its own thread.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, TypedBuilder)]
pub struct Thread {
    #[builder(default, setter(strip_option, into))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thid: Option<String>,
    #[builder(default, setter(strip_option, into))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pthid: Option<String>,
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_order: Option<u32>,
    #[builder(default, setter(strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub received_orders: Option<HashMap<String, u32>>,
}
