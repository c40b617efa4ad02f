//! The out-of-band correlation record and its storage.

mod repository;

use chrono::{DateTime, Utc};
use messages::{
    decorators::{attachment::Attachment, service::Service},
    msg_fields::protocols::out_of_band::invitation::Invitation,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use self::repository::OobRecordRepository;
use crate::{errors::error::prelude::*, storage::RecordTags};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OobRole {
    /// We issued the invitation.
    Sender,
    /// We are responding to somebody else's invitation.
    Receiver,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OobState {
    #[default]
    Initial,
    PrepareResponse,
    AwaitResponse,
    ReuseNotAccepted,
    ReuseAccepted,
    Done,
    Deleted,
}

impl OobState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Deleted)
    }
}

/// State of one out-of-band exchange.
///
/// Exactly one record exists per `invi_msg_id`, and at most one per
/// `(attach_thread_id, our_recipient_key)`; see [`OobRecord::UNIQUE_TAG_SETS`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OobRecord {
    pub oob_id: String,
    pub role: OobRole,
    pub state: OobState,
    pub invitation: Invitation,
    pub invi_msg_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attach_thread_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub their_service: Option<Service>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub our_recipient_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reuse_msg_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OobRecord {
    pub const RECORD_CATEGORY: &'static str = "oob_record";

    pub const TAG_INVI_MSG_ID: &'static str = "invi_msg_id";
    pub const TAG_ATTACH_THREAD_ID: &'static str = "attach_thread_id";
    pub const TAG_OUR_RECIPIENT_KEY: &'static str = "our_recipient_key";
    pub const TAG_CONNECTION_ID: &'static str = "connection_id";
    pub const TAG_REUSE_MSG_ID: &'static str = "reuse_msg_id";

    /// Tag combinations the backing store must keep unique.
    pub const UNIQUE_TAG_SETS: &'static [&'static [&'static str]] = &[
        &[Self::TAG_INVI_MSG_ID],
        &[Self::TAG_ATTACH_THREAD_ID, Self::TAG_OUR_RECIPIENT_KEY],
    ];

    fn new(role: OobRole, state: OobState, invitation: Invitation) -> Self {
        let now = Utc::now();
        Self {
            oob_id: Uuid::new_v4().to_string(),
            role,
            state,
            invi_msg_id: invitation.id.clone(),
            invitation,
            attach_thread_id: None,
            their_service: None,
            our_recipient_key: None,
            connection_id: None,
            reuse_msg_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Record for an invitation we issued, waiting for the invitee.
    pub fn new_sender(invitation: Invitation, our_recipient_key: impl Into<String>) -> Self {
        Self {
            our_recipient_key: Some(our_recipient_key.into()),
            ..Self::new(OobRole::Sender, OobState::AwaitResponse, invitation)
        }
    }

    /// Record for an invitation we received.
    pub fn new_receiver(invitation: Invitation) -> Self {
        Self::new(OobRole::Receiver, OobState::Initial, invitation)
    }

    pub fn with_our_recipient_key(mut self, key: impl Into<String>) -> Self {
        self.our_recipient_key = Some(key.into());
        self
    }

    pub fn with_connection_id(mut self, connection_id: impl Into<String>) -> Self {
        self.connection_id = Some(connection_id.into());
        self
    }

    pub fn with_state(mut self, state: OobState) -> Self {
        self.state = state;
        self
    }

    pub fn requests_attach(&self) -> &[Attachment] {
        self.invitation.requests_attach()
    }

    /// Moves the record to `state`. A terminal record can only be deleted.
    pub fn transition(&mut self, state: OobState) -> VcxOobResult<()> {
        if self.state.is_terminal() && self.state != state && state != OobState::Deleted {
            return Err(AriesVcxOobError::from_msg(
                AriesVcxOobErrorKind::InvalidState,
                format!(
                    "Out-of-band record {} is {:?} and can not move to {:?}",
                    self.oob_id, self.state, state
                ),
            ));
        }
        self.state = state;
        Ok(())
    }

    pub fn tags(&self) -> RecordTags {
        let mut tags = RecordTags::default();
        tags.add(Self::TAG_INVI_MSG_ID, self.invi_msg_id.as_str());
        tags.add_opt(Self::TAG_ATTACH_THREAD_ID, self.attach_thread_id.as_deref());
        tags.add_opt(Self::TAG_OUR_RECIPIENT_KEY, self.our_recipient_key.as_deref());
        tags.add_opt(Self::TAG_CONNECTION_ID, self.connection_id.as_deref());
        tags.add_opt(Self::TAG_REUSE_MSG_ID, self.reuse_msg_id.as_deref());
        tags
    }
}
