pub mod invitation;

pub const OOB_INVITATION_TYPE: &str = "https://didcomm.org/out-of-band/1.1/invitation";
pub const OOB_HANDSHAKE_REUSE_TYPE: &str = "https://didcomm.org/out-of-band/1.1/handshake-reuse";
pub const OOB_HANDSHAKE_REUSE_ACCEPTED_TYPE: &str =
    "https://didcomm.org/out-of-band/1.1/handshake-reuse-accepted";
