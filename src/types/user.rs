use chrono::{DateTime, Utc};

/// Stored account. Not serializable so the hash cannot leak into a response.
#[derive(Clone, Debug)]
pub(crate) struct AuthorizedUser {
    pub(crate) id: i32,
    pub(crate) email: String,
    pub(crate) username: String,
    pub(crate) password_hash: String,
    pub(crate) is_active: bool,
    pub(crate) created_at: DateTime<Utc>,
}

pub(crate) struct NewUser {
    pub(crate) email: String,
    pub(crate) username: String,
    pub(crate) password_hash: String,
}
