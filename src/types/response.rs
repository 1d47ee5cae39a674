use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::types::AuthorizedUser;

#[derive(Debug, Serialize)]
pub(crate) struct User {
    pub(crate) id: i32,
    pub(crate) email: String,
    pub(crate) username: String,
    pub(crate) is_active: bool,
    pub(crate) created_at: DateTime<Utc>,
}

impl From<AuthorizedUser> for User {
    fn from(user: AuthorizedUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct Token {
    pub(crate) access_token: String,
    pub(crate) token_type: &'static str,
}

impl Token {
    pub(crate) fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub(crate) struct Car {
    pub(crate) id: i32,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) car_type: String,
    pub(crate) company: String,
    pub(crate) dealer: String,
    pub(crate) tags: Vec<String>,
    pub(crate) images: Vec<String>,
    pub(crate) owner_id: i32,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub(crate) struct Message {
    pub(crate) message: String,
}

impl Message {
    pub(crate) fn new(message: &str) -> Self {
        Self {
            message: message.into(),
        }
    }
}
