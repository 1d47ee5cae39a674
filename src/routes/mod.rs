pub(crate) mod auth;
pub(crate) mod car;
pub(crate) mod router;
pub(crate) mod user;
