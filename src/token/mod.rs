pub(crate) mod jwt;
pub(crate) mod session;

pub(crate) use jwt::{IssuedToken, TokenKeys};
pub(crate) use session::SessionCache;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("signature does not match")]
    InvalidSignature,
    #[error("token could not be parsed")]
    Malformed,
    #[error("token has expired")]
    Expired,
}
