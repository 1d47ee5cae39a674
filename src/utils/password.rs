use crate::core::error::Error;

/// Salted bcrypt digest of `plaintext` at the given cost.
pub(crate) fn hash(plaintext: &str, cost: u32) -> Result<String, Error> {
    bcrypt::hash(plaintext, cost).map_err(Error::Bcrypt)
}

/// A mismatch is `Ok(false)`; only an unreadable digest is an error.
pub(crate) fn verify(plaintext: &str, digest: &str) -> Result<bool, Error> {
    bcrypt::verify(plaintext, digest).map_err(Error::Bcrypt)
}
