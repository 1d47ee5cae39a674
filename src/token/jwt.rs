use std::str::FromStr;

use chrono::{DateTime, Duration, SubsecRound, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::core::error::{ConfigError, Error};
use crate::token::TokenError;

const ISSUER: &str = "carlot";

#[derive(Deserialize, Serialize, Debug)]
pub(crate) struct Claims {
    pub(crate) exp: i64,
    pub(crate) iat: i64,
    pub(crate) sub: String,
    pub(crate) iss: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct IssuedToken {
    pub(crate) token: String,
    pub(crate) expires_at: DateTime<Utc>,
}

/// Signs and verifies bearer tokens with a single server secret.
#[derive(Clone)]
pub(crate) struct TokenKeys {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl: Duration,
}

impl std::fmt::Debug for TokenKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenKeys")
            .field("algorithm", &self.algorithm)
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl TokenKeys {
    pub(crate) fn new(secret: &str, algorithm: &str, ttl: Duration) -> Result<Self, ConfigError> {
        if secret.is_empty() {
            return Err(ConfigError::MissingSecret);
        }

        let algorithm = match Algorithm::from_str(algorithm) {
            Ok(alg @ (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)) => alg,
            _ => return Err(ConfigError::UnsupportedAlgorithm(algorithm.to_owned())),
        };

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            algorithm,
            ttl,
        })
    }

    pub(crate) fn ttl(&self) -> Duration {
        self.ttl
    }

    pub(crate) fn issue(&self, subject: &str, ttl: Duration) -> Result<IssuedToken, Error> {
        self.issue_at(subject, ttl, Utc::now())
    }

    pub(crate) fn issue_at(
        &self,
        subject: &str,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, Error> {
        // whole seconds, so the recorded expiry and the `exp` claim agree
        let expires_at = (now + ttl).trunc_subsecs(0);

        let claims = Claims {
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
            sub: subject.to_owned(),
            iss: ISSUER.into(),
        };

        let token = jsonwebtoken::encode(&Header::new(self.algorithm), &claims, &self.encoding_key)?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Returns the subject of a valid token.
    pub(crate) fn validate(&self, token: &str) -> Result<String, TokenError> {
        self.validate_at(token, Utc::now())
    }

    pub(crate) fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.set_issuer(&[ISSUER]);
        // expiry is checked below against `now`
        validation.validate_exp = false;
        validation.leeway = 0;

        let token_data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    TokenError::InvalidSignature
                }
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            })?;

        if now.timestamp() >= token_data.claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(token_data.claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(secret: &str) -> TokenKeys {
        TokenKeys::new(secret, "HS256", Duration::minutes(30)).unwrap()
    }

    #[test]
    fn test_issue_and_validate() {
        let keys = keys("secret");

        let issued = keys.issue("a@x.com", keys.ttl()).unwrap();

        assert_eq!(keys.validate(&issued.token), Ok("a@x.com".to_string()));
        assert!(issued.expires_at > Utc::now());
    }

    #[test]
    fn test_expiry_boundary() {
        let keys = keys("secret");
        let now = Utc::now();
        let ttl = Duration::seconds(60);

        let issued = keys.issue_at("a@x.com", ttl, now).unwrap();

        assert!(keys.validate_at(&issued.token, now + Duration::seconds(59)).is_ok());
        assert_eq!(
            keys.validate_at(&issued.token, now + Duration::seconds(61)),
            Err(TokenError::Expired)
        );
        assert_eq!(
            keys.validate_at(&issued.token, now + ttl),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_expiry_matches_recorded_expiry() {
        let keys = keys("secret");
        let now = DateTime::from_timestamp(1_700_000_000, 900_000_000).unwrap();

        let issued = keys.issue_at("a@x.com", Duration::seconds(60), now).unwrap();

        assert_eq!(issued.expires_at.timestamp_subsec_nanos(), 0);
        assert!(
            keys.validate_at(&issued.token, issued.expires_at - Duration::milliseconds(500))
                .is_ok()
        );
        assert_eq!(
            keys.validate_at(&issued.token, issued.expires_at),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_foreign_secret_is_rejected() {
        let issued = keys("one").issue("a@x.com", Duration::minutes(5)).unwrap();

        assert_eq!(
            keys("two").validate(&issued.token),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_algorithm_confusion_is_rejected() {
        let strong = TokenKeys::new("secret", "HS512", Duration::minutes(5)).unwrap();
        let issued = strong.issue("a@x.com", Duration::minutes(5)).unwrap();

        assert_eq!(
            keys("secret").validate(&issued.token),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_garbage_is_malformed() {
        assert_eq!(keys("secret").validate("not-a-token"), Err(TokenError::Malformed));
        assert_eq!(keys("secret").validate(""), Err(TokenError::Malformed));
    }

    #[test]
    fn test_rejects_bad_configuration() {
        assert!(matches!(
            TokenKeys::new("", "HS256", Duration::minutes(5)),
            Err(ConfigError::MissingSecret)
        ));
        assert!(matches!(
            TokenKeys::new("secret", "RS256", Duration::minutes(5)),
            Err(ConfigError::UnsupportedAlgorithm(_))
        ));
        assert!(matches!(
            TokenKeys::new("secret", "none", Duration::minutes(5)),
            Err(ConfigError::UnsupportedAlgorithm(_))
        ));
    }
}
