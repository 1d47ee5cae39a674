use std::sync::Arc;

use regex::Regex;

use crate::core::error::{ConfigError, Error};
use crate::store::UserStore;
use crate::types::{AuthorizedUser, NewUser};
use crate::utils::password;

#[derive(Clone)]
pub(crate) struct UserController {
    store: Arc<dyn UserStore>,
    email_pattern: Regex,
    bcrypt_cost: u32,
}

impl std::fmt::Debug for UserController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserController")
            .field("email_pattern", &self.email_pattern.as_str())
            .field("bcrypt_cost", &self.bcrypt_cost)
            .finish()
    }
}

impl UserController {
    pub(crate) fn new(store: Arc<dyn UserStore>, bcrypt_cost: u32) -> Result<Self, ConfigError> {
        Ok(Self {
            store,
            email_pattern: Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")?,
            bcrypt_cost,
        })
    }

    pub(crate) async fn get_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<AuthorizedUser>, Error> {
        self.store.find_user_by_email(email).await
    }

    pub(crate) async fn register(
        &self,
        email: &str,
        username: &str,
        password: &str,
    ) -> Result<AuthorizedUser, Error> {
        if !self.email_pattern.is_match(email) {
            return Err(Error::InvalidEmail);
        }

        // advisory only, the unique index decides under a race
        if self.store.find_user_by_email(email).await?.is_some() {
            return Err(Error::DuplicateEmail);
        }

        let password_hash = password::hash(password, self.bcrypt_cost)?;

        let user = self
            .store
            .create_user(NewUser {
                email: email.into(),
                username: username.into(),
                password_hash,
            })
            .await?;

        tracing::info!(user_id = user.id, "Registered user");

        Ok(user)
    }

    /// Unknown email and wrong password are indistinguishable to the caller.
    pub(crate) async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthorizedUser, Error> {
        let user = self
            .store
            .find_user_by_email(email)
            .await?
            .ok_or(Error::InvalidCredentials)?;

        if let false = password::verify(password, &user.password_hash)? {
            return Err(Error::InvalidCredentials);
        }

        Ok(user)
    }
}
