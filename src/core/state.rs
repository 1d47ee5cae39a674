use std::sync::Arc;

use crate::controllers::car::CarController;
use crate::controllers::user::UserController;
use crate::core::error::ConfigError;
use crate::store::{CarStore, UserStore};
use crate::token::{SessionCache, TokenKeys};

#[derive(Clone, Debug)]
pub(crate) struct AppState {
    pub(crate) user_controller: UserController,
    pub(crate) car_controller: CarController,
    pub(crate) tokens: TokenKeys,
    /// Only present when requests without a token may fall back to the last login.
    pub(crate) session: Option<SessionCache>,
}

impl AppState {
    pub(crate) fn new(
        users: Arc<dyn UserStore>,
        cars: Arc<dyn CarStore>,
        tokens: TokenKeys,
        bcrypt_cost: u32,
        session_fallback: bool,
    ) -> Result<Self, ConfigError> {
        Ok(AppState {
            user_controller: UserController::new(users, bcrypt_cost)?,
            car_controller: CarController::new(cars),
            tokens,
            session: session_fallback.then(SessionCache::new),
        })
    }
}
