pub(crate) mod postgres;

#[cfg(test)]
pub(crate) mod memory;

use async_trait::async_trait;

use crate::core::error::Error;
use crate::types::request::{CarQuery, CarUpdate, NewCar};
use crate::types::response::Car;
use crate::types::{AuthorizedUser, NewUser};

pub(crate) use postgres::PgStore;

#[async_trait]
pub(crate) trait UserStore: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthorizedUser>, Error>;

    /// Fails with `DuplicateEmail` or `DuplicateUsername` on a unique clash.
    async fn create_user(&self, user: NewUser) -> Result<AuthorizedUser, Error>;
}

#[async_trait]
pub(crate) trait CarStore: Send + Sync {
    async fn list_cars(&self, owner_id: i32, query: &CarQuery) -> Result<Vec<Car>, Error>;

    async fn get_car(&self, id: i32) -> Result<Option<Car>, Error>;

    async fn create_car(&self, owner_id: i32, car: NewCar) -> Result<Car, Error>;

    async fn update_car(&self, id: i32, changes: CarUpdate) -> Result<Option<Car>, Error>;

    /// Returns whether a row was removed.
    async fn delete_car(&self, id: i32) -> Result<bool, Error>;
}
