use std::sync::Arc;

use crate::core::error::Error;
use crate::store::CarStore;
use crate::types::request::{CarQuery, CarUpdate, NewCar};
use crate::types::response::Car;
use crate::types::AuthorizedUser;

/// Car CRUD scoped to the calling user.
///
/// A car owned by someone else is reported exactly like a missing one.
#[derive(Clone)]
pub(crate) struct CarController {
    store: Arc<dyn CarStore>,
}

impl std::fmt::Debug for CarController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CarController").finish_non_exhaustive()
    }
}

impl CarController {
    pub(crate) fn new(store: Arc<dyn CarStore>) -> Self {
        Self { store }
    }

    pub(crate) async fn list(
        &self,
        user: &AuthorizedUser,
        query: &CarQuery,
    ) -> Result<Vec<Car>, Error> {
        self.store.list_cars(user.id, query).await
    }

    pub(crate) async fn create(&self, user: &AuthorizedUser, car: NewCar) -> Result<Car, Error> {
        let car = self.store.create_car(user.id, car).await?;

        tracing::debug!(car_id = car.id, owner_id = user.id, "Created car");

        Ok(car)
    }

    pub(crate) async fn get(&self, user: &AuthorizedUser, id: i32) -> Result<Car, Error> {
        match self.store.get_car(id).await? {
            Some(car) if car.owner_id == user.id => Ok(car),
            _ => Err(Error::CarNotFound),
        }
    }

    pub(crate) async fn update(
        &self,
        user: &AuthorizedUser,
        id: i32,
        changes: CarUpdate,
    ) -> Result<Car, Error> {
        self.get(user, id).await?;

        self.store
            .update_car(id, changes)
            .await?
            .ok_or(Error::CarNotFound)
    }

    pub(crate) async fn delete(&self, user: &AuthorizedUser, id: i32) -> Result<(), Error> {
        self.get(user, id).await?;

        match self.store.delete_car(id).await? {
            true => Ok(()),
            false => Err(Error::CarNotFound),
        }
    }
}
