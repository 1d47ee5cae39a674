use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::core::error::Error;
use crate::store::{CarStore, UserStore};
use crate::types::request::{CarQuery, CarUpdate, NewCar};
use crate::types::response::Car;
use crate::types::{AuthorizedUser, NewUser};

/// In-process stand-in for `PgStore` with the same uniqueness rules.
#[derive(Debug, Default)]
pub(crate) struct MemoryStore {
    users: RwLock<Vec<AuthorizedUser>>,
    cars: RwLock<BTreeMap<i32, Car>>,
    next_car_id: RwLock<i32>,
}

impl MemoryStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthorizedUser>, Error> {
        let users = self.users.read().await;

        Ok(users.iter().find(|user| user.email == email).cloned())
    }

    async fn create_user(&self, user: NewUser) -> Result<AuthorizedUser, Error> {
        let mut users = self.users.write().await;

        if users.iter().any(|existing| existing.email == user.email) {
            return Err(Error::DuplicateEmail);
        }
        if users.iter().any(|existing| existing.username == user.username) {
            return Err(Error::DuplicateUsername);
        }

        let user = AuthorizedUser {
            id: users.len() as i32 + 1,
            email: user.email,
            username: user.username,
            password_hash: user.password_hash,
            is_active: true,
            created_at: Utc::now(),
        };
        users.push(user.clone());

        Ok(user)
    }
}

#[async_trait]
impl CarStore for MemoryStore {
    async fn list_cars(&self, owner_id: i32, query: &CarQuery) -> Result<Vec<Car>, Error> {
        let needle = query.search.as_deref().map(str::to_lowercase);
        let limit = match query.limit {
            0 => usize::MAX,
            limit => limit as usize,
        };

        let cars = self.cars.read().await;

        Ok(cars
            .values()
            .filter(|car| car.owner_id == owner_id)
            .filter(|car| needle.as_deref().is_none_or(|needle| matches(car, needle)))
            .skip(query.skip as usize)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn get_car(&self, id: i32) -> Result<Option<Car>, Error> {
        Ok(self.cars.read().await.get(&id).cloned())
    }

    async fn create_car(&self, owner_id: i32, car: NewCar) -> Result<Car, Error> {
        let mut next_id = self.next_car_id.write().await;
        *next_id += 1;

        let now = Utc::now();
        let car = Car {
            id: *next_id,
            title: car.title,
            description: car.description,
            car_type: car.car_type,
            company: car.company,
            dealer: car.dealer,
            tags: car.tags,
            images: car.images,
            owner_id,
            created_at: now,
            updated_at: now,
        };
        self.cars.write().await.insert(car.id, car.clone());

        Ok(car)
    }

    async fn update_car(&self, id: i32, changes: CarUpdate) -> Result<Option<Car>, Error> {
        let mut cars = self.cars.write().await;

        let Some(car) = cars.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(title) = changes.title {
            car.title = title;
        }
        if let Some(description) = changes.description {
            car.description = description;
        }
        if let Some(car_type) = changes.car_type {
            car.car_type = car_type;
        }
        if let Some(company) = changes.company {
            car.company = company;
        }
        if let Some(dealer) = changes.dealer {
            car.dealer = dealer;
        }
        if let Some(tags) = changes.tags {
            car.tags = tags;
        }
        if let Some(images) = changes.images {
            car.images = images;
        }
        car.updated_at = Utc::now();

        Ok(Some(car.clone()))
    }

    async fn delete_car(&self, id: i32) -> Result<bool, Error> {
        Ok(self.cars.write().await.remove(&id).is_some())
    }
}

fn matches(car: &Car, needle: &str) -> bool {
    car.title.to_lowercase().contains(needle)
        || car.description.to_lowercase().contains(needle)
        || car.tags.iter().any(|tag| tag.to_lowercase().contains(needle))
}
