use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgRow};
use sqlx::Row;

use crate::core::error::Error;
use crate::store::{CarStore, UserStore};
use crate::types::request::{CarQuery, CarUpdate, NewCar};
use crate::types::response::Car;
use crate::types::{AuthorizedUser, NewUser};

const USERNAME_CONSTRAINT: &str = "users_username_key";

const CAR_COLUMNS: &str = "id, title, description, car_type, company, dealer, tags, images, \
    owner_id, created_at, updated_at";

#[derive(Clone, Debug)]
pub(crate) struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthorizedUser>, Error> {
        let user = sqlx::query(
            "SELECT id, email, username, password_hash, is_active, created_at
            FROM users
            WHERE email = $1;",
        )
        .bind(email)
        .map(map_user)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create_user(&self, user: NewUser) -> Result<AuthorizedUser, Error> {
        match sqlx::query(
            "INSERT INTO users (email, username, password_hash, is_active)
            VALUES ($1, $2, $3, TRUE)
            RETURNING id, email, username, password_hash, is_active, created_at;",
        )
        .bind(&user.email)
        .bind(&user.username)
        .bind(&user.password_hash)
        .map(map_user)
        .fetch_one(&self.pool)
        .await
        {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                match db_err.constraint() {
                    Some(USERNAME_CONSTRAINT) => Err(Error::DuplicateUsername),
                    _ => Err(Error::DuplicateEmail),
                }
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl CarStore for PgStore {
    async fn list_cars(&self, owner_id: i32, query: &CarQuery) -> Result<Vec<Car>, Error> {
        let pattern = query
            .search
            .as_deref()
            .filter(|search| !search.is_empty())
            .map(like_pattern);

        let cars = sqlx::query(&format!(
            "SELECT {CAR_COLUMNS}
            FROM cars
            WHERE owner_id = $1
            AND (
                $2::TEXT IS NULL
                OR title ILIKE $2
                OR description ILIKE $2
                OR EXISTS (SELECT 1 FROM unnest(tags) AS tag WHERE tag ILIKE $2)
            )
            ORDER BY id
            OFFSET $3
            LIMIT $4;"
        ))
        .bind(owner_id)
        .bind(pattern)
        .bind(i64::from(query.skip))
        // LIMIT NULL is no limit
        .bind((query.limit > 0).then(|| i64::from(query.limit)))
        .map(map_car)
        .fetch_all(&self.pool)
        .await?;

        Ok(cars)
    }

    async fn get_car(&self, id: i32) -> Result<Option<Car>, Error> {
        let car = sqlx::query(&format!("SELECT {CAR_COLUMNS} FROM cars WHERE id = $1;"))
            .bind(id)
            .map(map_car)
            .fetch_optional(&self.pool)
            .await?;

        Ok(car)
    }

    async fn create_car(&self, owner_id: i32, car: NewCar) -> Result<Car, Error> {
        let car = sqlx::query(&format!(
            "INSERT INTO cars (title, description, car_type, company, dealer, tags, images, owner_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {CAR_COLUMNS};"
        ))
        .bind(car.title)
        .bind(car.description)
        .bind(car.car_type)
        .bind(car.company)
        .bind(car.dealer)
        .bind(car.tags)
        .bind(car.images)
        .bind(owner_id)
        .map(map_car)
        .fetch_one(&self.pool)
        .await?;

        Ok(car)
    }

    async fn update_car(&self, id: i32, changes: CarUpdate) -> Result<Option<Car>, Error> {
        let car = sqlx::query(&format!(
            "UPDATE cars SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                car_type = COALESCE($4, car_type),
                company = COALESCE($5, company),
                dealer = COALESCE($6, dealer),
                tags = COALESCE($7, tags),
                images = COALESCE($8, images),
                updated_at = now()
            WHERE id = $1
            RETURNING {CAR_COLUMNS};"
        ))
        .bind(id)
        .bind(changes.title)
        .bind(changes.description)
        .bind(changes.car_type)
        .bind(changes.company)
        .bind(changes.dealer)
        .bind(changes.tags)
        .bind(changes.images)
        .map(map_car)
        .fetch_optional(&self.pool)
        .await?;

        Ok(car)
    }

    async fn delete_car(&self, id: i32) -> Result<bool, Error> {
        let result = sqlx::query("DELETE FROM cars WHERE id = $1;")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Substring pattern for `ILIKE`, with LIKE wildcards in the input escaped.
fn like_pattern(search: &str) -> String {
    let escaped = search
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");

    format!("%{escaped}%")
}

fn map_user(row: PgRow) -> AuthorizedUser {
    AuthorizedUser {
        id: row.get("id"),
        email: row.get("email"),
        username: row.get("username"),
        password_hash: row.get("password_hash"),
        is_active: row.get("is_active"),
        created_at: row.get("created_at"),
    }
}

fn map_car(row: PgRow) -> Car {
    Car {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        car_type: row.get("car_type"),
        company: row.get("company"),
        dealer: row.get("dealer"),
        tags: row.get("tags"),
        images: row.get("images"),
        owner_id: row.get("owner_id"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
