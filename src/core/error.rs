use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::token::TokenError;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Database connection error: {0}")]
    DatabaseConnection(sqlx::Error),
    #[error("Database migration error: {0}")]
    DatabaseMigration(#[from] sqlx::migrate::MigrateError),
    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),
    #[error("Invalid email validation pattern: {0}")]
    Regex(#[from] regex::Error),
    #[error("Signing secret is empty")]
    MissingSecret,
    #[error("Unsupported token algorithm: {0}")]
    UnsupportedAlgorithm(String),
    #[error("Invalid CORS origin: {0}")]
    InvalidOrigin(String),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Not authenticated")]
    Unauthenticated,
    #[error("Invalid token: {0}")]
    InvalidToken(#[from] TokenError),
    #[error("User not found")]
    UserNotFound,
    #[error("Incorrect username or password")]
    InvalidCredentials,
    #[error("Email already registered")]
    DuplicateEmail,
    #[error("Username already taken")]
    DuplicateUsername,
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Car not found")]
    CarNotFound,
    #[error("Database unreachable: {0}")]
    Connectivity(sqlx::Error),
    #[error("SQL error: {0}")]
    Sql(sqlx::Error),
    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

impl From<sqlx::Error> for Error {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => Error::Connectivity(e),
            _ => Error::Sql(e),
        }
    }
}

impl Error {
    pub(crate) fn status(&self) -> StatusCode {
        match self {
            Error::Unauthenticated
            | Error::InvalidToken(_)
            | Error::UserNotFound
            | Error::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Error::DuplicateEmail | Error::DuplicateUsername => StatusCode::BAD_REQUEST,
            Error::InvalidEmail => StatusCode::UNPROCESSABLE_ENTITY,
            Error::CarNotFound => StatusCode::NOT_FOUND,
            Error::Connectivity(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::Sql(_) | Error::Bcrypt(_) | Error::Jwt(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();

        let detail = match &self {
            Error::Connectivity(_) => "Database unavailable".to_string(),
            Error::Sql(_) | Error::Bcrypt(_) | Error::Jwt(_) => {
                "Internal server error".to_string()
            }
            Error::InvalidToken(_) => "Could not validate credentials".to_string(),
            other => other.to_string(),
        };

        if status.is_server_error() {
            tracing::error!("{:?}", self);
        } else {
            tracing::debug!("Rejected request: {}", self);
        }

        let body = Json(json!({ "detail": detail }));

        if status == StatusCode::UNAUTHORIZED {
            (status, [(header::WWW_AUTHENTICATE, "Bearer")], body).into_response()
        } else {
            (status, body).into_response()
        }
    }
}
