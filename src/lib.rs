pub(crate) mod controllers;
pub(crate) mod core;
pub(crate) mod routes;
pub(crate) mod store;
pub(crate) mod token;
pub(crate) mod types;
pub(crate) mod utils;

use std::sync::Arc;
use std::time::Duration;

use config::Config;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::core::config::{parse_origins, Args};
use crate::core::error::ConfigError as Error;
use crate::core::state::AppState;
use crate::core::store::Database;
use crate::store::PgStore;
use crate::token::TokenKeys;

pub async fn run() -> Result<(), Error> {
    let config = Config::builder()
        .add_source(config::File::with_name("carlot").required(false))
        .add_source(config::Environment::with_prefix("CARLOT").try_parsing(true))
        .build()
        .map_err(Error::Config)?;

    let config = config.try_deserialize::<Args>().map_err(Error::Config)?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_new(&config.log_level).unwrap_or_default())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let tokens = TokenKeys::new(
        &config.secret,
        &config.token_algorithm,
        chrono::Duration::minutes(config.access_token_expire_minutes),
    )?;

    let cors = routes::router::cors_layer(parse_origins(&config.cors_origins))?;

    let database = Database::connect(
        &config.database_url,
        config.database_max_connections,
        Duration::from_secs(config.database_timeout_secs),
    )
    .await?;

    database.migrate().await?;

    let store = Arc::new(PgStore::new(database.handle()));

    if config.session_fallback {
        tracing::warn!("Session fallback enabled: requests without a token act as the last login");
    }

    let state = AppState::new(
        store.clone(),
        store,
        tokens,
        config.bcrypt_cost,
        config.session_fallback,
    )?;

    let app = routes::router::routes(state, cors);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .map_err(Error::IO)?;

    tracing::info!("{} listening on port {}", config.app_name, config.port);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(Error::IO);

    database.close().await;

    served
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {:?}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to listen for SIGTERM: {:?}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutting down");
}
