use axum::{
    Json, Router,
    extract::{MatchedPath, Request},
    http::{HeaderValue, Method, header},
    middleware,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{self, CorsLayer},
    trace::TraceLayer,
};
use tracing::info_span;

use crate::core::error::ConfigError;
use crate::core::state::AppState;
use crate::routes::{auth, car, user};
use crate::types::response::Message;
use crate::utils;

pub(crate) fn routes(state: AppState, cors: CorsLayer) -> Router {
    // /api/cars/...
    let car_router = Router::new()
        .route("/cars/", get(car::get_all).post(car::post))
        .route("/cars/{id}", get(car::get).put(car::put).delete(car::delete))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            utils::auth::authorize,
        ));

    let api_router = Router::new()
        .route("/users/", post(user::register))
        .route("/token", post(auth::login))
        .route("/logout", post(auth::logout))
        .merge(car_router);

    Router::new()
        .route(
            "/",
            get(|| async { Json(Message::new("Welcome to the Car Management System API")) }),
        )
        .nest("/api", api_router)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                        let matched_path = request
                            .extensions()
                            .get::<MatchedPath>()
                            .map(MatchedPath::as_str);

                        info_span!(
                            "request",
                            method = ?request.method(),
                            matched_path,
                        )
                    }),
                )
                .layer(cors),
        )
}

pub(crate) fn cors_layer(origins: Option<Vec<String>>) -> Result<CorsLayer, ConfigError> {
    let methods = [Method::GET, Method::POST, Method::PUT, Method::DELETE];

    let Some(origins) = origins else {
        return Ok(CorsLayer::new()
            .allow_methods(methods)
            .allow_headers(cors::Any)
            .allow_origin(cors::Any));
    };

    let origins = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|_| ConfigError::InvalidOrigin(origin.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_methods(methods)
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_origin(origins)
        .allow_credentials(true))
}
