use axum::extract::{Json, State};
use axum::http::StatusCode;
use tracing::instrument;

use crate::core::error::Error;
use crate::core::state::AppState;
use crate::types::request::RegisterData;
use crate::types::response;

#[instrument(skip(state, user_data), fields(email = %user_data.email))]
pub(crate) async fn register(
    State(state): State<AppState>,
    Json(user_data): Json<RegisterData>,
) -> Result<(StatusCode, Json<response::User>), Error> {
    let user = state
        .user_controller
        .register(&user_data.email, &user_data.username, &user_data.password)
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}
