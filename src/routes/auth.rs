use axum::extract::{Form, State};
use axum::Json;
use tracing::instrument;

use crate::core::error::Error;
use crate::core::state::AppState;
use crate::types::request::LoginForm;
use crate::types::response;

#[instrument(skip(state, form), fields(email = %form.username))]
pub(crate) async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<response::Token>, Error> {
    let user = state
        .user_controller
        .authenticate(&form.username, &form.password)
        .await?;

    let issued = state.tokens.issue(&user.email, state.tokens.ttl())?;

    if let Some(session) = &state.session {
        session.store(issued.clone()).await;
    }

    tracing::info!(user_id = user.id, "Issued access token");

    Ok(Json(response::Token::bearer(issued.token)))
}

#[instrument(skip(state))]
pub(crate) async fn logout(State(state): State<AppState>) -> Json<response::Message> {
    if let Some(session) = &state.session {
        session.clear().await;
    }

    Json(response::Message::new("Successfully logged out"))
}
