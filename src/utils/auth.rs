use axum::extract::{Request, State};
use axum::http::{header, HeaderMap};
use axum::middleware::Next;
use axum::response::Response;

use crate::core::error::Error;
use crate::core::state::AppState;
use crate::types::AuthorizedUser;

/// Rejects the request unless it resolves to a stored user, which is then
/// available to handlers as `Extension<AuthorizedUser>`.
pub(crate) async fn authorize(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Error> {
    let user = resolve_identity(&state, request.headers()).await?;

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

pub(crate) async fn resolve_identity(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<AuthorizedUser, Error> {
    let token = match bearer_token(headers) {
        Some(token) => token,
        None => match &state.session {
            Some(session) => session.fetch().await.ok_or(Error::Unauthenticated)?,
            None => return Err(Error::Unauthenticated),
        },
    };

    let email = state.tokens.validate(&token)?;

    state
        .user_controller
        .get_user_by_email(&email)
        .await?
        .ok_or(Error::UserNotFound)
}

/// Anything other than `Bearer <token>` counts as no token at all.
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let auth_header = headers.get(header::AUTHORIZATION)?.to_str().ok()?;

    let mut parts = auth_header.split_whitespace();

    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => {
            Some(token.to_owned())
        }
        _ => None,
    }
}
