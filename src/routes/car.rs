use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::Extension;
use tracing::instrument;

use crate::core::error::Error;
use crate::core::state::AppState;
use crate::types::request::{CarQuery, CarUpdate, NewCar};
use crate::types::response::Car;
use crate::types::AuthorizedUser;

#[instrument(skip(state, user), fields(user_id = user.id))]
pub(crate) async fn get_all(
    State(state): State<AppState>,
    Extension(user): Extension<AuthorizedUser>,
    Query(query): Query<CarQuery>,
) -> Result<Json<Vec<Car>>, Error> {
    let cars = state.car_controller.list(&user, &query).await?;

    Ok(Json(cars))
}

#[instrument(skip(state, user, car), fields(user_id = user.id))]
pub(crate) async fn post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthorizedUser>,
    Json(car): Json<NewCar>,
) -> Result<(StatusCode, Json<Car>), Error> {
    let car = state.car_controller.create(&user, car).await?;

    Ok((StatusCode::CREATED, Json(car)))
}

#[instrument(skip(state, user), fields(user_id = user.id))]
pub(crate) async fn get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthorizedUser>,
    Path(id): Path<i32>,
) -> Result<Json<Car>, Error> {
    let car = state.car_controller.get(&user, id).await?;

    Ok(Json(car))
}

#[instrument(skip(state, user, changes), fields(user_id = user.id))]
pub(crate) async fn put(
    State(state): State<AppState>,
    Extension(user): Extension<AuthorizedUser>,
    Path(id): Path<i32>,
    Json(changes): Json<CarUpdate>,
) -> Result<Json<Car>, Error> {
    let car = state.car_controller.update(&user, id, changes).await?;

    Ok(Json(car))
}

#[instrument(skip(state, user), fields(user_id = user.id))]
pub(crate) async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthorizedUser>,
    Path(id): Path<i32>,
) -> Result<StatusCode, Error> {
    state.car_controller.delete(&user, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
