use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::dto::{
    athlete::{AthleteFilter, AthleteResponse, CreateAthleteRequest, UpdateAthleteRequest},
    common::{LimitOffsetParams, Page, paginate},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::WebResult,
    extract::{Payload, PathParam, QueryParams},
    session::DbSession,
    state::AppState,
};

use super::services;

#[utoipa::path(
    get,
    path = "/atletas",
    params(LimitOffsetParams, AthleteFilter),
    responses(
        (status = 200, description = "Page of athletes", body = Page<AthleteResponse>),
        (status = 422, description = "Invalid pagination parameters")
    ),
    tag = "atletas"
)]
pub async fn list_athletes(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<LimitOffsetParams>,
    QueryParams(filter): QueryParams<AthleteFilter>,
    mut session: DbSession,
) -> WebResult<Response> {
    params.validate()?;

    let athletes = services::list_athletes(session.conn(), &filter).await?;
    session.commit().await?;

    let page = paginate(athletes, params.window(state.page_size)).map(AthleteResponse::from);

    Ok(Json(page).into_response())
}

#[utoipa::path(
    get,
    path = "/atletas/{id}",
    params(
        ("id" = Uuid, Path, description = "Athlete id")
    ),
    responses(
        (status = 200, description = "Athlete found", body = AthleteResponse),
        (status = 404, description = "Athlete not found")
    ),
    tag = "atletas"
)]
pub async fn get_athlete(
    PathParam(id): PathParam<Uuid>,
    mut session: DbSession,
) -> WebResult<Response> {
    let athlete = services::get_athlete(session.conn(), id).await?;
    session.commit().await?;

    Ok(Json(AthleteResponse::from(athlete)).into_response())
}

#[utoipa::path(
    post,
    path = "/atletas",
    request_body = CreateAthleteRequest,
    responses(
        (status = 201, description = "Athlete created successfully", body = AthleteResponse),
        (status = 303, description = "An athlete with this CPF already exists"),
        (status = 404, description = "Category or training center not found"),
        (status = 422, description = "Validation error")
    ),
    tag = "atletas"
)]
pub async fn create_athlete(
    mut session: DbSession,
    Payload(req): Payload<CreateAthleteRequest>,
) -> WebResult<Response> {
    req.validate()?;

    let athlete = services::create_athlete(session.conn(), &req).await?;
    session.commit().await?;

    Ok((StatusCode::CREATED, Json(AthleteResponse::from(athlete))).into_response())
}

#[utoipa::path(
    patch,
    path = "/atletas/{id}",
    params(
        ("id" = Uuid, Path, description = "Athlete id")
    ),
    request_body = UpdateAthleteRequest,
    responses(
        (status = 200, description = "Athlete updated successfully", body = AthleteResponse),
        (status = 303, description = "An athlete with this CPF already exists"),
        (status = 404, description = "Athlete, category or training center not found"),
        (status = 422, description = "Validation error")
    ),
    tag = "atletas"
)]
pub async fn update_athlete(
    PathParam(id): PathParam<Uuid>,
    mut session: DbSession,
    Payload(update_req): Payload<UpdateAthleteRequest>,
) -> WebResult<Response> {
    update_req.validate()?;

    let updated = services::update_athlete(session.conn(), id, &update_req).await?;
    session.commit().await?;

    Ok(Json(AthleteResponse::from(updated)).into_response())
}

#[utoipa::path(
    delete,
    path = "/atletas/{id}",
    params(
        ("id" = Uuid, Path, description = "Athlete id")
    ),
    responses(
        (status = 204, description = "Athlete deleted successfully"),
        (status = 404, description = "Athlete not found")
    ),
    tag = "atletas"
)]
pub async fn delete_athlete(
    PathParam(id): PathParam<Uuid>,
    mut session: DbSession,
) -> WebResult<Response> {
    services::delete_athlete(session.conn(), id).await?;
    session.commit().await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
