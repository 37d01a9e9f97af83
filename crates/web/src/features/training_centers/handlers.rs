use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::dto::{
    common::{LimitOffsetParams, Page, paginate},
    training_center::{
        CreateTrainingCenterRequest, TrainingCenterResponse, UpdateTrainingCenterRequest,
    },
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
    path = "/centros_treinamento",
    params(LimitOffsetParams),
    responses(
        (status = 200, description = "Page of training centers", body = Page<TrainingCenterResponse>),
        (status = 422, description = "Invalid pagination parameters")
    ),
    tag = "centros_treinamento"
)]
pub async fn list_training_centers(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<LimitOffsetParams>,
    mut session: DbSession,
) -> WebResult<Response> {
    params.validate()?;

    let centers = services::list_training_centers(session.conn()).await?;
    session.commit().await?;

    let page = paginate(centers, params.window(state.page_size)).map(TrainingCenterResponse::from);

    Ok(Json(page).into_response())
}

#[utoipa::path(
    get,
    path = "/centros_treinamento/{id}",
    params(
        ("id" = Uuid, Path, description = "Training center id")
    ),
    responses(
        (status = 200, description = "Training center found", body = TrainingCenterResponse),
        (status = 404, description = "Training center not found")
    ),
    tag = "centros_treinamento"
)]
pub async fn get_training_center(
    PathParam(id): PathParam<Uuid>,
    mut session: DbSession,
) -> WebResult<Response> {
    let center = services::get_training_center(session.conn(), id).await?;
    session.commit().await?;

    Ok(Json(TrainingCenterResponse::from(center)).into_response())
}

#[utoipa::path(
    post,
    path = "/centros_treinamento",
    request_body = CreateTrainingCenterRequest,
    responses(
        (status = 201, description = "Training center created successfully", body = TrainingCenterResponse),
        (status = 303, description = "A training center with this name already exists"),
        (status = 422, description = "Validation error")
    ),
    tag = "centros_treinamento"
)]
pub async fn create_training_center(
    mut session: DbSession,
    Payload(req): Payload<CreateTrainingCenterRequest>,
) -> WebResult<Response> {
    req.validate()?;

    let center = services::create_training_center(session.conn(), &req).await?;
    session.commit().await?;

    Ok((StatusCode::CREATED, Json(TrainingCenterResponse::from(center))).into_response())
}

#[utoipa::path(
    patch,
    path = "/centros_treinamento/{id}",
    params(
        ("id" = Uuid, Path, description = "Training center id")
    ),
    request_body = UpdateTrainingCenterRequest,
    responses(
        (status = 200, description = "Training center updated successfully", body = TrainingCenterResponse),
        (status = 303, description = "A training center with this name already exists"),
        (status = 404, description = "Training center not found"),
        (status = 422, description = "Validation error")
    ),
    tag = "centros_treinamento"
)]
pub async fn update_training_center(
    PathParam(id): PathParam<Uuid>,
    mut session: DbSession,
    Payload(update_req): Payload<UpdateTrainingCenterRequest>,
) -> WebResult<Response> {
    update_req.validate()?;

    let updated = services::update_training_center(session.conn(), id, &update_req).await?;
    session.commit().await?;

    Ok(Json(TrainingCenterResponse::from(updated)).into_response())
}

#[utoipa::path(
    delete,
    path = "/centros_treinamento/{id}",
    params(
        ("id" = Uuid, Path, description = "Training center id")
    ),
    responses(
        (status = 204, description = "Training center deleted successfully"),
        (status = 404, description = "Training center not found"),
        (status = 409, description = "Training center is still referenced by an athlete")
    ),
    tag = "centros_treinamento"
)]
pub async fn delete_training_center(
    PathParam(id): PathParam<Uuid>,
    mut session: DbSession,
) -> WebResult<Response> {
    services::delete_training_center(session.conn(), id).await?;
    session.commit().await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
