use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::dto::{
    category::{CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest},
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
    path = "/categorias",
    params(LimitOffsetParams),
    responses(
        (status = 200, description = "Page of categories", body = Page<CategoryResponse>),
        (status = 422, description = "Invalid pagination parameters")
    ),
    tag = "categorias"
)]
pub async fn list_categories(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<LimitOffsetParams>,
    mut session: DbSession,
) -> WebResult<Response> {
    params.validate()?;

    let categories = services::list_categories(session.conn()).await?;
    session.commit().await?;

    let page = paginate(categories, params.window(state.page_size)).map(CategoryResponse::from);

    Ok(Json(page).into_response())
}

#[utoipa::path(
    get,
    path = "/categorias/{id}",
    params(
        ("id" = Uuid, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Category found", body = CategoryResponse),
        (status = 404, description = "Category not found")
    ),
    tag = "categorias"
)]
pub async fn get_category(
    PathParam(id): PathParam<Uuid>,
    mut session: DbSession,
) -> WebResult<Response> {
    let category = services::get_category(session.conn(), id).await?;
    session.commit().await?;

    Ok(Json(CategoryResponse::from(category)).into_response())
}

#[utoipa::path(
    post,
    path = "/categorias",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created successfully", body = CategoryResponse),
        (status = 303, description = "A category with this name already exists"),
        (status = 422, description = "Validation error")
    ),
    tag = "categorias"
)]
pub async fn create_category(
    mut session: DbSession,
    Payload(req): Payload<CreateCategoryRequest>,
) -> WebResult<Response> {
    req.validate()?;

    let category = services::create_category(session.conn(), &req).await?;
    session.commit().await?;

    Ok((StatusCode::CREATED, Json(CategoryResponse::from(category))).into_response())
}

#[utoipa::path(
    patch,
    path = "/categorias/{id}",
    params(
        ("id" = Uuid, Path, description = "Category id")
    ),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Category updated successfully", body = CategoryResponse),
        (status = 303, description = "A category with this name already exists"),
        (status = 404, description = "Category not found"),
        (status = 422, description = "Validation error")
    ),
    tag = "categorias"
)]
pub async fn update_category(
    PathParam(id): PathParam<Uuid>,
    mut session: DbSession,
    Payload(update_req): Payload<UpdateCategoryRequest>,
) -> WebResult<Response> {
    update_req.validate()?;

    let updated = services::update_category(session.conn(), id, &update_req).await?;
    session.commit().await?;

    Ok(Json(CategoryResponse::from(updated)).into_response())
}

#[utoipa::path(
    delete,
    path = "/categorias/{id}",
    params(
        ("id" = Uuid, Path, description = "Category id")
    ),
    responses(
        (status = 204, description = "Category deleted successfully"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Category is still referenced by an athlete")
    ),
    tag = "categorias"
)]
pub async fn delete_category(
    PathParam(id): PathParam<Uuid>,
    mut session: DbSession,
) -> WebResult<Response> {
    services::delete_category(session.conn(), id).await?;
    session.commit().await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
