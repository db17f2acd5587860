use axum::extract::{Path, Query};
use axum::Json;
use contracts::domain::a002_application::{
    Application, ApplicationComment, ApplicationCreateDto, ApplicationDetail,
    ApplicationListParams, ApplicationListResponse, AssignDto, ChecklistUpdateDto,
    CommentCreateDto, ContactStatusUpdateDto, ManualApplicationCreateDto, StatusUpdateDto,
};
use contracts::enums::Role;
use uuid::Uuid;

use crate::domain::a002_application::service;
use crate::shared::error::AppError;
use crate::system::auth::extractor::CurrentUser;

fn actor(current: &CurrentUser) -> Result<Uuid, AppError> {
    current
        .user_id()
        .map_err(|_| AppError::forbidden("invalid token subject"))
}

pub async fn create(
    current: CurrentUser,
    Json(dto): Json<ApplicationCreateDto>,
) -> Result<Json<Application>, AppError> {
    let client_id = actor(&current)?;
    let app = service::create(client_id, dto).await?;
    Ok(Json(app))
}

pub async fn create_manual(
    current: CurrentUser,
    Json(dto): Json<ManualApplicationCreateDto>,
) -> Result<Json<Application>, AppError> {
    let app = service::create_manual(dto, actor(&current)?, current.role()).await?;
    Ok(Json(app))
}

pub async fn list(
    current: CurrentUser,
    Query(params): Query<ApplicationListParams>,
) -> Result<Json<ApplicationListResponse>, AppError> {
    let response = service::list(params, actor(&current)?, current.role()).await?;
    Ok(Json(response))
}

pub async fn get_detail(
    current: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApplicationDetail>, AppError> {
    let detail = service::get_detail(id, actor(&current)?, current.role()).await?;
    Ok(Json(detail))
}

pub async fn update_status(
    current: CurrentUser,
    Path(id): Path<Uuid>,
    Json(dto): Json<StatusUpdateDto>,
) -> Result<Json<Application>, AppError> {
    let app = service::transition(id, dto, actor(&current)?, current.role()).await?;
    Ok(Json(app))
}

pub async fn update_contact_status(
    current: CurrentUser,
    Path(id): Path<Uuid>,
    Json(dto): Json<ContactStatusUpdateDto>,
) -> Result<Json<Application>, AppError> {
    let app = service::update_contact_status(id, dto, actor(&current)?, current.role()).await?;
    Ok(Json(app))
}

pub async fn update_checklist(
    current: CurrentUser,
    Path(id): Path<Uuid>,
    Json(dto): Json<ChecklistUpdateDto>,
) -> Result<Json<Application>, AppError> {
    let app = service::update_checklist(id, dto, actor(&current)?, current.role()).await?;
    Ok(Json(app))
}

pub async fn assign_operator(
    current: CurrentUser,
    Path(id): Path<Uuid>,
    Json(dto): Json<AssignDto>,
) -> Result<Json<Application>, AppError> {
    let app = service::assign(
        id,
        Role::Operator,
        dto.user_id,
        actor(&current)?,
        current.role(),
    )
    .await?;
    Ok(Json(app))
}

pub async fn assign_manager(
    current: CurrentUser,
    Path(id): Path<Uuid>,
    Json(dto): Json<AssignDto>,
) -> Result<Json<Application>, AppError> {
    let app = service::assign(
        id,
        Role::Manager,
        dto.user_id,
        actor(&current)?,
        current.role(),
    )
    .await?;
    Ok(Json(app))
}

pub async fn add_comment(
    current: CurrentUser,
    Path(id): Path<Uuid>,
    Json(dto): Json<CommentCreateDto>,
) -> Result<Json<ApplicationComment>, AppError> {
    let comment = service::add_comment(id, dto, actor(&current)?, current.role()).await?;
    Ok(Json(comment))
}

pub async fn list_comments(
    current: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ApplicationComment>>, AppError> {
    let comments = service::list_comments(id, actor(&current)?, current.role()).await?;
    Ok(Json(comments))
}
