use axum::extract::{Path, Query};
use axum::Json;
use contracts::domain::a001_car::{Car, CarListParams, CarListResponse, CarView};
use contracts::enums::Role;
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::a001_car::service;
use crate::shared::error::AppError;
use crate::system::auth::extractor::CurrentUser;

pub async fn list(
    current: CurrentUser,
    Query(params): Query<CarListParams>,
) -> Result<Json<CarListResponse>, AppError> {
    let response = service::list(params, current.role()).await?;
    Ok(Json(response))
}

pub async fn get_by_id(
    current: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<CarView>, AppError> {
    let view = service::get(id, current.role()).await?;
    Ok(Json(view))
}

pub async fn create(current: CurrentUser, Json(car): Json<Car>) -> Result<Json<CarView>, AppError> {
    if current.role() < Role::Manager {
        return Err(AppError::forbidden("manager rank required"));
    }
    let actor = current
        .user_id()
        .map_err(|_| AppError::forbidden("invalid token subject"))?;
    let view = service::create(car, actor).await?;
    Ok(Json(view))
}

pub async fn update(current: CurrentUser, Json(car): Json<Car>) -> Result<Json<CarView>, AppError> {
    if current.role() < Role::Manager {
        return Err(AppError::forbidden("manager rank required"));
    }
    let view = service::update(car).await?;
    Ok(Json(view))
}

#[derive(Debug, Deserialize)]
pub struct SetActiveDto {
    pub is_active: bool,
}

pub async fn set_active(
    current: CurrentUser,
    Path(id): Path<Uuid>,
    Json(dto): Json<SetActiveDto>,
) -> Result<Json<serde_json::Value>, AppError> {
    if current.role() < Role::Manager {
        return Err(AppError::forbidden("manager rank required"));
    }
    let actor = current
        .user_id()
        .map_err(|_| AppError::forbidden("invalid token subject"))?;
    service::set_active(id, dto.is_active, actor).await?;
    Ok(Json(serde_json::json!({ "ok": true })))
}
