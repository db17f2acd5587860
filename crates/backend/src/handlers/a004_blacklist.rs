use axum::extract::{Path, Query};
use axum::Json;
use contracts::domain::a004_blacklist::{
    BlacklistCreateDto, BlacklistEntry, BlacklistListResponse,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::a004_blacklist::service;
use crate::shared::error::AppError;
use crate::system::auth::extractor::CurrentUser;

#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

pub async fn list(
    current: CurrentUser,
    Query(params): Query<PageParams>,
) -> Result<Json<BlacklistListResponse>, AppError> {
    let response = service::list(params.page, params.per_page, current.role()).await?;
    Ok(Json(response))
}

pub async fn add(
    current: CurrentUser,
    Json(dto): Json<BlacklistCreateDto>,
) -> Result<Json<BlacklistEntry>, AppError> {
    let actor = current
        .user_id()
        .map_err(|_| AppError::forbidden("invalid token subject"))?;
    let entry = service::add(dto, actor, current.role()).await?;
    Ok(Json(entry))
}

pub async fn remove(
    current: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let actor = current
        .user_id()
        .map_err(|_| AppError::forbidden("invalid token subject"))?;
    service::remove(id, actor, current.role()).await?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

pub async fn remove_by_phone(
    current: CurrentUser,
    Path(phone): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let actor = current
        .user_id()
        .map_err(|_| AppError::forbidden("invalid token subject"))?;
    service::remove_by_phone(&phone, actor, current.role()).await?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

/// Быстрая проверка номера перед звонком или ручной заявкой.
pub async fn check(
    current: CurrentUser,
    Path(phone): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    if !current.role().is_staff() {
        return Err(AppError::forbidden("staff rank required"));
    }
    let (blocked, reason) = service::is_blocked(&phone).await?;
    Ok(Json(serde_json::json!({
        "phone": phone,
        "blocked": blocked,
        "reason": reason,
    })))
}
