use axum::extract::Path;
use axum::{extract::Json, http::StatusCode};
use contracts::system::users::{ChangePasswordDto, CreateUserDto, UpdateUserDto, User};
use serde_json::{json, Value};

use crate::system::auth::extractor::CurrentUser;
use crate::system::users::service;

pub async fn list() -> Result<Json<Vec<User>>, StatusCode> {
    let users = service::list_all()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(users))
}

pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<User>, StatusCode> {
    let user = service::get_by_id(&id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(user))
}

pub async fn create(
    current: CurrentUser,
    Json(dto): Json<CreateUserDto>,
) -> Result<Json<Value>, StatusCode> {
    let user_id = service::create(dto, Some(current.0.sub.clone()))
        .await
        .map_err(|e| {
            tracing::warn!("user create failed: {e}");
            StatusCode::BAD_REQUEST
        })?;
    Ok(Json(json!({ "id": user_id })))
}

pub async fn update(
    Path(id): Path<String>,
    Json(mut dto): Json<UpdateUserDto>,
) -> Result<StatusCode, StatusCode> {
    dto.id = id;
    service::update(dto).await.map_err(|e| {
        tracing::warn!("user update failed: {e}");
        StatusCode::BAD_REQUEST
    })?;
    Ok(StatusCode::OK)
}

pub async fn delete(Path(id): Path<String>) -> Result<StatusCode, StatusCode> {
    let deleted = service::delete(&id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    if deleted {
        Ok(StatusCode::OK)
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}

pub async fn change_password(
    current: CurrentUser,
    Path(id): Path<String>,
    Json(mut dto): Json<ChangePasswordDto>,
) -> Result<StatusCode, StatusCode> {
    dto.user_id = id;
    service::change_password(dto, &current.0.sub)
        .await
        .map_err(|e| {
            tracing::warn!("password change failed: {e}");
            StatusCode::FORBIDDEN
        })?;
    Ok(StatusCode::OK)
}
