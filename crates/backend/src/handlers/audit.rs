use axum::extract::Query;
use axum::Json;
use contracts::shared::audit::{AuditListParams, AuditListResponse};

use crate::shared::audit::service;
use crate::shared::error::AppError;
use crate::system::auth::extractor::CurrentUser;

/// Журнал аудита. Маршрут закрыт middleware до уровня администратора,
/// но проверка продублирована на случай перестройки роутера.
pub async fn list(
    current: CurrentUser,
    Query(params): Query<AuditListParams>,
) -> Result<Json<AuditListResponse>, AppError> {
    if current.role() < contracts::enums::Role::Admin {
        return Err(AppError::forbidden("admin rank required"));
    }
    let response = service::list(params).await?;
    Ok(Json(response))
}
