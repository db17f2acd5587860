use chrono::Utc;
use contracts::shared::audit::{AuditListParams, AuditListResponse};
use sea_orm::ConnectionTrait;
use uuid::Uuid;

use crate::shared::error::AppError;

use super::repository;

/// Одно событие аудита. Собирается билдером на месте вызова:
/// `AuditEvent::new("status_change", "application").entity(id).user(actor)`.
#[derive(Debug, Default)]
pub struct AuditEvent {
    pub action: &'static str,
    pub entity_type: &'static str,
    pub entity_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub old_value: Option<serde_json::Value>,
    pub new_value: Option<serde_json::Value>,
    pub reason: Option<String>,
}

impl AuditEvent {
    pub fn new(action: &'static str, entity_type: &'static str) -> Self {
        Self {
            action,
            entity_type,
            ..Default::default()
        }
    }

    pub fn entity(mut self, id: Uuid) -> Self {
        self.entity_id = Some(id);
        self
    }

    pub fn user(mut self, id: Uuid) -> Self {
        self.user_id = Some(id);
        self
    }

    pub fn old(mut self, value: serde_json::Value) -> Self {
        self.old_value = Some(value);
        self
    }

    pub fn new_state(mut self, value: serde_json::Value) -> Self {
        self.new_value = Some(value);
        self
    }

    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

/// Записать событие аудита. Принимает любое соединение, чтобы запись
/// попадала в ту же транзакцию, что и само изменение.
pub async fn record<C: ConnectionTrait>(conn: &C, event: AuditEvent) -> Result<(), AppError> {
    let model = repository::Model {
        id: Uuid::new_v4().to_string(),
        user_id: event.user_id.map(|u| u.to_string()),
        action: event.action.to_string(),
        entity_type: event.entity_type.to_string(),
        entity_id: event.entity_id.map(|u| u.to_string()),
        old_value: event.old_value.map(|v| v.to_string()),
        new_value: event.new_value.map(|v| v.to_string()),
        reason: event.reason,
        created_at: Utc::now().to_rfc3339(),
    };
    repository::insert(conn, model).await?;
    Ok(())
}

/// Журнал аудита для администратора, с фильтрами и пагинацией.
pub async fn list(params: AuditListParams) -> Result<AuditListResponse, AppError> {
    let page = params.page.unwrap_or(1).max(1);
    let per_page = params.per_page.unwrap_or(50).clamp(1, 500);
    let (items, total) = repository::list(&params).await?;
    let pages = if total == 0 { 0 } else { (total + per_page - 1) / per_page };
    Ok(AuditListResponse {
        items,
        total,
        page,
        per_page,
        pages,
    })
}
