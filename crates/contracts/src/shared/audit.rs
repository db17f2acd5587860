use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Запись системного журнала аудита. Append-only: никогда не
/// обновляется и не удаляется.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub id: Uuid,
    /// None — анонимное/системное действие.
    #[serde(rename = "userId")]
    pub user_id: Option<Uuid>,
    pub action: String,
    #[serde(rename = "entityType")]
    pub entity_type: String,
    #[serde(rename = "entityId")]
    pub entity_id: Option<Uuid>,
    #[serde(rename = "oldValue")]
    pub old_value: Option<serde_json::Value>,
    #[serde(rename = "newValue")]
    pub new_value: Option<serde_json::Value>,
    pub reason: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditListParams {
    pub entity_type: Option<String>,
    pub entity_id: Option<Uuid>,
    pub action: Option<String>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditListResponse {
    pub items: Vec<AuditLogEntry>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub pages: u64,
}
