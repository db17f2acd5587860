use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Версионированная системная настройка (наценка, порог страйков и т.п.).
/// Читается только через явный аксессор, не через глобальное состояние.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Setting {
    pub key: String,
    pub value: String,
    pub description: Option<String>,
    pub version: i32,
    #[serde(rename = "updatedBy")]
    pub updated_by: Option<Uuid>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingUpdateDto {
    pub value: String,
    pub description: Option<String>,
}
