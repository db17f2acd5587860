use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enums::{BlacklistReason, BlockType};

/// Запись черного списка телефонов (антифрод).
///
/// Истекшая временная блокировка означает "не заблокирован",
/// но сама запись не удаляется — в ней живет счетчик страйков.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlacklistEntry {
    pub id: Uuid,
    pub phone: String,
    pub reason: BlacklistReason,
    #[serde(rename = "reasonNote")]
    pub reason_note: Option<String>,
    #[serde(rename = "strikeCount")]
    pub strike_count: i32,
    #[serde(rename = "blockType")]
    pub block_type: Option<BlockType>,
    /// None — бессрочная блокировка (или запись без активного блока).
    #[serde(rename = "blockedUntil")]
    pub blocked_until: Option<DateTime<Utc>>,
    #[serde(rename = "addedBy")]
    pub added_by: Option<Uuid>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// DTOs
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlacklistCreateDto {
    pub phone: String,
    pub reason: BlacklistReason,
    #[serde(rename = "reasonNote")]
    pub reason_note: Option<String>,
    #[serde(rename = "blockType")]
    pub block_type: BlockType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlacklistListResponse {
    pub items: Vec<BlacklistEntry>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub pages: u64,
}
