use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enums::DocumentType;

/// Загруженный артефакт (договор, видеоподпись, чек), привязан к заявке.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    #[serde(rename = "applicationId")]
    pub application_id: Uuid,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "originalFilename")]
    pub original_filename: String,
    #[serde(rename = "mimeType")]
    pub mime_type: Option<String>,
    /// SHA-256 содержимого, фиксируется при загрузке.
    #[serde(rename = "fileHash")]
    pub file_hash: String,
    #[serde(rename = "uploadedBy")]
    pub uploaded_by: Uuid,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}
