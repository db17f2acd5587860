use chrono::Utc;
use contracts::domain::a005_document::Document;
use contracts::enums::{DocumentType, Role};
use serde_json::json;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::domain::a002_application;
use crate::shared::audit::{self, AuditEvent};
use crate::shared::config;
use crate::shared::data::db::get_connection;
use crate::shared::error::AppError;

use super::repository;

fn uploads_root() -> PathBuf {
    PathBuf::from(&config::get_config().uploads.dir)
}

/// Имя файла на диске не зависит от пользовательского ввода:
/// uuid + расширение исходного имени.
fn storage_name(original: &str) -> String {
    let ext = Path::new(original)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("bin");
    format!("{}.{}", Uuid::new_v4(), ext)
}

/// Сохранить загруженный документ: файл на диск, sha256 и метаданные в базу.
pub async fn upload(
    application_id: Uuid,
    doc_type: DocumentType,
    original_filename: String,
    mime_type: Option<String>,
    data: Vec<u8>,
    actor: Uuid,
    role: Role,
) -> Result<Document, AppError> {
    if !role.is_staff() {
        return Err(AppError::forbidden("staff rank required"));
    }
    if data.is_empty() {
        return Err(AppError::precondition("file", "uploaded file is empty"));
    }

    a002_application::repository::get_by_id(application_id)
        .await?
        .ok_or_else(|| AppError::not_found("application"))?;

    let file_hash = format!("{:x}", Sha256::digest(&data));

    let dir = uploads_root().join(application_id.to_string());
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| AppError::Internal(anyhow::Error::new(e)))?;
    let file_path = dir.join(storage_name(&original_filename));
    tokio::fs::write(&file_path, &data)
        .await
        .map_err(|e| AppError::Internal(anyhow::Error::new(e)))?;

    let doc = Document {
        id: Uuid::new_v4(),
        application_id,
        doc_type,
        file_path: file_path.to_string_lossy().into_owned(),
        original_filename,
        mime_type,
        file_hash,
        uploaded_by: actor,
        created_at: Utc::now(),
    };
    repository::insert(&doc).await?;

    let conn = get_connection();
    audit::service::record(
        conn,
        AuditEvent::new("document_uploaded", "document")
            .entity(doc.id)
            .user(actor)
            .new_state(json!({
                "applicationId": application_id.to_string(),
                "type": doc.doc_type.code(),
                "filename": doc.original_filename,
                "hash": doc.file_hash,
            })),
    )
    .await?;

    Ok(doc)
}

pub async fn list_for_application(
    application_id: Uuid,
    actor: Uuid,
    role: Role,
) -> Result<Vec<Document>, AppError> {
    let app = a002_application::repository::get_by_id(application_id)
        .await?
        .ok_or_else(|| AppError::not_found("application"))?;
    if !role.is_staff() && app.client_id != actor {
        return Err(AppError::forbidden("not your application"));
    }

    let items = repository::list_for_application(application_id).await?;
    Ok(items)
}

/// Отдать содержимое документа. Клиент имеет доступ только к документам
/// собственной заявки.
pub async fn download(
    id: Uuid,
    actor: Uuid,
    role: Role,
) -> Result<(Document, Vec<u8>), AppError> {
    let doc = repository::get_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("document"))?;

    let app = a002_application::repository::get_by_id(doc.application_id)
        .await?
        .ok_or_else(|| AppError::not_found("application"))?;
    if !role.is_staff() && app.client_id != actor {
        return Err(AppError::forbidden("not your application"));
    }

    let data = tokio::fs::read(&doc.file_path)
        .await
        .map_err(|_| AppError::not_found("document file"))?;
    Ok((doc, data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_name_keeps_extension_only() {
        let name = storage_name("../../etc/passwd.pdf");
        assert!(name.ends_with(".pdf"));
        assert!(!name.contains(".."));
        assert!(!name.contains('/'));
    }

    #[test]
    fn test_storage_name_without_extension() {
        let name = storage_name("contract");
        assert!(name.ends_with(".bin"));
    }
}
