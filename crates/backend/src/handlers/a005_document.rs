use axum::extract::{Multipart, Path};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::domain::a005_document::Document;
use contracts::enums::DocumentType;
use uuid::Uuid;

use crate::domain::a005_document::service;
use crate::shared::error::AppError;
use crate::system::auth::extractor::CurrentUser;

fn actor(current: &CurrentUser) -> Result<Uuid, AppError> {
    current
        .user_id()
        .map_err(|_| AppError::forbidden("invalid token subject"))
}

/// Загрузка документа к заявке. Multipart с полями `type` и `file`.
pub async fn upload(
    current: CurrentUser,
    Path(application_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<Document>, AppError> {
    let mut doc_type: Option<DocumentType> = None;
    let mut original_filename: Option<String> = None;
    let mut mime_type: Option<String> = None;
    let mut data: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::precondition("multipart", e.to_string()))?
    {
        match field.name() {
            Some("type") => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| AppError::precondition("multipart", e.to_string()))?;
                doc_type = Some(DocumentType::from_code(&raw).ok_or_else(|| {
                    AppError::precondition("document_type", format!("unknown type: {}", raw))
                })?);
            }
            Some("file") => {
                original_filename = field.file_name().map(|s| s.to_string());
                mime_type = field.content_type().map(|s| s.to_string());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::precondition("multipart", e.to_string()))?;
                data = Some(bytes.to_vec());
            }
            _ => {}
        }
    }

    let doc_type =
        doc_type.ok_or_else(|| AppError::precondition("document_type", "type field is required"))?;
    let data = data.ok_or_else(|| AppError::precondition("file", "file field is required"))?;
    let original_filename = original_filename.unwrap_or_else(|| "document".to_string());

    let doc = service::upload(
        application_id,
        doc_type,
        original_filename,
        mime_type,
        data,
        actor(&current)?,
        current.role(),
    )
    .await?;
    Ok(Json(doc))
}

pub async fn list_for_application(
    current: CurrentUser,
    Path(application_id): Path<Uuid>,
) -> Result<Json<Vec<Document>>, AppError> {
    let items =
        service::list_for_application(application_id, actor(&current)?, current.role()).await?;
    Ok(Json(items))
}

pub async fn download(
    current: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let (doc, data) = service::download(id, actor(&current)?, current.role()).await?;

    let content_type = doc
        .mime_type
        .unwrap_or_else(|| "application/octet-stream".to_string());
    let disposition = format!(
        "attachment; filename=\"{}\"",
        doc.original_filename.replace('"', "")
    );

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        data,
    )
        .into_response())
}
