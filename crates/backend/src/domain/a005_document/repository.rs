use chrono::Utc;
use contracts::domain::a005_document::Document;
use contracts::enums::DocumentType;
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a005_documents")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub application_id: String,
    pub doc_type: String,
    pub file_path: String,
    pub original_filename: String,
    pub mime_type: Option<String>,
    pub file_hash: String,
    pub uploaded_by: String,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Document {
    fn from(m: Model) -> Self {
        Document {
            id: Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4()),
            application_id: Uuid::parse_str(&m.application_id).unwrap_or_default(),
            doc_type: DocumentType::from_code(&m.doc_type).unwrap_or(DocumentType::Other),
            file_path: m.file_path,
            original_filename: m.original_filename,
            mime_type: m.mime_type,
            file_hash: m.file_hash,
            uploaded_by: Uuid::parse_str(&m.uploaded_by).unwrap_or_default(),
            created_at: m.created_at.parse().unwrap_or_else(|_| Utc::now()),
        }
    }
}

pub async fn insert(doc: &Document) -> Result<(), DbErr> {
    let conn = get_connection();
    let active = ActiveModel {
        id: Set(doc.id.to_string()),
        application_id: Set(doc.application_id.to_string()),
        doc_type: Set(doc.doc_type.code().to_string()),
        file_path: Set(doc.file_path.clone()),
        original_filename: Set(doc.original_filename.clone()),
        mime_type: Set(doc.mime_type.clone()),
        file_hash: Set(doc.file_hash.clone()),
        uploaded_by: Set(doc.uploaded_by.to_string()),
        created_at: Set(doc.created_at.to_rfc3339()),
    };
    active.insert(conn).await?;
    Ok(())
}

pub async fn get_by_id(id: Uuid) -> Result<Option<Document>, DbErr> {
    let conn = get_connection();
    let found = Entity::find_by_id(id.to_string()).one(conn).await?;
    Ok(found.map(Into::into))
}

pub async fn list_for_application(application_id: Uuid) -> Result<Vec<Document>, DbErr> {
    let conn = get_connection();
    let rows = Entity::find()
        .filter(Column::ApplicationId.eq(application_id.to_string()))
        .order_by_asc(Column::CreatedAt)
        .all(conn)
        .await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

/// Гейт перехода CONTRACT_SIGNED: есть ли у заявки документ-договор.
pub async fn has_contract_txn<C: ConnectionTrait>(
    conn: &C,
    application_id: Uuid,
) -> Result<bool, DbErr> {
    let found = Entity::find()
        .filter(Column::ApplicationId.eq(application_id.to_string()))
        .filter(Column::DocType.eq(DocumentType::Contract.code()))
        .one(conn)
        .await?;
    Ok(found.is_some())
}
