use chrono::Utc;
use contracts::domain::a002_application::StatusHistoryEntry;
use contracts::enums::ApplicationStatus;
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::data::db::get_connection;

/// История статусов: строго append-only, по строке на переход.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_status_history")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub application_id: String,
    pub old_status: Option<String>,
    pub new_status: String,
    pub changed_by: String,
    pub reason: Option<String>,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for StatusHistoryEntry {
    fn from(m: Model) -> Self {
        StatusHistoryEntry {
            id: Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4()),
            application_id: Uuid::parse_str(&m.application_id).unwrap_or_default(),
            old_status: m.old_status.as_deref().and_then(ApplicationStatus::from_code),
            new_status: ApplicationStatus::from_code(&m.new_status)
                .unwrap_or(ApplicationStatus::New),
            changed_by: Uuid::parse_str(&m.changed_by).unwrap_or_default(),
            reason: m.reason,
            created_at: m.created_at.parse().unwrap_or_else(|_| Utc::now()),
        }
    }
}

pub async fn insert_txn<C: ConnectionTrait>(
    conn: &C,
    application_id: Uuid,
    old_status: Option<ApplicationStatus>,
    new_status: ApplicationStatus,
    changed_by: Uuid,
    reason: Option<String>,
) -> Result<(), DbErr> {
    let active = ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        application_id: Set(application_id.to_string()),
        old_status: Set(old_status.map(|s| s.code().to_string())),
        new_status: Set(new_status.code().to_string()),
        changed_by: Set(changed_by.to_string()),
        reason: Set(reason),
        created_at: Set(Utc::now().to_rfc3339()),
    };
    active.insert(conn).await?;
    Ok(())
}

pub async fn list_for_application(
    application_id: Uuid,
) -> Result<Vec<StatusHistoryEntry>, DbErr> {
    let conn = get_connection();
    let rows = Entity::find()
        .filter(Column::ApplicationId.eq(application_id.to_string()))
        .order_by_asc(Column::CreatedAt)
        .all(conn)
        .await?;
    Ok(rows.into_iter().map(Into::into).collect())
}
