use chrono::Utc;
use contracts::shared::audit::{AuditListParams, AuditLogEntry};
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sys_audit_log")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: Option<String>,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Option<String>,
    /// JSON-снапшоты хранятся текстом.
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub reason: Option<String>,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for AuditLogEntry {
    fn from(m: Model) -> Self {
        AuditLogEntry {
            id: Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4()),
            user_id: m.user_id.and_then(|s| Uuid::parse_str(&s).ok()),
            action: m.action,
            entity_type: m.entity_type,
            entity_id: m.entity_id.and_then(|s| Uuid::parse_str(&s).ok()),
            old_value: m.old_value.and_then(|s| serde_json::from_str(&s).ok()),
            new_value: m.new_value.and_then(|s| serde_json::from_str(&s).ok()),
            reason: m.reason,
            created_at: m.created_at.parse().unwrap_or_else(|_| Utc::now()),
        }
    }
}

/// Вставка записи аудита. Generic по соединению: вызывается и на
/// глобальном соединении, и внутри транзакции воркфлоу.
pub async fn insert<C: ConnectionTrait>(conn: &C, model: Model) -> Result<(), DbErr> {
    let active = ActiveModel {
        id: Set(model.id),
        user_id: Set(model.user_id),
        action: Set(model.action),
        entity_type: Set(model.entity_type),
        entity_id: Set(model.entity_id),
        old_value: Set(model.old_value),
        new_value: Set(model.new_value),
        reason: Set(model.reason),
        created_at: Set(model.created_at),
    };
    active.insert(conn).await?;
    Ok(())
}

pub async fn list(
    params: &AuditListParams,
) -> Result<(Vec<AuditLogEntry>, u64), DbErr> {
    let conn = get_connection();

    let mut query = Entity::find().order_by_desc(Column::CreatedAt);
    if let Some(ref entity_type) = params.entity_type {
        query = query.filter(Column::EntityType.eq(entity_type.clone()));
    }
    if let Some(entity_id) = params.entity_id {
        query = query.filter(Column::EntityId.eq(entity_id.to_string()));
    }
    if let Some(ref action) = params.action {
        query = query.filter(Column::Action.eq(action.clone()));
    }

    let page = params.page.unwrap_or(1).max(1);
    let per_page = params.per_page.unwrap_or(50).clamp(1, 500);

    let paginator = query.paginate(conn, per_page);
    let total = paginator.num_items().await?;
    let items = paginator
        .fetch_page(page - 1)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok((items, total))
}
