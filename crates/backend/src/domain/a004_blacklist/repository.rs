use chrono::Utc;
use contracts::domain::a004_blacklist::BlacklistEntry;
use contracts::enums::{BlacklistReason, BlockType};
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a004_blacklist")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Телефон уникален: на номер ровно одна запись со счетчиком страйков.
    pub phone: String,
    pub reason: String,
    pub reason_note: Option<String>,
    pub strike_count: i32,
    pub block_type: Option<String>,
    pub blocked_until: Option<String>,
    pub added_by: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for BlacklistEntry {
    fn from(m: Model) -> Self {
        let now = Utc::now();
        BlacklistEntry {
            id: Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4()),
            phone: m.phone,
            reason: BlacklistReason::from_code(&m.reason).unwrap_or(BlacklistReason::Other),
            reason_note: m.reason_note,
            strike_count: m.strike_count,
            block_type: m.block_type.as_deref().and_then(BlockType::from_code),
            blocked_until: m.blocked_until.and_then(|s| s.parse().ok()),
            added_by: m.added_by.and_then(|s| Uuid::parse_str(&s).ok()),
            created_at: m.created_at.and_then(|s| s.parse().ok()).unwrap_or(now),
            updated_at: m.updated_at.and_then(|s| s.parse().ok()).unwrap_or(now),
        }
    }
}

fn to_active_model(entry: &BlacklistEntry) -> ActiveModel {
    ActiveModel {
        id: Set(entry.id.to_string()),
        phone: Set(entry.phone.clone()),
        reason: Set(entry.reason.code().to_string()),
        reason_note: Set(entry.reason_note.clone()),
        strike_count: Set(entry.strike_count),
        block_type: Set(entry.block_type.map(|b| b.code().to_string())),
        blocked_until: Set(entry.blocked_until.map(|t| t.to_rfc3339())),
        added_by: Set(entry.added_by.map(|u| u.to_string())),
        created_at: Set(Some(entry.created_at.to_rfc3339())),
        updated_at: Set(Some(entry.updated_at.to_rfc3339())),
    }
}

pub async fn find_by_phone(phone: &str) -> Result<Option<BlacklistEntry>, DbErr> {
    let conn = get_connection();
    let found = Entity::find()
        .filter(Column::Phone.eq(phone))
        .one(conn)
        .await?;
    Ok(found.map(Into::into))
}

pub async fn get_by_id(id: Uuid) -> Result<Option<BlacklistEntry>, DbErr> {
    let conn = get_connection();
    let found = Entity::find_by_id(id.to_string()).one(conn).await?;
    Ok(found.map(Into::into))
}

pub async fn insert(entry: &BlacklistEntry) -> Result<(), DbErr> {
    let conn = get_connection();
    to_active_model(entry).insert(conn).await?;
    Ok(())
}

pub async fn update(entry: &BlacklistEntry) -> Result<(), DbErr> {
    let conn = get_connection();
    to_active_model(entry).update(conn).await?;
    Ok(())
}

pub async fn delete(id: Uuid) -> Result<u64, DbErr> {
    let conn = get_connection();
    let result = Entity::delete_by_id(id.to_string()).exec(conn).await?;
    Ok(result.rows_affected)
}

pub async fn list(page: u64, per_page: u64) -> Result<(Vec<BlacklistEntry>, u64), DbErr> {
    let conn = get_connection();
    let paginator = Entity::find()
        .order_by_desc(Column::CreatedAt)
        .paginate(conn, per_page);
    let total = paginator.num_items().await?;
    let items = paginator
        .fetch_page(page - 1)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok((items, total))
}
