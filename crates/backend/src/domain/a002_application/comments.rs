use chrono::Utc;
use contracts::domain::a002_application::ApplicationComment;
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_application_comments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub application_id: String,
    pub user_id: String,
    pub text: String,
    pub is_internal: i32,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ApplicationComment {
    fn from(m: Model) -> Self {
        ApplicationComment {
            id: Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4()),
            application_id: Uuid::parse_str(&m.application_id).unwrap_or_default(),
            user_id: Uuid::parse_str(&m.user_id).unwrap_or_default(),
            text: m.text,
            is_internal: m.is_internal != 0,
            created_at: m.created_at.parse().unwrap_or_else(|_| Utc::now()),
        }
    }
}

pub async fn insert(comment: &ApplicationComment) -> Result<(), DbErr> {
    let conn = get_connection();
    let active = ActiveModel {
        id: Set(comment.id.to_string()),
        application_id: Set(comment.application_id.to_string()),
        user_id: Set(comment.user_id.to_string()),
        text: Set(comment.text.clone()),
        is_internal: Set(if comment.is_internal { 1 } else { 0 }),
        created_at: Set(comment.created_at.to_rfc3339()),
    };
    active.insert(conn).await?;
    Ok(())
}

/// Комментарии к заявке; внутренние видны только персоналу.
pub async fn list_for_application(
    application_id: Uuid,
    include_internal: bool,
) -> Result<Vec<ApplicationComment>, DbErr> {
    let conn = get_connection();
    let mut query = Entity::find()
        .filter(Column::ApplicationId.eq(application_id.to_string()))
        .order_by_asc(Column::CreatedAt);
    if !include_internal {
        query = query.filter(Column::IsInternal.eq(0));
    }
    let rows = query.all(conn).await?;
    Ok(rows.into_iter().map(Into::into).collect())
}
