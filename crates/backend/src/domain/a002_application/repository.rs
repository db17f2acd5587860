use chrono::Utc;
use contracts::domain::a002_application::{
    Application, ApplicationId, ApplicationListParams, Checklist,
};
use contracts::domain::common::EntityMetadata;
use contracts::enums::{ApplicationStatus, ContactStatus, RejectionReason};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_applications")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub client_id: String,
    pub car_id: String,
    pub operator_id: Option<String>,
    pub manager_id: Option<String>,
    pub source_price_snapshot: String,
    pub markup_percent: String,
    pub final_price: String,
    pub status: String,
    pub contact_status: String,
    pub checklist: String,
    pub rejection_reason: Option<String>,
    pub rejection_note: Option<String>,
    pub operator_comment: Option<String>,
    pub internal_note: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    /// Оптимистическая блокировка: апдейт фильтруется по ожидаемой версии.
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Application {
    fn from(m: Model) -> Self {
        let now = Utc::now();
        Application {
            id: ApplicationId::new(Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4())),
            client_id: Uuid::parse_str(&m.client_id).unwrap_or_default(),
            car_id: Uuid::parse_str(&m.car_id).unwrap_or_default(),
            operator_id: m.operator_id.and_then(|s| Uuid::parse_str(&s).ok()),
            manager_id: m.manager_id.and_then(|s| Uuid::parse_str(&s).ok()),
            source_price_snapshot: Decimal::from_str(&m.source_price_snapshot)
                .unwrap_or_default(),
            markup_percent: Decimal::from_str(&m.markup_percent).unwrap_or_default(),
            final_price: Decimal::from_str(&m.final_price).unwrap_or_default(),
            status: ApplicationStatus::from_code(&m.status).unwrap_or(ApplicationStatus::New),
            contact_status: ContactStatus::from_code(&m.contact_status)
                .unwrap_or(ContactStatus::NotTouched),
            checklist: serde_json::from_str::<Checklist>(&m.checklist).unwrap_or_default(),
            rejection_reason: m
                .rejection_reason
                .as_deref()
                .and_then(RejectionReason::from_code),
            rejection_note: m.rejection_note,
            operator_comment: m.operator_comment,
            internal_note: m.internal_note,
            metadata: EntityMetadata {
                created_at: m.created_at.and_then(|s| s.parse().ok()).unwrap_or(now),
                updated_at: m.updated_at.and_then(|s| s.parse().ok()).unwrap_or(now),
                version: m.version,
            },
        }
    }
}

fn to_active_model(app: &Application) -> ActiveModel {
    ActiveModel {
        id: Set(app.id.value().to_string()),
        client_id: Set(app.client_id.to_string()),
        car_id: Set(app.car_id.to_string()),
        operator_id: Set(app.operator_id.map(|u| u.to_string())),
        manager_id: Set(app.manager_id.map(|u| u.to_string())),
        source_price_snapshot: Set(app.source_price_snapshot.to_string()),
        markup_percent: Set(app.markup_percent.to_string()),
        final_price: Set(app.final_price.to_string()),
        status: Set(app.status.code().to_string()),
        contact_status: Set(app.contact_status.code().to_string()),
        checklist: Set(serde_json::to_string(&app.checklist).unwrap_or_else(|_| "{}".to_string())),
        rejection_reason: Set(app.rejection_reason.map(|r| r.code().to_string())),
        rejection_note: Set(app.rejection_note.clone()),
        operator_comment: Set(app.operator_comment.clone()),
        internal_note: Set(app.internal_note.clone()),
        created_at: Set(Some(app.metadata.created_at.to_rfc3339())),
        updated_at: Set(Some(app.metadata.updated_at.to_rfc3339())),
        version: Set(app.metadata.version),
    }
}

pub async fn get_by_id(id: Uuid) -> Result<Option<Application>, DbErr> {
    get_by_id_txn(get_connection(), id).await
}

pub async fn get_by_id_txn<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
) -> Result<Option<Application>, DbErr> {
    let found = Entity::find_by_id(id.to_string()).one(conn).await?;
    Ok(found.map(Into::into))
}

pub async fn insert_txn<C: ConnectionTrait>(conn: &C, app: &Application) -> Result<(), DbErr> {
    to_active_model(app).insert(conn).await?;
    Ok(())
}

/// Апдейт с проверкой версии: пишется `expected_version + 1`, строка
/// находится по (id, expected_version). Ноль затронутых строк означает,
/// что заявку параллельно изменили.
pub async fn update_versioned_txn<C: ConnectionTrait>(
    conn: &C,
    app: &Application,
    expected_version: i32,
) -> Result<u64, DbErr> {
    let mut active = to_active_model(app);
    active.version = Set(expected_version + 1);

    let result = Entity::update_many()
        .set(active)
        .filter(Column::Id.eq(app.id.value().to_string()))
        .filter(Column::Version.eq(expected_version))
        .exec(conn)
        .await?;

    Ok(result.rows_affected)
}

pub async fn list(
    params: &ApplicationListParams,
    actor_id: Uuid,
) -> Result<(Vec<Application>, u64), DbErr> {
    let conn = get_connection();

    let mut query = Entity::find().order_by_desc(Column::CreatedAt);

    if let Some(status) = params.status {
        query = query.filter(Column::Status.eq(status.code()));
    }
    if let Some(contact_status) = params.contact_status {
        query = query.filter(Column::ContactStatus.eq(contact_status.code()));
    }
    if let Some(client_id) = params.client_id {
        query = query.filter(Column::ClientId.eq(client_id.to_string()));
    }
    if let Some(operator_id) = params.operator_id {
        query = query.filter(Column::OperatorId.eq(operator_id.to_string()));
    }
    if params.my_only.unwrap_or(false) {
        query = query.filter(
            Column::OperatorId
                .eq(actor_id.to_string())
                .or(Column::ManagerId.eq(actor_id.to_string())),
        );
    }
    if params.unassigned.unwrap_or(false) {
        query = query.filter(Column::OperatorId.is_null());
    }
    if let Some(date_from) = params.date_from {
        query = query.filter(Column::CreatedAt.gte(date_from.to_rfc3339()));
    }
    if let Some(date_to) = params.date_to {
        query = query.filter(Column::CreatedAt.lte(date_to.to_rfc3339()));
    }

    let page = params.page.unwrap_or(1).max(1);
    let per_page = params.per_page.unwrap_or(20).clamp(1, 100);

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
