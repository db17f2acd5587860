use chrono::Utc;
use contracts::domain::a003_payment::{Payment, PaymentId, PaymentStats};
use contracts::enums::{PaymentMethod, PaymentStatus};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseBackend, EntityTrait, QueryFilter, QueryOrder, Set,
    Statement,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use uuid::Uuid;

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a003_payments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub application_id: String,
    pub invoice_number: Option<String>,
    pub amount: String,
    pub method: String,
    pub receipt_file_path: Option<String>,
    pub status: String,
    pub confirmed_by: Option<String>,
    pub confirmed_at: Option<String>,
    pub rejection_reason: Option<String>,
    pub created_by: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Payment {
    fn from(m: Model) -> Self {
        let now = Utc::now();
        Payment {
            id: PaymentId::new(Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4())),
            application_id: Uuid::parse_str(&m.application_id).unwrap_or_default(),
            invoice_number: m.invoice_number,
            amount: Decimal::from_str(&m.amount).unwrap_or_default(),
            method: PaymentMethod::from_code(&m.method).unwrap_or(PaymentMethod::Cash),
            receipt_file_path: m.receipt_file_path,
            status: PaymentStatus::from_code(&m.status).unwrap_or(PaymentStatus::Pending),
            confirmed_by: m.confirmed_by.and_then(|s| Uuid::parse_str(&s).ok()),
            confirmed_at: m.confirmed_at.and_then(|s| s.parse().ok()),
            rejection_reason: m.rejection_reason,
            created_by: Uuid::parse_str(&m.created_by).unwrap_or_default(),
            created_at: m.created_at.and_then(|s| s.parse().ok()).unwrap_or(now),
            updated_at: m.updated_at.and_then(|s| s.parse().ok()).unwrap_or(now),
        }
    }
}

fn to_active_model(p: &Payment) -> ActiveModel {
    ActiveModel {
        id: Set(p.id.value().to_string()),
        application_id: Set(p.application_id.to_string()),
        invoice_number: Set(p.invoice_number.clone()),
        amount: Set(p.amount.to_string()),
        method: Set(p.method.code().to_string()),
        receipt_file_path: Set(p.receipt_file_path.clone()),
        status: Set(p.status.code().to_string()),
        confirmed_by: Set(p.confirmed_by.map(|u| u.to_string())),
        confirmed_at: Set(p.confirmed_at.map(|t| t.to_rfc3339())),
        rejection_reason: Set(p.rejection_reason.clone()),
        created_by: Set(p.created_by.to_string()),
        created_at: Set(Some(p.created_at.to_rfc3339())),
        updated_at: Set(Some(p.updated_at.to_rfc3339())),
    }
}

pub async fn insert_txn<C: ConnectionTrait>(conn: &C, payment: &Payment) -> Result<(), DbErr> {
    to_active_model(payment).insert(conn).await?;
    Ok(())
}

pub async fn update_txn<C: ConnectionTrait>(conn: &C, payment: &Payment) -> Result<(), DbErr> {
    to_active_model(payment).update(conn).await?;
    Ok(())
}

pub async fn get_by_id_txn<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
) -> Result<Option<Payment>, DbErr> {
    let found = Entity::find_by_id(id.to_string()).one(conn).await?;
    Ok(found.map(Into::into))
}

pub async fn get_by_id(id: Uuid) -> Result<Option<Payment>, DbErr> {
    get_by_id_txn(get_connection(), id).await
}

/// Есть ли у заявки подтвержденный платеж (гейт авто-платежа на PAID).
pub async fn has_confirmed_txn<C: ConnectionTrait>(
    conn: &C,
    application_id: Uuid,
) -> Result<bool, DbErr> {
    let found = Entity::find()
        .filter(Column::ApplicationId.eq(application_id.to_string()))
        .filter(Column::Status.eq(PaymentStatus::Confirmed.code()))
        .one(conn)
        .await?;
    Ok(found.is_some())
}

pub async fn list_for_application(application_id: Uuid) -> Result<Vec<Payment>, DbErr> {
    let conn = get_connection();
    let rows = Entity::find()
        .filter(Column::ApplicationId.eq(application_id.to_string()))
        .order_by_asc(Column::CreatedAt)
        .all(conn)
        .await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

/// Сводка по платежам. Суммы считаются в Decimal на стороне Rust:
/// SUM по текстовой колонке в sqlite шел бы через REAL и терял центы.
pub async fn stats() -> Result<PaymentStats, DbErr> {
    let conn = get_connection();
    let rows = conn
        .query_all(Statement::from_string(
            DatabaseBackend::Sqlite,
            "SELECT status, amount FROM a003_payments".to_string(),
        ))
        .await?;

    let mut by_status: BTreeMap<String, Decimal> = BTreeMap::new();
    let mut total_volume = Decimal::ZERO;
    let total_count = rows.len() as u64;

    for row in rows {
        let status: String = row.try_get("", "status")?;
        let amount_raw: String = row.try_get("", "amount")?;
        let amount = Decimal::from_str(&amount_raw).unwrap_or_default();
        *by_status.entry(status).or_insert(Decimal::ZERO) += amount;
        total_volume += amount;
    }

    Ok(PaymentStats {
        by_status,
        total_count,
        total_volume,
    })
}
