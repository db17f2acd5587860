use chrono::Utc;
use contracts::domain::a003_payment::{Payment, PaymentCreateDto, PaymentRejectDto, PaymentStats};
use contracts::enums::{ApplicationStatus, PaymentStatus, Role};
use sea_orm::TransactionTrait;
use serde_json::json;
use uuid::Uuid;

use crate::domain::a002_application;
use crate::shared::audit::{self, AuditEvent};
use crate::shared::data::db::get_connection;
use crate::shared::error::AppError;

use super::repository;

/// Выставление счета по заявке.
///
/// Если заявка стоит в CONFIRMED, она тем же коммитом продвигается в
/// WAITING_PAYMENT — со строкой истории и аудитом, как любой переход.
pub async fn create_invoice(
    application_id: Uuid,
    dto: PaymentCreateDto,
    actor: Uuid,
    role: Role,
) -> Result<Payment, AppError> {
    if !role.is_staff() {
        return Err(AppError::forbidden("staff rank required"));
    }

    let conn = get_connection();
    let txn = conn.begin().await.map_err(AppError::from)?;

    let mut app = a002_application::repository::get_by_id_txn(&txn, application_id)
        .await?
        .ok_or_else(|| AppError::not_found("application"))?;

    let payment = Payment::new_invoice(
        application_id,
        dto.amount,
        dto.method,
        dto.invoice_number,
        actor,
    );
    repository::insert_txn(&txn, &payment).await?;

    audit::service::record(
        &txn,
        AuditEvent::new("payment_invoice_created", "payment")
            .entity(payment.id.value())
            .user(actor)
            .new_state(json!({
                "applicationId": application_id.to_string(),
                "amount": payment.amount.to_string(),
                "method": payment.method.code(),
                "invoiceNumber": payment.invoice_number,
            })),
    )
    .await?;

    if app.status == ApplicationStatus::Confirmed {
        let old_status = app.status;
        app.status = ApplicationStatus::WaitingPayment;
        a002_application::service::persist_status_change_txn(
            &txn,
            &mut app,
            old_status,
            actor,
            Some("invoice issued".to_string()),
        )
        .await?;
    }

    txn.commit().await.map_err(AppError::from)?;
    Ok(payment)
}

/// Подтверждение платежа (менеджер и выше). Pending-платеж подтверждается
/// ровно один раз; повторное подтверждение и работа с отклоненным
/// платежом отрезаются терминальным гейтом.
pub async fn confirm(payment_id: Uuid, actor: Uuid, role: Role) -> Result<Payment, AppError> {
    if role < Role::Manager {
        return Err(AppError::forbidden("manager rank required"));
    }

    let conn = get_connection();
    let txn = conn.begin().await.map_err(AppError::from)?;

    let mut payment = repository::get_by_id_txn(&txn, payment_id)
        .await?
        .ok_or_else(|| AppError::not_found("payment"))?;

    if payment.status.is_terminal() {
        return Err(AppError::conflict(format!(
            "payment is already {}",
            payment.status.code()
        )));
    }

    payment.status = PaymentStatus::Confirmed;
    payment.confirmed_by = Some(actor);
    payment.confirmed_at = Some(Utc::now());
    payment.updated_at = Utc::now();
    repository::update_txn(&txn, &payment).await?;

    audit::service::record(
        &txn,
        AuditEvent::new("payment_confirmed", "payment")
            .entity(payment_id)
            .user(actor)
            .old(json!({ "status": PaymentStatus::Pending.code() }))
            .new_state(json!({ "status": PaymentStatus::Confirmed.code() })),
    )
    .await?;

    txn.commit().await.map_err(AppError::from)?;
    Ok(payment)
}

pub async fn reject(
    payment_id: Uuid,
    dto: PaymentRejectDto,
    actor: Uuid,
    role: Role,
) -> Result<Payment, AppError> {
    if role < Role::Manager {
        return Err(AppError::forbidden("manager rank required"));
    }

    let conn = get_connection();
    let txn = conn.begin().await.map_err(AppError::from)?;

    let mut payment = repository::get_by_id_txn(&txn, payment_id)
        .await?
        .ok_or_else(|| AppError::not_found("payment"))?;

    if payment.status.is_terminal() {
        return Err(AppError::conflict(format!(
            "payment is already {}",
            payment.status.code()
        )));
    }

    payment.status = PaymentStatus::Rejected;
    payment.rejection_reason = Some(dto.reason.clone());
    payment.updated_at = Utc::now();
    repository::update_txn(&txn, &payment).await?;

    audit::service::record(
        &txn,
        AuditEvent::new("payment_rejected", "payment")
            .entity(payment_id)
            .user(actor)
            .old(json!({ "status": PaymentStatus::Pending.code() }))
            .new_state(json!({
                "status": PaymentStatus::Rejected.code(),
                "reason": dto.reason,
            })),
    )
    .await?;

    txn.commit().await.map_err(AppError::from)?;
    Ok(payment)
}

/// Привязка чека к платежу (файл уже сохранен документным слоем).
pub async fn attach_receipt(
    payment_id: Uuid,
    file_path: String,
    actor: Uuid,
    role: Role,
) -> Result<Payment, AppError> {
    if !role.is_staff() {
        return Err(AppError::forbidden("staff rank required"));
    }

    let conn = get_connection();
    let mut payment = repository::get_by_id(payment_id)
        .await?
        .ok_or_else(|| AppError::not_found("payment"))?;

    payment.receipt_file_path = Some(file_path);
    payment.updated_at = Utc::now();
    repository::update_txn(conn, &payment).await?;

    audit::service::record(
        conn,
        AuditEvent::new("payment_receipt_attached", "payment")
            .entity(payment_id)
            .user(actor),
    )
    .await?;

    Ok(payment)
}

pub async fn list_for_application(
    application_id: Uuid,
    role: Role,
) -> Result<Vec<Payment>, AppError> {
    if !role.is_staff() {
        return Err(AppError::forbidden("staff rank required"));
    }
    let items = repository::list_for_application(application_id).await?;
    Ok(items)
}

pub async fn stats(role: Role) -> Result<PaymentStats, AppError> {
    if role < Role::Manager {
        return Err(AppError::forbidden("manager rank required"));
    }
    let stats = repository::stats().await?;
    Ok(stats)
}
