use axum::extract::Path;
use axum::Json;
use contracts::domain::a003_payment::{Payment, PaymentCreateDto, PaymentRejectDto, PaymentStats};
use uuid::Uuid;

use crate::domain::a003_payment::service;
use crate::shared::error::AppError;
use crate::system::auth::extractor::CurrentUser;

fn actor(current: &CurrentUser) -> Result<Uuid, AppError> {
    current
        .user_id()
        .map_err(|_| AppError::forbidden("invalid token subject"))
}

pub async fn create_invoice(
    current: CurrentUser,
    Path(application_id): Path<Uuid>,
    Json(dto): Json<PaymentCreateDto>,
) -> Result<Json<Payment>, AppError> {
    let payment =
        service::create_invoice(application_id, dto, actor(&current)?, current.role()).await?;
    Ok(Json(payment))
}

pub async fn list_for_application(
    current: CurrentUser,
    Path(application_id): Path<Uuid>,
) -> Result<Json<Vec<Payment>>, AppError> {
    let payments = service::list_for_application(application_id, current.role()).await?;
    Ok(Json(payments))
}

pub async fn confirm(
    current: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Payment>, AppError> {
    let payment = service::confirm(id, actor(&current)?, current.role()).await?;
    Ok(Json(payment))
}

pub async fn reject(
    current: CurrentUser,
    Path(id): Path<Uuid>,
    Json(dto): Json<PaymentRejectDto>,
) -> Result<Json<Payment>, AppError> {
    let payment = service::reject(id, dto, actor(&current)?, current.role()).await?;
    Ok(Json(payment))
}

#[derive(Debug, serde::Deserialize)]
pub struct ReceiptDto {
    pub file_path: String,
}

pub async fn attach_receipt(
    current: CurrentUser,
    Path(id): Path<Uuid>,
    Json(dto): Json<ReceiptDto>,
) -> Result<Json<Payment>, AppError> {
    let payment =
        service::attach_receipt(id, dto.file_path, actor(&current)?, current.role()).await?;
    Ok(Json(payment))
}

pub async fn stats(current: CurrentUser) -> Result<Json<PaymentStats>, AppError> {
    let stats = service::stats(current.role()).await?;
    Ok(Json(stats))
}
