use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enums::{PaymentMethod, PaymentStatus};

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaymentId(pub Uuid);

impl PaymentId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

// ============================================================================
// Aggregate
// ============================================================================

/// Платеж по заявке. Создается как pending (счет) либо сразу confirmed
/// (авто-платеж при переходе заявки в PAID), после чего единожды
/// подтверждается или отклоняется менеджером.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    #[serde(rename = "applicationId")]
    pub application_id: Uuid,
    #[serde(rename = "invoiceNumber")]
    pub invoice_number: Option<String>,
    pub amount: Decimal,
    pub method: PaymentMethod,
    #[serde(rename = "receiptFilePath")]
    pub receipt_file_path: Option<String>,
    pub status: PaymentStatus,
    #[serde(rename = "confirmedBy")]
    pub confirmed_by: Option<Uuid>,
    #[serde(rename = "confirmedAt")]
    pub confirmed_at: Option<DateTime<Utc>>,
    #[serde(rename = "rejectionReason")]
    pub rejection_reason: Option<String>,
    #[serde(rename = "createdBy")]
    pub created_by: Uuid,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Payment {
    /// Счет на оплату, ждет подтверждения.
    pub fn new_invoice(
        application_id: Uuid,
        amount: Decimal,
        method: PaymentMethod,
        invoice_number: Option<String>,
        created_by: Uuid,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: PaymentId::new_v4(),
            application_id,
            invoice_number,
            amount,
            method,
            receipt_file_path: None,
            status: PaymentStatus::Pending,
            confirmed_by: None,
            confirmed_at: None,
            rejection_reason: None,
            created_by,
            created_at: now,
            updated_at: now,
        }
    }

    /// Авто-платеж при переводе заявки в PAID: сразу confirmed,
    /// метод по умолчанию — наличные.
    pub fn new_auto_confirmed(application_id: Uuid, amount: Decimal, actor: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: PaymentId::new_v4(),
            application_id,
            invoice_number: None,
            amount,
            method: PaymentMethod::Cash,
            receipt_file_path: None,
            status: PaymentStatus::Confirmed,
            confirmed_by: Some(actor),
            confirmed_at: Some(now),
            rejection_reason: None,
            created_by: actor,
            created_at: now,
            updated_at: now,
        }
    }
}

// ============================================================================
// DTOs
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentCreateDto {
    pub amount: Decimal,
    pub method: PaymentMethod,
    #[serde(rename = "invoiceNumber")]
    pub invoice_number: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRejectDto {
    pub reason: String,
}

/// Сводка по платежам для менеджерской панели.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentStats {
    #[serde(rename = "byStatus")]
    pub by_status: std::collections::BTreeMap<String, Decimal>,
    #[serde(rename = "totalCount")]
    pub total_count: u64,
    #[serde(rename = "totalVolume")]
    pub total_volume: Decimal,
}
