use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::EntityMetadata;
use crate::enums::{ApplicationStatus, ContactStatus, RejectionReason};

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub Uuid);

impl ApplicationId {
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
// Checklist
// ============================================================================

/// CRM-чеклист заявки. Набор именованных boolean-гейтов,
/// часть из них — предусловия переходов статуса.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checklist {
    #[serde(default)]
    pub confirmed_interest: bool,
    #[serde(default)]
    pub confirmed_budget: bool,
    #[serde(default)]
    pub confirmed_timeline: bool,
    #[serde(default)]
    pub agreed_visit: bool,
    #[serde(default)]
    pub agreed_contract: bool,
    #[serde(default)]
    pub test_drive: bool,
    #[serde(default)]
    pub documents: bool,
}

impl Checklist {
    pub fn is_complete(&self) -> bool {
        self.confirmed_interest
            && self.confirmed_budget
            && self.confirmed_timeline
            && self.agreed_visit
            && self.agreed_contract
            && self.test_drive
            && self.documents
    }
}

// ============================================================================
// Aggregate
// ============================================================================

/// Заявка на покупку автомобиля — центральная сущность воронки продаж.
///
/// Ценовой снапшот (`source_price_snapshot`, `markup_percent`, `final_price`)
/// фиксируется один раз при создании и больше не пересчитывается,
/// даже если цена машины или наценка в настройках изменились.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    #[serde(rename = "clientId")]
    pub client_id: Uuid,
    #[serde(rename = "carId")]
    pub car_id: Uuid,
    #[serde(rename = "operatorId")]
    pub operator_id: Option<Uuid>,
    #[serde(rename = "managerId")]
    pub manager_id: Option<Uuid>,

    #[serde(rename = "sourcePriceSnapshot")]
    pub source_price_snapshot: Decimal,
    #[serde(rename = "markupPercent")]
    pub markup_percent: Decimal,
    #[serde(rename = "finalPrice")]
    pub final_price: Decimal,

    pub status: ApplicationStatus,
    #[serde(rename = "contactStatus")]
    pub contact_status: ContactStatus,
    pub checklist: Checklist,

    #[serde(rename = "rejectionReason")]
    pub rejection_reason: Option<RejectionReason>,
    #[serde(rename = "rejectionNote")]
    pub rejection_note: Option<String>,

    /// Комментарий оператора, виден персоналу. По конвенции — append-only.
    #[serde(rename = "operatorComment")]
    pub operator_comment: Option<String>,
    /// Внутренняя заметка, видна администраторам.
    #[serde(rename = "internalNote")]
    pub internal_note: Option<String>,

    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl Application {
    /// Новая заявка в начальном состоянии: NEW, колл-центр не касался,
    /// чеклист пуст.
    pub fn new_for_insert(
        client_id: Uuid,
        car_id: Uuid,
        source_price_snapshot: Decimal,
        markup_percent: Decimal,
        final_price: Decimal,
    ) -> Self {
        Self {
            id: ApplicationId::new_v4(),
            client_id,
            car_id,
            operator_id: None,
            manager_id: None,
            source_price_snapshot,
            markup_percent,
            final_price,
            status: ApplicationStatus::New,
            contact_status: ContactStatus::NotTouched,
            checklist: Checklist::default(),
            rejection_reason: None,
            rejection_note: None,
            operator_comment: None,
            internal_note: None,
            metadata: EntityMetadata::new(),
        }
    }

    /// Дописать строку к комментарию оператора (append-only).
    pub fn append_operator_comment(&mut self, at: DateTime<Utc>, note: &str) {
        let prefix = self.operator_comment.take().unwrap_or_default();
        self.operator_comment = Some(format!(
            "{}\n[{}] {}",
            prefix,
            at.format("%Y-%m-%d %H:%M:%S"),
            note
        ));
    }
}

// ============================================================================
// StatusHistory
// ============================================================================

/// Одна строка истории статусов: append-only, по строке на переход.
/// `old_status == None` только у начальной записи.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusHistoryEntry {
    pub id: Uuid,
    #[serde(rename = "applicationId")]
    pub application_id: Uuid,
    #[serde(rename = "oldStatus")]
    pub old_status: Option<ApplicationStatus>,
    #[serde(rename = "newStatus")]
    pub new_status: ApplicationStatus,
    #[serde(rename = "changedBy")]
    pub changed_by: Uuid,
    pub reason: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Comments
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationComment {
    pub id: Uuid,
    #[serde(rename = "applicationId")]
    pub application_id: Uuid,
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    pub text: String,
    /// Внутренние комментарии скрыты от клиента.
    #[serde(rename = "isInternal", default)]
    pub is_internal: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// DTOs
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationCreateDto {
    #[serde(rename = "carId")]
    pub car_id: Uuid,
}

/// Ручное создание заявки персоналом (телефонный лид, офлайн-продажа).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualApplicationCreateDto {
    #[serde(rename = "carId")]
    pub car_id: Uuid,
    #[serde(rename = "clientId")]
    pub client_id: Option<Uuid>,
    #[serde(rename = "clientPhone")]
    pub client_phone: Option<String>,
    #[serde(rename = "clientName")]
    pub client_name: Option<String>,
    pub source: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdateDto {
    pub status: ApplicationStatus,
    pub reason: Option<String>,
    #[serde(rename = "rejectionReason")]
    pub rejection_reason: Option<RejectionReason>,
    #[serde(rename = "rejectionNote")]
    pub rejection_note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactStatusUpdateDto {
    #[serde(rename = "contactStatus")]
    pub contact_status: ContactStatus,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistUpdateDto {
    pub checklist: Checklist,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignDto {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentCreateDto {
    pub text: String,
    #[serde(rename = "isInternal", default)]
    pub is_internal: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplicationListParams {
    pub status: Option<ApplicationStatus>,
    pub contact_status: Option<ContactStatus>,
    pub client_id: Option<Uuid>,
    pub operator_id: Option<Uuid>,
    pub my_only: Option<bool>,
    pub unassigned: Option<bool>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationListResponse {
    pub items: Vec<Application>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub pages: u64,
}

/// Детальная выдача: заявка + история + живая цена машины для витрины.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationDetail {
    #[serde(flatten)]
    pub application: Application,
    #[serde(rename = "statusHistory")]
    pub status_history: Vec<StatusHistoryEntry>,
    #[serde(rename = "carLivePrice")]
    pub car_live_price: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_application_initial_state() {
        let app = Application::new_for_insert(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Decimal::new(2_800_000, 2),
            Decimal::new(1200, 2),
            Decimal::new(3_136_000, 2),
        );
        assert_eq!(app.status, ApplicationStatus::New);
        assert_eq!(app.contact_status, ContactStatus::NotTouched);
        assert_eq!(app.checklist, Checklist::default());
        assert!(app.operator_id.is_none());
    }

    #[test]
    fn test_checklist_completion() {
        let mut cl = Checklist::default();
        assert!(!cl.is_complete());
        cl.confirmed_interest = true;
        cl.confirmed_budget = true;
        cl.confirmed_timeline = true;
        cl.agreed_visit = true;
        cl.agreed_contract = true;
        cl.test_drive = true;
        assert!(!cl.is_complete());
        cl.documents = true;
        assert!(cl.is_complete());
    }

    #[test]
    fn test_operator_comment_appends() {
        let mut app = Application::new_for_insert(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
        );
        let now = Utc::now();
        app.append_operator_comment(now, "первый звонок");
        app.append_operator_comment(now, "перезвонить завтра");
        let comment = app.operator_comment.unwrap();
        assert!(comment.contains("первый звонок"));
        assert!(comment.contains("перезвонить завтра"));
    }
}
