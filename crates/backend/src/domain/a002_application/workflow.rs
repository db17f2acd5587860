use contracts::domain::a002_application::Application;
use contracts::enums::{ApplicationStatus, Role};

use crate::shared::error::AppError;

/// Проверка перехода статуса. Чистая функция: все внешние факты
/// (наличие договора) передаются явно, состояние не читается.
///
/// Политика гейтов:
/// - любой переход выполняет персонал (rank >= Operator);
/// - из терминального статуса переходов нет;
/// - → CONFIRMED требует checklist.agreed_visit (единственный гейт,
///   полный чеклист не требуется);
/// - → PAID требует rank >= Manager;
/// - → CONTRACT_SIGNED требует загруженный документ-договор.
pub fn check_transition(
    app: &Application,
    new_status: ApplicationStatus,
    actor_role: Role,
    has_contract_document: bool,
) -> Result<(), AppError> {
    if !actor_role.is_staff() {
        return Err(AppError::forbidden("staff rank required"));
    }

    if app.status.is_terminal() {
        return Err(AppError::conflict(format!(
            "application is in terminal status {}",
            app.status.code()
        )));
    }

    if new_status == app.status {
        return Err(AppError::conflict(format!(
            "application is already in status {}",
            new_status.code()
        )));
    }

    match new_status {
        ApplicationStatus::Confirmed => {
            if !app.checklist.agreed_visit {
                return Err(AppError::precondition(
                    "agreed_visit",
                    "visit is not agreed with the client",
                ));
            }
        }
        ApplicationStatus::Paid => {
            if actor_role < Role::Manager {
                return Err(AppError::forbidden("manager rank required for paid"));
            }
        }
        ApplicationStatus::ContractSigned => {
            if !has_contract_document {
                return Err(AppError::precondition(
                    "contract_document",
                    "no contract document uploaded for this application",
                ));
            }
        }
        _ => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_application::Checklist;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn app_with_status(status: ApplicationStatus) -> Application {
        let mut app = Application::new_for_insert(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Decimal::from(28000),
            Decimal::from(12),
            Decimal::from(31360),
        );
        app.status = status;
        app
    }

    #[test]
    fn test_client_cannot_transition() {
        let app = app_with_status(ApplicationStatus::New);
        let err = check_transition(&app, ApplicationStatus::InCallcenter, Role::Client, false)
            .unwrap_err();
        assert_eq!(err.kind(), "forbidden");
    }

    #[test]
    fn test_terminal_status_is_frozen() {
        for status in [
            ApplicationStatus::Delivered,
            ApplicationStatus::Completed,
            ApplicationStatus::Cancelled,
        ] {
            let app = app_with_status(status);
            let err = check_transition(&app, ApplicationStatus::New, Role::Admin, false)
                .unwrap_err();
            assert_eq!(err.kind(), "conflict");
        }
    }

    #[test]
    fn test_confirmed_requires_agreed_visit() {
        let mut app = app_with_status(ApplicationStatus::InCallcenter);
        let err = check_transition(&app, ApplicationStatus::Confirmed, Role::Operator, false)
            .unwrap_err();
        match err {
            AppError::PreconditionFailed { gate, .. } => assert_eq!(gate, "agreed_visit"),
            other => panic!("unexpected error: {other}"),
        }

        // Достаточно одного гейта, полный чеклист не нужен.
        app.checklist = Checklist {
            agreed_visit: true,
            ..Checklist::default()
        };
        assert!(
            check_transition(&app, ApplicationStatus::Confirmed, Role::Operator, false).is_ok()
        );
    }

    #[test]
    fn test_paid_requires_manager_rank() {
        let app = app_with_status(ApplicationStatus::WaitingPayment);
        let err = check_transition(&app, ApplicationStatus::Paid, Role::Operator, false)
            .unwrap_err();
        assert_eq!(err.kind(), "forbidden");

        assert!(check_transition(&app, ApplicationStatus::Paid, Role::Manager, false).is_ok());
        assert!(check_transition(&app, ApplicationStatus::Paid, Role::Admin, false).is_ok());
    }

    #[test]
    fn test_contract_signed_requires_document() {
        let app = app_with_status(ApplicationStatus::Paid);
        let err =
            check_transition(&app, ApplicationStatus::ContractSigned, Role::Manager, false)
                .unwrap_err();
        match err {
            AppError::PreconditionFailed { gate, .. } => assert_eq!(gate, "contract_document"),
            other => panic!("unexpected error: {other}"),
        }

        assert!(
            check_transition(&app, ApplicationStatus::ContractSigned, Role::Manager, true).is_ok()
        );
    }

    #[test]
    fn test_cancel_allowed_from_any_active_status() {
        for status in [
            ApplicationStatus::New,
            ApplicationStatus::InCallcenter,
            ApplicationStatus::WaitingVisit,
            ApplicationStatus::InTransit,
        ] {
            let app = app_with_status(status);
            assert!(
                check_transition(&app, ApplicationStatus::Cancelled, Role::Operator, false)
                    .is_ok()
            );
        }
    }

    #[test]
    fn test_same_status_is_conflict() {
        let app = app_with_status(ApplicationStatus::New);
        let err =
            check_transition(&app, ApplicationStatus::New, Role::Operator, false).unwrap_err();
        assert_eq!(err.kind(), "conflict");
    }
}
