use serde::{Deserialize, Serialize};

/// Статусы жизненного цикла заявки.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    New,
    InCallcenter,
    Confirmed,
    WaitingVisit,
    WaitingPayment,
    Paid,
    ContractSigned,
    CargoBooked,
    InTransit,
    Delivered,
    Completed,
    Cancelled,
}

impl ApplicationStatus {
    /// Терминальные статусы: дальнейшие переходы запрещены.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ApplicationStatus::Delivered
                | ApplicationStatus::Completed
                | ApplicationStatus::Cancelled
        )
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApplicationStatus::New => "new",
            ApplicationStatus::InCallcenter => "in_callcenter",
            ApplicationStatus::Confirmed => "confirmed",
            ApplicationStatus::WaitingVisit => "waiting_visit",
            ApplicationStatus::WaitingPayment => "waiting_payment",
            ApplicationStatus::Paid => "paid",
            ApplicationStatus::ContractSigned => "contract_signed",
            ApplicationStatus::CargoBooked => "cargo_booked",
            ApplicationStatus::InTransit => "in_transit",
            ApplicationStatus::Delivered => "delivered",
            ApplicationStatus::Completed => "completed",
            ApplicationStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "new" => Some(ApplicationStatus::New),
            "in_callcenter" => Some(ApplicationStatus::InCallcenter),
            "confirmed" => Some(ApplicationStatus::Confirmed),
            "waiting_visit" => Some(ApplicationStatus::WaitingVisit),
            "waiting_payment" => Some(ApplicationStatus::WaitingPayment),
            "paid" => Some(ApplicationStatus::Paid),
            "contract_signed" => Some(ApplicationStatus::ContractSigned),
            "cargo_booked" => Some(ApplicationStatus::CargoBooked),
            "in_transit" => Some(ApplicationStatus::InTransit),
            "delivered" => Some(ApplicationStatus::Delivered),
            "completed" => Some(ApplicationStatus::Completed),
            "cancelled" => Some(ApplicationStatus::Cancelled),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_statuses() {
        assert!(ApplicationStatus::Delivered.is_terminal());
        assert!(ApplicationStatus::Completed.is_terminal());
        assert!(ApplicationStatus::Cancelled.is_terminal());
        assert!(!ApplicationStatus::New.is_terminal());
        assert!(!ApplicationStatus::Paid.is_terminal());
    }

    #[test]
    fn test_code_round_trip() {
        let all = [
            ApplicationStatus::New,
            ApplicationStatus::InCallcenter,
            ApplicationStatus::Confirmed,
            ApplicationStatus::WaitingVisit,
            ApplicationStatus::WaitingPayment,
            ApplicationStatus::Paid,
            ApplicationStatus::ContractSigned,
            ApplicationStatus::CargoBooked,
            ApplicationStatus::InTransit,
            ApplicationStatus::Delivered,
            ApplicationStatus::Completed,
            ApplicationStatus::Cancelled,
        ];
        for status in all {
            assert_eq!(ApplicationStatus::from_code(status.code()), Some(status));
        }
    }
}
