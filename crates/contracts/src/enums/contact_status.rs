use serde::{Deserialize, Serialize};

/// Статусы прозвона колл-центра. Ортогональны статусу заявки.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactStatus {
    NotTouched,
    NoAnswer,
    Contacted,
    Callback,
    Rejected,
    ConfirmedInterest,
}

impl ContactStatus {
    pub fn code(&self) -> &'static str {
        match self {
            ContactStatus::NotTouched => "not_touched",
            ContactStatus::NoAnswer => "no_answer",
            ContactStatus::Contacted => "contacted",
            ContactStatus::Callback => "callback",
            ContactStatus::Rejected => "rejected",
            ContactStatus::ConfirmedInterest => "confirmed_interest",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "not_touched" => Some(ContactStatus::NotTouched),
            "no_answer" => Some(ContactStatus::NoAnswer),
            "contacted" => Some(ContactStatus::Contacted),
            "callback" => Some(ContactStatus::Callback),
            "rejected" => Some(ContactStatus::Rejected),
            "confirmed_interest" => Some(ContactStatus::ConfirmedInterest),
            _ => None,
        }
    }
}
