use serde::{Deserialize, Serialize};

/// Причина отказа клиента при отмене заявки.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    Expensive,
    ChangedMind,
    NoTrust,
    NotAvailable,
    BoughtElsewhere,
    Other,
}

impl RejectionReason {
    pub fn code(&self) -> &'static str {
        match self {
            RejectionReason::Expensive => "expensive",
            RejectionReason::ChangedMind => "changed_mind",
            RejectionReason::NoTrust => "no_trust",
            RejectionReason::NotAvailable => "not_available",
            RejectionReason::BoughtElsewhere => "bought_elsewhere",
            RejectionReason::Other => "other",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "expensive" => Some(RejectionReason::Expensive),
            "changed_mind" => Some(RejectionReason::ChangedMind),
            "no_trust" => Some(RejectionReason::NoTrust),
            "not_available" => Some(RejectionReason::NotAvailable),
            "bought_elsewhere" => Some(RejectionReason::BoughtElsewhere),
            "other" => Some(RejectionReason::Other),
            _ => None,
        }
    }
}
