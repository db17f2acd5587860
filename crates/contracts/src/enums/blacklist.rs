use serde::{Deserialize, Serialize};

/// Тип блокировки телефона.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    Days7,
    Days30,
    Permanent,
}

impl BlockType {
    pub fn code(&self) -> &'static str {
        match self {
            BlockType::Days7 => "days_7",
            BlockType::Days30 => "days_30",
            BlockType::Permanent => "permanent",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "days_7" => Some(BlockType::Days7),
            "days_30" => Some(BlockType::Days30),
            "permanent" => Some(BlockType::Permanent),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlacklistReason {
    NoShow,
    RejectedAfterConfirm,
    FakeData,
    Other,
}

impl BlacklistReason {
    pub fn code(&self) -> &'static str {
        match self {
            BlacklistReason::NoShow => "no_show",
            BlacklistReason::RejectedAfterConfirm => "rejected_after_confirm",
            BlacklistReason::FakeData => "fake_data",
            BlacklistReason::Other => "other",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "no_show" => Some(BlacklistReason::NoShow),
            "rejected_after_confirm" => Some(BlacklistReason::RejectedAfterConfirm),
            "fake_data" => Some(BlacklistReason::FakeData),
            "other" => Some(BlacklistReason::Other),
            _ => None,
        }
    }
}
