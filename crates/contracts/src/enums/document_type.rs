use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Contract,
    VideoSignature,
    Receipt,
    Invoice,
    Other,
}

impl DocumentType {
    pub fn code(&self) -> &'static str {
        match self {
            DocumentType::Contract => "contract",
            DocumentType::VideoSignature => "video_signature",
            DocumentType::Receipt => "receipt",
            DocumentType::Invoice => "invoice",
            DocumentType::Other => "other",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "contract" => Some(DocumentType::Contract),
            "video_signature" => Some(DocumentType::VideoSignature),
            "receipt" => Some(DocumentType::Receipt),
            "invoice" => Some(DocumentType::Invoice),
            "other" => Some(DocumentType::Other),
            _ => None,
        }
    }
}
