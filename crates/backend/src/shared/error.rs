use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Ошибки бизнес-слоя с машиночитаемым kind.
///
/// Каждый вариант несет достаточно контекста, чтобы вызывающая сторона
/// могла действовать: какой гейт не прошел, какое поле конфликтует.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    #[error("forbidden: {detail}")]
    Forbidden { detail: String },

    /// Не выполнено бизнес-предусловие; `gate` — имя непройденного гейта.
    #[error("precondition failed ({gate}): {detail}")]
    PreconditionFailed { gate: &'static str, detail: String },

    #[error("conflict: {detail}")]
    Conflict { detail: String },

    #[error("external dependency unavailable: {detail}")]
    Unavailable { detail: String },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn not_found(entity: &'static str) -> Self {
        AppError::NotFound { entity }
    }

    pub fn forbidden(detail: impl Into<String>) -> Self {
        AppError::Forbidden {
            detail: detail.into(),
        }
    }

    pub fn precondition(gate: &'static str, detail: impl Into<String>) -> Self {
        AppError::PreconditionFailed {
            gate,
            detail: detail.into(),
        }
    }

    pub fn conflict(detail: impl Into<String>) -> Self {
        AppError::Conflict {
            detail: detail.into(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AppError::NotFound { .. } => "not_found",
            AppError::Forbidden { .. } => "forbidden",
            AppError::PreconditionFailed { .. } => "precondition_failed",
            AppError::Conflict { .. } => "conflict",
            AppError::Unavailable { .. } => "unavailable",
            AppError::Internal(_) => "internal",
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AppError::PreconditionFailed { .. } => StatusCode::BAD_REQUEST,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        AppError::Internal(anyhow::Error::new(err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(self, AppError::Internal(_)) {
            tracing::error!("internal error: {:#}", self);
        }

        let mut body = json!({
            "kind": self.kind(),
            "detail": self.to_string(),
        });
        if let AppError::PreconditionFailed { gate, .. } = &self {
            body["gate"] = json!(gate);
        }

        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_are_stable() {
        assert_eq!(AppError::not_found("application").kind(), "not_found");
        assert_eq!(AppError::forbidden("nope").kind(), "forbidden");
        assert_eq!(
            AppError::precondition("agreed_visit", "visit not scheduled").kind(),
            "precondition_failed"
        );
        assert_eq!(AppError::conflict("version mismatch").kind(), "conflict");
    }

    #[test]
    fn test_precondition_carries_gate() {
        let err = AppError::precondition("agreed_visit", "visit not scheduled");
        match err {
            AppError::PreconditionFailed { gate, .. } => assert_eq!(gate, "agreed_visit"),
            _ => panic!("wrong variant"),
        }
    }
}
