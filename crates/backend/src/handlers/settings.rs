use axum::Json;
use contracts::enums::Role;
use contracts::shared::settings::{Setting, SettingUpdateDto};
use rust_decimal::Decimal;
use serde_json::json;
use std::str::FromStr;

use crate::shared::audit::{self, AuditEvent};
use crate::shared::data::db::get_connection;
use crate::shared::error::AppError;
use crate::shared::pricing::{self, MARKUP_SETTING_KEY};
use crate::shared::settings;
use crate::system::auth::extractor::CurrentUser;

/// Текущая наценка: эффективное значение плюс запись из sys_settings,
/// если она есть (иначе действует default из конфигурации).
pub async fn get_markup(current: CurrentUser) -> Result<Json<serde_json::Value>, AppError> {
    if !current.role().is_staff() {
        return Err(AppError::forbidden("staff rank required"));
    }
    let effective = pricing::get_markup_percent().await?;
    let stored = settings::get(MARKUP_SETTING_KEY).await?;
    Ok(Json(json!({
        "key": MARKUP_SETTING_KEY,
        "effective": effective,
        "setting": stored,
    })))
}

/// Смена наценки (только администратор). Уже созданных заявок не касается:
/// у них цена зафиксирована снапшотом.
pub async fn set_markup(
    current: CurrentUser,
    Json(dto): Json<SettingUpdateDto>,
) -> Result<Json<Setting>, AppError> {
    if current.role() < Role::Admin {
        return Err(AppError::forbidden("admin rank required"));
    }
    let actor = current
        .user_id()
        .map_err(|_| AppError::forbidden("invalid token subject"))?;

    let value = Decimal::from_str(dto.value.trim())
        .map_err(|_| AppError::precondition("markup", "markup must be a decimal number"))?;
    if value < Decimal::ZERO {
        return Err(AppError::precondition("markup", "markup cannot be negative"));
    }

    let old = settings::get_value(MARKUP_SETTING_KEY).await?;
    let setting = settings::set(
        MARKUP_SETTING_KEY,
        &value.to_string(),
        dto.description.as_deref(),
        Some(actor),
    )
    .await?;

    let conn = get_connection();
    audit::service::record(
        conn,
        AuditEvent::new("setting_changed", "setting")
            .user(actor)
            .old(json!({ "key": MARKUP_SETTING_KEY, "value": old }))
            .new_state(json!({ "key": MARKUP_SETTING_KEY, "value": setting.value })),
    )
    .await?;

    Ok(Json(setting))
}
