use anyhow::Result;
use chrono::Utc;
use contracts::shared::settings::Setting;
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};
use uuid::Uuid;

use crate::shared::data::db::get_connection;

/// Прочитать настройку по ключу.
pub async fn get(key: &str) -> Result<Option<Setting>> {
    let conn = get_connection();

    let result = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT key, value, description, version, updated_by, updated_at
             FROM sys_settings WHERE key = ?",
            [key.into()],
        ))
        .await?;

    match result {
        Some(row) => {
            let updated_by: Option<String> = row.try_get("", "updated_by")?;
            let updated_at: Option<String> = row.try_get("", "updated_at")?;
            Ok(Some(Setting {
                key: row.try_get("", "key")?,
                value: row.try_get("", "value")?,
                description: row.try_get("", "description")?,
                version: row.try_get("", "version")?,
                updated_by: updated_by.and_then(|s| Uuid::parse_str(&s).ok()),
                updated_at: updated_at
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(Utc::now),
            }))
        }
        None => Ok(None),
    }
}

pub async fn get_value(key: &str) -> Result<Option<String>> {
    Ok(get(key).await?.map(|s| s.value))
}

/// Upsert настройки с инкрементом версии.
pub async fn set(
    key: &str,
    value: &str,
    description: Option<&str>,
    updated_by: Option<Uuid>,
) -> Result<Setting> {
    let conn = get_connection();
    let now = Utc::now().to_rfc3339();

    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "INSERT INTO sys_settings (key, value, description, version, updated_by, updated_at)
         VALUES (?, ?, ?, 0, ?, ?)
         ON CONFLICT(key) DO UPDATE SET
             value = excluded.value,
             description = COALESCE(excluded.description, sys_settings.description),
             version = sys_settings.version + 1,
             updated_by = excluded.updated_by,
             updated_at = excluded.updated_at",
        [
            key.into(),
            value.into(),
            description.into(),
            updated_by.map(|u| u.to_string()).into(),
            now.into(),
        ],
    ))
    .await?;

    get(key)
        .await?
        .ok_or_else(|| anyhow::anyhow!("setting {} disappeared after upsert", key))
}

/// Записать настройку, только если ключа еще нет (сидинг при старте).
pub async fn set_if_absent(key: &str, value: &str, description: Option<&str>) -> Result<()> {
    let conn = get_connection();
    let now = Utc::now().to_rfc3339();

    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "INSERT OR IGNORE INTO sys_settings (key, value, description, version, updated_by, updated_at)
         VALUES (?, ?, ?, 0, NULL, ?)",
        [key.into(), value.into(), description.into(), now.into()],
    ))
    .await?;

    Ok(())
}
