use chrono::{DateTime, Duration, Utc};
use contracts::domain::a004_blacklist::{
    BlacklistCreateDto, BlacklistEntry, BlacklistListResponse,
};
use contracts::enums::{BlockType, Role};
use serde_json::json;
use uuid::Uuid;

use crate::shared::audit::{self, AuditEvent};
use crate::shared::data::db::get_connection;
use crate::shared::error::AppError;

use super::repository;

/// Действует ли блокировка записи в момент `now`.
///
/// Истекший временный блок не снимает запись: счетчик страйков живет
/// дальше, но звонить и подавать заявки номеру уже можно.
pub fn entry_blocks(entry: &BlacklistEntry, now: DateTime<Utc>) -> bool {
    if entry.block_type == Some(BlockType::Permanent) {
        return true;
    }
    match entry.blocked_until {
        None => true,
        Some(until) => until >= now,
    }
}

/// После этого числа страйков любой новый блок становится постоянным.
const PERMANENT_STRIKE_THRESHOLD: i32 = 3;

fn blocked_until_for(block_type: BlockType, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    match block_type {
        BlockType::Days7 => Some(now + Duration::days(7)),
        BlockType::Days30 => Some(now + Duration::days(30)),
        BlockType::Permanent => None,
    }
}

/// Гейт для создания заявок и регистрации: блокирован ли телефон сейчас.
pub async fn is_blocked(phone: &str) -> Result<(bool, Option<String>), AppError> {
    let entry = repository::find_by_phone(phone).await?;
    match entry {
        Some(entry) if entry_blocks(&entry, Utc::now()) => {
            let reason = entry
                .reason_note
                .unwrap_or_else(|| entry.reason.code().to_string());
            Ok((true, Some(reason)))
        }
        _ => Ok((false, None)),
    }
}

pub async fn ensure_not_blocked(phone: &str) -> Result<(), AppError> {
    let (blocked, reason) = is_blocked(phone).await?;
    if blocked {
        return Err(AppError::forbidden(format!(
            "phone is blacklisted: {}",
            reason.unwrap_or_default()
        )));
    }
    Ok(())
}

/// Добавление телефона в черный список (менеджер и выше).
/// Повторное добавление того же номера увеличивает счетчик страйков
/// и переустанавливает блокировку по новому типу.
pub async fn add(
    dto: BlacklistCreateDto,
    actor: Uuid,
    role: Role,
) -> Result<BlacklistEntry, AppError> {
    if role < Role::Manager {
        return Err(AppError::forbidden("manager rank required"));
    }

    let now = Utc::now();
    let entry = match repository::find_by_phone(&dto.phone).await? {
        Some(mut existing) => {
            existing.strike_count += 1;
            existing.reason = dto.reason;
            existing.reason_note = dto.reason_note.clone();
            let block_type = if existing.strike_count >= PERMANENT_STRIKE_THRESHOLD {
                BlockType::Permanent
            } else {
                dto.block_type
            };
            existing.block_type = Some(block_type);
            existing.blocked_until = blocked_until_for(block_type, now);
            existing.updated_at = now;
            repository::update(&existing).await?;
            existing
        }
        None => {
            let entry = BlacklistEntry {
                id: Uuid::new_v4(),
                phone: dto.phone.clone(),
                reason: dto.reason,
                reason_note: dto.reason_note.clone(),
                strike_count: 1,
                block_type: Some(dto.block_type),
                blocked_until: blocked_until_for(dto.block_type, now),
                added_by: Some(actor),
                created_at: now,
                updated_at: now,
            };
            repository::insert(&entry).await?;
            entry
        }
    };

    let conn = get_connection();
    audit::service::record(
        conn,
        AuditEvent::new("blacklist_added", "blacklist")
            .entity(entry.id)
            .user(actor)
            .new_state(json!({
                "phone": entry.phone,
                "reason": entry.reason.code(),
                "blockType": entry.block_type.map(|b| b.code()),
                "strikeCount": entry.strike_count,
            })),
    )
    .await?;

    Ok(entry)
}

/// Снятие записи целиком (только администратор).
pub async fn remove(id: Uuid, actor: Uuid, role: Role) -> Result<(), AppError> {
    if role < Role::Admin {
        return Err(AppError::forbidden("admin rank required"));
    }

    let entry = repository::get_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("blacklist entry"))?;
    repository::delete(id).await?;

    let conn = get_connection();
    audit::service::record(
        conn,
        AuditEvent::new("blacklist_removed", "blacklist")
            .entity(id)
            .user(actor)
            .old(json!({ "phone": entry.phone })),
    )
    .await?;

    Ok(())
}

/// Снятие по номеру телефона, для операторского интерфейса.
pub async fn remove_by_phone(phone: &str, actor: Uuid, role: Role) -> Result<(), AppError> {
    if role < Role::Admin {
        return Err(AppError::forbidden("admin rank required"));
    }

    let entry = repository::find_by_phone(phone)
        .await?
        .ok_or_else(|| AppError::not_found("blacklist entry"))?;
    repository::delete(entry.id).await?;

    let conn = get_connection();
    audit::service::record(
        conn,
        AuditEvent::new("blacklist_removed", "blacklist")
            .entity(entry.id)
            .user(actor)
            .old(json!({ "phone": entry.phone })),
    )
    .await?;

    Ok(())
}

pub async fn list(
    page: Option<u64>,
    per_page: Option<u64>,
    role: Role,
) -> Result<BlacklistListResponse, AppError> {
    if role < Role::Manager {
        return Err(AppError::forbidden("manager rank required"));
    }

    let page = page.unwrap_or(1).max(1);
    let per_page = per_page.unwrap_or(50).clamp(1, 200);
    let (items, total) = repository::list(page, per_page).await?;
    let pages = if total == 0 { 0 } else { (total + per_page - 1) / per_page };
    Ok(BlacklistListResponse {
        items,
        total,
        page,
        per_page,
        pages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::enums::BlacklistReason;

    fn entry(block_type: Option<BlockType>, blocked_until: Option<DateTime<Utc>>) -> BlacklistEntry {
        let now = Utc::now();
        BlacklistEntry {
            id: Uuid::new_v4(),
            phone: "+971500000001".to_string(),
            reason: BlacklistReason::NoShow,
            reason_note: None,
            strike_count: 1,
            block_type,
            blocked_until,
            added_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_permanent_block_never_expires() {
        let e = entry(Some(BlockType::Permanent), None);
        assert!(entry_blocks(&e, Utc::now() + Duration::days(10_000)));
    }

    #[test]
    fn test_temporary_block_expires() {
        let now = Utc::now();
        let e = entry(Some(BlockType::Days7), Some(now + Duration::days(7)));
        assert!(entry_blocks(&e, now));
        assert!(entry_blocks(&e, now + Duration::days(7) - Duration::seconds(1)));
        assert!(!entry_blocks(&e, now + Duration::days(8)));
    }

    #[test]
    fn test_missing_until_means_blocked() {
        let e = entry(Some(BlockType::Days30), None);
        assert!(entry_blocks(&e, Utc::now()));
    }

    #[test]
    fn test_blocked_until_mapping() {
        let now = Utc::now();
        assert_eq!(
            blocked_until_for(BlockType::Days7, now),
            Some(now + Duration::days(7))
        );
        assert_eq!(
            blocked_until_for(BlockType::Days30, now),
            Some(now + Duration::days(30))
        );
        assert_eq!(blocked_until_for(BlockType::Permanent, now), None);
    }
}
