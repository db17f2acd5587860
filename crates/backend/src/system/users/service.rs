use anyhow::Result;
use chrono::Utc;
use contracts::enums::Role;
use contracts::system::users::{ChangePasswordDto, CreateUserDto, UpdateUserDto, User};
use uuid::Uuid;

use super::repository;
use crate::system::auth::password;

/// Создание пользователя (администратором).
pub async fn create(dto: CreateUserDto, created_by: Option<String>) -> Result<String> {
    if dto.username.trim().is_empty() {
        return Err(anyhow::anyhow!("Username cannot be empty"));
    }

    if repository::get_by_username(&dto.username).await?.is_some() {
        return Err(anyhow::anyhow!("Username already exists"));
    }
    if let Some(ref phone) = dto.phone {
        if repository::find_by_phone(phone).await?.is_some() {
            return Err(anyhow::anyhow!("Phone already registered"));
        }
    }

    password::validate_password_strength(&dto.password)?;
    let password_hash = password::hash_password(&dto.password)?;

    let user_id = Uuid::new_v4().to_string();
    let now = Utc::now().to_rfc3339();

    let user = User {
        id: user_id.clone(),
        username: dto.username,
        phone: dto.phone,
        full_name: dto.full_name,
        is_active: true,
        role: dto.role,
        created_at: now.clone(),
        updated_at: now,
        last_login_at: None,
        created_by,
    };

    repository::create_with_password(&user, &password_hash).await?;

    Ok(user_id)
}

/// Найти клиента по телефону либо завести учетку-заготовку
/// (ручное создание заявки по телефонному лиду).
pub async fn ensure_client_by_phone(
    phone: &str,
    full_name: Option<&str>,
    created_by: Uuid,
) -> Result<User> {
    if let Some(user) = repository::find_by_phone(phone).await? {
        return Ok(user);
    }

    let user_id = Uuid::new_v4().to_string();
    let now = Utc::now().to_rfc3339();
    let user = User {
        id: user_id,
        username: phone.to_string(),
        phone: Some(phone.to_string()),
        full_name: full_name.map(|s| s.to_string()),
        is_active: true,
        role: Role::Client,
        created_at: now.clone(),
        updated_at: now,
        last_login_at: None,
        created_by: Some(created_by.to_string()),
    };

    // Пароль не выдается: вход такая учетка получит после сброса пароля.
    let placeholder = password::hash_password(&Uuid::new_v4().to_string())?;
    repository::create_with_password(&user, &placeholder).await?;

    Ok(user)
}

pub async fn update(dto: UpdateUserDto) -> Result<()> {
    let mut user = repository::get_by_id(&dto.id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("User not found"))?;

    user.phone = dto.phone;
    user.full_name = dto.full_name;
    user.is_active = dto.is_active;
    user.role = dto.role;
    user.updated_at = Utc::now().to_rfc3339();

    repository::update(&user).await?;

    Ok(())
}

pub async fn delete(id: &str) -> Result<bool> {
    repository::delete(id).await
}

pub async fn get_by_id(id: &str) -> Result<Option<User>> {
    repository::get_by_id(id).await
}

pub async fn list_all() -> Result<Vec<User>> {
    repository::list_all().await
}

pub async fn change_password(dto: ChangePasswordDto, requester_id: &str) -> Result<()> {
    repository::get_by_id(&dto.user_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("User not found"))?;

    let requester = repository::get_by_id(requester_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Requester not found"))?;

    if dto.user_id != requester_id {
        // Чужой пароль меняет только администратор, без старого пароля.
        if requester.role < Role::Admin {
            return Err(anyhow::anyhow!("Permission denied"));
        }
    } else if let Some(ref old_password) = dto.old_password {
        let current_hash = repository::get_password_hash(&dto.user_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Password hash not found"))?;

        if !password::verify_password(old_password, &current_hash)? {
            return Err(anyhow::anyhow!("Invalid old password"));
        }
    }

    password::validate_password_strength(&dto.new_password)?;
    let new_hash = password::hash_password(&dto.new_password)?;
    repository::update_password(&dto.user_id, &new_hash).await?;

    Ok(())
}

/// Проверка логина/пароля для входа.
pub async fn verify_credentials(username: &str, password_raw: &str) -> Result<Option<User>> {
    let user = match repository::get_by_username(username).await? {
        Some(u) => u,
        None => return Ok(None),
    };

    if !user.is_active {
        return Err(anyhow::anyhow!("User account is inactive"));
    }

    let password_hash = repository::get_password_hash(&user.id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Password hash not found"))?;

    if !password::verify_password(password_raw, &password_hash)? {
        return Ok(None);
    }

    let _ = repository::update_last_login(&user.id).await;

    Ok(Some(user))
}
