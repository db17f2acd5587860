use anyhow::Result;
use contracts::enums::Role;
use contracts::system::users::CreateUserDto;

use crate::shared::{pricing, settings};
use crate::system::users::{repository, service};

/// Первичный посев настроек: наценка появляется в sys_settings, если
/// администратор ее еще не задал.
pub async fn seed_settings() -> Result<()> {
    let default_markup = crate::shared::config::get_config()
        .pricing
        .default_markup_percent
        .clone();

    settings::set_if_absent(
        pricing::MARKUP_SETTING_KEY,
        &default_markup,
        Some("Markup percent applied on top of the car source price"),
    )
    .await?;

    Ok(())
}

/// Создать администратора по умолчанию, если таблица пользователей пуста.
pub async fn ensure_admin_user_exists() -> Result<()> {
    let count = repository::count_users().await?;

    if count == 0 {
        tracing::info!("No users found. Creating default admin user...");

        let admin_dto = CreateUserDto {
            username: "admin".to_string(),
            password: "admin".to_string(),
            phone: None,
            full_name: Some("Administrator".to_string()),
            role: Role::Admin,
        };

        let admin_id = service::create(admin_dto, None).await?;

        tracing::warn!("═══════════════════════════════════════════════");
        tracing::warn!("  Default admin user created!");
        tracing::warn!("  Username: admin");
        tracing::warn!("  Password: admin");
        tracing::warn!("  User ID: {}", admin_id);
        tracing::warn!("  ⚠️  PLEASE CHANGE THE PASSWORD IMMEDIATELY!");
        tracing::warn!("═══════════════════════════════════════════════");
    }

    Ok(())
}
