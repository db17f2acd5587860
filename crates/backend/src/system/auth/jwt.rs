use anyhow::{Context, Result};
use chrono::Utc;
use contracts::enums::Role;
use contracts::system::auth::TokenClaims;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;

use crate::shared::settings;

const ACCESS_TOKEN_LIFETIME_HOURS: i64 = 24;
const REFRESH_TOKEN_LIFETIME_DAYS: i64 = 90;

const JWT_SECRET_KEY: &str = "jwt_secret";

/// Access-токен с ролью в claims: rank-проверки на маршрутах не ходят в базу.
pub async fn generate_access_token(user_id: &str, username: &str, role: Role) -> Result<String> {
    let now = Utc::now();
    let exp = (now + chrono::Duration::hours(ACCESS_TOKEN_LIFETIME_HOURS)).timestamp() as usize;
    let iat = now.timestamp() as usize;

    let claims = TokenClaims {
        sub: user_id.to_string(),
        username: username.to_string(),
        role,
        exp,
        iat,
    };

    let secret = get_jwt_secret().await?;
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .context("Failed to encode JWT token")?;

    Ok(token)
}

pub async fn validate_token(token: &str) -> Result<TokenClaims> {
    let secret = get_jwt_secret().await?;

    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .context("Failed to decode JWT token")?;

    Ok(token_data.claims)
}

pub fn generate_refresh_token() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Секрет живет в sys_settings; при первом старте генерируется и
/// сохраняется, чтобы рестарт не ронял выданные токены.
pub async fn get_jwt_secret() -> Result<String> {
    if let Some(secret) = settings::get_value(JWT_SECRET_KEY).await? {
        return Ok(secret);
    }

    let secret = generate_jwt_secret();
    settings::set_if_absent(
        JWT_SECRET_KEY,
        &secret,
        Some("Auto-generated JWT signing secret"),
    )
    .await?;

    // Параллельный старт мог записать свой секрет первым.
    settings::get_value(JWT_SECRET_KEY)
        .await?
        .ok_or_else(|| anyhow::anyhow!("jwt secret missing after seeding"))
}

/// 256 случайных бит в base64.
fn generate_jwt_secret() -> String {
    use base64::{engine::general_purpose, Engine as _};
    let mut rng = rand::thread_rng();
    let random_bytes: Vec<u8> = (0..32).map(|_| rng.gen::<u8>()).collect();
    general_purpose::STANDARD.encode(&random_bytes)
}

pub fn calculate_refresh_token_expiration() -> String {
    let exp = Utc::now() + chrono::Duration::days(REFRESH_TOKEN_LIFETIME_DAYS);
    exp.to_rfc3339()
}
