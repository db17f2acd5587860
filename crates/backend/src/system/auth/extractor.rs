use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use contracts::enums::Role;
use contracts::system::auth::TokenClaims;
use uuid::Uuid;

/// Extractor текущего пользователя из JWT (claims кладет middleware).
/// В хендлерах: `async fn handler(CurrentUser(claims): CurrentUser) -> ...`
pub struct CurrentUser(pub TokenClaims);

impl CurrentUser {
    pub fn user_id(&self) -> Result<Uuid, StatusCode> {
        Uuid::parse_str(&self.0.sub).map_err(|_| StatusCode::UNAUTHORIZED)
    }

    pub fn role(&self) -> Role {
        self.0.role
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<TokenClaims>()
            .cloned()
            .map(CurrentUser)
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}
