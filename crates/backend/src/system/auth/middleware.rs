use axum::{body::Body, extract::Request, http::StatusCode, middleware::Next, response::Response};
use contracts::enums::Role;

async fn authenticate(req: &mut Request<Body>) -> Result<Role, StatusCode> {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let claims = super::jwt::validate_token(token)
        .await
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    let role = claims.role;
    req.extensions_mut().insert(claims);
    Ok(role)
}

/// Достаточно валидного токена (любая роль, включая клиента).
pub async fn require_auth(mut req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    authenticate(&mut req).await?;
    Ok(next.run(req).await)
}

/// Оператор и выше.
pub async fn require_staff(mut req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    let role = authenticate(&mut req).await?;
    if !role.is_staff() {
        return Err(StatusCode::FORBIDDEN);
    }
    Ok(next.run(req).await)
}

/// Менеджер и выше.
pub async fn require_manager(mut req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    let role = authenticate(&mut req).await?;
    if role < Role::Manager {
        return Err(StatusCode::FORBIDDEN);
    }
    Ok(next.run(req).await)
}

/// Только администратор.
pub async fn require_admin(mut req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    let role = authenticate(&mut req).await?;
    if role < Role::Admin {
        return Err(StatusCode::FORBIDDEN);
    }
    Ok(next.run(req).await)
}
