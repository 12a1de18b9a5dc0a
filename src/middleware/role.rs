use axum::{extract::Request, middleware::Next, response::Response};

use super::auth::AuthUser;
use crate::error::ApiError;
use crate::types::Role;

pub fn ensure_admin(user: &AuthUser) -> Result<(), ApiError> {
    match user.role {
        Role::Admin => Ok(()),
        Role::Citizen => Err(ApiError::forbidden("Access denied. Admin privileges required.")),
    }
}

pub fn ensure_citizen(user: &AuthUser) -> Result<(), ApiError> {
    match user.role {
        Role::Citizen => Ok(()),
        Role::Admin => Err(ApiError::forbidden("Access denied. Citizen privileges required.")),
    }
}

/// Admin-only gate. Must run after `jwt_auth_middleware`.
pub async fn require_admin(request: Request, next: Next) -> Result<Response, ApiError> {
    ensure_admin(authenticated(&request)?)?;
    Ok(next.run(request).await)
}

/// Citizen-only gate. Must run after `jwt_auth_middleware`.
pub async fn require_citizen(request: Request, next: Next) -> Result<Response, ApiError> {
    ensure_citizen(authenticated(&request)?)?;
    Ok(next.run(request).await)
}

fn authenticated(request: &Request) -> Result<&AuthUser, ApiError> {
    request
        .extensions()
        .get::<AuthUser>()
        .ok_or_else(|| ApiError::unauthorized("No token, authorization denied"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use uuid::Uuid;

    fn user(role: Role) -> AuthUser {
        AuthUser { id: Uuid::new_v4(), role }
    }

    #[test]
    fn admin_gate() {
        assert!(ensure_admin(&user(Role::Admin)).is_ok());
        let err = ensure_admin(&user(Role::Citizen)).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(err.message(), "Access denied. Admin privileges required.");
    }

    #[test]
    fn citizen_gate() {
        assert!(ensure_citizen(&user(Role::Citizen)).is_ok());
        let err = ensure_citizen(&user(Role::Admin)).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(err.message(), "Access denied. Citizen privileges required.");
    }
}
