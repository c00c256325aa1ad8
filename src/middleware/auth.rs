//! JWT authentication middleware
//! 
//! Resolves the bearer token to a stored user and injects it into the
//! request extensions as `AuthenticatedUser`. Browsers cannot set headers on
//! `EventSource`, so the token is also accepted as a `token` query parameter.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::debug;
use uuid::Uuid;

use crate::{
    models::{User, UserRole},
    state::AppState,
    utils::{
        errors::{forbidden_error, AppError},
        jwt::{extract_token_from_header, verify_token},
    },
};

/// User resolved from the request token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
}

impl AuthenticatedUser {
    pub fn id(&self) -> Uuid {
        self.user.id
    }

    pub fn role(&self) -> UserRole {
        self.user.role
    }
}

/// Rejects callers whose role is not in `allowed`
pub fn ensure_role(actor: &User, allowed: &[UserRole], operation: &str) -> Result<(), AppError> {
    if allowed.contains(&actor.role) {
        Ok(())
    } else {
        Err(forbidden_error(
            operation,
            &format!("not permitted for role {}", actor.role),
        ))
    }
}

pub fn ensure_admin(actor: &User, operation: &str) -> Result<(), AppError> {
    ensure_role(actor, &[UserRole::Admin], operation)
}

pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request_token(&request)?;
    let claims = verify_token(&token, &state.jwt_config())?;
    let user_id = claims.user_id()?;

    // The account may have been deleted after the token was issued
    let user = state
        .users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

    debug!("🔐 {} ({}) authenticated", user.email, user.role);
    request.extensions_mut().insert(AuthenticatedUser { user });

    Ok(next.run(request).await)
}

fn request_token(request: &Request) -> Result<String, AppError> {
    if let Some(value) = request.headers().get(header::AUTHORIZATION) {
        let value = value
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid Authorization header".to_string()))?;
        return extract_token_from_header(value).map(str::to_string);
    }

    request
        .uri()
        .query()
        .and_then(|query| query.split('&').find_map(|pair| pair.strip_prefix("token=")))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .ok_or_else(|| AppError::Unauthorized("Authorization token required".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn test_token_from_header_or_query() {
        let request = Request::builder()
            .uri("/api/jobs")
            .header(header::AUTHORIZATION, "Bearer abc.def.ghi")
            .body(Body::empty())
            .unwrap();
        assert_eq!(request_token(&request).unwrap(), "abc.def.ghi");

        let request = Request::builder()
            .uri("/api/events?foo=1&token=abc.def.ghi")
            .body(Body::empty())
            .unwrap();
        assert_eq!(request_token(&request).unwrap(), "abc.def.ghi");

        let request = Request::builder().uri("/api/events").body(Body::empty()).unwrap();
        assert!(matches!(request_token(&request), Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_ensure_role() {
        let driver = User::new("Ravi".into(), "ravi@example.com".into(), UserRole::Driver);
        assert!(ensure_role(&driver, &[UserRole::Driver], "progress job").is_ok());
        assert!(matches!(
            ensure_admin(&driver, "approve job"),
            Err(AppError::Forbidden(_))
        ));
    }
}
