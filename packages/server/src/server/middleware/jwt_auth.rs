use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::{middleware::Next, response::Response};
use tracing::debug;
use uuid::Uuid;

use crate::common::ApiError;
use crate::domains::auth::models::Role;
use crate::domains::auth::JwtService;

/// Authenticated caller information from JWT
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub account_id: Uuid,
    pub role: Role,
}

impl AuthUser {
    /// Guard for admin-only operations
    pub fn require_admin(&self) -> Result<(), ApiError> {
        if self.role == Role::Admin {
            Ok(())
        } else {
            Err(ApiError::Forbidden)
        }
    }
}

/// Extracting [`AuthUser`] in a handler makes the route require a valid
/// token; routes without the extractor stay public.
#[axum::async_trait]
impl<S: Send + Sync> FromRequestParts<S> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or(ApiError::Unauthorized)
    }
}

/// JWT authentication middleware
///
/// Extracts the bearer token from the Authorization header, verifies it,
/// and adds AuthUser to request extensions. If no token or an invalid
/// token, the request continues without AuthUser (public access).
pub async fn jwt_auth_middleware(
    jwt_service: Arc<JwtService>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    if let Some(user) = extract_auth_user(&request, &jwt_service) {
        debug!(account_id = %user.account_id, role = ?user.role, "Authenticated request");
        request.extensions_mut().insert(user);
    } else {
        debug!("No valid authentication token");
    }

    next.run(request).await
}

/// Extract and verify JWT token from request
fn extract_auth_user(
    request: &axum::http::Request<axum::body::Body>,
    jwt_service: &JwtService,
) -> Option<AuthUser> {
    let auth_header = request.headers().get("authorization")?;
    let auth_str = auth_header.to_str().ok()?;

    // Handle both "Bearer <token>" and raw token
    let token = auth_str.strip_prefix("Bearer ").unwrap_or(auth_str);

    let claims = jwt_service.verify_token(token).ok()?;

    Some(AuthUser {
        account_id: claims.account_id,
        role: claims.role,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_with_header(value: &str) -> axum::http::Request<axum::body::Body> {
        axum::http::Request::builder()
            .header("authorization", value)
            .body(axum::body::Body::empty())
            .unwrap()
    }

    #[test]
    fn extract_token_with_bearer_prefix() {
        let jwt_service = JwtService::new("test_secret", "test_issuer".to_string());
        let account_id = Uuid::new_v4();
        let token = jwt_service.create_token(account_id, Role::Admin).unwrap();

        let request = request_with_header(&format!("Bearer {}", token));
        let user = extract_auth_user(&request, &jwt_service).unwrap();
        assert_eq!(user.account_id, account_id);
        assert_eq!(user.role, Role::Admin);
    }

    #[test]
    fn extract_token_without_bearer_prefix() {
        let jwt_service = JwtService::new("test_secret", "test_issuer".to_string());
        let account_id = Uuid::new_v4();
        let token = jwt_service.create_token(account_id, Role::Student).unwrap();

        let request = request_with_header(&token);
        let user = extract_auth_user(&request, &jwt_service).unwrap();
        assert_eq!(user.account_id, account_id);
    }

    #[test]
    fn garbage_token_yields_no_user() {
        let jwt_service = JwtService::new("test_secret", "test_issuer".to_string());
        let request = request_with_header("Bearer not-a-token");
        assert!(extract_auth_user(&request, &jwt_service).is_none());
    }

    #[test]
    fn student_is_not_admin() {
        let user = AuthUser {
            account_id: Uuid::new_v4(),
            role: Role::Student,
        };
        assert!(user.require_admin().is_err());

        let admin = AuthUser {
            account_id: Uuid::new_v4(),
            role: Role::Admin,
        };
        assert!(admin.require_admin().is_ok());
    }
}
