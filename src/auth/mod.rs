//! JWT session tokens and role gates
//!
//! Tokens are stateless and self-expiring: logout is client-side (discard
//! the token) and there is no server-side revocation list, so a leaked token
//! remains valid until natural expiry. Role checking is a second, composable
//! gate applied after identity verification.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, ErrorCode};
use crate::state::AppState;

/// Closed role set; stored in the users table as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Employee,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Employee => "employee",
        }
    }

    pub fn from_db(s: &str) -> Option<Role> {
        match s {
            "admin" => Some(Role::Admin),
            "employee" => Some(Role::Employee),
            _ => None,
        }
    }
}

/// JWT claims carried by a session token
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: i64,
    pub username: String,
    pub role: Role,
    /// Issued at (Unix timestamp seconds)
    pub iat: usize,
    /// Expiration (Unix timestamp seconds)
    pub exp: usize,
}

/// Authenticated identity extracted from a verified token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
    pub role: Role,
}

impl AuthUser {
    /// Composable role gate: operations call this before any side-effecting
    /// logic runs.
    pub fn require_role(&self, required: Role) -> Result<(), AppError> {
        if self.role == required {
            Ok(())
        } else {
            Err(AppError::new(ErrorCode::Unauthorized))
        }
    }
}

const TOKEN_EXPIRY_HOURS: i64 = 1;

/// Create a session token for a user, valid for one hour from issuance.
pub fn create_token(
    user_id: i64,
    username: &str,
    role: Role,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now();
    let claims = Claims {
        sub: user_id,
        username: username.to_string(),
        role,
        iat: now.timestamp() as usize,
        exp: (now + chrono::Duration::hours(TOKEN_EXPIRY_HOURS)).timestamp() as usize,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Verify a token's signature and expiry and decode the identity it carries.
pub fn verify_token(token: &str, secret: &str) -> Result<AuthUser, AppError> {
    let token_data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        tracing::debug!("token validation failed: {e}");
        AppError::with_message(ErrorCode::Unauthenticated, "Invalid or expired token.")
    })?;

    Ok(AuthUser {
        id: token_data.claims.sub,
        username: token_data.claims.username,
        role: token_data.claims.role,
    })
}

/// Middleware that extracts and verifies the bearer token from the
/// Authorization header and stores the identity in request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let header = request
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::new(ErrorCode::Unauthenticated).into_response())?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::new(ErrorCode::Unauthenticated).into_response())?;

    let user = verify_token(token, &state.jwt_secret).map_err(|e| e.into_response())?;
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn token_round_trip() {
        let token = create_token(7, "alice", Role::Admin, SECRET).unwrap();
        let user = verify_token(&token, SECRET).unwrap();
        assert_eq!(user.id, 7);
        assert_eq!(user.username, "alice");
        assert_eq!(user.role, Role::Admin);
    }

    #[test]
    fn expired_token_is_unauthenticated() {
        let now = chrono::Utc::now();
        let claims = Claims {
            sub: 1,
            username: "alice".into(),
            role: Role::Admin,
            iat: (now - chrono::Duration::hours(3)).timestamp() as usize,
            exp: (now - chrono::Duration::hours(2)).timestamp() as usize,
        };
        let token = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let err = verify_token(&token, SECRET).unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthenticated);
    }

    #[test]
    fn wrong_secret_is_unauthenticated() {
        let token = create_token(1, "alice", Role::Employee, SECRET).unwrap();
        let err = verify_token(&token, "other-secret").unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthenticated);
    }

    #[test]
    fn malformed_token_is_unauthenticated() {
        let err = verify_token("not.a.jwt", SECRET).unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthenticated);
    }

    #[test]
    fn employee_fails_admin_gate() {
        let user = AuthUser {
            id: 2,
            username: "bob".into(),
            role: Role::Employee,
        };
        let err = user.require_role(Role::Admin).unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);
        assert!(user.require_role(Role::Employee).is_ok());
    }

    #[test]
    fn role_db_round_trip() {
        assert_eq!(Role::from_db("admin"), Some(Role::Admin));
        assert_eq!(Role::from_db("employee"), Some(Role::Employee));
        assert_eq!(Role::from_db("root"), None);
        assert_eq!(Role::Admin.as_str(), "admin");
    }
}
