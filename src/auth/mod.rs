/*!
 * Bearer-token authentication: HS256 JWT issue/validate, argon2 password
 * hashing, the login route, and the middleware that gates protected routers.
 */

use std::sync::Arc;
use std::time::Duration;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{Duration as ChronoDuration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::db::DbPool;
use crate::entities::user;
use crate::errors::{ErrorResponse, ServiceError};

/// JWT claims carried by every bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (the user's email address)
    pub sub: String,
    /// Primary key of the user the token was minted for
    pub user_id: i32,
    /// Unique token identifier
    pub jti: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Authenticated user extracted from a validated bearer token.
///
/// Inserted into request extensions by [`auth_middleware`]; handlers read it
/// with `Extension<AuthenticatedUser>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub user_id: i32,
    pub email: String,
    pub token_id: String,
}

/// Alias used in handler signatures.
pub type AuthenticatedUser = AuthUser;

/// Authentication configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Secret key for signing and verifying JWTs
    pub jwt_secret: String,
    /// Token lifetime
    pub token_expiration: Duration,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>, token_expiration: Duration) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_expiration,
        }
    }

    pub fn from_app_config(config: &AppConfig) -> Self {
        Self::new(
            config.jwt_secret.clone(),
            Duration::from_secs(config.jwt_expiration as u64),
        )
    }
}

/// Issues and validates bearer tokens and backs the login route.
pub struct AuthService {
    config: AuthConfig,
    db: Arc<DbPool>,
}

impl AuthService {
    pub fn new(config: AuthConfig, db: Arc<DbPool>) -> Self {
        Self { config, db }
    }

    /// Issue an HS256 token for the given user.
    pub fn generate_token(&self, email: &str, user_id: i32) -> Result<String, AuthError> {
        let now = Utc::now();
        let expiry = now + ChronoDuration::seconds(self.config.token_expiration.as_secs() as i64);

        let claims = Claims {
            sub: email.to_string(),
            user_id,
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_bytes()),
        )
        .map_err(|e| AuthError::TokenCreation(e.to_string()))
    }

    /// Validate a JWT and extract its claims.
    ///
    /// Expired tokens are reported distinctly from malformed or wrongly
    /// signed ones so clients can tell re-login from a bad request.
    pub fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        })?;

        Ok(data.claims)
    }
}

/// Hash a plain password with argon2id and a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AuthError::HashError(e.to_string()))
}

/// Verify a plain password against a stored argon2 hash.
///
/// A hash that fails to parse counts as a mismatch, not an error, so a
/// corrupt row cannot be distinguished from a wrong password by callers.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// Login credentials
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "somchai@example.co.th")]
    pub email: String,
    #[schema(example = "s3cr3t-pass")]
    pub password: String,
}

/// Successful login response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    #[schema(example = "bearer")]
    pub token_type: String,
    pub user_id: i32,
}

/// Authentication error types
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("No authentication token provided")]
    MissingToken,

    #[error("Invalid authentication token")]
    InvalidToken,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("Token creation failed: {0}")]
    TokenCreation(String),

    #[error("Password hashing failed: {0}")]
    HashError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingToken
            | Self::InvalidToken
            | Self::TokenExpired
            | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::UserNotFound => StatusCode::NOT_FOUND,
            Self::TokenCreation(_) | Self::HashError(_) | Self::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<AuthError> for ServiceError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::UserNotFound => ServiceError::NotFound("User not found".to_string()),
            AuthError::HashError(msg) => ServiceError::HashError(msg),
            AuthError::DatabaseError(msg) | AuthError::TokenCreation(msg) => {
                ServiceError::InternalError(msg)
            }
            other => ServiceError::AuthError(other.to_string()),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("authentication failure: {}", self);
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = Json(ErrorResponse {
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message,
            details: None,
            timestamp: Utc::now().to_rfc3339(),
        });

        (status, body).into_response()
    }
}

/// Authentication middleware that validates the bearer token and injects
/// the authenticated user into request extensions.
pub async fn auth_middleware(mut request: Request, next: Next) -> Response {
    let headers = request.headers().clone();

    // The service is injected into request extensions by a layer in main
    let auth_service = match request.extensions().get::<Arc<AuthService>>() {
        Some(service) => service.clone(),
        None => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Authentication service not available",
            )
                .into_response();
        }
    };

    match extract_auth_from_headers(&headers, &auth_service) {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => e.into_response(),
    }
}

/// Extract and validate the `Authorization: Bearer` header.
fn extract_auth_from_headers(
    headers: &HeaderMap,
    auth_service: &AuthService,
) -> Result<AuthUser, AuthError> {
    if let Some(auth_header) = headers.get(header::AUTHORIZATION) {
        if let Ok(auth_value) = auth_header.to_str() {
            if auth_value.starts_with("Bearer ") {
                let token = auth_value.trim_start_matches("Bearer ").trim();
                let claims = auth_service.validate_token(token)?;

                return Ok(AuthUser {
                    user_id: claims.user_id,
                    email: claims.sub,
                    token_id: claims.jti,
                });
            }
        }
        return Err(AuthError::InvalidToken);
    }

    Err(AuthError::MissingToken)
}

/// Authentication routes (the only unauthenticated business route).
pub fn auth_routes() -> axum::Router<Arc<AuthService>> {
    axum::Router::new().route("/login", axum::routing::post(login_handler))
}

/// Login with email and password, returning a bearer token.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Wrong password", body = ErrorResponse),
        (status = 404, description = "Unknown email", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login_handler(
    State(auth_service): State<Arc<AuthService>>,
    Json(credentials): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthError> {
    let account = user::Entity::find()
        .filter(user::Column::MEmail.eq(credentials.email.as_str()))
        .one(auth_service.db.as_ref())
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?
        .ok_or(AuthError::UserNotFound)?;

    if !verify_password(&credentials.password, &account.m_pass) {
        return Err(AuthError::InvalidCredentials);
    }

    let token = auth_service.generate_token(&account.m_email, account.m_id)?;
    info!(user_id = account.m_id, "user logged in");

    Ok(Json(LoginResponse {
        access_token: token,
        token_type: "bearer".to_string(),
        user_id: account.m_id,
    }))
}

/// Extension methods for gating routers behind the auth middleware.
pub trait AuthRouterExt {
    fn with_auth(self) -> Self;
}

impl<S> AuthRouterExt for axum::Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_auth(self) -> Self {
        self.layer(axum::middleware::from_fn(auth_middleware))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::Database;

    async fn test_service(expiration: Duration) -> AuthService {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        AuthService::new(
            AuthConfig::new("unit-test-signing-secret-0123456789abcdef", expiration),
            Arc::new(db),
        )
    }

    #[tokio::test]
    async fn token_round_trip_preserves_claims() {
        let service = test_service(Duration::from_secs(3600)).await;

        let token = service.generate_token("somchai@example.co.th", 7).unwrap();
        let claims = service.validate_token(&token).unwrap();

        assert_eq!(claims.sub, "somchai@example.co.th");
        assert_eq!(claims.user_id, 7);
        assert!(claims.exp > claims.iat);
        assert!(!claims.jti.is_empty());
    }

    #[tokio::test]
    async fn expired_token_is_reported_distinctly() {
        // Past the default decode leeway of 60 seconds.
        let service = test_service(Duration::from_secs(3600)).await;
        let now = Utc::now();
        let claims = Claims {
            sub: "somchai@example.co.th".to_string(),
            user_id: 7,
            jti: Uuid::new_v4().to_string(),
            iat: (now - ChronoDuration::hours(3)).timestamp(),
            exp: (now - ChronoDuration::hours(2)).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret("unit-test-signing-secret-0123456789abcdef".as_bytes()),
        )
        .unwrap();

        match service.validate_token(&token) {
            Err(AuthError::TokenExpired) => {}
            other => panic!("expected TokenExpired, got {:?}", other.map(|c| c.sub)),
        }
    }

    #[tokio::test]
    async fn token_signed_with_other_secret_is_rejected() {
        let service = test_service(Duration::from_secs(3600)).await;
        let other = test_service(Duration::from_secs(3600)).await;
        let forged = AuthService::new(
            AuthConfig::new("a-completely-different-secret-key", Duration::from_secs(3600)),
            other.db.clone(),
        )
        .generate_token("mallory@example.co.th", 1)
        .unwrap();

        match service.validate_token(&forged) {
            Err(AuthError::InvalidToken) => {}
            other => panic!("expected InvalidToken, got {:?}", other.map(|c| c.sub)),
        }
    }

    #[test]
    fn password_hash_and_verify() {
        let hash = hash_password("correct horse battery staple").unwrap();
        assert_ne!(hash, "correct horse battery staple");
        assert!(verify_password("correct horse battery staple", &hash));
        assert!(!verify_password("wrong password", &hash));
    }

    #[test]
    fn unparseable_hash_never_verifies() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }
}
