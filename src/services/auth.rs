//! Authentication service: password hashing, JWT, registration, login, and
//! refresh-token rotation.
//!
//! Only the SHA-256 digest of the current refresh token is stored on the user
//! row. Refreshing swaps the digest atomically, so a refresh token works once.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::{RegisterUser, User};

pub const ACCESS_TOKEN: &str = "access";
pub const REFRESH_TOKEN: &str = "refresh";

/// JWT claims embedded in access and refresh tokens.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User id.
    pub sub: String,
    pub token_type: String,
    pub jti: String,
    pub exp: i64,
    pub iat: i64,
}

/// Token pair issued on login and refresh. The refresh token travels in a cookie.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

/// Body returned to the client on login and refresh.
#[derive(Debug, Serialize)]
pub struct AccessTokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl From<&TokenPair> for AccessTokenResponse {
    fn from(pair: &TokenPair) -> Self {
        Self {
            access_token: pair.access_token.clone(),
            token_type: "Bearer".to_string(),
            expires_in: pair.expires_in,
        }
    }
}

/// Hash a plaintext password with argon2id.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {e}")))
}

/// Verify a plaintext password against a stored hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AppError::Internal(format!("Invalid hash: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Hex SHA-256 digest of a token, as stored in `users.refresh_token_hash`.
pub fn token_digest(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

fn sign(claims: &Claims, key: &EncodingKey) -> Result<String, AppError> {
    jsonwebtoken::encode(&Header::default(), claims, key)
        .map_err(|e| AppError::Internal(format!("Token generation failed: {e}")))
}

/// Generate a JWT token pair (access + refresh) for a user.
pub fn generate_tokens(
    user_id: Uuid,
    jwt_secret: &str,
    access_expiry_secs: i64,
    refresh_expiry_secs: i64,
) -> Result<TokenPair, AppError> {
    let now = Utc::now();
    let encoding_key = EncodingKey::from_secret(jwt_secret.as_bytes());

    let access_claims = Claims {
        sub: user_id.to_string(),
        token_type: ACCESS_TOKEN.to_string(),
        jti: Uuid::new_v4().to_string(),
        exp: (now + Duration::seconds(access_expiry_secs)).timestamp(),
        iat: now.timestamp(),
    };

    let refresh_claims = Claims {
        sub: user_id.to_string(),
        token_type: REFRESH_TOKEN.to_string(),
        jti: Uuid::new_v4().to_string(),
        exp: (now + Duration::seconds(refresh_expiry_secs)).timestamp(),
        iat: now.timestamp(),
    };

    Ok(TokenPair {
        access_token: sign(&access_claims, &encoding_key)?,
        refresh_token: sign(&refresh_claims, &encoding_key)?,
        expires_in: access_expiry_secs,
    })
}

/// Validate a JWT and return the claims. Bad signatures and expired tokens are forbidden.
pub fn validate_token(token: &str, jwt_secret: &str) -> Result<Claims, AppError> {
    let decoding_key = DecodingKey::from_secret(jwt_secret.as_bytes());
    let validation = Validation::default();

    jsonwebtoken::decode::<Claims>(token, &decoding_key, &validation)
        .map(|data| data.claims)
        .map_err(|e| {
            tracing::debug!(error = %e, "Token rejected");
            AppError::Forbidden("Invalid or expired token".to_string())
        })
}

/// Validate a token and require a specific `token_type`, returning the user id.
pub fn validate_token_of_type(
    token: &str,
    jwt_secret: &str,
    token_type: &str,
) -> Result<Uuid, AppError> {
    let claims = validate_token(token, jwt_secret)?;
    if claims.token_type != token_type {
        return Err(AppError::Forbidden("Invalid or expired token".to_string()));
    }
    claims
        .sub
        .parse()
        .map_err(|_| AppError::Forbidden("Invalid or expired token".to_string()))
}

/// Register a new user with a hashed password.
pub async fn register(pool: &PgPool, input: &RegisterUser) -> Result<User, AppError> {
    let password_hash = hash_password(&input.password)?;

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (name, email, password_hash, country, phone_num)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(&input.name)
    .bind(input.email.to_lowercase())
    .bind(&password_hash)
    .bind(&input.country)
    .bind(&input.phone_num)
    .fetch_one(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::Conflict("User with such email already exists".to_string())
        }
        _ => AppError::Database(e),
    })?;

    tracing::info!(user_id = %user.id, "User registered");
    Ok(user)
}

/// Authenticate a user by email and password, returning a token pair and
/// remembering the refresh token's digest.
pub async fn login(
    pool: &PgPool,
    email: &str,
    password: &str,
    jwt_secret: &str,
    access_expiry_secs: i64,
    refresh_expiry_secs: i64,
) -> Result<TokenPair, AppError> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email.to_lowercase())
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if !verify_password(password, &user.password_hash)? {
        tracing::info!(user_id = %user.id, "Login rejected: wrong password");
        return Err(AppError::Unauthorized);
    }

    let tokens = generate_tokens(user.id, jwt_secret, access_expiry_secs, refresh_expiry_secs)?;

    sqlx::query("UPDATE users SET refresh_token_hash = $1, updated_at = NOW() WHERE id = $2")
        .bind(token_digest(&tokens.refresh_token))
        .bind(user.id)
        .execute(pool)
        .await?;

    Ok(tokens)
}

/// Exchange a refresh token for a new token pair, invalidating the old one.
pub async fn refresh_token(
    pool: &PgPool,
    refresh_token_str: &str,
    jwt_secret: &str,
    access_expiry_secs: i64,
    refresh_expiry_secs: i64,
) -> Result<TokenPair, AppError> {
    let user_id = validate_token_of_type(refresh_token_str, jwt_secret, REFRESH_TOKEN)?;

    let tokens = generate_tokens(user_id, jwt_secret, access_expiry_secs, refresh_expiry_secs)?;

    let rotated = sqlx::query_scalar::<_, Uuid>(
        "UPDATE users SET refresh_token_hash = $1 \
         WHERE id = $2 AND refresh_token_hash = $3 \
         RETURNING id",
    )
    .bind(token_digest(&tokens.refresh_token))
    .bind(user_id)
    .bind(token_digest(refresh_token_str))
    .fetch_optional(pool)
    .await?;

    if rotated.is_none() {
        tracing::warn!(user_id = %user_id, "Refresh token not recognised");
        return Err(AppError::Forbidden("Invalid or expired token".to_string()));
    }

    Ok(tokens)
}

/// Forget the stored refresh token if it matches. Unknown tokens are ignored.
pub async fn logout(pool: &PgPool, refresh_token_str: &str) -> Result<(), AppError> {
    let result = sqlx::query(
        "UPDATE users SET refresh_token_hash = NULL WHERE refresh_token_hash = $1",
    )
    .bind(token_digest(refresh_token_str))
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        tracing::debug!("Logout with unknown refresh token");
    }
    Ok(())
}

/// Find a user by ID.
pub async fn find_user_by_id(pool: &PgPool, id: Uuid) -> Result<User, AppError> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}
