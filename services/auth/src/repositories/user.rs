//! User repository for database operations

use anyhow::Result;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use sqlx::PgPool;
use std::sync::OnceLock;
use tracing::info;

use crate::models::{NewUser, User, normalize_email};

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user
    ///
    /// Returns `None` when the email is already registered. The check and the
    /// insert are one statement, so concurrent registrations of the same email
    /// produce exactly one row.
    pub async fn create(&self, new_user: &NewUser) -> Result<Option<User>> {
        let email = normalize_email(&new_user.email);
        info!("Creating new user: {}", email);

        let hashed_password = hash_password(&new_user.password)?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, hashed_password)
            VALUES ($1, $2, $3)
            ON CONFLICT (email) DO NOTHING
            RETURNING id, name, email, hashed_password, profile_json, created_at, updated_at
            "#,
        )
        .bind(new_user.name.trim())
        .bind(&email)
        .bind(&hashed_password)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find a user by email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let email = normalize_email(email);
        info!("Finding user by email: {}", email);

        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, hashed_password, profile_json, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(&email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Look up a user and check their password
    ///
    /// Returns `None` for an unknown email and for a wrong password alike. An
    /// unknown email is still verified against a dummy hash so both paths do
    /// the same amount of work.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Option<User>> {
        match self.find_by_email(email).await? {
            Some(user) => {
                if verify_password(&user.hashed_password, password)? {
                    Ok(Some(user))
                } else {
                    Ok(None)
                }
            }
            None => {
                verify_password(dummy_hash()?, password)?;
                Ok(None)
            }
        }
    }
}

/// Hash a password with argon2 and a fresh random salt
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?
        .to_string();

    Ok(password_hash)
}

/// Verify a password against a stored PHC hash string
pub fn verify_password(hashed_password: &str, password: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hashed_password)
        .map_err(|e| anyhow::anyhow!("Failed to parse password hash: {}", e))?;

    let argon2 = Argon2::default();
    Ok(argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

fn dummy_hash() -> Result<&'static str> {
    static DUMMY_HASH: OnceLock<String> = OnceLock::new();

    if let Some(hash) = DUMMY_HASH.get() {
        return Ok(hash);
    }
    let hash = hash_password("not-a-real-account-password")?;
    Ok(DUMMY_HASH.get_or_init(|| hash))
}
