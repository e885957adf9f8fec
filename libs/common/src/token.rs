//! JWT service for token generation and validation
//!
//! Access and refresh tokens are HS256-signed with separate secrets, so a
//! refresh token can never pass as an access token and vice versa. There is
//! no server-side revocation list: logging out means the client discards its
//! tokens, and issued tokens stay valid until they expire.

use anyhow::Result;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// JWT configuration
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Secret for signing access tokens
    pub access_secret: String,
    /// Secret for signing refresh tokens
    pub refresh_secret: String,
    /// Access token expiration time in seconds (default: 15 minutes)
    pub access_token_expiry: u64,
    /// Refresh token expiration time in seconds (default: 7 days)
    pub refresh_token_expiry: u64,
}

impl TokenConfig {
    /// Create a new TokenConfig from environment variables
    ///
    /// # Environment Variables
    /// - `JWT_SECRET`: Secret for access tokens (required)
    /// - `REFRESH_SECRET`: Secret for refresh tokens (required)
    /// - `JWT_ACCESS_TOKEN_EXPIRY`: Access token expiry in seconds (default: 900)
    /// - `JWT_REFRESH_TOKEN_EXPIRY`: Refresh token expiry in seconds (default: 604800)
    pub fn from_env() -> Result<Self> {
        let access_secret = std::env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable not set"))?;

        let refresh_secret = std::env::var("REFRESH_SECRET")
            .map_err(|_| anyhow::anyhow!("REFRESH_SECRET environment variable not set"))?;

        if access_secret == refresh_secret {
            anyhow::bail!("JWT_SECRET and REFRESH_SECRET must differ");
        }

        let access_token_expiry = std::env::var("JWT_ACCESS_TOKEN_EXPIRY")
            .unwrap_or_else(|_| "900".to_string()) // 15 minutes
            .parse()
            .unwrap_or(900);

        let refresh_token_expiry = std::env::var("JWT_REFRESH_TOKEN_EXPIRY")
            .unwrap_or_else(|_| "604800".to_string()) // 7 days
            .parse()
            .unwrap_or(604800);

        Ok(TokenConfig {
            access_secret,
            refresh_secret,
            access_token_expiry,
            refresh_token_expiry,
        })
    }
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: Uuid,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
    /// Token type (access or refresh)
    pub token_type: TokenType,
}

/// Token type enum
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub enum TokenType {
    /// Access token
    Access,
    /// Refresh token
    Refresh,
}

/// Signs and verifies access and refresh tokens
#[derive(Clone)]
pub struct TokenService {
    access_encoding_key: EncodingKey,
    access_decoding_key: DecodingKey,
    refresh_encoding_key: EncodingKey,
    refresh_decoding_key: DecodingKey,
    validation: Validation,
    config: TokenConfig,
}

impl TokenService {
    /// Initialize a new token service
    pub fn new(config: TokenConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        TokenService {
            access_encoding_key: EncodingKey::from_secret(config.access_secret.as_bytes()),
            access_decoding_key: DecodingKey::from_secret(config.access_secret.as_bytes()),
            refresh_encoding_key: EncodingKey::from_secret(config.refresh_secret.as_bytes()),
            refresh_decoding_key: DecodingKey::from_secret(config.refresh_secret.as_bytes()),
            validation,
            config,
        }
    }

    /// Generate an access token for a user
    pub fn generate_access_token(&self, user_id: Uuid) -> Result<String> {
        self.sign(
            user_id,
            TokenType::Access,
            self.config.access_token_expiry,
            &self.access_encoding_key,
        )
    }

    /// Generate a refresh token for a user
    pub fn generate_refresh_token(&self, user_id: Uuid) -> Result<String> {
        self.sign(
            user_id,
            TokenType::Refresh,
            self.config.refresh_token_expiry,
            &self.refresh_encoding_key,
        )
    }

    /// Validate an access token and return the claims
    pub fn validate_access_token(&self, token: &str) -> Result<Claims> {
        self.verify(token, TokenType::Access, &self.access_decoding_key)
    }

    /// Validate a refresh token and return the claims
    pub fn validate_refresh_token(&self, token: &str) -> Result<Claims> {
        self.verify(token, TokenType::Refresh, &self.refresh_decoding_key)
    }

    /// Get the access token expiry time
    pub fn access_token_expiry(&self) -> u64 {
        self.config.access_token_expiry
    }

    fn sign(
        &self,
        user_id: Uuid,
        token_type: TokenType,
        ttl: u64,
        key: &EncodingKey,
    ) -> Result<String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| anyhow::anyhow!("Failed to get current time: {}", e))?
            .as_secs();

        let claims = Claims {
            sub: user_id,
            iat: now,
            exp: now + ttl,
            token_type,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, key)?;
        Ok(token)
    }

    fn verify(&self, token: &str, expected: TokenType, key: &DecodingKey) -> Result<Claims> {
        let token_data = decode::<Claims>(token, key, &self.validation)?;

        if token_data.claims.token_type != expected {
            anyhow::bail!("Expected {:?} token", expected);
        }

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn service() -> TokenService {
        TokenService::new(TokenConfig {
            access_secret: "access-secret-for-tests".to_string(),
            refresh_secret: "refresh-secret-for-tests".to_string(),
            access_token_expiry: 900,
            refresh_token_expiry: 604800,
        })
    }

    #[test]
    fn test_access_token_round_trip() {
        let service = service();
        let user_id = Uuid::new_v4();

        let token = service.generate_access_token(user_id).unwrap();
        let claims = service.validate_access_token(&token).unwrap();

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.token_type, TokenType::Access);
        assert_eq!(claims.exp - claims.iat, 900);
    }

    #[test]
    fn test_refresh_token_is_not_an_access_token() {
        let service = service();
        let refresh = service.generate_refresh_token(Uuid::new_v4()).unwrap();

        assert!(service.validate_access_token(&refresh).is_err());
        assert!(service.validate_refresh_token(&refresh).is_ok());
    }

    #[test]
    fn test_access_token_is_not_a_refresh_token() {
        let service = service();
        let access = service.generate_access_token(Uuid::new_v4()).unwrap();

        assert!(service.validate_refresh_token(&access).is_err());
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let other = TokenService::new(TokenConfig {
            access_secret: "someone-else".to_string(),
            refresh_secret: "someone-else-refresh".to_string(),
            access_token_expiry: 900,
            refresh_token_expiry: 604800,
        });
        let forged = other.generate_access_token(Uuid::new_v4()).unwrap();

        assert!(service().validate_access_token(&forged).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let service = TokenService::new(TokenConfig {
            access_secret: "access-secret-for-tests".to_string(),
            refresh_secret: "refresh-secret-for-tests".to_string(),
            access_token_expiry: 0,
            refresh_token_expiry: 0,
        });
        let token = service.generate_access_token(Uuid::new_v4()).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(1100));

        assert!(service.validate_access_token(&token).is_err());
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(service().validate_access_token("not-a-jwt").is_err());
    }

    #[test]
    #[serial]
    fn test_token_config_from_env() {
        unsafe {
            std::env::set_var("JWT_SECRET", "a");
            std::env::set_var("REFRESH_SECRET", "b");
            std::env::remove_var("JWT_ACCESS_TOKEN_EXPIRY");
            std::env::remove_var("JWT_REFRESH_TOKEN_EXPIRY");
        }

        let config = TokenConfig::from_env().unwrap();
        assert_eq!(config.access_token_expiry, 900);
        assert_eq!(config.refresh_token_expiry, 604800);

        unsafe {
            std::env::set_var("REFRESH_SECRET", "a");
        }
        assert!(TokenConfig::from_env().is_err());

        unsafe {
            std::env::remove_var("JWT_SECRET");
            std::env::remove_var("REFRESH_SECRET");
        }
        assert!(TokenConfig::from_env().is_err());
    }
}
