use chrono::Duration;

use crate::clock::Clock;
use crate::clock::SystemClock;
use crate::config::AuthConfig;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::token::Claims;
use crate::token::TokenCodec;
use crate::token::TokenError;

const BEARER_PREFIX: &str = "Bearer ";

/// Authentication coordinator combining password verification and token
/// issuance.
///
/// Exposes the four operations the web layer calls (`hash_password`,
/// `verify_password`, `create_token`, `decode_token`) plus the login and
/// bearer-header flows built on them. Holds no mutable state; share it
/// behind an `Arc`.
pub struct Authenticator<C: Clock = SystemClock> {
    password_hasher: PasswordHasher,
    token_codec: TokenCodec<C>,
}

/// Result of successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    /// Signed access token
    pub access_token: String,

    /// Always "bearer"
    pub token_type: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Authenticator<SystemClock> {
    /// Create a new authenticator from loaded configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self::with_codec(TokenCodec::new(config.secret(), config.token_settings()))
    }
}

impl<C: Clock> Authenticator<C> {
    /// Create an authenticator around an existing token codec.
    pub fn with_codec(token_codec: TokenCodec<C>) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_codec,
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `EntropyUnavailable` - No salt could be generated
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a password against a stored hash. Malformed hashes never match.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Issue a token for `subject`, using the configured lifetime when
    /// `ttl` is `None`.
    ///
    /// # Errors
    /// * `TokenError` - Token generation failed
    pub fn create_token(&self, subject: &str, ttl: Option<Duration>) -> Result<String, TokenError> {
        self.token_codec.issue(subject, ttl)
    }

    /// Verify a token and return its claims, or `None` if it is malformed,
    /// forged or expired.
    pub fn decode_token(&self, token: &str) -> Option<Claims> {
        self.token_codec.verify(token)
    }

    /// Verify credentials and generate an access token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject` - Identifier to embed in the token (e.g. email)
    ///
    /// # Returns
    /// AuthenticationResult with access token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `TokenError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.verify_password(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.create_token(subject, None)?;

        Ok(AuthenticationResult {
            access_token,
            token_type: "bearer".to_string(),
        })
    }

    /// Verify the token carried by an `Authorization: Bearer <token>` header
    /// value.
    pub fn authorize(&self, authorization: &str) -> Option<Claims> {
        let Some(token) = authorization.strip_prefix(BEARER_PREFIX) else {
            tracing::debug!("Authorization header is not a bearer credential");
            return None;
        };

        self.decode_token(token.trim())
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;
    use crate::token::SecretKey;
    use crate::token::TokenSettings;

    mock! {
        pub TestClock {}

        impl Clock for TestClock {
            fn now(&self) -> i64;
        }
    }

    const T: i64 = 1_700_000_000;

    fn authenticator_at(now: i64) -> Authenticator<MockTestClock> {
        let mut clock = MockTestClock::new();
        clock.expect_now().return_const(now);

        Authenticator::with_codec(TokenCodec::with_clock(
            SecretKey::from("test_secret_key_at_least_32_bytes!"),
            TokenSettings::default(),
            clock,
        ))
    }

    #[test]
    fn test_authenticate_success() {
        let authenticator = authenticator_at(T);

        let password = "my_password";
        let hash = authenticator
            .hash_password(password)
            .expect("Failed to hash password");

        let result = authenticator
            .authenticate(password, &hash, "alice@example.com")
            .expect("Authentication failed");

        assert!(!result.access_token.is_empty());
        assert_eq!(result.token_type, "bearer");

        let claims = authenticator
            .decode_token(&result.access_token)
            .expect("Token validation failed");
        assert_eq!(claims.sub, "alice@example.com");
        assert_eq!(claims.iat, Some(T));
        assert_eq!(claims.exp, Some(T + 24 * 60 * 60));
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = authenticator_at(T);

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        let result = authenticator.authenticate("wrong_password", &hash, "alice@example.com");
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_authenticate_malformed_hash() {
        let authenticator = authenticator_at(T);

        let result = authenticator.authenticate("my_password", "not-a-hash", "alice@example.com");
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_create_and_decode_token() {
        let authenticator = authenticator_at(T);

        let token = authenticator
            .create_token("user123", Some(Duration::seconds(60)))
            .expect("Failed to generate token");

        let claims = authenticator
            .decode_token(&token)
            .expect("Failed to validate token");
        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.exp, Some(T + 60));

        assert!(authenticator_at(T + 61).decode_token(&token).is_none());
    }

    #[test]
    fn test_authorize_bearer_header() {
        let authenticator = authenticator_at(T);
        let token = authenticator
            .create_token("user123", None)
            .expect("Failed to generate token");

        let claims = authenticator
            .authorize(&format!("Bearer {}", token))
            .expect("Bearer header should authorize");
        assert_eq!(claims.sub, "user123");

        assert!(authenticator.authorize(&token).is_none());
        assert!(authenticator.authorize(&format!("Basic {}", token)).is_none());
        assert!(authenticator.authorize("Bearer ").is_none());
        assert!(authenticator.authorize("Bearer invalid.token.here").is_none());
    }
}
