//! Credential and session-token library
//!
//! Provides the authentication core of the ContentCraft backend:
//! - Password hashing (PBKDF2-HMAC-SHA256, `pbkdf2_sha256$<salt>$<key>`)
//! - Stateless signed session tokens (`<header>.<payload>.<signature>`,
//!   HMAC-SHA256 over base64url segments)
//! - Authentication coordination (login, bearer header verification)
//!
//! The web and persistence layers call into this crate; it performs no I/O
//! besides reading the OS random source and the clock.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use contentcraft_auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("other_password", &hash));
//! ```
//!
//! ## Session Tokens
//! ```
//! use chrono::Duration;
//! use contentcraft_auth::{SecretKey, TokenCodec, TokenSettings};
//!
//! let codec = TokenCodec::new(SecretKey::from("s3cr3t"), TokenSettings::default());
//! let token = codec.issue("alice@example.com", Some(Duration::minutes(5))).unwrap();
//! let claims = codec.verify(&token).unwrap();
//! assert_eq!(claims.sub, "alice@example.com");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use contentcraft_auth::{AuthConfig, Authenticator};
//!
//! let config = AuthConfig::load().unwrap();
//! let auth = Authenticator::new(&config);
//!
//! // Signup: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! let result = auth.authenticate("password123", &hash, "alice@example.com").unwrap();
//!
//! // Authenticated request
//! let header = format!("Bearer {}", result.access_token);
//! let claims = auth.authorize(&header).unwrap();
//! assert_eq!(claims.sub, "alice@example.com");
//! ```

pub mod authenticator;
pub mod clock;
pub mod config;
pub mod encoding;
pub mod password;
pub mod token;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use clock::Clock;
pub use clock::SystemClock;
pub use config::AuthConfig;
pub use password::EncodedHash;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::Claims;
pub use token::SecretKey;
pub use token::TokenCodec;
pub use token::TokenError;
pub use token::TokenSettings;
