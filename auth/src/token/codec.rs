use chrono::Duration;
use hmac::Hmac;
use hmac::Mac;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde::Serialize;
use sha2::Sha256;

use super::claims::Claims;
use super::errors::TokenError;
use super::key::SecretKey;
use crate::clock::Clock;
use crate::clock::SystemClock;
use crate::encoding::constant_time_eq;
use crate::encoding::decode_segment;
use crate::encoding::encode_segment;

type HmacSha256 = Hmac<Sha256>;

/// Algorithm label written to token headers unless configured otherwise.
pub const DEFAULT_ALGORITHM: &str = "HS256";

/// Token type written to token headers.
///
/// "JWT" rather than a custom tag: tokens already issued by the existing
/// backend carry it, and standard JWT tooling can inspect them.
pub const TOKEN_TYPE: &str = "JWT";

const SEPARATOR: char = '.';

/// Token header. Field order is the serialization order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Header {
    pub alg: String,
    pub typ: String,
}

/// Behaviour knobs for [`TokenCodec`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSettings {
    /// Label placed in the header `alg` field. Signing is always HMAC-SHA256.
    pub algorithm: String,

    /// Lifetime of tokens issued without an explicit TTL.
    pub default_ttl: Duration,

    /// Reject tokens whose header `alg` differs from `algorithm`.
    pub strict_algorithm: bool,

    /// Reject tokens without an `exp` claim.
    pub require_expiry: bool,
}

impl Default for TokenSettings {
    fn default() -> Self {
        Self {
            algorithm: DEFAULT_ALGORITHM.to_string(),
            default_ttl: Duration::minutes(60 * 24),
            strict_algorithm: true,
            require_expiry: false,
        }
    }
}

/// Issues and verifies compact signed session tokens
/// (`<header>.<payload>.<signature>`, each segment unpadded base64url).
///
/// The codec holds no session state: a token is valid when its HMAC-SHA256
/// signature matches under the shared secret and its expiry has not passed.
pub struct TokenCodec<C: Clock = SystemClock> {
    secret: SecretKey,
    settings: TokenSettings,
    clock: C,
}

impl TokenCodec<SystemClock> {
    /// Create a codec reading the system clock.
    ///
    /// # Arguments
    /// * `secret` - Shared signing key (identical across all instances)
    /// * `settings` - Header label, default TTL and validation knobs
    pub fn new(secret: SecretKey, settings: TokenSettings) -> Self {
        Self::with_clock(secret, settings, SystemClock)
    }
}

impl<C: Clock> TokenCodec<C> {
    /// Create a codec with an explicit time source.
    pub fn with_clock(secret: SecretKey, settings: TokenSettings, clock: C) -> Self {
        Self {
            secret,
            settings,
            clock,
        }
    }

    pub fn settings(&self) -> &TokenSettings {
        &self.settings
    }

    /// Issue a token for `subject`, valid from now for `ttl`.
    ///
    /// # Arguments
    /// * `subject` - Subject identifier placed in `sub`
    /// * `ttl` - Lifetime; falls back to the configured default when `None`
    ///
    /// # Errors
    /// * `EncodingFailed` - Serialization or MAC initialisation failed
    pub fn issue(&self, subject: &str, ttl: Option<Duration>) -> Result<String, TokenError> {
        let ttl = ttl.unwrap_or(self.settings.default_ttl);
        let claims = Claims::for_subject(subject, self.clock.now(), ttl);

        self.encode(&claims)
    }

    /// Sign arbitrary claims into a token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Serialization or MAC initialisation failed
    pub fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        let header = Header {
            alg: self.settings.algorithm.clone(),
            typ: TOKEN_TYPE.to_string(),
        };

        let signing_input = format!(
            "{}{}{}",
            encode_json(&header)?,
            SEPARATOR,
            encode_json(claims)?
        );
        let signature = self.sign(&signing_input)?;

        Ok(format!("{}{}{}", signing_input, SEPARATOR, signature))
    }

    /// Verify a token and return its claims.
    ///
    /// Malformed, forged, mislabelled and expired tokens are all rejected
    /// the same way; the reason is only logged.
    pub fn verify(&self, token: &str) -> Option<Claims> {
        match self.validate(token) {
            Ok(claims) => Some(claims),
            Err(e) => {
                tracing::debug!(reason = %e, "Token rejected");
                None
            }
        }
    }

    fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        let segments: Vec<&str> = token.split(SEPARATOR).collect();

        let [header_b64, payload_b64, signature_b64] = segments.as_slice() else {
            return Err(TokenError::Malformed(format!(
                "expected 3 segments, found {}",
                segments.len()
            )));
        };

        let signing_input = &token[..header_b64.len() + 1 + payload_b64.len()];
        let expected = self.sign(signing_input)?;
        if !constant_time_eq(expected.as_bytes(), signature_b64.as_bytes()) {
            return Err(TokenError::SignatureMismatch);
        }

        if self.settings.strict_algorithm {
            let header: Header = decode_json(header_b64)?;
            if header.alg != self.settings.algorithm {
                return Err(TokenError::AlgorithmMismatch {
                    expected: self.settings.algorithm.clone(),
                    found: header.alg,
                });
            }
        }

        let claims: Claims = decode_json(payload_b64)?;

        if claims.exp.is_none() && self.settings.require_expiry {
            return Err(TokenError::MissingClaim("exp".to_string()));
        }

        if claims.is_expired(self.clock.now()) {
            return Err(TokenError::TokenExpired);
        }

        Ok(claims)
    }

    fn sign(&self, signing_input: &str) -> Result<String, TokenError> {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))?;
        mac.update(signing_input.as_bytes());

        Ok(encode_segment(mac.finalize().into_bytes()))
    }
}

fn encode_json<T: Serialize>(value: &T) -> Result<String, TokenError> {
    serde_json::to_vec(value)
        .map(|bytes| encode_segment(bytes))
        .map_err(|e| TokenError::EncodingFailed(e.to_string()))
}

fn decode_json<T: DeserializeOwned>(segment: &str) -> Result<T, TokenError> {
    let bytes = decode_segment(segment)
        .map_err(|e| TokenError::Malformed(format!("invalid base64: {}", e)))?;

    serde_json::from_slice(&bytes).map_err(|e| TokenError::Malformed(format!("invalid JSON: {}", e)))
}
