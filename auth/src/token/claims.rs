use chrono::Duration;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

/// Session token payload.
///
/// Field order is the serialization order: `sub`, `iat`, `exp`. Issued
/// tokens always carry all three; tokens without `exp` are accepted as
/// non-expiring unless the codec requires expiry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier, e.g. email)
    pub sub: String,

    /// Issued at (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Expiration time (Unix timestamp). May be absent, never `null`.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present_timestamp"
    )]
    pub exp: Option<i64>,
}

/// Only invoked when the field is present; `default` covers absence.
fn present_timestamp<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    i64::deserialize(deserializer).map(Some)
}

impl Claims {
    /// Create claims carrying only a subject.
    pub fn new(sub: impl ToString) -> Self {
        Self {
            sub: sub.to_string(),
            iat: None,
            exp: None,
        }
    }

    /// Create claims issued at `now` and expiring `ttl` later.
    ///
    /// # Arguments
    /// * `sub` - Subject identifier
    /// * `now` - Issuance time (Unix timestamp)
    /// * `ttl` - Time until expiry; sub-second precision is dropped
    pub fn for_subject(sub: impl ToString, now: i64, ttl: Duration) -> Self {
        Self::new(sub)
            .with_issued_at(now)
            .with_expiration(now + ttl.num_seconds())
    }

    /// Set issued at (Unix timestamp).
    pub fn with_issued_at(mut self, iat: i64) -> Self {
        self.iat = Some(iat);
        self
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Check if token is expired.
    ///
    /// A token is still valid at its exact expiry second.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp.map_or(false, |exp| current_timestamp > exp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_claims() {
        let claims = Claims::new("user123");
        assert_eq!(claims.sub, "user123");
        assert!(claims.iat.is_none());
        assert!(claims.exp.is_none());
    }

    #[test]
    fn test_for_subject() {
        let claims = Claims::for_subject("alice@example.com", 1_700_000_000, Duration::minutes(60));

        assert_eq!(claims.sub, "alice@example.com");
        assert_eq!(claims.iat, Some(1_700_000_000));
        assert_eq!(claims.exp, Some(1_700_003_600));
    }

    #[test]
    fn test_is_expired() {
        let claims = Claims::new("user123").with_expiration(1000);

        assert!(!claims.is_expired(999));
        assert!(!claims.is_expired(1000)); // Exactly at expiration
        assert!(claims.is_expired(1001));
    }

    #[test]
    fn test_is_expired_no_exp_claim() {
        let claims = Claims::new("user123");
        assert!(!claims.is_expired(9_999_999_999));
    }

    #[test]
    fn test_serialization_is_canonical() {
        let claims = Claims::for_subject("alice@example.com", 100, Duration::seconds(60));

        let json = serde_json::to_string(&claims).expect("Failed to serialize claims");
        assert_eq!(json, r#"{"sub":"alice@example.com","iat":100,"exp":160}"#);

        let bare = serde_json::to_string(&Claims::new("bob")).expect("Failed to serialize claims");
        assert_eq!(bare, r#"{"sub":"bob"}"#);
    }

    #[test]
    fn test_deserialization_ignores_unknown_fields() {
        let claims: Claims = serde_json::from_str(r#"{"exp":5,"role":"admin","sub":"bob"}"#)
            .expect("Failed to deserialize claims");

        assert_eq!(claims, Claims::new("bob").with_expiration(5));
    }

    #[test]
    fn test_deserialization_rejects_null_or_non_integer_expiry() {
        for payload in [
            r#"{"sub":"bob","exp":null}"#,
            r#"{"sub":"bob","exp":"2000000000"}"#,
            r#"{"sub":"bob","exp":1.5}"#,
        ] {
            let result = serde_json::from_str::<Claims>(payload);
            assert!(result.is_err(), "{} should not deserialize", payload);
        }
    }

    #[test]
    fn test_deserialization_requires_subject() {
        let result = serde_json::from_str::<Claims>(r#"{"iat":1,"exp":2}"#);
        assert!(result.is_err());
    }
}
