use std::fmt;
use std::hint::black_box;

use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;

use super::errors::PasswordError;
use crate::encoding::constant_time_eq;
use crate::encoding::decode_standard;
use crate::encoding::encode_standard;

/// Algorithm tag leading every encoded hash produced by this scheme.
pub const ALGORITHM_TAG: &str = "pbkdf2_sha256";

/// PBKDF2-HMAC-SHA256 iteration count.
pub const ITERATIONS: u32 = 260_000;

/// Random salt length in bytes.
pub const SALT_LEN: usize = 16;

/// Derived key length in bytes (SHA-256 output size).
pub const KEY_LEN: usize = 32;

const DELIMITER: char = '$';

/// Salt used to burn one derivation when a stored hash cannot be parsed.
const DUMMY_SALT: [u8; SALT_LEN] = [0u8; SALT_LEN];

/// Parsed form of a stored password hash: `pbkdf2_sha256$<salt>$<key>`.
///
/// Salt and derived key are standard, padded base64.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedHash {
    salt: Vec<u8>,
    derived_key: Vec<u8>,
}

impl EncodedHash {
    /// Parse a stored hash.
    ///
    /// # Errors
    /// * `MalformedHash` - Wrong segment count or invalid base64
    /// * `UnsupportedAlgorithm` - Tag is not `pbkdf2_sha256`
    pub fn parse(encoded: &str) -> Result<Self, PasswordError> {
        let segments: Vec<&str> = encoded.split(DELIMITER).collect();

        let [tag, salt_b64, key_b64] = segments.as_slice() else {
            return Err(PasswordError::MalformedHash(format!(
                "expected 3 segments, found {}",
                segments.len()
            )));
        };

        if *tag != ALGORITHM_TAG {
            return Err(PasswordError::UnsupportedAlgorithm(tag.to_string()));
        }

        let salt = decode_standard(salt_b64)
            .map_err(|e| PasswordError::MalformedHash(format!("salt segment: {}", e)))?;
        let derived_key = decode_standard(key_b64)
            .map_err(|e| PasswordError::MalformedHash(format!("key segment: {}", e)))?;

        Ok(Self { salt, derived_key })
    }

    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    pub fn derived_key(&self) -> &[u8] {
        &self.derived_key
    }
}

impl fmt::Display for EncodedHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}{}",
            ALGORITHM_TAG,
            DELIMITER,
            encode_standard(&self.salt),
            DELIMITER,
            encode_standard(&self.derived_key)
        )
    }
}

/// Password hashing implementation.
///
/// PBKDF2-HMAC-SHA256 with a fresh 16-byte salt per hash. Stateless; safe to
/// share across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Create a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password for storage.
    ///
    /// This is deliberately slow; callers on an async runtime should run it
    /// on a blocking pool.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// Encoded hash `pbkdf2_sha256$<salt-b64>$<key-b64>`
    ///
    /// # Errors
    /// * `EntropyUnavailable` - The OS random source could not produce a salt
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let mut salt = [0u8; SALT_LEN];
        OsRng
            .try_fill_bytes(&mut salt)
            .map_err(|e| PasswordError::EntropyUnavailable(e.to_string()))?;

        let derived_key = derive_key(password, &salt);

        let encoded = EncodedHash {
            salt: salt.to_vec(),
            derived_key: derived_key.to_vec(),
        };

        Ok(encoded.to_string())
    }

    /// Verify a password against a stored hash.
    ///
    /// Any malformed stored value counts as a mismatch. A key derivation
    /// runs either way so both outcomes take the same time.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored` - Encoded hash produced by [`PasswordHasher::hash`]
    ///
    /// # Returns
    /// True if password matches, false otherwise
    pub fn verify(&self, password: &str, stored: &str) -> bool {
        match EncodedHash::parse(stored) {
            Ok(encoded) => {
                let candidate = derive_key(password, encoded.salt());
                constant_time_eq(&candidate, encoded.derived_key())
            }
            Err(e) => {
                tracing::debug!(reason = %e, "Stored password hash rejected");
                black_box(derive_key(password, &DUMMY_SALT));
                false
            }
        }
    }
}

fn derive_key(password: &str, salt: &[u8]) -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, ITERATIONS, &mut key);
    key
}
