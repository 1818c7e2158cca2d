pub mod errors;
pub mod hasher;

pub use errors::PasswordError;
pub use hasher::EncodedHash;
pub use hasher::PasswordHasher;
