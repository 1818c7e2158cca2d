pub mod claims;
pub mod codec;
pub mod errors;
pub mod key;

pub use claims::Claims;
pub use codec::Header;
pub use codec::TokenCodec;
pub use codec::TokenSettings;
pub use errors::TokenError;
pub use key::SecretKey;
