use base64::alphabet;
use base64::engine::general_purpose::GeneralPurpose;
use base64::engine::general_purpose::GeneralPurposeConfig;
use base64::engine::general_purpose::STANDARD;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::engine::DecodePaddingMode;
use base64::DecodeError;
use base64::Engine;
use subtle::ConstantTimeEq;

/// URL-safe decoder that accepts segments with or without `=` padding.
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encode bytes as an unpadded URL-safe base64 token segment.
pub fn encode_segment(bytes: impl AsRef<[u8]>) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode a URL-safe base64 token segment.
///
/// Padding is optional on input; issued segments never carry it.
pub fn decode_segment(segment: &str) -> Result<Vec<u8>, DecodeError> {
    URL_SAFE_LENIENT.decode(segment)
}

/// Encode bytes with the standard, padded base64 alphabet.
pub fn encode_standard(bytes: impl AsRef<[u8]>) -> String {
    STANDARD.encode(bytes)
}

/// Decode standard, padded base64.
pub fn decode_standard(encoded: &str) -> Result<Vec<u8>, DecodeError> {
    STANDARD.decode(encoded)
}

/// Compare two byte strings without short-circuiting on the first
/// mismatching byte.
///
/// Inputs of different length compare unequal; only the lengths leak.
pub fn constant_time_eq(left: &[u8], right: &[u8]) -> bool {
    left.ct_eq(right).into()
}
