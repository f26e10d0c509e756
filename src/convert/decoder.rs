//! The decoder: data URL in, SVG markup out.
//!
//! - Browser boundary semantics: the payload after the prefix is strictly
//!   percent-decoded (a malformed escape is an error, not a passthrough)
//! - Pure and idempotent: same input, same output, no hidden state

use percent_encoding::percent_decode_str;
use thiserror::Error;

use super::SvgMarkup;

/// The literal prefix an SVG data URL must carry.
///
/// `;base64,` and other media-type parameters are deliberately not accepted;
/// anything that is not this exact prefix is a format error.
pub const DATA_URL_PREFIX: &str = "data:image/svg+xml,";

/// Conversion errors.
///
/// `Format` is the prefix check; `BadEscape` and `Utf8` are the two ways
/// percent-decoding can fail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConvertError {
    #[error("not an SVG data URL (expected `data:image/svg+xml,` prefix)")]
    Format,

    #[error("malformed percent-escape at byte {offset} of the payload")]
    BadEscape { offset: usize },

    #[error("decoded payload is not valid UTF-8")]
    Utf8(#[from] std::str::Utf8Error),
}

/// Decode a data URL into SVG markup.
///
/// The decoded string is returned verbatim; whether it is well-formed XML is
/// the consumer's problem (preview renders it as trusted markup).
pub fn decode(input: &str) -> Result<SvgMarkup, ConvertError> {
    let Some(payload) = input.strip_prefix(DATA_URL_PREFIX) else {
        return Err(ConvertError::Format);
    };

    check_escapes(payload)?;

    // percent-encoding is lenient (a lone `%` passes through unchanged), so
    // strictness lives in check_escapes above; this call only decodes.
    let decoded = percent_decode_str(payload).decode_utf8()?;
    Ok(SvgMarkup::from(decoded.into_owned()))
}

/// Reject malformed escapes: every `%` must be followed by two hex digits.
fn check_escapes(payload: &str) -> Result<(), ConvertError> {
    let bytes = payload.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'%' {
            i += 1;
            continue;
        }
        if i + 2 >= bytes.len()
            || !bytes[i + 1].is_ascii_hexdigit()
            || !bytes[i + 2].is_ascii_hexdigit()
        {
            return Err(ConvertError::BadEscape { offset: i });
        }
        i += 3;
    }
    Ok(())
}
