//! Percent codec for individual path segments.
//!
//! Raw display names are stored percent-encoded inside object keys so that
//! reserved characters (`/`, `?`, `#`) can never be misread as separators.
//! Encoding leans on the `percent-encoding` crate; decoding is a strict
//! validating parse, because the lenient ecosystem decoders pass malformed
//! `%` escapes through unchanged and the codec contract here requires them
//! to fail instead.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::error::{Error, Result};

/// Everything outside alphanumerics and the unreserved safelist is escaped.
const SEGMENT_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode one raw path segment.
///
/// The output contains no literal `/`, and `decode_segment` inverts it
/// exactly for any input, including empty strings, unicode, and strings
/// already containing `%`.
pub fn encode_segment(raw: &str) -> String {
    utf8_percent_encode(raw, SEGMENT_ESCAPE).to_string()
}

/// Decode one percent-encoded path segment.
///
/// Fails on a `%` not followed by two hex digits, on a raw `/`, and on
/// escape sequences that do not decode to valid UTF-8.
pub fn decode_segment(encoded: &str) -> Result<String> {
    let bytes = encoded.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let hi = bytes.get(i + 1).and_then(|b| (*b as char).to_digit(16));
                let lo = bytes.get(i + 2).and_then(|b| (*b as char).to_digit(16));
                match (hi, lo) {
                    (Some(hi), Some(lo)) => {
                        out.push((hi * 16 + lo) as u8);
                        i += 3;
                    }
                    _ => return Err(Error::bad_escape(encoded, i)),
                }
            }
            b'/' => return Err(Error::raw_slash(encoded)),
            other => {
                out.push(other);
                i += 1;
            }
        }
    }

    String::from_utf8(out).map_err(|_| Error::not_utf8(encoded))
}
