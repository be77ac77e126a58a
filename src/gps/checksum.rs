// src/gps/checksum.rs
//! XOR checksum over the sentence payload

use crate::error::{GpsError, Result};
use tracing::warn;

/// Whether a decoder insists on a trailing `*HH` token.
///
/// Standard `$GP` sentences always carry one; the `$GT` vendor family may omit it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumPolicy {
    Required,
    Optional,
}

/// XOR-accumulate `bytes`.
///
/// Unless `include_all` is set, a leading `$` is skipped and accumulation stops
/// at the first `*`. CR and LF always terminate.
pub fn calc_xor_checksum(bytes: &[u8], include_all: bool) -> u8 {
    let start = if !include_all && bytes.first() == Some(&b'$') { 1 } else { 0 };

    let mut cksum = 0u8;
    for &b in &bytes[start..] {
        if !include_all && b == b'*' {
            break;
        }
        if b == b'\r' || b == b'\n' {
            break;
        }
        cksum ^= b;
    }
    cksum
}

/// Two uppercase hex digits
pub fn format_checksum(cksum: u8) -> String {
    format!("{:02X}", cksum)
}

/// Checks the `*HH` token of `sentence` against the computed payload checksum.
pub fn validate_checksum(sentence: &str, policy: ChecksumPolicy) -> Result<()> {
    let star = match sentence.find('*') {
        Some(pos) => pos,
        None => {
            return match policy {
                ChecksumPolicy::Optional => Ok(()),
                ChecksumPolicy::Required => {
                    Err(GpsError::MissingChecksum(sentence.to_string()))
                }
            };
        }
    };

    let expected = calc_xor_checksum(sentence.as_bytes(), false);
    let token = sentence.get(star + 1..star + 3).unwrap_or("");
    let found = parse_hex_byte(token);

    if found != Some(expected) {
        warn!("Expected checksum: 0x{}", format_checksum(expected));
        return Err(GpsError::ChecksumMismatch {
            expected,
            found: token.to_string(),
        });
    }
    Ok(())
}

/// Boolean form of [`validate_checksum`].
pub fn has_valid_checksum(sentence: &str, policy: ChecksumPolicy) -> bool {
    validate_checksum(sentence, policy).is_ok()
}

fn parse_hex_byte(token: &str) -> Option<u8> {
    if token.len() != 2 || !token.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u8::from_str_radix(token, 16).ok()
}
