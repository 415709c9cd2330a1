use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::error::{OtpError, Result};

// HOTP https://datatracker.ietf.org/doc/html/rfc4226

/// Widest code the engine produces; wider requests are rendered zero padded.
pub const MAX_DIGITS: u32 = 8;

type HmacSha1 = Hmac<Sha1>;

pub fn get_hotp(secret: &[u8], counter: u64, digits: u32) -> Result<u32> {
    if digits == 0 {
        return Err(OtpError::InvalidDigitCount(digits));
    }

    let hmac = make_hmac(secret, counter);
    Ok(truncate(&hmac, digits))
}

/// Renders a code with its leading zeros, `42` at 6 digits is `000042`.
pub fn format_code(code: u32, digits: u32) -> String {
    format!("{:0>width$}", code, width = digits as usize)
}

// HMAC_SHA-1 -> 20 byte string
fn make_hmac(secret: &[u8], counter: u64) -> Vec<u8> {
    let mut mac =
        HmacSha1::new_from_slice(secret).expect("HMAC accepts keys of any length");
    mac.update(&counter.to_be_bytes());
    let result = mac.finalize();

    result.into_bytes().to_vec()
}

// reduce to 4 byte string
// then s to num mod 10^Digit
fn truncate(hmac: &[u8], digits: u32) -> u32 {
    let base_code = dynamic_truncation(hmac);

    base_code % 10u32.pow(digits.min(MAX_DIGITS))
}

// DT(String) // String = String[0]...String[19]
// Let OffsetBits be the low-order 4 bits of String[19]
// Offset = StToNum(OffsetBits) // 0 <= OffSet <= 15
// Let P = String[OffSet]...String[OffSet+3]
// Return the Last 31 bits of P
fn dynamic_truncation(hmac: &[u8]) -> u32 {
    let offset = (hmac[hmac.len() - 1] & 0xf) as usize;
    let p = [
        hmac[offset],
        hmac[offset + 1],
        hmac[offset + 2],
        hmac[offset + 3],
    ];
    u32::from_be_bytes(p) & 0x7fff_ffff
}
