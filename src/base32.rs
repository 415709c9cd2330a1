use std::sync::OnceLock;

use data_encoding::{Encoding, BASE32};

use crate::error::{OtpError, Result};

// Authenticator apps hand out keys in lower case, grouped in blocks of four
// and usually without the trailing '=' padding.
pub fn normalize(secret: &str) -> String {
    let mut key: String = secret
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect();

    let pad = (8 - key.len() % 8) % 8;
    key.push_str(&"=".repeat(pad));
    key
}

static LENIENT_BASE32: OnceLock<std::result::Result<Encoding, String>> = OnceLock::new();

pub fn decode(secret: &str) -> Result<Vec<u8>> {
    let key = normalize(secret);
    lenient()?
        .decode(key.as_bytes())
        .map_err(OtpError::InvalidSecretEncoding)
}

// RFC 4648 padded alphabet, but non-zero trailing bits in the last block are
// accepted the way most verifiers accept them. Built once per process.
fn lenient() -> Result<&'static Encoding> {
    LENIENT_BASE32
        .get_or_init(|| {
            let mut spec = BASE32.specification();
            spec.check_trailing_bits = false;
            spec.encoding().map_err(|err| err.to_string())
        })
        .as_ref()
        .map_err(|err| OtpError::Base32Alphabet(err.clone()))
}
