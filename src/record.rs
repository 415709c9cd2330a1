use secrecy::{ExposeSecret, SecretString};

use crate::base32;
use crate::error::Result;

// Each item in a `security dump-keychain` listing starts with this header.
const FRAGMENT_SEPARATOR: &str = "keychain: \"";

const ACCOUNT_TAG: &str = "acct";
const SERVICE_TAG: &str = "svce";
const DESCRIPTION_TAG: &str = "desc";

/// Text attributes of one keychain item, as scraped from a dump fragment.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RawEntry {
    pub service: String,
    pub account: String,
    pub description: String,
}

impl RawEntry {
    /// Scans the attribute lines of a fragment, e.g.
    ///
    /// ```text
    ///     "acct"<blob>="github"
    ///     "desc"<blob>="xxxxxx"
    ///     "svce"<blob>="github"
    /// ```
    ///
    /// Unknown lines are skipped and a repeated tag keeps its last value.
    pub fn parse(fragment: &str) -> Self {
        let mut entry = RawEntry::default();
        for line in fragment.lines() {
            let (tag, value) = match parse_attribute(line) {
                Some(attribute) => attribute,
                None => continue,
            };
            match tag {
                ACCOUNT_TAG => entry.account = value.to_string(),
                SERVICE_TAG => entry.service = value.to_string(),
                DESCRIPTION_TAG => entry.description = value.to_string(),
                _ => (),
            }
        }
        entry
    }

    pub fn is_empty(&self) -> bool {
        self.service.is_empty() && self.account.is_empty() && self.description.is_empty()
    }

    pub fn digits(&self) -> u32 {
        digits_from_marker(&self.description)
    }
}

// `"<tag>"<blob>="<value>"` with a quoted string value. Attributes the dump
// renders as hex or <NULL> do not match.
fn parse_attribute(line: &str) -> Option<(&str, &str)> {
    let rest = line.trim_start().strip_prefix('"')?;
    let (tag, rest) = rest.split_once('"')?;
    let value = rest.strip_prefix("<blob>=")?;
    if !value.starts_with('"') {
        return None;
    }
    Some((tag, value.trim_matches('"')))
}

/// Splits a whole dump into per-item fragments, dropping empty ones.
pub fn split_dump(dump: &str) -> Vec<&str> {
    dump.split(FRAGMENT_SEPARATOR)
        .filter(|fragment| !fragment.trim().is_empty())
        .collect()
}

// The keychain item has no numeric attribute to hold the digit count, so it
// travels as the length of the description.
pub fn digits_marker(digits: u32) -> String {
    "x".repeat(digits as usize)
}

pub fn digits_from_marker(description: &str) -> u32 {
    description.chars().count() as u32
}

/// One enrolled credential.
#[derive(Debug)]
pub struct SecretRecord {
    pub service: String,
    pub account: String,
    pub digits: u32,
    secret: SecretString,
}

impl SecretRecord {
    pub fn new(service: String, account: String, digits: u32, secret: SecretString) -> Self {
        SecretRecord {
            service,
            account,
            digits,
            secret,
        }
    }

    pub fn from_entry(entry: RawEntry, secret: SecretString) -> Self {
        let digits = entry.digits();
        SecretRecord::new(entry.service, entry.account, digits, secret)
    }

    pub fn decode_secret(&self) -> Result<Vec<u8>> {
        base32::decode(self.secret.expose_secret())
    }
}
