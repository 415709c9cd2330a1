use std::collections::BTreeMap;
use std::time::SystemTime;

use tracing::{debug, warn};

use crate::error::{OtpError, Result};
use crate::hotp::format_code;
use crate::record::{RawEntry, SecretRecord};
use crate::store::SecretStore;
use crate::totp::get_totp;

/// Secrets of one store, keyed by service and loaded once per run.
#[derive(Debug, Default)]
pub struct SecretRegistry {
    records: BTreeMap<String, SecretRecord>,
}

impl SecretRegistry {
    /// Lists the store and fetches every secret. Any store failure aborts
    /// the build, no partial registry is returned.
    pub fn build(store: &impl SecretStore) -> Result<Self> {
        let mut registry = SecretRegistry::default();

        for fragment in store.list_entries()? {
            if fragment.trim().is_empty() {
                continue;
            }
            let entry = RawEntry::parse(&fragment);
            if entry.is_empty() {
                continue;
            }
            if entry.service.is_empty() {
                warn!(account = %entry.account, "skipping keychain item without a service name");
                continue;
            }
            let secret = store.fetch_secret(&entry.service)?;
            let record = SecretRecord::from_entry(entry, secret);
            debug!(
                service = %record.service,
                account = %record.account,
                digits = record.digits,
                "loaded key"
            );
            registry.insert(record);
        }

        if registry.is_empty() {
            debug!("store has no keys");
        }
        Ok(registry)
    }

    // Last write wins for a repeated service.
    pub fn insert(&mut self, record: SecretRecord) -> Option<SecretRecord> {
        self.records.insert(record.service.clone(), record)
    }

    pub fn lookup(&self, service: &str) -> Result<&SecretRecord> {
        self.records
            .get(service)
            .ok_or_else(|| OtpError::UnknownService(service.to_string()))
    }

    /// Current TOTP for `service`, zero padded to the record's digit count.
    pub fn code(&self, service: &str, now: SystemTime) -> Result<String> {
        let record = self.lookup(service)?;
        let secret = record.decode_secret()?;
        let code = get_totp(&secret, now, record.digits)?;
        Ok(format_code(code, record.digits))
    }

    /// Service names in sorted order.
    pub fn services(&self) -> Vec<&str> {
        self.records.keys().map(String::as_str).collect()
    }

    pub fn max_digits(&self) -> u32 {
        self.records
            .values()
            .map(|record| record.digits)
            .max()
            .unwrap_or(0)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
