use std::collections::BTreeMap;
use std::ops::Add;
use std::time::{Duration, SystemTime};

use secrecy::{ExposeSecret, SecretString};

use crate::error::StoreError;
use crate::record::{digits_marker, RawEntry};
use crate::store::SecretStore;
use crate::totp::GetTime;
use crate::writer::OutErr;

pub struct MockOtpWriter {
    pub out: Vec<u8>,
    pub err: Vec<u8>,
}

impl MockOtpWriter {
    pub fn new() -> Self {
        MockOtpWriter {
            out: Vec::new(),
            err: Vec::new(),
        }
    }

    pub fn out_str(&self) -> String {
        String::from_utf8(self.out.clone()).unwrap()
    }

    pub fn err_str(&self) -> String {
        String::from_utf8(self.err.clone()).unwrap()
    }
}

impl OutErr for MockOtpWriter {
    fn write_err(&mut self, s: &str) {
        self.err.append(&mut s.as_bytes().to_vec());
    }

    fn write(&mut self, s: &str) {
        self.out.append(&mut s.as_bytes().to_vec());
    }
}

/// Clock pinned to an RFC 6238 test time.
pub struct MockClock {
    secs: u64,
}

impl MockClock {
    pub fn new() -> Self {
        MockClock { secs: 59 }
    }

    pub fn at(secs: u64) -> Self {
        MockClock { secs }
    }
}

impl GetTime for MockClock {
    fn get_now(&self) -> SystemTime {
        SystemTime::UNIX_EPOCH.add(Duration::new(self.secs, 0))
    }
}

/// One `dump-keychain` item the way `security` prints it.
pub fn fragment(service: &str, account: &str, digits: u32) -> String {
    fragment_with_marker(service, account, &digits_marker(digits))
}

fn fragment_with_marker(service: &str, account: &str, marker: &str) -> String {
    format!(
        "/Users/me/Library/Keychains/2f.keychain-db\"\nversion: 512\nclass: \"genp\"\nattributes:\n    \"acct\"<blob>=\"{}\"\n    \"desc\"<blob>=\"{}\"\n    \"svce\"<blob>=\"{}\"\n",
        account, marker, service
    )
}

/// In-memory stand-in for the keychain.
pub struct MockStore {
    pub fragments: Vec<String>,
    pub secrets: BTreeMap<String, String>,
    should_list_error: bool,
    should_write_error: bool,
}

impl MockStore {
    pub fn new() -> Self {
        MockStore {
            fragments: Vec::new(),
            secrets: BTreeMap::new(),
            should_list_error: false,
            should_write_error: false,
        }
    }

    pub fn with_entries(entries: &[(&str, &str, u32, &str)]) -> Self {
        let mut store = MockStore::new();
        for (service, account, digits, secret) in entries {
            store.fragments.push(fragment(service, account, *digits));
            store.secrets.insert(service.to_string(), secret.to_string());
        }
        store
    }

    pub fn from_dump(fragments: Vec<String>, secrets: &[(&str, &str)]) -> Self {
        let mut store = MockStore::new();
        store.fragments = fragments;
        for (service, secret) in secrets {
            store.secrets.insert(service.to_string(), secret.to_string());
        }
        store
    }

    pub fn set_should_list_error(&mut self, value: bool) {
        self.should_list_error = value;
    }

    pub fn set_should_write_error(&mut self, value: bool) {
        self.should_write_error = value;
    }

    pub fn entry(&self, service: &str) -> Option<RawEntry> {
        self.fragments
            .iter()
            .map(|fragment| RawEntry::parse(fragment))
            .find(|entry| entry.service == service)
    }

    fn failure(command: &str) -> StoreError {
        StoreError::CommandFailed {
            command: command.to_string(),
            code: 1,
            stderr: "MockStore failure".to_string(),
        }
    }
}

impl SecretStore for MockStore {
    fn list_entries(&self) -> Result<Vec<String>, StoreError> {
        if self.should_list_error {
            return Err(MockStore::failure("dump-keychain"));
        }
        Ok(self.fragments.clone())
    }

    fn fetch_secret(&self, service: &str) -> Result<SecretString, StoreError> {
        self.secrets
            .get(service)
            .map(|secret| SecretString::from(secret.clone()))
            .ok_or_else(|| StoreError::SecretNotFound(service.to_string()))
    }

    fn store_secret(
        &mut self,
        service: &str,
        account: &str,
        secret: &SecretString,
        digits_marker: &str,
    ) -> Result<(), StoreError> {
        if self.should_write_error {
            return Err(MockStore::failure("add-generic-password"));
        }
        self.fragments
            .push(fragment_with_marker(service, account, digits_marker));
        self.secrets
            .insert(service.to_string(), secret.expose_secret().to_string());
        Ok(())
    }

    fn delete_secret(&mut self, service: &str) -> Result<(), StoreError> {
        if self.should_write_error {
            return Err(MockStore::failure("delete-generic-password"));
        }
        if self.secrets.remove(service).is_none() {
            return Err(StoreError::SecretNotFound(service.to_string()));
        }
        self.fragments
            .retain(|fragment| RawEntry::parse(fragment).service != service);
        Ok(())
    }
}
