use std::process::Command;

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info};

use crate::error::{OtpError, StoreError};

// exit status of `security` when an item or keychain is missing
const ITEM_NOT_FOUND: i32 = 44;

/// Operations the OTP registry needs from a credential vault.
pub trait SecretStore {
    /// Raw dump fragments, one per stored item.
    fn list_entries(&self) -> Result<Vec<String>, StoreError>;

    fn fetch_secret(&self, service: &str) -> Result<SecretString, StoreError>;

    fn store_secret(
        &mut self,
        service: &str,
        account: &str,
        secret: &SecretString,
        digits_marker: &str,
    ) -> Result<(), StoreError>;

    fn delete_secret(&mut self, service: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeychainInfo {
    pub path: String,
    pub name: String,
}

/// Parses `security list-keychains` output, one quoted path per line.
pub fn parse_keychain_list(output: &str) -> Vec<KeychainInfo> {
    output
        .lines()
        .map(|line| line.trim_matches(|c: char| c == ' ' || c == '"'))
        .filter(|path| !path.is_empty())
        .map(|path| {
            let file_name = path.rsplit('/').next().unwrap_or(path);
            KeychainInfo {
                path: path.to_string(),
                name: file_name
                    .strip_suffix("-db")
                    .unwrap_or(file_name)
                    .to_string(),
            }
        })
        .collect()
}

/// Keychain backend driving the macOS `security` tool.
pub struct KeychainCli {
    command: String,
    keychain: String,
}

impl KeychainCli {
    pub fn new(command: &str, keychain: &str) -> Self {
        KeychainCli {
            command: command.to_string(),
            keychain: keychain.to_string(),
        }
    }

    pub fn keychain(&self) -> &str {
        &self.keychain
    }

    pub fn list_keychains(&self) -> Result<Vec<KeychainInfo>, StoreError> {
        let output = self.run(&["list-keychains"])?;
        Ok(parse_keychain_list(&output))
    }

    pub fn find_keychain(&self) -> Result<KeychainInfo, StoreError> {
        self.list_keychains()?
            .into_iter()
            .find(|keychain| keychain.name == self.keychain)
            .ok_or_else(|| StoreError::KeychainNotFound(self.keychain.clone()))
    }

    /// Creates the keychain with the password from `prompt` when it is not
    /// in the user search list yet.
    pub fn ensure_keychain<F>(&self, prompt: F) -> Result<KeychainInfo, OtpError>
    where
        F: FnOnce() -> std::io::Result<SecretString>,
    {
        match self.find_keychain() {
            Ok(keychain) => return Ok(keychain),
            Err(StoreError::KeychainNotFound(_)) => (),
            Err(err) => return Err(err.into()),
        }

        let password = prompt()?;
        self.run(&[
            "create-keychain",
            "-p",
            password.expose_secret(),
            &self.keychain,
        ])?;
        self.add_to_search_list()?;
        info!(keychain = %self.keychain, "created keychain");

        Ok(self.find_keychain()?)
    }

    fn add_to_search_list(&self) -> Result<(), StoreError> {
        let existing = self.list_keychains()?;
        let mut args = vec!["list-keychains", "-d", "user", "-s", self.keychain.as_str()];
        args.extend(existing.iter().map(|keychain| keychain.name.as_str()));
        self.run(&args)?;
        Ok(())
    }

    fn run(&self, args: &[&str]) -> Result<String, StoreError> {
        let description = describe(&self.command, args);
        debug!(command = %description, "running");

        let output = Command::new(&self.command)
            .args(args)
            .output()
            .map_err(|source| StoreError::Spawn {
                command: description.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(StoreError::CommandFailed {
                command: description,
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8(output.stdout)
            .map_err(|_| StoreError::InvalidOutput { command: description })?;
        Ok(stdout.trim_matches(|c: char| c == '\n' || c == ' ').to_string())
    }
}

impl SecretStore for KeychainCli {
    fn list_entries(&self) -> Result<Vec<String>, StoreError> {
        let dump = self.run(&["dump-keychain", "-d", &self.keychain])?;
        let entries: Vec<String> = crate::record::split_dump(&dump)
            .into_iter()
            .map(String::from)
            .collect();
        debug!(count = entries.len(), keychain = %self.keychain, "listed keychain items");
        Ok(entries)
    }

    fn fetch_secret(&self, service: &str) -> Result<SecretString, StoreError> {
        match self.run(&["find-generic-password", "-w", "-s", service, &self.keychain]) {
            Ok(secret) => Ok(SecretString::from(secret)),
            Err(StoreError::CommandFailed { code, .. }) if code == ITEM_NOT_FOUND => {
                Err(StoreError::SecretNotFound(service.to_string()))
            }
            Err(err) => Err(err),
        }
    }

    fn store_secret(
        &mut self,
        service: &str,
        account: &str,
        secret: &SecretString,
        digits_marker: &str,
    ) -> Result<(), StoreError> {
        self.run(&[
            "add-generic-password",
            "-a",
            account,
            "-s",
            service,
            "-w",
            secret.expose_secret(),
            "-D",
            digits_marker,
            &self.keychain,
        ])?;
        info!(service, "stored secret");
        Ok(())
    }

    fn delete_secret(&mut self, service: &str) -> Result<(), StoreError> {
        match self.run(&["delete-generic-password", "-s", service, &self.keychain]) {
            Ok(_) => {
                info!(service, "deleted secret");
                Ok(())
            }
            Err(StoreError::CommandFailed { code, .. }) if code == ITEM_NOT_FOUND => {
                Err(StoreError::SecretNotFound(service.to_string()))
            }
            Err(err) => Err(err),
        }
    }
}

// Command line for logs and errors with passwords masked.
fn describe(command: &str, args: &[&str]) -> String {
    let takes_secret = matches!(
        args.first(),
        Some(&"add-generic-password") | Some(&"create-keychain")
    );
    let mut parts = vec![command];
    let mut previous = "";
    for &arg in args {
        if takes_secret && matches!(previous, "-w" | "-p") {
            parts.push("***");
        } else {
            parts.push(arg);
        }
        previous = arg;
    }
    parts.join(" ")
}
