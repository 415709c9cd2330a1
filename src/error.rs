use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the OTP engine, the registry and the subcommands.
#[derive(Debug, Error)]
pub enum OtpError {
    #[error("the key is not a valid base32 encoding: {0}")]
    InvalidSecretEncoding(#[source] data_encoding::DecodeError),

    #[error("base32 decoder unavailable: {0}")]
    Base32Alphabet(String),

    #[error("no key entered")]
    EmptySecret,

    #[error("invalid digit count {0}, expected at least 1")]
    InvalidDigitCount(u32),

    #[error("no such key {0:?}")]
    UnknownService(String),

    #[error("key {0:?} already exists")]
    AlreadyExists(String),

    #[error("invalid code {0}")]
    InvalidCode(String),

    #[error(transparent)]
    ExternalStoreFailure(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Failures at the credential store boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unable to run {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{command} exited with status {code}: {stderr}")]
    CommandFailed {
        command: String,
        code: i32,
        stderr: String,
    },

    #[error("no secret stored for {0:?}")]
    SecretNotFound(String),

    #[error("cannot find keychain: {0}")]
    KeychainNotFound(String),

    #[error("{command} produced output that is not UTF-8")]
    InvalidOutput { command: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value for {field}: {reason}")]
    Validation { field: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, OtpError>;
