use std::io::BufRead;

use clap::{arg, command, Arg, ArgMatches, Command};
use secrecy::SecretString;

use super::CommandType;
use crate::base32;
use crate::error::{OtpError, Result, StoreError};
use crate::record::digits_marker;
use crate::store::SecretStore;
use crate::utils::{is_service_name, strip_whitespace};
use crate::writer::OutErr;

pub fn subcommand() -> Command<'static> {
    command!(CommandType::Add.as_str())
        .about("Add a key, reading the secret from stdin")
        .args(&[
            arg!(<NAME> "Key name to create").validator(is_service_name),
            Arg::new("seven")
                .short('7')
                .help("Generate 7-digit codes")
                .conflicts_with("eight"),
            Arg::new("eight").short('8').help("Generate 8-digit codes"),
        ])
}

pub fn digits_from_args(add_args: &ArgMatches, default_digits: u32) -> u32 {
    if add_args.is_present("seven") {
        7
    } else if add_args.is_present("eight") {
        8
    } else {
        default_digits
    }
}

pub fn run_add<W>(
    add_args: &ArgMatches,
    store: &mut impl SecretStore,
    default_digits: u32,
    input: &mut impl BufRead,
    writer: &mut W,
) -> Result<()>
where
    W: OutErr,
{
    let name = add_args.value_of("NAME").unwrap_or_default();
    let digits = digits_from_args(add_args, default_digits);

    match store.fetch_secret(name) {
        Ok(_) => return Err(OtpError::AlreadyExists(name.to_string())),
        Err(StoreError::SecretNotFound(_)) => (),
        Err(err) => return Err(err.into()),
    }

    writer.write_err(&format!("twof key for {}: ", name));
    let mut line = String::new();
    input.read_line(&mut line)?;
    let key = strip_whitespace(&line);
    line.clear();

    if key.is_empty() {
        return Err(OtpError::EmptySecret);
    }
    base32::decode(&key)?;

    store.store_secret(name, name, &SecretString::from(key), &digits_marker(digits))?;
    writer.write(&format!("Key \"{}\" added\n", name));
    Ok(())
}
