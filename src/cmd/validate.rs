use clap::{arg, command, ArgMatches, Command};

use super::CommandType;
use crate::error::{OtpError, Result};
use crate::registry::SecretRegistry;
use crate::totp::{validate_totp, GetTime};
use crate::utils::is_service_name;
use crate::writer::OutErr;

// time steps accepted either side of the current one
const WINDOW_SIZE: u64 = 1;

pub fn subcommand() -> Command<'static> {
    command!(CommandType::Validate.as_str())
        .about("Validate a one-time password")
        .args(&[
            arg!(<NAME> "Key name to validate the code for").validator(is_service_name),
            arg!(<CODE> "One-time password to validate"),
        ])
}

pub fn run_validate<W>(
    validate_args: &ArgMatches,
    registry: &SecretRegistry,
    clock: &impl GetTime,
    writer: &mut W,
) -> Result<()>
where
    W: OutErr,
{
    let name = validate_args.value_of("NAME").unwrap_or_default();
    let token = validate_args.value_of("CODE").unwrap_or_default();

    let record = registry.lookup(name)?;
    let code = match token.parse::<u32>() {
        Ok(code) if token.len() == record.digits as usize => code,
        _ => return Err(OtpError::InvalidCode(token.to_string())),
    };

    let secret = record.decode_secret()?;
    match validate_totp(&secret, clock.get_now(), record.digits, code, WINDOW_SIZE)? {
        Some(_) => {
            writer.write(&format!("{} valid\n", token));
            Ok(())
        }
        None => Err(OtpError::InvalidCode(token.to_string())),
    }
}
