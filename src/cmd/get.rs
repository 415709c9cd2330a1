use clap::{arg, command, ArgMatches, Command};

use super::CommandType;
use crate::error::Result;
use crate::registry::SecretRegistry;
use crate::totp::GetTime;
use crate::utils::is_service_name;
use crate::writer::OutErr;

pub fn subcommand() -> Command<'static> {
    command!(CommandType::Get.as_str())
        .about("Get the current code for a key")
        .args(&[arg!(<NAME> "Key name to get the code for").validator(is_service_name)])
}

pub fn run_get<W>(
    get_args: &ArgMatches,
    registry: &SecretRegistry,
    clock: &impl GetTime,
    writer: &mut W,
) -> Result<()>
where
    W: OutErr,
{
    let name = get_args.value_of("NAME").unwrap_or_default();

    let code = registry.code(name, clock.get_now())?;
    writer.write(&format!("{}\n", code));
    Ok(())
}
