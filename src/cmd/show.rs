use clap::{command, Command};
use tracing::warn;

use super::CommandType;
use crate::error::Result;
use crate::registry::SecretRegistry;
use crate::totp::GetTime;
use crate::writer::OutErr;

pub fn subcommand() -> Command<'static> {
    command!(CommandType::Show.as_str()).about("Show the current code for every key")
}

pub fn run_show<W>(registry: &SecretRegistry, clock: &impl GetTime, writer: &mut W) -> Result<()>
where
    W: OutErr,
{
    let now = clock.get_now();
    let width = registry.max_digits() as usize;

    // a record that fails is reported and skipped
    for service in registry.services() {
        match registry.code(service, now) {
            Ok(code) => writer.write(&format!("{:<width$}\t{}\n", code, service, width = width)),
            Err(err) => {
                warn!(service, error = %err, "cannot compute code");
                writer.write_err(&format!("twof: {}: {}\n", service, err));
            }
        }
    }
    Ok(())
}
