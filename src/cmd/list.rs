use clap::{command, Command};

use super::CommandType;
use crate::registry::SecretRegistry;
use crate::writer::OutErr;

pub fn subcommand() -> Command<'static> {
    command!(CommandType::List.as_str()).about("List all keys")
}

pub fn run_list<W>(registry: &SecretRegistry, writer: &mut W)
where
    W: OutErr,
{
    for service in registry.services() {
        writer.write(&format!("{}\n", service));
    }
}
