use clap::{command, Command};

use super::CommandType;
use crate::utils::generate_secret;
use crate::writer::OutErr;

pub fn subcommand() -> Command<'static> {
    command!(CommandType::Generate.as_str()).about("Generate a random base32 secret key")
}

pub fn run_generate<W>(writer: &mut W)
where
    W: OutErr,
{
    writer.write(&format!("{}\n", generate_secret()));
}
