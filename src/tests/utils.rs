use std::io::Write;

use clap::{ArgMatches, Command};
use tempfile::NamedTempFile;

pub fn get_cmd_args(
    command_str: &str,
    subcommand: Command,
    arg_vec: &[&str],
) -> Result<ArgMatches, clap::Error> {
    let matches = Command::new("twof")
        .subcommand(subcommand)
        .try_get_matches_from(arg_vec)?;

    match matches.subcommand() {
        Some((cmd, cmd_args)) if cmd == command_str => Ok(cmd_args.clone()),
        _ => panic!("Expected {} subcommand", command_str),
    }
}

pub fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}
