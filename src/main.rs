use std::io::{self, BufRead};
use std::path::Path;
use std::process;

use clap::{arg, command, ArgMatches, Command};
use secrecy::SecretString;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod base32;
mod cmd;
mod config;
mod error;
mod hotp;
mod record;
mod registry;
mod store;
mod totp;
mod utils;
mod writer;

#[cfg(test)]
mod tests;

use cmd::{add, delete, generate, get, list, show, validate, CommandType};
use config::Config;
use error::Result;
use registry::SecretRegistry;
use store::KeychainCli;
use totp::Clock;
use writer::{OtpWriter, OutErr};

const LOG_ENV: &str = "TWOF_LOG";

fn cli() -> Command<'static> {
    command!()
        .about("Time-based one-time passwords from secrets kept in a keychain")
        .arg(arg!(-c --config <PATH> "Config file to use instead of the default").required(false))
        .subcommand(show::subcommand())
        .subcommand(get::subcommand())
        .subcommand(list::subcommand())
        .subcommand(add::subcommand())
        .subcommand(delete::subcommand())
        .subcommand(generate::subcommand())
        .subcommand(validate::subcommand())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(matches: &ArgMatches) -> Result<Config> {
    let config = match matches.value_of("config") {
        Some(path) => Config::load(Path::new(path))?,
        None => Config::load_default()?,
    };
    Ok(config)
}

fn prompt_keychain_password<W: OutErr>(
    writer: &mut W,
    input: &mut impl BufRead,
    keychain: &str,
) -> io::Result<SecretString> {
    writer.write_err(&format!("twof password for new keychain {}: ", keychain));
    let mut password = String::new();
    input.read_line(&mut password)?;
    Ok(SecretString::from(
        password.trim_end_matches(&['\r', '\n'][..]).to_string(),
    ))
}

fn run(matches: &ArgMatches, writer: &mut OtpWriter) -> Result<()> {
    let config = load_config(matches)?;
    let mut store = KeychainCli::new(&config.security_command, &config.keychain);

    let (command, sub_args) = match matches.subcommand() {
        Some((name, sub_args)) => (CommandType::from_name(name), Some(sub_args)),
        None => (Some(CommandType::Show), None),
    };
    let command = match command {
        Some(command) => command,
        None => return Ok(()),
    };

    if let CommandType::Generate = command {
        generate::run_generate(writer);
        return Ok(());
    }

    let keychain = store.ensure_keychain(|| {
        prompt_keychain_password(writer, &mut io::stdin().lock(), store.keychain())
    })?;
    debug!(path = %keychain.path, "using keychain");

    let registry = if command.needs_registry() {
        SecretRegistry::build(&store)?
    } else {
        SecretRegistry::default()
    };
    let clock = Clock::new();
    let empty = ArgMatches::default();
    let sub_args = sub_args.unwrap_or(&empty);

    match command {
        CommandType::Show => show::run_show(&registry, &clock, writer),
        CommandType::Get => get::run_get(sub_args, &registry, &clock, writer),
        CommandType::List => {
            list::run_list(&registry, writer);
            Ok(())
        }
        CommandType::Add => add::run_add(
            sub_args,
            &mut store,
            config.default_digits,
            &mut io::stdin().lock(),
            writer,
        ),
        CommandType::Delete => delete::run_delete(sub_args, &mut store, writer),
        CommandType::Validate => validate::run_validate(sub_args, &registry, &clock, writer),
        CommandType::Generate => Ok(()),
    }
}

fn main() {
    init_tracing();

    let matches = cli().get_matches();
    let mut writer = OtpWriter::new();

    if let Err(err) = run(&matches, &mut writer) {
        writer.write_err(&format!("twof: {}\n", err));
        process::exit(1);
    }
}
