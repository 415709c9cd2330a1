use clap::{arg, command, ArgMatches, Command};

use super::CommandType;
use crate::error::Result;
use crate::store::SecretStore;
use crate::utils::is_service_name;
use crate::writer::OutErr;

pub fn subcommand() -> Command<'static> {
    command!(CommandType::Delete.as_str())
        .about("Delete a key")
        .args(&[arg!(<NAME> "Key name to delete").validator(is_service_name)])
}

pub fn run_delete<W>(delete_args: &ArgMatches, store: &mut impl SecretStore, writer: &mut W) -> Result<()>
where
    W: OutErr,
{
    let name = delete_args.value_of("NAME").unwrap_or_default();

    store.delete_secret(name)?;
    writer.write(&format!("Key \"{}\" deleted\n", name));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{OtpError, StoreError};
    use crate::tests::constants::*;
    use crate::tests::mocks::{MockOtpWriter, MockStore};
    use crate::tests::utils::get_cmd_args;

    #[test]
    fn deletes_a_key() {
        let mut store = MockStore::with_entries(&[
            ("github", "github", 6, TOTP_KEY),
            ("aws", "aws", 6, TOTP_KEY),
        ]);
        let mut writer = MockOtpWriter::new();

        let arg_vec = ["twof", "delete", "github"];
        let args = get_cmd_args(CommandType::Delete.as_str(), subcommand(), &arg_vec).unwrap();
        run_delete(&args, &mut store, &mut writer).unwrap();

        assert_eq!(writer.out_str(), "Key \"github\" deleted\n");
        assert!(store.entry("github").is_none());
        assert!(store.entry("aws").is_some());
    }

    #[test]
    fn missing_key_is_reported() {
        let mut store = MockStore::new();
        let mut writer = MockOtpWriter::new();

        let arg_vec = ["twof", "delete", "github"];
        let args = get_cmd_args(CommandType::Delete.as_str(), subcommand(), &arg_vec).unwrap();
        let result = run_delete(&args, &mut store, &mut writer);

        assert!(matches!(
            result,
            Err(OtpError::ExternalStoreFailure(StoreError::SecretNotFound(_)))
        ));
        assert_eq!(writer.out, Vec::new());
    }
}
