use cryptsql::*;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Loads the configured encrypt rule and reports what it covers.
fn run() -> Result {
    let config = config()?;
    let Some(rule_file) = &config.rule_file else {
        warn!("CRYPTSQL_RULE_FILE is not set, nothing to load");
        return Ok(());
    };
    let snapshot = RuleSnapshot::new(EncryptRule::from_yaml_file(rule_file)?);
    let rule = snapshot.load();
    for table in rule.tables() {
        for column in table.columns() {
            info!(
                table = %table.name,
                column = %column.name,
                cipher = %column.cipher.name,
                assisted = column.assisted_query_column(),
                like = column.like_query_column(),
                plain = column.plain_column(),
                query_with_cipher = table.is_query_with_cipher_column(&column.name),
                "Encrypt column"
            );
        }
    }
    info!(
        dialect = %config.database_type(),
        tables = rule.tables().count(),
        encryptors = rule.encryptors().len(),
        database = %config.database,
        schema = %config.schema,
        "Encrypt rule loaded"
    );
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
