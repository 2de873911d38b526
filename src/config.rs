use crate::*;
use confique::Config as _;
use std::{path::PathBuf, sync::OnceLock};

/// Process level settings, read from the environment.
#[derive(Debug, confique::Config)]
pub struct Config {
    /// YAML file holding the encrypt rule.
    #[config(env = "CRYPTSQL_RULE_FILE")]
    pub rule_file: Option<PathBuf>,
    /// Dialect assumed when a caller does not name one.
    #[config(env = "CRYPTSQL_DIALECT", default = "MySQL")]
    pub dialect: String,
    #[config(env = "CRYPTSQL_DATABASE", default = "logic_db")]
    pub database: String,
    #[config(env = "CRYPTSQL_SCHEMA", default = "logic_db")]
    pub schema: String,
}

impl Config {
    pub fn database_type(&self) -> DatabaseType {
        DatabaseType::from(self.dialect.as_str())
    }
}

pub fn config() -> Result<&'static Config> {
    static CONFIG: OnceLock<Config> = OnceLock::new();
    if let Some(config) = CONFIG.get() {
        return Ok(config);
    }
    let loaded = Config::builder().env().load()?;
    debug!("Loaded process configuration {loaded:?}");
    Ok(CONFIG.get_or_init(|| loaded))
}
