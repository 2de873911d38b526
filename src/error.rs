#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Can not find encrypt column `{column}` of table `{table}`")]
    ColumnNotFound { table: String, column: String },

    #[error("Can not find encrypt table `{0}`")]
    TableNotFound(String),

    #[error("The SQL clause `{0}` is unsupported in encrypt rule")]
    UnsupportedEncryptSql(String),

    #[error(
        "Can not alter encrypt column `{previous_column}` to `{column}` of table `{table}`, the encrypt configuration is not consistent"
    )]
    EncryptColumnAlter {
        table: String,
        column: String,
        previous_column: String,
    },

    #[error("Unsupported SQL operation: {0}")]
    UnsupportedSqlOperation(String),

    #[error("Missing parameter at index {0}")]
    MissingParameter(usize),

    #[error("Encrypt algorithm error: {0}")]
    Algorithm(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Environment configuration error: {0}")]
    Env(#[from] confique::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T = ()> = std::result::Result<T, Error>;

impl Error {
    pub fn column_not_found(table: impl Into<String>, column: impl Into<String>) -> Self {
        Error::ColumnNotFound {
            table: table.into(),
            column: column.into(),
        }
    }
}
