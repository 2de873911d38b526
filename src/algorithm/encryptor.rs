use crate::*;
use std::{collections::BTreeMap, fmt};

/// Algorithm properties as configured, all values kept as text.
pub type Props = BTreeMap<String, String>;

/// Where a value being encrypted belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncryptContext<'a> {
    pub database: &'a str,
    pub schema: &'a str,
    pub table: &'a str,
    pub column: &'a str,
}

impl<'a> EncryptContext<'a> {
    pub fn new(database: &'a str, schema: &'a str, table: &'a str, column: &'a str) -> Self {
        Self {
            database,
            schema,
            table,
            column,
        }
    }
}

pub trait EncryptAlgorithm: Send + Sync + fmt::Debug {
    /// Type name the algorithm was registered under, e.g. `AES`.
    fn algorithm_type(&self) -> &str;

    /// Encrypts one plain value. `NULL` must stay `NULL`.
    fn encrypt(&self, plain: &Value, context: &EncryptContext<'_>) -> Result<Value>;
}

pub(crate) fn required_prop<'p>(props: &'p Props, key: &str, algorithm: &str) -> Result<&'p str> {
    props
        .get(key)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| Error::Config(format!("`{key}` is required by encrypt algorithm `{algorithm}`")))
}
