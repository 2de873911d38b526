use crate::*;
use std::{collections::HashMap, sync::Arc};

/// Encrypt columns of one table, looked up case insensitively.
#[derive(Debug, Clone)]
pub struct EncryptTable {
    pub name: String,
    columns: HashMap<String, EncryptColumn>,
    // Preserve configuration order of the logical columns.
    column_order: Vec<String>,
    pub query_with_cipher_column: bool,
}

impl EncryptTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: HashMap::new(),
            column_order: Vec::new(),
            query_with_cipher_column: true,
        }
    }

    pub fn with_query_with_cipher_column(mut self, value: bool) -> Self {
        self.query_with_cipher_column = value;
        self
    }

    /// Adds a column, failing when the logical name is already taken.
    pub fn add_column(&mut self, column: EncryptColumn) -> Result {
        let key = column.name.to_lowercase();
        if self.columns.contains_key(&key) {
            return Err(Error::Config(format!(
                "Duplicate encrypt column `{}` in table `{}`",
                column.name, self.name
            )));
        }
        if column.cipher.name.is_empty() {
            return Err(Error::Config(format!(
                "Cipher column of `{}.{}` can not be empty",
                self.name, column.name
            )));
        }
        self.column_order.push(key.clone());
        self.columns.insert(key, column);
        Ok(())
    }

    pub fn with_column(mut self, column: EncryptColumn) -> Result<Self> {
        self.add_column(column)?;
        Ok(self)
    }

    /// Logical columns in configuration order.
    pub fn columns(&self) -> impl Iterator<Item = &EncryptColumn> {
        self.column_order.iter().filter_map(|key| self.columns.get(key))
    }

    pub fn is_encrypt_column(&self, column: &str) -> bool {
        self.columns.contains_key(&column.to_lowercase())
    }

    pub fn find_encrypt_column(&self, column: &str) -> Option<&EncryptColumn> {
        self.columns.get(&column.to_lowercase())
    }

    pub fn get_encrypt_column(&self, column: &str) -> Result<&EncryptColumn> {
        self.find_encrypt_column(column)
            .ok_or_else(|| Error::column_not_found(&self.name, column))
    }

    pub fn find_encryptor(&self, column: &str) -> Option<Arc<dyn EncryptAlgorithm>> {
        self.find_encrypt_column(column)
            .map(|each| each.cipher.encryptor.clone())
    }

    pub fn get_cipher_column(&self, column: &str) -> Result<&str> {
        self.get_encrypt_column(column)
            .map(|each| each.cipher.name.as_str())
    }

    pub fn find_assisted_query_column(&self, column: &str) -> Option<&str> {
        self.find_encrypt_column(column)?.assisted_query_column()
    }

    pub fn find_like_query_column(&self, column: &str) -> Option<&str> {
        self.find_encrypt_column(column)?.like_query_column()
    }

    pub fn find_plain_column(&self, column: &str) -> Option<&str> {
        self.find_encrypt_column(column)?.plain_column()
    }

    /// Column override first, then the table default.
    pub fn is_query_with_cipher_column(&self, column: &str) -> bool {
        self.find_encrypt_column(column)
            .and_then(|each| each.query_with_cipher_column)
            .unwrap_or(self.query_with_cipher_column)
    }
}
