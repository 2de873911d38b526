use crate::*;
use std::sync::Arc;

/// A physical column together with the algorithm that fills it.
#[derive(Debug, Clone)]
pub struct EncryptColumnItem {
    pub name: String,
    pub encryptor_name: String,
    pub encryptor: Arc<dyn EncryptAlgorithm>,
}

impl EncryptColumnItem {
    pub fn new(
        name: impl Into<String>,
        encryptor_name: impl Into<String>,
        encryptor: Arc<dyn EncryptAlgorithm>,
    ) -> Self {
        Self {
            name: name.into(),
            encryptor_name: encryptor_name.into(),
            encryptor,
        }
    }

    pub fn encrypt(&self, context: &EncryptContext<'_>, plain: &[Value]) -> Result<Vec<Value>> {
        plain
            .iter()
            .map(|value| self.encryptor.encrypt(value, context))
            .collect()
    }
}

/// One logical encrypted column and its physical counterparts.
///
/// The cipher column always exists, the other three are optional and
/// independent of each other.
#[derive(Debug, Clone)]
pub struct EncryptColumn {
    pub name: String,
    pub cipher: EncryptColumnItem,
    pub assisted_query: Option<EncryptColumnItem>,
    pub like_query: Option<EncryptColumnItem>,
    pub plain: Option<String>,
    /// Overrides the table level policy when set.
    pub query_with_cipher_column: Option<bool>,
}

impl EncryptColumn {
    pub fn new(name: impl Into<String>, cipher: EncryptColumnItem) -> Self {
        Self {
            name: name.into(),
            cipher,
            assisted_query: None,
            like_query: None,
            plain: None,
            query_with_cipher_column: None,
        }
    }

    pub fn with_assisted_query(mut self, item: EncryptColumnItem) -> Self {
        self.assisted_query = Some(item);
        self
    }

    pub fn with_like_query(mut self, item: EncryptColumnItem) -> Self {
        self.like_query = Some(item);
        self
    }

    pub fn with_plain(mut self, name: impl Into<String>) -> Self {
        self.plain = Some(name.into());
        self
    }

    pub fn with_query_with_cipher_column(mut self, value: bool) -> Self {
        self.query_with_cipher_column = Some(value);
        self
    }

    pub fn assisted_query_column(&self) -> Option<&str> {
        self.assisted_query.as_ref().map(|item| item.name.as_str())
    }

    pub fn like_query_column(&self) -> Option<&str> {
        self.like_query.as_ref().map(|item| item.name.as_str())
    }

    pub fn plain_column(&self) -> Option<&str> {
        self.plain.as_deref()
    }

    /// True when both columns carry the same set of optional sub-columns.
    pub fn has_same_sub_columns(&self, other: &EncryptColumn) -> bool {
        self.assisted_query.is_some() == other.assisted_query.is_some()
            && self.like_query.is_some() == other.like_query.is_some()
            && self.plain.is_some() == other.plain.is_some()
    }
}
