use crate::*;
use itertools::Itertools;
use std::fmt;

/// Deletes `[start, stop]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveToken {
    pub start: usize,
    pub stop: usize,
}

impl RemoveToken {
    pub fn new(start: usize, stop: usize) -> Self {
        Self { start, stop }
    }
}

impl fmt::Display for RemoveToken {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        Ok(())
    }
}

/// Literal text for ALTER TABLE, e.g. `, ADD COLUMN pwd_assisted`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptAlterTableToken {
    pub start: usize,
    pub stop: usize,
    pub column_name: String,
    pub prefix: Option<String>,
}

impl EncryptAlterTableToken {
    pub fn new(start: usize, stop: usize, column_name: impl Into<String>) -> Self {
        Self {
            start,
            stop,
            column_name: column_name.into(),
            prefix: None,
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }
}

impl fmt::Display for EncryptAlterTableToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.prefix.as_deref().filter(|prefix| !prefix.is_empty()) {
            Some(prefix) => write!(f, "{prefix} {}", self.column_name),
            None => f.write_str(&self.column_name),
        }
    }
}

/// One item of a rewritten column list: `[owner.]name[ AS alias]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnProjection {
    pub owner: Option<IdentifierValue>,
    pub name: IdentifierValue,
    pub alias: Option<IdentifierValue>,
}

impl ColumnProjection {
    pub fn new(name: IdentifierValue) -> Self {
        Self {
            owner: None,
            name,
            alias: None,
        }
    }

    pub fn with_owner(mut self, owner: Option<IdentifierValue>) -> Self {
        self.owner = owner;
        self
    }

    pub fn with_alias(mut self, alias: Option<IdentifierValue>) -> Self {
        self.alias = alias;
        self
    }

    /// Identifiers keep their own quoting unless `quote` overrides it.
    fn render(&self, quote: Option<QuoteCharacter>) -> String {
        let wrap = |identifier: &IdentifierValue| quote.unwrap_or(identifier.quote_character).wrap(&identifier.value);
        let mut result = String::new();
        if let Some(owner) = &self.owner {
            result.push_str(&wrap(owner));
            result.push('.');
        }
        result.push_str(&wrap(&self.name));
        if let Some(alias) = &self.alias {
            result.push_str(" AS ");
            result.push_str(&wrap(alias));
        }
        result
    }
}

/// Replaces a column reference, or a shorthand, with a list of physical
/// columns.
///
/// With `last_column` set the list is rendered with a leading `", "`, which
/// is how CREATE TABLE appends sub-columns after the table's final
/// definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutableColumnNameToken {
    pub start: usize,
    pub stop: usize,
    pub projections: Vec<ColumnProjection>,
    pub quote_character: Option<QuoteCharacter>,
    pub last_column: bool,
}

impl SubstitutableColumnNameToken {
    pub fn new(start: usize, stop: usize, projections: Vec<ColumnProjection>) -> Self {
        Self {
            start,
            stop,
            projections,
            quote_character: None,
            last_column: false,
        }
    }

    /// A token for a single physical column quoted like the original.
    pub fn single(start: usize, stop: usize, column: &str, quote_character: QuoteCharacter) -> Self {
        Self::new(
            start,
            stop,
            vec![ColumnProjection::new(IdentifierValue::quoted(column, quote_character))],
        )
    }

    pub fn with_quote_character(mut self, quote_character: QuoteCharacter) -> Self {
        self.quote_character = Some(quote_character);
        self
    }

    pub fn with_last_column(mut self, last_column: bool) -> Self {
        self.last_column = last_column;
        self
    }
}

impl fmt::Display for SubstitutableColumnNameToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.last_column {
            f.write_str(", ")?;
        }
        let rendered = self
            .projections
            .iter()
            .map(|each| each.render(self.quote_character))
            .join(", ");
        f.write_str(&rendered)
    }
}
