use derive_more::Display;

/// Identifier quoting of a dialect or of one written identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
pub enum QuoteCharacter {
    #[default]
    #[display("")]
    None,
    #[display("`")]
    BackQuote,
    #[display("\"")]
    Quote,
    #[display("[")]
    Brackets,
}

impl QuoteCharacter {
    pub fn start_delimiter(&self) -> &'static str {
        match self {
            QuoteCharacter::None => "",
            QuoteCharacter::BackQuote => "`",
            QuoteCharacter::Quote => "\"",
            QuoteCharacter::Brackets => "[",
        }
    }

    pub fn end_delimiter(&self) -> &'static str {
        match self {
            QuoteCharacter::Brackets => "]",
            other => other.start_delimiter(),
        }
    }

    pub fn wrap(&self, value: &str) -> String {
        format!("{}{value}{}", self.start_delimiter(), self.end_delimiter())
    }

    /// Detects the quoting of a written identifier such as `` `name` ``.
    pub fn of(text: &str) -> Self {
        match text.chars().next() {
            Some('`') => QuoteCharacter::BackQuote,
            Some('"') => QuoteCharacter::Quote,
            Some('[') => QuoteCharacter::Brackets,
            _ => QuoteCharacter::None,
        }
    }
}

/// The dialect a statement was parsed with.
///
/// Only `SQLServer` and `Oracle` change rewrite behaviour (DROP COLUMN
/// merging); the others only decide identifier quoting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Display)]
pub enum DatabaseType {
    #[default]
    MySQL,
    PostgreSQL,
    #[display("SQLServer")]
    SqlServer,
    Oracle,
    #[display("{_0}")]
    Other(String),
}

impl DatabaseType {
    pub fn quote_character(&self) -> QuoteCharacter {
        match self {
            DatabaseType::MySQL => QuoteCharacter::BackQuote,
            DatabaseType::PostgreSQL | DatabaseType::Oracle => QuoteCharacter::Quote,
            DatabaseType::SqlServer => QuoteCharacter::Brackets,
            DatabaseType::Other(_) => QuoteCharacter::None,
        }
    }
}

impl From<&str> for DatabaseType {
    fn from(name: &str) -> Self {
        match name {
            "MySQL" => DatabaseType::MySQL,
            "PostgreSQL" => DatabaseType::PostgreSQL,
            "SQLServer" => DatabaseType::SqlServer,
            "Oracle" => DatabaseType::Oracle,
            other => DatabaseType::Other(other.to_string()),
        }
    }
}
