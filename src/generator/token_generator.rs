use crate::*;
use std::fmt;

/// One rewrite concern, e.g. the SELECT list or the SET list.
///
/// Generators hold everything they need from construction on and never
/// change afterwards, so one instance can serve any number of statements.
pub trait SqlTokenGenerator: fmt::Debug {
    fn name(&self) -> &'static str;

    /// Cheap check deciding whether [`SqlTokenGenerator::generate_sql_tokens`]
    /// runs at all.
    fn is_generate_sql_token(&self, context: &StatementContext) -> bool;

    fn generate_sql_tokens(&self, context: &StatementContext) -> Result<Vec<SqlToken>>;

    /// Tokens of earlier generators starting where one of ours starts are
    /// dropped when this is true.
    fn supersedes_previous_tokens(&self) -> bool {
        false
    }
}

/// The encrypt column a bound column segment refers to, with its table.
pub(crate) fn find_encrypt_column<'r>(
    rule: &'r EncryptRule,
    column: &ColumnSegment,
) -> Option<(&'r EncryptTable, &'r EncryptColumn)> {
    let table = rule.find_encrypt_table(column.table()?)?;
    let encrypt_column = table.find_encrypt_column(column.name())?;
    Some((table, encrypt_column))
}

/// Plain column when the policy prefers it and one exists, then assisted
/// query, then cipher.
pub(crate) fn query_column<'r>(table: &'r EncryptTable, column: &'r EncryptColumn) -> &'r str {
    if !table.is_query_with_cipher_column(&column.name) {
        if let Some(plain) = column.plain_column() {
            return plain;
        }
    }
    column
        .assisted_query_column()
        .unwrap_or(column.cipher.name.as_str())
}

/// Plain column when the policy prefers it and one exists.
pub(crate) fn preferred_plain_column<'r>(table: &'r EncryptTable, column: &'r EncryptColumn) -> Option<&'r str> {
    (!table.is_query_with_cipher_column(&column.name))
        .then(|| column.plain_column())
        .flatten()
}
