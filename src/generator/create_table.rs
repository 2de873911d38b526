use crate::*;
use std::sync::Arc;

/// Replaces each encrypted column definition of CREATE TABLE with one
/// definition per physical column.
///
/// The original definition, up to the next one, is removed. The physical
/// columns are inserted where the next definition starts and each reuses the
/// original type and constraint text, which the splice copies from just after
/// the column name.
#[derive(Debug)]
pub struct EncryptCreateTableTokenGenerator {
    rule: Arc<EncryptRule>,
}

impl EncryptCreateTableTokenGenerator {
    pub fn new(rule: Arc<EncryptRule>) -> Self {
        Self { rule }
    }

    fn column_tokens(
        &self,
        column: &EncryptColumn,
        definitions: &[ColumnDefinitionSegment],
        index: usize,
    ) -> Vec<SqlToken> {
        let definition = &definitions[index];
        let last_column = index + 1 == definitions.len();
        let span_stop = definitions
            .get(index + 1)
            .map(|next| next.start.saturating_sub(1))
            .unwrap_or(definition.stop);
        let name = &definition.column_name;
        let quote = name.identifier.quote_character;
        let insert_at = span_stop + 1;

        let mut result: Vec<SqlToken> = vec![
            RemoveToken::new(definition.start, span_stop).into(),
            SubstitutableColumnNameToken::single(insert_at, name.stop, &column.cipher.name, quote).into(),
        ];
        let sub_columns = [
            column.assisted_query_column(),
            column.like_query_column(),
            column.plain_column(),
        ];
        for each in sub_columns.into_iter().flatten() {
            result.push(
                SubstitutableColumnNameToken::single(insert_at, name.stop, each, quote)
                    .with_last_column(last_column)
                    .into(),
            );
        }
        result
    }
}

impl SqlTokenGenerator for EncryptCreateTableTokenGenerator {
    fn name(&self) -> &'static str {
        "create_table"
    }

    fn is_generate_sql_token(&self, context: &StatementContext) -> bool {
        matches!(
            &context.statement,
            BoundStatement::CreateTable(create) if !create.column_definitions.is_empty()
        )
    }

    fn generate_sql_tokens(&self, context: &StatementContext) -> Result<Vec<SqlToken>> {
        let BoundStatement::CreateTable(create) = &context.statement else {
            return Ok(Vec::new());
        };
        let Some(table) = self.rule.find_encrypt_table(&create.table) else {
            trace!(table = %create.table, "Not an encrypt table");
            return Ok(Vec::new());
        };
        let mut result = Vec::new();
        for (index, definition) in create.column_definitions.iter().enumerate() {
            let Some(column) = table.find_encrypt_column(definition.name()) else {
                continue;
            };
            let tokens = self.column_tokens(column, &create.column_definitions, index);
            debug!(table = %create.table, column = %column.name, tokens = tokens.len(), "Rewrite column definition");
            result.extend(tokens);
        }
        Ok(result)
    }
}
