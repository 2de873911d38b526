use crate::*;
use std::sync::Arc;

/// Columns named by CREATE INDEX.
#[derive(Debug)]
pub struct EncryptIndexColumnTokenGenerator {
    rule: Arc<EncryptRule>,
}

impl EncryptIndexColumnTokenGenerator {
    pub fn new(rule: Arc<EncryptRule>) -> Self {
        Self { rule }
    }
}

impl SqlTokenGenerator for EncryptIndexColumnTokenGenerator {
    fn name(&self) -> &'static str {
        "index_column"
    }

    fn is_generate_sql_token(&self, context: &StatementContext) -> bool {
        matches!(&context.statement, BoundStatement::CreateIndex(index) if !index.columns.is_empty())
    }

    fn generate_sql_tokens(&self, context: &StatementContext) -> Result<Vec<SqlToken>> {
        let BoundStatement::CreateIndex(index) = &context.statement else {
            return Ok(Vec::new());
        };
        let Some(table) = self.rule.find_encrypt_table(&index.table) else {
            return Ok(Vec::new());
        };
        let result: Vec<SqlToken> = index
            .columns
            .iter()
            .filter_map(|each| {
                let column = table.find_encrypt_column(each.name())?;
                let token = SubstitutableColumnNameToken::single(
                    each.name_start(),
                    each.stop,
                    query_column(table, column),
                    each.identifier.quote_character,
                );
                Some(token.into())
            })
            .collect();
        debug!(table = %index.table, tokens = result.len(), "Rewrite index columns");
        Ok(result)
    }
}
