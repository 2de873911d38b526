use crate::*;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct RewriteResult {
    pub sql: String,
    pub parameters: Vec<Value>,
}

/// Rewrites one bound statement against a rule snapshot.
///
/// Either the whole statement is rewritten or an error is returned; tokens
/// are never applied partially.
#[derive(Debug, Clone)]
pub struct SqlRewriteEngine {
    rule: Arc<EncryptRule>,
    database: String,
    schema: String,
}

impl SqlRewriteEngine {
    pub fn new(rule: Arc<EncryptRule>, database: impl Into<String>, schema: impl Into<String>) -> Self {
        Self {
            rule,
            database: database.into(),
            schema: schema.into(),
        }
    }

    /// Engine over the rule currently published by `snapshot`.
    pub fn from_snapshot(snapshot: &RuleSnapshot, database: impl Into<String>, schema: impl Into<String>) -> Self {
        Self::new(snapshot.load(), database, schema)
    }

    pub fn generate_tokens(&self, context: &StatementContext, parameters: &[Value]) -> Result<Vec<SqlToken>> {
        SqlTokenGenerators::encrypt(self.rule.clone(), &self.database, &self.schema, parameters).generate(context)
    }

    pub fn rewrite(&self, sql: &str, context: &StatementContext, parameters: &[Value]) -> Result<RewriteResult> {
        let tokens = self.generate_tokens(context, parameters)?;
        let result = RewriteResult {
            sql: splice_sql(sql, &tokens)?,
            parameters: rewrite_parameters(&tokens, parameters)?,
        };
        debug!(
            tokens = tokens.len(),
            parameters = result.parameters.len(),
            sql = %result.sql,
            "Rewrote statement"
        );
        Ok(result)
    }
}
