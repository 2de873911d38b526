use crate::*;
use std::{collections::HashSet, sync::Arc};

/// Ordered set of generators run over one statement.
#[derive(Debug, Default)]
pub struct SqlTokenGenerators<'a> {
    generators: Vec<Box<dyn SqlTokenGenerator + 'a>>,
}

impl<'a> SqlTokenGenerators<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every encrypt generator, sharing one rule snapshot.
    pub fn encrypt(rule: Arc<EncryptRule>, database: &str, schema: &str, parameters: &'a [Value]) -> Self {
        Self::new()
            .with(EncryptCreateTableTokenGenerator::new(rule.clone()))
            .with(EncryptAlterTableTokenGenerator::new(rule.clone()))
            .with(EncryptProjectionTokenGenerator::new(rule.clone()))
            .with(EncryptPredicateColumnTokenGenerator::new(rule.clone()))
            .with(EncryptPredicateRightValueTokenGenerator::new(
                rule.clone(),
                database,
                schema,
                parameters,
            ))
            .with(EncryptAssignmentTokenGenerator::new(rule.clone(), database, schema, parameters))
            .with(EncryptInsertOnUpdateTokenGenerator::new(
                rule.clone(),
                database,
                schema,
                parameters,
            ))
            .with(EncryptOrderByItemTokenGenerator::new(rule.clone()))
            .with(EncryptGroupByItemTokenGenerator::new(rule.clone()))
            .with(EncryptIndexColumnTokenGenerator::new(rule))
    }

    pub fn with(mut self, generator: impl SqlTokenGenerator + 'a) -> Self {
        self.generators.push(Box::new(generator));
        self
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.generators.iter().map(|each| each.name()).collect()
    }

    /// Union of every applicable generator's tokens, sorted by start.
    ///
    /// The sort is stable, so insertions sharing a start keep the order
    /// their generator produced them in.
    pub fn generate(&self, context: &StatementContext) -> Result<Vec<SqlToken>> {
        let mut result: Vec<SqlToken> = Vec::new();
        for each in &self.generators {
            if !each.is_generate_sql_token(context) {
                trace!(generator = each.name(), "Skipped");
                continue;
            }
            let tokens = each.generate_sql_tokens(context)?;
            if each.supersedes_previous_tokens() {
                let starts: HashSet<usize> = tokens.iter().map(SqlToken::start).collect();
                result.retain(|token| !starts.contains(&token.start()));
            }
            debug!(generator = each.name(), tokens = tokens.len(), "Generated tokens");
            result.extend(tokens);
        }
        result.sort_by_key(SqlToken::start);
        Ok(result)
    }
}
