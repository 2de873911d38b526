use crate::*;
use std::{
    collections::{BTreeMap, BTreeSet},
    sync::Arc,
};

/// Encrypts the values compared with encrypted columns, whether written as
/// literals or bound through parameter markers.
#[derive(Debug)]
pub struct EncryptPredicateRightValueTokenGenerator<'a> {
    rule: Arc<EncryptRule>,
    database: String,
    schema: String,
    parameters: &'a [Value],
}

impl<'a> EncryptPredicateRightValueTokenGenerator<'a> {
    pub fn new(rule: Arc<EncryptRule>, database: &str, schema: &str, parameters: &'a [Value]) -> Self {
        Self {
            rule,
            database: database.to_string(),
            schema: schema.to_string(),
            parameters,
        }
    }

    fn condition_token(&self, condition: &EncryptCondition) -> Result<SqlToken> {
        let table = self.rule.get_encrypt_table(&condition.table_name)?;
        let column = table.get_encrypt_column(&condition.column_name)?;
        let plain = condition.values(self.parameters)?;
        let encrypted = self.encrypted_values(table, column, condition, &plain)?;
        let position_values: BTreeMap<usize, Value> = encrypted.into_iter().enumerate().collect();
        let parameter_marker_positions: BTreeSet<usize> = condition.position_index_map.keys().copied().collect();
        let parameter_indexes = condition.position_index_map.clone();
        let (start, stop) = (condition.start, condition.stop);
        let token = if condition.is_in() {
            EncryptPredicateRightValueToken::In {
                start,
                stop,
                position_values,
                parameter_marker_positions,
                parameter_indexes,
            }
        } else {
            EncryptPredicateRightValueToken::Equal {
                start,
                stop,
                position_values,
                parameter_marker_positions,
                parameter_indexes,
            }
        };
        Ok(token.into())
    }

    fn encrypted_values(
        &self,
        table: &EncryptTable,
        column: &EncryptColumn,
        condition: &EncryptCondition,
        plain: &[Value],
    ) -> Result<Vec<Value>> {
        if preferred_plain_column(table, column).is_some() {
            return Ok(plain.to_vec());
        }
        let (database, schema) = (self.database.as_str(), self.schema.as_str());
        let (table_name, column_name) = (table.name.as_str(), column.name.as_str());
        if condition.is_like() {
            if column.like_query.is_none() {
                return Err(Error::UnsupportedEncryptSql("LIKE".to_string()));
            }
            return self
                .rule
                .get_encrypt_like_query_values(database, schema, table_name, column_name, plain);
        }
        if column.assisted_query.is_some() {
            return self
                .rule
                .get_encrypt_assisted_query_values(database, schema, table_name, column_name, plain);
        }
        self.rule
            .get_encrypt_values(database, schema, table_name, column_name, plain)
    }
}

impl SqlTokenGenerator for EncryptPredicateRightValueTokenGenerator<'_> {
    fn name(&self) -> &'static str {
        "predicate_right_value"
    }

    fn is_generate_sql_token(&self, context: &StatementContext) -> bool {
        !context.where_expressions().is_empty()
    }

    fn generate_sql_tokens(&self, context: &StatementContext) -> Result<Vec<SqlToken>> {
        let conditions = EncryptConditionEngine::new(&self.rule).create_encrypt_conditions(&context.where_expressions())?;
        let mut result = Vec::with_capacity(conditions.len());
        for each in &conditions {
            result.push(self.condition_token(each)?);
        }
        debug!(tokens = result.len(), "Rewrite predicate right values");
        Ok(result)
    }
}
