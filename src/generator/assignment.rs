use crate::*;
use std::sync::Arc;

/// Rewrites `column = value` of UPDATE SET and INSERT ... SET.
///
/// Only parameter markers and literals are rewritten. Any other value kind
/// assigned to an encrypted column is left as written.
#[derive(Debug)]
pub struct EncryptAssignmentTokenGenerator<'a> {
    rule: Arc<EncryptRule>,
    database: String,
    schema: String,
    parameters: &'a [Value],
}

impl<'a> EncryptAssignmentTokenGenerator<'a> {
    pub fn new(rule: Arc<EncryptRule>, database: &str, schema: &str, parameters: &'a [Value]) -> Self {
        Self {
            rule,
            database: database.to_string(),
            schema: schema.to_string(),
            parameters,
        }
    }

    pub(crate) fn assignment_token(
        &self,
        table: &EncryptTable,
        column: &EncryptColumn,
        assignment: &ColumnAssignmentSegment,
    ) -> Result<Option<SqlToken>> {
        let Some(column_segment) = assignment.column() else {
            return Ok(None);
        };
        let start = column_segment.start;
        let stop = assignment.stop;
        let quote_character = column_segment.identifier.quote_character;
        let token = match &assignment.value {
            ExpressionSegment::ParameterMarker(marker) => {
                let values = match self.parameters.get(marker.parameter_index) {
                    Some(value) => self.encrypt_for_every_column(table, column, value)?,
                    None => Vec::new(),
                };
                EncryptAssignmentToken::Parameter {
                    start,
                    stop,
                    columns: assigned_columns(column),
                    parameter_index: marker.parameter_index,
                    values,
                    quote_character,
                }
            }
            ExpressionSegment::Literal(literal) => {
                let values = self.encrypt_for_every_column(table, column, &literal.value)?;
                EncryptAssignmentToken::Literal {
                    start,
                    stop,
                    assignments: assigned_columns(column).into_iter().zip(values).collect(),
                    quote_character,
                }
            }
            other => {
                trace!(column = %column.name, start = other.start(), "Assigned value left as written");
                return Ok(None);
            }
        };
        Ok(Some(token.into()))
    }

    /// Cipher value, then assisted query and like query values when those
    /// columns exist.
    fn encrypt_for_every_column(&self, table: &EncryptTable, column: &EncryptColumn, value: &Value) -> Result<Vec<Value>> {
        let plain = std::slice::from_ref(value);
        let (database, schema, table) = (self.database.as_str(), self.schema.as_str(), table.name.as_str());
        let mut result = self.rule.get_encrypt_values(database, schema, table, &column.name, plain)?;
        if column.assisted_query.is_some() {
            result.extend(
                self.rule
                    .get_encrypt_assisted_query_values(database, schema, table, &column.name, plain)?,
            );
        }
        if column.like_query.is_some() {
            result.extend(
                self.rule
                    .get_encrypt_like_query_values(database, schema, table, &column.name, plain)?,
            );
        }
        Ok(result)
    }

    pub(crate) fn rule(&self) -> &EncryptRule {
        &self.rule
    }
}

impl SqlTokenGenerator for EncryptAssignmentTokenGenerator<'_> {
    fn name(&self) -> &'static str {
        "assignment"
    }

    fn is_generate_sql_token(&self, context: &StatementContext) -> bool {
        match &context.statement {
            BoundStatement::Update(update) => !update.set_assignments.is_empty(),
            BoundStatement::Insert(insert) => !insert.set_assignments.is_empty(),
            _ => false,
        }
    }

    fn generate_sql_tokens(&self, context: &StatementContext) -> Result<Vec<SqlToken>> {
        let (table_name, assignments) = match &context.statement {
            BoundStatement::Update(update) => match update.tables.first() {
                Some(table) => (table.as_str(), &update.set_assignments),
                None => return Ok(Vec::new()),
            },
            BoundStatement::Insert(insert) => (insert.table.as_str(), &insert.set_assignments),
            _ => return Ok(Vec::new()),
        };
        let Some(table) = self.rule.find_encrypt_table(table_name) else {
            trace!(table = table_name, "Not an encrypt table");
            return Ok(Vec::new());
        };
        let mut result = Vec::new();
        for each in assignments {
            let Some(column) = each.column().and_then(|segment| table.find_encrypt_column(segment.name())) else {
                continue;
            };
            if let Some(token) = self.assignment_token(table, column, each)? {
                debug!(table = table_name, column = %column.name, "Rewrite assignment");
                result.push(token);
            }
        }
        Ok(result)
    }
}

fn assigned_columns(column: &EncryptColumn) -> Vec<String> {
    [
        Some(column.cipher.name.as_str()),
        column.assisted_query_column(),
        column.like_query_column(),
    ]
    .into_iter()
    .flatten()
    .map(str::to_string)
    .collect()
}
