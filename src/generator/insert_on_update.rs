use crate::*;
use std::sync::Arc;

/// Rewrites ON DUPLICATE KEY UPDATE assignments.
///
/// Besides parameters and literals this handles `a = VALUES(b)`, which maps
/// every physical column of `a` to the matching physical column of `b`.
#[derive(Debug)]
pub struct EncryptInsertOnUpdateTokenGenerator<'a> {
    assignments: EncryptAssignmentTokenGenerator<'a>,
}

impl<'a> EncryptInsertOnUpdateTokenGenerator<'a> {
    pub fn new(rule: Arc<EncryptRule>, database: &str, schema: &str, parameters: &'a [Value]) -> Self {
        Self {
            assignments: EncryptAssignmentTokenGenerator::new(rule, database, schema, parameters),
        }
    }

    fn values_token(
        &self,
        table: &EncryptTable,
        assignment: &ColumnAssignmentSegment,
        column_segment: &ColumnSegment,
        value_column: &ColumnSegment,
    ) -> Result<Option<SqlToken>> {
        let column_name = column_segment.name();
        let value_column_name = value_column.name();
        let unsupported = || Error::UnsupportedEncryptSql(format!("{column_name}=VALUES({value_column_name})"));
        let (column, value) = match (
            table.find_encrypt_column(column_name),
            table.find_encrypt_column(value_column_name),
        ) {
            (None, None) => return Ok(None),
            (Some(column), Some(value)) => (column, value),
            _ => return Err(unsupported()),
        };
        let pairs = [
            (Some(column.cipher.name.as_str()), Some(value.cipher.name.as_str())),
            (column.assisted_query_column(), value.assisted_query_column()),
            (column.like_query_column(), value.like_query_column()),
            (column.plain_column(), value.plain_column()),
        ];
        let mut assignments = Vec::new();
        for pair in pairs {
            match pair {
                (Some(left), Some(right)) => {
                    let right = value_column.identifier.quote_character.wrap(right);
                    assignments.push((left.to_string(), format!("VALUES({right})")));
                }
                (None, None) => {}
                _ => return Err(unsupported()),
            }
        }
        if assignments.is_empty() {
            return Err(unsupported());
        }
        Ok(Some(
            EncryptAssignmentToken::Function {
                start: column_segment.start,
                stop: assignment.stop,
                assignments,
                quote_character: column_segment.identifier.quote_character,
            }
            .into(),
        ))
    }
}

impl SqlTokenGenerator for EncryptInsertOnUpdateTokenGenerator<'_> {
    fn name(&self) -> &'static str {
        "insert_on_update"
    }

    fn is_generate_sql_token(&self, context: &StatementContext) -> bool {
        matches!(
            &context.statement,
            BoundStatement::Insert(insert) if !insert.on_duplicate_key_update.is_empty()
        )
    }

    fn generate_sql_tokens(&self, context: &StatementContext) -> Result<Vec<SqlToken>> {
        let BoundStatement::Insert(insert) = &context.statement else {
            return Ok(Vec::new());
        };
        let Some(table) = self.assignments.rule().find_encrypt_table(&insert.table) else {
            trace!(table = %insert.table, "Not an encrypt table");
            return Ok(Vec::new());
        };
        let mut result = Vec::new();
        for each in &insert.on_duplicate_key_update {
            let Some(column_segment) = each.column() else {
                continue;
            };
            let token = match values_argument(&each.value) {
                Some(value_column) => self.values_token(table, each, column_segment, value_column)?,
                None => match table.find_encrypt_column(column_segment.name()) {
                    Some(column) => self.assignments.assignment_token(table, column, each)?,
                    None => None,
                },
            };
            if let Some(token) = token {
                debug!(table = %insert.table, column = column_segment.name(), "Rewrite on duplicate key update");
                result.push(token);
            }
        }
        Ok(result)
    }
}

/// The column inside `VALUES(column)`.
fn values_argument(value: &ExpressionSegment) -> Option<&ColumnSegment> {
    match value {
        ExpressionSegment::Function(function) if function.name.eq_ignore_ascii_case("VALUES") => {
            function.parameters.first()?.as_column()
        }
        _ => None,
    }
}
