use crate::*;
use std::sync::Arc;

/// Rewrites encrypted columns referenced by WHERE and join conditions.
///
/// The plain column wins when the policy prefers it. A column compared
/// with LIKE needs the like query column. Everything else is compared
/// through the assisted query column, or the cipher column without one.
#[derive(Debug)]
pub struct EncryptPredicateColumnTokenGenerator {
    rule: Arc<EncryptRule>,
}

impl EncryptPredicateColumnTokenGenerator {
    pub fn new(rule: Arc<EncryptRule>) -> Self {
        Self { rule }
    }

    fn column_token(&self, expressions: &[&ExpressionSegment], column_segment: &ColumnSegment) -> Result<Option<SqlToken>> {
        let Some((table, column)) = find_encrypt_column(&self.rule, column_segment) else {
            return Ok(None);
        };
        let physical = if let Some(plain) = preferred_plain_column(table, column) {
            plain
        } else if is_like_left_operand(expressions, column_segment) {
            column
                .like_query_column()
                .ok_or_else(|| Error::UnsupportedEncryptSql("LIKE".to_string()))?
        } else {
            column
                .assisted_query_column()
                .unwrap_or(column.cipher.name.as_str())
        };
        trace!(column = column_segment.name(), physical, "Rewrite predicate column");
        Ok(Some(
            SubstitutableColumnNameToken::single(
                column_segment.name_start(),
                column_segment.stop,
                physical,
                column_segment.identifier.quote_character,
            )
            .into(),
        ))
    }
}

impl SqlTokenGenerator for EncryptPredicateColumnTokenGenerator {
    fn name(&self) -> &'static str {
        "predicate_column"
    }

    fn is_generate_sql_token(&self, context: &StatementContext) -> bool {
        !context.where_expressions().is_empty()
    }

    fn generate_sql_tokens(&self, context: &StatementContext) -> Result<Vec<SqlToken>> {
        let expressions = context.where_expressions();
        let mut result = Vec::new();
        for each in &expressions {
            for column in each.columns() {
                result.extend(self.column_token(&expressions, column)?);
            }
        }
        debug!(tokens = result.len(), "Rewrite predicate columns");
        Ok(result)
    }
}

/// Whether the column, matched by span, is the left side of a LIKE in any
/// of the expressions.
fn is_like_left_operand(expressions: &[&ExpressionSegment], column: &ColumnSegment) -> bool {
    expressions.iter().any(|expression| {
        expression.binary_expressions().into_iter().any(|binary| {
            binary.is_like()
                && binary
                    .left
                    .as_column()
                    .is_some_and(|left| left.has_same_span(column))
        })
    })
}
