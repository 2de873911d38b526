use crate::*;
use std::collections::BTreeMap;

const SUPPORTED_OPERATORS: [&str; 8] = ["=", "<>", "!=", "<=>", "IS", "IS NOT", "LIKE", "NOT LIKE"];

/// Operators whose operands may be swapped, as in `'x' = pwd`.
const SYMMETRIC_OPERATORS: [&str; 4] = ["=", "<>", "!=", "<=>"];

/// Collects [`EncryptCondition`]s from WHERE and join expressions.
///
/// Only predicates with one operand bound to an encrypted column are
/// considered. A literal or parameter marker written on the left, as in
/// `? = pwd`, is read as the right value of a symmetric comparison; any other
/// operator in that order is unsupported. Comparing an encrypted column with
/// anything but a literal or a parameter marker leaves the predicate alone.
#[derive(Debug)]
pub struct EncryptConditionEngine<'a> {
    rule: &'a EncryptRule,
}

impl<'a> EncryptConditionEngine<'a> {
    pub fn new(rule: &'a EncryptRule) -> Self {
        Self { rule }
    }

    pub fn create_encrypt_conditions(&self, expressions: &[&ExpressionSegment]) -> Result<Vec<EncryptCondition>> {
        let mut result = Vec::new();
        for each in expressions {
            self.collect(each, &mut result)?;
        }
        Ok(result)
    }

    fn collect(&self, expression: &ExpressionSegment, result: &mut Vec<EncryptCondition>) -> Result {
        match expression {
            ExpressionSegment::Binary(binary) if binary.is_logical() => {
                self.collect(&binary.left, result)?;
                self.collect(&binary.right, result)
            }
            ExpressionSegment::Binary(binary) => {
                let operator = normalize_operator(&binary.operator);
                let ((table, column), value) = match self.encrypt_column_of(&binary.left) {
                    Some(found) => (found, binary.right.as_ref()),
                    None => match self.encrypt_column_of(&binary.right) {
                        Some(found) if is_value(&binary.left) => {
                            if !SYMMETRIC_OPERATORS.contains(&operator.as_str()) {
                                return Err(Error::UnsupportedEncryptSql(binary.operator.clone()));
                            }
                            (found, binary.left.as_ref())
                        }
                        _ => return Ok(()),
                    },
                };
                if !SUPPORTED_OPERATORS.contains(&operator.as_str()) {
                    return Err(Error::UnsupportedEncryptSql(binary.operator.clone()));
                }
                if let Some(condition) = binary_condition(table, column, operator, value) {
                    debug!(table, column, start = condition.start, "Encrypt condition");
                    result.push(condition);
                }
                Ok(())
            }
            ExpressionSegment::In(in_expression) => {
                let Some((table, column)) = self.encrypt_column_of(&in_expression.left) else {
                    return Ok(());
                };
                if let Some(condition) = in_condition(table, column, in_expression) {
                    debug!(table, column, start = condition.start, "Encrypt IN condition");
                    result.push(condition);
                }
                Ok(())
            }
            ExpressionSegment::Column(_)
            | ExpressionSegment::Literal(_)
            | ExpressionSegment::ParameterMarker(_)
            | ExpressionSegment::List(_)
            | ExpressionSegment::Function(_)
            | ExpressionSegment::Common(_) => Ok(()),
        }
    }

    fn encrypt_column_of<'e>(&self, expression: &'e ExpressionSegment) -> Option<(&'e str, &'e str)> {
        let column = expression.as_column()?;
        let table = column.table()?;
        self.rule
            .is_encrypt_column(table, column.name())
            .then_some((table, column.name()))
    }
}

fn normalize_operator(operator: &str) -> String {
    operator
        .split_whitespace()
        .map(str::to_uppercase)
        .collect::<Vec<_>>()
        .join(" ")
}

fn binary_condition(table: &str, column: &str, operator: String, right: &ExpressionSegment) -> Option<EncryptCondition> {
    let mut condition = EncryptCondition {
        table_name: table.to_string(),
        column_name: column.to_string(),
        start: right.start(),
        stop: right.stop(),
        kind: EncryptConditionKind::Binary { operator },
        position_values: BTreeMap::new(),
        position_index_map: BTreeMap::new(),
    };
    if !add_position(&mut condition, 0, right) {
        trace!(table, column, "Right side is neither literal nor parameter marker");
        return None;
    }
    Some(condition)
}

fn in_condition(table: &str, column: &str, in_expression: &InExpression) -> Option<EncryptCondition> {
    let ExpressionSegment::List(list) = in_expression.right.as_ref() else {
        trace!(table, column, "IN without a value list");
        return None;
    };
    let mut condition = EncryptCondition {
        table_name: table.to_string(),
        column_name: column.to_string(),
        start: list.start,
        stop: list.stop,
        kind: EncryptConditionKind::In { not: in_expression.not },
        position_values: BTreeMap::new(),
        position_index_map: BTreeMap::new(),
    };
    for (position, item) in list.items.iter().enumerate() {
        if !add_position(&mut condition, position, item) {
            trace!(table, column, position, "IN item is neither literal nor parameter marker");
            return None;
        }
    }
    Some(condition)
}

fn is_value(expression: &ExpressionSegment) -> bool {
    matches!(expression, ExpressionSegment::Literal(_) | ExpressionSegment::ParameterMarker(_))
}

fn add_position(condition: &mut EncryptCondition, position: usize, expression: &ExpressionSegment) -> bool {
    match expression {
        ExpressionSegment::Literal(literal) => {
            condition.position_values.insert(position, literal.value.clone());
            true
        }
        ExpressionSegment::ParameterMarker(marker) => {
            condition.position_index_map.insert(position, marker.parameter_index);
            true
        }
        _ => false,
    }
}
