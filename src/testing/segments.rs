//! Builders locating segments by their text, so tests state SQL once and
//! derive every offset from it.
use crate::*;

/// Inclusive character span of the `n`th occurrence of `needle`.
pub fn span_nth(sql: &str, needle: &str, n: usize) -> (usize, usize) {
    let (byte_offset, _) = sql
        .match_indices(needle)
        .nth(n)
        .unwrap_or_else(|| panic!("`{needle}` occurs fewer than {} times in `{sql}`", n + 1));
    let start = sql[..byte_offset].chars().count();
    (start, start + needle.chars().count() - 1)
}

pub fn span_of(sql: &str, needle: &str) -> (usize, usize) {
    span_nth(sql, needle, 0)
}

/// Column written as `name`, `` `name` `` or `owner.name`, bound to `table`.
pub fn column_nth(sql: &str, text: &str, n: usize, table: &str) -> ColumnSegment {
    let (start, stop) = span_nth(sql, text, n);
    let (owner, name) = match text.split_once('.') {
        Some((owner, name)) => (Some(owner), name),
        None => (None, text),
    };
    let column = ColumnSegment::new(start, stop, IdentifierValue::parse(name)).bound_to(table);
    match owner {
        Some(owner) => {
            let owner_stop = start + owner.chars().count() - 1;
            column.with_owner(OwnerSegment::new(start, owner_stop, IdentifierValue::parse(owner)))
        }
        None => column,
    }
}

pub fn column_at(sql: &str, text: &str, table: &str) -> ColumnSegment {
    column_nth(sql, text, 0, table)
}

/// Literal written as `'text'`, a number or `NULL`.
pub fn literal_at(sql: &str, text: &str) -> ExpressionSegment {
    let (start, stop) = span_of(sql, text);
    let value = if let Some(inner) = text.strip_prefix('\'').and_then(|rest| rest.strip_suffix('\'')) {
        Value::from(inner)
    } else if text.eq_ignore_ascii_case("NULL") {
        Value::Null
    } else {
        text.parse::<i64>().map(Value::Int).unwrap_or_else(|_| Value::from(text))
    };
    LiteralExpressionSegment { start, stop, value }.into()
}

/// The `n`th `?`, reading parameter `n`.
pub fn param_nth(sql: &str, n: usize) -> ExpressionSegment {
    let (start, stop) = span_nth(sql, "?", n);
    ParameterMarkerExpressionSegment {
        start,
        stop,
        parameter_index: n,
    }
    .into()
}

pub fn binary_expr(left: ExpressionSegment, operator: &str, right: ExpressionSegment) -> ExpressionSegment {
    BinaryOperationExpression {
        start: left.start(),
        stop: right.stop(),
        left: Box::new(left),
        operator: operator.to_string(),
        right: Box::new(right),
    }
    .into()
}

/// `left [NOT] IN list_text`, where `list_text` includes the parentheses.
pub fn in_expr(
    sql: &str,
    left: ColumnSegment,
    list_text: &str,
    items: Vec<ExpressionSegment>,
    not: bool,
) -> ExpressionSegment {
    let (start, stop) = span_of(sql, list_text);
    InExpression {
        start: left.start,
        stop,
        left: Box::new(left.into()),
        right: Box::new(ListExpression { start, stop, items }.into()),
        not,
    }
    .into()
}

/// `VALUES(column)` as written in `sql`.
pub fn values_function(sql: &str, text: &str, table: &str) -> ExpressionSegment {
    let (start, stop) = span_of(sql, text);
    let inner = text
        .strip_prefix("VALUES(")
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(text);
    let inner_start = start + "VALUES(".len();
    let column = ColumnSegment::new(
        inner_start,
        inner_start + inner.chars().count() - 1,
        IdentifierValue::parse(inner),
    )
    .bound_to(table);
    FunctionSegment {
        start,
        stop,
        name: "VALUES".to_string(),
        parameters: vec![column.into()],
        text: text.to_string(),
    }
    .into()
}

/// Column definition starting at `text`'s name and covering all of `text`,
/// e.g. `pwd VARCHAR(100)`.
pub fn definition_at(sql: &str, text: &str) -> ColumnDefinitionSegment {
    let (start, stop) = span_of(sql, text);
    let name = text.split_whitespace().next().unwrap_or(text);
    let column_name = ColumnSegment::new(start, start + name.chars().count() - 1, IdentifierValue::parse(name));
    ColumnDefinitionSegment::new(start, stop, column_name)
}
