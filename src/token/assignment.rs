use crate::*;
use itertools::Itertools;
use std::fmt;

/// Rewritten `column = value` of a SET or ON DUPLICATE KEY UPDATE list.
///
/// The span runs from the assigned column to the end of the assignment.
/// Physical columns keep the quoting of the assigned column.
#[derive(Debug, Clone, PartialEq)]
pub enum EncryptAssignmentToken {
    /// `cipher = ?, assisted = ?`. `values` holds the encrypted parameter
    /// for each column when the parameter was known, in column order.
    Parameter {
        start: usize,
        stop: usize,
        columns: Vec<String>,
        parameter_index: usize,
        values: Vec<Value>,
        quote_character: QuoteCharacter,
    },
    /// `cipher = 'xx', assisted = 'yy'`
    Literal {
        start: usize,
        stop: usize,
        assignments: Vec<(String, Value)>,
        quote_character: QuoteCharacter,
    },
    /// `cipher = VALUES(other_cipher)`
    Function {
        start: usize,
        stop: usize,
        assignments: Vec<(String, String)>,
        quote_character: QuoteCharacter,
    },
}

impl EncryptAssignmentToken {
    pub fn start(&self) -> usize {
        match self {
            EncryptAssignmentToken::Parameter { start, .. }
            | EncryptAssignmentToken::Literal { start, .. }
            | EncryptAssignmentToken::Function { start, .. } => *start,
        }
    }

    pub fn stop(&self) -> usize {
        match self {
            EncryptAssignmentToken::Parameter { stop, .. }
            | EncryptAssignmentToken::Literal { stop, .. }
            | EncryptAssignmentToken::Function { stop, .. } => *stop,
        }
    }

    pub fn quote_character(&self) -> QuoteCharacter {
        match self {
            EncryptAssignmentToken::Parameter { quote_character, .. }
            | EncryptAssignmentToken::Literal { quote_character, .. }
            | EncryptAssignmentToken::Function { quote_character, .. } => *quote_character,
        }
    }

    /// Physical columns assigned, in render order.
    pub fn column_names(&self) -> Vec<&str> {
        match self {
            EncryptAssignmentToken::Parameter { columns, .. } => columns.iter().map(String::as_str).collect(),
            EncryptAssignmentToken::Literal { assignments, .. } => {
                assignments.iter().map(|(column, _)| column.as_str()).collect()
            }
            EncryptAssignmentToken::Function { assignments, .. } => {
                assignments.iter().map(|(column, _)| column.as_str()).collect()
            }
        }
    }
}

impl fmt::Display for EncryptAssignmentToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let quote = self.quote_character();
        let rendered = match self {
            EncryptAssignmentToken::Parameter { columns, .. } => {
                columns.iter().map(|column| format!("{} = ?", quote.wrap(column))).join(", ")
            }
            EncryptAssignmentToken::Literal { assignments, .. } => assignments
                .iter()
                .map(|(column, value)| format!("{} = {}", quote.wrap(column), value.to_sql_literal()))
                .join(", "),
            EncryptAssignmentToken::Function { assignments, .. } => assignments
                .iter()
                .map(|(column, value)| format!("{} = {value}", quote.wrap(column)))
                .join(", "),
        };
        f.write_str(&rendered)
    }
}
