use crate::*;
use itertools::Itertools;
use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
};

/// Encrypted right side of an equality, LIKE or IN predicate.
///
/// `position_values` holds the encrypted value of every position. Positions
/// in `parameter_marker_positions` still render as `?`; their values reach
/// the parameter list through `parameter_indexes`.
#[derive(Debug, Clone, PartialEq)]
pub enum EncryptPredicateRightValueToken {
    Equal {
        start: usize,
        stop: usize,
        position_values: BTreeMap<usize, Value>,
        parameter_marker_positions: BTreeSet<usize>,
        parameter_indexes: BTreeMap<usize, usize>,
    },
    In {
        start: usize,
        stop: usize,
        position_values: BTreeMap<usize, Value>,
        parameter_marker_positions: BTreeSet<usize>,
        parameter_indexes: BTreeMap<usize, usize>,
    },
}

impl EncryptPredicateRightValueToken {
    pub fn start(&self) -> usize {
        match self {
            EncryptPredicateRightValueToken::Equal { start, .. } | EncryptPredicateRightValueToken::In { start, .. } => {
                *start
            }
        }
    }

    pub fn stop(&self) -> usize {
        match self {
            EncryptPredicateRightValueToken::Equal { stop, .. } | EncryptPredicateRightValueToken::In { stop, .. } => {
                *stop
            }
        }
    }

    pub fn position_values(&self) -> &BTreeMap<usize, Value> {
        match self {
            EncryptPredicateRightValueToken::Equal { position_values, .. }
            | EncryptPredicateRightValueToken::In { position_values, .. } => position_values,
        }
    }

    pub fn parameter_marker_positions(&self) -> &BTreeSet<usize> {
        match self {
            EncryptPredicateRightValueToken::Equal {
                parameter_marker_positions,
                ..
            }
            | EncryptPredicateRightValueToken::In {
                parameter_marker_positions,
                ..
            } => parameter_marker_positions,
        }
    }

    /// Marker position to the index of the parameter it reads.
    pub fn parameter_indexes(&self) -> &BTreeMap<usize, usize> {
        match self {
            EncryptPredicateRightValueToken::Equal { parameter_indexes, .. }
            | EncryptPredicateRightValueToken::In { parameter_indexes, .. } => parameter_indexes,
        }
    }

    fn render_position(&self, position: usize) -> String {
        if self.parameter_marker_positions().contains(&position) {
            return "?".to_string();
        }
        self.position_values()
            .get(&position)
            .map(Value::to_sql_literal)
            .unwrap_or_else(|| "NULL".to_string())
    }
}

impl fmt::Display for EncryptPredicateRightValueToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncryptPredicateRightValueToken::Equal { .. } => f.write_str(&self.render_position(0)),
            EncryptPredicateRightValueToken::In { position_values, .. } => {
                let items = position_values.keys().map(|each| self.render_position(*each)).join(", ");
                write!(f, "({items})")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_renders_literal_or_marker() {
        let literal = EncryptPredicateRightValueToken::Equal {
            start: 10,
            stop: 12,
            position_values: BTreeMap::from([(0, Value::from("enc(a)"))]),
            parameter_marker_positions: BTreeSet::new(),
            parameter_indexes: BTreeMap::new(),
        };
        assert_eq!(literal.to_string(), "'enc(a)'");

        let marker = EncryptPredicateRightValueToken::Equal {
            start: 10,
            stop: 10,
            position_values: BTreeMap::from([(0, Value::from("enc(a)"))]),
            parameter_marker_positions: BTreeSet::from([0]),
            parameter_indexes: BTreeMap::from([(0, 3)]),
        };
        assert_eq!(marker.to_string(), "?");
        assert_eq!(marker.parameter_indexes()[&0], 3);
    }

    #[test]
    fn in_renders_every_position() {
        let token = EncryptPredicateRightValueToken::In {
            start: 0,
            stop: 9,
            position_values: BTreeMap::from([
                (0, Value::from("enc(a)")),
                (1, Value::from("enc(b)")),
                (2, Value::Int(7)),
            ]),
            parameter_marker_positions: BTreeSet::from([1]),
            parameter_indexes: BTreeMap::from([(1, 0)]),
        };
        assert_eq!(token.to_string(), "('enc(a)', ?, 7)");
    }
}
