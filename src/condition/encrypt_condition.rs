use crate::*;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncryptConditionKind {
    /// `=`, `<>`, `LIKE` and the like, with the operator as written.
    Binary { operator: String },
    In { not: bool },
}

/// A predicate on an encrypted column whose right side is made of literals
/// and parameter markers.
///
/// Positions number the values of the right side from zero. A position is
/// either in `position_values` (a literal) or in `position_index_map` (a
/// marker and the parameter index it reads).
#[derive(Debug, Clone, PartialEq)]
pub struct EncryptCondition {
    pub table_name: String,
    pub column_name: String,
    /// Span of the right side, parentheses included for IN lists.
    pub start: usize,
    pub stop: usize,
    pub kind: EncryptConditionKind,
    pub position_values: BTreeMap<usize, Value>,
    pub position_index_map: BTreeMap<usize, usize>,
}

impl EncryptCondition {
    pub fn is_like(&self) -> bool {
        match &self.kind {
            EncryptConditionKind::Binary { operator } => operator
                .split_whitespace()
                .last()
                .is_some_and(|each| each.eq_ignore_ascii_case("LIKE")),
            EncryptConditionKind::In { .. } => false,
        }
    }

    pub fn is_in(&self) -> bool {
        matches!(self.kind, EncryptConditionKind::In { .. })
    }

    pub fn position_count(&self) -> usize {
        self.position_values.len() + self.position_index_map.len()
    }

    /// Plain values of the right side in position order, markers resolved
    /// against `parameters`.
    pub fn values(&self, parameters: &[Value]) -> Result<Vec<Value>> {
        (0..self.position_count())
            .map(|position| {
                if let Some(value) = self.position_values.get(&position) {
                    return Ok(value.clone());
                }
                let index = self.position_index_map.get(&position).ok_or_else(|| {
                    Error::Internal(format!(
                        "Position {position} of condition on `{}.{}` has no value",
                        self.table_name, self.column_name
                    ))
                })?;
                parameters
                    .get(*index)
                    .cloned()
                    .ok_or(Error::MissingParameter(*index))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn condition(kind: EncryptConditionKind) -> EncryptCondition {
        EncryptCondition {
            table_name: "t_user".into(),
            column_name: "pwd".into(),
            start: 0,
            stop: 0,
            kind,
            position_values: BTreeMap::from([(1, Value::from("lit"))]),
            position_index_map: BTreeMap::from([(0, 1), (2, 0)]),
        }
    }

    #[test]
    fn values_mix_literals_and_parameters() {
        let condition = condition(EncryptConditionKind::In { not: false });
        let values = condition.values(&[Value::from("p0"), Value::from("p1")]).unwrap();
        assert_eq!(values, vec![Value::from("p1"), Value::from("lit"), Value::from("p0")]);
    }

    #[test]
    fn missing_parameter_is_reported() {
        let condition = condition(EncryptConditionKind::In { not: false });
        let result = condition.values(&[Value::from("p0")]);
        assert!(matches!(result, Err(Error::MissingParameter(1))));
    }

    #[test]
    fn not_like_counts_as_like() {
        let like = condition(EncryptConditionKind::Binary {
            operator: "NOT LIKE".into(),
        });
        assert!(like.is_like());
        assert!(!condition(EncryptConditionKind::Binary { operator: "=".into() }).is_like());
    }
}
