use crate::*;

/// Parameters matching the rewritten SQL.
///
/// A predicate right value replaces the parameter read by each of its
/// markers. A parameter assignment `c = ?` that became
/// `c_cipher = ?, c_assisted = ?` replaces its parameter with the cipher
/// value and inserts the other values right after it. Every marker must have
/// its parameter, else [`Error::MissingParameter`].
pub fn rewrite_parameters(tokens: &[SqlToken], parameters: &[Value]) -> Result<Vec<Value>> {
    let mut groups: Vec<Vec<Value>> = parameters.iter().map(|each| vec![each.clone()]).collect();
    for token in tokens {
        match token {
            SqlToken::PredicateRightValue(right_value) => {
                for (position, index) in right_value.parameter_indexes() {
                    let value = right_value.position_values().get(position).cloned().ok_or_else(|| {
                        Error::Internal(format!("No value for parameter marker at position {position}"))
                    })?;
                    *group_mut(&mut groups, *index)? = vec![value];
                }
            }
            SqlToken::Assignment(EncryptAssignmentToken::Parameter {
                parameter_index, values, ..
            }) => {
                let group = group_mut(&mut groups, *parameter_index)?;
                if values.is_empty() {
                    return Err(Error::MissingParameter(*parameter_index));
                }
                *group = values.clone();
            }
            SqlToken::Assignment(_)
            | SqlToken::Remove(_)
            | SqlToken::EncryptAlterTable(_)
            | SqlToken::SubstitutableColumnName(_) => {}
        }
    }
    Ok(groups.into_iter().flatten().collect())
}

fn group_mut(groups: &mut [Vec<Value>], index: usize) -> Result<&mut Vec<Value>> {
    groups.get_mut(index).ok_or(Error::MissingParameter(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, BTreeSet};

    #[test]
    fn assignment_values_expand_in_place() {
        let tokens: Vec<SqlToken> = vec![
            EncryptAssignmentToken::Parameter {
                start: 0,
                stop: 0,
                columns: vec!["pwd_cipher".into(), "pwd_assisted".into()],
                parameter_index: 1,
                values: vec![Value::from("enc(b)"), Value::from("assisted(b)")],
                quote_character: QuoteCharacter::None,
            }
            .into(),
        ];
        let parameters = [Value::from("a"), Value::from("b"), Value::Int(3)];
        assert_eq!(
            rewrite_parameters(&tokens, &parameters).unwrap(),
            vec![Value::from("a"), Value::from("enc(b)"), Value::from("assisted(b)"), Value::Int(3)]
        );
    }

    #[test]
    fn right_values_overwrite_marker_parameters() {
        let tokens: Vec<SqlToken> = vec![
            EncryptPredicateRightValueToken::In {
                start: 0,
                stop: 0,
                position_values: BTreeMap::from([(0, Value::from("lit")), (1, Value::from("enc(p)"))]),
                parameter_marker_positions: BTreeSet::from([1]),
                parameter_indexes: BTreeMap::from([(1, 0)]),
            }
            .into(),
        ];
        assert_eq!(
            rewrite_parameters(&tokens, &[Value::from("p")]).unwrap(),
            vec![Value::from("enc(p)")]
        );
    }

    #[test]
    fn assignment_without_values_fails() {
        let tokens: Vec<SqlToken> = vec![
            EncryptAssignmentToken::Parameter {
                start: 0,
                stop: 0,
                columns: vec!["pwd_cipher".into(), "pwd_assisted".into()],
                parameter_index: 0,
                values: Vec::new(),
                quote_character: QuoteCharacter::None,
            }
            .into(),
        ];
        assert!(matches!(rewrite_parameters(&tokens, &[]), Err(Error::MissingParameter(0))));
    }

    #[test]
    fn marker_beyond_parameters_fails() {
        let tokens: Vec<SqlToken> = vec![
            EncryptPredicateRightValueToken::Equal {
                start: 0,
                stop: 0,
                position_values: BTreeMap::from([(0, Value::from("x"))]),
                parameter_marker_positions: BTreeSet::from([0]),
                parameter_indexes: BTreeMap::from([(0, 2)]),
            }
            .into(),
        ];
        let result = rewrite_parameters(&tokens, &[Value::Null]);
        assert!(matches!(result, Err(Error::MissingParameter(2))));
    }
}
