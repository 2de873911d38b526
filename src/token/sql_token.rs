use crate::*;
use derive_more::{Display, From};

#[derive(Debug, Clone, PartialEq, Display, From)]
pub enum SqlToken {
    Remove(RemoveToken),
    EncryptAlterTable(EncryptAlterTableToken),
    SubstitutableColumnName(SubstitutableColumnNameToken),
    Assignment(EncryptAssignmentToken),
    PredicateRightValue(EncryptPredicateRightValueToken),
}

impl SqlToken {
    pub fn start(&self) -> usize {
        match self {
            SqlToken::Remove(token) => token.start,
            SqlToken::EncryptAlterTable(token) => token.start,
            SqlToken::SubstitutableColumnName(token) => token.start,
            SqlToken::Assignment(token) => token.start(),
            SqlToken::PredicateRightValue(token) => token.start(),
        }
    }

    pub fn stop(&self) -> usize {
        match self {
            SqlToken::Remove(token) => token.stop,
            SqlToken::EncryptAlterTable(token) => token.stop,
            SqlToken::SubstitutableColumnName(token) => token.stop,
            SqlToken::Assignment(token) => token.stop(),
            SqlToken::PredicateRightValue(token) => token.stop(),
        }
    }

    /// True for tokens that only insert text.
    pub fn is_insertion(&self) -> bool {
        self.start() > self.stop()
    }

    /// Whether two replacing tokens cover a common character.
    pub fn overlaps(&self, other: &SqlToken) -> bool {
        !self.is_insertion()
            && !other.is_insertion()
            && self.start() <= other.stop()
            && other.start() <= self.stop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest]
    #[case((0, 4), (4, 6), true)]
    #[case((0, 4), (5, 6), false)]
    #[case((0, 4), (3, 2), false)]
    fn overlap_ignores_insertions(#[case] left: (usize, usize), #[case] right: (usize, usize), #[case] expected: bool) {
        let left = SqlToken::from(RemoveToken::new(left.0, left.1));
        let right = SqlToken::from(RemoveToken::new(right.0, right.1));
        assert_eq!(left.overlaps(&right), expected);
        assert_eq!(right.overlaps(&left), expected);
    }
}
