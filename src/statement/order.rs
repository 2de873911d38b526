use crate::*;
use derive_more::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum OrderDirection {
    #[default]
    #[display("ASC")]
    Asc,
    #[display("DESC")]
    Desc,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OrderByItemSegment {
    /// `ORDER BY pwd`
    Column {
        column: ColumnSegment,
        direction: OrderDirection,
    },
    /// `ORDER BY 2`
    Index {
        start: usize,
        stop: usize,
        index: usize,
        direction: OrderDirection,
    },
    /// `ORDER BY LENGTH(pwd)`
    Expression {
        start: usize,
        stop: usize,
        expression: ExpressionSegment,
        direction: OrderDirection,
    },
}

impl OrderByItemSegment {
    pub fn column(column: ColumnSegment) -> Self {
        OrderByItemSegment::Column {
            column,
            direction: OrderDirection::Asc,
        }
    }

    pub fn as_column(&self) -> Option<&ColumnSegment> {
        match self {
            OrderByItemSegment::Column { column, .. } => Some(column),
            OrderByItemSegment::Index { .. } | OrderByItemSegment::Expression { .. } => None,
        }
    }
}
