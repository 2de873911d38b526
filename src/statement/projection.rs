use crate::*;
use derive_more::From;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnProjectionSegment {
    /// Covers the column and its alias.
    pub start: usize,
    pub stop: usize,
    pub column: ColumnSegment,
    pub alias: Option<AliasSegment>,
}

impl ColumnProjectionSegment {
    pub fn new(column: ColumnSegment) -> Self {
        Self {
            start: column.start,
            stop: column.stop,
            column,
            alias: None,
        }
    }

    pub fn with_alias(mut self, alias: AliasSegment) -> Self {
        self.stop = self.stop.max(alias.stop);
        self.alias = Some(alias);
        self
    }
}

/// A column a shorthand projection expands to, as resolved by the binder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShorthandColumn {
    pub owner: Option<IdentifierValue>,
    pub name: IdentifierValue,
    pub table: Option<String>,
}

impl ShorthandColumn {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            owner: None,
            name: IdentifierValue::new(name),
            table: None,
        }
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(IdentifierValue::new(owner));
        self
    }

    pub fn bound_to(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }
}

/// `*` or `t.*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShorthandProjectionSegment {
    pub start: usize,
    pub stop: usize,
    pub owner: Option<OwnerSegment>,
    pub actual_columns: Vec<ShorthandColumn>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionProjectionSegment {
    pub start: usize,
    pub stop: usize,
    pub expression: ExpressionSegment,
    pub alias: Option<AliasSegment>,
}

#[derive(Debug, Clone, PartialEq, From)]
pub enum ProjectionSegment {
    Column(ColumnProjectionSegment),
    Shorthand(ShorthandProjectionSegment),
    Expression(ExpressionProjectionSegment),
}

impl ProjectionSegment {
    pub fn start(&self) -> usize {
        match self {
            ProjectionSegment::Column(each) => each.start,
            ProjectionSegment::Shorthand(each) => each.start,
            ProjectionSegment::Expression(each) => each.start,
        }
    }

    pub fn stop(&self) -> usize {
        match self {
            ProjectionSegment::Column(each) => each.stop,
            ProjectionSegment::Shorthand(each) => each.stop,
            ProjectionSegment::Expression(each) => each.stop,
        }
    }
}
