use crate::*;

/// `pwd VARCHAR(100) NOT NULL`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDefinitionSegment {
    pub start: usize,
    pub stop: usize,
    pub column_name: ColumnSegment,
}

impl ColumnDefinitionSegment {
    pub fn new(start: usize, stop: usize, column_name: ColumnSegment) -> Self {
        Self {
            start,
            stop,
            column_name,
        }
    }

    pub fn name(&self) -> &str {
        self.column_name.name()
    }
}

/// `FIRST` (no column) or `AFTER pwd`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnPositionSegment {
    pub start: usize,
    pub stop: usize,
    pub column_name: Option<ColumnSegment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddColumnDefinitionSegment {
    pub start: usize,
    pub stop: usize,
    pub column_definitions: Vec<ColumnDefinitionSegment>,
    pub column_position: Option<ColumnPositionSegment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifyColumnDefinitionSegment {
    pub start: usize,
    pub stop: usize,
    pub column_definition: ColumnDefinitionSegment,
    pub column_position: Option<ColumnPositionSegment>,
}

/// `CHANGE COLUMN previous new_definition`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeColumnDefinitionSegment {
    pub start: usize,
    pub stop: usize,
    pub previous_column: ColumnSegment,
    pub column_definition: ColumnDefinitionSegment,
    pub column_position: Option<ColumnPositionSegment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropColumnDefinitionSegment {
    pub start: usize,
    pub stop: usize,
    pub columns: Vec<ColumnSegment>,
}
