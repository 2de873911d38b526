use crate::*;
use derive_more::From;

/// Role of a select nested inside another statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubqueryType {
    /// `SELECT (SELECT ...) FROM t`
    Projection,
    /// `SELECT ... FROM (SELECT ...) t`
    Table,
    /// `... JOIN (SELECT ...) t ON ...`
    Join,
    /// `WHERE a IN (SELECT ...)`
    Predicate,
    /// `INSERT INTO t SELECT ...`
    InsertSelect,
    /// `WHERE EXISTS (SELECT ...)`
    Exists,
}

/// `column = value` in a SET list or an ON DUPLICATE KEY UPDATE list.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnAssignmentSegment {
    pub start: usize,
    pub stop: usize,
    pub columns: Vec<ColumnSegment>,
    pub value: ExpressionSegment,
}

impl ColumnAssignmentSegment {
    pub fn new(column: ColumnSegment, value: impl Into<ExpressionSegment>) -> Self {
        let value = value.into();
        Self {
            start: column.start,
            stop: value.stop(),
            columns: vec![column],
            value,
        }
    }

    pub fn column(&self) -> Option<&ColumnSegment> {
        self.columns.first()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectStatementContext {
    pub start: usize,
    pub stop: usize,
    /// Original names of every table the select reads from.
    pub tables: Vec<String>,
    pub projections: Vec<ProjectionSegment>,
    pub where_segment: Option<ExpressionSegment>,
    pub join_conditions: Vec<ExpressionSegment>,
    pub group_by: Vec<OrderByItemSegment>,
    pub order_by: Vec<OrderByItemSegment>,
    /// `None` for the outermost select.
    pub subquery_type: Option<SubqueryType>,
    /// Directly nested selects, wherever they appear.
    pub subquery_contexts: Vec<SelectStatementContext>,
}

impl SelectStatementContext {
    pub fn new(start: usize, stop: usize) -> Self {
        Self {
            start,
            stop,
            ..Default::default()
        }
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.tables.push(table.into());
        self
    }

    pub fn with_projection(mut self, projection: impl Into<ProjectionSegment>) -> Self {
        self.projections.push(projection.into());
        self
    }

    pub fn with_where(mut self, expression: impl Into<ExpressionSegment>) -> Self {
        self.where_segment = Some(expression.into());
        self
    }

    pub fn with_join_condition(mut self, expression: impl Into<ExpressionSegment>) -> Self {
        self.join_conditions.push(expression.into());
        self
    }

    pub fn with_group_by(mut self, item: OrderByItemSegment) -> Self {
        self.group_by.push(item);
        self
    }

    pub fn with_order_by(mut self, item: OrderByItemSegment) -> Self {
        self.order_by.push(item);
        self
    }

    pub fn with_subquery(mut self, subquery_type: SubqueryType, mut subquery: SelectStatementContext) -> Self {
        subquery.subquery_type = Some(subquery_type);
        self.subquery_contexts.push(subquery);
        self
    }

    /// This select and every nested one, depth first.
    pub fn all_selects(&self) -> Vec<&SelectStatementContext> {
        let mut result = vec![self];
        for each in &self.subquery_contexts {
            result.extend(each.all_selects());
        }
        result
    }

    pub fn contains_table_subquery(&self) -> bool {
        self.subquery_contexts
            .iter()
            .any(|each| each.subquery_type == Some(SubqueryType::Table))
    }

    /// WHERE and join conditions of this select only.
    pub fn where_expressions(&self) -> Vec<&ExpressionSegment> {
        self.where_segment.iter().chain(&self.join_conditions).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct InsertStatementContext {
    pub table: String,
    /// `INSERT INTO t SET a = ?, b = ?`
    pub set_assignments: Vec<ColumnAssignmentSegment>,
    pub on_duplicate_key_update: Vec<ColumnAssignmentSegment>,
    pub insert_select: Option<SelectStatementContext>,
}

impl InsertStatementContext {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Default::default()
        }
    }

    pub fn with_set_assignment(mut self, assignment: ColumnAssignmentSegment) -> Self {
        self.set_assignments.push(assignment);
        self
    }

    pub fn with_on_duplicate_key_update(mut self, assignment: ColumnAssignmentSegment) -> Self {
        self.on_duplicate_key_update.push(assignment);
        self
    }

    pub fn with_insert_select(mut self, mut select: SelectStatementContext) -> Self {
        select.subquery_type = Some(SubqueryType::InsertSelect);
        self.insert_select = Some(select);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateStatementContext {
    pub tables: Vec<String>,
    pub set_assignments: Vec<ColumnAssignmentSegment>,
    pub where_segment: Option<ExpressionSegment>,
    pub order_by: Vec<OrderByItemSegment>,
}

impl UpdateStatementContext {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            tables: vec![table.into()],
            ..Default::default()
        }
    }

    pub fn with_set_assignment(mut self, assignment: ColumnAssignmentSegment) -> Self {
        self.set_assignments.push(assignment);
        self
    }

    pub fn with_where(mut self, expression: impl Into<ExpressionSegment>) -> Self {
        self.where_segment = Some(expression.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeleteStatementContext {
    pub tables: Vec<String>,
    pub where_segment: Option<ExpressionSegment>,
}

impl DeleteStatementContext {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            tables: vec![table.into()],
            where_segment: None,
        }
    }

    pub fn with_where(mut self, expression: impl Into<ExpressionSegment>) -> Self {
        self.where_segment = Some(expression.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateTableStatementContext {
    pub table: String,
    pub column_definitions: Vec<ColumnDefinitionSegment>,
}

impl CreateTableStatementContext {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column_definitions: Vec::new(),
        }
    }

    pub fn with_column_definition(mut self, definition: ColumnDefinitionSegment) -> Self {
        self.column_definitions.push(definition);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AlterTableStatementContext {
    pub table: String,
    pub add_column_definitions: Vec<AddColumnDefinitionSegment>,
    pub modify_column_definitions: Vec<ModifyColumnDefinitionSegment>,
    pub change_column_definitions: Vec<ChangeColumnDefinitionSegment>,
    pub drop_column_definitions: Vec<DropColumnDefinitionSegment>,
}

impl AlterTableStatementContext {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Default::default()
        }
    }
}

/// `CREATE INDEX idx ON t (a, b)`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateIndexStatementContext {
    pub table: String,
    pub columns: Vec<ColumnSegment>,
}

#[derive(Debug, Clone, PartialEq, From)]
pub enum BoundStatement {
    Select(SelectStatementContext),
    Insert(InsertStatementContext),
    Update(UpdateStatementContext),
    Delete(DeleteStatementContext),
    CreateTable(CreateTableStatementContext),
    AlterTable(AlterTableStatementContext),
    CreateIndex(CreateIndexStatementContext),
}

/// One bound statement plus the dialect it was written in.
#[derive(Debug, Clone, PartialEq)]
pub struct StatementContext {
    pub database_type: DatabaseType,
    pub statement: BoundStatement,
}

impl StatementContext {
    pub fn new(database_type: DatabaseType, statement: impl Into<BoundStatement>) -> Self {
        Self {
            database_type,
            statement: statement.into(),
        }
    }

    /// Every select of the statement, including nested ones.
    pub fn select_contexts(&self) -> Vec<&SelectStatementContext> {
        match &self.statement {
            BoundStatement::Select(select) => select.all_selects(),
            BoundStatement::Insert(insert) => insert
                .insert_select
                .as_ref()
                .map(SelectStatementContext::all_selects)
                .unwrap_or_default(),
            BoundStatement::Update(_)
            | BoundStatement::Delete(_)
            | BoundStatement::CreateTable(_)
            | BoundStatement::AlterTable(_)
            | BoundStatement::CreateIndex(_) => Vec::new(),
        }
    }

    /// WHERE and join conditions of the whole statement, nested selects included.
    pub fn where_expressions(&self) -> Vec<&ExpressionSegment> {
        match &self.statement {
            BoundStatement::Update(update) => update.where_segment.iter().collect(),
            BoundStatement::Delete(delete) => delete.where_segment.iter().collect(),
            BoundStatement::Select(_)
            | BoundStatement::Insert(_)
            | BoundStatement::CreateTable(_)
            | BoundStatement::AlterTable(_)
            | BoundStatement::CreateIndex(_) => self
                .select_contexts()
                .into_iter()
                .flat_map(SelectStatementContext::where_expressions)
                .collect(),
        }
    }

    pub fn table_names(&self) -> Vec<&str> {
        match &self.statement {
            BoundStatement::Select(select) => select
                .all_selects()
                .into_iter()
                .flat_map(|each| each.tables.iter().map(String::as_str))
                .collect(),
            BoundStatement::Insert(insert) => vec![insert.table.as_str()],
            BoundStatement::Update(update) => update.tables.iter().map(String::as_str).collect(),
            BoundStatement::Delete(delete) => delete.tables.iter().map(String::as_str).collect(),
            BoundStatement::CreateTable(create) => vec![create.table.as_str()],
            BoundStatement::AlterTable(alter) => vec![alter.table.as_str()],
            BoundStatement::CreateIndex(index) => vec![index.table.as_str()],
        }
    }
}
