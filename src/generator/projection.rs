use crate::*;
use std::sync::Arc;

/// Rewrites select list items bound to encrypted columns, in the statement
/// and in every nested select.
///
/// What replaces a column depends on where its select sits: a table
/// subquery also exposes the assisted query and like query columns to the
/// outer query, a predicate subquery compares through the assisted query
/// column, the rest project the cipher column under the logical name.
#[derive(Debug)]
pub struct EncryptProjectionTokenGenerator {
    rule: Arc<EncryptRule>,
}

impl EncryptProjectionTokenGenerator {
    pub fn new(rule: Arc<EncryptRule>) -> Self {
        Self { rule }
    }

    fn select_tokens(&self, select: &SelectStatementContext, database_type: &DatabaseType) -> Result<Vec<SqlToken>> {
        let mut result = Vec::new();
        for each in &select.projections {
            let token = match each {
                ProjectionSegment::Column(projection) => self.column_token(select, projection),
                ProjectionSegment::Shorthand(shorthand) => self.shorthand_token(select, shorthand, database_type)?,
                ProjectionSegment::Expression(_) => None,
            };
            result.extend(token);
        }
        Ok(result)
    }

    fn column_token(&self, select: &SelectStatementContext, projection: &ColumnProjectionSegment) -> Option<SqlToken> {
        if select.contains_table_subquery() {
            return None;
        }
        let column_segment = &projection.column;
        let (table, column) = find_encrypt_column(&self.rule, column_segment)?;
        let quote = column_segment.identifier.quote_character;
        let user_alias = projection.alias.as_ref().map(|alias| alias.identifier.clone());
        let logical = ProjectedColumn {
            owner: column_segment.owner.as_ref().map(|owner| owner.identifier.clone()),
            name: IdentifierValue::quoted(column_segment.name(), quote),
            alias: user_alias,
        };
        let projections = projections_of(table, column, &logical, select.subquery_type, false);
        debug!(column = %column.name, subquery = ?select.subquery_type, "Rewrite column projection");
        Some(SubstitutableColumnNameToken::new(column_segment.name_start(), projection.stop, projections).into())
    }

    fn shorthand_token(
        &self,
        select: &SelectStatementContext,
        shorthand: &ShorthandProjectionSegment,
        database_type: &DatabaseType,
    ) -> Result<Option<SqlToken>> {
        let encrypted = |each: &ShorthandColumn| self.find_shorthand_column(each).is_some();
        if !shorthand.actual_columns.iter().any(encrypted) {
            return Ok(None);
        }
        if select.contains_table_subquery() {
            return Err(Error::UnsupportedSqlOperation(
                "Shorthand projection over encrypt columns with table subquery".to_string(),
            ));
        }
        let mut projections = Vec::new();
        for each in &shorthand.actual_columns {
            match self.find_shorthand_column(each) {
                Some((table, column)) => {
                    let logical = ProjectedColumn {
                        owner: each.owner.clone(),
                        name: each.name.clone(),
                        alias: None,
                    };
                    projections.extend(projections_of(table, column, &logical, select.subquery_type, true));
                }
                None => projections.push(ColumnProjection::new(each.name.clone()).with_owner(each.owner.clone())),
            }
        }
        let start = shorthand
            .owner
            .as_ref()
            .map(|owner| owner.start)
            .unwrap_or(shorthand.start);
        debug!(start, columns = projections.len(), "Expand shorthand projection");
        Ok(Some(
            SubstitutableColumnNameToken::new(start, shorthand.stop, projections)
                .with_quote_character(database_type.quote_character())
                .into(),
        ))
    }

    fn find_shorthand_column(&self, column: &ShorthandColumn) -> Option<(&EncryptTable, &EncryptColumn)> {
        let table = self.rule.find_encrypt_table(column.table.as_deref()?)?;
        Some((table, table.find_encrypt_column(&column.name.value)?))
    }
}

impl SqlTokenGenerator for EncryptProjectionTokenGenerator {
    fn name(&self) -> &'static str {
        "projection"
    }

    fn is_generate_sql_token(&self, context: &StatementContext) -> bool {
        context
            .select_contexts()
            .iter()
            .any(|each| !each.tables.is_empty() && !each.projections.is_empty())
    }

    fn generate_sql_tokens(&self, context: &StatementContext) -> Result<Vec<SqlToken>> {
        let mut result = Vec::new();
        for each in context.select_contexts() {
            result.extend(self.select_tokens(each, &context.database_type)?);
        }
        Ok(result)
    }

    /// A shorthand token replaces whatever was generated at its start.
    fn supersedes_previous_tokens(&self) -> bool {
        true
    }
}

/// The logical column as it appears in the select list.
struct ProjectedColumn {
    owner: Option<IdentifierValue>,
    name: IdentifierValue,
    alias: Option<IdentifierValue>,
}

/// Physical projections of one encrypted column.
///
/// The first projection replaces the written column name, which for a
/// column projection keeps its written owner, so only shorthand expansions
/// and the extra projections carry an owner.
fn projections_of(
    table: &EncryptTable,
    column: &EncryptColumn,
    logical: &ProjectedColumn,
    subquery_type: Option<SubqueryType>,
    shorthand: bool,
) -> Vec<ColumnProjection> {
    let quote = logical.name.quote_character;
    let physical = |name: &str| IdentifierValue::quoted(name, quote);
    let first_owner = if shorthand { logical.owner.clone() } else { None };
    let cipher = ColumnProjection::new(physical(&column.cipher.name)).with_owner(first_owner.clone());
    match subquery_type {
        None | Some(SubqueryType::Projection) | Some(SubqueryType::Join) => {
            let name = preferred_plain_column(table, column).unwrap_or(&column.cipher.name);
            let alias = logical.alias.clone().unwrap_or_else(|| logical.name.clone());
            vec![
                ColumnProjection::new(physical(name))
                    .with_owner(first_owner)
                    .with_alias(Some(alias)),
            ]
        }
        Some(SubqueryType::Predicate) => vec![
            ColumnProjection::new(physical(query_column(table, column)))
                .with_owner(first_owner)
                .with_alias(logical.alias.clone()),
        ],
        Some(SubqueryType::Table) | Some(SubqueryType::InsertSelect) => {
            let mut result = vec![cipher.with_alias(logical.alias.clone())];
            let extra = [column.assisted_query_column(), column.like_query_column()];
            for each in extra.into_iter().flatten() {
                result.push(ColumnProjection::new(physical(each)).with_owner(logical.owner.clone()));
            }
            result
        }
        Some(SubqueryType::Exists) => vec![cipher.with_alias(logical.alias.clone())],
    }
}
