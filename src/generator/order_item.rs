use crate::*;
use std::sync::Arc;

/// ORDER BY items of the statement and of every nested select.
#[derive(Debug)]
pub struct EncryptOrderByItemTokenGenerator {
    rule: Arc<EncryptRule>,
}

impl EncryptOrderByItemTokenGenerator {
    pub fn new(rule: Arc<EncryptRule>) -> Self {
        Self { rule }
    }
}

impl SqlTokenGenerator for EncryptOrderByItemTokenGenerator {
    fn name(&self) -> &'static str {
        "order_by"
    }

    fn is_generate_sql_token(&self, context: &StatementContext) -> bool {
        contains_order_by_item(context)
    }

    fn generate_sql_tokens(&self, context: &StatementContext) -> Result<Vec<SqlToken>> {
        let mut items: Vec<&OrderByItemSegment> = context
            .select_contexts()
            .into_iter()
            .flat_map(|each| &each.order_by)
            .collect();
        if let BoundStatement::Update(update) = &context.statement {
            items.extend(&update.order_by);
        }
        Ok(item_tokens(&self.rule, items))
    }
}

/// GROUP BY items of the statement and of every nested select.
#[derive(Debug)]
pub struct EncryptGroupByItemTokenGenerator {
    rule: Arc<EncryptRule>,
}

impl EncryptGroupByItemTokenGenerator {
    pub fn new(rule: Arc<EncryptRule>) -> Self {
        Self { rule }
    }
}

impl SqlTokenGenerator for EncryptGroupByItemTokenGenerator {
    fn name(&self) -> &'static str {
        "group_by"
    }

    fn is_generate_sql_token(&self, context: &StatementContext) -> bool {
        contains_group_by_item(context)
    }

    fn generate_sql_tokens(&self, context: &StatementContext) -> Result<Vec<SqlToken>> {
        let items = context
            .select_contexts()
            .into_iter()
            .flat_map(|each| &each.group_by)
            .collect();
        Ok(item_tokens(&self.rule, items))
    }
}

/// GROUP BY counts too, an ORDER BY may be derived from it.
pub fn contains_order_by_item(context: &StatementContext) -> bool {
    let in_update = matches!(&context.statement, BoundStatement::Update(update) if !update.order_by.is_empty());
    in_update
        || context
            .select_contexts()
            .iter()
            .any(|each| !each.order_by.is_empty() || !each.group_by.is_empty())
}

pub fn contains_group_by_item(context: &StatementContext) -> bool {
    context
        .select_contexts()
        .iter()
        .any(|each| !each.group_by.is_empty())
}

/// Same column choice as predicates, see [`query_column`]. Index and
/// expression items are left alone.
fn item_tokens(rule: &EncryptRule, items: Vec<&OrderByItemSegment>) -> Vec<SqlToken> {
    items
        .into_iter()
        .filter_map(OrderByItemSegment::as_column)
        .filter_map(|column_segment| {
            let (table, column) = find_encrypt_column(rule, column_segment)?;
            let physical = query_column(table, column);
            trace!(column = column_segment.name(), physical, "Rewrite order item");
            Some(
                SubstitutableColumnNameToken::single(
                    column_segment.name_start(),
                    column_segment.stop,
                    physical,
                    column_segment.identifier.quote_character,
                )
                .into(),
            )
        })
        .collect()
}
