use crate::*;
use itertools::Itertools;
use std::sync::Arc;

/// Rewrites ADD, MODIFY, CHANGE and DROP COLUMN clauses of ALTER TABLE.
///
/// The cipher column takes the place of the logical name. Every other
/// physical column gets its own clause, appended after the original one as
/// `, ADD COLUMN <name>` followed by a copy of the original column type.
#[derive(Debug)]
pub struct EncryptAlterTableTokenGenerator {
    rule: Arc<EncryptRule>,
}

impl EncryptAlterTableTokenGenerator {
    pub fn new(rule: Arc<EncryptRule>) -> Self {
        Self { rule }
    }

    fn add_column_tokens(&self, table: &EncryptTable, segment: &AddColumnDefinitionSegment) -> Result<Vec<SqlToken>> {
        let mut result = Vec::new();
        for definition in &segment.column_definitions {
            if let Some(column) = table.find_encrypt_column(definition.name()) {
                result.extend(rename_tokens(&definition.column_name, column));
                result.extend(sub_column_tokens(
                    column,
                    segment.stop + 1,
                    definition.column_name.stop,
                    ", ADD COLUMN",
                ));
            }
        }
        result.extend(position_token(table, segment.column_position.as_ref())?);
        Ok(result)
    }

    fn modify_column_tokens(
        &self,
        table: &EncryptTable,
        segment: &ModifyColumnDefinitionSegment,
    ) -> Result<Vec<SqlToken>> {
        let definition = &segment.column_definition;
        let mut result = Vec::new();
        if let Some(column) = table.find_encrypt_column(definition.name()) {
            result.extend(rename_tokens(&definition.column_name, column));
            result.extend(sub_column_tokens(
                column,
                segment.stop + 1,
                definition.column_name.stop,
                ", MODIFY COLUMN",
            ));
        }
        result.extend(position_token(table, segment.column_position.as_ref())?);
        Ok(result)
    }

    fn change_column_tokens(
        &self,
        table: &EncryptTable,
        segment: &ChangeColumnDefinitionSegment,
    ) -> Result<Vec<SqlToken>> {
        let previous_name = segment.previous_column.name();
        let name = segment.column_definition.name();
        let mut result = Vec::new();
        if let Some((previous, current)) = same_encrypt_columns(table, previous_name, name)? {
            result.extend(rename_tokens(&segment.previous_column, previous));
            result.extend(rename_tokens(&segment.column_definition.column_name, current));
            let insert_at = segment.stop + 1;
            let name_stop = segment.column_definition.column_name.stop;
            let pairs = [
                (previous.assisted_query_column(), current.assisted_query_column()),
                (previous.like_query_column(), current.like_query_column()),
                (previous.plain_column(), current.plain_column()),
            ];
            for (previous_sub, current_sub) in pairs {
                if let (Some(previous_sub), Some(current_sub)) = (previous_sub, current_sub) {
                    result.push(
                        EncryptAlterTableToken::new(insert_at, name_stop, current_sub)
                            .with_prefix(format!(", CHANGE COLUMN {previous_sub}"))
                            .into(),
                    );
                }
            }
        }
        result.extend(position_token(table, segment.column_position.as_ref())?);
        Ok(result)
    }

    fn drop_column_tokens(
        &self,
        table: &EncryptTable,
        segment: &DropColumnDefinitionSegment,
        database_type: &DatabaseType,
    ) -> Vec<SqlToken> {
        if !segment.columns.iter().any(|each| table.is_encrypt_column(each.name())) {
            return Vec::new();
        }
        if let Some((left, right)) = drop_joiners(database_type) {
            return merged_drop_tokens(table, segment, left, right);
        }
        let mut result = Vec::new();
        for each in &segment.columns {
            if let Some(column) = table.find_encrypt_column(each.name()) {
                result.extend(rename_tokens(each, column));
                result.extend(sub_column_tokens(column, segment.stop + 1, each.stop, ", DROP COLUMN"));
            }
        }
        result
    }
}

impl SqlTokenGenerator for EncryptAlterTableTokenGenerator {
    fn name(&self) -> &'static str {
        "alter_table"
    }

    fn is_generate_sql_token(&self, context: &StatementContext) -> bool {
        matches!(context.statement, BoundStatement::AlterTable(_))
    }

    fn generate_sql_tokens(&self, context: &StatementContext) -> Result<Vec<SqlToken>> {
        let BoundStatement::AlterTable(alter) = &context.statement else {
            return Ok(Vec::new());
        };
        let Some(table) = self.rule.find_encrypt_table(&alter.table) else {
            trace!(table = %alter.table, "Not an encrypt table");
            return Ok(Vec::new());
        };
        let mut result = Vec::new();
        for each in &alter.add_column_definitions {
            result.extend(self.add_column_tokens(table, each)?);
        }
        for each in &alter.modify_column_definitions {
            result.extend(self.modify_column_tokens(table, each)?);
        }
        for each in &alter.change_column_definitions {
            result.extend(self.change_column_tokens(table, each)?);
        }
        for each in &alter.drop_column_definitions {
            result.extend(self.drop_column_tokens(table, each, &context.database_type));
        }
        debug!(table = %alter.table, tokens = result.len(), "Rewrite alter table");
        Ok(result)
    }
}

/// Removes the logical name and inserts the cipher name in its place.
fn rename_tokens(name: &ColumnSegment, column: &EncryptColumn) -> [SqlToken; 2] {
    [
        RemoveToken::new(name.start, name.stop).into(),
        EncryptAlterTableToken::new(name.stop + 1, name.stop, &column.cipher.name).into(),
    ]
}

/// Appends one clause per assisted query, like query and plain column.
fn sub_column_tokens(column: &EncryptColumn, insert_at: usize, name_stop: usize, prefix: &str) -> Vec<SqlToken> {
    [
        column.assisted_query_column(),
        column.like_query_column(),
        column.plain_column(),
    ]
    .into_iter()
    .flatten()
    .map(|each| {
        EncryptAlterTableToken::new(insert_at, name_stop, each)
            .with_prefix(prefix)
            .into()
    })
    .collect()
}

/// `AFTER pwd` becomes `AFTER pwd_cipher`.
fn position_token(table: &EncryptTable, position: Option<&ColumnPositionSegment>) -> Result<Option<SqlToken>> {
    let Some((position, column)) = position.and_then(|each| Some((each, each.column_name.as_ref()?))) else {
        return Ok(None);
    };
    if !table.is_encrypt_column(column.name()) {
        return Ok(None);
    }
    let cipher = table.get_cipher_column(column.name())?;
    Ok(Some(EncryptAlterTableToken::new(column.start, position.stop, cipher).into()))
}

/// Both columns of a CHANGE must share their encryption setup.
///
/// Returns the pair when both are encrypted and `None` when neither is.
fn same_encrypt_columns<'t>(
    table: &'t EncryptTable,
    previous_name: &str,
    name: &str,
) -> Result<Option<(&'t EncryptColumn, &'t EncryptColumn)>> {
    match (table.find_encrypt_column(previous_name), table.find_encrypt_column(name)) {
        (None, None) => Ok(None),
        (Some(previous), Some(current))
            if same_encryptor(&previous.cipher, &current.cipher) && previous.has_same_sub_columns(current) =>
        {
            Ok(Some((previous, current)))
        }
        _ => Err(Error::EncryptColumnAlter {
            table: table.name.clone(),
            column: name.to_string(),
            previous_column: previous_name.to_string(),
        }),
    }
}

fn same_encryptor(left: &EncryptColumnItem, right: &EncryptColumnItem) -> bool {
    Arc::ptr_eq(&left.encryptor, &right.encryptor) || left.encryptor_name == right.encryptor_name
}

/// Left and right joiners of dialects that drop several columns in one
/// clause.
fn drop_joiners(database_type: &DatabaseType) -> Option<(&'static str, &'static str)> {
    match database_type {
        DatabaseType::SqlServer => Some(("", "")),
        DatabaseType::Oracle => Some(("(", ")")),
        DatabaseType::MySQL | DatabaseType::PostgreSQL | DatabaseType::Other(_) => None,
    }
}

/// One removal over the whole column list and one insertion listing every
/// physical column, encrypted or not, in the original order.
fn merged_drop_tokens(
    table: &EncryptTable,
    segment: &DropColumnDefinitionSegment,
    left: &str,
    right: &str,
) -> Vec<SqlToken> {
    let (Some(first), Some(last)) = (segment.columns.first(), segment.columns.last()) else {
        return Vec::new();
    };
    let names = segment
        .columns
        .iter()
        .flat_map(|each| match table.find_encrypt_column(each.name()) {
            Some(column) => [
                Some(column.cipher.name.as_str()),
                column.assisted_query_column(),
                column.like_query_column(),
                column.plain_column(),
            ]
            .into_iter()
            .flatten()
            .map(str::to_string)
            .collect::<Vec<_>>(),
            None => vec![each.identifier.quote_character.wrap(each.name())],
        })
        .join(",");
    vec![
        RemoveToken::new(first.start, last.stop).into(),
        EncryptAlterTableToken::new(last.stop + 1, last.stop, format!("{left}{names}{right}")).into(),
    ]
}
