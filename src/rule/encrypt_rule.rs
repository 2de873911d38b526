use crate::*;
use std::{
    collections::BTreeMap,
    sync::Arc,
};

/// Read-only view over every encrypted table.
///
/// Built once from configuration and shared as `Arc<EncryptRule>`. A changed
/// configuration produces a new rule, see [`RuleSnapshot`].
#[derive(Debug, Clone, Default)]
pub struct EncryptRule {
    tables: BTreeMap<String, EncryptTable>,
    encryptors: BTreeMap<String, Arc<dyn EncryptAlgorithm>>,
}

impl EncryptRule {
    pub fn new(tables: impl IntoIterator<Item = EncryptTable>) -> Result<Self> {
        let mut result = Self::default();
        for each in tables {
            let key = each.name.to_lowercase();
            if result.tables.contains_key(&key) {
                return Err(Error::Config(format!("Duplicate encrypt table `{}`", each.name)));
            }
            result.tables.insert(key, each);
        }
        Ok(result)
    }

    /// Keeps the named algorithm instances the tables were built from.
    pub fn with_encryptors(mut self, encryptors: BTreeMap<String, Arc<dyn EncryptAlgorithm>>) -> Self {
        self.encryptors = encryptors;
        self
    }

    pub fn encryptors(&self) -> &BTreeMap<String, Arc<dyn EncryptAlgorithm>> {
        &self.encryptors
    }

    /// Ordered by lower-cased table name.
    pub fn tables(&self) -> impl Iterator<Item = &EncryptTable> {
        self.tables.values()
    }

    pub fn find_encrypt_table(&self, table: &str) -> Option<&EncryptTable> {
        self.tables.get(&table.to_lowercase())
    }

    pub fn get_encrypt_table(&self, table: &str) -> Result<&EncryptTable> {
        self.find_encrypt_table(table)
            .ok_or_else(|| Error::TableNotFound(table.to_string()))
    }

    pub fn find_encrypt_column(&self, table: &str, column: &str) -> Option<&EncryptColumn> {
        self.find_encrypt_table(table)?.find_encrypt_column(column)
    }

    pub fn is_encrypt_column(&self, table: &str, column: &str) -> bool {
        self.find_encrypt_column(table, column).is_some()
    }

    pub fn find_encryptor(&self, table: &str, column: &str) -> Option<Arc<dyn EncryptAlgorithm>> {
        self.find_encrypt_table(table)?.find_encryptor(column)
    }

    pub fn get_cipher_column(&self, table: &str, column: &str) -> Result<&str> {
        self.find_encrypt_table(table)
            .ok_or_else(|| Error::column_not_found(table, column))?
            .get_cipher_column(column)
    }

    pub fn find_assisted_query_column(&self, table: &str, column: &str) -> Option<&str> {
        self.find_encrypt_table(table)?.find_assisted_query_column(column)
    }

    pub fn find_like_query_column(&self, table: &str, column: &str) -> Option<&str> {
        self.find_encrypt_table(table)?.find_like_query_column(column)
    }

    /// Same as [`EncryptRule::find_like_query_column`].
    pub fn find_fuzzy_query_column(&self, table: &str, column: &str) -> Option<&str> {
        self.find_like_query_column(table, column)
    }

    pub fn find_plain_column(&self, table: &str, column: &str) -> Option<&str> {
        self.find_encrypt_table(table)?.find_plain_column(column)
    }

    /// Unknown tables query through the cipher column.
    pub fn is_query_with_cipher_column(&self, table: &str, column: &str) -> bool {
        self.find_encrypt_table(table)
            .is_none_or(|each| each.is_query_with_cipher_column(column))
    }

    pub fn get_encrypt_values(
        &self,
        database: &str,
        schema: &str,
        table: &str,
        column: &str,
        plain: &[Value],
    ) -> Result<Vec<Value>> {
        let encrypt_column = self.get_column(table, column)?;
        let context = EncryptContext::new(database, schema, table, column);
        encrypt_column.cipher.encrypt(&context, plain)
    }

    pub fn get_encrypt_assisted_query_values(
        &self,
        database: &str,
        schema: &str,
        table: &str,
        column: &str,
        plain: &[Value],
    ) -> Result<Vec<Value>> {
        let item = self
            .get_column(table, column)?
            .assisted_query
            .as_ref()
            .ok_or_else(|| missing_encryptor("assisted query", table, column))?;
        item.encrypt(&EncryptContext::new(database, schema, table, column), plain)
    }

    pub fn get_encrypt_like_query_values(
        &self,
        database: &str,
        schema: &str,
        table: &str,
        column: &str,
        plain: &[Value],
    ) -> Result<Vec<Value>> {
        let item = self
            .get_column(table, column)?
            .like_query
            .as_ref()
            .ok_or_else(|| missing_encryptor("like query", table, column))?;
        item.encrypt(&EncryptContext::new(database, schema, table, column), plain)
    }

    /// Same as [`EncryptRule::get_encrypt_like_query_values`].
    pub fn get_encrypt_fuzzy_query_values(
        &self,
        database: &str,
        schema: &str,
        table: &str,
        column: &str,
        plain: &[Value],
    ) -> Result<Vec<Value>> {
        self.get_encrypt_like_query_values(database, schema, table, column, plain)
    }

    fn get_column(&self, table: &str, column: &str) -> Result<&EncryptColumn> {
        self.find_encrypt_column(table, column)
            .ok_or_else(|| Error::column_not_found(table, column))
    }
}

fn missing_encryptor(kind: &str, table: &str, column: &str) -> Error {
    Error::Algorithm(format!("Can not find {kind} encryptor of `{table}.{column}`"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_encryptor_is_stable() {
        let rule = user_rule();
        let first = rule.find_encryptor("t_user", "pwd").unwrap();
        let second = rule.find_encryptor("T_USER", "pwd").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(rule.find_encryptor("t_user", "age").is_none());
        assert!(rule.find_encryptor("t_unknown", "pwd").is_none());
    }

    #[test]
    fn tables_are_listed_by_name() {
        let rule = EncryptRule::new(["t_zeta", "T_Alpha", "t_mid"].map(EncryptTable::new)).unwrap();
        let names: Vec<&str> = rule.tables().map(|table| table.name.as_str()).collect();
        assert_eq!(names, vec!["T_Alpha", "t_mid", "t_zeta"]);
        let user = user_rule();
        let names: Vec<&str> = user.tables().map(|table| table.name.as_str()).collect();
        assert_eq!(names, vec!["t_order", "t_user"]);
    }

    #[test]
    fn cipher_lookup_on_unknown_table_fails() {
        let rule = user_rule();
        let result = rule.get_cipher_column("t_unknown", "pwd");
        assert!(matches!(result, Err(Error::ColumnNotFound { .. })));
    }

    #[test]
    fn encrypt_values_keep_order() {
        let rule = user_rule();
        let values = rule
            .get_encrypt_values("db", "db", "t_user", "pwd", &[Value::from("a"), Value::Int(1), Value::Null])
            .unwrap();
        assert_eq!(
            values,
            vec![Value::from("enc(a)"), Value::from("enc(1)"), Value::Null]
        );
    }

    #[test]
    fn sub_column_values_use_their_own_algorithm() {
        let rule = user_rule();
        let plain = [Value::from("x")];
        assert_eq!(
            rule.get_encrypt_assisted_query_values("db", "db", "t_user", "pwd", &plain).unwrap(),
            vec![Value::from("assisted(x)")]
        );
        assert_eq!(
            rule.get_encrypt_fuzzy_query_values("db", "db", "t_user", "pwd", &plain).unwrap(),
            vec![Value::from("like(x)")]
        );
    }

    #[test]
    fn missing_sub_column_fails() {
        let result = user_rule().get_encrypt_like_query_values("db", "db", "t_user", "name", &[Value::from("x")]);
        assert!(matches!(result, Err(Error::Algorithm(_))));
    }

    #[test]
    fn encryption_context_names_the_column() {
        let rule = user_rule();
        let values = rule
            .get_encrypt_values("sharding_db", "public", "t_user", "name", &[Value::from("x")])
            .unwrap();
        assert_eq!(values, vec![Value::from("enc(x)")]);
        let recorded = recorded_contexts();
        assert!(recorded.contains(&"sharding_db.public.t_user.name".to_string()));
    }

    #[test]
    fn unknown_table_defaults_to_cipher_queries() {
        let rule = user_rule();
        assert!(rule.is_query_with_cipher_column("t_unknown", "x"));
        assert!(!rule.is_query_with_cipher_column("t_order", "card"));
        assert!(!rule.is_query_with_cipher_column("t_user", "email"));
    }

    #[test]
    fn duplicate_table_is_rejected() {
        let result = EncryptRule::new([EncryptTable::new("t"), EncryptTable::new("T")]);
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
