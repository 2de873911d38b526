use crate::*;
use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex},
};

static RECORDED_CONTEXTS: Mutex<Vec<String>> = Mutex::new(Vec::new());

/// Wraps plain values as `prefix(value)` and records where each belongs.
#[derive(Debug)]
pub struct FakeAlgorithm {
    prefix: String,
}

impl FakeAlgorithm {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
        }
    }
}

impl EncryptAlgorithm for FakeAlgorithm {
    fn algorithm_type(&self) -> &str {
        "FAKE"
    }

    fn encrypt(&self, plain: &Value, context: &EncryptContext<'_>) -> Result<Value> {
        RECORDED_CONTEXTS
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(format!(
                "{}.{}.{}.{}",
                context.database, context.schema, context.table, context.column
            ));
        if plain.is_null() {
            return Ok(Value::Null);
        }
        Ok(Value::Text(format!("{}({plain})", self.prefix)))
    }
}

/// `database.schema.table.column` of every value encrypted so far.
pub fn recorded_contexts() -> Vec<String> {
    RECORDED_CONTEXTS
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clone()
}

/// Rule shared by most tests.
///
/// `t_user` queries through cipher columns:
/// - `pwd`: cipher, assisted, like and plain
/// - `name`: cipher only
/// - `email`, `mobile`: cipher, assisted and plain, querying plain
/// - `token`: like `email` but encrypted by another algorithm
///
/// `t_order` queries through plain columns:
/// - `card`: cipher and plain
/// - `memo`: cipher and like
/// - `addr`: cipher and assisted
pub fn user_rule() -> EncryptRule {
    let encryptors: BTreeMap<String, Arc<dyn EncryptAlgorithm>> = ["enc", "enc2", "assisted", "like"]
        .into_iter()
        .map(|name| (name.to_string(), Arc::new(FakeAlgorithm::new(name)) as Arc<dyn EncryptAlgorithm>))
        .collect();
    let item = |name: &str, encryptor: &str| EncryptColumnItem::new(name, encryptor, encryptors[encryptor].clone());
    let plain_preferred = |name: &str, cipher_encryptor: &str| {
        EncryptColumn::new(name, item(&format!("{name}_cipher"), cipher_encryptor))
            .with_assisted_query(item(&format!("{name}_assisted"), "assisted"))
            .with_plain(format!("{name}_plain"))
            .with_query_with_cipher_column(false)
    };

    let user = EncryptTable::new("t_user")
        .with_column(
            EncryptColumn::new("pwd", item("pwd_cipher", "enc"))
                .with_assisted_query(item("pwd_assisted", "assisted"))
                .with_like_query(item("pwd_like", "like"))
                .with_plain("pwd_plain"),
        )
        .and_then(|table| table.with_column(EncryptColumn::new("name", item("name_cipher", "enc"))))
        .and_then(|table| table.with_column(plain_preferred("email", "enc")))
        .and_then(|table| table.with_column(plain_preferred("mobile", "enc")))
        .and_then(|table| table.with_column(plain_preferred("token", "enc2")))
        .unwrap();
    let order = EncryptTable::new("t_order")
        .with_query_with_cipher_column(false)
        .with_column(EncryptColumn::new("card", item("card_cipher", "enc")).with_plain("card_plain"))
        .and_then(|table| {
            table.with_column(EncryptColumn::new("memo", item("memo_cipher", "enc")).with_like_query(item("memo_like", "like")))
        })
        .and_then(|table| {
            table.with_column(
                EncryptColumn::new("addr", item("addr_cipher", "enc")).with_assisted_query(item("addr_assisted", "assisted")),
            )
        })
        .unwrap();
    EncryptRule::new([user, order])
        .unwrap()
        .with_encryptors(encryptors.clone())
}
