//! YAML form of the encrypt rule.
//!
//! ```yaml
//! encryptors:
//!   aes_encryptor:
//!     type: AES
//!     props:
//!       aes-key-value: 123456abc
//! tables:
//!   t_user:
//!     queryWithCipherColumn: true
//!     columns:
//!       pwd:
//!         cipher: { name: pwd_cipher, encryptorName: aes_encryptor }
//!         plain: { name: pwd_plain }
//! ```
use crate::*;
use serde::Deserialize;
use std::{collections::BTreeMap, path::Path, sync::Arc};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EncryptRuleConfiguration {
    #[serde(default)]
    pub encryptors: BTreeMap<String, AlgorithmConfiguration>,
    #[serde(default)]
    pub tables: BTreeMap<String, EncryptTableRuleConfiguration>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AlgorithmConfiguration {
    #[serde(rename = "type")]
    pub algorithm_type: String,
    #[serde(default)]
    pub props: BTreeMap<String, serde_yaml::Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EncryptTableRuleConfiguration {
    #[serde(default = "default_query_with_cipher_column")]
    pub query_with_cipher_column: bool,
    #[serde(default)]
    pub columns: BTreeMap<String, EncryptColumnRuleConfiguration>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EncryptColumnRuleConfiguration {
    pub cipher: EncryptColumnItemRuleConfiguration,
    pub assisted_query: Option<EncryptColumnItemRuleConfiguration>,
    pub like_query: Option<EncryptColumnItemRuleConfiguration>,
    pub plain: Option<PlainColumnRuleConfiguration>,
    pub query_with_cipher_column: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EncryptColumnItemRuleConfiguration {
    pub name: String,
    pub encryptor_name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlainColumnRuleConfiguration {
    pub name: String,
}

fn default_query_with_cipher_column() -> bool {
    true
}

impl EncryptRuleConfiguration {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Reading encrypt rule from {}", path.display());
        Self::from_yaml_str(&std::fs::read_to_string(path)?)
    }
}

impl TryFrom<EncryptRuleConfiguration> for EncryptRule {
    type Error = Error;

    fn try_from(config: EncryptRuleConfiguration) -> Result<Self> {
        let mut encryptors = BTreeMap::new();
        for (name, algorithm) in &config.encryptors {
            let props = props_to_text(name, &algorithm.props)?;
            encryptors.insert(name.clone(), AlgorithmFactory::create(&algorithm.algorithm_type, &props)?);
        }

        let mut tables = Vec::with_capacity(config.tables.len());
        for (table_name, table_config) in config.tables {
            let mut table =
                EncryptTable::new(&table_name).with_query_with_cipher_column(table_config.query_with_cipher_column);
            for (column_name, column_config) in table_config.columns {
                table.add_column(build_column(&encryptors, column_name, column_config)?)?;
            }
            tables.push(table);
        }
        let rule = EncryptRule::new(tables)?.with_encryptors(encryptors);
        info!(
            "Loaded encrypt rule with {} tables and {} encryptors",
            rule.tables().count(),
            rule.encryptors().len()
        );
        Ok(rule)
    }
}

impl EncryptRule {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        EncryptRuleConfiguration::from_yaml_str(yaml)?.try_into()
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        EncryptRuleConfiguration::from_yaml_file(path)?.try_into()
    }
}

fn build_column(
    encryptors: &BTreeMap<String, Arc<dyn EncryptAlgorithm>>,
    name: String,
    config: EncryptColumnRuleConfiguration,
) -> Result<EncryptColumn> {
    let item = |item: EncryptColumnItemRuleConfiguration| -> Result<EncryptColumnItem> {
        let encryptor = encryptors.get(&item.encryptor_name).cloned().ok_or_else(|| {
            Error::Config(format!(
                "Encryptor `{}` of column `{name}` is not configured",
                item.encryptor_name
            ))
        })?;
        Ok(EncryptColumnItem::new(item.name, item.encryptor_name, encryptor))
    };

    let mut column = EncryptColumn::new(&name, item(config.cipher)?);
    if let Some(assisted_query) = config.assisted_query {
        column = column.with_assisted_query(item(assisted_query)?);
    }
    if let Some(like_query) = config.like_query {
        column = column.with_like_query(item(like_query)?);
    }
    if let Some(plain) = config.plain {
        column = column.with_plain(plain.name);
    }
    if let Some(value) = config.query_with_cipher_column {
        column = column.with_query_with_cipher_column(value);
    }
    Ok(column)
}

fn props_to_text(algorithm: &str, props: &BTreeMap<String, serde_yaml::Value>) -> Result<Props> {
    props
        .iter()
        .map(|(key, value)| {
            let text = match value {
                serde_yaml::Value::String(text) => text.clone(),
                serde_yaml::Value::Number(number) => number.to_string(),
                serde_yaml::Value::Bool(flag) => flag.to_string(),
                _ => {
                    return Err(Error::Config(format!(
                        "Property `{key}` of encryptor `{algorithm}` must be a scalar"
                    )));
                }
            };
            Ok((key.clone(), text))
        })
        .collect()
}
