use crate::*;
use std::{
    path::Path,
    sync::{Arc, PoisonError, RwLock},
};

/// Holds the current [`EncryptRule`].
///
/// Readers clone the `Arc` and keep using it for a whole statement, so a
/// concurrent [`RuleSnapshot::replace`] never changes a rule that is in use.
#[derive(Debug, Default)]
pub struct RuleSnapshot {
    current: RwLock<Arc<EncryptRule>>,
}

impl RuleSnapshot {
    pub fn new(rule: EncryptRule) -> Self {
        Self {
            current: RwLock::new(Arc::new(rule)),
        }
    }

    pub fn load(&self) -> Arc<EncryptRule> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Publishes `rule` and returns the one it replaced.
    pub fn replace(&self, rule: EncryptRule) -> Arc<EncryptRule> {
        let next = Arc::new(rule);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, next)
    }

    /// Builds a rule from `path` and publishes it. The current rule stays in
    /// place when loading fails.
    pub fn reload_from_yaml(&self, path: impl AsRef<Path>) -> Result<Arc<EncryptRule>> {
        let rule = EncryptRule::from_yaml_file(path)?;
        self.replace(rule);
        Ok(self.load())
    }
}
