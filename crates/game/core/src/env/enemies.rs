use std::collections::BTreeMap;

use crate::state::Enemy;

/// Read-only access to enemy templates.
///
/// Templates are cloned into the session when a battle starts, so the engine
/// never mutates catalog data.
pub trait EnemyOracle: Send + Sync {
    fn template(&self, id: &str) -> Option<&Enemy>;

    /// Template ids in catalog order.
    fn enemy_ids(&self) -> Vec<&str>;
}

impl EnemyOracle for BTreeMap<String, Enemy> {
    fn template(&self, id: &str) -> Option<&Enemy> {
        self.get(id)
    }

    fn enemy_ids(&self) -> Vec<&str> {
        self.keys().map(String::as_str).collect()
    }
}
