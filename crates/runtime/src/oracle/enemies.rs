//! [`game_core::EnemyOracle`] backed by the loaded enemy templates.
use game_core::{Enemy, EnemyOracle};

pub struct EnemyOracleImpl {
    templates: Vec<Enemy>,
}

impl EnemyOracleImpl {
    pub fn new(templates: Vec<Enemy>) -> Self {
        Self { templates }
    }
}

impl EnemyOracle for EnemyOracleImpl {
    fn template(&self, id: &str) -> Option<&Enemy> {
        self.templates.iter().find(|enemy| enemy.id == id)
    }

    fn enemy_ids(&self) -> Vec<&str> {
        self.templates.iter().map(|enemy| enemy.id.as_str()).collect()
    }
}
