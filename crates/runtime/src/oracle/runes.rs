//! [`game_core::RuneOracle`] backed by the loaded rune catalog.
use std::collections::HashMap;

use game_core::{Rune, RuneOracle};

/// RuneOracle implementation that keeps catalog order for unlock offers.
pub struct RuneOracleImpl {
    runes: Vec<Rune>,
    index: HashMap<String, usize>,
}

impl RuneOracleImpl {
    pub fn new(runes: Vec<Rune>) -> Self {
        let index = runes
            .iter()
            .enumerate()
            .map(|(position, rune)| (rune.id.clone(), position))
            .collect();
        Self { runes, index }
    }

    pub fn len(&self) -> usize {
        self.runes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runes.is_empty()
    }
}

impl RuneOracle for RuneOracleImpl {
    fn rune(&self, id: &str) -> Option<&Rune> {
        self.index.get(id).map(|&position| &self.runes[position])
    }

    fn runes(&self) -> Vec<&Rune> {
        self.runes.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::RuneTier;

    #[test]
    fn test_catalog_order_is_kept() {
        let oracle = RuneOracleImpl::new(vec![
            Rune::modifier("zeta", "z").with_tier(RuneTier::Basic),
            Rune::core("alpha", "a", 1, 0, 1, 1.0).with_tier(RuneTier::Basic),
        ]);
        let ids: Vec<&str> = oracle.unlock_pool(1).iter().map(|rune| rune.id.as_str()).collect();
        assert_eq!(ids, ["zeta", "alpha"]);
        assert_eq!(oracle.rune("alpha").map(|rune| rune.base_damage), Some(1));
        assert!(oracle.rune("missing").is_none());
    }
}
