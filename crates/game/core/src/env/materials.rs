//! Material definitions used by loot drops and the shop.

use std::collections::BTreeMap;

/// Tradeable crafting material.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Material {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub icon: String,
    /// Base value in gold; shop prices are derived from it.
    pub value: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
}

impl Material {
    pub fn new(id: impl Into<String>, name: impl Into<String>, value: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: String::new(),
            value,
            description: String::new(),
        }
    }
}

pub trait MaterialOracle: Send + Sync {
    fn material(&self, id: &str) -> Option<&Material>;

    /// Every material in catalog order.
    fn materials(&self) -> Vec<&Material>;
}

impl MaterialOracle for BTreeMap<String, Material> {
    fn material(&self, id: &str) -> Option<&Material> {
        self.get(id)
    }

    fn materials(&self) -> Vec<&Material> {
        self.values().collect()
    }
}
