//! [`game_core::MaterialOracle`] backed by the loaded material catalog.
use game_core::{Material, MaterialOracle};

pub struct MaterialOracleImpl {
    materials: Vec<Material>,
}

impl MaterialOracleImpl {
    pub fn new(materials: Vec<Material>) -> Self {
        Self { materials }
    }
}

impl MaterialOracle for MaterialOracleImpl {
    fn material(&self, id: &str) -> Option<&Material> {
        self.materials.iter().find(|material| material.id == id)
    }

    fn materials(&self) -> Vec<&Material> {
        self.materials.iter().collect()
    }
}
