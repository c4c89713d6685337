//! Camp rest and the material shop.

use crate::engine::{GameEngine, ShopError};
use crate::event::{GameEvent, Trade};
use crate::state::LogKind;

/// Gold charged for `quantity` units, rounded up.
pub fn buy_price(value: u32, quantity: u32, percent: u32) -> u32 {
    let total = u64::from(value) * u64::from(quantity) * u64::from(percent);
    u32::try_from(total.div_ceil(100)).unwrap_or(u32::MAX)
}

/// Gold paid out for `quantity` units, rounded down.
pub fn sell_price(value: u32, quantity: u32, percent: u32) -> u32 {
    let total = u64::from(value) * u64::from(quantity) * u64::from(percent);
    u32::try_from(total / 100).unwrap_or(u32::MAX)
}

impl GameEngine<'_> {
    /// Restores hp and mp to their maximums.
    pub fn rest(&mut self) {
        self.session.player.restore_full();
        tracing::debug!("player rested");
        self.log(LogKind::System, "Rested and fully restored HP and MP!");
    }

    /// Buys `quantity` units of `material_id`. Returns the gold spent.
    pub fn buy_material(&mut self, material_id: &str, quantity: u32) -> Result<u32, ShopError> {
        let material = self
            .env
            .materials()
            .material(material_id)
            .ok_or_else(|| ShopError::UnknownMaterial(material_id.to_string()))?;
        let cost = buy_price(material.value, quantity, self.config().shop_buy_percent);
        let gold = self.session.player.gold;
        if gold < cost {
            self.log(LogKind::System, "Not enough gold to buy that!");
            return Err(ShopError::InsufficientGold { cost, gold });
        }

        self.session.player.gold = gold - cost;
        self.session.player.add_material(material_id, quantity);
        tracing::info!(material = material_id, quantity, cost, "material bought");
        self.log(
            LogKind::System,
            format!("Spent {cost} gold on {quantity} x {}!", material.name),
        );
        self.emit_trade(Trade::Buy, material_id, quantity, cost);
        Ok(cost)
    }

    /// Sells `quantity` units of `material_id`. Returns the gold received.
    pub fn sell_material(&mut self, material_id: &str, quantity: u32) -> Result<u32, ShopError> {
        let material = self
            .env
            .materials()
            .material(material_id)
            .ok_or_else(|| ShopError::UnknownMaterial(material_id.to_string()))?;
        let held = self.session.player.material_count(material_id);
        if held < quantity {
            self.log(LogKind::System, "Not enough materials to sell!");
            return Err(ShopError::InsufficientMaterials {
                material_id: material_id.to_string(),
                wanted: quantity,
                held,
            });
        }

        let proceeds = sell_price(material.value, quantity, self.config().shop_sell_percent);
        self.session.player.remove_material(material_id, quantity);
        self.session.player.gold = self.session.player.gold.saturating_add(proceeds);
        tracing::info!(material = material_id, quantity, proceeds, "material sold");
        self.log(
            LogKind::System,
            format!("Sold {quantity} x {} for {proceeds} gold!", material.name),
        );
        self.emit_trade(Trade::Sell, material_id, quantity, proceeds);
        Ok(proceeds)
    }

    fn emit_trade(&mut self, trade: Trade, material_id: &str, quantity: u32, gold: u32) {
        let player = &self.session.player;
        let resources = GameEvent::ResourceChange {
            gold: player.gold,
            experience: player.experience,
            level: player.level,
        };
        self.session.emit(resources);
        self.session.emit(GameEvent::ShopUpdate {
            trade,
            material_id: material_id.to_string(),
            quantity,
            gold,
        });
    }
}
