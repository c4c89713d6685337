/// Game configuration constants and tunable parameters.
///
/// Every number the battle rules depend on lives here so hosts can rebalance
/// through a config file without touching the engine.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// ATB gain per second for a speed-10 actor, before the `/6` time scaling.
    pub atb_base_rate: f64,
    /// Progress value at which an actor is ready to act.
    pub atb_max: f64,

    /// Damage threshold that interrupts a channeling player, set at battle start.
    pub battle_focus_value: u32,
    /// Focus value written back when the player retreats.
    pub retreat_focus_value: u32,
    /// Seconds the player stays stunned after an interrupt.
    pub stun_duration: f64,
    /// Multiplier applied to the enemy's flat damage when a channeled skill completes.
    pub channel_damage_multiplier: f64,

    /// Maximum number of entries kept in the battle log.
    pub log_capacity: usize,
    /// Delay before the host returns to camp once a battle has ended.
    pub camp_return_delay_ms: u64,

    pub level_up_hp: u32,
    pub level_up_mp: u32,
    pub level_up_speed: u32,
    /// A new empty spell slot is granted on every level divisible by this value.
    pub spell_slot_interval: u32,
    /// Number of runes offered after a level-up.
    pub rune_choice_count: usize,

    /// Shop purchase price as a percentage of material value.
    pub shop_buy_percent: u32,
    /// Shop sale proceeds as a percentage of material value.
    pub shop_sell_percent: u32,
}

impl GameConfig {
    pub const DEFAULT_ATB_BASE_RATE: f64 = 200.0;
    pub const DEFAULT_ATB_MAX: f64 = 100.0;
    pub const DEFAULT_BATTLE_FOCUS_VALUE: u32 = 25;
    pub const DEFAULT_RETREAT_FOCUS_VALUE: u32 = 20;
    pub const DEFAULT_STUN_DURATION: f64 = 1.0;
    pub const DEFAULT_CHANNEL_DAMAGE_MULTIPLIER: f64 = 1.5;
    pub const DEFAULT_LOG_CAPACITY: usize = 50;
    pub const DEFAULT_CAMP_RETURN_DELAY_MS: u64 = 2_000;

    pub fn new() -> Self {
        Self {
            atb_base_rate: Self::DEFAULT_ATB_BASE_RATE,
            atb_max: Self::DEFAULT_ATB_MAX,
            battle_focus_value: Self::DEFAULT_BATTLE_FOCUS_VALUE,
            retreat_focus_value: Self::DEFAULT_RETREAT_FOCUS_VALUE,
            stun_duration: Self::DEFAULT_STUN_DURATION,
            channel_damage_multiplier: Self::DEFAULT_CHANNEL_DAMAGE_MULTIPLIER,
            log_capacity: Self::DEFAULT_LOG_CAPACITY,
            camp_return_delay_ms: Self::DEFAULT_CAMP_RETURN_DELAY_MS,
            level_up_hp: 20,
            level_up_mp: 10,
            level_up_speed: 1,
            spell_slot_interval: 3,
            rune_choice_count: 3,
            shop_buy_percent: 150,
            shop_sell_percent: 80,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
