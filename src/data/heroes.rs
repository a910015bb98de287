//! Hero Catalogue and Stat Composition
//!
//! Read-only hero definitions plus the tier/upgrade composition used
//! at build time. Tables must be bit-identical on client and server;
//! editing any value here is a rule-set version bump.
//!
//! All fractional stats are Q16.16 raw literals (float value in the
//! comment). Speeds are units per tick at 30 Hz.

use serde::{Deserialize, Serialize};

use crate::core::fixed::{fixed_mul, fixed_to_int, int_to_fixed, Fixed, FIXED_ONE};

/// Base armor shared by every hero.
pub const HERO_BASE_ARMOR: i32 = 5;

/// Extra armor per tier above 1.
pub const HERO_ARMOR_PER_TIER: i32 = 5;

/// Multiplier per tier (index = tier - 1): 1.0 / 1.25 / 1.5
pub const TIER_MULTIPLIERS: [Fixed; 3] = [65536, 81920, 98304];

/// Stat gain per upgrade level: 0.05
pub const UPGRADE_STEP: Fixed = 3276;

/// Upgrade levels accepted per stat.
pub const MAX_UPGRADE_LEVEL: u8 = 10;

/// Static hero definition.
///
/// `mass` is carried for the collision model; `radius` doubles as the
/// projectile hit-circle base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeroDefinition {
    /// Stable catalogue id
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Base damage per hit (Q16.16 hit points)
    pub base_damage: Fixed,
    /// Attacks per second (Q16.16)
    pub attack_speed: Fixed,
    /// Attack range in field units (Q16.16)
    pub range: Fixed,
    /// Movement speed in units per tick (Q16.16)
    pub move_speed: Fixed,
    /// Base hit points
    pub hp: i32,
    /// Collision radius (Q16.16)
    pub radius: Fixed,
    /// Mass (Q16.16)
    pub mass: Fixed,
}

/// The shipped hero catalogue.
pub const HERO_CATALOGUE: &[HeroDefinition] = &[
    HeroDefinition {
        id: "scout",
        name: "Scout",
        base_damage: 393216,  // 6.0
        attack_speed: 98304,  // 1.5
        range: 98304,         // 1.5
        move_speed: 13107,    // 0.20
        hp: 180,
        radius: 26214, // 0.4
        mass: 65536,   // 1.0
    },
    HeroDefinition {
        id: "storm",
        name: "Storm",
        base_damage: 786432,  // 12.0
        attack_speed: 78643,  // 1.2
        range: 327680,        // 5.0
        move_speed: 7864,     // 0.12
        hp: 240,
        radius: 32768, // 0.5
        mass: 65536,   // 1.0
    },
    HeroDefinition {
        id: "forge",
        name: "Forge",
        base_damage: 1048576, // 16.0
        attack_speed: 52428,  // 0.8
        range: 117964,        // 1.8
        move_speed: 6553,     // 0.10
        hp: 420,
        radius: 39321, // 0.6
        mass: 98304,   // 1.5
    },
    HeroDefinition {
        id: "titan",
        name: "Titan",
        base_damage: 1310720, // 20.0
        attack_speed: 32768,  // 0.5
        range: 131072,        // 2.0
        move_speed: 5242,     // 0.08
        hp: 900,
        radius: 52428, // 0.8
        mass: 163840,  // 2.5
    },
    HeroDefinition {
        id: "vanguard",
        name: "Vanguard",
        base_damage: 917504,  // 14.0
        attack_speed: 65536,  // 1.0
        range: 144179,        // 2.2
        move_speed: 7208,     // 0.11
        hp: 520,
        radius: 39321, // 0.6
        mass: 117964,  // 1.8
    },
    HeroDefinition {
        id: "ember",
        name: "Ember",
        base_damage: 1179648, // 18.0
        attack_speed: 58982,  // 0.9
        range: 262144,        // 4.0
        move_speed: 6553,     // 0.10
        hp: 260,
        radius: 32768, // 0.5
        mass: 65536,   // 1.0
    },
    HeroDefinition {
        id: "warden",
        name: "Warden",
        base_damage: 655360,  // 10.0
        attack_speed: 45875,  // 0.7
        range: 163840,        // 2.5
        move_speed: 5898,     // 0.09
        hp: 700,
        radius: 45875, // 0.7
        mass: 131072,  // 2.0
    },
];

/// Look up a hero definition by catalogue id.
///
/// Total over the set of valid ids; `None` for anything else, which
/// the build validator reports as invalid input.
pub fn get_hero_by_id(id: &str) -> Option<&'static HeroDefinition> {
    HERO_CATALOGUE.iter().find(|def| def.id == id)
}

/// Per-stat upgrade levels, in catalogue order:
/// damage, hp, attack speed, move speed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeVector {
    /// Damage upgrade level
    pub damage: u8,
    /// HP upgrade level
    pub hp: u8,
    /// Attack-speed upgrade level
    pub attack_speed: u8,
    /// Move-speed upgrade level
    pub move_speed: u8,
}

impl UpgradeVector {
    /// True when every level is within the accepted range.
    pub fn is_valid(&self) -> bool {
        self.damage <= MAX_UPGRADE_LEVEL
            && self.hp <= MAX_UPGRADE_LEVEL
            && self.attack_speed <= MAX_UPGRADE_LEVEL
            && self.move_speed <= MAX_UPGRADE_LEVEL
    }
}

/// Composed stats for one hero instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    /// Damage per hit (Q16.16)
    pub damage: Fixed,
    /// Attacks per second (Q16.16)
    pub attack_speed: Fixed,
    /// Attack range (Q16.16)
    pub range: Fixed,
    /// Movement speed per tick (Q16.16)
    pub move_speed: Fixed,
    /// Hit points
    pub hp: i32,
}

/// `base * tierMultiplier * (1 + upgradeLevel * UPGRADE_STEP)`,
/// truncated toward zero at each multiplication.
#[inline]
fn compose_stat(base: Fixed, tier_mult: Fixed, upgrade_level: u8) -> Fixed {
    let upgraded = FIXED_ONE + UPGRADE_STEP * upgrade_level as Fixed;
    fixed_mul(fixed_mul(base, tier_mult), upgraded)
}

/// Compose effective stats for a hero at a tier and commander level.
///
/// The commander `level` is part of the lookup signature for callers
/// but does not enter the composition itself; commander scaling is
/// additive and applied at fortress creation from the progression
/// tables.
pub fn calculate_hero_stats(def: &HeroDefinition, tier: u8, level: u8) -> BaseStats {
    calculate_hero_stats_upgraded(def, tier, level, UpgradeVector::default())
}

/// Compose effective stats including a stat upgrade vector.
pub fn calculate_hero_stats_upgraded(
    def: &HeroDefinition,
    tier: u8,
    _level: u8,
    upgrades: UpgradeVector,
) -> BaseStats {
    let tier_mult = TIER_MULTIPLIERS[(tier as usize).saturating_sub(1).min(2)];

    let hp_fixed = compose_stat(int_to_fixed(def.hp), tier_mult, upgrades.hp);

    BaseStats {
        damage: compose_stat(def.base_damage, tier_mult, upgrades.damage),
        attack_speed: compose_stat(def.attack_speed, tier_mult, upgrades.attack_speed),
        // No upgrade slot for range; tier scaling still applies
        range: fixed_mul(def.range, tier_mult),
        move_speed: compose_stat(def.move_speed, tier_mult, upgrades.move_speed),
        hp: fixed_to_int(hp_fixed),
    }
}

/// Hero armor: `(HERO_BASE_ARMOR + (tier-1) * HERO_ARMOR_PER_TIER) * mult`,
/// truncated.
pub fn hero_armor(tier: u8, armor_mult: Fixed) -> i32 {
    let base = HERO_BASE_ARMOR + (tier as i32 - 1) * HERO_ARMOR_PER_TIER;
    fixed_to_int(fixed_mul(int_to_fixed(base), armor_mult))
}

// =============================================================================
// TESTS
// =============================================================================
