//! Build Descriptors and World Assembly
//!
//! A `BuildSpec` is everything a player brings into the arena: owner
//! identity, fortress class, commander level, roster, per-hero
//! configuration, and account-level bonuses. Validation happens here,
//! up-front; once a side is assembled nothing about it can fail.

use serde::{Deserialize, Serialize};

use crate::arena::config::{ArenaConfig, FORTRESS_Y};
use crate::arena::state::{Fortress, HeroInstance, HeroState, ModifierSet, Side, SideId, SideStats};
use crate::core::fixed::{fixed_mul, fixed_scale_int, int_to_fixed, Fixed, FIXED_ONE};
use crate::core::vec2::FixedVec2;
use crate::data::{
    calculate_hero_stats_upgraded, calculate_total_damage_bonus, calculate_total_hp_bonus,
    fortress_armor, fortress_stat_multiplier, get_hero_by_id, get_max_hero_slots, hero_armor,
    heroes::MAX_UPGRADE_LEVEL, FortressClass, UpgradeVector,
};
use crate::error::SimError;

/// Spawn lane Y offsets from the fortress lane, by roster index.
const SPAWN_LANE_OFFSETS: [Fixed; 8] = [
    0,       //  0.0
    98304,   //  1.5
    -98304,  // -1.5
    196608,  //  3.0
    -196608, // -3.0
    294912,  //  4.5
    -294912, // -4.5
    393216,  //  6.0
];

/// Hero spawn X offset from the own fortress, toward field centre: 4.0
const SPAWN_X_OFFSET: Fixed = 262144;

/// Sentinel far enough in the past that the first attack is never
/// cooldown-gated.
const NEVER_ATTACKED: i32 = -1_000_000;

/// Per-hero configuration inside a build.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroConfig {
    /// Tier (1-3)
    pub tier: u8,
    /// Stat upgrade levels
    pub upgrades: UpgradeVector,
    /// Equipped artifact id, if any
    pub artifact_id: Option<u32>,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            tier: 1,
            upgrades: UpgradeVector::default(),
            artifact_id: None,
        }
    }
}

/// A player's battle loadout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BuildSpec {
    /// Account id
    pub owner_id: u64,
    /// Display name
    pub owner_name: String,
    /// Fortress class catalogue name; resolved through
    /// `FortressClass::from_name` during validation
    pub fortress_class: String,
    /// Commander level (1-100)
    pub commander_level: u8,
    /// Roster, in slot order; truncated to the commander's slot count
    pub hero_ids: Vec<String>,
    /// Optional per-hero configuration, parallel to `hero_ids`;
    /// missing entries default to tier 1, no upgrades
    pub hero_configs: Vec<HeroConfig>,
    /// Account-level additive damage fraction (Q16.16)
    pub damage_bonus: Fixed,
    /// Account-level additive HP fraction (Q16.16)
    pub hp_bonus: Fixed,
}

impl BuildSpec {
    /// Plain build with default hero configs and no bonuses.
    pub fn new(
        owner_id: u64,
        owner_name: &str,
        fortress_class: FortressClass,
        commander_level: u8,
        hero_ids: &[&str],
    ) -> Self {
        Self {
            owner_id,
            owner_name: owner_name.to_string(),
            fortress_class: fortress_class.name().to_string(),
            commander_level,
            hero_ids: hero_ids.iter().map(|id| id.to_string()).collect(),
            hero_configs: Vec::new(),
            damage_bonus: 0,
            hp_bonus: 0,
        }
    }

    /// Config for the hero at `index`, falling back to the default.
    fn hero_config(&self, index: usize) -> HeroConfig {
        self.hero_configs.get(index).cloned().unwrap_or_default()
    }
}

/// Reject unusable builds before any state exists.
pub fn validate_build(spec: &BuildSpec) -> Result<(), SimError> {
    if !(1..=100).contains(&spec.commander_level) {
        return Err(SimError::invalid(format!(
            "commander level {} outside [1, 100]",
            spec.commander_level
        )));
    }
    if FortressClass::from_name(&spec.fortress_class).is_none() {
        return Err(SimError::invalid(format!(
            "unknown fortress class '{}'",
            spec.fortress_class
        )));
    }
    if spec.hero_ids.is_empty() {
        return Err(SimError::invalid("hero list is empty"));
    }
    for id in &spec.hero_ids {
        if get_hero_by_id(id).is_none() {
            return Err(SimError::invalid(format!("unknown hero id '{id}'")));
        }
    }
    for (index, config) in spec.hero_configs.iter().enumerate() {
        if !(1..=3).contains(&config.tier) {
            return Err(SimError::invalid(format!(
                "hero {} tier {} outside {{1, 2, 3}}",
                index, config.tier
            )));
        }
        if !config.upgrades.is_valid() {
            return Err(SimError::invalid(format!(
                "hero {} upgrade level above {}",
                index, MAX_UPGRADE_LEVEL
            )));
        }
    }
    Ok(())
}

/// Assemble one side of the arena from a validated build.
pub fn build_side(spec: &BuildSpec, side_id: SideId, config: &ArenaConfig) -> Side {
    let level = spec.commander_level;
    let is_left = side_id == SideId::Left;
    let hp_scale = FIXED_ONE + spec.hp_bonus;
    let class = FortressClass::from_name(&spec.fortress_class).expect("validated fortress class");

    // Class contributions plus account bonuses, composed once.
    let class_mods = class.modifiers();
    let modifiers = ModifierSet {
        crit_chance: class_mods.crit_chance,
        crit_damage_bonus: class_mods.crit_damage_bonus,
        damage_bonus: class_mods.damage_bonus + spec.damage_bonus,
        attack_speed_bonus: class_mods.attack_speed_bonus,
    };

    // Fortress: multiplier table first, additive commander bonuses
    // second, account HP bonus last.
    let stat_mult = fortress_stat_multiplier(level);
    let hp_base =
        fixed_scale_int(config.fortress_base_hp, stat_mult) + calculate_total_hp_bonus(level);
    let max_hp = fixed_scale_int(hp_base, hp_scale);
    let base_damage = fixed_mul(int_to_fixed(config.fortress_base_damage), stat_mult)
        + int_to_fixed(calculate_total_damage_bonus(level));

    let fortress_position = FixedVec2::new(config.fortress_x(is_left), FORTRESS_Y);
    let fortress = Fortress {
        position: fortress_position,
        hp: max_hp,
        max_hp,
        base_damage,
        armor: fortress_armor(level, FIXED_ONE),
        class,
        last_attack_tick: NEVER_ATTACKED,
    };

    // Roster truncation per commander slots.
    let slots = spec.hero_ids.len().min(get_max_hero_slots(level));
    let spawn_x = if is_left {
        fortress_position.x + SPAWN_X_OFFSET
    } else {
        fortress_position.x - SPAWN_X_OFFSET
    };

    let mut heroes = Vec::with_capacity(slots);
    for (index, hero_id) in spec.hero_ids.iter().take(slots).enumerate() {
        let def = get_hero_by_id(hero_id).expect("validated hero id");
        let hero_config = spec.hero_config(index);
        let stats = calculate_hero_stats_upgraded(def, hero_config.tier, level, hero_config.upgrades);
        let max_hp = fixed_scale_int(stats.hp, hp_scale);

        let spawn_y = FORTRESS_Y + SPAWN_LANE_OFFSETS[index % SPAWN_LANE_OFFSETS.len()];
        heroes.push(HeroInstance {
            hero_id: hero_id.clone(),
            tier: hero_config.tier,
            level,
            current_hp: max_hp,
            max_hp,
            position: FixedVec2::new(spawn_x, spawn_y),
            velocity: FixedVec2::ZERO,
            radius: def.radius,
            mass: def.mass,
            state: HeroState::Idle,
            last_attack_tick: NEVER_ATTACKED,
            stats,
            damage_mult: FIXED_ONE,
            attack_speed_mult: FIXED_ONE,
            range_mult: FIXED_ONE,
            crit_chance_mult: FIXED_ONE,
            armor_mult: FIXED_ONE,
            armor: hero_armor(hero_config.tier, FIXED_ONE),
            artifact_id: hero_config.artifact_id,
        });
    }

    Side {
        id: side_id,
        owner_id: spec.owner_id,
        owner_name: spec.owner_name.clone(),
        fortress,
        heroes,
        projectiles: Vec::new(),
        modifiers,
        stats: SideStats::default(),
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixed::{to_fixed, FORTRESS_EXCLUSION_RADIUS_SQ};

    fn spec(level: u8, heroes: &[&str]) -> BuildSpec {
        BuildSpec::new(1, "tester", FortressClass::Fire, level, heroes)
    }

    #[test]
    fn test_validation_rejects_bad_builds() {
        assert!(validate_build(&spec(0, &["storm"])).is_err());
        assert!(validate_build(&spec(101, &["storm"])).is_err());
        assert!(validate_build(&spec(30, &[])).is_err());
        assert!(validate_build(&spec(30, &["nope"])).is_err());

        // An off-catalogue class name arriving over the wire
        let mut bad_class = spec(30, &["storm"]);
        bad_class.fortress_class = "shadow".to_string();
        let err = validate_build(&bad_class).unwrap_err();
        assert!(err.to_string().contains("unknown fortress class"));

        let mut bad_tier = spec(30, &["storm"]);
        bad_tier.hero_configs = vec![HeroConfig {
            tier: 4,
            ..Default::default()
        }];
        assert!(validate_build(&bad_tier).is_err());

        assert!(validate_build(&spec(30, &["storm", "forge"])).is_ok());
    }

    #[test]
    fn test_roster_truncated_to_slots() {
        // Level 1 commanders get 2 slots
        let many = spec(1, &["storm", "forge", "titan", "scout"]);
        let side = build_side(&many, SideId::Left, &ArenaConfig::default());
        assert_eq!(side.heroes.len(), 2);
    }

    #[test]
    fn test_spawns_outside_exclusion_and_in_field() {
        let config = ArenaConfig::default();
        let build = spec(100, &["storm", "forge", "titan", "scout", "vanguard", "ember", "warden", "storm"]);
        for side_id in [SideId::Left, SideId::Right] {
            let side = build_side(&build, side_id, &config);
            assert_eq!(side.heroes.len(), 8);
            for hero in &side.heroes {
                assert!(hero.position.is_in_field(config.field_width, config.field_height));
                let own = hero.position.distance_squared(side.fortress.position);
                assert!(own >= FORTRESS_EXCLUSION_RADIUS_SQ);
            }
        }
    }

    #[test]
    fn test_hp_bonus_applies_to_fortress_and_heroes() {
        let config = ArenaConfig::default();
        let plain = build_side(&spec(50, &["titan"]), SideId::Left, &config);

        let mut boosted_spec = spec(50, &["titan"]);
        boosted_spec.hp_bonus = to_fixed(10.0);
        let boosted = build_side(&boosted_spec, SideId::Left, &config);

        assert_eq!(boosted.fortress.max_hp, plain.fortress.max_hp * 11);
        assert_eq!(boosted.heroes[0].max_hp, plain.heroes[0].max_hp * 11);
    }

    #[test]
    fn test_class_and_build_bonuses_compose() {
        let config = ArenaConfig::default();
        let mut s = spec(30, &["storm"]);
        s.damage_bonus = to_fixed(5.0);
        let side = build_side(&s, SideId::Left, &config);

        let class = FortressClass::Fire.modifiers();
        assert_eq!(side.modifiers.damage_bonus, class.damage_bonus + to_fixed(5.0));
        assert_eq!(side.modifiers.crit_chance, class.crit_chance);
    }

    #[test]
    fn test_sides_mirror() {
        let config = ArenaConfig::default();
        let left = build_side(&spec(30, &["storm"]), SideId::Left, &config);
        let right = build_side(&spec(30, &["storm"]), SideId::Right, &config);

        let center = config.field_width / 2;
        assert_eq!(center - left.fortress.position.x, right.fortress.position.x - center);
        assert_eq!(center - left.heroes[0].position.x, right.heroes[0].position.x - center);
        assert_eq!(left.heroes[0].position.y, right.heroes[0].position.y);
    }
}
