//! Static data tables: hero catalogue, fortress classes, progression.
//!
//! Consumed read-only by the simulation. Client and server must load
//! bit-identical tables; any edit is a rule-set version bump so stale
//! clients fail hash verification instead of silently diverging.

pub mod fortress;
pub mod heroes;

pub use fortress::{
    calculate_total_damage_bonus, calculate_total_hp_bonus, fortress_armor,
    fortress_stat_multiplier, get_max_hero_slots, ClassModifiers, FortressClass, ProjectileKind,
};
pub use heroes::{
    calculate_hero_stats, calculate_hero_stats_upgraded, get_hero_by_id, hero_armor, BaseStats,
    HeroDefinition, UpgradeVector,
};
