//! Arena World Model
//!
//! All mutable battle state: the two sides, their fortresses, hero
//! instances, in-flight projectiles, and the bookkeeping the chain
//! hash covers. Heroes and fortresses are created once and never
//! reallocated; dead heroes keep their array slot so every index in
//! a target reference stays valid for the whole battle.

use serde::{Deserialize, Serialize};

use crate::core::fixed::Fixed;
use crate::core::hash::Fnv1a32;
use crate::core::vec2::FixedVec2;
use crate::data::{BaseStats, FortressClass, ProjectileKind};

// =============================================================================
// SIDE / WINNER TAGS
// =============================================================================

/// Which side of the arena an entity belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SideId {
    /// Challenger side (west fortress)
    Left = 0,
    /// Defender side (east fortress)
    Right = 1,
}

impl SideId {
    /// The opposing side.
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Battle outcome.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum Winner {
    /// Left side won
    Left = 0,
    /// Right side won
    Right = 1,
    /// Nobody won (draw, or battle still running)
    #[default]
    None = 2,
}

/// Why the battle ended.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum WinReason {
    /// A fortress reached zero HP
    FortressDestroyed = 0,
    /// maxTicks elapsed; higher HP fraction won
    Timeout = 1,
    /// Both fortresses died in the same tick, or exact HP tie at timeout
    Draw = 2,
    /// Battle still running
    #[default]
    None = 3,
}

// =============================================================================
// MODIFIERS & STATS
// =============================================================================

/// Additive side-wide combat modifiers (Q16.16 fractions).
///
/// Seeded from the fortress class descriptor plus build-level
/// bonuses at setup; never mutated during a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifierSet {
    /// Chance for an attack to crit
    pub crit_chance: Fixed,
    /// Extra damage fraction on crit
    pub crit_damage_bonus: Fixed,
    /// Flat damage fraction
    pub damage_bonus: Fixed,
    /// Attack-speed fraction
    pub attack_speed_bonus: Fixed,
}

/// Cumulative per-side battle statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideStats {
    /// Damage this side delivered (post-mitigation)
    pub damage_dealt: i32,
    /// Damage this side absorbed (post-mitigation)
    pub damage_received: i32,
    /// Enemy heroes this side killed
    pub heroes_killed: i32,
    /// Own heroes lost
    pub heroes_lost: i32,
}

// =============================================================================
// FORTRESS
// =============================================================================

/// A side's stationary fortress.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fortress {
    /// Fixed position (Y = 7, symmetric X)
    pub position: FixedVec2,
    /// Current hit points
    pub hp: i32,
    /// Hit points at creation
    pub max_hp: i32,
    /// Damage per shot (Q16.16, commander scaling applied)
    pub base_damage: Fixed,
    /// Armor (derived from commander level)
    pub armor: i32,
    /// Elemental class
    pub class: FortressClass,
    /// Tick of the last shot (negative before the first)
    pub last_attack_tick: i32,
}

impl Fortress {
    /// Fold hashed fields into `hasher` in wire order.
    pub fn hash_into(&self, hasher: &mut Fnv1a32) {
        hasher.update_i32(self.hp);
        hasher.update_i32(self.last_attack_tick);
    }
}

// =============================================================================
// HERO INSTANCE
// =============================================================================

/// Behavioural state tag for a hero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum HeroState {
    /// No target, not moving
    #[default]
    Idle = 0,
    /// Moving toward a target
    Moving = 1,
    /// Attacked this tick
    Attacking = 2,
    /// Died this tick; projectiles may still resolve against it
    Dying = 3,
    /// Dead, slot retained
    Dead = 4,
}

/// One hero in the arena.
///
/// The arena-scoped multipliers are computed at setup and read by the
/// combat resolver; nothing mutates them mid-run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroInstance {
    /// Catalogue id of the definition this instance was built from
    pub hero_id: String,
    /// Tier (1-3)
    pub tier: u8,
    /// Commander level the build was composed at
    pub level: u8,
    /// Current hit points
    pub current_hp: i32,
    /// Hit points at creation
    pub max_hp: i32,
    /// Position in field coordinates
    pub position: FixedVec2,
    /// Velocity per tick
    pub velocity: FixedVec2,
    /// Collision radius
    pub radius: Fixed,
    /// Mass
    pub mass: Fixed,
    /// Behaviour tag
    pub state: HeroState,
    /// Tick of the last attack (negative before the first)
    pub last_attack_tick: i32,
    /// Composed base stats (tier/upgrade scaling baked in)
    pub stats: BaseStats,
    /// Arena-scoped damage multiplier
    pub damage_mult: Fixed,
    /// Arena-scoped attack-speed multiplier
    pub attack_speed_mult: Fixed,
    /// Arena-scoped range multiplier
    pub range_mult: Fixed,
    /// Arena-scoped crit-chance multiplier
    pub crit_chance_mult: Fixed,
    /// Arena-scoped armor multiplier
    pub armor_mult: Fixed,
    /// Armor after tier and multiplier scaling
    pub armor: i32,
    /// Equipped artifact, carried for the result record
    pub artifact_id: Option<u32>,
}

impl HeroInstance {
    /// A hero acts and can be targeted while it has HP left.
    #[inline]
    pub fn is_live(&self) -> bool {
        self.current_hp > 0
    }

    /// Fold hashed fields into `hasher` in wire order.
    pub fn hash_into(&self, hasher: &mut Fnv1a32) {
        hasher.update_vec2(self.position);
        hasher.update_i32(self.current_hp);
        hasher.update_u8(self.state as u8);
    }
}

// =============================================================================
// PROJECTILE
// =============================================================================

/// What fired a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum ProjectileSource {
    /// Fortress shot
    Fortress = 0,
    /// Turret shot (tagged distinctly when a build enables turrets)
    Turret = 1,
}

/// What a projectile is bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum TargetKind {
    /// A hero slot on the target side
    Hero = 0,
    /// The target side's fortress
    Fortress = 1,
}

/// Index-based target reference.
///
/// An index plus side tag, never a pointer: it stays valid after the
/// target dies, serialises trivially, and cannot form ownership
/// cycles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetRef {
    /// Hero or fortress
    pub kind: TargetKind,
    /// Hero slot when `kind` is `Hero`
    pub hero_index: Option<usize>,
    /// Side that owns the target
    pub side: SideId,
}

/// An in-flight fortress shot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projectile {
    /// Monotonically assigned id, unique within a run
    pub id: u32,
    /// Visual/class tag from the shooter's fortress class
    pub kind: ProjectileKind,
    /// What fired it
    pub source: ProjectileSource,
    /// Damage on impact (arena scalar applied; armor applied on receipt)
    pub damage: i32,
    /// Current position
    pub position: FixedVec2,
    /// Travel per tick
    pub speed: Fixed,
    /// Tick it was fired
    pub spawn_tick: u32,
    /// Bound target
    pub target: TargetRef,
}

impl Projectile {
    /// Fold hashed fields into `hasher` in wire order.
    pub fn hash_into(&self, hasher: &mut Fnv1a32) {
        hasher.update_u32(self.id);
        hasher.update_vec2(self.position);
        hasher.update_i32(self.damage);
    }
}

// =============================================================================
// SIDE
// =============================================================================

/// One player's half of the arena.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Side {
    /// Side tag
    pub id: SideId,
    /// Account id of the owner
    pub owner_id: u64,
    /// Display name of the owner
    pub owner_name: String,
    /// The fortress
    pub fortress: Fortress,
    /// Heroes in roster order; dead heroes keep their index
    pub heroes: Vec<HeroInstance>,
    /// In-flight projectiles fired by this side (swap-removed on expiry)
    pub projectiles: Vec<Projectile>,
    /// Side-wide combat modifiers
    pub modifiers: ModifierSet,
    /// Cumulative statistics
    pub stats: SideStats,
}

impl Side {
    /// Number of heroes still alive.
    pub fn live_hero_count(&self) -> usize {
        self.heroes.iter().filter(|h| h.is_live()).count()
    }

    /// Fold hashed fields into `hasher` in wire order.
    pub fn hash_into(&self, hasher: &mut Fnv1a32) {
        self.fortress.hash_into(hasher);
        for hero in &self.heroes {
            hero.hash_into(hasher);
        }
        for projectile in &self.projectiles {
            projectile.hash_into(hasher);
        }
    }
}

// =============================================================================
// ARENA STATE
// =============================================================================

/// Complete mutable state of a battle.
///
/// Created by the orchestrator, mutated only by the tick loop, frozen
/// once `ended` is set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArenaState {
    /// Completed ticks
    pub tick: u32,
    /// Safety timeout
    pub max_ticks: u32,
    /// Canonical RNG state word; mirrored into the stream each tick
    pub rng_state: u32,
    /// Challenger side
    pub left: Side,
    /// Defender side
    pub right: Side,
    /// Outcome (None while running)
    pub winner: Winner,
    /// Termination reason (None while running)
    pub win_reason: WinReason,
    /// True once the battle is over; `step` is a no-op afterwards
    pub ended: bool,
    /// Next projectile id (monotonic within the run)
    pub next_projectile_id: u32,
    /// Field width (copied from config for bounds enforcement)
    pub field_width: Fixed,
    /// Field height (copied from config for bounds enforcement)
    pub field_height: Fixed,
}

impl ArenaState {
    /// Borrow a side by tag.
    #[inline]
    pub fn side(&self, id: SideId) -> &Side {
        match id {
            SideId::Left => &self.left,
            SideId::Right => &self.right,
        }
    }

    /// Mutably borrow a side by tag.
    #[inline]
    pub fn side_mut(&mut self, id: SideId) -> &mut Side {
        match id {
            SideId::Left => &mut self.left,
            SideId::Right => &mut self.right,
        }
    }

    /// Split-borrow `(acting side, enemy side)`.
    #[inline]
    pub fn split_sides(&mut self, id: SideId) -> (&mut Side, &mut Side) {
        match id {
            SideId::Left => (&mut self.left, &mut self.right),
            SideId::Right => (&mut self.right, &mut self.left),
        }
    }

    /// Allocate the next projectile id.
    #[inline]
    pub fn alloc_projectile_id(&mut self) -> u32 {
        let id = self.next_projectile_id;
        self.next_projectile_id += 1;
        id
    }

    /// Hash of the current tick's state.
    ///
    /// Wire order: tick, rng_state, then per side (left, right):
    /// fortress (hp, last_attack_tick), heroes by index (position,
    /// hp, state tag), projectiles in storage order (id, position,
    /// damage). Storage order is deterministic under swap-remove, so
    /// both runs serialise identical bytes.
    pub fn tick_hash(&self) -> u32 {
        let mut hasher = Fnv1a32::new();
        hasher.update_u32(self.tick);
        hasher.update_u32(self.rng_state);
        self.left.hash_into(&mut hasher);
        self.right.hash_into(&mut hasher);
        hasher.finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_id_opposite() {
        assert_eq!(SideId::Left.opposite(), SideId::Right);
        assert_eq!(SideId::Right.opposite(), SideId::Left);
    }

    #[test]
    fn test_defaults_are_running_state() {
        assert_eq!(Winner::default(), Winner::None);
        assert_eq!(WinReason::default(), WinReason::None);
        assert_eq!(HeroState::default(), HeroState::Idle);
    }

    #[test]
    fn test_target_ref_is_copyable_data() {
        let target = TargetRef {
            kind: TargetKind::Hero,
            hero_index: Some(3),
            side: SideId::Right,
        };
        let copy = target;
        assert_eq!(copy, target);
    }
}
