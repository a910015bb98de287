//! 5v5 Guild Arena Variant
//!
//! Pure hero-vs-hero battles on a small field: no fortresses, no
//! projectiles, random target assignment, fixed crit chance, and
//! damage variance drawn from the same single RNG stream the 1v1
//! arena uses. Same fixed-point core, same chain-hash discipline,
//! different (and intentionally shorter) timeout.

pub mod battle;
pub mod result;

pub use result::{GuildBattleResult, GuildKeyMoment, GuildKill, GuildMvp};

use serde::{Deserialize, Serialize};

use crate::core::fixed::{fixed_max, fixed_scale_int, Fixed, FIXED_ONE, FIXED_SCALE};
use crate::core::hash::{ChainHash, Fnv1a32};
use crate::core::rng::Xorshift32;
use crate::core::vec2::FixedVec2;
use crate::data::{calculate_hero_stats, get_hero_by_id, BaseStats};
use crate::error::SimError;
use crate::RULESET_VERSION;

/// Heroes per team.
pub const GUILD_TEAM_SIZE: usize = 5;

/// Timeout: 60 seconds at 30 Hz. Deliberately different from the 1v1
/// arena's 9000-tick cap; the two are tuned independently.
pub const GUILD_MAX_TICKS: u32 = 1800;

/// Field width: 20.0
pub const GUILD_FIELD_WIDTH: Fixed = 1310720;

/// Field height: 15.0
pub const GUILD_FIELD_HEIGHT: Fixed = 983040;

/// Attack range: 3.0
pub const GUILD_ATTACK_RANGE: Fixed = 196608;

/// Attack range squared: 9.0
pub const GUILD_ATTACK_RANGE_SQ: Fixed = 589824;

/// Flat crit chance: 0.15
pub const GUILD_CRIT_CHANCE: Fixed = 9830;

/// Crit damage multiplier: 1.5
pub const GUILD_CRIT_MULTIPLIER: Fixed = 98304;

/// Damage variance floor: 0.9
pub const GUILD_VARIANCE_BASE: Fixed = 58982;

/// Damage variance span: 0.2 (factor drawn from [0.9, 1.1))
pub const GUILD_VARIANCE_SPAN: Fixed = 13107;

/// Crit entries recorded as key moments before the cap closes.
pub const GUILD_KEY_MOMENT_CRIT_CAP: usize = 50;

/// Team tag by roster list (first list = `A`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TeamId {
    /// First (attacking) roster
    A = 0,
    /// Second (defending) roster
    B = 1,
}

impl TeamId {
    /// The opposing team.
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }

    /// Array index.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Outcome of a guild battle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum GuildWinner {
    /// First roster won
    TeamA = 0,
    /// Second roster won
    TeamB = 1,
    /// Exact tie
    #[default]
    Draw = 2,
}

/// One roster entry handed in by the caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildHeroSpec {
    /// Account that owns this hero
    pub owner_id: u64,
    /// Catalogue id
    pub hero_id: String,
    /// Tier (1-3)
    pub tier: u8,
    /// Power score; stats scale by `max(1, power / 1000)`
    pub power: i32,
}

/// A hero on the guild field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildHero {
    /// Account that owns this hero
    pub owner_id: u64,
    /// Catalogue id
    pub hero_id: String,
    /// Tier
    pub tier: u8,
    /// Power score
    pub power: i32,
    /// Current hit points
    pub current_hp: i32,
    /// Hit points at spawn
    pub max_hp: i32,
    /// Position
    pub position: FixedVec2,
    /// Velocity per tick
    pub velocity: FixedVec2,
    /// Power-scaled stats
    pub stats: BaseStats,
    /// Tick of the last attack
    pub last_attack_tick: i32,
    /// Current enemy slot, if any
    pub target_index: Option<usize>,
    /// Damage dealt so far (MVP input)
    pub damage_dealt: i32,
}

impl GuildHero {
    /// Alive while HP remains.
    #[inline]
    pub fn is_live(&self) -> bool {
        self.current_hp > 0
    }

    fn hash_into(&self, hasher: &mut Fnv1a32) {
        hasher.update_vec2(self.position);
        hasher.update_i32(self.current_hp);
        hasher.update_i32(self.damage_dealt);
    }
}

/// Mutable state of a guild battle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildBattleState {
    /// Completed ticks
    pub tick: u32,
    /// Timeout
    pub max_ticks: u32,
    /// Canonical RNG state word
    pub rng_state: u32,
    /// Both rosters, index-stable
    pub teams: [Vec<GuildHero>; 2],
    /// Outcome
    pub winner: GuildWinner,
    /// True once resolved
    pub ended: bool,
}

impl GuildBattleState {
    /// Live heroes on a team.
    pub fn live_count(&self, team: TeamId) -> usize {
        self.teams[team.index()].iter().filter(|h| h.is_live()).count()
    }

    /// Sum of remaining HP on a team (timeout comparison).
    pub fn remaining_hp(&self, team: TeamId) -> i64 {
        self.teams[team.index()]
            .iter()
            .map(|h| h.current_hp as i64)
            .sum()
    }

    /// Hash of the current tick's state. Same wire discipline as the
    /// 1v1 arena: tick, rng_state, then every hero by team and index.
    pub fn tick_hash(&self) -> u32 {
        let mut hasher = Fnv1a32::new();
        hasher.update_u32(self.tick);
        hasher.update_u32(self.rng_state);
        for team in &self.teams {
            for hero in team {
                hero.hash_into(&mut hasher);
            }
        }
        hasher.finish()
    }
}

/// A guild battle in progress.
pub struct GuildBattle {
    state: GuildBattleState,
    chain: ChainHash,
    kills: Vec<GuildKill>,
    moments: Vec<GuildKeyMoment>,
    crit_moments: usize,
}

impl GuildBattle {
    /// Validate both rosters and spawn the field.
    ///
    /// Spawn lanes: team A on the west edge, team B on the east edge,
    /// `y = 2.0 + 2.5 * index + u` with one unit draw per hero,
    /// consumed in order (team A slots 0..5, then team B slots 0..5).
    pub fn new(
        seed: u32,
        team_a: Vec<GuildHeroSpec>,
        team_b: Vec<GuildHeroSpec>,
    ) -> Result<Self, SimError> {
        if seed == 0 {
            return Err(SimError::invalid("rng seed must be non-zero"));
        }
        validate_roster(&team_a, "team A")?;
        validate_roster(&team_b, "team B")?;

        let mut rng = Xorshift32::new(seed);
        let spawned_a = spawn_team(&team_a, 65536, &mut rng); // x = 1.0
        let spawned_b = spawn_team(&team_b, 1245184, &mut rng); // x = 19.0

        let state = GuildBattleState {
            tick: 0,
            max_ticks: GUILD_MAX_TICKS,
            rng_state: rng.state(),
            teams: [spawned_a, spawned_b],
            winner: GuildWinner::Draw,
            ended: false,
        };

        Ok(Self {
            state,
            chain: ChainHash::new(RULESET_VERSION),
            kills: Vec::new(),
            moments: vec![GuildKeyMoment::BattleStart { tick: 0 }],
            crit_moments: 0,
        })
    }

    /// Advance one tick; no-op once resolved.
    pub fn step(&mut self) {
        if self.state.ended {
            return;
        }
        battle::step(
            &mut self.state,
            &mut self.kills,
            &mut self.moments,
            &mut self.crit_moments,
        );
        self.chain.absorb(self.state.tick_hash());
    }

    /// Run to termination and build the result.
    pub fn run(&mut self) -> GuildBattleResult {
        while !self.state.ended {
            self.step();
        }
        result::build_result(&self.state, &self.chain, &self.kills, &self.moments)
    }

    /// Current state.
    pub fn state(&self) -> &GuildBattleState {
        &self.state
    }

    /// Chain checkpoint after the last completed tick.
    pub fn chain_hash(&self) -> u32 {
        self.chain.value()
    }
}

/// Validate, simulate, and summarise one guild battle.
pub fn run_guild_battle(
    seed: u32,
    team_a: Vec<GuildHeroSpec>,
    team_b: Vec<GuildHeroSpec>,
) -> Result<GuildBattleResult, SimError> {
    let mut battle = GuildBattle::new(seed, team_a, team_b)?;
    Ok(battle.run())
}

fn validate_roster(roster: &[GuildHeroSpec], label: &str) -> Result<(), SimError> {
    if roster.len() != GUILD_TEAM_SIZE {
        return Err(SimError::invalid(format!(
            "{label} has {} heroes, expected {GUILD_TEAM_SIZE}",
            roster.len()
        )));
    }
    for spec in roster {
        if get_hero_by_id(&spec.hero_id).is_none() {
            return Err(SimError::invalid(format!(
                "{label}: unknown hero id '{}'",
                spec.hero_id
            )));
        }
        if !(1..=3).contains(&spec.tier) {
            return Err(SimError::invalid(format!(
                "{label}: tier {} outside {{1, 2, 3}}",
                spec.tier
            )));
        }
        if spec.power < 0 {
            return Err(SimError::invalid(format!(
                "{label}: negative power {}",
                spec.power
            )));
        }
    }
    Ok(())
}

/// Power scaling: `max(1, power / 1000)` as Q16.16.
///
/// Computed in i64 so absurd power scores saturate instead of
/// wrapping the Q16.16 integer range.
fn power_scale(power: i32) -> Fixed {
    let scaled = ((power as i64) << FIXED_SCALE) / 1000;
    fixed_max(FIXED_ONE, scaled.min(i32::MAX as i64) as Fixed)
}

fn spawn_team(roster: &[GuildHeroSpec], x: Fixed, rng: &mut Xorshift32) -> Vec<GuildHero> {
    roster
        .iter()
        .enumerate()
        .map(|(index, spec)| {
            let def = get_hero_by_id(&spec.hero_id).expect("validated hero id");
            let base = calculate_hero_stats(def, spec.tier, 1);
            let scale = power_scale(spec.power);

            // Damage and HP scale with power; cadence and speed stay
            // catalogue values
            let stats = BaseStats {
                damage: crate::core::fixed::fixed_mul(base.damage, scale),
                hp: fixed_scale_int(base.hp, scale),
                ..base
            };

            // Lane spawn: one draw per hero, in roster order
            let jitter = rng.next_fixed_unit();
            let y = 131072 + 163840 * index as Fixed + jitter; // 2.0 + 2.5 * i + u

            GuildHero {
                owner_id: spec.owner_id,
                hero_id: spec.hero_id.clone(),
                tier: spec.tier,
                power: spec.power,
                current_hp: stats.hp,
                max_hp: stats.hp,
                position: FixedVec2::new(x, y),
                velocity: FixedVec2::ZERO,
                stats,
                last_attack_tick: -1_000_000,
                target_index: None,
                damage_dealt: 0,
            }
        })
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================
