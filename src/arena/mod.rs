//! 1v1 Arena Simulation
//!
//! The public surface of the battle core: validate two builds,
//! assemble the world, tick it to termination, and hand back a
//! `BattleResult` with the replay log and the chain hash the
//! verifier re-computes.

pub mod build;
pub mod combat;
pub mod config;
pub mod events;
pub mod movement;
pub mod projectile;
pub mod result;
pub mod state;
pub mod targeting;
pub mod tick;

pub use build::{validate_build, BuildSpec, HeroConfig};
pub use config::ArenaConfig;
pub use events::{ReplayEvent, ReplayEventData, ReplayEventKind};
pub use result::{BattleResult, SideSummary};
pub use state::{ArenaState, SideId, WinReason, Winner};

use crate::core::hash::ChainHash;
use crate::error::SimError;
use crate::RULESET_VERSION;

/// A battle in progress.
///
/// Construction validates everything; after that `step` and `run`
/// cannot fail. The chain hash tracks the state after every tick, so
/// a caller can snapshot `chain_hash()` mid-run as a checkpoint.
pub struct Simulation {
    config: ArenaConfig,
    state: ArenaState,
    events: Vec<ReplayEvent>,
    chain: ChainHash,
}

impl Simulation {
    /// Validate inputs and assemble the battle world.
    ///
    /// Rejects: a zero seed (xorshift32 would stall), an unusable
    /// config, and every build defect listed in the validation rules.
    pub fn new(
        seed: u32,
        left: BuildSpec,
        right: BuildSpec,
        config: ArenaConfig,
    ) -> Result<Self, SimError> {
        if seed == 0 {
            return Err(SimError::invalid("rng seed must be non-zero"));
        }
        if config.max_ticks == 0 {
            return Err(SimError::invalid("max_ticks must be positive"));
        }
        if config.field_width <= 0 || config.field_height <= 0 {
            return Err(SimError::invalid("field dimensions must be positive"));
        }
        validate_build(&left)?;
        validate_build(&right)?;

        let state = ArenaState {
            tick: 0,
            max_ticks: config.max_ticks,
            rng_state: seed,
            left: build::build_side(&left, SideId::Left, &config),
            right: build::build_side(&right, SideId::Right, &config),
            winner: Winner::None,
            win_reason: WinReason::None,
            ended: false,
            next_projectile_id: 0,
            field_width: config.field_width,
            field_height: config.field_height,
        };

        Ok(Self {
            config,
            state,
            events: Vec::new(),
            chain: ChainHash::new(RULESET_VERSION),
        })
    }

    /// Advance one tick and fold its hash into the chain.
    /// No-op once the battle has ended.
    pub fn step(&mut self) {
        if self.state.ended {
            return;
        }
        tick::step(&mut self.state, &self.config, &mut self.events);
        self.chain.absorb(self.state.tick_hash());
    }

    /// Run to termination and build the result.
    pub fn run(&mut self) -> BattleResult {
        while !self.state.ended {
            self.step();
        }
        result::build_result(&self.state, &self.chain, &self.events)
    }

    /// Current world state.
    pub fn state(&self) -> &ArenaState {
        &self.state
    }

    /// Replay log so far.
    pub fn events(&self) -> &[ReplayEvent] {
        &self.events
    }

    /// Chain hash after the last completed tick (checkpoint value).
    pub fn chain_hash(&self) -> u32 {
        self.chain.value()
    }

    /// The configuration this battle was built with.
    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }
}

/// Validate, simulate, and summarise one battle.
pub fn run_battle(
    seed: u32,
    left: BuildSpec,
    right: BuildSpec,
    config: ArenaConfig,
) -> Result<BattleResult, SimError> {
    let mut simulation = Simulation::new(seed, left, right, config)?;
    Ok(simulation.run())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::FortressClass;

    fn mid_build(owner: u64, name: &str) -> BuildSpec {
        BuildSpec::new(owner, name, FortressClass::Fire, 30, &["storm", "forge"])
    }

    #[test]
    fn test_new_rejects_bad_inputs() {
        let config = ArenaConfig::default();

        let err = Simulation::new(0, mid_build(1, "a"), mid_build(2, "b"), config.clone());
        assert!(err.is_err());

        let mut empty = mid_build(1, "a");
        empty.hero_ids.clear();
        assert!(Simulation::new(1, empty, mid_build(2, "b"), config.clone()).is_err());

        let mut unknown = mid_build(1, "a");
        unknown.hero_ids = vec!["does-not-exist".to_string()];
        assert!(Simulation::new(1, unknown, mid_build(2, "b"), config.clone()).is_err());

        let mut bad_class = mid_build(1, "a");
        bad_class.fortress_class = "obsidian".to_string();
        assert!(Simulation::new(1, bad_class, mid_build(2, "b"), config).is_err());
    }

    #[test]
    fn test_run_terminates_within_max_ticks() {
        let result = run_battle(
            12345,
            mid_build(1, "a"),
            mid_build(2, "b"),
            ArenaConfig::default(),
        )
        .unwrap();

        assert!(result.duration_ticks > 0);
        assert!(result.duration_ticks <= ArenaConfig::default().max_ticks);
        assert!(matches!(
            result.win_reason,
            WinReason::FortressDestroyed | WinReason::Timeout | WinReason::Draw
        ));
    }

    #[test]
    fn test_checkpoint_chain_hash_advances() {
        let mut sim = Simulation::new(
            7,
            mid_build(1, "a"),
            mid_build(2, "b"),
            ArenaConfig::default(),
        )
        .unwrap();

        let h0 = sim.chain_hash();
        sim.step();
        let h1 = sim.chain_hash();
        sim.step();
        let h2 = sim.chain_hash();

        assert_ne!(h0, h1);
        assert_ne!(h1, h2);
    }

    #[test]
    fn test_step_accessors_expose_state() {
        let mut sim = Simulation::new(
            99,
            mid_build(1, "a"),
            mid_build(2, "b"),
            ArenaConfig::default(),
        )
        .unwrap();

        assert_eq!(sim.state().tick, 0);
        sim.step();
        assert_eq!(sim.state().tick, 1);
        // Both fortresses fire on tick 0
        assert!(!sim.events().is_empty());
    }
}
