//! Result Builder
//!
//! Rolls the frozen arena state up into the record the client ships
//! to the server: outcome, per-side totals, the replay event log,
//! and the final chain hash. JSON for humans, bincode for transport.

use serde::{Deserialize, Serialize};

use crate::arena::events::ReplayEvent;
use crate::arena::state::{ArenaState, Side, WinReason, Winner};
use crate::core::hash::ChainHash;

/// Per-side rollup in a battle result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideSummary {
    /// Account id
    pub owner_id: u64,
    /// Display name
    pub owner_name: String,
    /// Fortress HP at the end
    pub final_hp: i32,
    /// Fortress HP at the start
    pub max_hp: i32,
    /// Damage delivered over the battle
    pub total_damage: i32,
    /// Damage absorbed over the battle
    pub damage_received: i32,
    /// Heroes still alive
    pub heroes_alive: i32,
    /// Enemy heroes killed
    pub heroes_killed: i32,
    /// Own heroes lost
    pub heroes_lost: i32,
    /// Did this side win?
    pub won: bool,
}

impl SideSummary {
    fn from_side(side: &Side, won: bool) -> Self {
        Self {
            owner_id: side.owner_id,
            owner_name: side.owner_name.clone(),
            final_hp: side.fortress.hp,
            max_hp: side.fortress.max_hp,
            total_damage: side.stats.damage_dealt,
            damage_received: side.stats.damage_received,
            heroes_alive: side.live_hero_count() as i32,
            heroes_killed: side.stats.heroes_killed,
            heroes_lost: side.stats.heroes_lost,
            won,
        }
    }
}

/// Final record of one battle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BattleResult {
    /// Outcome
    pub winner: Winner,
    /// Why the battle ended
    pub win_reason: WinReason,
    /// Battle length in ticks
    pub duration_ticks: u32,
    /// Challenger rollup
    pub left: SideSummary,
    /// Defender rollup
    pub right: SideSummary,
    /// Chain hash after the terminating tick and result record
    pub chain_hash: u32,
    /// Full replay event log
    pub events: Vec<ReplayEvent>,
}

impl BattleResult {
    /// JSON export for logs and tooling.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse a JSON export.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    /// Compact transport blob.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Parse a transport blob.
    pub fn from_bytes(data: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(data)
    }
}

/// Build the result from a terminated battle.
///
/// Folds the result record into a copy of the chain in the order
/// the wire contract fixes: tick, winner, winReason, duration, then
/// each side's final HP and total damage. Working on a copy keeps
/// the call idempotent - the live chain stays at its
/// after-terminating-tick value for checkpoint readers.
pub fn build_result(state: &ArenaState, chain: &ChainHash, events: &[ReplayEvent]) -> BattleResult {
    let mut final_chain = chain.clone();
    final_chain.absorb(state.tick);
    final_chain.absorb_u8(state.winner as u8);
    final_chain.absorb_u8(state.win_reason as u8);
    final_chain.absorb(state.tick);
    final_chain.absorb(state.left.fortress.hp as u32);
    final_chain.absorb(state.left.stats.damage_dealt as u32);
    final_chain.absorb(state.right.fortress.hp as u32);
    final_chain.absorb(state.right.stats.damage_dealt as u32);

    BattleResult {
        winner: state.winner,
        win_reason: state.win_reason,
        duration_ticks: state.tick,
        left: SideSummary::from_side(&state.left, state.winner == Winner::Left),
        right: SideSummary::from_side(&state.right, state.winner == Winner::Right),
        chain_hash: final_chain.value(),
        events: events.to_vec(),
    }
}

// =============================================================================
// TESTS
// =============================================================================
