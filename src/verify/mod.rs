//! Server-Client Verification Driver
//!
//! The anti-cheat primitive made operational: the claimant runs the
//! battle and submits a claim; the adjudicator re-runs the identical
//! inputs and compares field by field. Any disagreement rejects the
//! claim - there is no partial reconciliation. The specific mismatch
//! variants exist for diagnostics; a hash mismatch alone is already
//! sufficient to reject.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::arena::{ArenaConfig, BattleResult, BuildSpec, SideId, Simulation, Winner};
use crate::error::SimError;

/// The fields a client submits about a finished battle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleClaim {
    /// Claimed outcome
    pub winner: Winner,
    /// Claimed duration in ticks
    pub duration_ticks: u32,
    /// Claimed final fortress HP, left side
    pub left_hp: i32,
    /// Claimed final fortress HP, right side
    pub right_hp: i32,
    /// Claimed total damage, left side
    pub left_damage: i32,
    /// Claimed total damage, right side
    pub right_damage: i32,
    /// Claimed chain hash
    pub chain_hash: u32,
}

impl BattleClaim {
    /// Extract the claim fields from a locally computed result.
    pub fn from_result(result: &BattleResult) -> Self {
        Self {
            winner: result.winner,
            duration_ticks: result.duration_ticks,
            left_hp: result.left.final_hp,
            right_hp: result.right.final_hp,
            left_damage: result.left.total_damage,
            right_damage: result.right.total_damage,
            chain_hash: result.chain_hash,
        }
    }
}

/// Why a claim was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    /// The claimed inputs do not even construct a battle.
    #[error(transparent)]
    Invalid(#[from] SimError),

    /// Claimed winner disagrees with the re-run.
    #[error("winner mismatch: claimed {claimed:?}, computed {computed:?}")]
    WinnerMismatch {
        /// What the client claimed
        claimed: Winner,
        /// What the re-run produced
        computed: Winner,
    },

    /// Claimed duration disagrees with the re-run.
    #[error("duration mismatch: claimed {claimed}, computed {computed}")]
    DurationMismatch {
        /// What the client claimed
        claimed: u32,
        /// What the re-run produced
        computed: u32,
    },

    /// Claimed final fortress HP disagrees for one side.
    #[error("final hp mismatch on {side:?}: claimed {claimed}, computed {computed}")]
    HpMismatch {
        /// Side that disagrees
        side: SideId,
        /// What the client claimed
        claimed: i32,
        /// What the re-run produced
        computed: i32,
    },

    /// Claimed damage total disagrees for one side.
    #[error("damage mismatch on {side:?}: claimed {claimed}, computed {computed}")]
    DamageMismatch {
        /// Side that disagrees
        side: SideId,
        /// What the client claimed
        claimed: i32,
        /// What the re-run produced
        computed: i32,
    },

    /// Chain hashes disagree; the trajectories diverged somewhere.
    #[error("chain hash mismatch: claimed {claimed:#010x}, computed {computed:#010x}")]
    HashMismatch {
        /// What the client claimed
        claimed: u32,
        /// What the re-run produced
        computed: u32,
    },
}

/// Re-run the battle and compare the claim field by field.
///
/// Returns the adjudicator's own result on success so callers can
/// persist the authoritative record. Field comparisons run before the
/// hash so a rejection names the most specific disagreement.
pub fn verify_claim(
    seed: u32,
    left: BuildSpec,
    right: BuildSpec,
    config: ArenaConfig,
    claim: &BattleClaim,
) -> Result<BattleResult, VerifyError> {
    let mut simulation = Simulation::new(seed, left, right, config)?;
    let result = simulation.run();

    if claim.winner != result.winner {
        warn!(claimed = ?claim.winner, computed = ?result.winner, "rejecting claim: winner");
        return Err(VerifyError::WinnerMismatch {
            claimed: claim.winner,
            computed: result.winner,
        });
    }
    if claim.duration_ticks != result.duration_ticks {
        warn!(
            claimed = claim.duration_ticks,
            computed = result.duration_ticks,
            "rejecting claim: duration"
        );
        return Err(VerifyError::DurationMismatch {
            claimed: claim.duration_ticks,
            computed: result.duration_ticks,
        });
    }
    for (side, claimed, computed) in [
        (SideId::Left, claim.left_hp, result.left.final_hp),
        (SideId::Right, claim.right_hp, result.right.final_hp),
    ] {
        if claimed != computed {
            warn!(?side, claimed, computed, "rejecting claim: final hp");
            return Err(VerifyError::HpMismatch {
                side,
                claimed,
                computed,
            });
        }
    }
    for (side, claimed, computed) in [
        (SideId::Left, claim.left_damage, result.left.total_damage),
        (SideId::Right, claim.right_damage, result.right.total_damage),
    ] {
        if claimed != computed {
            warn!(?side, claimed, computed, "rejecting claim: damage total");
            return Err(VerifyError::DamageMismatch {
                side,
                claimed,
                computed,
            });
        }
    }
    if claim.chain_hash != result.chain_hash {
        warn!(
            claimed = format_args!("{:#010x}", claim.chain_hash),
            computed = format_args!("{:#010x}", result.chain_hash),
            "rejecting claim: chain hash"
        );
        return Err(VerifyError::HashMismatch {
            claimed: claim.chain_hash,
            computed: result.chain_hash,
        });
    }

    debug!(
        duration = result.duration_ticks,
        hash = format_args!("{:#010x}", result.chain_hash),
        "claim verified"
    );
    Ok(result)
}

// =============================================================================
// TESTS
// =============================================================================
