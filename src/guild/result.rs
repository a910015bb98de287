//! Guild Battle Result
//!
//! Survivor counts, per-hero damage, the kill log, capped key
//! moments, MVP selection, and the chain hash - everything the guild
//! arena UI and the verifier consume.

use serde::{Deserialize, Serialize};

use super::{GuildBattleState, GuildWinner, TeamId};
use crate::core::hash::ChainHash;

/// One recorded kill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildKill {
    /// Tick of the kill
    pub tick: u32,
    /// Killer's team
    pub killer_team: TeamId,
    /// Killer's roster index
    pub killer_index: usize,
    /// Killer's owner account
    pub killer_owner_id: u64,
    /// Victim's roster index (on the opposing team)
    pub victim_index: usize,
    /// Victim's owner account
    pub victim_owner_id: u64,
}

/// Highlight entries for the battle summary. Crits stop being
/// recorded once the cap is reached; kills and boundaries always are.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuildKeyMoment {
    /// First tick
    BattleStart {
        /// Always 0
        tick: u32,
    },
    /// A hero landed a crit (capped at 50 entries)
    Crit {
        /// Tick of the hit
        tick: u32,
        /// Attacker's team
        team: TeamId,
        /// Attacker's roster index
        attacker_index: usize,
        /// Damage dealt
        damage: i32,
    },
    /// A hero died
    Kill {
        /// Tick of the kill
        tick: u32,
        /// Killer's team
        killer_team: TeamId,
        /// Killer's roster index
        killer_index: usize,
        /// Victim's roster index
        victim_index: usize,
    },
    /// Battle resolved
    BattleEnd {
        /// Final tick count
        tick: u32,
        /// Outcome
        winner: GuildWinner,
    },
}

/// The winning team's top damage dealer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildMvp {
    /// MVP's team
    pub team: TeamId,
    /// Roster index
    pub index: usize,
    /// Owner account
    pub owner_id: u64,
    /// Catalogue id
    pub hero_id: String,
    /// Total damage dealt
    pub damage_dealt: i32,
}

/// Final record of one guild battle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildBattleResult {
    /// Outcome
    pub winner: GuildWinner,
    /// Battle length in ticks
    pub duration_ticks: u32,
    /// Live heroes per team at the end
    pub survivors: [i32; 2],
    /// Aggregate remaining HP per team
    pub remaining_hp: [i64; 2],
    /// Total damage per team
    pub team_damage: [i32; 2],
    /// Damage per hero, by team and roster index
    pub hero_damage: [Vec<i32>; 2],
    /// Every kill in order
    pub kill_log: Vec<GuildKill>,
    /// Battle start, kills, capped crits, battle end
    pub key_moments: Vec<GuildKeyMoment>,
    /// MVP of the winning team; absent on a draw
    pub mvp: Option<GuildMvp>,
    /// Chain hash after the terminating tick and result record
    pub chain_hash: u32,
}

impl GuildBattleResult {
    /// JSON export.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
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

/// Winning team's highest damage dealer; roster order breaks ties.
fn select_mvp(state: &GuildBattleState, winner: GuildWinner) -> Option<GuildMvp> {
    let team = match winner {
        GuildWinner::TeamA => TeamId::A,
        GuildWinner::TeamB => TeamId::B,
        GuildWinner::Draw => return None,
    };

    let heroes = &state.teams[team.index()];
    let mut best: Option<usize> = None;
    for (index, hero) in heroes.iter().enumerate() {
        // Strict > keeps the earliest roster slot on ties
        if best.map_or(true, |b| hero.damage_dealt > heroes[b].damage_dealt) {
            best = Some(index);
        }
    }

    best.map(|index| {
        let hero = &heroes[index];
        GuildMvp {
            team,
            index,
            owner_id: hero.owner_id,
            hero_id: hero.hero_id.clone(),
            damage_dealt: hero.damage_dealt,
        }
    })
}

/// Build the result from a resolved battle.
pub(super) fn build_result(
    state: &GuildBattleState,
    chain: &ChainHash,
    kills: &[GuildKill],
    moments: &[GuildKeyMoment],
) -> GuildBattleResult {
    let mut final_chain = chain.clone();
    final_chain.absorb(state.tick);
    final_chain.absorb_u8(state.winner as u8);
    final_chain.absorb(state.tick);
    for team in [TeamId::A, TeamId::B] {
        final_chain.absorb(state.remaining_hp(team) as u32);
        final_chain.absorb(
            state.teams[team.index()]
                .iter()
                .map(|h| h.damage_dealt as u32)
                .fold(0u32, u32::wrapping_add),
        );
    }

    let survivors = [
        state.live_count(TeamId::A) as i32,
        state.live_count(TeamId::B) as i32,
    ];
    let remaining_hp = [
        state.remaining_hp(TeamId::A),
        state.remaining_hp(TeamId::B),
    ];
    let team_damage = [
        state.teams[0].iter().map(|h| h.damage_dealt).sum(),
        state.teams[1].iter().map(|h| h.damage_dealt).sum(),
    ];
    let hero_damage = [
        state.teams[0].iter().map(|h| h.damage_dealt).collect(),
        state.teams[1].iter().map(|h| h.damage_dealt).collect(),
    ];

    GuildBattleResult {
        winner: state.winner,
        duration_ticks: state.tick,
        survivors,
        remaining_hp,
        team_damage,
        hero_damage,
        kill_log: kills.to_vec(),
        key_moments: moments.to_vec(),
        mvp: select_mvp(state, state.winner),
        chain_hash: final_chain.value(),
    }
}

// =============================================================================
// TESTS
// =============================================================================
