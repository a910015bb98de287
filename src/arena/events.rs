//! Replay Event Log
//!
//! Append-only structured record of everything a replay viewer needs.
//! Events are appended in the exact order the operations that caused
//! them executed, so the log is byte-identical across runs of the
//! same inputs and forms part of the verified result.

use serde::{Deserialize, Serialize};

use crate::arena::state::SideId;
use crate::core::vec2::FixedVec2;

/// Discriminant for filtering without matching payloads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ReplayEventKind {
    /// A hero took damage
    Damage = 0,
    /// A hero died
    HeroDeath = 1,
    /// A fortress took damage
    FortressDamage = 2,
    /// A fortress fired a projectile
    ProjectileSpawn = 3,
}

/// Event payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplayEventData {
    /// A hero took damage (side = receiving side).
    Damage {
        /// Catalogue id of the hero hit
        hero_id: String,
        /// Roster index of the hero hit
        hero_index: usize,
        /// Damage delivered after mitigation
        damage: i32,
        /// HP remaining after the hit
        remaining_hp: i32,
    },

    /// A hero died (side = receiving side).
    HeroDeath {
        /// Catalogue id of the dead hero
        hero_id: String,
        /// Roster index of the dead hero
        hero_index: usize,
        /// The hit that killed it
        killing_damage: i32,
    },

    /// A fortress took damage (side = receiving side).
    FortressDamage {
        /// Damage delivered after mitigation
        damage: i32,
        /// Fortress HP remaining after the hit
        remaining_hp: i32,
    },

    /// A fortress fired a projectile (side = firing side).
    ProjectileSpawn {
        /// Muzzle position
        start: FixedVec2,
        /// Target position at spawn
        target: FixedVec2,
        /// Damage the projectile carries
        damage: i32,
    },
}

/// One entry in the replay log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayEvent {
    /// Tick the event occurred on
    pub tick: u32,
    /// Side the event is attributed to (see payload docs)
    pub side: SideId,
    /// Payload
    pub data: ReplayEventData,
}

impl ReplayEvent {
    /// Event kind discriminant.
    pub fn kind(&self) -> ReplayEventKind {
        match self.data {
            ReplayEventData::Damage { .. } => ReplayEventKind::Damage,
            ReplayEventData::HeroDeath { .. } => ReplayEventKind::HeroDeath,
            ReplayEventData::FortressDamage { .. } => ReplayEventKind::FortressDamage,
            ReplayEventData::ProjectileSpawn { .. } => ReplayEventKind::ProjectileSpawn,
        }
    }

    /// Hero damage event.
    pub fn damage(
        tick: u32,
        side: SideId,
        hero_id: &str,
        hero_index: usize,
        damage: i32,
        remaining_hp: i32,
    ) -> Self {
        Self {
            tick,
            side,
            data: ReplayEventData::Damage {
                hero_id: hero_id.to_string(),
                hero_index,
                damage,
                remaining_hp,
            },
        }
    }

    /// Hero death event.
    pub fn hero_death(
        tick: u32,
        side: SideId,
        hero_id: &str,
        hero_index: usize,
        killing_damage: i32,
    ) -> Self {
        Self {
            tick,
            side,
            data: ReplayEventData::HeroDeath {
                hero_id: hero_id.to_string(),
                hero_index,
                killing_damage,
            },
        }
    }

    /// Fortress damage event.
    pub fn fortress_damage(tick: u32, side: SideId, damage: i32, remaining_hp: i32) -> Self {
        Self {
            tick,
            side,
            data: ReplayEventData::FortressDamage {
                damage,
                remaining_hp,
            },
        }
    }

    /// Projectile spawn event.
    pub fn projectile_spawn(
        tick: u32,
        side: SideId,
        start: FixedVec2,
        target: FixedVec2,
        damage: i32,
    ) -> Self {
        Self {
            tick,
            side,
            data: ReplayEventData::ProjectileSpawn {
                start,
                target,
                damage,
            },
        }
    }
}
