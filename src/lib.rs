//! # Fortress Arena Battle Core
//!
//! Deterministic combat simulation for an asynchronous PvP arena:
//! the same 32-bit seed and the same two build descriptors produce a
//! bit-identical battle trajectory on the challenger's client and on
//! the verifying server. That bit-equality is the anti-cheat
//! primitive - the server re-runs every claimed result and rejects
//! anything whose chain hash disagrees.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   FORTRESS ARENA CORE                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/            - Deterministic primitives                 │
//! │  ├── fixed.rs     - Q16.16 fixed-point arithmetic            │
//! │  ├── vec2.rs      - 2D vector with fixed-point               │
//! │  ├── rng.rs       - Xorshift32 stream + seed derivation      │
//! │  └── hash.rs      - FNV-1a-32 tick and chain hashing         │
//! │                                                              │
//! │  data/            - Read-only rule-set tables                │
//! │  ├── heroes.rs    - Hero catalogue + stat composition        │
//! │  └── fortress.rs  - Classes + commander progression          │
//! │                                                              │
//! │  arena/           - 1v1 battle simulation                    │
//! │  ├── state.rs     - World model (sides, heroes, shots)       │
//! │  ├── tick.rs      - Orchestrator (alternating side order)    │
//! │  ├── targeting / movement / combat / projectile              │
//! │  ├── events.rs    - Append-only replay log                   │
//! │  └── result.rs    - Result rollup + transport                │
//! │                                                              │
//! │  guild/           - 5v5 hero-vs-hero variant                 │
//! │  verify/          - Server-side claim re-run + comparison    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! `core/`, `data/`, `arena/`, and `guild/` are 100% deterministic:
//! no floating point in any hashed state, no map iteration order
//! dependence, no wall clock, and exactly one seeded RNG stream per
//! battle with a fixed draw order. Given identical inputs the
//! simulation produces identical bytes on any platform (x86, ARM,
//! WASM).
//!
//! Multiple battles may run on parallel threads - each owns its
//! state exclusively. Parallelism *inside* a battle would reorder
//! RNG draws and is forbidden.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod arena;
pub mod core;
pub mod data;
pub mod error;
pub mod guild;
pub mod verify;

// Re-export commonly used types
pub use crate::arena::{
    ArenaConfig, BattleResult, BuildSpec, ReplayEvent, SideId, Simulation, WinReason, Winner,
};
pub use crate::core::fixed::{Fixed, FIXED_HALF, FIXED_ONE, FIXED_SCALE};
pub use crate::core::rng::Xorshift32;
pub use crate::core::vec2::FixedVec2;
pub use crate::error::SimError;
pub use crate::guild::{GuildBattle, GuildBattleResult, GuildHeroSpec};
pub use crate::verify::{verify_claim, BattleClaim, VerifyError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Simulation tick rate (Hz)
pub const TICK_RATE: u32 = 30;

/// Rule-set version folded into every chain hash. Any change to the
/// data tables or to simulation semantics bumps this, so stale
/// clients fail verification instead of silently diverging.
pub const RULESET_VERSION: u32 = 1;
