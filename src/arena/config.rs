//! Arena Configuration
//!
//! Immutable per-battle parameters. Both the claimant and the
//! adjudicator must construct the battle from an identical config or
//! the chain hashes cannot match.

use serde::{Deserialize, Serialize};

use crate::core::fixed::Fixed;

/// Fortress Y coordinate: 7.0 (both fortresses sit on the same lane).
pub const FORTRESS_Y: Fixed = 458752;

/// Immutable battle configuration.
///
/// Distances are Q16.16; HP and damage are plain integers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArenaConfig {
    /// Simulation rate in ticks per second
    pub tick_hz: u32,
    /// Safety timeout in ticks
    pub max_ticks: u32,
    /// Field width (Q16.16)
    pub field_width: Fixed,
    /// Field height (Q16.16)
    pub field_height: Fixed,
    /// Fortress hit points before commander scaling
    pub fortress_base_hp: i32,
    /// Fortress damage per shot before commander scaling
    pub fortress_base_damage: i32,
    /// Ticks between fortress shots
    pub fortress_attack_interval: u32,
    /// Fortress X offset from field centre (Q16.16)
    pub fortress_distance_from_center: Fixed,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            tick_hz: 30,
            max_ticks: 9000, // 5 minutes at 30 Hz
            field_width: 3276800,               // 50.0
            field_height: 983040,               // 15.0
            fortress_base_hp: 2500,
            fortress_base_damage: 30,
            fortress_attack_interval: 12,
            fortress_distance_from_center: 1179648, // 18.0
        }
    }
}

impl ArenaConfig {
    /// X coordinate of a side's fortress.
    pub fn fortress_x(&self, left: bool) -> Fixed {
        let center = self.field_width / 2;
        if left {
            center - self.fortress_distance_from_center
        } else {
            center + self.fortress_distance_from_center
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixed::to_fixed;

    #[test]
    fn test_defaults() {
        let config = ArenaConfig::default();
        assert_eq!(config.tick_hz, 30);
        assert_eq!(config.max_ticks, 9000);
        assert_eq!(config.field_width, to_fixed(50.0));
        assert_eq!(config.field_height, to_fixed(15.0));
        assert_eq!(config.fortress_base_hp, 2500);
        assert_eq!(config.fortress_base_damage, 30);
        assert_eq!(config.fortress_attack_interval, 12);
        assert_eq!(config.fortress_distance_from_center, to_fixed(18.0));
    }

    #[test]
    fn test_fortress_positions_symmetric() {
        let config = ArenaConfig::default();
        assert_eq!(config.fortress_x(true), to_fixed(7.0));
        assert_eq!(config.fortress_x(false), to_fixed(43.0));

        let center = config.field_width / 2;
        assert_eq!(center - config.fortress_x(true), config.fortress_x(false) - center);
    }
}
