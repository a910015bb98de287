//! Targeting AI
//!
//! Pure functions from positions + liveness to a target choice.
//! Ties break on the lowest roster index, so both simulations pick
//! the same enemy from identical state.

use crate::arena::state::{Fortress, HeroInstance, Side};
use crate::core::fixed::{
    fixed_mul, Fixed, FORTRESS_ATTACK_DISTANCE_SQ, FORTRESS_ATTACK_RANGE_SQ,
};
use crate::core::vec2::FixedVec2;

/// What a hero decided to do this tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeroTarget {
    /// Close enough to hit the enemy fortress; stand and attack
    EnemyFortress,
    /// Attack the live enemy hero at this roster index
    EnemyHero(usize),
    /// Nothing in range; advance toward this point (the enemy fortress)
    Advance(FixedVec2),
}

/// What a fortress decided to shoot at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FortressTarget {
    /// The live enemy hero at this roster index
    Hero(usize),
    /// No hero in range; shell the enemy fortress
    EnemyFortress,
}

/// Effective attack range of a hero (stats range x arena multiplier).
#[inline]
pub fn hero_attack_range(hero: &HeroInstance) -> Fixed {
    fixed_mul(hero.stats.range, hero.range_mult)
}

/// Closest live enemy hero within `range_sq`, lowest index on ties.
fn closest_live_hero_within(
    from: FixedVec2,
    enemy: &Side,
    range_sq: Fixed,
) -> Option<usize> {
    let mut best: Option<(usize, Fixed)> = None;
    for (index, hero) in enemy.heroes.iter().enumerate() {
        if !hero.is_live() {
            continue;
        }
        let dist_sq = from.distance_squared(hero.position);
        if dist_sq > range_sq {
            continue;
        }
        // Strict < keeps the lowest index on equal distances
        if best.map_or(true, |(_, best_sq)| dist_sq < best_sq) {
            best = Some((index, dist_sq));
        }
    }
    best.map(|(index, _)| index)
}

/// Rank-order target selection for a hero (first match wins):
/// 1. enemy fortress within FORTRESS_ATTACK_DISTANCE,
/// 2. nearest live enemy hero within attack range,
/// 3. advance on the enemy fortress.
pub fn select_hero_target(hero: &HeroInstance, enemy: &Side) -> HeroTarget {
    let fortress_dist_sq = hero.position.distance_squared(enemy.fortress.position);
    if fortress_dist_sq <= FORTRESS_ATTACK_DISTANCE_SQ {
        return HeroTarget::EnemyFortress;
    }

    let range = hero_attack_range(hero);
    let range_sq = fixed_mul(range, range);
    if let Some(index) = closest_live_hero_within(hero.position, enemy, range_sq) {
        return HeroTarget::EnemyHero(index);
    }

    HeroTarget::Advance(enemy.fortress.position)
}

/// Fortress target selection: closest live enemy hero within
/// FORTRESS_ATTACK_RANGE, else the enemy fortress itself.
pub fn select_fortress_target(fortress: &Fortress, enemy: &Side) -> FortressTarget {
    match closest_live_hero_within(fortress.position, enemy, FORTRESS_ATTACK_RANGE_SQ) {
        Some(index) => FortressTarget::Hero(index),
        None => FortressTarget::EnemyFortress,
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::build::{build_side, BuildSpec};
    use crate::arena::config::ArenaConfig;
    use crate::arena::state::SideId;
    use crate::core::fixed::to_fixed;
    use crate::data::FortressClass;

    fn two_sides(heroes: &[&str]) -> (crate::arena::state::Side, crate::arena::state::Side) {
        let config = ArenaConfig::default();
        let spec = BuildSpec::new(1, "a", FortressClass::Fire, 50, heroes);
        (
            build_side(&spec, SideId::Left, &config),
            build_side(&spec, SideId::Right, &config),
        )
    }

    #[test]
    fn test_hero_advances_when_nothing_in_range() {
        let (left, right) = two_sides(&["forge"]);
        // Spawn distance is far beyond melee range
        let target = select_hero_target(&left.heroes[0], &right);
        assert_eq!(target, HeroTarget::Advance(right.fortress.position));
    }

    #[test]
    fn test_hero_prefers_fortress_within_attack_distance() {
        let (mut left, right) = two_sides(&["forge"]);
        // Park the hero just outside the exclusion disc of the enemy fortress
        left.heroes[0].position = right.fortress.position.sub(crate::core::vec2::FixedVec2::new(
            to_fixed(3.5),
            0,
        ));
        let target = select_hero_target(&left.heroes[0], &right);
        assert_eq!(target, HeroTarget::EnemyFortress);
    }

    #[test]
    fn test_hero_picks_nearest_enemy_in_range() {
        let (mut left, mut right) = two_sides(&["storm", "storm"]);
        // Move two enemies into storm's range at different distances
        let me = left.heroes[0].position;
        right.heroes[0].position = me.add(FixedVec2::new(to_fixed(4.0), 0));
        right.heroes[1].position = me.add(FixedVec2::new(to_fixed(2.0), 0));

        let target = select_hero_target(&left.heroes[0], &right);
        assert_eq!(target, HeroTarget::EnemyHero(1));
    }

    #[test]
    fn test_tie_breaks_to_lowest_index() {
        let (mut left, mut right) = two_sides(&["storm", "storm"]);
        let me = left.heroes[0].position;
        // Identical distances
        right.heroes[0].position = me.add(FixedVec2::new(to_fixed(3.0), 0));
        right.heroes[1].position = me.add(FixedVec2::new(0, to_fixed(3.0)));
        left.heroes[0].position = me;

        let target = select_hero_target(&left.heroes[0], &right);
        assert_eq!(target, HeroTarget::EnemyHero(0));
    }

    #[test]
    fn test_dead_heroes_are_not_targets() {
        let (mut left, mut right) = two_sides(&["storm", "storm"]);
        let me = left.heroes[0].position;
        right.heroes[0].position = me.add(FixedVec2::new(to_fixed(1.0), 0));
        right.heroes[0].current_hp = 0;
        right.heroes[1].position = me.add(FixedVec2::new(to_fixed(2.0), 0));

        let target = select_hero_target(&left.heroes[0], &right);
        assert_eq!(target, HeroTarget::EnemyHero(1));
    }

    #[test]
    fn test_fortress_targets_closest_hero_else_fortress() {
        let (left, mut right) = two_sides(&["scout", "scout"]);

        // Both enemies in range: the closer one is picked
        right.heroes[0].position = left.fortress.position.add(FixedVec2::new(to_fixed(10.0), 0));
        right.heroes[1].position = left.fortress.position.add(FixedVec2::new(to_fixed(6.0), 0));
        assert_eq!(
            select_fortress_target(&left.fortress, &right),
            FortressTarget::Hero(1)
        );

        // Nobody in range: shell the fortress
        right.heroes[0].position = right.fortress.position;
        right.heroes[1].position = right.fortress.position;
        let far = select_fortress_target(&left.fortress, &right);
        assert_eq!(far, FortressTarget::EnemyFortress);
    }
}
