//! Movement & Physics
//!
//! Velocity shaping, friction, speed clamp, field clamp, and the
//! fortress exclusion rule. One hero integrates at a time; the order
//! is fixed by the orchestrator.

use crate::arena::state::{HeroInstance, HeroState};
use crate::core::fixed::{
    fixed_div, fixed_mul, Fixed, EPSILON_SQ, FORTRESS_EXCLUSION_RADIUS,
    FORTRESS_EXCLUSION_RADIUS_SQ, FRICTION, HERO_MAX_SPEED,
    HERO_PREFERRED_COMBAT_DISTANCE_RATIO,
};
use crate::core::vec2::FixedVec2;

/// Movement decision for one hero this tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveIntent {
    /// Stand still (attacking a fortress, or nothing to do)
    Hold,
    /// Head straight for a point
    Toward(FixedVec2),
    /// Fight a hero at `enemy`, holding the preferred combat distance
    /// for an attack range of `range`
    HoldDistanceFrom {
        /// Enemy hero position
        enemy: FixedVec2,
        /// Attacker's effective range
        range: Fixed,
    },
}

/// Where to walk when engaging a hero target.
///
/// Inside the preferred distance the goal point is pushed back out
/// along the away-from-enemy direction, which keeps models from
/// stacking on top of each other; outside it the goal is the enemy.
fn combat_goal(hero_pos: FixedVec2, enemy: FixedVec2, range: Fixed) -> FixedVec2 {
    let preferred = fixed_mul(range, HERO_PREFERRED_COMBAT_DISTANCE_RATIO);
    let preferred_sq = fixed_mul(preferred, preferred);
    let dist_sq = hero_pos.distance_squared(enemy);
    if dist_sq < preferred_sq {
        let away = hero_pos.sub(enemy).normalize();
        enemy.add(away.scale(preferred))
    } else {
        enemy
    }
}

/// Integrate one hero: shape velocity from the intent, apply friction
/// and the speed clamp, step the position, clamp to the field, then
/// enforce the exclusion rule against both fortresses.
pub fn integrate_hero(
    hero: &mut HeroInstance,
    intent: MoveIntent,
    field_width: Fixed,
    field_height: Fixed,
    fortress_positions: [FixedVec2; 2],
) {
    let goal = match intent {
        MoveIntent::Hold => None,
        MoveIntent::Toward(point) => Some(point),
        MoveIntent::HoldDistanceFrom { enemy, range } => {
            Some(combat_goal(hero.position, enemy, range))
        }
    };

    let mut velocity = match goal {
        None => FixedVec2::ZERO,
        Some(point) => {
            let delta = point.sub(hero.position);
            if delta.length_squared() <= EPSILON_SQ {
                // Coincident with the goal: no direction to derive
                FixedVec2::ZERO
            } else {
                delta.normalize().scale(hero.stats.move_speed)
            }
        }
    };

    velocity = velocity.scale(FRICTION);
    velocity = clamp_speed(velocity, HERO_MAX_SPEED);

    hero.velocity = velocity;
    hero.position = hero.position.add(velocity);
    hero.position = hero.position.clamp_to_field(field_width, field_height);

    for fortress_pos in fortress_positions {
        enforce_exclusion(hero, fortress_pos);
    }

    if hero.state != HeroState::Attacking {
        hero.state = if hero.velocity == FixedVec2::ZERO {
            HeroState::Idle
        } else {
            HeroState::Moving
        };
    }
}

/// Clamp a velocity's magnitude.
fn clamp_speed(velocity: FixedVec2, max_speed: Fixed) -> FixedVec2 {
    let max_sq = fixed_mul(max_speed, max_speed);
    let len_sq = velocity.length_squared();
    if len_sq <= max_sq {
        return velocity;
    }
    let len = velocity.length();
    velocity.scale(fixed_div(max_speed, len))
}

/// Push a hero out of a fortress's exclusion disc.
///
/// Inside the disc at a meaningfully positive distance the hero is
/// teleported radially to the boundary with velocity zeroed. At or
/// below EPSILON_SQ the centre is ambiguous (no stable radial
/// direction from a near-zero vector), so the hero is left in place;
/// the next tick's movement separates the two and the rule fires
/// then.
fn enforce_exclusion(hero: &mut HeroInstance, fortress_pos: FixedVec2) {
    let dist_sq = hero.position.distance_squared(fortress_pos);
    if dist_sq >= FORTRESS_EXCLUSION_RADIUS_SQ || dist_sq <= EPSILON_SQ {
        return;
    }
    let outward = hero.position.sub(fortress_pos).normalize();
    hero.position = fortress_pos.add(outward.scale(FORTRESS_EXCLUSION_RADIUS));
    hero.velocity = FixedVec2::ZERO;
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

    fn test_hero() -> HeroInstance {
        let config = ArenaConfig::default();
        let spec = BuildSpec::new(1, "m", FortressClass::Ice, 50, &["scout"]);
        build_side(&spec, SideId::Left, &config).heroes.remove(0)
    }

    // In-field positions well away from every test hero; squared
    // distances stay inside Q16.16 range.
    fn far_fortresses() -> [FixedVec2; 2] {
        [FixedVec2::from_ints(40, 14), FixedVec2::from_ints(45, 0)]
    }

    #[test]
    fn test_toward_moves_and_tags_moving() {
        let mut hero = test_hero();
        let start = hero.position;
        let goal = start.add(FixedVec2::from_ints(10, 0));

        integrate_hero(
            &mut hero,
            MoveIntent::Toward(goal),
            to_fixed(50.0),
            to_fixed(15.0),
            far_fortresses(),
        );

        assert!(hero.position.x > start.x);
        assert_eq!(hero.position.y, start.y);
        assert_eq!(hero.state, HeroState::Moving);
    }

    #[test]
    fn test_hold_zeroes_velocity() {
        let mut hero = test_hero();
        let start = hero.position;

        integrate_hero(
            &mut hero,
            MoveIntent::Hold,
            to_fixed(50.0),
            to_fixed(15.0),
            far_fortresses(),
        );

        assert_eq!(hero.position, start);
        assert_eq!(hero.velocity, FixedVec2::ZERO);
        assert_eq!(hero.state, HeroState::Idle);
    }

    #[test]
    fn test_coincident_goal_zeroes_velocity() {
        let mut hero = test_hero();
        let start = hero.position;

        integrate_hero(
            &mut hero,
            MoveIntent::Toward(start),
            to_fixed(50.0),
            to_fixed(15.0),
            far_fortresses(),
        );

        assert_eq!(hero.position, start);
        assert_eq!(hero.velocity, FixedVec2::ZERO);
    }

    #[test]
    fn test_speed_never_exceeds_cap() {
        let mut hero = test_hero();
        // Absurd base speed; the clamp has to catch it
        hero.stats.move_speed = to_fixed(50.0);

        let target = hero.position.add(FixedVec2::from_ints(30, 0));
        integrate_hero(
            &mut hero,
            MoveIntent::Toward(target),
            to_fixed(50.0),
            to_fixed(15.0),
            far_fortresses(),
        );

        let max_sq = fixed_mul(HERO_MAX_SPEED, HERO_MAX_SPEED);
        // Allow the one-bit truncation slack of fixed normalize/scale
        assert!(hero.velocity.length_squared() <= max_sq + 16);
    }

    #[test]
    fn test_position_clamped_to_field() {
        let mut hero = test_hero();
        hero.position = FixedVec2::new(to_fixed(0.01), to_fixed(0.01));

        integrate_hero(
            &mut hero,
            MoveIntent::Toward(FixedVec2::new(-to_fixed(10.0), -to_fixed(10.0))),
            to_fixed(50.0),
            to_fixed(15.0),
            far_fortresses(),
        );

        assert!(hero.position.x >= 0);
        assert!(hero.position.y >= 0);
    }

    #[test]
    fn test_exclusion_pushes_to_boundary() {
        let mut hero = test_hero();
        let fortress = FixedVec2::from_ints(20, 7);
        // One step away from the fortress centre, walking into it
        hero.position = fortress.add(FixedVec2::new(to_fixed(0.5), 0));

        integrate_hero(
            &mut hero,
            MoveIntent::Toward(fortress),
            to_fixed(50.0),
            to_fixed(15.0),
            [fortress, FixedVec2::from_ints(45, 0)],
        );

        let dist_sq = hero.position.distance_squared(fortress);
        // On or just outside the boundary, never inside
        assert!(dist_sq >= FORTRESS_EXCLUSION_RADIUS_SQ - 64);
        assert_eq!(hero.velocity, FixedVec2::ZERO);
    }

    #[test]
    fn test_exclusion_leaves_coincident_hero() {
        let mut hero = test_hero();
        let fortress = FixedVec2::from_ints(20, 7);
        hero.position = fortress;

        integrate_hero(
            &mut hero,
            MoveIntent::Hold,
            to_fixed(50.0),
            to_fixed(15.0),
            [fortress, FixedVec2::from_ints(45, 0)],
        );

        // Coincident centre: left in place rather than teleported in
        // an arbitrary direction
        assert_eq!(hero.position, fortress);
    }

    #[test]
    fn test_combat_goal_holds_distance() {
        let hero_pos = FixedVec2::from_ints(10, 7);
        let enemy = FixedVec2::from_ints(11, 7);
        let range = to_fixed(5.0);

        // 1.0 apart with preferred 4.0: goal retreats
        let goal = combat_goal(hero_pos, enemy, range);
        assert!(goal.x < hero_pos.x);

        // 6.0 apart: goal is the enemy itself
        let far_pos = FixedVec2::from_ints(5, 7);
        assert_eq!(combat_goal(far_pos, enemy, range), enemy);
    }

    #[test]
    fn test_integration_is_deterministic() {
        let run = || {
            let mut hero = test_hero();
            let goal = hero.position.add(FixedVec2::from_ints(15, 2));
            for _ in 0..200 {
                integrate_hero(
                    &mut hero,
                    MoveIntent::Toward(goal),
                    to_fixed(50.0),
                    to_fixed(15.0),
                    far_fortresses(),
                );
            }
            hero.position
        };
        assert_eq!(run(), run());
    }
}
