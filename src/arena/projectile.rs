//! Projectile Engine
//!
//! Deterministic ray-march of fortress shots. Projectiles update
//! after hero movement, so each step tests against the target's
//! current-tick position with a clamped ray-to-circle intersection -
//! a target cannot slip through a shot by crossing its path between
//! two sample points.

use crate::arena::combat::{deal_damage_to_fortress, deal_damage_to_hero};
use crate::arena::events::ReplayEvent;
use crate::arena::state::{Projectile, ProjectileSource, Side, TargetKind, TargetRef};
use crate::arena::targeting::FortressTarget;
use crate::core::fixed::{
    fixed_clamp, fixed_div, fixed_mul, Fixed, EPSILON_SQ, FIXED_ONE, FORTRESS_HIT_RADIUS,
    HERO_HIT_RADIUS_PAD, PROJECTILE_LAST_POSITION_HIT_RADIUS, PROJECTILE_SPEED,
};
use crate::core::vec2::FixedVec2;

/// Segment-vs-circle test with the ray parameter clamped to [0, 1].
pub fn ray_circle_hit(from: FixedVec2, to: FixedVec2, center: FixedVec2, radius: Fixed) -> bool {
    let radius_sq = fixed_mul(radius, radius);
    let d = to.sub(from);
    let len_sq = d.length_squared();
    if len_sq <= EPSILON_SQ {
        return from.distance_squared(center) <= radius_sq;
    }
    let t = fixed_clamp(fixed_div(center.sub(from).dot(d), len_sq), 0, FIXED_ONE);
    let closest = from.add(d.scale(t));
    closest.distance_squared(center) <= radius_sq
}

/// Spawn a fortress shot bound to `target` and record the event.
pub fn spawn_fortress_projectile(
    owner: &mut Side,
    enemy: &Side,
    target: FortressTarget,
    id: u32,
    damage: i32,
    tick: u32,
    events: &mut Vec<ReplayEvent>,
) {
    let (target_ref, target_pos) = match target {
        FortressTarget::Hero(index) => (
            TargetRef {
                kind: TargetKind::Hero,
                hero_index: Some(index),
                side: enemy.id,
            },
            enemy.heroes[index].position,
        ),
        FortressTarget::EnemyFortress => (
            TargetRef {
                kind: TargetKind::Fortress,
                hero_index: None,
                side: enemy.id,
            },
            enemy.fortress.position,
        ),
    };

    let start = owner.fortress.position;
    owner.projectiles.push(Projectile {
        id,
        kind: owner.fortress.class.projectile_kind(),
        source: ProjectileSource::Fortress,
        damage,
        position: start,
        speed: PROJECTILE_SPEED,
        spawn_tick: tick,
        target: target_ref,
    });

    events.push(ReplayEvent::projectile_spawn(
        tick, owner.id, start, target_pos, damage,
    ));
}

/// What a single projectile step decided.
enum StepOutcome {
    /// Intersected the target's hit circle
    Hit,
    /// Bound target is gone and this step missed; drop the shot
    Expired,
    /// Still in flight at this position
    Moved(FixedVec2),
}

/// March one projectile against the current enemy state.
fn step_projectile(projectile: &Projectile, enemy: &Side) -> StepOutcome {
    // Resolve the bound target to a position and hit radius. A dead
    // hero still anchors the shot at its last position, with the
    // tiny radius, for exactly one more step.
    let (target_pos, hit_radius, target_gone) = match projectile.target.kind {
        TargetKind::Hero => {
            let Some(index) = projectile.target.hero_index else {
                return StepOutcome::Expired;
            };
            let Some(hero) = enemy.heroes.get(index) else {
                return StepOutcome::Expired;
            };
            if hero.is_live() {
                (hero.position, hero.radius + HERO_HIT_RADIUS_PAD, false)
            } else {
                (hero.position, PROJECTILE_LAST_POSITION_HIT_RADIUS, true)
            }
        }
        TargetKind::Fortress => (enemy.fortress.position, FORTRESS_HIT_RADIUS, false),
    };

    let delta = target_pos.sub(projectile.position);
    if delta.length_squared() <= EPSILON_SQ {
        // Already on top of the target
        return StepOutcome::Hit;
    }

    let next = projectile
        .position
        .add(delta.normalize().scale(projectile.speed));

    if ray_circle_hit(projectile.position, next, target_pos, hit_radius) {
        StepOutcome::Hit
    } else if target_gone {
        StepOutcome::Expired
    } else {
        StepOutcome::Moved(next)
    }
}

/// Update every in-flight projectile owned by `owner`.
///
/// Hits apply damage through the combat resolver's mitigation step;
/// hits and expiries swap-remove the shot, and the swapped-in
/// projectile is processed in the freed slot so each shot steps
/// exactly once per tick.
pub fn update_side_projectiles(
    owner: &mut Side,
    enemy: &mut Side,
    tick: u32,
    events: &mut Vec<ReplayEvent>,
) {
    let mut i = 0;
    while i < owner.projectiles.len() {
        let projectile = owner.projectiles[i].clone();
        match step_projectile(&projectile, enemy) {
            StepOutcome::Hit => {
                match projectile.target.kind {
                    TargetKind::Hero => {
                        if let Some(index) = projectile.target.hero_index {
                            deal_damage_to_hero(
                                owner,
                                enemy,
                                index,
                                projectile.damage,
                                tick,
                                events,
                            );
                        }
                    }
                    TargetKind::Fortress => {
                        deal_damage_to_fortress(owner, enemy, projectile.damage, tick, events);
                    }
                }
                owner.projectiles.swap_remove(i);
            }
            StepOutcome::Expired => {
                owner.projectiles.swap_remove(i);
            }
            StepOutcome::Moved(position) => {
                owner.projectiles[i].position = position;
                i += 1;
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
