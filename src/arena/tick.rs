//! Tick Orchestrator
//!
//! One `step` = one 1/30-second simulation tick, run to completion
//! synchronously. Side update order alternates with tick parity so
//! neither player gets a structural first-mover advantage; inside a
//! tick every operation and RNG draw happens in the documented order.

use crate::arena::combat::{
    attack_interval, deal_damage_to_fortress, deal_damage_to_hero, outgoing_damage, roll_crit,
};
use crate::arena::config::ArenaConfig;
use crate::arena::events::ReplayEvent;
use crate::arena::movement::{integrate_hero, MoveIntent};
use crate::arena::projectile::{spawn_fortress_projectile, update_side_projectiles};
use crate::arena::state::{ArenaState, HeroState, SideId, WinReason, Winner};
use crate::arena::targeting::{hero_attack_range, select_fortress_target, select_hero_target, HeroTarget};
use crate::core::fixed::FIXED_ONE;
use crate::core::rng::Xorshift32;

/// Advance the battle one tick. No-op once the battle has ended.
///
/// Order per tick:
/// 1. mirror `rng_state` into the stream,
/// 2. heroes killed last tick become plain dead,
/// 3. for each side in parity order: heroes (target, attack, move,
///    clamp, exclusion) by index, then the fortress shot,
/// 4. projectiles for left, then right,
/// 5. end conditions (including timeout),
/// 6. write `rng_state` back, increment `tick`.
pub fn step(state: &mut ArenaState, config: &ArenaConfig, events: &mut Vec<ReplayEvent>) {
    if state.ended {
        return;
    }

    let tick = state.tick;
    let mut rng = Xorshift32::new(state.rng_state);

    settle_dying(state);

    let order = if tick % 2 == 0 {
        [SideId::Left, SideId::Right]
    } else {
        [SideId::Right, SideId::Left]
    };
    for side_id in order {
        update_side(state, side_id, tick, &mut rng, config, events);
    }

    {
        let (left, right) = state.split_sides(SideId::Left);
        update_side_projectiles(left, right, tick, events);
        update_side_projectiles(right, left, tick, events);
    }

    check_end_conditions(state, tick);

    state.rng_state = rng.state();
    state.tick = tick + 1;
}

/// Heroes tagged `Dying` on the previous tick become `Dead`.
fn settle_dying(state: &mut ArenaState) {
    for side_id in [SideId::Left, SideId::Right] {
        for hero in &mut state.side_mut(side_id).heroes {
            if hero.state == HeroState::Dying {
                hero.state = HeroState::Dead;
            }
        }
    }
}

/// One side's hero and fortress actions for this tick.
fn update_side(
    state: &mut ArenaState,
    side_id: SideId,
    tick: u32,
    rng: &mut Xorshift32,
    config: &ArenaConfig,
    events: &mut Vec<ReplayEvent>,
) {
    let own_fortress_pos = state.side(side_id).fortress.position;
    let enemy_fortress_pos = state.side(side_id.opposite()).fortress.position;
    let field_width = state.field_width;
    let field_height = state.field_height;

    {
        let (me, enemy) = state.split_sides(side_id);

        for index in 0..me.heroes.len() {
            if !me.heroes[index].is_live() {
                continue;
            }
            me.heroes[index].state = HeroState::Idle;

            let intent = match select_hero_target(&me.heroes[index], enemy) {
                HeroTarget::EnemyFortress => {
                    try_hero_attack(me, enemy, index, None, tick, rng, config, events);
                    // Standing at the walls; no movement while sieging
                    MoveIntent::Hold
                }
                HeroTarget::EnemyHero(enemy_index) => {
                    let enemy_pos = enemy.heroes[enemy_index].position;
                    let range = hero_attack_range(&me.heroes[index]);
                    try_hero_attack(me, enemy, index, Some(enemy_index), tick, rng, config, events);
                    MoveIntent::HoldDistanceFrom {
                        enemy: enemy_pos,
                        range,
                    }
                }
                HeroTarget::Advance(point) => MoveIntent::Toward(point),
            };

            integrate_hero(
                &mut me.heroes[index],
                intent,
                field_width,
                field_height,
                [own_fortress_pos, enemy_fortress_pos],
            );
        }
    }

    fortress_attack_step(state, side_id, tick, rng, events, config);
}

/// Cooldown-gated hero attack against the fortress (`None`) or a
/// hero slot (`Some(index)`). Draws the crit word only when the
/// attack actually happens, keeping the stream aligned between runs.
#[allow(clippy::too_many_arguments)]
fn try_hero_attack(
    me: &mut crate::arena::state::Side,
    enemy: &mut crate::arena::state::Side,
    index: usize,
    enemy_index: Option<usize>,
    tick: u32,
    rng: &mut Xorshift32,
    config: &ArenaConfig,
    events: &mut Vec<ReplayEvent>,
) {
    let (interval, stat_damage, damage_mult, crit_mult) = {
        let hero = &me.heroes[index];
        (
            attack_interval(
                hero.stats.attack_speed,
                hero.attack_speed_mult,
                &me.modifiers,
                config.tick_hz,
            ),
            hero.stats.damage,
            hero.damage_mult,
            hero.crit_chance_mult,
        )
    };

    if (tick as i32 - me.heroes[index].last_attack_tick) < interval {
        return;
    }

    let crit = roll_crit(rng, me.modifiers.crit_chance, crit_mult);
    let damage = outgoing_damage(stat_damage, damage_mult, &me.modifiers, crit);

    me.heroes[index].last_attack_tick = tick as i32;
    me.heroes[index].state = HeroState::Attacking;

    match enemy_index {
        Some(enemy_index) => deal_damage_to_hero(me, enemy, enemy_index, damage, tick, events),
        None => deal_damage_to_fortress(me, enemy, damage, tick, events),
    }
}

/// Cadence-gated fortress shot; creates a projectile.
fn fortress_attack_step(
    state: &mut ArenaState,
    side_id: SideId,
    tick: u32,
    rng: &mut Xorshift32,
    events: &mut Vec<ReplayEvent>,
    config: &ArenaConfig,
) {
    let can_fire = {
        let fortress = &state.side(side_id).fortress;
        fortress.hp > 0
            && (tick as i32 - fortress.last_attack_tick)
                >= config.fortress_attack_interval as i32
    };
    if !can_fire {
        return;
    }

    let id = state.alloc_projectile_id();
    let (me, enemy) = state.split_sides(side_id);

    let target = select_fortress_target(&me.fortress, enemy);
    let crit = roll_crit(rng, me.modifiers.crit_chance, FIXED_ONE);
    let damage = outgoing_damage(me.fortress.base_damage, FIXED_ONE, &me.modifiers, crit);

    spawn_fortress_projectile(me, enemy, target, id, damage, tick, events);
    me.fortress.last_attack_tick = tick as i32;
}

/// Termination checks, run after projectiles.
fn check_end_conditions(state: &mut ArenaState, tick: u32) {
    let left_down = state.left.fortress.hp <= 0;
    let right_down = state.right.fortress.hp <= 0;

    if left_down && right_down {
        end(state, Winner::None, WinReason::Draw);
    } else if right_down {
        end(state, Winner::Left, WinReason::FortressDestroyed);
    } else if left_down {
        end(state, Winner::Right, WinReason::FortressDestroyed);
    } else if tick + 1 >= state.max_ticks {
        resolve_timeout(state);
    }
}

/// Timeout: the higher HP fraction wins. Compared with exact i64
/// cross-multiplication, which orders identically to the real-valued
/// fractions without touching floats.
fn resolve_timeout(state: &mut ArenaState) {
    let left = state.left.fortress.hp as i64 * state.right.fortress.max_hp as i64;
    let right = state.right.fortress.hp as i64 * state.left.fortress.max_hp as i64;

    match left.cmp(&right) {
        std::cmp::Ordering::Greater => end(state, Winner::Left, WinReason::Timeout),
        std::cmp::Ordering::Less => end(state, Winner::Right, WinReason::Timeout),
        std::cmp::Ordering::Equal => end(state, Winner::None, WinReason::Draw),
    }
}

fn end(state: &mut ArenaState, winner: Winner, reason: WinReason) {
    state.winner = winner;
    state.win_reason = reason;
    state.ended = true;
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::build::{build_side, BuildSpec};
    use crate::data::FortressClass;

    fn make_state(left: &BuildSpec, right: &BuildSpec, seed: u32) -> ArenaState {
        let config = ArenaConfig::default();
        ArenaState {
            tick: 0,
            max_ticks: config.max_ticks,
            rng_state: seed,
            left: build_side(left, SideId::Left, &config),
            right: build_side(right, SideId::Right, &config),
            winner: Winner::None,
            win_reason: WinReason::None,
            ended: false,
            next_projectile_id: 0,
            field_width: config.field_width,
            field_height: config.field_height,
        }
    }

    fn mid_build(owner: u64) -> BuildSpec {
        BuildSpec::new(owner, "mid", FortressClass::Fire, 30, &["storm", "forge"])
    }

    #[test]
    fn test_step_is_deterministic() {
        let config = ArenaConfig::default();
        let mut a = make_state(&mid_build(1), &mid_build(2), 12345);
        let mut b = make_state(&mid_build(1), &mid_build(2), 12345);
        let mut events_a = Vec::new();
        let mut events_b = Vec::new();

        for _ in 0..300 {
            step(&mut a, &config, &mut events_a);
            step(&mut b, &config, &mut events_b);
        }

        assert_eq!(a, b);
        assert_eq!(events_a, events_b);
        assert_eq!(a.tick_hash(), b.tick_hash());
    }

    #[test]
    fn test_tick_advances_and_rng_moves() {
        let config = ArenaConfig::default();
        let mut state = make_state(&mid_build(1), &mid_build(2), 777);
        let mut events = Vec::new();

        let seed_before = state.rng_state;
        step(&mut state, &config, &mut events);
        assert_eq!(state.tick, 1);
        // Fortress crit rolls consume words on tick 0
        assert_ne!(state.rng_state, seed_before);
    }

    #[test]
    fn test_ended_state_is_frozen() {
        let config = ArenaConfig::default();
        let mut state = make_state(&mid_build(1), &mid_build(2), 42);
        let mut events = Vec::new();

        state.right.fortress.hp = 1;
        loop {
            step(&mut state, &config, &mut events);
            if state.ended {
                break;
            }
            assert!(state.tick < config.max_ticks + 1, "battle failed to end");
        }

        let snapshot = state.clone();
        let events_len = events.len();
        for _ in 0..10 {
            step(&mut state, &config, &mut events);
        }
        assert_eq!(state, snapshot);
        assert_eq!(events.len(), events_len);
    }

    #[test]
    fn test_simultaneous_destruction_is_draw() {
        let mut state = make_state(&mid_build(1), &mid_build(2), 9);
        state.left.fortress.hp = 0;
        state.right.fortress.hp = 0;

        check_end_conditions(&mut state, 100);
        assert!(state.ended);
        assert_eq!(state.winner, Winner::None);
        assert_eq!(state.win_reason, WinReason::Draw);
    }

    #[test]
    fn test_single_destruction_names_winner() {
        let mut state = make_state(&mid_build(1), &mid_build(2), 9);
        state.right.fortress.hp = 0;

        check_end_conditions(&mut state, 100);
        assert!(state.ended);
        assert_eq!(state.winner, Winner::Left);
        assert_eq!(state.win_reason, WinReason::FortressDestroyed);
    }

    #[test]
    fn test_timeout_prefers_higher_hp_fraction() {
        let mut state = make_state(&mid_build(1), &mid_build(2), 9);
        state.max_ticks = 101;
        state.left.fortress.hp = state.left.fortress.max_hp / 2;
        state.right.fortress.hp = state.right.fortress.max_hp / 4;

        check_end_conditions(&mut state, 100);
        assert!(state.ended);
        assert_eq!(state.winner, Winner::Left);
        assert_eq!(state.win_reason, WinReason::Timeout);
    }

    #[test]
    fn test_timeout_exact_tie_is_draw() {
        let mut state = make_state(&mid_build(1), &mid_build(2), 9);
        state.max_ticks = 101;

        check_end_conditions(&mut state, 100);
        assert!(state.ended);
        assert_eq!(state.winner, Winner::None);
        assert_eq!(state.win_reason, WinReason::Draw);
    }

    #[test]
    fn test_dying_settles_to_dead_next_tick() {
        let config = ArenaConfig::default();
        let mut state = make_state(&mid_build(1), &mid_build(2), 5);
        state.right.heroes[0].current_hp = 0;
        state.right.heroes[0].state = HeroState::Dying;

        let mut events = Vec::new();
        step(&mut state, &config, &mut events);
        assert_eq!(state.right.heroes[0].state, HeroState::Dead);
    }
}
