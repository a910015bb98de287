//! Guild Battle Tick Loop
//!
//! Side order alternates with tick parity; within a team heroes act
//! by roster index. Draw order per attacker: target reselection (if
//! the slot is empty or its hero died), then damage variance, then
//! the crit roll. Attacks that never happen draw nothing.

use super::result::{GuildKeyMoment, GuildKill};
use super::{
    GuildBattleState, GuildHero, GuildWinner, TeamId, GUILD_ATTACK_RANGE_SQ, GUILD_CRIT_CHANCE,
    GUILD_CRIT_MULTIPLIER, GUILD_FIELD_HEIGHT, GUILD_FIELD_WIDTH, GUILD_KEY_MOMENT_CRIT_CAP,
    GUILD_VARIANCE_BASE, GUILD_VARIANCE_SPAN,
};
use crate::core::fixed::{
    fixed_div, fixed_mul, fixed_scale_int, fixed_to_int, int_to_fixed, EPSILON_SQ, FRICTION,
    HERO_MAX_SPEED,
};
use crate::core::rng::Xorshift32;
use crate::core::vec2::FixedVec2;

/// Guild battles run at the same 30 Hz cadence base as the arena.
const GUILD_TICK_HZ: i32 = 30;

/// Advance one tick.
pub(super) fn step(
    state: &mut GuildBattleState,
    kills: &mut Vec<GuildKill>,
    moments: &mut Vec<GuildKeyMoment>,
    crit_moments: &mut usize,
) {
    let tick = state.tick;
    let mut rng = Xorshift32::new(state.rng_state);

    let order = if tick % 2 == 0 {
        [TeamId::A, TeamId::B]
    } else {
        [TeamId::B, TeamId::A]
    };
    for team in order {
        update_team(state, team, tick, &mut rng, kills, moments, crit_moments);
    }

    check_end_conditions(state, tick, moments);

    state.rng_state = rng.state();
    state.tick = tick + 1;
}

fn update_team(
    state: &mut GuildBattleState,
    team: TeamId,
    tick: u32,
    rng: &mut Xorshift32,
    kills: &mut Vec<GuildKill>,
    moments: &mut Vec<GuildKeyMoment>,
    crit_moments: &mut usize,
) {
    let (head, tail) = state.teams.split_at_mut(1);
    let (me, enemy) = match team {
        TeamId::A => (&mut head[0], &mut tail[0]),
        TeamId::B => (&mut tail[0], &mut head[0]),
    };

    for index in 0..me.len() {
        if !me[index].is_live() {
            continue;
        }

        // Reselect when the slot is empty or its hero died.
        let needs_target = match me[index].target_index {
            None => true,
            Some(target) => !enemy[target].is_live(),
        };
        if needs_target {
            let live: Vec<usize> = enemy
                .iter()
                .enumerate()
                .filter(|(_, h)| h.is_live())
                .map(|(i, _)| i)
                .collect();
            if live.is_empty() {
                // Nothing left to fight; the end check resolves this tick
                break;
            }
            let pick = rng.next_index(live.len() as u32);
            me[index].target_index = Some(live[pick]);
        }

        let target = me[index].target_index.expect("assigned above");
        let target_pos = enemy[target].position;
        let dist_sq = me[index].position.distance_squared(target_pos);

        if dist_sq <= GUILD_ATTACK_RANGE_SQ {
            me[index].velocity = FixedVec2::ZERO;
            try_attack(me, enemy, index, target, team, tick, rng, kills, moments, crit_moments);
        } else {
            advance(&mut me[index], target_pos);
        }
    }
}

/// Cooldown-gated swing with variance and crit draws.
#[allow(clippy::too_many_arguments)]
fn try_attack(
    me: &mut [GuildHero],
    enemy: &mut [GuildHero],
    index: usize,
    target: usize,
    team: TeamId,
    tick: u32,
    rng: &mut Xorshift32,
    kills: &mut Vec<GuildKill>,
    moments: &mut Vec<GuildKeyMoment>,
    crit_moments: &mut usize,
) {
    let interval = attack_interval(me[index].stats.attack_speed);
    if (tick as i32 - me[index].last_attack_tick) < interval {
        return;
    }

    // Variance first, then crit - fixed draw order
    let variance = GUILD_VARIANCE_BASE + fixed_mul(GUILD_VARIANCE_SPAN, rng.next_fixed_unit());
    let crit = rng.next_fixed_unit() < GUILD_CRIT_CHANCE;

    let base = fixed_to_int(me[index].stats.damage);
    let mut damage = fixed_scale_int(base, variance);
    if crit {
        damage = fixed_scale_int(damage, GUILD_CRIT_MULTIPLIER);
    }
    let damage = damage.max(1);

    me[index].last_attack_tick = tick as i32;
    me[index].damage_dealt += damage;

    if crit && *crit_moments < GUILD_KEY_MOMENT_CRIT_CAP {
        *crit_moments += 1;
        moments.push(GuildKeyMoment::Crit {
            tick,
            team,
            attacker_index: index,
            damage,
        });
    }

    let victim = &mut enemy[target];
    let was_alive = victim.is_live();
    victim.current_hp = (victim.current_hp - damage).max(0);

    if was_alive && victim.current_hp == 0 {
        kills.push(GuildKill {
            tick,
            killer_team: team,
            killer_index: index,
            killer_owner_id: me[index].owner_id,
            victim_index: target,
            victim_owner_id: enemy[target].owner_id,
        });
        moments.push(GuildKeyMoment::Kill {
            tick,
            killer_team: team,
            killer_index: index,
            victim_index: target,
        });
    }
}

/// Walk toward the target with the shared integration discipline:
/// unit direction, base speed, friction, speed cap, field clamp.
fn advance(hero: &mut GuildHero, target_pos: FixedVec2) {
    let delta = target_pos.sub(hero.position);
    let mut velocity = if delta.length_squared() <= EPSILON_SQ {
        FixedVec2::ZERO
    } else {
        delta.normalize().scale(hero.stats.move_speed)
    };
    velocity = velocity.scale(FRICTION);

    let max_sq = fixed_mul(HERO_MAX_SPEED, HERO_MAX_SPEED);
    if velocity.length_squared() > max_sq {
        let len = velocity.length();
        velocity = velocity.scale(fixed_div(HERO_MAX_SPEED, len));
    }

    hero.velocity = velocity;
    hero.position = hero
        .position
        .add(velocity)
        .clamp_to_field(GUILD_FIELD_WIDTH, GUILD_FIELD_HEIGHT);
}

fn attack_interval(attack_speed: crate::core::fixed::Fixed) -> i32 {
    if attack_speed <= 0 {
        return GUILD_TICK_HZ;
    }
    fixed_to_int(fixed_div(int_to_fixed(GUILD_TICK_HZ), attack_speed)).max(1)
}

/// Elimination first, then the 1800-tick timeout with an aggregate
/// remaining-HP comparison; an exact tie is a draw.
fn check_end_conditions(state: &mut GuildBattleState, tick: u32, moments: &mut Vec<GuildKeyMoment>) {
    let a_live = state.live_count(TeamId::A);
    let b_live = state.live_count(TeamId::B);

    let winner = if a_live == 0 && b_live == 0 {
        Some(GuildWinner::Draw)
    } else if b_live == 0 {
        Some(GuildWinner::TeamA)
    } else if a_live == 0 {
        Some(GuildWinner::TeamB)
    } else if tick + 1 >= state.max_ticks {
        let a_hp = state.remaining_hp(TeamId::A);
        let b_hp = state.remaining_hp(TeamId::B);
        Some(match a_hp.cmp(&b_hp) {
            std::cmp::Ordering::Greater => GuildWinner::TeamA,
            std::cmp::Ordering::Less => GuildWinner::TeamB,
            std::cmp::Ordering::Equal => GuildWinner::Draw,
        })
    } else {
        None
    };

    if let Some(winner) = winner {
        state.winner = winner;
        state.ended = true;
        moments.push(GuildKeyMoment::BattleEnd {
            tick: tick + 1,
            winner,
        });
    }
}

// =============================================================================
// TESTS
// =============================================================================
