//! Combat Resolver
//!
//! Attack cadence, crit rolls, the damage formula, the arena damage
//! scalar, and armor mitigation. Damage application is the single
//! place HP, side statistics, and the replay log change together, so
//! the order of those writes is identical on both ends.

use crate::arena::events::ReplayEvent;
use crate::arena::state::{HeroState, ModifierSet, Side};
use crate::core::fixed::{
    fixed_div, fixed_mul, fixed_scale_int, fixed_to_int, int_to_fixed, Fixed, FIXED_ONE,
};
use crate::core::rng::Xorshift32;
use crate::core::vec2::FixedVec2;

/// Armor is capped before mitigation.
pub const MAX_ARMOR_CAP: i32 = 60;

/// Arena damage scalar 0.45, held as an exact rational so
/// `floor(raw * 0.45)` comes out exact rather than one low on
/// multiples of 20.
const ARENA_DAMAGE_SCALAR_NUM: i32 = 45;
const ARENA_DAMAGE_SCALAR_DEN: i32 = 100;

/// Ticks between attacks for an effective attack speed.
///
/// `max(1, floor(tick_hz / effective_speed))` where
/// `effective_speed = attack_speed * arena_mult * (1 + bonus)`.
/// A degenerate non-positive speed pins the interval to one full
/// second so the attacker still acts rather than dividing by zero.
pub fn attack_interval(
    attack_speed: Fixed,
    arena_mult: Fixed,
    modifiers: &ModifierSet,
    tick_hz: u32,
) -> i32 {
    let effective = fixed_mul(
        fixed_mul(attack_speed, arena_mult),
        FIXED_ONE + modifiers.attack_speed_bonus,
    );
    if effective <= 0 {
        return tick_hz.max(1) as i32;
    }
    let interval = fixed_to_int(fixed_div(int_to_fixed(tick_hz as i32), effective));
    interval.max(1)
}

/// Roll a crit from the tick's stream.
///
/// Draws exactly one word. `u < chance` with `u` uniform in [0, 1).
pub fn roll_crit(rng: &mut Xorshift32, crit_chance: Fixed, arena_mult: Fixed) -> bool {
    let chance = fixed_mul(crit_chance, arena_mult);
    rng.next_fixed_unit() < chance
}

/// Damage leaving an attacker, before the target's armor:
/// 1. base = floor(stat_damage * (1 + damage_bonus))
/// 2. raw  = floor(base * arena_damage_mult [* (1 + crit_damage_bonus)])
/// 3. out  = max(1, floor(raw * ARENA_DAMAGE_SCALAR))
pub fn outgoing_damage(
    stat_damage: Fixed,
    arena_damage_mult: Fixed,
    modifiers: &ModifierSet,
    crit: bool,
) -> i32 {
    let base = fixed_to_int(fixed_mul(stat_damage, FIXED_ONE + modifiers.damage_bonus));

    let mut raw = fixed_scale_int(base, arena_damage_mult);
    if crit {
        raw = fixed_scale_int(raw, FIXED_ONE + modifiers.crit_damage_bonus);
    }

    (raw * ARENA_DAMAGE_SCALAR_NUM / ARENA_DAMAGE_SCALAR_DEN).max(1)
}

/// Armor mitigation on receipt: `max(1, floor(d * 100 / (100 + A)))`
/// with `A` capped at [`MAX_ARMOR_CAP`].
pub fn apply_armor(damage: i32, armor: i32) -> i32 {
    let a = armor.min(MAX_ARMOR_CAP).max(0);
    (damage * 100 / (100 + a)).max(1)
}

/// Deliver damage to a hero slot on the defending side.
///
/// Applies mitigation, clamps HP at zero, updates both sides'
/// statistics, emits the `damage` event, and on the transition from
/// positive HP emits `hero_death` and tags the hero `Dying`.
pub fn deal_damage_to_hero(
    attacker: &mut Side,
    defender: &mut Side,
    hero_index: usize,
    damage: i32,
    tick: u32,
    events: &mut Vec<ReplayEvent>,
) {
    let (delivered, remaining, died, hero_id) = {
        let hero = &mut defender.heroes[hero_index];
        let was_alive = hero.current_hp > 0;
        let delivered = apply_armor(damage, hero.armor);

        hero.current_hp = (hero.current_hp - delivered).max(0);
        let remaining = hero.current_hp;
        let died = was_alive && remaining == 0;
        if died {
            hero.state = HeroState::Dying;
            hero.velocity = FixedVec2::ZERO;
        }
        (delivered, remaining, died, hero.hero_id.clone())
    };

    attacker.stats.damage_dealt += delivered;
    defender.stats.damage_received += delivered;

    events.push(ReplayEvent::damage(
        tick,
        defender.id,
        &hero_id,
        hero_index,
        delivered,
        remaining,
    ));

    if died {
        attacker.stats.heroes_killed += 1;
        defender.stats.heroes_lost += 1;
        events.push(ReplayEvent::hero_death(
            tick,
            defender.id,
            &hero_id,
            hero_index,
            delivered,
        ));
    }
}

/// Deliver damage to the defending fortress.
///
/// Same mitigation and bookkeeping as hero damage; the end-condition
/// check in the orchestrator reads the resulting HP.
pub fn deal_damage_to_fortress(
    attacker: &mut Side,
    defender: &mut Side,
    damage: i32,
    tick: u32,
    events: &mut Vec<ReplayEvent>,
) {
    let delivered = apply_armor(damage, defender.fortress.armor);

    defender.fortress.hp = (defender.fortress.hp - delivered).max(0);

    attacker.stats.damage_dealt += delivered;
    defender.stats.damage_received += delivered;

    events.push(ReplayEvent::fortress_damage(
        tick,
        defender.id,
        delivered,
        defender.fortress.hp,
    ));
}

// =============================================================================
// TESTS
// =============================================================================
