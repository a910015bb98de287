//! Fortress Arena Demo Driver
//!
//! Runs one sample 1v1 battle and one 5v5 guild battle, logs the
//! outcomes, and prints the 1v1 result as JSON. Useful for eyeballing
//! balance changes and for generating fixture results.

use anyhow::Context;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use fortress_arena::arena::run_battle;
use fortress_arena::core::rng::derive_battle_seed;
use fortress_arena::data::FortressClass;
use fortress_arena::guild::{run_guild_battle, GuildHeroSpec};
use fortress_arena::{ArenaConfig, BattleClaim, BuildSpec, TICK_RATE, VERSION};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    info!("Fortress Arena core v{}", VERSION);
    info!("Tick rate: {} Hz", TICK_RATE);

    demo_battle()?;
    demo_guild_battle()?;

    Ok(())
}

/// Run one 1v1 battle, verify our own claim, print the result.
fn demo_battle() -> anyhow::Result<()> {
    info!("=== 1v1 arena demo ===");

    let left = BuildSpec::new(
        1001,
        "challenger",
        FortressClass::Fire,
        42,
        &["storm", "forge", "titan"],
    );
    let right = BuildSpec::new(
        2002,
        "defender",
        FortressClass::Void,
        40,
        &["vanguard", "ember", "warden"],
    );

    let match_id = *b"demo-match-0001!";
    let seed = derive_battle_seed(&match_id, &[left.owner_id, right.owner_id]);
    info!("Derived seed: {seed}");

    let config = ArenaConfig::default();
    let result = run_battle(seed, left.clone(), right.clone(), config.clone())?;

    info!(
        "Winner: {:?} ({:?}) after {} ticks ({:.1}s)",
        result.winner,
        result.win_reason,
        result.duration_ticks,
        result.duration_ticks as f32 / TICK_RATE as f32,
    );
    info!(
        "Left:  {} hp, {} dmg dealt, {} heroes alive",
        result.left.final_hp, result.left.total_damage, result.left.heroes_alive
    );
    info!(
        "Right: {} hp, {} dmg dealt, {} heroes alive",
        result.right.final_hp, result.right.total_damage, result.right.heroes_alive
    );
    info!("Replay events: {}", result.events.len());
    info!("Chain hash: {:#010x}", result.chain_hash);

    // The server-side round trip on our own claim
    let claim = BattleClaim::from_result(&result);
    fortress_arena::verify_claim(seed, left, right, config, &claim)
        .context("self-verification failed")?;
    info!("Claim verified against a fresh re-run");

    println!("{}", result.to_json()?);
    Ok(())
}

/// Run one 5v5 guild battle and log the highlights.
fn demo_guild_battle() -> anyhow::Result<()> {
    info!("=== 5v5 guild arena demo ===");

    let roster = |owner_base: u64, power: i32| -> Vec<GuildHeroSpec> {
        ["storm", "forge", "titan", "vanguard", "scout"]
            .iter()
            .enumerate()
            .map(|(i, id)| GuildHeroSpec {
                owner_id: owner_base + i as u64,
                hero_id: id.to_string(),
                tier: 1 + (i % 3) as u8,
                power: power + 100 * i as i32,
            })
            .collect()
    };

    let result = run_guild_battle(987654321, roster(100, 1200), roster(200, 1100))?;

    info!(
        "Winner: {:?} after {} ticks; survivors {:?}",
        result.winner, result.duration_ticks, result.survivors
    );
    info!("Kills: {}", result.kill_log.len());
    if let Some(mvp) = &result.mvp {
        info!(
            "MVP: {} (owner {}) with {} damage",
            mvp.hero_id, mvp.owner_id, mvp.damage_dealt
        );
    }
    info!("Chain hash: {:#010x}", result.chain_hash);

    Ok(())
}
