//! Plays either game headlessly with a built-in strategy, credits any reward
//! to the local wallet and syncs it with a token server when one is given.
//!
//! Usage:
//!   cargo run -p headless_runner -- td --seed 7
//!   cargo run -p headless_runner -- batfly --server http://127.0.0.1:8888

mod strategy;

use arcade_core::{Game, PlayerId, TerminalOutcome, Tick};
use arcade_host::GameHost;
use batfly_sim::{BatflyConfig, BatflyEvent, BatflyGame};
use clap::{Args, Parser, Subcommand};
use hopla_tokens::{TokenClient, Wallet};
use std::collections::BTreeMap;
use std::error::Error;
use std::path::{Path, PathBuf};
use strategy::{batfly_action, TdStrategy};
use td_sim::{TdConfig, TdEvent, TdGame};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "headless_runner")]
#[command(about = "Play the arcade games without a screen")]
struct Cli {
    #[command(subcommand)]
    game: GameCommand,
}

#[derive(Subcommand, Debug)]
enum GameCommand {
    /// Tower defense
    Td(RunArgs),
    /// Bat Fly
    Batfly(RunArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Seed for the game's random source
    #[arg(long, default_value = "12345")]
    seed: u64,

    /// Stop after this many ticks if the game has not ended
    #[arg(long, default_value = "36000")]
    max_ticks: Tick,

    /// Token server to sync the balance with
    #[arg(long)]
    server: Option<String>,

    /// Directory holding the local wallet profile
    #[arg(long)]
    profile_dir: Option<PathBuf>,

    /// JSON file overriding the game's default config
    #[arg(long)]
    config: Option<PathBuf>,
}

/// What a finished run hands to the wallet.
struct Reward {
    tokens: u64,
    score: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let args = match &cli.game {
        GameCommand::Td(args) | GameCommand::Batfly(args) => args,
    };

    let mut wallet = Wallet::open(args.profile_dir.clone().unwrap_or_else(Wallet::default_dir))?;
    let client = args.server.as_deref().map(TokenClient::new);

    let remote = match &client {
        Some(client) => match client.get_user_data(wallet.device_id()).await {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("token server unreachable, using local balance: {}", e);
                None
            }
        },
        None => None,
    };
    let balance = wallet.load(remote.as_ref())?;
    println!("Device {} starts with {} tokens", wallet.device_id(), balance);

    let reward = match &cli.game {
        GameCommand::Td(args) => run_td(args)?,
        GameCommand::Batfly(args) => run_batfly(args)?,
    };

    if let Some(reward) = reward {
        let request = wallet.add_tokens(reward.tokens, Some(reward.score))?;
        println!("Won {} token(s), balance now {}", reward.tokens, wallet.balance());

        if let Some(client) = &client {
            match client.save_user_data(&request).await {
                Ok(record) => println!(
                    "Synced with {}: {} tokens, {} wins",
                    client.base_url(),
                    record.hopla_tokens,
                    record.total_wins
                ),
                Err(e) => tracing::warn!("sync failed, balance kept locally: {}", e),
            }
        }
    }

    Ok(())
}

fn load_config<T: Default>(
    path: Option<&Path>,
    parse: impl FnOnce(&str) -> Result<T, Box<dyn Error>>,
) -> Result<T, Box<dyn Error>> {
    match path {
        Some(path) => parse(&std::fs::read_to_string(path)?),
        None => Ok(T::default()),
    }
}

/// Steps until the game ends or `max_ticks` is reached, asking `next` for
/// input before every tick.
fn drive<G: Game>(
    host: &mut GameHost<G>,
    player: PlayerId,
    max_ticks: Tick,
    mut next: impl FnMut(&G) -> Option<G::Action>,
) -> Vec<G::Event> {
    let mut events = Vec::new();
    while host.current_tick() < max_ticks {
        if let Some(action) = next(host.game()) {
            host.submit_now(player, action);
        }
        match host.step_one_tick() {
            Some(tick_events) => events.extend(tick_events),
            None => break,
        }
    }
    events
}

fn run_td(args: &RunArgs) -> Result<Option<Reward>, Box<dyn Error>> {
    let config = load_config(args.config.as_deref(), |json| {
        TdConfig::from_json(json).map_err(Into::into)
    })?;
    let strategy = TdStrategy::new(&config);

    let mut host = GameHost::<TdGame>::from_config(config, args.seed);
    let player = host.join_player();
    let events = drive(&mut host, player, args.max_ticks, |game| {
        strategy.next_action(game)
    });

    let game = host.game();
    println!("=== Tower Defense Run Complete ===");
    print_outcome(host.is_terminal(), host.current_tick());
    println!("Waves completed: {}", game.waves().waves_completed());
    println!("Lives: {}", game.enemies().lives());
    println!("Gold: {}", game.towers().gold());
    println!("Towers: {}", game.towers().tower_count());
    print_event_summary(events.iter().map(td_event_name));

    let reward = events.iter().find_map(|event| match event {
        TdEvent::Victory { tokens } => Some(Reward {
            tokens: u64::from(*tokens),
            score: u64::from(game.waves().waves_completed()),
        }),
        _ => None,
    });
    Ok(reward)
}

fn run_batfly(args: &RunArgs) -> Result<Option<Reward>, Box<dyn Error>> {
    let config = load_config(args.config.as_deref(), |json| {
        BatflyConfig::from_json(json).map_err(Into::into)
    })?;
    let mut host = GameHost::<BatflyGame>::from_config(config, args.seed);
    let player = host.join_player();
    let events = drive(&mut host, player, args.max_ticks, batfly_action);

    println!("=== Bat Fly Run Complete ===");
    print_outcome(host.is_terminal(), host.current_tick());
    println!("Score: {}", host.game().score());
    print_event_summary(events.iter().map(batfly_event_name));

    let reward = events.iter().find_map(|event| match event {
        BatflyEvent::TokensAwarded { amount, score } => Some(Reward {
            tokens: u64::from(*amount),
            score: u64::from(*score),
        }),
        _ => None,
    });
    Ok(reward)
}

fn print_outcome(outcome: Option<TerminalOutcome>, tick: Tick) {
    match outcome {
        Some(outcome) => println!("Outcome: {:?}", outcome),
        None => println!("Outcome: still running"),
    }
    println!("Final tick: {}", tick);
}

fn print_event_summary<'a>(names: impl Iterator<Item = &'a str>) {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for name in names {
        *counts.entry(name).or_default() += 1;
    }

    println!("\n=== Event Summary ===");
    for (name, count) in counts {
        println!("{}: {}", name, count);
    }
}

fn td_event_name(event: &TdEvent) -> &'static str {
    match event {
        TdEvent::TowerSelected { .. } => "Tower selected",
        TdEvent::TowerPlaced { .. } => "Towers placed",
        TdEvent::PlacementRejected { .. } => "Placements rejected",
        TdEvent::ProjectileFired { .. } => "Projectiles fired",
        TdEvent::EnemySpawned { .. } => "Enemies spawned",
        TdEvent::EnemyKilled { .. } => "Enemies killed",
        TdEvent::EnemyLeaked { .. } => "Enemies leaked",
        TdEvent::LivesChanged { .. } => "Lives changed",
        TdEvent::GoldChanged { .. } => "Gold changed",
        TdEvent::WaveStarted { .. } => "Waves started",
        TdEvent::WaveCompleted { .. } => "Waves completed",
        TdEvent::CameraReset => "Camera resets",
        TdEvent::GameOver => "Game over",
        TdEvent::Victory { .. } => "Victory",
    }
}

fn batfly_event_name(event: &BatflyEvent) -> &'static str {
    match event {
        BatflyEvent::Started => "Started",
        BatflyEvent::CoinCollected { .. } => "Coins collected",
        BatflyEvent::HitObstacle => "Hit obstacle",
        BatflyEvent::LeftScreen => "Left screen",
        BatflyEvent::TokensAwarded { .. } => "Tokens awarded",
        BatflyEvent::Restarted => "Restarted",
    }
}
