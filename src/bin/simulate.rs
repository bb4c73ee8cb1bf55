use clap::{Parser, Subcommand};
use holdem_sim::agents::{Agent, RandomBot};
use holdem_sim::deck::Deck;
use holdem_sim::evaluator::{classify, Category};
use holdem_sim::game::Game;
use holdem_sim::hand::Hand;
use log::info;

#[derive(Parser)]
#[command(name = "holdem-sim", version, about = "Simplified Hold'em round simulator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play a table of random bots and print the final standings.
    Game {
        /// Number of seats at the table.
        #[arg(long, default_value_t = 4)]
        players: usize,
        /// Starting balance per player.
        #[arg(long, default_value_t = 1000)]
        balance: u64,
        /// Round cost unit: the big blind posts this, the small blind half.
        #[arg(long, default_value_t = 10)]
        stake: u64,
        /// Round limit; omit to play until one player holds everything.
        #[arg(long)]
        rounds: Option<usize>,
        /// Seed for shuffles and bot decisions.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Estimate the five-card category distribution by repeated dealing.
    Hands {
        /// Number of decks to shuffle; each yields ten 5-card hands.
        #[arg(long, default_value_t = 10_000)]
        iterations: usize,
        /// Seed for shuffles.
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    match Cli::parse().command {
        Command::Game { players, balance, stake, rounds, seed } => {
            run_game(players, balance, stake, rounds, seed)
        }
        Command::Hands { iterations, seed } => run_hand_distribution(iterations, seed),
    }
}

fn run_game(
    players: usize,
    balance: u64,
    stake: u64,
    rounds: Option<usize>,
    seed: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut game = match seed {
        Some(seed) => Game::with_seed(players, balance, stake, seed),
        None => Game::new(players, balance, stake),
    };
    let mut agents: Vec<Box<dyn Agent>> = (0..players)
        .map(|seat| {
            let bot = match seed {
                Some(seed) => RandomBot::with_seed(seed.wrapping_add(seat as u64)),
                None => RandomBot::new(),
            };
            Box::new(bot) as Box<dyn Agent>
        })
        .collect();

    let standings = game.iterate_game(&mut agents, rounds)?;
    game.validate()?;
    info!("finished after {} rounds", game.round());

    println!("standings after {} rounds:", game.round());
    for (place, s) in standings.iter().enumerate() {
        println!("  {}. {:<8} {:>8}", place + 1, s.name, s.balance);
    }
    if game.pot() > 0 {
        println!("  (undistributed remainder in pot: {})", game.pot());
    }
    Ok(())
}

/// The classic sanity check: deal ten 5-card hands from each shuffled
/// deck and tally how often each category shows up.
fn run_hand_distribution(
    iterations: usize,
    seed: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut counts = [0u64; Category::ALL.len()];
    let mut total = 0u64;
    for i in 0..iterations {
        let mut deck = Deck::standard();
        match seed {
            Some(seed) => deck.shuffle_seeded(seed.wrapping_add(i as u64)),
            None => deck.shuffle_with(&mut rand::rng()),
        }
        for _ in 0..10 {
            let hand = Hand::from_cards(deck.draw(5)?)?;
            let category = classify(&hand)?;
            counts[category.ordinal() as usize] += 1;
            total += 1;
        }
    }

    println!("category distribution over {total} hands:");
    for category in Category::ALL {
        let n = counts[category.ordinal() as usize];
        let pct = 100.0 * n as f64 / total as f64;
        println!("  {:<16} {:>10}  {:>8.4}%", category.label(), n, pct);
    }
    Ok(())
}
