//! holdem-sim: simplified Texas Hold'em round simulation
//!
//! Two core pieces:
//! - a hand evaluator that classifies any five-card hand into one of ten
//!   categories and produces a comparable tie-break key;
//! - a betting-round engine that drives blinds, check/raise/fold/all-in
//!   actions, community-card reveals and a single-pot payout, preserving
//!   money conservation across folds and all-ins.
//!
//! Deck shuffling, player policies and the simulation driver are
//! collaborators around that core, not part of it.
//!
//! ## Quick start: classify a hand
//! ```
//! use holdem_sim::cards::{Card, Rank, Suit};
//! use holdem_sim::evaluator::{classify, Category};
//! use holdem_sim::hand::Hand;
//!
//! let hand = Hand::from_cards(
//!     [Rank::Ten, Rank::Jack, Rank::Queen, Rank::King, Rank::Ace]
//!         .map(|r| Card::new(r, Suit::Hearts)),
//! ).unwrap();
//! assert_eq!(classify(&hand).unwrap(), Category::RoyalFlush);
//! ```
//!
//! ## Quick start: play a round
//! ```
//! use holdem_sim::agents::{Agent, CheckBot};
//! use holdem_sim::game::Game;
//!
//! let mut game = Game::with_seed(3, 100, 10, 42);
//! let mut agents: Vec<Box<dyn Agent>> =
//!     (0..3).map(|_| Box::new(CheckBot) as Box<dyn Agent>).collect();
//! let winners = game.play_round(&mut agents).unwrap();
//! assert!(!winners.is_empty());
//! game.validate().unwrap();
//! ```

pub mod agents;
pub mod cards;
pub mod deck;
pub mod evaluator;
pub mod game;
pub mod hand;
pub mod player;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
