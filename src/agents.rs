//! Pluggable player policies.
//!
//! The engine consults one [`Agent`] per seat, synchronously, on that
//! seat's turn. How a decision is produced is entirely up to the
//! implementation; the engine only interprets the returned [`Action`].
//! There is no separate "all-in" action: an agent goes all-in by raising
//! its full balance, and the engine caps every payment at the balance.

use crate::cards::Card;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// A betting decision. The set is closed; every engine match over it is
/// exhaustive, so there is no unrecognized-action failure mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Leave the round, forfeiting anything already contributed.
    Fold,
    /// Pay whatever is needed to match the current round cost (possibly
    /// nothing), capped at the remaining balance.
    Check,
    /// Pay `amount` on top of what is already posted this street and
    /// raise the round cost accordingly.
    Raise(u64),
}

/// What an agent sees when asked to act.
#[derive(Debug, Clone, Copy)]
#[non_exhaustive]
pub struct TurnView<'a> {
    pub seat: usize,
    pub balance: u64,
    /// Amount needed to match the round cost from here.
    pub owed: u64,
    pub round_cost: u64,
    pub pot: u64,
    pub community: &'a [Card],
    pub hole: &'a [Card],
    pub all_in: bool,
}

/// A seat's decision policy. Called synchronously on the seat's turn;
/// the engine does not proceed until the agent returns.
pub trait Agent {
    fn act(&mut self, view: &TurnView<'_>) -> Action;
}

/// Picks uniformly between folding, checking and raising a random amount
/// up to its balance.
#[derive(Debug)]
pub struct RandomBot {
    rng: StdRng,
}

impl RandomBot {
    pub fn new() -> Self {
        let mut seed = [0u8; 32];
        rand::rng().fill_bytes(&mut seed);
        Self { rng: StdRng::from_seed(seed) }
    }

    /// Deterministic decisions for reproducible simulations.
    pub fn with_seed(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl Default for RandomBot {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomBot {
    fn act(&mut self, view: &TurnView<'_>) -> Action {
        match self.rng.random_range(0..3u8) {
            0 => Action::Fold,
            1 => Action::Check,
            _ if view.balance > 0 => Action::Raise(self.rng.random_range(1..=view.balance)),
            _ => Action::Check,
        }
    }
}

/// Always checks. Useful as a baseline and for driving rounds to
/// showdown in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckBot;

impl Agent for CheckBot {
    fn act(&mut self, _view: &TurnView<'_>) -> Action {
        Action::Check
    }
}
