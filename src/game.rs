use crate::agents::{Action, Agent, TurnView};
use crate::cards::Card;
use crate::deck::{Deck, DeckError};
use crate::evaluator::{self, EvalError, Evaluation};
use crate::hand::{Hand, HandError};
use crate::player::{Player, PlayerError};
use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Community cards revealed over a whole round.
pub const MAX_COMMUNITY_CARDS: usize = 3;
/// Hole cards dealt to each participating player.
pub const HOLE_CARDS: usize = 2;

/// Per-seat status within a round, keyed by seat index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SeatStatus {
    /// In the round and still owes a decision this street.
    Active,
    /// Matched the current round cost; waiting for the street to close.
    Checked,
    /// Out for the remainder of the round.
    Folded,
    /// Not dealt in (no chips at round start).
    Inactive,
}

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum EngineError {
    #[error("need at least two funded players, found {0}")]
    NotEnoughPlayers(usize),
    #[error("expected one agent per seat ({expected}), got {got}")]
    AgentCount { expected: usize, got: usize },
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Balance(#[from] PlayerError),
    #[error(transparent)]
    Hand(#[from] HandError),
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error("money conservation violated: bank {bank}, pot {pot} + balances {balances}")]
    ConservationBreach { bank: u64, pot: u64, balances: u64 },
}

/// Final position of one player after a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standing {
    pub name: String,
    pub balance: u64,
}

/// The betting-round engine: owns the deck, the pot, the community cards
/// and every player account for the duration of a game. Fully
/// synchronous; one seat's action completes before the next seat is
/// consulted, which is what the money-conservation argument relies on.
#[derive(Debug)]
pub struct Game {
    stake: u64,
    players: Vec<Player>,
    status: Vec<SeatStatus>,
    /// Per-seat contribution to the pot on the current street.
    posted: Vec<u64>,
    deck: Deck,
    community: Vec<Card>,
    pot: u64,
    round_cost: u64,
    sb: usize,
    bb: usize,
    round: u64,
    /// Total money at engine creation; `pot + sum(balances)` must equal
    /// this after every payment operation.
    bank: u64,
    rng: ChaCha8Rng,
}

impl Game {
    /// A table of `num_players` seats named "P1".."Pn", each starting
    /// with `starting_balance`. `stake` is the round cost unit: the big
    /// blind posts `stake`, the small blind posts `stake / 2`.
    pub fn new(num_players: usize, starting_balance: u64, stake: u64) -> Self {
        let seed = rand::rng().random();
        Self::with_seed(num_players, starting_balance, stake, seed)
    }

    /// Same, with a fixed shuffle seed for reproducible games.
    pub fn with_seed(num_players: usize, starting_balance: u64, stake: u64, seed: u64) -> Self {
        let players: Vec<Player> =
            (1..=num_players).map(|i| Player::new(format!("P{i}"), starting_balance)).collect();
        let bank = starting_balance * num_players as u64;
        Self {
            stake,
            status: vec![SeatStatus::Active; players.len()],
            posted: vec![0; players.len()],
            players,
            deck: Deck::standard(),
            community: Vec::with_capacity(MAX_COMMUNITY_CARDS),
            pot: 0,
            round_cost: 0,
            sb: 0,
            bb: 1 % num_players.max(1),
            round: 0,
            bank,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn stake(&self) -> u64 {
        self.stake
    }

    pub fn pot(&self) -> u64 {
        self.pot
    }

    pub fn round_cost(&self) -> u64 {
        self.round_cost
    }

    /// Community cards revealed so far this round.
    pub fn table(&self) -> &[Card] {
        &self.community
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player_status(&self, seat: usize) -> SeatStatus {
        self.status[seat]
    }

    /// Seats still contesting the current round (dealt in, not folded).
    pub fn active_players(&self) -> Vec<usize> {
        (0..self.players.len()).filter(|&s| self.is_contending(s)).collect()
    }

    /// Completed round count.
    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn small_blind_seat(&self) -> usize {
        self.sb
    }

    pub fn big_blind_seat(&self) -> usize {
        self.bb
    }

    /// Full state validation, intended for test boundaries. The same
    /// conservation property is also debug-asserted after every payment.
    pub fn validate(&self) -> Result<(), EngineError> {
        let balances: u64 = self.players.iter().map(Player::balance).sum();
        if self.pot + balances != self.bank {
            return Err(EngineError::ConservationBreach { bank: self.bank, pot: self.pot, balances });
        }
        Ok(())
    }

    /// Play one full round: deal, blinds, action loop, streets,
    /// termination, payout, reset. Returns the winning seat(s).
    ///
    /// `agents` supplies one decision policy per seat, consulted
    /// synchronously in turn order.
    pub fn play_round(&mut self, agents: &mut [Box<dyn Agent>]) -> Result<Vec<usize>, EngineError> {
        if agents.len() != self.players.len() {
            return Err(EngineError::AgentCount {
                expected: self.players.len(),
                got: agents.len(),
            });
        }
        self.begin_round()?;

        let winners;
        let mut cursor = self.bb;
        loop {
            if let Some(seat) = self.sole_contender() {
                let amount = self.pot;
                self.players[seat].credit(amount);
                self.pot = 0;
                self.debug_check_conservation();
                info!(
                    "round {}: {} takes {} uncontested",
                    self.round + 1,
                    self.players[seat].name(),
                    amount
                );
                winners = vec![seat];
                break;
            }
            match self.next_active_from(cursor) {
                Some(seat) => {
                    self.take_turn(seat, agents[seat].as_mut())?;
                    cursor = seat;
                }
                None if self.community.len() < MAX_COMMUNITY_CARDS => {
                    self.reveal_street()?;
                }
                None => {
                    winners = self.showdown()?;
                    break;
                }
            }
        }

        self.reset_round();
        Ok(winners)
    }

    /// Play rounds until `rounds` is exhausted (when given) or until
    /// fewer than two funded players remain, then report the standings
    /// best-first.
    pub fn iterate_game(
        &mut self,
        agents: &mut [Box<dyn Agent>],
        rounds: Option<usize>,
    ) -> Result<Vec<Standing>, EngineError> {
        let mut played = 0;
        while self.funded_count() >= 2 && rounds.map_or(true, |limit| played < limit) {
            self.play_round(agents)?;
            played += 1;
        }
        let mut standings: Vec<Standing> = self
            .players
            .iter()
            .map(|p| Standing { name: p.name().to_string(), balance: p.balance() })
            .collect();
        standings.sort_by(|a, b| b.balance.cmp(&a.balance));
        Ok(standings)
    }

    fn begin_round(&mut self) -> Result<(), EngineError> {
        let funded = self.funded_count();
        if funded < 2 {
            return Err(EngineError::NotEnoughPlayers(funded));
        }
        for (seat, player) in self.players.iter().enumerate() {
            self.status[seat] =
                if player.has_chips() { SeatStatus::Active } else { SeatStatus::Inactive };
        }
        self.posted.fill(0);
        self.community.clear();
        self.deck = Deck::standard();
        self.deck.shuffle_with(&mut self.rng);

        // Blind seats may have busted since they were chosen; slide them
        // onto funded seats before dealing.
        if self.status[self.sb] != SeatStatus::Active {
            self.sb = self.next_with_status(self.sb, SeatStatus::Active).unwrap_or(self.sb);
        }
        self.bb = self.next_with_status(self.sb, SeatStatus::Active).unwrap_or(self.bb);

        self.deal_hole_cards()?;
        self.post_blinds()?;
        info!(
            "round {}: {} players dealt, sb={} bb={} pot={}",
            self.round + 1,
            funded,
            self.players[self.sb].name(),
            self.players[self.bb].name(),
            self.pot
        );
        Ok(())
    }

    /// One card at a time, round-robin from the small blind, until every
    /// participant holds two.
    fn deal_hole_cards(&mut self) -> Result<(), EngineError> {
        let mut order = vec![self.sb];
        let mut seat = self.sb;
        while let Some(next) = self.next_with_status(seat, SeatStatus::Active) {
            if next == self.sb {
                break;
            }
            order.push(next);
            seat = next;
        }
        for _ in 0..HOLE_CARDS {
            for &seat in &order {
                let card = self.deck.draw_one()?;
                self.players[seat].give_card(card);
            }
        }
        Ok(())
    }

    fn post_blinds(&mut self) -> Result<(), EngineError> {
        let half = self.stake / 2;
        let sb_pay = half.min(self.players[self.sb].balance());
        if sb_pay < half {
            self.players[self.sb].mark_all_in();
        }
        self.charge(self.sb, sb_pay)?;
        debug!("{} posts small blind {}", self.players[self.sb].name(), sb_pay);

        let bb_pay = self.stake.min(self.players[self.bb].balance());
        if bb_pay < self.stake {
            self.players[self.bb].mark_all_in();
        }
        self.charge(self.bb, bb_pay)?;
        debug!("{} posts big blind {}", self.players[self.bb].name(), bb_pay);

        self.round_cost = self.stake;
        Ok(())
    }

    fn take_turn(&mut self, seat: usize, agent: &mut dyn Agent) -> Result<(), EngineError> {
        let owed = self.round_cost.saturating_sub(self.posted[seat]);
        if self.players[seat].balance() < owed {
            // Forced all-in happens before the action is applied; every
            // subsequent payment is capped at the remaining balance.
            self.players[seat].mark_all_in();
        }
        let player = &self.players[seat];
        let view = TurnView {
            seat,
            balance: player.balance(),
            owed,
            round_cost: self.round_cost,
            pot: self.pot,
            community: &self.community,
            hole: player.hole(),
            all_in: player.is_all_in(),
        };
        let action = agent.act(&view);
        match action {
            Action::Fold => {
                debug!("{} folds", self.players[seat].name());
                self.status[seat] = SeatStatus::Folded;
            }
            Action::Check => {
                let pay = owed.min(self.players[seat].balance());
                self.charge(seat, pay)?;
                debug!("{} checks, paying {}", self.players[seat].name(), pay);
                self.status[seat] = SeatStatus::Checked;
            }
            Action::Raise(amount) => {
                let pay = amount.min(self.players[seat].balance());
                self.charge(seat, pay)?;
                let total = self.posted[seat];
                debug!(
                    "{} raises {} (street total {}, cost {} -> {})",
                    self.players[seat].name(),
                    pay,
                    total,
                    self.round_cost,
                    self.round_cost.max(total)
                );
                // The new cost is the raiser's total street contribution,
                // so a raiser who had matched moves the cost up by exactly
                // the raise, and a blind-street small blind raises on top
                // of its posted half. A capped raise that fails to exceed
                // the current cost must not lower it or reopen action.
                if total > self.round_cost {
                    self.round_cost = total;
                    for (other, status) in self.status.iter_mut().enumerate() {
                        if other != seat && *status == SeatStatus::Checked {
                            *status = SeatStatus::Active;
                        }
                    }
                }
                self.status[seat] = SeatStatus::Checked;
            }
        }
        Ok(())
    }

    /// Reveal the next community card and open a fresh street: everyone
    /// still in reverts to Active and the round cost resets.
    fn reveal_street(&mut self) -> Result<(), EngineError> {
        let card = self.deck.draw_one()?;
        debug!("community card {} revealed ({} showing)", card, self.community.len() + 1);
        self.community.push(card);
        for status in &mut self.status {
            if *status == SeatStatus::Checked {
                *status = SeatStatus::Active;
            }
        }
        self.round_cost = 0;
        self.posted.fill(0);
        Ok(())
    }

    /// Compare the remaining players' five-card hands (two hole cards
    /// plus the three community cards) and split the pot among the best.
    fn showdown(&mut self) -> Result<Vec<usize>, EngineError> {
        debug_assert_eq!(self.community.len(), MAX_COMMUNITY_CARDS);
        let mut best: Option<Evaluation> = None;
        let mut winners: Vec<usize> = Vec::new();
        for seat in 0..self.players.len() {
            if !self.is_contending(seat) {
                continue;
            }
            let mut hand = Hand::new();
            for &card in self.players[seat].hole() {
                hand.push(card)?;
            }
            for &card in &self.community {
                hand.push(card)?;
            }
            let eval = evaluator::evaluate(&hand)?;
            debug!("{} shows {}", self.players[seat].name(), eval.category);
            match best {
                Some(b) if eval > b => {
                    best = Some(eval);
                    winners.clear();
                    winners.push(seat);
                }
                Some(b) if eval == b => winners.push(seat),
                Some(_) => {}
                None => {
                    best = Some(eval);
                    winners.push(seat);
                }
            }
        }

        // Integer split; the remainder stays in the pot and carries into
        // the next round so no chip is ever minted or burned.
        let share = self.pot / winners.len() as u64;
        for &seat in &winners {
            self.players[seat].credit(share);
        }
        self.pot -= share * winners.len() as u64;
        self.debug_check_conservation();
        info!(
            "round {}: showdown won by {:?}, {} each{}",
            self.round + 1,
            winners.iter().map(|&s| self.players[s].name()).collect::<Vec<_>>(),
            share,
            if self.pot > 0 { format!(", {} carried", self.pot) } else { String::new() }
        );
        Ok(winners)
    }

    /// Clear per-round state, rotate the blinds over funded seats and
    /// advance the round counter. Any carried remainder stays in the pot.
    fn reset_round(&mut self) {
        self.community.clear();
        self.round_cost = 0;
        self.posted.fill(0);
        for (seat, player) in self.players.iter_mut().enumerate() {
            player.reset_for_round();
            self.status[seat] =
                if player.has_chips() { SeatStatus::Active } else { SeatStatus::Inactive };
        }
        self.sb = self.next_funded_from(self.sb).unwrap_or(self.sb);
        self.bb = self.next_funded_from(self.sb).unwrap_or(self.bb);
        self.round += 1;
    }

    /// Move `amount` from a seat's balance into the pot.
    fn charge(&mut self, seat: usize, amount: u64) -> Result<(), EngineError> {
        self.players[seat].debit(amount)?;
        self.posted[seat] += amount;
        self.pot += amount;
        self.debug_check_conservation();
        Ok(())
    }

    fn debug_check_conservation(&self) {
        debug_assert_eq!(
            self.pot + self.players.iter().map(Player::balance).sum::<u64>(),
            self.bank,
            "pot + balances drifted from the bank"
        );
    }

    fn is_contending(&self, seat: usize) -> bool {
        matches!(self.status[seat], SeatStatus::Active | SeatStatus::Checked)
    }

    fn sole_contender(&self) -> Option<usize> {
        let mut it = (0..self.players.len()).filter(|&s| self.is_contending(s));
        match (it.next(), it.next()) {
            (Some(seat), None) => Some(seat),
            _ => None,
        }
    }

    fn funded_count(&self) -> usize {
        self.players.iter().filter(|p| p.has_chips()).count()
    }

    fn next_with_status(&self, start: usize, status: SeatStatus) -> Option<usize> {
        let n = self.players.len();
        (1..=n).map(|step| (start + step) % n).find(|&s| self.status[s] == status)
    }

    fn next_active_from(&self, start: usize) -> Option<usize> {
        self.next_with_status(start, SeatStatus::Active)
    }

    fn next_funded_from(&self, start: usize) -> Option<usize> {
        let n = self.players.len();
        (1..=n).map(|step| (start + step) % n).find(|&s| self.players[s].has_chips())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::CheckBot;

    /// Replays a fixed action list, then checks forever.
    struct Script {
        actions: std::vec::IntoIter<Action>,
    }

    impl Script {
        fn new(actions: Vec<Action>) -> Box<dyn Agent> {
            Box::new(Self { actions: actions.into_iter() })
        }
    }

    impl Agent for Script {
        fn act(&mut self, _view: &TurnView<'_>) -> Action {
            self.actions.next().unwrap_or(Action::Check)
        }
    }

    fn check_bots(n: usize) -> Vec<Box<dyn Agent>> {
        (0..n).map(|_| Box::new(CheckBot) as Box<dyn Agent>).collect()
    }

    #[test]
    fn blinds_move_half_and_full_stake_into_the_pot() {
        let mut g = Game::with_seed(3, 100, 10, 1);
        g.begin_round().unwrap();
        assert_eq!(g.pot, 15);
        assert_eq!(g.round_cost, 10);
        assert_eq!(g.players[g.sb].balance(), 95);
        assert_eq!(g.players[g.bb].balance(), 90);
        g.validate().unwrap();
    }

    #[test]
    fn every_participant_gets_two_hole_cards() {
        let mut g = Game::with_seed(4, 100, 10, 2);
        g.players[2] = Player::new("P3", 0);
        g.bank = 300;
        g.begin_round().unwrap();
        for (seat, p) in g.players.iter().enumerate() {
            let expected = if seat == 2 { 0 } else { HOLE_CARDS };
            assert_eq!(p.hole().len(), expected);
        }
        assert_eq!(g.status[2], SeatStatus::Inactive);
        assert_eq!(g.deck.len(), 52 - 6);
    }

    #[test]
    fn fold_leaves_two_active_players() {
        let mut g = Game::with_seed(3, 100, 10, 3);
        g.begin_round().unwrap();
        let first = g.next_active_from(g.bb).unwrap();
        g.take_turn(first, &mut Script { actions: vec![Action::Fold].into_iter() }).unwrap();
        assert_eq!(g.status[first], SeatStatus::Folded);
        assert_eq!(g.active_players().len(), 2);
    }

    #[test]
    fn matched_raise_adds_its_amount_to_the_round_cost() {
        let mut g = Game::with_seed(3, 100, 10, 4);
        g.begin_round().unwrap();
        // Bring action around to the big blind, who has already matched
        // the cost of 10; raising by 10 then costs exactly 10 more.
        let a = g.next_active_from(g.bb).unwrap();
        g.take_turn(a, &mut Script { actions: vec![Action::Check].into_iter() }).unwrap();
        let b = g.next_active_from(a).unwrap();
        g.take_turn(b, &mut Script { actions: vec![Action::Check].into_iter() }).unwrap();
        let bb = g.bb;
        let before = g.players[bb].balance();
        g.take_turn(bb, &mut Script { actions: vec![Action::Raise(10)].into_iter() }).unwrap();
        assert_eq!(g.round_cost, 20);
        assert_eq!(g.players[bb].balance(), before - 10);
        g.validate().unwrap();
    }

    #[test]
    fn capped_raise_below_the_cost_neither_lowers_it_nor_reopens_action() {
        let mut g = Game::with_seed(3, 100, 10, 40);
        g.begin_round().unwrap();
        let seat = g.next_active_from(g.bb).unwrap();
        g.players[seat] = Player::new("short", 4);
        g.bank = g.pot + g.players.iter().map(Player::balance).sum::<u64>();
        g.take_turn(seat, &mut Script { actions: vec![Action::Raise(100)].into_iter() }).unwrap();
        assert_eq!(g.round_cost, 10, "an all-in below the cost is a call, not a raise");
        assert!(g.players[seat].is_all_in());
        assert_eq!(g.posted[seat], 4);
        assert_eq!(g.status[seat], SeatStatus::Checked);
    }

    #[test]
    fn raise_reopens_action_for_checked_players() {
        let mut g = Game::with_seed(3, 100, 10, 5);
        g.begin_round().unwrap();
        let a = g.next_active_from(g.bb).unwrap();
        g.take_turn(a, &mut Script { actions: vec![Action::Check].into_iter() }).unwrap();
        assert_eq!(g.status[a], SeatStatus::Checked);
        let b = g.next_active_from(a).unwrap();
        g.take_turn(b, &mut Script { actions: vec![Action::Raise(20)].into_iter() }).unwrap();
        assert_eq!(g.status[a], SeatStatus::Active, "raise must force checked players to act again");
        assert_eq!(g.status[b], SeatStatus::Checked);
    }

    #[test]
    fn small_blind_check_tops_up_only_the_remaining_half() {
        let mut g = Game::with_seed(3, 100, 10, 6);
        g.begin_round().unwrap();
        let before = g.players[g.sb].balance();
        let sb = g.sb;
        g.take_turn(sb, &mut Script { actions: vec![Action::Check].into_iter() }).unwrap();
        assert_eq!(g.players[sb].balance(), before - 5);
        assert_eq!(g.posted[sb], 10);
    }

    #[test]
    fn big_blind_check_pays_nothing_on_an_unraised_street() {
        let mut g = Game::with_seed(3, 100, 10, 7);
        g.begin_round().unwrap();
        let before = g.players[g.bb].balance();
        let bb = g.bb;
        g.take_turn(bb, &mut Script { actions: vec![Action::Check].into_iter() }).unwrap();
        assert_eq!(g.players[bb].balance(), before);
    }

    #[test]
    fn short_stack_is_forced_all_in_and_pays_only_its_balance() {
        let mut g = Game::with_seed(3, 100, 10, 8);
        g.begin_round().unwrap();
        let seat = g.next_active_from(g.bb).unwrap();
        g.players[seat] = Player::new("short", 4);
        g.bank = g.pot + g.players.iter().map(Player::balance).sum::<u64>();
        g.take_turn(seat, &mut Script { actions: vec![Action::Check].into_iter() }).unwrap();
        assert!(g.players[seat].is_all_in());
        assert_eq!(g.players[seat].balance(), 0);
        assert_eq!(g.posted[seat], 4, "all-in pays exactly the remaining balance");
    }

    #[test]
    fn street_reveal_resets_cost_and_statuses() {
        let mut g = Game::with_seed(3, 100, 10, 9);
        g.begin_round().unwrap();
        for seat in 0..3 {
            g.status[seat] = SeatStatus::Checked;
        }
        g.reveal_street().unwrap();
        assert_eq!(g.community.len(), 1);
        assert_eq!(g.round_cost, 0);
        assert!(g.status.iter().all(|&s| s == SeatStatus::Active));
    }

    #[test]
    fn checked_down_round_reaches_showdown_with_three_cards() {
        let mut g = Game::with_seed(3, 100, 10, 10);
        let mut agents = check_bots(3);
        let winners = g.play_round(&mut agents).unwrap();
        assert!(!winners.is_empty());
        g.validate().unwrap();
        // Reset already ran: the table is clear and blinds moved on.
        assert!(g.table().is_empty());
        assert_eq!(g.round(), 1);
    }

    #[test]
    fn everyone_folds_to_the_big_blind() {
        // First-round layout: sb=0, bb=1, first actor 2.
        let mut g = Game::with_seed(3, 100, 10, 11);
        let mut agents: Vec<Box<dyn Agent>> = vec![
            Script::new(vec![Action::Fold]),
            Script::new(vec![]),
            Script::new(vec![Action::Fold]),
        ];
        let winners = g.play_round(&mut agents).unwrap();
        assert_eq!(winners, vec![1]);
        assert_eq!(g.pot(), 0);
        // The big blind recovered its stake plus the small blind's half.
        assert_eq!(g.players()[1].balance(), 105);
        g.validate().unwrap();
    }

    #[test]
    fn tied_showdown_splits_and_carries_the_remainder() {
        use crate::cards::{Rank, Suit};

        let mut g = Game::with_seed(2, 100, 10, 12);
        g.community = vec![
            Card::new(Rank::Two, Suit::Clubs),
            Card::new(Rank::Seven, Suit::Diamonds),
            Card::new(Rank::Nine, Suit::Spades),
        ];
        g.players[0].give_card(Card::new(Rank::Ace, Suit::Hearts));
        g.players[0].give_card(Card::new(Rank::King, Suit::Hearts));
        g.players[1].give_card(Card::new(Rank::Ace, Suit::Diamonds));
        g.players[1].give_card(Card::new(Rank::King, Suit::Diamonds));
        g.status = vec![SeatStatus::Checked, SeatStatus::Checked];
        g.pot = 7;
        g.bank = 207;

        let winners = g.showdown().unwrap();
        assert_eq!(winners, vec![0, 1], "equal-composition hands tie");
        assert_eq!(g.players[0].balance(), 103);
        assert_eq!(g.players[1].balance(), 103);
        assert_eq!(g.pot, 1, "remainder stays in the pot");
        g.validate().unwrap();
    }

    #[test]
    fn blinds_rotate_over_funded_seats_between_rounds() {
        let mut g = Game::with_seed(4, 100, 10, 13);
        let mut agents = check_bots(4);
        let sb_before = g.sb;
        g.play_round(&mut agents).unwrap();
        assert_ne!(g.sb, sb_before, "small blind must move");
        assert!(g.players[g.sb].has_chips());
        assert!(g.players[g.bb].has_chips());
    }

    #[test]
    fn busted_players_sit_out_and_game_errors_below_two() {
        let mut g = Game::with_seed(3, 100, 10, 14);
        g.players[0] = Player::new("P1", 0);
        g.players[1] = Player::new("P2", 0);
        let mut agents = check_bots(3);
        let err = g.play_round(&mut agents).unwrap_err();
        assert!(matches!(err, EngineError::NotEnoughPlayers(1)));
    }

    #[test]
    fn agent_count_mismatch_is_a_caller_error() {
        let mut g = Game::with_seed(3, 100, 10, 15);
        let mut agents = check_bots(2);
        let err = g.play_round(&mut agents).unwrap_err();
        assert!(matches!(err, EngineError::AgentCount { expected: 3, got: 2 }));
    }

    #[test]
    fn iterate_game_stops_at_the_round_limit() {
        let mut g = Game::with_seed(3, 100, 10, 16);
        let mut agents = check_bots(3);
        let standings = g.iterate_game(&mut agents, Some(5)).unwrap();
        assert_eq!(g.round(), 5);
        assert_eq!(standings.len(), 3);
        let total: u64 = standings.iter().map(|s| s.balance).sum();
        assert_eq!(total + g.pot(), 300);
        assert!(standings.windows(2).all(|w| w[0].balance >= w[1].balance));
    }
}
