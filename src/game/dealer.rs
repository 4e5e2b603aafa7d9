extern crate alloc;

use alloc::string::ToString;
use alloc::vec::Vec;

use crate::card::Card;
use crate::error::ShowdownError;
use crate::payout;
use crate::repository::Repository;
use crate::result::{CreditStatus, FinishedGame, GameResult, PayoutEntry, PayoutReport, SeatResult};
use crate::wallet::Wallet;

use super::{Game, Phase, Table};

/// Dealer stands once reaching this score.
const DEALER_STANDS_ON: u8 = 17;

impl Table {
    fn dealer_must_draw(&self, stand_on_soft_17: bool) -> bool {
        if !self.dealer.is_playing() {
            return false;
        }
        let score = self.dealer.score();
        score < DEALER_STANDS_ON
            || (score == DEALER_STANDS_ON && !stand_on_soft_17 && self.dealer.is_soft())
    }

    fn build_result(&self, game_id: u64, channel_id: &str) -> GameResult {
        let dealer_blackjack = self.dealer.is_blackjack();

        let seats = self
            .player_order
            .iter()
            .filter_map(|seat_id| {
                let hand = self.seats.get(seat_id)?;
                let outcome = payout::settle(hand, &self.dealer);
                let stake = self.stake(seat_id);
                let insurance = hand.insurance().map_or(0, |info| info.amount);

                Some(SeatResult {
                    seat_id: seat_id.clone(),
                    player_id: self.owner_of(seat_id).to_string(),
                    outcome,
                    score: hand.score(),
                    stake,
                    payout: payout::payout(outcome, stake),
                    insurance,
                    insurance_payout: payout::insurance_payout(insurance, dealer_blackjack),
                    doubled: hand.double_down().is_some(),
                    split: hand.split().is_some(),
                })
            })
            .collect();

        GameResult {
            game_id,
            channel_id: channel_id.to_string(),
            seats,
            dealer_score: self.dealer.score(),
            dealer_blackjack,
            dealer_bust: self.dealer.is_bust(),
        }
    }
}

impl<R: Repository, W: Wallet> Game<R, W> {
    /// Dealer plays their hand according to the rules.
    ///
    /// The dealer draws until reaching 17 or higher. If `stand_on_soft_17` is
    /// false, the dealer also hits a soft 17. An exhausted shoe is replaced
    /// along the way.
    ///
    /// Returns the cards drawn by the dealer.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in the playing or dealer phase,
    /// or a seat is still playing.
    pub fn play_dealer(&self) -> Result<Vec<Card>, ShowdownError> {
        let mut guard = self.table.lock();
        self.play_dealer_table(&mut guard)
    }

    fn play_dealer_table(&self, table: &mut Table) -> Result<Vec<Card>, ShowdownError> {
        match table.phase {
            Phase::Waiting => return Err(ShowdownError::GameNotStarted),
            Phase::Playing | Phase::Dealer => {}
            _ => return Err(ShowdownError::InvalidAction),
        }
        if !table.all_players_done() {
            return Err(ShowdownError::PlayersStillActing);
        }

        table.phase = Phase::Dealer;
        let mut drawn = Vec::new();
        while table.dealer_must_draw(self.options.stand_on_soft_17) {
            let card = table.draw();
            table.dealer.add_card(card)?;
            drawn.push(card);
        }
        table.phase = Phase::Complete;

        tracing::info!(
            channel = %self.channel_id,
            game = self.id,
            dealer_score = table.dealer.score(),
            drawn = drawn.len(),
            "dealer played"
        );
        Ok(drawn)
    }

    /// Evaluates every seat against the dealer and persists the result.
    ///
    /// The final shoe is saved first, then the result is appended once.
    /// Later calls return the same result without writing again.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not complete or the repository rejects
    /// a write; a failed call can be retried.
    pub fn get_results(&self) -> Result<GameResult, ShowdownError> {
        let mut guard = self.table.lock();
        self.results_table(&mut guard)
    }

    fn results_table(&self, table: &mut Table) -> Result<GameResult, ShowdownError> {
        match table.phase {
            Phase::Waiting => return Err(ShowdownError::GameNotStarted),
            Phase::Complete => {}
            _ => return Err(ShowdownError::InvalidAction),
        }
        if let Some(result) = &table.result {
            return Ok(result.clone());
        }

        let result = table.build_result(self.id, &self.channel_id);
        self.repository
            .save_deck(&self.channel_id, &table.shoe.to_vec())?;
        self.repository.save_game_result(&result)?;
        table.result = Some(result.clone());

        tracing::info!(
            channel = %self.channel_id,
            game = self.id,
            seats = result.seats.len(),
            dealer_score = result.dealer_score,
            dealer_bust = result.dealer_bust,
            "game result saved"
        );
        Ok(result)
    }

    /// Credits every seat's payout to its owner, once per game.
    ///
    /// Seats are credited independently: a failed credit is logged and
    /// recorded in the report, and the remaining seats are still paid.
    /// Returns `None` when payouts were already processed.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not complete or the result cannot be
    /// persisted. No credit is attempted in that case.
    pub fn process_payouts(&self) -> Result<Option<PayoutReport>, ShowdownError> {
        let mut guard = self.table.lock();
        self.payouts_table(&mut guard)
    }

    fn payouts_table(&self, table: &mut Table) -> Result<Option<PayoutReport>, ShowdownError> {
        let result = self.results_table(table)?;
        if table.payouts_processed {
            tracing::debug!(
                channel = %self.channel_id,
                game = self.id,
                "payouts already processed"
            );
            return Ok(None);
        }
        table.payouts_processed = true;

        let mut report = PayoutReport::default();
        for seat in &result.seats {
            let amount = seat.total_payout();
            let credit = if amount == 0 {
                CreditStatus::NothingOwed
            } else {
                match self
                    .wallet
                    .add_funds(&seat.player_id, amount, "blackjack payout")
                {
                    Ok(()) => CreditStatus::Credited,
                    Err(err) => {
                        tracing::warn!(
                            channel = %self.channel_id,
                            player = %seat.player_id,
                            seat = %seat.seat_id,
                            amount,
                            ?err,
                            "payout credit failed"
                        );
                        CreditStatus::Failed(err)
                    }
                }
            };

            report.entries.push(PayoutEntry {
                seat_id: seat.seat_id.clone(),
                player_id: seat.player_id.clone(),
                outcome: seat.outcome,
                amount,
                credit,
            });
        }

        tracing::info!(
            channel = %self.channel_id,
            game = self.id,
            credited = report.total_credited(),
            failures = report.failures().count(),
            "payouts processed"
        );
        Ok(Some(report))
    }

    /// Plays out the dealer if needed, then produces results and payouts.
    ///
    /// # Errors
    ///
    /// Returns an error if a seat is still playing, the game has not reached
    /// play yet, or the result cannot be persisted.
    pub fn finish_game(&self) -> Result<FinishedGame, ShowdownError> {
        let mut guard = self.table.lock();
        let table: &mut Table = &mut guard;

        if matches!(table.phase, Phase::Playing | Phase::Dealer) {
            self.play_dealer_table(table)?;
        }
        let result = self.results_table(table)?;
        let payouts = self.payouts_table(table)?;

        Ok(FinishedGame { result, payouts })
    }
}
