#![deny(warnings)]

//! Round orchestration for Tariff Showdown.
//!
//! [`RoundController`] owns the session state and runs one round per player
//! command: move the tariff, run the economy model, roll for an event, log a
//! status line and check whether the term is over. It also exposes the
//! read-only [`RoundView`] that front ends render from.

use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tariff_core::{FinalSummary, Phase, SimulationState, TariffCommand, MAX_ROUNDS};
use tariff_econ::{apply_round, roll_event, EconomyParams, GameEvent, RandomSource, RngSource};
use thiserror::Error;
use tracing::{debug, info};

/// Errors returned by the controller.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ControllerError {
    /// Rounds cannot be played once the session is terminal.
    #[error("the game is over; no further rounds can be played")]
    GameOver,
}

/// What happened during one call to [`RoundController::advance`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundReport {
    /// Round counter after the advance.
    pub round: u32,
    pub tariff_rate: f64,
    pub gdp: f64,
    pub services: f64,
    pub support: f64,
    pub event: Option<GameEvent>,
    /// True on the single advance that ended the session.
    pub finished: bool,
}

/// Everything a renderer needs for one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundView {
    pub round_count: u32,
    pub max_rounds: u32,
    pub tariff_rate: f64,
    pub gdp: f64,
    pub imports: f64,
    pub production: f64,
    pub revenue: f64,
    pub services: f64,
    pub support: f64,
    pub messages: Vec<String>,
    pub gdp_history: Vec<f64>,
    pub support_history: Vec<f64>,
    pub phase: Phase,
    pub summary: Option<FinalSummary>,
}

/// Single owner of a session. All mutation goes through [`Self::advance`].
#[derive(Debug)]
pub struct RoundController<S = RngSource<ChaCha8Rng>> {
    state: SimulationState,
    params: EconomyParams,
    source: S,
    phase: Phase,
    summary: Option<FinalSummary>,
}

impl RoundController {
    /// Controller drawing events from a `ChaCha8Rng` seeded with `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::with_source(RngSource::seeded(seed))
    }
}

impl<S: RandomSource> RoundController<S> {
    pub fn with_source(source: S) -> Self {
        Self {
            state: SimulationState::new(),
            params: EconomyParams::DEFAULT,
            source,
            phase: Phase::Active,
            summary: None,
        }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_terminal(&self) -> bool {
        self.phase == Phase::Terminal
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Summary computed when the session ended; `None` while active.
    pub fn summary(&self) -> Option<&FinalSummary> {
        self.summary.as_ref()
    }

    /// Final score, available once terminal. Repeated calls return the
    /// cached value.
    pub fn final_score(&self) -> Option<f64> {
        self.summary.map(|s| s.score)
    }

    pub fn increase_tariff(&mut self) -> Result<RoundReport, ControllerError> {
        self.advance(TariffCommand::Increase)
    }

    pub fn decrease_tariff(&mut self) -> Result<RoundReport, ControllerError> {
        self.advance(TariffCommand::Decrease)
    }

    /// Play one round. Fails without touching state once terminal.
    pub fn advance(&mut self, command: TariffCommand) -> Result<RoundReport, ControllerError> {
        if self.phase == Phase::Terminal {
            return Err(ControllerError::GameOver);
        }

        let state = &mut self.state;
        state.tariff_rate = command.apply(state.tariff_rate);
        state.round_count += 1;
        apply_round(state, &self.params);

        let event = roll_event(&mut self.source);
        if let Some(ev) = event {
            ev.apply(state);
            state.messages.push(ev.message());
            info!(round = state.round_count, event = ev.name(), "event fired");
        }

        state.messages.push(format!(
            "Round {}: tariff at {:.1}%",
            state.round_count,
            state.tariff_rate * 100.0
        ));
        debug!(
            round = state.round_count,
            ?command,
            tariff = state.tariff_rate,
            gdp = state.gdp,
            services = state.services,
            support = state.support,
            "round advanced"
        );

        let finished = state.rounds_exhausted();
        if finished {
            let summary = FinalSummary::from_state(state);
            info!(score = summary.score, outcome = ?summary.outcome, "game over");
            self.summary = Some(summary);
            self.phase = Phase::Terminal;
        }

        Ok(RoundReport {
            round: self.state.round_count,
            tariff_rate: self.state.tariff_rate,
            gdp: self.state.gdp,
            services: self.state.services,
            support: self.state.support,
            event,
            finished,
        })
    }

    /// Read model for front ends.
    pub fn view(&self) -> RoundView {
        let s = &self.state;
        RoundView {
            round_count: s.round_count,
            max_rounds: MAX_ROUNDS,
            tariff_rate: s.tariff_rate,
            gdp: s.gdp,
            imports: s.imports,
            production: s.production,
            revenue: s.revenue,
            services: s.services,
            support: s.support,
            messages: s.messages.to_vec(),
            gdp_history: s.gdp_history.clone(),
            support_history: s.support_history.clone(),
            phase: self.phase,
            summary: self.summary,
        }
    }
}
