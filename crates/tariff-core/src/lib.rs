#![deny(warnings)]

//! Core domain models and invariants for Tariff Showdown.
//!
//! This crate defines the serializable session state shared by the economy
//! model and the round controller, with validation helpers to guarantee the
//! basic invariants (bounded metrics, one history entry per round, bounded
//! message log).

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use thiserror::Error;

/// Number of playable rounds. The session ends once the counter exceeds it.
pub const MAX_ROUNDS: u32 = 20;
/// Tariff change applied by a single player command.
pub const TARIFF_STEP: f64 = 0.05;
/// Number of messages retained by [`MessageLog`].
pub const MESSAGE_CAPACITY: usize = 5;

/// Baseline GDP (in hundred-million USD) with no tariff in place.
pub const BASE_GDP: f64 = 10_000.0;
/// Baseline imports with no tariff in place.
pub const BASE_IMPORTS: f64 = 3_000.0;
/// Baseline domestic production with no tariff in place.
pub const BASE_PRODUCTION: f64 = 7_000.0;
/// Services quality at session start; also the neutral point of the support formula.
pub const BASE_SERVICES: f64 = 70.0;
/// Support produced by the economy at zero tariff and baseline services.
pub const INITIAL_SUPPORT: f64 = 50.0;

/// First entry of every message log.
pub const WELCOME_MESSAGE: &str = "Welcome to Tariff Showdown!";

/// The only two moves a player can make.
///
/// Keeping the delta behind an enum means callers cannot advance the
/// simulation with a step the model does not define.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TariffCommand {
    /// Raise the tariff by [`TARIFF_STEP`].
    Increase,
    /// Lower the tariff by [`TARIFF_STEP`].
    Decrease,
}

impl TariffCommand {
    /// Signed change to the tariff rate.
    pub fn delta(self) -> f64 {
        match self {
            TariffCommand::Increase => TARIFF_STEP,
            TariffCommand::Decrease => -TARIFF_STEP,
        }
    }

    /// Apply the command to `rate`, clamping the result to [0, 1].
    pub fn apply(self, rate: f64) -> f64 {
        (rate + self.delta()).clamp(0.0, 1.0)
    }
}

/// Lifecycle of a session. `Terminal` is absorbing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Active,
    Terminal,
}

/// How the player's term ends, decided by final support.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Support above 80.
    DecisiveReelection,
    /// Support in (60, 80].
    NarrowSurvival,
    /// Support at or below 60.
    Removed,
}

impl Outcome {
    /// Classify final support. Thresholds are checked top-down.
    pub fn from_support(support: f64) -> Self {
        if support > 80.0 {
            Outcome::DecisiveReelection
        } else if support > 60.0 {
            Outcome::NarrowSurvival
        } else {
            Outcome::Removed
        }
    }

    /// Ending-screen headline.
    pub fn headline(self) -> &'static str {
        match self {
            Outcome::DecisiveReelection => "You were re-elected with overwhelming support!",
            Outcome::NarrowSurvival => "You barely held on to power; reform still needs work.",
            Outcome::Removed => "You were removed from office; the reform failed.",
        }
    }
}

/// Final score: `gdp + services * 10 + support * 20`.
pub fn final_score(gdp: f64, services: f64, support: f64) -> f64 {
    gdp + services * 10.0 + support * 20.0
}

/// Scored result of a finished session.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FinalSummary {
    pub score: f64,
    pub outcome: Outcome,
    /// Metrics the score was computed from.
    pub gdp: f64,
    pub services: f64,
    pub support: f64,
}

impl FinalSummary {
    /// Score the current state.
    pub fn from_state(state: &SimulationState) -> Self {
        Self {
            score: final_score(state.gdp, state.services, state.support),
            outcome: Outcome::from_support(state.support),
            gdp: state.gdp,
            services: state.services,
            support: state.support,
        }
    }
}

/// Fixed-capacity FIFO of status messages; the oldest entry is evicted first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MessageLog {
    entries: VecDeque<String>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(MESSAGE_CAPACITY),
        }
    }

    /// Append a message. Empty messages are ignored.
    pub fn push(&mut self, message: impl Into<String>) {
        let message = message.into();
        if message.is_empty() {
            return;
        }
        if self.entries.len() == MESSAGE_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(message);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Messages from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn latest(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new()
    }
}

/// Whole session state: the tariff set by the player, the derived economy,
/// trend histories for charting and the message log.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    /// Current round, starting at 1.
    pub round_count: u32,
    /// Tariff rate in [0, 1].
    pub tariff_rate: f64,
    pub gdp: f64,
    pub imports: f64,
    pub production: f64,
    /// Tariff revenue of the last round.
    pub revenue: f64,
    /// Public services quality in [0, 100]; accumulates across rounds.
    pub services: f64,
    /// Public support in [0, 100].
    pub support: f64,
    /// GDP per round; index 0 is the state before round 1.
    pub gdp_history: Vec<f64>,
    /// Support per round; index 0 is the state before round 1.
    pub support_history: Vec<f64>,
    pub messages: MessageLog,
}

impl SimulationState {
    /// Session start: zero tariff, baseline economy, one history entry.
    pub fn new() -> Self {
        let mut messages = MessageLog::new();
        messages.push(WELCOME_MESSAGE);
        Self {
            round_count: 1,
            tariff_rate: 0.0,
            gdp: BASE_GDP,
            imports: BASE_IMPORTS,
            production: BASE_PRODUCTION,
            revenue: 0.0,
            services: BASE_SERVICES,
            support: INITIAL_SUPPORT,
            gdp_history: vec![BASE_GDP],
            support_history: vec![INITIAL_SUPPORT],
            messages,
        }
    }

    /// True once the round counter has passed [`MAX_ROUNDS`].
    pub fn rounds_exhausted(&self) -> bool {
        self.round_count > MAX_ROUNDS
    }
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::new()
    }
}

/// Validation errors for state invariants.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Round counter starts at 1.
    #[error("round counter must start at 1")]
    RoundBeforeStart,
    /// Tariff must be within [0, 1].
    #[error("tariff rate {0} is out of range [0,1]")]
    TariffOutOfRange(f64),
    /// Services or support outside [0, 100].
    #[error("{name} = {value} is out of range [0,100]")]
    MetricOutOfRange { name: &'static str, value: f64 },
    /// Numeric field must be finite.
    #[error("non-finite value in {0}")]
    NonFinite(&'static str),
    /// Histories must hold exactly one entry per round.
    #[error("history length mismatch: round {round}, gdp {gdp}, support {support}")]
    HistoryLength {
        round: u32,
        gdp: usize,
        support: usize,
    },
    /// Message log above capacity.
    #[error("message log holds {0} entries, above capacity")]
    MessageOverflow(usize),
}

fn check_finite(name: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NonFinite(name))
    }
}

fn check_percent(name: &'static str, value: f64) -> Result<(), ValidationError> {
    check_finite(name, value)?;
    if !(0.0..=100.0).contains(&value) {
        return Err(ValidationError::MetricOutOfRange { name, value });
    }
    Ok(())
}

/// Validate a session state.
pub fn validate_state(state: &SimulationState) -> Result<(), ValidationError> {
    if state.round_count == 0 {
        return Err(ValidationError::RoundBeforeStart);
    }
    check_finite("tariff_rate", state.tariff_rate)?;
    if !(0.0..=1.0).contains(&state.tariff_rate) {
        return Err(ValidationError::TariffOutOfRange(state.tariff_rate));
    }
    check_finite("gdp", state.gdp)?;
    check_finite("imports", state.imports)?;
    check_finite("production", state.production)?;
    check_finite("revenue", state.revenue)?;
    check_percent("services", state.services)?;
    check_percent("support", state.support)?;

    let round = state.round_count as usize;
    if state.gdp_history.len() != round || state.support_history.len() != round {
        return Err(ValidationError::HistoryLength {
            round: state.round_count,
            gdp: state.gdp_history.len(),
            support: state.support_history.len(),
        });
    }
    if state.messages.len() > MESSAGE_CAPACITY {
        return Err(ValidationError::MessageOverflow(state.messages.len()));
    }
    Ok(())
}
