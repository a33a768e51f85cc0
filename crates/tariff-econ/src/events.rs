//! Random shocks rolled once per round after the economy update.
//!
//! The roll ignores the tariff and every other part of the state: events are
//! a pure perturbation layer, not a consequence of the player's choices.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tariff_core::SimulationState;

/// Chance per round that some event fires.
pub const EVENT_PROBABILITY: f64 = 0.15;

/// Source of uniform draws in [0, 1).
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

/// [`RandomSource`] backed by any `rand` generator.
#[derive(Clone, Debug)]
pub struct RngSource<R>(R);

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self(rng)
    }
}

impl RngSource<ChaCha8Rng> {
    /// Deterministic source for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.0.gen::<f64>()
    }
}

/// Replays a fixed list of draws. Once exhausted it keeps returning a value
/// that never triggers an event.
#[derive(Clone, Debug, Default)]
pub struct ScriptedSource {
    values: VecDeque<f64>,
}

impl ScriptedSource {
    /// Draw returned after the script runs out.
    pub const QUIET: f64 = 0.99;

    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    /// Draws not yet consumed.
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl RandomSource for ScriptedSource {
    fn next_unit(&mut self) -> f64 {
        self.values.pop_front().unwrap_or(Self::QUIET)
    }
}

/// Narrative shocks. Each one hits a single metric directly, bypassing the model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// GDP drops by 10%.
    FinancialCrisis,
    /// Imports drop by 20%.
    AllySupplyCutoff,
    /// Services lose 8 points, floored at 0.
    CorruptionScandal,
}

impl GameEvent {
    pub const ALL: [GameEvent; 3] = [
        GameEvent::FinancialCrisis,
        GameEvent::AllySupplyCutoff,
        GameEvent::CorruptionScandal,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GameEvent::FinancialCrisis => "financial crisis",
            GameEvent::AllySupplyCutoff => "ally supply cutoff",
            GameEvent::CorruptionScandal => "corruption scandal",
        }
    }

    /// Log line announcing the event.
    pub fn message(self) -> &'static str {
        match self {
            GameEvent::FinancialCrisis => "[Event] Global financial crisis, GDP slides.",
            GameEvent::AllySupplyCutoff => "[Event] Allies cut off supply, imports plunge.",
            GameEvent::CorruptionScandal => "[Event] Public corruption scandal, trust in services falls.",
        }
    }

    /// Apply the shock. Histories are left as recorded by the model.
    pub fn apply(self, state: &mut SimulationState) {
        match self {
            GameEvent::FinancialCrisis => state.gdp *= 0.9,
            GameEvent::AllySupplyCutoff => state.imports *= 0.8,
            GameEvent::CorruptionScandal => state.services = (state.services - 8.0).max(0.0),
        }
    }
}

/// Roll for this round's event.
///
/// Draws once; only when that draw is below [`EVENT_PROBABILITY`] is a second
/// draw taken to pick one of [`GameEvent::ALL`] uniformly.
pub fn roll_event<S: RandomSource + ?Sized>(source: &mut S) -> Option<GameEvent> {
    let r = source.next_unit();
    if r >= EVENT_PROBABILITY {
        return None;
    }
    let pick = source.next_unit() * GameEvent::ALL.len() as f64;
    let idx = (pick as usize).min(GameEvent::ALL.len() - 1);
    Some(GameEvent::ALL[idx])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_roll_consumes_one_draw() {
        let mut src = ScriptedSource::new([0.5, 0.0]);
        assert_eq!(roll_event(&mut src), None);
        assert_eq!(src.remaining(), 1);
    }

    #[test]
    fn threshold_is_exclusive() {
        let mut src = ScriptedSource::new([EVENT_PROBABILITY]);
        assert_eq!(roll_event(&mut src), None);
        let mut src = ScriptedSource::new([0.1499, 0.0]);
        assert_eq!(roll_event(&mut src), Some(GameEvent::FinancialCrisis));
    }

    #[test]
    fn second_draw_selects_event() {
        let cases = [
            (0.0, GameEvent::FinancialCrisis),
            (0.33, GameEvent::FinancialCrisis),
            (0.34, GameEvent::AllySupplyCutoff),
            (0.66, GameEvent::AllySupplyCutoff),
            (0.67, GameEvent::CorruptionScandal),
            (0.999_999, GameEvent::CorruptionScandal),
        ];
        for (pick, expected) in cases {
            let mut src = ScriptedSource::new([0.01, pick]);
            assert_eq!(roll_event(&mut src), Some(expected), "pick {pick}");
            assert_eq!(src.remaining(), 0);
        }
    }

    #[test]
    fn exhausted_script_is_quiet() {
        let mut src = ScriptedSource::default();
        for _ in 0..10 {
            assert_eq!(roll_event(&mut src), None);
        }
    }

    #[test]
    fn effects_hit_single_metric() {
        let base = SimulationState::new();

        let mut s = base.clone();
        GameEvent::FinancialCrisis.apply(&mut s);
        assert!((s.gdp - base.gdp * 0.9).abs() < 1e-9);
        assert_eq!(s.imports, base.imports);
        assert_eq!(s.gdp_history, base.gdp_history);

        let mut s = base.clone();
        GameEvent::AllySupplyCutoff.apply(&mut s);
        assert!((s.imports - base.imports * 0.8).abs() < 1e-9);
        assert_eq!(s.gdp, base.gdp);

        let mut s = base.clone();
        GameEvent::CorruptionScandal.apply(&mut s);
        assert_eq!(s.services, base.services - 8.0);
        s.services = 5.0;
        GameEvent::CorruptionScandal.apply(&mut s);
        assert_eq!(s.services, 0.0);
    }

    #[test]
    fn seeded_source_is_reproducible() {
        let mut a = RngSource::seeded(42);
        let mut b = RngSource::seeded(42);
        for _ in 0..100 {
            let x = a.next_unit();
            assert!((0.0..1.0).contains(&x));
            assert_eq!(x, b.next_unit());
        }
    }

    #[test]
    fn event_rate_is_roughly_fifteen_percent() {
        let mut src = RngSource::seeded(7);
        let hits = (0..20_000)
            .filter(|_| roll_event(&mut src).is_some())
            .count();
        let rate = hits as f64 / 20_000.0;
        assert!((0.13..0.17).contains(&rate), "rate {rate}");
    }
}
