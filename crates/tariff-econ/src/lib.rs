#![deny(warnings)]

//! Economic model for Tariff Showdown.
//!
//! This crate provides:
//! - The closed-form per-round update (imports, production, revenue, GDP,
//!   services, support) driven by the tariff rate
//! - Random narrative shocks applied after the update (see [`events`])
//!
//! GDP and support are recomputed from the base constants every round, while
//! services accumulates: each round's value starts from the previous one.

use serde::{Deserialize, Serialize};
use tariff_core::{SimulationState, BASE_GDP, BASE_IMPORTS, BASE_PRODUCTION, BASE_SERVICES};
use tracing::trace;

pub mod events;

pub use events::{
    roll_event, GameEvent, RandomSource, RngSource, ScriptedSource, EVENT_PROBABILITY,
};

/// Fixed model coefficients. The game does not expose these for tuning.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EconomyParams {
    pub base_gdp: f64,
    pub base_imports: f64,
    pub base_production: f64,
    /// How strongly the tariff suppresses imports.
    pub tariff_factor: f64,
    /// Share of displaced imports replaced by domestic production.
    pub substitution: f64,
    /// GDP lost per unit of displaced imports.
    pub friction: f64,
    /// GDP gained per unit of tariff revenue.
    pub revenue_gdp_multiplier: f64,
    /// Services gained per unit of revenue (before the 0.01 scale).
    pub service_multiplier: f64,
    /// Support gained per unit of GDP above baseline.
    pub gdp_support: f64,
    /// Support gained per point of services above the neutral level.
    pub service_support: f64,
    /// Support with GDP at baseline and services at the neutral level.
    pub support_baseline: f64,
    /// Services level at which services neither add nor remove support.
    pub services_neutral: f64,
}

impl EconomyParams {
    pub const DEFAULT: Self = Self {
        base_gdp: BASE_GDP,
        base_imports: BASE_IMPORTS,
        base_production: BASE_PRODUCTION,
        tariff_factor: 2.0,
        substitution: 0.3,
        friction: 0.15,
        revenue_gdp_multiplier: 0.1,
        service_multiplier: 0.5,
        gdp_support: 0.002,
        service_support: 0.3,
        support_baseline: 50.0,
        services_neutral: BASE_SERVICES,
    };
}

impl Default for EconomyParams {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Output of one model evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EconomyResult {
    pub imports: f64,
    /// Imports displaced by the tariff relative to baseline.
    pub import_reduction: f64,
    pub production: f64,
    pub revenue: f64,
    pub gdp: f64,
    pub services: f64,
    pub support: f64,
}

/// Evaluate the model for `tariff_rate` given last round's services.
///
/// `tariff_rate` is expected in [0, 1]; the divisor
/// `1 + tariff_rate * tariff_factor` is then at least 1.
///
/// Example:
/// let r = update(0.0, 70.0, &EconomyParams::DEFAULT);
/// assert_eq!(r.gdp, 10_000.0);
pub fn update(tariff_rate: f64, services_prev: f64, p: &EconomyParams) -> EconomyResult {
    let imports = p.base_imports / (1.0 + tariff_rate * p.tariff_factor);
    let import_reduction = p.base_imports - imports;
    let production = p.base_production + import_reduction * p.substitution;
    let revenue = imports * tariff_rate;
    let gdp = p.base_gdp + (production - p.base_production) - import_reduction * p.friction
        + revenue * p.revenue_gdp_multiplier;
    let services = (services_prev + revenue * p.service_multiplier * 0.01).clamp(0.0, 100.0);
    let support = (p.support_baseline
        + (gdp - p.base_gdp) * p.gdp_support
        + (services - p.services_neutral) * p.service_support)
        .clamp(0.0, 100.0);

    EconomyResult {
        imports,
        import_reduction,
        production,
        revenue,
        gdp,
        services,
        support,
    }
}

/// Run the model against `state`, store the result and extend both histories.
pub fn apply_round(state: &mut SimulationState, p: &EconomyParams) -> EconomyResult {
    let r = update(state.tariff_rate, state.services, p);
    state.imports = r.imports;
    state.production = r.production;
    state.revenue = r.revenue;
    state.gdp = r.gdp;
    state.services = r.services;
    state.support = r.support;
    state.gdp_history.push(r.gdp);
    state.support_history.push(r.support);
    trace!(
        tariff = state.tariff_rate,
        gdp = r.gdp,
        services = r.services,
        support = r.support,
        "economy updated"
    );
    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tariff_core::INITIAL_SUPPORT;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn zero_tariff_reproduces_initial_state() {
        let s = SimulationState::new();
        let r = update(0.0, s.services, &EconomyParams::DEFAULT);
        assert_eq!(r.imports, s.imports);
        assert_eq!(r.production, s.production);
        assert_eq!(r.gdp, s.gdp);
        assert_eq!(r.revenue, 0.0);
        assert_eq!(r.services, s.services);
        assert_eq!(r.support, INITIAL_SUPPORT);
    }

    #[test]
    fn five_percent_tariff() {
        let r = update(0.05, 70.0, &EconomyParams::DEFAULT);
        let imports = 3000.0 / 1.1;
        let reduction = 3000.0 - imports;
        let revenue = imports * 0.05;
        let gdp = 10_000.0 + reduction * 0.3 - reduction * 0.15 + revenue * 0.1;
        assert!(close(r.imports, imports));
        assert!(close(r.import_reduction, reduction));
        assert!(close(r.production, 7000.0 + reduction * 0.3));
        assert!(close(r.revenue, revenue));
        assert!(close(r.gdp, gdp));
        assert!((r.imports - 2727.27).abs() < 0.01);
        assert!((r.production - 7081.82).abs() < 0.01);
        assert!((r.revenue - 136.36).abs() < 0.01);
        assert!((r.gdp - 10054.55).abs() < 0.01);
        assert!(close(r.services, 70.0 + revenue * 0.005));
    }

    #[test]
    fn services_accumulate_across_rounds() {
        let mut s = SimulationState::new();
        s.tariff_rate = 0.5;
        let first = apply_round(&mut s, &EconomyParams::DEFAULT);
        let second = apply_round(&mut s, &EconomyParams::DEFAULT);
        assert_eq!(first.gdp, second.gdp);
        assert!(second.services > first.services);
        assert!(close(
            second.services - first.services,
            first.revenue * 0.005
        ));
        assert_eq!(s.gdp_history.len(), 3);
        assert_eq!(s.support_history, vec![INITIAL_SUPPORT, first.support, second.support]);
    }

    #[test]
    fn services_and_support_saturate() {
        let r = update(1.0, 99.99, &EconomyParams::DEFAULT);
        assert_eq!(r.services, 100.0);
        let r = update(0.0, 0.0, &EconomyParams::DEFAULT);
        assert_eq!(r.services, 0.0);
        assert!(close(r.support, 50.0 - 70.0 * 0.3));
        let r = update(1.0, 100.0, &EconomyParams::DEFAULT);
        assert!(r.support <= 100.0);
    }

    proptest! {
        #[test]
        fn imports_non_increasing_in_tariff(a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let p = EconomyParams::DEFAULT;
            prop_assert!(update(hi, 70.0, &p).imports <= update(lo, 70.0, &p).imports);
        }

        #[test]
        fn outputs_stay_bounded(t in 0.0f64..=1.0, services in 0.0f64..=100.0) {
            let r = update(t, services, &EconomyParams::DEFAULT);
            prop_assert!((0.0..=100.0).contains(&r.services));
            prop_assert!((0.0..=100.0).contains(&r.support));
            prop_assert!(r.revenue >= 0.0);
            prop_assert!(r.imports > 0.0 && r.imports <= BASE_IMPORTS);
        }
    }
}
