//! Minimum referral bonus search
//!
//! The projected total after `days` is non-decreasing in the referral
//! probability, and the adoption curve is non-decreasing in the bonus, so the
//! projection is monotone in the bonus and a binary search over whole
//! currency units finds the smallest sufficient bonus in
//! `O(log2(max_bonus))` simulations.

use crate::common::{AdoptionCurve, BonusConfig, BonusOutcome, BonusPlan, BonusTarget, GrowthSeed};
use crate::growth::GrowthSimulator;
use rayon::prelude::*;
use tracing::{debug, info};

pub struct BonusOptimizer {
    pub config: BonusConfig,
    pub simulator: GrowthSimulator,
}

impl BonusOptimizer {
    pub fn new(config: BonusConfig, simulator: GrowthSimulator) -> Self {
        Self { config, simulator }
    }

    /// Smallest bonus in `[0, max_bonus]` whose projection after `days`
    /// reaches `target`
    pub fn min_bonus_for_target<C>(
        &self,
        seed: &GrowthSeed,
        days: usize,
        target: u64,
        curve: &C,
    ) -> BonusOutcome
    where
        C: AdoptionCurve + ?Sized,
    {
        let target_value = target as f64;
        let projected =
            |bonus: u64| self.simulator.project(seed, curve.probability(bonus), days);

        let max_bonus = self.config.max_bonus;
        let best = projected(max_bonus);
        if best < target_value {
            info!(
                "Target {} in {} days unachievable: best projection {:.1} at bonus {}",
                target, days, best, max_bonus
            );
            return BonusOutcome::Unachievable {
                best_projection: best,
            };
        }

        let at_zero = projected(0);
        if at_zero >= target_value {
            debug!("Target {} in {} days reached without a bonus", target, days);
            return BonusOutcome::Achievable {
                bonus: 0,
                projected: at_zero,
            };
        }

        // Invariant: `low` falls short, `high` reaches the target
        let (mut low, mut high) = (0u64, max_bonus);
        let mut high_projection = best;
        while high - low > 1 {
            let mid = low + (high - low) / 2;
            let value = projected(mid);
            if value >= target_value {
                high = mid;
                high_projection = value;
            } else {
                low = mid;
            }
        }

        info!(
            "Minimum bonus for {} referrals in {} days: {} (projected {:.1})",
            target, days, high, high_projection
        );
        BonusOutcome::Achievable {
            bonus: high,
            projected: high_projection,
        }
    }

    /// Evaluate several targets in parallel
    pub fn plan<C>(&self, seed: &GrowthSeed, targets: &[BonusTarget], curve: &C) -> Vec<BonusPlan>
    where
        C: AdoptionCurve + ?Sized,
    {
        targets
            .par_iter()
            .map(|target| BonusPlan {
                target: target.clone(),
                outcome: self.min_bonus_for_target(seed, target.days, target.target, curve),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{Cohort, GrowthConfig, LinearAdoptionCurve};

    fn optimizer(max_bonus: u64) -> BonusOptimizer {
        BonusOptimizer::new(
            BonusConfig { max_bonus },
            GrowthSimulator::new(GrowthConfig::default()),
        )
    }

    fn seed() -> GrowthSeed {
        GrowthSeed {
            existing_referrals: 10.0,
            cohorts: vec![Cohort {
                size: 20.0,
                made: 0.0,
            }],
        }
    }

    #[test]
    fn test_minimal_bonus() {
        let opt = optimizer(10_000);
        let curve = LinearAdoptionCurve::default();
        let s = seed();

        let outcome = opt.min_bonus_for_target(&s, 10, 200, &curve);
        let bonus = outcome.bonus().expect("target should be reachable");
        assert!(bonus > 0);

        let sim = &opt.simulator;
        assert!(sim.project(&s, curve.probability(bonus), 10) >= 200.0);
        assert!(sim.project(&s, curve.probability(bonus - 1), 10) < 200.0);
    }

    #[test]
    fn test_target_already_met() {
        let opt = optimizer(1_000);
        let outcome = opt.min_bonus_for_target(&seed(), 5, 10, &|_: u64| 0.0);
        assert_eq!(
            outcome,
            BonusOutcome::Achievable {
                bonus: 0,
                projected: 10.0
            }
        );
    }

    #[test]
    fn test_unachievable() {
        let opt = optimizer(1_000);
        let outcome = opt.min_bonus_for_target(&seed(), 3, 1_000_000, &LinearAdoptionCurve::default());
        assert!(!outcome.is_achievable());
        match outcome {
            BonusOutcome::Unachievable { best_projection } => assert!(best_projection < 1_000_000.0),
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_step_curve_finds_threshold() {
        let opt = optimizer(10_000);
        // Nothing happens below 4321, full adoption at and above it
        let curve = |bonus: u64| if bonus >= 4321 { 1.0 } else { 0.0 };
        let outcome = opt.min_bonus_for_target(&seed(), 1, 30, &curve);
        assert_eq!(outcome.bonus(), Some(4321));
    }

    #[test]
    fn test_zero_days_uses_seed_total() {
        let opt = optimizer(100);
        let curve = LinearAdoptionCurve::default();
        assert_eq!(opt.min_bonus_for_target(&seed(), 0, 10, &curve).bonus(), Some(0));
        assert!(!opt.min_bonus_for_target(&seed(), 0, 11, &curve).is_achievable());
    }

    #[test]
    fn test_plan_matches_single_searches() {
        let opt = optimizer(10_000);
        let curve = LinearAdoptionCurve::default();
        let s = seed();
        let targets = vec![
            BonusTarget { days: 30, target: 500 },
            BonusTarget { days: 2, target: 1_000_000 },
        ];

        let plans = opt.plan(&s, &targets, &curve);
        assert_eq!(plans.len(), 2);
        assert_eq!(plans[0].outcome, opt.min_bonus_for_target(&s, 30, 500, &curve));
        assert!(!plans[1].outcome.is_achievable());
    }
}
