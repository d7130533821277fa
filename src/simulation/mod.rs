//! Growth projection and bonus search over the current graph
//!
//! The simulation and search live in `referral-optimization`; this module
//! seeds them from the graph (existing referrals and per-user referral
//! counts) and applies the engine configuration.

use crate::graph::ReferralGraph;
use referral_optimization::{
    AdoptionCurve, BonusOptimizer, BonusOutcome, BonusPlan, BonusTarget, GrowthSeed,
    GrowthSimulator,
};

pub use referral_optimization::{daily_growth, LinearAdoptionCurve};

impl ReferralGraph {
    /// Starting state for projections: existing edges plus every user
    /// grouped by how many referrals it has made
    pub fn growth_seed(&self) -> GrowthSeed {
        GrowthSeed::from_referral_counts(
            self.child_lists().iter().map(Vec::len),
            &self.config().growth,
        )
    }

    /// Expected cumulative referrals for each of the next `days` days when
    /// every active referrer refers with daily probability `probability`
    pub fn simulate(&self, probability: f64, days: usize) -> Vec<f64> {
        self.simulator().simulate(&self.growth_seed(), probability, days)
    }

    /// One projection per probability, computed in parallel
    pub fn simulate_scenarios(&self, probabilities: &[f64], days: usize) -> Vec<Vec<f64>> {
        self.simulator()
            .simulate_scenarios(&self.growth_seed(), probabilities, days)
    }

    /// Smallest whole bonus in `[0, max_bonus]` whose projection reaches
    /// `target` within `days`, or `Unachievable`
    pub fn min_bonus_for_target<C>(&self, days: usize, target: u64, adoption: &C) -> BonusOutcome
    where
        C: AdoptionCurve + ?Sized,
    {
        self.optimizer()
            .min_bonus_for_target(&self.growth_seed(), days, target, adoption)
    }

    /// Bonus search for several targets, computed in parallel
    pub fn plan_bonuses<C>(&self, targets: &[BonusTarget], adoption: &C) -> Vec<BonusPlan>
    where
        C: AdoptionCurve + ?Sized,
    {
        self.optimizer().plan(&self.growth_seed(), targets, adoption)
    }

    fn simulator(&self) -> GrowthSimulator {
        GrowthSimulator::new(self.config().growth.clone())
    }

    fn optimizer(&self) -> BonusOptimizer {
        BonusOptimizer::new(self.config().bonus.clone(), self.simulator())
    }
}
