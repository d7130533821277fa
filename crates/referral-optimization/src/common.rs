use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifetime referral cap applied when no configuration is given.
pub const DEFAULT_MAX_REFERRALS_PER_USER: u32 = 10;

/// Upper end of the bonus search range, in whole currency units.
pub const DEFAULT_MAX_BONUS: u64 = 10_000;

/// Invalid model parameters.
#[derive(Error, Debug, PartialEq)]
pub enum OptimizationError {
    #[error("max_referrals_per_user must be positive")]
    ZeroReferralCap,

    #[error("initial_cohort must be positive")]
    EmptyInitialCohort,
}

pub type OptimizationResult<T> = Result<T, OptimizationError>;

/// Growth model policy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthConfig {
    /// No user makes more than this many referrals over its lifetime.
    pub max_referrals_per_user: u32,
    /// Fresh referrers assumed when the graph has no users at all.
    pub initial_cohort: u32,
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            max_referrals_per_user: DEFAULT_MAX_REFERRALS_PER_USER,
            initial_cohort: 1,
        }
    }
}

impl GrowthConfig {
    pub fn validate(&self) -> OptimizationResult<()> {
        if self.max_referrals_per_user == 0 {
            return Err(OptimizationError::ZeroReferralCap);
        }
        if self.initial_cohort == 0 {
            return Err(OptimizationError::EmptyInitialCohort);
        }
        Ok(())
    }
}

/// Configuration for the bonus search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BonusConfig {
    /// Inclusive upper bound of the search range. Granularity is one unit.
    pub max_bonus: u64,
}

impl Default for BonusConfig {
    fn default() -> Self {
        Self {
            max_bonus: DEFAULT_MAX_BONUS,
        }
    }
}

/// A group of referrers that share the same referral history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cohort {
    /// Expected number of members (fractional in the expected-value model)
    pub size: f64,
    /// Referrals each member has made so far
    pub made: f64,
}

/// Starting state of a simulation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GrowthSeed {
    /// Referrals that already exist; every projection starts here.
    pub existing_referrals: f64,
    pub cohorts: Vec<Cohort>,
}

impl GrowthSeed {
    /// Build a seed from the direct referral count of every known user.
    ///
    /// Users are grouped by count; users already at the cap cannot refer
    /// and are left out. With no users at all, `initial_cohort` fresh
    /// referrers are used instead.
    pub fn from_referral_counts<I>(counts: I, config: &GrowthConfig) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let cap = config.max_referrals_per_user as usize;
        let mut histogram = vec![0usize; cap];
        let mut existing = 0usize;
        let mut users = 0usize;

        for count in counts {
            users += 1;
            existing += count;
            if count < cap {
                histogram[count] += 1;
            }
        }

        let cohorts = if users == 0 {
            vec![Cohort {
                size: config.initial_cohort as f64,
                made: 0.0,
            }]
        } else {
            histogram
                .into_iter()
                .enumerate()
                .filter(|&(_, members)| members > 0)
                .map(|(made, members)| Cohort {
                    size: members as f64,
                    made: made as f64,
                })
                .collect()
        };

        Self {
            existing_referrals: existing as f64,
            cohorts,
        }
    }

    /// Referrers able to make at least one more referral
    pub fn active_referrers(&self) -> f64 {
        self.cohorts.iter().map(|c| c.size).sum()
    }
}

/// Maps a bonus amount to the daily probability that a referrer refers.
///
/// Implementations must be monotonically non-decreasing in `bonus`; the
/// bonus search relies on it.
pub trait AdoptionCurve: Send + Sync {
    fn probability(&self, bonus: u64) -> f64;
}

impl<F> AdoptionCurve for F
where
    F: Fn(u64) -> f64 + Send + Sync,
{
    fn probability(&self, bonus: u64) -> f64 {
        self(bonus)
    }
}

/// `min(ceiling, base + bonus / 1000 * slope_per_thousand)`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearAdoptionCurve {
    pub base: f64,
    pub slope_per_thousand: f64,
    pub ceiling: f64,
}

impl Default for LinearAdoptionCurve {
    fn default() -> Self {
        Self {
            base: 0.1,
            slope_per_thousand: 0.8,
            ceiling: 0.9,
        }
    }
}

impl AdoptionCurve for LinearAdoptionCurve {
    fn probability(&self, bonus: u64) -> f64 {
        let linear = self.base + (bonus as f64 / 1000.0) * self.slope_per_thousand;
        linear.min(self.ceiling).clamp(0.0, 1.0)
    }
}

/// A hiring goal: reach `target` cumulative referrals within `days`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BonusTarget {
    pub days: usize,
    pub target: u64,
}

/// Outcome of a minimum-bonus search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BonusOutcome {
    /// Smallest bonus in range that reaches the target
    Achievable { bonus: u64, projected: f64 },
    /// Even the largest bonus falls short
    Unachievable { best_projection: f64 },
}

impl BonusOutcome {
    pub fn bonus(&self) -> Option<u64> {
        match self {
            BonusOutcome::Achievable { bonus, .. } => Some(*bonus),
            BonusOutcome::Unachievable { .. } => None,
        }
    }

    pub fn is_achievable(&self) -> bool {
        matches!(self, BonusOutcome::Achievable { .. })
    }
}

/// A target together with its search outcome.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BonusPlan {
    pub target: BonusTarget,
    pub outcome: BonusOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_groups_by_count() {
        let config = GrowthConfig::default();
        let seed = GrowthSeed::from_referral_counts([2, 0, 0, 10, 2, 1], &config);

        assert_eq!(seed.existing_referrals, 15.0);
        assert_eq!(
            seed.cohorts,
            vec![
                Cohort { size: 2.0, made: 0.0 },
                Cohort { size: 1.0, made: 1.0 },
                Cohort { size: 2.0, made: 2.0 },
            ]
        );
        // The user at the cap is not active
        assert_eq!(seed.active_referrers(), 5.0);
    }

    #[test]
    fn test_seed_for_empty_graph() {
        let config = GrowthConfig {
            initial_cohort: 3,
            ..Default::default()
        };
        let seed = GrowthSeed::from_referral_counts(std::iter::empty(), &config);
        assert_eq!(seed.existing_referrals, 0.0);
        assert_eq!(seed.active_referrers(), 3.0);
    }

    #[test]
    fn test_config_validation() {
        assert!(GrowthConfig::default().validate().is_ok());
        let zero_cap = GrowthConfig {
            max_referrals_per_user: 0,
            ..Default::default()
        };
        assert_eq!(zero_cap.validate(), Err(OptimizationError::ZeroReferralCap));
    }

    #[test]
    fn test_linear_curve() {
        let curve = LinearAdoptionCurve::default();
        assert!((curve.probability(0) - 0.1).abs() < 1e-12);
        assert!((curve.probability(500) - 0.5).abs() < 1e-12);
        assert!((curve.probability(1000) - 0.9).abs() < 1e-12);
        assert!((curve.probability(50_000) - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_closure_curve() {
        let curve = |bonus: u64| if bonus >= 100 { 0.5 } else { 0.0 };
        assert_eq!(curve.probability(99), 0.0);
        assert_eq!(AdoptionCurve::probability(&curve, 100), 0.5);
    }
}
