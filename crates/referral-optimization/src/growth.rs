//! Deterministic referral growth projection
//!
//! Expected-value recurrence, no random trials:
//! - every member of an active cohort makes `min(p, cap - made)` referrals a day
//! - referrals generated on day `i` form a new cohort active from day `i + 1`
//! - cohorts whose members reached the cap drop out
//!
//! Day `i` of the output is the existing referral count plus everything
//! generated through day `i`, so the series never decreases. Values saturate
//! at `f64::MAX` instead of overflowing to infinity.
//!
//! Cohorts born during the run all start at `made = 0`, so they share one
//! schedule: `floor(cap / p)` full days followed by one partial day. They are
//! kept in a sliding window ordered by activation day, which makes a run
//! linear in `days` however small `p` is.

use crate::common::{Cohort, GrowthConfig, GrowthSeed};
use rayon::prelude::*;
use std::collections::VecDeque;
use tracing::warn;

/// Remaining capacity below this is treated as exhausted.
const CAPACITY_EPSILON: f64 = 1e-9;

pub struct GrowthSimulator {
    pub config: GrowthConfig,
}

/// Cohorts born during a run, oldest first
struct BirthWindow {
    /// `(activation day, size)`
    cohorts: VecDeque<(usize, f64)>,
    /// Sum of the sizes in `cohorts`
    active: f64,
    /// Days a fresh member refers the full `p`
    full_days: usize,
    /// Referrals a member makes on its last, partial day
    last_day: f64,
}

impl BirthWindow {
    fn new(p: f64, cap: f64) -> Self {
        // Float-to-int casts saturate, so a tiny `p` cannot overflow
        let full_days = ((cap + CAPACITY_EPSILON) / p).floor() as usize;
        let last_day = cap - full_days as f64 * p;
        Self {
            cohorts: VecDeque::new(),
            active: 0.0,
            full_days,
            last_day: if last_day > CAPACITY_EPSILON { last_day } else { 0.0 },
        }
    }

    /// Expected referrals made on `day` by cohorts born during the run
    fn refer(&mut self, day: usize, p: f64) -> f64 {
        let mut generated = 0.0;

        while let Some(&(activated, size)) = self.cohorts.front() {
            if day - activated < self.full_days {
                break;
            }
            generated += size * self.last_day;
            self.active = (self.active - size).max(0.0);
            self.cohorts.pop_front();
        }
        if self.cohorts.is_empty() {
            self.active = 0.0;
        }

        saturate(generated + self.active * p)
    }

    fn push(&mut self, activated: usize, size: f64) {
        self.cohorts.push_back((activated, size));
        self.active = saturate(self.active + size);
    }
}

impl GrowthSimulator {
    pub fn new(config: GrowthConfig) -> Self {
        Self { config }
    }

    /// Cumulative referral totals for each of `days` days
    pub fn simulate(&self, seed: &GrowthSeed, probability: f64, days: usize) -> Vec<f64> {
        let p = sanitize_probability(probability);
        let cap = self.config.max_referrals_per_user as f64;
        let mut total = seed.existing_referrals;

        if p == 0.0 {
            return vec![total; days];
        }

        // Seed cohorts start part-way through their capacity, so they are
        // stepped individually; there are at most `cap` of them.
        let mut seeded: Vec<Cohort> = seed
            .cohorts
            .iter()
            .filter(|c| c.size > 0.0 && c.made + CAPACITY_EPSILON < cap)
            .cloned()
            .collect();
        let mut births = BirthWindow::new(p, cap);
        let mut series = Vec::with_capacity(days);

        for day in 0..days {
            let mut generated = births.refer(day, p);

            for cohort in seeded.iter_mut() {
                let per_member = p.min(cap - cohort.made);
                if per_member > 0.0 {
                    generated += cohort.size * per_member;
                    cohort.made += per_member;
                }
            }
            seeded.retain(|c| c.made + CAPACITY_EPSILON < cap);

            let generated = saturate(generated);
            // Next-day activation: joins the window after today's referrals
            if generated > 0.0 {
                births.push(day + 1, generated);
            }

            total = saturate(total + generated);
            series.push(total);
        }

        series
    }

    /// Final cumulative total after `days`; the seed total when `days == 0`
    pub fn project(&self, seed: &GrowthSeed, probability: f64, days: usize) -> f64 {
        self.simulate(seed, probability, days)
            .last()
            .copied()
            .unwrap_or(seed.existing_referrals)
    }

    /// Run several probabilities side by side
    pub fn simulate_scenarios(
        &self,
        seed: &GrowthSeed,
        probabilities: &[f64],
        days: usize,
    ) -> Vec<Vec<f64>> {
        probabilities
            .par_iter()
            .map(|&p| self.simulate(seed, p, days))
            .collect()
    }
}

/// Day-over-day increments of a cumulative series. The first day's
/// increment is the first value itself.
pub fn daily_growth(series: &[f64]) -> Vec<f64> {
    let mut previous = None;
    series
        .iter()
        .map(|&value| {
            let delta = previous.map_or(value, |prev| value - prev);
            previous = Some(value);
            delta
        })
        .collect()
}

fn saturate(value: f64) -> f64 {
    value.min(f64::MAX)
}

fn sanitize_probability(probability: f64) -> f64 {
    if !probability.is_finite() {
        warn!("Non-finite referral probability {}, treating as 0", probability);
        return 0.0;
    }
    if !(0.0..=1.0).contains(&probability) {
        warn!("Referral probability {} outside [0, 1], clamping", probability);
    }
    probability.clamp(0.0, 1.0)
}
