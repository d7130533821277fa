use referral_optimization::*;

fn seed(existing: f64, referrers: f64) -> GrowthSeed {
    GrowthSeed {
        existing_referrals: existing,
        cohorts: vec![Cohort {
            size: referrers,
            made: 0.0,
        }],
    }
}

fn optimizer() -> BonusOptimizer {
    BonusOptimizer::new(
        BonusConfig::default(),
        GrowthSimulator::new(GrowthConfig::default()),
    )
}

#[test]
fn test_dashboard_scenarios() {
    let opt = optimizer();
    let curve = LinearAdoptionCurve::default();
    let s = seed(100.0, 100.0);

    let targets = vec![
        BonusTarget { days: 30, target: 500 },
        BonusTarget { days: 45, target: 1000 },
        BonusTarget { days: 60, target: 2000 },
    ];
    let plans = opt.plan(&s, &targets, &curve);

    assert_eq!(plans.len(), 3);
    for plan in &plans {
        let bonus = plan.outcome.bonus().expect("scenario should be reachable");
        let days = plan.target.days;
        let goal = plan.target.target as f64;

        assert!(opt.simulator.project(&s, curve.probability(bonus), days) >= goal);
        if bonus > 0 {
            assert!(opt.simulator.project(&s, curve.probability(bonus - 1), days) < goal);
        }
    }
}

#[test]
fn test_harder_targets_need_no_smaller_bonus() {
    let opt = optimizer();
    let curve = LinearAdoptionCurve::default();
    let s = seed(0.0, 5.0);

    let mut previous = 0;
    for target in [10, 50, 100, 200, 400] {
        let Some(bonus) = opt.min_bonus_for_target(&s, 20, target, &curve).bonus() else {
            break;
        };
        assert!(bonus >= previous, "target {} needed less than a smaller one", target);
        previous = bonus;
    }
}

#[test]
fn test_custom_ceiling_makes_target_unreachable() {
    let opt = optimizer();
    let curve = LinearAdoptionCurve {
        base: 0.0,
        slope_per_thousand: 0.01,
        ceiling: 0.01,
    };

    let outcome = opt.min_bonus_for_target(&seed(0.0, 1.0), 5, 100, &curve);
    match outcome {
        BonusOutcome::Unachievable { best_projection } => assert!(best_projection < 100.0),
        other => panic!("expected Unachievable, got {:?}", other),
    }
}

#[test]
fn test_outcome_serialization() {
    let outcome = BonusOutcome::Achievable {
        bonus: 250,
        projected: 512.5,
    };
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["status"], "achievable");
    assert_eq!(json["bonus"], 250);
}

#[test]
fn test_cap_zero_rejected() {
    let config = GrowthConfig {
        max_referrals_per_user: 0,
        ..GrowthConfig::default()
    };
    assert_eq!(config.validate(), Err(OptimizationError::ZeroReferralCap));
}
