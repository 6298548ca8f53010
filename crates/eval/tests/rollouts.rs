//! Rollout evaluation across simulators, agents and worker counts

use approx::assert_abs_diff_eq;
use finlab_baselines::{ConstantAgent, ScheduleAgent, SignalAgent, WeightSignal};
use finlab_core::{AllocationConfig, ExecutionConfig, PriceMatrix, PriceProcess};
use finlab_envs::{AllocationEnv, ExecutionEnv};
use finlab_eval::{EvalConfig, EvalError, EvalResult, RolloutEvaluator};

fn gbm_config() -> ExecutionConfig {
    ExecutionConfig {
        steps: 20,
        init_inventory: 500,
        price_process: PriceProcess::Gbm,
        gbm_sigma: 0.03,
        ..Default::default()
    }
}

fn twap_factory() -> EvalResult<(ScheduleAgent, ExecutionEnv)> {
    let agent = ScheduleAgent::new("twap", &[25.0; 20], 500);
    Ok((agent, ExecutionEnv::new(gbm_config())?))
}

#[test]
fn test_parallel_matches_sequential() {
    let evaluator = RolloutEvaluator::new(EvalConfig {
        base_seed: 77,
        ..Default::default()
    })
    .unwrap();

    let (mut agent, mut env) = twap_factory().unwrap();
    let sequential = evaluator.evaluate_execution(&mut agent, &mut env, 12).unwrap();

    for workers in [1, 2, 5] {
        let parallel = evaluator
            .evaluate_execution_parallel(twap_factory, 12, workers)
            .unwrap();
        assert_eq!(parallel, sequential, "workers={}", workers);
    }
}

#[test]
fn test_seeded_episodes_differ_under_gbm() {
    let evaluator = RolloutEvaluator::default();
    let mut env = ExecutionEnv::new(gbm_config()).unwrap();

    let report = evaluator
        .evaluate_execution(&mut ConstantAgent::new(2), &mut env, 8)
        .unwrap();
    assert!(report.shortfall_std > 0.0);
    assert!(report.shortfall_min < report.shortfall_max);
    assert_eq!(report.shortfalls.len(), 8);
}

#[test]
fn test_factory_errors_surface() {
    let evaluator = RolloutEvaluator::default();
    let broken = || -> EvalResult<(ConstantAgent, ExecutionEnv)> {
        let env = ExecutionEnv::new(ExecutionConfig {
            steps: 0,
            ..Default::default()
        })?;
        Ok((ConstantAgent::new(0), env))
    };

    let result = evaluator.evaluate_execution_parallel(broken, 4, 2);
    assert!(matches!(result, Err(EvalError::Config(_))));
}

#[test]
fn test_allocation_report_is_consistent() {
    let prices: Vec<Vec<f64>> = (0..121)
        .map(|t| {
            let t = t as f64;
            vec![100.0 + (t / 7.0).sin(), 50.0 + 0.1 * t, 80.0]
        })
        .collect();
    let prices = PriceMatrix::from_rows(prices).unwrap();
    let mut env = AllocationEnv::new(
        &prices,
        AllocationConfig {
            window: 20,
            rebalance_every: 10,
            ..Default::default()
        },
    )
    .unwrap();

    let report = RolloutEvaluator::default()
        .evaluate_allocation(&mut SignalAgent::new(WeightSignal::momentum()), &mut env, 3)
        .unwrap();

    assert_eq!(report.agent, "momentum");
    assert_eq!(report.episodes, 3);
    assert_eq!(report.rebalances, 30);
    assert!(report.max_drawdown <= 0.0);
    // The simulator is deterministic, so every episode ends in the same place
    assert_abs_diff_eq!(report.final_equity[0], report.final_equity[2], epsilon = 1e-15);
    assert_eq!(report.final_equity[0], env.equity());
}
