//! Full-episode tests for the rebalancing simulator

use std::sync::Arc;

use approx::assert_abs_diff_eq;
use finlab_core::{AllocationConfig, AllocationReward, PriceMatrix, ReturnMatrix};
use finlab_envs::AllocationEnv;
use finlab_ports::Environment;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn flat_prices(rows: usize, assets: usize) -> PriceMatrix {
    PriceMatrix::from_rows(vec![vec![100.0; assets]; rows]).unwrap()
}

/// Deterministic, mildly noisy prices for `assets` assets
fn noisy_prices(rows: usize, assets: usize, seed: u64) -> PriceMatrix {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut current = vec![100.0; assets];
    let mut out = Vec::with_capacity(rows);
    for _ in 0..rows {
        out.push(current.clone());
        for p in current.iter_mut() {
            *p *= 1.0 + rng.gen_range(-0.02..0.02);
        }
    }
    PriceMatrix::from_rows(out).unwrap()
}

#[test]
fn test_weights_stay_on_simplex_for_any_action() {
    let prices = noisy_prices(120, 4, 1);
    let config = AllocationConfig {
        window: 20,
        rebalance_every: 3,
        ..Default::default()
    };
    let mut env = AllocationEnv::new(&prices, config).unwrap();
    env.reset(None);

    let mut rng = StdRng::seed_from_u64(99);
    loop {
        let action: Vec<f64> = (0..4).map(|_| rng.gen_range(-2.0..2.0)).collect();
        let step = env.step(action);

        let sum: f64 = step.info.weights.iter().sum();
        assert_abs_diff_eq!(sum, 1.0, epsilon = 1e-9);
        assert!(step.info.weights.iter().all(|&w| w >= 0.0));
        assert!(step.info.equity > 0.0);
        assert_eq!(step.observation.window(), 20);

        if step.terminated {
            break;
        }
    }
}

#[test]
fn test_flat_prices_only_lose_transaction_costs() {
    let prices = flat_prices(40, 3);
    let config = AllocationConfig {
        window: 10,
        rebalance_every: 4,
        cost_bps: 25.0,
        reward: AllocationReward::ReturnMinusLambdaVol { lambda_vol: 0.5 },
    };
    let mut env = AllocationEnv::new(&prices, config).unwrap();
    env.reset(None);

    let actions = [
        vec![1.0, 0.0, 0.0],
        vec![0.0, 1.0, 0.0],
        vec![1.0, 1.0, 1.0],
        vec![0.2, 0.0, 0.8],
    ];
    let mut expected_equity = 1.0;
    let mut previous = env.equity();
    for action in actions.iter().cycle() {
        let step = env.step(action.clone());

        assert_abs_diff_eq!(step.info.segment_return, 0.0);
        // Volatility guard leaves only a vanishing penalty on a flat segment
        assert_abs_diff_eq!(step.reward, 0.0, epsilon = 1e-6);

        expected_equity *= 1.0 - step.info.cost;
        assert_abs_diff_eq!(env.equity(), expected_equity, epsilon = 1e-12);
        if step.info.turnover > 0.0 {
            assert!(env.equity() < previous);
        } else {
            assert_eq!(env.equity(), previous);
        }
        previous = env.equity();

        if step.terminated {
            break;
        }
    }
    assert!(env.equity() < 1.0);
}

#[test]
fn test_sharpe_proxy_reward_is_finite_on_flat_prices() {
    let prices = flat_prices(20, 2);
    let config = AllocationConfig {
        window: 5,
        rebalance_every: 5,
        reward: AllocationReward::SharpeProxy,
        ..Default::default()
    };
    let mut env = AllocationEnv::new(&prices, config).unwrap();
    env.reset(None);

    let step = env.step(vec![0.3, 0.7]);
    assert!(step.reward.is_finite());
    assert_abs_diff_eq!(step.reward, 0.0);
}

#[test]
fn test_equity_matches_compounded_segments() {
    let prices = noisy_prices(60, 2, 7);
    let config = AllocationConfig {
        window: 10,
        rebalance_every: 7,
        cost_bps: 3.0,
        ..Default::default()
    };
    let mut env = AllocationEnv::new(&prices, config).unwrap();
    env.reset(None);

    let mut equity = 1.0;
    let mut periods = 0;
    loop {
        let step = env.step(vec![0.9, 0.1]);
        equity *= step.info.segment_return.exp() * (1.0 - step.info.cost);
        periods += step.info.segment_len;
        if step.terminated {
            break;
        }
    }

    assert_abs_diff_eq!(env.equity(), equity, epsilon = 1e-12);
    // Every period after the first window is traded exactly once
    assert_eq!(periods, env.horizon() - 10);
}

#[test]
fn test_workers_share_one_return_matrix() {
    let returns = Arc::new(noisy_prices(50, 3, 3).log_returns());
    let config = AllocationConfig {
        window: 10,
        rebalance_every: 5,
        ..Default::default()
    };

    let equities: Vec<f64> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..3)
            .map(|_| {
                let returns = Arc::clone(&returns);
                let config = config.clone();
                scope.spawn(move || {
                    let mut env = AllocationEnv::from_returns(returns, config).unwrap();
                    env.reset(None);
                    while !env.step(vec![1.0, 1.0, 1.0]).terminated {}
                    env.equity()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(equities.windows(2).all(|w| w[0] == w[1]));
    let reference: &ReturnMatrix = &returns;
    assert_eq!(reference.periods(), 49);
}

/// Per-period portfolio returns of rows `t..t+k` (clamped) under `w`
fn segment(returns: &ReturnMatrix, t: usize, k: usize, w: &[f64]) -> Vec<f64> {
    (t..(t + k).min(returns.periods()))
        .map(|row| returns.row(row).iter().zip(w).map(|(r, w)| r * w).sum())
        .collect()
}

fn population_std(xs: &[f64]) -> f64 {
    let mean = xs.iter().sum::<f64>() / xs.len() as f64;
    let var = xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / xs.len() as f64;
    (var + 1e-12).sqrt()
}

#[test]
fn test_rewards_track_held_return_and_new_weight_risk() {
    let prices = noisy_prices(50, 3, 5);
    let returns = prices.log_returns();
    let actions = [vec![1.0, 0.0, 0.0], vec![0.0, 0.5, 0.5], vec![0.2, 0.2, 0.6]];

    for reward in [
        AllocationReward::ReturnMinusLambdaVol { lambda_vol: 2.0 },
        AllocationReward::SharpeProxy,
    ] {
        let config = AllocationConfig {
            window: 10,
            rebalance_every: 4,
            cost_bps: 0.0,
            reward,
        };
        let mut env = AllocationEnv::new(&prices, config).unwrap();
        env.reset(None);

        let mut held = vec![1.0 / 3.0; 3];
        let mut t = 10;
        let mut i = 0;
        loop {
            let new = actions[i % actions.len()].clone();
            let step = env.step(new.clone());

            let earned: f64 = segment(&returns, t, 4, &held).iter().sum();
            let risk = segment(&returns, t, 4, &new);
            let expected = match reward {
                AllocationReward::ReturnMinusLambdaVol { lambda_vol } => {
                    earned - lambda_vol * population_std(&risk)
                }
                AllocationReward::SharpeProxy => {
                    let mean = risk.iter().sum::<f64>() / risk.len() as f64;
                    mean / (population_std(&risk) + 1e-6)
                }
            };
            assert_abs_diff_eq!(step.info.segment_return, earned, epsilon = 1e-12);
            assert_abs_diff_eq!(step.reward, expected, epsilon = 1e-9);
            // Consecutive actions differ, so the two weight sets never coincide
            assert_ne!(held, new);

            held = new;
            t += 4;
            i += 1;
            if step.terminated {
                break;
            }
        }
        assert_eq!(i, 10);
    }
}
