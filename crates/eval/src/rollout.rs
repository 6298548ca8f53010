//! Multi-episode rollouts of a fixed agent

use finlab_envs::{AllocationEnv, ExecutionEnv};
use finlab_ports::{Agent, Environment};
use log::{debug, info};
use rayon::prelude::*;

use crate::config::EvalConfig;
use crate::error::{EvalError, EvalResult};
use crate::metrics::implementation_shortfall;
use crate::report::{AllocationEpisode, AllocationReport, ExecutionEpisode, ExecutionReport};

/// Drives agents against the simulators and folds the outcomes into reports
#[derive(Debug, Clone, Default)]
pub struct RolloutEvaluator {
    config: EvalConfig,
}

impl RolloutEvaluator {
    pub fn new(config: EvalConfig) -> EvalResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Run `episodes` liquidation episodes on one simulator instance
    pub fn evaluate_execution<A>(
        &self,
        agent: &mut A,
        env: &mut ExecutionEnv,
        episodes: usize,
    ) -> EvalResult<ExecutionReport>
    where
        A: Agent<ExecutionEnv>,
    {
        if episodes == 0 {
            return Err(EvalError::NoEpisodes);
        }
        let outcomes: Vec<ExecutionEpisode> = (0..episodes)
            .map(|episode| self.run_execution_episode(agent, env, episode))
            .collect();

        let report = ExecutionReport::from_episodes(agent.name(), &outcomes);
        info!(
            "{}: {} execution episodes, shortfall {:.4} +/- {:.4}",
            report.agent, report.episodes, report.shortfall_mean, report.shortfall_std
        );
        Ok(report)
    }

    /// Run `episodes` liquidation episodes across `workers` threads.
    ///
    /// `factory` builds a fresh agent and simulator for each worker; nothing
    /// mutable is shared between workers. Episode `i` is seeded
    /// `base_seed + i` and results are collected in episode order, so the
    /// report does not depend on the worker count.
    pub fn evaluate_execution_parallel<A, F>(
        &self,
        factory: F,
        episodes: usize,
        workers: usize,
    ) -> EvalResult<ExecutionReport>
    where
        A: Agent<ExecutionEnv>,
        F: Fn() -> EvalResult<(A, ExecutionEnv)> + Send + Sync,
    {
        if episodes == 0 {
            return Err(EvalError::NoEpisodes);
        }
        let (probe, _) = factory()?;
        let name = probe.name().to_string();

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers.max(1))
            .build()
            .map_err(|e| EvalError::WorkerPool(e.to_string()))?;

        let outcomes: Vec<ExecutionEpisode> = pool.install(|| {
            (0..episodes)
                .into_par_iter()
                .map_init(&factory, |worker, episode| {
                    let (agent, env) = worker.as_mut().map_err(|e| e.clone())?;
                    Ok(self.run_execution_episode(agent, env, episode))
                })
                .collect::<EvalResult<Vec<_>>>()
        })?;

        let report = ExecutionReport::from_episodes(name, &outcomes);
        info!(
            "{}: {} execution episodes on {} workers, shortfall {:.4} +/- {:.4}",
            report.agent, report.episodes, workers, report.shortfall_mean, report.shortfall_std
        );
        Ok(report)
    }

    /// Run `episodes` rebalancing episodes and pool their rewards and equity
    pub fn evaluate_allocation<A>(
        &self,
        agent: &mut A,
        env: &mut AllocationEnv,
        episodes: usize,
    ) -> EvalResult<AllocationReport>
    where
        A: Agent<AllocationEnv>,
    {
        if episodes == 0 {
            return Err(EvalError::NoEpisodes);
        }
        let outcomes: Vec<AllocationEpisode> = (0..episodes)
            .map(|_| run_allocation_episode(agent, env))
            .collect();

        let report = AllocationReport::from_episodes(agent.name(), &outcomes);
        info!(
            "{}: {} allocation episodes, sharpe {:.4}, max drawdown {:.4}",
            report.agent, report.episodes, report.sharpe, report.max_drawdown
        );
        Ok(report)
    }

    fn run_execution_episode<A>(&self, agent: &mut A, env: &mut ExecutionEnv, episode: usize) -> ExecutionEpisode
    where
        A: Agent<ExecutionEnv>,
    {
        let seed = self.config.episode_seed(episode);
        let mut observation = env.reset(Some(seed));
        let mut reward = 0.0;
        let mut steps = 0;

        loop {
            let action = agent.choose_action(&observation);
            let step = env.step(action);
            reward += step.reward;
            steps += 1;
            let done = step.is_done();
            observation = step.observation;
            if done {
                break;
            }
        }

        let outcome = ExecutionEpisode {
            episode,
            seed,
            shortfall: implementation_shortfall(-env.cash(), env.ideal_cost()),
            reward,
            steps,
        };
        debug!("Execution episode {}: {:?}", episode, outcome);
        outcome
    }
}

fn run_allocation_episode<A>(agent: &mut A, env: &mut AllocationEnv) -> AllocationEpisode
where
    A: Agent<AllocationEnv>,
{
    let mut observation = env.reset(None);
    let mut outcome = AllocationEpisode::default();

    loop {
        let action = agent.choose_action(&observation);
        let step = env.step(action);
        outcome.rewards.push(step.reward);
        outcome.equity.push(step.info.equity);
        outcome.turnover.push(step.info.turnover);
        let done = step.is_done();
        observation = step.observation;
        if done {
            break;
        }
    }
    outcome
}
