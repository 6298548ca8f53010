//! Baseline comparison experiment

use std::sync::Arc;

use chrono::{DateTime, Utc};
use finlab_baselines::{ConstantAgent, ScheduleAgent, SignalAgent};
use finlab_core::{ExecutionConfig, PriceMatrix, ReturnMatrix};
use finlab_envs::{AllocationEnv, ExecutionEnv};
use finlab_eval::{AllocationReport, EvalResult, ExecutionReport, RolloutEvaluator};
use finlab_ports::{Agent, PriceSource};
use log::info;
use serde::Serialize;

use crate::data::price_source;
use crate::error::RunnerResult;
use crate::settings::RunnerSettings;

/// Summary of the price data the allocation agents ran on
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataSummary {
    pub source: String,
    pub periods: usize,
    pub assets: usize,
}

/// Everything one experiment run produces
#[derive(Debug, Clone, Serialize)]
pub struct ExperimentReport {
    pub generated_at: DateTime<Utc>,
    pub settings: RunnerSettings,
    pub data: DataSummary,
    pub execution: Vec<ExecutionReport>,
    pub allocation: Vec<AllocationReport>,
}

/// Runs every configured baseline through both simulators
pub struct Experiment {
    settings: RunnerSettings,
    evaluator: RolloutEvaluator,
}

impl Experiment {
    pub fn new(settings: RunnerSettings) -> RunnerResult<Self> {
        settings.validate()?;
        let evaluator = RolloutEvaluator::new(settings.eval.clone())?;
        Ok(Self {
            settings,
            evaluator,
        })
    }

    pub fn settings(&self) -> &RunnerSettings {
        &self.settings
    }

    /// Load prices from the configured source and run
    pub fn run(&self) -> RunnerResult<ExperimentReport> {
        let source = price_source(&self.settings.data);
        self.run_with(source.as_ref())
    }

    /// Run with an explicit price source
    pub fn run_with(&self, source: &dyn PriceSource) -> RunnerResult<ExperimentReport> {
        let prices = source.load()?;
        info!(
            "Running experiment on {} prices ({} periods x {} assets)",
            source.name(),
            prices.rows(),
            prices.assets()
        );

        let execution = self.run_execution()?;
        let allocation = self.run_allocation(&prices)?;

        Ok(ExperimentReport {
            generated_at: Utc::now(),
            settings: self.settings.clone(),
            data: DataSummary {
                source: source.name().to_string(),
                periods: prices.rows(),
                assets: prices.assets(),
            },
            execution,
            allocation,
        })
    }

    fn run_execution(&self) -> RunnerResult<Vec<ExecutionReport>> {
        let config = &self.settings.execution;
        let baselines = &self.settings.baselines;

        let mut reports = vec![
            self.evaluate_execution(ScheduleAgent::twap(config)?)?,
            self.evaluate_execution(ScheduleAgent::almgren_chriss(config, &baselines.almgren_chriss)?)?,
        ];
        for &action in &baselines.constant_actions {
            reports.push(self.evaluate_execution(ConstantAgent::new(action))?);
        }
        Ok(reports)
    }

    /// Sequential on one worker, otherwise one agent and simulator per worker
    fn evaluate_execution<A>(&self, agent: A) -> RunnerResult<ExecutionReport>
    where
        A: Agent<ExecutionEnv> + Clone + Send + Sync,
    {
        let eval = self.evaluator.config();
        let config: &ExecutionConfig = &self.settings.execution;

        let report = if eval.workers > 1 {
            let factory = || -> EvalResult<(A, ExecutionEnv)> {
                Ok((agent.clone(), ExecutionEnv::new(config.clone())?))
            };
            self.evaluator
                .evaluate_execution_parallel(factory, eval.execution_episodes, eval.workers)?
        } else {
            let mut agent = agent;
            let mut env = ExecutionEnv::new(config.clone())?;
            self.evaluator
                .evaluate_execution(&mut agent, &mut env, eval.execution_episodes)?
        };
        Ok(report)
    }

    fn run_allocation(&self, prices: &PriceMatrix) -> RunnerResult<Vec<AllocationReport>> {
        let config = &self.settings.allocation;
        // Validates the history length before the return matrix is shared
        AllocationEnv::new(prices, config.clone())?;
        let returns: Arc<ReturnMatrix> = Arc::new(prices.log_returns());

        let mut reports = Vec::with_capacity(self.settings.baselines.signals.len());
        for signal in &self.settings.baselines.signals {
            let mut agent = SignalAgent::new(signal.clone());
            let mut env = AllocationEnv::from_returns(Arc::clone(&returns), config.clone())?;
            reports.push(self.evaluator.evaluate_allocation(
                &mut agent,
                &mut env,
                self.settings.eval.allocation_episodes,
            )?);
        }
        Ok(reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{DataSettings, SyntheticSettings};
    use finlab_core::AllocationConfig;
    use finlab_eval::EvalConfig;

    fn small_settings() -> RunnerSettings {
        RunnerSettings {
            execution: ExecutionConfig {
                steps: 10,
                init_inventory: 200,
                ..Default::default()
            },
            allocation: AllocationConfig {
                window: 10,
                rebalance_every: 5,
                ..Default::default()
            },
            data: DataSettings::Synthetic(SyntheticSettings {
                assets: 3,
                periods: 60,
                ..Default::default()
            }),
            eval: EvalConfig {
                execution_episodes: 3,
                allocation_episodes: 2,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_runs_every_baseline() {
        let report = Experiment::new(small_settings()).unwrap().run().unwrap();

        let names: Vec<&str> = report.execution.iter().map(|r| r.agent.as_str()).collect();
        assert_eq!(names, vec!["twap", "almgren_chriss", "constant_0.05", "constant_0.40"]);

        let names: Vec<&str> = report.allocation.iter().map(|r| r.agent.as_str()).collect();
        assert_eq!(names, vec!["equal_weight", "buy_and_hold", "momentum", "reversal"]);

        assert_eq!(report.data.source, "synthetic");
        assert_eq!(report.data.periods, 60);
        assert_eq!(report.data.assets, 3);
    }

    #[test]
    fn test_rejects_short_price_history() {
        let mut settings = small_settings();
        settings.data = DataSettings::Synthetic(SyntheticSettings {
            assets: 2,
            periods: 200,
            ..Default::default()
        });
        let experiment = Experiment::new(settings).unwrap();

        let short = crate::data::SyntheticPriceSource::new(SyntheticSettings {
            assets: 2,
            periods: 5,
            ..Default::default()
        });
        assert!(experiment.run_with(&short).is_err());
    }
}
