//! End-to-end experiment runs from a settings file

use finlab_runner::{Experiment, RunnerSettings};

fn settings_json(workers: usize) -> String {
    format!(
        r#"{{
            "execution": {{"steps": 12, "init_inventory": 300, "price_process": "gbm", "gbm_sigma": 0.05}},
            "allocation": {{"window": 15, "rebalance_every": 3, "cost_bps": 5.0}},
            "data": {{"source": "synthetic", "assets": 3, "periods": 80, "seed": 11}},
            "eval": {{"execution_episodes": 6, "allocation_episodes": 2, "workers": {}, "base_seed": 100}}
        }}"#,
        workers
    )
}

#[test]
fn test_report_from_settings_file() {
    let _ = env_logger::try_init();

    let path = std::env::temp_dir().join(format!("finlab-experiment-{}.json", std::process::id()));
    std::fs::write(&path, settings_json(1)).unwrap();
    let settings = RunnerSettings::from_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let report = Experiment::new(settings).unwrap().run().unwrap();
    assert_eq!(report.execution.len(), 4);
    assert_eq!(report.allocation.len(), 4);

    for execution in &report.execution {
        assert_eq!(execution.episodes, 6);
        assert!(execution.shortfall_min <= execution.shortfall_mean);
        assert!(execution.shortfall_mean <= execution.shortfall_max);
        assert!(execution.mean_steps <= 12.0);
    }
    for allocation in &report.allocation {
        assert_eq!(allocation.episodes, 2);
        assert!(allocation.max_drawdown <= 0.0);
        assert!(allocation.final_equity.iter().all(|&e| e > 0.0));
    }

    let json = serde_json::to_value(&report).unwrap();
    assert!(json["generated_at"].is_string());
    assert_eq!(json["data"]["source"], "synthetic");
    assert_eq!(json["settings"]["execution"]["steps"], 12);
    assert_eq!(json["execution"][0]["agent"], "twap");
}

#[test]
fn test_worker_count_does_not_change_results() {
    let sequential = Experiment::new(RunnerSettings::from_json(&settings_json(1)).unwrap())
        .unwrap()
        .run()
        .unwrap();
    let parallel = Experiment::new(RunnerSettings::from_json(&settings_json(3)).unwrap())
        .unwrap()
        .run()
        .unwrap();

    assert_eq!(sequential.execution, parallel.execution);
    assert_eq!(sequential.allocation, parallel.allocation);
}
