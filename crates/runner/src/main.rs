use finlab_runner::{Experiment, RunnerSettings};

fn print_help() {
    eprintln!(
        r#"finlab - baseline comparison for the execution and allocation simulators

USAGE:
    finlab [OPTIONS]

OPTIONS:
    --config <PATH>     Load settings from JSON file
    --help              Print this help message

ENVIRONMENT VARIABLES:
    RUST_LOG            Log level filter (default: info)

EXAMPLES:
    # Run with defaults (synthetic prices)
    finlab

    # Run with settings file
    finlab --config experiment.json
"#
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--config" | "-c" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --config requires a path argument");
                    std::process::exit(1);
                }
                config_path = Some(args[i].clone());
            }
            arg => {
                eprintln!("Unknown argument: {}", arg);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let settings = match config_path {
        Some(path) => {
            log::info!("Loading settings from: {}", path);
            RunnerSettings::from_file(&path)?
        }
        None => {
            log::info!("Using default settings");
            RunnerSettings::default()
        }
    };

    let report = Experiment::new(settings)?.run()?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
