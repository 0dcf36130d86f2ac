use anyhow::{Context, Result};
use symgp::config::AppConfig;
use symgp::data::{CsvConnector, Dataset};
use symgp::engines::generation::{ConsoleProgressCallback, EvolutionEngine};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::load_from_file(&path)
            .with_context(|| format!("Failed to load config from {}", path))?,
        None => {
            log::info!("No config file given, using defaults");
            let config = AppConfig::default();
            config.validate()?;
            config
        }
    };

    let dataset = CsvConnector::load_dataset(&config.data)
        .with_context(|| format!("Failed to load dataset {}", config.data.path.display()))?;
    log::info!(
        "Loaded {} rows, target {}, features {:?}",
        dataset.row_count(),
        config.data.target_column,
        dataset.feature_names()
    );

    let mut engine = EvolutionEngine::new(config.evolution.clone())?;
    let outcome = engine.run(&dataset, ConsoleProgressCallback)?;

    log::info!("Best score: {:.6}", outcome.score);
    log::info!("Best program: {}", outcome.program.render());

    let output_path = &config.data.output_path;
    CsvConnector::write_predictions(output_path, dataset.targets(), &outcome.predictions)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;
    log::info!("Predictions written to {}", output_path.display());

    Ok(())
}
