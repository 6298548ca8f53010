//! Price sources for the allocation experiments

use std::path::PathBuf;

use finlab_core::{DataError, DataResult, PriceMatrix};
use finlab_ports::PriceSource;
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

use crate::settings::{DataSettings, SyntheticSettings};

/// Independent geometric Brownian motions, one per asset
pub struct SyntheticPriceSource {
    settings: SyntheticSettings,
}

impl SyntheticPriceSource {
    pub fn new(settings: SyntheticSettings) -> Self {
        Self { settings }
    }
}

impl PriceSource for SyntheticPriceSource {
    fn load(&self) -> DataResult<PriceMatrix> {
        let s = &self.settings;
        let shocks = Normal::new(s.drift - 0.5 * s.volatility * s.volatility, s.volatility)
            .map_err(|e| DataError::Source(format!("invalid volatility {}: {}", s.volatility, e)))?;
        let mut rng = StdRng::seed_from_u64(s.seed);

        let mut current = vec![s.initial_price; s.assets];
        let mut rows = Vec::with_capacity(s.periods);
        for _ in 0..s.periods {
            rows.push(current.clone());
            for price in current.iter_mut() {
                *price *= shocks.sample(&mut rng).exp();
            }
        }

        let prices = PriceMatrix::from_rows(rows)?;
        info!(
            "Generated {} periods of synthetic prices for {} assets (seed {})",
            prices.rows(),
            prices.assets(),
            s.seed
        );
        Ok(prices)
    }

    fn name(&self) -> &str {
        "synthetic"
    }
}

/// Reads a JSON array of price rows, oldest first
pub struct JsonFilePriceSource {
    path: PathBuf,
}

impl JsonFilePriceSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PriceSource for JsonFilePriceSource {
    fn load(&self) -> DataResult<PriceMatrix> {
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| DataError::Source(format!("{}: {}", self.path.display(), e)))?;
        let rows: Vec<Vec<f64>> = serde_json::from_str(&content)
            .map_err(|e| DataError::Source(format!("{}: {}", self.path.display(), e)))?;

        let prices = PriceMatrix::from_rows(rows)?;
        info!(
            "Loaded {} periods for {} assets from {}",
            prices.rows(),
            prices.assets(),
            self.path.display()
        );
        Ok(prices)
    }

    fn name(&self) -> &str {
        "json_file"
    }
}

/// Build the configured price source
pub fn price_source(settings: &DataSettings) -> Box<dyn PriceSource> {
    match settings {
        DataSettings::Synthetic(synthetic) => Box::new(SyntheticPriceSource::new(synthetic.clone())),
        DataSettings::JsonFile { path } => Box::new(JsonFilePriceSource::new(path.clone())),
    }
}
