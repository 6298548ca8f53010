use finlab_core::{ExecutionConfig, PriceProcess};
use rand::Rng;
use rand::rngs::StdRng;
use rand_distr::StandardNormal;

/// Next reference mid after one decision step.
///
/// Only the GBM process consumes randomness, one standard normal draw per step.
pub(super) fn next_mid(config: &ExecutionConfig, mid: f64, rng: &mut StdRng) -> f64 {
    match config.price_process {
        PriceProcess::Static => mid,
        PriceProcess::Gbm => {
            let z: f64 = rng.sample(StandardNormal);
            let drift = (config.gbm_mu - 0.5 * config.gbm_sigma * config.gbm_sigma) * config.dt;
            let diffusion = config.gbm_sigma * config.dt.sqrt() * z;
            mid * (drift + diffusion).exp()
        }
    }
}
