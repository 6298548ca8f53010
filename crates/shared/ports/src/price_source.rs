use finlab_core::{DataResult, PriceMatrix};

/// Port for price-data acquisition
///
/// Implementations return a rectangular, time-ordered, gap-free matrix
/// (rows = periods ascending, columns = assets). Retries and caching, if
/// any, live behind this trait.
pub trait PriceSource {
    fn load(&self) -> DataResult<PriceMatrix>;

    /// Get the source's name (for logging)
    fn name(&self) -> &str {
        "PriceSource"
    }
}
