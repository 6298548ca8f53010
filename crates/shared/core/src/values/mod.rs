mod observation;
mod prices;
mod weights;

pub use observation::{AllocationObservation, ExecutionObservation};
pub use prices::{PriceMatrix, ReturnMatrix};
pub use weights::{
    ACTION_SUM_EPSILON, SIGNAL_SUM_EPSILON, equal_weights, project_to_simplex, turnover,
};
