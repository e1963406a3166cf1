pub mod aggregate;
pub mod executor;
pub mod pool;
pub mod views;

pub use aggregate::{
    concatenate, first_success, merge_paged, AggregateMode, AggregatedResult, Aggregated,
    AggregationPolicy,
};
pub use executor::RequestExecutor;
pub use pool::ConnectionPool;
