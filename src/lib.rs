pub mod distance;
pub mod metrics;
pub mod normalize;

pub use metrics::{AggregateMetrics, PageMetrics, score};
pub use normalize::normalize;
