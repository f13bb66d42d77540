pub mod sink;

pub use sink::{MetricsEvent, MetricsSink};
