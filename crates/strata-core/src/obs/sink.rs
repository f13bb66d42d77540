use crate::events::OpKind;

///
/// MetricsEvent
///
/// Observability signals emitted around storage dispatch. `OpCancelled`
/// replaces `OpFinish` when a before-subscriber short-circuits the call.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    OpStart { op: OpKind, entity: String },
    OpFinish { op: OpKind, entity: String },
    OpCancelled { op: OpKind, entity: String },
}

///
/// MetricsSink
///
/// Host-provided observability boundary. The core stays silent unless a
/// sink is installed; hosts route events to their own logging or metrics
/// pipeline.
///

pub trait MetricsSink: Send + Sync {
    fn record(&self, event: MetricsEvent);
}

///
/// NullSink
///

#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl MetricsSink for NullSink {
    fn record(&self, _event: MetricsEvent) {}
}
