use crate::{
    condition::Condition,
    method::{Method, MethodKind},
    schema::Schema,
    state::State,
};
use std::collections::HashMap;

///
/// OpKind
///
/// Event-routing key. One slot per logical operation; batch variants share
/// the slot of their singular form, and single-row "get" gets its own slot
/// distinct from general selects.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum OpKind {
    Get,
    Select,
    Count,
    Exists,
    Execute,
    Increment,
    Delete,
    Insert,
    Update,
    Upsert,
}

impl From<Method> for OpKind {
    fn from(method: Method) -> Self {
        match method.kind() {
            MethodKind::Select if method.name() == "get" => Self::Get,
            MethodKind::Select => Self::Select,
            MethodKind::Count => Self::Count,
            MethodKind::Exists => Self::Exists,
            MethodKind::Execute => Self::Execute,
            MethodKind::Increment => Self::Increment,
            MethodKind::Delete => Self::Delete,
            MethodKind::Insert => Self::Insert,
            MethodKind::Update => Self::Update,
            MethodKind::Upsert => Self::Upsert,
        }
    }
}

///
/// EventContext
///
/// Snapshot of an operation handed to subscribers. Borrowed from the call
/// frame, so handlers observe exactly what storage is about to see.
///

#[derive(Clone, Copy, Debug)]
pub struct EventContext<'a> {
    pub method: Method,
    pub entity: &'a str,
    pub condition: Option<&'a Condition>,
    pub schema: Option<&'a Schema>,
    pub state: &'a State,
}

///
/// BeforeEvent
///
/// Mutable half of a before notification. Cancelling short-circuits the
/// operation successfully: storage is never invoked and the caller receives
/// the operation's default result.
///

#[derive(Debug, Default)]
pub struct BeforeEvent {
    cancelled: bool,
}

impl BeforeEvent {
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

type BeforeHandler = Box<dyn Fn(&EventContext<'_>, &mut BeforeEvent) + Send + Sync>;
type AfterHandler = Box<dyn Fn(&EventContext<'_>) + Send + Sync>;

///
/// EventRegistry
///
/// Per-service subscriber lists keyed by `OpKind`. The service owns the
/// registry and drives both notifications itself, so storage collaborators
/// stay event-free. Handlers fire in registration order.
///

#[derive(Default)]
pub struct EventRegistry {
    before: HashMap<OpKind, Vec<BeforeHandler>>,
    after: HashMap<OpKind, Vec<AfterHandler>>,
}

impl EventRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_before(
        &mut self,
        op: OpKind,
        handler: impl Fn(&EventContext<'_>, &mut BeforeEvent) + Send + Sync + 'static,
    ) {
        self.before.entry(op).or_default().push(Box::new(handler));
    }

    pub fn on_after(
        &mut self,
        op: OpKind,
        handler: impl Fn(&EventContext<'_>) + Send + Sync + 'static,
    ) {
        self.after.entry(op).or_default().push(Box::new(handler));
    }

    #[must_use]
    pub fn has_before(&self, op: OpKind) -> bool {
        self.before.get(&op).is_some_and(|hs| !hs.is_empty())
    }

    #[must_use]
    pub fn has_after(&self, op: OpKind) -> bool {
        self.after.get(&op).is_some_and(|hs| !hs.is_empty())
    }

    /// Fire before-handlers in registration order. Returns true when any
    /// handler cancelled. No event value is built when nobody subscribed.
    #[must_use]
    pub fn fire_before(&self, op: OpKind, ctx: &EventContext<'_>) -> bool {
        let Some(handlers) = self.before.get(&op).filter(|hs| !hs.is_empty()) else {
            return false;
        };

        let mut event = BeforeEvent::default();
        for handler in handlers {
            handler(ctx, &mut event);
        }

        event.is_cancelled()
    }

    /// Fire after-handlers in registration order. Fires for cancelled
    /// operations too.
    pub fn fire_after(&self, op: OpKind, ctx: &EventContext<'_>) {
        if let Some(handlers) = self.after.get(&op) {
            for handler in handlers {
                handler(ctx);
            }
        }
    }
}

///
/// TESTS
///
