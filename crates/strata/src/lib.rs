//! Strata — a generic data-access orchestration layer over pluggable
//! storage engines.
//!
//! This is the public meta-crate. Downstream users depend on **strata** only.
//!
//! It re-exports the stable public API from:
//!   - `strata-core` (service pipeline, condition model, strategy traits)

pub use strata_core as core;

pub use core::{
    access::{DataAccess, Execution, ScalarExecution, SelectRequest, Selection},
    authorize::{AllowAll, Authorizer, CredentialAuthorizer},
    error::{AccessError, DataError, KeyError},
    events::{BeforeEvent, EventContext, EventRegistry, OpKind},
    obs::{MetricsEvent, MetricsSink},
    searcher::{Conditioner, LikeConditioner, Searcher},
    service::IntoKeys,
    validate::{Passthrough, Validator},
};

//
// Prelude
//

pub mod prelude {
    pub use strata_core::prelude::*;
}
