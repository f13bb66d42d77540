//! Core runtime for Strata: the typed service pipeline, condition model,
//! strategy traits, and the ergonomics exported via the `prelude`.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod access;
pub mod authorize;
pub mod condition;
pub mod dict;
pub mod error;
pub mod events;
pub mod method;
pub mod obs;
pub mod schema;
pub mod searcher;
pub mod service;
pub mod state;
pub mod validate;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// CONSTANTS
///

/// Maximum number of key values accepted by the keyed-call surfaces.
pub const MAX_KEY_VALUES: usize = 3;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No storage doubles, sinks, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        condition::{field, Condition},
        dict::{DataDictionary, EntityKind, EntityValue},
        method::{Method, MethodKind},
        schema::{Grouping, Paging, Paginator, Schema, SortDirection, Sorting},
        service::{Capabilities, DataService, GetResult, SelectOptions, TypedSelection},
        state::{Principal, State},
        value::Value,
    };
}
