use crate::{condition::Condition, dict::DataDictionary, error::DataError, method::Method};

///
/// Validator
///
/// Injected validation hooks, invoked after authorization and before any
/// storage dispatch. Condition validation may rewrite or replace the tree
/// (tenant scoping, soft-delete filters); data validation may mutate the
/// payload (stamping audit fields, rejecting bad values).
///
/// Keyed by `Method`, so "get" and "search" can diverge from plain "select"
/// and batch writes from their singular forms.
///

pub trait Validator: Send + Sync {
    fn validate_condition(
        &self,
        _method: Method,
        condition: Option<Condition>,
    ) -> Result<Option<Condition>, DataError> {
        Ok(condition)
    }

    fn validate_data(&self, _method: Method, _data: &mut DataDictionary) -> Result<(), DataError> {
        Ok(())
    }
}

///
/// Passthrough
///
/// Default validator: conditions and payloads pass unchanged.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct Passthrough;

impl Validator for Passthrough {}

///
/// TESTS
///
