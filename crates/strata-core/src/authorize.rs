use crate::{error::AccessError, method::Method, state::State};

///
/// Authorizer
///
/// Injected authorization policy, consulted once per operation after the
/// capability gate and before validation. Implementations inspect the
/// classified method and the caller principal carried in the state.
///

pub trait Authorizer: Send + Sync {
    fn authorize(&self, method: Method, state: &State) -> Result<(), AccessError>;
}

///
/// CredentialAuthorizer
///
/// Default policy: any authenticated principal may perform any method.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct CredentialAuthorizer;

impl Authorizer for CredentialAuthorizer {
    fn authorize(&self, _method: Method, state: &State) -> Result<(), AccessError> {
        if state.credential().is_some() {
            Ok(())
        } else {
            Err(AccessError::Unauthenticated)
        }
    }
}

///
/// AllowAll
///
/// Open policy for services without access control.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct AllowAll;

impl Authorizer for AllowAll {
    fn authorize(&self, _method: Method, _state: &State) -> Result<(), AccessError> {
        Ok(())
    }
}

///
/// TESTS
///
