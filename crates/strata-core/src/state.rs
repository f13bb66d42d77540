use crate::value::Value;

///
/// Credential
///
/// Resolved identity of an authenticated caller.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Credential {
    pub user: String,
}

impl Credential {
    #[must_use]
    pub fn new(user: impl Into<String>) -> Self {
        Self { user: user.into() }
    }
}

///
/// Principal
///
/// Request-scoped caller identity. Threaded explicitly through every call
/// instead of resolved from ambient process-wide context.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum Principal {
    #[default]
    Anonymous,
    Authenticated(Credential),
}

impl Principal {
    #[must_use]
    pub const fn credential(&self) -> Option<&Credential> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(credential) => Some(credential),
        }
    }
}

///
/// State
///
/// Per-call state bundle: the caller principal plus an opaque field→value
/// bag forwarded unmodified to the storage collaborator.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct State {
    principal: Principal,
    values: Vec<(String, Value)>,
}

impl State {
    #[must_use]
    pub const fn anonymous() -> Self {
        Self {
            principal: Principal::Anonymous,
            values: Vec::new(),
        }
    }

    #[must_use]
    pub fn authenticated(user: impl Into<String>) -> Self {
        Self {
            principal: Principal::Authenticated(Credential::new(user)),
            values: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_value(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.push((field.into(), value.into()));
        self
    }

    #[must_use]
    pub const fn principal(&self) -> &Principal {
        &self.principal
    }

    #[must_use]
    pub const fn credential(&self) -> Option<&Credential> {
        self.principal.credential()
    }

    #[must_use]
    pub fn value(&self, field: &str) -> Option<&Value> {
        self.values
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }
}

///
/// TESTS
///
