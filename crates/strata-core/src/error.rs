use thiserror::Error as ThisError;

///
/// KeyError
///
/// Key-to-condition resolution failures.
///

#[derive(Debug, ThisError)]
pub enum KeyError {
    #[error("key tuples above three values are unsupported (found {found})")]
    TooManyValues { found: usize },

    #[error("cannot resolve key values for entity '{entity}'")]
    Unresolvable { entity: String },
}

///
/// AccessError
///
/// Authorization and capability failures.
///

#[derive(Debug, ThisError)]
pub enum AccessError {
    #[error("caller is not authenticated")]
    Unauthenticated,

    #[error("access denied for method '{method}'")]
    Denied { method: &'static str },

    #[error("operation '{operation}' is disabled for this service")]
    CapabilityDisabled { operation: &'static str },
}

///
/// DataError
///
/// Top-level error for every service operation.
///

#[derive(Debug, ThisError)]
pub enum DataError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("permission denied: {0}")]
    PermissionDenied(#[from] AccessError),

    #[error("entity '{entity}' has no key value to update by")]
    MissingKey { entity: String },

    #[error("invalid key: {0}")]
    InvalidKey(#[from] KeyError),

    #[error("validation failed: {message}")]
    Validation { message: String },

    #[error("cannot decode row into '{entity}': {message}")]
    Decode {
        entity: &'static str,
        message: String,
    },

    #[error("storage error: {message}")]
    Storage { message: String },
}

impl DataError {
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn decode(entity: &'static str, message: impl Into<String>) -> Self {
        Self::Decode {
            entity,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}

///
/// TESTS
///
