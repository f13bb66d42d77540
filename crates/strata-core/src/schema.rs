use serde::{Deserialize, Serialize};

///
/// Schema
///
/// Parsed projection bound to (service name, target type path).
/// The expression parser lives in the storage collaborator; this layer only
/// carries the result. An absent expression still yields a default schema.
///

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Schema {
    entity: String,
    type_path: &'static str,
    expression: Option<String>,
    members: Vec<String>,
}

impl Schema {
    #[must_use]
    pub fn new(
        entity: impl Into<String>,
        type_path: &'static str,
        expression: Option<String>,
        members: Vec<String>,
    ) -> Self {
        Self {
            entity: entity.into(),
            type_path,
            expression,
            members,
        }
    }

    /// Default projection for an entity: every declared member.
    #[must_use]
    pub fn default_for(entity: impl Into<String>, type_path: &'static str) -> Self {
        Self::new(entity, type_path, None, Vec::new())
    }

    #[must_use]
    pub fn entity(&self) -> &str {
        &self.entity
    }

    #[must_use]
    pub const fn type_path(&self) -> &'static str {
        self.type_path
    }

    #[must_use]
    pub fn expression(&self) -> Option<&str> {
        self.expression.as_deref()
    }

    #[must_use]
    pub fn members(&self) -> &[String] {
        &self.members
    }

    #[must_use]
    pub const fn is_default(&self) -> bool {
        self.expression.is_none()
    }
}

///
/// Paging
///
/// Opaque paging directive, forwarded unmodified to storage.
/// Pages are 1-based.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Paging {
    pub index: u64,
    pub size: u64,
}

impl Paging {
    #[must_use]
    pub const fn page(index: u64, size: u64) -> Self {
        Self { index, size }
    }
}

///
/// SortDirection / Sorting
///
/// Opaque sort directive, forwarded unmodified to storage.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Sorting {
    pub field: String,
    pub direction: SortDirection,
}

impl Sorting {
    #[must_use]
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Ascending,
        }
    }

    #[must_use]
    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Descending,
        }
    }
}

///
/// Grouping
///
/// Opaque group-by directive for grouped selects, forwarded unmodified.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Grouping {
    pub keys: Vec<String>,
}

impl Grouping {
    #[must_use]
    pub fn by(keys: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }
}

///
/// Paginator
///
/// Opaque pagination handle accompanying a result sequence. Produced by the
/// storage collaborator and forwarded to callers, never interpreted here.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Paginator {
    pub page: u64,
    pub size: u64,
    pub total: u64,
}
