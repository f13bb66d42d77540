use std::fmt;
use std::hash::{Hash, Hasher};

///
/// MethodKind
///
/// Semantic routing class of a data-access verb. "Many" variants and the
/// single-row "get" keep the singular kind so kind-scoped subscribers and
/// authorization policies see every flavor of an operation.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum MethodKind {
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

///
/// Method
///
/// Classified data-access verb: a distinct name plus its routing kind.
///
/// Invariant: for a given name the kind never varies, so hashing over the
/// name alone stays consistent with `(kind, name)` equality.
///

#[derive(Clone, Copy, Debug, Eq)]
pub struct Method {
    name: &'static str,
    kind: MethodKind,
}

impl Method {
    const fn new(name: &'static str, kind: MethodKind) -> Self {
        Self { name, kind }
    }

    /// Single-row fetch: shares Select's authorization class under a
    /// distinct name so validation can special-case it.
    #[must_use]
    pub const fn get() -> Self {
        Self::new("get", MethodKind::Select)
    }

    #[must_use]
    pub const fn select() -> Self {
        Self::new("select", MethodKind::Select)
    }

    /// Select under a caller-chosen name, so validation and subscribers can
    /// distinguish specialized read surfaces.
    #[must_use]
    pub const fn select_named(name: &'static str) -> Self {
        Self::new(name, MethodKind::Select)
    }

    /// Keyword-search select, named so validation can distinguish it.
    #[must_use]
    pub const fn search() -> Self {
        Self::select_named("search")
    }

    #[must_use]
    pub const fn count() -> Self {
        Self::new("count", MethodKind::Count)
    }

    #[must_use]
    pub const fn exists() -> Self {
        Self::new("exists", MethodKind::Exists)
    }

    #[must_use]
    pub const fn execute() -> Self {
        Self::new("execute", MethodKind::Execute)
    }

    #[must_use]
    pub const fn increment() -> Self {
        Self::new("increment", MethodKind::Increment)
    }

    #[must_use]
    pub const fn decrement() -> Self {
        Self::new("decrement", MethodKind::Increment)
    }

    #[must_use]
    pub const fn delete() -> Self {
        Self::new("delete", MethodKind::Delete)
    }

    #[must_use]
    pub const fn insert() -> Self {
        Self::new("insert", MethodKind::Insert)
    }

    #[must_use]
    pub const fn insert_many() -> Self {
        Self::new("insert_many", MethodKind::Insert)
    }

    #[must_use]
    pub const fn update() -> Self {
        Self::new("update", MethodKind::Update)
    }

    #[must_use]
    pub const fn update_many() -> Self {
        Self::new("update_many", MethodKind::Update)
    }

    #[must_use]
    pub const fn upsert() -> Self {
        Self::new("upsert", MethodKind::Upsert)
    }

    #[must_use]
    pub const fn upsert_many() -> Self {
        Self::new("upsert_many", MethodKind::Upsert)
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn kind(&self) -> MethodKind {
        self.kind
    }

    /// Whether this verb reads rows (Count/Exists/Select).
    #[must_use]
    pub const fn is_reading(&self) -> bool {
        matches!(
            self.kind,
            MethodKind::Count | MethodKind::Exists | MethodKind::Select
        )
    }

    /// Whether this verb mutates rows (Increment/Delete/Insert/Update/Upsert).
    #[must_use]
    pub const fn is_writing(&self) -> bool {
        matches!(
            self.kind,
            MethodKind::Increment
                | MethodKind::Delete
                | MethodKind::Insert
                | MethodKind::Update
                | MethodKind::Upsert
        )
    }
}

impl PartialEq for Method {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.name == other.name
    }
}

impl Hash for Method {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Name determines kind, so hashing the name alone is sufficient.
        self.name.hash(state);
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

///
/// TESTS
///
