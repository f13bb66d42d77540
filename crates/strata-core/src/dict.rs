use crate::{error::DataError, value::Value};
use std::collections::BTreeSet;

///
/// DataDictionary
///
/// Ordered field→value payload with touched/untouched tracking.
///
/// Entries keep insertion order. A field is *touched* when the caller set
/// it explicitly; untouched entries are baseline values carried for
/// completeness. Partial-update storage drivers persist touched fields only.
///
/// Built per write call and discarded afterwards.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DataDictionary {
    entries: Vec<(String, Value)>,
    touched: BTreeSet<String>,
}

impl DataDictionary {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            touched: BTreeSet::new(),
        }
    }

    /// Store a baseline value without marking it touched.
    pub fn put(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.put_inner(field.into(), value.into());
    }

    /// Store a value and mark the field as explicitly touched.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        let field = field.into();
        self.put_inner(field.clone(), value.into());
        self.touched.insert(field);
    }

    fn put_inner(&mut self, field: String, value: Value) {
        match self.entries.iter_mut().find(|(name, _)| *name == field) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((field, value)),
        }
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.entries.iter().any(|(name, _)| name == field)
    }

    #[must_use]
    pub fn is_touched(&self, field: &str) -> bool {
        self.touched.contains(field)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Touched entries only, in insertion order.
    pub fn touched(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.iter().filter(|(name, _)| self.touched.contains(*name))
    }
}

impl<'a> IntoIterator for &'a DataDictionary {
    type Item = (&'a str, &'a Value);
    type IntoIter = Box<dyn Iterator<Item = Self::Item> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

impl FromIterator<(String, Value)> for DataDictionary {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut dict = Self::new();
        for (field, value) in iter {
            dict.set(field, value);
        }
        dict
    }
}

///
/// EntityKind
///
/// Names an entity type. The path doubles as the default service name and
/// the schema type binding.
///

pub trait EntityKind: Sized + Send + Sync + 'static {
    const PATH: &'static str;
}

///
/// EntityValue
///
/// A concrete entity value convertible to and from dynamic row payloads.
///
/// Implementors carry explicit dirty bits: `to_dictionary` marks changed
/// fields as touched so partial updates submit only what the caller set.
/// This is the compile-time replacement for runtime proxy generation.
///

pub trait EntityValue: EntityKind {
    fn to_dictionary(&self) -> DataDictionary;

    fn from_row(row: &DataDictionary) -> Result<Self, DataError>;
}

///
/// TESTS
///
