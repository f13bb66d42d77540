use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::ops::{BitAnd, BitOr};

///
/// Condition AST
///
/// Pure representation of query conditions. This layer contains no schema
/// validation, planning, or execution semantics; the storage collaborator
/// interprets the tree. Composites keep child order as written.
///

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    Like,
    Between,
    In,
    NotIn,
}

///
/// Compare
///

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Compare {
    pub field: String,
    pub op: CompareOp,
    pub value: Value,
}

impl Compare {
    #[must_use]
    pub fn new(field: impl Into<String>, op: CompareOp, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    /// Case-insensitive field-name match, mirroring how declared key names
    /// are matched against caller-supplied condition fields.
    #[must_use]
    pub fn is_field(&self, name: &str) -> bool {
        self.field.eq_ignore_ascii_case(name)
    }
}

///
/// Condition
///

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Condition {
    Compare(Compare),
    And(Vec<Self>),
    Or(Vec<Self>),
}

impl Condition {
    #[must_use]
    pub fn equal(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Compare(Compare::new(field, CompareOp::Eq, value))
    }

    #[must_use]
    pub fn not_equal(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Compare(Compare::new(field, CompareOp::Ne, value))
    }

    #[must_use]
    pub fn less_than(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Compare(Compare::new(field, CompareOp::Lt, value))
    }

    #[must_use]
    pub fn less_than_equal(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Compare(Compare::new(field, CompareOp::Lte, value))
    }

    #[must_use]
    pub fn greater_than(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Compare(Compare::new(field, CompareOp::Gt, value))
    }

    #[must_use]
    pub fn greater_than_equal(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Compare(Compare::new(field, CompareOp::Gte, value))
    }

    #[must_use]
    pub fn like(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::Compare(Compare::new(field, CompareOp::Like, pattern.into()))
    }

    #[must_use]
    pub fn between(
        field: impl Into<String>,
        low: impl Into<Value>,
        high: impl Into<Value>,
    ) -> Self {
        Self::Compare(Compare::new(
            field,
            CompareOp::Between,
            Value::List(vec![low.into(), high.into()]),
        ))
    }

    #[must_use]
    pub fn in_values(field: impl Into<String>, values: impl IntoIterator<Item = Value>) -> Self {
        Self::Compare(Compare::new(
            field,
            CompareOp::In,
            Value::List(values.into_iter().collect()),
        ))
    }

    #[must_use]
    pub fn not_in_values(
        field: impl Into<String>,
        values: impl IntoIterator<Item = Value>,
    ) -> Self {
        Self::Compare(Compare::new(
            field,
            CompareOp::NotIn,
            Value::List(values.into_iter().collect()),
        ))
    }

    #[must_use]
    pub const fn and(children: Vec<Self>) -> Self {
        Self::And(children)
    }

    #[must_use]
    pub const fn or(children: Vec<Self>) -> Self {
        Self::Or(children)
    }

    ///
    /// Unwrap degenerate composites.
    ///
    /// A composite with exactly one child collapses to that child,
    /// recursively. Key resolution relies on this: no 1-ary AND/OR ever
    /// escapes the resolver.
    ///
    #[must_use]
    pub fn reduce(self) -> Self {
        match self {
            Self::Compare(leaf) => Self::Compare(leaf),
            Self::And(children) => Self::reduce_composite(children, Self::And),
            Self::Or(children) => Self::reduce_composite(children, Self::Or),
        }
    }

    fn reduce_composite(children: Vec<Self>, rebuild: impl FnOnce(Vec<Self>) -> Self) -> Self {
        let mut reduced: Vec<Self> = children.into_iter().map(Self::reduce).collect();

        if reduced.len() == 1 {
            return reduced.remove(0);
        }

        rebuild(reduced)
    }

    /// Visit every comparison leaf whose field matches `name`
    /// (case-insensitive), in tree order.
    pub fn match_field(&self, name: &str, f: &mut impl FnMut(&Compare)) {
        match self {
            Self::Compare(leaf) => {
                if leaf.is_field(name) {
                    f(leaf);
                }
            }
            Self::And(children) | Self::Or(children) => {
                for child in children {
                    child.match_field(name, f);
                }
            }
        }
    }
}

impl BitAnd for Condition {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self::And(vec![self, rhs])
    }
}

impl BitOr for Condition {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::Or(vec![self, rhs])
    }
}

///
/// Field
///
/// Entity-scoped condition-builder helper: `field("status").eq("active")`.
///

#[derive(Clone, Debug)]
pub struct Field(String);

#[must_use]
pub fn field(name: impl Into<String>) -> Field {
    Field(name.into())
}

impl Field {
    #[must_use]
    pub fn eq(self, value: impl Into<Value>) -> Condition {
        Condition::equal(self.0, value)
    }

    #[must_use]
    pub fn ne(self, value: impl Into<Value>) -> Condition {
        Condition::not_equal(self.0, value)
    }

    #[must_use]
    pub fn lt(self, value: impl Into<Value>) -> Condition {
        Condition::less_than(self.0, value)
    }

    #[must_use]
    pub fn lte(self, value: impl Into<Value>) -> Condition {
        Condition::less_than_equal(self.0, value)
    }

    #[must_use]
    pub fn gt(self, value: impl Into<Value>) -> Condition {
        Condition::greater_than(self.0, value)
    }

    #[must_use]
    pub fn gte(self, value: impl Into<Value>) -> Condition {
        Condition::greater_than_equal(self.0, value)
    }

    #[must_use]
    pub fn like(self, pattern: impl Into<String>) -> Condition {
        Condition::like(self.0, pattern)
    }

    #[must_use]
    pub fn between(self, low: impl Into<Value>, high: impl Into<Value>) -> Condition {
        Condition::between(self.0, low, high)
    }

    #[must_use]
    pub fn in_values(self, values: impl IntoIterator<Item = Value>) -> Condition {
        Condition::in_values(self.0, values)
    }

    #[must_use]
    pub fn not_in_values(self, values: impl IntoIterator<Item = Value>) -> Condition {
        Condition::not_in_values(self.0, values)
    }
}

///
/// TESTS
///
