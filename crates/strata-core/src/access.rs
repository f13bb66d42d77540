use crate::{
    condition::Condition,
    dict::DataDictionary,
    error::DataError,
    schema::{Grouping, Paginator, Paging, Schema, Sorting},
    state::State,
    value::Value,
};

///
/// DataAccess
///
/// The storage collaborator boundary. Every service operation bottoms out
/// here; implementations map these calls onto a concrete engine (SQL,
/// KV store, remote API). Object-safe so services hold `Arc<dyn DataAccess>`.
///
/// Contract notes:
/// - `get_key` returns the declared key members of an entity, in order.
///   An empty vector means the entity declares no key.
/// - Paging, sorting, grouping, and state values pass through unmodified.
/// - Write operations return affected-row counts.
///

///
/// SelectRequest
///

#[derive(Debug)]
pub struct SelectRequest<'a> {
    pub entity: &'a str,
    pub condition: Option<&'a Condition>,
    pub schema: &'a Schema,
    pub paging: Option<Paging>,
    pub sortings: &'a [Sorting],
    pub state: &'a State,
}

///
/// Selection
///

#[derive(Debug, Default)]
pub struct Selection {
    pub rows: Vec<DataDictionary>,
    pub paginator: Option<Paginator>,
}

///
/// Execution
///
/// Result of a command-style execute: result rows plus any output
/// parameters the command produced.
///

#[derive(Debug, Default)]
pub struct Execution {
    pub rows: Vec<DataDictionary>,
    pub out_params: DataDictionary,
}

///
/// ScalarExecution
///

#[derive(Debug, Default)]
pub struct ScalarExecution {
    pub value: Option<Value>,
    pub out_params: DataDictionary,
}

pub trait DataAccess: Send + Sync {
    /// Declared key members of `entity`, in declaration order.
    fn get_key(&self, entity: &str) -> Vec<String>;

    /// Parse a projection expression against `entity`. `None` yields the
    /// default all-members schema.
    fn parse_schema(
        &self,
        entity: &str,
        expression: Option<&str>,
        type_path: &'static str,
    ) -> Result<Schema, DataError>;

    fn select(&self, request: &SelectRequest<'_>) -> Result<Selection, DataError>;

    fn select_grouped(
        &self,
        grouping: &Grouping,
        request: &SelectRequest<'_>,
    ) -> Result<Selection, DataError>;

    fn count(
        &self,
        entity: &str,
        condition: Option<&Condition>,
        member: Option<&str>,
        state: &State,
    ) -> Result<u64, DataError>;

    fn exists(
        &self,
        entity: &str,
        condition: Option<&Condition>,
        state: &State,
    ) -> Result<bool, DataError>;

    fn execute(
        &self,
        command: &str,
        in_params: &DataDictionary,
        state: &State,
    ) -> Result<Execution, DataError>;

    fn execute_scalar(
        &self,
        command: &str,
        in_params: &DataDictionary,
        state: &State,
    ) -> Result<ScalarExecution, DataError>;

    /// Atomically add `interval` to `member` on matching rows, returning
    /// the new value. Negative intervals decrement.
    fn increment(
        &self,
        entity: &str,
        member: &str,
        condition: &Condition,
        interval: i64,
        state: &State,
    ) -> Result<i64, DataError>;

    fn delete(
        &self,
        entity: &str,
        condition: &Condition,
        state: &State,
    ) -> Result<u64, DataError>;

    fn insert(
        &self,
        entity: &str,
        data: &DataDictionary,
        schema: &Schema,
        state: &State,
    ) -> Result<u64, DataError>;

    fn insert_many(
        &self,
        entity: &str,
        items: &[DataDictionary],
        schema: &Schema,
        state: &State,
    ) -> Result<u64, DataError>;

    fn update(
        &self,
        entity: &str,
        data: &DataDictionary,
        condition: Option<&Condition>,
        schema: &Schema,
        state: &State,
    ) -> Result<u64, DataError>;

    fn update_many(
        &self,
        entity: &str,
        items: &[DataDictionary],
        schema: &Schema,
        state: &State,
    ) -> Result<u64, DataError>;

    fn upsert(
        &self,
        entity: &str,
        data: &DataDictionary,
        schema: &Schema,
        state: &State,
    ) -> Result<u64, DataError>;

    fn upsert_many(
        &self,
        entity: &str,
        items: &[DataDictionary],
        schema: &Schema,
        state: &State,
    ) -> Result<u64, DataError>;
}
