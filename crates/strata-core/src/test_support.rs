//! Shared fixtures: a tiny entity, a spying storage double, and strategy
//! doubles that record how the pipeline drove them.

use crate::{
    access::{DataAccess, Execution, ScalarExecution, SelectRequest, Selection},
    authorize::Authorizer,
    condition::Condition,
    dict::{DataDictionary, EntityKind, EntityValue},
    error::{AccessError, DataError},
    method::Method,
    obs::{MetricsEvent, MetricsSink},
    schema::{Grouping, Paginator, Schema},
    state::State,
    validate::Validator,
    value::Value,
};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

///
/// Customer
///

#[derive(Clone, Debug, PartialEq)]
pub struct Customer {
    pub id: Option<u64>,
    pub name: String,
}

impl Customer {
    pub fn new(id: impl Into<Option<u64>>, name: &str) -> Self {
        Self {
            id: id.into(),
            name: name.to_string(),
        }
    }
}

impl EntityKind for Customer {
    const PATH: &'static str = "customer";
}

impl EntityValue for Customer {
    fn to_dictionary(&self) -> DataDictionary {
        let mut dict = DataDictionary::new();
        if let Some(id) = self.id {
            dict.put("Id", id);
        }
        dict.set("Name", self.name.clone());

        dict
    }

    fn from_row(row: &DataDictionary) -> Result<Self, DataError> {
        Ok(Self {
            id: row.get("Id").and_then(Value::as_uint),
            name: row
                .get("Name")
                .and_then(Value::as_text)
                .unwrap_or_default()
                .to_string(),
        })
    }
}

///
/// MockAccess
///
/// Storage double. Records every dispatched call by name and captures the
/// conditions and payloads the service hands down.
///

#[derive(Default)]
pub struct MockAccess {
    key_fields: Vec<String>,
    rows: Mutex<Vec<DataDictionary>>,
    paginator: Option<Paginator>,
    calls: Mutex<Vec<&'static str>>,
    last_select: Mutex<Option<Option<Condition>>>,
    last_update: Mutex<Option<(DataDictionary, Option<Condition>)>>,
    last_delete: Mutex<Option<Condition>>,
}

impl MockAccess {
    pub fn with_key(fields: impl IntoIterator<Item = &'static str>) -> Self {
        Self {
            key_fields: fields.into_iter().map(ToString::to_string).collect(),
            ..Self::default()
        }
    }

    pub fn with_paginator(mut self, paginator: Paginator) -> Self {
        self.paginator = Some(paginator);
        self
    }

    pub fn push_row(&self, row: DataDictionary) {
        self.rows.lock().unwrap().push(row);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, name: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| **c == name).count()
    }

    pub fn last_select(&self) -> Option<Option<Condition>> {
        self.last_select.lock().unwrap().clone()
    }

    pub fn last_update(&self) -> Option<(DataDictionary, Option<Condition>)> {
        self.last_update.lock().unwrap().clone()
    }

    pub fn last_delete(&self) -> Option<Condition> {
        self.last_delete.lock().unwrap().clone()
    }

    fn log(&self, name: &'static str) {
        self.calls.lock().unwrap().push(name);
    }
}

impl DataAccess for MockAccess {
    fn get_key(&self, _entity: &str) -> Vec<String> {
        self.key_fields.clone()
    }

    fn parse_schema(
        &self,
        entity: &str,
        expression: Option<&str>,
        type_path: &'static str,
    ) -> Result<Schema, DataError> {
        Ok(Schema::new(
            entity,
            type_path,
            expression.map(ToString::to_string),
            Vec::new(),
        ))
    }

    fn select(&self, request: &SelectRequest<'_>) -> Result<Selection, DataError> {
        self.log("select");
        *self.last_select.lock().unwrap() = Some(request.condition.cloned());

        Ok(Selection {
            rows: self.rows.lock().unwrap().clone(),
            paginator: self.paginator,
        })
    }

    fn select_grouped(
        &self,
        _grouping: &Grouping,
        _request: &SelectRequest<'_>,
    ) -> Result<Selection, DataError> {
        self.log("select_grouped");

        Ok(Selection {
            rows: Vec::new(),
            paginator: self.paginator,
        })
    }

    fn count(
        &self,
        _entity: &str,
        _condition: Option<&Condition>,
        _member: Option<&str>,
        _state: &State,
    ) -> Result<u64, DataError> {
        self.log("count");
        Ok(self.rows.lock().unwrap().len() as u64)
    }

    fn exists(
        &self,
        _entity: &str,
        _condition: Option<&Condition>,
        _state: &State,
    ) -> Result<bool, DataError> {
        self.log("exists");
        Ok(!self.rows.lock().unwrap().is_empty())
    }

    fn execute(
        &self,
        _command: &str,
        _in_params: &DataDictionary,
        _state: &State,
    ) -> Result<Execution, DataError> {
        self.log("execute");
        Ok(Execution::default())
    }

    fn execute_scalar(
        &self,
        _command: &str,
        _in_params: &DataDictionary,
        _state: &State,
    ) -> Result<ScalarExecution, DataError> {
        self.log("execute_scalar");
        Ok(ScalarExecution::default())
    }

    fn increment(
        &self,
        _entity: &str,
        _member: &str,
        _condition: &Condition,
        interval: i64,
        _state: &State,
    ) -> Result<i64, DataError> {
        self.log("increment");
        Ok(interval)
    }

    fn delete(
        &self,
        _entity: &str,
        condition: &Condition,
        _state: &State,
    ) -> Result<u64, DataError> {
        self.log("delete");
        *self.last_delete.lock().unwrap() = Some(condition.clone());
        Ok(1)
    }

    fn insert(
        &self,
        _entity: &str,
        _data: &DataDictionary,
        _schema: &Schema,
        _state: &State,
    ) -> Result<u64, DataError> {
        self.log("insert");
        Ok(1)
    }

    fn insert_many(
        &self,
        _entity: &str,
        items: &[DataDictionary],
        _schema: &Schema,
        _state: &State,
    ) -> Result<u64, DataError> {
        self.log("insert_many");
        Ok(items.len() as u64)
    }

    fn update(
        &self,
        _entity: &str,
        data: &DataDictionary,
        condition: Option<&Condition>,
        _schema: &Schema,
        _state: &State,
    ) -> Result<u64, DataError> {
        self.log("update");
        *self.last_update.lock().unwrap() = Some((data.clone(), condition.cloned()));
        Ok(1)
    }

    fn update_many(
        &self,
        _entity: &str,
        items: &[DataDictionary],
        _schema: &Schema,
        _state: &State,
    ) -> Result<u64, DataError> {
        self.log("update_many");
        Ok(items.len() as u64)
    }

    fn upsert(
        &self,
        _entity: &str,
        _data: &DataDictionary,
        _schema: &Schema,
        _state: &State,
    ) -> Result<u64, DataError> {
        self.log("upsert");
        Ok(1)
    }

    fn upsert_many(
        &self,
        _entity: &str,
        items: &[DataDictionary],
        _schema: &Schema,
        _state: &State,
    ) -> Result<u64, DataError> {
        self.log("upsert_many");
        Ok(items.len() as u64)
    }
}

///
/// CountingAuthorizer
///
/// Allows everything, but counts how often it was consulted.
///

#[derive(Clone, Default)]
pub struct CountingAuthorizer {
    calls: Arc<AtomicUsize>,
}

impl CountingAuthorizer {
    pub fn count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Authorizer for CountingAuthorizer {
    fn authorize(&self, _method: Method, _state: &State) -> Result<(), AccessError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

///
/// RecordingValidator
///
/// Passthrough that records which method each validation ran under.
///

#[derive(Clone, Default)]
pub struct RecordingValidator {
    methods: Arc<Mutex<Vec<&'static str>>>,
}

impl RecordingValidator {
    pub fn seen(&self) -> Vec<&'static str> {
        self.methods.lock().unwrap().clone()
    }
}

impl Validator for RecordingValidator {
    fn validate_condition(
        &self,
        method: Method,
        condition: Option<Condition>,
    ) -> Result<Option<Condition>, DataError> {
        self.methods.lock().unwrap().push(method.name());
        Ok(condition)
    }

    fn validate_data(&self, method: Method, _data: &mut DataDictionary) -> Result<(), DataError> {
        self.methods.lock().unwrap().push(method.name());
        Ok(())
    }
}

///
/// RejectingValidator
///
/// Fails payload validation when the name field matches the poison value.
///

#[derive(Clone, Copy, Debug)]
pub struct RejectingValidator {
    pub poison: &'static str,
}

impl Validator for RejectingValidator {
    fn validate_data(&self, _method: Method, data: &mut DataDictionary) -> Result<(), DataError> {
        if data.get("Name").and_then(Value::as_text) == Some(self.poison) {
            return Err(DataError::validation(format!(
                "name '{}' is not allowed",
                self.poison
            )));
        }

        Ok(())
    }
}

///
/// CollectingSink
///

#[derive(Default)]
pub struct CollectingSink {
    events: Mutex<Vec<MetricsEvent>>,
}

impl CollectingSink {
    pub fn events(&self) -> Vec<MetricsEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl MetricsSink for CollectingSink {
    fn record(&self, event: MetricsEvent) {
        self.events.lock().unwrap().push(event);
    }
}
