pub mod keys;


pub use keys::IntoKeys;

use crate::{
    access::{DataAccess, Execution, ScalarExecution, SelectRequest, Selection},
    authorize::{Authorizer, CredentialAuthorizer},
    condition::{CompareOp, Condition},
    dict::{DataDictionary, EntityValue},
    error::{AccessError, DataError, KeyError},
    events::{EventContext, EventRegistry, OpKind},
    method::Method,
    obs::{MetricsEvent, MetricsSink},
    schema::{Grouping, Paginator, Paging, Schema, Sorting},
    searcher::{Conditioner, LikeConditioner, Searcher},
    state::State,
    validate::{Passthrough, Validator},
    value::Value,
};
use std::{marker::PhantomData, sync::Arc};

///
/// Capabilities
///
/// Per-service write switches, checked before authorization so a disabled
/// operation fails the same way for every caller.
///

#[derive(Clone, Copy, Debug)]
pub struct Capabilities {
    pub can_delete: bool,
    pub can_insert: bool,
    pub can_update: bool,
    pub can_upsert: bool,
}

impl Capabilities {
    #[must_use]
    pub const fn read_only() -> Self {
        Self {
            can_delete: false,
            can_insert: false,
            can_update: false,
            can_upsert: false,
        }
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            can_delete: true,
            can_insert: true,
            can_update: true,
            can_upsert: true,
        }
    }
}

///
/// SelectOptions
///
/// Optional read directives: projection expression, paging, sortings.
/// All forwarded to storage unmodified.
///

#[derive(Clone, Debug, Default)]
pub struct SelectOptions {
    schema: Option<String>,
    paging: Option<Paging>,
    sortings: Vec<Sorting>,
}

impl SelectOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn schema(mut self, expression: impl Into<String>) -> Self {
        self.schema = Some(expression.into());
        self
    }

    #[must_use]
    pub const fn paging(mut self, paging: Paging) -> Self {
        self.paging = Some(paging);
        self
    }

    #[must_use]
    pub fn sort(mut self, sorting: Sorting) -> Self {
        self.sortings.push(sorting);
        self
    }
}

///
/// TypedSelection
///
/// Decoded select result: typed entities plus the storage paginator,
/// forwarded when present.
///

#[derive(Debug)]
pub struct TypedSelection<E> {
    pub entities: Vec<E>,
    pub paginator: Option<Paginator>,
}

impl<E> Default for TypedSelection<E> {
    fn default() -> Self {
        Self {
            entities: Vec::new(),
            paginator: None,
        }
    }
}

///
/// GetResult
///
/// Outcome of a keyed get. A full key yields at most one entity; a
/// comma-expanded key redirects to a plural select.
///

#[derive(Debug)]
pub enum GetResult<E> {
    One {
        entity: Option<E>,
        paginator: Option<Paginator>,
    },
    Many(TypedSelection<E>),
}

impl<E> GetResult<E> {
    /// Collapse to a single entity: the one row, or the first of many.
    #[must_use]
    pub fn one(self) -> Option<E> {
        match self {
            Self::One { entity, .. } => entity,
            Self::Many(selection) => selection.entities.into_iter().next(),
        }
    }
}

impl<E> Default for GetResult<E> {
    fn default() -> Self {
        Self::One {
            entity: None,
            paginator: None,
        }
    }
}

///
/// DataService
///
/// The orchestration pipeline for one entity type. Every operation runs
/// capability gate, then authorization, then validation, then the event
/// pair around a single storage dispatch. Strategy objects are injected at
/// construction; subscribers register on the owned event registry.
///

pub struct DataService<E: EntityValue> {
    name: String,
    access: Arc<dyn DataAccess>,
    authorizer: Arc<dyn Authorizer>,
    validator: Arc<dyn Validator>,
    conditioner: Option<Arc<dyn Conditioner>>,
    capabilities: Capabilities,
    events: EventRegistry,
    metrics: Option<Arc<dyn MetricsSink>>,
    _marker: PhantomData<E>,
}

impl<E: EntityValue> DataService<E> {
    /// Build a service named after the entity's declared path.
    #[must_use]
    pub fn new(access: Arc<dyn DataAccess>) -> Self {
        Self {
            name: E::PATH.to_string(),
            access,
            authorizer: Arc::new(CredentialAuthorizer),
            validator: Arc::new(Passthrough),
            conditioner: None,
            capabilities: Capabilities::default(),
            events: EventRegistry::new(),
            metrics: None,
            _marker: PhantomData,
        }
    }

    /// Build a service with an explicit name. Blank names are rejected.
    pub fn with_name(access: Arc<dyn DataAccess>, name: impl Into<String>) -> Result<Self, DataError> {
        let mut service = Self::new(access);
        service.set_name(name)?;
        Ok(service)
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), DataError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DataError::configuration("service name cannot be blank"));
        }
        self.name = name;

        Ok(())
    }

    #[must_use]
    pub fn with_authorizer(mut self, authorizer: impl Authorizer + 'static) -> Self {
        self.authorizer = Arc::new(authorizer);
        self
    }

    #[must_use]
    pub fn with_validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validator = Arc::new(validator);
        self
    }

    #[must_use]
    pub fn with_conditioner(mut self, conditioner: impl Conditioner + 'static) -> Self {
        self.conditioner = Some(Arc::new(conditioner));
        self
    }

    /// Install the default contains-match conditioner over `fields`.
    #[must_use]
    pub fn with_search_fields(self, fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.with_conditioner(LikeConditioner::new(fields))
    }

    #[must_use]
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    #[must_use]
    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsSink>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn events_mut(&mut self) -> &mut EventRegistry {
        &mut self.events
    }

    #[must_use]
    pub const fn searcher(&self) -> Searcher<'_, E> {
        Searcher::new(self)
    }

    pub(crate) fn conditioner(&self) -> Option<&dyn Conditioner> {
        self.conditioner.as_deref()
    }

    //
    // command surface
    //

    pub fn execute(
        &self,
        command: &str,
        in_params: &DataDictionary,
        state: &State,
    ) -> Result<Execution, DataError> {
        let method = Method::execute();
        self.authorize(method, state)?;

        let ctx = self.context(method, None, None, state);
        self.dispatch(method, &ctx, || self.access.execute(command, in_params, state))
    }

    pub fn execute_scalar(
        &self,
        command: &str,
        in_params: &DataDictionary,
        state: &State,
    ) -> Result<ScalarExecution, DataError> {
        let method = Method::execute();
        self.authorize(method, state)?;

        let ctx = self.context(method, None, None, state);
        self.dispatch(method, &ctx, || {
            self.access.execute_scalar(command, in_params, state)
        })
    }

    //
    // read surface
    //

    pub fn count(
        &self,
        condition: Option<Condition>,
        member: Option<&str>,
        state: &State,
    ) -> Result<u64, DataError> {
        self.count_with(Method::count(), condition, member, state)
    }

    pub fn exists(&self, condition: Option<Condition>, state: &State) -> Result<bool, DataError> {
        self.exists_with(Method::exists(), condition, state)
    }

    pub fn exists_by_key(&self, keys: impl IntoKeys, state: &State) -> Result<bool, DataError> {
        let (condition, _) = self.convert_key(keys)?;
        self.exists_with(Method::exists(), Some(condition), state)
    }

    pub fn select(
        &self,
        condition: Option<Condition>,
        options: SelectOptions,
        state: &State,
    ) -> Result<TypedSelection<E>, DataError> {
        self.select_with(Method::select(), condition, options, state)
    }

    /// Grouped select returns raw rows: aggregate shapes do not decode into
    /// the entity type.
    pub fn select_grouped(
        &self,
        grouping: &Grouping,
        condition: Option<Condition>,
        options: SelectOptions,
        state: &State,
    ) -> Result<Selection, DataError> {
        let method = Method::select();
        self.authorize(method, state)?;

        let condition = self.validate_condition(method, condition)?;
        let schema = self.resolve_schema(options.schema.as_deref())?;

        let ctx = self.context(method, condition.as_ref(), Some(&schema), state);
        self.dispatch(method, &ctx, || {
            let request = SelectRequest {
                entity: &self.name,
                condition: condition.as_ref(),
                schema: &schema,
                paging: options.paging,
                sortings: &options.sortings,
                state,
            };

            self.access.select_grouped(grouping, &request)
        })
    }

    /// Keyed fetch. A full key runs the single-row path; a comma-expanded
    /// key redirects to a plural select.
    pub fn get(
        &self,
        keys: impl IntoKeys,
        options: SelectOptions,
        state: &State,
    ) -> Result<GetResult<E>, DataError> {
        let (condition, singular) = self.convert_key(keys)?;

        if !singular {
            let selection =
                self.select_with(Method::select(), Some(condition), options, state)?;
            return Ok(GetResult::Many(selection));
        }

        let method = Method::get();
        self.authorize(method, state)?;

        let condition = self.validate_condition(method, Some(condition))?;
        let schema = self.resolve_schema(options.schema.as_deref())?;

        let ctx = self.context(method, condition.as_ref(), Some(&schema), state);
        self.dispatch(method, &ctx, || {
            let request = SelectRequest {
                entity: &self.name,
                condition: condition.as_ref(),
                schema: &schema,
                paging: options.paging,
                sortings: &options.sortings,
                state,
            };

            let selection = self.access.select(&request)?;
            let entity = match selection.rows.first() {
                Some(row) => Some(E::from_row(row)?),
                None => None,
            };

            Ok(GetResult::One {
                entity,
                paginator: selection.paginator,
            })
        })
    }

    //
    // write surface
    //

    pub fn increment(
        &self,
        member: &str,
        condition: Condition,
        interval: i64,
        state: &State,
    ) -> Result<i64, DataError> {
        self.increment_with(Method::increment(), member, condition, interval, state)
    }

    pub fn decrement(
        &self,
        member: &str,
        condition: Condition,
        interval: i64,
        state: &State,
    ) -> Result<i64, DataError> {
        self.increment_with(
            Method::decrement(),
            member,
            condition,
            interval.saturating_neg(),
            state,
        )
    }

    pub fn delete(&self, condition: Condition, state: &State) -> Result<u64, DataError> {
        self.ensure(self.capabilities.can_delete, "delete")?;

        let method = Method::delete();
        self.authorize(method, state)?;

        let condition = self
            .validate_condition(method, Some(condition))?
            .ok_or_else(|| DataError::validation("a delete condition is required"))?;

        let ctx = self.context(method, Some(&condition), None, state);
        self.dispatch(method, &ctx, || {
            self.access.delete(&self.name, &condition, state)
        })
    }

    pub fn delete_by_key(&self, keys: impl IntoKeys, state: &State) -> Result<u64, DataError> {
        let (condition, _) = self.convert_key(keys)?;
        self.delete(condition, state)
    }

    pub fn insert(&self, entity: &E, state: &State) -> Result<u64, DataError> {
        self.insert_with(entity, None, state)
    }

    pub fn insert_with(
        &self,
        entity: &E,
        schema: Option<&str>,
        state: &State,
    ) -> Result<u64, DataError> {
        self.ensure(self.capabilities.can_insert, "insert")?;

        let method = Method::insert();
        self.authorize(method, state)?;

        let mut data = entity.to_dictionary();
        self.validator.validate_data(method, &mut data)?;
        let schema = self.resolve_schema(schema)?;

        let ctx = self.context(method, None, Some(&schema), state);
        self.dispatch(method, &ctx, || {
            self.access.insert(&self.name, &data, &schema, state)
        })
    }

    /// Batch insert. Every item is validated before anything is submitted,
    /// so one bad item means storage sees none of them.
    pub fn insert_many(&self, entities: &[E], state: &State) -> Result<u64, DataError> {
        self.ensure(self.capabilities.can_insert, "insert")?;

        let method = Method::insert_many();
        self.authorize(method, state)?;

        let items = self.validate_items(method, entities)?;
        let schema = self.resolve_schema(None)?;

        let ctx = self.context(method, None, Some(&schema), state);
        self.dispatch(method, &ctx, || {
            self.access.insert_many(&self.name, &items, &schema, state)
        })
    }

    /// Update by explicit condition, or by the key values carried in the
    /// payload when no condition is given. Equality key values found in the
    /// condition are mirrored into the payload before dispatch.
    pub fn update(
        &self,
        entity: &E,
        condition: Option<Condition>,
        state: &State,
    ) -> Result<u64, DataError> {
        self.ensure(self.capabilities.can_update, "update")?;

        let method = Method::update();
        self.authorize(method, state)?;

        let mut data = entity.to_dictionary();
        let condition = match condition {
            Some(condition) => condition,
            None => self.implicit_update_condition(&data)?,
        };

        let condition = self
            .validate_condition(method, Some(condition))?
            .ok_or_else(|| DataError::MissingKey {
                entity: self.name.clone(),
            })?;
        self.mirror_key_values(&condition, &mut data);
        self.validator.validate_data(method, &mut data)?;

        let schema = self.resolve_schema(None)?;

        let ctx = self.context(method, Some(&condition), Some(&schema), state);
        self.dispatch(method, &ctx, || {
            self.access
                .update(&self.name, &data, Some(&condition), &schema, state)
        })
    }

    pub fn update_by_key(
        &self,
        keys: impl IntoKeys,
        entity: &E,
        state: &State,
    ) -> Result<u64, DataError> {
        let (condition, _) = self.convert_key(keys)?;
        self.update(entity, Some(condition), state)
    }

    /// Batch update. Each item must carry its own key values; every item is
    /// validated before anything is submitted.
    pub fn update_many(&self, entities: &[E], state: &State) -> Result<u64, DataError> {
        self.ensure(self.capabilities.can_update, "update")?;

        let method = Method::update_many();
        self.authorize(method, state)?;

        let mut items = Vec::with_capacity(entities.len());
        for entity in entities {
            let mut data = entity.to_dictionary();
            self.implicit_update_condition(&data)?;
            self.validator.validate_data(method, &mut data)?;
            items.push(data);
        }
        let schema = self.resolve_schema(None)?;

        let ctx = self.context(method, None, Some(&schema), state);
        self.dispatch(method, &ctx, || {
            self.access.update_many(&self.name, &items, &schema, state)
        })
    }

    pub fn upsert(&self, entity: &E, state: &State) -> Result<u64, DataError> {
        self.ensure(self.capabilities.can_upsert, "upsert")?;

        let method = Method::upsert();
        self.authorize(method, state)?;

        let mut data = entity.to_dictionary();
        self.validator.validate_data(method, &mut data)?;
        let schema = self.resolve_schema(None)?;

        let ctx = self.context(method, None, Some(&schema), state);
        self.dispatch(method, &ctx, || {
            self.access.upsert(&self.name, &data, &schema, state)
        })
    }

    pub fn upsert_many(&self, entities: &[E], state: &State) -> Result<u64, DataError> {
        self.ensure(self.capabilities.can_upsert, "upsert")?;

        let method = Method::upsert_many();
        self.authorize(method, state)?;

        let items = self.validate_items(method, entities)?;
        let schema = self.resolve_schema(None)?;

        let ctx = self.context(method, None, Some(&schema), state);
        self.dispatch(method, &ctx, || {
            self.access.upsert_many(&self.name, &items, &schema, state)
        })
    }

    //
    // shared pipeline, also driven by the searcher
    //

    pub(crate) fn count_with(
        &self,
        method: Method,
        condition: Option<Condition>,
        member: Option<&str>,
        state: &State,
    ) -> Result<u64, DataError> {
        self.authorize(method, state)?;
        let condition = self.validate_condition(method, condition)?;

        let ctx = self.context(method, condition.as_ref(), None, state);
        self.dispatch(method, &ctx, || {
            self.access
                .count(&self.name, condition.as_ref(), member, state)
        })
    }

    pub(crate) fn exists_with(
        &self,
        method: Method,
        condition: Option<Condition>,
        state: &State,
    ) -> Result<bool, DataError> {
        self.authorize(method, state)?;
        let condition = self.validate_condition(method, condition)?;

        let ctx = self.context(method, condition.as_ref(), None, state);
        self.dispatch(method, &ctx, || {
            self.access.exists(&self.name, condition.as_ref(), state)
        })
    }

    pub(crate) fn select_with(
        &self,
        method: Method,
        condition: Option<Condition>,
        options: SelectOptions,
        state: &State,
    ) -> Result<TypedSelection<E>, DataError> {
        self.authorize(method, state)?;

        let condition = self.validate_condition(method, condition)?;
        let schema = self.resolve_schema(options.schema.as_deref())?;

        let ctx = self.context(method, condition.as_ref(), Some(&schema), state);
        self.dispatch(method, &ctx, || {
            let request = SelectRequest {
                entity: &self.name,
                condition: condition.as_ref(),
                schema: &schema,
                paging: options.paging,
                sortings: &options.sortings,
                state,
            };

            let selection = self.access.select(&request)?;
            let entities = selection
                .rows
                .iter()
                .map(E::from_row)
                .collect::<Result<Vec<_>, _>>()?;

            Ok(TypedSelection {
                entities,
                paginator: selection.paginator,
            })
        })
    }

    // increment has no capability flag: the switches cover
    // delete/insert/update/upsert only
    fn increment_with(
        &self,
        method: Method,
        member: &str,
        condition: Condition,
        interval: i64,
        state: &State,
    ) -> Result<i64, DataError> {
        self.authorize(method, state)?;

        let condition = self
            .validate_condition(method, Some(condition))?
            .ok_or_else(|| DataError::validation("an increment condition is required"))?;

        let ctx = self.context(method, Some(&condition), None, state);
        self.dispatch(method, &ctx, || {
            self.access
                .increment(&self.name, member, &condition, interval, state)
        })
    }

    //
    // internals
    //

    fn authorize(&self, method: Method, state: &State) -> Result<(), DataError> {
        self.authorizer.authorize(method, state)?;

        Ok(())
    }

    fn ensure(&self, allowed: bool, operation: &'static str) -> Result<(), DataError> {
        if allowed {
            Ok(())
        } else {
            Err(AccessError::CapabilityDisabled { operation }.into())
        }
    }

    fn validate_condition(
        &self,
        method: Method,
        condition: Option<Condition>,
    ) -> Result<Option<Condition>, DataError> {
        Ok(self
            .validator
            .validate_condition(method, condition)?
            .map(Condition::reduce))
    }

    fn validate_items(&self, method: Method, entities: &[E]) -> Result<Vec<DataDictionary>, DataError> {
        let mut items = Vec::with_capacity(entities.len());
        for entity in entities {
            let mut data = entity.to_dictionary();
            self.validator.validate_data(method, &mut data)?;
            items.push(data);
        }

        Ok(items)
    }

    fn resolve_schema(&self, expression: Option<&str>) -> Result<Schema, DataError> {
        self.access.parse_schema(&self.name, expression, E::PATH)
    }

    fn context<'a>(
        &'a self,
        method: Method,
        condition: Option<&'a Condition>,
        schema: Option<&'a Schema>,
        state: &'a State,
    ) -> EventContext<'a> {
        EventContext {
            method,
            entity: self.name.as_str(),
            condition,
            schema,
            state,
        }
    }

    /// Run one storage dispatch inside the event pair. A cancelled before
    /// notification short-circuits successfully with the default result;
    /// the after notification still fires.
    fn dispatch<T: Default>(
        &self,
        method: Method,
        ctx: &EventContext<'_>,
        run: impl FnOnce() -> Result<T, DataError>,
    ) -> Result<T, DataError> {
        let op = OpKind::from(method);
        self.record(MetricsEvent::OpStart {
            op,
            entity: self.name.clone(),
        });

        if self.events.fire_before(op, ctx) {
            self.record(MetricsEvent::OpCancelled {
                op,
                entity: self.name.clone(),
            });
            self.events.fire_after(op, ctx);

            return Ok(T::default());
        }

        let result = run()?;

        self.events.fire_after(op, ctx);
        self.record(MetricsEvent::OpFinish {
            op,
            entity: self.name.clone(),
        });

        Ok(result)
    }

    fn record(&self, event: MetricsEvent) {
        if let Some(sink) = &self.metrics {
            sink.record(event);
        }
    }

    /// Build the implicit update condition from the key values carried in
    /// the payload.
    fn implicit_update_condition(&self, data: &DataDictionary) -> Result<Condition, DataError> {
        let keys = self.access.get_key(&self.name);
        if keys.is_empty() {
            return Err(DataError::MissingKey {
                entity: self.name.clone(),
            });
        }

        let mut children = Vec::with_capacity(keys.len());
        for key in &keys {
            match data.get(key) {
                Some(value) if !value.is_null() => {
                    children.push(Condition::equal(key.clone(), value.clone()));
                }
                _ => {
                    return Err(DataError::MissingKey {
                        entity: self.name.clone(),
                    })
                }
            }
        }

        Ok(Condition::And(children).reduce())
    }

    /// Copy equality key values out of the condition into the payload so
    /// storage sees which row is being addressed. First match per key wins.
    fn mirror_key_values(&self, condition: &Condition, data: &mut DataDictionary) {
        for key in self.access.get_key(&self.name) {
            let mut found: Option<Value> = None;
            condition.match_field(&key, &mut |leaf| {
                if leaf.op == CompareOp::Eq && found.is_none() {
                    found = Some(leaf.value.clone());
                }
            });

            if let Some(value) = found {
                data.put(key, value);
            }
        }
    }

    fn convert_key(&self, keys: impl IntoKeys) -> Result<(Condition, bool), DataError> {
        let values = keys.into_keys();
        if values.len() > crate::MAX_KEY_VALUES {
            return Err(KeyError::TooManyValues {
                found: values.len(),
            }
            .into());
        }

        let (condition, singular) = self.key_condition(&values);
        let condition = condition.ok_or_else(|| KeyError::Unresolvable {
            entity: self.name.clone(),
        })?;

        Ok((condition.reduce(), singular))
    }

    /// Pair caller-supplied key values with the declared key members.
    ///
    /// A lone text value against a single-member key is split on commas and
    /// trimmed: several non-empty segments become an IN condition (plural),
    /// exactly one becomes equality on the trimmed segment. No declared key
    /// or an arity mismatch yields no condition.
    fn key_condition(&self, values: &[Value]) -> (Option<Condition>, bool) {
        let keys = self.access.get_key(&self.name);
        if keys.is_empty() || values.is_empty() || values.len() != keys.len() {
            return (None, false);
        }

        if keys.len() == 1 {
            if let Value::Text(text) = &values[0] {
                return Self::expand_key_text(&keys[0], text);
            }
        }

        let children: Vec<Condition> = keys
            .iter()
            .zip(values)
            .map(|(key, value)| Condition::equal(key.clone(), value.clone()))
            .collect();

        (Some(Condition::And(children).reduce()), true)
    }

    fn expand_key_text(key: &str, text: &str) -> (Option<Condition>, bool) {
        let parts: Vec<&str> = text
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();

        match parts.as_slice() {
            // every segment blank: fall back to equality on the raw text
            [] => (Some(Condition::equal(key, text)), true),
            [part] => (Some(Condition::equal(key, *part)), true),
            parts => (
                Some(Condition::in_values(
                    key,
                    parts.iter().map(|part| Value::Text((*part).to_string())),
                )),
                false,
            ),
        }
    }
}
