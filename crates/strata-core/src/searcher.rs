use crate::{
    condition::Condition,
    dict::EntityValue,
    error::DataError,
    method::Method,
    service::{DataService, SelectOptions, TypedSelection},
    state::State,
};

///
/// Conditioner
///
/// Injected keyword-to-condition strategy backing the search surface.
/// Returning `None` means the keyword cannot be resolved for that method.
///

pub trait Conditioner: Send + Sync {
    fn resolve(&self, method: Method, keyword: &str, state: &State) -> Option<Condition>;
}

///
/// LikeConditioner
///
/// Default strategy: OR of contains-style LIKE matches over a fixed set of
/// searchable fields.
///

#[derive(Clone, Debug)]
pub struct LikeConditioner {
    fields: Vec<String>,
}

impl LikeConditioner {
    #[must_use]
    pub fn new(fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }
}

impl Conditioner for LikeConditioner {
    fn resolve(&self, _method: Method, keyword: &str, _state: &State) -> Option<Condition> {
        let keyword = keyword.trim();
        if keyword.is_empty() || self.fields.is_empty() {
            return None;
        }

        let pattern = format!("%{keyword}%");
        let children: Vec<Condition> = self
            .fields
            .iter()
            .map(|field| Condition::like(field.clone(), pattern.clone()))
            .collect();

        Some(Condition::Or(children).reduce())
    }
}

///
/// Searcher
///
/// Keyword-driven facade over a service. Each call resolves the keyword
/// through the service's conditioner, then runs the regular pipeline under
/// the search-flavored method names so validation can tell the surfaces
/// apart.
///

pub struct Searcher<'a, E: EntityValue> {
    service: &'a DataService<E>,
}

impl<'a, E: EntityValue> Searcher<'a, E> {
    pub(crate) const fn new(service: &'a DataService<E>) -> Self {
        Self { service }
    }

    pub fn count(&self, keyword: &str, state: &State) -> Result<u64, DataError> {
        let condition = self.resolve(Method::count(), keyword, state)?;
        self.service
            .count_with(Method::count(), Some(condition), None, state)
    }

    pub fn exists(&self, keyword: &str, state: &State) -> Result<bool, DataError> {
        let condition = self.resolve(Method::exists(), keyword, state)?;
        self.service
            .exists_with(Method::exists(), Some(condition), state)
    }

    pub fn search(
        &self,
        keyword: &str,
        options: SelectOptions,
        state: &State,
    ) -> Result<TypedSelection<E>, DataError> {
        let condition = self.resolve(Method::search(), keyword, state)?;
        self.service
            .select_with(Method::search(), Some(condition), options, state)
    }

    fn resolve(
        &self,
        method: Method,
        keyword: &str,
        state: &State,
    ) -> Result<Condition, DataError> {
        let conditioner = self.service.conditioner().ok_or_else(|| {
            DataError::configuration(format!(
                "service '{}' has no conditioner, search is unavailable",
                self.service.name()
            ))
        })?;

        conditioner
            .resolve(method, keyword, state)
            .map(Condition::reduce)
            .ok_or_else(|| {
                DataError::validation(format!("keyword '{keyword}' could not be resolved"))
            })
    }
}

///
/// TESTS
///
