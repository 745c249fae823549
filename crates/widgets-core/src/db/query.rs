use crate::{
    Ulid,
    db::{
        executor::{DeleteExecutor, LoadExecutor},
        session::DbSession,
    },
    error::{ErrorClass, ErrorOrigin, InternalError},
    traits::EntityKind,
    value::Value,
};
use std::marker::PhantomData;

///
/// Filter
/// Equality predicate on one named field.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Filter {
    pub field: String,
    pub value: Value,
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Evaluate against an entity; unknown fields never match.
    pub fn matches<E: EntityKind>(&self, entity: &E) -> bool {
        entity
            .field_value(&self.field)
            .is_some_and(|v| v.matches(&self.value))
    }
}

///
/// Query
/// Entity-agnostic selection: an optional key plus conjunctive filters.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Query {
    pub key: Option<Ulid>,
    pub filters: Vec<Filter>,
}

impl Query {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn by_id(mut self, id: Ulid) -> Self {
        self.key = Some(id);
        self
    }

    #[must_use]
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Reject filters on fields the entity does not declare.
    pub fn validate_for<E: EntityKind>(&self) -> Result<(), InternalError> {
        for filter in &self.filters {
            if !E::FIELDS.contains(&filter.field.as_str()) {
                return Err(InternalError::new(
                    ErrorClass::Unsupported,
                    ErrorOrigin::Query,
                    format!("unknown field '{}' on entity {}", filter.field, E::PATH),
                ));
            }
        }

        Ok(())
    }

    pub fn matches<E: EntityKind>(&self, entity: &E) -> bool {
        self.filters.iter().all(|f| f.matches(entity))
    }
}

///
/// FluentLoadQuery
///

pub struct FluentLoadQuery<'a, E: EntityKind> {
    session: &'a DbSession<'a>,
    query: Query,
    _marker: PhantomData<E>,
}

impl<'a, E: EntityKind> FluentLoadQuery<'a, E> {
    pub(crate) fn new(session: &'a DbSession<'a>) -> Self {
        Self {
            session,
            query: Query::new(),
            _marker: PhantomData,
        }
    }

    #[must_use]
    pub fn by_id(mut self, id: Ulid) -> Self {
        self.query = self.query.by_id(id);
        self
    }

    #[must_use]
    pub fn filter_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.query = self.query.filter(Filter::eq(field, value));
        self
    }

    #[must_use]
    pub const fn query(&self) -> &Query {
        &self.query
    }

    fn executor(&self) -> LoadExecutor<'a, E> {
        LoadExecutor::new(self.session.db(), self.session.is_debug(), self.session.metrics())
    }

    /// Every matching entity, in key order.
    pub fn all(self) -> Result<Vec<E>, InternalError> {
        self.executor().execute(&self.query)
    }

    pub fn first(self) -> Result<Option<E>, InternalError> {
        Ok(self.all()?.into_iter().next())
    }

    /// Exactly one matching entity.
    pub fn one(self) -> Result<E, InternalError> {
        let mut rows = self.all()?;

        match rows.len() {
            0 => Err(InternalError::new(
                ErrorClass::NotFound,
                ErrorOrigin::Query,
                format!("no {} matched the query", E::PATH),
            )),
            1 => Ok(rows.remove(0)),
            n => Err(InternalError::new(
                ErrorClass::Conflict,
                ErrorOrigin::Query,
                format!("expected one {}, found {n}", E::PATH),
            )),
        }
    }

    pub fn exists(self) -> Result<bool, InternalError> {
        Ok(self.count()? > 0)
    }

    pub fn count(self) -> Result<usize, InternalError> {
        Ok(self.all()?.len())
    }
}

///
/// FluentDeleteQuery
///

pub struct FluentDeleteQuery<'a, E: EntityKind> {
    session: &'a DbSession<'a>,
    query: Query,
    _marker: PhantomData<E>,
}

impl<'a, E: EntityKind> FluentDeleteQuery<'a, E> {
    pub(crate) fn new(session: &'a DbSession<'a>) -> Self {
        Self {
            session,
            query: Query::new(),
            _marker: PhantomData,
        }
    }

    #[must_use]
    pub fn by_id(mut self, id: Ulid) -> Self {
        self.query = self.query.by_id(id);
        self
    }

    #[must_use]
    pub fn filter_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.query = self.query.filter(Filter::eq(field, value));
        self
    }

    /// Remove matching rows, returning how many were deleted.
    pub fn execute(self) -> Result<u64, InternalError> {
        DeleteExecutor::<E>::new(self.session.db(), self.session.is_debug(), self.session.metrics())
            .execute(&self.query)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::Gadget;

    #[test]
    fn filters_are_conjunctive() {
        let gadget = Gadget::new("lamp", 4);

        assert!(
            Query::new()
                .filter(Filter::eq("label", "lamp"))
                .filter(Filter::eq("size", 4))
                .matches(&gadget)
        );
        assert!(
            !Query::new()
                .filter(Filter::eq("label", "lamp"))
                .filter(Filter::eq("size", 5))
                .matches(&gadget)
        );
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = Query::new()
            .filter(Filter::eq("colour", "red"))
            .validate_for::<Gadget>()
            .unwrap_err();

        assert_eq!(err.origin, ErrorOrigin::Query);
        assert_eq!(err.class, ErrorClass::Unsupported);
    }
}
