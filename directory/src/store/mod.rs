use async_trait::async_trait;
use thiserror::Error;

use crate::{
    consts::consts::EntityId,
    model::{
        person::{NewPerson, Person},
        statement::{Statement, StatementResult},
    },
    table::{filter::PhoneFilter, row::UpdatePersonData, table::ApplyErrors},
};

pub mod memory;
pub mod remote;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("A person with this name already exists: {0}")]
    AlreadyExists(String),
    #[error("Could not find a person with id {0}")]
    NotFound(EntityId),
    #[error("Cannot set field to null: {0}")]
    InvalidUpdate(String),
    #[error("Remote store url cannot hold a path: {0}")]
    InvalidBaseUrl(String),
    #[error("Remote store request failed: {0}")]
    Remote(#[from] reqwest::Error),
    #[error("Person table lock was poisoned")]
    LockPoisoned,
    #[error("Unexpected statement: {0}")]
    UnexpectedStatement(String),
}

impl StoreError {
    /// Errors caused by the caller's arguments, as opposed to failures inside the directory
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            StoreError::AlreadyExists(_) | StoreError::InvalidUpdate(_)
        )
    }
}

impl From<ApplyErrors> for StoreError {
    fn from(error: ApplyErrors) -> Self {
        match error {
            ApplyErrors::CannotCreateWhenAlreadyExists(name) => StoreError::AlreadyExists(name),
            ApplyErrors::CannotUpdateDoesNotExist(id) => StoreError::NotFound(id),
            ApplyErrors::NotNullConstraintViolation(field) => StoreError::InvalidUpdate(field),
            ApplyErrors::MutationInQuery(statement) => StoreError::UnexpectedStatement(statement),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// The directory service: owns (or proxies) the person collection
///
/// Implementors only provide [`PersonStore::execute`]; the typed operations below are built on
/// top of it and are what callers should normally use.
#[async_trait]
pub trait PersonStore: Send + Sync {
    /// Runs a single statement and returns its result. See [`StatementResult`] for which result
    /// each statement maps to.
    async fn execute(&self, statement: Statement) -> StoreResult<StatementResult>;

    async fn count(&self) -> StoreResult<usize> {
        Ok(self.execute(Statement::Count).await?.count())
    }

    async fn list_all(&self, phone_filter: Option<PhoneFilter>) -> StoreResult<Vec<Person>> {
        Ok(self.execute(Statement::List(phone_filter)).await?.list())
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Person>> {
        Ok(self
            .execute(Statement::FindByName(name.to_string()))
            .await?
            .get_single())
    }

    /// Fails with [`StoreError::AlreadyExists`] when the name is taken
    async fn add(&self, new_person: NewPerson) -> StoreResult<Person> {
        Ok(self
            .execute(Statement::Add(new_person.into_person()))
            .await?
            .single())
    }

    async fn delete_by_name(&self, name: &str) -> StoreResult<Option<Person>> {
        Ok(self
            .execute(Statement::RemoveByName(name.to_string()))
            .await?
            .get_single())
    }

    /// Fails with [`StoreError::NotFound`] when no person has this id
    async fn update(&self, id: EntityId, update: UpdatePersonData) -> StoreResult<Person> {
        Ok(self
            .execute(Statement::Update(id, update))
            .await?
            .single())
    }
}
