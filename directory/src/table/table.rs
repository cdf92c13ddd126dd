use thiserror::Error;

use crate::{
    consts::consts::EntityId,
    model::{
        person::Person,
        statement::{Statement, StatementResult},
    },
};

use super::{filter::filter, row::ApplyUpdateResult};

#[derive(Error, Debug)]
pub enum ApplyErrors {
    // CRUD - CREATE
    #[error("Cannot create, a person with this name already exists: {0}")]
    CannotCreateWhenAlreadyExists(String),

    // CRUD - UPDATE
    #[error("Cannot update, record does not exist: {0}")]
    CannotUpdateDoesNotExist(EntityId),

    // Constraints
    #[error("Cannot set field to null: {0}")]
    NotNullConstraintViolation(String),

    #[error("Cannot run a mutation as a query: {0}")]
    MutationInQuery(String),
}

/// People in insertion order. Names are unique on creation only, updates may introduce a
/// duplicate name, in which case name lookups resolve to the first match.
#[derive(Debug, Default)]
pub struct PersonTable {
    pub person_rows: Vec<Person>,
}

impl PersonTable {
    pub fn from_people(people: Vec<Person>) -> Self {
        Self {
            person_rows: people,
        }
    }

    pub fn len(&self) -> usize {
        self.person_rows.len()
    }

    // Each mutation can be broken up into 2 steps
    //  - Verifying validity / constraints (uniqueness, existence)
    //  - Applying the statement
    // A failed verification leaves the table untouched.
    pub fn apply(&mut self, statement: Statement) -> Result<StatementResult, ApplyErrors> {
        let statement_result = match statement {
            Statement::Add(person) => {
                if self.position_by_name(&person.name).is_some() {
                    return Err(ApplyErrors::CannotCreateWhenAlreadyExists(person.name));
                }

                self.person_rows.push(person.clone());

                StatementResult::Single(person)
            }
            Statement::Update(id, update_person) => {
                let index = self
                    .position_by_id(&id)
                    .ok_or(ApplyErrors::CannotUpdateDoesNotExist(id))?;

                let ApplyUpdateResult { current, .. } =
                    update_person.apply(&mut self.person_rows[index])?;

                StatementResult::Single(current)
            }
            Statement::RemoveByName(name) => {
                let removed = self
                    .position_by_name(&name)
                    .map(|index| self.person_rows.remove(index));

                StatementResult::GetSingle(removed)
            }
            query @ (Statement::Count | Statement::List(_) | Statement::FindByName(_)) => {
                return self.query(&query)
            }
        };

        Ok(statement_result)
    }

    /// Read-only counterpart of [`PersonTable::apply`], rejects mutations
    pub fn query(&self, statement: &Statement) -> Result<StatementResult, ApplyErrors> {
        let statement_result = match statement {
            Statement::Count => StatementResult::Count(self.len()),
            Statement::List(phone_filter) => {
                StatementResult::List(filter(self.person_rows.clone(), *phone_filter))
            }
            Statement::FindByName(name) => StatementResult::GetSingle(
                self.position_by_name(name)
                    .map(|index| self.person_rows[index].clone()),
            ),
            Statement::Add(_) | Statement::Update(_, _) | Statement::RemoveByName(_) => {
                return Err(ApplyErrors::MutationInQuery(format!("{:?}", statement)))
            }
        };

        Ok(statement_result)
    }

    fn position_by_name(&self, name: &str) -> Option<usize> {
        self.person_rows.iter().position(|p| p.name == name)
    }

    fn position_by_id(&self, id: &EntityId) -> Option<usize> {
        self.person_rows.iter().position(|p| &p.id == id)
    }
}
