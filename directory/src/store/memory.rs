use std::sync::RwLock;

use async_trait::async_trait;

use crate::{
    model::{
        person::Person,
        seed::seed_persons,
        statement::{Statement, StatementResult},
    },
    table::table::PersonTable,
};

use super::{PersonStore, StoreError, StoreResult};

/// Keeps the directory in process, nothing survives a restart
///
/// Every statement runs to completion while holding the table lock, queries share a read lock.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    table: RwLock<PersonTable>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::with_people(Vec::new())
    }

    pub fn with_people(people: Vec<Person>) -> Self {
        Self {
            table: RwLock::new(PersonTable::from_people(people)),
        }
    }

    pub fn seeded() -> Self {
        Self::with_people(seed_persons())
    }
}

#[async_trait]
impl PersonStore for InMemoryStore {
    #[tracing::instrument(skip(self))]
    async fn execute(&self, statement: Statement) -> StoreResult<StatementResult> {
        log::debug!("Received statement: {:?}", statement);

        if statement.is_query() {
            let table = self.table.read().map_err(|_| StoreError::LockPoisoned)?;

            return Ok(table.query(&statement)?);
        }

        let mut table = self.table.write().map_err(|_| StoreError::LockPoisoned)?;

        Ok(table.apply(statement)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        consts::consts::EntityId,
        model::person::NewPerson,
        table::{
            filter::PhoneFilter,
            row::{UpdatePersonData, UpdateStatement},
        },
    };

    fn new_person(name: &str) -> NewPerson {
        NewPerson {
            name: name.to_string(),
            phone: Some("555-0000".to_string()),
            street: "Street".to_string(),
            city: "City".to_string(),
        }
    }

    #[test_log::test(tokio::test)]
    async fn seeded_directory_scenario() {
        let store = InMemoryStore::seeded();

        assert_eq!(store.count().await.unwrap(), 3);

        let without_phone = store.list_all(Some(PhoneFilter::Absent)).await.unwrap();
        assert_eq!(without_phone.len(), 1);
        assert_eq!(without_phone[0].name, "Emily");

        let juan = store
            .find_by_name("Juan")
            .await
            .unwrap()
            .expect("should find Juan");
        assert_eq!(juan.id, EntityId("67890".to_string()));

        let error = store
            .add(new_person("Maria"))
            .await
            .err()
            .expect("should error");
        assert!(matches!(error, StoreError::AlreadyExists(ref name) if name == "Maria"));
        assert!(error.is_invalid_input());

        let emily = store
            .delete_by_name("Emily")
            .await
            .unwrap()
            .expect("should delete Emily");
        assert_eq!(emily.name, "Emily");
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn add_assigns_a_fresh_id_and_counts() {
        let store = InMemoryStore::new();

        let first = store.add(new_person("Ana")).await.unwrap();
        let second = store.add(new_person("Luis")).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(store.count().await.unwrap(), 2);
        assert_eq!(store.list_all(None).await.unwrap(), vec![first, second]);
    }

    #[tokio::test]
    async fn filtered_lists_partition_the_directory() {
        let store = InMemoryStore::seeded();
        store
            .add(NewPerson {
                phone: Some(String::new()),
                ..new_person("Ana")
            })
            .await
            .unwrap();

        let all = store.list_all(None).await.unwrap();
        let present = store.list_all(Some(PhoneFilter::Present)).await.unwrap();
        let absent = store.list_all(Some(PhoneFilter::Absent)).await.unwrap();

        assert_eq!(present.len() + absent.len(), all.len());
        assert!(present.iter().all(|p| !absent.contains(p)));
        assert!(all.iter().all(|p| present.contains(p) || absent.contains(p)));
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let store = InMemoryStore::seeded();

        let error = store
            .update(
                EntityId("missing".to_string()),
                UpdatePersonData::replace(
                    "Name".to_string(),
                    "Street".to_string(),
                    "City".to_string(),
                    UpdateStatement::NoChanges,
                ),
            )
            .await
            .err()
            .expect("should error");

        assert!(matches!(error, StoreError::NotFound(_)));
        assert!(!error.is_invalid_input());
        assert_eq!(store.list_all(None).await.unwrap(), seed_persons());
    }

    #[tokio::test]
    async fn update_keeps_phone_when_not_given() {
        let store = InMemoryStore::seeded();

        let maria = store
            .update(
                EntityId("12345".to_string()),
                UpdatePersonData::replace(
                    "Maria".to_string(),
                    "Reforma".to_string(),
                    "Puebla".to_string(),
                    UpdateStatement::NoChanges,
                ),
            )
            .await
            .unwrap();

        assert_eq!(maria.phone, Some("555-1234".to_string()));
        assert_eq!(maria.city, "Puebla");
        assert_eq!(store.find_by_name("Maria").await.unwrap(), Some(maria));
    }

    #[tokio::test]
    async fn find_unknown_name_is_none() {
        let store = InMemoryStore::seeded();

        assert_eq!(store.find_by_name("Nobody").await.unwrap(), None);
    }
}
