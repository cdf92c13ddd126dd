use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::{
    consts::consts::{EntityId, PERSONS_RESOURCE},
    model::{
        person::Person,
        statement::{Statement, StatementResult},
    },
    table::table::PersonTable,
};

use super::{PersonStore, StoreError, StoreResult};

/// Proxies the directory to a REST collection (`GET/POST /persons`, `PUT/DELETE /persons/:id`)
/// and keeps no state of its own.
///
/// The remote collection has no query capability, so every statement first fetches the whole
/// collection, validates the statement against that snapshot and only then writes. The fetch and
/// the write are NOT atomic: two concurrent adds of the same name can both pass the uniqueness
/// check, and an update can overwrite a change made after the fetch.
#[derive(Debug, Clone)]
pub struct RemoteStore {
    client: Client,
    base_url: Url,
}

impl RemoteStore {
    pub fn new(base_url: Url) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// Appends `segments` to the base url path, each one percent-encoded
    fn resource_url(&self, segments: &[&str]) -> StoreResult<Url> {
        let mut url = self.base_url.clone();

        url.path_segments_mut()
            .map_err(|_| StoreError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    fn collection_url(&self) -> StoreResult<Url> {
        self.resource_url(&[PERSONS_RESOURCE])
    }

    fn person_url(&self, id: &EntityId) -> StoreResult<Url> {
        self.resource_url(&[PERSONS_RESOURCE, id.as_str()])
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_all(&self) -> StoreResult<Vec<Person>> {
        let people = self
            .client
            .get(self.collection_url()?)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<Person>>()
            .await?;

        Ok(people)
    }

    async fn create(&self, person: &Person) -> StoreResult<Person> {
        let created = self
            .client
            .post(self.collection_url()?)
            .json(person)
            .send()
            .await?
            .error_for_status()?
            .json::<Person>()
            .await?;

        Ok(created)
    }

    async fn replace(&self, person: &Person) -> StoreResult<Person> {
        let replaced = self
            .client
            .put(self.person_url(&person.id)?)
            .json(person)
            .send()
            .await?
            .error_for_status()?
            .json::<Person>()
            .await?;

        Ok(replaced)
    }

    async fn delete(&self, id: &EntityId) -> StoreResult<()> {
        self.client
            .delete(self.person_url(id)?)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}

#[async_trait]
impl PersonStore for RemoteStore {
    #[tracing::instrument(skip(self))]
    async fn execute(&self, statement: Statement) -> StoreResult<StatementResult> {
        log::debug!("Forwarding statement to {}: {:?}", self.base_url, statement);

        // Working copy of the remote collection, only used to validate and shape the write
        let mut snapshot = PersonTable::from_people(self.fetch_all().await?);

        match statement {
            Statement::Add(_) => {
                let person = snapshot.apply(statement)?.single();

                Ok(StatementResult::Single(self.create(&person).await?))
            }
            Statement::Update(_, _) => {
                let person = snapshot.apply(statement)?.single();

                Ok(StatementResult::Single(self.replace(&person).await?))
            }
            Statement::RemoveByName(_) => match snapshot.apply(statement)?.get_single() {
                Some(person) => {
                    self.delete(&person.id).await?;

                    Ok(StatementResult::GetSingle(Some(person)))
                }
                None => Ok(StatementResult::GetSingle(None)),
            },
            Statement::Count | Statement::List(_) | Statement::FindByName(_) => {
                Ok(snapshot.query(&statement)?)
            }
        }
    }
}
