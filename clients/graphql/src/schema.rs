use directory::{
    consts::consts::EntityId,
    model::person::{NewPerson, Person},
    store::{PersonStore, StoreError},
    table::{
        filter::PhoneFilter,
        row::{UpdatePersonData, UpdateStatement},
    },
};
use juniper::{
    graphql_value,
    http::{GraphQLRequest, GraphQLResponse},
    EmptyMutation, EmptySubscription, FieldError, FieldResult, InputValue, Nullable,
    OperationType, RootNode, Value, ID,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::operation::operation_type;

pub struct GraphQLContext {
    pub store: Arc<dyn PersonStore>,
}

// https://graphql-rust.github.io/juniper/master/types/objects/using_contexts.html
impl juniper::Context for GraphQLContext {}

use juniper::{GraphQLEnum, GraphQLObject};

#[derive(GraphQLEnum, Clone, Copy, Debug, PartialEq)]
#[graphql(description = "Phone presence filter")]
pub enum YesNo {
    Yes,
    No,
}

impl From<YesNo> for PhoneFilter {
    fn from(value: YesNo) -> Self {
        match value {
            YesNo::Yes => PhoneFilter::Present,
            YesNo::No => PhoneFilter::Absent,
        }
    }
}

#[derive(GraphQLObject)]
#[graphql(description = "Where a person lives")]
struct Address {
    pub street: String,
    pub city: String,
}

#[derive(GraphQLObject)]
#[graphql(name = "Person", description = "An entry in the contact list")]
struct PersonObject {
    pub name: String,
    pub phone: Option<String>,
    pub address: Address,
    pub id: ID,
}

impl PersonObject {
    pub fn from_person(person: Person) -> PersonObject {
        let address = person.address();

        PersonObject {
            name: person.name,
            phone: person.phone,
            address: Address {
                street: address.street,
                city: address.city,
            },
            id: ID::new(person.id.to_string()),
        }
    }
}

/// User mistakes carry the offending argument, everything else is reported without detail
fn to_field_error(error: StoreError) -> FieldError {
    match &error {
        StoreError::AlreadyExists(argument) | StoreError::InvalidUpdate(argument) => {
            let invalid_args = argument.clone();

            FieldError::new(
                error,
                graphql_value!({ "code": "BAD_USER_INPUT", "invalidArgs": invalid_args }),
            )
        }
        _ => {
            log::error!("Directory request failed: {}", error);

            FieldError::new(error, Value::null())
        }
    }
}

pub struct QueryRoot;

#[juniper::graphql_object(context = GraphQLContext)]
impl QueryRoot {
    /// Number of people in the directory
    async fn count_persons(&self, context: &GraphQLContext) -> FieldResult<i32> {
        let count = context.store.count().await.map_err(to_field_error)?;

        Ok(i32::try_from(count)?)
    }

    /// Everyone in the directory, or only those with (YES) or without (NO) a phone
    async fn get_all_persons(
        &self,
        phone: Option<YesNo>,
        context: &GraphQLContext,
    ) -> FieldResult<Vec<Option<PersonObject>>> {
        let people = context
            .store
            .list_all(phone.map(PhoneFilter::from))
            .await
            .map_err(to_field_error)?;

        Ok(people
            .into_iter()
            .map(|p| Some(PersonObject::from_person(p)))
            .collect())
    }

    /// First person whose name is exactly `name`
    async fn get_phone_by_name(
        &self,
        name: String,
        context: &GraphQLContext,
    ) -> FieldResult<Option<PersonObject>> {
        let person = context
            .store
            .find_by_name(&name)
            .await
            .map_err(to_field_error)?;

        Ok(person.map(PersonObject::from_person))
    }
}

pub struct MutationRoot;

#[juniper::graphql_object(context = GraphQLContext)]
impl MutationRoot {
    /// Fails when a person with the same name already exists
    async fn add_person(
        &self,
        name: String,
        phone: Option<String>,
        street: String,
        city: String,
        context: &GraphQLContext,
    ) -> FieldResult<Option<PersonObject>> {
        let new_person = NewPerson {
            name,
            phone,
            street,
            city,
        };

        let person = context
            .store
            .add(new_person)
            .await
            .map_err(to_field_error)?;

        Ok(Some(PersonObject::from_person(person)))
    }

    /// Removes the first person named `name`, returns null when there is none
    async fn delete_person(
        &self,
        name: String,
        context: &GraphQLContext,
    ) -> FieldResult<Option<PersonObject>> {
        let person = context
            .store
            .delete_by_name(&name)
            .await
            .map_err(to_field_error)?;

        Ok(person.map(PersonObject::from_person))
    }

    /// Replaces name, street and city. Leaving `phone` out keeps it, `phone: null` removes it.
    async fn update_person(
        &self,
        id: ID,
        name: String,
        phone: Nullable<String>,
        street: String,
        city: String,
        context: &GraphQLContext,
    ) -> FieldResult<Option<PersonObject>> {
        let phone_update = match phone {
            Nullable::ImplicitNull => UpdateStatement::NoChanges,
            Nullable::ExplicitNull => UpdateStatement::Unset,
            Nullable::Some(t) => UpdateStatement::Set(t),
        };

        let update_person_data = UpdatePersonData::replace(name, street, city, phone_update);

        let person = context
            .store
            .update(EntityId(id.to_string()), update_person_data)
            .await
            .map_err(to_field_error)?;

        Ok(Some(PersonObject::from_person(person)))
    }
}

pub type Schema = RootNode<'static, QueryRoot, MutationRoot, EmptySubscription<GraphQLContext>>;

pub type ReadOnlySchema = RootNode<
    'static,
    QueryRoot,
    EmptyMutation<GraphQLContext>,
    EmptySubscription<GraphQLContext>,
>;

pub fn create_schema() -> Schema {
    Schema::new(QueryRoot {}, MutationRoot {}, EmptySubscription::new())
}

pub fn create_read_only_schema() -> ReadOnlySchema {
    ReadOnlySchema::new(QueryRoot {}, EmptyMutation::new(), EmptySubscription::new())
}

/// Body of a /graphql request, kept readable until the operation kind has been checked
#[derive(Deserialize, Debug)]
pub struct DirectoryRequest {
    pub query: String,
    #[serde(rename = "operationName")]
    pub operation_name: Option<String>,
    pub variables: Option<InputValue>,
}

impl DirectoryRequest {
    pub fn into_graphql_request(self) -> GraphQLRequest {
        GraphQLRequest::new(self.query, self.operation_name, self.variables)
    }
}

/// Response sent instead of executing a mutation against the read-only schema
pub fn mutations_disabled() -> serde_json::Value {
    serde_json::json!({
        "data": null,
        "errors": [{ "message": "Mutations are disabled on this server" }],
    })
}

/// The schema being served, with or without mutations
pub enum AppSchema {
    Crud(Schema),
    ReadOnly(ReadOnlySchema),
}

impl AppSchema {
    pub fn new(read_only: bool) -> Self {
        if read_only {
            AppSchema::ReadOnly(create_read_only_schema())
        } else {
            AppSchema::Crud(create_schema())
        }
    }

    /// juniper has no mutation type to validate against on the read-only schema, so mutations
    /// are turned away before they reach it
    pub fn allows(&self, request: &DirectoryRequest) -> bool {
        match self {
            AppSchema::Crud(_) => true,
            AppSchema::ReadOnly(schema) => {
                operation_type(schema, &request.query, request.operation_name.as_deref())
                    != Some(OperationType::Mutation)
            }
        }
    }

    pub async fn execute<'a>(
        &'a self,
        request: &'a GraphQLRequest,
        context: &'a GraphQLContext,
    ) -> GraphQLResponse<'a> {
        match self {
            AppSchema::Crud(schema) => request.execute(schema, context).await,
            AppSchema::ReadOnly(schema) => request.execute(schema, context).await,
        }
    }
}
