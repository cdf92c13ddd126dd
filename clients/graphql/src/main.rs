use actix_cors::Cors;
use actix_web::{
    get,
    middleware::{self, Condition},
    route,
    web::{self, Data},
    App, HttpResponse, HttpServer, Responder,
};
use actix_web_lab::respond::Html;
use clap::Parser;
use directory::{
    options::{DirectoryOptions, StorageEngine},
    store::PersonStore,
};
use juniper::http::graphiql::graphiql_source;
use num_format::{Locale, ToFormattedString};
use std::{io, sync::Arc};

use crate::schema::{mutations_disabled, AppSchema, DirectoryRequest, GraphQLContext};

mod operation;
mod schema;

/// GraphiQL playground UI
#[get("/graphiql")]
async fn graphql_playground() -> impl Responder {
    Html(graphiql_source("/graphql", None))
}

/// GraphQL endpoint -- triggered once per request
#[route("/graphql", method = "GET", method = "POST")]
async fn graphql(
    schema: web::Data<AppSchema>,
    store: web::Data<dyn PersonStore>,
    data: web::Json<DirectoryRequest>,
) -> impl Responder {
    let request = data.into_inner();

    if !schema.allows(&request) {
        log::warn!("Rejected mutation on read-only schema");
        return HttpResponse::Ok().json(mutations_disabled());
    }

    let graphql_context = GraphQLContext {
        store: store.into_inner(),
    };

    let request = request.into_graphql_request();
    let response = schema.execute(&request, &graphql_context).await;

    HttpResponse::Ok().json(response)
}

/// 📇 Persons Directory GraphQL Server, serves a contact list kept in memory or proxied to a REST collection
#[derive(Parser, Debug)]
struct Cli {
    /// Port the graphql server will run on
    #[clap(short, long, default_value = "4000")]
    port: u16,

    /// Address the graphql server will run on
    #[clap(short, long, default_value = "0.0.0.0")]
    address: String,

    /// Logs every HTTP request
    #[clap(long)]
    log_http: bool,

    #[clap(long, default_value_t = 2)]
    http_workers: usize,

    /// Base url of a REST collection serving /persons, e.g. http://localhost:3000. Keeps everything in memory when omitted
    #[clap(long)]
    remote_url: Option<String>,

    /// Starts the in-memory directory empty instead of with the sample contacts
    #[clap(long, conflicts_with = "remote_url")]
    no_seed: bool,

    /// Serves only the queries, without any mutation
    #[clap(long)]
    read_only: bool,
}

impl Cli {
    fn directory_options(&self) -> DirectoryOptions {
        let storage_engine = match &self.remote_url {
            Some(remote_url) => StorageEngine::Remote(remote_url.clone()),
            None => StorageEngine::Memory {
                seed: !self.no_seed,
            },
        };

        DirectoryOptions::default().set_storage_engine(storage_engine)
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let args = Cli::parse();

    let directory_options = args.directory_options();

    log::info!("Storage engine: {:?}", directory_options.storage_engine);

    let store = directory_options
        .build()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    match store.count().await {
        Ok(count) => log::info!(
            "📀 Data [Persons: {}]",
            count.to_formatted_string(&Locale::en)
        ),
        Err(e) => log::warn!("Unable to count persons on startup: {}", e),
    }

    // Create Juniper schema
    let schema = Arc::new(AppSchema::new(args.read_only));

    if args.read_only {
        log::info!("Serving read-only schema, mutations are disabled");
    }

    log::info!("starting HTTP server on port {}.", args.port);

    log::info!(
        "🚀 Server ready at http://{}:{}/graphql",
        args.address,
        args.port
    );

    log::info!(
        "GraphiQL playground: http://{}:{}/graphiql",
        args.address,
        args.port
    );

    let log_http = args.log_http;

    // Start HTTP server
    HttpServer::new(move || {
        let app = App::new()
            .app_data(Data::from(schema.clone()))
            .app_data(Data::from(store.clone()))
            .service(graphql)
            .service(graphql_playground)
            .wrap(Cors::permissive())
            .wrap(Condition::new(log_http, middleware::Logger::default()));

        app
    })
    .workers(args.http_workers)
    .bind((args.address, args.port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test as actix_test;
    use directory::store::memory::InMemoryStore;

    async fn call_graphql(read_only: bool, body: serde_json::Value) -> serde_json::Value {
        let store: Arc<dyn PersonStore> = Arc::new(InMemoryStore::seeded());
        call_graphql_with(store, read_only, body).await
    }

    async fn call_graphql_with(
        store: Arc<dyn PersonStore>,
        read_only: bool,
        body: serde_json::Value,
    ) -> serde_json::Value {
        let app = actix_test::init_service(
            App::new()
                .app_data(Data::from(Arc::new(AppSchema::new(read_only))))
                .app_data(Data::from(store))
                .service(graphql),
        )
        .await;

        let request = actix_test::TestRequest::post()
            .uri("/graphql")
            .set_json(body)
            .to_request();

        actix_test::call_and_read_body_json(&app, request).await
    }

    #[actix_web::test]
    async fn graphql_endpoint_answers_queries() {
        let body = call_graphql(false, serde_json::json!({ "query": "{ countPersons }" })).await;

        assert_eq!(body, serde_json::json!({ "data": { "countPersons": 3 } }));
    }

    #[actix_web::test]
    async fn graphql_endpoint_passes_variables() {
        let body = call_graphql(
            false,
            serde_json::json!({
                "query": "query ($name: String!) { getPhoneByName(name: $name) { phone } }",
                "variables": { "name": "Maria" },
            }),
        )
        .await;

        assert_eq!(
            body,
            serde_json::json!({ "data": { "getPhoneByName": { "phone": "555-1234" } } })
        );
    }

    #[actix_web::test]
    async fn duplicate_name_error_carries_the_argument() {
        let body = call_graphql(
            false,
            serde_json::json!({
                "query": r#"mutation { addPerson(name: "Juan", street: "S", city: "C") { id } }"#,
            }),
        )
        .await;

        assert_eq!(body["data"]["addPerson"], serde_json::Value::Null);
        assert_eq!(
            body["errors"][0]["extensions"],
            serde_json::json!({ "code": "BAD_USER_INPUT", "invalidArgs": "Juan" })
        );
    }

    #[actix_web::test]
    async fn read_only_endpoint_reports_mutations_as_errors() {
        let store: Arc<dyn PersonStore> = Arc::new(InMemoryStore::seeded());

        let body = call_graphql_with(
            store.clone(),
            true,
            serde_json::json!({
                "query": r#"mutation { deletePerson(name: "Emily") { name } }"#,
            }),
        )
        .await;

        assert!(body["data"].is_null());
        assert!(body["errors"].is_array());
        assert_eq!(store.count().await.unwrap(), 3);
    }

    #[test]
    fn cli_defaults_to_seeded_memory() {
        let args = Cli::parse_from(["persons-directory"]);

        assert_eq!(args.port, 4000);
        assert_eq!(
            args.directory_options().storage_engine,
            StorageEngine::Memory { seed: true }
        );
    }

    #[test]
    fn cli_selects_remote_store() {
        let args = Cli::parse_from([
            "persons-directory",
            "--remote-url",
            "http://localhost:3000",
        ]);

        assert_eq!(
            args.directory_options().storage_engine,
            StorageEngine::Remote("http://localhost:3000".to_string())
        );
    }

    #[test]
    fn cli_rejects_no_seed_with_remote_store() {
        let result = Cli::try_parse_from([
            "persons-directory",
            "--remote-url",
            "http://localhost:3000",
            "--no-seed",
        ]);

        assert!(result.is_err());
    }
}
