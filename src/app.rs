// Application bootstrapper and HTTP server

use axum::Router;
use booklist_config::{ServerSettings, Validate};
use booklist_graphql::{BooklistSchema, GraphQLConfig, SchemaBuilder, router};
use booklist_log::{LogConfig, info};
use booklist_store::{SharedStore, connect};
use tokio::net::TcpListener;

use crate::error::Result;

/// A configured Booklist server: settings, store and schema wired together.
pub struct Application {
    settings: ServerSettings,
    graphql: GraphQLConfig,
    schema: BooklistSchema,
}

impl Application {
    /// Validate `settings`, connect the record store they name and build the
    /// schema around it.
    pub async fn bootstrap(settings: ServerSettings) -> Result<Self> {
        settings.validate()?;
        let store = connect(&settings.database_url).await?;
        Self::with_store(settings, store)
    }

    /// Build around an already connected store.
    pub fn with_store(settings: ServerSettings, store: SharedStore) -> Result<Self> {
        let graphql = Self::graphql_config(&settings);
        let schema = SchemaBuilder::new()
            .store(store)
            .config(graphql.clone())
            .build()?;

        Ok(Self {
            settings,
            graphql,
            schema,
        })
    }

    /// Apply the configured log level and format, and route `tracing`
    /// events from the HTTP stack through the same level.
    pub fn init_logging(settings: &ServerSettings) {
        booklist_log::init_with(&LogConfig::from_names(
            &settings.log_level,
            &settings.log_format,
        ));
        booklist_log::tracing_compat::install();
    }

    /// GraphQL options derived from server settings.
    pub fn graphql_config(settings: &ServerSettings) -> GraphQLConfig {
        GraphQLConfig::new(settings.endpoint.clone())
            .with_graphiql(settings.graphiql)
            .with_sdl(settings.sdl)
            .with_introspection(settings.introspection)
            .with_max_depth(settings.max_depth)
            .with_max_complexity(settings.max_complexity)
            .with_tracing(settings.apollo_tracing)
            .with_strict_references(settings.strict_references)
    }

    pub fn settings(&self) -> &ServerSettings {
        &self.settings
    }

    pub fn schema(&self) -> &BooklistSchema {
        &self.schema
    }

    pub fn router(&self) -> Router {
        router(self.schema.clone(), &self.graphql)
    }

    /// Bind the configured address and serve until Ctrl-C.
    pub async fn listen(self) -> Result<()> {
        let listener = TcpListener::bind(self.settings.socket_addr()).await?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener until Ctrl-C.
    pub async fn serve(self, listener: TcpListener) -> Result<()> {
        let addr = listener.local_addr()?;
        info!(
            target: "booklist::server",
            "Now listening on http://{}{}",
            addr,
            self.graphql.endpoint
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!(target: "booklist::server", "server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available; run until the process is killed.
        std::future::pending::<()>().await;
    }
}
