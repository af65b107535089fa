/// GraphQL server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphQLConfig {
    /// GraphQL endpoint path
    pub endpoint: String,

    /// Serve GraphiQL on `GET {endpoint}`
    pub enable_graphiql: bool,

    /// Serve the schema SDL on `GET {endpoint}/schema`
    pub enable_sdl: bool,

    /// Enable introspection queries (GraphiQL needs them)
    pub enable_introspection: bool,

    /// Maximum query depth (0 = unlimited)
    pub max_depth: usize,

    /// Maximum query complexity (0 = unlimited)
    pub max_complexity: usize,

    /// Enable Apollo Tracing
    pub enable_tracing: bool,

    /// Reject `addBook` when `authorId` names no stored author
    pub strict_references: bool,
}

impl GraphQLConfig {
    /// Create a configuration with everything but tracing enabled.
    ///
    /// # Example
    ///
    /// ```
    /// use booklist_graphql::GraphQLConfig;
    ///
    /// let config = GraphQLConfig::new("/graphql");
    /// assert_eq!(config.endpoint, "/graphql");
    /// assert_eq!(config.sdl_endpoint(), "/graphql/schema");
    /// assert!(config.enable_graphiql);
    /// assert!(!config.strict_references);
    /// ```
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            enable_graphiql: true,
            enable_sdl: true,
            enable_introspection: true,
            max_depth: 0,
            max_complexity: 0,
            enable_tracing: false,
            strict_references: false,
        }
    }

    /// Path of the SDL export route.
    pub fn sdl_endpoint(&self) -> String {
        format!("{}/schema", self.endpoint.trim_end_matches('/'))
    }

    pub fn with_graphiql(mut self, enable: bool) -> Self {
        self.enable_graphiql = enable;
        self
    }

    pub fn with_sdl(mut self, enable: bool) -> Self {
        self.enable_sdl = enable;
        self
    }

    pub fn with_introspection(mut self, enable: bool) -> Self {
        self.enable_introspection = enable;
        self
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_max_complexity(mut self, complexity: usize) -> Self {
        self.max_complexity = complexity;
        self
    }

    pub fn with_tracing(mut self, enable: bool) -> Self {
        self.enable_tracing = enable;
        self
    }

    pub fn with_strict_references(mut self, enable: bool) -> Self {
        self.strict_references = enable;
        self
    }
}

impl Default for GraphQLConfig {
    fn default() -> Self {
        Self::new("/graphql")
    }
}
