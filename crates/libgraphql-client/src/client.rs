use crate::config::ClientConfig;
use crate::definition::Definition;
use crate::definition::ParsedSource;
use crate::definition::ScopePath;
use crate::document::Document;
use crate::document::ResolveError;
use crate::projection;
use crate::projection::AccessorObject;
use crate::projection::CastError;
use crate::projection::PlanCache;
use crate::projection::ProjectionError;
use crate::projection::Projector;
use crate::registry::RegistrationError;
use crate::registry::Registry;
use crate::schema::SchemaTypes;
use crate::schema::SchemaValidator;
use crate::schema::SdlSchema;
use crate::validation;
use crate::validation::ValidationError;
use crate::validation::ValidationMessage;
use std::path::Path;
use std::sync::Arc;

/// Entry point tying the registry, document assembly, validation and
/// response projection together.
///
/// A `Client` is `Send + Sync`: sources are typically registered during
/// start-up, after which documents, validation, projection and casts may be
/// used from any number of threads.
///
/// ```
/// use libgraphql_client::Client;
///
/// let client = Client::default();
/// let user_query = client.parse("App::UserQuery", "{ viewer { id } }").unwrap();
/// assert_eq!(user_query.operation_name(), Some("App__UserQuery"));
/// ```
#[derive(Debug)]
pub struct Client {
    config: ClientConfig,
    plans: PlanCache,
    registry: Registry,
    schema_types: Option<Arc<dyn SchemaTypes>>,
    validator: Option<Arc<dyn SchemaValidator>>,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub fn new(config: ClientConfig) -> Self {
        ClientBuilder::new().config(config).build()
    }

    /// Attempt a cast of `source` to the fragment `target`.
    ///
    /// Succeeds only if `target` was statically spread into the selection
    /// that produced `source`; the result is `source`'s raw payload projected
    /// through `target`.
    pub fn cast(
        &self,
        target: &Definition,
        source: &AccessorObject,
    ) -> Result<AccessorObject, CastError> {
        projection::check_cast(target, source)?;
        self.project(target, source.raw_payload())
            .map_err(|err| CastError::Projection {
                err,
                target: target.global_name().to_string(),
            })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn definition(&self, global_name: &str) -> Option<Arc<Definition>> {
        self.registry.get(global_name)
    }

    /// The global document: every registered definition, in registration
    /// order.
    pub fn document(&self) -> Result<Document, ResolveError> {
        self.registry.document()
    }

    /// `roots` followed by every fragment they transitively spread.
    pub fn document_for(&self, roots: &[Arc<Definition>]) -> Result<Document, ResolveError> {
        self.registry.document_for(roots)
    }

    /// End the load phase; later registrations fail.
    pub fn freeze(&self) {
        self.registry.freeze()
    }

    /// Register `source` under the scope path written as `A::B::C`.
    pub fn parse(
        &self,
        scope_path: &str,
        source: &str,
    ) -> Result<ParsedSource, RegistrationError> {
        let scope_path: ScopePath = scope_path.parse()?;
        self.register(&scope_path, source)
    }

    /// Build the accessor object for `payload` as selected by `definition`.
    pub fn project(
        &self,
        definition: &Definition,
        payload: &serde_json::Value,
    ) -> Result<AccessorObject, ProjectionError> {
        let plan = self.plans.plan_for(definition, &|name| self.registry.get(name))?;
        Projector::new(&self.config, self.schema_types.as_deref()).project(&plan, payload)
    }

    pub fn register(
        &self,
        scope_path: &ScopePath,
        source: &str,
    ) -> Result<ParsedSource, RegistrationError> {
        self.registry.register_source(scope_path, source)
    }

    pub fn register_file(
        &self,
        scope_path: &ScopePath,
        file_path: impl AsRef<Path>,
    ) -> Result<ParsedSource, RegistrationError> {
        self.registry.register_file(scope_path, file_path)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The definitions of one parsed source followed by their fragment
    /// closure.
    pub fn source_document(&self, source: &ParsedSource) -> Result<Document, ResolveError> {
        self.registry.document_for(source.definitions())
    }

    /// Validate the global document. See
    /// [`validate_document()`](crate::validation::validate_document).
    pub fn validate(&self) -> Result<(), ValidationError> {
        let document = self.document().map_err(|err|
            ValidationError::new(vec![ValidationMessage::FragmentGraph(err)])
        )?;
        self.validate_document(&document)
    }

    pub fn validate_document(&self, document: &Document) -> Result<(), ValidationError> {
        validation::validate_document(document, self.validator.as_deref())
    }
}

impl Default for Client {
    fn default() -> Self {
        ClientBuilder::new().build()
    }
}

/// Assembles a [`Client`] from a config and an optional schema.
#[derive(Debug, Default)]
pub struct ClientBuilder {
    config: ClientConfig,
    schema_types: Option<Arc<dyn SchemaTypes>>,
    validator: Option<Arc<dyn SchemaValidator>>,
}
impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(self) -> Client {
        log::debug!(
            "Building a client (separator: `{}`, spread mode: {:?}, schema: {}).",
            self.config.separator,
            self.config.spread_mode,
            if self.validator.is_some() { "yes" } else { "no" },
        );
        Client {
            plans: PlanCache::new(),
            registry: Registry::new(self.config.separator.as_str()),
            config: self.config,
            schema_types: self.schema_types,
            validator: self.validator,
        }
    }

    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Use `schema` both to validate documents and to guide projection.
    pub fn schema(self, schema: SdlSchema) -> Self {
        let schema = Arc::new(schema);
        self.schema_types(schema.clone()).validator(schema)
    }

    pub fn schema_types(mut self, schema_types: Arc<dyn SchemaTypes>) -> Self {
        self.schema_types = Some(schema_types);
        self
    }

    pub fn validator(mut self, validator: Arc<dyn SchemaValidator>) -> Self {
        self.validator = Some(validator);
        self
    }
}
