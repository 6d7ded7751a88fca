use crate::{
    config::Configuration,
    error::{ConfigError, ProcessError},
    pipeline::{
        branch::{BranchCollaborators, BranchRunner},
        collaborators::{IdentityCleaner, Interpreter, ProductStore, TextCleaner, TextExtractor},
        domain::{BranchKind, ImageLocator, ImageLocatorSet, MergedAnalysis, ResponseEnvelope},
        persistence::PersistenceHandoff,
    },
    telemetry::{TelemetryCollector, TelemetrySink, TracingSink},
};
use std::sync::Arc;
use tracing::{info, instrument};

/// Runs the ingredient and nutrition branches concurrently, merges their
/// analyses and stores the product.
pub struct Coordinator {
    branches: BranchRunner,
    persistence: PersistenceHandoff,
    telemetry: TelemetryCollector,
    configuration: Configuration,
}

impl Coordinator {
    pub fn builder(configuration: Configuration) -> CoordinatorBuilder {
        CoordinatorBuilder::new(configuration)
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Both branches run on the caller's task and are joined with
    /// first-error-wins semantics. The store is only called once both
    /// analyses are available; a failing branch drops the other in-flight
    /// branch without waiting for it.
    #[instrument(
        skip_all,
        fields(ingredient = %ingredient_locator, nutrition = %nutrition_locator)
    )]
    pub async fn process(
        &self,
        image_locators: ImageLocatorSet,
        ingredient_locator: ImageLocator,
        nutrition_locator: ImageLocator,
    ) -> Result<ResponseEnvelope, ProcessError> {
        let result = self
            .run(image_locators, ingredient_locator, nutrition_locator)
            .await;
        if let Err(e) = &result {
            self.telemetry.notify_process_failed(e);
        }
        result
    }

    async fn run(
        &self,
        image_locators: ImageLocatorSet,
        ingredient_locator: ImageLocator,
        nutrition_locator: ImageLocator,
    ) -> Result<ResponseEnvelope, ProcessError> {
        info!("Starting ingredient and nutrition analysis");

        let (ingredient, nutrition) = tokio::try_join!(
            self.branches.run(ingredient_locator, BranchKind::Ingredient),
            self.branches.run(nutrition_locator, BranchKind::Nutrition),
        )?;

        let merged = MergedAnalysis::new(ingredient, nutrition);
        self.telemetry.notify_branches_joined(&merged);

        let product_name = merged
            .product_name_or(&self.configuration.default_product_name)
            .to_string();

        let saved = self
            .persistence
            .save(image_locators, product_name, merged)
            .await?;
        self.telemetry
            .notify_product_saved(&saved.id, &saved.record.product_name);

        Ok(saved.record.into_envelope(saved.id))
    }
}

pub struct CoordinatorBuilder {
    configuration: Configuration,
    extractor: Option<Arc<dyn TextExtractor>>,
    cleaner: Option<Arc<dyn TextCleaner>>,
    interpreter: Option<Arc<dyn Interpreter>>,
    store: Option<Arc<dyn ProductStore>>,
    sinks: Vec<Arc<dyn TelemetrySink>>,
    tracing_sink: bool,
}

impl CoordinatorBuilder {
    pub fn new(configuration: Configuration) -> Self {
        Self {
            configuration,
            extractor: None,
            cleaner: None,
            interpreter: None,
            store: None,
            sinks: Vec::new(),
            tracing_sink: true,
        }
    }

    // Sets the fallback product name, this will override the configuration.
    pub fn default_product_name(mut self, name: impl Into<String>) -> Self {
        self.configuration.default_product_name = name.into();
        self
    }

    // Toggles raw OCR text in the logs, this will override the configuration.
    pub fn trace_extracted_text(mut self, enabled: bool) -> Self {
        self.configuration.trace_extracted_text = enabled;
        self
    }

    pub fn trace_text_limit(mut self, limit: usize) -> Self {
        self.configuration.trace_text_limit = limit;
        self
    }

    pub fn extractor(mut self, extractor: Arc<dyn TextExtractor>) -> Self {
        self.extractor = Some(extractor);
        self
    }

    // Defaults to `IdentityCleaner` when not set.
    pub fn cleaner(mut self, cleaner: Arc<dyn TextCleaner>) -> Self {
        self.cleaner = Some(cleaner);
        self
    }

    pub fn interpreter(mut self, interpreter: Arc<dyn Interpreter>) -> Self {
        self.interpreter = Some(interpreter);
        self
    }

    pub fn store(mut self, store: Arc<dyn ProductStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn sink(mut self, sink: Arc<dyn TelemetrySink>) -> Self {
        self.sinks.push(sink);
        self
    }

    // Drops the built-in tracing sink, leaving only sinks added explicitly.
    pub fn without_tracing_sink(mut self) -> Self {
        self.tracing_sink = false;
        self
    }

    pub fn build(self) -> Result<Coordinator, ConfigError> {
        self.configuration.validate()?;

        let extractor = self
            .extractor
            .ok_or(ConfigError::MissingCollaborator("text extractor"))?;
        let interpreter = self
            .interpreter
            .ok_or(ConfigError::MissingCollaborator("interpreter"))?;
        let store = self
            .store
            .ok_or(ConfigError::MissingCollaborator("product store"))?;
        let cleaner = self
            .cleaner
            .unwrap_or_else(|| Arc::new(IdentityCleaner));

        let mut telemetry = TelemetryCollector::new();
        if self.tracing_sink {
            telemetry = telemetry.add_sink(Arc::new(TracingSink::new(
                self.configuration.trace_extracted_text,
                self.configuration.trace_text_limit,
            )));
        }
        for sink in self.sinks {
            telemetry = telemetry.add_sink(sink);
        }

        let branches = BranchRunner::new(
            BranchCollaborators {
                extractor,
                cleaner,
                interpreter,
            },
            telemetry.clone(),
        );

        Ok(Coordinator {
            branches,
            persistence: PersistenceHandoff::new(store),
            telemetry,
            configuration: self.configuration,
        })
    }
}
