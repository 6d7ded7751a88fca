#![allow(dead_code)]

use async_trait::async_trait;
use label_scan::{
    AnalysisResult, BranchKind, Configuration, Coordinator, ExtractionError, ImageLocator,
    InterpretationError, Interpreter, ProcessError, ProductId, ProductRecord, ProductStore,
    StorageError, TelemetrySink, TextCleaner, TextExtractor,
};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Shared, ordered record of collaborator calls.
#[derive(Default)]
pub struct Journal {
    entries: Mutex<Vec<String>>,
}

impl Journal {
    pub fn push(&self, entry: impl Into<String>) {
        self.entries.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().unwrap().clone()
    }

    pub fn position(&self, entry: &str) -> Option<usize> {
        self.entries().iter().position(|e| e == entry)
    }
}

pub struct ScriptedExtractor {
    journal: Arc<Journal>,
    texts: HashMap<String, Result<String, String>>,
    gates: HashMap<String, Arc<Notify>>,
}

impl ScriptedExtractor {
    pub fn new(journal: Arc<Journal>) -> Self {
        Self {
            journal,
            texts: HashMap::new(),
            gates: HashMap::new(),
        }
    }

    pub fn text(mut self, locator: &str, text: &str) -> Self {
        self.texts.insert(locator.to_string(), Ok(text.to_string()));
        self
    }

    pub fn failure(mut self, locator: &str, message: &str) -> Self {
        self.texts.insert(locator.to_string(), Err(message.to_string()));
        self
    }

    /// Holds extraction of `locator` until `gate` is notified.
    pub fn gated(mut self, locator: &str, gate: Arc<Notify>) -> Self {
        self.gates.insert(locator.to_string(), gate);
        self
    }
}

#[async_trait]
impl TextExtractor for ScriptedExtractor {
    async fn extract_text(&self, locator: &ImageLocator) -> Result<String, ExtractionError> {
        self.journal.push(format!("extract:{locator}"));
        if let Some(gate) = self.gates.get(locator.as_str()) {
            gate.notified().await;
        }
        match self.texts.get(locator.as_str()) {
            Some(Ok(text)) => Ok(text.clone()),
            Some(Err(message)) => Err(ExtractionError::new(message.clone())),
            None => Err(ExtractionError::new(format!("no image at {locator}"))),
        }
    }
}

pub struct CountingCleaner {
    journal: Arc<Journal>,
    pub calls: AtomicUsize,
}

impl CountingCleaner {
    pub fn new(journal: Arc<Journal>) -> Self {
        Self {
            journal,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl TextCleaner for CountingCleaner {
    async fn clean_text(&self, text: &str) -> String {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.journal.push(format!("clean:{text}"));
        text.trim().to_lowercase()
    }
}

pub struct ScriptedInterpreter {
    journal: Arc<Journal>,
    ingredient: Result<Value, String>,
    nutrition: Result<Value, String>,
    notify_after: HashMap<BranchKind, Arc<Notify>>,
    pub ingredient_calls: AtomicUsize,
    pub nutrition_calls: AtomicUsize,
}

impl ScriptedInterpreter {
    pub fn new(journal: Arc<Journal>, ingredient: Value, nutrition: Value) -> Self {
        Self {
            journal,
            ingredient: Ok(ingredient),
            nutrition: Ok(nutrition),
            notify_after: HashMap::new(),
            ingredient_calls: AtomicUsize::new(0),
            nutrition_calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(mut self, kind: BranchKind, message: &str) -> Self {
        match kind {
            BranchKind::Ingredient => self.ingredient = Err(message.to_string()),
            BranchKind::Nutrition => self.nutrition = Err(message.to_string()),
        }
        self
    }

    /// Notifies `gate` once the interpreter for `kind` has produced a result.
    pub fn releasing_after(mut self, kind: BranchKind, gate: Arc<Notify>) -> Self {
        self.notify_after.insert(kind, gate);
        self
    }

    fn respond(&self, kind: BranchKind, text: &str) -> Result<AnalysisResult, InterpretationError> {
        self.journal.push(format!("{kind}:{text}"));
        let scripted = match kind {
            BranchKind::Ingredient => &self.ingredient,
            BranchKind::Nutrition => &self.nutrition,
        };
        let result = scripted
            .clone()
            .map(AnalysisResult::new)
            .map_err(InterpretationError::new);
        self.journal.push(format!("{kind}:done"));
        if let Some(gate) = self.notify_after.get(&kind) {
            gate.notify_one();
        }
        result
    }
}

#[async_trait]
impl Interpreter for ScriptedInterpreter {
    async fn interpret_ingredient(&self, text: &str) -> Result<AnalysisResult, InterpretationError> {
        self.ingredient_calls.fetch_add(1, Ordering::SeqCst);
        self.respond(BranchKind::Ingredient, text)
    }

    async fn interpret_nutrition(&self, text: &str) -> Result<AnalysisResult, InterpretationError> {
        self.nutrition_calls.fetch_add(1, Ordering::SeqCst);
        self.respond(BranchKind::Nutrition, text)
    }
}

pub struct RecordingStore {
    id: Result<String, String>,
    pub records: Mutex<Vec<ProductRecord>>,
}

impl RecordingStore {
    pub fn returning(id: &str) -> Self {
        Self {
            id: Ok(id.to_string()),
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            id: Err(message.to_string()),
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[async_trait]
impl ProductStore for RecordingStore {
    async fn store(&self, record: &ProductRecord) -> Result<ProductId, StorageError> {
        self.records.lock().unwrap().push(record.clone());
        match &self.id {
            Ok(id) => Ok(ProductId::new(id.clone())),
            Err(message) => Err(StorageError::new(message.clone())),
        }
    }
}

#[derive(Default)]
pub struct RecordingSink {
    pub events: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl TelemetrySink for RecordingSink {
    fn on_text_extracted(&self, kind: BranchKind, text: &str) {
        self.events.lock().unwrap().push(format!("extracted:{kind}:{text}"));
    }

    fn on_branches_joined(&self, _merged: &label_scan::MergedAnalysis) {
        self.events.lock().unwrap().push("joined".to_string());
    }

    fn on_product_saved(&self, id: &ProductId, product_name: &str) {
        self.events
            .lock()
            .unwrap()
            .push(format!("saved:{id}:{product_name}"));
    }

    fn on_process_failed(&self, error: &ProcessError) {
        self.events
            .lock()
            .unwrap()
            .push(format!("failed:{:?}", error.stage()));
    }
}

pub struct Fixture {
    pub journal: Arc<Journal>,
    pub cleaner: Arc<CountingCleaner>,
    pub interpreter: Arc<ScriptedInterpreter>,
    pub store: Arc<RecordingStore>,
    pub sink: Arc<RecordingSink>,
    pub coordinator: Coordinator,
}

impl Fixture {
    pub fn new(
        journal: Arc<Journal>,
        extractor: ScriptedExtractor,
        interpreter: ScriptedInterpreter,
        store: RecordingStore,
    ) -> Self {
        let cleaner = Arc::new(CountingCleaner::new(journal.clone()));
        let interpreter = Arc::new(interpreter);
        let store = Arc::new(store);
        let sink = Arc::new(RecordingSink::default());
        let coordinator = Coordinator::builder(Configuration::default())
            .extractor(Arc::new(extractor))
            .cleaner(cleaner.clone())
            .interpreter(interpreter.clone())
            .store(store.clone())
            .sink(sink.clone())
            .build()
            .expect("Failed to build coordinator");

        Self {
            journal,
            cleaner,
            interpreter,
            store,
            sink,
            coordinator,
        }
    }
}
