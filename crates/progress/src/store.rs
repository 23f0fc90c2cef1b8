//! Progress store - owns the document lifecycle and persistence.

use chrono::Utc;
use learnpath_core::{
    reconcile, Curriculum, Outcome, ProgressDocument, ReconcileReport, Status, Time,
};
use learnpath_storage::{Storage, StorageError};
use tracing::{debug, info, warn};

/// Storage key used when none is configured.
pub const DEFAULT_KEY: &str = "learningProgress";

/// Error type for progress store operations.
pub type Result<T> = std::result::Result<T, ProgressError>;

/// Errors that can occur while loading or persisting progress.
#[derive(Debug, thiserror::Error)]
pub enum ProgressError {
    /// Storage backend failure
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Document could not be serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Store configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Storage key holding the document
    pub key: String,

    /// Copy an unparseable document to `<key>.corrupt` before starting over
    pub backup_corrupt: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            key: DEFAULT_KEY.to_string(),
            backup_corrupt: true,
        }
    }
}

impl StoreConfig {
    /// Key used for the backup of an unreadable document.
    pub fn corrupt_key(&self) -> String {
        format!("{}.corrupt", self.key)
    }
}

/// Read the document stored under the configured key.
///
/// A missing or unparseable entry yields an empty document. Only storage
/// failures are returned as errors.
pub async fn load_document<S: Storage + ?Sized>(
    storage: &mut S,
    config: &StoreConfig,
) -> Result<ProgressDocument> {
    let Some(raw) = storage.get(&config.key).await? else {
        debug!("No stored progress under {}", config.key);
        return Ok(ProgressDocument::default());
    };

    match serde_json::from_str(&raw) {
        Ok(doc) => Ok(doc),
        Err(e) => {
            warn!("Stored progress under {} is unreadable ({}), starting empty", config.key, e);
            if config.backup_corrupt {
                let backup = config.corrupt_key();
                storage.set(&backup, &raw).await?;
                warn!("Kept the unreadable document as {}", backup);
            }
            Ok(ProgressDocument::default())
        }
    }
}

/// Write the document under `key`.
pub async fn persist_document<S: Storage + ?Sized>(
    storage: &mut S,
    key: &str,
    doc: &ProgressDocument,
) -> Result<()> {
    let json = serde_json::to_string(doc)?;
    storage.set(key, &json).await?;
    Ok(())
}

/// File name for an export taken at `at`.
pub fn export_file_name(at: Time) -> String {
    format!("learning-progress-{}.json", at.format("%Y-%m-%d"))
}

/// Progress store bound to a storage backend and a curriculum.
///
/// Every mutation that changes the document is persisted immediately. Ids are
/// checked against the curriculum first, so entries retained for retired
/// lessons or exercises report [`Outcome::NotFound`] and are never modified.
pub struct ProgressStore<S: Storage> {
    storage: S,
    curriculum: Curriculum,
    document: ProgressDocument,
    config: StoreConfig,
}

impl<S: Storage> ProgressStore<S> {
    /// Create a store with an empty document. Call [`load`](Self::load) next.
    pub fn new(storage: S, curriculum: Curriculum) -> Self {
        Self {
            storage,
            curriculum,
            document: ProgressDocument::default(),
            config: StoreConfig::default(),
        }
    }

    /// Set configuration.
    pub fn with_config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    /// Load and reconcile the stored document, persisting once if it was patched.
    pub async fn load(&mut self) -> Result<ReconcileReport> {
        self.document = load_document(&mut self.storage, &self.config).await?;
        self.reconcile().await
    }

    /// Bring the document in line with the curriculum shape.
    pub async fn reconcile(&mut self) -> Result<ReconcileReport> {
        let report = reconcile(&mut self.document, &self.curriculum);
        if report.changed() {
            info!(
                "Reconciled progress: +{} modules, +{} lessons, +{} exercises, {} totals corrected",
                report.modules_added,
                report.lessons_added,
                report.exercises_added,
                report.totals_corrected
            );
            self.persist().await?;
        }
        Ok(report)
    }

    /// The current document.
    pub fn document(&self) -> &ProgressDocument {
        &self.document
    }

    /// The curriculum this store reconciles against.
    pub fn curriculum(&self) -> &Curriculum {
        &self.curriculum
    }

    /// The storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Record that a lesson was opened.
    pub async fn visit_lesson(&mut self, module_id: &str, lesson_id: &str) -> Result<Outcome> {
        let outcome = if self.curriculum.lesson(module_id, lesson_id).is_some() {
            self.document.visit_lesson(module_id, lesson_id, Utc::now())
        } else {
            Outcome::NotFound
        };
        self.commit(outcome, "visit", &[module_id, lesson_id]).await
    }

    /// Mark a lesson completed.
    pub async fn complete_lesson(&mut self, module_id: &str, lesson_id: &str) -> Result<Outcome> {
        let outcome = if self.curriculum.lesson(module_id, lesson_id).is_some() {
            self.document.complete_lesson(module_id, lesson_id)
        } else {
            Outcome::NotFound
        };
        self.commit(outcome, "complete lesson", &[module_id, lesson_id]).await
    }

    /// Mark a lesson not completed.
    pub async fn uncomplete_lesson(&mut self, module_id: &str, lesson_id: &str) -> Result<Outcome> {
        let outcome = if self.curriculum.lesson(module_id, lesson_id).is_some() {
            self.document.uncomplete_lesson(module_id, lesson_id)
        } else {
            Outcome::NotFound
        };
        self.commit(outcome, "uncomplete lesson", &[module_id, lesson_id]).await
    }

    /// Record that an exercise was opened.
    pub async fn start_exercise(
        &mut self,
        module_id: &str,
        lesson_id: &str,
        exercise_id: &str,
    ) -> Result<Outcome> {
        let outcome = if self.knows_exercise(module_id, lesson_id, exercise_id) {
            self.document
                .start_exercise(module_id, lesson_id, exercise_id, Utc::now())
        } else {
            Outcome::NotFound
        };
        self.commit(outcome, "start exercise", &[module_id, lesson_id, exercise_id]).await
    }

    /// Mark an exercise completed, completing its lesson when it was the last one.
    pub async fn complete_exercise(
        &mut self,
        module_id: &str,
        lesson_id: &str,
        exercise_id: &str,
    ) -> Result<Outcome> {
        let outcome = if self.knows_exercise(module_id, lesson_id, exercise_id) {
            self.document
                .complete_exercise(module_id, lesson_id, exercise_id, Utc::now())
        } else {
            Outcome::NotFound
        };
        self.commit(outcome, "complete exercise", &[module_id, lesson_id, exercise_id]).await
    }

    /// Status of a module.
    pub fn module_status(&self, module_id: &str) -> Status {
        self.document.module_status(module_id)
    }

    /// Status of a lesson.
    pub fn lesson_status(&self, module_id: &str, lesson_id: &str) -> Status {
        self.document.lesson_status(module_id, lesson_id)
    }

    /// Status of an exercise.
    pub fn exercise_status(&self, module_id: &str, lesson_id: &str, exercise_id: &str) -> Status {
        self.document.exercise_status(module_id, lesson_id, exercise_id)
    }

    /// Completed lessons as a percentage of all curriculum lessons.
    pub fn overall_progress(&self) -> f64 {
        self.document.overall_progress(&self.curriculum)
    }

    /// Serialize the whole document.
    pub fn export(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.document)?)
    }

    /// Replace the whole document with `json`.
    ///
    /// Returns `Ok(false)` and keeps the current document when `json` does not
    /// parse. The imported document is taken verbatim, without reconciliation.
    pub async fn import(&mut self, json: &str) -> Result<bool> {
        let doc = match serde_json::from_str::<ProgressDocument>(json) {
            Ok(doc) => doc,
            Err(e) => {
                warn!("Rejected progress import: {}", e);
                return Ok(false);
            }
        };
        self.document = doc;
        self.persist().await?;
        info!("Imported progress ({} modules)", self.document.modules.len());
        Ok(true)
    }

    /// Discard all progress and start from a freshly reconciled document.
    ///
    /// A backup kept from an unreadable document is removed as well.
    pub async fn reset(&mut self) -> Result<()> {
        self.document = ProgressDocument::default();
        reconcile(&mut self.document, &self.curriculum);
        self.persist().await?;
        self.storage.remove(&self.config.corrupt_key()).await?;
        info!("Progress reset");
        Ok(())
    }

    /// Recompute completed counters from the stored flags, persisting on change.
    pub async fn recount(&mut self) -> Result<bool> {
        let changed = self.document.recount();
        if changed {
            self.persist().await?;
            info!("Recounted progress counters");
        }
        Ok(changed)
    }

    fn knows_exercise(&self, module_id: &str, lesson_id: &str, exercise_id: &str) -> bool {
        self.curriculum
            .exercise(module_id, lesson_id, exercise_id)
            .is_some()
    }

    async fn persist(&mut self) -> Result<()> {
        persist_document(&mut self.storage, &self.config.key, &self.document).await
    }

    async fn commit(&mut self, outcome: Outcome, action: &str, path: &[&str]) -> Result<Outcome> {
        match outcome {
            Outcome::Applied => {
                self.persist().await?;
                debug!("{} {}", action, path.join("/"));
            }
            Outcome::Unchanged => debug!("{} {}: already in that state", action, path.join("/")),
            Outcome::NotFound => debug!("{} {}: unknown id", action, path.join("/")),
        }
        Ok(outcome)
    }
}
