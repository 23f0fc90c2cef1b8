//! Progress tracking.
//!
//! The [`ProgressStore`] owns the persisted progress document and keeps it in
//! step with the curriculum. The navigation tree, summaries and content loader
//! read from or report to an explicitly passed store.

#![warn(missing_docs)]

pub mod store;
pub mod summary;
pub mod navigation;
pub mod content;

pub use store::{
    export_file_name, load_document, persist_document, ProgressError, ProgressStore, Result,
    StoreConfig, DEFAULT_KEY,
};
pub use summary::{ModuleSummary, ProgressSummary};
pub use navigation::{NavExercise, NavLesson, NavModule, NavTree};
pub use content::{ContentError, ContentLoader, LessonContent};
