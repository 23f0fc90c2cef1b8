//! learnpath core data models.
//!
//! This crate defines the curriculum tree, the persisted progress document,
//! and the pure functions that reconcile and mutate it. Nothing here does I/O.

#![warn(missing_docs)]

// Core identities
mod id;

// Curriculum definition
mod curriculum;
mod builtin;

// Progress state
mod document;
mod reconcile;
mod mutate;

// Re-exports
pub use id::{ExerciseId, LessonId, ModuleId};

// Curriculum
pub use curriculum::{
    Curriculum, CurriculumError, CurriculumExercise, CurriculumLesson, CurriculumModule,
    Difficulty, ExerciseKind,
};
pub use builtin::builtin_curriculum;

// Progress
pub use document::{
    ExerciseProgress, LessonProgress, LessonRef, ModuleProgress, Outcome, ProgressDocument, Status,
};
pub use reconcile::{reconcile, ReconcileReport};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
