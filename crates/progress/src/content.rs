//! Lesson content loading and exercise opening.

use std::path::{Path, PathBuf};
use learnpath_core::CurriculumExercise;
use learnpath_storage::Storage;
use tokio::fs;
use tracing::debug;
use crate::store::{ProgressError, ProgressStore};

/// Errors that can occur while loading content.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// Lesson is not in the curriculum
    #[error("unknown lesson {module}/{lesson}")]
    UnknownLesson {
        /// Module id
        module: String,
        /// Lesson id
        lesson: String,
    },

    /// Exercise is not in the curriculum
    #[error("unknown exercise {module}/{lesson}/{exercise}")]
    UnknownExercise {
        /// Module id
        module: String,
        /// Lesson id
        lesson: String,
        /// Exercise id
        exercise: String,
    },

    /// Markdown file could not be read
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Recording progress failed
    #[error(transparent)]
    Progress(#[from] ProgressError),
}

/// A loaded lesson.
#[derive(Debug, Clone)]
pub struct LessonContent {
    /// Lesson title from the curriculum
    pub title: String,
    /// File the markdown was read from
    pub path: PathBuf,
    /// Raw markdown
    pub markdown: String,
}

/// Reads lesson markdown from a content directory.
#[derive(Debug, Clone)]
pub struct ContentLoader {
    root: PathBuf,
}

impl ContentLoader {
    /// Create a loader for files under `root`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Load a lesson's markdown and record the visit.
    ///
    /// The visit is only recorded when the file was read.
    pub async fn load_lesson<S: Storage>(
        &self,
        store: &mut ProgressStore<S>,
        module_id: &str,
        lesson_id: &str,
    ) -> Result<LessonContent, ContentError> {
        let lesson = store
            .curriculum()
            .lesson(module_id, lesson_id)
            .ok_or_else(|| ContentError::UnknownLesson {
                module: module_id.to_string(),
                lesson: lesson_id.to_string(),
            })?;

        let path = self.root.join(&lesson.content_path);
        let title = lesson.title.clone();
        let markdown = fs::read_to_string(&path)
            .await
            .map_err(|source| ContentError::Io { path: path.clone(), source })?;
        debug!("Loaded {} ({} bytes)", path.display(), markdown.len());

        store.visit_lesson(module_id, lesson_id).await?;
        Ok(LessonContent { title, path, markdown })
    }

    /// Look up an exercise and record that it was started.
    pub async fn open_exercise<S: Storage>(
        &self,
        store: &mut ProgressStore<S>,
        module_id: &str,
        lesson_id: &str,
        exercise_id: &str,
    ) -> Result<CurriculumExercise, ContentError> {
        let exercise = store
            .curriculum()
            .exercise(module_id, lesson_id, exercise_id)
            .cloned()
            .ok_or_else(|| ContentError::UnknownExercise {
                module: module_id.to_string(),
                lesson: lesson_id.to_string(),
                exercise: exercise_id.to_string(),
            })?;

        store.start_exercise(module_id, lesson_id, exercise_id).await?;
        Ok(exercise)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use learnpath_core::{builtin_curriculum, Status};
    use learnpath_storage::MemoryStorage;

    async fn store() -> ProgressStore<MemoryStorage> {
        let mut store = ProgressStore::new(MemoryStorage::new(), builtin_curriculum());
        store.load().await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_load_lesson_records_visit() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("ownership")).unwrap();
        std::fs::write(dir.path().join("ownership/moves.md"), "# Moves\n").unwrap();

        let mut store = store().await;
        let loader = ContentLoader::new(dir.path());
        let content = loader.load_lesson(&mut store, "ownership", "moves").await.unwrap();

        assert_eq!(content.title, "Moves and Copies");
        assert_eq!(content.markdown, "# Moves\n");
        assert_eq!(store.lesson_status("ownership", "moves"), Status::InProgress);
    }

    #[tokio::test]
    async fn test_missing_file_records_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store().await;
        let loader = ContentLoader::new(dir.path());

        let err = loader.load_lesson(&mut store, "ownership", "moves").await.unwrap_err();
        assert!(matches!(err, ContentError::Io { .. }));
        assert_eq!(store.lesson_status("ownership", "moves"), Status::NotStarted);
    }

    #[tokio::test]
    async fn test_unknown_lesson() {
        let mut store = store().await;
        let loader = ContentLoader::new("unused");
        let err = loader.load_lesson(&mut store, "ownership", "nope").await.unwrap_err();
        assert!(matches!(err, ContentError::UnknownLesson { .. }));
    }

    #[tokio::test]
    async fn test_open_exercise_starts_it() {
        let mut store = store().await;
        let loader = ContentLoader::new("unused");

        let exercise = loader
            .open_exercise(&mut store, "concurrency", "threads", "parallel-sum")
            .await
            .unwrap();
        assert_eq!(exercise.title, "Parallel sum");
        assert_eq!(
            store.exercise_status("concurrency", "threads", "parallel-sum"),
            Status::InProgress
        );

        let err = loader
            .open_exercise(&mut store, "concurrency", "threads", "missing")
            .await
            .unwrap_err();
        assert!(matches!(err, ContentError::UnknownExercise { .. }));
    }
}
