//! Progress document model - the persisted completion state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use crate::id::{ExerciseId, LessonId, ModuleId};
use crate::Time;

/// The whole persisted progress state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressDocument {
    /// Progress per module
    #[serde(default)]
    pub modules: BTreeMap<ModuleId, ModuleProgress>,

    /// The lesson most recently opened
    #[serde(default)]
    pub last_visited: Option<LessonRef>,
}

/// Pointer to a lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonRef {
    /// Module id
    pub module_id: ModuleId,

    /// Lesson id
    pub lesson_id: LessonId,
}

/// Progress for one module.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleProgress {
    /// Every lesson completed
    #[serde(default)]
    pub completed: bool,

    /// Any lesson visited or started
    #[serde(default)]
    pub started: bool,

    /// Number of completed lessons
    #[serde(default)]
    pub completed_lessons: u32,

    /// Number of lessons in the curriculum
    #[serde(default)]
    pub total_lessons: u32,

    /// Progress per lesson
    #[serde(default)]
    pub lessons: BTreeMap<LessonId, LessonProgress>,
}

/// Progress for one lesson.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonProgress {
    /// Lesson completed
    #[serde(default)]
    pub completed: bool,

    /// Lesson opened or an exercise started
    #[serde(default)]
    pub started: bool,

    /// Number of completed exercises
    #[serde(default)]
    pub completed_exercises: u32,

    /// Number of exercises in the curriculum
    #[serde(default)]
    pub total_exercises: u32,

    /// When the lesson was last opened
    #[serde(default)]
    pub last_visited: Option<Time>,

    /// Progress per exercise
    #[serde(default)]
    pub exercises: BTreeMap<ExerciseId, ExerciseProgress>,
}

/// Progress for one exercise.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseProgress {
    /// Exercise completed
    #[serde(default)]
    pub completed: bool,

    /// Exercise opened
    #[serde(default)]
    pub started: bool,

    /// When the exercise was last attempted
    #[serde(default)]
    pub last_attempt: Option<Time>,
}

/// Derived status of any progress node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    /// Never opened
    NotStarted,
    /// Opened but not completed
    InProgress,
    /// Completed
    Completed,
}

impl Status {
    /// Derive a status from the stored flags. `completed` wins over `started`.
    pub fn from_flags(completed: bool, started: bool) -> Self {
        if completed {
            Status::Completed
        } else if started {
            Status::InProgress
        } else {
            Status::NotStarted
        }
    }

    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::NotStarted => "not-started",
            Status::InProgress => "in-progress",
            Status::Completed => "completed",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a mutation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// State changed
    Applied,
    /// Already in the requested state
    Unchanged,
    /// A referenced id is not in the document
    NotFound,
}

impl Outcome {
    /// True when the document was modified.
    pub fn changed(&self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

impl ModuleProgress {
    /// Derived status.
    pub fn status(&self) -> Status {
        Status::from_flags(self.completed, self.started)
    }
}

impl LessonProgress {
    /// Derived status.
    pub fn status(&self) -> Status {
        Status::from_flags(self.completed, self.started)
    }
}

impl ExerciseProgress {
    /// Derived status.
    pub fn status(&self) -> Status {
        Status::from_flags(self.completed, self.started)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_precedence() {
        assert_eq!(Status::from_flags(false, false), Status::NotStarted);
        assert_eq!(Status::from_flags(false, true), Status::InProgress);
        assert_eq!(Status::from_flags(true, false), Status::Completed);
        assert_eq!(Status::from_flags(true, true), Status::Completed);
    }

    #[test]
    fn test_document_uses_camel_case_keys() {
        let mut doc = ProgressDocument::default();
        let mut module = ModuleProgress {
            total_lessons: 2,
            ..Default::default()
        };
        module.lessons.insert("l1".into(), LessonProgress::default());
        doc.modules.insert("m1".into(), module);
        doc.last_visited = Some(LessonRef {
            module_id: "m1".into(),
            lesson_id: "l1".into(),
        });

        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["lastVisited"]["moduleId"], "m1");
        assert_eq!(value["modules"]["m1"]["totalLessons"], 2);
        assert_eq!(value["modules"]["m1"]["completedLessons"], 0);
        assert!(value["modules"]["m1"]["lessons"]["l1"]["lastVisited"].is_null());
    }

    #[test]
    fn test_empty_object_parses_as_empty_document() {
        let doc: ProgressDocument = serde_json::from_str("{}").unwrap();
        assert_eq!(doc, ProgressDocument::default());
    }

    #[test]
    fn test_status_serializes_kebab_case() {
        assert_eq!(serde_json::to_string(&Status::InProgress).unwrap(), "\"in-progress\"");
        assert_eq!(Status::NotStarted.to_string(), "not-started");
    }
}
