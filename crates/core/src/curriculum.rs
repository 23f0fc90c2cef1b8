//! Curriculum model - the static tree of modules, lessons and exercises.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use crate::id::{ExerciseId, LessonId, ModuleId};

/// Errors raised while loading or validating a curriculum.
#[derive(Debug, thiserror::Error)]
pub enum CurriculumError {
    /// The curriculum JSON could not be parsed
    #[error("invalid curriculum JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// An id was empty
    #[error("empty {kind} id under '{parent}'")]
    EmptyId {
        /// Entity kind ("module", "lesson", "exercise")
        kind: &'static str,
        /// Path of the parent entity
        parent: String,
    },

    /// Two siblings share the same id
    #[error("duplicate {kind} id '{id}' under '{parent}'")]
    DuplicateId {
        /// Entity kind ("module", "lesson", "exercise")
        kind: &'static str,
        /// The repeated id
        id: String,
        /// Path of the parent entity
        parent: String,
    },
}

/// The full curriculum, in display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Curriculum {
    /// Top-level modules
    pub modules: Vec<CurriculumModule>,
}

/// A module groups related lessons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurriculumModule {
    /// Unique identifier
    pub id: ModuleId,

    /// Display title
    pub title: String,

    /// Short icon glyph shown next to the title
    #[serde(default)]
    pub icon: String,

    /// Description
    #[serde(default)]
    pub description: String,

    /// Lessons in order
    #[serde(default)]
    pub lessons: Vec<CurriculumLesson>,
}

/// A single lesson backed by a markdown file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurriculumLesson {
    /// Identifier, unique within the module
    pub id: LessonId,

    /// Display title
    pub title: String,

    /// Markdown path relative to the content root
    pub content_path: String,

    /// Exercises attached to the lesson
    #[serde(default)]
    pub exercises: Vec<CurriculumExercise>,
}

/// Exercise metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurriculumExercise {
    /// Identifier, unique within the lesson
    pub id: ExerciseId,

    /// Display title
    pub title: String,

    /// What the learner is asked to do
    #[serde(default)]
    pub description: String,

    /// Exercise kind
    #[serde(rename = "type")]
    pub kind: ExerciseKind,

    /// Difficulty rating
    pub difficulty: Difficulty,
}

/// Kind of exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseKind {
    /// Write code
    Coding,
    /// Answer questions
    Quiz,
    /// Read and summarize
    Reading,
    /// Larger multi-step build
    Project,
}

impl ExerciseKind {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseKind::Coding => "coding",
            ExerciseKind::Quiz => "quiz",
            ExerciseKind::Reading => "reading",
            ExerciseKind::Project => "project",
        }
    }
}

/// Difficulty rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Entry level
    Beginner,
    /// Requires earlier modules
    Intermediate,
    /// Stretch material
    Advanced,
}

impl Difficulty {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

impl Curriculum {
    /// Create a curriculum from modules.
    pub fn new(modules: Vec<CurriculumModule>) -> Self {
        Self { modules }
    }

    /// Parse and validate a curriculum from JSON.
    ///
    /// Accepts either `{"modules": [...]}` or a bare array of modules.
    pub fn from_json(json: &str) -> Result<Self, CurriculumError> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Shape {
            Wrapped(Curriculum),
            Bare(Vec<CurriculumModule>),
        }

        let curriculum = match serde_json::from_str::<Shape>(json)? {
            Shape::Wrapped(c) => c,
            Shape::Bare(modules) => Curriculum::new(modules),
        };
        curriculum.validate()?;
        Ok(curriculum)
    }

    /// Check that ids are non-empty and unique among siblings.
    pub fn validate(&self) -> Result<(), CurriculumError> {
        let mut module_ids = HashSet::new();
        for module in &self.modules {
            check_id("module", module.id.as_str(), "curriculum", &mut module_ids)?;

            let mut lesson_ids = HashSet::new();
            for lesson in &module.lessons {
                check_id("lesson", lesson.id.as_str(), module.id.as_str(), &mut lesson_ids)?;

                let parent = format!("{}/{}", module.id, lesson.id);
                let mut exercise_ids = HashSet::new();
                for exercise in &lesson.exercises {
                    check_id("exercise", exercise.id.as_str(), &parent, &mut exercise_ids)?;
                }
            }
        }
        Ok(())
    }

    /// Find a module by id.
    pub fn module(&self, module_id: &str) -> Option<&CurriculumModule> {
        self.modules.iter().find(|m| m.id.as_str() == module_id)
    }

    /// Find a lesson by module and lesson id.
    pub fn lesson(&self, module_id: &str, lesson_id: &str) -> Option<&CurriculumLesson> {
        self.module(module_id)?.lesson(lesson_id)
    }

    /// Find an exercise by its full path.
    pub fn exercise(
        &self,
        module_id: &str,
        lesson_id: &str,
        exercise_id: &str,
    ) -> Option<&CurriculumExercise> {
        self.lesson(module_id, lesson_id)?.exercise(exercise_id)
    }

    /// Number of lessons across all modules.
    pub fn total_lessons(&self) -> usize {
        self.modules.iter().map(|m| m.lessons.len()).sum()
    }
}

impl CurriculumModule {
    /// Find a lesson in this module.
    pub fn lesson(&self, lesson_id: &str) -> Option<&CurriculumLesson> {
        self.lessons.iter().find(|l| l.id.as_str() == lesson_id)
    }
}

impl CurriculumLesson {
    /// Find an exercise in this lesson.
    pub fn exercise(&self, exercise_id: &str) -> Option<&CurriculumExercise> {
        self.exercises.iter().find(|e| e.id.as_str() == exercise_id)
    }
}

fn check_id<'a>(
    kind: &'static str,
    id: &'a str,
    parent: &str,
    seen: &mut HashSet<&'a str>,
) -> Result<(), CurriculumError> {
    if id.trim().is_empty() {
        return Err(CurriculumError::EmptyId {
            kind,
            parent: parent.to_string(),
        });
    }
    if !seen.insert(id) {
        return Err(CurriculumError::DuplicateId {
            kind,
            id: id.to_string(),
            parent: parent.to_string(),
        });
    }
    Ok(())
}
