//! Navigation tree - the curriculum annotated with progress status.
//!
//! The tree is plain data; rendering is left to the caller.

use learnpath_core::{
    Curriculum, Difficulty, ExerciseId, ExerciseKind, LessonId, ModuleId, ProgressDocument, Status,
};

/// Curriculum tree with a status on every node.
#[derive(Debug, Clone, PartialEq)]
pub struct NavTree {
    /// Modules in curriculum order
    pub modules: Vec<NavModule>,
}

/// A module node.
#[derive(Debug, Clone, PartialEq)]
pub struct NavModule {
    /// Module id
    pub id: ModuleId,
    /// Title
    pub title: String,
    /// Icon glyph
    pub icon: String,
    /// Derived status
    pub status: Status,
    /// Completed lessons
    pub completed_lessons: u32,
    /// Lessons in the module
    pub total_lessons: u32,
    /// Lesson nodes
    pub lessons: Vec<NavLesson>,
}

/// A lesson node.
#[derive(Debug, Clone, PartialEq)]
pub struct NavLesson {
    /// Lesson id
    pub id: LessonId,
    /// Title
    pub title: String,
    /// Derived status
    pub status: Status,
    /// This is the most recently visited lesson
    pub current: bool,
    /// Exercise nodes
    pub exercises: Vec<NavExercise>,
}

/// An exercise node.
#[derive(Debug, Clone, PartialEq)]
pub struct NavExercise {
    /// Exercise id
    pub id: ExerciseId,
    /// Title
    pub title: String,
    /// Exercise kind
    pub kind: ExerciseKind,
    /// Difficulty
    pub difficulty: Difficulty,
    /// Derived status
    pub status: Status,
}

impl NavTree {
    /// Build the tree from the curriculum. Document entries the curriculum
    /// does not name are not shown.
    pub fn build(curriculum: &Curriculum, doc: &ProgressDocument) -> Self {
        let current = doc.last_visited.as_ref();

        let modules = curriculum
            .modules
            .iter()
            .map(|module| {
                let m = module.id.as_str();
                let progress = doc.modules.get(m);

                let lessons = module
                    .lessons
                    .iter()
                    .map(|lesson| {
                        let l = lesson.id.as_str();
                        NavLesson {
                            id: lesson.id.clone(),
                            title: lesson.title.clone(),
                            status: doc.lesson_status(m, l),
                            current: current
                                .is_some_and(|r| r.module_id == module.id && r.lesson_id == lesson.id),
                            exercises: lesson
                                .exercises
                                .iter()
                                .map(|exercise| NavExercise {
                                    id: exercise.id.clone(),
                                    title: exercise.title.clone(),
                                    kind: exercise.kind,
                                    difficulty: exercise.difficulty,
                                    status: doc.exercise_status(m, l, exercise.id.as_str()),
                                })
                                .collect(),
                        }
                    })
                    .collect();

                NavModule {
                    id: module.id.clone(),
                    title: module.title.clone(),
                    icon: module.icon.clone(),
                    status: doc.module_status(m),
                    completed_lessons: progress.map(|p| p.completed_lessons).unwrap_or(0),
                    total_lessons: module.lessons.len() as u32,
                    lessons,
                }
            })
            .collect();

        Self { modules }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use learnpath_core::{builtin_curriculum, reconcile};

    #[test]
    fn test_tree_annotates_status() {
        let curriculum = builtin_curriculum();
        let mut doc = ProgressDocument::default();
        reconcile(&mut doc, &curriculum);
        doc.visit_lesson("getting-started", "hello-world", Utc::now());
        doc.complete_exercise("getting-started", "hello-world", "print-greeting", Utc::now());
        doc.complete_lesson("getting-started", "installation");

        let tree = NavTree::build(&curriculum, &doc);
        assert_eq!(tree.modules.len(), 3);

        let gs = &tree.modules[0];
        assert_eq!(gs.status, Status::InProgress);
        assert_eq!(gs.completed_lessons, 1);
        assert_eq!(gs.total_lessons, 3);

        let hello = &gs.lessons[1];
        assert_eq!(hello.id.as_str(), "hello-world");
        assert!(hello.current);
        assert_eq!(hello.status, Status::InProgress);
        assert_eq!(hello.exercises[0].status, Status::Completed);
        assert_eq!(hello.exercises[1].status, Status::NotStarted);

        let install = &gs.lessons[0];
        assert_eq!(install.id.as_str(), "installation");
        assert!(!install.current);
        assert_eq!(install.status, Status::Completed);
    }

    #[test]
    fn test_dead_entries_are_hidden() {
        let curriculum = builtin_curriculum();
        let mut doc = ProgressDocument::default();
        reconcile(&mut doc, &curriculum);
        doc.modules.insert("retired".into(), Default::default());

        let tree = NavTree::build(&curriculum, &doc);
        assert!(tree.modules.iter().all(|m| m.id.as_str() != "retired"));
    }
}
