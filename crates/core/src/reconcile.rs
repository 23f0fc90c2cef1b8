//! Structural reconciliation of a progress document against a curriculum.
//!
//! Reconciliation is additive. Missing nodes are inserted zero-valued and the
//! denormalized totals are corrected; completion flags and completed counters
//! are never touched, and entries for ids the curriculum no longer has are
//! left in place.

use std::collections::btree_map::Entry;
use tracing::debug;
use crate::curriculum::Curriculum;
use crate::document::{ExerciseProgress, LessonProgress, ModuleProgress, ProgressDocument};

/// What a reconciliation pass changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Modules inserted
    pub modules_added: usize,
    /// Lessons inserted
    pub lessons_added: usize,
    /// Exercises inserted
    pub exercises_added: usize,
    /// `totalLessons` / `totalExercises` values corrected
    pub totals_corrected: usize,
}

impl ReconcileReport {
    /// True when the document was modified.
    pub fn changed(&self) -> bool {
        self.modules_added + self.lessons_added + self.exercises_added + self.totals_corrected > 0
    }
}

/// Patch `doc` so every curriculum node has a progress entry.
pub fn reconcile(doc: &mut ProgressDocument, curriculum: &Curriculum) -> ReconcileReport {
    let mut report = ReconcileReport::default();

    for module in &curriculum.modules {
        let total_lessons = module.lessons.len() as u32;
        let module_progress = match doc.modules.entry(module.id.clone()) {
            Entry::Vacant(slot) => {
                report.modules_added += 1;
                slot.insert(ModuleProgress {
                    total_lessons,
                    ..Default::default()
                })
            }
            Entry::Occupied(slot) => {
                let existing = slot.into_mut();
                if existing.total_lessons != total_lessons {
                    debug!(
                        "module {}: totalLessons {} -> {}",
                        module.id, existing.total_lessons, total_lessons
                    );
                    existing.total_lessons = total_lessons;
                    report.totals_corrected += 1;
                }
                existing
            }
        };

        for lesson in &module.lessons {
            let total_exercises = lesson.exercises.len() as u32;
            let lesson_progress = match module_progress.lessons.entry(lesson.id.clone()) {
                Entry::Vacant(slot) => {
                    report.lessons_added += 1;
                    slot.insert(LessonProgress {
                        total_exercises,
                        ..Default::default()
                    })
                }
                Entry::Occupied(slot) => {
                    let existing = slot.into_mut();
                    if existing.total_exercises != total_exercises {
                        debug!(
                            "lesson {}/{}: totalExercises {} -> {}",
                            module.id, lesson.id, existing.total_exercises, total_exercises
                        );
                        existing.total_exercises = total_exercises;
                        report.totals_corrected += 1;
                    }
                    existing
                }
            };

            for exercise in &lesson.exercises {
                lesson_progress
                    .exercises
                    .entry(exercise.id.clone())
                    .or_insert_with(|| {
                        report.exercises_added += 1;
                        ExerciseProgress::default()
                    });
            }
        }
    }

    report
}
