//! Pure mutations and queries over a [`ProgressDocument`].
//!
//! Every mutation reports an [`Outcome`]; callers persist only on
//! [`Outcome::Applied`]. Ids are looked up in the document, so a node the
//! document does not know yields [`Outcome::NotFound`].

use crate::curriculum::Curriculum;
use crate::document::{LessonRef, Outcome, ProgressDocument, Status};
use crate::Time;

impl ProgressDocument {
    /// Record that a lesson was opened.
    pub fn visit_lesson(&mut self, module_id: &str, lesson_id: &str, now: Time) -> Outcome {
        let Some(module) = self.modules.get_mut(module_id) else {
            return Outcome::NotFound;
        };
        let Some(lesson) = module.lessons.get_mut(lesson_id) else {
            return Outcome::NotFound;
        };

        module.started = true;
        lesson.started = true;
        lesson.last_visited = Some(now);
        self.last_visited = Some(LessonRef {
            module_id: module_id.into(),
            lesson_id: lesson_id.into(),
        });
        Outcome::Applied
    }

    /// Mark a lesson completed and roll the count up to its module.
    pub fn complete_lesson(&mut self, module_id: &str, lesson_id: &str) -> Outcome {
        let Some(module) = self.modules.get_mut(module_id) else {
            return Outcome::NotFound;
        };
        let Some(lesson) = module.lessons.get_mut(lesson_id) else {
            return Outcome::NotFound;
        };
        if lesson.completed {
            return Outcome::Unchanged;
        }

        lesson.completed = true;
        module.completed_lessons = module.completed_lessons.saturating_add(1);
        if module.completed_lessons == module.total_lessons {
            module.completed = true;
        }
        Outcome::Applied
    }

    /// Undo [`complete_lesson`](Self::complete_lesson).
    pub fn uncomplete_lesson(&mut self, module_id: &str, lesson_id: &str) -> Outcome {
        let Some(module) = self.modules.get_mut(module_id) else {
            return Outcome::NotFound;
        };
        let Some(lesson) = module.lessons.get_mut(lesson_id) else {
            return Outcome::NotFound;
        };
        if !lesson.completed {
            return Outcome::Unchanged;
        }

        lesson.completed = false;
        module.completed_lessons = module.completed_lessons.saturating_sub(1);
        module.completed = false;
        Outcome::Applied
    }

    /// Record that an exercise was opened.
    ///
    /// The parent lesson and module are marked started as well.
    pub fn start_exercise(
        &mut self,
        module_id: &str,
        lesson_id: &str,
        exercise_id: &str,
        now: Time,
    ) -> Outcome {
        let Some(module) = self.modules.get_mut(module_id) else {
            return Outcome::NotFound;
        };
        let Some(lesson) = module.lessons.get_mut(lesson_id) else {
            return Outcome::NotFound;
        };
        let Some(exercise) = lesson.exercises.get_mut(exercise_id) else {
            return Outcome::NotFound;
        };
        if exercise.started {
            return Outcome::Unchanged;
        }

        exercise.started = true;
        exercise.last_attempt = Some(now);
        lesson.started = true;
        module.started = true;
        Outcome::Applied
    }

    /// Mark an exercise completed.
    ///
    /// Completing the last exercise of a lesson completes the lesson. A lesson
    /// with no exercises is never completed this way.
    pub fn complete_exercise(
        &mut self,
        module_id: &str,
        lesson_id: &str,
        exercise_id: &str,
        now: Time,
    ) -> Outcome {
        let Some(module) = self.modules.get_mut(module_id) else {
            return Outcome::NotFound;
        };
        let Some(lesson) = module.lessons.get_mut(lesson_id) else {
            return Outcome::NotFound;
        };
        let Some(exercise) = lesson.exercises.get_mut(exercise_id) else {
            return Outcome::NotFound;
        };
        if exercise.completed {
            return Outcome::Unchanged;
        }

        exercise.completed = true;
        exercise.started = true;
        exercise.last_attempt = Some(now);
        lesson.started = true;
        lesson.completed_exercises = lesson.completed_exercises.saturating_add(1);
        module.started = true;

        let all_done =
            lesson.total_exercises > 0 && lesson.completed_exercises == lesson.total_exercises;
        if all_done {
            self.complete_lesson(module_id, lesson_id);
        }
        Outcome::Applied
    }

    /// Recompute every completed counter from the stored flags.
    ///
    /// Returns true when any counter or module flag changed.
    pub fn recount(&mut self) -> bool {
        let mut changed = false;
        for module in self.modules.values_mut() {
            for lesson in module.lessons.values_mut() {
                let done = lesson.exercises.values().filter(|e| e.completed).count() as u32;
                if lesson.completed_exercises != done {
                    lesson.completed_exercises = done;
                    changed = true;
                }
            }

            let done = module.lessons.values().filter(|l| l.completed).count() as u32;
            if module.completed_lessons != done {
                module.completed_lessons = done;
                changed = true;
            }
            let complete = module.total_lessons > 0 && done == module.total_lessons;
            if module.completed != complete {
                module.completed = complete;
                changed = true;
            }
        }
        changed
    }

    /// Status of a module. Unknown ids are not started.
    pub fn module_status(&self, module_id: &str) -> Status {
        self.modules
            .get(module_id)
            .map(|m| m.status())
            .unwrap_or(Status::NotStarted)
    }

    /// Status of a lesson. Unknown ids are not started.
    pub fn lesson_status(&self, module_id: &str, lesson_id: &str) -> Status {
        self.modules
            .get(module_id)
            .and_then(|m| m.lessons.get(lesson_id))
            .map(|l| l.status())
            .unwrap_or(Status::NotStarted)
    }

    /// Status of an exercise. Unknown ids are not started.
    pub fn exercise_status(&self, module_id: &str, lesson_id: &str, exercise_id: &str) -> Status {
        self.modules
            .get(module_id)
            .and_then(|m| m.lessons.get(lesson_id))
            .and_then(|l| l.exercises.get(exercise_id))
            .map(|e| e.status())
            .unwrap_or(Status::NotStarted)
    }

    /// Completed lessons as a percentage of all lessons in `curriculum`.
    ///
    /// Entries for modules the curriculum no longer has are ignored. Returns 0
    /// for an empty curriculum.
    pub fn overall_progress(&self, curriculum: &Curriculum) -> f64 {
        let (completed, total) = curriculum
            .modules
            .iter()
            .filter_map(|m| self.modules.get(m.id.as_str()))
            .fold((0u64, 0u64), |(c, t), m| {
                (c + u64::from(m.completed_lessons), t + u64::from(m.total_lessons))
            });

        if total == 0 {
            return 0.0;
        }
        completed as f64 / total as f64 * 100.0
    }
}
