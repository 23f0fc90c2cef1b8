//! Point-in-time progress summaries for status displays.

use chrono::{DateTime, Utc};
use learnpath_core::{Curriculum, LessonRef, ModuleId, ProgressDocument, Status};
use serde::Serialize;

/// A snapshot of progress at a point in time.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    /// When the summary was taken
    pub timestamp: DateTime<Utc>,

    /// Overall percentage (0-100)
    pub overall: f64,

    /// Per-module progress, in curriculum order
    pub modules: Vec<ModuleSummary>,

    /// Lesson most recently opened
    pub last_visited: Option<LessonRef>,
}

/// Progress of a single module.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleSummary {
    /// Module id
    pub id: ModuleId,

    /// Module title
    pub title: String,

    /// Derived status
    pub status: Status,

    /// Completed lessons
    pub completed_lessons: u32,

    /// Lessons in the module
    pub total_lessons: u32,

    /// Percentage complete
    pub percentage: f32,
}

impl ProgressSummary {
    /// Summarize `doc` against `curriculum`.
    pub fn build(curriculum: &Curriculum, doc: &ProgressDocument) -> Self {
        let modules = curriculum
            .modules
            .iter()
            .map(|module| {
                let progress = doc.modules.get(module.id.as_str());
                let completed_lessons = progress.map(|p| p.completed_lessons).unwrap_or(0);
                let total_lessons = progress
                    .map(|p| p.total_lessons)
                    .unwrap_or(module.lessons.len() as u32);
                let percentage = if total_lessons > 0 {
                    (completed_lessons as f32 / total_lessons as f32) * 100.0
                } else {
                    0.0
                };

                ModuleSummary {
                    id: module.id.clone(),
                    title: module.title.clone(),
                    status: doc.module_status(module.id.as_str()),
                    completed_lessons,
                    total_lessons,
                    percentage,
                }
            })
            .collect();

        Self {
            timestamp: Utc::now(),
            overall: doc.overall_progress(curriculum),
            modules,
            last_visited: doc.last_visited.clone(),
        }
    }

    /// Number of modules in each status.
    pub fn count(&self, status: Status) -> usize {
        self.modules.iter().filter(|m| m.status == status).count()
    }
}
