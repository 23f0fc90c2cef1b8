//! Text rendering for the terminal.

use learnpath_core::{CurriculumExercise, Outcome, Status};
use learnpath_progress::{NavTree, ProgressSummary};
use std::fmt::Write;

pub fn format_status(status: Status) -> &'static str {
    match status {
        Status::NotStarted => "[ ]",
        Status::InProgress => "[~]",
        Status::Completed => "[x]",
    }
}

pub fn outcome_line(outcome: Outcome, action: &str, path: &str) -> String {
    match outcome {
        Outcome::Applied => format!("{}: {}", action, path),
        Outcome::Unchanged => format!("{}: {} (no change)", action, path),
        Outcome::NotFound => format!("Not found: {}", path),
    }
}

pub fn tree(tree: &NavTree, with_exercises: bool) -> String {
    let mut out = String::new();
    for module in &tree.modules {
        let _ = writeln!(
            out,
            "{} {} {} ({}/{})  [{}]",
            format_status(module.status),
            module.icon,
            module.title,
            module.completed_lessons,
            module.total_lessons,
            module.id,
        );
        for lesson in &module.lessons {
            let marker = if lesson.current { ">" } else { " " };
            let _ = writeln!(
                out,
                "  {}{} {}  [{}]",
                marker,
                format_status(lesson.status),
                lesson.title,
                lesson.id,
            );
            if with_exercises {
                for exercise in &lesson.exercises {
                    let _ = writeln!(
                        out,
                        "      {} {} ({}, {})  [{}]",
                        format_status(exercise.status),
                        exercise.title,
                        exercise.kind.as_str(),
                        exercise.difficulty.as_str(),
                        exercise.id,
                    );
                }
            }
        }
    }
    out
}

pub fn summary(summary: &ProgressSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Overall progress: {:.0}%", summary.overall);
    let _ = writeln!(
        out,
        "Modules: {} completed, {} in progress, {} not started",
        summary.count(Status::Completed),
        summary.count(Status::InProgress),
        summary.count(Status::NotStarted),
    );
    for module in &summary.modules {
        let _ = writeln!(
            out,
            "  {:<12} {:>3.0}%  {}/{}  {}",
            module.status.as_str(),
            module.percentage,
            module.completed_lessons,
            module.total_lessons,
            module.title,
        );
    }
    if let Some(last) = &summary.last_visited {
        let _ = writeln!(out, "Last visited: {}/{}", last.module_id, last.lesson_id);
    }
    out
}

pub fn exercise(exercise: &CurriculumExercise) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", exercise.title);
    let _ = writeln!(
        out,
        "  Type: {}  Difficulty: {}",
        exercise.kind.as_str(),
        exercise.difficulty.as_str()
    );
    if !exercise.description.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", exercise.description);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use learnpath_core::{builtin_curriculum, reconcile, ProgressDocument};

    #[test]
    fn test_tree_marks_current_lesson() {
        let curriculum = builtin_curriculum();
        let mut doc = ProgressDocument::default();
        reconcile(&mut doc, &curriculum);
        doc.visit_lesson("ownership", "borrowing", Utc::now());

        let text = tree(&NavTree::build(&curriculum, &doc), false);
        assert!(text.contains("  >[~] References and Borrowing  [borrowing]"));
        assert!(!text.contains("longest-word"));

        let text = tree(&NavTree::build(&curriculum, &doc), true);
        assert!(text.contains("[longest-word]"));
    }

    #[test]
    fn test_summary_text() {
        let curriculum = builtin_curriculum();
        let mut doc = ProgressDocument::default();
        reconcile(&mut doc, &curriculum);
        doc.complete_lesson("concurrency", "threads");
        doc.complete_lesson("concurrency", "async-basics");

        let text = summary(&ProgressSummary::build(&curriculum, &doc));
        assert!(text.starts_with("Overall progress: 25%\n"));
        assert!(text.contains("Modules: 1 completed, 0 in progress, 2 not started\n"));
        assert!(text.contains("completed    100%  2/2  Fearless Concurrency"));
    }

    #[test]
    fn test_outcome_line() {
        assert_eq!(outcome_line(Outcome::NotFound, "Completed", "a/b"), "Not found: a/b");
        assert_eq!(
            outcome_line(Outcome::Unchanged, "Completed", "a/b"),
            "Completed: a/b (no change)"
        );
    }
}
