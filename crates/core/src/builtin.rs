//! The curriculum that ships with the binary.

use crate::curriculum::{
    Curriculum, CurriculumExercise, CurriculumLesson, CurriculumModule, Difficulty, ExerciseKind,
};

/// Build the default curriculum.
pub fn builtin_curriculum() -> Curriculum {
    Curriculum::new(vec![
        module(
            "getting-started",
            "Getting Started",
            "🚀",
            "Toolchain setup, the first program, and the shape of a project.",
            vec![
                lesson(
                    "getting-started",
                    "installation",
                    "Installing the Toolchain",
                    vec![exercise(
                        "verify-install",
                        "Verify your install",
                        "Run the compiler and package manager and note their versions.",
                        ExerciseKind::Reading,
                        Difficulty::Beginner,
                    )],
                ),
                lesson(
                    "getting-started",
                    "hello-world",
                    "Hello, World",
                    vec![
                        exercise(
                            "print-greeting",
                            "Print a greeting",
                            "Print a personalized greeting read from the command line.",
                            ExerciseKind::Coding,
                            Difficulty::Beginner,
                        ),
                        exercise(
                            "hello-quiz",
                            "Program structure quiz",
                            "Identify the entry point, macros and statements in a sample.",
                            ExerciseKind::Quiz,
                            Difficulty::Beginner,
                        ),
                    ],
                ),
                lesson("getting-started", "project-layout", "Project Layout", vec![]),
            ],
        ),
        module(
            "ownership",
            "Ownership & Borrowing",
            "📦",
            "Moves, borrows, lifetimes and how the compiler checks them.",
            vec![
                lesson(
                    "ownership",
                    "moves",
                    "Moves and Copies",
                    vec![exercise(
                        "fix-moves",
                        "Fix the use-after-move",
                        "Repair three snippets that use a value after it was moved.",
                        ExerciseKind::Coding,
                        Difficulty::Beginner,
                    )],
                ),
                lesson(
                    "ownership",
                    "borrowing",
                    "References and Borrowing",
                    vec![
                        exercise(
                            "borrow-rules",
                            "Borrow rules quiz",
                            "Decide which borrows the checker accepts.",
                            ExerciseKind::Quiz,
                            Difficulty::Intermediate,
                        ),
                        exercise(
                            "longest-word",
                            "Longest word",
                            "Return a slice of the longest word without cloning.",
                            ExerciseKind::Coding,
                            Difficulty::Intermediate,
                        ),
                    ],
                ),
                lesson(
                    "ownership",
                    "lifetimes",
                    "Lifetimes",
                    vec![exercise(
                        "annotate-lifetimes",
                        "Annotate lifetimes",
                        "Add the minimal lifetime annotations to make the code compile.",
                        ExerciseKind::Coding,
                        Difficulty::Advanced,
                    )],
                ),
            ],
        ),
        module(
            "concurrency",
            "Fearless Concurrency",
            "🧵",
            "Threads, channels, shared state and async tasks.",
            vec![
                lesson(
                    "concurrency",
                    "threads",
                    "Threads and Channels",
                    vec![exercise(
                        "parallel-sum",
                        "Parallel sum",
                        "Split a vector across worker threads and join the partial sums.",
                        ExerciseKind::Coding,
                        Difficulty::Intermediate,
                    )],
                ),
                lesson(
                    "concurrency",
                    "async-basics",
                    "Async Basics",
                    vec![exercise(
                        "url-checker",
                        "Concurrent URL checker",
                        "Check a list of addresses concurrently and report the slow ones.",
                        ExerciseKind::Project,
                        Difficulty::Advanced,
                    )],
                ),
            ],
        ),
    ])
}

fn module(
    id: &str,
    title: &str,
    icon: &str,
    description: &str,
    lessons: Vec<CurriculumLesson>,
) -> CurriculumModule {
    CurriculumModule {
        id: id.into(),
        title: title.to_string(),
        icon: icon.to_string(),
        description: description.to_string(),
        lessons,
    }
}

fn lesson(
    module_id: &str,
    id: &str,
    title: &str,
    exercises: Vec<CurriculumExercise>,
) -> CurriculumLesson {
    CurriculumLesson {
        id: id.into(),
        title: title.to_string(),
        content_path: format!("{}/{}.md", module_id, id),
        exercises,
    }
}

fn exercise(
    id: &str,
    title: &str,
    description: &str,
    kind: ExerciseKind,
    difficulty: Difficulty,
) -> CurriculumExercise {
    CurriculumExercise {
        id: id.into(),
        title: title.to_string(),
        description: description.to_string(),
        kind,
        difficulty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_is_valid() {
        let c = builtin_curriculum();
        c.validate().unwrap();
        assert_eq!(c.modules.len(), 3);
        assert_eq!(c.total_lessons(), 8);
    }

    #[test]
    fn test_content_paths_follow_ids() {
        let c = builtin_curriculum();
        let l = c.lesson("ownership", "lifetimes").unwrap();
        assert_eq!(l.content_path, "ownership/lifetimes.md");
    }
}
