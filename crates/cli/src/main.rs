//! learnpath CLI - curriculum progress tracker.

mod render;

use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use learnpath_core::{builtin_curriculum, Curriculum};
use learnpath_progress::{export_file_name, ContentLoader, NavTree, ProgressStore, ProgressSummary};
use learnpath_storage::JsonStorage;

#[derive(Parser)]
#[command(name = "learnpath")]
#[command(about = "Track progress through a curriculum of lessons and exercises", long_about = None)]
struct Cli {
    /// Directory holding the progress store
    #[arg(long, env = "LEARNPATH_DATA_DIR", default_value = ".learnpath", global = true)]
    data_dir: PathBuf,

    /// Curriculum JSON file (defaults to the built-in curriculum)
    #[arg(long, env = "LEARNPATH_CURRICULUM", global = true)]
    curriculum: Option<PathBuf>,

    /// Directory lesson content paths are relative to
    #[arg(long, env = "LEARNPATH_CONTENT_ROOT", default_value = "content", global = true)]
    content_root: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show overall and per-module progress
    Status {
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the curriculum tree with progress
    Tree {
        /// Include exercises
        #[arg(long)]
        exercises: bool,
    },
    /// Print a lesson and record the visit
    Read {
        /// Module ID
        module: String,
        /// Lesson ID
        lesson: String,
    },
    /// Record a lesson visit without printing it
    Visit {
        /// Module ID
        module: String,
        /// Lesson ID
        lesson: String,
    },
    /// Mark a lesson completed
    Complete {
        /// Module ID
        module: String,
        /// Lesson ID
        lesson: String,
    },
    /// Mark a lesson not completed
    Uncomplete {
        /// Module ID
        module: String,
        /// Lesson ID
        lesson: String,
    },
    /// Show an exercise and record that it was started
    Exercise {
        /// Module ID
        module: String,
        /// Lesson ID
        lesson: String,
        /// Exercise ID
        exercise: String,
    },
    /// Mark an exercise completed
    Solve {
        /// Module ID
        module: String,
        /// Lesson ID
        lesson: String,
        /// Exercise ID
        exercise: String,
    },
    /// Write a progress backup file
    Export {
        /// Output directory
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Replace all progress with a backup file
    Import {
        /// Backup file
        file: PathBuf,
    },
    /// Discard all progress
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
    /// Recompute completion counters from the stored flags
    Repair,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let curriculum = load_curriculum(cli.curriculum.as_deref()).await?;
    let storage = JsonStorage::new(&cli.data_dir)
        .await
        .with_context(|| format!("cannot open store at {}", cli.data_dir.display()))?;
    let mut store = ProgressStore::new(storage, curriculum);
    store.load().await?;

    let loader = ContentLoader::new(&cli.content_root);

    match cli.command {
        Commands::Status { json } => {
            let summary = ProgressSummary::build(store.curriculum(), store.document());
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", render::summary(&summary));
            }
        }
        Commands::Tree { exercises } => {
            let tree = NavTree::build(store.curriculum(), store.document());
            print!("{}", render::tree(&tree, exercises));
        }
        Commands::Read { module, lesson } => {
            let content = loader.load_lesson(&mut store, &module, &lesson).await?;
            println!("{}", content.markdown);
        }
        Commands::Visit { module, lesson } => {
            let outcome = store.visit_lesson(&module, &lesson).await?;
            println!("{}", render::outcome_line(outcome, "Visited", &path(&[&module, &lesson])));
        }
        Commands::Complete { module, lesson } => {
            let outcome = store.complete_lesson(&module, &lesson).await?;
            println!("{}", render::outcome_line(outcome, "Completed", &path(&[&module, &lesson])));
        }
        Commands::Uncomplete { module, lesson } => {
            let outcome = store.uncomplete_lesson(&module, &lesson).await?;
            println!("{}", render::outcome_line(outcome, "Reopened", &path(&[&module, &lesson])));
        }
        Commands::Exercise { module, lesson, exercise } => {
            let details = loader.open_exercise(&mut store, &module, &lesson, &exercise).await?;
            print!("{}", render::exercise(&details));
        }
        Commands::Solve { module, lesson, exercise } => {
            let outcome = store.complete_exercise(&module, &lesson, &exercise).await?;
            println!(
                "{}",
                render::outcome_line(outcome, "Solved", &path(&[&module, &lesson, &exercise]))
            );
            let status = store.lesson_status(&module, &lesson);
            println!("Lesson {}/{} is {}", module, lesson, status);
        }
        Commands::Export { out } => {
            let target = out.join(export_file_name(chrono::Utc::now()));
            tokio::fs::write(&target, store.export()?)
                .await
                .with_context(|| format!("cannot write {}", target.display()))?;
            info!("Exported progress to {}", target.display());
            println!("{}", target.display());
        }
        Commands::Import { file } => {
            let json = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("cannot read {}", file.display()))?;
            if !store.import(&json).await? {
                anyhow::bail!("{} is not a valid progress export", file.display());
            }
            println!("Imported {}", file.display());
        }
        Commands::Reset { yes } => {
            if !yes {
                anyhow::bail!("reset discards all progress; pass --yes to confirm");
            }
            store.reset().await?;
            println!("Progress reset");
        }
        Commands::Repair => {
            if store.recount().await? {
                println!("Counters repaired");
            } else {
                println!("Counters already consistent");
            }
        }
    }

    Ok(())
}

async fn load_curriculum(path: Option<&Path>) -> Result<Curriculum> {
    let Some(path) = path else {
        return Ok(builtin_curriculum());
    };
    let json = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("cannot read curriculum {}", path.display()))?;
    let curriculum = Curriculum::from_json(&json)
        .with_context(|| format!("invalid curriculum {}", path.display()))?;
    info!(
        "Loaded curriculum with {} modules and {} lessons from {}",
        curriculum.modules.len(),
        curriculum.total_lessons(),
        path.display()
    );
    Ok(curriculum)
}

fn path(parts: &[&str]) -> String {
    parts.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_solve() {
        let cli = Cli::try_parse_from([
            "learnpath", "--data-dir", "/tmp/lp", "solve", "m1", "l1", "e1",
        ])
        .unwrap();
        assert_eq!(cli.data_dir, PathBuf::from("/tmp/lp"));
        assert!(matches!(
            cli.command,
            Commands::Solve { ref module, ref lesson, ref exercise }
                if module == "m1" && lesson == "l1" && exercise == "e1"
        ));
    }

    #[tokio::test]
    async fn test_builtin_curriculum_when_no_file() {
        let curriculum = load_curriculum(None).await.unwrap();
        assert_eq!(curriculum, builtin_curriculum());
    }

    #[tokio::test]
    async fn test_curriculum_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("curriculum.json");
        std::fs::write(
            &file,
            r#"[{"id": "m1", "title": "One", "lessons": [
                {"id": "l1", "title": "First", "contentPath": "m1/l1.md"}
            ]}]"#,
        )
        .unwrap();

        let curriculum = load_curriculum(Some(file.as_path())).await.unwrap();
        assert_eq!(curriculum.total_lessons(), 1);

        std::fs::write(&file, "[{\"id\": \"\", \"title\": \"x\"}]").unwrap();
        assert!(load_curriculum(Some(file.as_path())).await.is_err());
    }
}
