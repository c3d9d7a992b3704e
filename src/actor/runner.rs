//! Task Runner Actor
//!
//! Receives settled change batches from the FsActor and runs the matching
//! task sequences, one batch at a time. Batches that arrive while a sequence
//! runs wait in the channel, so two sequences never touch the output tree at
//! once.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use tokio::sync::mpsc;

use super::messages::RunnerMsg;
use crate::core::Category;
use crate::logger::{status_error, status_success};
use crate::pipeline::{Pipeline, PipelineError, sequence};

/// Task Runner Actor - executes watch sequences
pub struct TaskRunner {
    /// Channel to receive change batches
    rx: mpsc::Receiver<RunnerMsg>,
    /// Pipeline shared with blocking tasks
    pipeline: Arc<Pipeline>,
}

impl TaskRunner {
    pub fn new(rx: mpsc::Receiver<RunnerMsg>, pipeline: Arc<Pipeline>) -> Self {
        Self { rx, pipeline }
    }

    /// Run the actor event loop
    pub async fn run(mut self) {
        while let Some(msg) = self.rx.recv().await {
            match msg {
                RunnerMsg::Changed(categories) => self.handle_changed(&categories).await,
                RunnerMsg::Shutdown => break,
            }
        }
        crate::debug!("runner"; "stopped");
    }

    async fn handle_changed(&self, categories: &[Category]) {
        let planned = sequence::plan(categories);
        if planned.is_empty() {
            return;
        }

        let start = Instant::now();
        for steps in planned {
            let pipeline = Arc::clone(&self.pipeline);
            if let Err(e) = run_blocking(move || pipeline.run_sequence(steps)).await {
                status_error(
                    &format!("rebuild failed: {}", join_names(categories)),
                    &format!("{e:#}"),
                );
                return;
            }
        }

        status_success(&format!(
            "rebuilt {} in {:.2?}",
            join_names(categories),
            start.elapsed()
        ));
    }
}

/// Run a sequence on the blocking pool; rayon tasks inside must not park
/// a tokio worker. A panic in the sequence counts as a failure.
async fn run_blocking<F>(task: F) -> anyhow::Result<()>
where
    F: FnOnce() -> Result<(), PipelineError> + Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .context("task sequence aborted")??;
    Ok(())
}

fn join_names(categories: &[Category]) -> String {
    let mut categories = categories.to_vec();
    categories.sort();
    categories.dedup();
    categories
        .iter()
        .map(|c| c.name())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use crate::utils::path::normalize_path;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_join_names_sorted_unique() {
        let names = join_names(&[Category::Html, Category::Styles, Category::Html]);
        assert_eq!(names, "styles, html");
    }

    #[tokio::test]
    async fn test_panicking_sequence_is_a_failure() {
        let result = run_blocking(|| panic!("boom")).await;
        let err = result.unwrap_err();
        assert!(format!("{err:#}").starts_with("task sequence aborted"));

        let result = run_blocking(|| {
            Err(PipelineError::clean(
                "dist/css",
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            ))
        })
        .await;
        assert!(format!("{:#}", result.unwrap_err()).contains("denied"));

        assert!(run_blocking(|| Ok(())).await.is_ok());
    }

    #[tokio::test]
    async fn test_runner_rebuilds_and_stops() {
        let dir = TempDir::new().unwrap();
        let root = normalize_path(dir.path());
        fs::create_dir_all(root.join("src")).unwrap();
        fs::write(root.join("src/index.html"), "<p>hi</p>").unwrap();

        let config = Arc::new(PipelineConfig::with_root(&root));
        let pipeline = Arc::new(Pipeline::new(config).unwrap());

        let (tx, rx) = mpsc::channel(4);
        let runner = TaskRunner::new(rx, pipeline);
        let handle = tokio::spawn(runner.run());

        tx.send(RunnerMsg::Changed(vec![Category::Html])).await.unwrap();
        tx.send(RunnerMsg::Shutdown).await.unwrap();
        handle.await.unwrap();

        let written = fs::read_to_string(root.join("dist/index.html")).unwrap();
        assert_eq!(written, "<p>hi</p>");
    }
}
