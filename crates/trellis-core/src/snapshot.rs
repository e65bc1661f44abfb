use anyhow::Context;
use tracing::debug;

use crate::task::Task;

/// Decodes the task store's "list all tasks for the current owner"
/// response into the in-memory snapshot the calendar core reads.
///
/// A snapshot is immutable for the duration of a render pass; a newer
/// fetch replaces it wholesale rather than mutating tasks in place.
#[tracing::instrument(skip(json))]
pub fn parse_tasks(json: &str) -> anyhow::Result<Vec<Task>> {
    let tasks: Vec<Task> =
        serde_json::from_str(json).context("failed to decode task snapshot")?;
    debug!(count = tasks.len(), "decoded task snapshot");
    Ok(tasks)
}
