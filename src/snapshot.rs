use std::path::Path;

use anyhow::Context;

use crate::models::Activity;

/// Reads an activity collection exported from the journal API as a JSON array.
pub fn load_json(path: &Path) -> anyhow::Result<Vec<Activity>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    let activities: Vec<Activity> = serde_json::from_str(&raw)
        .with_context(|| format!("snapshot {} is not a list of activities", path.display()))?;

    tracing::info!(count = activities.len(), path = %path.display(), "loaded activity snapshot");
    Ok(activities)
}
