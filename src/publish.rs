// Publishing of produced artifacts (report, graph) to the lab repository.

use std::path::PathBuf;

/// Returns the files that were published. Nothing is pushed yet, so the list is always empty.
pub fn publish(files: &[PathBuf]) -> Vec<PathBuf> {
    tracing::info!(files = files.len(), "Publish requested");
    for file in files {
        if !file.exists() {
            tracing::warn!(path = %file.display(), "Publish candidate does not exist");
        }
    }
    Vec::new()
}
