use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::labels::SERVE_LABELS;
use crate::types::ServeSegment;

/// Combined serves from one or more recordings, shaped for the labeling
/// collaborator to serialize as JSON, hand-edit the `label` fields, and feed
/// back in. File I/O stays with the caller.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LabelingExport {
    pub metadata: ExportMetadata,
    pub serves: Vec<ServeSegment>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub total_serves: usize,
    pub labeled_serves: usize,
    pub valid_labels: Vec<String>,
    pub created_at: String,
}

impl LabelingExport {
    /// Builds the export from already-finalized segments. Serve ids are
    /// renumbered sequentially so they stay monotonic across the combined
    /// recordings.
    pub fn new(mut serves: Vec<ServeSegment>) -> Self {
        for (index, serve) in serves.iter_mut().enumerate() {
            serve.serve_id = index as u32 + 1;
        }
        let labeled_serves = serves.iter().filter(|s| s.label.is_some()).count();
        LabelingExport {
            metadata: ExportMetadata {
                total_serves: serves.len(),
                labeled_serves,
                valid_labels: SERVE_LABELS.iter().map(|l| l.to_string()).collect(),
                created_at: Utc::now().to_rfc3339(),
            },
            serves,
        }
    }
}
