use std::collections::{BTreeMap, BTreeSet};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::resample::{resample, ResampleError};
use crate::segmentation::SegmentationEngine;
use crate::types::{LabeledWindow, SampleRecord};

/// Configuration for dataset assembly.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Samples per serve window after resampling.
    pub target_length: usize,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        // 200 samples = 2 s of serve motion at the 100 Hz wire rate
        Self { target_length: 200 }
    }
}

/// Counts reported alongside the assembled windows.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub total_segments: usize,
    pub labeled_segments: usize,
    pub discarded_unlabeled: usize,
    pub invalid_label_tokens: usize,
}

/// Assembled training collection: fixed-length labeled windows plus the
/// reproducible label index map.
#[derive(Clone, Debug)]
pub struct Dataset {
    pub windows: Vec<LabeledWindow>,
    pub label_indices: BTreeMap<String, usize>,
    pub summary: DatasetSummary,
}

/// Turns one or more recording sessions into fixed-length labeled windows.
///
/// Each session is segmented independently, but serve ids keep increasing
/// across sessions within one run. Segments without a resolved label are
/// counted and discarded; the rest are resampled to `config.target_length`.
/// Identical inputs and configuration always produce identical output
/// ordering and values.
pub fn assemble(
    sessions: &[Vec<SampleRecord>],
    config: &DatasetConfig,
) -> Result<Dataset, ResampleError> {
    let mut windows = Vec::new();
    let mut summary = DatasetSummary::default();
    let mut next_serve_id = 1;

    for (session_idx, session) in sessions.iter().enumerate() {
        let mut engine = SegmentationEngine::starting_at(next_serve_id);
        let mut segments = Vec::new();
        for record in session {
            if let Some(done) = engine.push(record) {
                segments.push(done);
            }
        }
        if let Some(done) = engine.finish() {
            segments.push(done);
        }
        next_serve_id = engine.next_serve_id();
        summary.invalid_label_tokens += engine.invalid_label_count();
        debug!(
            "session {}: {} serve segment(s)",
            session_idx,
            segments.len()
        );

        for segment in segments {
            summary.total_segments += 1;
            let Some(label) = segment.label.clone() else {
                warn!("serve {} has no resolved label; discarding", segment.serve_id);
                summary.discarded_unlabeled += 1;
                continue;
            };
            let features = resample(&segment.feature_matrix(), config.target_length)?;
            windows.push(LabeledWindow { features, label });
            summary.labeled_segments += 1;
        }
    }

    let label_indices = label_index_map(windows.iter().map(|w| w.label.as_str()));
    Ok(Dataset {
        windows,
        label_indices,
        summary,
    })
}

/// Label -> integer index map over the distinct observed labels, assigned in
/// alphabetical order so index assignment is reproducible for a given set.
pub fn label_index_map<'a>(labels: impl IntoIterator<Item = &'a str>) -> BTreeMap<String, usize> {
    let distinct: BTreeSet<&str> = labels.into_iter().collect();
    distinct
        .into_iter()
        .enumerate()
        .map(|(index, label)| (label.to_string(), index))
        .collect()
}
