use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Feature channels per sample: ax, ay, az, gx, gy, gz (in that column order).
pub const CHANNEL_COUNT: usize = 6;

/// One decoded inertial reading from the logger.
///
/// Accelerometer channels are in g, gyro channels in deg/s. `capture_on` and
/// `marker_edge` come from the packed flag byte on the wire. Records are never
/// mutated after decode; label annotation goes through [`SampleRecord::with_label`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SampleRecord {
    pub timestamp_ms: u32,
    pub session: u16,
    pub sequence: u16,
    pub ax: f32,
    pub ay: f32,
    pub az: f32,
    pub gx: f32,
    pub gy: f32,
    pub gz: f32,
    pub capture_on: bool,
    pub marker_edge: bool,
    pub label: Option<String>,
}

impl SampleRecord {
    /// Returns a copy of this record annotated with `label`.
    pub fn with_label(&self, label: impl Into<String>) -> SampleRecord {
        SampleRecord {
            label: Some(label.into()),
            ..self.clone()
        }
    }
}

/// Flag-stripped sample stored inside a serve segment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServeSample {
    pub timestamp_ms: u32,
    pub sequence: u16,
    pub ax: f32,
    pub ay: f32,
    pub az: f32,
    pub gx: f32,
    pub gy: f32,
    pub gz: f32,
}

impl From<&SampleRecord> for ServeSample {
    fn from(record: &SampleRecord) -> Self {
        ServeSample {
            timestamp_ms: record.timestamp_ms,
            sequence: record.sequence,
            ax: record.ax,
            ay: record.ay,
            az: record.az,
            gx: record.gx,
            gy: record.gy,
            gz: record.gz,
        }
    }
}

/// One serve motion's worth of captured samples, bounded by marker edges.
///
/// `samples` is non-empty once the segment has been finalized; empty segments
/// are discarded by the segmentation engine and never reach callers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServeSegment {
    pub serve_id: u32,
    pub session: u16,
    pub samples: Vec<ServeSample>,
    pub label: Option<String>,
    pub notes: String,
}

impl ServeSegment {
    /// Number of captured samples in this serve.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Samples as an N×6 matrix (columns ax, ay, az, gx, gy, gz), the input
    /// shape the resampler works on.
    pub fn feature_matrix(&self) -> Array2<f64> {
        let mut matrix = Array2::zeros((self.samples.len(), CHANNEL_COUNT));
        for (row, sample) in self.samples.iter().enumerate() {
            matrix[[row, 0]] = sample.ax as f64;
            matrix[[row, 1]] = sample.ay as f64;
            matrix[[row, 2]] = sample.az as f64;
            matrix[[row, 3]] = sample.gx as f64;
            matrix[[row, 4]] = sample.gy as f64;
            matrix[[row, 5]] = sample.gz as f64;
        }
        matrix
    }
}

/// Fixed-length labeled training example produced by the dataset assembler.
///
/// `features` has shape `(target_length, 6)`; `label` is one of the nine
/// canonical serve labels.
#[derive(Clone, Debug, PartialEq)]
pub struct LabeledWindow {
    pub features: Array2<f64>,
    pub label: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> SampleRecord {
        SampleRecord {
            timestamp_ms: 1500,
            session: 3,
            sequence: 42,
            ax: 0.1,
            ay: -0.2,
            az: 0.98,
            gx: 12.0,
            gy: -5.5,
            gz: 0.25,
            capture_on: true,
            marker_edge: false,
            label: None,
        }
    }

    #[test]
    fn test_with_label_leaves_original_untouched() {
        let original = record();
        let annotated = original.with_label("flat_good_mechanics");
        assert_eq!(original.label, None);
        assert_eq!(annotated.label.as_deref(), Some("flat_good_mechanics"));
        assert_eq!(annotated.sequence, original.sequence);
    }

    #[test]
    fn test_serve_sample_drops_flags() {
        let sample = ServeSample::from(&record());
        assert_eq!(sample.timestamp_ms, 1500);
        assert_eq!(sample.sequence, 42);
        assert_eq!(sample.gx, 12.0);
    }

    #[test]
    fn test_feature_matrix_shape_and_order() {
        let segment = ServeSegment {
            serve_id: 1,
            session: 3,
            samples: vec![ServeSample::from(&record()), ServeSample::from(&record())],
            label: None,
            notes: String::new(),
        };
        let matrix = segment.feature_matrix();
        assert_eq!(matrix.dim(), (2, CHANNEL_COUNT));
        assert!((matrix[[0, 0]] - 0.1).abs() < 1e-6);
        assert!((matrix[[1, 3]] - 12.0).abs() < 1e-6);
        assert!((matrix[[0, 5]] - 0.25).abs() < 1e-6);
    }
}
