use log::{debug, warn};

use crate::labels;
use crate::types::{SampleRecord, ServeSample, ServeSegment};

/// Groups a capture stream into discrete serve segments.
///
/// The hardware emits `marker_edge` as a one-sample pulse when the physical
/// toggle flips, and `capture_on` brackets the window while the toggle is
/// armed. An open segment is finalized on the next edge (or at end of
/// stream); segments with no captured samples are dropped silently and never
/// consume a serve id. Samples are expected in arrival order; no reordering
/// happens here.
pub struct SegmentationEngine {
    open: Option<OpenSegment>,
    next_serve_id: u32,
    invalid_labels: usize,
}

struct OpenSegment {
    session: u16,
    samples: Vec<ServeSample>,
    raw_labels: Vec<Option<String>>,
}

impl OpenSegment {
    fn new(session: u16) -> Self {
        Self {
            session,
            samples: Vec::new(),
            raw_labels: Vec::new(),
        }
    }
}

impl SegmentationEngine {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Engine whose first emitted segment gets `first_serve_id`, for callers
    /// that keep ids increasing across several sessions.
    pub fn starting_at(first_serve_id: u32) -> Self {
        Self {
            open: None,
            next_serve_id: first_serve_id,
            invalid_labels: 0,
        }
    }

    /// Feeds one sample through the state machine. Returns a segment when
    /// this sample's marker edge finalized one.
    ///
    /// The edge is handled before the capture flag, so an edge sample that is
    /// itself captured lands in the segment it opens, not the one it closes.
    pub fn push(&mut self, record: &SampleRecord) -> Option<ServeSegment> {
        let mut finalized = None;

        if record.marker_edge {
            finalized = self.close_open();
            self.open = Some(OpenSegment::new(record.session));
        }

        if record.capture_on {
            if let Some(open) = self.open.as_mut() {
                open.samples.push(ServeSample::from(record));
                open.raw_labels.push(record.label.clone());
            }
        }

        finalized
    }

    /// End of stream: finalizes the open segment if it captured anything.
    pub fn finish(&mut self) -> Option<ServeSegment> {
        self.close_open()
    }

    /// Invalid label tokens excluded from votes so far.
    pub fn invalid_label_count(&self) -> usize {
        self.invalid_labels
    }

    /// Serve id the next emitted segment will get.
    pub fn next_serve_id(&self) -> u32 {
        self.next_serve_id
    }

    fn close_open(&mut self) -> Option<ServeSegment> {
        let open = self.open.take()?;
        if open.samples.is_empty() {
            debug!("marker edge with no captured samples; dropping empty segment");
            return None;
        }

        let (label, invalid) = labels::resolve_counting(&open.raw_labels);
        if invalid > 0 {
            warn!(
                "serve {}: excluded {} invalid label token(s) from vote",
                self.next_serve_id, invalid
            );
            self.invalid_labels += invalid;
        }

        let segment = ServeSegment {
            serve_id: self.next_serve_id,
            session: open.session,
            samples: open.samples,
            label,
            notes: String::new(),
        };
        debug!(
            "finalized serve {} ({} samples, label {:?})",
            segment.serve_id,
            segment.len(),
            segment.label
        );
        self.next_serve_id += 1;
        Some(segment)
    }
}

impl Default for SegmentationEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs one full session through a fresh engine. Returns the finalized
/// segments and the number of invalid label tokens seen.
pub fn segment_session(records: &[SampleRecord]) -> (Vec<ServeSegment>, usize) {
    let mut engine = SegmentationEngine::new();
    let mut segments = Vec::new();
    for record in records {
        if let Some(done) = engine.push(record) {
            segments.push(done);
        }
    }
    if let Some(done) = engine.finish() {
        segments.push(done);
    }
    (segments, engine.invalid_label_count())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(marker_edge: bool, capture_on: bool, sequence: u16) -> SampleRecord {
        SampleRecord {
            timestamp_ms: sequence as u32 * 10,
            session: 1,
            sequence,
            ax: 0.0,
            ay: 0.0,
            az: 1.0,
            gx: 0.0,
            gy: 0.0,
            gz: 0.0,
            capture_on,
            marker_edge,
            label: None,
        }
    }

    fn labeled(marker_edge: bool, sequence: u16, label: &str) -> SampleRecord {
        sample(marker_edge, true, sequence).with_label(label)
    }

    #[test]
    fn test_two_serves_between_three_edges() {
        let mut records = vec![sample(true, false, 0)];
        records.extend((1..=3).map(|i| sample(false, true, i)));
        records.push(sample(true, false, 4));
        records.extend((5..=6).map(|i| sample(false, true, i)));
        records.push(sample(true, false, 7));

        let (segments, _) = segment_session(&records);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].serve_id, 1);
        assert_eq!(segments[0].len(), 3);
        assert_eq!(segments[1].serve_id, 2);
        assert_eq!(segments[1].len(), 2);
    }

    #[test]
    fn test_consecutive_edges_emit_nothing() {
        let records = vec![
            sample(true, false, 0),
            sample(true, false, 1),
            sample(true, false, 2),
        ];
        let (segments, _) = segment_session(&records);
        assert!(segments.is_empty());
    }

    #[test]
    fn test_empty_gap_does_not_consume_a_serve_id() {
        let records = vec![
            sample(true, false, 0),
            sample(true, false, 1), // empty gap, dropped
            sample(false, true, 2),
            sample(false, true, 3),
            sample(true, false, 4),
        ];
        let (segments, _) = segment_session(&records);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].serve_id, 1);
        assert_eq!(segments[0].len(), 2);
    }

    #[test]
    fn test_capture_off_samples_never_appended() {
        let records = vec![
            sample(true, false, 0),
            sample(false, true, 1),
            sample(false, false, 2),
            sample(false, true, 3),
            sample(true, false, 4),
        ];
        let (segments, _) = segment_session(&records);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].len(), 2);
        assert_eq!(segments[0].samples[1].sequence, 3);
    }

    #[test]
    fn test_samples_before_first_edge_are_dropped() {
        let records = vec![
            sample(false, true, 0),
            sample(false, true, 1),
            sample(true, false, 2),
            sample(false, true, 3),
        ];
        let (segments, _) = segment_session(&records);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].len(), 1);
        assert_eq!(segments[0].samples[0].sequence, 3);
    }

    #[test]
    fn test_end_of_stream_finalizes_open_segment() {
        let records = vec![sample(true, false, 0), sample(false, true, 1)];
        let (segments, _) = segment_session(&records);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].len(), 1);
    }

    #[test]
    fn test_captured_edge_sample_joins_the_new_segment() {
        let records = vec![
            sample(true, false, 0),
            sample(false, true, 1),
            sample(true, true, 2), // edge itself is captured
            sample(false, true, 3),
        ];
        let (segments, _) = segment_session(&records);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].len(), 1);
        assert_eq!(segments[1].samples[0].sequence, 2);
        assert_eq!(segments[1].len(), 2);
    }

    #[test]
    fn test_label_resolution_at_finalize() {
        let records = vec![
            sample(true, false, 0),
            labeled(false, 1, "flat_good_mechanics"),
            labeled(false, 2, "flat_good_mechanics"),
            labeled(false, 3, "slice_low_toss"),
            sample(true, false, 4),
        ];
        let (segments, invalid) = segment_session(&records);
        assert_eq!(segments[0].label.as_deref(), Some("flat_good_mechanics"));
        assert_eq!(invalid, 0);
    }

    #[test]
    fn test_invalid_labels_counted_across_segments() {
        let records = vec![
            sample(true, false, 0),
            labeled(false, 1, "not_a_serve"),
            labeled(false, 2, "kick_low_toss"),
            sample(true, false, 3),
            labeled(false, 4, "also_wrong"),
            sample(true, false, 5),
        ];
        let (segments, invalid) = segment_session(&records);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].label.as_deref(), Some("kick_low_toss"));
        assert_eq!(segments[1].label, None);
        assert_eq!(invalid, 2);
    }

    #[test]
    fn test_starting_at_continues_numbering() {
        let mut engine = SegmentationEngine::starting_at(5);
        engine.push(&sample(true, false, 0));
        engine.push(&sample(false, true, 1));
        let segment = engine.finish().unwrap();
        assert_eq!(segment.serve_id, 5);
        assert_eq!(engine.next_serve_id(), 6);
    }
}
