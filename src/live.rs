use crossbeam::channel::Receiver;
use log::info;

use crate::filters::{Orientation, OrientationFilter};
use crate::segmentation::SegmentationEngine;
use crate::types::{SampleRecord, ServeSegment};

/// Per-sample output of the live pipeline.
pub struct LiveUpdate {
    pub orientation: Orientation,
    /// Present when this sample's marker edge finalized a serve.
    pub finalized: Option<ServeSegment>,
}

/// Live processing core for one connection: one orientation filter plus one
/// segmentation engine, advanced a sample at a time.
///
/// The transport collaborator pushes decoded records through a
/// single-producer channel; this pipeline owns all mutable state exclusively
/// and must live on a single consumer thread. There is no internal
/// synchronization.
pub struct LivePipeline {
    filter: OrientationFilter,
    engine: SegmentationEngine,
}

impl LivePipeline {
    pub fn new() -> Self {
        Self {
            filter: OrientationFilter::new(),
            engine: SegmentationEngine::new(),
        }
    }

    /// Processes one decoded record: updates the orientation estimate and
    /// advances the segmentation state machine.
    pub fn process(&mut self, record: &SampleRecord) -> LiveUpdate {
        let orientation = self.filter.update(
            record.ax as f64,
            record.ay as f64,
            record.az as f64,
            record.gx as f64,
            record.gy as f64,
            record.gz as f64,
        );
        let finalized = self.engine.push(record);
        LiveUpdate {
            orientation,
            finalized,
        }
    }

    /// Consumes records until the transport side hangs up, then finalizes the
    /// open segment. Returns every serve finalized during the drain.
    pub fn drain(&mut self, receiver: Receiver<SampleRecord>) -> Vec<ServeSegment> {
        let mut segments = Vec::new();
        for record in receiver.iter() {
            if let Some(done) = self.process(&record).finalized {
                segments.push(done);
            }
        }
        if let Some(done) = self.engine.finish() {
            segments.push(done);
        }
        info!("stream ended: {} serve segment(s) finalized", segments.len());
        segments
    }

    /// Resets for a new connection: orientation restarts from level and serve
    /// numbering restarts at 1.
    pub fn reset(&mut self) {
        self.filter.reset();
        self.engine = SegmentationEngine::new();
    }
}

impl Default for LivePipeline {
    fn default() -> Self {
        Self::new()
    }
}
