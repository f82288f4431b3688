//! Processing core for the ServeSense wearable: wire packet decoding,
//! complementary-filter orientation estimation, marker-edge serve
//! segmentation, and assembly of fixed-length labeled training windows.
//!
//! Transport (BLE), visualization, and model training live with external
//! collaborators; this crate only consumes decoded samples and produces
//! orientation estimates and labeled windows.

pub mod dataset;
pub mod export;
pub mod filters;
pub mod labels;
pub mod live;
pub mod packet;
pub mod resample;
pub mod segmentation;
pub mod types;

pub use dataset::{assemble, Dataset, DatasetConfig, DatasetSummary};
pub use export::LabelingExport;
pub use filters::{Orientation, OrientationFilter};
pub use live::{LivePipeline, LiveUpdate};
pub use packet::{decode, encode, DecodeError, PACKET_SIZE};
pub use resample::{resample, ResampleError};
pub use segmentation::{segment_session, SegmentationEngine};
pub use types::{LabeledWindow, SampleRecord, ServeSample, ServeSegment, CHANNEL_COUNT};
