pub mod complementary;

pub use complementary::{Orientation, OrientationFilter, ALPHA, SAMPLE_DT};
