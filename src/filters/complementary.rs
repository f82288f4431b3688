use serde::{Deserialize, Serialize};

/// Sample period in seconds. The logger streams at 100 Hz; keep in sync with
/// the firmware rate, a mismatch biases the gyro-integration term.
pub const SAMPLE_DT: f64 = 0.01;

/// Accelerometer contribution in the complementary blend.
pub const ALPHA: f64 = 0.02;

/// One orientation estimate, in radians.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Orientation {
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
}

/// Complementary filter estimating racket orientation from one IMU sample at
/// a time.
///
/// Roll and pitch blend gyro integration (responsive, drift-prone) with
/// accelerometer-derived angles (stable, noisy). Yaw has no accelerometer
/// correction, so it is derived from a single gyro integration step per call
/// and never persisted: it drifts and is display-only.
pub struct OrientationFilter {
    roll: f64,
    pitch: f64,
}

impl OrientationFilter {
    pub fn new() -> Self {
        Self {
            roll: 0.0,
            pitch: 0.0,
        }
    }

    /// Advances the filter by one sample. Accel in g, gyro in deg/s.
    pub fn update(&mut self, ax: f64, ay: f64, az: f64, gx: f64, gy: f64, gz: f64) -> Orientation {
        // Integrate gyro (deg/s -> rad)
        let gx_r = gx.to_radians();
        let gy_r = gy.to_radians();
        let gz_r = gz.to_radians();

        self.roll += gx_r * SAMPLE_DT;
        self.pitch += gy_r * SAMPLE_DT;
        let yaw = gz_r * SAMPLE_DT; // single step, not accumulated

        // Accel-based roll/pitch; epsilon keeps an all-zero reading finite
        let norm = (ax * ax + ay * ay + az * az).sqrt() + 1e-6;
        let (ax_n, ay_n, az_n) = (ax / norm, ay / norm, az / norm);
        let roll_acc = ay_n.atan2(az_n);
        let pitch_acc = (-ax_n).atan2((ay_n * ay_n + az_n * az_n).sqrt());

        self.roll = (1.0 - ALPHA) * self.roll + ALPHA * roll_acc;
        self.pitch = (1.0 - ALPHA) * self.pitch + ALPHA * pitch_acc;

        Orientation {
            roll: self.roll,
            pitch: self.pitch,
            yaw,
        }
    }

    /// Back to level. Call whenever a new connection/stream begins.
    pub fn reset(&mut self) {
        self.roll = 0.0;
        self.pitch = 0.0;
    }

    pub fn roll(&self) -> f64 {
        self.roll
    }

    pub fn pitch(&self) -> f64 {
        self.pitch
    }
}

impl Default for OrientationFilter {
    fn default() -> Self {
        Self::new()
    }
}
