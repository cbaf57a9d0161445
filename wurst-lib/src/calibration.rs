//! Conversion of raw sensor counts to physical units.
//!
//! Only the Keller, TMP117, IMU and tilt pitch/roll values are calibrated. The
//! magnetometer, tilt vector, EC and voltage values are reported as raw counts.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Keller digital output corresponding to the bottom of the pressure range.
const KELLER_ZERO_COUNTS: f64 = 16384.0;
/// Keller digital counts spanning the full pressure range.
const KELLER_SPAN_COUNTS: f64 = 32768.0;

/// TMP117 resolution in degrees C per count.
pub const TMP117_DEG_PER_COUNT: f64 = 0.0078125;
/// IMU full scale is 1g per 16384 counts.
pub const IMU_MILLI_G_PER_COUNT: f64 = 1000.0 / 16384.0;
/// TILT-05 pitch/roll resolution in degrees per count.
pub const TILT_DEG_PER_COUNT: f64 = 0.1;

/// Rated pressure range of the Keller transducer.
///
/// The default is the 30 bar sensor fitted to the 2024 units. The demo kit used a
/// 100 bar sensor and other deployments may use 250 bar.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KellerRange {
    pub min_bar: f64,
    pub max_bar: f64,
}

impl KellerRange {
    pub const CRYOWURST_2024: KellerRange = KellerRange {
        min_bar: 0.0,
        max_bar: 30.0,
    };

    #[must_use]
    pub fn new(min_bar: f64, max_bar: f64) -> Self {
        KellerRange { min_bar, max_bar }
    }

    /// Convert a raw Keller pressure reading to bar.
    #[must_use]
    pub fn pressure(&self, raw: u16) -> f64 {
        let span = self.max_bar - self.min_bar;
        (f64::from(raw) - KELLER_ZERO_COUNTS) * (span / KELLER_SPAN_COUNTS) + self.min_bar
    }
}

impl Default for KellerRange {
    fn default() -> Self {
        Self::CRYOWURST_2024
    }
}

/// Keller pressure in bar using the default [KellerRange].
#[must_use]
pub fn keller_pressure(raw: u16) -> f64 {
    KellerRange::default().pressure(raw)
}

/// Keller temperature in degrees C.
///
/// The low 4 bits are dropped, reducing the reading to the 12 bits of precision
/// Keller recommends.
#[must_use]
pub fn keller_temperature(raw: i16) -> f64 {
    (f64::from(raw >> 4) - 24.0) * 0.05 - 50.0
}

#[must_use]
pub fn tmp117_temperature(raw: i16) -> f64 {
    f64::from(raw) * TMP117_DEG_PER_COUNT
}

/// IMU acceleration in milli-g.
#[must_use]
pub fn imu_accel(raw: i16) -> f64 {
    f64::from(raw) * IMU_MILLI_G_PER_COUNT
}

/// Tilt pitch or roll in degrees.
#[must_use]
pub fn tilt_angle(raw: i16) -> f64 {
    f64::from(raw) * TILT_DEG_PER_COUNT
}
