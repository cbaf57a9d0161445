use chrono::{DateTime, FixedOffset};

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::calibration::{imu_accel, keller_temperature, tilt_angle, tmp117_temperature};
use crate::config::DecoderConfig;
use crate::fields::{read_f32, read_i16, read_i32, read_u16, read_u32, read_u8};
use crate::frame::SUBPACKET_LEN;
use crate::prelude::*;

/// Byte offsets of the fields in a wurst sub-packet. All values are little-endian.
mod offset {
    pub const TIMESTAMP: usize = 2;
    pub const LOGGER_TEMP: usize = 6;
    pub const LOGGER_PRESSURE: usize = 10;
    pub const LOGGER_VOLTAGE: usize = 14;
    pub const CHANNEL_NUMBER: usize = 16;
    pub const UID: usize = 21;
    pub const TMP_TEMP: usize = 28;
    pub const MAG_X: usize = 30;
    pub const MAG_Y: usize = 32;
    pub const MAG_Z: usize = 34;
    pub const IMU_X: usize = 36;
    pub const IMU_Y: usize = 38;
    pub const IMU_Z: usize = 40;
    pub const TILT_X: usize = 42;
    pub const TILT_Y: usize = 44;
    pub const TILT_Z: usize = 46;
    pub const TILT_PITCH: usize = 48;
    pub const TILT_ROLL: usize = 50;
    pub const EC: usize = 52;
    pub const PRESSURE: usize = 54;
    // Keller temperature and wurst voltage share byte 58. This matches the
    // packets as transmitted and should not be changed without the hardware
    // packet definition.
    pub const KELLER_TEMP: usize = 57;
    pub const WURST_VOLTAGE: usize = 58;
}

/// A single calibrated sample from one wurst unit, along with the state of the
/// surface logger that relayed it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SensorRecord {
    pub time: DateTime<FixedOffset>,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "UID", serialize_with = "serialize_uid")
    )]
    pub uid: u32,
    /// TMP117 temperature, degrees C
    pub tmp_temp: f64,
    /// Keller temperature, degrees C
    pub keller_temp: f64,
    /// Keller pressure, bar
    pub pressure: f64,
    pub mag_x: u16,
    pub mag_y: u16,
    pub mag_z: u16,
    /// IMU acceleration, milli-g
    pub imu_x: f64,
    pub imu_y: f64,
    pub imu_z: f64,
    pub tilt_x: i16,
    pub tilt_y: i16,
    pub tilt_z: i16,
    /// Degrees
    pub tilt_pitch: f64,
    /// Degrees
    pub tilt_roll: f64,
    pub ec: u16,
    pub wurst_voltage: i16,
    pub logger_voltage: i16,
    pub logger_pressure: i32,
    /// Logger temperature, degrees C
    pub logger_temp: f32,
    pub channel_number: u8,
}

#[cfg(feature = "serde")]
fn serialize_uid<S>(uid: &u32, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(&format_args!("{uid:x}"))
}

impl SensorRecord {
    /// Output column names, in output order.
    pub const COLUMNS: [&'static str; 22] = [
        "time",
        "UID",
        "tmp_temp",
        "keller_temp",
        "pressure",
        "mag_x",
        "mag_y",
        "mag_z",
        "imu_x",
        "imu_y",
        "imu_z",
        "tilt_x",
        "tilt_y",
        "tilt_z",
        "tilt_pitch",
        "tilt_roll",
        "ec",
        "wurst_voltage",
        "logger_voltage",
        "logger_pressure",
        "logger_temp",
        "channel_number",
    ];

    /// Assemble a record from a single sub-packet.
    ///
    /// # Errors
    /// [Error::OutOfRange] if `subpacket` is shorter than [SUBPACKET_LEN]. Sub-packets
    /// produced by [crate::frame::scan] are always the correct length.
    pub fn assemble(subpacket: &[u8], config: &DecoderConfig) -> Result<SensorRecord> {
        if subpacket.len() < SUBPACKET_LEN {
            return Err(Error::OutOfRange {
                offset: 0,
                width: SUBPACKET_LEN,
                len: subpacket.len(),
            });
        }
        let buf = subpacket;

        Ok(SensorRecord {
            time: config.timezone.convert(read_i32(buf, offset::TIMESTAMP)?),
            uid: read_u32(buf, offset::UID)?,
            tmp_temp: tmp117_temperature(read_i16(buf, offset::TMP_TEMP)?),
            keller_temp: keller_temperature(read_i16(buf, offset::KELLER_TEMP)?),
            pressure: config.keller.pressure(read_u16(buf, offset::PRESSURE)?),
            mag_x: read_u16(buf, offset::MAG_X)?,
            mag_y: read_u16(buf, offset::MAG_Y)?,
            mag_z: read_u16(buf, offset::MAG_Z)?,
            imu_x: imu_accel(read_i16(buf, offset::IMU_X)?),
            imu_y: imu_accel(read_i16(buf, offset::IMU_Y)?),
            imu_z: imu_accel(read_i16(buf, offset::IMU_Z)?),
            tilt_x: read_i16(buf, offset::TILT_X)?,
            tilt_y: read_i16(buf, offset::TILT_Y)?,
            tilt_z: read_i16(buf, offset::TILT_Z)?,
            tilt_pitch: tilt_angle(read_i16(buf, offset::TILT_PITCH)?),
            tilt_roll: tilt_angle(read_i16(buf, offset::TILT_ROLL)?),
            ec: read_u16(buf, offset::EC)?,
            wurst_voltage: read_i16(buf, offset::WURST_VOLTAGE)?,
            logger_voltage: read_i16(buf, offset::LOGGER_VOLTAGE)?,
            logger_pressure: read_i32(buf, offset::LOGGER_PRESSURE)?,
            logger_temp: read_f32(buf, offset::LOGGER_TEMP)?,
            channel_number: read_u8(buf, offset::CHANNEL_NUMBER)?,
        })
    }

    /// The unit identifier as lowercase hex with no prefix or padding, e.g., `cf240002`.
    #[must_use]
    pub fn uid_hex(&self) -> String {
        format!("{:x}", self.uid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimeZone;

    #[rustfmt::skip]
    fn subpacket() -> Vec<u8> {
        let mut buf = vec![0u8; SUBPACKET_LEN];
        buf[0..2].copy_from_slice(b"W2");
        buf[2..6].copy_from_slice(&1_721_649_600i32.to_le_bytes());
        buf[6..10].copy_from_slice(&(-3.25f32).to_le_bytes());
        buf[10..14].copy_from_slice(&(-1_000_000i32).to_le_bytes());
        buf[14..16].copy_from_slice(&1234i16.to_le_bytes());
        buf[16] = 7;
        buf[21..25].copy_from_slice(&0xcf24_0002u32.to_le_bytes());
        buf[28..30].copy_from_slice(&(-128i16).to_le_bytes());
        buf[30..32].copy_from_slice(&65535u16.to_le_bytes());
        buf[32..34].copy_from_slice(&2u16.to_le_bytes());
        buf[34..36].copy_from_slice(&3u16.to_le_bytes());
        buf[36..38].copy_from_slice(&16384i16.to_le_bytes());
        buf[38..40].copy_from_slice(&(-8192i16).to_le_bytes());
        buf[40..42].copy_from_slice(&0i16.to_le_bytes());
        buf[42..44].copy_from_slice(&(-1i16).to_le_bytes());
        buf[44..46].copy_from_slice(&2i16.to_le_bytes());
        buf[46..48].copy_from_slice(&(-3i16).to_le_bytes());
        buf[48..50].copy_from_slice(&10i16.to_le_bytes());
        buf[50..52].copy_from_slice(&(-10i16).to_le_bytes());
        buf[52..54].copy_from_slice(&500u16.to_le_bytes());
        buf[54..56].copy_from_slice(&49152u16.to_le_bytes());
        // keller_temp spans 57..59 and wurst_voltage 58..60
        buf[57] = 0x90;
        buf[58] = 0x01;
        buf[59] = 0x00;
        buf
    }

    #[test]
    fn assemble_fields() {
        let rec = SensorRecord::assemble(&subpacket(), &DecoderConfig::default()).unwrap();

        assert_eq!(rec.time.to_rfc3339(), "2024-07-22T12:00:00+00:00");
        assert_eq!(rec.uid, 0xcf24_0002);
        assert_eq!(rec.uid_hex(), "cf240002");
        assert_eq!(rec.tmp_temp, -1.0);
        // 0x0190 = 400 -> 25 after the shift
        assert!((rec.keller_temp - -49.95).abs() < 1e-9);
        assert!((rec.pressure - 30.0).abs() < 1e-9);
        assert_eq!((rec.mag_x, rec.mag_y, rec.mag_z), (65535, 2, 3));
        assert_eq!((rec.imu_x, rec.imu_y, rec.imu_z), (1000.0, -500.0, 0.0));
        assert_eq!((rec.tilt_x, rec.tilt_y, rec.tilt_z), (-1, 2, -3));
        assert_eq!(rec.tilt_pitch, 1.0);
        assert_eq!(rec.tilt_roll, -1.0);
        assert_eq!(rec.ec, 500);
        assert_eq!(rec.wurst_voltage, 1);
        assert_eq!(rec.logger_voltage, 1234);
        assert_eq!(rec.logger_pressure, -1_000_000);
        assert_eq!(rec.logger_temp, -3.25);
        assert_eq!(rec.channel_number, 7);
    }

    #[test]
    fn assemble_is_deterministic() {
        let buf = subpacket();
        let config = DecoderConfig::default();
        let a = SensorRecord::assemble(&buf, &config).unwrap();
        let b = SensorRecord::assemble(&buf, &config).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.logger_temp.to_bits(), b.logger_temp.to_bits());
    }

    #[test]
    fn assemble_uses_configured_timezone() {
        let config = DecoderConfig::builder()
            .timezone("+02:00".parse::<TimeZone>().unwrap())
            .build();
        let rec = SensorRecord::assemble(&subpacket(), &config).unwrap();
        assert_eq!(rec.time.to_rfc3339(), "2024-07-22T14:00:00+02:00");
    }

    #[test]
    fn uid_hex_is_not_padded() {
        let mut buf = subpacket();
        buf[21..25].copy_from_slice(&0x0000_0abcu32.to_le_bytes());
        let rec = SensorRecord::assemble(&buf, &DecoderConfig::default()).unwrap();
        assert_eq!(rec.uid_hex(), "abc");
    }

    #[test]
    fn assemble_short_subpacket() {
        let buf = subpacket();
        let err = SensorRecord::assemble(&buf[..60], &DecoderConfig::default()).unwrap_err();
        assert!(matches!(err, Error::OutOfRange { len: 60, .. }), "got {err:?}");
    }

    #[test]
    fn columns() {
        assert_eq!(SensorRecord::COLUMNS.len(), 22);
        assert_eq!(SensorRecord::COLUMNS[0], "time");
        assert_eq!(SensorRecord::COLUMNS[21], "channel_number");
    }
}
