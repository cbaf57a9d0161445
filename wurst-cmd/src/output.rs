use std::io::Write;

use anyhow::{Context, Result};
use cryowurst::SensorRecord;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Write a header followed by one row per record in [SensorRecord::COLUMNS] order.
pub fn write_records<W: Write>(
    mut writer: csv::Writer<W>,
    records: &[SensorRecord],
) -> Result<()> {
    writer
        .write_record(SensorRecord::COLUMNS)
        .context("writing header")?;
    for rec in records {
        writer.write_record(row(rec)).context("writing record")?;
    }
    writer.flush().context("flushing output")
}

fn row(rec: &SensorRecord) -> [String; 22] {
    [
        rec.time.format(TIME_FORMAT).to_string(),
        rec.uid_hex(),
        float(rec.tmp_temp),
        float(rec.keller_temp),
        float(rec.pressure),
        rec.mag_x.to_string(),
        rec.mag_y.to_string(),
        rec.mag_z.to_string(),
        float(rec.imu_x),
        float(rec.imu_y),
        float(rec.imu_z),
        rec.tilt_x.to_string(),
        rec.tilt_y.to_string(),
        rec.tilt_z.to_string(),
        float(rec.tilt_pitch),
        float(rec.tilt_roll),
        rec.ec.to_string(),
        rec.wurst_voltage.to_string(),
        rec.logger_voltage.to_string(),
        rec.logger_pressure.to_string(),
        float(f64::from(rec.logger_temp)),
        rec.channel_number.to_string(),
    ]
}

/// Format a float the way earlier processed files did: shortest round-trip digits,
/// always with a fractional part or exponent, `nan`/`inf` for non-finite values and
/// scientific notation with a signed two digit exponent below 1e-4 or from 1e16.
fn float(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let sci = format!("{v:e}");
    let (mantissa, exp) = sci.split_once('e').unwrap_or((&sci, "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    if v != 0.0 && !(-4..16).contains(&exp) {
        let sign = if exp < 0 { '-' } else { '+' };
        return format!("{mantissa}e{sign}{:02}", exp.abs());
    }
    let s = v.to_string();
    if s.contains('.') {
        s
    } else {
        format!("{s}.0")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cryowurst::{decode_message, DecoderConfig};
    use test_case::test_case;

    #[test_case(0.0, "0.0")]
    #[test_case(-0.0, "-0.0")]
    #[test_case(-0.5, "-0.5")]
    #[test_case(15.0, "15.0")]
    #[test_case(0.1 + 0.2, "0.30000000000000004")]
    #[test_case(0.0001, "0.0001")]
    #[test_case(0.00001, "1e-05")]
    #[test_case(-1.5e-7, "-1.5e-07")]
    #[test_case(1e15, "1000000000000000.0")]
    #[test_case(1e16, "1e+16")]
    #[test_case(1.25e100, "1.25e+100")]
    #[test_case(f64::NAN, "nan")]
    #[test_case(f64::INFINITY, "inf")]
    #[test_case(f64::NEG_INFINITY, "-inf")]
    fn float_format(v: f64, expected: &str) {
        assert_eq!(float(v), expected);
    }

    #[test]
    fn record_rows() {
        let mut packet = b"W2".to_vec();
        packet.resize(62, 0);
        packet[2..6].copy_from_slice(&1_721_649_600i32.to_le_bytes());
        packet[6..10].copy_from_slice(&2.5f32.to_le_bytes());
        packet[16] = 9;
        packet[21..25].copy_from_slice(&0xcf24_0007u32.to_le_bytes());
        packet[48..50].copy_from_slice(&(-5i16).to_le_bytes());
        packet[54..56].copy_from_slice(&16384u16.to_le_bytes());

        let records = decode_message(&hex::encode(&packet), &DecoderConfig::default()).unwrap();
        let mut buf = Vec::new();
        write_records(csv::Writer::from_writer(&mut buf), &records).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], SensorRecord::COLUMNS.join(","));

        let cols: Vec<&str> = lines[1].split(',').collect();
        assert_eq!(cols.len(), SensorRecord::COLUMNS.len());
        assert_eq!(cols[0], "2024-07-22 12:00:00");
        assert_eq!(cols[1], "cf240007");
        assert_eq!(cols[4], "0.0");
        assert_eq!(cols[5], "0");
        assert_eq!(cols[14], "-0.5");
        assert_eq!(cols[20], "2.5");
        assert_eq!(cols[21], "9");
    }
}
