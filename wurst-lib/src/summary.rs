use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset};
#[cfg(feature = "serde")]
use serde::Serialize;

use crate::record::SensorRecord;

#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct UidSummary {
    pub count: usize,
    pub first_time: Option<DateTime<FixedOffset>>,
    pub last_time: Option<DateTime<FixedOffset>>,
}

impl UidSummary {
    fn add(&mut self, time: DateTime<FixedOffset>) {
        self.count += 1;
        if self.first_time.map_or(true, |t| time < t) {
            self.first_time = Some(time);
        }
        if self.last_time.map_or(true, |t| time > t) {
            self.last_time = Some(time);
        }
    }
}

/// Tracks record counts and time bounds, overall and per unit.
///
/// Records do not have to be in time order.
///
/// # Example
/// ```
/// use cryowurst::{decode_all, DecoderConfig, Summary};
///
/// let mut packet = b"W2".to_vec();
/// packet.resize(62, 0);
/// let decoded = decode_all([hex::encode(&packet)], &DecoderConfig::default()).unwrap();
///
/// let mut summary = Summary::default();
/// decoded.records.iter().for_each(|r| summary.add(r));
/// assert_eq!(summary.total.count, 1);
/// assert_eq!(summary.uids["0"].count, 1);
/// ```
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Summary {
    pub total: UidSummary,
    /// Keyed by the hex rendering of the unit identifier.
    pub uids: BTreeMap<String, UidSummary>,
}

impl Summary {
    pub fn add(&mut self, record: &SensorRecord) {
        self.total.add(record.time);
        self.uids
            .entry(record.uid_hex())
            .or_default()
            .add(record.time);
    }
}

impl<'a> FromIterator<&'a SensorRecord> for Summary {
    fn from_iter<T: IntoIterator<Item = &'a SensorRecord>>(iter: T) -> Self {
        let mut summary = Summary::default();
        iter.into_iter().for_each(|r| summary.add(r));
        summary
    }
}
