#![doc = include_str!("../README.md")]

mod config;
mod error;
mod record;
mod summary;

pub mod calibration;
pub mod cloudloop;
pub mod decode;
pub mod fields;
pub mod frame;

pub use calibration::KellerRange;
pub use config::{DecoderConfig, TimeZone};
pub use cloudloop::{read_messages, CloudloopMessage};
pub use decode::{decode_all, decode_message, Decoded, MessageFailure};
pub use error::{Error, Result};
pub use record::SensorRecord;
pub use summary::{Summary, UidSummary};

pub(crate) mod prelude {
    pub use crate::error::{Error, Result};
}
