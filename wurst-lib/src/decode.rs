//! Decoding of hex encoded satellite messages into [SensorRecord]s.
use tracing::{debug, trace};

use crate::config::DecoderConfig;
use crate::frame::scan;
use crate::prelude::*;
use crate::record::SensorRecord;

/// A message that could not be decoded.
#[derive(Debug)]
pub struct MessageFailure {
    /// Zero-based position of the message in the input sequence
    pub index: usize,
    pub error: Error,
}

/// The result of decoding a batch of messages.
#[derive(Debug, Default)]
pub struct Decoded {
    /// Records in message order, then sub-packet order within each message.
    pub records: Vec<SensorRecord>,
    /// Messages that were not valid hex. These produce no records.
    pub failures: Vec<MessageFailure>,
    /// Number of messages without the wurst marker.
    pub skipped: usize,
    /// Total trailing bytes dropped because they did not fill a sub-packet.
    pub truncated_bytes: usize,
}

/// Decodes the sub-packets of a single message already converted to bytes, appending
/// the resulting records to `records`.
///
/// Returns `false` if the message did not carry the wurst marker.
fn decode_bytes(
    message: &[u8],
    config: &DecoderConfig,
    records: &mut Vec<SensorRecord>,
    truncated: &mut usize,
) -> Result<bool> {
    let frames = scan(message);
    if !frames.is_eligible() {
        return Ok(false);
    }
    *truncated += frames.remainder();
    for (idx, subpacket) in frames.enumerate() {
        let record = SensorRecord::assemble(subpacket, config)?;
        trace!(subpacket = idx, uid = %record.uid_hex(), time = %record.time, "assembled record");
        records.push(record);
    }
    Ok(true)
}

/// Decode a single hex encoded message.
///
/// Messages from instruments other than wurst units decode to an empty `Vec`.
///
/// # Errors
/// [Error::Decode] if `message` is not valid hex.
pub fn decode_message(message: &str, config: &DecoderConfig) -> Result<Vec<SensorRecord>> {
    let bytes = hex::decode(message.trim())?;
    let mut records = Vec::default();
    let mut truncated = 0;
    decode_bytes(&bytes, config, &mut records, &mut truncated)?;
    Ok(records)
}

/// Decode all `messages`, in order.
///
/// Invalid hex messages are recorded in [Decoded::failures] and decoding continues
/// with the next message.
///
/// # Errors
/// [Error::OutOfRange] if a sub-packet could not be assembled, which indicates a bug
/// rather than bad input.
///
/// # Example
/// ```
/// use cryowurst::{decode_all, DecoderConfig};
///
/// let mut packet = b"W2".to_vec();
/// packet.resize(62, 0);
/// let messages = vec![hex::encode(&packet), "abc".to_string(), "5731".to_string()];
///
/// let decoded = decode_all(messages, &DecoderConfig::default()).unwrap();
/// assert_eq!(decoded.records.len(), 1);
/// assert_eq!(decoded.failures.len(), 1);
/// assert_eq!(decoded.failures[0].index, 1);
/// assert_eq!(decoded.skipped, 1);
/// ```
pub fn decode_all<I, S>(messages: I, config: &DecoderConfig) -> Result<Decoded>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut decoded = Decoded::default();
    for (index, message) in messages.into_iter().enumerate() {
        let bytes = match hex::decode(message.as_ref().trim()) {
            Ok(bytes) => bytes,
            Err(err) => {
                debug!(index, "skipping invalid message: {err}");
                decoded.failures.push(MessageFailure {
                    index,
                    error: err.into(),
                });
                continue;
            }
        };

        let before = decoded.truncated_bytes;
        let eligible = decode_bytes(
            &bytes,
            config,
            &mut decoded.records,
            &mut decoded.truncated_bytes,
        )?;
        if !eligible {
            debug!(index, len = bytes.len(), "skipping message without wurst marker");
            decoded.skipped += 1;
        } else if decoded.truncated_bytes > before {
            debug!(
                index,
                dropped = decoded.truncated_bytes - before,
                "dropped partial sub-packet"
            );
        }
    }
    debug!(
        records = decoded.records.len(),
        failures = decoded.failures.len(),
        skipped = decoded.skipped,
        "decode complete"
    );
    Ok(decoded)
}
