//! Slicing of satellite messages into wurst sub-packets.
use std::slice::ChunksExact;

/// Type tag at the start of a message carrying wurst sub-packets.
pub const WURST_MARKER: [u8; 2] = *b"W2";
/// Length of a single wurst sub-packet.
pub const SUBPACKET_LEN: usize = 62;

/// Iterator over the fixed length sub-packets of a single message.
///
/// Created by [scan].
#[derive(Debug, Clone)]
pub struct Frames<'a> {
    chunks: Option<ChunksExact<'a, u8>>,
}

impl<'a> Frames<'a> {
    /// True if the message carried the wurst marker.
    #[must_use]
    pub fn is_eligible(&self) -> bool {
        self.chunks.is_some()
    }

    /// Number of trailing bytes too short to form a sub-packet. Always 0 for
    /// messages that are not eligible.
    #[must_use]
    pub fn remainder(&self) -> usize {
        self.chunks.as_ref().map_or(0, |c| c.remainder().len())
    }
}

impl<'a> Iterator for Frames<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        self.chunks.as_mut()?.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chunks.as_ref().map_or((0, Some(0)), Iterator::size_hint)
    }
}

/// Split `message` into [SUBPACKET_LEN] byte sub-packets.
///
/// The [WURST_MARKER] check applies to the message as a whole. Messages from other
/// instruments produce no sub-packets, and every sub-packet of an eligible message
/// is assumed to be a wurst sub-packet. Trailing bytes that do not fill a full
/// sub-packet are dropped.
///
/// # Example
/// ```
/// use cryowurst::frame::{scan, SUBPACKET_LEN};
///
/// let mut message = b"W2".to_vec();
/// message.resize(2 * SUBPACKET_LEN + 10, 0);
///
/// let frames = scan(&message);
/// assert_eq!(frames.remainder(), 10);
/// assert_eq!(frames.count(), 2);
/// ```
#[must_use]
pub fn scan(message: &[u8]) -> Frames<'_> {
    let chunks = if message.starts_with(&WURST_MARKER) {
        Some(message.chunks_exact(SUBPACKET_LEN))
    } else {
        None
    };
    Frames { chunks }
}
