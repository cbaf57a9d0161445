#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A message string was not valid hexadecimal.
    #[error("invalid hex message: {0}")]
    Decode(#[from] hex::FromHexError),

    /// A field read past the end of its buffer. The frame scanner only hands out
    /// full-length sub-packets, so this indicates a bug rather than bad input.
    #[error("field at offset {offset} with width {width} exceeds buffer of {len} bytes")]
    OutOfRange {
        offset: usize,
        width: usize,
        len: usize,
    },

    #[error("unsupported field width {0}")]
    UnsupportedWidth(usize),

    #[error("invalid time zone {0:?}; expected utc, local, or an offset like +01:00")]
    TimeZone(String),

    /// Error reading a cloudloop CSV export
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
