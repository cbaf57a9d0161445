//! Reading hex messages from cloudloop CSV exports.
use std::io::Read;

use crate::prelude::*;

/// A hex message along with where it was found in the export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudloopMessage {
    /// 1-based line the csv reader reports for the start of the row
    pub line: u64,
    pub message: String,
}

impl AsRef<str> for CloudloopMessage {
    fn as_ref(&self) -> &str {
        &self.message
    }
}

/// Return an iterator of the hex messages in a cloudloop export.
///
/// The first column of each row is the message; other columns are ignored and may
/// hold any bytes. Rows with an empty first column are dropped. No header row is
/// expected; a header is passed through and reported as a failure by
/// [crate::decode_all]. A first column that is not UTF-8 is passed through lossily,
/// so it also fails as a single message rather than ending the read.
///
/// # Errors
/// Each item is [Error::Csv] if reading the underlying data fails.
///
/// # Example
/// ```
/// use cryowurst::read_messages;
///
/// let export = "5732aa,2024-07-22 12:00:00\n,\n\"5733\",x\n";
/// let messages: Vec<_> = read_messages(export.as_bytes())
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(messages[1].message, "5733");
/// assert_eq!(messages[1].line, 3);
/// ```
pub fn read_messages<R>(reader: R) -> impl Iterator<Item = Result<CloudloopMessage>>
where
    R: Read,
{
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
        .into_byte_records()
        .filter_map(|zult| match zult {
            Ok(record) => {
                let field = record.get(0).filter(|f| !f.is_empty())?;
                Some(Ok(CloudloopMessage {
                    line: record.position().map_or(0, csv::Position::line),
                    message: String::from_utf8_lossy(field).into_owned(),
                }))
            }
            Err(err) => Some(Err(err.into())),
        })
}
