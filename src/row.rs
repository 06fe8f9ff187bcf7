//! Input rows and their classification.

use crate::error::{Error, Result};
use crate::ledger::FailureReason;

/// One row of the input table.
///
/// Fields are raw bytes so that file names in a legacy charset reach the
/// decoder untouched. Rows of the same table may have different lengths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    fields: Vec<Vec<u8>>,
}

impl Row {
    /// Create a row from its fields.
    pub fn new(fields: Vec<Vec<u8>>) -> Self {
        Self { fields }
    }

    /// Get the field at `index`, if the row is long enough.
    pub fn get(&self, index: usize) -> Option<&[u8]> {
        self.fields.get(index).map(Vec::as_slice)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Return `true` if the row has no field at all.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<csv::ByteRecord> for Row {
    fn from(record: csv::ByteRecord) -> Self {
        Self::new(record.iter().map(<[u8]>::to_vec).collect())
    }
}

impl<S: AsRef<str>> FromIterator<S> for Row {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|field| field.as_ref().as_bytes().to_vec())
                .collect(),
        )
    }
}

/// The outcome of validating a row before any decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification<'a> {
    /// Both fields are present; the row can be downloaded.
    Ready { file_name: &'a [u8], url: &'a [u8] },
    /// The row cannot proceed.
    Rejected {
        file_name: &'a [u8],
        url: &'a [u8],
        reason: FailureReason,
    },
}

/// Extract and validate the file name and URL fields of a row.
///
/// `position` identifies the row in error messages. A column index beyond
/// the end of the row is a configuration error and aborts the run.
pub fn classify(
    row: &Row,
    position: usize,
    file_name_index: usize,
    url_index: usize,
) -> Result<Classification<'_>> {
    let field = |column: usize| {
        row.get(column).ok_or(Error::ColumnOutOfRange {
            row: position,
            column,
            len: row.len(),
        })
    };
    let file_name = field(file_name_index)?;
    let url = field(url_index)?;

    if file_name.is_empty() || url.is_empty() {
        return Ok(Classification::Rejected {
            file_name,
            url,
            reason: FailureReason::EmptyField,
        });
    }
    Ok(Classification::Ready { file_name, url })
}

/// The rows left after skipping the first `start` ones.
pub fn active_window(rows: &[Row], start: usize) -> Result<&[Row]> {
    rows.get(start..).ok_or(Error::StartIndexOutOfRange {
        start,
        len: rows.len(),
    })
}
