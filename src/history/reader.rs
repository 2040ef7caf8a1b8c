//! Streaming CSV reader for league history.

use std::io::Read;

use crate::error::TetrioError;
use crate::history::record::Record;

/// Reads [`Record`]s from CSV text, one row at a time.
///
/// The header row is not treated specially; use [`HistoryReader::all`] with
/// `skip_header` or discard the first row yourself.
pub struct HistoryReader<R> {
    csv: csv::Reader<R>,
    row: csv::StringRecord,
}

impl<R: Read> HistoryReader<R> {
    /// Wrap a CSV source.
    pub fn new(source: R) -> Self {
        let csv = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(source);
        Self {
            csv,
            row: csv::StringRecord::new(),
        }
    }

    /// The next row, unparsed. `None` at end of input.
    pub fn next_raw(&mut self) -> Result<Option<&csv::StringRecord>, TetrioError> {
        if self.csv.read_record(&mut self.row)? {
            Ok(Some(&self.row))
        } else {
            Ok(None)
        }
    }

    /// Parse the next row. `None` at end of input.
    pub fn next_record(&mut self) -> Result<Option<Record>, TetrioError> {
        match self.next_raw()? {
            Some(row) => Record::from_record(row).map(Some),
            None => Ok(None),
        }
    }

    /// Parse every remaining row, optionally discarding the first.
    pub fn all(mut self, skip_header: bool) -> Result<Vec<Record>, TetrioError> {
        if skip_header && self.next_raw()?.is_none() {
            return Ok(Vec::new());
        }

        let mut records = Vec::new();
        while let Some(record) = self.next_record()? {
            records.push(record);
        }
        Ok(records)
    }
}

impl<R: Read> Iterator for HistoryReader<R> {
    type Item = Result<Record, TetrioError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
user_id,gamesplayed,gameswon,rating,glicko,rank,apm,pps,vs,created_at
5e32fc85ab319c2ab1beb07c,10,6,15000.1,1800,s,60,1.8,130,2023-01-01 00:00:00
5e32fc85ab319c2ab1beb07c,11,7,15100.9,1810,s,61,1.9,131,2023-01-02 00:00:00.25
";

    #[test]
    fn test_all_skips_header() {
        let records = HistoryReader::new(CSV.as_bytes()).all(true).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].gamesplayed, 11);
        assert_eq!(records[1].created_at.millisecond(), 250);
    }

    #[test]
    fn test_header_is_not_a_record() {
        let err = HistoryReader::new(CSV.as_bytes()).all(false).unwrap_err();
        assert!(matches!(err, TetrioError::Malformed(_)));
    }

    #[test]
    fn test_empty_input() {
        assert!(HistoryReader::new(&b""[..]).all(true).unwrap().is_empty());
        assert!(HistoryReader::new(&b""[..]).next_record().unwrap().is_none());
    }

    #[test]
    fn test_row_by_row() {
        let mut reader = HistoryReader::new(CSV.as_bytes());
        assert_eq!(reader.next_raw().unwrap().unwrap().len(), 10);

        let first = reader.next_record().unwrap().unwrap();
        assert_eq!(first.rank, "s");
        assert_eq!(reader.count(), 1);
    }
}
