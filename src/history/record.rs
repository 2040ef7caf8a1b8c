//! One row of league history.

use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

use crate::error::TetrioError;

/// Number of columns in a history row.
pub const NUM_FIELDS: usize = 10;

/// A snapshot of one user's league statistics at `created_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub user_id: String,
    pub gamesplayed: i64,
    pub gameswon: i64,
    pub rating: f64,
    pub glicko: f64,
    pub rank: String,
    pub apm: f64,
    pub pps: f64,
    pub vs: f64,
    /// Snapshot time, always UTC.
    pub created_at: OffsetDateTime,
}

impl Record {
    /// Parse a CSV row. Extra trailing columns are ignored.
    pub fn from_record(row: &csv::StringRecord) -> Result<Self, TetrioError> {
        if row.len() < NUM_FIELDS {
            return Err(TetrioError::Malformed(format!(
                "history row has {} fields, expected {NUM_FIELDS}",
                row.len()
            )));
        }

        Ok(Self {
            user_id: row[0].to_string(),
            gamesplayed: parse_field(row, 1, "gamesplayed")?,
            gameswon: parse_field(row, 2, "gameswon")?,
            rating: parse_field(row, 3, "rating")?,
            glicko: parse_field(row, 4, "glicko")?,
            rank: row[5].to_string(),
            apm: parse_field(row, 6, "apm")?,
            pps: parse_field(row, 7, "pps")?,
            vs: parse_field(row, 8, "vs")?,
            created_at: parse_timestamp(&row[9])?,
        })
    }

    /// Render the row back into its CSV columns.
    pub fn to_fields(&self) -> Vec<String> {
        vec![
            self.user_id.clone(),
            self.gamesplayed.to_string(),
            self.gameswon.to_string(),
            self.rating.to_string(),
            self.glicko.to_string(),
            self.rank.clone(),
            self.apm.to_string(),
            self.pps.to_string(),
            self.vs.to_string(),
            format_timestamp(self.created_at),
        ]
    }
}

fn parse_field<T: std::str::FromStr>(
    row: &csv::StringRecord,
    index: usize,
    name: &str,
) -> Result<T, TetrioError> {
    row[index].parse().map_err(|_| {
        TetrioError::Malformed(format!("history field {name}: invalid value {:?}", &row[index]))
    })
}

/// `YYYY-MM-DD HH:MM:SS` with an optional fraction, in UTC.
fn parse_timestamp(text: &str) -> Result<OffsetDateTime, TetrioError> {
    let format = format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second][optional [.[subsecond]]]"
    );
    PrimitiveDateTime::parse(text, format)
        .map(PrimitiveDateTime::assume_utc)
        .map_err(|e| TetrioError::Malformed(format!("history timestamp {text:?}: {e}")))
}

/// Trailing zeros of the fraction are dropped, and so is an all-zero fraction.
fn format_timestamp(ts: OffsetDateTime) -> String {
    let mut text = format!(
        "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
        ts.year(),
        u8::from(ts.month()),
        ts.day(),
        ts.hour(),
        ts.minute(),
        ts.second()
    );
    let nanos = ts.nanosecond();
    if nanos != 0 {
        let fraction = format!("{nanos:09}");
        text.push('.');
        text.push_str(fraction.trim_end_matches('0'));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn row(fields: &[&str]) -> csv::StringRecord {
        csv::StringRecord::from(fields.to_vec())
    }

    #[test]
    fn test_parse_row() {
        let rec = Record::from_record(&row(&[
            "5e32fc85ab319c2ab1beb07c",
            "1200",
            "800",
            "23456.78",
            "2800.5",
            "x",
            "150.25",
            "3.1",
            "320",
            "2023-07-14 18:30:05.123",
        ]))
        .unwrap();

        assert_eq!(rec.gamesplayed, 1200);
        assert_eq!(rec.rank, "x");
        assert_eq!(rec.vs, 320.0);
        assert_eq!(rec.created_at, datetime!(2023-07-14 18:30:05.123 UTC));
    }

    #[test]
    fn test_timestamp_without_fraction() {
        assert_eq!(
            parse_timestamp("2021-01-02 03:04:05").unwrap(),
            datetime!(2021-01-02 03:04:05 UTC)
        );
    }

    #[test]
    fn test_short_row_is_malformed() {
        let err = Record::from_record(&row(&["a", "1", "2"])).unwrap_err();
        assert!(matches!(err, TetrioError::Malformed(_)));
    }

    #[test]
    fn test_bad_number_is_malformed() {
        let err = Record::from_record(&row(&[
            "id", "many", "1", "1", "1", "d", "1", "1", "1", "2021-01-02 03:04:05",
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("gamesplayed"));
    }

    #[test]
    fn test_fields_render_back_to_columns() {
        let rec = Record {
            user_id: "id".into(),
            gamesplayed: 10,
            gameswon: 4,
            rating: 12000.5,
            glicko: 1500.0,
            rank: "a+".into(),
            apm: 40.0,
            pps: 1.25,
            vs: 90.0,
            created_at: datetime!(2022-11-30 23:59:01.5 UTC),
        };
        assert_eq!(
            rec.to_fields(),
            ["id", "10", "4", "12000.5", "1500", "a+", "40", "1.25", "90", "2022-11-30 23:59:01.5"]
        );

        let whole = Record {
            created_at: datetime!(2022-11-30 23:59:01 UTC),
            ..rec
        };
        assert_eq!(whole.to_fields()[9], "2022-11-30 23:59:01");
    }
}
