//! Ranking row data structure.

use serde::{Deserialize, Serialize};

/// One entry of the scraped seat-sales ranking table.
///
/// All fields except `rank` carry the text exactly as printed on the page;
/// an undisclosed value is a `*` placeholder and is kept verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RankingRow {
    /// Position as printed on the page (a leading `*` tie marker is stripped)
    pub rank: u32,

    /// Seats sold
    pub seat_count: String,

    /// Screening count
    pub screening_count: String,

    /// Average seats per screening
    pub house_average: String,

    /// Numbered-house figure
    pub numbered_house: String,

    /// Venues that acquired the title
    pub venues_acquired: String,

    /// Venues currently screening it
    pub venues_screening: String,

    /// Acquisition rate (percentage text)
    pub acquisition_rate: String,

    /// Title, including any trailing annotation
    pub title: String,
}

impl RankingRow {
    /// Number of fields in the CSV representation.
    pub const FIELD_COUNT: usize = 9;

    /// Convert to the ordered nine-field CSV record.
    pub fn to_record(&self) -> Vec<String> {
        vec![
            self.rank.to_string(),
            self.seat_count.clone(),
            self.screening_count.clone(),
            self.house_average.clone(),
            self.numbered_house.clone(),
            self.venues_acquired.clone(),
            self.venues_screening.clone(),
            self.acquisition_rate.clone(),
            self.title.clone(),
        ]
    }

    /// Rebuild a row from a nine-field CSV record.
    ///
    /// Returns `None` if the record is short or the rank is not a positive
    /// integer.
    pub fn from_record(record: &[String]) -> Option<Self> {
        if record.len() < Self::FIELD_COUNT {
            return None;
        }
        let rank: u32 = record[0].parse().ok().filter(|r| *r > 0)?;
        Some(Self {
            rank,
            seat_count: record[1].clone(),
            screening_count: record[2].clone(),
            house_average: record[3].clone(),
            numbered_house: record[4].clone(),
            venues_acquired: record[5].clone(),
            venues_screening: record[6].clone(),
            acquisition_rate: record[7].clone(),
            title: record[8].clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> RankingRow {
        RankingRow {
            rank: 3,
            seat_count: "*".to_string(),
            screening_count: "5".to_string(),
            house_average: "10.0".to_string(),
            numbered_house: "6.0".to_string(),
            venues_acquired: "*".to_string(),
            venues_screening: "200".to_string(),
            acquisition_rate: "50.0%".to_string(),
            title: "Movie C".to_string(),
        }
    }

    #[test]
    fn test_record_round_trip() {
        let row = sample_row();
        let record = row.to_record();
        assert_eq!(record.len(), RankingRow::FIELD_COUNT);
        let restored = RankingRow::from_record(&record).unwrap();
        assert_eq!(restored, row);
    }

    #[test]
    fn test_wildcards_survive_record_conversion() {
        let record = sample_row().to_record();
        assert_eq!(record[1], "*");
        assert_eq!(record[5], "*");
    }

    #[test]
    fn test_from_record_rejects_short_record() {
        let mut record = sample_row().to_record();
        record.pop();
        assert!(RankingRow::from_record(&record).is_none());
    }

    #[test]
    fn test_from_record_rejects_bad_rank() {
        let mut record = sample_row().to_record();
        record[0] = "first".to_string();
        assert!(RankingRow::from_record(&record).is_none());
        record[0] = "0".to_string();
        assert!(RankingRow::from_record(&record).is_none());
    }
}
