// src/services/extractor.rs

//! Ranking table extractor.
//!
//! Turns the reduced page text into an ordered sequence of [`RankingRow`]s
//! and decides where the table ends.

use regex::Regex;

use crate::models::RankingRow;

/// One ranking line: nine fields separated by runs of whitespace (the page
/// mixes ASCII and full-width spaces). A `*` stands in for an undisclosed
/// value; a leading `*` on the rank marks a tie and is not part of the rank.
const ROW_PATTERN: &str = concat!(
    r"\*?(\d+)[\s　]+",       // rank
    r"([\d*]+)[\s　]+",       // seats sold
    r"([\d*]+)[\s　]+",       // screenings
    r"([\d.]+)[\s　]+",       // house average
    r"([\d.]+)[\s　]+",       // numbered house
    r"([\d*]+)[\s　]+",       // venues acquired
    r"([\d*]+)[\s　]+",       // venues screening
    r"([\d.%*]+)[\s　]+",     // acquisition rate
    r"(.+)",                  // title
);

/// Extracts ranking rows from reduced page text.
///
/// The extractor is a pure function of its input: no shared state, no
/// wall-clock reads, identical text always yields the identical sequence.
pub struct RankingExtractor {
    pattern: Regex,
}

impl RankingExtractor {
    /// Create a new extractor.
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(ROW_PATTERN).expect("row pattern is valid"),
        }
    }

    /// Scan `text` for ranking rows in source order.
    ///
    /// The whole text is scanned for non-overlapping matches rather than
    /// split into lines first, so irregular line breaks in the source do not
    /// lose rows. Text that fails to match is skipped silently; an empty
    /// result is valid and means the page carried no recognizable table.
    ///
    /// Blog pages repeat the table further down (summary snippets, archive
    /// links), so extraction stops at the second rank-1 entry: once ranks
    /// have progressed past 1, another `rank == 1` match marks the start of
    /// a duplicate copy and everything from there on is discarded.
    pub fn extract(&self, text: &str) -> Vec<RankingRow> {
        let mut rows = Vec::new();
        let mut last_rank = 0u32;

        for caps in self.pattern.captures_iter(text) {
            let Ok(rank) = caps[1].parse::<u32>() else {
                continue;
            };
            if rank == 1 && last_rank > 1 {
                break;
            }
            rows.push(RankingRow {
                rank,
                seat_count: caps[2].to_string(),
                screening_count: caps[3].to_string(),
                house_average: caps[4].to_string(),
                numbered_house: caps[5].to_string(),
                venues_acquired: caps[6].to_string(),
                venues_screening: caps[7].to_string(),
                acquisition_rate: caps[8].to_string(),
                title: caps[9].trim_end().to_string(),
            });
            last_rank = rank;
        }

        rows
    }
}

impl Default for RankingExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_match_yields_empty() {
        let extractor = RankingExtractor::new();
        assert!(extractor.extract("").is_empty());
        assert!(extractor.extract("nothing resembling a table here").is_empty());
    }

    #[test]
    fn test_single_table_in_source_order() {
        let extractor = RankingExtractor::new();
        let text = "\
1 500 10 25.5 8.0 300 350 85.0% Movie A\n\
2 400 8 20.1 7.5 250 300 70.2% Movie B\n\
3 300 6 15.0 5.0 200 250 60.0% Movie C";

        let rows = extractor.extract(text);
        assert_eq!(rows.len(), 3);
        let ranks: Vec<u32> = rows.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
        assert_eq!(rows[0].title, "Movie A");
        assert_eq!(rows[2].acquisition_rate, "60.0%");
    }

    #[test]
    fn test_duplicate_table_is_truncated() {
        let extractor = RankingExtractor::new();
        let text = "\
1 500 10 25.5 8.0 300 350 85.0% Movie A\n\
2 400 8 20.1 7.5 250 300 70.2% Movie B\n\
1 500 10 25.5 8.0 300 350 85.0% Movie A (repeat)";

        let rows = extractor.extract(text);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].title, "Movie A");
        assert_eq!(rows[1].title, "Movie B");
    }

    #[test]
    fn test_wildcards_preserved_verbatim() {
        let extractor = RankingExtractor::new();
        let rows = extractor.extract("3 * 5 10.0 6.0 * 200 50.0% Movie C");

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].rank, 3);
        assert_eq!(rows[0].seat_count, "*");
        assert_eq!(rows[0].venues_acquired, "*");
        assert_eq!(rows[0].title, "Movie C");
    }

    #[test]
    fn test_tie_marker_stripped_from_rank() {
        let extractor = RankingExtractor::new();
        let rows = extractor.extract("*4 120 3 8.0 4.0 90 100 90.0% Movie D");

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].rank, 4);
    }

    #[test]
    fn test_full_width_spaces_separate_fields() {
        let extractor = RankingExtractor::new();
        let rows = extractor.extract("1　500　10　25.5　8.0　300　350　85.0%　シン・ゴジラ");

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].seat_count, "500");
        assert_eq!(rows[0].title, "シン・ゴジラ");
    }

    #[test]
    fn test_rank_gap_is_accepted() {
        let extractor = RankingExtractor::new();
        let text = "\
1 500 10 25.5 8.0 300 350 85.0% Movie A\n\
2 400 8 20.1 7.5 250 300 70.2% Movie B\n\
4 200 4 10.0 3.0 150 180 55.0% Movie D\n\
5 100 2 5.0 2.0 100 120 40.0% Movie E";

        let ranks: Vec<u32> = extractor.extract(text).iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 4, 5]);
    }

    #[test]
    fn test_interleaved_text_is_skipped() {
        let extractor = RankingExtractor::new();
        let text = "\
デイリー座席販売数ランキング\n\
1 500 10 25.5 8.0 300 350 85.0% Movie A\n\
(集計時点のものです)\n\
2 400 8 20.1 7.5 250 300 70.2% Movie B\n\
本日のまとめ";

        let rows = extractor.extract(text);
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_title_keeps_trailing_annotation() {
        let extractor = RankingExtractor::new();
        let rows = extractor.extract("1 500 10 25.5 8.0 300 350 85.0% Movie A (4DX先行)");

        assert_eq!(rows[0].title, "Movie A (4DX先行)");
    }

    #[test]
    fn test_identical_input_identical_output() {
        let extractor = RankingExtractor::new();
        let text = "1 500 10 25.5 8.0 300 350 85.0% Movie A\n2 * 8 20.1 7.5 250 300 70.2% Movie B";
        assert_eq!(extractor.extract(text), extractor.extract(text));
    }
}
