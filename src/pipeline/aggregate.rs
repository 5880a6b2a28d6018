use serde::Serialize;

use crate::pipeline::sentiment::{ScoredRecord, Sentiment};

/// A compound-score extreme together with the input line that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CompoundExtreme {
    pub compound: f64,
    pub line: usize,
}

/// Run-level statistics, computed in a single pass over the scored records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    /// Records that were scored
    pub total_records: usize,
    /// Input lines that were screened out
    pub rejected_records: usize,
    /// Label counts
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
    /// Mean of each score over the scored records (0.0 when none were scored)
    pub mean_neg: f64,
    pub mean_neu: f64,
    pub mean_pos: f64,
    pub mean_compound: f64,
    /// Lowest compound seen; the earliest line wins ties
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_compound: Option<CompoundExtreme>,
    /// Highest compound seen; the earliest line wins ties
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_compound: Option<CompoundExtreme>,
}

impl RunSummary {
    pub fn from_records(records: &[ScoredRecord], rejected_records: usize) -> Self {
        let mut positive = 0;
        let mut neutral = 0;
        let mut negative = 0;
        let mut sum_neg = 0.0;
        let mut sum_neu = 0.0;
        let mut sum_pos = 0.0;
        let mut sum_compound = 0.0;
        let mut min_compound: Option<CompoundExtreme> = None;
        let mut max_compound: Option<CompoundExtreme> = None;

        for record in records {
            match record.label {
                Sentiment::Positive => positive += 1,
                Sentiment::Neutral => neutral += 1,
                Sentiment::Negative => negative += 1,
            }

            sum_neg += record.scores.neg;
            sum_neu += record.scores.neu;
            sum_pos += record.scores.pos;
            sum_compound += record.scores.compound;

            let compound = record.scores.compound;
            if min_compound.map_or(true, |current| compound < current.compound) {
                min_compound = Some(CompoundExtreme {
                    compound,
                    line: record.line,
                });
            }
            if max_compound.map_or(true, |current| compound > current.compound) {
                max_compound = Some(CompoundExtreme {
                    compound,
                    line: record.line,
                });
            }
        }

        let denominator = records.len().max(1) as f64;
        Self {
            total_records: records.len(),
            rejected_records,
            positive,
            neutral,
            negative,
            mean_neg: sum_neg / denominator,
            mean_neu: sum_neu / denominator,
            mean_pos: sum_pos / denominator,
            mean_compound: sum_compound / denominator,
            min_compound,
            max_compound,
        }
    }

    /// Share of scored records carrying `label`, as a percentage.
    pub fn label_percentage(&self, label: Sentiment) -> f64 {
        if self.total_records == 0 {
            return 0.0;
        }
        let count = match label {
            Sentiment::Positive => self.positive,
            Sentiment::Neutral => self.neutral,
            Sentiment::Negative => self.negative,
        };
        count as f64 / self.total_records as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use crate::pipeline::sentiment::SentimentScores;

    use super::*;

    fn record(line: usize, compound: f64) -> ScoredRecord {
        let scores = SentimentScores {
            neg: if compound < 0.0 { 0.6 } else { 0.0 },
            neu: 0.4,
            pos: if compound >= 0.0 { 0.6 } else { 0.0 },
            compound,
        };
        ScoredRecord {
            line,
            id: None,
            timestamp: None,
            text: format!("record on line {}", line),
            scores,
            label: Sentiment::from_compound(compound),
        }
    }

    #[test]
    fn test_counts_follow_labels() {
        let records = vec![record(1, 0.8), record(2, -0.6), record(3, 0.0), record(4, 0.3)];
        let summary = RunSummary::from_records(&records, 2);

        assert_eq!(summary.total_records, 4);
        assert_eq!(summary.rejected_records, 2);
        assert_eq!(summary.positive, 2);
        assert_eq!(summary.negative, 1);
        assert_eq!(summary.neutral, 1);
    }

    #[test]
    fn test_means_are_arithmetic() {
        let records = vec![record(1, 0.5), record(2, -0.5)];
        let summary = RunSummary::from_records(&records, 0);

        assert!((summary.mean_compound - 0.0).abs() < 1e-12);
        assert!((summary.mean_neu - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_extremes_carry_their_line_and_first_wins_ties() {
        let records = vec![record(5, 0.9), record(9, -0.7), record(12, 0.9), record(20, -0.7)];
        let summary = RunSummary::from_records(&records, 0);

        let max = summary.max_compound.unwrap();
        let min = summary.min_compound.unwrap();
        assert_eq!(max.line, 5);
        assert_eq!(min.line, 9);
        assert!((max.compound - 0.9).abs() < 1e-12);
        assert!((min.compound + 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_empty_run_reports_zeros_without_extremes() {
        let summary = RunSummary::from_records(&[], 3);

        assert_eq!(summary.total_records, 0);
        assert_eq!(summary.rejected_records, 3);
        assert_eq!(summary.mean_compound, 0.0);
        assert!(summary.min_compound.is_none());
        assert!(summary.max_compound.is_none());
        assert_eq!(summary.label_percentage(Sentiment::Positive), 0.0);
    }

    #[test]
    fn test_percentages_cover_the_distribution() {
        let records = vec![record(1, 0.8), record(2, 0.6), record(3, -0.6), record(4, 0.0)];
        let summary = RunSummary::from_records(&records, 0);

        assert!((summary.label_percentage(Sentiment::Positive) - 50.0).abs() < 1e-12);
        assert!((summary.label_percentage(Sentiment::Negative) - 25.0).abs() < 1e-12);
        assert!((summary.label_percentage(Sentiment::Neutral) - 25.0).abs() < 1e-12);
    }
}
