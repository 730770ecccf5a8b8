use crate::bootstrap::Emotion;
use itertools::Itertools;
use overload::overload;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops;

// Final ratings sit on a 0.1 grid, so differences carry float noise of this order
const EPS: f64 = 1e-9;

/// How closely two seedings agree on one film's final rating.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Agreement {
    Identical,
    Rounding,
    Acceptable,
    Significant,
}

impl Agreement {
    pub const ALL: [Agreement; 4] = [
        Agreement::Identical,
        Agreement::Rounding,
        Agreement::Acceptable,
        Agreement::Significant,
    ];

    pub fn classify(difference: f64) -> Self {
        let difference = difference.abs();
        if difference < EPS {
            Self::Identical
        } else if difference <= 0.1 + EPS {
            Self::Rounding
        } else if difference <= 0.5 + EPS {
            Self::Acceptable
        } else {
            Self::Significant
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Excellent,
    Good,
    Acceptable,
    NeedsInvestigation,
}

// Running count, sum and range of absolute differences
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DifferenceStats {
    pub count: usize,
    pub sum: f64,
    pub max: f64,
    pub min: f64,
}

impl Default for DifferenceStats {
    fn default() -> Self {
        Self {
            count: 0,
            sum: 0.,
            max: f64::NEG_INFINITY,
            min: f64::INFINITY,
        }
    }
}

impl DifferenceStats {
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }

    pub fn max(&self) -> Option<f64> {
        (self.count > 0).then_some(self.max)
    }

    pub fn min(&self) -> Option<f64> {
        (self.count > 0).then_some(self.min)
    }
}

overload!((a: &mut DifferenceStats) += (b: f64) {
    let b = b.abs();
    a.count += 1;
    a.sum += b;
    a.max = a.max.max(b);
    a.min = a.min.min(b);
});

overload!((a: ?DifferenceStats) + (b: ?DifferenceStats) -> DifferenceStats {
    DifferenceStats {
        count: a.count + b.count,
        sum: a.sum + b.sum,
        max: a.max.max(b.max),
        min: a.min.min(b.min),
    }
});

impl FromIterator<f64> for DifferenceStats {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut stats = Self::default();
        for difference in iter {
            stats += difference;
        }
        stats
    }
}

/// Agreement between two seedings over a whole scenario set.
#[derive(Clone, Debug, Default)]
pub struct ComparisonReport {
    pub agreement_counts: BTreeMap<Agreement, usize>,
    pub overall: DifferenceStats,
    pub by_emotion: BTreeMap<Emotion, DifferenceStats>,
}

impl ComparisonReport {
    /// Builds a report from each film's emotion and the difference between its two final ratings.
    pub fn from_differences(differences: &[(Emotion, f64)]) -> Self {
        let agreement_counts = differences
            .iter()
            .map(|&(_, difference)| Agreement::classify(difference))
            .counts()
            .into_iter()
            .collect();
        let overall = differences.iter().map(|&(_, d)| d).collect();
        let by_emotion = differences
            .iter()
            .into_group_map_by(|&&(emotion, _)| emotion)
            .into_iter()
            .map(|(emotion, group)| (emotion, group.into_iter().map(|&(_, d)| d).collect()))
            .collect();
        Self {
            agreement_counts,
            overall,
            by_emotion,
        }
    }

    pub fn count(&self, agreement: Agreement) -> usize {
        self.agreement_counts.get(&agreement).copied().unwrap_or(0)
    }

    pub fn verdict(&self) -> Verdict {
        let total = self.overall.count;
        let identical = self.count(Agreement::Identical);
        if total > 0 && identical * 5 >= total * 4 {
            Verdict::Excellent
        } else if total > 0 && identical * 5 >= total * 3 {
            Verdict::Good
        } else if self.count(Agreement::Significant) == 0 {
            Verdict::Acceptable
        } else {
            Verdict::NeedsInvestigation
        }
    }
}

impl fmt::Display for ComparisonReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts = Agreement::ALL
            .iter()
            .map(|&agreement| format!("{:?}={}", agreement, self.count(agreement)))
            .join(" ");
        write!(
            f,
            "{} films: {} (mean {:.3}, max {:.3}, min {:.3}) => {:?}",
            self.overall.count,
            counts,
            self.overall.mean().unwrap_or(0.),
            self.overall.max().unwrap_or(0.),
            self.overall.min().unwrap_or(0.),
            self.verdict()
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(Agreement::classify(0.), Agreement::Identical);
        // 7.3 - 7.2 is not exactly 0.1 in floating point
        assert_eq!(Agreement::classify(7.3 - 7.2), Agreement::Rounding);
        assert_eq!(Agreement::classify(-0.4), Agreement::Acceptable);
        assert_eq!(Agreement::classify(8.9 - 8.4), Agreement::Acceptable);
        assert_eq!(Agreement::classify(1.7), Agreement::Significant);
    }

    #[test]
    fn test_stats_accumulate() {
        let a: DifferenceStats = [0.2, 0.4].into_iter().collect();
        let b: DifferenceStats = [1.2].into_iter().collect();
        let merged = a + b;
        assert_eq!(merged.count, 3);
        assert!((merged.mean().unwrap() - 0.6).abs() < 1e-12);
        assert_eq!(merged.max(), Some(1.2));
        assert_eq!(merged.min(), Some(0.2));
        assert_eq!(DifferenceStats::default().mean(), None);
    }

    #[test]
    fn test_report_groups_by_emotion() {
        let report = ComparisonReport::from_differences(&[
            (Emotion::Loved, 0.),
            (Emotion::Loved, 1.7),
            (Emotion::Disliked, 0.3),
        ]);
        assert_eq!(report.count(Agreement::Identical), 1);
        assert_eq!(report.count(Agreement::Significant), 1);
        assert_eq!(report.count(Agreement::Rounding), 0);
        assert_eq!(report.by_emotion[&Emotion::Loved].count, 2);
        assert_eq!(report.by_emotion[&Emotion::Loved].max(), Some(1.7));
        assert!(!report.by_emotion.contains_key(&Emotion::Liked));
        assert_eq!(report.verdict(), Verdict::NeedsInvestigation);
    }

    #[test]
    fn test_verdict_thresholds() {
        let verdict = |diffs: &[f64]| {
            let rows: Vec<_> = diffs.iter().map(|&d| (Emotion::Liked, d)).collect();
            ComparisonReport::from_differences(&rows).verdict()
        };
        assert_eq!(verdict(&[0., 0., 0., 0., 2.]), Verdict::Excellent);
        assert_eq!(verdict(&[0., 0., 0., 2., 2.]), Verdict::Good);
        assert_eq!(verdict(&[0., 0.1, 0.3, 0.5, 0.]), Verdict::Acceptable);
        assert_eq!(verdict(&[0., 0.1, 0.3, 0.9, 0.]), Verdict::NeedsInvestigation);
        assert_eq!(verdict(&[]), Verdict::Acceptable);
    }
}
