//! Pure scoring engine: clamp, classify and break down approved points.
//!
//! Kept free of I/O so the aggregation rules can be exercised directly;
//! persistence lives in [`super::aggregator`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domains::activities::models::CriteriaCategory;

/// Semester totals never exceed this ceiling; over-participation is capped,
/// not rejected.
pub const MAX_TOTAL: i32 = 100;

/// Letter classification derived from the clamped total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "score_classification", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Classification {
    Excellent,
    Good,
    Fair,
    Average,
    Weak,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Excellent => "EXCELLENT",
            Classification::Good => "GOOD",
            Classification::Fair => "FAIR",
            Classification::Average => "AVERAGE",
            Classification::Weak => "WEAK",
        }
    }
}

/// One approved participation's scoring inputs
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct ApprovedPoints {
    pub point_value: i32,
    pub category: CriteriaCategory,
}

/// Result of one aggregation pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreSummary {
    pub total: i32,
    pub classification: Classification,
    /// Per-category sums of the same approved set; informational only.
    /// BTreeMap keeps the serialized breakdown byte-stable across runs.
    pub breakdown: BTreeMap<&'static str, i32>,
}

/// Fixed thresholds, evaluated highest-first
pub fn classify(total: i32) -> Classification {
    if total >= 90 {
        Classification::Excellent
    } else if total >= 80 {
        Classification::Good
    } else if total >= 65 {
        Classification::Fair
    } else if total >= 50 {
        Classification::Average
    } else {
        Classification::Weak
    }
}

/// Aggregate a student's approved participations for one semester.
///
/// The raw sum is clamped to [`MAX_TOTAL`]; the breakdown keeps the
/// unclamped per-category sums.
pub fn summarize(approved: &[ApprovedPoints]) -> ScoreSummary {
    let raw_total: i32 = approved.iter().map(|p| p.point_value).sum();
    let total = raw_total.min(MAX_TOTAL);

    let mut breakdown: BTreeMap<&'static str, i32> = BTreeMap::new();
    for item in approved {
        *breakdown.entry(item.category.as_str()).or_insert(0) += item.point_value;
    }

    ScoreSummary {
        total,
        classification: classify(total),
        breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(value: i32, category: CriteriaCategory) -> ApprovedPoints {
        ApprovedPoints {
            point_value: value,
            category,
        }
    }

    #[test]
    fn classification_boundaries() {
        assert_eq!(classify(90), Classification::Excellent);
        assert_eq!(classify(89), Classification::Good);
        assert_eq!(classify(80), Classification::Good);
        assert_eq!(classify(79), Classification::Fair);
        assert_eq!(classify(65), Classification::Fair);
        assert_eq!(classify(64), Classification::Average);
        assert_eq!(classify(50), Classification::Average);
        assert_eq!(classify(49), Classification::Weak);
        assert_eq!(classify(0), Classification::Weak);
        assert_eq!(classify(100), Classification::Excellent);
    }

    #[test]
    fn total_is_clamped_at_ceiling() {
        // 10 + 95 = 105 raw, capped at 100
        let summary = summarize(&[
            points(10, CriteriaCategory::Academic),
            points(95, CriteriaCategory::Extracurricular),
        ]);
        assert_eq!(summary.total, 100);
        assert_eq!(summary.classification, Classification::Excellent);
    }

    #[test]
    fn incremental_approvals_move_the_classification() {
        // 40 alone is WEAK, approving another 15 lands on AVERAGE
        let first = summarize(&[points(40, CriteriaCategory::Academic)]);
        assert_eq!(first.total, 40);
        assert_eq!(first.classification, Classification::Weak);

        let second = summarize(&[
            points(40, CriteriaCategory::Academic),
            points(15, CriteriaCategory::Skill),
        ]);
        assert_eq!(second.total, 55);
        assert_eq!(second.classification, Classification::Average);
    }

    #[test]
    fn empty_set_is_zero_and_weak() {
        let summary = summarize(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.classification, Classification::Weak);
        assert!(summary.breakdown.is_empty());
    }

    #[test]
    fn breakdown_groups_by_category() {
        let summary = summarize(&[
            points(10, CriteriaCategory::Academic),
            points(20, CriteriaCategory::Academic),
            points(5, CriteriaCategory::Discipline),
        ]);
        assert_eq!(summary.breakdown.get("ACADEMIC"), Some(&30));
        assert_eq!(summary.breakdown.get("DISCIPLINE"), Some(&5));
        assert_eq!(summary.breakdown.get("SKILL"), None);
        assert_eq!(summary.total, 35);
    }

    #[test]
    fn summarize_is_idempotent() {
        let approved = vec![
            points(30, CriteriaCategory::Academic),
            points(25, CriteriaCategory::Skill),
        ];
        let first = summarize(&approved);
        let second = summarize(&approved);
        assert_eq!(first, second);
        // Serialized breakdowns are byte-identical as well
        assert_eq!(
            serde_json::to_string(&first.breakdown).unwrap(),
            serde_json::to_string(&second.breakdown).unwrap()
        );
    }
}
