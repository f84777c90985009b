use super::domain::KpiSnapshot;
use super::percent::clamped_percent;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricComparison {
    pub current: f64,
    pub previous: f64,
    pub change: f64,
    pub change_percent: u8,
}

/// Month-over-month comparison for every metric on `latest`.
///
/// A previous value of zero (or a missing previous snapshot) reports a
/// `change_percent` of 0, so a metric going from 0 to any positive value
/// shows no percentage movement; `change` still carries the delta.
pub fn compare(
    latest: &KpiSnapshot,
    previous: Option<&KpiSnapshot>,
) -> BTreeMap<String, MetricComparison> {
    latest
        .metrics
        .iter()
        .map(|(metric, &current)| {
            let prior = previous.map(|snapshot| snapshot.metric(metric)).unwrap_or(0.0);
            let change = current - prior;
            let comparison = MetricComparison {
                current,
                previous: prior,
                change,
                change_percent: clamped_percent(change, prior),
            };
            (metric.clone(), comparison)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::performance::domain::{MonthKey, Role, UserId};
    use chrono::Utc;

    fn snapshot(month: u32, metrics: &[(&str, f64)]) -> KpiSnapshot {
        KpiSnapshot {
            user_id: UserId::from("u-7"),
            role: Role::Freelancer,
            month: MonthKey::new(2024, month).expect("valid month"),
            metrics: metrics
                .iter()
                .map(|(name, value)| (name.to_string(), *value))
                .collect(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn reports_delta_and_rounded_percent() {
        let previous = snapshot(1, &[("deadline_adherence", 80.0)]);
        let latest = snapshot(2, &[("deadline_adherence", 90.0)]);
        let result = compare(&latest, Some(&previous));
        let entry = result["deadline_adherence"];
        assert_eq!(entry.current, 90.0);
        assert_eq!(entry.previous, 80.0);
        assert_eq!(entry.change, 10.0);
        assert_eq!(entry.change_percent, 13);
    }

    #[test]
    fn zero_previous_never_reports_percent() {
        let previous = snapshot(1, &[("work_quality", 0.0)]);
        let latest = snapshot(2, &[("work_quality", 75.0), ("communication", 60.0)]);
        let result = compare(&latest, Some(&previous));
        assert_eq!(result["work_quality"].change_percent, 0);
        assert_eq!(result["work_quality"].change, 75.0);
        assert_eq!(result["communication"].previous, 0.0);
        assert_eq!(result["communication"].change_percent, 0);
    }

    #[test]
    fn missing_previous_snapshot_compares_against_zero() {
        let latest = snapshot(2, &[("work_quality", 75.0)]);
        let result = compare(&latest, None);
        assert_eq!(result["work_quality"].previous, 0.0);
        assert_eq!(result["work_quality"].change, 75.0);
        assert_eq!(result["work_quality"].change_percent, 0);
    }

    #[test]
    fn declines_keep_signed_change_with_clamped_percent() {
        let previous = snapshot(1, &[("communication", 80.0)]);
        let latest = snapshot(2, &[("communication", 60.0)]);
        let result = compare(&latest, Some(&previous));
        assert_eq!(result["communication"].change, -20.0);
        assert_eq!(result["communication"].change_percent, 0);
    }

    #[test]
    fn only_metrics_on_latest_are_compared() {
        let previous = snapshot(1, &[("communication", 80.0), ("retired_metric", 5.0)]);
        let latest = snapshot(2, &[("communication", 88.0)]);
        let result = compare(&latest, Some(&previous));
        assert_eq!(result.len(), 1);
        assert!(!result.contains_key("retired_metric"));
    }
}
