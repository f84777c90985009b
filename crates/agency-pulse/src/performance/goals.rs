use super::domain::KpiSnapshot;
use super::percent::clamped_percent;
use super::profile::GoalTargets;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    pub current: f64,
    pub target: f64,
    pub percent: u8,
    pub achieved: bool,
}

/// Completion of each goal on the latest snapshot. Missing metrics count
/// as zero progress.
pub fn progress(latest: &KpiSnapshot, goals: &GoalTargets) -> BTreeMap<String, GoalProgress> {
    goals
        .iter()
        .map(|(metric, target)| {
            let current = latest.metric(metric);
            let entry = GoalProgress {
                current,
                target,
                percent: clamped_percent(current, target),
                achieved: current >= target,
            };
            (metric.to_string(), entry)
        })
        .collect()
}
