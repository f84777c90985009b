use super::super::comparison::MetricComparison;
use super::super::domain::{InsightSeverity, MonthKey, Role, TrendDirection, UserId};
use super::super::goals::GoalProgress;
use super::super::trend::MetricTrend;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub current_score: f64,
    pub previous_score: f64,
    pub best_score: f64,
    pub average_score: f64,
    pub improvement: f64,
    pub improvement_percent: u8,
    pub consistency_score: f64,
    /// `None` until at least two months are on record.
    pub score_trend: Option<TrendDirection>,
    pub total_data_points: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub severity: InsightSeverity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBreakdownEntry {
    pub month: MonthKey,
    pub score: f64,
    pub has_submission: bool,
}

/// Everything derived from one user's KPI history under one role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub user_id: UserId,
    pub role: Role,
    pub summary: ReportSummary,
    pub trends: BTreeMap<String, MetricTrend>,
    #[serde(default)]
    pub insights: Vec<Insight>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    /// Newest month first.
    pub monthly_breakdown: Vec<MonthlyBreakdownEntry>,
    pub comparative_analysis: BTreeMap<String, MetricComparison>,
    pub goal_tracking: BTreeMap<String, GoalProgress>,
}
