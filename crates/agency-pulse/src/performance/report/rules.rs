use super::super::domain::{InsightSeverity, Role};

/// Value an insight rule is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleSubject {
    /// Latest submitted value of a metric. Unsubmitted metrics never match.
    Metric(&'static str),
    /// Least-squares slope of a metric across the history.
    MetricSlope(&'static str),
    CurrentScore,
    ScoreSlope,
    Consistency,
}

impl RuleSubject {
    pub const fn metric(self) -> Option<&'static str> {
        match self {
            Self::Metric(name) | Self::MetricSlope(name) => Some(name),
            Self::CurrentScore | Self::ScoreSlope | Self::Consistency => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Above,
    AtLeast,
    Below,
    AtMost,
}

impl Comparator {
    pub fn matches(self, value: f64, threshold: f64) -> bool {
        match self {
            Self::Above => value > threshold,
            Self::AtLeast => value >= threshold,
            Self::Below => value < threshold,
            Self::AtMost => value <= threshold,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleScope {
    All,
    Only(Role),
}

impl RoleScope {
    pub fn includes(self, role: Role) -> bool {
        match self {
            Self::All => true,
            Self::Only(scoped) => scoped == role,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InsightRule {
    pub scope: RoleScope,
    pub subject: RuleSubject,
    pub comparator: Comparator,
    pub threshold: f64,
    pub severity: InsightSeverity,
    pub message: &'static str,
    pub recommendation: Option<&'static str>,
}

const fn rule(
    scope: RoleScope,
    subject: RuleSubject,
    comparator: Comparator,
    threshold: f64,
    severity: InsightSeverity,
    message: &'static str,
    recommendation: Option<&'static str>,
) -> InsightRule {
    InsightRule {
        scope,
        subject,
        comparator,
        threshold,
        severity,
        message,
        recommendation,
    }
}

use Comparator::{AtLeast, Below};
use InsightSeverity::{Positive, Warning};
use RoleScope::{All, Only};
use RuleSubject::{Consistency, CurrentScore, Metric, MetricSlope, ScoreSlope};

/// Rules are evaluated in order; recommendations keep first-seen order.
/// Thresholds for HR, manager and operations metrics are on the 1-10
/// rating scale those panels submit.
#[rustfmt::skip]
pub static INSIGHT_RULES: &[InsightRule] = &[
    // every role
    rule(All, ScoreSlope, Comparator::Above, 0.0, Positive,
        "Overall performance is trending upward", None),
    rule(All, ScoreSlope, Below, 0.0, Warning,
        "Overall performance is trending downward",
        Some("Schedule a check-in to identify blockers behind the declining trend")),
    rule(All, CurrentScore, AtLeast, 85.0, Positive,
        "Performing at an excellent level", None),
    rule(All, CurrentScore, Below, 60.0, Warning,
        "Overall score is below expectations",
        Some("Agree on a focused improvement plan for the coming month")),
    rule(All, Consistency, Below, 70.0, Warning,
        "Month-to-month performance is inconsistent",
        Some("Set steadier monthly targets and review progress mid-month")),
    // standard employee
    rule(Only(Role::Employee), Metric("attendance"), Below, 85.0, Warning,
        "Attendance is below expectations",
        Some("Discuss attendance patterns and any support needed")),
    rule(Only(Role::Employee), Metric("punctuality"), Below, 80.0, Warning,
        "Punctuality needs attention",
        Some("Agree on start-time expectations and revisit them next month")),
    rule(Only(Role::Employee), Metric("initiative"), AtLeast, 85.0, Positive,
        "Shows strong initiative", None),
    rule(Only(Role::Employee), MetricSlope("productivity"), Comparator::Above, 0.0, Positive,
        "Productivity is improving month over month", None),
    // intern
    rule(Only(Role::Intern), Metric("learning_hours"), Comparator::Above, 80.0, Positive,
        "Strong learning commitment", None),
    rule(Only(Role::Intern), Metric("learning_hours"), Below, 20.0, Warning,
        "Learning hours are low",
        Some("Block dedicated weekly time for structured learning")),
    rule(Only(Role::Intern), Metric("task_completion"), Below, 70.0, Warning,
        "Task completion needs attention",
        Some("Break assignments into smaller milestones with mentor check-ins")),
    rule(Only(Role::Intern), Metric("mentor_feedback"), AtLeast, 85.0, Positive,
        "Mentors rate this intern highly", None),
    // freelancer
    rule(Only(Role::Freelancer), Metric("deadline_adherence"), Below, 70.0, Warning,
        "Deadline adherence needs attention",
        Some("Review project scoping and add buffer time to estimates")),
    rule(Only(Role::Freelancer), Metric("deadline_adherence"), AtLeast, 95.0, Positive,
        "Consistently delivers on schedule", None),
    rule(Only(Role::Freelancer), Metric("client_satisfaction"), AtLeast, 90.0, Positive,
        "Clients are highly satisfied", None),
    rule(Only(Role::Freelancer), MetricSlope("client_satisfaction"), Below, 0.0, Warning,
        "Client satisfaction is slipping",
        Some("Collect client feedback after each milestone")),
    // hr
    rule(Only(Role::Hr), Metric("employee_satisfaction"), Below, 6.0, Warning,
        "Employee satisfaction is low",
        Some("Run a pulse survey to locate satisfaction gaps")),
    rule(Only(Role::Hr), Metric("policy_compliance"), AtLeast, 9.0, Positive,
        "Policy compliance is exemplary", None),
    // manager
    rule(Only(Role::Manager), Metric("team_performance"), Below, 6.0, Warning,
        "Team performance needs attention",
        Some("Pair team goals with weekly progress reviews")),
    rule(Only(Role::Manager), Metric("leadership"), AtLeast, 8.0, Positive,
        "Leadership is rated highly", None),
    // operations
    rule(Only(Role::Operations), Metric("process_efficiency"), Below, 6.0, Warning,
        "Process efficiency is lagging",
        Some("Map the slowest workflow and remove one manual hand-off")),
    rule(Only(Role::Operations), MetricSlope("cost_management"), Below, 0.0, Warning,
        "Cost management is trending down",
        Some("Review recurring spend with finance before the next cycle")),
    rule(Only(Role::Operations), Metric("quality_control"), AtLeast, 9.0, Positive,
        "Quality control is excellent", None),
];
