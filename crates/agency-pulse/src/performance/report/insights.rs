use super::super::domain::{InsightSeverity, KpiSnapshot, Role};
use super::super::trend::MetricTrend;
use super::rules::{InsightRule, RuleSubject};
use super::views::Insight;
use std::collections::BTreeMap;

pub(crate) struct InsightContext<'a> {
    pub role: Role,
    pub latest: &'a KpiSnapshot,
    pub trends: &'a BTreeMap<String, MetricTrend>,
    pub current_score: f64,
    pub score_trend: Option<&'a MetricTrend>,
    pub consistency: f64,
}

impl InsightContext<'_> {
    fn value_of(&self, subject: RuleSubject) -> Option<f64> {
        match subject {
            RuleSubject::Metric(name) => self.latest.metrics.get(name).copied(),
            RuleSubject::MetricSlope(name) => self.trends.get(name).map(|trend| trend.slope),
            RuleSubject::CurrentScore => Some(self.current_score),
            RuleSubject::ScoreSlope => self.score_trend.map(|trend| trend.slope),
            RuleSubject::Consistency => Some(self.consistency),
        }
    }
}

pub(crate) fn generate_insights(
    context: &InsightContext<'_>,
    rules: &[InsightRule],
) -> (Vec<Insight>, Vec<String>) {
    let mut insights = Vec::new();
    let mut recommendations: Vec<String> = Vec::new();

    for rule in rules.iter().filter(|rule| rule.scope.includes(context.role)) {
        let Some(value) = context.value_of(rule.subject) else {
            continue;
        };
        if !rule.comparator.matches(value, rule.threshold) {
            continue;
        }

        insights.push(Insight {
            severity: rule.severity,
            metric: rule.subject.metric().map(str::to_string),
            message: rule.message.to_string(),
        });

        if let Some(recommendation) = rule.recommendation {
            if !recommendations.iter().any(|known| known == recommendation) {
                recommendations.push(recommendation.to_string());
            }
        }
    }

    if context.score_trend.is_none() {
        insights.push(Insight {
            severity: InsightSeverity::Info,
            metric: None,
            message: "Trends become available after a second monthly submission".to_string(),
        });
    }

    if insights.is_empty() {
        insights.push(Insight {
            severity: InsightSeverity::Info,
            metric: None,
            message: "Performance is steady; maintain the current cadence".to_string(),
        });
    }

    (insights, recommendations)
}
