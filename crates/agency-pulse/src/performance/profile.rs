use super::domain::Role;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Native range a metric is submitted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricScale {
    /// 0 to 100.
    Percent,
    /// 1 to 10 rating used by the HR, manager and operations panels.
    Rating,
}

impl MetricScale {
    /// Converts a native value onto the canonical 0-100 score scale.
    pub fn normalize(self, value: f64) -> f64 {
        match self {
            Self::Percent => value,
            Self::Rating => value * 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileError {
    #[error("goal target for '{metric}' must be a positive number, got {target}")]
    NonPositiveTarget { metric: String, target: f64 },
}

/// Goal targets keyed by metric name. Every target is finite and positive.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GoalTargets(BTreeMap<String, f64>);

impl GoalTargets {
    pub fn new<I, K>(targets: I) -> Result<Self, ProfileError>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let mut validated = BTreeMap::new();
        for (metric, target) in targets {
            let metric = metric.into();
            if !target.is_finite() || target <= 0.0 {
                return Err(ProfileError::NonPositiveTarget { metric, target });
            }
            validated.insert(metric, target);
        }
        Ok(Self(validated))
    }

    pub fn get(&self, metric: &str) -> Option<f64> {
        self.0.get(metric).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(metric, target)| (metric.as_str(), *target))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for GoalTargets {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = BTreeMap::<String, f64>::deserialize(deserializer)?;
        GoalTargets::new(raw).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredMetric {
    pub name: &'static str,
    pub scale: MetricScale,
}

/// Metric set, scales and goal targets for one role.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleProfile {
    role: Role,
    metrics: Vec<ScoredMetric>,
    goals: GoalTargets,
}

impl RoleProfile {
    pub fn new(role: Role, metrics: Vec<ScoredMetric>, goals: GoalTargets) -> Self {
        Self {
            role,
            metrics,
            goals,
        }
    }

    /// Registry lookup. Unrecognized role strings already parse to
    /// [`Role::Employee`], so every role has exactly one profile here.
    pub fn for_role(role: Role) -> &'static RoleProfile {
        &registry()[role as usize]
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn metrics(&self) -> &[ScoredMetric] {
        &self.metrics
    }

    pub fn metric_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.metrics.iter().map(|metric| metric.name)
    }

    pub fn goal_targets(&self) -> &GoalTargets {
        &self.goals
    }
}

// Indexed by `Role` discriminant; `standard_profiles` lists roles in
// declaration order.
fn registry() -> &'static [RoleProfile] {
    static REGISTRY: OnceLock<Vec<RoleProfile>> = OnceLock::new();
    REGISTRY.get_or_init(standard_profiles)
}

fn percent(names: &[&'static str]) -> Vec<ScoredMetric> {
    scored(names, MetricScale::Percent)
}

fn rating(names: &[&'static str]) -> Vec<ScoredMetric> {
    scored(names, MetricScale::Rating)
}

fn scored(names: &[&'static str], scale: MetricScale) -> Vec<ScoredMetric> {
    names
        .iter()
        .map(|&name| ScoredMetric { name, scale })
        .collect()
}

fn goals(targets: &[(&'static str, f64)]) -> GoalTargets {
    // Literal targets below are all positive.
    GoalTargets(
        targets
            .iter()
            .map(|(metric, target)| (metric.to_string(), *target))
            .collect(),
    )
}

fn standard_profiles() -> Vec<RoleProfile> {
    vec![
        RoleProfile::new(
            Role::Employee,
            percent(&[
                "client_satisfaction",
                "attendance",
                "punctuality",
                "collaboration",
                "initiative",
                "productivity",
            ]),
            goals(&[
                ("client_satisfaction", 90.0),
                ("attendance", 95.0),
                ("punctuality", 95.0),
                ("productivity", 85.0),
            ]),
        ),
        RoleProfile::new(
            Role::Intern,
            percent(&[
                "task_completion",
                "learning_progress",
                "mentor_feedback",
                "attendance",
                "skill_development",
            ]),
            goals(&[
                ("task_completion", 90.0),
                ("learning_progress", 80.0),
                ("learning_hours", 100.0),
                ("attendance", 95.0),
            ]),
        ),
        RoleProfile::new(
            Role::Freelancer,
            percent(&[
                "deadline_adherence",
                "client_satisfaction",
                "work_quality",
                "communication",
                "project_completion",
            ]),
            goals(&[
                ("deadline_adherence", 95.0),
                ("client_satisfaction", 90.0),
                ("work_quality", 90.0),
                ("project_completion", 100.0),
            ]),
        ),
        RoleProfile::new(
            Role::Hr,
            rating(&[
                "recruitment_efficiency",
                "employee_satisfaction",
                "policy_compliance",
                "training_delivery",
                "retention_support",
            ]),
            goals(&[
                ("recruitment_efficiency", 8.0),
                ("employee_satisfaction", 8.0),
                ("policy_compliance", 9.0),
            ]),
        ),
        RoleProfile::new(
            Role::Manager,
            rating(&[
                "team_performance",
                "leadership",
                "strategic_planning",
                "decision_making",
                "communication",
            ]),
            goals(&[
                ("team_performance", 8.0),
                ("leadership", 8.0),
                ("decision_making", 8.0),
            ]),
        ),
        RoleProfile::new(
            Role::Operations,
            rating(&[
                "process_efficiency",
                "resource_utilization",
                "quality_control",
                "cost_management",
                "timeline_adherence",
            ]),
            goals(&[
                ("process_efficiency", 8.0),
                ("quality_control", 9.0),
                ("timeline_adherence", 8.0),
            ]),
        ),
    ]
}
