use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Job role a KPI history is recorded under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Employee,
    Intern,
    Freelancer,
    Hr,
    Manager,
    Operations,
}

impl Role {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Employee,
            Self::Intern,
            Self::Freelancer,
            Self::Hr,
            Self::Manager,
            Self::Operations,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Employee => "Employee",
            Self::Intern => "Intern",
            Self::Freelancer => "Freelancer",
            Self::Hr => "HR",
            Self::Manager => "Manager",
            Self::Operations => "Operations",
        }
    }

    /// Lenient parse: anything unrecognized is a standard employee.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "intern" => Self::Intern,
            "freelancer" | "contractor" => Self::Freelancer,
            "hr" | "human_resources" | "human resources" => Self::Hr,
            "manager" => Self::Manager,
            "operations" | "ops" => Self::Operations,
            _ => Self::Employee,
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Self::Employee
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Calendar month a snapshot belongs to. Orders chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Result<Self, MonthKeyError> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(Self::from_date)
            .ok_or_else(|| MonthKeyError(format!("{year:04}-{month:02}")))
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub const fn year(self) -> i32 {
        self.year
    }

    pub const fn month(self) -> u32 {
        self.month
    }

    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = MonthKeyError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let parsed = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d"));

        parsed
            .map(Self::from_date)
            .map_err(|_| MonthKeyError(trimmed.to_string()))
    }
}

impl TryFrom<String> for MonthKey {
    type Error = MonthKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthKey> for String {
    fn from(value: MonthKey) -> Self {
        value.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a valid YYYY-MM month")]
pub struct MonthKeyError(pub String);

/// One month of KPI values for a user/role pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSnapshot {
    pub user_id: UserId,
    pub role: Role,
    pub month: MonthKey,
    pub metrics: BTreeMap<String, f64>,
    pub created_at: DateTime<Utc>,
}

impl KpiSnapshot {
    /// Metric value with absent fields read as zero.
    pub fn metric(&self, name: &str) -> f64 {
        self.metrics.get(name).copied().unwrap_or(0.0)
    }

    pub fn has_metric(&self, name: &str) -> bool {
        self.metrics.contains_key(name)
    }
}

/// Raw monthly submission as delivered by the KPI form; `kpi_data` may
/// carry non-numeric fields which are dropped on conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotSubmission {
    pub month: MonthKey,
    #[serde(default)]
    pub kpi_data: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl SnapshotSubmission {
    pub fn into_snapshot(self, user_id: UserId, role: Role) -> KpiSnapshot {
        let metrics = self
            .kpi_data
            .into_iter()
            .filter_map(|(name, value)| match value.as_f64() {
                Some(number) if number.is_finite() => Some((name, number)),
                _ => {
                    tracing::debug!(metric = %name, "dropping non-numeric kpi field");
                    None
                }
            })
            .collect();

        let created_at = self.created_at.unwrap_or_else(|| {
            self.month
                .first_day()
                .and_hms_opt(0, 0, 0)
                .map(|naive| naive.and_utc())
                .unwrap_or_default()
        });

        KpiSnapshot {
            user_id,
            role,
            month: self.month,
            metrics,
            created_at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Upward,
    Downward,
    Stable,
}

impl TrendDirection {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Upward => "Upward",
            Self::Downward => "Downward",
            Self::Stable => "Stable",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightSeverity {
    Positive,
    Info,
    Warning,
}

impl InsightSeverity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Info => "Info",
            Self::Warning => "Warning",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn month_key_accepts_month_and_date_forms() {
        let month: MonthKey = "2024-03".parse().expect("parse month");
        assert_eq!(month, MonthKey::new(2024, 3).expect("valid"));
        let from_date: MonthKey = "2024-03-17".parse().expect("parse date");
        assert_eq!(from_date, month);
        assert!("2024-13".parse::<MonthKey>().is_err());
        assert!("march".parse::<MonthKey>().is_err());
    }

    #[test]
    fn month_key_orders_across_years() {
        let december = MonthKey::new(2023, 12).expect("valid");
        let january = MonthKey::new(2024, 1).expect("valid");
        assert!(december < january);
        assert_eq!(december.next(), january);
        assert_eq!(january.to_string(), "2024-01");
    }

    #[test]
    fn role_parse_falls_back_to_employee() {
        assert_eq!(Role::parse("Intern"), Role::Intern);
        assert_eq!(Role::parse(" OPS "), Role::Operations);
        assert_eq!(Role::parse(""), Role::Employee);
        assert_eq!(Role::parse("astronaut"), Role::Employee);
    }

    #[test]
    fn submission_drops_non_numeric_fields() {
        let submission: SnapshotSubmission = serde_json::from_value(json!({
            "month": "2024-02",
            "kpi_data": {
                "attendance": 92,
                "notes": "strong month",
                "initiative": 71.5,
                "flag": true
            }
        }))
        .expect("deserialize submission");

        let snapshot = submission.into_snapshot(UserId::from("u-1"), Role::Employee);
        assert_eq!(snapshot.metrics.len(), 2);
        assert_eq!(snapshot.metric("attendance"), 92.0);
        assert_eq!(snapshot.metric("notes"), 0.0);
        assert_eq!(snapshot.created_at.date_naive().to_string(), "2024-02-01");
    }
}
