mod parser;

use super::domain::{KpiSnapshot, MonthKey, Role, UserId};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum SnapshotImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingColumn(&'static str),
    InvalidMonth { line: u64, value: String },
    MissingUserId { line: u64 },
}

impl std::fmt::Display for SnapshotImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotImportError::Io(err) => write!(f, "failed to read KPI export: {}", err),
            SnapshotImportError::Csv(err) => write!(f, "invalid KPI CSV data: {}", err),
            SnapshotImportError::MissingColumn(column) => {
                write!(f, "KPI export is missing the '{}' column", column)
            }
            SnapshotImportError::InvalidMonth { line, value } => {
                write!(f, "line {}: '{}' is not a YYYY-MM month", line, value)
            }
            SnapshotImportError::MissingUserId { line } => {
                write!(f, "line {}: user_id is empty", line)
            }
        }
    }
}

impl std::error::Error for SnapshotImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnapshotImportError::Io(err) => Some(err),
            SnapshotImportError::Csv(err) => Some(err),
            SnapshotImportError::MissingColumn(_)
            | SnapshotImportError::InvalidMonth { .. }
            | SnapshotImportError::MissingUserId { .. } => None,
        }
    }
}

impl From<std::io::Error> for SnapshotImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for SnapshotImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Materializes snapshot histories from a KPI CSV export.
pub struct SnapshotImporter;

impl SnapshotImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<KpiSnapshot>, SnapshotImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Snapshots grouped by user and role, each group oldest first. A later
    /// row for the same `(user_id, role, month)` replaces an earlier one.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<KpiSnapshot>, SnapshotImportError> {
        let mut keyed: BTreeMap<(UserId, Role, MonthKey), KpiSnapshot> = BTreeMap::new();

        for row in parser::parse_rows(reader)? {
            if row.user_id.is_empty() {
                return Err(SnapshotImportError::MissingUserId { line: row.line });
            }
            let month: MonthKey = row.month.parse().map_err(|_| {
                SnapshotImportError::InvalidMonth {
                    line: row.line,
                    value: row.month.clone(),
                }
            })?;
            let user_id = UserId(row.user_id);
            let role = Role::parse(&row.role);
            let created_at = row.created_at.unwrap_or_else(|| {
                month
                    .first_day()
                    .and_hms_opt(0, 0, 0)
                    .map(|naive| naive.and_utc())
                    .unwrap_or_default()
            });

            keyed.insert(
                (user_id.clone(), role, month),
                KpiSnapshot {
                    user_id,
                    role,
                    month,
                    metrics: row.metrics,
                    created_at,
                },
            );
        }

        Ok(keyed.into_values().collect())
    }

    /// The slice of an import belonging to one user under one role.
    pub fn history_for(
        snapshots: &[KpiSnapshot],
        user_id: &UserId,
        role: Role,
    ) -> Vec<KpiSnapshot> {
        snapshots
            .iter()
            .filter(|snapshot| &snapshot.user_id == user_id && snapshot.role == role)
            .cloned()
            .collect()
    }
}
