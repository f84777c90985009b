use super::SnapshotImportError;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::BTreeMap;
use std::io::Read;

const USER_ID: &str = "user_id";
const ROLE: &str = "role";
const MONTH: &str = "month";
const CREATED_AT: &str = "created_at";

#[derive(Debug)]
pub(crate) struct SnapshotRow {
    pub(crate) line: u64,
    pub(crate) user_id: String,
    pub(crate) role: String,
    pub(crate) month: String,
    pub(crate) created_at: Option<DateTime<Utc>>,
    pub(crate) metrics: BTreeMap<String, f64>,
}

/// Parses a wide export: identity columns plus one column per metric.
pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<SnapshotRow>, SnapshotImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(normalize_header)
        .collect();

    let column = |name: &'static str| {
        headers
            .iter()
            .position(|header| header == name)
            .ok_or(SnapshotImportError::MissingColumn(name))
    };
    let user_id_at = column(USER_ID)?;
    let role_at = column(ROLE)?;
    let month_at = column(MONTH)?;
    let created_at_at = headers.iter().position(|header| header == CREATED_AT);

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let line = record.position().map(|position| position.line()).unwrap_or(0);
        let cell = |index: usize| record.get(index).unwrap_or("").to_string();

        let mut metrics = BTreeMap::new();
        for (index, header) in headers.iter().enumerate() {
            if [user_id_at, role_at, month_at].contains(&index) || Some(index) == created_at_at {
                continue;
            }
            let raw = record.get(index).unwrap_or("");
            if raw.is_empty() {
                continue;
            }
            match raw.parse::<f64>() {
                Ok(value) if value.is_finite() => {
                    metrics.insert(header.clone(), value);
                }
                _ => tracing::debug!(line, metric = %header, value = raw, "skipping non-numeric cell"),
            }
        }

        rows.push(SnapshotRow {
            line,
            user_id: cell(user_id_at),
            role: cell(role_at),
            month: cell(month_at),
            created_at: created_at_at
                .and_then(|index| record.get(index))
                .and_then(parse_timestamp),
            metrics,
        });
    }

    Ok(rows)
}

fn normalize_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}')
        .trim()
        .to_ascii_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
pub(crate) fn normalize_header_for_tests(raw: &str) -> String {
    normalize_header(raw)
}

#[cfg(test)]
pub(crate) fn parse_timestamp_for_tests(value: &str) -> Option<DateTime<Utc>> {
    parse_timestamp(value)
}
