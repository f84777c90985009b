use super::domain::KpiSnapshot;
use super::profile::RoleProfile;

/// Mean of the profile's metrics on the canonical 0-100 scale.
///
/// Absent metrics count as zero. When a snapshot carries none of the
/// profile's metrics the score falls back to the mean of every metric it
/// does carry, which keeps ad-hoc histories (e.g. a lone `quality_score`)
/// meaningful. The result is not rounded.
pub fn score(snapshot: &KpiSnapshot, profile: &RoleProfile) -> f64 {
    let metrics = profile.metrics();
    let covers_profile = metrics.iter().any(|metric| snapshot.has_metric(metric.name));

    if covers_profile {
        let total: f64 = metrics
            .iter()
            .map(|metric| metric.scale.normalize(snapshot.metric(metric.name)))
            .sum();
        return total / metrics.len() as f64;
    }

    if snapshot.metrics.is_empty() {
        return 0.0;
    }

    snapshot.metrics.values().sum::<f64>() / snapshot.metrics.len() as f64
}
