/// Rounds `numerator / denominator * 100` and clamps it into `[0, 100]`.
/// A non-positive denominator yields 0.
pub(crate) fn clamped_percent(numerator: f64, denominator: f64) -> u8 {
    if denominator <= 0.0 {
        return 0;
    }

    let percent = (numerator / denominator * 100.0).round();
    if percent.is_nan() {
        return 0;
    }
    percent.clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::clamped_percent;

    #[test]
    fn rounds_half_up_for_positive_ratios() {
        assert_eq!(clamped_percent(20.0, 60.0), 33);
        assert_eq!(clamped_percent(1.0, 8.0), 13);
    }

    #[test]
    fn guards_division_by_zero() {
        assert_eq!(clamped_percent(25.0, 0.0), 0);
        assert_eq!(clamped_percent(25.0, -4.0), 0);
    }

    #[test]
    fn clamps_into_percentage_range() {
        assert_eq!(clamped_percent(99.0, 90.0), 100);
        assert_eq!(clamped_percent(-10.0, 50.0), 0);
    }
}
