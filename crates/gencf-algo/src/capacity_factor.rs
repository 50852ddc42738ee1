//! Capacity factor: actual generation as a share of nameplate potential.
//!
//! ```text
//! CF% = generation_MWh / (capacity_MW × 24 × days) × 100
//! ```
//!
//! The window length comes from the run's [`ReportingPeriod`], never from a
//! hard-coded month.

use gencf_core::units::{MegawattHours, Megawatts};
use gencf_core::ReportingPeriod;

/// Capacity factor in percent, or `None` when it cannot be derived.
///
/// Absent when capacity is missing, non-finite, zero or negative, or when
/// generation is missing or non-finite.
pub fn capacity_factor_percent(
    capacity_mw: Option<f64>,
    generation_mwh: Option<f64>,
    period: &ReportingPeriod,
) -> Option<f64> {
    let capacity = Megawatts(capacity_mw.filter(|mw| mw.is_finite() && *mw > 0.0)?);
    let generation = MegawattHours(generation_mwh.filter(|mwh| mwh.is_finite())?);
    let hours = period.hours();
    if hours.value() <= 0.0 {
        return None;
    }
    let possible = capacity * hours;
    Some(generation / possible * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feb_2025() -> ReportingPeriod {
        "2025-02".parse().unwrap()
    }

    #[test]
    fn half_output_over_28_days_is_fifty_percent() {
        let cf = capacity_factor_percent(Some(100.0), Some(33_600.0), &feb_2025());
        assert_eq!(cf, Some(50.0));
    }

    #[test]
    fn absent_without_positive_capacity_or_generation() {
        let period = feb_2025();
        assert_eq!(capacity_factor_percent(None, Some(1.0), &period), None);
        assert_eq!(capacity_factor_percent(Some(0.0), Some(1.0), &period), None);
        assert_eq!(capacity_factor_percent(Some(-5.0), Some(1.0), &period), None);
        assert_eq!(capacity_factor_percent(Some(f64::NAN), Some(1.0), &period), None);
        assert_eq!(capacity_factor_percent(Some(10.0), None, &period), None);
    }

    #[test]
    fn period_length_changes_the_denominator() {
        let march: ReportingPeriod = "2025-03".parse().unwrap();
        let cf = capacity_factor_percent(Some(10.0), Some(7_440.0), &march).unwrap();
        assert!((cf - 100.0).abs() < 1e-9);

        let pinned = march.with_days(10).unwrap();
        let cf = capacity_factor_percent(Some(10.0), Some(1_200.0), &pinned).unwrap();
        assert!((cf - 50.0).abs() < 1e-9);
    }

    #[test]
    fn values_above_one_hundred_are_reported_as_is() {
        let cf = capacity_factor_percent(Some(1.0), Some(1_344.0), &feb_2025()).unwrap();
        assert!((cf - 200.0).abs() < 1e-9);
    }
}
