//! Short-horizon continuation of a price series.
//!
//! Not a forecasting model: the goal is a chart whose "predicted" segment
//! connects smoothly to the "actual" segment and, when a target price is
//! known, lands on it exactly so the chart endpoint and the prediction card
//! never disagree.

use crate::core::price::{ChartPoint, MONTH_LABELS, PricePoint, to_display_price};
use rand::Rng;
use tracing::debug;

/// Maximum number of forecast points appended to the chart.
const MAX_FORECAST_STEPS: usize = 3;

/// Damping applied to the running average step in the target-free variant.
const STEP_DAMPING: f64 = 0.8;

/// Jitter bound in the target-free variant, as a fraction of the slice's
/// mean magnitude.
const JITTER_FRACTION: f64 = 0.02;

/// Naive trend target: extrapolates the mean first-difference one interval
/// past the last point. `None` for series shorter than two points.
pub fn trend_target(series: &[PricePoint]) -> Option<f64> {
    if series.len() < 2 {
        return None;
    }
    let step = average_step(series);
    let last = series.last()?.price as f64;
    Some((last + step).max(0.0))
}

/// Labels `slice` with calendar months from "Jan" (truncating past "Dec")
/// and appends up to three predicted points while calendar capacity
/// remains.
///
/// With a target the running value converges on it over the remaining steps
/// and the final point equals the target exactly. Without one the mean step
/// continues, damped, with a small bounded jitter. Every value is clamped to
/// zero and rounded. The input is not touched; a new chart is returned.
pub fn project(
    slice: &[PricePoint],
    target: Option<f64>,
    rng: &mut impl Rng,
) -> Vec<ChartPoint> {
    let labeled = slice.len().min(MONTH_LABELS.len());
    let mut chart: Vec<ChartPoint> = slice[..labeled]
        .iter()
        .enumerate()
        .map(|(i, p)| ChartPoint::actual(MONTH_LABELS[i], p.price))
        .collect();

    let capacity = MONTH_LABELS.len() - labeled;
    let steps = capacity.min(MAX_FORECAST_STEPS);
    let Some(last) = slice.last() else {
        return chart;
    };
    if steps == 0 {
        return chart;
    }

    let avg_step = average_step(slice);
    let mean_magnitude = slice.iter().map(|p| p.price as f64).sum::<f64>() / slice.len() as f64;
    debug!(avg_step, steps, ?target, "Projecting price series");

    let mut value = last.price as f64;
    for i in 1..=steps {
        value = match target {
            // Close a linearly shrinking share of the remaining gap; the
            // denominator hits 1 on the final step, landing on the target.
            Some(target) => value + (target - value) / (steps - i + 1) as f64,
            None => {
                value
                    + avg_step * STEP_DAMPING
                    + rng.gen_range(-JITTER_FRACTION..=JITTER_FRACTION) * mean_magnitude
            }
        };
        let rounded = to_display_price(value);
        value = rounded as f64;
        chart.push(ChartPoint::predicted(MONTH_LABELS[labeled + i - 1], rounded));
    }

    chart
}

fn average_step(series: &[PricePoint]) -> f64 {
    if series.len() < 2 {
        return 0.0;
    }
    let total: f64 = series
        .windows(2)
        .map(|w| w[1].price as f64 - w[0].price as f64)
        .sum();
    total / (series.len() - 1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn series(prices: &[u64]) -> Vec<PricePoint> {
        prices
            .iter()
            .enumerate()
            .map(|(i, p)| PricePoint::new(format!("2024-01-{:02}", i + 1), *p))
            .collect()
    }

    #[test]
    fn test_project_labels_start_at_jan() {
        let input = series(&[1000, 1010, 1020]);
        let chart = project(&input, None, &mut StdRng::seed_from_u64(1));

        assert_eq!(chart[0].label, "Jan");
        assert_eq!(chart[1].label, "Feb");
        assert_eq!(chart[2].label, "Mar");
        assert_eq!(chart[3].label, "Apr");
        assert!(chart[2].actual.is_some());
        assert!(chart[3].predicted.is_some());
    }

    #[test]
    fn test_project_emits_at_most_three_forecast_points() {
        let input = series(&[1000, 1010, 1020, 1030, 1040, 1050, 1060, 1070]);
        let chart = project(&input, None, &mut StdRng::seed_from_u64(1));

        assert_eq!(chart.len(), 11);
        let predicted = chart.iter().filter(|p| p.predicted.is_some()).count();
        assert_eq!(predicted, 3);
    }

    #[test]
    fn test_project_never_passes_december() {
        let input = series(&[1000; 11]);
        let chart = project(&input, None, &mut StdRng::seed_from_u64(1));

        // 11 historical labels leave room for exactly one forecast point.
        assert_eq!(chart.len(), 12);
        assert_eq!(chart.last().unwrap().label, "Dec");
        assert!(chart.last().unwrap().predicted.is_some());
    }

    #[test]
    fn test_project_full_slice_has_no_forecast() {
        let input = series(&[1000; 12]);
        let chart = project(&input, None, &mut StdRng::seed_from_u64(1));

        assert_eq!(chart.len(), 12);
        assert!(chart.iter().all(|p| p.predicted.is_none()));
    }

    #[test]
    fn test_project_labels_do_not_overlap() {
        let input = series(&[1000, 1100, 1050, 1200]);
        let chart = project(&input, Some(1300.0), &mut StdRng::seed_from_u64(1));

        let actual_labels: Vec<&str> = chart
            .iter()
            .filter(|p| p.actual.is_some())
            .map(|p| p.label.as_str())
            .collect();
        let predicted_labels: Vec<&str> = chart
            .iter()
            .filter(|p| p.predicted.is_some())
            .map(|p| p.label.as_str())
            .collect();
        assert!(actual_labels.iter().all(|l| !predicted_labels.contains(l)));
    }

    #[test]
    fn test_project_with_target_lands_exactly() {
        let input = series(&[1000, 1010, 1020, 1030, 1040, 1050, 1060, 1070]);
        let chart = project(&input, Some(1500.0), &mut StdRng::seed_from_u64(1));

        let final_point = chart.last().unwrap();
        assert_eq!(final_point.predicted, Some(1500));
    }

    #[test]
    fn test_project_with_target_converges_monotonically() {
        let input = series(&[1000, 1010, 1020]);
        let chart = project(&input, Some(2000.0), &mut StdRng::seed_from_u64(1));

        let predicted: Vec<u64> = chart.iter().filter_map(|p| p.predicted).collect();
        assert_eq!(predicted.len(), 3);
        assert!(predicted[0] > 1020);
        assert!(predicted[1] > predicted[0]);
        assert_eq!(predicted[2], 2000);
    }

    #[test]
    fn test_project_without_target_stays_non_negative() {
        // Steep downward trend: forecast values must clamp at zero.
        let input = series(&[900, 600, 300, 10]);
        let chart = project(&input, None, &mut StdRng::seed_from_u64(5));

        for point in &chart {
            if let Some(v) = point.predicted {
                assert!(v < 300);
            }
        }
    }

    #[test]
    fn test_project_empty_slice() {
        let chart = project(&[], None, &mut StdRng::seed_from_u64(1));
        assert!(chart.is_empty());
    }

    #[test]
    fn test_trend_target_extends_mean_step() {
        let input = series(&[1000, 1100, 1200]);
        assert_eq!(trend_target(&input), Some(1300.0));
    }

    #[test]
    fn test_trend_target_clamps_to_zero() {
        let input = series(&[500, 100]);
        assert_eq!(trend_target(&input), Some(0.0));
    }

    #[test]
    fn test_trend_target_needs_two_points() {
        assert_eq!(trend_target(&series(&[1000])), None);
        assert_eq!(trend_target(&[]), None);
    }
}
