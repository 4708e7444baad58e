//! Series construction from a model prediction.

use super::{daily_phase, hour_label, SeriesPoint, SERIES_LEN};

/// Spread the predicted scalar over 24 hours along the daily sine shape.
///
/// Amplitude is 5% of the prediction with a 200 MW floor; values are rounded
/// to 2 decimals. Deterministic given `predicted`.
pub fn series_from_prediction(predicted: f64) -> Vec<SeriesPoint> {
    let amplitude = (predicted * 0.05).max(200.0);
    (0..SERIES_LEN)
        .map(|hour| SeriesPoint {
            hour: hour_label(hour),
            demand: round2(predicted + amplitude * daily_phase(hour).sin()),
        })
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_midnight_equals_prediction() {
        // sin(0) = 0, so hour 00:00 carries the raw prediction.
        let series = series_from_prediction(60000.0);
        assert_eq!(series[0].hour, "00:00");
        assert_eq!(series[0].demand, 60000.00);
    }

    #[test]
    fn test_amplitude_is_five_percent() {
        // Hour 6 sits at sin(pi/2) = 1: prediction + amplitude.
        let series = series_from_prediction(60000.0);
        assert_eq!(series[6].demand, 63000.00);
        // Hour 18 sits at sin(3*pi/2) = -1.
        assert_eq!(series[18].demand, 57000.00);
    }

    #[test]
    fn test_amplitude_floor_of_200() {
        let series = series_from_prediction(1000.0);
        assert_eq!(series[6].demand, 1200.00);
        assert_eq!(series[18].demand, 800.00);
    }

    #[test]
    fn test_rounded_to_two_decimals() {
        for point in series_from_prediction(61234.567) {
            assert_eq!(point.demand, round2(point.demand));
        }
    }

    #[rstest]
    #[case(60000.0)]
    #[case(-500.0)]
    #[case(0.0)]
    fn test_deterministic_and_full_length(#[case] predicted: f64) {
        let a = series_from_prediction(predicted);
        let b = series_from_prediction(predicted);
        assert_eq!(a, b);
        assert_eq!(a.len(), 24);
    }
}
