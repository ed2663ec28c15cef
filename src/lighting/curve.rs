//! Light intensity curve over a simulated day

use anyhow::ensure;
use serde::{Deserialize, Serialize};

use crate::clock::HOURS_PER_DAY;

/// Sunrise/sunset windows and the brightness levels they blend between.
///
/// Hours are wrapped times of day in [0, 24]. Windows must be ordered:
/// `sunrise_start <= sunrise_end <= sunset_start <= sunset_end`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DaylightConfig {
    pub sunrise_start: f32,
    pub sunrise_end: f32,
    pub sunset_start: f32,
    pub sunset_end: f32,
    pub day_intensity: f32,
    /// Can be above zero to leave some moonlight
    pub night_intensity: f32,
}

impl Default for DaylightConfig {
    fn default() -> Self {
        Self {
            sunrise_start: 7.0,
            sunrise_end: 8.0,
            sunset_start: 20.0,
            sunset_end: 21.0,
            day_intensity: 1.0,
            night_intensity: 0.0,
        }
    }
}

impl DaylightConfig {
    /// Same windows with both intensities multiplied by `factor`.
    ///
    /// Useful for mapping the normalized defaults onto physical light units.
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            day_intensity: self.day_intensity * factor,
            night_intensity: self.night_intensity * factor,
            ..self.clone()
        }
    }

    /// Check window ordering and intensity ranges
    pub fn validate(&self) -> anyhow::Result<()> {
        let hours = [
            ("sunrise_start", self.sunrise_start),
            ("sunrise_end", self.sunrise_end),
            ("sunset_start", self.sunset_start),
            ("sunset_end", self.sunset_end),
        ];
        for (name, hour) in hours {
            ensure!(
                hour.is_finite() && (0.0..=HOURS_PER_DAY as f32).contains(&hour),
                "{} must be an hour in [0, 24], got {}",
                name,
                hour
            );
        }
        ensure!(
            self.sunrise_start <= self.sunrise_end,
            "sunrise ends ({}) before it starts ({})",
            self.sunrise_end,
            self.sunrise_start
        );
        ensure!(
            self.sunrise_end <= self.sunset_start,
            "sunset starts ({}) before sunrise ends ({})",
            self.sunset_start,
            self.sunrise_end
        );
        ensure!(
            self.sunset_start <= self.sunset_end,
            "sunset ends ({}) before it starts ({})",
            self.sunset_end,
            self.sunset_start
        );
        for (name, value) in [
            ("day_intensity", self.day_intensity),
            ("night_intensity", self.night_intensity),
        ] {
            ensure!(
                value.is_finite() && value >= 0.0,
                "{} must be a non-negative number, got {}",
                name,
                value
            );
        }
        Ok(())
    }

    /// Target brightness at a wrapped hour of the day
    pub fn intensity_at(&self, time_of_day: f32) -> f32 {
        if time_of_day < self.sunrise_start {
            self.night_intensity
        } else if time_of_day <= self.sunrise_end {
            lerp(
                self.night_intensity,
                self.day_intensity,
                self.sunrise_start,
                self.sunrise_end,
                time_of_day,
            )
        } else if time_of_day < self.sunset_start {
            self.day_intensity
        } else if time_of_day <= self.sunset_end {
            lerp(
                self.day_intensity,
                self.night_intensity,
                self.sunset_start,
                self.sunset_end,
                time_of_day,
            )
        } else {
            self.night_intensity
        }
    }
}

/// Interpolate between two values as `t` moves from `start_time` to `end_time`.
///
/// Outside the interval the nearest endpoint value is returned. A zero-width
/// interval snaps to `end_value`.
pub fn lerp(start_value: f32, end_value: f32, start_time: f32, end_time: f32, t: f32) -> f32 {
    if t < start_time {
        return start_value;
    }
    if t > end_time || end_time <= start_time {
        return end_value;
    }
    let fraction = (t - start_time) / (end_time - start_time);
    start_value + (end_value - start_value) * fraction
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_hours(from: f32, to: f32, steps: usize) -> impl Iterator<Item = f32> {
        (0..=steps).map(move |i| from + (to - from) * i as f32 / steps as f32)
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = DaylightConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sunrise_start, 7.0);
        assert_eq!(config.sunset_end, 21.0);
        assert_eq!(config.day_intensity, 1.0);
        assert_eq!(config.night_intensity, 0.0);
    }

    #[test]
    fn test_default_curve_values() {
        let config = DaylightConfig::default();
        assert_eq!(config.intensity_at(7.0), 0.0);
        assert_eq!(config.intensity_at(7.5), 0.5);
        assert_eq!(config.intensity_at(8.0), 1.0);
        assert_eq!(config.intensity_at(12.0), 1.0);
        assert_eq!(config.intensity_at(20.5), 0.5);
        assert_eq!(config.intensity_at(22.0), 0.0);
    }

    #[test]
    fn test_flat_regions() {
        let config = DaylightConfig {
            day_intensity: 0.8,
            night_intensity: 0.1,
            ..Default::default()
        };

        for t in sample_hours(0.0, 6.99, 50) {
            assert_eq!(config.intensity_at(t), 0.1, "night before sunrise at {}", t);
        }
        for t in sample_hours(8.01, 19.99, 50) {
            assert_eq!(config.intensity_at(t), 0.8, "day at {}", t);
        }
        for t in sample_hours(21.01, 23.99, 50) {
            assert_eq!(config.intensity_at(t), 0.1, "night after sunset at {}", t);
        }
    }

    #[test]
    fn test_transition_endpoints_are_exact() {
        let config = DaylightConfig {
            day_intensity: 3.0,
            night_intensity: 0.5,
            ..Default::default()
        };
        assert_eq!(config.intensity_at(config.sunrise_start), 0.5);
        assert_eq!(config.intensity_at(config.sunrise_end), 3.0);
        assert_eq!(config.intensity_at(config.sunset_start), 3.0);
        assert_eq!(config.intensity_at(config.sunset_end), 0.5);
    }

    #[test]
    fn test_sunrise_is_monotonic_and_sunset_falls() {
        let config = DaylightConfig::default();

        let sunrise: Vec<f32> = sample_hours(7.0, 8.0, 100)
            .map(|t| config.intensity_at(t))
            .collect();
        assert!(sunrise.windows(2).all(|w| w[0] <= w[1]));

        let sunset: Vec<f32> = sample_hours(20.0, 21.0, 100)
            .map(|t| config.intensity_at(t))
            .collect();
        assert!(sunset.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_night_brighter_than_day_is_allowed() {
        let config = DaylightConfig {
            day_intensity: 0.2,
            night_intensity: 0.9,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.intensity_at(3.0), 0.9);
        assert!((config.intensity_at(7.5) - 0.55).abs() < 1e-6);
    }

    #[test]
    fn test_lerp_clamps_to_values_not_times() {
        assert_eq!(lerp(0.0, 1.0, 7.0, 8.0, 6.0), 0.0);
        assert_eq!(lerp(0.0, 1.0, 7.0, 8.0, 9.0), 1.0);
        assert_eq!(lerp(2.0, 4.0, 0.0, 10.0, 5.0), 3.0);
    }

    #[test]
    fn test_zero_width_window_stays_finite() {
        let config = DaylightConfig {
            sunrise_start: 6.0,
            sunrise_end: 6.0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        let value = config.intensity_at(6.0);
        assert!(value.is_finite());
        assert_eq!(value, config.day_intensity);
    }

    #[test]
    fn test_validate_rejects_bad_configs() {
        let out_of_order = DaylightConfig {
            sunrise_start: 9.0,
            sunrise_end: 8.0,
            ..Default::default()
        };
        assert!(out_of_order.validate().is_err());

        let overlapping = DaylightConfig {
            sunrise_end: 21.0,
            ..Default::default()
        };
        assert!(overlapping.validate().is_err());

        let past_midnight = DaylightConfig {
            sunset_end: 25.0,
            ..Default::default()
        };
        assert!(past_midnight.validate().is_err());

        let negative = DaylightConfig {
            night_intensity: -0.5,
            ..Default::default()
        };
        let err = negative.validate().unwrap_err();
        assert!(err.to_string().contains("night_intensity"));

        let nan = DaylightConfig {
            sunset_start: f32::NAN,
            ..Default::default()
        };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_scaled_keeps_windows() {
        let config = DaylightConfig::default().scaled(10_000.0);
        assert_eq!(config.day_intensity, 10_000.0);
        assert_eq!(config.night_intensity, 0.0);
        assert_eq!(config.sunrise_start, 7.0);
        assert_eq!(config.intensity_at(7.5), 5_000.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: DaylightConfig =
            serde_json::from_str(r#"{ "sunset_start": 18.5, "day_intensity": 2.0 }"#)
                .expect("partial config should parse");
        assert_eq!(config.sunset_start, 18.5);
        assert_eq!(config.day_intensity, 2.0);
        assert_eq!(config.sunrise_start, 7.0);
        assert_eq!(config.sunset_end, 21.0);
    }
}
