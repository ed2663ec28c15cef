//! Simulated clock and time-of-day mapping

use bevy::prelude::*;
use chrono::NaiveTime;

/// Length of a simulated day in clock units (1 unit = 1 simulated hour)
pub const HOURS_PER_DAY: f64 = 24.0;

/// Source of the current simulated time
pub trait Clock {
    /// Elapsed simulated hours since activation, never decreasing
    fn now(&self) -> f64;
}

/// Simulation clock resource
#[derive(Resource, Debug, Clone)]
pub struct SimulationClock {
    /// Simulated hours since startup; `f64` keeps sub-poll resolution over
    /// months of simulated time
    pub elapsed: f64,
    /// Simulated hours per real second
    pub time_scale: f32,
    pub paused: bool,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self {
            elapsed: 0.0,
            time_scale: 1.0,
            paused: false,
        }
    }
}

impl SimulationClock {
    /// Clock positioned at a given elapsed time
    #[cfg(test)]
    pub fn at(elapsed: f64) -> Self {
        Self {
            elapsed,
            ..default()
        }
    }

    /// Wrapped hour of the current day
    pub fn time_of_day(&self) -> f64 {
        time_of_day(self.elapsed)
    }

    /// Number of whole days since activation
    pub fn day(&self) -> u32 {
        (self.elapsed / HOURS_PER_DAY).floor().max(0.0) as u32
    }
}

impl Clock for SimulationClock {
    fn now(&self) -> f64 {
        self.elapsed
    }
}

/// System to advance the simulated clock by scaled frame time
pub fn advance_simulation_clock(time: Res<Time>, mut clock: ResMut<SimulationClock>) {
    if clock.paused {
        return;
    }
    let scaled = (time.delta_secs_f64() * f64::from(clock.time_scale)).max(0.0);
    if scaled != 0.0 {
        clock.elapsed += scaled;
    }
}

/// Wrap an ever-increasing simulation clock into an hour of the day in [0, 24)
pub fn time_of_day(sim_clock: f64) -> f64 {
    sim_clock.rem_euclid(HOURS_PER_DAY)
}

/// Absolute clock value at which the current day (starting at the most recent
/// midnight) reaches `time_of_day`.
///
/// Passing `24.0` yields the next midnight.
pub fn sim_clock_for_time_of_day(sim_clock: f64, time_of_day: f64) -> f64 {
    let day_start = (sim_clock / HOURS_PER_DAY).floor() * HOURS_PER_DAY;
    let target = day_start + time_of_day;
    trace!(
        "time of day {:.3} on day starting at {:.3} is clock {:.3}",
        time_of_day, day_start, target
    );
    target
}

/// Render an hour of the day as `HH:MM`
pub fn format_time_of_day(time_of_day_hours: f64) -> String {
    let seconds = (time_of_day(time_of_day_hours) * 3600.0).floor() as u32;
    NaiveTime::from_num_seconds_from_midnight_opt(seconds.min(86_399), 0)
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| format!("{:.2}h", time_of_day_hours))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulation_clock_default() {
        let clock = SimulationClock::default();
        assert_eq!(clock.elapsed, 0.0);
        assert_eq!(clock.time_scale, 1.0);
        assert!(!clock.paused);
        assert_eq!(clock.now(), 0.0);
    }

    #[test]
    fn test_time_of_day_wraps() {
        assert_eq!(time_of_day(0.0), 0.0);
        assert_eq!(time_of_day(7.5), 7.5);
        assert_eq!(time_of_day(24.0), 0.0);
        assert_eq!(time_of_day(50.0), 2.0);
        // Euclidean remainder keeps negative inputs inside the day
        assert_eq!(time_of_day(-1.0), 23.0);
    }

    #[test]
    fn test_sim_clock_for_time_of_day() {
        assert_eq!(sim_clock_for_time_of_day(0.0, 7.0), 7.0);
        assert_eq!(sim_clock_for_time_of_day(12.0, 20.0), 20.0);
        assert_eq!(sim_clock_for_time_of_day(22.0, 24.0), 24.0);
        assert_eq!(sim_clock_for_time_of_day(30.0, 7.0), 31.0);
        // Targets earlier in the day land in the past
        assert_eq!(sim_clock_for_time_of_day(30.0, 2.0), 26.0);
    }

    #[test]
    fn test_clock_mapping_round_trip() {
        for clock in [0.0_f64, 13.25, 48.0, 101.7, 8_294_407.3] {
            for i in 0..240 {
                let tod = i as f64 * 0.1;
                let back = time_of_day(sim_clock_for_time_of_day(clock, tod));
                assert!(
                    (back - tod).abs() < 1e-3,
                    "round trip of {} at clock {} gave {}",
                    tod,
                    clock,
                    back
                );
            }
        }
    }

    #[test]
    fn test_poll_steps_survive_long_runs() {
        // Past the point where f32 hours can no longer take a 0.1 step
        let late = SimulationClock::at(8_294_407.0);
        assert!(late.now() + 0.1 > late.now());
        assert!((time_of_day(late.now() + 0.5) - 7.5).abs() < 1e-6);
    }

    #[test]
    fn test_day_counter() {
        assert_eq!(SimulationClock::at(0.0).day(), 0);
        assert_eq!(SimulationClock::at(23.9).day(), 0);
        assert_eq!(SimulationClock::at(24.0).day(), 1);
        assert_eq!(SimulationClock::at(75.0).day(), 3);
    }

    #[test]
    fn test_format_time_of_day() {
        assert_eq!(format_time_of_day(0.0), "00:00");
        assert_eq!(format_time_of_day(7.5), "07:30");
        assert_eq!(format_time_of_day(20.25), "20:15");
        assert_eq!(format_time_of_day(31.0), "07:00");
    }
}
