//! Sunrise/sunset scheduling state machine
//!
//! The controller spends most of the day asleep. It wakes once at the start of
//! each transition window, polls at a short interval while the light is
//! blending, then sleeps again until the next window. Each call to
//! [`DaylightSchedule::resume`] runs phases until the next suspension point and
//! hands the wake time back to the caller.
//!
//! Every target is measured from the midnight that started the current cycle,
//! so a late wake up skips the windows it overslept instead of treating the
//! wrapped hour of the next day as part of them.

use bevy::prelude::*;

use super::curve::DaylightConfig;
use crate::clock::{HOURS_PER_DAY, sim_clock_for_time_of_day};

/// Wait between intensity updates inside a transition window, in clock units
pub const POLL_INTERVAL: f64 = 0.1;

/// Write-only handle to a light's brightness
pub trait LightSink {
    fn set_intensity(&mut self, intensity: f32);
}

/// Position of the controller in the daily cycle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DaylightPhase {
    /// Midnight until sunrise
    #[default]
    Night,
    Sunrise,
    Day,
    Sunset,
    /// After sunset until midnight
    Evening,
}

impl DaylightPhase {
    pub const COUNT: usize = 5;

    pub fn next(self) -> Self {
        match self {
            Self::Night => Self::Sunrise,
            Self::Sunrise => Self::Day,
            Self::Day => Self::Sunset,
            Self::Sunset => Self::Evening,
            Self::Evening => Self::Night,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Night => "night",
            Self::Sunrise => "sunrise",
            Self::Day => "day",
            Self::Sunset => "sunset",
            Self::Evening => "evening",
        }
    }
}

/// A suspension point reached by the schedule
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Suspension {
    /// Absolute clock value to resume at, always after the `now` it was
    /// produced for
    pub wake_at: f64,
    /// Phase the schedule continues in when resumed
    pub resume_phase: DaylightPhase,
}

impl Suspension {
    /// Clock units left to wait from `now`
    pub fn duration(&self, now: f64) -> f64 {
        self.wake_at - now
    }
}

/// Explicit form of the daily sunrise/sunset loop
#[derive(Clone, Debug, Default)]
pub struct DaylightSchedule {
    phase: DaylightPhase,
    /// Midnight that started the current cycle, set on entering `Night`
    day_start: Option<f64>,
}

impl DaylightSchedule {
    /// Schedule starting at midnight
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> DaylightPhase {
        self.phase
    }

    /// Run from the current phase until the next suspension, writing every
    /// intensity change to `light`.
    ///
    /// Phases whose absolute wake time already passed are skipped. Catching
    /// up never takes more than the rest of the current cycle plus one cycle
    /// anchored at the day containing `now`.
    pub fn resume(
        &mut self,
        config: &DaylightConfig,
        now: f64,
        light: &mut impl LightSink,
    ) -> Suspension {
        for _ in 0..2 * DaylightPhase::COUNT {
            if let Some(suspension) = self.run_phase(config, now, light) {
                self.enter(suspension.resume_phase);
                return suspension;
            }
            self.enter(self.phase.next());
        }

        // Unreachable for a valid config; back off instead of spinning
        Suspension {
            wake_at: now + POLL_INTERVAL,
            resume_phase: self.phase,
        }
    }

    fn enter(&mut self, phase: DaylightPhase) {
        if phase == DaylightPhase::Night && self.phase != DaylightPhase::Night {
            self.day_start = None;
        }
        self.phase = phase;
    }

    fn run_phase(
        &mut self,
        config: &DaylightConfig,
        now: f64,
        light: &mut impl LightSink,
    ) -> Option<Suspension> {
        let day_start = *self
            .day_start
            .get_or_insert_with(|| sim_clock_for_time_of_day(now, 0.0));
        let at = |hour: f32| day_start + f64::from(hour);

        match self.phase {
            DaylightPhase::Night => {
                light.set_intensity(config.night_intensity);
                wait_until(now, at(config.sunrise_start), DaylightPhase::Sunrise)
            }
            DaylightPhase::Sunrise => {
                poll_window(config, now, day_start, config.sunrise_end, self.phase, light)
            }
            DaylightPhase::Day => {
                light.set_intensity(config.day_intensity);
                wait_until(now, at(config.sunset_start), DaylightPhase::Sunset)
            }
            DaylightPhase::Sunset => {
                poll_window(config, now, day_start, config.sunset_end, self.phase, light)
            }
            DaylightPhase::Evening => {
                light.set_intensity(config.night_intensity);
                wait_until(now, day_start + HOURS_PER_DAY, DaylightPhase::Night)
            }
        }
    }
}

/// Sleep until the absolute `target`, or fall through if it already passed
fn wait_until(now: f64, target: f64, resume_phase: DaylightPhase) -> Option<Suspension> {
    (target > now).then_some(Suspension {
        wake_at: target,
        resume_phase,
    })
}

fn poll_window(
    config: &DaylightConfig,
    now: f64,
    day_start: f64,
    window_end: f32,
    phase: DaylightPhase,
    light: &mut impl LightSink,
) -> Option<Suspension> {
    if now >= day_start + f64::from(window_end) {
        return None;
    }
    let hour = (now - day_start) as f32;
    let intensity = config.intensity_at(hour);
    debug!("{} at {:.2}h: intensity {:.3}", phase.label(), hour, intensity);
    light.set_intensity(intensity);
    Some(Suspension {
        wake_at: now + POLL_INTERVAL,
        resume_phase: phase,
    })
}
