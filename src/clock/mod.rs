//! Simulated clock module
//!
//! Provides the simulation clock resource that drives the day/night cycle and
//! the helpers that map it onto a 24 hour time of day.

use bevy::prelude::*;

pub mod time;

pub use time::{
    Clock, HOURS_PER_DAY, SimulationClock, advance_simulation_clock, format_time_of_day,
    sim_clock_for_time_of_day, time_of_day,
};

/// Plugin for the simulated clock
pub struct ClockPlugin;

impl Plugin for ClockPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulationClock>()
            .add_systems(PreUpdate, advance_simulation_clock);
    }
}
