//! Day/night lighting module
//!
//! Drives a scene light's brightness from the simulated time of day. The
//! controller sleeps through full day and full night and only polls while
//! the sun is rising or setting.

use bevy::prelude::*;

pub mod components;
pub mod curve;
pub mod schedule;
pub mod store;
pub mod systems;

pub use components::{ControllerStatus, DaylightController, DaylightTarget, LightTarget};
pub use curve::DaylightConfig;
pub use store::ConfigStore;
pub use systems::{activate_daylight_controllers, drive_daylight_controllers};

use crate::clock::SimulationClock;

/// Plugin for day/night light controllers
pub struct DaylightPlugin;

impl Plugin for DaylightPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulationClock>().add_systems(
            Update,
            (
                activate_daylight_controllers,
                drive_daylight_controllers::<SimulationClock>,
            )
                .chain(),
        );
    }
}
