//! On-screen clock readout and time controls

use bevy::prelude::*;

pub mod systems;

pub use systems::{HudText, handle_clock_input, setup_hud, update_hud};

/// Plugin for the HUD overlay
pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_hud)
            .add_systems(Update, (handle_clock_input, update_hud).chain());
    }
}
