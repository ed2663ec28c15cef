//! HUD systems

use bevy::prelude::*;

use crate::clock::{SimulationClock, format_time_of_day};
use crate::lighting::{ControllerStatus, DaylightController};

const MIN_TIME_SCALE: f32 = 0.25;
const MAX_TIME_SCALE: f32 = 512.0;

/// Marker for the HUD text node
#[derive(Component)]
pub struct HudText;

pub fn setup_hud(mut commands: Commands) {
    commands.spawn((
        Text::new(""),
        TextFont {
            font_size: 18.0,
            ..default()
        },
        TextColor(Color::srgb(0.9, 0.9, 0.8)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        },
        HudText,
    ));
}

/// Space pauses, `=`/`-` double or halve the time scale
pub fn handle_clock_input(input: Res<ButtonInput<KeyCode>>, mut clock: ResMut<SimulationClock>) {
    if input.just_pressed(KeyCode::Space) {
        clock.paused = !clock.paused;
        info!("Simulation clock {}", if clock.paused { "paused" } else { "resumed" });
    }

    if input.any_just_pressed([KeyCode::Equal, KeyCode::NumpadAdd]) {
        clock.time_scale = step_time_scale(clock.time_scale, true);
        info!("Time scale: {}x", clock.time_scale);
    }
    if input.any_just_pressed([KeyCode::Minus, KeyCode::NumpadSubtract]) {
        clock.time_scale = step_time_scale(clock.time_scale, false);
        info!("Time scale: {}x", clock.time_scale);
    }
}

pub fn update_hud(
    clock: Res<SimulationClock>,
    controllers: Query<&DaylightController>,
    mut texts: Query<&mut Text, With<HudText>>,
) {
    let mut lines = vec![clock_line(&clock)];
    lines.extend(controllers.iter().map(controller_line));
    let contents = lines.join("\n");

    for mut text in &mut texts {
        if text.0 != contents {
            text.0 = contents.clone();
        }
    }
}

fn step_time_scale(scale: f32, faster: bool) -> f32 {
    let next = if faster { scale * 2.0 } else { scale * 0.5 };
    next.clamp(MIN_TIME_SCALE, MAX_TIME_SCALE)
}

fn clock_line(clock: &SimulationClock) -> String {
    format!(
        "Day {} {}  x{}{}",
        clock.day() + 1,
        format_time_of_day(clock.time_of_day()),
        clock.time_scale,
        if clock.paused { " (paused)" } else { "" }
    )
}

fn controller_line(controller: &DaylightController) -> String {
    match controller.status() {
        ControllerStatus::Running => {
            let mut line = format!(
                "{}  intensity {:.2}",
                controller.phase().label(),
                controller.intensity().unwrap_or_default()
            );
            if let Some(wake_at) = controller.wake_at() {
                line.push_str(&format!("  next {}", format_time_of_day(wake_at)));
            }
            line
        }
        ControllerStatus::Pending => "waiting for light".to_string(),
        ControllerStatus::NoLight => "no light found".to_string(),
        ControllerStatus::InvalidConfig => "invalid config".to_string(),
        ControllerStatus::LostLight => "light removed".to_string(),
    }
}
