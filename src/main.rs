use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::light::GlobalAmbientLight;
use bevy::prelude::*;
use bevy::window::{PresentMode, Window, WindowPlugin};

use bevy_panorbit_camera::{PanOrbitCamera, PanOrbitCameraPlugin};

#[cfg(feature = "dev")]
use bevy::dev_tools::fps_overlay::FpsOverlayPlugin;

mod clock;
mod hud;
mod lighting;

use clock::ClockPlugin;
use hud::HudPlugin;
use lighting::{ConfigStore, DaylightConfig, DaylightController, DaylightPlugin, DaylightTarget};

/// Illuminance of the sun at full day; config intensities are fractions of it
const FULL_DAYLIGHT_LUX: f32 = 10_000.0;

/// Config loaded from disk before the app starts
#[derive(Resource)]
struct StartupConfig(DaylightConfig);

fn load_config() -> DaylightConfig {
    match ConfigStore::new() {
        Ok(store) => store.load_or_default(),
        Err(err) => {
            warn!("Daylight config store unavailable, using defaults: {:#}", err);
            DaylightConfig::default()
        }
    }
}

// Setup scene, camera and the day/night controller
fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<StartupConfig>,
) {
    // Keep shapes faintly visible at night
    commands.insert_resource(GlobalAmbientLight {
        brightness: 80.0,
        ..default()
    });

    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(40.0, 40.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.3, 0.5, 0.3))),
    ));
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(2.0, 2.0, 2.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.8, 0.7, 0.6))),
        Transform::from_xyz(0.0, 1.0, 0.0),
    ));
    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(1.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.2, 0.4, 0.9))),
        Transform::from_xyz(4.0, 1.0, -3.0),
    ));

    commands.spawn((
        Camera3d::default(),
        Tonemapping::TonyMcMapface,
        PanOrbitCamera {
            focus: Vec3::ZERO,
            radius: Some(18.0),
            yaw: Some(0.6),
            pitch: Some(0.5),
            force_update: true,
            ..default()
        },
        Transform::from_xyz(8.0, 8.0, 14.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        DaylightTarget,
        Name::new("Sun"),
        Transform::from_xyz(10.0, 20.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        DaylightController::new(config.0.scaled(FULL_DAYLIGHT_LUX)),
        Name::new("Daylight Controller"),
    ));
}

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Day/Night Lighting".to_string(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }));

    #[cfg(feature = "dev")]
    app.add_plugins(FpsOverlayPlugin::default());

    // Logging is only available once DefaultPlugins is added
    let config = load_config();
    info!(
        "Sunrise {}-{}, sunset {}-{}",
        clock::format_time_of_day(f64::from(config.sunrise_start)),
        clock::format_time_of_day(f64::from(config.sunrise_end)),
        clock::format_time_of_day(f64::from(config.sunset_start)),
        clock::format_time_of_day(f64::from(config.sunset_end))
    );
    app.insert_resource(StartupConfig(config));

    app.add_plugins(PanOrbitCameraPlugin);
    app.add_plugins(ClockPlugin);
    app.add_plugins(DaylightPlugin);
    app.add_plugins(HudPlugin);
    app.add_systems(Startup, setup);

    app.run();
}
