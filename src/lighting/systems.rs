//! Systems that resolve controller lights and run their schedules

use bevy::prelude::*;

use super::components::{ControllerStatus, DaylightController, DaylightTarget, LightTarget};
use super::schedule::LightSink;
use crate::clock::{Clock, format_time_of_day};

/// Filter matching every light kind a controller can drive
pub type LightFilter = Or<(With<DirectionalLight>, With<PointLight>, With<SpotLight>)>;

/// Mutable view of whichever light component an entity carries
pub struct SceneLight<'w> {
    directional: Option<Mut<'w, DirectionalLight>>,
    point: Option<Mut<'w, PointLight>>,
    spot: Option<Mut<'w, SpotLight>>,
    last_written: Option<f32>,
}

impl<'w> SceneLight<'w> {
    pub fn new(
        directional: Option<Mut<'w, DirectionalLight>>,
        point: Option<Mut<'w, PointLight>>,
        spot: Option<Mut<'w, SpotLight>>,
    ) -> Self {
        Self {
            directional,
            point,
            spot,
            last_written: None,
        }
    }

    pub fn last_written(&self) -> Option<f32> {
        self.last_written
    }
}

impl LightSink for SceneLight<'_> {
    fn set_intensity(&mut self, intensity: f32) {
        self.last_written = Some(intensity);

        // Compare first so idle wake ups don't mark the light as changed
        if let Some(light) = self.directional.as_mut()
            && light.illuminance != intensity
        {
            light.illuminance = intensity;
        }
        if let Some(light) = self.point.as_mut()
            && light.intensity != intensity
        {
            light.intensity = intensity;
        }
        if let Some(light) = self.spot.as_mut()
            && light.intensity != intensity
        {
            light.intensity = intensity;
        }
    }
}

/// Resolve the light of every pending controller, once.
pub fn activate_daylight_controllers(
    mut controllers: Query<(Entity, &mut DaylightController)>,
    all_lights: Query<Entity, LightFilter>,
    tagged_lights: Query<Entity, (With<DaylightTarget>, LightFilter)>,
) {
    for (entity, mut controller) in &mut controllers {
        if controller.status != ControllerStatus::Pending {
            continue;
        }

        if let Err(err) = controller.config().validate() {
            error!("daylight controller {:?}: invalid config: {:#}", entity, err);
            controller.status = ControllerStatus::InvalidConfig;
            continue;
        }

        // Lowest entity wins so selection doesn't depend on archetype order
        let light = match controller.target() {
            LightTarget::Tagged => tagged_lights.iter().min(),
            LightTarget::AnyLight => all_lights.iter().min(),
            LightTarget::Entity(light) => all_lights.get(light).ok(),
        };

        match light {
            Some(light) => {
                info!(
                    "daylight controller {:?}: driving light {:?}",
                    entity, light
                );
                controller.light = Some(light);
                controller.wake_at = None;
                controller.status = ControllerStatus::Running;
            }
            None => {
                warn!(
                    "daylight controller {:?}: no light found for {:?}, not starting",
                    entity,
                    controller.target()
                );
                controller.status = ControllerStatus::NoLight;
            }
        }
    }
}

/// Resume every running controller whose wake time has come
pub fn drive_daylight_controllers<C: Clock + Resource>(
    clock: Res<C>,
    mut controllers: Query<(Entity, &mut DaylightController)>,
    mut lights: Query<AnyOf<(&mut DirectionalLight, &mut PointLight, &mut SpotLight)>>,
) {
    let now = clock.now();

    for (entity, controller) in &mut controllers {
        if controller.status != ControllerStatus::Running {
            continue;
        }
        if controller.wake_at.is_some_and(|wake_at| now < wake_at) {
            continue;
        }
        let Some(light_entity) = controller.light() else {
            continue;
        };

        let controller = controller.into_inner();
        let Ok((directional, point, spot)) = lights.get_mut(light_entity) else {
            warn!(
                "daylight controller {:?}: light {:?} is gone, stopping",
                entity, light_entity
            );
            controller.status = ControllerStatus::LostLight;
            controller.wake_at = None;
            continue;
        };

        let mut sink = SceneLight::new(directional, point, spot);
        let suspension = controller.schedule.resume(&controller.config, now, &mut sink);
        if let Some(intensity) = sink.last_written() {
            controller.intensity = Some(intensity);
        }
        controller.wake_at = Some(suspension.wake_at);

        if suspension.duration(now) > 1.0 {
            debug!(
                "daylight controller {:?}: sleeping until {} ({})",
                entity,
                format_time_of_day(suspension.wake_at),
                suspension.resume_phase.label()
            );
        }
    }
}
