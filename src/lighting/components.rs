//! Day/night controller components

use bevy::prelude::*;

use super::curve::DaylightConfig;
use super::schedule::{DaylightPhase, DaylightSchedule};

/// Marker for lights a [`LightTarget::Tagged`] controller may drive
#[derive(Component, Default)]
pub struct DaylightTarget;

/// How a controller picks the light it drives
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LightTarget {
    /// First light carrying [`DaylightTarget`]
    #[default]
    Tagged,
    /// First light of any kind in the scene
    AnyLight,
    /// A specific light entity
    Entity(Entity),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ControllerStatus {
    /// Waiting for its light to be resolved
    #[default]
    Pending,
    Running,
    /// No matching light existed at activation; the loop never started
    NoLight,
    /// Config failed validation; the loop never started
    InvalidConfig,
    /// The driven light was despawned
    LostLight,
}

/// Drives one light's brightness through the day/night cycle
#[derive(Component, Debug, Clone)]
pub struct DaylightController {
    pub(crate) config: DaylightConfig,
    pub(crate) target: LightTarget,
    pub(crate) light: Option<Entity>,
    pub(crate) schedule: DaylightSchedule,
    /// Clock value of the next wake up; `None` resumes on the next frame
    pub(crate) wake_at: Option<f64>,
    pub(crate) status: ControllerStatus,
    pub(crate) intensity: Option<f32>,
}

impl DaylightController {
    pub fn new(config: DaylightConfig) -> Self {
        Self {
            config,
            target: LightTarget::default(),
            light: None,
            schedule: DaylightSchedule::new(),
            wake_at: None,
            status: ControllerStatus::Pending,
            intensity: None,
        }
    }

    pub fn with_target(mut self, target: LightTarget) -> Self {
        self.target = target;
        self
    }

    pub fn config(&self) -> &DaylightConfig {
        &self.config
    }

    pub fn target(&self) -> LightTarget {
        self.target
    }

    /// Light resolved at activation
    pub fn light(&self) -> Option<Entity> {
        self.light
    }

    pub fn status(&self) -> ControllerStatus {
        self.status
    }

    pub fn phase(&self) -> DaylightPhase {
        self.schedule.phase()
    }

    pub fn wake_at(&self) -> Option<f64> {
        self.wake_at
    }

    /// Last intensity written to the light
    pub fn intensity(&self) -> Option<f32> {
        self.intensity
    }
}

impl Default for DaylightController {
    fn default() -> Self {
        Self::new(DaylightConfig::default())
    }
}
