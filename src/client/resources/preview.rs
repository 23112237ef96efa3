use std::time::Duration;

use bevy::prelude::*;

use crate::client::resources::drag::Overlay;

/// How long the cancelled-drop marker takes to fade out
pub const FLASH: Duration = Duration::from_millis(500);

/// Opacity of the cancelled-drop marker when it appears
const FLASH_ALPHA: f32 = 0.5;

/// Short-lived marker left on the token when a drop is cancelled.
#[derive(Clone, Debug)]
pub struct Flash {
    pub at: Vec3,
    pub timer: Timer,
}

impl Flash {
    pub fn new(at: Vec3) -> Self {
        Self { at, timer: Timer::new(FLASH, TimerMode::Once) }
    }

    pub fn alpha(&self) -> f32 {
        FLASH_ALPHA * (1. - self.timer.fraction())
    }
}

/// Everything the drag overlay should currently show.
///
/// The drag controller writes here through [`Overlay`]; rendering systems
/// read it each frame and draw gizmos or toggle entities to match.
#[derive(Clone, Debug, Default, Resource)]
pub struct Preview {
    /// Route as cell centres, shown as a curve
    pub path: Option<Vec<Vec3>>,
    pub ghost: Option<Vec3>,
    /// Centre of the blocked cell under the pointer
    pub invalid: Option<Vec3>,
    /// Tint non-walkable cells
    pub blocked: bool,
    pub flash: Option<Flash>,
}

impl Preview {
    /// Advance the cancel marker, dropping it once it has faded.
    pub fn tick(&mut self, dt: Duration) {
        let Some(flash) = &mut self.flash else { return };
        flash.timer.tick(dt);
        if flash.timer.finished() { self.flash = None }
    }
}

impl Overlay for Preview {
    fn show_path(&mut self, points: Vec<Vec3>) { self.path = Some(points) }
    fn hide_path(&mut self) { self.path = None }
    fn show_ghost(&mut self, at: Vec3) { self.ghost = Some(at) }
    fn hide_ghost(&mut self) { self.ghost = None }
    fn show_invalid(&mut self, at: Vec3) { self.invalid = Some(at) }
    fn hide_invalid(&mut self) { self.invalid = None }
    fn highlight_blocked(&mut self) { self.blocked = true }
    fn unhighlight_blocked(&mut self) { self.blocked = false }
    fn flash_cancelled(&mut self, at: Vec3) { self.flash = Some(Flash::new(at)) }
}
