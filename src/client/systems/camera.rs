use std::f32::consts::PI;

use bevy::{input::mouse::AccumulatedMouseScroll, prelude::*};

use crate::common::{components::Token, resources::map::Map};

/// Vertical field of view
pub const FOV: f32 = 75. * PI / 180.;

const ZOOM_MIN: f32 = 0.5;
const ZOOM_MAX: f32 = 2.;
/// Zoom change per wheel line
const ZOOM_STEP: f32 = 0.1;

/// Top-down follow camera state.
///
/// The camera hangs above the token, shifted by a pan `offset` the player sets
/// by dragging the empty board. Movement starting snaps it back over the token.
#[derive(Clone, Copy, Debug, Resource)]
pub struct CameraRig {
    /// Height above the board at zoom 1
    pub base: f32,
    pub offset: Vec3,
    pub zoom: f32,
    /// A drag on the empty board is in progress
    pub panning: bool,
}

impl CameraRig {
    pub fn new(base: f32) -> Self {
        Self { base, offset: Vec3::ZERO, zoom: 1., panning: false }
    }

    pub fn height(&self) -> f32 {
        self.base * self.zoom
    }

    /// World units covered by one pixel at the board for a viewport this tall.
    pub fn units_per_pixel(&self, viewport_height: f32) -> f32 {
        2. * self.height() * (FOV / 2.).tan() / viewport_height
    }

    /// Shift the view by a pointer delta in pixels so the board follows the pointer.
    pub fn pan(&mut self, delta: Vec2, units_per_pixel: f32) {
        self.offset -= Vec3::new(delta.x, 0., delta.y) * units_per_pixel;
    }

    /// Zoom one step in for a positive scroll, out for a negative one. Only
    /// the sign counts, so line and pixel scroll units behave alike. A step
    /// that would leave `[0.5, 2]` is dropped.
    pub fn zoom_by(&mut self, scroll: f32) {
        if scroll == 0. || scroll.is_nan() { return }
        let zoom = self.zoom - scroll.signum() * ZOOM_STEP;
        if (ZOOM_MIN - 1e-4..=ZOOM_MAX + 1e-4).contains(&zoom) {
            self.zoom = zoom.clamp(ZOOM_MIN, ZOOM_MAX);
        }
    }

    pub fn reset(&mut self) {
        self.offset = Vec3::ZERO;
    }
}

pub fn setup(
    mut commands: Commands,
    map: Res<Map>,
) {
    let rig = CameraRig::new(map.size() as f32 * map.cell_size() * 0.8);
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection { fov: FOV, ..default() }),
        Transform::from_xyz(0., rig.height(), 0.).looking_at(Vec3::ZERO, Vec3::NEG_Z),
    ));
    commands.insert_resource(rig);
}

pub fn zoom(
    scroll: Res<AccumulatedMouseScroll>,
    mut rig: ResMut<CameraRig>,
) {
    rig.zoom_by(scroll.delta.y);
}

pub fn update(
    rig: Res<CameraRig>,
    mut camera: Query<&mut Transform, (With<Camera3d>, Without<Token>)>,
    token: Query<&Transform, With<Token>>,
) {
    let Ok(token) = token.single() else { return };
    let Ok(mut transform) = camera.single_mut() else { return };

    let focus = token.translation.with_y(0.) + rig.offset;
    *transform = Transform::from_translation(focus + Vec3::Y * rig.height()).looking_at(focus, Vec3::NEG_Z);
}
