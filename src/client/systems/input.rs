use bevy::{
    ecs::{query::QueryFilter, system::SystemParam},
    picking::mesh_picking::ray_cast::{MeshRayCast, MeshRayCastSettings},
    prelude::*,
    window::PrimaryWindow,
};

use crate::{
    client::{
        components::{ClipRequest, Ghost},
        config::ClientConfig,
        resources::{drag::*, preview::Preview},
        systems::{actor::Rig, camera::CameraRig},
    },
    common::{
        components::*,
        resources::map::Map,
        systems::movement::Motion,
    },
};

/// Mesh picking from the primary window through the board camera.
#[derive(SystemParam)]
pub struct Picker<'w, 's> {
    ray_cast: MeshRayCast<'w, 's>,
    window: Query<'w, 's, &'static Window, With<PrimaryWindow>>,
    camera: Query<'w, 's, (&'static Camera, &'static GlobalTransform)>,
    parents: Query<'w, 's, &'static ChildOf>,
    tokens: Query<'w, 's, (), With<Token>>,
    ghosts: Query<'w, 's, (), With<Ghost>>,
}

impl Picker<'_, '_> {
    pub fn cursor(&self) -> Option<Vec2> {
        self.window.single().ok()?.cursor_position()
    }

    pub fn viewport_height(&self) -> Option<f32> {
        Some(self.window.single().ok()?.height())
    }
}

/// Whether `entity` or any of its ancestors matches `marker`.
fn lineage_has<F: QueryFilter>(parents: &Query<&'static ChildOf>, marker: &Query<(), F>, entity: Entity) -> bool {
    let mut current = Some(entity);
    while let Some(it) = current {
        if marker.contains(it) { return true }
        current = parents.get(it).ok().map(ChildOf::parent);
    }
    false
}

impl HitTest for Picker<'_, '_> {
    type Object = Entity;

    fn cast_ray(&mut self, pointer: Vec2) -> Vec<(Vec3, Entity)> {
        let Ok((camera, transform)) = self.camera.single() else { return Vec::new() };
        let Ok(ray) = camera.viewport_to_world(transform, pointer) else { return Vec::new() };

        let parents = &self.parents;
        let ghosts = &self.ghosts;
        let filter = |entity| !lineage_has(parents, ghosts, entity);
        let settings = MeshRayCastSettings::default().with_filter(&filter).never_early_exit();
        self.ray_cast.cast_ray(ray, &settings).iter()
            .map(|(entity, hit)| (hit.point, *entity))
            .collect()
    }

    fn belongs_to_token(&self, object: Entity) -> bool {
        lineage_has(&self.parents, &self.tokens, object)
    }
}

pub fn anchor_key(
    keyboard: Res<ButtonInput<KeyCode>>,
    config: Res<ClientConfig>,
    mut drag: ResMut<DragController>,
) {
    if keyboard.just_pressed(config.anchor_key) { drag.anchor_key(true) }
    if keyboard.just_released(config.anchor_key) { drag.anchor_key(false) }
}

/// Press, move and release of the primary button: drags the token, or pans
/// the camera when the press misses it.
pub fn pointer(
    buttons: Res<ButtonInput<MouseButton>>,
    mut cursor: EventReader<CursorMoved>,
    mut picker: Picker,
    mut drag: ResMut<DragController>,
    mut preview: ResMut<Preview>,
    mut camera: ResMut<CameraRig>,
    map: Res<Map>,
    mut query: Query<(&Token, &mut Motion, &mut Transform, &mut ClipRequest)>,
) {
    let Ok((&token, mut motion, mut transform, mut request)) = query.single_mut() else { return };

    if buttons.just_pressed(MouseButton::Left) {
        let grabbed = !motion.is_moving() && picker.cursor()
            .is_some_and(|pointer| drag.press(pointer, &mut picker, token.cell, &map, &mut *preview));
        camera.panning = !grabbed;
    }

    for moved in cursor.read() {
        if drag.state() == DragState::Dragging {
            drag.drag(moved.position, &mut picker, token.cell, &map, &mut *preview);
        } else if camera.panning {
            let (Some(delta), Some(height)) = (moved.delta, picker.viewport_height()) else { continue };
            let scale = camera.units_per_pixel(height);
            camera.pan(delta, scale);
        }
    }

    if buttons.just_released(MouseButton::Left) {
        camera.panning = false;
        let Some(path) = drag.release(token.cell, &map, &mut *preview) else { return };
        let mut rig = Rig { transform: &mut *transform, request: &mut *request };
        if motion.start(path, &mut rig) {
            camera.reset();
            info!("token walking from {} over {} cells", token.cell, motion.remaining().count() - 1);
        }
    }
}
