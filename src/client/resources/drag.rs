//! Drag-and-drop of the token.
//!
//! A press on the token starts a drag, every pointer move re-projects the
//! pointer onto the board and previews the route, and the release either
//! hands the route to the motion player or shows that the move was
//! cancelled. Holding the anchor key while dragging pins each walkable cell
//! the pointer passes over, and the route is forced through those anchors in
//! order.

use bevy::prelude::*;
use grid::{Cell, Convert, Grid};

use crate::common::systems::route::route;

// ===== Collaborators =====

/// Pointer picking against the scene.
pub trait HitTest {
    type Object: Copy;

    /// Everything under `pointer`, nearest first, with the world point hit.
    fn cast_ray(&mut self, pointer: Vec2) -> Vec<(Vec3, Self::Object)>;

    /// Whether `object` is the token or one of its parts.
    fn belongs_to_token(&self, object: Self::Object) -> bool;
}

/// Drag feedback drawn over the board.
pub trait Overlay {
    fn show_path(&mut self, points: Vec<Vec3>);
    fn hide_path(&mut self);
    fn show_ghost(&mut self, at: Vec3);
    fn hide_ghost(&mut self);
    fn show_invalid(&mut self, at: Vec3);
    fn hide_invalid(&mut self);
    fn highlight_blocked(&mut self);
    fn unhighlight_blocked(&mut self);
    fn flash_cancelled(&mut self, at: Vec3);
}

// ===== Controller =====

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
}

#[derive(Debug, Default, Resource)]
pub struct DragController {
    state: DragState,
    /// Waypoints dropped during this drag, consecutive entries distinct
    anchors: Vec<Cell>,
    /// Walkable cell under the pointer, `None` while over a blocked cell
    last_valid: Option<Cell>,
    /// Anchor key currently held
    anchoring: bool,
}

impl DragController {
    pub fn state(&self) -> DragState { self.state }
    pub fn anchors(&self) -> &[Cell] { &self.anchors }
    pub fn last_valid(&self) -> Option<Cell> { self.last_valid }
    pub fn is_anchoring(&self) -> bool { self.anchoring }

    /// Key edge for the anchor modifier. Sampled on every pointer move.
    pub fn anchor_key(&mut self, down: bool) {
        self.anchoring = down;
    }

    /// Pointer pressed. Starts a drag when the nearest thing under the
    /// pointer belongs to the token.
    pub fn press<H: HitTest>(
        &mut self,
        pointer: Vec2,
        hits: &mut H,
        token: Cell,
        map: &Grid,
        overlay: &mut impl Overlay,
    ) -> bool {
        if self.state == DragState::Dragging { return false }
        let Some(&(_, object)) = hits.cast_ray(pointer).first() else { return false };
        if !hits.belongs_to_token(object) { return false }

        self.state = DragState::Dragging;
        self.anchors.clear();
        self.last_valid = None;
        overlay.show_ghost(map.convert(token));
        overlay.highlight_blocked();
        debug!("drag started from {token}");
        true
    }

    /// Pointer moved while dragging.
    pub fn drag<H: HitTest>(
        &mut self,
        pointer: Vec2,
        hits: &mut H,
        token: Cell,
        map: &Grid,
        overlay: &mut impl Overlay,
    ) {
        if self.state != DragState::Dragging { return }
        let Some(cell) = hits.cast_ray(pointer).into_iter()
            .map(|(point, _)| -> Cell { map.convert(point) })
            .find(|&cell| map.contains(cell)) else { return };

        let center = map.convert(cell);
        overlay.show_ghost(center);

        if !map.is_walkable(cell) {
            overlay.show_invalid(center);
            overlay.hide_path();
            self.last_valid = None;
            return;
        }

        overlay.hide_invalid();
        self.last_valid = Some(cell);
        if self.anchoring && self.anchors.last() != Some(&cell) {
            self.anchors.push(cell);
            trace!("anchor {} at {cell}", self.anchors.len());
        }

        match route(map, token, &self.anchors, cell) {
            Some(path) if path.len() >= 2 => overlay.show_path(path.into_iter().map(|it| map.convert(it)).collect()),
            _ => overlay.hide_path(),
        }
    }

    /// Pointer released.
    ///
    /// # Returns
    /// The route to walk, or `None` when the drop was cancelled (released over
    /// a blocked cell, or the route could not be found).
    pub fn release(&mut self, token: Cell, map: &Grid, overlay: &mut impl Overlay) -> Option<Vec<Cell>> {
        if self.state != DragState::Dragging { return None }

        self.state = DragState::Idle;
        overlay.unhighlight_blocked();
        overlay.hide_ghost();
        overlay.hide_invalid();
        overlay.hide_path();

        let anchors = std::mem::take(&mut self.anchors);
        let path = self.last_valid.take().and_then(|dest| route(map, token, &anchors, dest));
        match &path {
            Some(path) => debug!("drag dropped on {:?} through {} anchors", path.last(), anchors.len()),
            None => {
                debug!("drag cancelled");
                overlay.flash_cancelled(map.convert(token));
            }
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::resources::preview::Preview;

    /// Hits are `(point, is token)` in nearest-first order.
    struct Pointer {
        hits: Vec<(Vec3, bool)>,
    }

    impl Pointer {
        fn over(map: &Grid, cell: Cell) -> Self {
            Self { hits: vec![(map.convert(cell), false)] }
        }

        fn on_token(map: &Grid, cell: Cell) -> Self {
            let point: Vec3 = map.convert(cell);
            Self { hits: vec![(point + Vec3::Y * 0.5, true), (point, false)] }
        }
    }

    impl HitTest for Pointer {
        type Object = bool;
        fn cast_ray(&mut self, _: Vec2) -> Vec<(Vec3, bool)> { self.hits.clone() }
        fn belongs_to_token(&self, object: bool) -> bool { object }
    }

    const TOKEN: Cell = Cell::new(0, 0);

    fn create_test_grid() -> Grid {
        Grid::with_obstacles(10, 1., [
            Cell::new(2, 2), Cell::new(2, 3), Cell::new(2, 4),
            Cell::new(3, 2), Cell::new(3, 3), Cell::new(3, 4),
            Cell::new(4, 2), Cell::new(4, 3), Cell::new(4, 4),
            Cell::new(7, 7), Cell::new(7, 8), Cell::new(8, 7), Cell::new(8, 8),
        ])
    }

    fn start_drag(map: &Grid, preview: &mut Preview) -> DragController {
        let mut drag = DragController::default();
        assert!(drag.press(Vec2::ZERO, &mut Pointer::on_token(map, TOKEN), TOKEN, map, preview));
        drag
    }

    fn drag_to(drag: &mut DragController, map: &Grid, preview: &mut Preview, cell: Cell) {
        drag.drag(Vec2::ZERO, &mut Pointer::over(map, cell), TOKEN, map, preview);
    }

    // ===== Press Tests =====

    #[test]
    fn test_press_on_token_starts_drag() {
        let map = create_test_grid();
        let mut preview = Preview::default();
        let drag = start_drag(&map, &mut preview);

        assert_eq!(drag.state(), DragState::Dragging);
        assert_eq!(preview.ghost, Some(map.convert(TOKEN)));
        assert!(preview.blocked, "non-walkable cells should be highlighted");
        assert!(drag.anchors().is_empty());
        assert_eq!(drag.last_valid(), None);
    }

    #[test]
    fn test_press_on_board_is_ignored() {
        let map = create_test_grid();
        let mut preview = Preview::default();
        let mut drag = DragController::default();

        assert!(!drag.press(Vec2::ZERO, &mut Pointer::over(&map, Cell::new(5, 5)), TOKEN, &map, &mut preview));
        assert_eq!(drag.state(), DragState::Idle);
        assert_eq!(preview.ghost, None);
    }

    #[test]
    fn test_press_only_considers_nearest_hit() {
        let map = create_test_grid();
        let mut preview = Preview::default();
        let mut drag = DragController::default();
        let mut pointer = Pointer { hits: vec![(Vec3::ZERO, false), (Vec3::ZERO, true)] };

        assert!(!drag.press(Vec2::ZERO, &mut pointer, TOKEN, &map, &mut preview));
    }

    #[test]
    fn test_press_with_nothing_under_pointer() {
        let map = create_test_grid();
        let mut preview = Preview::default();
        let mut drag = DragController::default();
        assert!(!drag.press(Vec2::ZERO, &mut Pointer { hits: vec![] }, TOKEN, &map, &mut preview));
    }

    // ===== Drag Tests =====

    #[test]
    fn test_drag_over_walkable_previews_path() {
        let map = create_test_grid();
        let mut preview = Preview::default();
        let mut drag = start_drag(&map, &mut preview);

        drag_to(&mut drag, &map, &mut preview, Cell::new(5, 5));

        assert_eq!(drag.last_valid(), Some(Cell::new(5, 5)));
        assert_eq!(preview.ghost, Some(map.convert(Cell::new(5, 5))));
        assert_eq!(preview.invalid, None);
        let path = preview.path.as_ref().expect("path preview");
        assert_eq!(path.first(), Some(&map.convert(TOKEN)));
        assert_eq!(path.last(), Some(&map.convert(Cell::new(5, 5))));
    }

    #[test]
    fn test_drag_over_blocked_shows_invalid() {
        let map = create_test_grid();
        let mut preview = Preview::default();
        let mut drag = start_drag(&map, &mut preview);

        drag_to(&mut drag, &map, &mut preview, Cell::new(5, 5));
        drag_to(&mut drag, &map, &mut preview, Cell::new(3, 3));

        let center: Vec3 = map.convert(Cell::new(3, 3));
        assert_eq!(drag.last_valid(), None);
        assert_eq!(preview.ghost, Some(center));
        assert_eq!(preview.invalid, Some(center));
        assert_eq!(preview.path, None);

        drag_to(&mut drag, &map, &mut preview, Cell::new(6, 6));
        assert_eq!(preview.invalid, None, "moving back onto a walkable cell clears the glyph");
        assert!(preview.path.is_some());
    }

    #[test]
    fn test_drag_off_board_changes_nothing() {
        let map = create_test_grid();
        let mut preview = Preview::default();
        let mut drag = start_drag(&map, &mut preview);
        drag_to(&mut drag, &map, &mut preview, Cell::new(3, 3));

        let mut outside = Pointer { hits: vec![(Vec3::new(40., 0., 0.), false)] };
        drag.drag(Vec2::ZERO, &mut outside, TOKEN, &map, &mut preview);

        assert_eq!(preview.invalid, Some(map.convert(Cell::new(3, 3))), "indicator state persists");
        assert_eq!(preview.ghost, Some(map.convert(Cell::new(3, 3))));
    }

    #[test]
    fn test_drag_uses_first_in_bounds_hit() {
        let map = create_test_grid();
        let mut preview = Preview::default();
        let mut drag = start_drag(&map, &mut preview);

        let mut pointer = Pointer { hits: vec![(Vec3::new(-40., 0., 0.), false), (map.convert(Cell::new(6, 1)), false)] };
        drag.drag(Vec2::ZERO, &mut pointer, TOKEN, &map, &mut preview);
        assert_eq!(drag.last_valid(), Some(Cell::new(6, 1)));
    }

    #[test]
    fn test_drag_to_unreachable_cell_hides_path() {
        let mut map = create_test_grid();
        let island = Cell::new(0, 9);
        for it in [Cell::new(0, 8), Cell::new(1, 8), Cell::new(1, 9)] { map.set_walkable(it, false); }
        let mut preview = Preview::default();
        let mut drag = start_drag(&map, &mut preview);

        drag_to(&mut drag, &map, &mut preview, island);
        assert_eq!(drag.last_valid(), Some(island), "walkable even though unreachable");
        assert_eq!(preview.path, None);
    }

    #[test]
    fn test_drag_without_press_is_ignored() {
        let map = create_test_grid();
        let mut preview = Preview::default();
        let mut drag = DragController::default();
        drag_to(&mut drag, &map, &mut preview, Cell::new(5, 5));
        assert_eq!(drag.last_valid(), None);
        assert_eq!(preview.ghost, None);
    }

    // ===== Anchor Tests =====

    #[test]
    fn test_anchors_recorded_while_key_held() {
        let map = create_test_grid();
        let mut preview = Preview::default();
        let mut drag = start_drag(&map, &mut preview);

        drag_to(&mut drag, &map, &mut preview, Cell::new(1, 5));
        drag.anchor_key(true);
        drag_to(&mut drag, &map, &mut preview, Cell::new(0, 6));
        drag_to(&mut drag, &map, &mut preview, Cell::new(0, 6));
        drag_to(&mut drag, &map, &mut preview, Cell::new(3, 3));
        drag_to(&mut drag, &map, &mut preview, Cell::new(5, 9));
        drag.anchor_key(false);
        drag_to(&mut drag, &map, &mut preview, Cell::new(9, 0));

        assert!(!drag.is_anchoring());
        assert_eq!(drag.anchors(), &[Cell::new(0, 6), Cell::new(5, 9)], "blocked cells and repeats are not anchors");
    }

    #[test]
    fn test_preview_routes_through_anchors() {
        let map = create_test_grid();
        let mut preview = Preview::default();
        let mut drag = start_drag(&map, &mut preview);

        drag.anchor_key(true);
        drag_to(&mut drag, &map, &mut preview, Cell::new(0, 9));
        drag.anchor_key(false);
        drag_to(&mut drag, &map, &mut preview, Cell::new(9, 0));

        let expected = route(&map, TOKEN, &[Cell::new(0, 9)], Cell::new(9, 0)).expect("route");
        let expected: Vec<Vec3> = expected.into_iter().map(|it| map.convert(it)).collect();
        assert_eq!(preview.path, Some(expected));
    }

    // ===== Release Tests =====

    #[test]
    fn test_release_over_valid_cell_returns_route() {
        let map = create_test_grid();
        let mut preview = Preview::default();
        let mut drag = start_drag(&map, &mut preview);

        drag.anchor_key(true);
        drag_to(&mut drag, &map, &mut preview, Cell::new(0, 9));
        drag.anchor_key(false);
        drag_to(&mut drag, &map, &mut preview, Cell::new(6, 6));

        let path = drag.release(TOKEN, &map, &mut preview).expect("route to walk");
        assert_eq!(path, route(&map, TOKEN, &[Cell::new(0, 9)], Cell::new(6, 6)).expect("route"));

        assert_eq!(drag.state(), DragState::Idle);
        assert!(drag.anchors().is_empty());
        assert_eq!(drag.last_valid(), None);
        assert_eq!(preview.ghost, None);
        assert_eq!(preview.path, None);
        assert!(!preview.blocked);
        assert!(preview.flash.is_none());
    }

    #[test]
    fn test_release_over_blocked_cell_cancels() {
        let map = create_test_grid();
        let mut preview = Preview::default();
        let mut drag = start_drag(&map, &mut preview);
        drag.anchor_key(true);
        drag_to(&mut drag, &map, &mut preview, Cell::new(5, 5));
        drag_to(&mut drag, &map, &mut preview, Cell::new(8, 8));

        assert_eq!(drag.release(TOKEN, &map, &mut preview), None);
        assert_eq!(preview.invalid, None);
        assert_eq!(preview.flash.as_ref().map(|it| it.at), Some(map.convert(TOKEN)));
        assert!(drag.anchors().is_empty(), "anchors never outlive the drag");
    }

    #[test]
    fn test_release_with_unreachable_route_cancels() {
        let mut map = create_test_grid();
        for it in [Cell::new(0, 8), Cell::new(1, 8), Cell::new(1, 9)] { map.set_walkable(it, false); }
        let mut preview = Preview::default();
        let mut drag = start_drag(&map, &mut preview);
        drag_to(&mut drag, &map, &mut preview, Cell::new(0, 9));

        assert_eq!(drag.release(TOKEN, &map, &mut preview), None);
        assert!(preview.flash.is_some());
    }

    #[test]
    fn test_release_without_moving_cancels() {
        let map = create_test_grid();
        let mut preview = Preview::default();
        let mut drag = start_drag(&map, &mut preview);
        assert_eq!(drag.release(TOKEN, &map, &mut preview), None);
        assert!(preview.flash.is_some());
    }

    #[test]
    fn test_release_when_idle_does_nothing() {
        let map = create_test_grid();
        let mut preview = Preview::default();
        let mut drag = DragController::default();
        assert_eq!(drag.release(TOKEN, &map, &mut preview), None);
        assert!(preview.flash.is_none());
    }

    #[test]
    fn test_next_drag_starts_clean() {
        let map = create_test_grid();
        let mut preview = Preview::default();
        let mut drag = start_drag(&map, &mut preview);
        drag.anchor_key(true);
        drag_to(&mut drag, &map, &mut preview, Cell::new(0, 5));
        drag.release(TOKEN, &map, &mut preview);

        assert!(drag.press(Vec2::ZERO, &mut Pointer::on_token(&map, TOKEN), TOKEN, &map, &mut preview));
        assert!(drag.anchors().is_empty());
        assert_eq!(drag.last_valid(), None);
        assert!(drag.is_anchoring(), "the key is still physically held");
    }
}
