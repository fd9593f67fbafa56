mod interaction;
mod view;

use eframe::egui::{Pos2, Rect, pos2, vec2};

use factory_planner::model::{Node, Viewport};

use super::render_utils::world_to_screen;

pub(super) const NODE_WIDTH: f32 = 150.0;
pub(super) const NODE_HEIGHT: f32 = 48.0;
pub(super) const ANCHOR_RADIUS: f32 = 5.0;

pub(super) fn node_screen_rect(canvas: Rect, viewport: &Viewport, node: &Node) -> Rect {
    let top_left = world_to_screen(canvas, viewport, node.position);
    Rect::from_min_size(
        top_left,
        vec2(NODE_WIDTH * viewport.zoom, NODE_HEIGHT * viewport.zoom),
    )
}

pub(super) fn anchor_radius(viewport: &Viewport) -> f32 {
    (ANCHOR_RADIUS * viewport.zoom).clamp(3.0, 9.0)
}

/// Incoming connections attach at the top edge.
pub(super) fn target_anchor(rect: Rect) -> Pos2 {
    pos2(rect.center().x, rect.top())
}

/// Outgoing connections leave from the bottom edge.
pub(super) fn source_anchor(rect: Rect) -> Pos2 {
    pos2(rect.center().x, rect.bottom())
}
