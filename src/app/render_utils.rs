use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke, vec2};

use factory_planner::model::{NodeKind, Point, Viewport, registry};

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

pub(super) fn world_to_screen(rect: Rect, viewport: &Viewport, world: Point) -> Pos2 {
    rect.left_top()
        + vec2(
            world.x * viewport.zoom - viewport.x,
            world.y * viewport.zoom - viewport.y,
        )
}

pub(super) fn screen_to_world(rect: Rect, viewport: &Viewport, screen: Pos2) -> Point {
    let rel = screen - rect.left_top();
    Point::new(
        (rel.x + viewport.x) / viewport.zoom,
        (rel.y + viewport.y) / viewport.zoom,
    )
}

pub(super) fn kind_fill(kind: &NodeKind) -> Color32 {
    match registry::resolve(kind) {
        Ok(spec) => Color32::from_rgb(spec.fill[0], spec.fill[1], spec.fill[2]),
        // Loaded-but-unregistered kinds render as a neutral box.
        Err(_) => Color32::from_rgb(86, 88, 94),
    }
}

pub(super) fn draw_background(painter: &Painter, rect: Rect, viewport: &Viewport) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(19, 23, 29));

    let step = (56.0 * viewport.zoom.clamp(0.6, 1.8)).max(20.0);
    let grid_stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(60, 70, 80, 70));

    let mut x = rect.left() + (-viewport.x).rem_euclid(step);
    while x < rect.right() {
        painter.line_segment(
            [Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())],
            grid_stroke,
        );
        x += step;
    }

    let mut y = rect.top() + (-viewport.y).rem_euclid(step);
    while y < rect.bottom() {
        painter.line_segment(
            [Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)],
            grid_stroke,
        );
        y += step;
    }
}
