use thiserror::Error;

use super::graph::Point;

/// Pan offset and zoom factor defining what portion of world-space is on
/// screen. A world point lands on screen at `world * zoom - offset`.
///
/// Transient per editing session; never persisted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub zoom: f32,
}

impl Viewport {
    pub const MIN_ZOOM: f32 = 0.05;
    pub const MAX_ZOOM: f32 = 6.0;

    /// Clamped into the interactive zoom range, so a viewport mutated through
    /// here can never reach the non-positive zoom rejected below.
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(Self::MIN_ZOOM, Self::MAX_ZOOM);
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenSize {
    pub width: f32,
    pub height: f32,
}

impl ScreenSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum PlacementError {
    #[error("viewport zoom must be positive")]
    NonPositiveZoom,
}

/// World-space point at the center of the visible canvas, so a new node lands
/// where the user is currently looking regardless of pan/zoom history.
pub fn center_world_position(
    viewport: Viewport,
    screen: ScreenSize,
) -> Result<Point, PlacementError> {
    if !(viewport.zoom > 0.0) {
        return Err(PlacementError::NonPositiveZoom);
    }

    Ok(Point::new(
        viewport.x / viewport.zoom + screen.width / 2.0 / viewport.zoom,
        viewport.y / viewport.zoom + screen.height / 2.0 / viewport.zoom,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_viewport_centers_on_half_screen() {
        let viewport = Viewport::default();
        let position =
            center_world_position(viewport, ScreenSize::new(800.0, 600.0)).unwrap();
        assert_eq!(position, Point::new(400.0, 300.0));
    }

    #[test]
    fn pan_and_zoom_shift_the_center() {
        let viewport = Viewport {
            x: 100.0,
            y: 0.0,
            zoom: 2.0,
        };
        let position =
            center_world_position(viewport, ScreenSize::new(800.0, 600.0)).unwrap();
        assert_eq!(position, Point::new(250.0, 150.0));
    }

    #[test]
    fn non_positive_zoom_is_rejected() {
        for zoom in [0.0, -1.0, f32::NAN] {
            let viewport = Viewport {
                x: 0.0,
                y: 0.0,
                zoom,
            };
            assert_eq!(
                center_world_position(viewport, ScreenSize::new(800.0, 600.0)),
                Err(PlacementError::NonPositiveZoom)
            );
        }
    }

    #[test]
    fn set_zoom_clamps_into_the_interactive_range() {
        let mut viewport = Viewport::default();
        viewport.set_zoom(0.0);
        assert_eq!(viewport.zoom, Viewport::MIN_ZOOM);
        viewport.set_zoom(100.0);
        assert_eq!(viewport.zoom, Viewport::MAX_ZOOM);
    }
}
