use eframe::egui::{self, PointerButton, Rect, Ui};

use super::super::render_utils::screen_to_world;
use super::super::{DragState, PlannerApp};
use super::{anchor_radius, node_screen_rect, source_anchor};

impl PlannerApp {
    pub(in crate::app) fn hovered_node_id(&self, rect: Rect, ui: &Ui) -> Option<String> {
        let pointer = ui.input(|input| input.pointer.hover_pos())?;
        if !rect.contains(pointer) {
            return None;
        }

        let viewport = self.session.viewport;
        // Later nodes draw on top, so hit-test back to front.
        self.session
            .graph()
            .nodes()
            .iter()
            .rev()
            .find(|node| {
                node_screen_rect(rect, &viewport, node)
                    .expand(anchor_radius(&viewport))
                    .contains(pointer)
            })
            .map(|node| node.id.clone())
    }

    pub(in crate::app) fn handle_canvas_zoom(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
    ) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let viewport = self.session.viewport;
        let world_before = screen_to_world(rect, &viewport, pointer);

        let zoom_factor = (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
        let mut next = viewport;
        next.set_zoom(viewport.zoom * zoom_factor);

        // Keep the world point under the pointer fixed while zooming.
        let rel = pointer - rect.left_top();
        next.x = world_before.x * next.zoom - rel.x;
        next.y = world_before.y * next.zoom - rel.y;
        self.session.viewport = next;
    }

    pub(in crate::app) fn handle_canvas_drag(
        &mut self,
        rect: Rect,
        response: &egui::Response,
        hovered: Option<&str>,
    ) {
        let viewport = self.session.viewport;

        if response.drag_started_by(PointerButton::Primary)
            && let Some(pointer) = response.interact_pointer_pos()
        {
            self.drag = match hovered.and_then(|id| self.session.graph().node(id)) {
                Some(node) => {
                    let node_rect = node_screen_rect(rect, &viewport, node);
                    let anchor = source_anchor(node_rect);
                    if pointer.distance(anchor) <= anchor_radius(&viewport) + 2.0 {
                        DragState::Connect {
                            source: node.id.clone(),
                        }
                    } else {
                        DragState::Node {
                            id: node.id.clone(),
                            grab: pointer - node_rect.left_top(),
                        }
                    }
                }
                None => DragState::Pan,
            };
        }

        if response.dragged_by(PointerButton::Secondary)
            || response.dragged_by(PointerButton::Middle)
        {
            self.session.viewport.x -= response.drag_delta().x;
            self.session.viewport.y -= response.drag_delta().y;
        }

        if response.dragged_by(PointerButton::Primary) {
            match &self.drag {
                DragState::Pan => {
                    self.session.viewport.x -= response.drag_delta().x;
                    self.session.viewport.y -= response.drag_delta().y;
                }
                DragState::Node { id, grab } => {
                    if let Some(pointer) = response.interact_pointer_pos() {
                        let id = id.clone();
                        let world = screen_to_world(rect, &viewport, pointer - *grab);
                        self.session.move_node(&id, world);
                    }
                }
                DragState::Connect { .. } | DragState::Idle => {}
            }
        }

        if response.drag_stopped_by(PointerButton::Primary) {
            let finished = std::mem::replace(&mut self.drag, DragState::Idle);
            if let DragState::Connect { source } = finished
                && let Some(target) = hovered
            {
                let outcome = self
                    .session
                    .connect(&source, target)
                    .map(|edge| format!("Connected {} -> {}", edge.source, edge.target))
                    .map_err(|rejected| rejected.to_string());
                match outcome {
                    Ok(text) => self.set_status(text, false),
                    Err(text) => self.set_status(text, true),
                }
            }
        }
    }
}
