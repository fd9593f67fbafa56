use eframe::egui::{
    self, Align2, Color32, FontId, Sense, Stroke, StrokeKind, Ui,
};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use factory_planner::model::ScreenSize;

use super::super::render_utils::{blend_color, draw_background, kind_fill};
use super::super::{DragState, PlannerApp};
use super::{anchor_radius, node_screen_rect, source_anchor, target_anchor};

impl PlannerApp {
    pub(in crate::app) fn draw_canvas(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        draw_background(&painter, rect, &self.session.viewport);

        self.handle_canvas_zoom(ui, rect, &response);

        if self.pending_add {
            self.pending_add = false;
            let kind = self.selected_kind.clone();
            let screen = ScreenSize::new(rect.width(), rect.height());
            let outcome = self
                .session
                .add_node_at_center(kind, screen)
                .map(|node| format!("Added {} ({})", node.data.label, node.id))
                .map_err(|error| error.to_string());
            match outcome {
                Ok(text) => self.set_status(text, false),
                Err(text) => self.set_status(text, true),
            }
        }

        let hovered = self.hovered_node_id(rect, ui);
        self.handle_canvas_drag(rect, &response, hovered.as_deref());

        if let Some(id) = hovered.as_deref()
            && ui.input(|input| input.key_pressed(egui::Key::Delete))
            && self.session.remove_node(id)
        {
            let text = format!("Removed node {id}");
            self.set_status(text, false);
        }

        if response.dragged() {
            ui.ctx().request_repaint();
        }

        let viewport = self.session.viewport;

        let edge_stroke = Stroke::new(
            (1.6 * viewport.zoom.sqrt()).clamp(0.8, 3.2),
            Color32::from_gray(150),
        );
        for edge in self.session.graph().edges() {
            let (Some(source), Some(target)) = (
                self.session.graph().node(&edge.source),
                self.session.graph().node(&edge.target),
            ) else {
                continue;
            };

            let start = source_anchor(node_screen_rect(rect, &viewport, source));
            let end = target_anchor(node_screen_rect(rect, &viewport, target));
            painter.line_segment([start, end], edge_stroke);
        }

        if let DragState::Connect { source } = &self.drag
            && let Some(node) = self.session.graph().node(source)
            && let Some(pointer) = response.interact_pointer_pos()
        {
            let start = source_anchor(node_screen_rect(rect, &viewport, node));
            painter.line_segment(
                [start, pointer],
                Stroke::new(2.0, Color32::from_rgb(118, 180, 254)),
            );
        }

        let matcher = SkimMatcherV2::default();
        let query = self.search.trim();

        for node in self.session.graph().nodes() {
            let node_rect = node_screen_rect(rect, &viewport, node);
            if !node_rect.intersects(rect) {
                continue;
            }

            let is_hovered = hovered.as_deref() == Some(node.id.as_str());
            let fill = if is_hovered {
                blend_color(kind_fill(&node.kind), Color32::WHITE, 0.18)
            } else {
                kind_fill(&node.kind)
            };
            painter.rect_filled(node_rect, 6.0, fill);

            let is_match = !query.is_empty()
                && (matcher.fuzzy_match(&node.data.label, query).is_some()
                    || matcher.fuzzy_match(&node.id, query).is_some());
            let stroke = if is_match {
                Stroke::new(2.2, Color32::from_rgb(103, 196, 255))
            } else {
                Stroke::new(1.0, Color32::from_rgba_unmultiplied(15, 15, 15, 190))
            };
            painter.rect_stroke(node_rect, 6.0, stroke, StrokeKind::Outside);

            painter.text(
                node_rect.center(),
                Align2::CENTER_CENTER,
                &node.data.label,
                FontId::proportional((13.0 * viewport.zoom).clamp(9.0, 22.0)),
                Color32::from_gray(238),
            );

            let radius = anchor_radius(&viewport);
            painter.circle_filled(
                target_anchor(node_rect),
                radius,
                Color32::from_rgb(64, 96, 255),
            );
            painter.circle_filled(
                source_anchor(node_rect),
                radius,
                Color32::from_rgb(64, 200, 96),
            );
        }

        if hovered.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }
    }
}
