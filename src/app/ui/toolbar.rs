use eframe::egui::{self, Align, Color32, Context, Layout, RichText};

use factory_planner::model::registry;
use factory_planner::session::SyncState;

use super::super::PlannerApp;

impl PlannerApp {
    pub(in crate::app) fn draw_toolbar(&mut self, ctx: &Context) {
        egui::TopBottomPanel::top("toolbar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("factory-planner");
                    ui.separator();

                    let selected_label = registry::resolve(&self.selected_kind)
                        .map(|spec| spec.display_label)
                        .unwrap_or("?");
                    egui::ComboBox::from_id_salt("node_kind_picker")
                        .selected_text(selected_label)
                        .show_ui(ui, |ui| {
                            for kind in registry::creatable_kinds() {
                                let label = registry::resolve(&kind)
                                    .map(|spec| spec.display_label)
                                    .unwrap_or("?");
                                ui.selectable_value(&mut self.selected_kind, kind, label);
                            }
                        });

                    if ui
                        .button("Add node")
                        .on_hover_text("Place a node of the selected type at the center of the current view.")
                        .clicked()
                    {
                        self.pending_add = true;
                    }

                    ui.separator();

                    let saving = matches!(self.session.sync(), SyncState::Saving { .. });
                    let loading = matches!(self.session.sync(), SyncState::Loading);

                    if ui
                        .add_enabled(!loading, egui::Button::new("Save layout"))
                        .on_hover_text("Push the current layout to the shared server slot.")
                        .clicked()
                    {
                        self.request_save();
                    }
                    if ui
                        .add_enabled(!loading && !saving, egui::Button::new("Load layout"))
                        .on_hover_text("Fetch the shared layout and replace the canvas with it.")
                        .clicked()
                    {
                        self.request_load();
                    }
                    if saving || loading {
                        ui.spinner();
                    }

                    ui.separator();
                    ui.label("Search");
                    ui.text_edit_singleline(&mut self.search)
                        .on_hover_text("Fuzzy-highlight nodes by label or id.");

                    ui.separator();
                    ui.label(format!("nodes: {}", self.session.graph().nodes().len()));
                    ui.label(format!("edges: {}", self.session.graph().edges().len()));

                    if let Some(status) = &self.status {
                        let color = if status.is_error {
                            Color32::from_rgb(240, 120, 110)
                        } else {
                            Color32::from_rgb(140, 210, 150)
                        };
                        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                            ui.label(RichText::new(&status.text).color(color));
                        });
                    }
                });
            });
    }
}
