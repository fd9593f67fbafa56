use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context};

use factory_planner::model::{LayoutSnapshot, NodeKind};
use factory_planner::session::{CanvasSession, SaveDisposition};
use factory_planner::store::{LayoutClient, PersistenceError};

mod canvas;
mod render_utils;
mod ui;

pub struct PlannerApp {
    session: CanvasSession,
    client: LayoutClient,
    selected_kind: NodeKind,
    pending_add: bool,
    search: String,
    status: Option<StatusLine>,
    drag: DragState,
    save_rx: Option<Receiver<Result<(), PersistenceError>>>,
    load_rx: Option<Receiver<Result<LayoutSnapshot, PersistenceError>>>,
}

enum DragState {
    Idle,
    Pan,
    Node { id: String, grab: egui::Vec2 },
    Connect { source: String },
}

struct StatusLine {
    text: String,
    is_error: bool,
}

impl PlannerApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, server_url: String) -> Self {
        Self {
            session: CanvasSession::new(),
            client: LayoutClient::new(&server_url),
            selected_kind: NodeKind::Miner,
            pending_add: false,
            search: String::new(),
            status: None,
            drag: DragState::Idle,
            save_rx: None,
            load_rx: None,
        }
    }

    fn set_status(&mut self, text: impl Into<String>, is_error: bool) {
        self.status = Some(StatusLine {
            text: text.into(),
            is_error,
        });
    }

    fn transfer_in_flight(&self) -> bool {
        self.save_rx.is_some() || self.load_rx.is_some()
    }

    fn request_save(&mut self) {
        match self.session.request_save() {
            Ok(SaveDisposition::Transmit(snapshot)) => self.spawn_save(snapshot),
            Ok(SaveDisposition::Coalesced) => {
                self.set_status("Save queued behind the one in flight", false);
            }
            Err(busy) => self.set_status(busy.to_string(), true),
        }
    }

    fn request_load(&mut self) {
        match self.session.request_load() {
            Ok(()) => self.spawn_load(),
            Err(busy) => self.set_status(busy.to_string(), true),
        }
    }

    fn spawn_save(&mut self, snapshot: LayoutSnapshot) {
        let client = self.client.clone();
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let _ = tx.send(client.save(&snapshot));
        });
        self.save_rx = Some(rx);
    }

    fn spawn_load(&mut self) {
        let client = self.client.clone();
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let _ = tx.send(client.fetch());
        });
        self.load_rx = Some(rx);
    }

    fn poll_transfers(&mut self) {
        if let Some(rx) = self.save_rx.take() {
            match rx.try_recv() {
                Ok(Ok(())) => {
                    if let Some(queued) = self.session.complete_save() {
                        self.spawn_save(queued);
                    } else {
                        self.set_status("Layout saved", false);
                    }
                }
                Ok(Err(error)) => {
                    self.session.abort_save();
                    tracing::warn!("save failed: {error}");
                    self.set_status(format!("Save failed: {error}"), true);
                }
                Err(TryRecvError::Empty) => self.save_rx = Some(rx),
                Err(TryRecvError::Disconnected) => {
                    self.session.abort_save();
                    self.set_status("Save worker disconnected", true);
                }
            }
        }

        if let Some(rx) = self.load_rx.take() {
            match rx.try_recv() {
                Ok(Ok(snapshot)) => match self.session.complete_load(snapshot) {
                    Ok(()) => self.set_status("Layout loaded", false),
                    Err(error) => {
                        tracing::warn!("load rejected: {error}");
                        self.set_status(format!("Load rejected: {error}"), true);
                    }
                },
                Ok(Err(error)) => {
                    self.session.abort_load();
                    tracing::warn!("load failed: {error}");
                    self.set_status(format!("Load failed: {error}"), true);
                }
                Err(TryRecvError::Empty) => self.load_rx = Some(rx),
                Err(TryRecvError::Disconnected) => {
                    self.session.abort_load();
                    self.set_status("Load worker disconnected", true);
                }
            }
        }
    }
}

impl eframe::App for PlannerApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.poll_transfers();
        if self.transfer_in_flight() {
            // Keep polling the worker channels even without input events.
            ctx.request_repaint();
        }

        self.draw_toolbar(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_canvas(ui);
        });
    }
}
