//! The canvas session: one editing session's graph, viewport, and the state
//! machine gating transfers across the persistence boundary.
//!
//! The session never performs I/O. The shell requests a transfer, ships the
//! returned snapshot from a worker thread, and reports completion back; local
//! edits stay allowed the whole time, so a load that resolves after newer
//! edits overwrites them (documented last-write-wins).

use thiserror::Error;

use crate::model::{
    ConnectionRejected, Edge, FactoryGraph, InvalidGraph, LayoutSnapshot, Node, NodeKind,
    PlacementError, Point, ScreenSize, UnknownNodeType, Viewport, center_world_position, registry,
};

/// Transfer state. One transfer in flight at a time; save requests arriving
/// mid-save coalesce into a single queued replay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncState {
    Idle,
    Saving { queued: bool },
    Loading,
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum SyncBusy {
    #[error("a save is already in flight")]
    Saving,
    #[error("a load is already in flight")]
    Loading,
}

/// Outcome of a save request that was not refused outright.
#[derive(Clone, Debug, PartialEq)]
pub enum SaveDisposition {
    /// Ship this snapshot now.
    Transmit(LayoutSnapshot),
    /// A save is in flight; the current graph will be shipped when it
    /// resolves.
    Coalesced,
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum AddNodeError {
    #[error(transparent)]
    UnknownNodeType(#[from] UnknownNodeType),
    #[error(transparent)]
    Placement(#[from] PlacementError),
}

pub struct CanvasSession {
    graph: FactoryGraph,
    pub viewport: Viewport,
    sync: SyncState,
}

impl CanvasSession {
    pub fn new() -> Self {
        Self {
            graph: FactoryGraph::new(),
            viewport: Viewport::default(),
            sync: SyncState::Idle,
        }
    }

    pub fn graph(&self) -> &FactoryGraph {
        &self.graph
    }

    pub fn sync(&self) -> SyncState {
        self.sync
    }

    /// Place a node of `kind` at the center of the current view.
    pub fn add_node_at_center(
        &mut self,
        kind: NodeKind,
        screen: ScreenSize,
    ) -> Result<&Node, AddNodeError> {
        let spec = registry::resolve(&kind)?;
        let position = center_world_position(self.viewport, screen)?;
        Ok(self.graph.add_node(kind, position, spec.display_label))
    }

    pub fn connect(&mut self, source: &str, target: &str) -> Result<&Edge, ConnectionRejected> {
        self.graph.add_edge(source, target)
    }

    pub fn move_node(&mut self, id: &str, position: Point) -> bool {
        self.graph.move_node(id, position)
    }

    pub fn remove_node(&mut self, id: &str) -> bool {
        self.graph.remove_node(id)
    }

    /// Start a save, or coalesce it behind the one already in flight.
    pub fn request_save(&mut self) -> Result<SaveDisposition, SyncBusy> {
        match self.sync {
            SyncState::Idle => {
                self.sync = SyncState::Saving { queued: false };
                Ok(SaveDisposition::Transmit(self.graph.snapshot()))
            }
            SyncState::Saving { .. } => {
                self.sync = SyncState::Saving { queued: true };
                Ok(SaveDisposition::Coalesced)
            }
            SyncState::Loading => Err(SyncBusy::Loading),
        }
    }

    /// The in-flight save resolved. Returns the coalesced snapshot to ship
    /// next, if a save was requested meanwhile.
    pub fn complete_save(&mut self) -> Option<LayoutSnapshot> {
        match self.sync {
            SyncState::Saving { queued: true } => {
                self.sync = SyncState::Saving { queued: false };
                Some(self.graph.snapshot())
            }
            _ => {
                self.sync = SyncState::Idle;
                None
            }
        }
    }

    /// The in-flight save failed; any coalesced request is dropped with it.
    pub fn abort_save(&mut self) {
        self.sync = SyncState::Idle;
    }

    pub fn request_load(&mut self) -> Result<(), SyncBusy> {
        match self.sync {
            SyncState::Idle => {
                self.sync = SyncState::Loading;
                Ok(())
            }
            SyncState::Saving { .. } => Err(SyncBusy::Saving),
            SyncState::Loading => Err(SyncBusy::Loading),
        }
    }

    /// Install a fetched snapshot. On invalid data the current graph stays
    /// untouched and the error is surfaced.
    pub fn complete_load(&mut self, snapshot: LayoutSnapshot) -> Result<(), InvalidGraph> {
        self.sync = SyncState::Idle;
        self.graph.replace(snapshot)
    }

    pub fn abort_load(&mut self) {
        self.sync = SyncState::Idle;
    }
}

impl Default for CanvasSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: ScreenSize = ScreenSize {
        width: 800.0,
        height: 600.0,
    };

    #[test]
    fn adds_the_node_at_the_view_center_with_the_registry_label() {
        let mut session = CanvasSession::new();
        let node = session.add_node_at_center(NodeKind::Miner, SCREEN).unwrap();
        assert_eq!(node.position, Point::new(400.0, 300.0));
        assert_eq!(node.data.label, "Miner");
        assert_eq!(node.kind, NodeKind::Miner);
    }

    #[test]
    fn placement_follows_the_viewport() {
        let mut session = CanvasSession::new();
        session.viewport = Viewport {
            x: 100.0,
            y: 0.0,
            zoom: 2.0,
        };
        let node = session
            .add_node_at_center(NodeKind::Smelter, SCREEN)
            .unwrap();
        assert_eq!(node.position, Point::new(250.0, 150.0));
    }

    #[test]
    fn unregistered_kind_cannot_be_created() {
        let mut session = CanvasSession::new();
        let error = session
            .add_node_at_center(NodeKind::Other("refinery".to_owned()), SCREEN)
            .unwrap_err();
        assert_eq!(
            error,
            AddNodeError::UnknownNodeType(UnknownNodeType("refinery".to_owned()))
        );
        assert!(session.graph().nodes().is_empty());
    }

    #[test]
    fn connection_rejection_is_observable_not_fatal() {
        let mut session = CanvasSession::new();
        let a = session
            .add_node_at_center(NodeKind::Miner, SCREEN)
            .unwrap()
            .id
            .clone();
        let rejected = session.connect(&a, &a).unwrap_err();
        assert_eq!(rejected, ConnectionRejected::SelfLoop(a));
        assert!(session.graph().edges().is_empty());
    }

    #[test]
    fn saves_coalesce_while_one_is_in_flight() {
        let mut session = CanvasSession::new();
        session.add_node_at_center(NodeKind::Miner, SCREEN).unwrap();

        let first = session.request_save().unwrap();
        assert!(matches!(first, SaveDisposition::Transmit(_)));

        session.add_node_at_center(NodeKind::Smelter, SCREEN).unwrap();
        assert_eq!(session.request_save().unwrap(), SaveDisposition::Coalesced);
        assert_eq!(session.sync(), SyncState::Saving { queued: true });

        let queued = session.complete_save().expect("queued snapshot");
        assert_eq!(queued.nodes.len(), 2);
        assert_eq!(session.sync(), SyncState::Saving { queued: false });

        assert!(session.complete_save().is_none());
        assert_eq!(session.sync(), SyncState::Idle);
    }

    #[test]
    fn load_is_refused_while_saving_and_vice_versa() {
        let mut session = CanvasSession::new();
        session.request_save().unwrap();
        assert_eq!(session.request_load(), Err(SyncBusy::Saving));
        session.abort_save();

        session.request_load().unwrap();
        assert_eq!(session.request_load(), Err(SyncBusy::Loading));
        assert_eq!(session.request_save(), Err(SyncBusy::Loading));
    }

    #[test]
    fn invalid_load_leaves_the_graph_untouched() {
        let mut session = CanvasSession::new();
        let kept = session
            .add_node_at_center(NodeKind::Miner, SCREEN)
            .unwrap()
            .id
            .clone();

        session.request_load().unwrap();
        let snapshot = LayoutSnapshot {
            nodes: Vec::new(),
            edges: vec![Edge {
                id: "e1".to_owned(),
                source: "1".to_owned(),
                target: "2".to_owned(),
            }],
        };
        assert!(session.complete_load(snapshot).is_err());

        assert_eq!(session.graph().nodes().len(), 1);
        assert_eq!(session.graph().nodes()[0].id, kept);
        assert_eq!(session.sync(), SyncState::Idle);
    }

    #[test]
    fn late_load_overwrites_newer_local_edits() {
        let mut session = CanvasSession::new();
        session.add_node_at_center(NodeKind::Miner, SCREEN).unwrap();
        let remote = session.graph().snapshot();

        session.request_load().unwrap();
        // Edits remain possible while the transfer is outstanding.
        session
            .add_node_at_center(NodeKind::Constructor, SCREEN)
            .unwrap();
        assert_eq!(session.graph().nodes().len(), 2);

        session.complete_load(remote).unwrap();
        assert_eq!(session.graph().nodes().len(), 1);
    }
}
