pub mod connect;
pub mod graph;
pub mod kind;
pub mod placement;
pub mod registry;

pub use connect::ConnectionRejected;
pub use graph::{Edge, FactoryGraph, InvalidGraph, LayoutSnapshot, Node, NodeData, Point};
pub use kind::NodeKind;
pub use placement::{PlacementError, ScreenSize, Viewport, center_world_position};
pub use registry::{NodeTypeSpec, UnknownNodeType};
