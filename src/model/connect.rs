use std::fmt;

use super::graph::FactoryGraph;

/// Why a proposed edge was not admitted. Returned, never thrown, so callers
/// can drive user feedback off the reason.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConnectionRejected {
    MissingSource(String),
    MissingTarget(String),
    SelfLoop(String),
    Duplicate { source: String, target: String },
}

impl fmt::Display for ConnectionRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionRejected::MissingSource(id) => {
                write!(f, "source node {id} does not exist")
            }
            ConnectionRejected::MissingTarget(id) => {
                write!(f, "target node {id} does not exist")
            }
            ConnectionRejected::SelfLoop(id) => {
                write!(f, "node {id} cannot connect to itself")
            }
            ConnectionRejected::Duplicate { source, target } => {
                write!(f, "{source} is already connected to {target}")
            }
        }
    }
}

impl std::error::Error for ConnectionRejected {}

/// Admissibility of a proposed `source -> target` edge against the current
/// graph. Duplicates are judged on the ordered pair, so the reverse direction
/// stays connectable.
pub fn validate(
    graph: &FactoryGraph,
    source: &str,
    target: &str,
) -> Result<(), ConnectionRejected> {
    if graph.node(source).is_none() {
        return Err(ConnectionRejected::MissingSource(source.to_owned()));
    }
    if graph.node(target).is_none() {
        return Err(ConnectionRejected::MissingTarget(target.to_owned()));
    }
    if source == target {
        return Err(ConnectionRejected::SelfLoop(source.to_owned()));
    }
    if graph
        .edges()
        .iter()
        .any(|edge| edge.source == source && edge.target == target)
    {
        return Err(ConnectionRejected::Duplicate {
            source: source.to_owned(),
            target: target.to_owned(),
        });
    }

    Ok(())
}
