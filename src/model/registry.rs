use thiserror::Error;

use super::kind::NodeKind;

/// Rendering and default-metadata descriptor for a buildable node kind.
#[derive(Debug)]
pub struct NodeTypeSpec {
    pub display_label: &'static str,
    pub fill: [u8; 3],
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown node type \"{0}\"")]
pub struct UnknownNodeType(pub String);

const MINER: NodeTypeSpec = NodeTypeSpec {
    display_label: "Miner",
    fill: [45, 100, 132],
};

const SMELTER: NodeTypeSpec = NodeTypeSpec {
    display_label: "Smelter",
    fill: [150, 88, 42],
};

const CONSTRUCTOR: NodeTypeSpec = NodeTypeSpec {
    display_label: "Constructor",
    fill: [86, 68, 128],
};

/// Resolve a kind to its descriptor. Fails only for unregistered tags, which
/// blocks creating such nodes while leaving loaded ones intact: the registry
/// affects rendering and creation, never the integrity of stored data.
pub fn resolve(kind: &NodeKind) -> Result<&'static NodeTypeSpec, UnknownNodeType> {
    match kind {
        NodeKind::Miner => Ok(&MINER),
        NodeKind::Smelter => Ok(&SMELTER),
        NodeKind::Constructor => Ok(&CONSTRUCTOR),
        NodeKind::Other(tag) => Err(UnknownNodeType(tag.clone())),
    }
}

/// The kinds offered by the toolbar picker, in display order.
pub fn creatable_kinds() -> [NodeKind; 3] {
    [NodeKind::Miner, NodeKind::Smelter, NodeKind::Constructor]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_creatable_kind_resolves() {
        for kind in creatable_kinds() {
            assert!(resolve(&kind).is_ok(), "{kind:?} should resolve");
        }
    }

    #[test]
    fn miner_resolves_to_its_descriptor() {
        let spec = resolve(&NodeKind::Miner).unwrap();
        assert_eq!(spec.display_label, "Miner");
        assert_eq!(spec.fill, [45, 100, 132]);
    }

    #[test]
    fn unregistered_tag_fails_creation_lookup() {
        let error = resolve(&NodeKind::Other("refinery".to_owned())).unwrap_err();
        assert_eq!(error, UnknownNodeType("refinery".to_owned()));
        assert_eq!(error.to_string(), "unknown node type \"refinery\"");
    }
}
