use serde::{Deserialize, Serialize};

/// Discriminator selecting a node's rendering and default metadata.
///
/// The buildable set is closed; `Other` carries tags loaded from layouts whose
/// kind is no longer registered, so they survive a save/load round trip
/// instead of being dropped.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
    Miner,
    Smelter,
    Constructor,
    Other(String),
}

impl NodeKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Miner => "miner",
            Self::Smelter => "smelter",
            Self::Constructor => "constructor",
            Self::Other(tag) => tag,
        }
    }
}

impl From<String> for NodeKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "miner" => Self::Miner,
            "smelter" => Self::Smelter,
            "constructor" => Self::Constructor,
            _ => Self::Other(tag),
        }
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Other(tag) => tag,
            known => known.as_str().to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tags_parse_to_their_variants() {
        assert_eq!(NodeKind::from("miner".to_owned()), NodeKind::Miner);
        assert_eq!(NodeKind::from("smelter".to_owned()), NodeKind::Smelter);
        assert_eq!(
            NodeKind::from("constructor".to_owned()),
            NodeKind::Constructor
        );
    }

    #[test]
    fn unknown_tag_round_trips_verbatim() {
        let kind = NodeKind::from("refinery".to_owned());
        assert_eq!(kind, NodeKind::Other("refinery".to_owned()));
        assert_eq!(String::from(kind), "refinery");
    }

    #[test]
    fn serializes_as_the_bare_tag() {
        let json = serde_json::to_string(&NodeKind::Miner).unwrap();
        assert_eq!(json, "\"miner\"");

        let parsed: NodeKind = serde_json::from_str("\"smelter\"").unwrap();
        assert_eq!(parsed, NodeKind::Smelter);
    }
}
