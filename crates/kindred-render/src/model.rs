//! Output types for the two layout variants.

use kindred_core::{PartnershipId, PersonId};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Role tag of a graph node. Synthetic roles exist so the same person can
/// appear in several relationship paths without id collisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRole {
    Person,
    PartnershipAnchor,
    ChildAnchor,
    Midpoint,
}

/// Graph node identifier: a role plus the underlying record key. Serializes
/// as the page's historical string scheme (`person_3`, `partnership_7`,
/// `child_5`, `midpoint_7`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    role: NodeRole,
    key: i64,
}

impl NodeId {
    pub fn person(id: PersonId) -> Self {
        Self {
            role: NodeRole::Person,
            key: id.0,
        }
    }

    pub fn partnership(id: PartnershipId) -> Self {
        Self {
            role: NodeRole::PartnershipAnchor,
            key: id.0,
        }
    }

    pub fn child(id: PersonId) -> Self {
        Self {
            role: NodeRole::ChildAnchor,
            key: id.0,
        }
    }

    pub fn midpoint(id: PartnershipId) -> Self {
        Self {
            role: NodeRole::Midpoint,
            key: id.0,
        }
    }

    pub fn role(&self) -> NodeRole {
        self.role
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.role {
            NodeRole::Person => "person",
            NodeRole::PartnershipAnchor => "partnership",
            NodeRole::ChildAnchor => "child",
            NodeRole::Midpoint => "midpoint",
        };
        write!(f, "{}_{}", prefix, self.key)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("invalid node id: {text}")]
pub struct ParseNodeIdError {
    text: String,
}

impl std::str::FromStr for NodeId {
    type Err = ParseNodeIdError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let invalid = || ParseNodeIdError {
            text: s.to_string(),
        };
        let (prefix, key) = s.split_once('_').ok_or_else(invalid)?;
        let role = match prefix {
            "person" => NodeRole::Person,
            "partnership" => NodeRole::PartnershipAnchor,
            "child" => NodeRole::ChildAnchor,
            "midpoint" => NodeRole::Midpoint,
            _ => return Err(invalid()),
        };
        let key: i64 = key.parse().map_err(|_| invalid())?;
        Ok(Self { role, key })
    }
}

impl Serialize for NodeId {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionedNode {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    /// Full display name; synthetic nodes carry none.
    #[serde(default)]
    pub label: Option<String>,
    /// Navigation target for the page's click handler; person nodes only.
    #[serde(default)]
    pub href: Option<String>,
}

/// Undirected for rendering purposes; source/target order is build order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FamilyGraph {
    pub nodes: Vec<PositionedNode>,
    pub edges: Vec<Edge>,
}

impl FamilyGraph {
    /// Checks the construction guarantees: node ids are unique and every
    /// edge endpoint names an existing node.
    pub fn validate(&self) -> Result<()> {
        let mut ids: rustc_hash::FxHashSet<NodeId> = rustc_hash::FxHashSet::default();
        for node in &self.nodes {
            if !ids.insert(node.id) {
                return Err(Error::DuplicateNode {
                    node_id: node.id.to_string(),
                });
            }
        }
        for edge in &self.edges {
            if !ids.contains(&edge.source) || !ids.contains(&edge.target) {
                return Err(Error::MissingEndpoint {
                    source_id: edge.source.to_string(),
                    target_id: edge.target.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn node(&self, id: NodeId) -> Option<&PositionedNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

/// The `{nodes, edges}` payload plus what the hosting page needs to mount
/// its graph surface: the viewport and the focal node id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphDocument {
    pub width: f64,
    pub height: f64,
    pub focus: NodeId,
    pub graph: FamilyGraph,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
        let mut it = points.into_iter();
        let (x0, y0) = it.next()?;
        let mut b = Self {
            min_x: x0,
            min_y: y0,
            max_x: x0,
            max_y: y0,
        };
        for (x, y) in it {
            b.min_x = b.min_x.min(x);
            b.min_y = b.min_y.min(y);
            b.max_x = b.max_x.max(x);
            b.max_y = b.max_y.max(y);
        }
        Some(b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowRole {
    #[serde(rename = "parents")]
    Parents,
    #[serde(rename = "family")]
    Family,
    #[serde(rename = "children")]
    Children,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowBox {
    pub person: PersonId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowLayout {
    pub role: RowRole,
    pub y: f64,
    pub width: f64,
    pub boxes: Vec<RowBox>,
}

/// One draw call against a 2D surface, in draw order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ScenePrimitive {
    #[serde(rename = "rect")]
    Rect { x: f64, y: f64, width: f64, height: f64 },
    #[serde(rename = "line")]
    Line { x1: f64, y1: f64, x2: f64, y2: f64 },
    /// `x`/`y` name the center of the labelled box; consumers draw with
    /// centered alignment.
    #[serde(rename = "text")]
    Text { x: f64, y: f64, text: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowsLayout {
    pub width: f64,
    pub height: f64,
    pub rows: Vec<RowLayout>,
    pub primitives: Vec<ScenePrimitive>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum FamilyLayout {
    Graph(GraphDocument),
    Rows(RowsLayout),
}
