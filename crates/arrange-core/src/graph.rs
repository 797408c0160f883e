//! Input data model for layout: typed nodes connected by directed edges.
//!
//! The editor hands a [`Graph`] to the layout engine. Nodes and edges may
//! be incomplete (missing ids, dangling endpoints); the layout pipeline
//! filters those out before any positions are computed.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Size};

/// Logical node type.
///
/// The kind only influences the assumed footprint of a node and, for
/// physics-based algorithms, its simulation mass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum NodeKind {
    Start,
    End,
    #[default]
    Process,
    Condition,
    Approval,
    Other,
}

impl From<String> for NodeKind {
    fn from(tag: String) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "start" => NodeKind::Start,
            "end" => NodeKind::End,
            "process" => NodeKind::Process,
            "condition" => NodeKind::Condition,
            "approval" => NodeKind::Approval,
            _ => NodeKind::Other,
        }
    }
}

impl NodeKind {
    /// Default footprint assumed for nodes of this kind.
    pub fn footprint(self) -> Size {
        match self {
            NodeKind::Condition => Size::new(120.0, 80.0),
            _ => Size::new(100.0, 60.0),
        }
    }

    /// Lowercase tag, matching the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Start => "start",
            NodeKind::End => "end",
            NodeKind::Process => "process",
            NodeKind::Condition => "condition",
            NodeKind::Approval => "approval",
            NodeKind::Other => "other",
        }
    }
}

/// A diagram node as supplied by the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, rename = "type")]
    kind: NodeKind,
    #[serde(default)]
    position: Point,
}

impl Node {
    /// Creates a node with the given id and kind, positioned at the origin.
    pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: Some(id.into()),
            kind,
            position: Point::default(),
        }
    }

    /// Creates a node that carries no identifier.
    pub fn without_id(kind: NodeKind) -> Self {
        Self {
            id: None,
            kind,
            position: Point::default(),
        }
    }

    /// Sets the current position (builder style).
    pub fn with_position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    /// Returns the identifier, treating an empty string as missing.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn position(&self) -> Point {
        self.position
    }
}

/// A directed edge between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    #[serde(default)]
    id: Option<String>,
    source: String,
    target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    path: Option<Vec<Point>>,
}

impl Edge {
    /// Creates an edge from `source` to `target`.
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            source: source.into(),
            target: target.into(),
            path: None,
        }
    }

    /// Creates an edge that carries no identifier.
    pub fn without_id(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: None,
            source: source.into(),
            target: target.into(),
            path: None,
        }
    }

    /// Sets a previously rendered path (builder style).
    pub fn with_path(mut self, path: Vec<Point>) -> Self {
        self.path = Some(path);
        self
    }

    /// Returns the identifier, treating an empty string as missing.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn path(&self) -> Option<&[Point]> {
        self.path.as_deref()
    }
}

/// A diagram graph: the unit of work for every layout call.
///
/// `Clone` produces a full structural copy, which is how previews are
/// isolated from the caller's graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    #[serde(default)]
    nodes: Vec<Node>,
    #[serde(default)]
    edges: Vec<Edge>,
}

impl Graph {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns the node with the given id, if present.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id() == Some(id))
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_empty_id_is_missing() {
        let json = r#"{"id": "", "type": "process"}"#;
        let node: Node = serde_json::from_str(json).expect("node parses");
        assert_eq!(node.id(), None);
    }

    #[test]
    fn test_node_kind_defaults_and_unknown_tags() {
        let node: Node = serde_json::from_str(r#"{"id": "a"}"#).expect("node parses");
        assert_eq!(node.kind(), NodeKind::Process);
        assert!(node.position().is_zero());

        let node: Node =
            serde_json::from_str(r#"{"id": "b", "type": "subprocess"}"#).expect("node parses");
        assert_eq!(node.kind(), NodeKind::Other);
    }

    #[test]
    fn test_footprint_by_kind() {
        assert_eq!(NodeKind::Process.footprint(), Size::new(100.0, 60.0));
        assert_eq!(NodeKind::Start.footprint(), Size::new(100.0, 60.0));
        assert_eq!(NodeKind::Condition.footprint(), Size::new(120.0, 80.0));
    }

    #[test]
    fn test_graph_deserialize() {
        let json = r#"{
            "nodes": [
                {"id": "start", "type": "start", "position": {"x": 10.0, "y": 20.0}},
                {"id": "check", "type": "condition"}
            ],
            "edges": [
                {"id": "e1", "source": "start", "target": "check"}
            ]
        }"#;
        let graph: Graph = serde_json::from_str(json).expect("graph parses");
        assert_eq!(graph.nodes().len(), 2);
        assert_eq!(graph.edges().len(), 1);
        assert_eq!(
            graph.node("start").map(Node::position),
            Some(Point::new(10.0, 20.0))
        );
        assert_eq!(graph.edges()[0].source(), "start");
        assert!(graph.edges()[0].path().is_none());
    }

    #[test]
    fn test_graph_clone_is_independent() {
        let graph = Graph::new(vec![Node::new("a", NodeKind::Start)], vec![]);
        let copy = graph.clone();
        drop(graph);
        assert_eq!(copy.nodes()[0].id(), Some("a"));
    }
}
