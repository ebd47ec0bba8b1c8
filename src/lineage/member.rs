use petgraph::graph::NodeIndex;
use std::fmt;

/// A single named individual in the family tree.
///
/// Members live inside the family's graph arena and refer to each other by
/// `NodeIndex`. The parent link is a lookup-only back reference; the arena
/// owns every node.
#[derive(Debug, Clone)]
pub struct Member {
    name: String,
    parent: Option<NodeIndex>,
    children: Vec<NodeIndex>,
}

impl Member {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the parent of this member. Last write wins.
    pub fn set_parent(&mut self, mother: NodeIndex) {
        self.parent = Some(mother);
    }

    pub fn parent(&self) -> Option<NodeIndex> {
        self.parent
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Whether `mother` is this member's parent, by identity
    pub fn is_parent(&self, mother: NodeIndex) -> bool {
        self.parent == Some(mother)
    }

    /// Append a child. Callers must not add the same child twice.
    pub fn add_child(&mut self, child: NodeIndex) {
        self.children.push(child);
    }

    /// Whether `child` is one of this member's direct children, by identity
    pub fn has_child(&self, child: NodeIndex) -> bool {
        self.children.contains(&child)
    }

    /// Children in insertion order
    pub fn children(&self) -> &[NodeIndex] {
        &self.children
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
