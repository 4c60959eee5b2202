//! Root -> language -> repository tree, stored as a pre-order arena.
//!
//! Parents own their children through index lists. The `parent` link is a
//! plain index used for walking towards the root and never for ownership.
//! Pre-order means index 0 is the root and every parent precedes its
//! children, which the layout and color passes rely on.

use crate::models::{short_name, LanguageSnapshot};

pub type NodeId = usize;

pub const ROOT: NodeId = 0;
pub const ROOT_NAME: &str = "All Languages";

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: String,
    pub url: Option<String>,
    /// Sum of leaf `loc` below this node (the leaf's own `loc` for leaves).
    pub value: u64,
    pub depth: usize,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl Node {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Name as shown in the legend: owner prefix stripped.
    pub fn label(&self) -> &str {
        short_name(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Hierarchy {
    nodes: Vec<Node>,
}

impl Hierarchy {
    pub fn from_snapshot(snapshot: &LanguageSnapshot) -> Self {
        let mut nodes = vec![Node {
            name: ROOT_NAME.to_string(),
            url: None,
            value: 0,
            depth: 0,
            parent: None,
            children: Vec::new(),
        }];

        for (language, entries) in snapshot.iter() {
            let lang_id = nodes.len();
            nodes[ROOT].children.push(lang_id);
            nodes.push(Node {
                name: language.to_string(),
                url: None,
                value: 0,
                depth: 1,
                parent: Some(ROOT),
                children: Vec::new(),
            });

            for entry in entries {
                let repo_id = nodes.len();
                nodes[lang_id].children.push(repo_id);
                nodes.push(Node {
                    name: entry.name.clone(),
                    url: entry.url.clone(),
                    value: entry.loc,
                    depth: 2,
                    parent: Some(lang_id),
                    children: Vec::new(),
                });
            }
        }

        // children always follow their parent, so a reverse sweep sums bottom-up
        for id in (1..nodes.len()).rev() {
            let value = nodes[id].value;
            if let Some(parent) = nodes[id].parent {
                nodes[parent].value += value;
            }
        }

        Self { nodes }
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn max_depth(&self) -> usize {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    pub fn find_child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.nodes[parent]
            .children
            .iter()
            .copied()
            .find(|&c| self.nodes[c].name == name)
    }

    pub fn find_language(&self, name: &str) -> Option<NodeId> {
        self.find_child(ROOT, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sunburst::fixtures::sample_snapshot;

    #[test]
    fn builds_pre_order_arena() {
        let h = Hierarchy::from_snapshot(&sample_snapshot());
        let names: Vec<_> = h.nodes().iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec![ROOT_NAME, "Go", "a/x", "Rust", "a/y", "b/z"]);
        assert_eq!(h.node(ROOT).children, vec![1, 3]);
        assert_eq!(h.node(3).children, vec![4, 5]);
        assert_eq!(h.node(5).parent, Some(3));
        assert_eq!(h.node(ROOT).parent, None);
        assert_eq!(h.max_depth(), 2);
    }

    #[test]
    fn values_sum_upwards() {
        let h = Hierarchy::from_snapshot(&sample_snapshot());
        assert_eq!(h.node(1).value, 100);
        assert_eq!(h.node(3).value, 50);
        assert_eq!(h.node(ROOT).value, 150);
        for node in h.nodes().iter().filter(|n| !n.is_leaf()) {
            let sum: u64 = node.children.iter().map(|&c| h.node(c).value).sum();
            assert_eq!(node.value, sum);
        }
    }

    #[test]
    fn languages_are_found_by_name() {
        let h = Hierarchy::from_snapshot(&sample_snapshot());
        assert_eq!(h.find_language("Rust"), Some(3));
        assert_eq!(h.find_language("a/x"), None);
        assert_eq!(h.node(4).label(), "y");
    }

    #[test]
    fn empty_snapshot_is_a_lone_root() {
        let h = Hierarchy::from_snapshot(&LanguageSnapshot::new());
        assert_eq!(h.len(), 1);
        assert!(h.node(ROOT).is_leaf());
        assert_eq!(h.node(ROOT).value, 0);
    }
}
