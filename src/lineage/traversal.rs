use crate::lineage::member::Member;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::VecDeque;

/// Walks over the member arena used by `Family`
pub struct Traversal;

impl Traversal {
    /// The node itself, then its parent, grandparent, and so on up to the root.
    ///
    /// Index `i` in the returned chain is `i` generations above `start`.
    pub fn ancestor_chain(graph: &DiGraph<Member, ()>, start: NodeIndex) -> Vec<NodeIndex> {
        let mut chain = vec![start];
        let mut current = graph[start].parent();

        while let Some(parent) = current {
            chain.push(parent);
            current = graph[parent].parent();
        }

        chain
    }

    /// Positions of the lowest common ancestor in both chains.
    ///
    /// Scans `a_chain` from the bottom and takes the first node that also
    /// appears in `b_chain`. Returns `None` when the chains never meet.
    pub fn lowest_common_ancestor(
        a_chain: &[NodeIndex],
        b_chain: &[NodeIndex],
    ) -> Option<(usize, usize)> {
        a_chain.iter().enumerate().find_map(|(a_position, node)| {
            b_chain
                .iter()
                .position(|candidate| candidate == node)
                .map(|b_position| (a_position, b_position))
        })
    }

    /// Every member below `start`, breadth-first, siblings in insertion order
    pub fn descendants(graph: &DiGraph<Member, ()>, start: NodeIndex) -> Vec<NodeIndex> {
        let mut descendants = Vec::new();
        let mut queue = VecDeque::new();
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            for &child in graph[current].children() {
                descendants.push(child);
                queue.push_back(child);
            }
        }

        descendants
    }
}
