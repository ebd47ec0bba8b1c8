use crate::error::{FamilyError, FamilyResult};
use crate::lineage::member::Member;
use crate::lineage::relationship::Relationship;
use crate::lineage::traversal::Traversal;
use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// A rooted family tree with name based lookup.
///
/// Members are stored in a petgraph arena; edges run from parent to child and
/// mirror the links kept on each `Member`. Names are unique.
#[derive(Debug, Clone)]
pub struct Family {
    graph: DiGraph<Member, ()>,
    names_to_nodes: HashMap<String, NodeIndex>,
    root: NodeIndex,
}

impl Family {
    /// Start a family from its oldest ancestor
    pub fn new(founder: impl Into<String>) -> Self {
        let founder = founder.into();
        let mut graph = DiGraph::new();
        let root = graph.add_node(Member::new(founder.clone()));

        let mut names_to_nodes = HashMap::new();
        names_to_nodes.insert(founder, root);

        Self {
            graph,
            names_to_nodes,
            root,
        }
    }

    /// Attach a batch of children to `mother`, in order.
    ///
    /// The whole batch is checked before anything is added: an unknown mother
    /// fails with `NotFound`, and a child name that is already registered (or
    /// repeated within the batch) fails with `DuplicateName`.
    pub fn set_children<S: AsRef<str>>(
        &mut self,
        mother: &str,
        children: &[S],
    ) -> FamilyResult<Vec<NodeIndex>> {
        let mother_index = self.index_of(mother)?;

        let mut batch = HashSet::new();
        for child in children {
            let name = child.as_ref();
            if self.names_to_nodes.contains_key(name) || !batch.insert(name) {
                return Err(FamilyError::DuplicateName(name.to_string()));
            }
        }

        let mut added = Vec::with_capacity(children.len());
        for child in children {
            let name = child.as_ref();
            let child_index = self.graph.add_node(Member::new(name));
            self.names_to_nodes.insert(name.to_string(), child_index);

            self.graph[child_index].set_parent(mother_index);
            self.graph[mother_index].add_child(child_index);
            self.graph.add_edge(mother_index, child_index, ());

            added.push(child_index);
        }

        debug!("Attached {} children to {}", added.len(), mother);
        Ok(added)
    }

    /// Whether `mother` is the parent of `kid`
    pub fn is_parent(&self, mother: &str, kid: &str) -> FamilyResult<bool> {
        let mother_index = self.index_of(mother)?;
        let kid_index = self.index_of(kid)?;

        Ok(self.graph[kid_index].is_parent(mother_index))
    }

    /// Whether `kid` is a child of `mother`
    pub fn is_child(&self, kid: &str, mother: &str) -> FamilyResult<bool> {
        let mother_index = self.index_of(mother)?;
        let kid_index = self.index_of(kid)?;

        Ok(self.graph[mother_index].has_child(kid_index))
    }

    /// Classify how `a` and `b` are related.
    ///
    /// Returns `Relationship::DIRECT` when both names are the same member or
    /// one is a direct child of the other. Otherwise walks both ancestor
    /// chains to the lowest common ancestor and derives degree and removal
    /// from the two positions.
    pub fn cousin(&self, a: &str, b: &str) -> FamilyResult<Relationship> {
        let a_index = self.index_of(a)?;
        let b_index = self.index_of(b)?;

        if a_index == b_index
            || self.graph[a_index].has_child(b_index)
            || self.graph[b_index].has_child(a_index)
        {
            debug!("{} and {} are directly related", a, b);
            return Ok(Relationship::DIRECT);
        }

        let (_, a_distance, b_distance) = self.meeting_point(a, a_index, b, b_index)?;
        let relationship = Relationship::from_distances(a_distance, b_distance);

        debug!(
            "Classified {} and {} as ({}, {})",
            a, b, relationship.degree, relationship.removed
        );
        Ok(relationship)
    }

    /// Name of the nearest member that is an ancestor of both `a` and `b`.
    ///
    /// A member counts as its own ancestor, so for a parent and child this
    /// is the parent.
    pub fn common_ancestor(&self, a: &str, b: &str) -> FamilyResult<&str> {
        let a_index = self.index_of(a)?;
        let b_index = self.index_of(b)?;

        let (ancestor, _, _) = self.meeting_point(a, a_index, b, b_index)?;
        Ok(self.graph[ancestor].name())
    }

    /// Ancestor chain of `name`: the member itself, its parent, and so on to the root
    pub fn ancestors(&self, name: &str) -> FamilyResult<Vec<&str>> {
        let index = self.index_of(name)?;

        Ok(Traversal::ancestor_chain(&self.graph, index)
            .into_iter()
            .map(|node| self.graph[node].name())
            .collect())
    }

    /// Every member below `name`, breadth-first
    pub fn descendants(&self, name: &str) -> FamilyResult<Vec<&str>> {
        let index = self.index_of(name)?;
        let descendants = Traversal::descendants(&self.graph, index);

        debug!("Found {} descendants for {}", descendants.len(), name);
        Ok(descendants
            .into_iter()
            .map(|node| self.graph[node].name())
            .collect())
    }

    /// Generations between `name` and the founder
    pub fn depth(&self, name: &str) -> FamilyResult<usize> {
        let index = self.index_of(name)?;
        Ok(Traversal::ancestor_chain(&self.graph, index).len() - 1)
    }

    /// Members without children, in insertion order
    pub fn leaves(&self) -> Vec<&str> {
        self.graph
            .node_indices()
            .filter(|&node| {
                self.graph
                    .neighbors_directed(node, Direction::Outgoing)
                    .next()
                    .is_none()
            })
            .map(|node| self.graph[node].name())
            .collect()
    }

    pub fn member(&self, name: &str) -> FamilyResult<&Member> {
        let index = self.index_of(name)?;
        Ok(&self.graph[index])
    }

    /// Parent name of `name`, `None` for the founder
    pub fn parent_of(&self, name: &str) -> FamilyResult<Option<&str>> {
        let member = self.member(name)?;
        Ok(member.parent().map(|parent| self.graph[parent].name()))
    }

    /// Child names of `name` in insertion order
    pub fn children_of(&self, name: &str) -> FamilyResult<Vec<&str>> {
        let member = self.member(name)?;
        Ok(member
            .children()
            .iter()
            .map(|&child| self.graph[child].name())
            .collect())
    }

    pub fn root(&self) -> &Member {
        &self.graph[self.root]
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names_to_nodes.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// All member names in the order they were added
    pub fn names(&self) -> Vec<&str> {
        self.graph
            .node_indices()
            .map(|node| self.graph[node].name())
            .collect()
    }

    /// Graphviz rendering of the tree
    pub fn to_dot(&self) -> String {
        let labelled = self
            .graph
            .map(|_, member| member.name().to_string(), |_, _| String::new());

        format!("{}", Dot::with_config(&labelled, &[Config::EdgeNoLabel]))
    }

    fn index_of(&self, name: &str) -> FamilyResult<NodeIndex> {
        self.names_to_nodes
            .get(name)
            .copied()
            .ok_or_else(|| FamilyError::NotFound(name.to_string()))
    }

    fn meeting_point(
        &self,
        a: &str,
        a_index: NodeIndex,
        b: &str,
        b_index: NodeIndex,
    ) -> FamilyResult<(NodeIndex, usize, usize)> {
        let a_chain = Traversal::ancestor_chain(&self.graph, a_index);
        let b_chain = Traversal::ancestor_chain(&self.graph, b_index);

        let (a_distance, b_distance) = Traversal::lowest_common_ancestor(&a_chain, &b_chain)
            .ok_or_else(|| FamilyError::NoCommonAncestor(a.to_string(), b.to_string()))?;
        Ok((a_chain[a_distance], a_distance, b_distance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn create_sample_family() -> Family {
        let mut family = Family::new("a");
        family.set_children("a", &["b", "c"]).unwrap();
        family.set_children("b", &["d", "e"]).unwrap();
        family.set_children("c", &["f", "g"]).unwrap();
        family.set_children("d", &["h", "i"]).unwrap();
        family.set_children("e", &["j", "k"]).unwrap();
        family.set_children("f", &["l", "m"]).unwrap();
        family.set_children("g", &["n", "o", "p", "q"]).unwrap();
        family
    }

    fn assert_consistent(family: &Family) {
        for (name, &index) in &family.names_to_nodes {
            let member = &family.graph[index];
            assert_eq!(member.name(), name);

            for &child in member.children() {
                assert!(family.graph[child].is_parent(index));
            }

            match member.parent() {
                Some(parent) => {
                    assert!(family.graph[parent].has_child(index));
                    let incoming: Vec<_> = family
                        .graph
                        .neighbors_directed(index, Direction::Incoming)
                        .collect();
                    assert_eq!(incoming, vec![parent]);
                }
                None => assert_eq!(index, family.root),
            }
        }

        let reachable = Traversal::descendants(&family.graph, family.root).len() + 1;
        assert_eq!(reachable, family.names_to_nodes.len());
    }

    #[test]
    fn test_new_family_has_only_founder() {
        let family = Family::new("a");

        assert_eq!(family.len(), 1);
        assert!(!family.is_empty());
        assert_eq!(family.root().name(), "a");
        assert!(family.root().is_root());
        assert!(family.contains("a"));
        assert_eq!(family.parent_of("a").unwrap(), None);
    }

    #[test]
    fn test_sample_family_is_consistent() {
        let family = create_sample_family();

        assert_eq!(family.len(), 17);
        assert_consistent(&family);
    }

    #[test]
    fn test_set_children_keeps_order() {
        let family = create_sample_family();

        assert_eq!(family.children_of("g").unwrap(), vec!["n", "o", "p", "q"]);
        assert_eq!(family.parent_of("p").unwrap(), Some("g"));
        assert_eq!(
            family.names(),
            vec!["a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n", "o", "p", "q"]
        );
    }

    #[test]
    fn test_set_children_appends_on_repeat() {
        let mut family = create_sample_family();
        family.set_children("b", &["r"]).unwrap();

        assert_eq!(family.children_of("b").unwrap(), vec!["d", "e", "r"]);
        assert_consistent(&family);
    }

    #[test]
    fn test_set_children_unknown_mother() {
        let mut family = create_sample_family();

        let err = family.set_children("zed", &["r"]).unwrap_err();
        assert_eq!(err, FamilyError::NotFound("zed".to_string()));
        assert!(!family.contains("r"));
    }

    #[test]
    fn test_set_children_rejects_registered_name() {
        let mut family = create_sample_family();

        let err = family.set_children("h", &["r", "c"]).unwrap_err();
        assert_eq!(err, FamilyError::DuplicateName("c".to_string()));

        // nothing from the rejected batch was attached
        assert!(!family.contains("r"));
        assert!(family.children_of("h").unwrap().is_empty());
        assert_eq!(family.parent_of("c").unwrap(), Some("a"));
        assert_consistent(&family);
    }

    #[test]
    fn test_set_children_rejects_repeat_within_batch() {
        let mut family = Family::new("a");

        let err = family.set_children("a", &["b", "b"]).unwrap_err();
        assert_eq!(err, FamilyError::DuplicateName("b".to_string()));
        assert_eq!(family.len(), 1);
    }

    #[test]
    fn test_set_children_rejects_founder_name() {
        let mut family = Family::new("a");

        let err = family.set_children("a", &["a"]).unwrap_err();
        assert_eq!(err, FamilyError::DuplicateName("a".to_string()));
    }

    #[test]
    fn test_is_parent_and_is_child() {
        let family = create_sample_family();

        assert!(family.is_parent("a", "b").unwrap());
        assert!(family.is_parent("g", "q").unwrap());
        assert!(!family.is_parent("b", "a").unwrap());
        assert!(!family.is_parent("a", "d").unwrap());

        assert!(family.is_child("b", "a").unwrap());
        assert!(family.is_child("q", "g").unwrap());
        assert!(!family.is_child("a", "b").unwrap());
        assert!(!family.is_child("h", "b").unwrap());
    }

    #[test]
    fn test_queries_with_unknown_names() {
        let family = create_sample_family();
        let missing = FamilyError::NotFound("zed".to_string());

        assert_eq!(family.is_parent("zed", "b").unwrap_err(), missing);
        assert_eq!(family.is_parent("a", "zed").unwrap_err(), missing);
        assert_eq!(family.is_child("zed", "a").unwrap_err(), missing);
        assert_eq!(family.is_child("b", "zed").unwrap_err(), missing);
        assert_eq!(family.cousin("zed", "b").unwrap_err(), missing);
        assert_eq!(family.cousin("b", "zed").unwrap_err(), missing);
        assert_eq!(family.ancestors("zed").unwrap_err(), missing);
        assert_eq!(family.descendants("zed").unwrap_err(), missing);
        assert_eq!(family.depth("zed").unwrap_err(), missing);
        assert_eq!(family.common_ancestor("a", "zed").unwrap_err(), missing);
        assert!(family.member("zed").is_err());
    }

    #[test]
    fn test_cousin_sample_pairs() {
        let family = create_sample_family();
        let cousin = |a, b| family.cousin(a, b).unwrap().as_tuple();

        assert_eq!(cousin("b", "c"), (1, 0));
        assert_eq!(cousin("d", "f"), (2, 0));
        assert_eq!(cousin("i", "n"), (3, 0));
        assert_eq!(cousin("q", "e"), (3, 1));
        assert_eq!(cousin("h", "c"), (3, 2));
        assert_eq!(cousin("h", "a"), (3, 3));
        assert_eq!(cousin("h", "h"), (-1, 0));
        assert_eq!(cousin("a", "a"), (-1, 0));
    }

    #[test]
    fn test_cousin_direct_lineage_both_ways() {
        let family = create_sample_family();

        for (mother, kid) in [("a", "b"), ("b", "d"), ("g", "q"), ("d", "h")] {
            assert_eq!(family.cousin(mother, kid).unwrap(), Relationship::DIRECT);
            assert_eq!(family.cousin(kid, mother).unwrap(), Relationship::DIRECT);
        }
    }

    #[test]
    fn test_cousin_siblings_share_parent() {
        let family = create_sample_family();

        assert_eq!(family.cousin("n", "q").unwrap().as_tuple(), (1, 0));
        assert_eq!(family.cousin("h", "i").unwrap().as_tuple(), (1, 0));
    }

    #[test]
    fn test_cousin_grandparent_is_not_direct() {
        let family = create_sample_family();

        // only one generation counts as direct lineage
        assert_eq!(family.cousin("b", "h").unwrap().as_tuple(), (2, 2));
        assert_eq!(family.cousin("h", "b").unwrap().as_tuple(), (2, 2));
    }

    #[test]
    fn test_ancestors_and_depth() {
        let family = create_sample_family();

        assert_eq!(family.ancestors("h").unwrap(), vec!["h", "d", "b", "a"]);
        assert_eq!(family.ancestors("a").unwrap(), vec!["a"]);
        assert_eq!(family.depth("h").unwrap(), 3);
        assert_eq!(family.depth("c").unwrap(), 1);
        assert_eq!(family.depth("a").unwrap(), 0);
    }

    #[test]
    fn test_descendants_and_leaves() {
        let family = create_sample_family();

        assert_eq!(family.descendants("c").unwrap(), vec!["f", "g", "l", "m", "n", "o", "p", "q"]);
        assert!(family.descendants("q").unwrap().is_empty());
        assert_eq!(
            family.leaves(),
            vec!["h", "i", "j", "k", "l", "m", "n", "o", "p", "q"]
        );
    }

    #[test]
    fn test_common_ancestor() {
        let family = create_sample_family();

        assert_eq!(family.common_ancestor("q", "e").unwrap(), "a");
        assert_eq!(family.common_ancestor("h", "j").unwrap(), "b");
        assert_eq!(family.common_ancestor("n", "o").unwrap(), "g");
        assert_eq!(family.common_ancestor("d", "h").unwrap(), "d");
        assert_eq!(family.common_ancestor("k", "k").unwrap(), "k");
    }

    #[test]
    fn test_common_ancestor_matches_cousin_distances() {
        let family = create_sample_family();
        let names = family.names();

        for a in &names {
            for b in &names {
                let relationship = family.cousin(a, b).unwrap();
                if relationship.is_direct() {
                    continue;
                }

                let ancestor = family.common_ancestor(a, b).unwrap();
                let ancestor_depth = family.depth(ancestor).unwrap();
                let a_distance = family.depth(a).unwrap() - ancestor_depth;
                let b_distance = family.depth(b).unwrap() - ancestor_depth;

                assert_eq!(
                    relationship,
                    Relationship::from_distances(a_distance, b_distance),
                    "{} and {} via {}",
                    a,
                    b,
                    ancestor
                );
            }
        }
    }

    #[test]
    fn test_to_dot_lists_members_and_edges() {
        let mut family = Family::new("a");
        family.set_children("a", &["b"]).unwrap();

        let dot = family.to_dot();
        assert!(dot.starts_with("digraph {"));
        assert!(dot.contains("label = \"a\""));
        assert!(dot.contains("label = \"b\""));
        assert!(dot.contains("0 -> 1"));
    }

    /// Builds a random tree: member `i` (i > 0) is a child of some member before it.
    fn arbitrary_family() -> impl Strategy<Value = Family> {
        prop::collection::vec(any::<prop::sample::Index>(), 1..40).prop_map(|picks| {
            let mut family = Family::new("m0");
            for (offset, pick) in picks.iter().enumerate() {
                let mother = format!("m{}", pick.index(offset + 1));
                let child = format!("m{}", offset + 1);
                family.set_children(&mother, &[child]).unwrap();
            }
            family
        })
    }

    proptest! {
        #[test]
        fn prop_cousin_is_symmetric(
            family in arbitrary_family(),
            a in any::<prop::sample::Index>(),
            b in any::<prop::sample::Index>(),
        ) {
            let names = family.names();
            let a = names[a.index(names.len())];
            let b = names[b.index(names.len())];

            prop_assert_eq!(family.cousin(a, b).unwrap(), family.cousin(b, a).unwrap());
        }

        #[test]
        fn prop_cousin_with_self_is_direct(
            family in arbitrary_family(),
            pick in any::<prop::sample::Index>(),
        ) {
            let names = family.names();
            let name = names[pick.index(names.len())];

            prop_assert_eq!(family.cousin(name, name).unwrap(), Relationship::DIRECT);
        }

        #[test]
        fn prop_random_trees_stay_consistent(family in arbitrary_family()) {
            assert_consistent(&family);
        }
    }
}
