//! Adjacency maps and traversals shared by the validator and the simulator.
//!
//! Every node id gets an (initially empty) outgoing and incoming list.  Edges
//! are appended in input order, and an edge is only recorded on a side whose
//! key exists, so edges that mention unknown ids are dropped here.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::models::{Edge, Node};

/// Outgoing/incoming adjacency built from a node and edge snapshot.
#[derive(Debug)]
pub struct Adjacency<'a> {
    outgoing: HashMap<&'a str, Vec<&'a str>>,
    incoming: HashMap<&'a str, Vec<&'a str>>,
}

impl<'a> Adjacency<'a> {
    pub fn build(nodes: &'a [Node], edges: &'a [Edge]) -> Self {
        let mut outgoing: HashMap<&str, Vec<&str>> = HashMap::with_capacity(nodes.len());
        let mut incoming: HashMap<&str, Vec<&str>> = HashMap::with_capacity(nodes.len());

        for node in nodes {
            outgoing.entry(node.id.as_str()).or_default();
            incoming.entry(node.id.as_str()).or_default();
        }

        for edge in edges {
            if let Some(targets) = outgoing.get_mut(edge.source.as_str()) {
                targets.push(edge.target.as_str());
            }
            if let Some(sources) = incoming.get_mut(edge.target.as_str()) {
                sources.push(edge.source.as_str());
            }
        }

        Self { outgoing, incoming }
    }

    pub fn outgoing(&self, id: &str) -> &[&'a str] {
        self.outgoing.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn incoming(&self, id: &str) -> &[&'a str] {
        self.incoming.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Depth-first search from `start` looking for an edge back onto the
    /// active path.  Uses an explicit stack of `(node, next neighbour index)`
    /// frames instead of recursion.
    pub fn has_cycle_from(&self, start: &'a str) -> bool {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut on_path: HashSet<&str> = HashSet::new();
        let mut stack: Vec<(&str, usize)> = vec![(start, 0)];
        visited.insert(start);
        on_path.insert(start);

        while let Some(frame) = stack.last_mut() {
            let node = frame.0;
            let next = self.outgoing(node).get(frame.1).copied();
            frame.1 += 1;

            match next {
                Some(neighbour) if on_path.contains(neighbour) => return true,
                Some(neighbour) => {
                    if visited.insert(neighbour) {
                        on_path.insert(neighbour);
                        stack.push((neighbour, 0));
                    }
                }
                None => {
                    on_path.remove(node);
                    stack.pop();
                }
            }
        }

        false
    }

    /// Breadth-first visitation order from `start`.  Duplicate queue entries
    /// (a node reachable over several in-edges) are skipped when dequeued.
    pub fn bfs_order(&self, start: &'a str) -> Vec<&'a str> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut order: Vec<&str> = Vec::new();
        let mut queue: VecDeque<&str> = VecDeque::from([start]);

        while let Some(id) = queue.pop_front() {
            if !seen.insert(id) {
                continue;
            }
            order.push(id);
            queue.extend(self.outgoing(id).iter().copied());
        }

        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn nodes(ids: &[&str]) -> Vec<Node> {
        ids.iter().map(|id| Node::task(*id, *id)).collect()
    }

    #[test]
    fn edges_to_unknown_ids_are_dropped() {
        let nodes = nodes(&["a", "b"]);
        let edges = vec![Edge::new("a", "b"), Edge::new("a", "ghost"), Edge::new("ghost", "b")];
        let adj = Adjacency::build(&nodes, &edges);

        assert_eq!(adj.outgoing("a"), &["b", "ghost"]);
        assert_eq!(adj.incoming("b"), &["a", "ghost"]);
        assert!(adj.outgoing("ghost").is_empty());
    }

    #[test]
    fn parallel_edges_are_kept_independently() {
        let nodes = nodes(&["a", "b"]);
        let edges = vec![Edge::new("a", "b"), Edge::new("a", "b")];
        let adj = Adjacency::build(&nodes, &edges);
        assert_eq!(adj.outgoing("a").len(), 2);
        assert_eq!(adj.bfs_order("a"), vec!["a", "b"]);
        assert!(!adj.has_cycle_from("a"));
    }

    #[test]
    fn self_loop_is_a_cycle() {
        let nodes = nodes(&["a"]);
        let edges = vec![Edge::new("a", "a")];
        assert!(Adjacency::build(&nodes, &edges).has_cycle_from("a"));
    }

    #[test]
    fn diamond_is_not_a_cycle() {
        //   a
        //  / \
        // b   c
        //  \ /
        //   d
        let nodes = nodes(&["a", "b", "c", "d"]);
        let edges = vec![
            Edge::new("a", "b"),
            Edge::new("a", "c"),
            Edge::new("b", "d"),
            Edge::new("c", "d"),
        ];
        let adj = Adjacency::build(&nodes, &edges);
        assert!(!adj.has_cycle_from("a"));
        assert_eq!(adj.bfs_order("a"), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn cycle_not_reachable_from_start_is_ignored() {
        let nodes = nodes(&["s", "x", "y"]);
        let edges = vec![Edge::new("x", "y"), Edge::new("y", "x")];
        assert!(!Adjacency::build(&nodes, &edges).has_cycle_from("s"));
    }

    #[test]
    fn deep_chain_does_not_overflow() {
        let ids: Vec<String> = (0..50_000).map(|i| format!("n{i}")).collect();
        let nodes: Vec<Node> = ids.iter().map(|id| Node::task(id.as_str(), id.as_str())).collect();
        let edges: Vec<Edge> = ids.windows(2).map(|w| Edge::new(&w[0], &w[1])).collect();
        let adj = Adjacency::build(&nodes, &edges);
        assert!(!adj.has_cycle_from("n0"));
        assert_eq!(adj.bfs_order("n0").len(), ids.len());
    }
}
