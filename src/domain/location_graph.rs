//! Adjacency graph over the locations named in a snapshot.
//!
//! Distinct locations become nodes. Consecutive locations, in order of first
//! appearance, are joined by an undirected edge, so the graph is a simple path
//! `L0 - L1 - L2 - ...`. No geographic proximity is inferred.

use std::collections::{BTreeMap, HashMap, VecDeque};

use petgraph::graphmap::UnGraphMap;
use tracing::{debug, instrument};

use crate::domain::RequestRecord;

/// Normalises a location for use as a graph node.
///
/// Returns `None` for locations that are blank after trimming.
fn normalize(location: &str) -> Option<&str> {
    let trimmed = location.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Identity key of a location: locations differing only by case are the same
/// node.
fn identity(location: &str) -> String {
    location.to_lowercase()
}

/// Undirected, loop-free graph of request locations.
///
/// Nodes are positions in `locations`, which keeps the first-seen spelling of
/// each location for display. [`UnGraphMap`] stores neighbours in insertion
/// order, which keeps traversal reproducible.
#[derive(Debug, Default)]
pub struct LocationGraph<'a> {
    locations: Vec<&'a str>,
    lookup: HashMap<String, usize>,
    graph: UnGraphMap<usize, ()>,
}

impl<'a> LocationGraph<'a> {
    /// Builds the graph from the locations of the given records.
    #[instrument(level = "debug", skip_all)]
    pub fn build<I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a RequestRecord>,
    {
        let mut locations = Vec::new();
        let mut lookup = HashMap::new();

        for location in records
            .into_iter()
            .filter_map(|record| normalize(record.location()))
        {
            lookup.entry(identity(location)).or_insert_with(|| {
                locations.push(location);
                locations.len() - 1
            });
        }

        let mut graph = UnGraphMap::with_capacity(locations.len(), locations.len());
        for node in 0..locations.len() {
            graph.add_node(node);
        }
        for node in 1..locations.len() {
            graph.add_edge(node - 1, node, ());
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "built location graph"
        );

        Self {
            locations,
            lookup,
            graph,
        }
    }

    /// Number of distinct locations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Whether no record named a location.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Distinct locations in order of first appearance.
    #[must_use]
    pub fn locations(&self) -> &[&'a str] {
        &self.locations
    }

    /// Whether the two locations are adjacent. Comparison ignores case and
    /// surrounding whitespace.
    #[must_use]
    pub fn contains_edge(&self, a: &str, b: &str) -> bool {
        match (self.node(a), self.node(b)) {
            (Some(a), Some(b)) => self.graph.contains_edge(a, b),
            _ => false,
        }
    }

    /// Neighbours of a location, in the order the edges were added.
    ///
    /// Returns `None` if the location is not in the graph.
    pub fn neighbors(&self, location: &str) -> Option<impl Iterator<Item = &'a str> + '_> {
        let node = self.node(location)?;
        Some(self.graph.neighbors(node).map(|n| self.locations[n]))
    }

    /// A snapshot of the adjacency list, keyed by display name.
    #[must_use]
    pub fn adjacency(&self) -> BTreeMap<&'a str, Vec<&'a str>> {
        self.locations
            .iter()
            .enumerate()
            .map(|(node, &name)| {
                let neighbors = self.graph.neighbors(node).map(|n| self.locations[n]);
                (name, neighbors.collect())
            })
            .collect()
    }

    /// Breadth-first traversal from the first location seen.
    ///
    /// Each step is the `(from, to)` edge by which a location was first
    /// reached. Together the steps form a spanning tree of the graph; with
    /// unit edge weights it is also a minimum spanning tree.
    #[must_use]
    pub fn inspection_route(&self) -> InspectionRoute<'_, 'a> {
        let mut visited = vec![false; self.locations.len()];
        let mut queue = VecDeque::new();
        if let Some(start) = visited.first_mut() {
            *start = true;
            queue.push_back(0);
        }
        InspectionRoute {
            graph: self,
            visited,
            queue,
            pending: VecDeque::new(),
        }
    }

    fn node(&self, location: &str) -> Option<usize> {
        normalize(location).and_then(|location| self.lookup.get(&identity(location)).copied())
    }
}

/// Lazy breadth-first route over a [`LocationGraph`].
#[derive(Debug)]
pub struct InspectionRoute<'g, 'a> {
    graph: &'g LocationGraph<'a>,
    visited: Vec<bool>,
    queue: VecDeque<usize>,
    pending: VecDeque<(usize, usize)>,
}

impl<'a> Iterator for InspectionRoute<'_, 'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let graph = self.graph;
        while self.pending.is_empty() {
            let current = self.queue.pop_front()?;
            for neighbor in graph.graph.neighbors(current) {
                if self.visited[neighbor] {
                    continue;
                }
                self.visited[neighbor] = true;
                self.queue.push_back(neighbor);
                self.pending.push_back((current, neighbor));
            }
        }

        let (from, to) = self.pending.pop_front()?;
        Some((graph.locations[from], graph.locations[to]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, Priority};

    fn records(locations: &[&str]) -> Vec<RequestRecord> {
        locations
            .iter()
            .enumerate()
            .map(|(i, location)| {
                RequestRecord::new_with_id(
                    format!("id-{i}"),
                    location,
                    Category::Other,
                    Priority::LEAST_URGENT,
                    "",
                )
            })
            .collect()
    }

    #[test]
    fn repeated_locations_form_a_path() {
        let records = records(&["A", "B", "A", "C"]);
        let graph = LocationGraph::build(&records);

        assert_eq!(graph.locations(), ["A", "B", "C"]);
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.contains_edge("A", "B"));
        assert!(graph.contains_edge("B", "C"));
        assert!(!graph.contains_edge("A", "C"));

        let route: Vec<_> = graph.inspection_route().collect();
        assert_eq!(route, [("A", "B"), ("B", "C")]);
    }

    #[test]
    fn locations_are_trimmed_and_case_insensitive() {
        let records = records(&["  Main Road", "main road ", "MAIN ROAD", "Harbour"]);
        let graph = LocationGraph::build(&records);

        assert_eq!(graph.locations(), ["Main Road", "Harbour"]);
        assert!(graph.contains_edge("main road", "HARBOUR"));
    }

    #[test]
    fn blank_locations_are_ignored() {
        let records = records(&["", "   ", "Depot"]);
        let graph = LocationGraph::build(&records);

        assert_eq!(graph.locations(), ["Depot"]);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.inspection_route().next(), None);
    }

    #[test]
    fn edges_are_symmetric_and_loop_free() {
        let records = records(&["A", "B", "C", "D"]);
        let graph = LocationGraph::build(&records);
        let adjacency = graph.adjacency();

        for (location, neighbors) in &adjacency {
            assert!(!neighbors.contains(location));
            for neighbor in neighbors {
                assert!(adjacency[neighbor].contains(location));
            }
        }
    }

    #[test]
    fn neighbors_follow_insertion_order() {
        let records = records(&["A", "B", "C"]);
        let graph = LocationGraph::build(&records);

        let neighbors: Vec<_> = graph.neighbors("b").unwrap().collect();
        assert_eq!(neighbors, ["A", "C"]);
        assert!(graph.neighbors("Z").is_none());
    }

    #[test]
    fn route_spans_every_location() {
        let records = records(&["A", "B", "C", "D", "E"]);
        let graph = LocationGraph::build(&records);

        let route: Vec<_> = graph.inspection_route().collect();
        assert_eq!(route.len(), graph.len() - 1);
        assert_eq!(route.first(), Some(&("A", "B")));
        assert_eq!(route.last(), Some(&("D", "E")));
    }

    #[test]
    fn empty_graph_has_empty_route() {
        let graph = LocationGraph::build(std::iter::empty());
        assert!(graph.is_empty());
        assert!(graph.adjacency().is_empty());
        assert_eq!(graph.inspection_route().next(), None);
    }
}
