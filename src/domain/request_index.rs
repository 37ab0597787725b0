//! The [`RequestIndex`] ties the ordered index, the urgency ranking and the
//! location graph together over one snapshot.
//!
//! The index knows nothing about where records come from or how they are
//! displayed. It borrows the records it is given and never changes after
//! construction: a new snapshot means a new index.

use std::collections::BTreeMap;

use tracing::{debug, instrument};

use crate::domain::{
    LocationGraph, OrderedIndex, PriorityRanking, RequestRecord,
    location_graph::InspectionRoute, ordered_index::InOrder, reference,
};

/// Read-only indexes over a snapshot of service requests.
#[derive(Debug, Default)]
pub struct RequestIndex<'a> {
    records: Vec<&'a RequestRecord>,
    ordered: OrderedIndex<'a>,
    ranking: PriorityRanking<'a>,
    locations: LocationGraph<'a>,
}

impl<'a> RequestIndex<'a> {
    /// Builds every index over the given snapshot.
    ///
    /// An empty snapshot is valid; every query then comes back empty.
    #[instrument(level = "debug", skip_all)]
    pub fn new<I>(snapshot: I) -> Self
    where
        I: IntoIterator<Item = &'a RequestRecord>,
    {
        let records: Vec<_> = snapshot.into_iter().collect();

        let mut ordered = OrderedIndex::new();
        let mut ranking = PriorityRanking::new();
        for &record in &records {
            ordered.insert(record);
            ranking.insert(record);
        }

        let locations = LocationGraph::build(records.iter().copied());

        debug!(
            records = records.len(),
            depth = ordered.depth(),
            locations = locations.len(),
            "built request index"
        );

        Self {
            records,
            ordered,
            ranking,
            locations,
        }
    }

    /// The snapshot, in the order it was supplied.
    #[must_use]
    pub fn records(&self) -> &[&'a RequestRecord] {
        &self.records
    }

    /// Number of records in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the snapshot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in ascending identifier order.
    #[must_use]
    pub fn ordered_by_id(&self) -> InOrder<'_, 'a> {
        self.ordered.iter()
    }

    /// Up to `count` records, most urgent first.
    pub fn top_priority(&self, count: usize) -> impl Iterator<Item = &'a RequestRecord> + use<'a> {
        self.ranking.top(count)
    }

    /// The breadth-first inspection route over the report locations.
    #[must_use]
    pub fn inspection_route(&self) -> InspectionRoute<'_, 'a> {
        self.locations.inspection_route()
    }

    /// The location graph.
    #[must_use]
    pub const fn location_graph(&self) -> &LocationGraph<'a> {
        &self.locations
    }

    /// A snapshot of the location adjacency list.
    #[must_use]
    pub fn location_adjacency(&self) -> BTreeMap<&'a str, Vec<&'a str>> {
        self.locations.adjacency()
    }

    /// Finds a record by full identifier or eight-character reference code.
    #[must_use]
    pub fn find_by_reference(&self, key: &str) -> Option<&'a RequestRecord> {
        reference::resolve(self.records.iter().copied(), key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, Priority};

    fn record(id: &str, location: &str, priority: u8) -> RequestRecord {
        RequestRecord::new_with_id(
            id,
            location,
            Category::Sanitation,
            Priority::new(priority).unwrap(),
            "",
        )
    }

    fn sample() -> Vec<RequestRecord> {
        vec![
            record("c3000000aaaa", "Harbour", 3),
            record("a1000000bbbb", "Main Road", 1),
            record("b2000000cccc", "Harbour", 2),
            record("d4000000dddd", "Station", 5),
        ]
    }

    #[test]
    fn empty_snapshot_answers_every_query() {
        let index = RequestIndex::new(std::iter::empty());

        assert!(index.is_empty());
        assert_eq!(index.ordered_by_id().count(), 0);
        assert_eq!(index.top_priority(3).count(), 0);
        assert_eq!(index.inspection_route().count(), 0);
        assert!(index.location_adjacency().is_empty());
        assert!(index.find_by_reference("a1000000").is_none());
    }

    #[test]
    fn default_index_is_empty() {
        let index = RequestIndex::default();
        assert_eq!(index.len(), 0);
        assert_eq!(index.ordered_by_id().next(), None);
    }

    #[test]
    fn queries_over_a_snapshot() {
        let records = sample();
        let index = RequestIndex::new(&records);

        let ordered: Vec<_> = index.ordered_by_id().map(RequestRecord::id).collect();
        assert_eq!(
            ordered,
            ["a1000000bbbb", "b2000000cccc", "c3000000aaaa", "d4000000dddd"]
        );

        let urgent: Vec<_> = index.top_priority(2).map(RequestRecord::id).collect();
        assert_eq!(urgent, ["a1000000bbbb", "b2000000cccc"]);

        let route: Vec<_> = index.inspection_route().collect();
        assert_eq!(route, [("Harbour", "Main Road"), ("Main Road", "Station")]);

        let found = index.find_by_reference("B2000000").unwrap();
        assert_eq!(found.id(), "b2000000cccc");
    }

    #[test]
    fn snapshot_order_is_preserved() {
        let records = sample();
        let index = RequestIndex::new(&records);

        let ids: Vec<_> = index.records().iter().map(|record| record.id()).collect();
        assert_eq!(
            ids,
            ["c3000000aaaa", "a1000000bbbb", "b2000000cccc", "d4000000dddd"]
        );
    }

    #[test]
    fn records_are_borrowed_not_copied() {
        let records = sample();
        let index = RequestIndex::new(&records);

        for (indexed, original) in index.records().iter().zip(&records) {
            assert!(std::ptr::eq(*indexed, original));
        }
    }

    #[test]
    fn index_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RequestIndex<'static>>();
    }
}
