//! Urgency ranking over a snapshot.

use std::{cmp::Ordering, collections::BinaryHeap};

use crate::domain::{Priority, RequestRecord};

/// A heap entry. Ordered so that the max-heap surfaces the smallest priority
/// value first, and among equal priorities the earliest inserted.
#[derive(Debug, Clone)]
struct Entry<'a> {
    priority: Priority,
    sequence: usize,
    record: &'a RequestRecord,
}

impl Entry<'_> {
    const fn key(&self) -> (Priority, usize) {
        (self.priority, self.sequence)
    }
}

impl PartialEq for Entry<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Entry<'_> {}

impl PartialOrd for Entry<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.key().cmp(&self.key())
    }
}

/// Minimum-priority heap of records.
///
/// Ties between equal priorities are broken by insertion order, so building
/// from the same sequence always ranks the same way.
#[derive(Debug, Default)]
pub struct PriorityRanking<'a> {
    heap: BinaryHeap<Entry<'a>>,
}

impl<'a> PriorityRanking<'a> {
    /// Creates an empty ranking.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }

    /// Adds a record keyed by its priority.
    pub fn insert(&mut self, record: &'a RequestRecord) {
        let sequence = self.heap.len();
        self.heap.push(Entry {
            priority: record.priority(),
            sequence,
            record,
        });
    }

    /// Number of ranked records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the ranking holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// The most urgent record, if any.
    #[must_use]
    pub fn peek(&self) -> Option<&'a RequestRecord> {
        self.heap.peek().map(|entry| entry.record)
    }

    /// Yields up to `count` records, most urgent first.
    ///
    /// Extraction runs against a copy of the heap. The ranking itself is left
    /// untouched, so repeated calls return the same records.
    pub fn top(&self, count: usize) -> impl Iterator<Item = &'a RequestRecord> + use<'a> {
        let mut copy = if count == 0 {
            BinaryHeap::new()
        } else {
            self.heap.iter().cloned().collect::<BinaryHeap<_>>()
        };
        std::iter::from_fn(move || copy.pop().map(|entry| entry.record)).take(count)
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::domain::Category;

    fn record(id: &str, priority: u8) -> RequestRecord {
        RequestRecord::new_with_id(
            id,
            "Main Road",
            Category::Roads,
            Priority::new(priority).unwrap(),
            "",
        )
    }

    fn ranked<'a>(records: &'a [RequestRecord]) -> PriorityRanking<'a> {
        let mut ranking = PriorityRanking::new();
        for record in records {
            ranking.insert(record);
        }
        ranking
    }

    #[test]
    fn extracts_most_urgent_first() {
        let records = [record("a", 3), record("b", 1), record("c", 5), record("d", 2)];
        let ranking = ranked(&records);

        let ids: Vec<_> = ranking.top(4).map(RequestRecord::id).collect();
        assert_eq!(ids, ["b", "d", "a", "c"]);
    }

    #[test_case(0, 0; "zero")]
    #[test_case(2, 2; "fewer than available")]
    #[test_case(3, 3; "exactly available")]
    #[test_case(10, 3; "more than available")]
    fn returns_at_most_count(count: usize, expected: usize) {
        let records = [record("a", 3), record("b", 1), record("c", 2)];
        let ranking = ranked(&records);
        assert_eq!(ranking.top(count).count(), expected);
    }

    #[test]
    fn extraction_does_not_drain_the_ranking() {
        let records = [record("a", 2), record("b", 1)];
        let ranking = ranked(&records);

        let first: Vec<_> = ranking.top(1).map(RequestRecord::id).collect();
        let second: Vec<_> = ranking.top(1).map(RequestRecord::id).collect();
        assert_eq!(first, ["b"]);
        assert_eq!(first, second);
        assert_eq!(ranking.len(), 2);
        assert_eq!(ranking.peek().map(RequestRecord::id), Some("b"));
    }

    #[test]
    fn equal_priorities_keep_insertion_order() {
        let records = [record("z", 2), record("y", 2), record("x", 2), record("w", 1)];
        let ranking = ranked(&records);

        let ids: Vec<_> = ranking.top(4).map(RequestRecord::id).collect();
        assert_eq!(ids, ["w", "z", "y", "x"]);
    }

    #[test]
    fn empty_ranking_yields_nothing() {
        let ranking = PriorityRanking::new();
        assert!(ranking.is_empty());
        assert_eq!(ranking.top(5).next(), None);
    }
}
