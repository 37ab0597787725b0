//! Binary search tree over request identifiers.
//!
//! Identifiers compare byte-wise. The tree is never rebalanced, so its shape
//! follows insertion order; snapshots are bounded and rebuilt wholesale.

use crate::domain::RequestRecord;

#[derive(Debug)]
struct Node<'a> {
    record: &'a RequestRecord,
    left: Option<Box<Node<'a>>>,
    right: Option<Box<Node<'a>>>,
}

impl<'a> Node<'a> {
    const fn leaf(record: &'a RequestRecord) -> Self {
        Self {
            record,
            left: None,
            right: None,
        }
    }
}

/// Records ordered by identifier.
///
/// For every node, identifiers in the left subtree are less than or equal to
/// the node's identifier and identifiers in the right subtree are strictly
/// greater. Equal identifiers therefore collect in the left subtree, and
/// in-order enumeration yields them latest-inserted first.
#[derive(Debug, Default)]
pub struct OrderedIndex<'a> {
    root: Option<Box<Node<'a>>>,
    len: usize,
}

impl<'a> OrderedIndex<'a> {
    /// Creates an empty index.
    #[must_use]
    pub const fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Inserts a record as a new leaf.
    pub fn insert(&mut self, record: &'a RequestRecord) {
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            slot = if record.id() <= node.record.id() {
                &mut node.left
            } else {
                &mut node.right
            };
        }
        *slot = Some(Box::new(Node::leaf(record)));
        self.len += 1;
    }

    /// Number of records in the index.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the index holds no records.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of levels in the tree (0 when empty).
    #[must_use]
    pub fn depth(&self) -> usize {
        fn depth_of(node: Option<&Node<'_>>) -> usize {
            node.map_or(0, |node| {
                1 + depth_of(node.left.as_deref()).max(depth_of(node.right.as_deref()))
            })
        }
        depth_of(self.root.as_deref())
    }

    /// Walks the tree in order: left subtree, node, right subtree.
    ///
    /// Records come out in ascending identifier order. Every call starts a
    /// fresh walk.
    #[must_use]
    pub fn iter(&self) -> InOrder<'_, 'a> {
        let mut walk = InOrder { stack: Vec::new() };
        walk.descend_left(self.root.as_deref());
        walk
    }
}

impl<'t, 'a> IntoIterator for &'t OrderedIndex<'a> {
    type Item = &'a RequestRecord;
    type IntoIter = InOrder<'t, 'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy in-order walk over an [`OrderedIndex`].
#[derive(Debug)]
pub struct InOrder<'t, 'a> {
    stack: Vec<&'t Node<'a>>,
}

impl<'t, 'a> InOrder<'t, 'a> {
    fn descend_left(&mut self, mut node: Option<&'t Node<'a>>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left.as_deref();
        }
    }
}

impl<'a> Iterator for InOrder<'_, 'a> {
    type Item = &'a RequestRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.descend_left(node.right.as_deref());
        Some(node.record)
    }
}
