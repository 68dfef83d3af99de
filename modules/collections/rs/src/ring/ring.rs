use std::fmt::{Display, Formatter};

use derive_more::From;

/// Stable handle of a node inside a [`Ring`]. Handles stay valid for the whole lifetime of the
/// ring: nodes are never moved or freed, only relinked.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, From)]
pub struct NodeId(usize);

impl NodeId {
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug)]
struct Node<T> {
    value: T,
    prev: NodeId,
    next: NodeId,
}

/// Circular doubly-linked list with nodes stored in a `Vec`-based arena.
///
/// Every node links to its predecessor and successor, the last node links back to the first one.
/// The `head` node anchors position 0 but is not structurally special: moving it with
/// [`Ring::set_head`] rotates the list in O(1). Positional access requires walking the links.
#[derive(Clone, Debug)]
pub struct Ring<T> {
    nodes: Vec<Node<T>>,
    head: Option<NodeId>,
}

impl<T> Default for Ring<T> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            head: None,
        }
    }
}

impl<T> Ring<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            head: None,
        }
    }

    pub fn reserve(&mut self, additional: usize) {
        self.nodes.reserve(additional);
    }

    /// Number of nodes in the ring, O(1).
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node at position 0, `None` for an empty ring.
    #[inline]
    pub fn head(&self) -> Option<NodeId> {
        self.head
    }

    /// Make `node` the new position 0.
    pub fn set_head(&mut self, node: NodeId) {
        debug_assert!(node.0 < self.nodes.len());
        self.head = Some(node);
    }

    #[inline]
    pub fn get(&self, node: NodeId) -> &T {
        &self.nodes[node.0].value
    }

    #[inline]
    pub fn get_mut(&mut self, node: NodeId) -> &mut T {
        &mut self.nodes[node.0].value
    }

    #[inline]
    pub fn next(&self, node: NodeId) -> NodeId {
        self.nodes[node.0].next
    }

    #[inline]
    pub fn prev(&self, node: NodeId) -> NodeId {
        self.nodes[node.0].prev
    }

    /// Walk `steps` links away from `from`: forward for positive steps, backward for negative.
    /// Full turns are skipped and the remainder is walked in the shorter direction.
    /// `from` must be a node of this ring.
    pub fn walk(&self, from: NodeId, steps: i64) -> NodeId {
        let len = self.len() as i128;
        let forward = (steps as i128).rem_euclid(len) as usize;
        let backward = (self.len() - forward) % self.len();

        let mut node = from;
        if forward <= backward {
            for _ in 0..forward {
                node = self.next(node);
            }
        } else {
            for _ in 0..backward {
                node = self.prev(node);
            }
        }
        node
    }

    /// Node at position `pos` counting from the head, `None` if `pos` is out of range.
    pub fn nth(&self, pos: usize) -> Option<NodeId> {
        if pos >= self.len() {
            return None;
        }
        let head = self.head?;
        Some(self.walk(head, pos as i64))
    }

    /// Current position of `node` counting from the head. Requires a full walk in the worst case.
    pub fn position(&self, node: NodeId) -> Option<usize> {
        if node.0 >= self.len() {
            return None;
        }
        self.iter_nodes().position(|x| x == node)
    }

    fn alloc(&mut self, value: T) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            value,
            prev: id,
            next: id,
        });
        id
    }

    /// Allocate a detached chain of nodes linked in order. Returns the first and the last node.
    fn chain(&mut self, values: impl IntoIterator<Item = T>) -> Option<(NodeId, NodeId)> {
        let mut values = values.into_iter();
        let first = self.alloc(values.next()?);

        let mut last = first;
        for value in values {
            let node = self.alloc(value);
            self.nodes[last.0].next = node;
            self.nodes[node.0].prev = last;
            last = node;
        }
        Some((first, last))
    }

    /// Link a detached chain between `prev` and `next`, which must be adjacent.
    fn link(&mut self, prev: NodeId, (first, last): (NodeId, NodeId), next: NodeId) {
        debug_assert_eq!(self.nodes[prev.0].next, next);
        self.nodes[prev.0].next = first;
        self.nodes[first.0].prev = prev;
        self.nodes[last.0].next = next;
        self.nodes[next.0].prev = last;
    }

    /// Splice all `values` into the ring right before `at`, preserving their order. Returns the
    /// first inserted node, or `None` if `values` is empty. The head is unchanged, therefore
    /// inserting before the head appends to the end of the ring.
    pub fn insert_before(
        &mut self,
        at: NodeId,
        values: impl IntoIterator<Item = T>,
    ) -> Option<NodeId> {
        let prev = self.prev(at);
        let chain = self.chain(values)?;
        self.link(prev, chain, at);
        Some(chain.0)
    }

    /// Splice all `values` into the ring right after `at`, preserving their order. Returns the
    /// first inserted node, or `None` if `values` is empty.
    pub fn insert_after(
        &mut self,
        at: NodeId,
        values: impl IntoIterator<Item = T>,
    ) -> Option<NodeId> {
        let next = self.next(at);
        let chain = self.chain(values)?;
        self.link(at, chain, next);
        Some(chain.0)
    }

    /// Append `values` to the end of the ring. In an empty ring the first value becomes the head.
    /// Returns the first inserted node, or `None` if `values` is empty.
    pub fn push_back(&mut self, values: impl IntoIterator<Item = T>) -> Option<NodeId> {
        match self.head {
            Some(head) => self.insert_before(head, values),
            None => {
                let (first, last) = self.chain(values)?;
                self.nodes[last.0].next = first;
                self.nodes[first.0].prev = last;
                self.head = Some(first);
                Some(first)
            }
        }
    }

    /// Values in ring order starting from the head.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.iter_nodes().map(|node| self.get(node))
    }

    /// Nodes and their values in ring order, starting from `node` and making exactly one turn.
    pub fn iter_from(&self, node: NodeId) -> impl Iterator<Item = (NodeId, &T)> + '_ {
        Walk {
            ring: self,
            cursor: node,
            remaining: self.len(),
        }
        .map(|node| (node, self.get(node)))
    }

    fn iter_nodes(&self) -> Walk<'_, T> {
        match self.head {
            Some(head) => Walk {
                ring: self,
                cursor: head,
                remaining: self.len(),
            },
            None => Walk {
                ring: self,
                cursor: NodeId(0),
                remaining: 0,
            },
        }
    }
}

struct Walk<'a, T> {
    ring: &'a Ring<T>,
    cursor: NodeId,
    remaining: usize,
}

impl<T> Iterator for Walk<'_, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let node = self.cursor;
        self.cursor = self.ring.next(node);
        Some(node)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Walk<'_, T> {}

impl<T> FromIterator<T> for Ring<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut ring = Ring::with_capacity(iter.size_hint().0);
        ring.push_back(iter);
        ring
    }
}

impl<T: Display> Display for Ring<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (ind, value) in self.iter().enumerate() {
            if ind > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{value}")?;
        }
        write!(f, "]")
    }
}
