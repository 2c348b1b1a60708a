use std::any::Any;
use std::fmt;

use repair_core::Cell;

/// One step of a discovered route.
///
/// A node owns its predecessor, so a returned path is a singly linked chain
/// owned by the caller. For paths produced by
/// [`find_path`](crate::find_path) the head lies in the `source` set and
/// following [`predecessor`](Self::predecessor) walks toward `target`.
pub struct PathNode {
    pub cell: Cell,
    pub predecessor: Option<Box<PathNode>>,
    /// Search priority: accumulated cost plus the strategy's estimate.
    pub weight: i64,
    /// Sum of the fill weights of every cell entered so far.
    pub fill_weight: i64,
    /// Number of steps taken so far.
    pub dist_traveled: i64,
    /// Strategy-owned data; never read by the search itself.
    pub payload: Option<Box<dyn Any + Send>>,
}

// A chain always holds at least one node.
#[allow(clippy::len_without_is_empty)]
impl PathNode {
    /// A node with no predecessor and zero accumulated cost.
    pub fn root(cell: Cell) -> Self {
        Self {
            cell,
            predecessor: None,
            weight: 0,
            fill_weight: 0,
            dist_traveled: 0,
            payload: None,
        }
    }

    /// Iterate over the chain starting at this node.
    pub fn iter(&self) -> PathIter<'_> {
        PathIter { next: Some(self) }
    }

    /// Number of nodes in the chain, including this one.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// The cells of the chain, in chain order.
    pub fn cells(&self) -> Vec<Cell> {
        self.iter().map(|n| n.cell).collect()
    }

    /// The last node of the chain (the one without a predecessor).
    pub fn tail(&self) -> &PathNode {
        let mut n = self;
        while let Some(p) = n.predecessor.as_deref() {
            n = p;
        }
        n
    }

    /// The payload, if one of type `T` was stored.
    pub fn payload<T: Any>(&self) -> Option<&T> {
        self.payload.as_deref().and_then(|p| p.downcast_ref::<T>())
    }

    pub fn set_payload<T: Any + Send>(&mut self, value: T) {
        self.payload = Some(Box::new(value));
    }

    /// Invert every predecessor link, returning the old tail as the new head.
    pub fn reversed(self) -> PathNode {
        let mut prev: Option<Box<PathNode>> = None;
        let mut cur = Box::new(self);
        loop {
            let next = cur.predecessor.take();
            cur.predecessor = prev;
            match next {
                Some(n) => {
                    prev = Some(cur);
                    cur = n;
                }
                None => return *cur,
            }
        }
    }
}

impl Drop for PathNode {
    // Unlink iteratively; the default drop would recurse once per node.
    fn drop(&mut self) {
        let mut next = self.predecessor.take();
        while let Some(mut n) = next {
            next = n.predecessor.take();
        }
    }
}

impl fmt::Debug for PathNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathNode")
            .field("cell", &self.cell)
            .field("predecessor", &self.predecessor.as_ref().map(|p| p.cell))
            .field("weight", &self.weight)
            .field("fill_weight", &self.fill_weight)
            .field("dist_traveled", &self.dist_traveled)
            .field("payload", &self.payload.is_some())
            .finish()
    }
}

impl<'a> IntoIterator for &'a PathNode {
    type Item = &'a PathNode;
    type IntoIter = PathIter<'a>;

    fn into_iter(self) -> PathIter<'a> {
        self.iter()
    }
}

/// Iterator over a [`PathNode`] chain.
#[derive(Clone, Debug)]
pub struct PathIter<'a> {
    next: Option<&'a PathNode>,
}

impl<'a> Iterator for PathIter<'a> {
    type Item = &'a PathNode;

    fn next(&mut self) -> Option<&'a PathNode> {
        let n = self.next?;
        self.next = n.predecessor.as_deref();
        Some(n)
    }
}
