use std::cmp::Ordering;
use std::fmt;

use crate::Keyed;

/// Comparison direction of the heap: whether the root holds the largest
/// or the smallest key.  Fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapOrder {
    Max,
    Min
}

/// How the initial bulk load establishes the heap property.
/// `Iterative` and `Recursive` insert one element at a time and sift it up
/// (O(n log n) total); `Floyd` moves all elements in at once and repairs
/// bottom-up in O(n).  All three produce a valid heap over the same multiset,
/// though the intermediate array layouts can differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStrategy {
    Iterative,
    Recursive,
    Floyd
}

/// Control-flow shape of the sift-down used by removal.  Both variants are
/// semantically identical and produce the same final array arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiftStrategy {
    Iterative,
    Recursive
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// Insertion attempted with `len() == capacity()`.  The heap is bounded
    /// at construction time and never grows.
    Full,
    /// Removal or peek attempted with `len() == 0`.
    Empty
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::Full => write!(f, "heap is at capacity"),
            HeapError::Empty => write!(f, "heap is empty")
        }
    }
}

impl std::error::Error for HeapError {}

/// An implicit binary heap over keyed records, bounded at the capacity it
/// was built with.
/// - Peek root: O(1)
/// - Push / pop: O(log(n))
/// - Bulk build: O(n) with `BuildStrategy::Floyd`, O(n log(n)) otherwise
/// The storage is a complete binary tree in level order: the root lives at
/// index 0, the children of index i at 2i+1 and 2i+2, and its parent at
/// (i-1)/2.  The length of the buffer is the single source of truth for how
/// many slots are occupied; failed operations leave the heap untouched.
pub struct BoundedHeap<T: Keyed> {
    buf: Vec<T>,
    cap: usize,
    order: HeapOrder,
    build: BuildStrategy,
    sift: SiftStrategy
}

impl<T: Keyed> BoundedHeap<T> {
    /// Build a heap out of a vector of records, moving the vector into the
    /// heap.  The capacity is fixed to the vector's length and never changes.
    /// `build` picks the bulk-load path; `sift` picks the sift-down shape
    /// used by `BoundedHeap::pop` for the rest of the heap's life.
    pub fn make(elements: Vec<T>, order: HeapOrder, build: BuildStrategy, sift: SiftStrategy) -> Self {
        let cap = elements.len();
        if let BuildStrategy::Floyd = build {
            let mut res = Self{buf: elements, cap, order, build, sift};
            res.ify();
            res
        } else {
            let mut res = Self{buf: Vec::with_capacity(cap), cap, order, build, sift};
            for e in elements {
                res.buf.push(e);
                res.sift_up(res.buf.len() - 1)
            }
            res
        }
    }

    /// Insert a single record, or return `HeapError::Full` without touching
    /// the heap if it is already at capacity.
    /// The new record is appended at the next free slot and sifted toward the
    /// root until its parent outranks it (recursively if the heap was built
    /// with `BuildStrategy::Recursive`, iteratively otherwise).
    pub fn push(&mut self, e: T) -> Result<(), HeapError> {
        if self.buf.len() == self.cap {
            return Err(HeapError::Full)
        }
        self.buf.push(e);
        self.sift_up(self.buf.len() - 1);
        Ok(())
    }

    /// Remove and return the root record, or `HeapError::Empty` if there is
    /// none.  The last occupied slot is moved into the root's place and
    /// sifted back down per the configured `SiftStrategy`.
    pub fn pop(&mut self) -> Result<T, HeapError> {
        let l = self.buf.len();
        if l == 0 {
            return Err(HeapError::Empty)
        }
        self.buf.swap(0, l - 1);
        let res = self.buf.pop().ok_or(HeapError::Empty)?;
        self.sift_down(0);
        Ok(res)
    }

    /// Get the root record without removing it, or `HeapError::Empty` if
    /// there is none.
    pub fn peek(&self) -> Result<&T, HeapError> {
        self.buf.first().ok_or(HeapError::Empty)
    }

    /// Drain the heap by repeated `BoundedHeap::pop`: descending key order
    /// for a max heap, ascending for a min heap.
    pub fn into_sorted(mut self) -> Vec<T> {
        let mut res = Vec::with_capacity(self.buf.len());
        while let Ok(e) = self.pop() {
            res.push(e)
        }
        res
    }

    /// Get the number of occupied slots
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Get the fixed capacity the heap was built with
    pub fn capacity(&self) -> usize {
        self.cap
    }

    pub fn is_full(&self) -> bool {
        self.buf.len() == self.cap
    }

    pub fn order(&self) -> HeapOrder {
        self.order
    }

    /// View the occupied slots in array order.  This is level order of the
    /// tree, not sorted order.
    pub fn as_slice(&self) -> &[T] {
        &self.buf
    }

    pub fn left_child_index(index: usize) -> usize {
        2*index + 1
    }

    pub fn right_child_index(index: usize) -> usize {
        2*index + 2
    }

    /// Get the index of a node's parent, or None for the root
    pub fn parent_index(index: usize) -> Option<usize> {
        index.checked_sub(1).map(|i|i >> 1)
    }

    pub fn has_parent(index: usize) -> bool {
        index > 0
    }

    pub fn has_left_child(&self, index: usize) -> bool {
        2*index + 1 < self.buf.len()
    }

    pub fn has_right_child(&self, index: usize) -> bool {
        2*index + 2 < self.buf.len()
    }

    /// Check if the node has both a left and a right child
    pub fn has_children(&self, index: usize) -> bool {
        self.has_left_child(index) && self.has_right_child(index)
    }

    /// True if the record at index a must sit above the record at index b.
    /// Strict, so equal keys never force a swap.
    fn outranks(&self, a: usize, b: usize) -> bool {
        let ord = match self.order
            { HeapOrder::Max => Ordering::Greater, HeapOrder::Min => Ordering::Less };
        self.buf[a].key().cmp(self.buf[b].key()) == ord
    }

    /// The child a node must be compared against: with two children, the one
    /// that outranks the other, preferring the right child when their keys
    /// are equal; with one child, that child; with none, None.
    fn dominant_child(&self, index: usize) -> Option<usize> {
        let l = 2*index + 1;
        let r = 2*index + 2;
        if r < self.buf.len() {
            Some(if self.outranks(l, r) { l } else { r })
        } else if l < self.buf.len() {
            Some(l)
        } else {
            None
        }
    }

    fn sift_up(&mut self, index: usize) {
        match self.build {
            BuildStrategy::Recursive => self.sift_up_recursive(index),
            _ => self.sift_up_iterative(index)
        }
    }

    fn sift_up_iterative(&mut self, mut i: usize) {
        while i > 0 {
            let p = (i - 1) >> 1;
            if self.outranks(i, p) {
                self.buf.swap(i, p);
                i = p
            } else { break }
        }
    }

    fn sift_up_recursive(&mut self, i: usize) {
        if i == 0 {
            return
        }
        let p = (i - 1) >> 1;
        if self.outranks(i, p) {
            self.buf.swap(i, p);
            self.sift_up_recursive(p)
        }
    }

    fn sift_down(&mut self, index: usize) {
        match self.sift {
            SiftStrategy::Iterative => self.sift_down_iterative(index),
            SiftStrategy::Recursive => self.sift_down_recursive(index)
        }
    }

    fn sift_down_iterative(&mut self, mut i: usize) {
        while let Some(c) = self.dominant_child(i) {
            if self.outranks(c, i) {
                self.buf.swap(i, c);
                i = c
            } else { break }
        }
    }

    fn sift_down_recursive(&mut self, i: usize) {
        let Some(c) = self.dominant_child(i) else { return };
        if self.outranks(c, i) {
            self.buf.swap(i, c);
            self.sift_down_recursive(c)
        }
    }

    /// Floyd's heap construction: the buffer already holds every record in
    /// arbitrary order, so repair from the last internal node (n-2)/2 down
    /// to the root.  A swapped-in subtree root may violate order further
    /// down, which the sift-down chases, and leaves need no visit at all.
    fn ify(&mut self) {
        for i in (0..self.buf.len()/2).rev() {
            self.sift_down(i)
        }
    }

    #[cfg(test)]
    pub(crate) fn check_heap(&self) -> bool {
        self.buf.len() <= self.cap
            && (1..self.buf.len()).all(|i|!self.outranks(i, (i - 1) >> 1))
    }
}

impl<'a, T: Keyed> IntoIterator for &'a BoundedHeap<T> {
    type Item = &'a T;
    type IntoIter = <&'a Vec<T> as IntoIterator>::IntoIter;
    fn into_iter(self) -> Self::IntoIter {
        (&self.buf).into_iter()
    }
}

impl<T: Keyed> Into<Vec<T>> for BoundedHeap<T> {
    fn into(self) -> Vec<T> {
        self.buf
    }
}
