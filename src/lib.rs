pub mod bheap;
pub mod city;

/// Exposes the ordering key of a record stored in a heap.
/// The heap never inspects anything about its elements except the key,
/// so payload fields are carried along untouched; only an element's position
/// in the storage array changes during restructuring.
pub trait Keyed {
    type Key: Ord + ?Sized;
    fn key(&self) -> &Self::Key;
}
