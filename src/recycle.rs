//! Wrapper module for [`RecycleVec`], the slot storage that owns every node of a tree

use std::mem;
use std::num::NonZeroUsize;

#[cfg(test)]
use std::fmt::{self, Debug, Formatter};

/// A vector of slots where removed entries leave behind a link in a free list, so that their
/// space is reused by the next [`push`](Self::push)
///
/// Identifiers for the entries ([`EntryId`]s) are stable for as long as the entry is alive:
/// nothing ever moves an entry to a different slot.
#[derive(Clone)]
pub struct RecycleVec<T> {
    vals: Vec<Entry<T>>,
    head_empty: Option<LinkId>,
}

/// Unique identifier for a live entry in a [`RecycleVec`]
///
/// Unlike a reference, an `EntryId` is just an index; using one after its entry was recycled is a
/// logic error that panics (or, if the slot was reused, silently refers to the new entry).
//
// We store the index plus one so that Option<EntryId> is 8 bytes instead of 16 (on x86-64 or other
// 64-bit targets). Trees store three of these per node.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct EntryId {
    idx_plus_one: NonZeroUsize,
}

impl std::fmt::Debug for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "#{:x}", self.idx())
    }
}

/// Like an `EntryId`, but for entries in the "empty" list
#[derive(Copy, Clone)]
struct LinkId {
    idx_plus_one: NonZeroUsize,
}

#[derive(Clone)]
enum Entry<T> {
    Link(Option<LinkId>),
    Value(T),
}

impl<T> Default for RecycleVec<T> {
    fn default() -> Self {
        RecycleVec::new()
    }
}

#[cfg(test)]
impl<T: Debug> Debug for RecycleVec<T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let idx_pad = self.vals.len().saturating_sub(1).to_string().len();

        f.write_str("[")?;
        let indent = match f.alternate() {
            true => "        ",
            false => "    ",
        };

        for (idx, entry) in self.vals.iter().enumerate() {
            match entry {
                Entry::Link(link) => {
                    let link_idx = link.map(|l| l.idx());
                    f.write_fmt(format_args!("\n{indent}{idx:<idx_pad$x}: Link -> {link_idx:x?}"))?
                }
                Entry::Value(v) => f.write_fmt(format_args!("\n{indent}{idx:<idx_pad$x}: {v:?}"))?,
            }
        }

        if !self.vals.is_empty() {
            f.write_str("\n]")
        } else {
            f.write_str("]")
        }
    }
}

impl<T> RecycleVec<T> {
    /// Creates a new, empty `RecycleVec` without allocating
    pub const fn new() -> Self {
        RecycleVec { vals: Vec::new(), head_empty: None }
    }

    /// Adds a new item to the `RecycleVec`, returning a unique identifier for it
    pub fn push(&mut self, val: T) -> EntryId {
        if let Some(id) = self.head_empty.take() {
            self.head_empty = self.next_link(id);
            self.vals[id.idx()] = Entry::Value(val);
            EntryId { idx_plus_one: id.idx_plus_one }
        } else {
            // `Vec::len` is always <= isize::MAX, so `Vec::len() + 1` can't wrap to zero
            let idx_plus_one = match NonZeroUsize::new(self.vals.len() + 1) {
                Some(n) => n,
                None => unreachable!(),
            };
            self.vals.push(Entry::Value(val));
            EntryId { idx_plus_one }
        }
    }

    /// Removes the entry, returning its contents and adding the slot to the free list
    ///
    /// ## Panics
    ///
    /// This method panics if the entry was already recycled.
    pub fn recycle(&mut self, id: EntryId) -> T {
        let link = Entry::Link(self.head_empty);
        match mem::replace(&mut self.vals[id.idx()], link) {
            Entry::Value(v) => {
                self.head_empty = Some(LinkId { idx_plus_one: id.idx_plus_one });
                v
            }
            Entry::Link(prev) => {
                // put the link back the way it was before panicking, so a caught panic doesn't
                // leave a cycle in the free list
                self.vals[id.idx()] = Entry::Link(prev);
                panic!("recycled entry {id:?} twice")
            }
        }
    }

    /// Returns a reference to the value
    ///
    /// ## Panics
    ///
    /// This method panics if the entry was recycled.
    pub fn get(&self, id: EntryId) -> &T {
        match &self.vals[id.idx()] {
            Entry::Value(v) => v,
            Entry::Link(_) => panic!("use of recycled entry {id:?}"),
        }
    }

    /// Returns a mutable reference to the value
    ///
    /// ## Panics
    ///
    /// This method panics if the entry was recycled.
    pub fn get_mut(&mut self, id: EntryId) -> &mut T {
        match &mut self.vals[id.idx()] {
            Entry::Value(v) => v,
            Entry::Link(_) => panic!("use of recycled entry {id:?}"),
        }
    }

    /// Returns mutable references to two distinct values at once
    ///
    /// ## Panics
    ///
    /// This method panics if `a == b` or if either entry was recycled.
    pub fn get_pair_mut(&mut self, a: EntryId, b: EntryId) -> (&mut T, &mut T) {
        assert_ne!(a, b, "cannot mutably borrow the same entry twice");

        let (lo, hi, swapped) = match a.idx() < b.idx() {
            true => (a, b, false),
            false => (b, a, true),
        };

        let (head, tail) = self.vals.split_at_mut(hi.idx());
        let (lo_val, hi_val) = match (&mut head[lo.idx()], &mut tail[0]) {
            (Entry::Value(l), Entry::Value(h)) => (l, h),
            _ => panic!("use of recycled entry in pair {a:?}, {b:?}"),
        };

        match swapped {
            false => (lo_val, hi_val),
            true => (hi_val, lo_val),
        }
    }

    /// Drops every entry and resets the free list, keeping the allocation
    pub fn clear(&mut self) {
        self.vals.clear();
        self.head_empty = None;
    }

    /// Returns the number of slots, live or not
    pub fn slots(&self) -> usize {
        self.vals.len()
    }

    /// Returns the `LinkId` of the next entry in the linked list, starting from `id`
    fn next_link(&self, id: LinkId) -> Option<LinkId> {
        match &self.vals[id.idx()] {
            Entry::Link(next) => *next,
            // Existence of a `LinkId` guarantees that it references an `Entry::Link`
            Entry::Value(_) => unreachable!(),
        }
    }
}

impl EntryId {
    /// Helper method to get the index in `vals` this `EntryId` corresponds to
    pub(crate) fn idx(&self) -> usize {
        self.idx_plus_one.get() - 1
    }
}

impl LinkId {
    /// Internal helper method to get the index in `vals` this `LinkId` corresponds to
    fn idx(&self) -> usize {
        self.idx_plus_one.get() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::RecycleVec;

    #[test]
    fn recycled_slots_are_reused_last_in_first_out() {
        let mut v = RecycleVec::default();
        let a = v.push('a');
        let b = v.push('b');
        let c = v.push('c');

        assert_eq!(v.recycle(a), 'a');
        assert_eq!(v.recycle(c), 'c');

        let d = v.push('d');
        let e = v.push('e');
        assert_eq!(d.idx(), c.idx());
        assert_eq!(e.idx(), a.idx());
        assert_eq!(v.slots(), 3);

        assert_eq!(*v.get(b), 'b');
        assert_eq!(*v.get(d), 'd');
        assert_eq!(*v.get(e), 'e');
    }

    #[test]
    fn pair_mut_keeps_argument_order() {
        let mut v = RecycleVec::default();
        let a = v.push(1);
        let b = v.push(2);

        let (x, y) = v.get_pair_mut(b, a);
        assert_eq!((*x, *y), (2, 1));
        std::mem::swap(x, y);
        assert_eq!((*v.get(a), *v.get(b)), (2, 1));
    }

    #[test]
    #[should_panic]
    fn double_recycle_panics() {
        let mut v = RecycleVec::default();
        let a = v.push(());
        let _ = v.recycle(a);
        let _ = v.recycle(a);
    }
}
