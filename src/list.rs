//! A singly-linked sequence of tariff records.
//!
//! [`TariffList`] owns a forward-only chain of nodes. Every positional
//! operation walks from the head, so it costs `O(i)`; inserting at the head
//! never walks. The list is generic over its element type, so it holds plain
//! [`Tariff`](crate::Tariff) values as well as shared `Rc<Tariff<_>>` handles.

use std::{cmp::Ordering, fmt, mem};

use tracing::trace;

mod cursor;
mod iter;

pub use cursor::CursorMut;
pub use iter::{IntoIter, Iter, IterMut};

type Link<E> = Option<Box<Node<E>>>;

struct Node<E> {
    elem: E,
    next: Link<E>,
}

/// Errors returned by [`TariffList`] operations.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// A positional operation was given an index outside the valid range.
    #[error("iндекс: {index}, Розмiр: {size}")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The list length at the time of the call.
        size: usize,
    },

    /// A cursor was advanced past the last element.
    #[error("Наступного елемента немає")]
    NoSuchElement,

    /// The operation is declared but not supported by a singly-linked list.
    #[error("Операцiя {0} не пiдтримується")]
    Unsupported(&'static str),
}

/// A singly-linked list.
///
/// The list keeps its length alongside the head link, so [`len`](Self::len)
/// and [`is_empty`](Self::is_empty) are `O(1)`. Appending walks to the tail.
pub struct TariffList<E> {
    head: Link<E>,
    len: usize,
}

impl<E> TariffList<E> {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self { head: None, len: 0 }
    }

    /// Creates a list holding a single element.
    #[must_use]
    pub fn singleton(elem: E) -> Self {
        Self {
            head: Some(Box::new(Node { elem, next: None })),
            len: 1,
        }
    }

    /// Returns the number of elements.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list holds no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the first element, if any.
    #[must_use]
    pub fn first(&self) -> Option<&E> {
        self.head.as_deref().map(|node| &node.elem)
    }

    /// Returns the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] unless `index < len`.
    pub fn get(&self, index: usize) -> Result<&E, Error> {
        self.iter()
            .nth(index)
            .ok_or_else(|| self.out_of_range(index))
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] unless `index < len`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut E, Error> {
        let error = self.out_of_range(index);
        self.iter_mut().nth(index).ok_or(error)
    }

    /// Replaces the element at `index`, returning the one it held before.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] unless `index < len`.
    pub fn set(&mut self, index: usize, elem: E) -> Result<E, Error> {
        let slot = self.get_mut(index)?;
        Ok(mem::replace(slot, elem))
    }

    /// Appends an element at the tail.
    pub fn push(&mut self, elem: E) {
        *self.tail_link() = Some(Box::new(Node { elem, next: None }));
        self.len += 1;
    }

    /// Inserts an element at `index`, shifting later elements one position
    /// towards the tail.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] unless `index <= len`. The list is
    /// left unchanged on error.
    pub fn insert(&mut self, index: usize, elem: E) -> Result<(), Error> {
        self.check_insert_index(index)?;
        let link = self.link_at_mut(index);
        let next = link.take();
        *link = Some(Box::new(Node { elem, next }));
        self.len += 1;
        Ok(())
    }

    /// Removes and returns the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] unless `index < len`.
    pub fn remove(&mut self, index: usize) -> Result<E, Error> {
        let error = self.out_of_range(index);
        if index >= self.len {
            return Err(error);
        }
        let link = self.link_at_mut(index);
        let Some(node) = link.take() else {
            return Err(error);
        };
        let Node { elem, next } = *node;
        *link = next;
        self.len -= 1;
        Ok(elem)
    }

    /// Removes and returns the first element, if any.
    pub fn pop_front(&mut self) -> Option<E> {
        self.head.take().map(|node| {
            let Node { elem, next } = *node;
            self.head = next;
            self.len -= 1;
            elem
        })
    }

    /// Appends every element of `items` in order.
    ///
    /// Returns `true` if the list was modified.
    pub fn add_all<I>(&mut self, items: I) -> bool
    where
        I: IntoIterator<Item = E>,
    {
        let mut added = 0;
        let mut link = self.tail_link();
        for elem in items {
            let node = link.insert(Box::new(Node { elem, next: None }));
            link = &mut node.next;
            added += 1;
        }
        self.len += added;
        trace!(added, len = self.len, "appended elements");
        added > 0
    }

    /// Inserts every element of `items` so that they occupy positions
    /// `index..index + n` in their original order. Elements previously at
    /// `index..` move towards the tail.
    ///
    /// `items` is collected before the list is touched, so a snapshot of this
    /// list (for example from [`to_vec`](Self::to_vec)) can be spliced back
    /// into it.
    ///
    /// Returns `Ok(true)` if the list was modified.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] unless `index <= len`. The list is
    /// left unchanged on error.
    pub fn add_all_at<I>(&mut self, index: usize, items: I) -> Result<bool, Error>
    where
        I: IntoIterator<Item = E>,
    {
        self.check_insert_index(index)?;
        let snapshot: Vec<E> = items.into_iter().collect();
        if snapshot.is_empty() {
            return Ok(false);
        }

        let added = snapshot.len();
        let link = self.link_at_mut(index);
        let mut chain = link.take();
        for elem in snapshot.into_iter().rev() {
            chain = Some(Box::new(Node { elem, next: chain }));
        }
        *link = chain;
        self.len += added;
        trace!(index, added, len = self.len, "spliced elements");
        Ok(true)
    }

    /// Removes every element, dropping the chain iteratively.
    pub fn clear(&mut self) {
        let mut link = self.head.take();
        while let Some(mut node) = link {
            link = node.next.take();
        }
        self.len = 0;
    }

    /// Returns an iterator over the elements, head to tail.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, E> {
        Iter::new(self.head.as_deref(), self.len)
    }

    /// Returns an iterator over mutable references to the elements.
    pub fn iter_mut(&mut self) -> IterMut<'_, E> {
        IterMut::new(self.head.as_deref_mut(), self.len)
    }

    /// Returns a forward cursor that can remove the element it last yielded.
    pub fn cursor_mut(&mut self) -> CursorMut<'_, E> {
        CursorMut::new(&mut self.head, &mut self.len)
    }

    /// Keeps only the elements for which `keep` returns `true`, preserving
    /// their relative order.
    ///
    /// Returns `true` if any element was removed.
    pub fn retain<F>(&mut self, mut keep: F) -> bool
    where
        F: FnMut(&E) -> bool,
    {
        let mut removed = 0;
        let mut cursor = self.cursor_mut();
        while let Ok(elem) = cursor.advance() {
            if !keep(elem) {
                cursor.remove_current();
                removed += 1;
            }
        }
        trace!(removed, "retained elements");
        removed > 0
    }

    /// Sorts the list in place with a stable comparison.
    ///
    /// Nodes are relinked; elements never move in memory.
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&E, &E) -> Ordering,
    {
        let mut nodes = Vec::with_capacity(self.len);
        let mut link = self.head.take();
        while let Some(mut node) = link {
            link = node.next.take();
            nodes.push(node);
        }

        nodes.sort_by(|a, b| compare(&a.elem, &b.elem));

        let mut head = None;
        for mut node in nodes.into_iter().rev() {
            node.next = head;
            head = Some(node);
        }
        self.head = head;
        trace!(len = self.len, "sorted list");
    }

    /// Bidirectional list iteration is not supported.
    ///
    /// # Errors
    ///
    /// Always returns [`Error::Unsupported`].
    pub fn list_iterator(&mut self) -> Result<CursorMut<'_, E>, Error> {
        Err(Error::Unsupported("listIterator"))
    }

    /// Bidirectional list iteration from an index is not supported.
    ///
    /// # Errors
    ///
    /// Always returns [`Error::Unsupported`].
    pub fn list_iterator_at(&mut self, _index: usize) -> Result<CursorMut<'_, E>, Error> {
        Err(Error::Unsupported("listIterator"))
    }

    /// Sub-list views are not supported.
    ///
    /// # Errors
    ///
    /// Always returns [`Error::Unsupported`].
    pub fn sub_list(&self, _from: usize, _to: usize) -> Result<&Self, Error> {
        Err(Error::Unsupported("subList"))
    }

    const fn out_of_range(&self, index: usize) -> Error {
        Error::IndexOutOfRange {
            index,
            size: self.len,
        }
    }

    const fn check_insert_index(&self, index: usize) -> Result<(), Error> {
        if index > self.len {
            return Err(self.out_of_range(index));
        }
        Ok(())
    }

    /// Returns the link that holds the element at `index` (or the empty tail
    /// link when `index == len`).
    fn link_at_mut(&mut self, index: usize) -> &mut Link<E> {
        let mut link = &mut self.head;
        for _ in 0..index {
            match link {
                Some(node) => link = &mut node.next,
                None => break,
            }
        }
        link
    }

    fn tail_link(&mut self) -> &mut Link<E> {
        let mut link = &mut self.head;
        while let Some(node) = link {
            link = &mut node.next;
        }
        link
    }
}

impl<E: PartialEq> TariffList<E> {
    /// Returns `true` if the list holds an element equal to `probe`.
    pub fn contains(&self, probe: &E) -> bool {
        self.iter().any(|elem| elem == probe)
    }

    /// Returns `true` if every probe is contained in the list.
    pub fn contains_all(&self, probes: &[E]) -> bool {
        probes.iter().all(|probe| self.contains(probe))
    }

    /// Returns the position of the first element equal to `probe`.
    pub fn index_of(&self, probe: &E) -> Option<usize> {
        self.iter().position(|elem| elem == probe)
    }

    /// Returns the position of the last element equal to `probe`.
    pub fn last_index_of(&self, probe: &E) -> Option<usize> {
        self.iter()
            .enumerate()
            .filter(|(_, elem)| *elem == probe)
            .map(|(index, _)| index)
            .last()
    }

    /// Removes the first element equal to `probe`.
    ///
    /// Returns `true` if an element was removed.
    pub fn remove_element(&mut self, probe: &E) -> bool {
        let mut cursor = self.cursor_mut();
        while let Ok(elem) = cursor.advance() {
            if elem == probe {
                cursor.remove_current();
                return true;
            }
        }
        false
    }

    /// Removes one occurrence of each probe.
    ///
    /// Returns `true` if any element was removed.
    pub fn remove_all(&mut self, probes: &[E]) -> bool {
        let mut modified = false;
        for probe in probes {
            modified |= self.remove_element(probe);
        }
        modified
    }

    /// Removes every element that is not among `probes`.
    ///
    /// Returns `true` if any element was removed.
    pub fn retain_all(&mut self, probes: &[E]) -> bool {
        self.retain(|elem| probes.contains(elem))
    }
}

impl<E: Clone> TariffList<E> {
    /// Returns a snapshot of the elements in traversal order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<E> {
        self.iter().cloned().collect()
    }

    /// Copies the elements into `buffer` when it is large enough, otherwise
    /// returns a new buffer of exactly [`len`](Self::len) slots.
    ///
    /// When `buffer` is strictly longer than the list, the slot just past the
    /// last element is set to `None`; later slots are left untouched.
    #[must_use]
    pub fn to_vec_in(&self, mut buffer: Vec<Option<E>>) -> Vec<Option<E>> {
        if buffer.len() < self.len {
            return self.iter().cloned().map(Some).collect();
        }
        for (slot, elem) in buffer.iter_mut().zip(self.iter()) {
            *slot = Some(elem.clone());
        }
        if let Some(sentinel) = buffer.get_mut(self.len) {
            *sentinel = None;
        }
        buffer
    }
}

impl<E> Drop for TariffList<E> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<E> Default for TariffList<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Clone> Clone for TariffList<E> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<E: fmt::Debug> fmt::Debug for TariffList<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<E: PartialEq> PartialEq for TariffList<E> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<E: Eq> Eq for TariffList<E> {}

impl<E> FromIterator<E> for TariffList<E> {
    fn from_iter<I: IntoIterator<Item = E>>(items: I) -> Self {
        let mut list = Self::new();
        list.add_all(items);
        list
    }
}

impl<E> Extend<E> for TariffList<E> {
    fn extend<I: IntoIterator<Item = E>>(&mut self, items: I) {
        self.add_all(items);
    }
}

impl<E> From<Vec<E>> for TariffList<E> {
    fn from(items: Vec<E>) -> Self {
        items.into_iter().collect()
    }
}

impl<E> IntoIterator for TariffList<E> {
    type Item = E;
    type IntoIter = IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<'a, E> IntoIterator for &'a TariffList<E> {
    type Item = &'a E;
    type IntoIter = Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, E> IntoIterator for &'a mut TariffList<E> {
    type Item = &'a mut E;
    type IntoIter = IterMut<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
