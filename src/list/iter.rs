use std::iter::FusedIterator;

use super::{Node, TariffList};

/// Borrowing iterator over a [`TariffList`], head to tail.
pub struct Iter<'a, E> {
    next: Option<&'a Node<E>>,
    remaining: usize,
}

impl<'a, E> Iter<'a, E> {
    pub(super) const fn new(head: Option<&'a Node<E>>, len: usize) -> Self {
        Self {
            next: head,
            remaining: len,
        }
    }
}

impl<'a, E> Iterator for Iter<'a, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            self.remaining -= 1;
            &node.elem
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<E> ExactSizeIterator for Iter<'_, E> {}

impl<E> FusedIterator for Iter<'_, E> {}

/// Mutably borrowing iterator over a [`TariffList`], head to tail.
pub struct IterMut<'a, E> {
    next: Option<&'a mut Node<E>>,
    remaining: usize,
}

impl<'a, E> IterMut<'a, E> {
    pub(super) const fn new(head: Option<&'a mut Node<E>>, len: usize) -> Self {
        Self {
            next: head,
            remaining: len,
        }
    }
}

impl<'a, E> Iterator for IterMut<'a, E> {
    type Item = &'a mut E;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.take().map(|node| {
            self.next = node.next.as_deref_mut();
            self.remaining -= 1;
            &mut node.elem
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<E> ExactSizeIterator for IterMut<'_, E> {}

impl<E> FusedIterator for IterMut<'_, E> {}

/// Owning iterator over a [`TariffList`], head to tail.
pub struct IntoIter<E>(TariffList<E>);

impl<E> IntoIter<E> {
    pub(super) const fn new(list: TariffList<E>) -> Self {
        Self(list)
    }
}

impl<E> Iterator for IntoIter<E> {
    type Item = E;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len(), Some(self.0.len()))
    }
}

impl<E> ExactSizeIterator for IntoIter<E> {}

impl<E> FusedIterator for IntoIter<E> {}

#[cfg(test)]
mod tests {
    use crate::TariffList;

    #[test]
    fn iter_yields_each_element_once_in_order() {
        let list: TariffList<_> = (1..=4).collect();
        let mut iter = list.iter();
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.by_ref().copied().collect::<Vec<_>>(), [2, 3, 4]);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn iter_matches_snapshot() {
        let list: TariffList<_> = ["a", "b", "c"].into_iter().collect();
        let snapshot = list.to_vec();
        assert_eq!(snapshot.len(), list.len());
        assert!(list.iter().eq(snapshot.iter()));
    }

    #[test]
    fn iter_mut_updates_in_place() {
        let mut list: TariffList<_> = (1..=3).collect();
        for elem in &mut list {
            *elem *= 10;
        }
        assert_eq!(list.to_vec(), [10, 20, 30]);
    }

    #[test]
    fn into_iter_drains_in_order() {
        let list: TariffList<_> = vec![String::from("x"), String::from("y")].into();
        let drained: Vec<String> = list.into_iter().collect();
        assert_eq!(drained, ["x", "y"]);
    }
}
