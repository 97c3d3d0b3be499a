use super::{Error, Link, Node};

/// A forward cursor over a [`TariffList`](super::TariffList) that can remove
/// the element it most recently yielded.
///
/// The cursor keeps the link holding the last yielded node, which is the
/// predecessor's `next` field. Removing splices the successor into that link,
/// so removal is `O(1)` and iteration continues with the successor.
pub struct CursorMut<'a, E> {
    /// Link holding the last yielded node when `yielded` is set, otherwise the
    /// link holding the next node to yield. `None` once the cursor has run off
    /// the end.
    slot: Option<&'a mut Link<E>>,
    len: &'a mut usize,
    yielded: bool,
}

impl<'a, E> CursorMut<'a, E> {
    pub(super) const fn new(head: &'a mut Link<E>, len: &'a mut usize) -> Self {
        Self {
            slot: Some(head),
            len,
            yielded: false,
        }
    }

    /// Returns `true` if [`advance`](Self::advance) would yield an element.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.upcoming().is_some()
    }

    /// Moves to the next element and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSuchElement`] once every element has been yielded.
    pub fn advance(&mut self) -> Result<&E, Error> {
        if self.yielded {
            self.slot = match self.slot.take() {
                Some(Some(node)) => Some(&mut node.next),
                _ => None,
            };
        }
        self.yielded = matches!(self.slot.as_deref(), Some(Some(_)));
        self.slot
            .as_deref()
            .and_then(Option::as_deref)
            .map(|node| &node.elem)
            .ok_or(Error::NoSuchElement)
    }

    /// Removes the element most recently returned by
    /// [`advance`](Self::advance).
    ///
    /// Returns `None` if nothing has been yielded since the last removal.
    pub fn remove_current(&mut self) -> Option<E> {
        if !self.yielded {
            return None;
        }
        let slot = self.slot.as_deref_mut()?;
        let node = slot.take()?;
        let Node { elem, next } = *node;
        *slot = next;
        *self.len -= 1;
        self.yielded = false;
        Some(elem)
    }

    fn upcoming(&self) -> Option<&Node<E>> {
        let link = self.slot.as_deref()?;
        if self.yielded {
            link.as_deref()?.next.as_deref()
        } else {
            link.as_deref()
        }
    }
}
