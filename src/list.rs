//! `SharedList` — the singly linked list the three roles operate on.
//!
//! A plain ownership chain: each node exclusively owns its successor, the
//! list owns the head. Every operation walks the chain iteratively with a
//! cursor; nothing here recurses, so stack depth never couples to list
//! length. The list performs no locking of its own — callers establish
//! access through the role protocols first (see
//! [`Switchboard`](crate::Switchboard)).

use core::fmt;

struct Node<T> {
    value: T,
    next: Option<Box<Node<T>>>,
}

/// A singly linked sequence with exclusively owned nodes.
pub struct SharedList<T> {
    head: Option<Box<Node<T>>>,
    len: usize,
}

impl<T> SharedList<T> {
    /// Creates an empty list.
    pub const fn new() -> Self {
        Self { head: None, len: 0 }
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends `value` at the tail, creating the head if the list is empty.
    ///
    /// O(n): walks to the last link and rebinds it.
    pub fn push_back(&mut self, value: T) {
        let mut cursor = &mut self.head;
        while let Some(node) = cursor {
            cursor = &mut node.next;
        }
        *cursor = Some(Box::new(Node { value, next: None }));
        self.len += 1;
    }

    /// Detaches the tail node and returns its value; `None` if empty.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.head.is_none() {
            return None;
        }
        let mut cursor = &mut self.head;
        for _ in 1..self.len {
            if let Some(node) = cursor {
                cursor = &mut node.next;
            }
        }
        let node = cursor.take()?;
        self.len -= 1;
        Some(node.value)
    }

    /// Removes the first node holding `target`, rebinding the head if that
    /// is the one. Returns whether anything was removed.
    pub fn remove_value(&mut self, target: &T) -> bool
    where
        T: PartialEq,
    {
        let mut cursor = &mut self.head;
        while cursor.is_some() {
            if cursor.as_ref().is_some_and(|node| node.value == *target) {
                if let Some(found) = cursor.take() {
                    *cursor = found.next;
                    self.len -= 1;
                }
                return true;
            }
            if let Some(node) = cursor {
                cursor = &mut node.next;
            }
        }
        false
    }

    /// Iterates the values from head to tail without mutation.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head.as_deref(),
        }
    }

    /// Collects the values in order.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Drops every node, leaving the list empty.
    pub fn clear(&mut self) {
        // Unlink one node at a time; dropping the head chain wholesale
        // would recurse once per node.
        let mut next = self.head.take();
        while let Some(mut node) = next {
            next = node.next.take();
        }
        self.len = 0;
    }
}

impl<T> Drop for SharedList<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Default for SharedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for SharedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Borrowing head-to-tail iterator over a [`SharedList`].
pub struct Iter<'a, T> {
    next: Option<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let node = self.next?;
        self.next = node.next.as_deref();
        Some(&node.value)
    }
}

impl<'a, T> IntoIterator for &'a SharedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
