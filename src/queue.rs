//! FIFO queue made of two stacks.

use alloc::vec::Vec;
use core::fmt;

/// Capacity of a [`DoubleStackQueue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capacity {
    /// At most the given number of items.
    Bounded(usize),
    /// No limit.
    Unbounded,
}

/// FIFO queue with amortized O(1) enqueue and dequeue.
///
/// Items are pushed onto the in-stack. Dequeueing pops the out-stack, which
/// is refilled with the reversed in-stack whenever it runs empty.
///
/// # Examples
///
/// ```
/// use pathtree::DoubleStackQueue;
///
/// let mut queue = DoubleStackQueue::new();
/// for c in ['a', 'b', 'c'] {
///     queue.enqueue(c).expect("unbounded queue never overflows");
/// }
/// assert_eq!(queue.dequeue(), Some('a'));
/// assert_eq!(queue.peek(), Some(&'b'));
/// assert_eq!(queue.len(), 2);
/// ```
///
/// A bounded queue hands the rejected item back.
///
/// ```
/// use pathtree::{Capacity, DoubleStackQueue};
///
/// let mut queue = DoubleStackQueue::with_capacity(Capacity::Bounded(1));
/// assert_eq!(queue.enqueue(1), Ok(()));
/// assert_eq!(queue.enqueue(2), Err(2));
/// assert_eq!(queue.capacity(), Capacity::Bounded(1));
/// ```
#[derive(Clone)]
pub struct DoubleStackQueue<T> {
    /// Newly enqueued items, the latest on top.
    in_stack: Vec<T>,
    /// Items to be dequeued, the oldest on top.
    out_stack: Vec<T>,
    /// Maximum number of items.
    capacity: Capacity,
    /// Whether overflows are reported to the logger.
    verbose: bool,
}

impl<T> DoubleStackQueue<T> {
    /// Creates an unbounded queue.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(Capacity::Unbounded)
    }

    /// Creates a queue holding at most `limit` items.
    #[inline]
    #[must_use]
    pub fn bounded(limit: usize) -> Self {
        Self::with_capacity(Capacity::Bounded(limit))
    }

    /// Creates a queue with the given capacity.
    #[must_use]
    pub fn with_capacity(capacity: Capacity) -> Self {
        Self {
            in_stack: Vec::new(),
            out_stack: Vec::new(),
            capacity,
            verbose: false,
        }
    }

    /// Sets whether overflows of a bounded queue are logged.
    #[inline]
    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Returns whether overflows are logged.
    #[inline]
    #[must_use]
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Sets whether overflows are logged.
    #[inline]
    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Returns the capacity.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    /// Returns the number of queued items.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.in_stack.len() + self.out_stack.len()
    }

    /// Returns true if the queue has no items.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.in_stack.is_empty() && self.out_stack.is_empty()
    }

    /// Appends an item to the back.
    ///
    /// # Errors
    ///
    /// Returns the item back if a bounded queue is full.
    pub fn enqueue(&mut self, item: T) -> Result<(), T> {
        if let Capacity::Bounded(limit) = self.capacity {
            if self.len() >= limit {
                if self.verbose {
                    log::warn!("queue is full (limit {limit}), item rejected");
                }
                return Err(item);
            }
        }
        self.in_stack.push(item);
        Ok(())
    }

    /// Removes the front item.
    pub fn dequeue(&mut self) -> Option<T> {
        if self.out_stack.is_empty() {
            self.transfer();
        }
        self.out_stack.pop()
    }

    /// Returns the front item without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.out_stack.last().or_else(|| self.in_stack.first())
    }

    /// Removes all items.
    pub fn clear(&mut self) {
        self.in_stack.clear();
        self.out_stack.clear();
    }

    /// Moves the in-stack into the out-stack, reversing the order.
    fn transfer(&mut self) {
        self.out_stack.extend(self.in_stack.drain(..).rev());
    }

    /// Returns an iterator over the items in dequeue order.
    fn iter(&self) -> impl Iterator<Item = &T> {
        self.out_stack.iter().rev().chain(self.in_stack.iter())
    }
}

impl<T> Default for DoubleStackQueue<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<T> for DoubleStackQueue<T> {
    /// Enqueues every item. Items that do not fit a bounded queue are dropped.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            if self.enqueue(item).is_err() {
                break;
            }
        }
    }
}

impl<T> FromIterator<T> for DoubleStackQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}

// Print in dequeue order rather than as two stacks.
impl<T: fmt::Debug> fmt::Debug for DoubleStackQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
