use std::fmt::{self, Debug, Display, Formatter};
use std::marker::PhantomData;
use std::ptr;

type Link<T> = *mut Node<T>;

struct Node<T> {
    value: T,
    next: Link<T>,
}

/// FIFO queue over a singly linked list: push at the tail, pop at the head.
///
/// Nodes are owned through raw pointers from `Box::into_raw` until `dequeue`
/// or drop turns them back into a `Box`.
pub struct LinkedQueue<T> {
    head: Link<T>,
    // Null exactly when `head` is null.
    tail: Link<T>,
    len: usize,
    _owns: PhantomData<T>,
}

impl<T> LinkedQueue<T> {
    pub fn new() -> Self {
        Self {
            head: ptr::null_mut(),
            tail: ptr::null_mut(),
            len: 0,
            _owns: PhantomData,
        }
    }

    pub fn enqueue(&mut self, value: T) {
        let node = Box::into_raw(Box::new(Node {
            value,
            next: ptr::null_mut(),
        }));

        if self.tail.is_null() {
            self.head = node;
        } else {
            // SAFETY: a non-null `tail` came from `Box::into_raw` and has not
            // been freed; only `dequeue` and drop free nodes, and both reset
            // `tail` when they free the last one.
            unsafe { (*self.tail).next = node };
        }
        self.tail = node;
        self.len += 1;
    }

    /// Removes and returns the oldest value, or `None` once the queue is drained.
    pub fn dequeue(&mut self) -> Option<T> {
        if self.head.is_null() {
            return None;
        }
        // SAFETY: `head` is non-null and was produced by `Box::into_raw`; it is
        // unlinked below so it is reclaimed exactly once.
        let node = unsafe { Box::from_raw(self.head) };
        self.head = node.next;
        if self.head.is_null() {
            self.tail = ptr::null_mut();
        }
        self.len -= 1;
        Some(node.value)
    }

    pub fn peek(&self) -> Option<&T> {
        // SAFETY: `head` is either null or a live node owned by this queue.
        unsafe { self.head.as_ref() }.map(|node| &node.value)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_null()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            // SAFETY: as in `peek`; the shared borrow of `self` keeps the chain alive.
            next: unsafe { self.head.as_ref() },
        }
    }
}

impl<T: Display> LinkedQueue<T> {
    /// Every element from head to tail, one per line.
    pub fn show(&self) -> String {
        let mut out = String::new();
        for value in self.iter() {
            out.push_str(&format!("{}\n", value));
        }
        out
    }
}

impl<T> Drop for LinkedQueue<T> {
    fn drop(&mut self) {
        while self.dequeue().is_some() {}
    }
}

impl<T> Default for LinkedQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Debug> Debug for LinkedQueue<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Extend<T> for LinkedQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.enqueue(value);
        }
    }
}

impl<T> FromIterator<T> for LinkedQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}

pub struct Iter<'a, T> {
    next: Option<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            // SAFETY: `next` links are null or live nodes of the borrowed queue.
            self.next = unsafe { node.next.as_ref() };
            &node.value
        })
    }
}

/// Drains the queue in FIFO order.
pub struct IntoIter<T>(LinkedQueue<T>);

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.0.dequeue()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len, Some(self.0.len))
    }
}

impl<T> IntoIterator for LinkedQueue<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter(self)
    }
}

impl<'a, T> IntoIterator for &'a LinkedQueue<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn fifo_order_and_empty_sentinel() {
        let mut q = LinkedQueue::new();
        q.enqueue("a");
        q.enqueue("b");
        q.enqueue("c");

        assert_eq!(q.len(), 3);
        assert_eq!(q.peek(), Some(&"a"));
        assert_eq!(q.dequeue(), Some("a"));
        assert_eq!(q.dequeue(), Some("b"));
        assert_eq!(q.dequeue(), Some("c"));
        assert_eq!(q.dequeue(), None);
        assert_eq!(q.dequeue(), None);
        assert!(q.is_empty());
    }

    #[test]
    fn usable_after_draining() {
        let mut q = LinkedQueue::new();
        q.enqueue(1);
        assert_eq!(q.dequeue(), Some(1));

        q.enqueue(2);
        q.enqueue(3);
        assert_eq!(q.iter().copied().collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(q.dequeue(), Some(2));
        q.enqueue(4);
        assert_eq!(q.into_iter().collect::<Vec<_>>(), vec![3, 4]);
    }

    #[test]
    fn show_lists_head_to_tail() {
        let q: LinkedQueue<&str> = ["Request 1", "Request 2"].into_iter().collect();
        assert_eq!(q.show(), "Request 1\nRequest 2\n");
        assert_eq!(format!("{:?}", q), r#"["Request 1", "Request 2"]"#);
        assert_eq!(LinkedQueue::<u8>::new().show(), "");
    }

    #[test]
    fn tail_link_survives_interleaved_ops() {
        let mut q = LinkedQueue::new();
        for round in 0..50 {
            q.enqueue(format!("a{round}"));
            q.enqueue(format!("b{round}"));
            assert_eq!(q.dequeue(), Some(format!("a{round}")));
            assert_eq!(q.dequeue(), Some(format!("b{round}")));
            assert!(q.is_empty());
        }

        q.extend(["x".to_string(), "y".to_string(), "z".to_string()]);
        assert_eq!(q.dequeue().as_deref(), Some("x"));
        q.enqueue("w".to_string());
        assert_eq!(q.iter().map(String::as_str).collect::<Vec<_>>(), ["y", "z", "w"]);
        // leftover heap values are released by drop
    }

    #[test]
    fn dropping_a_long_queue_does_not_recurse() {
        let q: LinkedQueue<u32> = (0..200_000).collect();
        assert_eq!(q.len(), 200_000);
        drop(q);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Push(i32),
        Pop,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![any::<i32>().prop_map(Op::Push), Just(Op::Pop)]
    }

    proptest! {
        #[test]
        fn matches_vecdeque_model(ops in proptest::collection::vec(op(), 0..200)) {
            let mut q = LinkedQueue::new();
            let mut model = std::collections::VecDeque::new();

            for op in ops {
                match op {
                    Op::Push(v) => {
                        q.enqueue(v);
                        model.push_back(v);
                    }
                    Op::Pop => prop_assert_eq!(q.dequeue(), model.pop_front()),
                }
                prop_assert_eq!(q.len(), model.len());
                prop_assert_eq!(q.peek(), model.front());
            }
            prop_assert_eq!(q.into_iter().collect::<Vec<_>>(), model.into_iter().collect::<Vec<_>>());
        }
    }
}
