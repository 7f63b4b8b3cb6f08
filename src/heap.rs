use std::fmt;

/// Priority queue backed by a binary heap stored in a flat `Vec`.
///
/// The ordering is a relation `lower(a, b)` that returns true when `a` has
/// strictly lower priority than `b`. It must be a strict weak ordering and is
/// never validated. The queue is `Send` but not synchronized; wrap it in a
/// lock to share it between threads.
pub struct HeapPQ<T> {
    data: Vec<T>,
    order: Box<dyn Fn(&T, &T) -> bool + Send>,
}

fn greater<T: PartialOrd>(a: &T, b: &T) -> bool {
    a > b
}

fn less<T: PartialOrd>(a: &T, b: &T) -> bool {
    a < b
}

// smallest surfaces first when ascending
fn flag_relation<T: PartialOrd>(ascending: bool) -> fn(&T, &T) -> bool {
    if ascending {
        greater::<T>
    } else {
        less::<T>
    }
}

impl<T: PartialOrd + 'static> HeapPQ<T> {
    pub fn new(ascending: bool) -> Self {
        Self::with_capacity(ascending, 0)
    }

    pub fn with_capacity(ascending: bool, capacity: usize) -> Self {
        HeapPQ::with_capacity_ordering_by(flag_relation(ascending), capacity)
    }

    pub fn from_vec(ascending: bool, items: Vec<T>) -> Self {
        HeapPQ::from_vec_ordering_by(flag_relation(ascending), items)
    }
}

impl<T> HeapPQ<T> {
    pub fn ordering_by<F>(lower: F) -> Self
    where
        F: Fn(&T, &T) -> bool + Send + 'static,
    {
        Self::with_capacity_ordering_by(lower, 0)
    }

    pub fn with_capacity_ordering_by<F>(lower: F, capacity: usize) -> Self
    where
        F: Fn(&T, &T) -> bool + Send + 'static,
    {
        HeapPQ {
            data: Vec::with_capacity(capacity),
            order: Box::new(lower),
        }
    }

    pub fn from_vec_ordering_by<F>(lower: F, items: Vec<T>) -> Self
    where
        F: Fn(&T, &T) -> bool + Send + 'static,
    {
        let mut heap = HeapPQ {
            data: items,
            order: Box::new(lower),
        };
        let len = heap.data.len();
        log::trace!("heapifying {} elements", len);
        // internal nodes only, deepest first
        for i in (0..len / 2).rev() {
            heap.sift_down(i);
        }
        heap
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Storage in heap order, not sorted order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn peek(&self) -> Option<&T> {
        self.data.first()
    }

    fn lower(&self, a: usize, b: usize) -> bool {
        (self.order)(&self.data[a], &self.data[b])
    }

    fn sift_up(&mut self, index: usize) {
        /* Propagate the element at `index` up through the heap as needed */
        if index > 0 {
            let parent_index = (index - 1) / 2;
            if self.lower(parent_index, index) {
                self.data.swap(index, parent_index);
                self.sift_up(parent_index)
            }
        }
    }

    fn sift_down(&mut self, index: usize) {
        /* Fix the heap property when a new element is at `index` */
        let len = self.data.len();
        let child_1_idx = 2 * index + 1;
        let child_2_idx = 2 * index + 2;
        let candidate = if child_2_idx < len {
            // left only when strictly higher, so ties go right
            if self.lower(child_2_idx, child_1_idx) {
                child_1_idx
            } else {
                child_2_idx
            }
        } else if child_1_idx < len {
            child_1_idx
        } else {
            return;
        };
        if self.lower(index, candidate) {
            self.data.swap(index, candidate);
            self.sift_down(candidate)
        }
    }

    pub fn push(&mut self, value: T) {
        self.data.push(value);
        self.sift_up(self.data.len() - 1);
    }

    pub fn pop(&mut self) -> Option<T> {
        match self.data.len() {
            0 => None,
            1 => self.data.pop(),
            len => {
                self.data.swap(0, len - 1);
                let result = self.data.pop();
                self.sift_down(0);
                result
            }
        }
    }

    pub fn clear(&mut self) {
        log::trace!("clearing {} elements", self.data.len());
        self.data.clear();
    }

    pub fn drain(&mut self) -> Drain<'_, T> {
        Drain { heap: self }
    }

    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.len());
        sorted.extend(self.drain());
        sorted
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T: PartialOrd + 'static> Default for HeapPQ<T> {
    fn default() -> Self {
        HeapPQ::new(false)
    }
}

impl<T: PartialOrd + 'static> From<Vec<T>> for HeapPQ<T> {
    fn from(v: Vec<T>) -> Self {
        HeapPQ::from_vec(false, v)
    }
}

impl<T> Extend<T> for HeapPQ<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.data.reserve(iter.size_hint().0);
        for value in iter {
            self.push(value);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for HeapPQ<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeapPQ").field("data", &self.data).finish()
    }
}

pub struct Drain<'a, T> {
    heap: &'a mut HeapPQ<T>,
}

impl<'a, T> Iterator for Drain<'a, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.heap.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.heap.len();
        (len, Some(len))
    }
}

impl<'a, T> ExactSizeIterator for Drain<'a, T> {}

impl<'a, T> Drop for Drain<'a, T> {
    fn drop(&mut self) {
        // whatever was not yielded is discarded
        self.heap.clear();
    }
}
