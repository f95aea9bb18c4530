//! LRU List Module
//!
//! Arena-backed doubly linked list that keeps cache entries in recency order.

// == Slot Handle ==
/// Index of a node in the arena.
pub type SlotIndex = usize;

/// Sentinel for a missing link.
const NIL: SlotIndex = usize::MAX;

#[derive(Debug)]
struct Node<T> {
    item: T,
    /// Neighbour closer to the LRU head
    prev: SlotIndex,
    /// Neighbour closer to the MRU tail
    next: SlotIndex,
}

// == LRU List ==
/// Recency-ordered list with O(1) push, unlink and move-to-back.
///
/// Nodes live in a contiguous `Vec`; links are slot indices. Freed slots are
/// recycled through a free list, so a handle stays valid until its node is
/// unlinked.
///
/// - Head = Least recently used
/// - Tail = Most recently used
#[derive(Debug)]
pub struct LruList<T> {
    slots: Vec<Option<Node<T>>>,
    free: Vec<SlotIndex>,
    head: SlotIndex,
    tail: SlotIndex,
    len: usize,
}

impl<T> Default for LruList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LruList<T> {
    // == Constructor ==
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: NIL,
            tail: NIL,
            len: 0,
        }
    }

    // == Push Back ==
    /// Appends an item at the MRU end and returns its handle.
    pub fn push_back(&mut self, item: T) -> SlotIndex {
        let node = Node {
            item,
            prev: self.tail,
            next: NIL,
        };

        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(node);
                idx
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        };

        self.attach_back(idx);
        self.len += 1;
        idx
    }

    // == Remove ==
    /// Unlinks the node at `idx` and returns its item.
    ///
    /// Returns None if the handle does not refer to a live node.
    pub fn remove(&mut self, idx: SlotIndex) -> Option<T> {
        self.slots.get(idx)?.as_ref()?;
        self.detach(idx);
        let node = self.slots[idx].take()?;
        self.free.push(idx);
        self.len -= 1;
        Some(node.item)
    }

    // == Pop Front ==
    /// Removes and returns the least recently used item.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.head == NIL {
            return None;
        }
        self.remove(self.head)
    }

    // == Move To Back ==
    /// Marks the node at `idx` as most recently used.
    pub fn move_to_back(&mut self, idx: SlotIndex) {
        if idx == self.tail || !self.is_live(idx) {
            return;
        }
        self.detach(idx);
        self.attach_back(idx);
    }

    // == Accessors ==
    /// Returns the item stored at `idx`.
    pub fn get(&self, idx: SlotIndex) -> Option<&T> {
        self.slots.get(idx)?.as_ref().map(|node| &node.item)
    }

    /// Returns the least recently used item without touching it.
    pub fn front(&self) -> Option<&T> {
        self.get(self.head)
    }

    /// Returns the most recently used item.
    pub fn back(&self) -> Option<&T> {
        self.get(self.tail)
    }

    /// Returns the number of live nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterates items from least to most recently used.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    // == Link Helpers ==
    fn is_live(&self, idx: SlotIndex) -> bool {
        matches!(self.slots.get(idx), Some(Some(_)))
    }

    fn node(&self, idx: SlotIndex) -> &Node<T> {
        match &self.slots[idx] {
            Some(node) => node,
            None => unreachable!("linked slot {idx} is vacant"),
        }
    }

    fn node_mut(&mut self, idx: SlotIndex) -> &mut Node<T> {
        match &mut self.slots[idx] {
            Some(node) => node,
            None => unreachable!("linked slot {idx} is vacant"),
        }
    }

    fn detach(&mut self, idx: SlotIndex) {
        let (prev, next) = {
            let node = self.node(idx);
            (node.prev, node.next)
        };

        if prev == NIL {
            self.head = next;
        } else {
            self.node_mut(prev).next = next;
        }

        if next == NIL {
            self.tail = prev;
        } else {
            self.node_mut(next).prev = prev;
        }

        let node = self.node_mut(idx);
        node.prev = NIL;
        node.next = NIL;
    }

    fn attach_back(&mut self, idx: SlotIndex) {
        let old_tail = self.tail;
        {
            let node = self.node_mut(idx);
            node.prev = old_tail;
            node.next = NIL;
        }

        if old_tail == NIL {
            self.head = idx;
        } else {
            self.node_mut(old_tail).next = idx;
        }
        self.tail = idx;
    }
}

// == Iterator ==
/// Iterator over list items, oldest first.
#[derive(Debug)]
pub struct Iter<'a, T> {
    list: &'a LruList<T>,
    cursor: SlotIndex,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == NIL {
            return None;
        }
        let list = self.list;
        let node = list.node(self.cursor);
        self.cursor = node.next;
        Some(&node.item)
    }
}
