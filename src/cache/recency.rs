//! Recency Index Module
//!
//! Tracks access order for LRU eviction in O(1) per operation.
//!
//! Keys live in an arena (`Vec<Node>`) linked into a doubly-linked list by
//! slot index, with a `HashMap` from key to slot. Freed slots are recycled.

use std::collections::HashMap;
use std::hash::Hash;

/// Null link.
const NIL: usize = usize::MAX;

#[derive(Debug)]
struct Node<K> {
    /// `None` while the slot sits on the free list
    key: Option<K>,
    /// Neighbour towards the oldest end
    prev: usize,
    /// Neighbour towards the newest end
    next: usize,
}

// == Recency Index ==
/// Total order over live keys, oldest first.
///
/// - `oldest` = least recently used, the next eviction victim
/// - `newest` = most recently read or written
#[derive(Debug)]
pub struct RecencyIndex<K> {
    nodes: Vec<Node<K>>,
    slots: HashMap<K, usize>,
    free: Vec<usize>,
    oldest: usize,
    newest: usize,
}

impl<K: Eq + Hash + Clone> RecencyIndex<K> {
    // == Constructor ==
    /// Creates a new empty index.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty index with room for `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            slots: HashMap::with_capacity(capacity),
            free: Vec::new(),
            oldest: NIL,
            newest: NIL,
        }
    }

    // == Touch ==
    /// Marks a key as most recently used, inserting it if new.
    pub fn touch(&mut self, key: &K) {
        if let Some(&slot) = self.slots.get(key) {
            if slot != self.newest {
                self.unlink(slot);
                self.link_newest(slot);
            }
            return;
        }

        let slot = self.allocate(key.clone());
        self.slots.insert(key.clone(), slot);
        self.link_newest(slot);
    }

    // == Remove ==
    /// Removes a key wherever it sits. Returns `false` if it was not tracked.
    pub fn remove(&mut self, key: &K) -> bool {
        match self.slots.remove(key) {
            Some(slot) => {
                self.unlink(slot);
                self.release(slot);
                true
            }
            None => false,
        }
    }

    // == Pop Oldest ==
    /// Returns and removes the least recently used key.
    pub fn pop_oldest(&mut self) -> Option<K> {
        if self.oldest == NIL {
            return None;
        }
        let slot = self.oldest;
        self.unlink(slot);
        let key = self.release(slot)?;
        self.slots.remove(&key);
        Some(key)
    }

    // == Peek ==
    /// Returns the least recently used key without removing it.
    pub fn peek_oldest(&self) -> Option<&K> {
        self.nodes.get(self.oldest).and_then(|node| node.key.as_ref())
    }

    /// Returns the most recently used key.
    pub fn peek_newest(&self) -> Option<&K> {
        self.nodes.get(self.newest).and_then(|node| node.key.as_ref())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.slots.contains_key(key)
    }

    /// Iterates keys from oldest to newest.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            nodes: &self.nodes,
            cursor: self.oldest,
        }
    }

    /// Drops every key and the arena with it.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.slots.clear();
        self.free.clear();
        self.oldest = NIL;
        self.newest = NIL;
    }

    // == Arena Plumbing ==
    fn allocate(&mut self, key: K) -> usize {
        let node = Node {
            key: Some(key),
            prev: NIL,
            next: NIL,
        };
        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = node;
                slot
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    fn release(&mut self, slot: usize) -> Option<K> {
        self.free.push(slot);
        self.nodes[slot].key.take()
    }

    fn unlink(&mut self, slot: usize) {
        let prev = self.nodes[slot].prev;
        let next = self.nodes[slot].next;

        if prev == NIL {
            self.oldest = next;
        } else {
            self.nodes[prev].next = next;
        }

        if next == NIL {
            self.newest = prev;
        } else {
            self.nodes[next].prev = prev;
        }

        self.nodes[slot].prev = NIL;
        self.nodes[slot].next = NIL;
    }

    fn link_newest(&mut self, slot: usize) {
        self.nodes[slot].prev = self.newest;
        self.nodes[slot].next = NIL;

        if self.newest == NIL {
            self.oldest = slot;
        } else {
            let newest = self.newest;
            self.nodes[newest].next = slot;
        }
        self.newest = slot;
    }
}

impl<K: Eq + Hash + Clone> Default for RecencyIndex<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Oldest-to-newest iterator over a [`RecencyIndex`].
pub struct Iter<'a, K> {
    nodes: &'a [Node<K>],
    cursor: usize,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.get(self.cursor)?;
        self.cursor = node.next;
        node.key.as_ref()
    }
}
