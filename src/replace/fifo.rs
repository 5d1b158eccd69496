use std::collections::{HashSet, VecDeque};

use super::Replace;

/// Evicts in insertion order; hits never reorder. Also backs the RAM stage.
#[derive(Debug)]
pub struct Fifo {
    capacity: usize,
    queue: VecDeque<usize>,
    members: HashSet<usize>,
}

impl Fifo {
    pub fn new(capacity: usize) -> Self {
        Fifo {
            capacity,
            queue: VecDeque::with_capacity(capacity),
            members: HashSet::with_capacity(capacity),
        }
    }
}

impl Replace for Fifo {
    fn probe(&mut self, addr: usize) -> bool {
        self.members.contains(&addr)
    }

    fn insert(&mut self, addr: usize) -> Option<usize> {
        if self.members.contains(&addr) {
            return None;
        }
        let victim = if self.queue.len() >= self.capacity {
            self.queue.pop_front()
        } else {
            None
        };
        if let Some(victim) = victim {
            self.members.remove(&victim);
        }
        self.queue.push_back(addr);
        self.members.insert(addr);
        victim
    }

    fn contains(&self, addr: usize) -> bool {
        self.members.contains(&addr)
    }

    fn len(&self) -> usize {
        self.queue.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn resident(&self) -> Vec<usize> {
        self.queue.iter().copied().collect()
    }

    fn clear(&mut self) {
        self.queue.clear();
        self.members.clear();
    }
}
