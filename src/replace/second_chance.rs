use std::collections::{HashMap, VecDeque};

use super::Replace;

/// FIFO queue where a set reference bit buys one trip back to the tail.
#[derive(Debug)]
pub struct SecondChance {
    capacity: usize,
    referenced: HashMap<usize, bool>,
    queue: VecDeque<usize>,
}

impl SecondChance {
    pub fn new(capacity: usize) -> Self {
        SecondChance {
            capacity,
            referenced: HashMap::with_capacity(capacity),
            queue: VecDeque::with_capacity(capacity),
        }
    }

    pub fn is_referenced(&self, addr: usize) -> Option<bool> {
        self.referenced.get(&addr).copied()
    }

    fn evict(&mut self) -> Option<usize> {
        // Terminates: each pass clears the bit it finds set.
        while let Some(head) = self.queue.pop_front() {
            match self.referenced.get_mut(&head) {
                Some(bit) if *bit => {
                    *bit = false;
                    self.queue.push_back(head);
                }
                _ => {
                    self.referenced.remove(&head);
                    return Some(head);
                }
            }
        }
        None
    }
}

impl Replace for SecondChance {
    fn probe(&mut self, addr: usize) -> bool {
        match self.referenced.get_mut(&addr) {
            Some(bit) => {
                *bit = true;
                true
            }
            None => false,
        }
    }

    fn insert(&mut self, addr: usize) -> Option<usize> {
        if self.probe(addr) {
            return None;
        }
        let victim = if self.queue.len() >= self.capacity {
            self.evict()
        } else {
            None
        };
        self.referenced.insert(addr, false);
        self.queue.push_back(addr);
        victim
    }

    fn contains(&self, addr: usize) -> bool {
        self.referenced.contains_key(&addr)
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
        self.referenced.clear();
    }
}
